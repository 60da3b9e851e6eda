use alloy::primitives::U256;
use primitives::errors::EvmError;

use crate::{Evm, word_to_usize};

/// MLOAD opcode handler
/// - Semantics: pop offset, push the 32-byte word there; the access expands
///   memory like a write would.
pub fn m_load(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let offset = word_to_usize(evm.stack.pop()?)?;
    let word = evm.memory.load_word(offset)?;
    evm.stack.push(word)
}

/// MSTORE opcode handler
/// - Semantics: pop offset, pop value, store the 32-byte word at
///   memory[offset..offset + 32].
pub fn m_store(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let offset = word_to_usize(evm.stack.pop()?)?;
    let value = evm.stack.pop()?;
    evm.memory.store_word(offset, value)
}

/// MSTORE8 opcode handler
/// - Semantics: pop offset, pop value, store the least significant byte of
///   the value at memory[offset].
pub fn m_store8(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let offset = word_to_usize(evm.stack.pop()?)?;
    let value = evm.stack.pop()?;
    evm.memory.store_byte(offset, value.byte(0))
}

/// MSIZE opcode handler
/// - Semantics: push the current memory size in bytes, always a multiple
///   of 32.
pub fn m_size(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    evm.stack.push(U256::from(evm.memory.size()))
}

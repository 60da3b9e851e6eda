use alloy::primitives::U256;
use primitives::{errors::EvmError, evm_types::address_word};

use crate::{Evm, word_to_usize};

/// ADDRESS opcode handler
/// - Semantics: push the executing account's address as a 32-byte
///   left-padded word.
pub fn address(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    evm.stack.push(address_word(evm.context.address))
}

/// ORIGIN opcode handler
/// - Semantics: push the transaction origin address, padded like ADDRESS.
pub fn origin(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    evm.stack.push(address_word(evm.context.origin))
}

/// CALLER opcode handler
pub fn caller(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    evm.stack.push(address_word(evm.context.caller))
}

/// CALLVALUE opcode handler
/// - Semantics: push the wei sent along with the call.
pub fn call_value(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    evm.stack.push(evm.context.callvalue)
}

/// CALLDATALOAD opcode handler
/// - Semantics: pop offset, push the 32 calldata bytes starting there;
///   bytes past the end read as zero, as does any offset too wide for the
///   address space.
pub fn call_data_load(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let offset = evm.stack.pop()?;

    let mut buf = [0u8; 32];
    if let Ok(offset) = usize::try_from(offset) {
        let data = evm.context.calldata.as_ref();
        if offset < data.len() {
            let avail = (data.len() - offset).min(32);
            buf[..avail].copy_from_slice(&data[offset..offset + avail]);
        }
    }
    evm.stack.push(U256::from_be_bytes(buf))
}

/// CALLDATASIZE opcode handler
pub fn call_data_size(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    evm.stack.push(U256::from(evm.context.calldata.len()))
}

/// CALLDATACOPY opcode handler
/// - Semantics: pop destination offset, source offset and size, then copy
///   calldata into memory with zero-fill past the end and expansion.
pub fn call_data_copy(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let dest = word_to_usize(evm.stack.pop()?)?;
    let src = evm.stack.pop()?;
    let size = word_to_usize(evm.stack.pop()?)?;

    // A source offset past the calldata zero-fills the whole range.
    let src = usize::try_from(src).unwrap_or(usize::MAX);
    evm.memory
        .copy_in(dest, evm.context.calldata.as_ref(), src, size)
}

/// COINBASE opcode handler
/// - Semantics: push the block's coinbase address as a padded word.
pub fn coin_base(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    evm.stack.push(address_word(evm.context.coinbase))
}

/// TIMESTAMP opcode handler
pub fn timestamp(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    evm.stack.push(evm.context.timestamp)
}

/// NUMBER opcode handler
pub fn number(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    evm.stack.push(evm.context.number)
}

/// DIFFICULTY opcode handler
pub fn difficulty(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    evm.stack.push(evm.context.difficulty)
}

/// GASLIMIT opcode handler
pub fn gas_limit(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    evm.stack.push(evm.context.gas_limit)
}

/// CHAINID opcode handler
pub fn chain_id(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    evm.stack.push(evm.context.chain_id)
}

/// BASEFEE opcode handler
pub fn base_fee(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    evm.stack.push(evm.context.base_fee)
}

/// GAS opcode handler
/// - Semantics: nothing here meters gas, so this pushes the block gas
///   limit verbatim; constant for the whole invocation.
pub fn gas(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    evm.stack.push(evm.context.gas_limit)
}

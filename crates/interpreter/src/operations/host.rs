use primitives::{errors::EvmError, evm_types::word_address};

use crate::Evm;

/// BALANCE opcode handler
/// - Semantics: pop an address word, push that account's balance; unknown
///   accounts have balance zero.
pub fn balance(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let address = word_address(evm.stack.pop()?);
    evm.stack.push(evm.context.balance_of(address))
}

/// SELFBALANCE opcode handler
/// - Semantics: push the balance of the executing account.
pub fn self_balance(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    evm.stack.push(evm.context.balance_of(evm.context.address))
}

/// SLOAD opcode handler
/// - Semantics: pop a slot key, push the stored word; never-written slots
///   read as zero.
pub fn s_load(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let key = evm.stack.pop()?;
    let word = evm.storage.load(key);
    evm.stack.push(word)
}

/// SSTORE opcode handler
/// - Semantics: pop key, pop value, write the slot; writing zero removes
///   the mapping.
pub fn s_store(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let key = evm.stack.pop()?;
    let value = evm.stack.pop()?;
    evm.storage.store(key, value);
    Ok(())
}

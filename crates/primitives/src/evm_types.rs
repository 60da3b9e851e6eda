use std::collections::HashMap;

use alloy::primitives::{Address, B256, Bytes, U256};

/// Immutable snapshot of everything an invocation may read about the world:
/// transaction fields, block fields, account balances and calldata. Shared
/// by reference across invocations; only the interpreter's own working set
/// is mutable.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    pub origin: Address,
    pub caller: Address,
    /// The executing account.
    pub address: Address,
    pub callvalue: U256,
    pub coinbase: Address,
    pub timestamp: U256,
    pub number: U256,
    pub gas_limit: U256,
    pub difficulty: U256,
    pub chain_id: U256,
    pub base_fee: U256,
    /// Account balances, defaulting to zero for unknown accounts.
    pub balances: HashMap<Address, U256>,
    /// Read-only input bytes supplied by the caller.
    pub calldata: Bytes,
}

impl ExecutionContext {
    /// Balance of `address`, zero when the account is unknown.
    pub fn balance_of(&self, address: Address) -> U256 {
        self.balances.get(&address).copied().unwrap_or_default()
    }
}

/// A 20-byte address as a 32-byte word, zero-padded on the left.
pub fn address_word(address: Address) -> U256 {
    U256::from_be_bytes(address.into_word().0)
}

/// The low 20 bytes of a word as an address.
pub fn word_address(word: U256) -> Address {
    Address::from_word(B256::from(word))
}

/// Pre-allocation hints for one invocation's working set. Hints only: none
/// of them bounds what the program may use.
#[derive(Debug, Clone, Copy)]
pub struct SizeHints {
    pub stack_slots: usize,
    pub storage_slots: usize,
    pub memory_words: usize,
}

impl Default for SizeHints {
    fn default() -> Self {
        SizeHints {
            stack_slots: 32,
            storage_slots: 10,
            memory_words: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn address_words_are_left_padded() {
        let addr = address!("ffeeddccbbaa99887766554433221100ffeeddcc");
        let word = address_word(addr);

        assert_eq!(word >> 160, U256::ZERO);
        assert_eq!(word_address(word), addr);
    }

    #[test]
    fn word_address_keeps_the_low_twenty_bytes() {
        let word = U256::MAX;
        assert_eq!(
            word_address(word),
            address!("ffffffffffffffffffffffffffffffffffffffff")
        );
    }

    #[test]
    fn unknown_accounts_have_zero_balance() {
        let context = ExecutionContext::default();
        assert_eq!(context.balance_of(Address::ZERO), U256::ZERO);

        let mut funded = ExecutionContext::default();
        funded.balances.insert(Address::ZERO, U256::from(100));
        assert_eq!(funded.balance_of(Address::ZERO), U256::from(100));
    }
}

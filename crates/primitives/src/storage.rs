use std::collections::HashMap;

use alloy::primitives::U256;

/// Persistent key/value slots of the executing account. Absent keys read as
/// zero, and storing zero deletes the slot, so the map only ever holds
/// non-default values.
#[derive(Debug, Clone, Default)]
pub struct Storage {
    pub data: HashMap<U256, U256>,
}

impl Storage {
    pub fn new() -> Self {
        Storage {
            data: HashMap::new(),
        }
    }

    /// Pre-allocate room for `slots` entries.
    pub fn with_capacity(slots: usize) -> Self {
        Storage {
            data: HashMap::with_capacity(slots),
        }
    }

    /// SLOAD: the word at `key`, zero when the slot was never written.
    pub fn load(&self, key: U256) -> U256 {
        self.data.get(&key).copied().unwrap_or_default()
    }

    /// SSTORE: write `value` at `key`. Writing zero removes the mapping,
    /// which is indistinguishable from the default.
    pub fn store(&mut self, key: U256, value: U256) {
        if value.is_zero() {
            self.data.remove(&key);
        } else {
            self.data.insert(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

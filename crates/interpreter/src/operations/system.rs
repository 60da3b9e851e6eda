use primitives::errors::EvmError;

use crate::{Evm, word_to_usize};

/// SHA3 opcode handler
/// - Semantics: pop offset, pop size, push the KECCAK-256 of that memory
///   range as a word; the access expands memory.
pub fn sha3(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let offset = word_to_usize(evm.stack.pop()?)?;
    let size = word_to_usize(evm.stack.pop()?)?;
    let hash = evm.memory.keccak(offset, size)?;
    evm.stack.push(hash)
}

/// POP opcode handler
/// - Semantics: discard the top stack element.
pub fn pop(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    evm.stack.pop()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{U256, b256, keccak256};
    use primitives::{
        evm_types::{ExecutionContext, SizeHints},
        storage::Storage,
    };

    #[test]
    fn sha3_hashes_the_memory_range() {
        let ctx = ExecutionContext::default();
        let mut storage = Storage::default();
        let mut evm = Evm::new(&ctx, &[], &mut storage, SizeHints::default());

        evm.memory.store_word(0, U256::from(1)).unwrap();

        // SHA3 pops offset then size
        evm.stack.push(U256::from(32)).unwrap();
        evm.stack.push(U256::ZERO).unwrap();
        sha3(&mut evm).unwrap();

        let expected = keccak256(U256::from(1).to_be_bytes::<32>());
        assert_eq!(evm.stack.pop(), Ok(U256::from_be_bytes(expected.0)));
    }

    #[test]
    fn sha3_of_an_empty_range_is_the_empty_hash() {
        let ctx = ExecutionContext::default();
        let mut storage = Storage::default();
        let mut evm = Evm::new(&ctx, &[], &mut storage, SizeHints::default());

        evm.stack.push(U256::ZERO).unwrap();
        evm.stack.push(U256::from(1000)).unwrap();
        sha3(&mut evm).unwrap();

        let empty = b256!("c5d2460186f7233c907e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");
        assert_eq!(evm.stack.pop(), Ok(U256::from_be_bytes(empty.0)));
        // No bytes were touched, so memory stays empty
        assert_eq!(evm.memory.size(), 0);
    }
}

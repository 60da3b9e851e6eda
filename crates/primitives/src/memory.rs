use crate::errors::EvmError;
use alloy::primitives::{U256, keccak256};

/// Flat, zero-initialised, byte-addressed scratch memory. The logical size
/// is always a multiple of 32; every non-empty access grows the buffer to
/// the 32-byte boundary covering it first, so reads past the previous size
/// observe zeroes.
#[derive(Default, Debug, Clone)]
pub struct Memory {
    pub data: Vec<u8>,
}

impl Memory {
    pub fn new() -> Self {
        Memory { data: Vec::new() }
    }

    /// Pre-allocate room for `words` 32-byte words. A hint, not a size: the
    /// logical size stays zero until something is accessed.
    pub fn with_capacity(words: usize) -> Self {
        Memory {
            data: Vec::with_capacity(words.saturating_mul(32)),
        }
    }

    /// Current logical size in bytes. Always a multiple of 32.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Grow the buffer to `ceil32(offset + len)`. Zero-length ranges leave
    /// the size untouched. Ranges whose end does not fit the address space
    /// fail with the bad-bounds kind.
    pub fn expand(&mut self, offset: usize, len: usize) -> Result<(), EvmError> {
        if len == 0 {
            return Ok(());
        }
        let end = offset.checked_add(len).ok_or(EvmError::BadReturnBounds)?;
        let target = end.checked_add(31).ok_or(EvmError::BadReturnBounds)? & !31;
        if target > self.data.len() {
            self.data.resize(target, 0);
        }
        Ok(())
    }

    /// Load the 32-byte word at `offset`, expanding first.
    pub fn load_word(&mut self, offset: usize) -> Result<U256, EvmError> {
        self.expand(offset, 32)?;
        Ok(U256::from_be_slice(&self.data[offset..offset + 32]))
    }

    /// Store a 32-byte word at `offset`, expanding first.
    pub fn store_word(&mut self, offset: usize, word: U256) -> Result<(), EvmError> {
        self.expand(offset, 32)?;
        self.data[offset..offset + 32].copy_from_slice(&word.to_be_bytes::<32>());
        Ok(())
    }

    /// Store a single byte at `offset`, expanding first.
    pub fn store_byte(&mut self, offset: usize, byte: u8) -> Result<(), EvmError> {
        self.expand(offset, 1)?;
        self.data[offset] = byte;
        Ok(())
    }

    /// KECCAK-256 of `[offset, offset + len)` as a word, expanding first.
    /// A zero-length range hashes the empty string.
    pub fn keccak(&mut self, offset: usize, len: usize) -> Result<U256, EvmError> {
        let bytes = self.slice(offset, len)?;
        Ok(U256::from_be_bytes(keccak256(bytes).0))
    }

    /// Copy `len` bytes of `src` starting at `src_offset` into memory at
    /// `offset`. Source bytes past the end of `src` are written as zero, so
    /// a `src_offset` beyond the source zero-fills the whole range.
    pub fn copy_in(
        &mut self,
        offset: usize,
        src: &[u8],
        src_offset: usize,
        len: usize,
    ) -> Result<(), EvmError> {
        if len == 0 {
            return Ok(());
        }
        self.expand(offset, len)?;
        let dst = &mut self.data[offset..offset + len];
        let avail = src.len().saturating_sub(src_offset).min(len);
        if avail > 0 {
            dst[..avail].copy_from_slice(&src[src_offset..src_offset + avail]);
        }
        dst[avail..].fill(0);
        Ok(())
    }

    /// Borrow `[offset, offset + len)`, expanding first. Empty when
    /// `len == 0`.
    pub fn slice(&mut self, offset: usize, len: usize) -> Result<&[u8], EvmError> {
        if len == 0 {
            return Ok(&[]);
        }
        self.expand(offset, len)?;
        Ok(&self.data[offset..offset + len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::b256;

    #[test]
    fn store_load_roundtrip() {
        let mut memory = Memory::new();
        let value = U256::from(0xdead_beef_u64);

        memory.store_word(0, value).unwrap();
        assert_eq!(memory.load_word(0), Ok(value));
        assert_eq!(memory.size(), 32);
    }

    #[test]
    fn unaligned_access_rounds_size_to_words() {
        let mut memory = Memory::new();

        // A word at offset 5 touches bytes 5..37, so the size covers 64.
        memory.store_word(5, U256::MAX).unwrap();
        assert_eq!(memory.size(), 64);
        assert_eq!(memory.load_word(5), Ok(U256::MAX));
    }

    #[test]
    fn reads_past_size_observe_zero_and_grow() {
        let mut memory = Memory::new();
        assert_eq!(memory.size(), 0);

        assert_eq!(memory.load_word(96), Ok(U256::ZERO));
        assert_eq!(memory.size(), 128);
    }

    #[test]
    fn zero_length_access_does_not_grow() {
        let mut memory = Memory::new();
        assert_eq!(memory.slice(1000, 0), Ok(&[][..]));
        assert_eq!(memory.size(), 0);
    }

    #[test]
    fn store_byte_writes_one_byte() {
        let mut memory = Memory::new();
        memory.store_byte(31, 0x7f).unwrap();

        assert_eq!(memory.size(), 32);
        assert_eq!(memory.load_word(0), Ok(U256::from(0x7f)));
    }

    #[test]
    fn copy_in_zero_fills_past_source_end() {
        let mut memory = Memory::new();
        memory.store_word(0, U256::MAX).unwrap();

        // Only two source bytes exist; the rest of the range must be zeroed
        // even though the memory held ones before.
        memory.copy_in(0, &[0xaa, 0xbb], 0, 8).unwrap();
        assert_eq!(&memory.data[..8], &[0xaa, 0xbb, 0, 0, 0, 0, 0, 0]);

        // A source offset beyond the source zero-fills everything.
        memory.copy_in(8, &[0xaa, 0xbb], 5, 4).unwrap();
        assert_eq!(&memory.data[8..12], &[0, 0, 0, 0]);
    }

    #[test]
    fn keccak_of_empty_range() {
        let mut memory = Memory::new();
        let empty = b256!("c5d2460186f7233c907e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");

        assert_eq!(memory.keccak(0, 0), Ok(U256::from_be_bytes(empty.0)));
        assert_eq!(memory.size(), 0);
    }

    #[test]
    fn keccak_hashes_the_requested_range() {
        let mut memory = Memory::new();
        memory.copy_in(0, b"abc", 0, 3).unwrap();

        let abc = b256!("4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45");
        assert_eq!(memory.keccak(0, 3), Ok(U256::from_be_bytes(abc.0)));
    }

    #[test]
    fn overflowing_range_is_rejected() {
        let mut memory = Memory::new();
        assert_eq!(
            memory.expand(usize::MAX - 8, 32),
            Err(EvmError::BadReturnBounds)
        );
    }
}

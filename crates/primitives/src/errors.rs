use thiserror::Error;

/// Failure kinds that abort an invocation. The `Display` output of each
/// variant is the exact ASCII reason handed back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvmError {
    /// An unassigned opcode byte was fetched from a code position.
    #[error("invalid op")]
    InvalidOpcode,
    /// JUMP/JUMPI target is not a JUMPDEST outside push data.
    #[error("invalid jump")]
    InvalidJump,
    /// Pop, peek, dup or swap reached below the stack bottom.
    #[error("stack underflow")]
    StackUnderflow,
    /// Push would grow the stack past 1024 items.
    #[error("stack overflow")]
    StackOverflow,
    /// A memory range whose offset or size does not fit the address space;
    /// in practice a RETURN/REVERT with absurd operands.
    #[error("bad return")]
    BadReturnBounds,
}

impl EvmError {
    /// Reason bytes returned to the host when this error halts the loop.
    pub fn reason(&self) -> &'static str {
        match self {
            EvmError::InvalidOpcode => "invalid op",
            EvmError::InvalidJump => "invalid jump",
            EvmError::StackUnderflow => "stack underflow",
            EvmError::StackOverflow => "stack overflow",
            EvmError::BadReturnBounds => "bad return",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_reason_bytes() {
        for err in [
            EvmError::InvalidOpcode,
            EvmError::InvalidJump,
            EvmError::StackUnderflow,
            EvmError::StackOverflow,
            EvmError::BadReturnBounds,
        ] {
            assert_eq!(err.to_string(), err.reason());
        }
    }
}

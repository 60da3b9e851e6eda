use alloy::primitives::{I256, U256};
use primitives::errors::EvmError;

use crate::Evm;

/// LT opcode handler (unsigned less-than)
/// - Semantics: pop `a` (top), pop `b`, push 1 if `a < b` else 0.
pub fn lt(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(U256::from(a < b))
}

/// GT opcode handler (unsigned greater-than)
pub fn gt(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(U256::from(a > b))
}

/// SLT opcode handler (signed less-than)
/// - Semantics: compare the operands as two's-complement values.
pub fn slt(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(U256::from(I256::from_raw(a) < I256::from_raw(b)))
}

/// SGT opcode handler (signed greater-than)
pub fn sgt(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(U256::from(I256::from_raw(a) > I256::from_raw(b)))
}

/// EQ opcode handler
pub fn eq(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(U256::from(a == b))
}

/// ISZERO opcode handler
/// - Semantics: pop value, push 1 if it is zero else 0.
pub fn is_zero(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let value = evm.stack.pop()?;
    evm.stack.push(U256::from(value.is_zero()))
}

/// AND opcode handler (bitwise)
pub fn and(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(a & b)
}

/// OR opcode handler (bitwise)
pub fn or(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(a | b)
}

/// XOR opcode handler (bitwise)
pub fn xor(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(a ^ b)
}

/// NOT opcode handler (bitwise complement)
pub fn not(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let value = evm.stack.pop()?;
    evm.stack.push(!value)
}

/// BYTE opcode handler
/// - Semantics: pop index `i`, pop `x`; push byte `i` of `x` counting from
///   the most significant end, or 0 when `i >= 32`.
pub fn byte(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let index = evm.stack.pop()?;
    let value = evm.stack.pop()?;

    if index >= U256::from(32) {
        evm.stack.push(U256::ZERO)
    } else {
        let byte = value.to_be_bytes::<32>()[index.to::<usize>()];
        evm.stack.push(U256::from(byte))
    }
}

/// SHL opcode handler (EIP-145)
/// - Semantics: pop shift, pop value; shifts of 256 or more push 0.
pub fn shl(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let shift = evm.stack.pop()?;
    let value = evm.stack.pop()?;

    if shift >= U256::from(256) {
        evm.stack.push(U256::ZERO)
    } else {
        evm.stack.push(value << shift.to::<usize>())
    }
}

/// SHR opcode handler (EIP-145, logical)
pub fn shr(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let shift = evm.stack.pop()?;
    let value = evm.stack.pop()?;

    if shift >= U256::from(256) {
        evm.stack.push(U256::ZERO)
    } else {
        evm.stack.push(value >> shift.to::<usize>())
    }
}

/// SAR opcode handler (EIP-145, arithmetic)
/// - Semantics: shift right filling with the sign bit; shifts of 256 or
///   more collapse to all-ones for negative values and zero otherwise.
pub fn sar(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let shift = evm.stack.pop()?;
    let value = evm.stack.pop()?;

    let signed = I256::from_raw(value);
    if shift >= U256::from(256) {
        if signed.is_negative() {
            evm.stack.push(U256::MAX)
        } else {
            evm.stack.push(U256::ZERO)
        }
    } else {
        evm.stack.push(signed.asr(shift.to::<usize>()).into_raw())
    }
}

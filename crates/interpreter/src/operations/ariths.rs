use alloy::primitives::{I256, U256};
use primitives::errors::EvmError;

use crate::Evm;

// ref == https://www.evm.codes/

/// ADD opcode handler
/// - Semantics: pop `a` (top) and `b`, push `a + b` reduced mod 2^256.
pub fn add(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(a.wrapping_add(b))
}

/// MUL opcode handler
/// - Semantics: pop `a`, pop `b`, push `a * b` mod 2^256.
pub fn mul(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(a.wrapping_mul(b))
}

/// SUB opcode handler
/// - Semantics: pop `a` (top), pop `b`, push `a - b`; negatives wrap in the
///   unsigned interpretation.
pub fn sub(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(a.wrapping_sub(b))
}

/// DIV opcode handler (unsigned)
/// - Semantics: pop `a` and `b`; if `b == 0` push 0, else push `a / b`.
pub fn div(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    if b == U256::ZERO {
        evm.stack.push(U256::ZERO)
    } else {
        evm.stack.push(a / b)
    }
}

/// SDIV opcode handler (signed division)
/// - Semantics: two's-complement division. Division by zero pushes zero,
///   and MIN / -1 wraps back to MIN rather than trapping.
pub fn sdiv(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;

    let a_int = I256::from_raw(a);
    let b_int = I256::from_raw(b);

    if b_int == I256::ZERO {
        evm.stack.push(U256::ZERO)
    } else if a_int == I256::MIN && b_int == I256::MINUS_ONE {
        evm.stack.push(a)
    } else {
        evm.stack.push((a_int / b_int).into_raw())
    }
}

/// MOD opcode handler (unsigned modulo)
/// - Semantics: pop `a`, pop `b`; if `b == 0` push 0 else push `a % b`.
pub fn modulo(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    if b == U256::ZERO {
        evm.stack.push(U256::ZERO)
    } else {
        evm.stack.push(a % b)
    }
}

/// SMOD opcode handler (signed modulo)
/// - Semantics: truncated signed remainder, so the sign follows the
///   dividend. Modulo by zero pushes zero; any `a % -1` is zero.
pub fn smod(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;

    let a_int = I256::from_raw(a);
    let b_int = I256::from_raw(b);

    if b_int == I256::ZERO || b_int == I256::MINUS_ONE {
        evm.stack.push(U256::ZERO)
    } else {
        evm.stack.push((a_int % b_int).into_raw())
    }
}

/// ADDMOD opcode handler
/// - Semantics: pop `a`, `b`, `n`, push `(a + b) % n` over the exact
///   512-bit sum; `n == 0` pushes 0 (ruint's `add_mod` convention).
pub fn addmod(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    let n = evm.stack.pop()?;
    evm.stack.push(a.add_mod(b, n))
}

/// MULMOD opcode handler
/// - Semantics: pop `a`, `b`, `n`, push `(a * b) % n` over the exact
///   512-bit product; `n == 0` pushes 0.
pub fn mulmod(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    let n = evm.stack.pop()?;
    evm.stack.push(a.mul_mod(b, n))
}

/// EXP opcode handler
/// - Semantics: pop base, pop exponent, push base^exponent mod 2^256.
pub fn exp(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let base = evm.stack.pop()?;
    let exponent = evm.stack.pop()?;
    evm.stack.push(base.pow(exponent))
}

/// SIGNEXTEND opcode handler
/// - Semantics: pop `b`, pop `x`; for `b >= 31` push `x` unchanged, else
///   extend the sign bit of byte `b` (0 = least significant) leftwards.
pub fn signextend(evm: &mut Evm<'_>) -> Result<(), EvmError> {
    let b = evm.stack.pop()?;
    let x = evm.stack.pop()?;

    if b >= U256::from(31) {
        return evm.stack.push(x);
    }

    let bit = b.to::<usize>() * 8 + 7;
    let mask = (U256::ONE << (bit + 1)) - U256::ONE;
    if x.bit(bit) {
        evm.stack.push(x | !mask)
    } else {
        evm.stack.push(x & mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitives::{
        evm_types::{ExecutionContext, SizeHints},
        storage::Storage,
    };

    /// Push operands bottom-up, run the handler, pop the result.
    fn result(
        handler: fn(&mut Evm<'_>) -> Result<(), EvmError>,
        operands: &[U256],
    ) -> U256 {
        let ctx = ExecutionContext::default();
        let mut storage = Storage::default();
        let mut evm = Evm::new(&ctx, &[], &mut storage, SizeHints::default());
        for value in operands {
            evm.stack.push(*value).unwrap();
        }
        handler(&mut evm).unwrap();
        evm.stack.pop().unwrap()
    }

    /// Two's-complement encoding of `-n`.
    fn neg(n: u64) -> U256 {
        U256::ZERO.wrapping_sub(U256::from(n))
    }

    #[test]
    fn add_wraps_modulo_two_to_the_256() {
        // a = 1 (top), b = MAX: 1 + MAX wraps to 0
        assert_eq!(result(add, &[U256::MAX, U256::from(1)]), U256::ZERO);
    }

    #[test]
    fn sub_takes_the_top_as_minuend() {
        // a = 2, b = 5: 2 - 5 wraps
        assert_eq!(
            result(sub, &[U256::from(5), U256::from(2)]),
            neg(3)
        );
    }

    #[test]
    fn division_by_zero_is_zero() {
        assert_eq!(result(div, &[U256::ZERO, U256::from(10)]), U256::ZERO);
        assert_eq!(result(modulo, &[U256::ZERO, U256::from(10)]), U256::ZERO);
        assert_eq!(result(sdiv, &[U256::ZERO, neg(10)]), U256::ZERO);
        assert_eq!(result(smod, &[U256::ZERO, neg(10)]), U256::ZERO);
    }

    #[test]
    fn sdiv_min_by_minus_one_wraps_to_min() {
        let min = I256::MIN.into_raw();
        assert_eq!(result(sdiv, &[neg(1), min]), min);
    }

    #[test]
    fn sdiv_rounds_toward_zero() {
        // -7 / 2 == -3
        assert_eq!(result(sdiv, &[U256::from(2), neg(7)]), neg(3));
    }

    #[test]
    fn smod_sign_follows_the_dividend() {
        // -5 % 3 == -2, 5 % -3 == 2
        assert_eq!(result(smod, &[U256::from(3), neg(5)]), neg(2));
        assert_eq!(result(smod, &[neg(3), U256::from(5)]), U256::from(2));
    }

    #[test]
    fn addmod_uses_the_full_sum() {
        // (MAX + 2) overflows 256 bits; mod 3 the exact sum is 2
        assert_eq!(
            result(addmod, &[U256::from(3), U256::from(2), U256::MAX]),
            U256::from(2)
        );
        assert_eq!(
            result(addmod, &[U256::ZERO, U256::from(2), U256::from(1)]),
            U256::ZERO
        );
    }

    #[test]
    fn mulmod_uses_the_full_product() {
        // 2^255 * 4 == 2^257; mod 7 that is 4
        let big = U256::ONE << 255;
        assert_eq!(
            result(mulmod, &[U256::from(7), U256::from(4), big]),
            U256::from(4)
        );
        assert_eq!(
            result(mulmod, &[U256::ZERO, U256::from(4), big]),
            U256::ZERO
        );
    }

    #[test]
    fn exp_wraps() {
        assert_eq!(
            result(exp, &[U256::from(10), U256::from(2)]),
            U256::from(1024)
        );
        // 2^256 wraps to zero
        assert_eq!(
            result(exp, &[U256::from(256), U256::from(2)]),
            U256::ZERO
        );
    }

    #[test]
    fn signextend_extends_from_the_named_byte() {
        // 0xff as a signed byte is -1
        assert_eq!(result(signextend, &[U256::from(0xff), U256::ZERO]), U256::MAX);
        // 0x7f stays positive
        assert_eq!(
            result(signextend, &[U256::from(0x7f), U256::ZERO]),
            U256::from(0x7f)
        );
        // byte 1: 0x1234 -> sign bit of 0x12 is clear
        assert_eq!(
            result(signextend, &[U256::from(0xff1234u64), U256::from(1)]),
            U256::from(0x1234)
        );
    }

    #[test]
    fn signextend_is_identity_for_wide_positions() {
        let x = U256::MAX - U256::from(5);
        assert_eq!(result(signextend, &[x, U256::from(31)]), x);
        assert_eq!(result(signextend, &[x, U256::MAX]), x);
    }
}

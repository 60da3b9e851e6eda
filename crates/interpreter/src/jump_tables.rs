use crate::{
    Evm,
    opcodes::*,
    operations::{ariths, bitwise, context, host, memory, system},
};
use primitives::errors::EvmError;

/// Handler shape shared by every table entry: mutate the working set
/// through the borrowed [`Evm`], or fail with the error that aborts the
/// invocation.
pub type OpcodeFn = fn(&mut Evm<'_>) -> Result<(), EvmError>;

/// Entry for every unassigned opcode byte.
pub fn invalid(_evm: &mut Evm<'_>) -> Result<(), EvmError> {
    Err(EvmError::InvalidOpcode)
}

/// Build the opcode -> handler table. Control-flow classes (PUSH/DUP/SWAP,
/// the jumps, PC, CODESIZE/CODECOPY and the terminators) are routed inline
/// by the interpreter loop and never consult this table.
pub fn build_jump_table() -> [OpcodeFn; 256] {
    let mut jump_table = [invalid as OpcodeFn; 256];

    jump_table[ADD as usize] = ariths::add;
    jump_table[MUL as usize] = ariths::mul;
    jump_table[SUB as usize] = ariths::sub;
    jump_table[DIV as usize] = ariths::div;
    jump_table[SDIV as usize] = ariths::sdiv;
    jump_table[MOD as usize] = ariths::modulo;
    jump_table[SMOD as usize] = ariths::smod;
    jump_table[ADDMOD as usize] = ariths::addmod;
    jump_table[MULMOD as usize] = ariths::mulmod;
    jump_table[EXP as usize] = ariths::exp;
    jump_table[SIGNEXTEND as usize] = ariths::signextend;

    jump_table[LT as usize] = bitwise::lt;
    jump_table[GT as usize] = bitwise::gt;
    jump_table[SLT as usize] = bitwise::slt;
    jump_table[SGT as usize] = bitwise::sgt;
    jump_table[EQ as usize] = bitwise::eq;
    jump_table[ISZERO as usize] = bitwise::is_zero;
    jump_table[AND as usize] = bitwise::and;
    jump_table[OR as usize] = bitwise::or;
    jump_table[XOR as usize] = bitwise::xor;
    jump_table[NOT as usize] = bitwise::not;
    jump_table[BYTE as usize] = bitwise::byte;
    jump_table[SHL as usize] = bitwise::shl;
    jump_table[SHR as usize] = bitwise::shr;
    jump_table[SAR as usize] = bitwise::sar;

    jump_table[SHA3 as usize] = system::sha3;

    jump_table[ADDRESS as usize] = context::address;
    jump_table[BALANCE as usize] = host::balance;
    jump_table[ORIGIN as usize] = context::origin;
    jump_table[CALLER as usize] = context::caller;
    jump_table[CALLVALUE as usize] = context::call_value;
    jump_table[CALLDATALOAD as usize] = context::call_data_load;
    jump_table[CALLDATASIZE as usize] = context::call_data_size;
    jump_table[CALLDATACOPY as usize] = context::call_data_copy;

    jump_table[COINBASE as usize] = context::coin_base;
    jump_table[TIMESTAMP as usize] = context::timestamp;
    jump_table[NUMBER as usize] = context::number;
    jump_table[DIFFICULTY as usize] = context::difficulty;
    jump_table[GASLIMIT as usize] = context::gas_limit;
    jump_table[CHAINID as usize] = context::chain_id;
    jump_table[SELFBALANCE as usize] = host::self_balance;
    jump_table[BASEFEE as usize] = context::base_fee;

    jump_table[POP as usize] = system::pop;
    jump_table[MLOAD as usize] = memory::m_load;
    jump_table[MSTORE as usize] = memory::m_store;
    jump_table[MSTORE8 as usize] = memory::m_store8;
    jump_table[SLOAD as usize] = host::s_load;
    jump_table[SSTORE as usize] = host::s_store;
    jump_table[MSIZE as usize] = memory::m_size;
    jump_table[GAS as usize] = context::gas;

    jump_table
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitives::{
        evm_types::{ExecutionContext, SizeHints},
        storage::Storage,
    };

    #[test]
    fn unassigned_bytes_map_to_the_invalid_handler() {
        let table = build_jump_table();
        let ctx = ExecutionContext::default();
        let mut storage = Storage::default();
        let mut evm = Evm::new(&ctx, &[], &mut storage, SizeHints::default());

        for op in [0x0Cu8, 0x21, 0x2F, 0x3A, 0x40, 0x49, 0x5E, 0x5F, 0xA0, 0xF1, 0xFF] {
            assert_eq!(table[op as usize](&mut evm), Err(EvmError::InvalidOpcode));
        }
    }
}

//! The interpreter core: opcode fetch, dispatch, control flow and the
//! public `evaluate` API. Operand semantics live in [`operations`]; the
//! loop below only routes by opcode class and owns the program counter.

pub mod jump_tables;
pub mod opcodes;
pub mod operations;

use alloy::primitives::{Bytes, U256};
use primitives::{
    errors::EvmError,
    evm_types::{ExecutionContext, SizeHints},
    memory::Memory,
    stack::Stack,
    storage::Storage,
};
use tracing::{debug, trace};

use crate::jump_tables::{OpcodeFn, build_jump_table};
use crate::opcodes::*;

/// Outcome of one invocation. On RETURN the data is the requested memory
/// slice; on REVERT the same with `success = false`; on an aborting error
/// the data is the short ASCII reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvmOutput {
    pub success: bool,
    pub data: Bytes,
}

impl EvmOutput {
    fn halt(success: bool, data: Bytes) -> Self {
        EvmOutput { success, data }
    }

    fn failure(err: EvmError) -> Self {
        EvmOutput {
            success: false,
            data: Bytes::from_static(err.reason().as_bytes()),
        }
    }
}

/// What a single step decided: keep fetching, or halt with a payload.
#[derive(Debug)]
pub enum Step {
    Continue,
    Halt(EvmOutput),
}

/// One invocation's working set. The stack and memory are owned, storage is
/// a caller-injected map, and context plus bytecode are borrowed read-only,
/// so several invocations can share one context.
#[derive(Debug)]
pub struct Evm<'a> {
    pub context: &'a ExecutionContext,
    pub bytecode: &'a [u8],
    pub storage: &'a mut Storage,
    pub stack: Stack,
    pub memory: Memory,
    pub pc: usize,
    /// One flag per bytecode position: true where a JUMPDEST byte sits
    /// outside any PUSH immediate. Built once per invocation.
    pub jumpdests: Vec<bool>,
}

impl<'a> Evm<'a> {
    pub fn new(
        context: &'a ExecutionContext,
        bytecode: &'a [u8],
        storage: &'a mut Storage,
        hints: SizeHints,
    ) -> Self {
        Evm {
            context,
            bytecode,
            storage,
            stack: Stack::with_capacity(hints.stack_slots),
            memory: Memory::with_capacity(hints.memory_words),
            pc: 0,
            jumpdests: analyze_jumpdests(bytecode),
        }
    }

    /// Run until a terminating opcode, the end of code, or a failure.
    pub fn run(&mut self) -> EvmOutput {
        let table = build_jump_table();
        loop {
            if self.pc >= self.bytecode.len() {
                debug!(pc = self.pc, "ran off the end of code");
                return EvmOutput::halt(true, Bytes::new());
            }
            let op = self.bytecode[self.pc];
            trace!(pc = self.pc, op, stack = self.stack.len(), "step");
            match self.step(op, &table) {
                Ok(Step::Continue) => {}
                Ok(Step::Halt(out)) => {
                    debug!(success = out.success, bytes = out.data.len(), "halt");
                    return out;
                }
                Err(err) => {
                    debug!(%err, pc = self.pc, "aborted");
                    return EvmOutput::failure(err);
                }
            }
        }
    }

    /// Execute the opcode at the current `pc`. Control-flow classes are
    /// routed inline; everything else goes through the dispatch table and
    /// advances the counter by one.
    pub fn step(&mut self, op: u8, table: &[OpcodeFn; 256]) -> Result<Step, EvmError> {
        match op {
            STOP => return Ok(Step::Halt(EvmOutput::halt(true, Bytes::new()))),
            RETURN => return self.halt_with_memory(true),
            REVERT => return self.halt_with_memory(false),
            PUSH1..=PUSH32 => {
                let count = (op - PUSH1) as usize + 1;
                let value = self.read_push(count);
                self.stack.push(value)?;
                self.pc += count + 1;
            }
            DUP1..=DUP16 => {
                self.stack.dup((op - DUP1) as usize + 1)?;
                self.pc += 1;
            }
            SWAP1..=SWAP16 => {
                self.stack.swap((op - SWAP1) as usize + 1)?;
                self.pc += 1;
            }
            JUMP => {
                let dest = self.stack.pop()?;
                self.jump(dest)?;
            }
            JUMPI => {
                let dest = self.stack.pop()?;
                let cond = self.stack.pop()?;
                if cond.is_zero() {
                    self.pc += 1;
                } else {
                    self.jump(dest)?;
                }
            }
            // The landing pad itself does nothing.
            JUMPDEST => self.pc += 1,
            PC => {
                let pc = U256::from(self.pc);
                self.stack.push(pc)?;
                self.pc += 1;
            }
            CODESIZE => {
                let len = U256::from(self.bytecode.len());
                self.stack.push(len)?;
                self.pc += 1;
            }
            CODECOPY => {
                let dest = word_to_usize(self.stack.pop()?)?;
                let src = self.stack.pop()?;
                let size = word_to_usize(self.stack.pop()?)?;
                // A source offset past the code zero-fills the whole range.
                let src = usize::try_from(src).unwrap_or(usize::MAX);
                self.memory.copy_in(dest, self.bytecode, src, size)?;
                self.pc += 1;
            }
            _ => {
                table[op as usize](self)?;
                self.pc += 1;
            }
        }
        Ok(Step::Continue)
    }

    /// PUSH immediate: `count` big-endian bytes following the opcode,
    /// zero-extended on the right when the code ends early.
    fn read_push(&self, count: usize) -> U256 {
        let start = self.pc + 1;
        let avail = self.bytecode.len().saturating_sub(start).min(count);
        let mut buf = [0u8; 32];
        buf[32 - count..32 - count + avail].copy_from_slice(&self.bytecode[start..start + avail]);
        U256::from_be_bytes(buf)
    }

    /// Redirect `pc` to `dest` if it is a valid landing pad; the JUMPDEST
    /// there executes as a no-op on the next step.
    fn jump(&mut self, dest: U256) -> Result<(), EvmError> {
        let dest = usize::try_from(dest).map_err(|_| EvmError::InvalidJump)?;
        if self.jumpdests.get(dest).copied().unwrap_or(false) {
            self.pc = dest;
            Ok(())
        } else {
            Err(EvmError::InvalidJump)
        }
    }

    /// RETURN/REVERT: pop offset and size and halt with that memory slice,
    /// expanding it like any other access.
    fn halt_with_memory(&mut self, success: bool) -> Result<Step, EvmError> {
        let offset = word_to_usize(self.stack.pop()?)?;
        let size = word_to_usize(self.stack.pop()?)?;
        let data = Bytes::copy_from_slice(self.memory.slice(offset, size)?);
        Ok(Step::Halt(EvmOutput::halt(success, data)))
    }
}

/// Mark every position holding a JUMPDEST byte outside PUSH immediates:
/// walk the code left to right and skip over each immediate, so a 0x5B
/// inside push data is never marked.
pub fn analyze_jumpdests(bytecode: &[u8]) -> Vec<bool> {
    let mut valid = vec![false; bytecode.len()];
    let mut pc = 0;
    while pc < bytecode.len() {
        let op = bytecode[pc];
        if op == JUMPDEST {
            valid[pc] = true;
        }
        if (PUSH1..=PUSH32).contains(&op) {
            pc += (op - PUSH1) as usize + 1;
        }
        pc += 1;
    }
    valid
}

/// Narrow a word to a host offset; anything wider aborts with the
/// bad-bounds kind.
pub(crate) fn word_to_usize(word: U256) -> Result<usize, EvmError> {
    usize::try_from(word).map_err(|_| EvmError::BadReturnBounds)
}

/// Evaluate `bytecode` against `context` with a fresh storage map.
pub fn evaluate(context: &ExecutionContext, bytecode: &[u8], hints: SizeHints) -> EvmOutput {
    let mut storage = Storage::with_capacity(hints.storage_slots);
    evaluate_with_storage(context, bytecode, &mut storage, hints)
}

/// Evaluate against a caller-owned storage map, for hosts that keep slots
/// alive across invocations.
pub fn evaluate_with_storage(
    context: &ExecutionContext,
    bytecode: &[u8],
    storage: &mut Storage,
    hints: SizeHints,
) -> EvmOutput {
    Evm::new(context, bytecode, storage, hints).run()
}

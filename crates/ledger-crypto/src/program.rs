//! # Issuance Programs
//!
//! Builds the VM program that governs issuance of a multisig asset:
//!
//! ```text
//! TXSIGHASH <pubkey_1> ... <pubkey_n> <quorum> <n> CHECKMULTISIG
//! ```
//!
//! Data pushes use the short `OP_DATA_k` form up to 75 bytes and the
//! `OP_PUSHDATA1/2/4` forms beyond. Integers 0..=16 use the small-integer
//! opcodes; larger integers are pushed as minimal little-endian data.

use ledger_core::{IssuanceProgram, VmVersion};

use crate::error::ProgramError;

/// VM version every issuance program built here targets.
pub const VM_VERSION: VmVersion = VmVersion::V1;

pub const OP_0: u8 = 0x00;
pub const OP_1: u8 = 0x51;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_CHECKMULTISIG: u8 = 0xad;
pub const OP_TXSIGHASH: u8 = 0xae;

const MAX_SHORT_DATA: usize = 75;

/// Incremental program assembler.
#[derive(Debug, Default, Clone)]
pub struct IssuanceProgramBuilder {
    bytes: Vec<u8>,
}

impl IssuanceProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bare opcode.
    pub fn op(mut self, op: u8) -> Self {
        self.bytes.push(op);
        self
    }

    /// Append a data push using the shortest encoding.
    pub fn data(mut self, data: &[u8]) -> Self {
        let n = data.len();
        if n <= MAX_SHORT_DATA {
            if n == 0 {
                self.bytes.push(OP_0);
            } else {
                self.bytes.push(n as u8);
            }
        } else if n <= u8::MAX as usize {
            self.bytes.push(OP_PUSHDATA1);
            self.bytes.push(n as u8);
        } else if n <= u16::MAX as usize {
            self.bytes.push(OP_PUSHDATA2);
            self.bytes.extend_from_slice(&(n as u16).to_le_bytes());
        } else {
            self.bytes.push(OP_PUSHDATA4);
            self.bytes.extend_from_slice(&(n as u32).to_le_bytes());
        }
        self.bytes.extend_from_slice(data);
        self
    }

    /// Append a non-negative integer push.
    pub fn int(self, n: u64) -> Self {
        match n {
            0 => self.op(OP_0),
            1..=16 => self.op(OP_1 - 1 + n as u8),
            _ => {
                let le = n.to_le_bytes();
                let len = 8 - le.iter().rev().take_while(|b| **b == 0).count();
                self.data(&le[..len])
            }
        }
    }

    /// Finish the program.
    pub fn build(self) -> Result<IssuanceProgram, ProgramError> {
        Ok(IssuanceProgram::new(self.bytes)?)
    }
}

/// The M-of-N issuance program over `pubkeys`, in the given order.
pub fn multisig_issuance_program(
    pubkeys: &[[u8; 32]],
    quorum: usize,
) -> Result<IssuanceProgram, ProgramError> {
    if pubkeys.is_empty() {
        return Err(ProgramError::NoKeys);
    }
    if quorum == 0 || quorum > pubkeys.len() {
        return Err(ProgramError::BadQuorum {
            quorum,
            keys: pubkeys.len(),
        });
    }
    let builder = pubkeys
        .iter()
        .fold(IssuanceProgramBuilder::new().op(OP_TXSIGHASH), |b, pk| b.data(pk));
    builder
        .int(quorum as u64)
        .int(pubkeys.len() as u64)
        .op(OP_CHECKMULTISIG)
        .build()
}

#![deny(clippy::alloc_instead_of_core)]
#![deny(clippy::allow_attributes_without_reason)]
#![deny(clippy::cast_possible_truncation)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::equatable_if_let)]
#![deny(clippy::filter_map_next)]
#![deny(clippy::flat_map_option)]
#![deny(clippy::map_unwrap_or)]
#![deny(clippy::missing_panics_doc)]
#![deny(clippy::option_if_let_else)]
#![deny(clippy::panic)]
#![deny(clippy::std_instead_of_alloc)]
#![deny(clippy::std_instead_of_core)]
#![deny(clippy::todo)]
#![deny(clippy::wildcard_enum_match_arm)]
#![deny(clippy::wildcard_imports)]
#![deny(macro_use_extern_crate)]
// TODO: enable this when things are stable
// #![deny(missing_docs)]
#![deny(unused_crate_dependencies)]
#![deny(unused_extern_crates)]
#![deny(unused_lifetimes)]
#![deny(unused_qualifications)]

use mipsbin_inst::{Funct, Inst, InstFields, Op, Reg, Shape};
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum DisassembleError {
    #[error("unknown opcode {0:06b}")]
    UnknownOpcode(u8),
    #[error("unknown function code {0:06b}")]
    UnknownFunction(u8),
    #[error("unknown register index {0}")]
    UnknownRegister(u8),
}

#[derive(Debug, PartialEq, Eq, Error)]
#[error("word {index} ({inst:032b}): {error}")]
pub struct WordError {
    /// 0-based position of the word in the program
    pub index: usize,
    pub inst: Inst,
    pub error: DisassembleError,
}

fn reg(index: u8) -> Result<Reg, DisassembleError> {
    Reg::try_from(index).map_err(|_| DisassembleError::UnknownRegister(index))
}

/// Renders a single instruction word as one line of assembly, without a trailing newline.
pub fn disassemble(inst: Inst) -> Result<String, DisassembleError> {
    let op = inst.op();
    let op = Op::try_from(op).map_err(|_| DisassembleError::UnknownOpcode(op))?;
    let name: &'static str = op.into();

    match op.shape() {
        None => {
            use mipsbin_inst::RegFields;

            let funct = inst.funct();
            let funct =
                Funct::try_from(funct).map_err(|_| DisassembleError::UnknownFunction(funct))?;
            let (rd, rs, rt) = (reg(inst.rd())?, reg(inst.rs())?, reg(inst.rt())?);
            Ok(format!(
                "{} {}, {}, {}",
                <&'static str>::from(funct),
                rd,
                rs,
                rt
            ))
        }
        Some(shape) => {
            use mipsbin_inst::ImmFields;

            let (rs, rt, offset) = (reg(inst.rs())?, reg(inst.rt())?, inst.offset());
            Ok(match shape {
                Shape::Memory => format!("{} {}, {}({})", name, rt, offset, rs),
                Shape::Branch => format!("{} {}, {}, {}", name, rs, rt, offset),
            })
        }
    }
}

/// Disassembles every word of `program`. All words are attempted even after a failure, and
/// every failure is returned.
pub fn disassemble_all(program: &[Inst]) -> Result<Vec<String>, Vec<WordError>> {
    let mut lines = Vec::with_capacity(program.len());
    let mut errors = Vec::new();

    for (index, &inst) in program.iter().enumerate() {
        match disassemble(inst) {
            Ok(line) => lines.push(line),
            Err(error) => errors.push(WordError { index, inst, error }),
        }
    }

    if errors.is_empty() {
        Ok(lines)
    } else {
        Err(errors)
    }
}

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

use mipsbin_inst::{encode_offset, Format, Funct, Inst, Op, Reg, Shape, OFFSET_MAX, OFFSET_MIN};
use thiserror::Error;

const COMMENT: char = '#';
const SEPARATOR: char = ',';

#[inline(always)]
fn new_reg(rs: Reg, rt: Reg, rd: Reg, funct: Funct) -> Inst {
    // the shift amount field is left as zero
    ((Op::REG as u32) << 26)
        | ((rs as u32) << 21)
        | ((rt as u32) << 16)
        | ((rd as u32) << 11)
        | (funct as u32)
}

#[inline(always)]
fn new_imm(op: Op, rs: Reg, rt: Reg, offset: i32) -> Inst {
    ((op as u32) << 26) | ((rs as u32) << 21) | ((rt as u32) << 16) | encode_offset(offset)
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum AssembleError<'a> {
    #[error("unknown instruction `{0}`")]
    UnknownInstruction(&'a str),
    #[error("unknown register `{0}`")]
    UnknownRegister(&'a str),
    #[error("malformed operands in `{0}`")]
    MalformedOperands(&'a str),
    #[error("invalid offset `{0}`, expected an integer from -32768 to 32767")]
    InvalidOffset(&'a str),
}

#[derive(Debug, PartialEq, Eq, Error)]
#[error("line {line}: {error}")]
pub struct LineError<'a> {
    /// 1-based
    pub line: usize,
    pub error: AssembleError<'a>,
}

fn reg(operand: &str) -> Result<Reg, AssembleError<'_>> {
    Reg::from_operand(operand).ok_or(AssembleError::UnknownRegister(operand))
}

fn offset(text: &str) -> Result<i32, AssembleError<'_>> {
    text.parse::<i32>()
        .ok()
        .filter(|offset| (OFFSET_MIN..=OFFSET_MAX).contains(offset))
        .ok_or(AssembleError::InvalidOffset(text))
}

// splits `offset(register)` into its two halves
fn address(operand: &str) -> Result<(&str, &str), AssembleError<'_>> {
    operand
        .strip_suffix(')')
        .and_then(|inner| inner.split_once('('))
        .ok_or(AssembleError::MalformedOperands(operand))
}

/// Assembles a single line of source. Blank and comment-only lines produce `Ok(None)`.
pub fn assemble_line(line: &str) -> Result<Option<Inst>, AssembleError<'_>> {
    let line = line.split_once(COMMENT).map_or(line, |(code, _)| code).trim();

    let mut tokens = line.split_whitespace();
    let Some(name) = tokens.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = tokens.map(|t| t.trim_end_matches(SEPARATOR)).collect();

    let inst = match Format::lookup(name).ok_or(AssembleError::UnknownInstruction(name))? {
        Format::Reg(funct) => match args[..] {
            [rd, rs, rt] => new_reg(reg(rs)?, reg(rt)?, reg(rd)?, funct),
            _ => return Err(AssembleError::MalformedOperands(line)),
        },
        Format::Imm(op, Shape::Memory) => match args[..] {
            [rt, addr] => {
                let (off, rs) = address(addr)?;
                let off = offset(off)?;
                new_imm(op, reg(rs)?, reg(rt)?, off)
            }
            _ => return Err(AssembleError::MalformedOperands(line)),
        },
        Format::Imm(op, Shape::Branch) => match args[..] {
            [rs, rt, off] => {
                let off = offset(off)?;
                new_imm(op, reg(rs)?, reg(rt)?, off)
            }
            _ => return Err(AssembleError::MalformedOperands(line)),
        },
    };

    Ok(Some(inst))
}

/// Assembles every line of `source`. All lines are attempted even after a failure, and every
/// failure is returned.
pub fn assemble(source: &str) -> Result<Vec<Inst>, Vec<LineError<'_>>> {
    let mut program = Vec::new();
    let mut errors = Vec::new();

    for (i, line) in source.lines().enumerate() {
        match assemble_line(line) {
            Ok(Some(inst)) => program.push(inst),
            Ok(None) => {}
            Err(error) => errors.push(LineError { line: i + 1, error }),
        }
    }

    if errors.is_empty() {
        Ok(program)
    } else {
        Err(errors)
    }
}

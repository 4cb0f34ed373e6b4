#![no_std]
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

pub mod funct;
pub mod opcode;
pub mod reg;
pub use funct::Funct;
pub use opcode::Op;
pub use reg::Reg;

const MASK5: u32 = (1 << 5) - 1;
const MASK6: u32 = (1 << 6) - 1;
const MASK16: u32 = (1 << 16) - 1;
const SIGN16: u32 = 1 << 15;

pub const OFFSET_MIN: i32 = -(1 << 15);
pub const OFFSET_MAX: i32 = (1 << 15) - 1;

pub type Inst = u32;

/// How the operands of an immediate format instruction are written. Both shapes share one binary
/// layout.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Shape {
    /// `op target, offset(source)`
    Memory,
    /// `op source, target, offset`
    Branch,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Format {
    Reg(Funct),
    Imm(Op, Shape),
}

impl Format {
    /// Finds the format and codes for a mnemonic, or `None` if the mnemonic is not in either
    /// table.
    pub fn lookup(mnemonic: &str) -> Option<Self> {
        match Funct::try_from(mnemonic) {
            Ok(funct) => Some(Self::Reg(funct)),
            Err(_) => Op::try_from(mnemonic)
                .ok()
                .and_then(|op| op.shape().map(|shape| Self::Imm(op, shape))),
        }
    }
}

/// Masks a signed offset down to its 16-bit two's complement field. The caller is responsible
/// for checking that the offset is within [`OFFSET_MIN`]..=[`OFFSET_MAX`].
#[inline(always)]
pub const fn encode_offset(offset: i32) -> u32 {
    offset as u32 & MASK16
}

pub trait InstFields {
    fn op(&self) -> u8;
}
impl InstFields for Inst {
    #[inline(always)]
    fn op(&self) -> u8 {
        (self >> 26 & MASK6) as u8
    }
}

// register encodings

pub trait RegFields {
    fn rs(&self) -> u8;
    fn rt(&self) -> u8;
    fn rd(&self) -> u8;
    fn shamt(&self) -> u8;
    fn funct(&self) -> u8;
}
impl RegFields for Inst {
    #[inline(always)]
    fn rs(&self) -> u8 {
        (self >> 21 & MASK5) as u8
    }
    #[inline(always)]
    fn rt(&self) -> u8 {
        (self >> 16 & MASK5) as u8
    }
    #[inline(always)]
    fn rd(&self) -> u8 {
        (self >> 11 & MASK5) as u8
    }
    #[inline(always)]
    fn shamt(&self) -> u8 {
        (self >> 6 & MASK5) as u8
    }
    #[inline(always)]
    fn funct(&self) -> u8 {
        (self & MASK6) as u8
    }
}

// immediate encodings

pub trait ImmFields {
    fn rs(&self) -> u8;
    fn rt(&self) -> u8;
    fn imm(&self) -> u16;
    fn offset(&self) -> i32;
}
impl ImmFields for Inst {
    #[inline(always)]
    fn rs(&self) -> u8 {
        (self >> 21 & MASK5) as u8
    }
    #[inline(always)]
    fn rt(&self) -> u8 {
        (self >> 16 & MASK5) as u8
    }
    #[inline(always)]
    fn imm(&self) -> u16 {
        (self & MASK16) as u16
    }
    #[inline(always)]
    fn offset(&self) -> i32 {
        let raw = self & MASK16;
        if raw & SIGN16 != 0 {
            raw as i32 - (1 << 16)
        } else {
            raw as i32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup() {
        assert_eq!(Format::lookup("add"), Some(Format::Reg(Funct::ADD)));
        assert_eq!(Format::lookup("slt"), Some(Format::Reg(Funct::SLT)));
        assert_eq!(Format::lookup("lw"), Some(Format::Imm(Op::LW, Shape::Memory)));
        assert_eq!(Format::lookup("sw"), Some(Format::Imm(Op::SW, Shape::Memory)));
        assert_eq!(Format::lookup("beq"), Some(Format::Imm(Op::BEQ, Shape::Branch)));
        assert_eq!(Format::lookup("bne"), Some(Format::Imm(Op::BNE, Shape::Branch)));
        // the register format opcode is not itself an instruction
        assert_eq!(Format::lookup("reg"), None);
        assert_eq!(Format::lookup("addi"), None);
        // mnemonics are case sensitive
        assert_eq!(Format::lookup("ADD"), None);
    }

    #[test]
    fn codes() {
        assert_eq!(u8::from(Op::LW), 0b100011);
        assert_eq!(u8::from(Op::SW), 0b101011);
        assert_eq!(u8::from(Funct::SUB), 0b100010);
        assert_eq!(Op::try_from(0b000101_u8).ok(), Some(Op::BNE));
        assert_eq!(Funct::try_from(0b100101_u8).ok(), Some(Funct::OR));
        assert_eq!(Funct::try_from(0b100001_u8).ok(), None);
        assert_eq!(Op::try_from(0b001000_u8).ok(), None);
    }

    #[test]
    fn registers() {
        assert_eq!(Reg::from_operand("$zero"), Some(Reg::Zero));
        assert_eq!(Reg::from_operand("$t1"), Some(Reg::T1));
        assert_eq!(Reg::from_operand("$s7"), Some(Reg::S7));
        assert_eq!(Reg::from_operand("t1"), None);
        assert_eq!(Reg::from_operand("$t0"), None);
        assert_eq!(Reg::from_operand("$bad"), None);
        assert_eq!(u8::from(Reg::T2), 0b01010);
        assert_eq!(Reg::try_from(8_u8).ok(), None);
        assert_eq!(Reg::try_from(23_u8).ok(), Some(Reg::S7));
        assert_eq!(Reg::try_from(24_u8).ok(), None);
    }

    #[test]
    fn fields() {
        // add $t1, $t2, $t3
        let inst: Inst = 0b000000_01010_01011_01001_00000_100000;
        assert_eq!(inst.op(), 0);
        assert_eq!(RegFields::rs(&inst), 0b01010);
        assert_eq!(RegFields::rt(&inst), 0b01011);
        assert_eq!(inst.rd(), 0b01001);
        assert_eq!(inst.shamt(), 0);
        assert_eq!(inst.funct(), 0b100000);

        // lw $t1, -4($s0)
        let inst: Inst = 0b100011_10000_01001_1111111111111100;
        assert_eq!(inst.op(), 0b100011);
        assert_eq!(ImmFields::rs(&inst), 0b10000);
        assert_eq!(ImmFields::rt(&inst), 0b01001);
        assert_eq!(inst.imm(), 0b1111111111111100);
        assert_eq!(inst.offset(), -4);
    }

    #[test]
    fn offsets() {
        assert_eq!(encode_offset(-4), 0b1111111111111100);
        assert_eq!(encode_offset(OFFSET_MAX), 0x7FFF);
        assert_eq!(encode_offset(OFFSET_MIN), 0x8000);
        assert_eq!(encode_offset(0), 0);
        for offset in [OFFSET_MIN, -1, 0, 1, 100, OFFSET_MAX] {
            assert_eq!(encode_offset(offset).offset(), offset);
        }
    }

    #[test]
    fn display() {
        use core::fmt::Write;

        let mut s = Buf::default();
        write!(s, "{} {}", Reg::Zero, Reg::S3).unwrap();
        assert_eq!(s.as_str(), "$zero $s3");
    }

    // no_std means no String, so tests format into a fixed buffer
    #[derive(Default)]
    struct Buf {
        bytes: [u8; 32],
        len: usize,
    }

    impl Buf {
        fn as_str(&self) -> &str {
            core::str::from_utf8(&self.bytes[..self.len]).unwrap()
        }
    }

    impl core::fmt::Write for Buf {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let end = self.len + s.len();
            self.bytes
                .get_mut(self.len..end)
                .ok_or(core::fmt::Error)?
                .copy_from_slice(s.as_bytes());
            self.len = end;
            Ok(())
        }
    }
}

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::{EnumString, IntoStaticStr};

use crate::Shape;

#[derive(Debug, Clone, Copy, Eq, PartialEq, TryFromPrimitive, IntoPrimitive, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Op {
    // all register format instructions share this opcode and are told apart
    // by their function code
    REG = 0b000000,
    BEQ = 0b000100,
    BNE = 0b000101,
    LW = 0b100011,
    SW = 0b101011,
}

impl Op {
    /// The textual operand order used by an immediate format opcode, or `None` for [`Op::REG`].
    pub const fn shape(self) -> Option<Shape> {
        match self {
            Self::REG => None,
            Self::BEQ | Self::BNE => Some(Shape::Branch),
            Self::LW | Self::SW => Some(Shape::Memory),
        }
    }
}

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::{EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, Eq, PartialEq, TryFromPrimitive, IntoPrimitive, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Funct {
    ADD = 0b100000,
    SUB = 0b100010,
    AND = 0b100100,
    OR = 0b100101,
    SLT = 0b101010,
}

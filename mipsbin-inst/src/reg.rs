use core::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::{EnumString, IntoStaticStr};

// only these sixteen registers are addressable, every other index is rejected
#[derive(Debug, Clone, Copy, Eq, PartialEq, TryFromPrimitive, IntoPrimitive, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Reg {
    Zero = 0,
    T1 = 9,
    T2 = 10,
    T3 = 11,
    T4 = 12,
    T5 = 13,
    T6 = 14,
    T7 = 15,
    S0 = 16,
    S1 = 17,
    S2 = 18,
    S3 = 19,
    S4 = 20,
    S5 = 21,
    S6 = 22,
    S7 = 23,
}

impl Reg {
    /// Resolves a `$`-prefixed register reference such as `$t1`.
    pub fn from_operand(operand: &str) -> Option<Self> {
        operand
            .strip_prefix('$')
            .and_then(|name| Self::try_from(name).ok())
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", <&'static str>::from(self))
    }
}

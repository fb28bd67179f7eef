use crate::SATURATION;
use std::ops::Add;
use std::ops::AddAssign;

/// A saturating byte counter.
///
/// Every increment or addition that would exceed 255 clamps to 255.
/// The clamp is computed in a wider integer so the policy does not
/// depend on `u8` arithmetic.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Count(u8);

impl Count {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(SATURATION);

    /// +1, clamped.
    pub fn increment(self) -> Self {
        self + Self(1)
    }
    pub fn saturated(&self) -> bool {
        *self == Self::MAX
    }
}

impl Add for Count {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        let sum = u16::from(self.0) + u16::from(other.0);
        Self(sum.min(u16::from(SATURATION)) as u8)
    }
}

impl AddAssign for Count {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl From<u8> for Count {
    fn from(n: u8) -> Self {
        Self(n)
    }
}

impl From<Count> for u8 {
    fn from(count: Count) -> Self {
        count.0
    }
}

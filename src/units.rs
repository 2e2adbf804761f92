//! Length units used for page geometry and font sizes.

use derive_more::{Add, AddAssign, Deref, Display, From, Into, Sub, SubAssign, Sum};

/// A length in PDF points (1/72 of an inch). This is the unit everything is
/// eventually converted into before being written to a page.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, PartialOrd, Add, AddAssign, Sub, SubAssign, Sum,
    Display, From, Into, Deref,
)]
pub struct Pt(pub f32);

impl std::ops::Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl std::ops::Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

/// A length in inches
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Display, From, Into, Deref)]
pub struct In(pub f32);

/// A length in millimetres
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Display, From, Into, Deref)]
pub struct Mm(pub f32);

impl From<In> for Pt {
    fn from(v: In) -> Pt {
        Pt(v.0 * 72.0)
    }
}

impl From<Mm> for Pt {
    fn from(v: Mm) -> Pt {
        Pt(v.0 * 72.0 / 25.4)
    }
}

impl From<Pt> for In {
    fn from(v: Pt) -> In {
        In(v.0 / 72.0)
    }
}

impl From<Pt> for Mm {
    fn from(v: Pt) -> Mm {
        Mm(v.0 * 25.4 / 72.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_between_units() {
        let pt: Pt = In(1.0).into();
        assert_eq!(pt, Pt(72.0));
        let pt: Pt = Mm(25.4).into();
        assert!((pt.0 - 72.0).abs() < 1e-4);
    }

    #[test]
    fn arithmetic_behaves_like_f32() {
        let x = Pt(10.0) + Pt(5.0) - Pt(3.0);
        assert_eq!(x, Pt(12.0));
        assert_eq!(x * 2.0, Pt(24.0));
        assert_eq!(x / 4.0, Pt(3.0));
    }
}

//! Exact fractions over arbitrary-precision integers

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::ops::{Add, Mul, Neg, Sub};

use num::{BigInt, Integer, One, Signed, ToPrimitive, Zero};

use crate::error::DivisionByZero;

/// A fraction that is always in lowest terms with a positive denominator.
/// Zero is always `0/1`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: BigInt,
    denom: BigInt,
}

impl Rational {
    pub fn new(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Result<Self, DivisionByZero> {
        let denom = denom.into();
        if denom.is_zero() {
            return Err(DivisionByZero);
        }
        Ok(Self::reduced(numer.into(), denom))
    }

    pub fn from_integer(n: impl Into<BigInt>) -> Self {
        Self {
            numer: n.into(),
            denom: BigInt::one(),
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(BigInt::zero())
    }

    pub fn one() -> Self {
        Self::from_integer(BigInt::one())
    }

    /// `denom` must not be zero
    fn reduced(numer: BigInt, denom: BigInt) -> Self {
        debug_assert!(!denom.is_zero());
        if numer.is_zero() {
            return Self::zero();
        }
        let (numer, denom) = if denom.is_negative() {
            (-numer, -denom)
        } else {
            (numer, denom)
        };
        let gcd = numer.gcd(&denom);
        if gcd.is_one() {
            Self { numer, denom }
        } else {
            Self {
                numer: numer / &gcd,
                denom: denom / &gcd,
            }
        }
    }

    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.denom.is_one()
    }

    pub fn is_negative(&self) -> bool {
        self.numer.is_negative()
    }

    pub fn checked_div(&self, other: &Rational) -> Result<Rational, DivisionByZero> {
        if other.is_zero() {
            return Err(DivisionByZero);
        }
        Ok(Self::reduced(&self.numer * &other.denom, &self.denom * &other.numer))
    }

    /// The exact integer value, if this is an integer
    pub fn to_integer(&self) -> Option<BigInt> {
        if self.is_integer() {
            Some(self.numer.clone())
        } else {
            None
        }
    }

    /// The exact value as `u64`, if this is an integer in range
    pub fn to_u64(&self) -> Option<u64> {
        if self.is_integer() {
            self.numer.to_u64()
        } else {
            None
        }
    }
}

impl From<u64> for Rational {
    fn from(n: u64) -> Self {
        Self::from_integer(n)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl From<u128> for Rational {
    fn from(n: u128) -> Self {
        Self::from_integer(n)
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Self {
        Self::from_integer(n)
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        // denominators are positive so cross-multiplying preserves order
        (&self.numer * &other.denom).cmp(&(&other.numer * &self.denom))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, other: Self) -> Rational {
        if self.denom == other.denom {
            return Rational::reduced(&self.numer + &other.numer, self.denom.clone());
        }
        Rational::reduced(
            &self.numer * &other.denom + &other.numer * &self.denom,
            &self.denom * &other.denom,
        )
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, other: Self) -> Rational {
        self + &-other
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, other: Self) -> Rational {
        Rational::reduced(&self.numer * &other.numer, &self.denom * &other.denom)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numer: -&self.numer,
            denom: self.denom.clone(),
        }
    }
}

impl Add for Rational {
    type Output = Rational;

    fn add(self, other: Rational) -> Rational {
        &self + &other
    }
}

impl Sub for Rational {
    type Output = Rational;

    fn sub(self, other: Rational) -> Rational {
        &self - &other
    }
}

impl Mul for Rational {
    type Output = Rational;

    fn mul(self, other: Rational) -> Rational {
        &self * &other
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        -&self
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

#[cfg(test)]
mod tests {
    use num::BigInt;

    use super::Rational;
    use crate::error::DivisionByZero;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn zero_denominator() {
        assert_eq!(Rational::new(1, 0), Err(DivisionByZero));
        assert_eq!(r(1, 2).checked_div(&Rational::zero()), Err(DivisionByZero));
    }

    #[test]
    fn normalizes() {
        let x = r(6, -4);
        assert_eq!(x.numer(), &BigInt::from(-3));
        assert_eq!(x.denom(), &BigInt::from(2));
        assert_eq!(r(0, -7), Rational::zero());
        assert_eq!(r(-0, 5).denom(), &BigInt::from(1));
        assert_eq!(r(-2, -4), r(1, 2));
    }

    #[test]
    fn arithmetic() {
        assert_eq!(&r(1, 2) + &r(1, 3), r(5, 6));
        assert_eq!(&r(1, 2) - &r(1, 3), r(1, 6));
        assert_eq!(&r(1, 4) + &r(3, 4), Rational::one());
        assert_eq!(&r(2, 3) * &r(9, 4), r(3, 2));
        assert_eq!(r(2, 3).checked_div(&r(-4, 9)), Ok(r(-3, 2)));
        assert_eq!(-r(1, 2), r(-1, 2));
        assert_eq!(r(1, 3) - r(1, 3), Rational::zero());
    }

    #[test]
    fn compare() {
        assert!(r(1, 3) < r(1, 2));
        assert!(r(-1, 2) < r(-1, 3));
        assert!(r(7, 7) == Rational::one());
        let huge = Rational::from_integer(BigInt::from(u64::max_value()) * BigInt::from(u64::max_value()));
        let bigger = &huge + &r(1, 1_000_000_007);
        assert!(huge < bigger);
    }

    #[test]
    fn integers() {
        assert!(r(4, 2).is_integer());
        assert!(!r(1, 2).is_integer());
        assert!(Rational::zero().is_integer());
        assert_eq!(r(10, 2).to_u64(), Some(5));
        assert_eq!(r(1, 2).to_u64(), None);
        assert_eq!(r(-4, 2).to_u64(), None);
        assert_eq!(r(-4, 2).to_integer(), Some(BigInt::from(-2)));
        assert_eq!(r(3, 2).to_string(), "3/2");
        assert_eq!(r(-6, 3).to_string(), "-2");
    }
}

//! Elements of the execution environment's native field.
//!
//! All limb arithmetic happens in this field, not over the integers. The
//! modulus is the 252-bit prime `2^251 + 17 * 2^192 + 1`, which is wide
//! enough that the 5-limb product of two 3-limb values never wraps.

use core::fmt;
use core::ops::Mul;

use ark_ff::fields::{Field, Fp256, MontBackend, MontConfig, PrimeField};
use derive_more::{Add, Display, Neg, Sub, Sum};
use lazy_static::lazy_static;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(MontConfig)]
#[modulus = "3618502788666131213697322783095070105623107215331596699973092056135872020481"]
#[generator = "3"]
pub struct FeltConfig;

pub type Fp = Fp256<MontBackend<FeltConfig, 4>>;

lazy_static! {
    /// Characteristic of the native field.
    pub static ref PRIME: BigUint = Fp::MODULUS.into();
}

/// A canonical field element, always strictly below [`PRIME`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Add,
    Sub,
    Neg,
    Sum,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "BigUint", into = "BigUint")]
pub struct Felt(Fp);

impl Felt {
    /// Multiplicative inverse, or `None` for zero.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> { self.0.inverse().map(Self) }

    /// The representative in `(-PRIME/2, PRIME/2]`.
    ///
    /// This is how a limb that was produced by subtracting is read back as a
    /// (possibly negative) integer.
    #[must_use]
    pub fn to_signed(&self) -> BigInt {
        if self.0.into_bigint() > Fp::MODULUS_MINUS_ONE_DIV_TWO {
            -BigInt::from((-*self).to_biguint())
        } else {
            BigInt::from(self.to_biguint())
        }
    }

    #[must_use]
    pub fn to_biguint(&self) -> BigUint { self.0.into() }

    /// Number of significant bits of the canonical representative.
    #[must_use]
    pub fn bits(&self) -> u32 {
        use ark_ff::BigInteger;
        self.0.into_bigint().num_bits()
    }
}

impl From<u64> for Felt {
    fn from(value: u64) -> Self { Self(Fp::from(value)) }
}

impl From<u128> for Felt {
    fn from(value: u128) -> Self { Self(Fp::from(value)) }
}

impl From<&BigUint> for Felt {
    fn from(value: &BigUint) -> Self { Self(Fp::from(value.clone())) }
}

impl From<&BigInt> for Felt {
    fn from(value: &BigInt) -> Self {
        let magnitude = Self::from(value.magnitude());
        if value.sign() == Sign::Minus {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl TryFrom<BigUint> for Felt {
    type Error = Error;

    fn try_from(value: BigUint) -> Result<Self, Self::Error> {
        if value < *PRIME {
            Ok(Self(Fp::from(value)))
        } else {
            Err(Error::MalformedInput(format!(
                "{value:#x} is not a canonical field element"
            )))
        }
    }
}

impl From<Felt> for BigUint {
    fn from(value: Felt) -> Self { value.to_biguint() }
}

impl Mul for Felt {
    type Output = Felt;

    fn mul(self, rhs: Self) -> Felt { Felt(self.0 * rhs.0) }
}

impl fmt::LowerHex for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.to_biguint(), f)
    }
}

impl Zero for Felt {
    fn zero() -> Self { Self::from(0_u64) }

    fn is_zero(&self) -> bool { *self == Self::zero() }
}

impl One for Felt {
    fn one() -> Self { Self::from(1_u64) }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn modulus_is_the_stark_prime() {
        let expected = (BigUint::one() << 251_u32) + (BigUint::from(17_u32) << 192_u32) + 1_u32;
        assert_eq!(*PRIME, expected);
    }

    #[test]
    fn negative_integers_wrap_around() {
        let minus_one = Felt::from(&BigInt::from(-1));
        assert_eq!(minus_one.to_biguint(), &*PRIME - 1_u32);
        assert_eq!(minus_one.to_signed(), BigInt::from(-1));
        assert_eq!(minus_one + Felt::one(), Felt::zero());
    }

    #[test]
    fn signed_view_splits_at_half_the_prime() {
        let half = &*PRIME >> 1_u32;
        let top_positive = Felt::try_from(half.clone()).unwrap();
        assert_eq!(top_positive.to_signed(), BigInt::from(half.clone()));
        let first_negative = top_positive + Felt::one();
        assert_eq!(first_negative.to_signed(), -BigInt::from(half));
    }

    #[test]
    fn non_canonical_values_are_rejected() {
        assert!(Felt::try_from(PRIME.clone()).is_err());
        assert!(Felt::try_from(&*PRIME - 1_u32).is_ok());
        assert!(serde_json::from_str::<Felt>(&serde_json::to_string(&*PRIME).unwrap()).is_err());
    }

    #[test]
    fn lower_hex_is_the_canonical_value() {
        assert_eq!(format!("{:#x}", Felt::from(255_u64)), "0xff");
        assert_eq!(Felt::from(&BigInt::from(-1)).bits(), 252);
    }

    #[test]
    fn zero_has_no_inverse() {
        assert_eq!(Felt::zero().inverse(), None);
        assert_eq!(-Felt::zero(), Felt::zero());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]
        #[test]
        fn inverse_times_self_is_one(a in 1_u128..) {
            let a = Felt::from(a);
            let inv = a.inverse().unwrap();
            prop_assert_eq!(a * inv, Felt::one());
        }

        #[test]
        fn signed_round_trip(a in any::<i128>()) {
            let a = BigInt::from(a);
            prop_assert_eq!(Felt::from(&a).to_signed(), a);
        }

        #[test]
        fn serde_round_trip(a in any::<u128>()) {
            let a = Felt::from(a);
            let json = serde_json::to_string(&a).unwrap();
            prop_assert_eq!(serde_json::from_str::<Felt>(&json).unwrap(), a);
        }

        #[test]
        fn field_ops_match_integers(a in any::<i64>(), b in any::<i64>()) {
            let (fa, fb) = (Felt::from(&BigInt::from(a)), Felt::from(&BigInt::from(b)));
            let (a, b) = (i128::from(a), i128::from(b));
            prop_assert_eq!((fa + fb).to_signed(), BigInt::from(a + b));
            prop_assert_eq!((fa - fb).to_signed(), BigInt::from(a - b));
            prop_assert_eq!((fa * fb).to_signed(), BigInt::from(a * b));
            prop_assert_eq!((-fa).to_signed(), BigInt::from(-a));
        }
    }
}

//! Multi-limb big integers.
//!
//! A value with limbs `d0, d1, ..` stands for `sum_i d_i * BASE^i`, where each
//! limb is read as the signed representative of its field element.  Nothing
//! here checks bounds; that is the job of the range check in
//! [`Context::nondet_bigint3`](crate::reduce::Context::nondet_bigint3).

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};

use crate::constants::BASE_INT;
use crate::error::{Error, Result};
use crate::felt::Felt;

/// A field element of the emulated field, as exchanged across the public API.
///
/// Every `BigInt3` that comes out of the oracle has limbs below `3 * BASE`.
/// With an honest oracle the limbs are below `BASE`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BigInt3 {
    pub d0: Felt,
    pub d1: Felt,
    pub d2: Felt,
}

/// Same shape as [`BigInt3`], but limbs may be negative or arbitrarily
/// large.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreducedBigInt3 {
    pub d0: Felt,
    pub d1: Felt,
    pub d2: Felt,
}

/// Wide enough to hold the exact product of two 3-limb values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreducedBigInt5 {
    pub d0: Felt,
    pub d1: Felt,
    pub d2: Felt,
    pub d3: Felt,
    pub d4: Felt,
}

/// Weighted sum of signed limbs, least significant first.
fn pack_limbs(limbs: impl DoubleEndedIterator<Item = Felt>) -> BigInt {
    limbs
        .rev()
        .fold(BigInt::zero(), |acc, limb| acc * &*BASE_INT + limb.to_signed())
}

macro_rules! limb_repr {
    ($name: ident, $n: literal, [$($limb: ident),+]) => {
        impl $name {
            #[must_use]
            pub fn limbs(&self) -> [Felt; $n] { [$(self.$limb),+] }

            #[must_use]
            pub fn pack(&self) -> BigInt { pack_limbs(self.limbs().into_iter()) }
        }

        impl From<[Felt; $n]> for $name {
            fn from([$($limb),+]: [Felt; $n]) -> Self { Self { $($limb),+ } }
        }
    };
}

limb_repr!(BigInt3, 3, [d0, d1, d2]);
limb_repr!(UnreducedBigInt3, 3, [d0, d1, d2]);
limb_repr!(UnreducedBigInt5, 5, [d0, d1, d2, d3, d4]);

impl BigInt3 {
    /// Decompose `value` into three limbs in `[0, BASE)`.
    ///
    /// # Errors
    ///
    /// `value` has to lie in `[0, BASE^3)`.
    pub fn split(value: &BigInt) -> Result<[Felt; 3]> {
        let mut rest = value.clone();
        let mut limbs: [Felt; 3] = Default::default();
        for limb in &mut limbs {
            let (quotient, residue) = rest.div_mod_floor(&BASE_INT);
            *limb = Felt::from(&residue);
            rest = quotient;
        }
        if rest.is_zero() {
            Ok(limbs)
        } else {
            Err(Error::MalformedInput(format!(
                "{value:#x} does not fit into three {}limbs",
                if value.is_negative() { "non-negative " } else { "" }
            )))
        }
    }

    /// A trusted constant, e.g. a modulus.
    ///
    /// # Errors
    ///
    /// Same as [`BigInt3::split`].
    pub fn from_int(value: &BigInt) -> Result<Self> { Self::split(value).map(Self::from) }
}

impl From<u64> for BigInt3 {
    fn from(value: u64) -> Self {
        Self {
            d0: Felt::from(value),
            ..Self::default()
        }
    }
}

impl From<BigInt3> for UnreducedBigInt3 {
    fn from(BigInt3 { d0, d1, d2 }: BigInt3) -> Self { Self { d0, d1, d2 } }
}

impl From<UnreducedBigInt3> for UnreducedBigInt5 {
    fn from(UnreducedBigInt3 { d0, d1, d2 }: UnreducedBigInt3) -> Self {
        Self {
            d0,
            d1,
            d2,
            ..Self::default()
        }
    }
}

impl From<BigInt3> for UnreducedBigInt5 {
    fn from(value: BigInt3) -> Self { UnreducedBigInt3::from(value).into() }
}

use num_bigint::{BigInt, BigUint, Sign};
use proptest::prelude::any;
use proptest::prop_oneof;
use proptest::strategy::{Just, Strategy};

use crate::constants::{BASE, SECP_P};
use crate::error::{Error, Result};
use crate::felt::{Felt, PRIME};
use crate::limbs::{BigInt3, UnreducedBigInt3, UnreducedBigInt5};
use crate::oracle::{DivModHint, Oracle};

/// Fully reduced values below `2^bits`, with the usual suspects mixed in.
#[must_use]
pub fn int_below(bits: u32) -> impl Strategy<Value = BigInt> {
    let max: BigInt = (BigInt::from(1) << bits) - 1;
    prop_oneof![
        Just(BigInt::from(0)),
        Just(BigInt::from(1)),
        Just(max.clone()),
        proptest::collection::vec(any::<u32>(), 9).prop_map(move |digits| {
            BigInt::from_slice(Sign::Plus, &digits) & &max
        }),
    ]
}

/// Canonical values below `2^bits`, with limbs in `[0, BASE)`.
///
/// # Panics
///
/// Panics if `bits` exceeds 258.
#[must_use]
pub fn bigint3_below(bits: u32) -> impl Strategy<Value = BigInt3> {
    assert!(bits <= 258, "three limbs hold at most 258 bits");
    int_below(bits).prop_map(|value| BigInt3::from_int(&value).expect("fits into three limbs"))
}

/// Values in `[1, 2^bits)`.
#[must_use]
pub fn nonzero_bigint3_below(bits: u32) -> impl Strategy<Value = BigInt3> {
    bigint3_below(bits).prop_filter("non-zero", |x| x.pack() != BigInt::from(0))
}

/// Values in `[1, p)` for the secp256k1 prime `p`.
#[must_use]
pub fn secp_element() -> impl Strategy<Value = BigInt3> {
    let p = SECP_P.pack();
    bigint3_below(256).prop_filter("below p", move |x| x.pack() < p && x.pack() > BigInt::from(0))
}

/// A limb of either sign, of at most 100 bits.
#[must_use]
pub fn signed_limb() -> impl Strategy<Value = BigInt> {
    (any::<[u8; 13]>(), any::<bool>()).prop_map(|(bytes, negative)| {
        let magnitude = BigInt::from_bytes_le(Sign::Plus, &bytes) >> 4_u32;
        if negative {
            -magnitude
        } else {
            magnitude
        }
    })
}

#[must_use]
pub fn signed_limbs3() -> impl Strategy<Value = UnreducedBigInt3> {
    (signed_limb(), signed_limb(), signed_limb())
        .prop_map(|(d0, d1, d2)| UnreducedBigInt3::from([&d0, &d1, &d2].map(Felt::from)))
}

/// Limbs a dishonest oracle might try: small values, values around `BASE`
/// and around the slack bound `3 * BASE`, small negatives, and anything at all.
#[must_use]
pub fn adversarial_limb() -> impl Strategy<Value = Felt> {
    let near = |centre: BigInt| (-8_i64..=8).prop_map(move |k| Felt::from(&(&centre + k)));
    prop_oneof![
        (0_u64..16).prop_map(Felt::from),
        near(BigInt::from(BASE.clone())),
        near(BigInt::from(BASE.clone()) * 3),
        near(BigInt::from(PRIME.clone())),
        any::<[u32; 8]>().prop_map(|digits| Felt::from(&BigUint::from_slice(&digits))),
    ]
}

/// Answers with fixed values, whatever is asked.
#[derive(Clone, Debug, Default)]
pub struct FixedOracle {
    pub limbs: Option<[Felt; 3]>,
    pub hint: Option<DivModHint>,
}

impl FixedOracle {
    #[must_use]
    pub fn with_limbs(limbs: [Felt; 3]) -> Self {
        Self {
            limbs: Some(limbs),
            hint: None,
        }
    }
}

impl Oracle for FixedOracle {
    fn split(&mut self, _value: &BigInt) -> Result<[Felt; 3]> {
        self.limbs
            .ok_or_else(|| Error::MalformedInput("no fixed limbs".to_string()))
    }

    fn div_mod(
        &mut self,
        _dividend: &UnreducedBigInt5,
        _divisor: &UnreducedBigInt3,
        _modulus: &BigInt3,
    ) -> Result<DivModHint> {
        self.hint
            .clone()
            .ok_or_else(|| Error::MalformedInput("no fixed hint".to_string()))
    }
}

/// A way to corrupt one kind of oracle answer.
#[derive(Clone, Copy, Debug)]
pub enum Tamper {
    Split(fn([Felt; 3]) -> [Felt; 3]),
    DivMod(fn(DivModHint) -> DivModHint),
}

impl Tamper {
    #[must_use]
    pub fn over<O: Oracle>(self, inner: O) -> TamperingOracle<O> {
        TamperingOracle {
            inner,
            tamper: self,
        }
    }
}

/// Forwards to `inner`, corrupting its answers on the way out.
#[derive(Clone, Debug)]
pub struct TamperingOracle<O> {
    pub inner: O,
    pub tamper: Tamper,
}

impl<O: Oracle> Oracle for TamperingOracle<O> {
    fn split(&mut self, value: &BigInt) -> Result<[Felt; 3]> {
        let limbs = self.inner.split(value)?;
        Ok(match self.tamper {
            Tamper::Split(f) => f(limbs),
            Tamper::DivMod(_) => limbs,
        })
    }

    fn div_mod(
        &mut self,
        dividend: &UnreducedBigInt5,
        divisor: &UnreducedBigInt3,
        modulus: &BigInt3,
    ) -> Result<DivModHint> {
        let hint = self.inner.div_mod(dividend, divisor, modulus)?;
        Ok(match self.tamper {
            Tamper::DivMod(f) => f(hint),
            Tamper::Split(_) => hint,
        })
    }
}

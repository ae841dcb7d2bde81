//! Untrusted witness providers.
//!
//! Everything an [`Oracle`] returns is checked in-line by the caller, so an
//! implementation may answer whatever it likes.  [`HonestOracle`] is the one
//! that produces witnesses the checks accept.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::felt::Felt;
use crate::limbs::{BigInt3, UnreducedBigInt3, UnreducedBigInt5};

/// Answer to a [`Oracle::div_mod`] request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivModHint {
    /// Whether the quotient was positive before it was shifted into range.
    pub quotient_positive: bool,
    /// The (shifted) quotient, to be split into limbs afterwards.
    pub value: BigInt,
}

pub trait Oracle {
    /// Limb decomposition of `value`.
    ///
    /// # Errors
    ///
    /// Implementations may refuse values they can not decompose.
    fn split(&mut self, value: &BigInt) -> Result<[Felt; 3]>;

    /// The quotient `dividend / divisor` modulo `modulus`.
    ///
    /// # Errors
    ///
    /// Implementations may refuse inputs that have no such quotient.
    fn div_mod(
        &mut self,
        dividend: &UnreducedBigInt5,
        divisor: &UnreducedBigInt3,
        modulus: &BigInt3,
    ) -> Result<DivModHint>;
}

impl<O: Oracle + ?Sized> Oracle for Box<O> {
    fn split(&mut self, value: &BigInt) -> Result<[Felt; 3]> { (**self).split(value) }

    fn div_mod(
        &mut self,
        dividend: &UnreducedBigInt5,
        divisor: &UnreducedBigInt3,
        modulus: &BigInt3,
    ) -> Result<DivModHint> {
        (**self).div_mod(dividend, divisor, modulus)
    }
}

/// Computes witnesses with plain arbitrary precision integers.
#[derive(Clone, Copy, Debug, Default)]
pub struct HonestOracle;

impl Oracle for HonestOracle {
    fn split(&mut self, value: &BigInt) -> Result<[Felt; 3]> { BigInt3::split(value) }

    fn div_mod(
        &mut self,
        dividend: &UnreducedBigInt5,
        divisor: &UnreducedBigInt3,
        modulus: &BigInt3,
    ) -> Result<DivModHint> {
        let p = modulus.pack();
        if !p.is_positive() {
            return Err(Error::MalformedInput(format!("modulus {p:#x} is not positive")));
        }
        let x = dividend.pack().mod_floor(&p);
        let y = divisor.pack().mod_floor(&p);
        if y.is_zero() {
            return Err(Error::MalformedInput(
                "divisor is zero modulo the modulus".to_string(),
            ));
        }
        let (q, r) = x.div_mod_floor(&y);
        if !r.is_zero() {
            return Err(Error::MalformedInput(format!(
                "{x:#x} is not divisible by {y:#x}"
            )));
        }
        let hint = if q.is_positive() {
            DivModHint {
                quotient_positive: true,
                value: q,
            }
        } else {
            DivModHint {
                quotient_positive: false,
                value: q + p,
            }
        };
        log::trace!("div_mod hint: {hint:?}");
        Ok(hint)
    }
}

//! Oracle-assisted modular division.
//!
//! Division is not something we can afford to verify directly.  Instead the
//! oracle proposes a quotient `res`, and we check
//!
//! ```text
//! sign * divisor * res == dividend
//! ```
//!
//! exactly, as integers, by walking the limbs from least to most significant
//! and carrying the difference of each limb pair into the next one.  Each
//! carry has to be an integer of at most 127 bits in absolute value, which we
//! enforce with the range check after shifting by `2^127`.  A difference that
//! is not a multiple of `BASE` produces a carry that is a huge field element,
//! and fails that check.  The most significant difference, plus the last
//! carry, has to be exactly zero.
//!
//! The modulus only ever reaches the oracle.  The relation that is verified
//! is the exact integer one above.

use itertools::izip;
use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::constants::{BASE_INV, MAX_SUM};
use crate::error::{Inconsistency, Result};
use crate::felt::Felt;
use crate::limbs::{BigInt3, UnreducedBigInt3, UnreducedBigInt5};
use crate::mul::mul_unreduced;
use crate::oracle::Oracle;
use crate::rangecheck::RangeCheck;

/// Everything that arithmetic needs besides its operands: the range check
/// cursor and the source of witnesses.
///
/// A context is meant to be threaded through a whole computation, so that the
/// range check cells are consumed in program order.
#[derive(Debug, Default)]
pub struct Context<O> {
    range_check: RangeCheck,
    pub oracle: O,
}

impl<O: Oracle> Context<O> {
    #[must_use]
    pub fn new(oracle: O) -> Self {
        Self {
            range_check: RangeCheck::default(),
            oracle,
        }
    }

    /// The cells consumed so far.  The cursor only ever moves forward.
    #[must_use]
    pub fn range_check(&self) -> &RangeCheck { &self.range_check }

    /// Ask the oracle for the limbs of `value`.
    ///
    /// The only guarantee on the result, whatever the oracle does, is that
    /// each limb is non-negative and that the limbs sum to at most
    /// `3 * (BASE - 1)`.  So no limb exceeds `3 * BASE`.
    ///
    /// # Errors
    ///
    /// Fails if the oracle refuses, or if its limbs are out of bound.
    pub fn nondet_bigint3(&mut self, value: &BigInt) -> Result<BigInt3> {
        let res = BigInt3::from(self.oracle.split(value)?);
        let sum: Felt = res.limbs().into_iter().sum();
        self.range_check.assert_in_bound(*MAX_SUM - sum)?;
        for limb in res.limbs() {
            self.range_check.assert_in_bound(limb)?;
        }
        Ok(res)
    }

    /// Compute `res` with `res == dividend / divisor (mod modulus)`.
    ///
    /// # Errors
    ///
    /// Fails if the oracle refuses to answer, or if its answer does not
    /// satisfy the checks.  There is no partial result.
    pub fn reduce(
        &mut self,
        dividend: &UnreducedBigInt5,
        divisor: &UnreducedBigInt3,
        modulus: &BigInt3,
    ) -> Result<BigInt3> {
        let hint = self.oracle.div_mod(dividend, divisor, modulus)?;
        let res = self.nondet_bigint3(&hint.value)?;
        let sign = if hint.quotient_positive {
            Felt::one()
        } else {
            -Felt::one()
        };
        let prod = mul_unreduced(divisor, &res);
        let [prod_lo @ .., prod_top] = prod.limbs();
        let [dividend_lo @ .., dividend_top] = dividend.limbs();

        let mut carry = Felt::zero();
        for (i, prod_limb, dividend_limb) in izip!(0.., prod_lo, dividend_lo) {
            carry = (sign * prod_limb - dividend_limb + carry) * *BASE_INV;
            log::trace!("carry_{i}: {}", carry.to_signed());
            self.range_check.assert_signed_in_bound(&carry)?;
        }
        let residue = sign * prod_top - dividend_top + carry;
        if residue.is_zero() {
            Ok(res)
        } else {
            log::debug!("reduce: non-zero residue {residue:#x}");
            Err(Inconsistency::NonZeroResidue(residue).into())
        }
    }
}

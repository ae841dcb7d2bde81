//! The range check builtin, as seen from the arithmetic.
//!
//! Every call to [`RangeCheck::assert_in_bound`] consumes the next cell of an
//! append-only segment, so calls have to be threaded through in program
//! order.  The proving side turns the segment into a lookup against the
//! fixed table `0, 1, .., 2^RC_BOUND_BITS - 1`; here we only enforce the
//! bound.

use std::collections::BTreeMap;

use num_bigint::BigUint;

use crate::constants::{RC_BOUND, RC_BOUND_BITS, SIGNED_CARRY_SHIFT};
use crate::error::{Inconsistency, Result};
use crate::felt::Felt;

#[derive(Clone, Debug, Default)]
pub struct RangeCheck {
    cells: Vec<Felt>,
}

impl RangeCheck {
    /// Number of cells consumed so far.
    #[must_use]
    pub fn ptr(&self) -> usize { self.cells.len() }

    /// All values checked so far, in call order.
    #[must_use]
    pub fn cells(&self) -> &[Felt] { &self.cells }

    /// Assert `0 <= value < 2^RC_BOUND_BITS`.
    ///
    /// # Errors
    ///
    /// [`Inconsistency::OutOfBound`] if the value is too large.  The cell is
    /// consumed either way.
    pub fn assert_in_bound(&mut self, value: Felt) -> Result<()> {
        let ptr = self.ptr();
        log::trace!("range check #{ptr}: {value:#x}");
        let in_bound = value.bits() <= RC_BOUND_BITS;
        debug_assert_eq!(in_bound, value.to_biguint() < *RC_BOUND);
        self.cells.push(value);
        if in_bound {
            Ok(())
        } else {
            log::debug!("range check #{ptr} failed for {value:#x}");
            Err(Inconsistency::OutOfBound { ptr, value }.into())
        }
    }

    /// Assert that `value`, read as a signed integer, lies in
    /// `[-2^(RC_BOUND_BITS - 1), 2^(RC_BOUND_BITS - 1))`.
    ///
    /// # Errors
    ///
    /// Same as [`RangeCheck::assert_in_bound`], reporting the shifted value.
    pub fn assert_signed_in_bound(&mut self, value: &Felt) -> Result<()> {
        self.assert_in_bound(recenter(value))
    }

    /// How often each value was checked.  This is the multiplicity column of
    /// the range check lookup table.
    #[must_use]
    pub fn multiplicities(&self) -> BTreeMap<BigUint, u64> {
        let mut multiplicities = BTreeMap::new();
        for cell in &self.cells {
            *multiplicities.entry(cell.to_biguint()).or_default() += 1;
        }
        multiplicities
    }
}

/// Map a signed carry into the non-negative domain of the range check.
#[must_use]
pub fn recenter(carry: &Felt) -> Felt { *carry + *SIGNED_CARRY_SHIFT }

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use super::*;

    fn signed(value: &BigInt) -> Felt { Felt::from(value) }

    #[test]
    fn bound_is_exclusive() {
        let mut rc = RangeCheck::default();
        let bound = BigInt::one() << RC_BOUND_BITS;
        assert!(rc.assert_in_bound(signed(&(&bound - 1))).is_ok());
        assert!(rc.assert_in_bound(Felt::zero()).is_ok());
        assert!(rc.assert_in_bound(signed(&bound)).is_err());
        assert!(rc.assert_in_bound(signed(&BigInt::from(-1))).is_err());
        assert_eq!(rc.ptr(), 4);
    }

    #[test]
    fn cursor_advances_in_call_order() {
        let mut rc = RangeCheck::default();
        for i in [3_u64, 1, 3] {
            rc.assert_in_bound(Felt::from(i)).unwrap();
        }
        assert_eq!(rc.cells(), &[Felt::from(3_u64), Felt::from(1_u64), Felt::from(3_u64)]);
        let multiplicities = rc.multiplicities();
        assert_eq!(multiplicities[&BigUint::from(3_u32)], 2);
        assert_eq!(multiplicities[&BigUint::from(1_u32)], 1);
    }

    #[test]
    fn failure_reports_the_consumed_cell() {
        let mut rc = RangeCheck::default();
        rc.assert_in_bound(Felt::one()).unwrap();
        let err = rc.assert_in_bound(signed(&BigInt::from(-5))).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::OracleInconsistency(Inconsistency::OutOfBound { ptr: 1, .. })
        ));
    }

    #[test]
    fn signed_carry_edges() {
        let half = BigInt::one() << (RC_BOUND_BITS - 1);
        let mut rc = RangeCheck::default();
        assert!(rc.assert_signed_in_bound(&signed(&-&half)).is_ok());
        assert!(rc.assert_signed_in_bound(&signed(&(&half - 1))).is_ok());
        assert!(rc.assert_signed_in_bound(&signed(&(-&half - 1))).is_err());
        assert!(rc.assert_signed_in_bound(&signed(&half)).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]
        #[test]
        fn every_i128_carry_is_accepted(carry in any::<i128>()) {
            let mut rc = RangeCheck::default();
            prop_assert!(rc.assert_signed_in_bound(&signed(&BigInt::from(carry))).is_ok());
            prop_assert_eq!(
                recenter(&signed(&BigInt::from(carry))).to_signed(),
                BigInt::from(carry) + (BigInt::one() << (RC_BOUND_BITS - 1))
            );
        }
    }
}

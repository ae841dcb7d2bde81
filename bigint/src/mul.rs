//! Exact products of 3-limb values.
//!
//! These are plain polynomial products over the native field: no carries are
//! propagated and nothing is range checked.  The result is exact as long as
//! the limbs are small enough for the native field not to wrap, which holds
//! for anything below `3 * BASE`.

use crate::felt::Felt;
use crate::limbs::{BigInt3, UnreducedBigInt3, UnreducedBigInt5};

fn convolve([x0, x1, x2]: [Felt; 3], [y0, y1, y2]: [Felt; 3]) -> UnreducedBigInt5 {
    UnreducedBigInt5 {
        d0: x0 * y0,
        d1: x0 * y1 + x1 * y0,
        d2: x0 * y2 + x1 * y1 + x2 * y0,
        d3: x1 * y2 + x2 * y1,
        d4: x2 * y2,
    }
}

#[must_use]
pub fn mul(x: &BigInt3, y: &BigInt3) -> UnreducedBigInt5 { convolve(x.limbs(), y.limbs()) }

/// Same as [`mul`], for a left hand side that has not been range checked.
#[must_use]
pub fn mul_unreduced(x: &UnreducedBigInt3, y: &BigInt3) -> UnreducedBigInt5 {
    convolve(x.limbs(), y.limbs())
}

#[must_use]
pub fn sqr(x: &BigInt3) -> UnreducedBigInt5 {
    let [x0, x1, x2] = x.limbs();
    let two = Felt::from(2_u64);
    UnreducedBigInt5 {
        d0: x0 * x0,
        d1: two * x0 * x1,
        d2: two * x0 * x2 + x1 * x1,
        d3: two * x1 * x2,
        d4: x2 * x2,
    }
}

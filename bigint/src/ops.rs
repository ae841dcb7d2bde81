//! Field operations modulo `p`, built on [`Context::reduce`].
//!
//! Each of these forms the exact, unreduced result limb by limb and then
//! divides it by one, which has the oracle hand back a range checked value
//! with the same packed value.

use num_traits::One;

use crate::error::Result;
use crate::felt::Felt;
use crate::limbs::{BigInt3, UnreducedBigInt3, UnreducedBigInt5};
use crate::mul::{mul, sqr};
use crate::oracle::Oracle;
use crate::reduce::Context;

fn unit() -> UnreducedBigInt3 {
    UnreducedBigInt3 {
        d0: Felt::one(),
        ..UnreducedBigInt3::default()
    }
}

impl<O: Oracle> Context<O> {
    /// `x + y (mod p)`
    ///
    /// # Errors
    ///
    /// See [`Context::reduce`].
    pub fn add_mod(&mut self, x: &BigInt3, y: &BigInt3, p: &BigInt3) -> Result<BigInt3> {
        let sum = UnreducedBigInt5 {
            d0: x.d0 + y.d0,
            d1: x.d1 + y.d1,
            d2: x.d2 + y.d2,
            ..UnreducedBigInt5::default()
        };
        self.reduce(&sum, &unit(), p)
    }

    /// `x - y (mod p)`
    ///
    /// # Errors
    ///
    /// See [`Context::reduce`].
    pub fn sub_mod(&mut self, x: &BigInt3, y: &BigInt3, p: &BigInt3) -> Result<BigInt3> {
        let difference = UnreducedBigInt5 {
            d0: x.d0 - y.d0,
            d1: x.d1 - y.d1,
            d2: x.d2 - y.d2,
            ..UnreducedBigInt5::default()
        };
        self.reduce(&difference, &unit(), p)
    }

    /// `x * y (mod p)`
    ///
    /// # Errors
    ///
    /// See [`Context::reduce`].
    pub fn mul_mod(&mut self, x: &BigInt3, y: &BigInt3, p: &BigInt3) -> Result<BigInt3> {
        self.reduce(&mul(x, y), &unit(), p)
    }

    /// `x^2 (mod p)`
    ///
    /// # Errors
    ///
    /// See [`Context::reduce`].
    pub fn sqr_mod(&mut self, x: &BigInt3, p: &BigInt3) -> Result<BigInt3> {
        self.reduce(&sqr(x), &unit(), p)
    }

    /// `x / y (mod p)`
    ///
    /// # Errors
    ///
    /// See [`Context::reduce`].  The honest oracle refuses unless `y`
    /// divides `x` exactly once both are reduced.
    pub fn div_mod(&mut self, x: &BigInt3, y: &BigInt3, p: &BigInt3) -> Result<BigInt3> {
        self.reduce(&x.clone().into(), &y.clone().into(), p)
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use test_case::test_case;

    use super::*;
    use crate::constants::SECP_P;
    use crate::oracle::HonestOracle;

    type Op = fn(&mut Context<HonestOracle>, &BigInt3, &BigInt3, &BigInt3) -> Result<BigInt3>;

    #[test_case(Context::mul_mod, Some(15); "mul")]
    #[test_case(Context::add_mod, Some(8); "add")]
    #[test_case(Context::sub_mod, Some(2); "sub")]
    #[test_case(Context::div_mod, None; "inexact div")]
    fn five_and_three(op: Op, expected: Option<u64>) {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut ctx = Context::new(HonestOracle);
        let res = op(&mut ctx, &BigInt3::from(5_u64), &BigInt3::from(3_u64), &SECP_P);
        assert_eq!(res.ok().map(|res| res.pack()), expected.map(BigInt::from));
    }

    #[test]
    fn square() {
        let mut ctx = Context::new(HonestOracle);
        let x = BigInt3::from(u64::MAX);
        let res = ctx.sqr_mod(&x, &SECP_P).unwrap();
        assert_eq!(res.pack(), BigInt::from(u64::MAX) * BigInt::from(u64::MAX));
    }

    #[test]
    fn exact_division() {
        let mut ctx = Context::new(HonestOracle);
        let res = ctx
            .div_mod(&BigInt3::from(15_u64), &BigInt3::from(5_u64), &SECP_P)
            .unwrap();
        assert_eq!(res.pack(), BigInt::from(3));
    }

    #[test]
    fn context_threads_through_a_chain() {
        // ((5 * 3) + 3 - 5) ^ 2 == 169
        let mut ctx = Context::new(Box::new(HonestOracle) as Box<dyn Oracle>);
        let five = BigInt3::from(5_u64);
        let three = BigInt3::from(3_u64);
        let acc = ctx.mul_mod(&five, &three, &SECP_P).unwrap();
        let acc = ctx.add_mod(&acc, &three, &SECP_P).unwrap();
        let acc = ctx.sub_mod(&acc, &five, &SECP_P).unwrap();
        let acc = ctx.sqr_mod(&acc, &SECP_P).unwrap();
        assert_eq!(acc.pack(), BigInt::from(169));
        assert_eq!(ctx.range_check().ptr(), 4 * 8);
    }
}

//! Recorded oracle answers.
//!
//! A [`WitnessTape`] is to the oracle what the private I/O tape is to a guest
//! program: the prover fills it once, with a [`RecordingOracle`], and the
//! same computation can later be re-run from it with a [`TapeOracle`] without
//! access to the original oracle.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::error::{Inconsistency, Result};
use crate::felt::Felt;
use crate::limbs::{BigInt3, UnreducedBigInt3, UnreducedBigInt5};
use crate::oracle::{DivModHint, Oracle};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Witness {
    Split([Felt; 3]),
    DivMod(DivModHint),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessTape {
    pub entries: Vec<Witness>,
}

impl WitnessTape {
    /// # Errors
    ///
    /// Fails if serialisation fails.
    pub fn to_json(&self) -> Result<String> { Ok(serde_json::to_string(self)?) }

    /// # Errors
    ///
    /// Fails on malformed JSON, including limbs that are not canonical field
    /// elements.
    pub fn from_json(json: &str) -> Result<Self> { Ok(serde_json::from_str(json)?) }
}

/// Forwards every request to `inner` and keeps a copy of each answer.
#[derive(Debug, Default)]
pub struct RecordingOracle<O> {
    pub inner: O,
    pub tape: WitnessTape,
}

impl<O> RecordingOracle<O> {
    #[must_use]
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            tape: WitnessTape::default(),
        }
    }
}

impl<O: Oracle> Oracle for RecordingOracle<O> {
    fn split(&mut self, value: &BigInt) -> Result<[Felt; 3]> {
        let limbs = self.inner.split(value)?;
        self.tape.entries.push(Witness::Split(limbs));
        Ok(limbs)
    }

    fn div_mod(
        &mut self,
        dividend: &UnreducedBigInt5,
        divisor: &UnreducedBigInt3,
        modulus: &BigInt3,
    ) -> Result<DivModHint> {
        let hint = self.inner.div_mod(dividend, divisor, modulus)?;
        self.tape.entries.push(Witness::DivMod(hint.clone()));
        Ok(hint)
    }
}

/// Answers requests from a tape, in order, ignoring the request itself.
#[derive(Clone, Debug)]
pub struct TapeOracle {
    pub tape: WitnessTape,
    pub read_index: usize,
}

impl From<WitnessTape> for TapeOracle {
    fn from(tape: WitnessTape) -> Self {
        Self {
            tape,
            read_index: 0,
        }
    }
}

impl TapeOracle {
    fn next(&mut self) -> Result<&Witness> {
        let entry = self
            .tape
            .entries
            .get(self.read_index)
            .ok_or(Inconsistency::TapeExhausted)?;
        log::trace!("witness tape read #{}: {entry:?}", self.read_index);
        self.read_index += 1;
        Ok(entry)
    }
}

impl Oracle for TapeOracle {
    fn split(&mut self, _value: &BigInt) -> Result<[Felt; 3]> {
        match self.next()? {
            Witness::Split(limbs) => Ok(*limbs),
            Witness::DivMod(_) => Err(Inconsistency::UnexpectedWitness { expected: "split" }.into()),
        }
    }

    fn div_mod(
        &mut self,
        _dividend: &UnreducedBigInt5,
        _divisor: &UnreducedBigInt3,
        _modulus: &BigInt3,
    ) -> Result<DivModHint> {
        match self.next()? {
            Witness::DivMod(hint) => Ok(hint.clone()),
            Witness::Split(_) => Err(Inconsistency::UnexpectedWitness { expected: "div_mod" }.into()),
        }
    }
}

use thiserror::Error;

use crate::felt::Felt;

/// A witness failed one of the in-line checks.
///
/// None of these are recoverable: they mean the oracle handed us data that is
/// inconsistent with the relation being verified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    #[error("range check #{ptr} rejected {value:#x}")]
    OutOfBound { ptr: usize, value: Felt },
    #[error("carry chain left a non-zero residue {0:#x}")]
    NonZeroResidue(Felt),
    #[error("witness tape exhausted")]
    TapeExhausted,
    #[error("expected a {expected} witness on the tape")]
    UnexpectedWitness { expected: &'static str },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("oracle inconsistency: {0}")]
    OracleInconsistency(#[from] Inconsistency),
    /// The caller broke a precondition, e.g. asked to split a negative value.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("witness tape encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

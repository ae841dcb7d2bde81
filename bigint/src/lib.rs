#![deny(clippy::pedantic)]
#![deny(clippy::cargo)]
#![allow(clippy::module_name_repetitions)]
// Some of our dependencies transitively depend on different versions of the same crates, like syn.
#![allow(clippy::multiple_crate_versions)]
// FIXME: Remove this, when proptest's macro is updated not to trigger clippy.
#![allow(clippy::ignored_unit_patterns)]

pub mod constants;
pub mod error;
pub mod felt;
pub mod limbs;
pub mod mul;
pub mod ops;
pub mod oracle;
pub mod rangecheck;
pub mod reduce;
pub mod tape;
#[cfg(any(feature = "test", test))]
pub mod test_utils;

pub use error::{Error, Inconsistency, Result};
pub use felt::Felt;
pub use limbs::{BigInt3, UnreducedBigInt3, UnreducedBigInt5};
pub use oracle::{DivModHint, HonestOracle, Oracle};
pub use reduce::Context;

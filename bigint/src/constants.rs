use lazy_static::lazy_static;
use num_bigint::{BigInt, BigUint};
use num_traits::One;

use crate::felt::Felt;
use crate::limbs::BigInt3;

/// Number of bits per limb.  Three limbs cover the 256 bit secp256k1 field.
pub const BASE_BITS: u32 = 86;

/// The range check builtin accepts values in `[0, 2^RC_BOUND_BITS)`.
pub const RC_BOUND_BITS: u32 = 128;

/// Signed carries are shifted by `2^SIGNED_CARRY_SHIFT_BITS` before being
/// range checked.
pub const SIGNED_CARRY_SHIFT_BITS: u32 = RC_BOUND_BITS - 1;

lazy_static! {
    pub static ref BASE: BigUint = BigUint::one() << BASE_BITS;
    pub static ref BASE_INT: BigInt = BigInt::one() << BASE_BITS;
    pub static ref BASE_FELT: Felt = Felt::from(&*BASE);
    /// `BASE^-1` in the native field; carries are divided by multiplying with it.
    pub static ref BASE_INV: Felt = BASE_FELT.inverse().expect("BASE is invertible");
    /// Largest possible sum of the limbs of a fully reduced value.
    pub static ref MAX_SUM: Felt = Felt::from(3_u64) * (*BASE_FELT - Felt::one());
    pub static ref RC_BOUND: BigUint = BigUint::one() << RC_BOUND_BITS;
    pub static ref SIGNED_CARRY_SHIFT: Felt = Felt::from(1_u128 << SIGNED_CARRY_SHIFT_BITS);

    /// The secp256k1 field prime `2^256 - 2^32 - 977`.
    pub static ref SECP_P: BigInt3 = BigInt3 {
        d0: Felt::from(0x003f_ffff_ffff_fffe_ffff_fc2f_u128),
        d1: Felt::from(0x003f_ffff_ffff_ffff_ffff_ffff_u128),
        d2: Felt::from(0x000f_ffff_ffff_ffff_ffff_ffff_u128),
    };
}

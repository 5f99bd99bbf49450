//! Abstraction over the backend used for cryptographic operations.
//!
//! The data model (`Powers`, `Contribution`, `Transcript`) never touches
//! curve arithmetic directly; every operation that needs it goes through
//! this trait. Only one implementation, [`arkworks::Arkworks`], exists here,
//! but the boundary is what would let a `blst`-backed implementation be
//! dropped in without touching the rest of the crate.

mod arkworks;

use crate::{CeremonyError, Tau, G1, G2};

pub use self::arkworks::Arkworks;

pub trait Engine {
    /// Verifies that the given G1 points are valid: on curve, in the
    /// correct subgroup, and non-identity.
    fn validate_g1(points: &[G1]) -> Result<(), CeremonyError>;

    /// Verifies that the given G2 points are valid: on curve, in the
    /// correct subgroup, and non-identity.
    fn validate_g2(points: &[G2]) -> Result<(), CeremonyError>;

    /// Verifies that `pubkey` commits to the same secret that carried
    /// `previous` to `tau`, i.e. `e(tau, g2) == e(previous, pubkey)`.
    fn verify_pubkey(tau: G1, previous: G1, pubkey: G2) -> Result<(), CeremonyError>;

    /// Verifies that `powers` is a sequence of consecutive powers of `tau`,
    /// i.e. `powers[i] = powers[i-1] * tau` for all `i`.
    fn verify_g1(powers: &[G1], tau: G2) -> Result<(), CeremonyError>;

    /// Verifies that `g1` and `g2` encode the same sequence of values.
    fn verify_g2(g1: &[G1], g2: &[G2]) -> Result<(), CeremonyError>;

    /// Updates `powers` and `pubkey` in place by folding in `tau`.
    fn add_tau(tau: &Tau, powers: &mut crate::Powers, pubkey: &mut G2) -> Result<(), CeremonyError>;
}

#[cfg(feature = "bench")]
#[doc(hidden)]
pub mod bench {
    use super::arkworks::bench as arkworks_bench;
    use criterion::Criterion;

    pub fn group(criterion: &mut Criterion) {
        arkworks_bench::group(criterion);
    }
}

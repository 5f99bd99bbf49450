//! Derivation of a contributor's secret scalar from caller-supplied
//! randomness.
//!
//! Matches the original ceremony's derivation exactly: `BLAKE2b-256(randomness)`
//! reduced mod `r` via big-endian interpretation. There is no per-sub-ceremony
//! domain separation — the same derived scalar is applied to every
//! sub-ceremony in a batch contribution, exactly as the reference
//! implementation does it.

use crate::ContributeError;
use ark_bls12_381::Fr;
use ark_ff::{PrimeField, Zero};
use blake2::{Blake2b, Digest};
use digest::consts::U32;
use zeroize::Zeroizing;

/// Minimum length of caller-supplied randomness, in bytes. Shorter input is
/// rejected rather than silently hashed into a weak secret.
pub const MIN_RANDOMNESS_BYTES: usize = 64;

type Blake2b256 = Blake2b<U32>;

/// A contributor's secret scalar, held only long enough to update a
/// contribution. Zeroized on drop.
pub struct Tau(Zeroizing<Fr>);

impl Tau {
    /// Derives a secret scalar from randomness supplied by the contributor.
    ///
    /// # Errors
    ///
    /// Returns [`ContributeError::ShortRandomness`] if `randomness` is
    /// shorter than [`MIN_RANDOMNESS_BYTES`], or
    /// [`ContributeError::DegenerateSecret`] in the astronomically unlikely
    /// case the hash reduces to zero mod `r`.
    pub fn derive(randomness: &[u8]) -> Result<Self, ContributeError> {
        if randomness.len() < MIN_RANDOMNESS_BYTES {
            return Err(ContributeError::ShortRandomness(
                MIN_RANDOMNESS_BYTES,
                randomness.len(),
            ));
        }
        let mut hasher = Blake2b256::new();
        hasher.update(randomness);
        let digest = hasher.finalize();
        let scalar = Fr::from_be_bytes_mod_order(&digest);
        if scalar.is_zero() {
            return Err(ContributeError::DegenerateSecret);
        }
        Ok(Self(Zeroizing::new(scalar)))
    }

    #[must_use]
    pub(crate) fn scalar(&self) -> Fr {
        *self.0
    }

    /// Returns `[1, tau, tau^2, ..., tau^(n-1)]`, zeroized on drop.
    pub(crate) fn powers(&self, n: usize) -> Zeroizing<Vec<Fr>> {
        let mut powers = Zeroizing::new(Vec::with_capacity(n));
        let mut pow_tau = Fr::from(1_u64);
        for _ in 0..n {
            powers.push(pow_tau);
            pow_tau *= *self.0;
        }
        powers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_randomness_one_byte_short() {
        let randomness = [0_u8; 63];
        assert_eq!(
            Tau::derive(&randomness),
            Err(ContributeError::ShortRandomness(64, 63))
        );
    }

    #[test]
    fn accepts_randomness_at_minimum_length() {
        let randomness = [0_u8; 64];
        assert!(Tau::derive(&randomness).is_ok());
    }

    #[test]
    fn derives_deterministically() {
        let randomness = [7_u8; 64];
        let a = Tau::derive(&randomness).unwrap();
        let b = Tau::derive(&randomness).unwrap();
        assert_eq!(a.scalar(), b.scalar());
    }

    #[test]
    fn distinct_randomness_gives_distinct_secrets() {
        let a = Tau::derive(&[1_u8; 64]).unwrap();
        let b = Tau::derive(&[2_u8; 64]).unwrap();
        assert_ne!(a.scalar(), b.scalar());
    }

    #[test]
    fn power_table_starts_at_one() {
        let tau = Tau::derive(&[3_u8; 64]).unwrap();
        let powers = tau.powers(4);
        assert_eq!(powers[0], Fr::from(1_u64));
        assert_eq!(powers[1], tau.scalar());
        assert_eq!(powers[2], tau.scalar() * tau.scalar());
    }
}

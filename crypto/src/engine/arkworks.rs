//! The only [`super::Engine`] implementation: arkworks' pure-Rust BLS12-381.

use crate::{
    zcash_format::{parse_g1, parse_g2, write_g1, write_g2},
    CeremonyError, ParseError, Powers, Tau, G1, G2,
};
use ark_bls12_381::{Bls12_381, Fr, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::{msm::VariableBaseMSM, AffineCurve, PairingEngine, ProjectiveCurve};
use ark_ff::{PrimeField, UniformRand, Zero};
use rayon::prelude::*;
use std::{cmp::max, iter};

pub struct Arkworks;

impl super::Engine for Arkworks {
    fn validate_g1(points: &[G1]) -> Result<(), CeremonyError> {
        points.par_iter().enumerate().try_for_each(|(i, point)| {
            let affine =
                parse_g1(&point.0).map_err(|error| CeremonyError::InvalidG1Power(i, error))?;
            if !affine.is_in_correct_subgroup_assuming_on_curve() {
                return Err(CeremonyError::InvalidG1Power(i, ParseError::InvalidSubgroup));
            }
            if affine.is_zero() {
                return Err(CeremonyError::ZeroG1(i));
            }
            Ok(())
        })
    }

    fn validate_g2(points: &[G2]) -> Result<(), CeremonyError> {
        points.par_iter().enumerate().try_for_each(|(i, point)| {
            let affine =
                parse_g2(&point.0).map_err(|error| CeremonyError::InvalidG2Power(i, error))?;
            if !affine.is_in_correct_subgroup_assuming_on_curve() {
                return Err(CeremonyError::InvalidG2Power(i, ParseError::InvalidSubgroup));
            }
            if affine.is_zero() {
                return Err(CeremonyError::ZeroG2(i));
            }
            Ok(())
        })
    }

    fn verify_pubkey(tau: G1, previous: G1, pubkey: G2) -> Result<(), CeremonyError> {
        let tau = parse_g1(&tau.0).map_err(CeremonyError::from)?;
        let previous = parse_g1(&previous.0).map_err(CeremonyError::from)?;
        let pubkey = parse_g2(&pubkey.0).map_err(CeremonyError::from)?;
        let g2_generator = G2Affine::prime_subgroup_generator();
        if Bls12_381::pairing(tau, g2_generator) != Bls12_381::pairing(previous, pubkey) {
            return Err(CeremonyError::PubKeyPairingFailed);
        }
        Ok(())
    }

    fn verify_g1(powers: &[G1], tau: G2) -> Result<(), CeremonyError> {
        let powers = powers
            .iter()
            .map(|g| parse_g1(&g.0))
            .collect::<Result<Vec<_>, _>>()
            .map_err(CeremonyError::from)?;
        let tau = parse_g2(&tau.0).map_err(CeremonyError::from)?;

        let (factors, sum) = random_factors(powers.len() - 1);
        let lhs_g1 = VariableBaseMSM::multi_scalar_mul(&powers[1..], &factors);
        let lhs_g2 = G2Affine::prime_subgroup_generator().mul(sum).into_affine();
        let rhs_g1 = VariableBaseMSM::multi_scalar_mul(&powers[..factors.len()], &factors);
        let rhs_g2 = tau.mul(sum).into_affine();
        if Bls12_381::pairing(lhs_g1, lhs_g2) != Bls12_381::pairing(rhs_g1, rhs_g2) {
            return Err(CeremonyError::G1PairingFailed);
        }
        Ok(())
    }

    fn verify_g2(g1: &[G1], g2: &[G2]) -> Result<(), CeremonyError> {
        let g1 = g1
            .iter()
            .map(|g| parse_g1(&g.0))
            .collect::<Result<Vec<_>, _>>()
            .map_err(CeremonyError::from)?;
        let g2 = g2
            .iter()
            .map(|g| parse_g2(&g.0))
            .collect::<Result<Vec<_>, _>>()
            .map_err(CeremonyError::from)?;

        let (factors, sum) = random_factors(g2.len());
        let lhs_g1 = VariableBaseMSM::multi_scalar_mul(&g1[..factors.len()], &factors);
        let lhs_g2 = G2Affine::prime_subgroup_generator().mul(sum).into_affine();
        let rhs_g1 = G1Affine::prime_subgroup_generator().mul(sum).into_affine();
        let rhs_g2 = VariableBaseMSM::multi_scalar_mul(&g2, &factors);
        if Bls12_381::pairing(lhs_g1, lhs_g2) != Bls12_381::pairing(rhs_g1, rhs_g2) {
            return Err(CeremonyError::G2PairingFailed);
        }
        Ok(())
    }

    fn add_tau(tau: &Tau, powers: &mut Powers, pubkey: &mut G2) -> Result<(), CeremonyError> {
        let n = max(powers.g1.len(), powers.g2.len());
        let pow_tau = tau.powers(n);

        let g1_affine = powers
            .g1
            .iter()
            .map(|g| parse_g1(&g.0))
            .collect::<Result<Vec<_>, _>>()
            .map_err(CeremonyError::from)?;
        let g1_projective: Vec<G1Projective> = g1_affine
            .par_iter()
            .zip(pow_tau.par_iter())
            .map(|(point, scalar)| point.mul(scalar.into_repr()))
            .collect();
        powers.g1 = G1Projective::batch_normalization_into_affine(&g1_projective)
            .iter()
            .map(|p| G1(write_g1(p)))
            .collect();

        let g2_affine = powers
            .g2
            .iter()
            .map(|g| parse_g2(&g.0))
            .collect::<Result<Vec<_>, _>>()
            .map_err(CeremonyError::from)?;
        let g2_projective: Vec<G2Projective> = g2_affine
            .par_iter()
            .zip(pow_tau.par_iter())
            .map(|(point, scalar)| point.mul(scalar.into_repr()))
            .collect();
        powers.g2 = G2Projective::batch_normalization_into_affine(&g2_projective)
            .iter()
            .map(|p| G2(write_g2(p)))
            .collect();

        let current_pubkey = parse_g2(&pubkey.0).map_err(CeremonyError::from)?;
        let new_pubkey = current_pubkey.mul(tau.scalar()).into_affine();
        *pubkey = G2(write_g2(&new_pubkey));

        Ok(())
    }
}

/// Generates `n` random field elements together with their sum, for use in
/// a batched random-linear-combination pairing check.
fn random_factors(n: usize) -> (Vec<<Fr as PrimeField>::BigInt>, Fr) {
    let mut rng = rand::thread_rng();
    let mut sum = Fr::zero();
    let factors = iter::from_fn(|| {
        let r = Fr::rand(&mut rng);
        sum += r;
        Some(r.into_repr())
    })
    .take(n)
    .collect::<Vec<_>>();
    (factors, sum)
}

#[cfg(feature = "bench")]
#[doc(hidden)]
pub mod bench {
    use super::*;
    use crate::Engine;
    use criterion::{black_box, Criterion};

    pub fn group(criterion: &mut Criterion) {
        bench_add_tau(criterion);
    }

    fn bench_add_tau(criterion: &mut Criterion) {
        criterion.bench_function("engine/add_tau", move |bencher| {
            let mut powers = Powers::new(32768, 65);
            let mut pubkey = G2::one();
            let tau = Tau::derive(&[42_u8; 64]).unwrap();
            bencher.iter(|| black_box(Arkworks::add_tau(&tau, &mut powers, &mut pubkey)));
        });
    }
}

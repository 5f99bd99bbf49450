//! Compressed point encoding for BLS12-381, as specified by the ZCash
//! `pairing` crate.
//!
//! See <https://github.com/zcash/librustzcash/blob/6e0364cd42a2b3d2b958a54771ef51a8db79dd29/pairing/src/bls12_381/README.md#serialization>
//!
//! Byte 0 carries three flag bits in its high bits: compression (always set
//! here, uncompressed points are not supported), infinity, and the sign of
//! y. G1 is one 48-byte big-endian field element; G2 is two, with the `c1`
//! coefficient first, matching the ZCash convention.
//!
//! This module works on raw byte arrays, not hex strings: the `0x`-prefixed
//! hex encoding lives one layer up, in [`crate::hex_format`], used by the
//! `G1`/`G2` newtypes' `Serialize`/`Deserialize` impls. Subgroup membership
//! is not checked here; that is the verifier's job (`crate::Engine`).

use crate::ParseError;
use ark_bls12_381::{Fq, Fq2, G1Affine, G2Affine};
use ark_ec::AffineCurve;
use ark_ff::{BigInteger, FpParameters, PrimeField, Zero};

fn fq_to_bytes_be(x: Fq) -> [u8; 48] {
    let mut le = x.into_repr().to_bytes_le();
    debug_assert_eq!(le.len(), 48);
    le.reverse();
    let mut out = [0_u8; 48];
    out.copy_from_slice(&le);
    out
}

fn fq_from_bytes_be(bytes: &[u8]) -> Result<Fq, ParseError> {
    let mut le = [0_u8; 48];
    le.copy_from_slice(bytes);
    le.reverse();
    let mut repr = <Fq as PrimeField>::BigInt::default();
    repr.read_le(&le[..])
        .map_err(|_| ParseError::InvalidXCoordinate)?;
    if repr >= <Fq as PrimeField>::Params::MODULUS {
        return Err(ParseError::InvalidPrimeField(0));
    }
    Fq::from_repr(repr).ok_or(ParseError::InvalidXCoordinate)
}

/// Decodes 48 ZCash-compressed bytes into a G1 point.
pub fn parse_g1(bytes: &[u8; 48]) -> Result<G1Affine, ParseError> {
    let mut bytes = *bytes;
    let compressed = bytes[0] & 0x80 != 0;
    let infinity = bytes[0] & 0x40 != 0;
    let greatest = bytes[0] & 0x20 != 0;
    bytes[0] &= 0x1f;

    if !compressed {
        return Err(ParseError::NotCompressed);
    }
    if infinity {
        if greatest || bytes.iter().any(|b| *b != 0) {
            return Err(ParseError::InvalidInfinity);
        }
        return Ok(G1Affine::zero());
    }

    let x = fq_from_bytes_be(&bytes)?;
    G1Affine::get_point_from_x(x, greatest).ok_or(ParseError::InvalidXCoordinate)
}

/// Decodes 96 ZCash-compressed bytes into a G2 point.
pub fn parse_g2(bytes: &[u8; 96]) -> Result<G2Affine, ParseError> {
    let mut bytes = *bytes;
    let compressed = bytes[0] & 0x80 != 0;
    let infinity = bytes[0] & 0x40 != 0;
    let greatest = bytes[0] & 0x20 != 0;
    bytes[0] &= 0x1f;

    if !compressed {
        return Err(ParseError::NotCompressed);
    }
    if infinity {
        if greatest || bytes.iter().any(|b| *b != 0) {
            return Err(ParseError::InvalidInfinity);
        }
        return Ok(G2Affine::zero());
    }

    let c1 = fq_from_bytes_be(&bytes[0..48])?;
    let c0 = fq_from_bytes_be(&bytes[48..96])?;
    let x = Fq2::new(c0, c1);
    G2Affine::get_point_from_x(x, greatest).ok_or(ParseError::InvalidXCoordinate)
}

/// Encodes a G1 point as 48 ZCash-compressed bytes.
#[must_use]
pub fn write_g1(point: &G1Affine) -> [u8; 48] {
    let mut bytes = [0_u8; 48];
    if point.is_zero() {
        bytes[0] = 0xc0;
    } else {
        bytes = fq_to_bytes_be(point.x);
        bytes[0] |= 0x80;
        if point.y > -point.y {
            bytes[0] |= 0x20;
        }
    }
    bytes
}

/// Encodes a G2 point as 96 ZCash-compressed bytes.
#[must_use]
pub fn write_g2(point: &G2Affine) -> [u8; 96] {
    let mut bytes = [0_u8; 96];
    if point.is_zero() {
        bytes[0] = 0xc0;
    } else {
        bytes[0..48].copy_from_slice(&fq_to_bytes_be(point.x.c1));
        bytes[48..96].copy_from_slice(&fq_to_bytes_be(point.x.c0));
        bytes[0] |= 0x80;
        if point.y > -point.y {
            bytes[0] |= 0x20;
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex_format::hex_str_to_bytes;
    use ark_ec::AffineCurve;

    #[test]
    fn parses_generators() {
        let g1_bytes: [u8; 48] = hex_str_to_bytes(
            "0x97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb",
        )
        .unwrap();
        assert_eq!(
            parse_g1(&g1_bytes).unwrap(),
            G1Affine::prime_subgroup_generator()
        );

        let g2_bytes: [u8; 96] = hex_str_to_bytes(
            "0x93e02b6052719f607dacd3a088274f65596bd0d09920b61ab5da61bbdc7f5049334cf11213945d57e5ac7d055d042b7e024aa2b2f08f0a91260805272dc51051c6e47ad4fa403b02b4510b647ae3d1770bac0326a805bbefd48056c8c121bdb8",
        )
        .unwrap();
        assert_eq!(
            parse_g2(&g2_bytes).unwrap(),
            G2Affine::prime_subgroup_generator()
        );
    }

    #[test]
    fn round_trips_generator() {
        let bytes: [u8; 48] = hex_str_to_bytes(
            "0x97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb",
        )
        .unwrap();
        let point = parse_g1(&bytes).unwrap();
        assert_eq!(write_g1(&point), bytes);
    }

    #[test]
    fn parses_compressed_infinity() {
        let mut g1_zero = [0_u8; 48];
        g1_zero[0] = 0xc0;
        let point = parse_g1(&g1_zero).unwrap();
        assert!(point.is_zero());
        assert_eq!(write_g1(&point), g1_zero);

        let mut g2_zero = [0_u8; 96];
        g2_zero[0] = 0xc0;
        let point = parse_g2(&g2_zero).unwrap();
        assert!(point.is_zero());
        assert_eq!(write_g2(&point), g2_zero);
    }

    #[test]
    fn rejects_uncompressed() {
        let bytes = [0_u8; 48];
        assert_eq!(parse_g1(&bytes), Err(ParseError::NotCompressed));
    }

    #[test]
    fn rejects_nonzero_infinity() {
        let mut bytes = [0_u8; 48];
        bytes[0] = 0xc0;
        bytes[10] = 1;
        assert_eq!(parse_g1(&bytes), Err(ParseError::InvalidInfinity));
    }
}

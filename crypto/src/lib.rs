#![warn(clippy::all, clippy::pedantic, clippy::cargo, clippy::nursery)]
#![allow(clippy::cast_lossless, clippy::module_name_repetitions)]
#![cfg_attr(any(test, feature = "bench"), allow(clippy::wildcard_imports))]

mod batch;
mod contribution;
mod engine;
mod error;
mod group;
mod hex_format;
mod powers;
mod secret;
mod transcript;
mod zcash_format;

pub use crate::{
    batch::{BatchContribution, BatchTranscript},
    contribution::Contribution,
    engine::{Arkworks, Engine},
    error::{CeremoniesError, CeremonyError, ContributeError, ErrorCode, ParseError},
    group::{G1, G2},
    powers::Powers,
    secret::{Tau, MIN_RANDOMNESS_BYTES},
    transcript::{Transcript, Witness},
};

/// Default sub-ceremony sizes for a batch contribution: `(numG1Powers,
/// numG2Powers)` pairs.
pub const SIZES: [(usize, usize); 4] = [(4096, 65), (8192, 65), (16384, 65), (32768, 65)];

#[cfg(feature = "bench")]
#[doc(hidden)]
pub mod bench {
    use super::*;
    use criterion::Criterion;

    pub fn group(criterion: &mut Criterion) {
        engine::bench::group(criterion);
    }
}

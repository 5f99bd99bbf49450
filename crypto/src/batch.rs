use crate::{CeremoniesError, Contribution, Engine, Tau, Transcript, G2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::instrument;

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct BatchTranscript {
    pub transcripts: Vec<Transcript>,

    /// Opaque to this core: passed through unchanged, never populated or
    /// checked here.
    pub participant_ids: Vec<String>,

    /// Opaque to this core: passed through unchanged, never populated or
    /// checked here.
    pub participant_ecdsa_signatures: Vec<String>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchContribution {
    pub contributions: Vec<Contribution>,
}

impl BatchTranscript {
    pub fn new<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        Self {
            transcripts: iter
                .into_iter()
                .map(|(num_g1, num_g2)| Transcript::new(num_g1, num_g2))
                .collect(),
            participant_ids: Vec::new(),
            participant_ecdsa_signatures: Vec::new(),
        }
    }

    /// Audits this state standalone: every sub-ceremony's witness chain is
    /// internally consistent and its current powers match the chain's tip.
    /// Returns `false` rather than an error since this is a caller-facing
    /// pass/fail audit, not a verification step inside a larger pipeline.
    #[instrument(level = "info", skip_all, fields(n=self.transcripts.len()))]
    #[must_use]
    pub fn verify<E: Engine>(&self) -> bool {
        self.transcripts
            .par_iter()
            .all(|transcript| transcript.audit::<E>().is_ok())
    }

    /// Creates the start of a new batch contribution.
    #[must_use]
    pub fn contribution(&self) -> BatchContribution {
        BatchContribution {
            contributions: self
                .transcripts
                .iter()
                .map(Transcript::contribution)
                .collect(),
        }
    }

    /// Verifies and applies a batch contribution to the transcript.
    #[instrument(level = "info", skip_all, fields(n=contribution.contributions.len()))]
    pub fn verify_add<E: Engine>(
        &mut self,
        contribution: BatchContribution,
    ) -> Result<(), CeremoniesError> {
        if self.transcripts.len() != contribution.contributions.len() {
            return Err(CeremoniesError::UnexpectedNumContributions(
                self.transcripts.len(),
                contribution.contributions.len(),
            ));
        }

        self.transcripts
            .par_iter_mut()
            .zip(&contribution.contributions)
            .enumerate()
            .try_for_each(|(i, (transcript, contribution))| {
                transcript
                    .verify::<E>(contribution)
                    .map_err(|e| CeremoniesError::InvalidCeremony(i, e))
            })?;

        for (transcript, contribution) in self
            .transcripts
            .iter_mut()
            .zip(contribution.contributions.into_iter())
        {
            transcript.add(contribution);
        }

        Ok(())
    }
}

impl BatchContribution {
    #[instrument(level = "info", skip_all, fields(n=self.contributions.len()))]
    pub fn receipt(&self) -> Vec<G2> {
        self.contributions.iter().map(|c| c.pubkey).collect()
    }

    /// Derives a single secret from `randomness` and folds it into every
    /// sub-ceremony in the batch. There is deliberately no per-sub-ceremony
    /// domain separation: the same derived scalar is applied everywhere,
    /// matching the reference ceremony's behaviour.
    #[instrument(level = "info", skip_all, fields(n=self.contributions.len()))]
    pub fn add_entropy<E: Engine>(&mut self, randomness: &[u8]) -> Result<(), CeremoniesError> {
        let tau = Tau::derive(randomness)?;
        self.contributions
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(i, contribution)| {
                contribution
                    .add_tau::<E>(&tau)
                    .map_err(|e| CeremoniesError::InvalidCeremony(i, e))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arkworks;

    #[test]
    fn batch_contribution_round_trip() {
        let mut transcript = BatchTranscript::new([(4, 2), (8, 2)]);
        let mut contribution = transcript.contribution();
        contribution.add_entropy::<Arkworks>(&[5_u8; 64]).unwrap();
        transcript.verify_add::<Arkworks>(contribution).unwrap();
        assert_eq!(transcript.transcripts[0].num_contributions(), 1);
        assert_eq!(transcript.transcripts[1].num_contributions(), 1);
    }

    #[test]
    fn rejects_wrong_contribution_count() {
        let mut transcript = BatchTranscript::new([(4, 2)]);
        let contribution = BatchContribution {
            contributions: vec![Contribution::new(4, 2), Contribution::new(4, 2)],
        };
        assert_eq!(
            transcript.verify_add::<Arkworks>(contribution),
            Err(CeremoniesError::UnexpectedNumContributions(1, 2))
        );
    }

    #[test]
    fn verify_accepts_known_good_state_and_rejects_tampering() {
        let mut transcript = BatchTranscript::new(crate::SIZES);
        for i in 0..10 {
            let mut contribution = transcript.contribution();
            contribution
                .add_entropy::<Arkworks>(&[i as u8; 64])
                .unwrap();
            transcript.verify_add::<Arkworks>(contribution).unwrap();
        }
        assert!(transcript.verify::<Arkworks>());

        transcript.transcripts[0].powers.g1[1].0[10] ^= 1;
        assert!(!transcript.verify::<Arkworks>());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::{Arkworks, SIZES};
    use proptest::prelude::*;

    proptest! {
        /// Distinct randomness must fold into distinct batch pubkeys: the
        /// per-sub-ceremony entropy derivation in `secret.rs` has no
        /// collisions for any two inputs a proptest run will sample.
        #[test]
        fn distinct_randomness_gives_distinct_pubkeys(
            a in prop::collection::vec(any::<u8>(), 64..96),
            b in prop::collection::vec(any::<u8>(), 64..96),
        ) {
            prop_assume!(a != b);
            let transcript = BatchTranscript::new(SIZES);

            let mut c1 = transcript.contribution();
            c1.add_entropy::<Arkworks>(&a).unwrap();

            let mut c2 = transcript.contribution();
            c2.add_entropy::<Arkworks>(&b).unwrap();

            prop_assert_ne!(c1.receipt(), c2.receipt());
        }

        /// A chain of two contributions across all four batch sizes stays
        /// internally consistent after each step.
        #[test]
        fn chain_of_two_contributions_stays_consistent(
            a in prop::collection::vec(any::<u8>(), 64..96),
            b in prop::collection::vec(any::<u8>(), 64..96),
        ) {
            let mut transcript = BatchTranscript::new(SIZES);

            let mut first = transcript.contribution();
            first.add_entropy::<Arkworks>(&a).unwrap();
            transcript.verify_add::<Arkworks>(first).unwrap();
            prop_assert!(transcript.verify::<Arkworks>());

            let mut second = transcript.contribution();
            second.add_entropy::<Arkworks>(&b).unwrap();
            transcript.verify_add::<Arkworks>(second).unwrap();
            prop_assert!(transcript.verify::<Arkworks>());
        }
    }
}

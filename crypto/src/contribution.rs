use crate::{CeremonyError, Engine, Powers, Tau, G1, G2};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One contributor's update to a single sub-ceremony's SRS.
///
/// Starts out as a copy of the transcript's current powers with an
/// identity pubkey; [`Contribution::add_tau`] folds in the contributor's
/// secret, after which the result is sent back to the coordinator for
/// [`crate::Transcript::verify`].
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Contribution {
    #[serde(flatten)]
    pub powers: Powers,

    #[serde(rename = "potPubkey")]
    pub pubkey: G2,
}

impl Contribution {
    /// A contribution with no entropy folded in yet: the identity pubkey
    /// and unchanged powers.
    #[must_use]
    pub fn new(num_g1: usize, num_g2: usize) -> Self {
        Self {
            powers: Powers::new(num_g1, num_g2),
            pubkey: G2::one(),
        }
    }

    #[must_use]
    pub fn has_entropy(&self) -> bool {
        self.pubkey != G2::one()
    }

    /// Structural checks that don't require curve arithmetic.
    pub fn sanity_check(&self) -> Result<(), CeremonyError> {
        if self.powers.g1.is_empty() {
            return Err(CeremonyError::UnsupportedNumG1Powers(0));
        }
        if self.powers.g2.is_empty() {
            return Err(CeremonyError::UnsupportedNumG2Powers(0));
        }
        if self.powers.g1[0] != G1::one() {
            return Err(CeremonyError::InvalidG1FirstValue);
        }
        if self.powers.g2[0] != G2::one() {
            return Err(CeremonyError::InvalidG2FirstValue);
        }
        Ok(())
    }

    /// Folds the given secret into this contribution's powers and pubkey.
    #[instrument(level = "info", skip_all, fields(n1=self.powers.g1.len(), n2=self.powers.g2.len()))]
    pub fn add_tau<E: Engine>(&mut self, tau: &Tau) -> Result<(), CeremonyError> {
        E::add_tau(tau, &mut self.powers, &mut self.pubkey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arkworks;

    #[test]
    fn fresh_contribution_has_no_entropy() {
        let c = Contribution::new(4, 2);
        assert!(!c.has_entropy());
        c.sanity_check().unwrap();
    }

    #[test]
    fn add_tau_changes_powers_and_pubkey() {
        let mut c = Contribution::new(4, 2);
        let tau = Tau::derive(&[9_u8; 64]).unwrap();
        c.add_tau::<Arkworks>(&tau).unwrap();
        assert!(c.has_entropy());
        assert_ne!(c.powers.g1[1], G1::one());
        assert_eq!(c.powers.g1[0], G1::one());
        assert_eq!(c.powers.g2[0], G2::one());
    }
}

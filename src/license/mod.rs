//! License gate
//!
//! One entitlement flag per editor plus the optional premium renderer
//! capability. [`LicenseGate::decide`] is the single decision point used by
//! rendering, importing and store mutation:
//!
//! | kind     | entitled + capability | decision  |
//! |----------|-----------------------|-----------|
//! | free     | n/a                   | `Free`    |
//! | premium  | yes                   | `Granted` |
//! | premium  | no                    | `Denied`  |

pub mod lock;
pub mod signature;

use std::sync::Arc;

use crate::categories;
use crate::render::premium::PremiumRenderer;
use signature::Signer;

/// Outcome of the gate for one kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Not a premium kind
    Free,
    /// Premium kind, entitlement and renderer present
    Granted,
    /// Premium kind without a usable entitlement
    Denied,
}

impl Decision {
    /// Full content may be shown or kept
    pub fn allows_content(self) -> bool {
        !matches!(self, Decision::Denied)
    }
}

#[derive(Clone)]
pub struct LicenseGate {
    entitled: bool,
    signer: Signer,
    premium: Option<Arc<dyn PremiumRenderer>>,
}

impl LicenseGate {
    /// A gate with no entitlement
    pub fn free(signer: Signer) -> Self {
        Self {
            entitled: false,
            signer,
            premium: None,
        }
    }

    /// A gate with an entitlement and the premium renderer installed
    pub fn granted(signer: Signer, premium: Arc<dyn PremiumRenderer>) -> Self {
        Self {
            entitled: true,
            signer,
            premium: Some(premium),
        }
    }

    pub fn decide(&self, kind: &str) -> Decision {
        if !categories::is_premium(kind) {
            Decision::Free
        } else if self.is_granted() {
            Decision::Granted
        } else {
            Decision::Denied
        }
    }

    /// Entitled and able to render premium kinds
    pub fn is_granted(&self) -> bool {
        self.entitled && self.premium.is_some()
    }

    pub fn is_entitled(&self) -> bool {
        self.entitled
    }

    /// Install the premium renderer and set the entitlement.
    pub fn activate(&mut self, premium: Arc<dyn PremiumRenderer>) {
        self.entitle();
        self.install(premium);
    }

    /// Set the entitlement flag from a validation result.
    pub fn entitle(&mut self) {
        self.entitled = true;
    }

    /// Install the premium renderer without touching the entitlement.
    pub fn install(&mut self, premium: Arc<dyn PremiumRenderer>) {
        self.premium = Some(premium);
    }

    /// Drop the entitlement; the renderer stays installed.
    pub fn revoke(&mut self) {
        self.entitled = false;
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    pub fn premium(&self) -> Option<&Arc<dyn PremiumRenderer>> {
        self.premium.as_ref()
    }
}

impl Default for LicenseGate {
    fn default() -> Self {
        Self::free(Signer::default())
    }
}

impl std::fmt::Debug for LicenseGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LicenseGate")
            .field("entitled", &self.entitled)
            .field("premium", &self.premium.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::premium::StandardPremiumRenderer;

    #[test]
    fn test_decision_table() {
        let free = LicenseGate::default();
        assert_eq!(free.decide("h2"), Decision::Free);
        assert_eq!(free.decide("tip-info"), Decision::Denied);

        let granted = LicenseGate::granted(Signer::default(), Arc::new(StandardPremiumRenderer));
        assert_eq!(granted.decide("h2"), Decision::Free);
        assert_eq!(granted.decide("tip-info"), Decision::Granted);
    }

    #[test]
    fn test_entitlement_without_renderer_is_denied() {
        let gate = LicenseGate {
            entitled: true,
            signer: Signer::default(),
            premium: None,
        };
        assert_eq!(gate.decide("card-basic"), Decision::Denied);
    }

    #[test]
    fn test_activate_and_revoke() {
        let mut gate = LicenseGate::default();
        gate.activate(Arc::new(StandardPremiumRenderer));
        assert!(gate.is_granted());
        gate.revoke();
        assert_eq!(gate.decide("poll-vote"), Decision::Denied);
        assert!(gate.premium().is_some());
    }

    #[test]
    fn test_entitlement_and_renderer_arrive_separately() {
        let mut gate = LicenseGate::default();
        gate.entitle();
        assert_eq!(gate.decide("tip-info"), Decision::Denied);
        gate.install(Arc::new(StandardPremiumRenderer));
        assert_eq!(gate.decide("tip-info"), Decision::Granted);
    }

    #[test]
    fn test_unknown_kind_is_free() {
        assert_eq!(LicenseGate::default().decide("marquee"), Decision::Free);
    }
}

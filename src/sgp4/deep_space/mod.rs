//! # Deep-space perturbations
//!
//! Satellites whose period is at least 225 minutes are perturbed by the Moon and the Sun
//! strongly enough to need the SDP4 extension of the model. The work is split in four stages:
//!
//! - [`dscom`]: lunar and solar series common to the other stages,
//! - [`dpper`]: long-period periodics applied at every propagation,
//! - [`dsinit`]: secular rates and resonance amplitudes computed once at initialization,
//! - [`dspace`]: secular update and numerical integration of the resonance.
//!
//! [`DeepSpaceTerms`] gathers the result of the initialization together with the mutable
//! integrator state.
pub mod dpper;
pub mod dscom;
pub mod dsinit;
pub mod dspace;

pub use dpper::{LunarSolarTerms, PeriodicElements, Periodics};
pub use dscom::PeriodicCoefficients;
pub use dsinit::{Resonance, ResonanceTerms, SecularRates};
pub use dspace::Integrator;

use crate::constants::Float;
use dscom::CommonTerms;
use dsinit::EpochState;

/// Deep-space part of a satellite record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeepSpaceTerms {
    pub lunar_solar: LunarSolarTerms,
    pub secular: SecularRates,
    pub resonance: ResonanceTerms,
    /// Only member mutated by propagation
    pub integrator: Integrator,
    pub(crate) gsto: Float,
    pub(crate) no: Float,
    pub(crate) argpo: Float,
    pub(crate) argpdot: Float,
}

impl DeepSpaceTerms {
    pub(crate) fn init(common: &CommonTerms, epoch: &EpochState) -> Self {
        let secular = SecularRates::compute(common);
        let resonance = ResonanceTerms::init(common, epoch, &secular);
        DeepSpaceTerms {
            lunar_solar: LunarSolarTerms::from(common),
            secular,
            integrator: Integrator::at_epoch(&resonance, epoch.no),
            resonance,
            gsto: epoch.gsto,
            no: epoch.no,
            argpo: epoch.argpo,
            argpdot: epoch.argpdot,
        }
    }

    /// Put the resonance integrator back at epoch.
    pub fn reset_integrator(&mut self) {
        self.integrator = Integrator::at_epoch(&self.resonance, self.no);
    }
}

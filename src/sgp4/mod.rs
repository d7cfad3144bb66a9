//! # SGP4/SDP4 satellite record
//!
//! A [`Satellite`] is built once from a [`MeanElements`] set with [`Satellite::initialize`]
//! and can then be propagated any number of times with [`Satellite::propagate`].
//!
//! ```rust,no_run
//! use autopoint::sgp4::{InitParams, Satellite};
//! use autopoint::tle::TwoLineElement;
//!
//! let tle = TwoLineElement::parse(
//!     "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753",
//!     "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667",
//! )?;
//! let mut sat = Satellite::initialize(tle.mean_elements(), &InitParams::default())?;
//! let state = sat.propagate(360.0)?;
//! println!("r = {} km", state.position);
//! # Ok::<(), autopoint::autopoint_errors::AutopointError>(())
//! ```
//!
//! Near-earth records are pure: the same elapsed time always gives the same state. Deep-space
//! records with a resonance carry an integrator that resumes from its previous position, so
//! a result can depend on the calls made before it. Use [`Satellite::reset_integrator`] or
//! [`Satellite::propagate_fresh`] for independent point queries. Calls on one record must be
//! serialized by the caller; independent records share nothing.
pub mod deep_space;
mod init;
mod params;
mod propagate;

use std::fmt;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

pub use deep_space::{DeepSpaceTerms, Resonance};
pub use params::{InitParams, InitParamsBuilder, OpsMode};

use crate::autopoint_errors::{AutopointError, PropagationError};
use crate::constants::{Float, JulianDate, Kilometer, Minutes};
use crate::elements::MeanElements;
use crate::gravity::GravityConstants;
use crate::time::minutes_since_epoch;

/// Propagation theory selected at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// Period under 225 minutes
    NearEarth,
    /// Period of 225 minutes or more, lunar-solar perturbations included
    DeepSpace,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::NearEarth => write!(f, "n"),
            Method::DeepSpace => write!(f, "d"),
        }
    }
}

/// Secular, drag and short-period coefficients computed at initialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NearEarthTerms {
    /// Truncated drag model (low perigee or deep space)
    pub isimp: bool,
    pub aycof: Float,
    pub con41: Float,
    pub cc1: Float,
    pub cc4: Float,
    pub cc5: Float,
    pub d2: Float,
    pub d3: Float,
    pub d4: Float,
    pub delmo: Float,
    pub eta: Float,
    /// Secular rate of the argument of perigee (rad/min)
    pub argpdot: Float,
    pub omgcof: Float,
    pub sinmao: Float,
    pub t2cof: Float,
    pub t3cof: Float,
    pub t4cof: Float,
    pub t5cof: Float,
    pub x1mth2: Float,
    pub x7thm1: Float,
    /// Secular rate of the mean anomaly (rad/min)
    pub mdot: Float,
    /// Secular rate of the node (rad/min)
    pub nodedot: Float,
    pub xlcof: Float,
    pub xmcof: Float,
    pub nodecf: Float,
}

/// Position and velocity in the TEME frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    /// Minutes since epoch
    pub tsince: Minutes,
    /// Position (km)
    pub position: Vector3<Kilometer>,
    /// Velocity (km/s)
    pub velocity: Vector3<Float>,
}

/// Initialized SGP4/SDP4 record of one satellite.
#[derive(Debug, Clone, PartialEq)]
pub struct Satellite {
    elements: MeanElements,
    params: InitParams,
    gravity: GravityConstants,
    /// Brouwer mean motion recovered from the Kozai one (rad/min)
    no_unkozai: Float,
    /// Greenwich sidereal angle at epoch
    gsto: Float,
    terms: NearEarthTerms,
    deep_space: Option<DeepSpaceTerms>,
    last_error: Option<PropagationError>,
}

impl Satellite {
    pub fn elements(&self) -> &MeanElements {
        &self.elements
    }

    pub fn params(&self) -> &InitParams {
        &self.params
    }

    pub fn gravity(&self) -> &GravityConstants {
        &self.gravity
    }

    pub fn method(&self) -> Method {
        if self.deep_space.is_some() {
            Method::DeepSpace
        } else {
            Method::NearEarth
        }
    }

    pub fn no_unkozai(&self) -> Float {
        self.no_unkozai
    }

    pub fn gsto(&self) -> Float {
        self.gsto
    }

    pub fn near_earth_terms(&self) -> &NearEarthTerms {
        &self.terms
    }

    pub fn deep_space(&self) -> Option<&DeepSpaceTerms> {
        self.deep_space.as_ref()
    }

    /// Resonance class, [`Resonance::None`] for near-earth records.
    pub fn resonance(&self) -> Resonance {
        self.deep_space
            .as_ref()
            .map_or(Resonance::None, |ds| ds.resonance.kind)
    }

    /// Failure of the most recent propagation, `None` if it succeeded.
    pub fn last_error(&self) -> Option<PropagationError> {
        self.last_error
    }

    /// Julian date of the element epoch.
    pub fn jdsatepoch(&self) -> JulianDate {
        self.elements.jd_epoch()
    }

    /// Minutes from the element epoch to a Julian date.
    pub fn minutes_since_epoch(&self, jd: JulianDate) -> Minutes {
        minutes_since_epoch(self.jdsatepoch(), jd)
    }

    /// Put the deep-space resonance integrator back at epoch. No effect on near-earth records.
    pub fn reset_integrator(&mut self) {
        if let Some(ds) = self.deep_space.as_mut() {
            ds.reset_integrator();
        }
    }

    /// Propagate from a freshly reset integrator, independent of earlier calls.
    pub fn propagate_fresh(&mut self, tsince: Minutes) -> Result<StateVector, AutopointError> {
        self.reset_integrator();
        self.propagate(tsince)
    }

    /// Propagate to a Julian date (UTC).
    pub fn propagate_to_jd(&mut self, jd: JulianDate) -> Result<StateVector, AutopointError> {
        let tsince = self.minutes_since_epoch(jd);
        self.propagate(tsince)
    }
}

#[cfg(test)]
mod sgp4_test {
    use super::*;
    use crate::unit_test_global::{TLE_00005, TLE_08195, TLE_28626};
    use approx::assert_relative_eq;

    fn satellite(tle: &crate::tle::TwoLineElement) -> Satellite {
        Satellite::initialize(tle.mean_elements(), &InitParams::default()).unwrap()
    }

    #[test]
    fn test_method_and_resonance() {
        let sat = satellite(&TLE_00005);
        assert_eq!(sat.method(), Method::NearEarth);
        assert_eq!(sat.resonance(), Resonance::None);
        assert_eq!(sat.method().to_string(), "n");

        let sat = satellite(&TLE_08195);
        assert_eq!(sat.method(), Method::DeepSpace);
        assert_eq!(sat.resonance(), Resonance::HalfDay);

        let sat = satellite(&TLE_28626);
        assert_eq!(sat.method().to_string(), "d");
        assert_eq!(sat.resonance(), Resonance::Synchronous);
    }

    #[test]
    fn test_propagate_fresh_ignores_history() {
        let mut fresh = satellite(&TLE_08195);
        let expected = fresh.propagate(1440.0).unwrap();

        let mut used = satellite(&TLE_08195);
        used.propagate(2880.0).unwrap();
        used.propagate(-1440.0).unwrap();
        assert_eq!(used.propagate_fresh(1440.0).unwrap(), expected);

        used.propagate(4320.0).unwrap();
        used.reset_integrator();
        assert_eq!(used.propagate(1440.0).unwrap(), expected);
    }

    #[test]
    fn test_minutes_since_epoch() {
        let sat = satellite(&TLE_00005);
        assert_relative_eq!(sat.jdsatepoch(), 2451723.28495062, epsilon = 1e-8);
        let t = sat.minutes_since_epoch(sat.jdsatepoch() + 0.25);
        assert_relative_eq!(t, 360.0, epsilon = 1e-4);
    }
}

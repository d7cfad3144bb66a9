//! Mean element set consumed by the SGP4 initializer.
//!
//! A [`MeanElements`] can come out of the two-line parser
//! ([`TwoLineElement::mean_elements`](crate::tle::TwoLineElement::mean_elements)) or be built
//! programmatically. All angles are radians, the mean motion is the Kozai mean motion in
//! radians per minute and the epoch counts days since 1949 December 31 00:00 UT.
use serde::{Deserialize, Serialize};

use crate::autopoint_errors::AutopointError;
use crate::constants::{Float, JulianDate, Radian, JD_1950};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanElements {
    /// Catalog number
    pub satnum: u32,
    /// Days since 1949 December 31 00:00 UT
    pub epoch: f64,
    /// Drag term B* (1 / earth radii)
    pub bstar: Float,
    pub eccentricity: Float,
    pub argument_of_perigee: Radian,
    pub inclination: Radian,
    pub mean_anomaly: Radian,
    /// Kozai mean motion (rad/min)
    pub mean_motion: Float,
    /// Right ascension of the ascending node
    pub raan: Radian,
}

impl MeanElements {
    /// Julian date of the element epoch.
    pub fn jd_epoch(&self) -> JulianDate {
        self.epoch + JD_1950
    }

    /// Check the elements can be fed to the initializer.
    ///
    /// Return
    /// ------
    /// * `Err(AutopointError::InvalidElements)` when a value is not finite, the eccentricity lies
    ///   outside [0, 1) or the mean motion is not strictly positive.
    pub fn validate(&self) -> Result<(), AutopointError> {
        let values = [
            ("bstar", self.bstar),
            ("eccentricity", self.eccentricity),
            ("argument_of_perigee", self.argument_of_perigee),
            ("inclination", self.inclination),
            ("mean_anomaly", self.mean_anomaly),
            ("mean_motion", self.mean_motion),
            ("raan", self.raan),
        ];
        if let Some((name, _)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AutopointError::InvalidElements(format!(
                "{name} is not finite"
            )));
        }
        if !self.epoch.is_finite() {
            return Err(AutopointError::InvalidElements("epoch is not finite".into()));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(AutopointError::InvalidElements(format!(
                "eccentricity must lie in [0, 1), got {}",
                self.eccentricity
            )));
        }
        if self.mean_motion <= 0.0 {
            return Err(AutopointError::InvalidElements(format!(
                "mean motion must be positive, got {}",
                self.mean_motion
            )));
        }
        Ok(())
    }
}

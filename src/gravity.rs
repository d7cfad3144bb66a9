//! # Earth gravity models
//!
//! SGP4 was fitted against three historical constant sets. Each one fixes the gravitational
//! parameter, the Earth equatorial radius, the zonal harmonics J2..J4, and the derived time
//! unit `xke` (the square root of μ expressed in Earth radii per minute).
//!
//! | Model      | μ (km³/s²)    | Radius (km) |
//! |------------|---------------|-------------|
//! | WGS72-old  | 398600.79964  | 6378.135    |
//! | WGS72      | 398600.8      | 6378.135    |
//! | WGS84      | 398600.5      | 6378.137    |
//!
//! WGS72 is the set element producers fit against and remains the default. The lookup is a pure
//! function so records built with different models never share mutable state.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::autopoint_errors::AutopointError;
use crate::constants::Float;

/// Named gravity constant set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GravityModel {
    /// WGS72 with the truncated `xke` of the original Spacetrack report
    Wgs72Old,
    #[default]
    Wgs72,
    Wgs84,
}

/// Constant set returned by [`GravityModel::constants`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityConstants {
    /// Minutes in one time unit (1 / xke)
    pub tumin: Float,
    /// Gravitational parameter (km³/s²)
    pub mu: Float,
    /// Earth equatorial radius (km)
    pub radius_earth_km: Float,
    /// sqrt(μ) in earth radii³ / min²
    pub xke: Float,
    pub j2: Float,
    pub j3: Float,
    pub j4: Float,
    pub j3oj2: Float,
}

impl GravityConstants {
    fn from_parts(
        mu: Float,
        radius_earth_km: Float,
        xke: Float,
        j2: Float,
        j3: Float,
        j4: Float,
    ) -> Self {
        GravityConstants {
            tumin: 1.0 / xke,
            mu,
            radius_earth_km,
            xke,
            j2,
            j3,
            j4,
            j3oj2: j3 / j2,
        }
    }

    /// Velocity conversion from earth radii per minute to km/s.
    pub fn vkmpersec(&self) -> Float {
        self.radius_earth_km * self.xke / 60.0
    }
}

impl GravityModel {
    /// Constant set of this model.
    pub fn constants(self) -> GravityConstants {
        match self {
            GravityModel::Wgs72Old => GravityConstants::from_parts(
                398600.79964,
                6378.135,
                0.0743669161,
                0.001082616,
                -0.00000253881,
                -0.00000165597,
            ),
            GravityModel::Wgs72 => {
                let mu = 398600.8;
                let re: Float = 6378.135;
                GravityConstants::from_parts(
                    mu,
                    re,
                    60.0 / (re * re * re / mu).sqrt(),
                    0.001082616,
                    -0.00000253881,
                    -0.00000165597,
                )
            }
            GravityModel::Wgs84 => {
                let mu = 398600.5;
                let re: Float = 6378.137;
                GravityConstants::from_parts(
                    mu,
                    re,
                    60.0 / (re * re * re / mu).sqrt(),
                    0.00108262998905,
                    -0.00000253215306,
                    -0.00000161098761,
                )
            }
        }
    }
}

impl fmt::Display for GravityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GravityModel::Wgs72Old => write!(f, "wgs72old"),
            GravityModel::Wgs72 => write!(f, "wgs72"),
            GravityModel::Wgs84 => write!(f, "wgs84"),
        }
    }
}

impl FromStr for GravityModel {
    type Err = AutopointError;

    /// Parse a model name, case-insensitive, with or without dashes (`"WGS-72"`, `"wgs72old"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "wgs72old" => Ok(GravityModel::Wgs72Old),
            "wgs72" => Ok(GravityModel::Wgs72),
            "wgs84" => Ok(GravityModel::Wgs84),
            _ => Err(AutopointError::InvalidGravityModel(s.to_string())),
        }
    }
}

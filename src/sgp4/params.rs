//! Initialization parameters of a [`Satellite`](crate::sgp4::Satellite).
//!
//! ```rust
//! use autopoint::gravity::GravityModel;
//! use autopoint::sgp4::{InitParams, OpsMode};
//!
//! let params = InitParams::builder()
//!     .gravity(GravityModel::Wgs84)
//!     .ops_mode(OpsMode::Improved)
//!     .build()
//!     .unwrap();
//! assert_eq!(params.gravity, GravityModel::Wgs84);
//! ```
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::autopoint_errors::AutopointError;
use crate::gravity::GravityModel;

/// Historical operation mode.
///
/// Both modes share the propagation theory. They differ in the sidereal time at epoch (AFSPC
/// uses a 1970-based expression) and in how the node is wrapped in the low-inclination
/// lunar-solar periodics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OpsMode {
    /// `'a'`, the operational AFSPC behavior
    Afspc,
    /// `'i'`, the improved mode
    #[default]
    Improved,
}

impl TryFrom<char> for OpsMode {
    type Error = AutopointError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'a' | 'A' => Ok(OpsMode::Afspc),
            'i' | 'I' => Ok(OpsMode::Improved),
            other => Err(AutopointError::InvalidOpsMode(other)),
        }
    }
}

impl fmt::Display for OpsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpsMode::Afspc => write!(f, "a"),
            OpsMode::Improved => write!(f, "i"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InitParams {
    pub gravity: GravityModel,
    pub ops_mode: OpsMode,
}

impl InitParams {
    pub fn new(gravity: GravityModel, ops_mode: OpsMode) -> Self {
        InitParams { gravity, ops_mode }
    }

    pub fn builder() -> InitParamsBuilder {
        InitParamsBuilder::new()
    }
}

/// Builder for [`InitParams`], accepting typed values or the legacy textual selectors.
#[derive(Debug, Clone, Default)]
pub struct InitParamsBuilder {
    gravity: Option<GravityModel>,
    gravity_name: Option<String>,
    ops_mode: Option<OpsMode>,
    ops_char: Option<char>,
}

impl InitParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gravity(mut self, v: GravityModel) -> Self {
        self.gravity = Some(v);
        self.gravity_name = None;
        self
    }

    /// Select the gravity model by name (`"wgs72old"`, `"wgs72"`, `"wgs84"`).
    pub fn gravity_name(mut self, v: &str) -> Self {
        self.gravity_name = Some(v.to_string());
        self.gravity = None;
        self
    }

    pub fn ops_mode(mut self, v: OpsMode) -> Self {
        self.ops_mode = Some(v);
        self.ops_char = None;
        self
    }

    /// Select the operation mode with its legacy character (`'a'` or `'i'`).
    pub fn ops_char(mut self, v: char) -> Self {
        self.ops_char = Some(v);
        self.ops_mode = None;
        self
    }

    /// Finalize the builder.
    ///
    /// Returns
    /// -----------------
    /// * `Err(AutopointError::InvalidGravityModel)` for an unknown gravity model name.
    /// * `Err(AutopointError::InvalidOpsMode)` for an unknown operation mode character.
    pub fn build(self) -> Result<InitParams, AutopointError> {
        let gravity = match (self.gravity, self.gravity_name) {
            (Some(g), _) => g,
            (None, Some(name)) => name.parse()?,
            (None, None) => GravityModel::default(),
        };
        let ops_mode = match (self.ops_mode, self.ops_char) {
            (Some(m), _) => m,
            (None, Some(c)) => OpsMode::try_from(c)?,
            (None, None) => OpsMode::default(),
        };
        Ok(InitParams { gravity, ops_mode })
    }
}

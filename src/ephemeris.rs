//! # Ephemeris runs
//!
//! Tabulate the state of a [`Satellite`] over a start/stop/step range of minutes since epoch
//! and export it as CSV.
//!
//! ```rust,no_run
//! use autopoint::ephemeris::{generate, write_csv, EphemerisParams};
//! use autopoint::sgp4::{InitParams, Satellite};
//! use autopoint::tle::TwoLineElement;
//!
//! let tle = TwoLineElement::parse(
//!     "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753",
//!     "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667",
//! )?;
//! let mut sat = Satellite::initialize(tle.mean_elements(), &InitParams::default())?;
//! let params = EphemerisParams::builder().start(0.0).stop(4320.0).step(360.0).build()?;
//! let ephemeris = generate(&mut sat, &params);
//! write_csv(&ephemeris.rows, std::io::stdout())?;
//! # Ok::<(), autopoint::autopoint_errors::AutopointError>(())
//! ```
use std::fs::File;
use std::io;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::autopoint_errors::{AutopointError, PropagationError};
use crate::constants::{Float, Minutes};
use crate::sgp4::{Satellite, StateVector};

/// Time range of an ephemeris run, in minutes since epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EphemerisParams {
    pub start: Minutes,
    pub stop: Minutes,
    pub step: Minutes,
}

impl Default for EphemerisParams {
    fn default() -> Self {
        EphemerisParams {
            start: 0.0,
            stop: 1440.0,
            step: 360.0,
        }
    }
}

impl EphemerisParams {
    pub fn builder() -> EphemerisParamsBuilder {
        EphemerisParamsBuilder::new()
    }

    /// Requested times, the last one clamped to `stop`.
    pub fn times(&self) -> Vec<Minutes> {
        let mut times = Vec::new();
        let mut i: u32 = 0;
        loop {
            let t = self.start + i as Float * self.step;
            let past_stop = if self.step > 0.0 {
                t >= self.stop
            } else {
                t <= self.stop
            };
            if past_stop {
                times.push(self.stop);
                return times;
            }
            times.push(t);
            i += 1;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EphemerisParamsBuilder {
    params: EphemerisParams,
}

impl EphemerisParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, v: Minutes) -> Self {
        self.params.start = v;
        self
    }

    pub fn stop(mut self, v: Minutes) -> Self {
        self.params.stop = v;
        self
    }

    pub fn step(mut self, v: Minutes) -> Self {
        self.params.step = v;
        self
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `start`, `stop` and `step` are finite.
    /// * `step != 0`.
    /// * `stop - start` has the sign of `step` or is zero.
    ///
    /// Returns
    /// -----------------
    /// * `Err(AutopointError::InvalidParameter)` when a rule fails.
    pub fn build(self) -> Result<EphemerisParams, AutopointError> {
        let p = self.params;
        if !(p.start.is_finite() && p.stop.is_finite() && p.step.is_finite()) {
            return Err(AutopointError::InvalidParameter(
                "start, stop and step must be finite".into(),
            ));
        }
        if p.step == 0.0 {
            return Err(AutopointError::InvalidParameter(
                "step must be non-zero".into(),
            ));
        }
        if (p.stop - p.start) * p.step < 0.0 {
            return Err(AutopointError::InvalidParameter(
                "step must go from start towards stop".into(),
            ));
        }
        Ok(p)
    }
}

/// One CSV row of an ephemeris.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EphemerisRow {
    pub tsince: Minutes,
    pub x: Float,
    pub y: Float,
    pub z: Float,
    pub vx: Float,
    pub vy: Float,
    pub vz: Float,
}

impl From<&StateVector> for EphemerisRow {
    fn from(state: &StateVector) -> Self {
        EphemerisRow {
            tsince: state.tsince,
            x: state.position.x,
            y: state.position.y,
            z: state.position.z,
            vx: state.velocity.x,
            vy: state.velocity.y,
            vz: state.velocity.z,
        }
    }
}

/// Result of an ephemeris run.
#[derive(Debug, Clone, PartialEq)]
pub struct Ephemeris {
    pub rows: Vec<EphemerisRow>,
    /// Failure that ended the run before `stop`
    pub error: Option<PropagationError>,
}

/// Propagate over the range of `params`, stopping at the first failure.
pub fn generate(satellite: &mut Satellite, params: &EphemerisParams) -> Ephemeris {
    let mut rows = Vec::new();
    for t in params.times() {
        match satellite.propagate(t) {
            Ok(state) => rows.push(EphemerisRow::from(&state)),
            Err(err) => {
                log::debug!(
                    "satellite {}: ephemeris stopped at t = {t}: {err}",
                    satellite.elements().satnum
                );
                let error = match err {
                    AutopointError::Propagation(e) => Some(e),
                    _ => satellite.last_error(),
                };
                return Ephemeris { rows, error };
            }
        }
    }
    Ephemeris { rows, error: None }
}

/// Write rows as CSV with a `tsince,x,y,z,vx,vy,vz` header.
pub fn write_csv<W: io::Write>(rows: &[EphemerisRow], writer: W) -> Result<(), AutopointError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write rows to a CSV file, replacing it if it exists.
pub fn write_csv_file(rows: &[EphemerisRow], path: &Utf8Path) -> Result<(), AutopointError> {
    let file = File::create(path)?;
    write_csv(rows, file)
}

#[cfg(test)]
mod ephemeris_test {
    use super::*;
    use crate::sgp4::InitParams;
    use crate::unit_test_global::TLE_00005;
    use approx::assert_relative_eq;

    #[test]
    fn test_builder_validation() {
        assert!(EphemerisParams::builder().build().is_ok());
        assert_eq!(
            EphemerisParams::builder().step(0.0).build(),
            Err(AutopointError::InvalidParameter("step must be non-zero".into()))
        );
        assert!(EphemerisParams::builder()
            .start(100.0)
            .stop(0.0)
            .step(10.0)
            .build()
            .is_err());
        assert!(EphemerisParams::builder()
            .stop(Float::INFINITY)
            .build()
            .is_err());
        assert!(EphemerisParams::builder()
            .start(100.0)
            .stop(0.0)
            .step(-10.0)
            .build()
            .is_ok());
    }

    #[test]
    fn test_times_include_stop() {
        let p = EphemerisParams::builder()
            .start(0.0)
            .stop(1000.0)
            .step(360.0)
            .build()
            .unwrap();
        assert_eq!(p.times(), vec![0.0, 360.0, 720.0, 1000.0]);

        let p = EphemerisParams::builder()
            .start(0.0)
            .stop(-720.0)
            .step(-360.0)
            .build()
            .unwrap();
        assert_eq!(p.times(), vec![0.0, -360.0, -720.0]);

        let p = EphemerisParams::builder()
            .start(5.0)
            .stop(5.0)
            .build()
            .unwrap();
        assert_eq!(p.times(), vec![5.0]);
    }

    #[test]
    fn test_write_csv() {
        let rows = [EphemerisRow {
            tsince: 0.0,
            x: 1.0,
            y: 2.0,
            z: 3.0,
            vx: 4.0,
            vy: 5.0,
            vz: 6.0,
        }];
        let mut out = Vec::new();
        write_csv(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "tsince,x,y,z,vx,vy,vz\n0.0,1.0,2.0,3.0,4.0,5.0,6.0\n");
    }

    #[test]
    fn test_generate_00005() {
        let mut sat = Satellite::initialize(TLE_00005.mean_elements(), &InitParams::default())
            .unwrap();
        let ephemeris = generate(&mut sat, &EphemerisParams::default());
        assert!(ephemeris.error.is_none());
        assert_eq!(ephemeris.rows.len(), 5);

        let first = ephemeris.rows[0];
        assert_eq!(first.tsince, 0.0);
        assert_relative_eq!(first.x, 7022.465292664064, epsilon = 1e-6);
        assert_relative_eq!(first.vy, 6.405893759209842, epsilon = 1e-9);

        let last = ephemeris.rows[4];
        assert_eq!(last.tsince, 1440.0);
        assert_relative_eq!(last.x, -938.559239429339, epsilon = 1e-6);
    }

    #[test]
    fn test_generate_stops_at_decay() {
        let elements = crate::elements::MeanElements {
            satnum: 1,
            epoch: 18_000.0,
            bstar: 0.01,
            eccentricity: 0.0001,
            argument_of_perigee: 0.0,
            inclination: (51.6 as Float).to_radians(),
            mean_anomaly: 0.0,
            mean_motion: 16.0 * crate::constants::DPI / 1440.0,
            raan: 0.0,
        };
        let mut sat = Satellite::initialize(elements, &InitParams::default()).unwrap();
        let params = EphemerisParams::builder()
            .start(3000.0)
            .stop(4000.0)
            .step(300.0)
            .build()
            .unwrap();
        let ephemeris = generate(&mut sat, &params);
        assert_eq!(ephemeris.rows.len(), 3);
        assert_eq!(ephemeris.rows[2].tsince, 3600.0);
        assert!(matches!(
            ephemeris.error,
            Some(PropagationError::Decay { tsince, .. }) if tsince == 3900.0
        ));
        assert_eq!(ephemeris.error, sat.last_error());
    }
}

//! Lunar-solar secular update and numerical integration of the resonance.
//!
//! The resonant mean motion is integrated with a second order Euler-Maclaurin scheme in
//! fixed steps of 720 minutes. The integrator keeps its last position between calls and
//! resumes from it when the new request lies further from epoch on the same side. It
//! restarts from epoch when the request is zero, changes sign or moves back towards epoch,
//! so the result of a call can depend on the calls made before it on the same record.
use serde::{Deserialize, Serialize};

use super::dsinit::{Resonance, ResonanceTerms, RPTIM};
use super::DeepSpaceTerms;
use crate::constants::{Float, DPI};

const FASX2: Float = 0.13130908;
const FASX4: Float = 2.8843198;
const FASX6: Float = 0.37448087;
const G22: Float = 5.7686396;
const G32: Float = 0.95240898;
const G44: Float = 1.8014998;
const G52: Float = 1.0508330;
const G54: Float = 4.4108898;
/// Integration step (min)
const STEPP: Float = 720.0;
const STEPN: Float = -720.0;
/// Half of the squared step (min²)
const STEP2: Float = 259200.0;

/// Running state of the resonance integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Integrator {
    /// Minutes since epoch reached by the last integration step
    pub atime: Float,
    /// Resonant longitude at `atime`
    pub xli: Float,
    /// Mean motion at `atime`
    pub xni: Float,
}

/// Mean elements carried through the deep-space secular update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SecularElements {
    pub em: Float,
    pub argpm: Float,
    pub inclm: Float,
    pub mm: Float,
    pub nodem: Float,
    pub nm: Float,
}

/// Rates and derivatives of the resonant longitude at the integrator position.
struct Derivatives {
    xldot: Float,
    xndt: Float,
    xnddt: Float,
}

impl Integrator {
    /// Integrator positioned at epoch.
    pub fn at_epoch(resonance: &ResonanceTerms, no: Float) -> Self {
        Integrator {
            atime: 0.0,
            xli: resonance.xlamo,
            xni: no,
        }
    }

    /// Whether a request at `t` has to restart from epoch.
    pub fn needs_restart(&self, t: Float) -> bool {
        self.atime == 0.0 || t * self.atime <= 0.0 || t.abs() < self.atime.abs()
    }

    fn derivatives(
        &self,
        resonance: &ResonanceTerms,
        argpo: Float,
        argpdot: Float,
    ) -> Derivatives {
        let r = resonance;
        let xli = self.xli;
        let xldot = self.xni + r.xfact;

        let (xndt, xnddt) = if r.kind != Resonance::HalfDay {
            let xndt = r.del1 * (xli - FASX2).sin()
                + r.del2 * (2.0 * (xli - FASX4)).sin()
                + r.del3 * (3.0 * (xli - FASX6)).sin();
            let xnddt = r.del1 * (xli - FASX2).cos()
                + 2.0 * r.del2 * (2.0 * (xli - FASX4)).cos()
                + 3.0 * r.del3 * (3.0 * (xli - FASX6)).cos();
            (xndt, xnddt)
        } else {
            let xomi = argpo + argpdot * self.atime;
            let x2omi = xomi + xomi;
            let x2li = xli + xli;
            let xndt = r.d2201 * (x2omi + xli - G22).sin()
                + r.d2211 * (xli - G22).sin()
                + r.d3210 * (xomi + xli - G32).sin()
                + r.d3222 * (-xomi + xli - G32).sin()
                + r.d4410 * (x2omi + x2li - G44).sin()
                + r.d4422 * (x2li - G44).sin()
                + r.d5220 * (xomi + xli - G52).sin()
                + r.d5232 * (-xomi + xli - G52).sin()
                + r.d5421 * (xomi + x2li - G54).sin()
                + r.d5433 * (-xomi + x2li - G54).sin();
            let xnddt = r.d2201 * (x2omi + xli - G22).cos()
                + r.d2211 * (xli - G22).cos()
                + r.d3210 * (xomi + xli - G32).cos()
                + r.d3222 * (-xomi + xli - G32).cos()
                + r.d5220 * (xomi + xli - G52).cos()
                + r.d5232 * (-xomi + xli - G52).cos()
                + 2.0
                    * (r.d4410 * (x2omi + x2li - G44).cos()
                        + r.d4422 * (x2li - G44).cos()
                        + r.d5421 * (xomi + x2li - G54).cos()
                        + r.d5433 * (-xomi + x2li - G54).cos());
            (xndt, xnddt)
        };

        Derivatives {
            xldot,
            xndt,
            xnddt: xnddt * xldot,
        }
    }

    /// Advance the integrator towards `t` and extrapolate the remainder.
    ///
    /// Arguments
    /// ---------
    /// * `t`: minutes since epoch
    /// * `resonance`: resonance amplitudes of the satellite
    /// * `no`: un-Kozai'd mean motion at epoch
    /// * `argpo`, `argpdot`: argument of perigee at epoch and its secular rate, used by the
    ///   half-day resonance
    ///
    /// Return
    /// ------
    /// * `(nm, xl)`: the resonant mean motion and longitude at `t`
    pub fn advance(
        &mut self,
        t: Float,
        resonance: &ResonanceTerms,
        no: Float,
        argpo: Float,
        argpdot: Float,
    ) -> (Float, Float) {
        if self.needs_restart(t) {
            log::trace!("resonance integrator restarts from epoch for t = {t}");
            *self = Integrator::at_epoch(resonance, no);
        }
        let delt = if t > 0.0 { STEPP } else { STEPN };

        let mut steps = 0_u32;
        let (d, ft) = loop {
            let d = self.derivatives(resonance, argpo, argpdot);
            if (t - self.atime).abs() >= STEPP {
                self.xli += d.xldot * delt + d.xndt * STEP2;
                self.xni += d.xndt * delt + d.xnddt * STEP2;
                self.atime += delt;
                steps += 1;
            } else {
                break (d, t - self.atime);
            }
        };
        if steps > 0 {
            log::trace!("resonance integrator took {steps} steps, atime = {}", self.atime);
        }

        let nm = self.xni + d.xndt * ft + d.xnddt * ft * ft * 0.5;
        let xl = self.xli + d.xldot * ft + d.xndt * ft * ft * 0.5;
        (nm, xl)
    }
}

impl DeepSpaceTerms {
    /// Lunar-solar secular drift and, for resonant orbits, the integrated mean motion.
    ///
    /// The mean anomaly of a resonant orbit is rebuilt from the integrated longitude and the
    /// Greenwich sidereal angle at `t`.
    pub(crate) fn secular_update(&mut self, t: Float, elements: SecularElements) -> SecularElements {
        let rates = self.secular;
        let SecularElements {
            mut em,
            mut argpm,
            mut inclm,
            mut mm,
            mut nodem,
            mut nm,
        } = elements;

        let theta = (self.gsto + t * RPTIM) % DPI;
        em += rates.dedt * t;
        inclm += rates.didt * t;
        argpm += rates.domdt * t;
        nodem += rates.dnodt * t;
        mm += rates.dmdt * t;

        if self.resonance.kind != Resonance::None {
            let (xn, xl) =
                self.integrator
                    .advance(t, &self.resonance, self.no, self.argpo, self.argpdot);
            nm = xn;
            mm = if self.resonance.kind == Resonance::Synchronous {
                xl - nodem - argpm + theta
            } else {
                xl - 2.0 * nodem + 2.0 * theta
            };
        }

        SecularElements {
            em,
            argpm,
            inclm,
            mm,
            nodem,
            nm,
        }
    }
}

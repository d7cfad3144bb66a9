//! Deep-space secular rates and resonance coefficients.
//!
//! Two resonance regimes are modelled. A satellite whose period is close to one sidereal
//! day feels the tesseral harmonics of the geopotential coherently (geostationary and
//! drifting GEO objects). A highly eccentric satellite with a twelve hour period
//! (Molniya-type) resonates with the same terms at half the day. In both cases the
//! amplitudes depend on polynomial fits in eccentricity, and the mean motion is later
//! integrated numerically by [`Integrator`](super::dspace::Integrator).
use std::fmt;

use serde::{Deserialize, Serialize};

use super::dscom::CommonTerms;
use crate::constants::{Float, DPI, PI};

const Q22: Float = 1.7891679e-6;
const Q31: Float = 2.1460748e-6;
const Q33: Float = 2.2123015e-7;
const ROOT22: Float = 1.7891679e-6;
const ROOT44: Float = 7.3636953e-9;
const ROOT54: Float = 2.1765803e-9;
const ROOT32: Float = 3.7393792e-7;
const ROOT52: Float = 1.1428639e-7;
/// Earth rotation rate (rad/min)
pub(crate) const RPTIM: Float = 4.37526908801129966e-3;
const ZNS: Float = 1.19459e-5;
const ZNL: Float = 1.5835218e-4;

/// Inclination (3°) under which the node rates are not computed.
const NODE_RATE_INCLINATION: Float = 5.2359877e-2;

/// Resonance class of a deep-space satellite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Resonance {
    #[default]
    None,
    /// One revolution per day (geosynchronous)
    Synchronous,
    /// Two revolutions per day with a high eccentricity
    HalfDay,
}

impl Resonance {
    /// Classify a satellite from its un-Kozai'd mean motion (rad/min) and eccentricity.
    ///
    /// ```rust
    /// use autopoint::sgp4::deep_space::Resonance;
    ///
    /// assert_eq!(Resonance::classify(0.0043, 0.001), Resonance::Synchronous);
    /// assert_eq!(Resonance::classify(0.0087, 0.6), Resonance::HalfDay);
    /// assert_eq!(Resonance::classify(0.0087, 0.3), Resonance::None);
    /// ```
    pub fn classify(nm: Float, em: Float) -> Self {
        if nm < 0.0052359877 && nm > 0.0034906585 {
            Resonance::Synchronous
        } else if (8.26e-3..=9.24e-3).contains(&nm) && em >= 0.5 {
            Resonance::HalfDay
        } else {
            Resonance::None
        }
    }
}

impl fmt::Display for Resonance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Resonance::None => "none",
            Resonance::Synchronous => "synchronous",
            Resonance::HalfDay => "half-day",
        };
        write!(f, "{s}")
    }
}

/// Lunar-solar secular rates (per minute) of the mean elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SecularRates {
    pub dedt: Float,
    pub didt: Float,
    pub dmdt: Float,
    pub dnodt: Float,
    pub domdt: Float,
}

/// Resonance amplitudes and the reference longitude of the integrator.
///
/// `del1..del3` are only populated for [`Resonance::Synchronous`], the `dXXXX` terms only for
/// [`Resonance::HalfDay`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResonanceTerms {
    pub kind: Resonance,
    pub del1: Float,
    pub del2: Float,
    pub del3: Float,
    pub d2201: Float,
    pub d2211: Float,
    pub d3210: Float,
    pub d3222: Float,
    pub d4410: Float,
    pub d4422: Float,
    pub d5220: Float,
    pub d5232: Float,
    pub d5421: Float,
    pub d5433: Float,
    /// Offset between the resonant longitude rate and the mean motion
    pub xfact: Float,
    /// Resonant longitude at epoch
    pub xlamo: Float,
}

/// Epoch quantities of the near-earth initialization needed by the deep-space setup.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EpochState {
    pub xke: Float,
    pub gsto: Float,
    /// Un-Kozai'd mean motion
    pub no: Float,
    pub mo: Float,
    pub mdot: Float,
    pub nodeo: Float,
    pub nodedot: Float,
    pub argpo: Float,
    pub argpdot: Float,
    pub xpidot: Float,
    pub ecco: Float,
    pub inclo: Float,
}

/// Eccentricity polynomials of the half-day resonance.
struct HalfDayFits {
    g201: Float,
    g211: Float,
    g310: Float,
    g322: Float,
    g410: Float,
    g422: Float,
    g520: Float,
    g521: Float,
    g532: Float,
    g533: Float,
}

impl HalfDayFits {
    fn new(em: Float) -> Self {
        let emsq = em * em;
        let eoc = em * emsq;
        let g201 = -0.306 - (em - 0.64) * 0.440;

        let (g211, g310, g322, g410, g422, g520) = if em <= 0.65 {
            (
                3.616 - 13.2470 * em + 16.2900 * emsq,
                -19.302 + 117.3900 * em - 228.4190 * emsq + 156.5910 * eoc,
                -18.9068 + 109.7927 * em - 214.6334 * emsq + 146.5816 * eoc,
                -41.122 + 242.6940 * em - 471.0940 * emsq + 313.9530 * eoc,
                -146.407 + 841.8800 * em - 1629.014 * emsq + 1083.4350 * eoc,
                -532.114 + 3017.977 * em - 5740.032 * emsq + 3708.2760 * eoc,
            )
        } else {
            let g520 = if em > 0.715 {
                -5149.66 + 29936.92 * em - 54087.36 * emsq + 31324.56 * eoc
            } else {
                1464.74 - 4664.75 * em + 3763.64 * emsq
            };
            (
                -72.099 + 331.819 * em - 508.738 * emsq + 266.724 * eoc,
                -346.844 + 1582.851 * em - 2415.925 * emsq + 1246.113 * eoc,
                -342.585 + 1554.908 * em - 2366.899 * emsq + 1215.972 * eoc,
                -1052.797 + 4758.686 * em - 7193.992 * emsq + 3651.957 * eoc,
                -3581.690 + 16178.110 * em - 24462.770 * emsq + 12422.520 * eoc,
                g520,
            )
        };

        let (g533, g521, g532) = if em < 0.7 {
            (
                -919.22770 + 4988.6100 * em - 9064.7700 * emsq + 5542.21 * eoc,
                -822.71072 + 4568.6173 * em - 8491.4146 * emsq + 5337.524 * eoc,
                -853.66600 + 4690.2500 * em - 8624.7700 * emsq + 5341.4 * eoc,
            )
        } else {
            (
                -37995.780 + 161616.52 * em - 229838.20 * emsq + 109377.94 * eoc,
                -51752.104 + 218913.95 * em - 309468.16 * emsq + 146349.42 * eoc,
                -40023.880 + 170470.89 * em - 242699.48 * emsq + 115605.82 * eoc,
            )
        };

        HalfDayFits {
            g201,
            g211,
            g310,
            g322,
            g410,
            g422,
            g520,
            g521,
            g532,
            g533,
        }
    }
}

impl SecularRates {
    pub(crate) fn compute(common: &CommonTerms) -> Self {
        let CommonTerms {
            sinim,
            cosim,
            emsq,
            inclm,
            ..
        } = *common;
        let s = &common.solar;
        let l = &common.lunar;
        let equatorial = inclm < NODE_RATE_INCLINATION || inclm > PI - NODE_RATE_INCLINATION;

        let ses = s.s1 * ZNS * s.s5;
        let sis = s.s2 * ZNS * (s.z11 + s.z13);
        let sls = -ZNS * s.s3 * (s.z1 + s.z3 - 14.0 - 6.0 * emsq);
        let sghs = s.s4 * ZNS * (s.z31 + s.z33 - 6.0);
        let mut shs = if equatorial {
            0.0
        } else {
            -ZNS * s.s2 * (s.z21 + s.z23)
        };
        if sinim != 0.0 {
            shs /= sinim;
        }
        let sgs = sghs - cosim * shs;

        let sghl = l.s4 * ZNL * (l.z31 + l.z33 - 6.0);
        let shll = if equatorial {
            0.0
        } else {
            -ZNL * l.s2 * (l.z21 + l.z23)
        };

        let mut domdt = sgs + sghl;
        let mut dnodt = shs;
        if sinim != 0.0 {
            domdt -= cosim / sinim * shll;
            dnodt += shll / sinim;
        }

        SecularRates {
            dedt: ses + l.s1 * ZNL * l.s5,
            didt: sis + l.s2 * ZNL * (l.z11 + l.z13),
            dmdt: sls - ZNL * l.s3 * (l.z1 + l.z3 - 14.0 - 6.0 * emsq),
            dnodt,
            domdt,
        }
    }
}

impl ResonanceTerms {
    /// Resonance amplitudes of a deep-space satellite at epoch.
    ///
    /// Arguments
    /// ---------
    /// * `common`: lunar-solar terms evaluated at epoch
    /// * `epoch`: near-earth epoch quantities
    /// * `rates`: lunar-solar secular rates
    ///
    /// Return
    /// ------
    /// * The amplitudes, all zero with `kind == Resonance::None` for a non-resonant orbit
    pub(crate) fn init(common: &CommonTerms, epoch: &EpochState, rates: &SecularRates) -> Self {
        let kind = Resonance::classify(common.nm, common.em);
        let mut terms = ResonanceTerms {
            kind,
            ..Default::default()
        };
        if kind == Resonance::None {
            return terms;
        }

        let CommonTerms {
            sinim, cosim, nm, ..
        } = *common;
        let theta = epoch.gsto % DPI;
        let aonv = (nm / epoch.xke).powf(2.0 / 3.0);

        match kind {
            Resonance::HalfDay => {
                let g = HalfDayFits::new(epoch.ecco);
                let cosisq = cosim * cosim;
                let sini2 = sinim * sinim;

                let f220 = 0.75 * (1.0 + 2.0 * cosim + cosisq);
                let f221 = 1.5 * sini2;
                let f321 = 1.875 * sinim * (1.0 - 2.0 * cosim - 3.0 * cosisq);
                let f322 = -1.875 * sinim * (1.0 + 2.0 * cosim - 3.0 * cosisq);
                let f441 = 35.0 * sini2 * f220;
                let f442 = 39.3750 * sini2 * sini2;
                let f522 = 9.84375
                    * sinim
                    * (sini2 * (1.0 - 2.0 * cosim - 5.0 * cosisq)
                        + 0.33333333 * (-2.0 + 4.0 * cosim + 6.0 * cosisq));
                let f523 = sinim
                    * (4.92187512 * sini2 * (-2.0 - 4.0 * cosim + 10.0 * cosisq)
                        + 6.56250012 * (1.0 + 2.0 * cosim - 3.0 * cosisq));
                let f542 = 29.53125
                    * sinim
                    * (2.0 - 8.0 * cosim + cosisq * (-12.0 + 8.0 * cosim + 10.0 * cosisq));
                let f543 = 29.53125
                    * sinim
                    * (-2.0 - 8.0 * cosim + cosisq * (12.0 + 8.0 * cosim - 10.0 * cosisq));

                let xno2 = nm * nm;
                let ainv2 = aonv * aonv;

                let mut temp1 = 3.0 * xno2 * ainv2;
                let mut temp = temp1 * ROOT22;
                terms.d2201 = temp * f220 * g.g201;
                terms.d2211 = temp * f221 * g.g211;

                temp1 *= aonv;
                temp = temp1 * ROOT32;
                terms.d3210 = temp * f321 * g.g310;
                terms.d3222 = temp * f322 * g.g322;

                temp1 *= aonv;
                temp = 2.0 * temp1 * ROOT44;
                terms.d4410 = temp * f441 * g.g410;
                terms.d4422 = temp * f442 * g.g422;

                temp1 *= aonv;
                temp = temp1 * ROOT52;
                terms.d5220 = temp * f522 * g.g520;
                terms.d5232 = temp * f523 * g.g532;

                temp = 2.0 * temp1 * ROOT54;
                terms.d5421 = temp * f542 * g.g521;
                terms.d5433 = temp * f543 * g.g533;

                terms.xlamo = (epoch.mo + epoch.nodeo + epoch.nodeo - theta - theta) % DPI;
                terms.xfact = epoch.mdot + rates.dmdt + 2.0 * (epoch.nodedot + rates.dnodt - RPTIM)
                    - epoch.no;
            }
            Resonance::Synchronous => {
                let emsq = common.emsq;
                let g200 = 1.0 + emsq * (-2.5 + 0.8125 * emsq);
                let g310 = 1.0 + 2.0 * emsq;
                let g300 = 1.0 + emsq * (-6.0 + 6.60937 * emsq);
                let f220 = 0.75 * (1.0 + cosim) * (1.0 + cosim);
                let f311 = 0.9375 * sinim * sinim * (1.0 + 3.0 * cosim) - 0.75 * (1.0 + cosim);
                let f330 = 1.0 + cosim;
                let f330 = 1.875 * f330 * f330 * f330;

                let del1 = 3.0 * nm * nm * aonv * aonv;
                terms.del2 = 2.0 * del1 * f220 * g200 * Q22;
                terms.del3 = 3.0 * del1 * f330 * g300 * Q33 * aonv;
                terms.del1 = del1 * f311 * g310 * Q31 * aonv;

                terms.xlamo = (epoch.mo + epoch.nodeo + epoch.argpo - theta) % DPI;
                terms.xfact =
                    epoch.mdot + epoch.xpidot - RPTIM + rates.dmdt + rates.domdt + rates.dnodt
                        - epoch.no;
            }
            Resonance::None => {}
        }

        terms
    }
}

use serde::{Deserialize, Serialize};

use super::dscom::{CommonTerms, PeriodicCoefficients, ZEL, ZES};
use crate::constants::{Float, DPI, PI};
use crate::sgp4::OpsMode;

/// Solar mean motion (rad/min)
const ZNS: Float = 1.19459e-5;
/// Lunar mean motion (rad/min)
const ZNL: Float = 1.5835218e-4;

/// Inclination below which the Lyddane form is used.
const LYDDANE_INCLINATION: Float = 0.2;

/// Perturbation of each element produced by the long-period terms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Periodics {
    pub pe: Float,
    pub pinc: Float,
    pub pl: Float,
    pub pgh: Float,
    pub ph: Float,
}

/// Elements the long-period periodics act on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodicElements {
    pub ep: Float,
    pub inclp: Float,
    pub nodep: Float,
    pub argpp: Float,
    pub mp: Float,
}

/// Lunar-solar long-period coefficients of a deep-space record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarSolarTerms {
    pub solar: PeriodicCoefficients,
    pub lunar: PeriodicCoefficients,
    /// Solar mean anomaly at epoch
    pub zmos: Float,
    /// Lunar mean anomaly at epoch
    pub zmol: Float,
}

impl PeriodicCoefficients {
    fn evaluate(&self, zm: Float, ze: Float) -> Periodics {
        let zf = zm + 2.0 * ze * zm.sin();
        let sinzf = zf.sin();
        let f2 = 0.5 * sinzf * sinzf - 0.25;
        let f3 = -0.5 * sinzf * zf.cos();

        Periodics {
            pe: self.e2 * f2 + self.e3 * f3,
            pinc: self.i2 * f2 + self.i3 * f3,
            pl: self.l2 * f2 + self.l3 * f3 + self.l4 * sinzf,
            pgh: self.gh2 * f2 + self.gh3 * f3 + self.gh4 * sinzf,
            ph: self.h2 * f2 + self.h3 * f3,
        }
    }
}

impl From<&CommonTerms> for LunarSolarTerms {
    fn from(common: &CommonTerms) -> Self {
        LunarSolarTerms {
            solar: common.solar_coefficients,
            lunar: common.lunar_coefficients,
            zmos: common.zmos,
            zmol: common.zmol,
        }
    }
}

impl LunarSolarTerms {
    /// Raw long-period perturbations at `t` minutes from epoch.
    ///
    /// While `initializing`, the lunar and solar anomalies are taken at epoch whatever `t` is.
    pub fn periodics(&self, t: Float, initializing: bool) -> Periodics {
        let (zms, zml) = if initializing {
            (self.zmos, self.zmol)
        } else {
            (self.zmos + ZNS * t, self.zmol + ZNL * t)
        };

        let s = self.solar.evaluate(zms, ZES);
        let l = self.lunar.evaluate(zml, ZEL);

        Periodics {
            pe: s.pe + l.pe,
            pinc: s.pinc + l.pinc,
            pl: s.pl + l.pl,
            pgh: s.pgh + l.pgh,
            ph: s.ph + l.ph,
        }
    }

    /// Apply the long-period periodics to a set of elements at `t` minutes from epoch.
    ///
    /// Above 0.2 rad of inclination the node and perigee corrections are divided by
    /// `sin(i)` directly. Below, the node is recovered from the (α, β) pair
    /// `(sin i sin Ω, sin i cos Ω)` and unwrapped so it does not jump by 2π.
    ///
    /// Arguments
    /// ---------
    /// * `t`: minutes since epoch
    /// * `elements`: secularly updated elements
    /// * `ops_mode`: AFSPC mode keeps the intermediate node positive
    pub fn apply(&self, t: Float, elements: PeriodicElements, ops_mode: OpsMode) -> PeriodicElements {
        let p = self.periodics(t, false);
        let PeriodicElements {
            mut ep,
            mut inclp,
            mut nodep,
            mut argpp,
            mut mp,
        } = elements;

        inclp += p.pinc;
        ep += p.pe;
        let sinip = inclp.sin();
        let cosip = inclp.cos();

        if inclp >= LYDDANE_INCLINATION {
            let ph = p.ph / sinip;
            let pgh = p.pgh - cosip * ph;
            argpp += pgh;
            nodep += ph;
            mp += p.pl;
        } else {
            let sinop = nodep.sin();
            let cosop = nodep.cos();
            let mut alfdp = sinip * sinop;
            let mut betdp = sinip * cosop;
            let dalf = p.ph * cosop + p.pinc * cosip * sinop;
            let dbet = -p.ph * sinop + p.pinc * cosip * cosop;
            alfdp += dalf;
            betdp += dbet;

            nodep %= DPI;
            if nodep < 0.0 && ops_mode == OpsMode::Afspc {
                nodep += DPI;
            }
            let mut xls = mp + argpp + cosip * nodep;
            let dls = p.pl + p.pgh - p.pinc * nodep * sinip;
            xls += dls;

            let xnoh = nodep;
            nodep = alfdp.atan2(betdp);
            if nodep < 0.0 && ops_mode == OpsMode::Afspc {
                nodep += DPI;
            }
            if (xnoh - nodep).abs() > PI {
                if nodep < xnoh {
                    nodep += DPI;
                } else {
                    nodep -= DPI;
                }
            }
            mp += p.pl;
            argpp = xls - mp - cosip * nodep;
        }

        PeriodicElements {
            ep,
            inclp,
            nodep,
            argpp,
            mp,
        }
    }
}

#[cfg(test)]
mod dpper_test {
    use super::*;
    use approx::assert_relative_eq;

    fn terms() -> LunarSolarTerms {
        let common = CommonTerms::compute(20_600.29629788, 0.7318036, 0.8285, 0.0, 0.8167, 4.0219, 0.00997);
        LunarSolarTerms::from(&common)
    }

    #[test]
    fn test_initializing_ignores_time() {
        let t = terms();
        assert_eq!(t.periodics(0.0, true), t.periodics(5000.0, true));
        assert_eq!(t.periodics(0.0, true), t.periodics(0.0, false));
        assert_ne!(t.periodics(0.0, true), t.periodics(5000.0, false));
    }

    #[test]
    fn test_apply_direct_form() {
        let t = terms();
        let e = PeriodicElements {
            ep: 0.73,
            inclp: 0.8167,
            nodep: 4.0219,
            argpp: 0.8285,
            mp: 0.18,
        };
        let p = t.periodics(720.0, false);
        let out = t.apply(720.0, e, OpsMode::Improved);
        assert_relative_eq!(out.ep, e.ep + p.pe, epsilon = 1e-15);
        assert_relative_eq!(out.inclp, e.inclp + p.pinc, epsilon = 1e-15);
        assert_relative_eq!(out.mp, e.mp + p.pl, epsilon = 1e-15);
        // ops mode only matters in the Lyddane branch
        assert_eq!(out, t.apply(720.0, e, OpsMode::Afspc));
    }

    #[test]
    fn test_apply_lyddane_keeps_node_continuous() {
        let t = terms();
        let e = PeriodicElements {
            ep: 0.001,
            inclp: 0.001,
            nodep: 6.27,
            argpp: 1.0,
            mp: 2.0,
        };
        let out = t.apply(1440.0, e, OpsMode::Improved);
        assert!((out.nodep - e.nodep).abs() <= PI);
        // total longitude is preserved up to the periodic terms
        let p = t.periodics(1440.0, false);
        let lon_in = e.mp + e.argpp + e.nodep;
        let lon_out = out.mp + out.argpp + out.nodep;
        assert!((lon_out - lon_in).abs() < 1e-2 + p.pl.abs() + p.pgh.abs() + p.ph.abs());
    }
}

//! Propagation of an initialized record to a time since epoch.
use nalgebra::Vector3;

use super::deep_space::dspace::SecularElements;
use super::deep_space::PeriodicElements;
use super::init::{long_period_coefficients, X2O3};
use super::{Satellite, StateVector};
use crate::autopoint_errors::{AutopointError, PropagationError};
use crate::constants::{Float, Minutes, DPI, PI};
use crate::gravity::GravityConstants;
use crate::kepler::{solve_kepler_axnl, KeplerSolution};

impl Satellite {
    /// Position and velocity at `tsince` minutes from epoch.
    ///
    /// The outcome is also kept in [`Satellite::last_error`]. On a resonant deep-space record
    /// the integrator state moves forward, see [`Satellite::reset_integrator`].
    ///
    /// Arguments
    /// ---------
    /// * `tsince`: minutes since epoch, negative values propagate backwards
    ///
    /// Return
    /// ------
    /// * The TEME state, or `AutopointError::Propagation` with one of:
    ///   - `MeanMotion` when the mean motion is not positive after the secular update,
    ///   - `Eccentricity` when drag pushes the mean eccentricity out of [-0.001, 1),
    ///   - `PerturbedEccentricity` when the lunar-solar periodics push it out of [0, 1],
    ///   - `SemiLatusRectum` for a negative semi-latus rectum,
    ///   - `Decay` when the radius falls under one earth radius.
    pub fn propagate(&mut self, tsince: Minutes) -> Result<StateVector, AutopointError> {
        let result = self.sgp4(tsince);
        self.last_error = result.err();
        result.map_err(AutopointError::from)
    }

    fn sgp4(&mut self, t: Minutes) -> Result<StateVector, PropagationError> {
        let GravityConstants {
            radius_earth_km,
            xke,
            j2,
            j3oj2,
            ..
        } = self.gravity;
        let vkmpersec = self.gravity.vkmpersec();
        let e = self.elements;
        let k = self.terms;

        // secular gravity and atmospheric drag
        let xmdf = e.mean_anomaly + k.mdot * t;
        let argpdf = e.argument_of_perigee + k.argpdot * t;
        let nodedf = e.raan + k.nodedot * t;
        let mut argpm = argpdf;
        let mut mm = xmdf;
        let t2 = t * t;
        let mut nodem = nodedf + k.nodecf * t2;
        let mut tempa = 1.0 - k.cc1 * t;
        let mut tempe = e.bstar * k.cc4 * t;
        let mut templ = k.t2cof * t2;

        if !k.isimp {
            let delomg = k.omgcof * t;
            let delm = k.xmcof * ((1.0 + k.eta * xmdf.cos()).powi(3) - k.delmo);
            let temp = delomg + delm;
            mm = xmdf + temp;
            argpm = argpdf - temp;
            let t3 = t2 * t;
            let t4 = t3 * t;
            tempa = tempa - k.d2 * t2 - k.d3 * t3 - k.d4 * t4;
            tempe += e.bstar * k.cc5 * (mm.sin() - k.sinmao);
            templ += k.t3cof * t3 + t4 * (k.t4cof + t * k.t5cof);
        }

        let mut nm = self.no_unkozai;
        let mut em = e.eccentricity;
        let mut inclm = e.inclination;
        if let Some(ds) = self.deep_space.as_mut() {
            let out = ds.secular_update(
                t,
                SecularElements {
                    em,
                    argpm,
                    inclm,
                    mm,
                    nodem,
                    nm,
                },
            );
            em = out.em;
            argpm = out.argpm;
            inclm = out.inclm;
            mm = out.mm;
            nodem = out.nodem;
            nm = out.nm;
        }

        if nm <= 0.0 {
            return Err(PropagationError::MeanMotion {
                tsince: t,
                mean_motion: nm,
            });
        }
        let am = (xke / nm).powf(X2O3) * tempa * tempa;
        nm = xke / am.powf(1.5);
        em -= tempe;

        if !(-0.001..1.0).contains(&em) {
            return Err(PropagationError::Eccentricity {
                tsince: t,
                eccentricity: em,
            });
        }
        if em < 1.0e-6 {
            em = 1.0e-6;
        }
        mm += self.no_unkozai * templ;
        let mut xlm = mm + argpm + nodem;
        nodem %= DPI;
        argpm %= DPI;
        xlm %= DPI;
        mm = (xlm - argpm - nodem) % DPI;

        // lunar-solar periodics
        let mut ep = em;
        let mut xincp = inclm;
        let mut argpp = argpm;
        let mut nodep = nodem;
        let mut mp = mm;
        let mut sinip = inclm.sin();
        let mut cosip = inclm.cos();
        let mut aycof = k.aycof;
        let mut xlcof = k.xlcof;
        let mut con41 = k.con41;
        let mut x1mth2 = k.x1mth2;
        let mut x7thm1 = k.x7thm1;

        if let Some(ds) = self.deep_space.as_ref() {
            let p = ds.lunar_solar.apply(
                t,
                PeriodicElements {
                    ep,
                    inclp: xincp,
                    nodep,
                    argpp,
                    mp,
                },
                self.params.ops_mode,
            );
            ep = p.ep;
            xincp = p.inclp;
            nodep = p.nodep;
            argpp = p.argpp;
            mp = p.mp;

            if xincp < 0.0 {
                xincp = -xincp;
                nodep += PI;
                argpp -= PI;
            }
            if !(0.0..=1.0).contains(&ep) {
                return Err(PropagationError::PerturbedEccentricity {
                    tsince: t,
                    eccentricity: ep,
                });
            }

            sinip = xincp.sin();
            cosip = xincp.cos();
            (aycof, xlcof) = long_period_coefficients(j3oj2, sinip, cosip);
            let cosisq = cosip * cosip;
            con41 = 3.0 * cosisq - 1.0;
            x1mth2 = 1.0 - cosisq;
            x7thm1 = 7.0 * cosisq - 1.0;
        }

        // long period terms and Kepler's equation
        let axnl = ep * argpp.cos();
        let temp = 1.0 / (am * (1.0 - ep * ep));
        let aynl = ep * argpp.sin() + temp * aycof;
        let xl = mp + argpp + nodep + temp * xlcof * axnl;
        let u = (xl - nodep) % DPI;
        let KeplerSolution {
            sin_eo1: sineo1,
            cos_eo1: coseo1,
            ..
        } = solve_kepler_axnl(u, axnl, aynl);

        // short period preliminary quantities
        let ecose = axnl * coseo1 + aynl * sineo1;
        let esine = axnl * sineo1 - aynl * coseo1;
        let el2 = axnl * axnl + aynl * aynl;
        let pl = am * (1.0 - el2);
        if pl < 0.0 {
            return Err(PropagationError::SemiLatusRectum {
                tsince: t,
                semi_latus_rectum: pl,
            });
        }

        let rl = am * (1.0 - ecose);
        let rdotl = am.sqrt() * esine / rl;
        let rvdotl = pl.sqrt() / rl;
        let betal = (1.0 - el2).sqrt();
        let temp = esine / (1.0 + betal);
        let sinu = am / rl * (sineo1 - aynl - axnl * temp);
        let cosu = am / rl * (coseo1 - axnl + aynl * temp);
        let mut su = sinu.atan2(cosu);
        let sin2u = (cosu + cosu) * sinu;
        let cos2u = 1.0 - 2.0 * sinu * sinu;
        let temp = 1.0 / pl;
        let temp1 = 0.5 * j2 * temp;
        let temp2 = temp1 * temp;

        // short period periodics
        let mrt = rl * (1.0 - 1.5 * temp2 * betal * con41) + 0.5 * temp1 * x1mth2 * cos2u;
        su -= 0.25 * temp2 * x7thm1 * sin2u;
        let xnode = nodep + 1.5 * temp2 * cosip * sin2u;
        let xinc = xincp + 1.5 * temp2 * cosip * sinip * cos2u;
        let mvt = rdotl - nm * temp1 * x1mth2 * sin2u / xke;
        let rvdot = rvdotl + nm * temp1 * (x1mth2 * cos2u + 1.5 * con41) / xke;

        // orientation vectors
        let (sinsu, cossu) = su.sin_cos();
        let (snod, cnod) = xnode.sin_cos();
        let (sini, cosi) = xinc.sin_cos();
        let xmx = -snod * cosi;
        let xmy = cnod * cosi;
        let ux = Vector3::new(xmx * sinsu + cnod * cossu, xmy * sinsu + snod * cossu, sini * sinsu);
        let vx = Vector3::new(xmx * cossu - cnod * sinsu, xmy * cossu - snod * sinsu, sini * cossu);

        let position = ux * (mrt * radius_earth_km);
        let velocity = (ux * mvt + vx * rvdot) * vkmpersec;

        if mrt < 1.0 {
            return Err(PropagationError::Decay {
                tsince: t,
                radius: mrt,
            });
        }

        Ok(StateVector {
            tsince: t,
            position,
            velocity,
        })
    }
}

#[cfg(test)]
mod propagate_test {
    use super::*;
    use crate::elements::MeanElements;
    use crate::sgp4::InitParams;
    use approx::assert_relative_eq;

    fn decaying() -> Satellite {
        let elements = MeanElements {
            satnum: 1,
            epoch: 18_000.0,
            bstar: 0.01,
            eccentricity: 0.0001,
            argument_of_perigee: 0.0,
            inclination: (51.6 as Float).to_radians(),
            mean_anomaly: 0.0,
            mean_motion: 16.0 * DPI / 1440.0,
            raan: 0.0,
        };
        Satellite::initialize(elements, &InitParams::default()).unwrap()
    }

    #[test]
    fn test_decay_is_reported() {
        let mut sat = decaying();
        assert!(sat.last_error().is_none());
        assert!(sat.propagate(3625.0).is_ok());

        let err = sat.propagate(3630.0).unwrap_err();
        assert_eq!(err.code(), Some(6));
        assert!(matches!(
            sat.last_error(),
            Some(PropagationError::Decay { tsince, .. }) if tsince == 3630.0
        ));

        // a later success clears the stored error
        sat.propagate(0.0).unwrap();
        assert!(sat.last_error().is_none());
    }

    #[test]
    fn test_near_earth_calls_are_pure() {
        let mut a = decaying();
        let mut b = decaying();
        let direct = a.propagate(1000.0).unwrap();
        b.propagate(-300.0).unwrap();
        b.propagate(2000.0).unwrap();
        let after = b.propagate(1000.0).unwrap();
        assert_eq!(direct, after);
    }

    #[test]
    fn test_velocity_matches_position_rate() {
        let mut sat = decaying();
        let s0 = sat.propagate(100.0).unwrap();
        let s1 = sat.propagate(100.0 + 1.0 / 60.0).unwrap();
        // the step is one second, so the difference is already in km/s
        let rate = s1.position - s0.position;
        assert_relative_eq!(rate, s0.velocity, epsilon = 1e-2);
    }
}

//! # Kepler equation
//!
//! - [`newtonnu`]: eccentric and mean anomaly from the true anomaly, for circular, elliptical,
//!   hyperbolic and parabolic orbits.
//! - [`solve_kepler_axnl`]: the propagator's fixed-point solve in the `(u, axnl, aynl)`
//!   long-period form.
use crate::constants::{Float, DPI, PI};

const SMALL: Float = 1e-8;

/// Kepler iteration tolerance of the SGP4 solver
const KEPLER_TOL: Float = 1.0e-12;
/// Maximum number of Newton-Raphson steps in the SGP4 solver
const KEPLER_MAX_ITER: usize = 10;
/// Largest correction accepted in one step
const KEPLER_MAX_STEP: Float = 0.95;

/// Inverse hyperbolic sine.
#[inline]
fn asinh2(x: Float) -> Float {
    (x + (x * x + 1.0).sqrt()).ln()
}

/// Eccentric (or hyperbolic/parabolic) anomaly and mean anomaly from the true anomaly.
///
/// The branch depends on the eccentricity regime:
/// * circular (`|ecc| < 1e-8`): both anomalies equal the true anomaly,
/// * elliptical: closed form through `atan2`,
/// * hyperbolic: inverse hyperbolic sine, only defined while the true anomaly stays inside
///   the asymptotes,
/// * parabolic: tangent half-angle form, only for `|nu| < 168°`.
///
/// For `ecc < 1` the mean anomaly is wrapped into [0, 2π) and the eccentric anomaly reduced
/// modulo 2π.
///
/// Arguments
/// ---------
/// * `ecc`: eccentricity
/// * `nu`: true anomaly (rad)
///
/// Return
/// ------
/// * `Some((e0, m))`, or `None` when the anomaly is undefined for this geometry
pub fn newtonnu(ecc: Float, nu: Float) -> Option<(Float, Float)> {
    let (mut e0, mut m) = if ecc.abs() < SMALL {
        (nu, nu)
    } else if ecc < 1.0 - SMALL {
        let sine = ((1.0 - ecc * ecc).sqrt() * nu.sin()) / (1.0 + ecc * nu.cos());
        let cose = (ecc + nu.cos()) / (1.0 + ecc * nu.cos());
        let e0 = sine.atan2(cose);
        (e0, e0 - ecc * e0.sin())
    } else if ecc > 1.0 + SMALL {
        if ecc > 1.0 && nu.abs() + 0.00001 < PI - (1.0 / ecc).acos() {
            let sine = ((ecc * ecc - 1.0).sqrt() * nu.sin()) / (1.0 + ecc * nu.cos());
            let e0 = asinh2(sine);
            (e0, ecc * e0.sinh() - e0)
        } else {
            return None;
        }
    } else if nu.abs() < 168.0 * PI / 180.0 {
        let e0 = (nu * 0.5).tan();
        (e0, e0 + (e0 * e0 * e0) / 3.0)
    } else {
        return None;
    };

    if ecc < 1.0 {
        m %= DPI;
        if m < 0.0 {
            m += DPI;
        }
        e0 %= DPI;
    }
    Some((e0, m))
}

/// Solution of the SGP4 form of Kepler's equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric longitude
    pub eo1: Float,
    pub sin_eo1: Float,
    pub cos_eo1: Float,
}

/// Solve `E - axnl·sin E + aynl·cos E = u` for the eccentric longitude `E`.
///
/// `axnl`/`aynl` are the components of the eccentricity vector in the node frame, with the
/// long-period J3 term already folded into `aynl`. The iteration starts at `E = u`, stops when
/// the correction drops below 1e-12 or after 10 steps, and each step is clamped to ±0.95 rad.
///
/// Arguments
/// ---------
/// * `u`: mean longitude minus node, reduced modulo 2π
/// * `axnl`, `aynl`: eccentricity vector components
pub fn solve_kepler_axnl(u: Float, axnl: Float, aynl: Float) -> KeplerSolution {
    let mut eo1 = u;
    let mut tem5: Float = 9999.9;
    let mut sin_eo1: Float = 0.0;
    let mut cos_eo1: Float = 0.0;
    let mut ktr = 1;

    while tem5.abs() >= KEPLER_TOL && ktr <= KEPLER_MAX_ITER {
        sin_eo1 = eo1.sin();
        cos_eo1 = eo1.cos();
        tem5 = 1.0 - cos_eo1 * axnl - sin_eo1 * aynl;
        tem5 = (u - aynl * cos_eo1 + axnl * sin_eo1 - eo1) / tem5;
        if tem5.abs() >= KEPLER_MAX_STEP {
            tem5 = if tem5 > 0.0 {
                KEPLER_MAX_STEP
            } else {
                -KEPLER_MAX_STEP
            };
        }
        eo1 += tem5;
        ktr += 1;
    }

    KeplerSolution {
        eo1,
        sin_eo1,
        cos_eo1,
    }
}

#[cfg(test)]
mod kepler_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_newtonnu_circular() {
        let (e0, m) = newtonnu(0.0, 1.2).unwrap();
        assert_eq!(e0, 1.2);
        assert_eq!(m, 1.2);
    }

    #[test]
    fn test_newtonnu_elliptical() {
        let (e0, m) = newtonnu(0.1, PI / 2.0).unwrap();
        assert_relative_eq!(e0, 1.4706289056333368, epsilon = 1e-12);
        assert_relative_eq!(m, 1.3711301619226748, epsilon = 1e-12);

        // negative true anomaly wraps the mean anomaly into [0, 2π)
        let (e0, m) = newtonnu(0.3, -2.0).unwrap();
        assert_relative_eq!(e0, -1.7039046317842315, epsilon = 1e-12);
        assert_relative_eq!(m, 4.876626923964717, epsilon = 1e-12);
    }

    #[test]
    fn test_newtonnu_hyperbolic() {
        let (e0, m) = newtonnu(2.0, PI / 2.0).unwrap();
        assert_relative_eq!(e0, 1.3169578969248164, epsilon = 1e-12);
        assert_relative_eq!(m, 2.147143718212937, epsilon = 1e-12);

        // beyond the asymptote at 120°
        assert!(newtonnu(2.0, 2.5).is_none());
    }

    #[test]
    fn test_newtonnu_parabolic() {
        let (e0, m) = newtonnu(1.0, PI / 2.0).unwrap();
        assert_relative_eq!(e0, 1.0, epsilon = 1e-12);
        assert_relative_eq!(m, 4.0 / 3.0, epsilon = 1e-12);
        assert!(newtonnu(1.0, 3.0).is_none());
    }

    #[test]
    fn test_solve_kepler_axnl_circular() {
        let sol = solve_kepler_axnl(2.0, 0.0, 0.0);
        assert_eq!(sol.eo1, 2.0);
        assert_eq!(sol.sin_eo1, (2.0 as Float).sin());
    }

    #[test]
    fn test_solve_kepler_axnl_residual() {
        let e: Float = 0.6;
        let argp: Float = 0.7;
        let (axnl, aynl) = (e * argp.cos(), e * argp.sin());
        for u in [0.1, 1.0, 3.0, 5.5] {
            let sol = solve_kepler_axnl(u, axnl, aynl);
            let residual = sol.eo1 - axnl * sol.eo1.sin() + aynl * sol.eo1.cos() - u;
            assert!(residual.abs() < 1e-10, "residual {residual} at u = {u}");
        }
    }
}

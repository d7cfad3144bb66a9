//! # Osculating classical elements
//!
//! Conversion of an inertial position/velocity pair into the classical orbital elements of the
//! two-body orbit tangent to it. This is the inverse view of a propagated [`StateVector`]
//! and is handy to inspect how far the osculating orbit drifts from the mean elements.
//!
//! Which angles exist depends on the orbit geometry:
//!
//! | Orbit type              | Defined angles                                        |
//! |-------------------------|-------------------------------------------------------|
//! | elliptical inclined     | RAAN, argument of perigee, true and mean anomaly      |
//! | elliptical equatorial   | longitude of perigee, true and mean anomaly           |
//! | circular inclined       | RAAN, argument of latitude (also used as mean anomaly)|
//! | circular equatorial     | true longitude (also used as mean anomaly)            |
//!
//! Undefined angles are reported as `None`.
//!
//! [`StateVector`]: crate::sgp4::StateVector
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{Float, Kilometer, Radian, DPI, PI};
use crate::kepler::newtonnu;
use crate::vector::{angle, cross, dot, mag, SMALL};

/// Geometry class driving which angles are defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbitType {
    CircularEquatorial,
    CircularInclined,
    EllipticalEquatorial,
    EllipticalInclined,
}

impl OrbitType {
    fn is_elliptical(self) -> bool {
        matches!(
            self,
            OrbitType::EllipticalEquatorial | OrbitType::EllipticalInclined
        )
    }
}

/// Classical elements of the osculating orbit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OsculatingElements {
    pub orbit_type: OrbitType,
    /// Semi-latus rectum (km)
    pub semi_latus_rectum: Kilometer,
    /// Semi-major axis (km), `None` for a parabolic trajectory
    pub semi_major_axis: Option<Kilometer>,
    pub eccentricity: Float,
    pub inclination: Radian,
    /// Right ascension of the ascending node
    pub raan: Option<Radian>,
    pub argument_of_perigee: Option<Radian>,
    pub true_anomaly: Option<Radian>,
    pub mean_anomaly: Option<Radian>,
    pub argument_of_latitude: Option<Radian>,
    pub true_longitude: Option<Radian>,
    pub longitude_of_perigee: Option<Radian>,
}

/// Reflect an angle measured with `acos` into the lower half plane when `negative` holds.
#[inline]
fn quadrant(a: Radian, negative: bool) -> Radian {
    if negative {
        DPI - a
    } else {
        a
    }
}

/// Classical orbital elements from a position and velocity.
///
/// Arguments
/// ---------
/// * `r`: position (km)
/// * `v`: velocity (km/s)
/// * `mu`: gravitational parameter (km³/s²)
///
/// Return
/// ------
/// * `None` when the angular momentum vanishes (rectilinear motion), the elements otherwise
pub fn rv2coe(r: &Vector3<Float>, v: &Vector3<Float>, mu: Float) -> Option<OsculatingElements> {
    let magr = mag(r);
    let magv = mag(v);

    let hbar = cross(r, v);
    let magh = mag(&hbar);
    if magh <= SMALL {
        return None;
    }

    let nbar = Vector3::new(-hbar.y, hbar.x, 0.0);
    let magn = mag(&nbar);
    let c1 = magv * magv - mu / magr;
    let rdotv = dot(r, v);
    let ebar = (r * c1 - v * rdotv) / mu;
    let ecc = mag(&ebar);

    let sme = magv * magv * 0.5 - mu / magr;
    let semi_major_axis = (sme.abs() > SMALL).then(|| -mu / (2.0 * sme));
    let p = magh * magh / mu;

    let incl = (hbar.z / magh).acos();
    let equatorial = incl < SMALL || (incl - PI).abs() < SMALL;
    let orbit_type = match (ecc < SMALL, equatorial) {
        (true, true) => OrbitType::CircularEquatorial,
        (true, false) => OrbitType::CircularInclined,
        (false, true) => OrbitType::EllipticalEquatorial,
        (false, false) => OrbitType::EllipticalInclined,
    };

    let raan = (magn > SMALL).then(|| {
        let temp = (nbar.x / magn).clamp(-1.0, 1.0);
        quadrant(temp.acos(), nbar.y < 0.0)
    });

    let argument_of_perigee = if orbit_type == OrbitType::EllipticalInclined {
        angle(&nbar, &ebar).map(|a| quadrant(a, ebar.z < 0.0))
    } else {
        None
    };

    let true_anomaly = if orbit_type.is_elliptical() {
        angle(&ebar, r).map(|a| quadrant(a, rdotv < 0.0))
    } else {
        None
    };

    let argument_of_latitude = if orbit_type == OrbitType::CircularInclined {
        angle(&nbar, r).map(|a| quadrant(a, r.z < 0.0))
    } else {
        None
    };

    let longitude_of_perigee = if ecc > SMALL && orbit_type == OrbitType::EllipticalEquatorial {
        let temp = (ebar.x / ecc).clamp(-1.0, 1.0);
        let lonper = quadrant(temp.acos(), ebar.y < 0.0);
        Some(quadrant(lonper, incl > PI * 0.5))
    } else {
        None
    };

    let true_longitude = if magr > SMALL && orbit_type == OrbitType::CircularEquatorial {
        let temp = (r.x / magr).clamp(-1.0, 1.0);
        let truelon = quadrant(temp.acos(), r.y < 0.0);
        Some(quadrant(truelon, incl > PI * 0.5))
    } else {
        None
    };

    let mean_anomaly = match orbit_type {
        OrbitType::CircularInclined => argument_of_latitude,
        OrbitType::CircularEquatorial => true_longitude,
        _ => true_anomaly.and_then(|nu| newtonnu(ecc, nu)).map(|(_, m)| m),
    };

    Some(OsculatingElements {
        orbit_type,
        semi_latus_rectum: p,
        semi_major_axis,
        eccentricity: ecc,
        inclination: incl,
        raan,
        argument_of_perigee,
        true_anomaly,
        mean_anomaly,
        argument_of_latitude,
        true_longitude,
        longitude_of_perigee,
    })
}

#[cfg(test)]
mod osculating_test {
    use super::*;
    use approx::assert_relative_eq;

    const MU: Float = 398600.8;

    #[test]
    fn test_elliptical_inclined() {
        let r = Vector3::new(7022.465292664064, -1400.0829675535551, 0.03995155416521326);
        let v = Vector3::new(1.8938410145129514, 6.405893759209842, 4.534807250354738);
        let coe = rv2coe(&r, &v, MU).unwrap();

        assert_eq!(coe.orbit_type, OrbitType::EllipticalInclined);
        assert_relative_eq!(coe.semi_latus_rectum, 8338.423901833608, epsilon = 1e-6);
        assert_relative_eq!(coe.semi_major_axis.unwrap(), 8638.204475977991, epsilon = 1e-6);
        assert_relative_eq!(coe.eccentricity, 0.1862901976500292, epsilon = 1e-10);
        assert_relative_eq!(coe.inclination, 0.5983140295911243, epsilon = 1e-10);
        assert_relative_eq!(coe.raan.unwrap(), 6.086385479167486, epsilon = 1e-10);
        assert_relative_eq!(coe.argument_of_perigee.unwrap(), 5.794391633827171, epsilon = 1e-9);
        assert_relative_eq!(coe.true_anomaly.unwrap(), 0.4888035788989224, epsilon = 1e-9);
        assert_relative_eq!(coe.mean_anomaly.unwrap(), 0.33355469989104036, epsilon = 1e-9);
        assert!(coe.argument_of_latitude.is_none());
        assert!(coe.true_longitude.is_none());
        assert!(coe.longitude_of_perigee.is_none());
    }

    #[test]
    fn test_circular_equatorial() {
        let vc = (MU / 7000.0).sqrt();
        let coe = rv2coe(&Vector3::new(7000.0, 0.0, 0.0), &Vector3::new(0.0, vc, 0.0), MU).unwrap();

        assert_eq!(coe.orbit_type, OrbitType::CircularEquatorial);
        assert_relative_eq!(coe.semi_major_axis.unwrap(), 7000.0, epsilon = 1e-6);
        assert_eq!(coe.inclination, 0.0);
        assert!(coe.raan.is_none());
        assert!(coe.argument_of_perigee.is_none());
        assert!(coe.true_anomaly.is_none());
        assert_eq!(coe.true_longitude, Some(0.0));
        assert_eq!(coe.mean_anomaly, Some(0.0));
    }

    #[test]
    fn test_circular_inclined() {
        let vc = (MU / 7000.0).sqrt();
        let (s, c) = (PI / 6.0).sin_cos();
        let coe = rv2coe(
            &Vector3::new(7000.0, 0.0, 0.0),
            &Vector3::new(0.0, vc * c, vc * s),
            MU,
        )
        .unwrap();

        assert_eq!(coe.orbit_type, OrbitType::CircularInclined);
        assert_relative_eq!(coe.inclination, PI / 6.0, epsilon = 1e-12);
        assert_eq!(coe.raan, Some(0.0));
        assert_relative_eq!(coe.argument_of_latitude.unwrap(), 0.0, epsilon = 1e-7);
        assert_eq!(coe.mean_anomaly, coe.argument_of_latitude);
    }

    #[test]
    fn test_elliptical_equatorial_retrograde() {
        let coe = rv2coe(
            &Vector3::new(7000.0, 0.0, 0.0),
            &Vector3::new(0.0, -7.5, 0.0),
            MU,
        )
        .unwrap();

        assert_eq!(coe.orbit_type, OrbitType::EllipticalEquatorial);
        assert_relative_eq!(coe.eccentricity, 0.012169569152896778, epsilon = 1e-10);
        assert_relative_eq!(coe.inclination, PI, epsilon = 1e-12);
        assert_relative_eq!(coe.longitude_of_perigee.unwrap(), PI, epsilon = 1e-9);
        assert_relative_eq!(coe.true_anomaly.unwrap(), PI, epsilon = 1e-9);
        assert!(coe.raan.is_none());
    }

    #[test]
    fn test_rectilinear_is_undefined() {
        let r = Vector3::new(7000.0, 0.0, 0.0);
        assert!(rv2coe(&r, &(r * 0.001), MU).is_none());
    }
}

#![allow(dead_code)]

use approx::assert_relative_eq;
use autopoint::gravity::GravityModel;
use autopoint::sgp4::{InitParams, OpsMode, Satellite, StateVector};
use autopoint::tle::TwoLineElement;

pub const TLE_00005: (&str, &str) = (
    "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753",
    "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667",
);

pub const TLE_88888: (&str, &str) = (
    "1 88888U 88888A   80275.98708465  .00073094  13844-3  66816-4 0  5559",
    "2 88888  72.8435 115.9689 0086731  52.6988 110.5714 16.05824518   103",
);

pub const TLE_11801: (&str, &str) = (
    "1 11801U 88888A   80230.29629788  .01431103  00000-0  14311-1 0  5552",
    "2 11801  46.7916 230.4354 7318036  47.4722  10.4117  2.28537848   102",
);

pub const TLE_08195: (&str, &str) = (
    "1 08195U 75081A   06176.33215444  .00000099  00000-0  11873-3 0   813",
    "2 08195  64.1586 279.0717 6877146 264.7651  20.2257  2.00491383225656",
);

pub const TLE_28626: (&str, &str) = (
    "1 28626U 05008A   06176.46683397 -.00000205  00000-0  10000-3 0  2190",
    "2 28626   0.0019 286.9433 0000335  13.7918  55.6504  1.00270176  4891",
);

pub fn satellite_with(tle: (&str, &str), gravity: GravityModel, ops_mode: OpsMode) -> Satellite {
    let tle = TwoLineElement::parse(tle.0, tle.1).unwrap();
    let params = InitParams::builder()
        .gravity(gravity)
        .ops_mode(ops_mode)
        .build()
        .unwrap();
    Satellite::initialize(tle.mean_elements(), &params).unwrap()
}

pub fn satellite(tle: (&str, &str)) -> Satellite {
    satellite_with(tle, GravityModel::Wgs72, OpsMode::Improved)
}

pub fn assert_position_close(state: &StateVector, expected: [f64; 3], epsilon: f64) {
    assert_relative_eq!(state.position.x, expected[0], epsilon = epsilon);
    assert_relative_eq!(state.position.y, expected[1], epsilon = epsilon);
    assert_relative_eq!(state.position.z, expected[2], epsilon = epsilon);
}

pub fn assert_velocity_close(state: &StateVector, expected: [f64; 3], epsilon: f64) {
    assert_relative_eq!(state.velocity.x, expected[0], epsilon = epsilon);
    assert_relative_eq!(state.velocity.y, expected[1], epsilon = epsilon);
    assert_relative_eq!(state.velocity.z, expected[2], epsilon = epsilon);
}

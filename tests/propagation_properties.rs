use approx::{assert_abs_diff_eq, assert_relative_eq};
use autopoint::autopoint_errors::AutopointError;
use autopoint::sgp4::StateVector;

mod common;
use common::*;

fn distance(a: &StateVector, b: &StateVector) -> f64 {
    (a.position - b.position).norm()
}

#[test]
fn test_epoch_state_matches_validation_call() {
    // initialization already propagated to t = 0 without error
    for tle in [TLE_00005, TLE_88888, TLE_11801, TLE_08195, TLE_28626] {
        let mut sat = satellite(tle);
        assert!(sat.last_error().is_none());
        let first = sat.propagate(0.0).unwrap();
        let second = sat.propagate(0.0).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_state_is_continuous_in_time() {
    for tle in [TLE_00005, TLE_11801, TLE_08195, TLE_28626] {
        let mut sat = satellite(tle);
        for t in [0.0, 100.0, 719.9, 1500.0, -600.0] {
            let a = sat.propagate(t).unwrap();
            let b = sat.propagate(t + 1e-3).unwrap();
            // 1e-3 min at under 11 km/s is well below 1 km
            assert!(distance(&a, &b) < 1.0, "jump at t = {t}");
        }
    }
}

#[test]
fn test_near_earth_is_independent_of_call_order() {
    let mut forward = satellite(TLE_00005);
    let mut shuffled = satellite(TLE_00005);

    let times = [0.0, 360.0, 720.0, 1440.0, -720.0];
    let expected: Vec<_> = times
        .iter()
        .map(|&t| forward.propagate(t).unwrap())
        .collect();
    for (i, &t) in times.iter().enumerate().rev() {
        assert_eq!(shuffled.propagate(t).unwrap(), expected[i]);
    }
}

#[test]
fn test_resonant_integrator_resumes() {
    // steps are laid on a fixed 720 minute grid from epoch, so a resumed run walks the
    // same steps as a direct one
    let mut direct = satellite(TLE_08195);
    let expected = direct.propagate(1440.0).unwrap();

    for history in [[720.0, 1440.0], [500.0, 1000.0], [1000.0, 1200.0]] {
        let mut sat = satellite(TLE_08195);
        for t in history {
            sat.propagate(t).unwrap();
        }
        assert_eq!(sat.propagate(1440.0).unwrap(), expected);
    }

    // going back inside the covered range restarts from epoch
    let mut sat = satellite(TLE_08195);
    sat.propagate(2880.0).unwrap();
    assert_eq!(sat.propagate(1440.0).unwrap(), expected);

    sat.propagate(2880.0).unwrap();
    sat.reset_integrator();
    assert_eq!(sat.propagate(1440.0).unwrap(), expected);
}

#[test]
fn test_backwards_after_forwards_restarts() {
    let mut sat = satellite(TLE_28626);
    sat.propagate(4320.0).unwrap();
    let back = sat.propagate(-1440.0).unwrap();
    let fresh = satellite(TLE_28626).propagate(-1440.0).unwrap();
    assert_eq!(back, fresh);
}

#[test]
fn test_propagation_error_is_recorded() {
    let mut sat = satellite(TLE_88888);
    // a year of drag drives the mean eccentricity out of range
    let err = sat.propagate(400.0 * 1440.0).unwrap_err();
    assert_eq!(err.code(), Some(1));
    let last = sat.last_error().unwrap();
    assert!(matches!(
        err,
        AutopointError::Propagation(e) if e.same_kind(&last)
    ));
    assert_relative_eq!(last.tsince(), 400.0 * 1440.0);

    assert!(sat.propagate(0.0).is_ok());
    assert!(sat.last_error().is_none());
}

#[test]
fn test_speed_matches_vis_viva() {
    let mut sat = satellite(TLE_00005);
    let mu = sat.gravity().mu;
    let a = {
        let n = sat.no_unkozai() / 60.0;
        (mu / (n * n)).cbrt()
    };
    let s = sat.propagate(200.0).unwrap();
    let r = s.position.norm();
    let v = s.velocity.norm();
    // short-period and drag terms keep the osculating speed within a percent
    assert_abs_diff_eq!(v * v, mu * (2.0 / r - 1.0 / a), epsilon = 0.01 * v * v);
}

#[test]
fn test_gravity_models_differ_slightly() {
    use autopoint::gravity::GravityModel;
    use autopoint::sgp4::OpsMode;

    let mut wgs72 = satellite(TLE_00005);
    let mut wgs84 = satellite_with(TLE_00005, GravityModel::Wgs84, OpsMode::Improved);
    for t in [0.0, 720.0, 1440.0] {
        let a = wgs72.propagate(t).unwrap();
        let b = wgs84.propagate(t).unwrap();
        let d = distance(&a, &b);
        assert!(d > 1e-3, "identical states at t = {t}");
        assert!(d < 0.01 * a.position.norm(), "{d} km apart at t = {t}");
    }
}

use approx::assert_relative_eq;
use autopoint::ephemeris::{generate, write_csv, write_csv_file, EphemerisParams, EphemerisRow};
use autopoint::time::{invjday, jday, julian_day_from_utc, set_epoch};
use camino::Utf8PathBuf;
use hifitime::Epoch;

mod common;
use common::*;

#[test]
fn test_propagate_to_jd() {
    let mut sat = satellite(TLE_00005);
    let jd = sat.jdsatepoch() + 0.5;
    let by_jd = sat.propagate_to_jd(jd).unwrap();
    let by_minutes = sat.propagate(sat.minutes_since_epoch(jd)).unwrap();
    assert_eq!(by_jd, by_minutes);
    assert_relative_eq!(by_jd.tsince, 720.0, epsilon = 1e-4);
}

#[test]
fn test_epoch_calendar() {
    let sat = satellite(TLE_00005);
    // day 179.78495062 of 2000 is June 27th, 18:50:19.7336 UTC
    let date = invjday(sat.jdsatepoch());
    assert_eq!((date.year, date.month, date.day), (2000, 6, 27));
    assert_eq!((date.hour, date.minute), (18, 50));
    assert_relative_eq!(date.second, 19.733568, epsilon = 1e-3);

    let jd = jday(2000, 6, 27, 18, 50, 19.733568);
    assert_relative_eq!(jd, sat.jdsatepoch(), epsilon = 1e-8);

    let jd = julian_day_from_utc(2000, 6, 27, 18, 50, 19, 734);
    assert_relative_eq!(sat.minutes_since_epoch(jd), 0.0, epsilon = 1e-4);
}

#[test]
fn test_set_epoch_from_hifitime() {
    let sat = satellite(TLE_28626);
    let epoch = Epoch::from_gregorian_utc(2006, 6, 25, 11, 12, 14, 0);
    let tsince = set_epoch(sat.jdsatepoch(), epoch);
    // day 176.46683397 of 2006 is June 25th, 11:12:14.455 UTC
    assert_relative_eq!(tsince, -0.455 / 60.0, epsilon = 1e-3);

    let later = epoch + hifitime::Duration::from_days(1.0);
    assert_relative_eq!(set_epoch(sat.jdsatepoch(), later), 1440.0 - 0.455 / 60.0, epsilon = 1e-3);
}

#[test]
fn test_ephemeris_csv_export() {
    let mut sat = satellite(TLE_11801);
    let params = EphemerisParams::builder()
        .start(0.0)
        .stop(1440.0)
        .step(360.0)
        .build()
        .unwrap();
    let ephemeris = generate(&mut sat, &params);
    assert!(ephemeris.error.is_none());
    assert_eq!(ephemeris.rows.len(), 5);

    let mut out = Vec::new();
    write_csv(&ephemeris.rows, &mut out).unwrap();

    let mut reader = csv::Reader::from_reader(out.as_slice());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["tsince", "x", "y", "z", "vx", "vy", "vz"]
    );
    let rows: Vec<EphemerisRow> = reader.deserialize().map(|r| r.unwrap()).collect();
    assert_eq!(rows, ephemeris.rows);
    assert_relative_eq!(rows[4].x, 9787.878362555224, epsilon = 1e-5);
}

#[test]
fn test_ephemeris_file_export() {
    let mut sat = satellite(TLE_28626);
    let ephemeris = generate(&mut sat, &EphemerisParams::default());

    let dir = Utf8PathBuf::from_path_buf(std::env::temp_dir()).unwrap();
    let path = dir.join(format!("autopoint_28626_{}.csv", std::process::id()));
    write_csv_file(&ephemeris.rows, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<EphemerisRow> = reader.deserialize().map(|r| r.unwrap()).collect();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(rows.len(), 5);
    assert_eq!(rows, ephemeris.rows);
}

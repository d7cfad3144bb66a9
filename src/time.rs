//! # Calendar and sidereal time utilities
//!
//! Closed-form conversions between calendar dates and Julian dates, the Greenwich mean
//! sidereal angle used to orient the SGP4 frame, and the bridge from a wall-clock instant
//! (through [`hifitime`]) to the *minutes since epoch* that
//! [`Satellite::propagate`](crate::sgp4::Satellite::propagate) expects.
//!
//! ## Validity
//!
//! [`jday`] and [`invjday`] are only valid between 1900 and 2100: leap years follow the
//! `year % 4 == 0` rule, which matches the Gregorian calendar across that span.
//!
//! ## See also
//!
//! * [`gstime`] – sidereal angle from a UT1 Julian date (IAU-82 polynomial)
//! * [`gstime_afspc`] – sidereal angle at epoch used by the AFSPC operation mode
use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::autopoint_errors::AutopointError;
use crate::constants::{JulianDate, Minutes, DPI_F64, JD_1950, JD_2000, MINUTES_PER_DAY};

/// Broken down calendar date and time of day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    /// 1..=12
    pub month: u32,
    /// Day of month
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    /// Seconds including the fractional part
    pub second: f64,
}

/// Julian date of a calendar date.
///
/// Arguments
/// ---------
/// * `year`: four digit year, 1900..=2100
/// * `mon`: month, 1..=12
/// * `day`: day of month
/// * `hr`, `minute`: time of day
/// * `sec`: seconds, may carry a fractional part
///
/// Return
/// ------
/// * the Julian date in days
pub fn jday(year: i32, mon: u32, day: u32, hr: u32, minute: u32, sec: f64) -> JulianDate {
    let year = year as f64;
    let mon = mon as f64;
    367.0 * year - ((7.0 * (year + ((mon + 9.0) / 12.0).floor())) * 0.25).floor()
        + (275.0 * mon / 9.0).floor()
        + day as f64
        + 1_721_013.5
        + ((sec / 60.0 + minute as f64) / 60.0 + hr as f64) / 24.0
}

/// Month, day and time of day from a fractional day of year.
///
/// Arguments
/// ---------
/// * `year`: year the day count belongs to (drives the February length)
/// * `days`: day of year, 1.0 being January 1st at 0h
pub fn days2mdhms(year: i32, days: f64) -> CalendarDate {
    let mut lmonth: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let dayofyr = days.floor() as u32;

    if year % 4 == 0 {
        lmonth[1] = 29;
    }

    let mut i = 1;
    let mut inttemp = 0;
    while dayofyr > inttemp + lmonth[i - 1] && i < 12 {
        inttemp += lmonth[i - 1];
        i += 1;
    }

    let mut temp = (days - dayofyr as f64) * 24.0;
    let hour = temp.floor();
    temp = (temp - hour) * 60.0;
    let minute = temp.floor();

    CalendarDate {
        year,
        month: i as u32,
        day: dayofyr - inttemp,
        hour: hour as u32,
        minute: minute as u32,
        second: (temp - minute) * 60.0,
    }
}

/// Calendar date of a Julian date, inverse of [`jday`].
///
/// The day count is nudged by 1e-11 days before decomposition so exact instants do not fall a
/// hair short of the next second, and the nudge (8.64e-7 s) is removed from the seconds again.
pub fn invjday(jd: JulianDate) -> CalendarDate {
    let temp = jd - 2_415_019.5;
    let tu = temp / 365.25;
    let mut year = 1900 + tu.floor() as i32;
    let mut leapyrs = ((year - 1901) as f64 * 0.25).floor();

    let mut days = temp - ((year - 1900) as f64 * 365.0 + leapyrs) + 0.00000000001;

    // beginning of a year
    if days < 1.0 {
        year -= 1;
        leapyrs = ((year - 1901) as f64 * 0.25).floor();
        days = temp - ((year - 1900) as f64 * 365.0 + leapyrs);
    }

    let mut date = days2mdhms(year, days);
    date.second -= 0.00000086400;
    date
}

/// Greenwich mean sidereal angle (IAU-82).
///
/// Arguments
/// ---------
/// * `jdut1`: Julian date in the UT1 time scale
///
/// Return
/// ------
/// * the sidereal angle in radians, within [0, 2π)
pub fn gstime(jdut1: JulianDate) -> f64 {
    let tut1 = (jdut1 - JD_2000) / 36525.0;
    let mut temp = -6.2e-6 * tut1 * tut1 * tut1
        + 0.093104 * tut1 * tut1
        + (876600.0 * 3600.0 + 8640184.812866) * tut1
        + 67310.54841; // sec
    temp = (temp * std::f64::consts::PI / 180.0 / 240.0) % DPI_F64; // 360/86400 = 1/240, to deg, to rad

    if temp < 0.0 {
        temp += DPI_F64;
    }
    temp
}

/// Sidereal angle at epoch with the 1970-based expression of the AFSPC operation mode.
///
/// Arguments
/// ---------
/// * `epoch`: days since 1949 December 31 00:00 UT
pub fn gstime_afspc(epoch: f64) -> f64 {
    const C1: f64 = 1.72027916940703639e-2;
    const THGR70: f64 = 1.7321343856509374;
    const FK5R: f64 = 5.07551419432269442e-15;

    let ts70 = epoch - 7305.0;
    let ds70 = (ts70 + 1.0e-8).floor();
    let tfrac = ts70 - ds70;
    let c1p2p = C1 + DPI_F64;

    let mut gsto = (THGR70 + C1 * ds70 + c1p2p * tfrac + ts70 * ts70 * FK5R) % DPI_F64;
    if gsto < 0.0 {
        gsto += DPI_F64;
    }
    gsto
}

// -------------------------------------------------------------------------------------------------
// Wall clock
// -------------------------------------------------------------------------------------------------

/// Julian date (UTC) of the current system time.
pub fn julian_day_now() -> Result<JulianDate, AutopointError> {
    Ok(Epoch::now()?.to_jde_utc_days())
}

/// Julian date of a UTC clock reading with millisecond resolution.
///
/// Arguments
/// ---------
/// * `year`, `month`, `day`, `hour`, `min`, `sec`: UTC calendar reading
/// * `msec`: milliseconds
pub fn julian_day_from_utc(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
    msec: u32,
) -> JulianDate {
    jday(year, month, day, hour, min, sec as f64) + msec as f64 / 86_400_000.0
}

/// Minutes elapsed between an epoch Julian date and a Julian date.
#[inline]
pub fn minutes_since_epoch(jd_epoch: JulianDate, jd: JulianDate) -> Minutes {
    ((jd - jd_epoch) * MINUTES_PER_DAY) as Minutes
}

/// Minutes from an epoch Julian date to a [`hifitime::Epoch`].
///
/// Arguments
/// ---------
/// * `jd_epoch`: element set epoch (Julian date, UTC)
/// * `instant`: target instant
pub fn set_epoch(jd_epoch: JulianDate, instant: Epoch) -> Minutes {
    minutes_since_epoch(jd_epoch, instant.to_jde_utc_days())
}

/// Days since 1949 December 31 00:00 UT of a Julian date, the SGP4 epoch convention.
#[inline]
pub fn jd_to_sgp4_epoch(jd: JulianDate) -> f64 {
    jd - JD_1950
}

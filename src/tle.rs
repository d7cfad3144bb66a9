//! # Two-line element sets
//!
//! Parser for the fixed-column two-line element format published by the space surveillance
//! networks:
//!
//! ```text
//! 1 25544U 98067A   17360.63489756  .00001290  00000-0  26644-4 0  9993
//! 2 25544  51.6415 158.9361 0002587 294.1321 164.6117 15.54215205 91681
//! ```
//!
//! Line 1 carries the identity, the epoch (two-digit year and fractional day of year) and the
//! drag terms, line 2 the mean elements in degrees and revolutions per day. A few fields use
//! an implied decimal point: the eccentricity (`0002587` is `0.0002587`) and the
//! second derivative of the mean motion and B* (`26644-4` is `0.26644e-4`).
//!
//! The parser only decodes the lines. [`TwoLineElement::mean_elements`] converts the result
//! into the [`MeanElements`] expected by [`Satellite::initialize`](crate::sgp4::Satellite::initialize).
//! The modulo-10 checksums are informational: a mismatch is logged, never rejected.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::autopoint_errors::AutopointError;
use crate::constants::{Float, JulianDate, RADEG, XPDOTP};
use crate::elements::MeanElements;
use crate::time::{days2mdhms, jd_to_sgp4_epoch, jday};

/// Columns read by the parser; the checksum digit after them is optional.
const MIN_LINE_LENGTH: usize = 68;

#[derive(Error, Debug, PartialEq)]
pub enum ParseTleError {
    #[error("Line {0} is too short")]
    TooShortLine(u8),
    #[error("Line {0} contains non ASCII characters")]
    NonAsciiLine(u8),
    #[error("Line {expected} does not start with '{expected}': {found:?}")]
    InvalidLineNumber { expected: u8, found: String },
    #[error("Invalid catalog number: {0}")]
    InvalidSatnum(String),
    #[error("Catalog numbers differ between the two lines: {0} and {1}")]
    SatnumMismatch(u32, u32),
    #[error("Invalid epoch: {0}")]
    InvalidEpoch(String),
    #[error("Invalid first derivative of the mean motion: {0}")]
    InvalidNdot(String),
    #[error("Invalid second derivative of the mean motion: {0}")]
    InvalidNddot(String),
    #[error("Invalid B* drag term: {0}")]
    InvalidBstar(String),
    #[error("Invalid element set number: {0}")]
    InvalidElementNumber(String),
    #[error("Invalid inclination: {0}")]
    InvalidInclination(String),
    #[error("Invalid right ascension of the ascending node: {0}")]
    InvalidRaan(String),
    #[error("Invalid eccentricity: {0}")]
    InvalidEccentricity(String),
    #[error("Invalid argument of perigee: {0}")]
    InvalidArgumentOfPerigee(String),
    #[error("Invalid mean anomaly: {0}")]
    InvalidMeanAnomaly(String),
    #[error("Invalid mean motion: {0}")]
    InvalidMeanMotion(String),
    #[error("Invalid revolution number: {0}")]
    InvalidRevolutionNumber(String),
}

/// Decoded two-line element set.
///
/// Angles are kept in radians and rates in radians per minute, the units of the propagator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoLineElement {
    pub line1: String,
    pub line2: String,
    /// Catalog number
    pub satnum: u32,
    /// Security classification (`U`, `C` or `S`)
    pub classification: char,
    /// International designator (launch year, launch number and piece)
    pub international_designator: String,
    /// Four-digit epoch year
    pub epoch_year: i32,
    /// Fractional day of year of the epoch (1.0 is January 1st, 00:00 UT)
    pub epoch_days: f64,
    /// Julian date of the epoch
    pub jdsatepoch: JulianDate,
    /// First derivative of the mean motion divided by two (rad/min²)
    pub ndot: Float,
    /// Second derivative of the mean motion divided by six (rad/min³)
    pub nddot: Float,
    /// Drag term (1 / earth radii)
    pub bstar: Float,
    pub element_number: u32,
    pub inclination: Float,
    pub raan: Float,
    pub eccentricity: Float,
    pub argument_of_perigee: Float,
    pub mean_anomaly: Float,
    /// Kozai mean motion (rad/min)
    pub mean_motion: Float,
    /// Revolution number at epoch
    pub revolution_number: u32,
}

/// Modulo-10 checksum of the first 68 columns: digits count for their value, `-` for one.
pub fn checksum(line: &str) -> u32 {
    line.chars()
        .take(MIN_LINE_LENGTH)
        .map(|c| match c {
            '-' => 1,
            c => c.to_digit(10).unwrap_or(0),
        })
        .sum::<u32>()
        % 10
}

/// Whether the checksum digit in column 69 matches the line content.
fn checksum_matches(line: &str) -> bool {
    line.chars()
        .nth(MIN_LINE_LENGTH)
        .and_then(|c| c.to_digit(10))
        .is_some_and(|digit| digit == checksum(line))
}

fn field(line: &str, start: usize, end: usize) -> &str {
    line[start..end].trim()
}

fn parse_float(
    line: &str,
    start: usize,
    end: usize,
    err: fn(String) -> ParseTleError,
) -> Result<f64, ParseTleError> {
    let s = field(line, start, end);
    s.parse::<f64>().map_err(|_| err(s.to_string()))
}

/// Counter field that may be left blank (element and revolution numbers).
fn parse_counter(
    line: &str,
    start: usize,
    end: usize,
    err: fn(String) -> ParseTleError,
) -> Result<u32, ParseTleError> {
    let s = field(line, start, end);
    if s.is_empty() {
        return Ok(0);
    }
    s.parse::<u32>().map_err(|_| err(s.to_string()))
}

/// Decode an implied-decimal field such as ` 26644-4` (0.26644e-4) or `-11606-4`.
///
/// Arguments
/// ---------
/// * `s`: the eight columns of the field, sign, five mantissa digits and a signed exponent
fn parse_implied_decimal(s: &str) -> Option<f64> {
    if s.len() != 8 {
        return None;
    }
    let (sign, rest) = s.split_at(1);
    let (mantissa, exponent) = rest.split_at(5);
    let sign = match sign {
        "-" => -1.0,
        "+" | " " => 1.0,
        _ => return None,
    };
    let mantissa = mantissa.trim();
    let mantissa = if mantissa.is_empty() {
        0.0
    } else {
        format!("0.{}", mantissa.replace(' ', "0")).parse::<f64>().ok()?
    };
    let exponent = match exponent.trim() {
        "" => 0,
        e => e.parse::<i32>().ok()?,
    };
    Some(sign * mantissa * 10f64.powi(exponent))
}

fn check_line(line: &str, number: u8) -> Result<(), ParseTleError> {
    if !line.is_ascii() {
        return Err(ParseTleError::NonAsciiLine(number));
    }
    if line.len() < MIN_LINE_LENGTH {
        return Err(ParseTleError::TooShortLine(number));
    }
    let first = &line[0..1];
    if first != number.to_string() {
        return Err(ParseTleError::InvalidLineNumber {
            expected: number,
            found: first.to_string(),
        });
    }
    Ok(())
}

impl TwoLineElement {
    /// Parse a two-line element set.
    ///
    /// Arguments
    /// ---------
    /// * `line1`, `line2`: the two lines, trailing whitespace and line breaks are ignored
    ///
    /// Return
    /// ------
    /// * the decoded set, or `AutopointError::TleParsing` naming the first invalid field
    pub fn parse(line1: &str, line2: &str) -> Result<TwoLineElement, AutopointError> {
        let line1 = line1.trim_end();
        let line2 = line2.trim_end();
        check_line(line1, 1)?;
        check_line(line2, 2)?;

        let satnum = field(line1, 2, 7);
        let satnum: u32 = satnum
            .parse()
            .map_err(|_| ParseTleError::InvalidSatnum(satnum.to_string()))?;
        let satnum2 = field(line2, 2, 7);
        let satnum2: u32 = satnum2
            .parse()
            .map_err(|_| ParseTleError::InvalidSatnum(satnum2.to_string()))?;
        if satnum != satnum2 {
            return Err(ParseTleError::SatnumMismatch(satnum, satnum2).into());
        }

        let classification = line1[7..8].chars().next().unwrap_or('U');
        let international_designator = field(line1, 9, 17).to_string();

        let epoch_field = field(line1, 18, 32);
        let invalid_epoch = || ParseTleError::InvalidEpoch(epoch_field.to_string());
        let year: i32 = field(line1, 18, 20).parse().map_err(|_| invalid_epoch())?;
        let epoch_days: f64 = field(line1, 20, 32).parse().map_err(|_| invalid_epoch())?;
        if !(1.0..367.0).contains(&epoch_days) {
            return Err(invalid_epoch().into());
        }
        let epoch_year = if year < 57 { year + 2000 } else { year + 1900 };
        let date = days2mdhms(epoch_year, epoch_days);
        let jdsatepoch = jday(
            date.year,
            date.month,
            date.day,
            date.hour,
            date.minute,
            date.second,
        );

        let ndot = parse_float(line1, 33, 43, ParseTleError::InvalidNdot)?;
        let nddot = parse_implied_decimal(&line1[44..52])
            .ok_or_else(|| ParseTleError::InvalidNddot(line1[44..52].to_string()))?;
        let bstar = parse_implied_decimal(&line1[53..61])
            .ok_or_else(|| ParseTleError::InvalidBstar(line1[53..61].to_string()))?;
        let element_number = parse_counter(line1, 64, 68, ParseTleError::InvalidElementNumber)?;

        let inclination = parse_float(line2, 8, 16, ParseTleError::InvalidInclination)?;
        let raan = parse_float(line2, 17, 25, ParseTleError::InvalidRaan)?;
        let ecc_field = &line2[26..33];
        let eccentricity = format!("0.{}", ecc_field.replace(' ', "0"))
            .parse::<f64>()
            .map_err(|_| ParseTleError::InvalidEccentricity(ecc_field.to_string()))?;
        let argument_of_perigee =
            parse_float(line2, 34, 42, ParseTleError::InvalidArgumentOfPerigee)?;
        let mean_anomaly = parse_float(line2, 43, 51, ParseTleError::InvalidMeanAnomaly)?;
        let mean_motion = parse_float(line2, 52, 63, ParseTleError::InvalidMeanMotion)?;
        let revolution_number =
            parse_counter(line2, 63, 68, ParseTleError::InvalidRevolutionNumber)?;

        let xpdotp = XPDOTP as f64;
        let tle = TwoLineElement {
            line1: line1.to_string(),
            line2: line2.to_string(),
            satnum,
            classification,
            international_designator,
            epoch_year,
            epoch_days,
            jdsatepoch,
            ndot: (ndot / (xpdotp * 1440.0)) as Float,
            nddot: (nddot / (xpdotp * 1440.0 * 1440.0)) as Float,
            bstar: bstar as Float,
            element_number,
            inclination: inclination as Float * RADEG,
            raan: raan as Float * RADEG,
            eccentricity: eccentricity as Float,
            argument_of_perigee: argument_of_perigee as Float * RADEG,
            mean_anomaly: mean_anomaly as Float * RADEG,
            mean_motion: (mean_motion / xpdotp) as Float,
            revolution_number,
        };

        if !tle.checksums_valid() {
            log::debug!("satellite {}: two-line element checksum mismatch", tle.satnum);
        }
        Ok(tle)
    }

    /// Whether both lines carry a checksum digit matching their content.
    pub fn checksums_valid(&self) -> bool {
        checksum_matches(&self.line1) && checksum_matches(&self.line2)
    }

    /// Mean elements for the initializer.
    pub fn mean_elements(&self) -> MeanElements {
        MeanElements {
            satnum: self.satnum,
            epoch: jd_to_sgp4_epoch(self.jdsatepoch),
            bstar: self.bstar,
            eccentricity: self.eccentricity,
            argument_of_perigee: self.argument_of_perigee,
            inclination: self.inclination,
            mean_anomaly: self.mean_anomaly,
            mean_motion: self.mean_motion,
            raan: self.raan,
        }
    }
}

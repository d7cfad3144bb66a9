//! Initialization of a [`Satellite`] record from mean elements.
use super::deep_space::dscom::CommonTerms;
use super::deep_space::dsinit::EpochState;
use super::deep_space::DeepSpaceTerms;
use super::{InitParams, NearEarthTerms, OpsMode, Satellite};
use crate::autopoint_errors::AutopointError;
use crate::constants::{Float, DPI};
use crate::elements::MeanElements;
use crate::gravity::GravityConstants;
use crate::time::{gstime, gstime_afspc};

pub(crate) const X2O3: Float = 2.0 / 3.0;

/// Period (min) from which the deep-space theory is used.
const DEEP_SPACE_PERIOD: Float = 225.0;

/// Perigee altitudes (km) where the atmospheric density parameters change.
const PERIGEE_LOW_DENSITY: Float = 156.0;
const PERIGEE_FLOOR: Float = 98.0;

/// Epoch quantities derived from the mean elements.
#[derive(Debug, Clone, Copy)]
struct Initl {
    no_unkozai: Float,
    ao: Float,
    con41: Float,
    con42: Float,
    cosio: Float,
    cosio2: Float,
    omeosq: Float,
    posq: Float,
    rp: Float,
    rteosq: Float,
    sinio: Float,
    gsto: Float,
}

/// Recover the Brouwer mean motion and the epoch geometry.
///
/// The Kozai mean motion of a TLE is converted with a fixed two-step J2 correction.
fn initl(elements: &MeanElements, gravity: &GravityConstants, ops_mode: OpsMode) -> Initl {
    let ecco = elements.eccentricity;
    let eccsq = ecco * ecco;
    let omeosq = 1.0 - eccsq;
    let rteosq = omeosq.sqrt();
    let cosio = elements.inclination.cos();
    let cosio2 = cosio * cosio;

    // un-kozai the mean motion
    let ak = (gravity.xke / elements.mean_motion).powf(X2O3);
    let d1 = 0.75 * gravity.j2 * (3.0 * cosio2 - 1.0) / (rteosq * omeosq);
    let mut del = d1 / (ak * ak);
    let adel = ak * (1.0 - del * del - del * (1.0 / 3.0 + 134.0 * del * del / 81.0));
    del = d1 / (adel * adel);
    let no_unkozai = elements.mean_motion / (1.0 + del);

    let ao = (gravity.xke / no_unkozai).powf(X2O3);
    let po = ao * omeosq;
    let con42 = 1.0 - 5.0 * cosio2;

    let gsto = match ops_mode {
        OpsMode::Afspc => gstime_afspc(elements.epoch),
        OpsMode::Improved => gstime(elements.jd_epoch()),
    } as Float;

    Initl {
        no_unkozai,
        ao,
        con41: -con42 - cosio2 - cosio2,
        con42,
        cosio,
        cosio2,
        omeosq,
        posq: po * po,
        rp: ao * (1.0 - ecco),
        rteosq,
        sinio: elements.inclination.sin(),
        gsto,
    }
}

/// Long-period J3 coefficients `(aycof, xlcof)` for an inclination.
///
/// The `1 + cos i` divisor is floored at 1.5e-12 for retrograde equatorial orbits.
pub(crate) fn long_period_coefficients(j3oj2: Float, sinio: Float, cosio: Float) -> (Float, Float) {
    let den = if (cosio + 1.0).abs() > 1.5e-12 {
        1.0 + cosio
    } else {
        1.5e-12
    };
    (
        -0.5 * j3oj2 * sinio,
        -0.25 * j3oj2 * sinio * (3.0 + 5.0 * cosio) / den,
    )
}

impl Satellite {
    /// Initialize a record from mean elements.
    ///
    /// Computes the secular and drag coefficients, selects the near-earth or deep-space theory
    /// from the period and, for deep space, the lunar-solar and resonance terms. The record
    /// is finally propagated to `t = 0` to validate it; a failure there is kept as
    /// [`Satellite::last_error`] and logged, the record is still returned.
    ///
    /// Arguments
    /// ---------
    /// * `elements`: mean elements at epoch
    /// * `params`: gravity model and operation mode
    ///
    /// Return
    /// ------
    /// * `Err(AutopointError::InvalidElements)` for non-finite values, an eccentricity outside
    ///   [0, 1) or a non-positive mean motion
    pub fn initialize(elements: MeanElements, params: &InitParams) -> Result<Satellite, AutopointError> {
        elements.validate()?;

        let gravity = params.gravity.constants();
        let GravityConstants {
            radius_earth_km: re,
            xke,
            j2,
            j4,
            j3oj2,
            ..
        } = gravity;
        let init = initl(&elements, &gravity, params.ops_mode);
        let Initl {
            no_unkozai: no,
            ao,
            con41,
            con42,
            cosio,
            cosio2,
            omeosq,
            posq,
            rp,
            rteosq,
            sinio,
            gsto,
        } = init;
        let ecco = elements.eccentricity;
        let bstar = elements.bstar;
        let argpo = elements.argument_of_perigee;
        let mo = elements.mean_anomaly;

        let mut terms = NearEarthTerms {
            con41,
            ..Default::default()
        };

        // perigee under 220 km: truncated drag model
        terms.isimp = rp < 220.0 / re + 1.0;

        let mut sfour = 78.0 / re + 1.0;
        let mut qzms24 = ((120.0 - 78.0) / re).powi(4);
        let perige = (rp - 1.0) * re;
        if perige < PERIGEE_LOW_DENSITY {
            sfour = if perige < PERIGEE_FLOOR {
                20.0
            } else {
                perige - 78.0
            };
            qzms24 = ((120.0 - sfour) / re).powi(4);
            sfour = sfour / re + 1.0;
        }

        let pinvsq = 1.0 / posq;
        let tsi = 1.0 / (ao - sfour);
        let eta = ao * ecco * tsi;
        let etasq = eta * eta;
        let eeta = ecco * eta;
        let psisq = (1.0 - etasq).abs();
        let coef = qzms24 * tsi.powi(4);
        let coef1 = coef / psisq.powf(3.5);
        let cc2 = coef1
            * no
            * (ao * (1.0 + 1.5 * etasq + eeta * (4.0 + etasq))
                + 0.375 * j2 * tsi / psisq * con41 * (8.0 + 3.0 * etasq * (8.0 + etasq)));
        terms.eta = eta;
        terms.cc1 = bstar * cc2;
        let cc3 = if ecco > 1.0e-4 {
            -2.0 * coef * tsi * j3oj2 * no * sinio / ecco
        } else {
            0.0
        };
        terms.x1mth2 = 1.0 - cosio2;
        terms.cc4 = 2.0
            * no
            * coef1
            * ao
            * omeosq
            * (eta * (2.0 + 0.5 * etasq) + ecco * (0.5 + 2.0 * etasq)
                - j2 * tsi / (ao * psisq)
                    * (-3.0 * con41 * (1.0 - 2.0 * eeta + etasq * (1.5 - 0.5 * eeta))
                        + 0.75
                            * terms.x1mth2
                            * (2.0 * etasq - eeta * (1.0 + etasq))
                            * (2.0 * argpo).cos()));
        terms.cc5 = 2.0 * coef1 * ao * omeosq * (1.0 + 2.75 * (etasq + eeta) + eeta * etasq);

        // secular rates
        let cosio4 = cosio2 * cosio2;
        let temp1 = 1.5 * j2 * pinvsq * no;
        let temp2 = 0.5 * temp1 * j2 * pinvsq;
        let temp3 = -0.46875 * j4 * pinvsq * pinvsq * no;
        terms.mdot = no
            + 0.5 * temp1 * rteosq * con41
            + 0.0625 * temp2 * rteosq * (13.0 - 78.0 * cosio2 + 137.0 * cosio4);
        terms.argpdot = -0.5 * temp1 * con42
            + 0.0625 * temp2 * (7.0 - 114.0 * cosio2 + 395.0 * cosio4)
            + temp3 * (3.0 - 36.0 * cosio2 + 49.0 * cosio4);
        let xhdot1 = -temp1 * cosio;
        terms.nodedot =
            xhdot1 + (0.5 * temp2 * (4.0 - 19.0 * cosio2) + 2.0 * temp3 * (3.0 - 7.0 * cosio2)) * cosio;
        let xpidot = terms.argpdot + terms.nodedot;

        terms.omgcof = bstar * cc3 * argpo.cos();
        terms.xmcof = if ecco > 1.0e-4 {
            -X2O3 * coef * bstar / eeta
        } else {
            0.0
        };
        terms.nodecf = 3.5 * omeosq * xhdot1 * terms.cc1;
        terms.t2cof = 1.5 * terms.cc1;
        (terms.aycof, terms.xlcof) = long_period_coefficients(j3oj2, sinio, cosio);
        terms.delmo = (1.0 + eta * mo.cos()).powi(3);
        terms.sinmao = mo.sin();
        terms.x7thm1 = 7.0 * cosio2 - 1.0;

        let deep_space = if DPI / no >= DEEP_SPACE_PERIOD {
            terms.isimp = true;
            let common = CommonTerms::compute(
                elements.epoch,
                ecco,
                argpo,
                0.0,
                elements.inclination,
                elements.raan,
                no,
            );
            let ds = DeepSpaceTerms::init(
                &common,
                &EpochState {
                    xke,
                    gsto,
                    no,
                    mo,
                    mdot: terms.mdot,
                    nodeo: elements.raan,
                    nodedot: terms.nodedot,
                    argpo,
                    argpdot: terms.argpdot,
                    xpidot,
                    ecco,
                    inclo: elements.inclination,
                },
            );
            Some(ds)
        } else {
            None
        };

        if !terms.isimp {
            let cc1sq = terms.cc1 * terms.cc1;
            terms.d2 = 4.0 * ao * tsi * cc1sq;
            let temp = terms.d2 * tsi * terms.cc1 / 3.0;
            terms.d3 = (17.0 * ao + sfour) * temp;
            terms.d4 = 0.5 * temp * ao * tsi * (221.0 * ao + 31.0 * sfour) * terms.cc1;
            terms.t3cof = terms.d2 + 2.0 * cc1sq;
            terms.t4cof = 0.25 * (3.0 * terms.d3 + terms.cc1 * (12.0 * terms.d2 + 10.0 * cc1sq));
            terms.t5cof = 0.2
                * (3.0 * terms.d4
                    + 12.0 * terms.cc1 * terms.d3
                    + 6.0 * terms.d2 * terms.d2
                    + 15.0 * cc1sq * (2.0 * terms.d2 + cc1sq));
        }

        let mut sat = Satellite {
            elements,
            params: *params,
            gravity,
            no_unkozai: no,
            gsto,
            terms,
            deep_space,
            last_error: None,
        };
        log::debug!(
            "satellite {} initialized: method {}, simplified drag {}, resonance {}",
            sat.elements.satnum,
            sat.method(),
            sat.terms.isimp,
            sat.resonance()
        );

        if let Err(err) = sat.propagate(0.0) {
            log::warn!(
                "satellite {}: validation propagation at epoch failed: {err}",
                sat.elements.satnum
            );
        }
        Ok(sat)
    }
}

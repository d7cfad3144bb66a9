//! Lunar and solar terms shared by the long-period periodics and the resonance setup.
//!
//! The same trigonometric series is evaluated twice: once with the solar geometry (fixed
//! ecliptic orientation) and once with the lunar geometry, whose node regresses with an
//! 18.6 year period and is evaluated at the element epoch. Each pass yields a [`BodyTerms`]
//! set; the periodic amplitudes are then folded into a [`PeriodicCoefficients`] per body.
use crate::constants::{Float, DPI};

/// Solar perturbation coefficient
const C1SS: Float = 2.9864797e-6;
/// Lunar perturbation coefficient
const C1L: Float = 4.7968065e-7;
/// Solar eccentricity
pub(crate) const ZES: Float = 0.01675;
/// Lunar eccentricity
pub(crate) const ZEL: Float = 0.05490;
const ZSINIS: Float = 0.39785416;
const ZCOSIS: Float = 0.91744867;
const ZCOSGS: Float = 0.1945905;
const ZSINGS: Float = -0.98088458;

/// Outputs of one pass of the third-body series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct BodyTerms {
    pub s1: Float,
    pub s2: Float,
    pub s3: Float,
    pub s4: Float,
    pub s5: Float,
    pub s6: Float,
    pub s7: Float,
    pub z1: Float,
    pub z2: Float,
    pub z3: Float,
    pub z11: Float,
    pub z12: Float,
    pub z13: Float,
    pub z21: Float,
    pub z22: Float,
    pub z23: Float,
    pub z31: Float,
    pub z32: Float,
    pub z33: Float,
}

/// Long-period amplitude coefficients of one perturbing body.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodicCoefficients {
    pub e2: Float,
    pub e3: Float,
    pub i2: Float,
    pub i3: Float,
    pub l2: Float,
    pub l3: Float,
    pub l4: Float,
    pub gh2: Float,
    pub gh3: Float,
    pub gh4: Float,
    pub h2: Float,
    pub h3: Float,
}

/// Orientation of the perturbing body orbit relative to the equator.
#[derive(Debug, Clone, Copy)]
struct BodyGeometry {
    zcosg: Float,
    zsing: Float,
    zcosi: Float,
    zsini: Float,
    zcosh: Float,
    zsinh: Float,
    cc: Float,
}

/// Satellite quantities the series depends on.
#[derive(Debug, Clone, Copy)]
struct SatelliteGeometry {
    sinim: Float,
    cosim: Float,
    sinomm: Float,
    cosomm: Float,
    em: Float,
    emsq: Float,
    betasq: Float,
    rtemsq: Float,
    xnoi: Float,
}

/// Everything computed by the common-terms stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CommonTerms {
    /// Inclination the terms were evaluated at
    pub inclm: Float,
    pub sinim: Float,
    pub cosim: Float,
    pub em: Float,
    pub emsq: Float,
    pub nm: Float,
    /// Solar pass
    pub solar: BodyTerms,
    /// Lunar pass
    pub lunar: BodyTerms,
    pub solar_coefficients: PeriodicCoefficients,
    pub lunar_coefficients: PeriodicCoefficients,
    /// Lunar mean anomaly at epoch
    pub zmol: Float,
    /// Solar mean anomaly at epoch
    pub zmos: Float,
}

fn body_terms(body: &BodyGeometry, sat: &SatelliteGeometry) -> BodyTerms {
    let BodyGeometry {
        zcosg,
        zsing,
        zcosi,
        zsini,
        zcosh,
        zsinh,
        cc,
    } = *body;
    let SatelliteGeometry {
        sinim,
        cosim,
        sinomm,
        cosomm,
        em,
        emsq,
        betasq,
        rtemsq,
        xnoi,
    } = *sat;

    let a1 = zcosg * zcosh + zsing * zcosi * zsinh;
    let a3 = -zsing * zcosh + zcosg * zcosi * zsinh;
    let a7 = -zcosg * zsinh + zsing * zcosi * zcosh;
    let a8 = zsing * zsini;
    let a9 = zsing * zsinh + zcosg * zcosi * zcosh;
    let a10 = zcosg * zsini;
    let a2 = cosim * a7 + sinim * a8;
    let a4 = cosim * a9 + sinim * a10;
    let a5 = -sinim * a7 + cosim * a8;
    let a6 = -sinim * a9 + cosim * a10;

    let x1 = a1 * cosomm + a2 * sinomm;
    let x2 = a3 * cosomm + a4 * sinomm;
    let x3 = -a1 * sinomm + a2 * cosomm;
    let x4 = -a3 * sinomm + a4 * cosomm;
    let x5 = a5 * sinomm;
    let x6 = a6 * sinomm;
    let x7 = a5 * cosomm;
    let x8 = a6 * cosomm;

    let z31 = 12.0 * x1 * x1 - 3.0 * x3 * x3;
    let z32 = 24.0 * x1 * x2 - 6.0 * x3 * x4;
    let z33 = 12.0 * x2 * x2 - 3.0 * x4 * x4;
    let mut z1 = 3.0 * (a1 * a1 + a2 * a2) + z31 * emsq;
    let mut z2 = 6.0 * (a1 * a3 + a2 * a4) + z32 * emsq;
    let mut z3 = 3.0 * (a3 * a3 + a4 * a4) + z33 * emsq;
    let z11 = -6.0 * a1 * a5 + emsq * (-24.0 * x1 * x7 - 6.0 * x3 * x5);
    let z12 = -6.0 * (a1 * a6 + a3 * a5)
        + emsq * (-24.0 * (x2 * x7 + x1 * x8) - 6.0 * (x3 * x6 + x4 * x5));
    let z13 = -6.0 * a3 * a6 + emsq * (-24.0 * x2 * x8 - 6.0 * x4 * x6);
    let z21 = 6.0 * a2 * a5 + emsq * (24.0 * x1 * x5 - 6.0 * x3 * x7);
    let z22 =
        6.0 * (a4 * a5 + a2 * a6) + emsq * (24.0 * (x2 * x5 + x1 * x6) - 6.0 * (x4 * x7 + x3 * x8));
    let z23 = 6.0 * a4 * a6 + emsq * (24.0 * x2 * x6 - 6.0 * x4 * x8);
    z1 = z1 + z1 + betasq * z31;
    z2 = z2 + z2 + betasq * z32;
    z3 = z3 + z3 + betasq * z33;

    let s3 = cc * xnoi;
    let s2 = -0.5 * s3 / rtemsq;
    let s4 = s3 * rtemsq;
    let s1 = -15.0 * em * s4;
    let s5 = x1 * x3 + x2 * x4;
    let s6 = x2 * x3 + x1 * x4;
    let s7 = x2 * x4 - x1 * x3;

    BodyTerms {
        s1,
        s2,
        s3,
        s4,
        s5,
        s6,
        s7,
        z1,
        z2,
        z3,
        z11,
        z12,
        z13,
        z21,
        z22,
        z23,
        z31,
        z32,
        z33,
    }
}

impl BodyTerms {
    /// Periodic amplitudes of this body, `ze` being its orbital eccentricity.
    fn coefficients(&self, emsq: Float, ze: Float) -> PeriodicCoefficients {
        PeriodicCoefficients {
            e2: 2.0 * self.s1 * self.s6,
            e3: 2.0 * self.s1 * self.s7,
            i2: 2.0 * self.s2 * self.z12,
            i3: 2.0 * self.s2 * (self.z13 - self.z11),
            l2: -2.0 * self.s3 * self.z2,
            l3: -2.0 * self.s3 * (self.z3 - self.z1),
            l4: -2.0 * self.s3 * (-21.0 - 9.0 * emsq) * ze,
            gh2: 2.0 * self.s4 * self.z32,
            gh3: 2.0 * self.s4 * (self.z33 - self.z31),
            gh4: -18.0 * self.s4 * ze,
            h2: -2.0 * self.s2 * self.z22,
            h3: -2.0 * self.s2 * (self.z23 - self.z21),
        }
    }
}

impl CommonTerms {
    /// Evaluate the lunar and solar series for a satellite state.
    ///
    /// Arguments
    /// ---------
    /// * `epoch`: element epoch, days since 1949 December 31 00:00 UT
    /// * `ep`, `argpp`, `inclp`, `nodep`, `np`: eccentricity, argument of perigee, inclination,
    ///   node and (un-Kozai'd) mean motion
    /// * `tc`: minutes since epoch the series is evaluated at
    pub fn compute(
        epoch: f64,
        ep: Float,
        argpp: Float,
        tc: Float,
        inclp: Float,
        nodep: Float,
        np: Float,
    ) -> CommonTerms {
        let nm = np;
        let em = ep;
        let snodm = nodep.sin();
        let cnodm = nodep.cos();
        let sinomm = argpp.sin();
        let cosomm = argpp.cos();
        let sinim = inclp.sin();
        let cosim = inclp.cos();
        let emsq = em * em;
        let betasq = 1.0 - emsq;
        let rtemsq = betasq.sqrt();

        // lunar node and argument of perigee at epoch
        let day = (epoch + 18261.5 + tc as f64 / 1440.0) as Float;
        let xnodce = (4.5236020 - 9.2422029e-4 * day) % DPI;
        let stem = xnodce.sin();
        let ctem = xnodce.cos();
        let zcosil = 0.91375164 - 0.03568096 * ctem;
        let zsinil = (1.0 - zcosil * zcosil).sqrt();
        let zsinhl = 0.089683511 * stem / zsinil;
        let zcoshl = (1.0 - zsinhl * zsinhl).sqrt();
        let gam = 5.8351514 + 0.0019443680 * day;
        let zx = 0.39785416 * stem / zsinil;
        let zy = zcoshl * ctem + 0.91744867 * zsinhl * stem;
        let zx = gam + zx.atan2(zy) - xnodce;
        let zcosgl = zx.cos();
        let zsingl = zx.sin();

        let sat = SatelliteGeometry {
            sinim,
            cosim,
            sinomm,
            cosomm,
            em,
            emsq,
            betasq,
            rtemsq,
            xnoi: 1.0 / nm,
        };

        let solar = body_terms(
            &BodyGeometry {
                zcosg: ZCOSGS,
                zsing: ZSINGS,
                zcosi: ZCOSIS,
                zsini: ZSINIS,
                zcosh: cnodm,
                zsinh: snodm,
                cc: C1SS,
            },
            &sat,
        );
        let lunar = body_terms(
            &BodyGeometry {
                zcosg: zcosgl,
                zsing: zsingl,
                zcosi: zcosil,
                zsini: zsinil,
                zcosh: zcoshl * cnodm + zsinhl * snodm,
                zsinh: snodm * zcoshl - cnodm * zsinhl,
                cc: C1L,
            },
            &sat,
        );

        CommonTerms {
            inclm: inclp,
            sinim,
            cosim,
            em,
            emsq,
            nm,
            solar_coefficients: solar.coefficients(emsq, ZES),
            lunar_coefficients: lunar.coefficients(emsq, ZEL),
            solar,
            lunar,
            zmol: (4.7199672 + 0.22997150 * day - gam) % DPI,
            zmos: (6.2565837 + 0.017201977 * day) % DPI,
        }
    }
}

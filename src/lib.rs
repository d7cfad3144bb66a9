pub mod autopoint_errors;
pub mod constants;
pub mod elements;
pub mod ephemeris;
pub mod gravity;
pub mod kepler;
pub mod osculating;
pub mod sgp4;
pub mod time;
pub mod tle;
pub mod vector;

#[cfg(test)]
pub(crate) mod unit_test_global {
    use std::sync::LazyLock;

    use crate::tle::TwoLineElement;

    /// Highly eccentric near-earth record (period about 133 minutes).
    pub(crate) static TLE_00005: LazyLock<TwoLineElement> = LazyLock::new(|| {
        TwoLineElement::parse(
            "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753",
            "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667",
        )
        .unwrap()
    });

    /// Molniya orbit, half-day resonance.
    pub(crate) static TLE_08195: LazyLock<TwoLineElement> = LazyLock::new(|| {
        TwoLineElement::parse(
            "1 08195U 75081A   06176.33215444  .00000099  00000-0  11873-3 0   813",
            "2 08195  64.1586 279.0717 6877146 264.7651  20.2257  2.00491383225656",
        )
        .unwrap()
    });

    /// Geostationary, synchronous resonance.
    pub(crate) static TLE_28626: LazyLock<TwoLineElement> = LazyLock::new(|| {
        TwoLineElement::parse(
            "1 28626U 05008A   06176.46683397 -.00000205  00000-0  10000-3 0  2190",
            "2 28626   0.0019 286.9433 0000335  13.7918  55.6504  1.00270176  4891",
        )
        .unwrap()
    });
}

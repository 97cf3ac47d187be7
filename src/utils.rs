//! Provides angle normalization.

/// Returns the azimuth normalized into 0.0 <= and < 360.0.
///
/// # Example
///
/// ```
/// # use sokuryo::utils::normalize_azimuth;
/// assert_eq!(normalize_azimuth(45.0), 45.0);
/// assert_eq!(normalize_azimuth(-90.0), 270.0);
/// assert_eq!(normalize_azimuth(360.0), 0.0);
/// assert_eq!(normalize_azimuth(725.0), 5.0);
/// assert!(normalize_azimuth(f64::NAN).is_nan());
/// ```
#[must_use]
pub fn normalize_azimuth(t: f64) -> f64 {
    if !t.is_finite() {
        return f64::NAN;
    }

    let res = t.rem_euclid(360.0);

    // rem_euclid rounds to 360.0 on tiny negative values
    if res.ge(&360.0) {
        0.0
    } else {
        res
    }
}

/// Returns the longitude normalized into -180.0 <= and <= 180.0.
///
/// # Example
///
/// ```
/// # use sokuryo::utils::normalize_longitude;
/// assert_eq!(normalize_longitude(145.0), 145.0);
/// assert_eq!(normalize_longitude(190.0), -170.0);
/// assert_eq!(normalize_longitude(-190.0), 170.0);
/// assert!(normalize_longitude(f64::NAN).is_nan());
/// ```
#[must_use]
pub fn normalize_longitude(t: f64) -> f64 {
    if !t.is_finite() {
        return f64::NAN;
    };

    let t = t % 360.0;
    let res = if t.lt(&-180.0) || t.gt(&180.0) {
        t - f64::copysign(360.0, t)
    } else {
        t
    };

    debug_assert!(res.ge(&-180.) && res.le(&180.));

    res
}

//! Provides the conversion between the plane rectangular coordinate and latitude and longitude.
//!
//! 平面直角座標と緯度経度の相互換算を提供します。
//!
//! The projection is the transverse Mercator projection on GRS80 (JGD2011)
//! by the Krüger series to the sixth order of the third flattening,
//! which is accurate to far less than a millimeter within a few hundred km
//! from the central meridian.
//!
//! We note that `x` is the northing and `y` is the easting
//! throughout the crate, following the surveying convention of Japan.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::zone::{InvalidZoneError, Zone};

/// The semi-major axis \[m\] of GRS80.
pub const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
/// The inverse flattening of GRS80.
pub const INVERSE_FLATTENING: f64 = 298.257222101;

const F: f64 = 1.0 / INVERSE_FLATTENING;
const N: f64 = F / (2.0 - F);
const N2: f64 = N * N;
const N3: f64 = N2 * N;
const N4: f64 = N3 * N;
const N5: f64 = N4 * N;
const N6: f64 = N5 * N;

/// The radius of the rectifying sphere.
const A_HAT: f64 =
    SEMI_MAJOR_AXIS / (1.0 + N) * (1.0 + N2 / 4.0 + N4 / 64.0 + N6 / 256.0);

/// The coefficients of conformal to rectifying.
const ALPHA: [f64; 6] = [
    N / 2.0 - 2.0 * N2 / 3.0 + 5.0 * N3 / 16.0 + 41.0 * N4 / 180.0 - 127.0 * N5 / 288.0
        + 7891.0 * N6 / 37800.0,
    13.0 * N2 / 48.0 - 3.0 * N3 / 5.0 + 557.0 * N4 / 1440.0 + 281.0 * N5 / 630.0
        - 1983433.0 * N6 / 1935360.0,
    61.0 * N3 / 240.0 - 103.0 * N4 / 140.0 + 15061.0 * N5 / 26880.0 + 167603.0 * N6 / 181440.0,
    49561.0 * N4 / 161280.0 - 179.0 * N5 / 168.0 + 6601661.0 * N6 / 7257600.0,
    34729.0 * N5 / 80640.0 - 3418889.0 * N6 / 1995840.0,
    212378941.0 * N6 / 319334400.0,
];

/// The coefficients of rectifying to conformal.
const BETA: [f64; 6] = [
    N / 2.0 - 2.0 * N2 / 3.0 + 37.0 * N3 / 96.0 - N4 / 360.0 - 81.0 * N5 / 512.0
        + 96199.0 * N6 / 604800.0,
    N2 / 48.0 + N3 / 15.0 - 437.0 * N4 / 1440.0 + 46.0 * N5 / 105.0
        - 1118711.0 * N6 / 3870720.0,
    17.0 * N3 / 480.0 - 37.0 * N4 / 840.0 - 209.0 * N5 / 4480.0 + 5569.0 * N6 / 90720.0,
    4397.0 * N4 / 161280.0 - 11.0 * N5 / 504.0 - 830251.0 * N6 / 7257600.0,
    4583.0 * N5 / 161280.0 - 108847.0 * N6 / 3991680.0,
    20648693.0 * N6 / 638668800.0,
];

const MAX_ITERATION: usize = 10;

/// Represents a plane rectangular coordinate \[m\].
///
/// # Example
///
/// ```
/// # use sokuryo::projection::Plane;
/// let plane = Plane::new(100.0, 200.0);
/// assert_eq!(plane.x, 100.0);
/// assert_eq!(plane.y, 200.0);
/// ```
#[derive(Debug, PartialEq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plane {
    /// The northing \[m\]
    pub x: f64,
    /// The easting \[m\]
    pub y: f64,
}

impl Plane {
    /// Makes a [`Plane`].
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Represents latitude and longitude \[deg\].
#[derive(Debug, PartialEq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Geographic {
    /// The latitude \[deg\]
    pub latitude: f64,
    /// The longitude \[deg\]
    pub longitude: f64,
}

impl Geographic {
    /// Makes a [`Geographic`].
    #[inline]
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Returns the latitude and longitude of the plane rectangular coordinate
/// of the zone `zone`.
///
/// `x` is the northing and `y` is the easting.
///
/// # Errors
///
/// If `zone` is not in 1..=19.
///
/// # Example
///
/// ```
/// # use sokuryo::projection::plane_to_geographic;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // the origin of the zone 9
/// let result = plane_to_geographic(0.0, 0.0, 9)?;
/// assert!((result.latitude - 36.0).abs() < 1e-12);
/// assert!((result.longitude - 139.83333333333334).abs() < 1e-12);
///
/// assert!(plane_to_geographic(0.0, 0.0, 20).is_err());
/// # Ok(())}
/// ```
#[inline]
pub fn plane_to_geographic(x: f64, y: f64, zone: u8) -> Result<Geographic, InvalidZoneError> {
    Ok(Zone::try_from_id(zone)?.to_geographic(x, y))
}

/// Returns the plane rectangular coordinate of the zone `zone`
/// of the latitude and longitude.
///
/// # Errors
///
/// If `zone` is not in 1..=19.
///
/// # Example
///
/// ```
/// # use sokuryo::projection::geographic_to_plane;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let result = geographic_to_plane(36.0, 139.83333333333334, 9)?;
/// assert!(result.x.abs() < 1e-6);
/// assert!(result.y.abs() < 1e-6);
///
/// // east of the origin
/// let result = geographic_to_plane(36.0, 139.84333333333334, 9)?;
/// assert!((result.y - 901.5).abs() < 0.5);
/// # Ok(())}
/// ```
#[inline]
pub fn geographic_to_plane(
    latitude: f64,
    longitude: f64,
    zone: u8,
) -> Result<Plane, InvalidZoneError> {
    Ok(Zone::try_from_id(zone)?.to_plane(latitude, longitude))
}

impl Zone {
    /// Returns the plane rectangular coordinate of the latitude and longitude \[deg\].
    #[must_use]
    pub fn to_plane(&self, latitude: f64, longitude: f64) -> Plane {
        let k = self.scale_factor() * A_HAT;

        let (xi, eta) = rectifying(
            latitude.to_radians(),
            (longitude - self.origin_longitude()).to_radians(),
        );
        let (xi0, _) = rectifying(self.origin_latitude().to_radians(), 0.0);

        Plane {
            x: k * (xi - xi0),
            y: k * eta,
        }
    }

    /// Returns the latitude and longitude \[deg\] of the plane rectangular coordinate.
    #[must_use]
    pub fn to_geographic(&self, x: f64, y: f64) -> Geographic {
        let k = self.scale_factor() * A_HAT;

        let (xi0, _) = rectifying(self.origin_latitude().to_radians(), 0.0);
        let xi = x / k + xi0;
        let eta = y / k;

        let (mut xi_, mut eta_) = (xi, eta);
        for (j, beta) in (1..).zip(BETA) {
            let j = 2.0 * j as f64;
            xi_ -= beta * (j * xi).sin() * (j * eta).cosh();
            eta_ -= beta * (j * xi).cos() * (j * eta).sinh();
        }

        let tau_ = xi_.sin() / eta_.sinh().hypot(xi_.cos());
        let lambda = eta_.sinh().atan2(xi_.cos());

        Geographic {
            latitude: isometric_inverse(tau_).atan().to_degrees(),
            longitude: self.origin_longitude() + lambda.to_degrees(),
        }
    }
}

/// Returns the first eccentricity.
#[inline]
fn eccentricity() -> f64 {
    (F * (2.0 - F)).sqrt()
}

/// Returns tan of the conformal latitude from tan of the latitude.
#[inline]
fn conformal(tau: f64, e: f64) -> f64 {
    let sigma = (e * (e * tau / tau.hypot(1.0)).atanh()).sinh();
    tau * sigma.hypot(1.0) - sigma * tau.hypot(1.0)
}

/// Returns tan of the latitude from tan of the conformal latitude, by Newton's method.
fn isometric_inverse(tau_: f64) -> f64 {
    let e = eccentricity();
    let e2m = 1.0 - e * e;

    let mut tau = tau_;
    for _ in 0..MAX_ITERATION {
        let tau_i = conformal(tau, e);
        let delta = (tau_ - tau_i) / tau_i.hypot(1.0) * (1.0 + e2m * tau * tau)
            / (e2m * tau.hypot(1.0));
        tau += delta;

        if delta.abs() <= f64::EPSILON * tau.abs().max(1.0) {
            break;
        }
    }
    tau
}

/// Returns the coordinate on the rectifying sphere, (ξ, η),
/// of the latitude and the longitude from the central meridian \[rad\].
fn rectifying(phi: f64, lambda: f64) -> (f64, f64) {
    let tau_ = conformal(phi.tan(), eccentricity());

    let xi_ = tau_.atan2(lambda.cos());
    let eta_ = (lambda.sin() / tau_.hypot(lambda.cos())).asinh();

    let (mut xi, mut eta) = (xi_, eta_);
    for (j, alpha) in (1..).zip(ALPHA) {
        let j = 2.0 * j as f64;
        xi += alpha * (j * xi_).sin() * (j * eta_).cosh();
        eta += alpha * (j * xi_).cos() * (j * eta_).sinh();
    }

    (xi, eta)
}

//! Provides the meridian convergence and the true-north azimuth, 子午線収差角と真北方向角.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dms::to_dms;
use crate::zone::{InvalidZoneError, Zone};

/// Returns the meridian convergence \[deg\] at the position in the zone `zone`.
///
/// This is the first-order approximation `γ = (λ − λ0) sin φ`,
/// adequate for the moderate distance from the central meridian
/// but not exact.
///
/// # Errors
///
/// If `zone` is not in 1..=19.
///
/// # Example
///
/// ```
/// # use sokuryo::north::meridian_convergence;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Tokyo station in the zone 9
/// let gamma = meridian_convergence(35.6812, 139.7671, 9)?;
/// assert!((gamma - -0.0387).abs() < 1e-4);
///
/// assert!(meridian_convergence(35.6812, 139.7671, 0).is_err());
/// # Ok(())}
/// ```
#[inline]
pub fn meridian_convergence(
    latitude: f64,
    longitude: f64,
    zone: u8,
) -> Result<f64, InvalidZoneError> {
    Ok(Zone::try_from_id(zone)?.meridian_convergence(latitude, longitude))
}

/// Returns the true-north azimuth \[deg\], `grid_azimuth + convergence`.
///
/// The result is not normalized,
/// see [`normalize_azimuth`](crate::utils::normalize_azimuth) for presentation.
///
/// # Example
///
/// ```
/// # use sokuryo::north::true_north_azimuth;
/// assert_eq!(true_north_azimuth(90.0, -0.5), 89.5);
/// assert_eq!(true_north_azimuth(359.9, 0.2), 360.09999999999997);
/// ```
#[inline]
#[must_use]
pub fn true_north_azimuth(grid_azimuth: f64, convergence: f64) -> f64 {
    grid_azimuth + convergence
}

impl Zone {
    /// Returns the meridian convergence \[deg\] at the position, see [`meridian_convergence`].
    #[inline]
    #[must_use]
    pub fn meridian_convergence(&self, latitude: f64, longitude: f64) -> f64 {
        let delta = (longitude - self.origin_longitude()).to_radians();
        (delta * latitude.to_radians().sin()).to_degrees()
    }
}

/// The true north of a position, in the decimal and the DMS notation.
///
/// # Example
///
/// ```
/// # use sokuryo::north::TrueNorth;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let north = TrueNorth::from_geographic(35.6812, 139.7671, 9, 45.0)?;
/// assert!((north.convergence - -0.0387).abs() < 1e-4);
/// assert!((north.azimuth - 44.9613).abs() < 1e-4);
/// assert_eq!(north.convergence_dms, "-0°02′19″");
/// assert_eq!(north.azimuth_dms, "44°57′41″");
/// # Ok(())}
/// ```
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrueNorth {
    /// The latitude \[deg\] of the position
    pub latitude: f64,
    /// The longitude \[deg\] of the position
    pub longitude: f64,
    /// The meridian convergence \[deg\]
    pub convergence: f64,
    /// The true-north azimuth \[deg\], unnormalized
    pub azimuth: f64,
    /// The meridian convergence in DMS notation
    pub convergence_dms: String,
    /// The true-north azimuth in DMS notation
    pub azimuth_dms: String,
}

impl TrueNorth {
    /// Makes a [`TrueNorth`] of the latitude and longitude
    /// from the grid azimuth `grid_azimuth` \[deg\].
    ///
    /// # Errors
    ///
    /// If `zone` is not in 1..=19.
    pub fn from_geographic(
        latitude: f64,
        longitude: f64,
        zone: u8,
        grid_azimuth: f64,
    ) -> Result<Self, InvalidZoneError> {
        let zone = Zone::try_from_id(zone)?;
        Ok(Self::new(zone, latitude, longitude, grid_azimuth))
    }

    /// Makes a [`TrueNorth`] of the plane rectangular coordinate
    /// from the grid azimuth `grid_azimuth` \[deg\].
    ///
    /// # Errors
    ///
    /// If `zone` is not in 1..=19.
    ///
    /// # Example
    ///
    /// ```
    /// # use sokuryo::north::TrueNorth;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// // on the central meridian, no convergence
    /// let north = TrueNorth::from_plane(1000.0, 0.0, 9, 30.0)?;
    /// assert!(north.convergence.abs() < 1e-12);
    /// assert_eq!(north.azimuth_dms, "30°00′00″");
    /// # Ok(())}
    /// ```
    pub fn from_plane(
        x: f64,
        y: f64,
        zone: u8,
        grid_azimuth: f64,
    ) -> Result<Self, InvalidZoneError> {
        let zone = Zone::try_from_id(zone)?;
        let geo = zone.to_geographic(x, y);
        Ok(Self::new(zone, geo.latitude, geo.longitude, grid_azimuth))
    }

    fn new(zone: &Zone, latitude: f64, longitude: f64, grid_azimuth: f64) -> Self {
        let convergence = zone.meridian_convergence(latitude, longitude);
        let azimuth = true_north_azimuth(grid_azimuth, convergence);

        Self {
            latitude,
            longitude,
            convergence,
            azimuth,
            convergence_dms: to_dms(convergence).unwrap_or_default(),
            azimuth_dms: to_dms(azimuth).unwrap_or_default(),
        }
    }
}

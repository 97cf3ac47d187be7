//! Provides the operations over points.
//!
//! Each operation processes the points independently and returns
//! the results in the input order;
//! a failure of a point does not stop the others.
//! An invalid zone fails the whole operation before any point.
//!
//! # Example
//!
//! ```
//! # use sokuryo::{batch, Point};
//! # fn main() -> sokuryo::Result<()> {
//! let points = [
//!     Point::new(11543.6883, 22916.2436, 0.0),
//!     Point::new(0.0, 0.0, 0.0),
//! ];
//!
//! let result = batch::to_geographic(&points, 9)?;
//! assert!((result[0].latitude.unwrap() - 36.10377479).abs() < 1e-8);
//! assert!((result[1].longitude.unwrap() - 139.83333333).abs() < 1e-8);
//! # Ok(())}
//! ```
use std::hash::BuildHasher;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::altitude::AltitudeCorrectionGrid;
use crate::error::{Error, Result};
use crate::helmert::HelmertParams;
use crate::point::Point;
use crate::zone::Zone;

/// A point and the altitude correction applied to it.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Corrected {
    /// The point of the corrected `z`
    pub point: Point,
    /// The correction \[m\] added to `z`
    pub correction: f64,
}

/// Returns the points of which latitude and longitude are filled from `x` and `y`.
///
/// # Errors
///
/// Returns [`Err`] if `zone` is invalid.
pub fn to_geographic(points: &[Point], zone: u8) -> Result<Vec<Point>> {
    let zone = Zone::try_from_id(zone)?;

    Ok(points
        .iter()
        .map(|p| {
            let geo = zone.to_geographic(p.x, p.y);
            p.with_geographic(geo.latitude, geo.longitude)
        })
        .collect())
}

/// Returns the points of which `x` and `y` are filled from latitude and longitude.
///
/// # Errors
///
/// Returns [`Err`] if `zone` is invalid.
/// A point without latitude or longitude results
/// [`MissingCoordinates`](crate::ErrorKind::MissingCoordinates).
///
/// # Example
///
/// ```
/// # use sokuryo::{batch, Point};
/// # fn main() -> sokuryo::Result<()> {
/// let points = [
///     Point::new(0.0, 0.0, 5.0).with_geographic(36.10377479, 140.087855041),
///     Point::new(0.0, 0.0, 5.0),
/// ];
///
/// let result = batch::to_plane(&points, 9)?;
/// let p = result[0].as_ref().unwrap();
/// assert!((p.x - 11543.6883).abs() < 1e-3);
/// assert!((p.y - 22916.2436).abs() < 1e-3);
/// assert_eq!(p.z, 5.0);
/// assert!(result[1].is_err());
/// # Ok(())}
/// ```
pub fn to_plane(points: &[Point], zone: u8) -> Result<Vec<Result<Point>>> {
    let zone = Zone::try_from_id(zone)?;

    Ok(points
        .iter()
        .map(|p| {
            let geo = p.try_geographic()?;
            let plane = zone.to_plane(geo.latitude, geo.longitude);
            Ok(Point {
                x: plane.x,
                y: plane.y,
                ..*p
            })
        })
        .collect())
}

/// Returns the points of which `z` is corrected by `grid`.
///
/// A point without latitude or longitude results
/// [`MissingCoordinates`](crate::ErrorKind::MissingCoordinates),
/// and one out of the coverage of `grid` results
/// [`OutOfCoverage`](crate::ErrorKind::OutOfCoverage).
///
/// # Example
///
/// ```
/// # use sokuryo::{batch, AltitudeCorrectionGridBuilder, Point};
/// let grid = AltitudeCorrectionGridBuilder::new()
///     .parameter(54401027, 0.1)
///     .build();
///
/// let points = [
///     Point::new(0.0, 0.0, 10.0).with_geographic(36.10000000, 140.08750000),
///     Point::new(0.0, 0.0, 10.0).with_geographic(35.0, 135.0),
/// ];
///
/// let result = batch::correct_altitude(&points, &grid);
/// let corrected = result[0].as_ref().unwrap();
/// assert!((corrected.point.z - 10.1).abs() < 1e-12);
/// assert!(result[1].is_err());
/// ```
pub fn correct_altitude<
    #[cfg(not(feature = "serde"))] S,
    #[cfg(feature = "serde")] S: Default,
>(
    points: &[Point],
    grid: &AltitudeCorrectionGrid<S>,
) -> Vec<Result<Corrected>>
where
    S: BuildHasher,
{
    points
        .iter()
        .map(|p| {
            let geo = p.try_geographic()?;
            let correction = grid
                .correction(geo.latitude, geo.longitude)
                .ok_or_else(|| Error::new_out_of_coverage(geo.latitude, geo.longitude))?;

            Ok(Corrected {
                point: Point {
                    z: p.z + correction,
                    ..*p
                },
                correction,
            })
        })
        .collect()
}

/// Returns the points of which `x` and `y` are transformed by `params`.
///
/// `z` stays, and latitude and longitude are cleared
/// since they no longer agree with `x` and `y`.
pub fn helmert_transform(points: &[Point], params: &HelmertParams) -> Vec<Point> {
    points
        .iter()
        .map(|p| {
            let plane = params.apply(p.x, p.y);
            Point::new(plane.x, plane.y, p.z)
        })
        .collect()
}

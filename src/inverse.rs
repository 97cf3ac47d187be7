//! Provides the inverse calculation between two points, 逆計算.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dms::to_dms;
use crate::point::Point;
use crate::utils::normalize_azimuth;

/// The result of the inverse calculation from a point to another.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Inverse {
    /// The horizontal distance \[m\]
    pub distance: f64,
    /// The azimuth \[deg\] from the x-axis (north) clockwise, 0.0 <= and < 360.0
    pub azimuth: f64,
    /// The difference of x \[m\]
    pub dx: f64,
    /// The difference of y \[m\]
    pub dy: f64,
    /// The difference of z \[m\]
    pub dz: f64,
}

impl Inverse {
    /// Returns the azimuth in DMS notation, [`None`] if it is not finite.
    ///
    /// # Example
    ///
    /// ```
    /// # use sokuryo::Point;
    /// # use sokuryo::inverse::inverse;
    /// let result = inverse(&Point::new(0.0, 0.0, 0.0), &Point::new(-1.0, -1.0, 0.0));
    /// assert_eq!(result.azimuth_dms(), Some("225°00′00″".to_string()));
    /// ```
    #[inline]
    #[must_use]
    pub fn azimuth_dms(&self) -> Option<String> {
        to_dms(self.azimuth)
    }
}

/// Returns the distance and the azimuth from `from` to `to`.
///
/// The distance is horizontal, `dz` is reported separately.
/// The azimuth is `atan2(dy, dx)`, measured from the x-axis (north),
/// and the same points give the azimuth 0.0.
///
/// # Example
///
/// ```
/// # use sokuryo::Point;
/// # use sokuryo::inverse::inverse;
/// let result = inverse(&Point::new(0.0, 0.0, 0.0), &Point::new(100.0, 100.0, 10.0));
/// assert!((result.distance - 141.4214).abs() < 1e-4);
/// assert!((result.azimuth - 45.0).abs() < 1e-12);
/// assert_eq!(result.dz, 10.0);
///
/// // degenerate
/// let p = Point::new(1.0, 2.0, 3.0);
/// let result = inverse(&p, &p);
/// assert_eq!(result.distance, 0.0);
/// assert_eq!(result.azimuth, 0.0);
/// ```
#[must_use]
pub fn inverse(from: &Point, to: &Point) -> Inverse {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let dz = to.z - from.z;

    Inverse {
        distance: dx.hypot(dy),
        azimuth: normalize_azimuth(dy.atan2(dx).to_degrees()),
        dx,
        dy,
        dz,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_azimuth() {
        let origin = Point::new(0.0, 0.0, 0.0);
        let cases = [
            ((1.0, 0.0), 0.0),
            ((1.0, 1.0), 45.0),
            ((0.0, 1.0), 90.0),
            ((-1.0, 1.0), 135.0),
            ((-1.0, 0.0), 180.0),
            ((-1.0, -1.0), 225.0),
            ((0.0, -1.0), 270.0),
            ((1.0, -1.0), 315.0),
        ];

        for ((x, y), e) in cases {
            let result = inverse(&origin, &Point::new(x, y, 0.0));
            assert!((result.azimuth - e).abs() < 1e-12, "{x} {y}");
            assert!((0.0..360.0).contains(&result.azimuth));
        }
    }

    #[test]
    fn test_tokyo() {
        let result = inverse(&Point::new(0.0, 0.0, 0.0), &Point::new(100.0, 100.0, 10.0));
        assert!((result.distance - 141.42135623730951).abs() < 1e-9);
        assert!((result.azimuth - 45.0).abs() < 1e-12);
        assert_eq!((result.dx, result.dy, result.dz), (100.0, 100.0, 10.0));
        assert_eq!(result.azimuth_dms(), Some("45°00′00″".to_string()));
    }

    #[test]
    fn test_symmetry() {
        let cases = [
            (Point::new(0.0, 0.0, 0.0), Point::new(100.0, 100.0, 10.0)),
            (Point::new(-1234.5, 678.9, 1.0), Point::new(42.0, -0.001, 2.0)),
            (Point::new(10.0, 10.0, 0.0), Point::new(10.0, 20.0, 0.0)),
            (Point::new(-5.0, 3.0, 0.0), Point::new(-5.0001, 3.0, 0.0)),
        ];

        for (p1, p2) in cases {
            let a = inverse(&p1, &p2);
            let b = inverse(&p2, &p1);

            assert_eq!(a.distance, b.distance);
            assert_eq!(a.dz, -b.dz);

            let diff = normalize_azimuth(a.azimuth - b.azimuth);
            assert!((diff - 180.0).abs() < 1e-9, "{p1:?} {p2:?}");
        }
    }

    #[test]
    fn test_ignore_z() {
        let result = inverse(&Point::new(0.0, 0.0, 0.0), &Point::new(3.0, 4.0, 100.0));
        assert_eq!(result.distance, 5.0);
    }
}

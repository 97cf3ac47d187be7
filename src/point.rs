#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::projection::{Geographic, Plane};
use crate::{Error, Result};

/// Represents a survey point,
/// the plane rectangular coordinate and the elevation,
/// with optional latitude and longitude.
///
/// The point is a value, the identity and the storage are the caller's.
///
/// # Example
///
/// ```
/// # use sokuryo::*;
/// # use sokuryo::projection::Geographic;
/// // Construct
/// let point = Point::new(100.0, 200.0, 5.0);
/// assert_eq!(point.x, 100.0);
/// assert_eq!(point.y, 200.0);
/// assert_eq!(point.z, 5.0);
/// assert_eq!(point.geographic(), None);
///
/// // with latitude and longitude
/// let point = point.with_geographic(36.0, 140.0);
/// assert_eq!(point.geographic(), Some(Geographic::new(36.0, 140.0)));
/// ```
#[derive(Debug, PartialEq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// The northing \[m\]
    pub x: f64,
    /// The easting \[m\]
    pub y: f64,
    /// The elevation \[m\]
    pub z: f64,
    /// The latitude \[deg\]
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub latitude: Option<f64>,
    /// The longitude \[deg\]
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub longitude: Option<f64>,
}

impl From<(f64, f64)> for Point {
    /// see [`Point::new()`], defaulting 0.0 for `z`
    fn from(rhs: (f64, f64)) -> Self {
        Self::new(rhs.0, rhs.1, 0.0)
    }
}

impl From<(f64, f64, f64)> for Point {
    /// see [`Point::new()`]
    fn from(rhs: (f64, f64, f64)) -> Self {
        Self::new(rhs.0, rhs.1, rhs.2)
    }
}

impl From<Plane> for Point {
    /// see [`Point::new()`], defaulting 0.0 for `z`
    fn from(rhs: Plane) -> Self {
        Self::new(rhs.x, rhs.y, 0.0)
    }
}

impl Point {
    /// Makes a [`Point`] without latitude and longitude.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            latitude: None,
            longitude: None,
        }
    }

    /// Returns `self` with the latitude and longitude \[deg\].
    #[inline]
    #[must_use]
    pub const fn with_geographic(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Returns the plane rectangular coordinate of `self`.
    #[inline]
    #[must_use]
    pub const fn plane(&self) -> Plane {
        Plane::new(self.x, self.y)
    }

    /// Returns the latitude and longitude of `self`,
    /// [`None`] unless both exist.
    #[inline]
    #[must_use]
    pub const fn geographic(&self) -> Option<Geographic> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Geographic::new(latitude, longitude)),
            _ => None,
        }
    }

    /// Returns the latitude and longitude of `self`.
    ///
    /// # Errors
    ///
    /// If either of them does not exist.
    #[inline]
    pub fn try_geographic(&self) -> Result<Geographic> {
        self.geographic()
            .ok_or_else(Error::new_missing_coordinates)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_geographic() {
        let point = Point::new(1.0, 2.0, 3.0);
        assert_eq!(point.geographic(), None);
        assert!(matches!(
            point.try_geographic().unwrap_err().kind(),
            ErrorKind::MissingCoordinates
        ));

        let point = Point {
            latitude: Some(36.0),
            ..point
        };
        assert_eq!(point.geographic(), None);

        let point = point.with_geographic(35.0, 139.0);
        assert_eq!(point.geographic(), Some(Geographic::new(35.0, 139.0)));
        assert_eq!(point.try_geographic().unwrap(), Geographic::new(35.0, 139.0));
        assert_eq!(point.plane(), Plane::new(1.0, 2.0));
    }

    #[test]
    fn test_from() {
        assert_eq!(Point::from((1.0, 2.0)), Point::new(1.0, 2.0, 0.0));
        assert_eq!(Point::from((1.0, 2.0, 3.0)), Point::new(1.0, 2.0, 3.0));
        assert_eq!(Point::from(Plane::new(1.0, 2.0)), Point::new(1.0, 2.0, 0.0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        use serde_test::{assert_de_tokens, assert_tokens, Token};

        assert_tokens(
            &Point::new(1.0, 2.0, 3.0),
            &[
                Token::Struct {
                    name: "Point",
                    len: 3,
                },
                Token::Str("x"),
                Token::F64(1.0),
                Token::Str("y"),
                Token::F64(2.0),
                Token::Str("z"),
                Token::F64(3.0),
                Token::StructEnd,
            ],
        );

        assert_de_tokens(
            &Point::new(1.0, 2.0, 3.0).with_geographic(36.0, 140.0),
            &[
                Token::Struct {
                    name: "Point",
                    len: 5,
                },
                Token::Str("x"),
                Token::F64(1.0),
                Token::Str("y"),
                Token::F64(2.0),
                Token::Str("z"),
                Token::F64(3.0),
                Token::Str("latitude"),
                Token::Some,
                Token::F64(36.0),
                Token::Str("longitude"),
                Token::Some,
                Token::F64(140.0),
                Token::StructEnd,
            ],
        );
    }
}

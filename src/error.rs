//! Provides the crate-level error.
use std::fmt::{Display, Formatter};

use crate::dms::ParseDMSError;
use crate::geoid::GeoidError;
use crate::par::ParseParError;
use crate::zone::InvalidZoneError;

/// Alias for a `Result<T, sokuryo::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents all possible errors that can occur by this crate.
///
/// Each module has its own error, and this wraps any of them,
/// so `?` works across the modules.
/// This is also the error of a single item of the batch operations.
///
/// # Example
///
/// ```
/// # use sokuryo::{Error, ErrorKind, projection};
/// fn convert(zone: u8) -> sokuryo::Result<f64> {
///     let plane = projection::geographic_to_plane(36.0, 140.0, zone)?;
///     Ok(plane.y)
/// }
///
/// let err = convert(20).unwrap_err();
/// assert!(matches!(err.kind(), ErrorKind::InvalidZone(_)));
/// assert_eq!(err.to_string(), "invalid zone: 20, must satisfy 1 <= and <= 19");
/// ```
#[derive(Debug)]
pub struct Error {
    err: Box<ErrorKind>,
}

/// An error kind of [`Error`].
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    /// The zone number is not in 1..=19.
    InvalidZone(InvalidZoneError),
    /// The point has no latitude or longitude.
    MissingCoordinates,
    /// The position is out of the coverage of the altitude correction grid.
    OutOfCoverage {
        /// The latitude \[deg\] of the query
        latitude: f64,
        /// The longitude \[deg\] of the query
        longitude: f64,
    },
    /// The geoid height service failed.
    Geoid(GeoidError),
    /// Invalid par-formatted text.
    ParsePar(ParseParError),
    /// Invalid DMS text.
    ParseDMS(ParseDMSError),
}

impl Error {
    /// Returns the error kind.
    pub fn kind(&self) -> &ErrorKind {
        &self.err
    }

    #[cold]
    pub(crate) fn new_missing_coordinates() -> Self {
        Self {
            err: Box::new(ErrorKind::MissingCoordinates),
        }
    }

    #[cold]
    pub(crate) fn new_out_of_coverage(latitude: f64, longitude: f64) -> Self {
        Self {
            err: Box::new(ErrorKind::OutOfCoverage {
                latitude,
                longitude,
            }),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::InvalidZone(e) => Some(e),
            ErrorKind::Geoid(e) => Some(e),
            ErrorKind::ParsePar(e) => Some(e),
            ErrorKind::ParseDMS(e) => Some(e),
            ErrorKind::MissingCoordinates | ErrorKind::OutOfCoverage { .. } => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.kind() {
            ErrorKind::InvalidZone(e) => Display::fmt(e, f),
            ErrorKind::MissingCoordinates => f.write_str("latitude and/or longitude not found"),
            ErrorKind::OutOfCoverage {
                latitude,
                longitude,
            } => write!(
                f,
                "no correction found around latitude: {latitude}, longitude: {longitude}"
            ),
            ErrorKind::Geoid(e) => Display::fmt(e, f),
            ErrorKind::ParsePar(e) => Display::fmt(e, f),
            ErrorKind::ParseDMS(e) => Display::fmt(e, f),
        }
    }
}

impl From<InvalidZoneError> for Error {
    #[cold]
    fn from(value: InvalidZoneError) -> Self {
        Self {
            err: Box::new(ErrorKind::InvalidZone(value)),
        }
    }
}

impl From<GeoidError> for Error {
    #[cold]
    fn from(value: GeoidError) -> Self {
        Self {
            err: Box::new(ErrorKind::Geoid(value)),
        }
    }
}

impl From<ParseParError> for Error {
    #[cold]
    fn from(value: ParseParError) -> Self {
        Self {
            err: Box::new(ErrorKind::ParsePar(value)),
        }
    }
}

impl From<ParseDMSError> for Error {
    #[cold]
    fn from(value: ParseDMSError) -> Self {
        Self {
            err: Box::new(ErrorKind::ParseDMS(value)),
        }
    }
}

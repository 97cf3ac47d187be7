//! Provides the third-order (1 km) mesh of the Japanese standard grid square.
//!
//! 標準地域メッシュ（3次メッシュ）を提供します。
//!
//! A node of the mesh is addressed by a pair of integer indices,
//! the latitude index `floor(lat × 120)` (30″ spacing)
//! and the longitude index `floor((lon − 100) × 80)` (45″ spacing),
//! and is named by an 8-digit meshcode packed from them.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An index within this distance of an integer lies on the grid line.
const SNAP: f64 = 1e-9;

/// Represents one axis of a mesh node, the digits of an index.
///
/// The index is `first × 80 + second × 10 + third`.
///
/// # Example
///
/// ```
/// # use sokuryo::mesh::MeshCoord;
/// # fn wrapper() -> Option<()> {
/// let coord = MeshCoord::new(54, 1, 2)?;
/// assert_eq!(coord.to_index(), 4332);
/// assert_eq!(MeshCoord::from_index(4332)?, coord);
///
/// // out-of-range digit
/// assert_eq!(MeshCoord::new(54, 8, 2), None);
/// # Some(())}
/// # fn main() {wrapper().unwrap()}
/// ```
#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshCoord {
    /// takes 0 to 99 inclusive
    first: u8,
    /// takes 0 to 7 inclusive
    second: u8,
    /// takes 0 to 9 inclusive
    third: u8,
}

impl MeshCoord {
    /// Makes a [`MeshCoord`], [`None`] if a digit is out-of-range.
    #[inline]
    #[must_use]
    pub const fn new(first: u8, second: u8, third: u8) -> Option<Self> {
        if first > 99 || second > 7 || third > 9 {
            return None;
        }

        Some(Self {
            first,
            second,
            third,
        })
    }

    /// Makes a [`MeshCoord`] from an index, [`None`] if the first digit exceeds 99.
    #[inline]
    #[must_use]
    pub const fn from_index(index: u32) -> Option<Self> {
        let first = index / 80;
        if first > 99 {
            return None;
        }

        let rest = index % 80;
        Some(Self {
            first: first as u8,
            second: (rest / 10) as u8,
            third: (rest % 10) as u8,
        })
    }

    /// Returns the index.
    #[inline]
    #[must_use]
    pub const fn to_index(&self) -> u32 {
        self.first as u32 * 80 + self.second as u32 * 10 + self.third as u32
    }

    /// Returns the next coord to the north (or the east).
    #[inline]
    #[must_use]
    pub const fn next_up(&self) -> Option<Self> {
        Self::from_index(self.to_index() + 1)
    }

    /// Returns the first digit, the 1st-order mesh.
    #[inline]
    #[must_use]
    pub const fn first(&self) -> &u8 {
        &self.first
    }

    /// Returns the second digit, the 2nd-order mesh.
    #[inline]
    #[must_use]
    pub const fn second(&self) -> &u8 {
        &self.second
    }

    /// Returns the third digit, the 3rd-order mesh.
    #[inline]
    #[must_use]
    pub const fn third(&self) -> &u8 {
        &self.third
    }
}

/// Represents a mesh node, a pair of [`MeshCoord`]s.
///
/// We note that this supports non-negative latitude and longitude of 100° or more only.
///
/// # Example
///
/// ```
/// # use sokuryo::mesh::*;
/// # fn wrapper() -> Option<()> {
/// // Construct from latitude and longitude
/// let node = MeshNode::from_position(36.10377479, 140.087855041)?;
/// assert_eq!(node.to_meshcode(), 54401027);
///
/// // Construct from meshcode
/// let node = MeshNode::from_meshcode(54401027)?;
/// // The position where the MeshNode locates
/// let (latitude, longitude) = node.to_position();
/// assert!((latitude - 36.1).abs() < 1e-12);
/// assert!((longitude - 140.0875).abs() < 1e-12);
/// # Some(())}
/// # fn main() {wrapper().unwrap()}
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshNode {
    latitude: MeshCoord,
    longitude: MeshCoord,
}

impl MeshNode {
    /// Makes a [`MeshNode`].
    #[inline]
    #[must_use]
    pub const fn new(latitude: MeshCoord, longitude: MeshCoord) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Makes a [`MeshNode`] from the latitude and longitude index.
    #[inline]
    #[must_use]
    pub const fn from_index(latitude: u32, longitude: u32) -> Option<Self> {
        match (
            MeshCoord::from_index(latitude),
            MeshCoord::from_index(longitude),
        ) {
            (Some(latitude), Some(longitude)) => Some(Self::new(latitude, longitude)),
            _ => None,
        }
    }

    /// Makes the greatest [`MeshNode`] south-west of the position.
    ///
    /// Returns [`None`] if the position is out of the mesh,
    /// that is, a negative latitude, a longitude less than 100° or too far.
    #[must_use]
    pub fn from_position(latitude: f64, longitude: f64) -> Option<Self> {
        let (latitude, _) = split_index(latitude * 120.0)?;
        let (longitude, _) = split_index((longitude - 100.0) * 80.0)?;
        Self::from_index(latitude, longitude)
    }

    /// Makes a [`MeshNode`] from an 8-digit meshcode.
    ///
    /// # Errors
    ///
    /// Returns [`None`] if `code` has more than 8 digits, or a digit is out-of-range.
    ///
    /// # Example
    ///
    /// ```
    /// # use sokuryo::mesh::*;
    /// assert!(MeshNode::from_meshcode(54401027).is_some());
    /// // the 2nd-order digit must be less than 8
    /// assert!(MeshNode::from_meshcode(54408027).is_none());
    /// assert!(MeshNode::from_meshcode(100000000).is_none());
    /// ```
    #[must_use]
    pub const fn from_meshcode(code: u32) -> Option<Self> {
        if code > 99_999_999 {
            return None;
        }

        let lat_first = (code / 1_000_000) as u8;
        let lng_first = (code / 10_000 % 100) as u8;
        let lat_second = (code / 1_000 % 10) as u8;
        let lng_second = (code / 100 % 10) as u8;
        let lat_third = (code / 10 % 10) as u8;
        let lng_third = (code % 10) as u8;

        match (
            MeshCoord::new(lat_first, lat_second, lat_third),
            MeshCoord::new(lng_first, lng_second, lng_third),
        ) {
            (Some(latitude), Some(longitude)) => Some(Self::new(latitude, longitude)),
            _ => None,
        }
    }

    /// Returns the meshcode.
    #[inline]
    #[must_use]
    pub const fn to_meshcode(&self) -> u32 {
        (self.latitude.first as u32 * 100 + self.longitude.first as u32) * 10_000
            + (self.latitude.second as u32 * 10 + self.longitude.second as u32) * 100
            + (self.latitude.third as u32 * 10 + self.longitude.third as u32)
    }

    /// Returns the latitude and longitude \[deg\] of the node.
    #[inline]
    #[must_use]
    pub fn to_position(&self) -> (f64, f64) {
        (
            self.latitude.to_index() as f64 / 120.0,
            100.0 + self.longitude.to_index() as f64 / 80.0,
        )
    }

    /// Returns the [`MeshCoord`] of latitude.
    #[inline]
    #[must_use]
    pub const fn latitude(&self) -> &MeshCoord {
        &self.latitude
    }

    /// Returns the [`MeshCoord`] of longitude.
    #[inline]
    #[must_use]
    pub const fn longitude(&self) -> &MeshCoord {
        &self.longitude
    }
}

/// Represents a mesh cell, four [`MeshNode`]s surrounding a position,
/// with the position within the cell.
///
/// # Example
///
/// ```
/// # use sokuryo::mesh::*;
/// # fn wrapper() -> Option<()> {
/// let cell = MeshCell::from_position(36.10377479, 140.087855041)?;
/// assert_eq!(cell.sw().to_meshcode(), 54401027);
/// assert_eq!(cell.se().to_meshcode(), 54401028);
/// assert_eq!(cell.nw().to_meshcode(), 54401037);
/// assert_eq!(cell.ne().to_meshcode(), 54401038);
///
/// // The position within the cell, from 0.0 to 1.0
/// let (latitude, longitude) = cell.position();
/// assert!((latitude - 0.4529748).abs() < 1e-6);
/// assert!((longitude - 0.0284033).abs() < 1e-6);
/// # Some(())}
/// # fn main() {wrapper().unwrap()}
/// ```
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshCell {
    sw: MeshNode,
    se: MeshNode,
    nw: MeshNode,
    ne: MeshNode,
    /// The fractions of latitude and longitude in the cell
    position: (f64, f64),
}

impl MeshCell {
    /// Makes the [`MeshCell`] which contains the position.
    ///
    /// A position on a grid line (within 1e-9 of the index) belongs to
    /// the cell whose south (or west) edge is the line,
    /// and its fraction is exactly 0.0.
    ///
    /// Returns [`None`] if the position is out of the mesh.
    #[must_use]
    pub fn from_position(latitude: f64, longitude: f64) -> Option<Self> {
        let (lat_index, lat_fraction) = split_index(latitude * 120.0)?;
        let (lng_index, lng_fraction) = split_index((longitude - 100.0) * 80.0)?;

        let south = MeshCoord::from_index(lat_index)?;
        let west = MeshCoord::from_index(lng_index)?;
        let north = south.next_up()?;
        let east = west.next_up()?;

        Some(Self {
            sw: MeshNode::new(south, west),
            se: MeshNode::new(south, east),
            nw: MeshNode::new(north, west),
            ne: MeshNode::new(north, east),
            position: (lat_fraction, lng_fraction),
        })
    }

    /// Returns the south-west node of the cell.
    #[inline]
    #[must_use]
    pub const fn sw(&self) -> &MeshNode {
        &self.sw
    }

    /// Returns the south-east node of the cell.
    #[inline]
    #[must_use]
    pub const fn se(&self) -> &MeshNode {
        &self.se
    }

    /// Returns the north-west node of the cell.
    #[inline]
    #[must_use]
    pub const fn nw(&self) -> &MeshNode {
        &self.nw
    }

    /// Returns the north-east node of the cell.
    #[inline]
    #[must_use]
    pub const fn ne(&self) -> &MeshNode {
        &self.ne
    }

    /// Returns the position within the cell, `(latitude, longitude)`,
    /// each in 0.0 <= and < 1.0.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> (f64, f64) {
        self.position
    }
}

/// Splits an exact index into the integer index and the fraction.
fn split_index(exact: f64) -> Option<(u32, f64)> {
    if !exact.is_finite() {
        return None;
    }

    let nearest = exact.round();
    let (index, fraction) = if (exact - nearest).abs() < SNAP {
        (nearest, 0.0)
    } else {
        let floor = exact.floor();
        (floor, exact - floor)
    };

    if index.lt(&0.0) || index.gt(&(u32::MAX as f64)) {
        return None;
    }

    Some((index as u32, fraction))
}

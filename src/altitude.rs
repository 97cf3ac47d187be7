//! Provides the altitude correction grid, 標高補正パラメータ.
use std::collections::HashMap;
use std::hash::{BuildHasher, RandomState};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::internal::mul_add;
use crate::mesh::MeshCell;
use crate::par::{Format, ParseParError};

/// The altitude correction \[m\] keyed by third-order meshcode.
///
/// The correction at an arbitrary position is the bilinear interpolation
/// of the four nodes surrounding it, see [`AltitudeCorrectionGrid::correction`].
///
/// # Example
///
/// ```
/// # use sokuryo::AltitudeCorrectionGridBuilder;
/// # fn wrapper() -> Option<()> {
/// let grid = AltitudeCorrectionGridBuilder::new()
///     .parameters([
///         (54401027, 0.1),
///         (54401028, 0.2),
///         (54401037, 0.3),
///         (54401038, 0.4),
///     ])
///     .build();
///
/// // on the south-west node
/// assert_eq!(grid.correction(36.1, 140.0875)?, 0.1);
/// // the center of the cell
/// let value = grid.correction(36.1 + 1. / 240., 140.0875 + 1. / 160.)?;
/// assert!((value - 0.25).abs() < 1e-12);
///
/// // out of the coverage
/// assert_eq!(grid.correction(35.0, 135.0), None);
/// # Some(())}
/// # fn main() {wrapper().unwrap()}
/// ```
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AltitudeCorrectionGrid<
    #[cfg(not(feature = "serde"))] S = RandomState,
    #[cfg(feature = "serde")] S: Default = RandomState,
> {
    /// The correction \[m\], the key is meshcode.
    #[cfg_attr(
        feature = "serde",
        serde(bound(
            serialize = "HashMap<u32, f64, S>: Serialize",
            deserialize = "HashMap<u32, f64, S>: Deserialize<'de>"
        ))
    )]
    pub parameter: HashMap<u32, f64, S>,
    /// The description, or the header of par-formatted data.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
}

impl<#[cfg(not(feature = "serde"))] S, #[cfg(feature = "serde")] S: Default>
    AltitudeCorrectionGrid<S>
{
    /// Makes an [`AltitudeCorrectionGrid`].
    ///
    /// We note that we provide a builder, see [`AltitudeCorrectionGridBuilder`].
    #[inline]
    pub const fn new(parameter: HashMap<u32, f64, S>) -> Self {
        Self {
            parameter,
            description: None,
        }
    }

    /// Makes an [`AltitudeCorrectionGrid`] with [`description`](AltitudeCorrectionGrid::description).
    #[inline]
    pub const fn with_description(parameter: HashMap<u32, f64, S>, description: String) -> Self {
        Self {
            parameter,
            description: Some(description),
        }
    }

    /// Returns the number of the nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.parameter.len()
    }

    /// Returns `true` if the grid has no node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parameter.is_empty()
    }
}

impl AltitudeCorrectionGrid<RandomState> {
    /// Deserialize par-formatted [`&str`] into an [`AltitudeCorrectionGrid`].
    ///
    /// See [`par::from_str`](crate::par::from_str).
    #[inline]
    pub fn from_str(s: &str, format: Format) -> Result<Self, ParseParError> {
        crate::par::from_str(s, format)
    }
}

impl<#[cfg(not(feature = "serde"))] S, #[cfg(feature = "serde")] S: Default>
    AltitudeCorrectionGrid<S>
where
    S: BuildHasher,
{
    /// Returns the correction \[m\] of the node `meshcode`.
    #[inline]
    pub fn get(&self, meshcode: &u32) -> Option<&f64> {
        self.parameter.get(meshcode)
    }

    /// Returns the correction \[m\] at the position by the bilinear interpolation.
    ///
    /// A node missing in the grid counts as 0.0,
    /// this covers the cells on the boundary of the coverage, e.g. coastlines.
    ///
    /// # Errors
    ///
    /// Returns [`None`] when none of the four nodes surrounding the position
    /// is in the grid (out of the coverage),
    /// or the position is out of the mesh.
    ///
    /// # Example
    ///
    /// ```
    /// # use sokuryo::AltitudeCorrectionGridBuilder;
    /// # fn wrapper() -> Option<()> {
    /// let grid = AltitudeCorrectionGridBuilder::new()
    ///     .parameters([(54401027, 1.0)])
    ///     .build();
    ///
    /// // the other nodes are missing, they count as 0.0
    /// let value = grid.correction(36.1 + 1. / 240., 140.0875)?;
    /// assert!((value - 0.5).abs() < 1e-12);
    /// # Some(())}
    /// # fn main() {wrapper().unwrap()}
    /// ```
    pub fn correction(&self, latitude: f64, longitude: f64) -> Option<f64> {
        let cell = MeshCell::from_position(latitude, longitude)?;

        let sw = self.get(&cell.sw().to_meshcode());
        let se = self.get(&cell.se().to_meshcode());
        let nw = self.get(&cell.nw().to_meshcode());
        let ne = self.get(&cell.ne().to_meshcode());

        if sw.is_none() && se.is_none() && nw.is_none() && ne.is_none() {
            return None;
        }

        let sw = sw.copied().unwrap_or(0.0);
        let se = se.copied().unwrap_or(0.0);
        let nw = nw.copied().unwrap_or(0.0);
        let ne = ne.copied().unwrap_or(0.0);

        let (y, x) = cell.position();

        // along longitude first, then along latitude
        let south = mul_add!(se - sw, x, sw);
        let north = mul_add!(ne - nw, x, nw);
        Some(mul_add!(north - south, y, south))
    }
}

impl<#[cfg(not(feature = "serde"))] S, #[cfg(feature = "serde")] S: Default> PartialEq
    for AltitudeCorrectionGrid<S>
where
    S: BuildHasher,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.description.eq(&other.description) && self.parameter.eq(&other.parameter)
    }
}

impl<#[cfg(not(feature = "serde"))] S, #[cfg(feature = "serde")] S: Default> Clone
    for AltitudeCorrectionGrid<S>
where
    S: Clone,
{
    #[inline]
    fn clone(&self) -> Self {
        Self {
            parameter: self.parameter.clone(),
            description: self.description.clone(),
        }
    }
}

impl FromIterator<(u32, f64)> for AltitudeCorrectionGrid<RandomState> {
    fn from_iter<T: IntoIterator<Item = (u32, f64)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// The builder of [`AltitudeCorrectionGrid`].
///
/// # Example
///
/// ```
/// # use std::collections::HashMap;
/// # use sokuryo::*;
/// #
/// let grid: AltitudeCorrectionGrid = AltitudeCorrectionGridBuilder::new()
///     .parameters([(54401027, 0.1), (54401028, 0.2)])
///     .description("My parameter".to_string())
///     .build();
///
/// assert_eq!(
///     grid.parameter,
///     HashMap::from([(54401027, 0.1), (54401028, 0.2)])
/// );
/// assert_eq!(grid.description, Some("My parameter".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct AltitudeCorrectionGridBuilder<
    #[cfg(not(feature = "serde"))] S = RandomState,
    #[cfg(feature = "serde")] S: Default = RandomState,
> {
    parameter: HashMap<u32, f64, S>,
    description: Option<String>,
}

impl AltitudeCorrectionGridBuilder<RandomState> {
    /// Makes an [`AltitudeCorrectionGridBuilder`].
    #[inline]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<#[cfg(not(feature = "serde"))] S, #[cfg(feature = "serde")] S: Default>
    AltitudeCorrectionGridBuilder<S>
{
    /// Makes an [`AltitudeCorrectionGridBuilder`] which uses the given hash builder to hash meshcode.
    ///
    /// See [`HashMap::with_hasher`] for detail.
    #[inline]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            parameter: HashMap::with_hasher(hash_builder),
            description: None,
        }
    }

    /// Updates [`description`](AltitudeCorrectionGrid::description).
    #[inline]
    pub fn description(mut self, s: String) -> Self {
        self.description = Some(s);
        self
    }

    /// Builds [`AltitudeCorrectionGrid`].
    #[inline]
    pub fn build(self) -> AltitudeCorrectionGrid<S> {
        AltitudeCorrectionGrid {
            parameter: self.parameter,
            description: self.description,
        }
    }
}

impl<#[cfg(not(feature = "serde"))] S, #[cfg(feature = "serde")] S: Default>
    AltitudeCorrectionGridBuilder<S>
where
    S: BuildHasher,
{
    /// Adds a correction \[m\] of the node `meshcode`.
    ///
    /// This replaces the correction if `meshcode` already exists.
    #[inline]
    pub fn parameter(mut self, meshcode: u32, value: f64) -> Self {
        self.parameter.insert(meshcode, value);
        self
    }

    /// Adds corrections.
    ///
    /// This replaces the correction if the meshcode already exists.
    #[inline]
    pub fn parameters(mut self, iter: impl IntoIterator<Item = (u32, f64)>) -> Self {
        self.parameter.extend(iter);
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mesh::MeshNode;

    fn grid() -> AltitudeCorrectionGrid {
        AltitudeCorrectionGridBuilder::new()
            .parameters([
                (54401027, 0.1),
                (54401028, 0.2),
                (54401037, 0.3),
                (54401038, 0.4),
            ])
            .build()
    }

    #[test]
    fn test_corner() {
        let grid = grid();

        for (code, e) in [
            (54401027, 0.1),
            (54401028, 0.2),
            (54401037, 0.3),
            (54401038, 0.4),
        ] {
            let (lat, lng) = MeshNode::from_meshcode(code).unwrap().to_position();
            assert_eq!(grid.correction(lat, lng), Some(e), "{code}");
        }
    }

    #[test]
    fn test_interpolation() {
        let grid = grid();
        let (lat, lng) = MeshNode::from_meshcode(54401027).unwrap().to_position();

        // a quarter to the east on the south edge
        let actual = grid.correction(lat, lng + 0.25 / 80.0).unwrap();
        assert!((actual - 0.125).abs() < 1e-9, "{actual}");

        // a quarter to the north on the west edge
        let actual = grid.correction(lat + 0.25 / 120.0, lng).unwrap();
        assert!((actual - 0.15).abs() < 1e-9, "{actual}");

        // sw + (se - sw)x + (nw - sw)y + (ne - nw - se + sw)xy, the cross term vanishes here
        let actual = grid.correction(lat + 0.5 / 120.0, lng + 0.75 / 80.0).unwrap();
        assert!((actual - (0.1 + 0.1 * 0.75 + 0.2 * 0.5)).abs() < 1e-9, "{actual}");
    }

    #[test]
    fn test_partial_coverage() {
        let grid = AltitudeCorrectionGridBuilder::new()
            .parameters([(54401038, 0.4)])
            .build();
        let (lat, lng) = MeshNode::from_meshcode(54401027).unwrap().to_position();

        // the south-west node is missing, it counts as 0.0
        assert_eq!(grid.correction(lat, lng), Some(0.0));

        let actual = grid.correction(lat + 0.5 / 120.0, lng + 0.5 / 80.0).unwrap();
        assert!((actual - 0.1).abs() < 1e-9, "{actual}");
    }

    #[test]
    fn test_out_of_coverage() {
        let grid = grid();
        assert_eq!(grid.correction(35.0, 135.0), None);
        assert_eq!(grid.correction(f64::NAN, 140.0), None);
        assert_eq!(grid.correction(36.1, 99.0), None);

        let empty: AltitudeCorrectionGrid = AltitudeCorrectionGridBuilder::new().build();
        assert!(empty.is_empty());
        assert_eq!(empty.correction(36.1, 140.0875), None);
    }

    #[test]
    fn test_from_iter() {
        let grid: AltitudeCorrectionGrid = [(54401027, 0.1)].into_iter().collect();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.get(&54401027), Some(&0.1));
        assert_eq!(grid.description, None);
    }
}

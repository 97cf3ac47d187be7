//! Provides the 2D Helmert transformation (the similarity transformation),
//! fitting by the least squares and applying.
//!
//! The transformation is
//!
//! ```text
//! x' = a x − b y + c
//! y' = b x + a y + d
//! ```
//!
//! where `a = s cos θ` and `b = s sin θ` for the scale `s` and the rotation `θ`.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::internal::{ksum, mul_add};
use crate::projection::Plane;

/// The sum of the squared centered source coordinates less than this is degenerate.
const DEGENERATE: f64 = 1e-10;

/// Represents how to fit the scale.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScaleMode {
    /// Fits the scale with the rotation and the translation (4 parameters).
    #[default]
    Free,
    /// Fixes the scale to 1.0 and fits the rotation and the translation (3 parameters).
    Fixed,
}

/// A pair of the same control point in the source and the target frame.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlPointPair {
    /// The coordinate in the source frame
    pub source: Plane,
    /// The coordinate in the target frame
    pub target: Plane,
    /// Whether the pair takes part in the fitting
    pub enabled: bool,
}

impl ControlPointPair {
    /// Makes an enabled [`ControlPointPair`].
    #[inline]
    #[must_use]
    pub const fn new(source: Plane, target: Plane) -> Self {
        Self {
            source,
            target,
            enabled: true,
        }
    }

    /// Returns `self` excluded from the fitting.
    #[inline]
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// The parameters of the Helmert transformation.
///
/// # Example
///
/// ```
/// # use sokuryo::helmert::HelmertParams;
/// // rotate 90° and move (10, 20)
/// let params = HelmertParams::new(0.0, 1.0, 10.0, 20.0);
/// assert_eq!(params.scale, 1.0);
/// assert_eq!(params.rotation, 90.0);
///
/// let result = params.apply(1.0, 0.0);
/// assert_eq!((result.x, result.y), (10.0, 21.0));
/// ```
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HelmertParams {
    /// `s cos θ`
    pub a: f64,
    /// `s sin θ`
    pub b: f64,
    /// The translation of x \[m\]
    pub c: f64,
    /// The translation of y \[m\]
    pub d: f64,
    /// The scale `s`
    pub scale: f64,
    /// The rotation `θ` \[deg\], counterclockwise from x-axis to y-axis
    pub rotation: f64,
}

impl HelmertParams {
    /// Makes a [`HelmertParams`], the scale and the rotation follow `a` and `b`.
    #[must_use]
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self {
            a,
            b,
            c,
            d,
            scale: a.hypot(b),
            rotation: b.atan2(a).to_degrees(),
        }
    }

    /// Returns the transformed coordinate of `(x, y)`.
    #[inline]
    #[must_use]
    pub fn apply(&self, x: f64, y: f64) -> Plane {
        Plane {
            x: mul_add!(self.a, x, mul_add!(-self.b, y, self.c)),
            y: mul_add!(self.b, x, mul_add!(self.a, y, self.d)),
        }
    }
}

/// Returns the transformed coordinate of `(x, y)`, see [`HelmertParams::apply`].
#[inline]
#[must_use]
pub fn apply(x: f64, y: f64, params: &HelmertParams) -> Plane {
    params.apply(x, y)
}

/// Returns the least squares [`HelmertParams`] of the enabled pairs.
///
/// This is the closed form solution, the centroids of both frames
/// correspond to each other.
///
/// # Errors
///
/// Returns [`None`] when fewer than 2 pairs are enabled,
/// or the enabled source points coincide.
///
/// # Example
///
/// ```
/// # use sokuryo::helmert::*;
/// # use sokuryo::projection::Plane;
/// # fn wrapper() -> Option<()> {
/// let pairs = [
///     ControlPointPair::new(Plane::new(0.0, 0.0), Plane::new(100.0, 200.0)),
///     ControlPointPair::new(Plane::new(10.0, 0.0), Plane::new(100.0, 220.0)),
///     // excluded
///     ControlPointPair::new(Plane::new(5.0, 5.0), Plane::new(0.0, 0.0)).disabled(),
/// ];
///
/// let params = fit(&pairs, ScaleMode::Free)?;
/// assert!((params.scale - 2.0).abs() < 1e-12);
/// assert!((params.rotation - 90.0).abs() < 1e-12);
/// assert!((params.c - 100.0).abs() < 1e-12);
/// assert!((params.d - 200.0).abs() < 1e-12);
///
/// // needs 2 pairs at least
/// assert_eq!(fit(&pairs[..1], ScaleMode::Free), None);
/// # Some(())}
/// # fn main() {wrapper().unwrap()}
/// ```
pub fn fit(pairs: &[ControlPointPair], mode: ScaleMode) -> Option<HelmertParams> {
    let active: Vec<_> = pairs.iter().filter(|p| p.enabled).collect();

    if active.len() < 2 {
        tracing::debug!(count = active.len(), "too few control points to fit");
        return None;
    }

    let n = active.len() as f64;
    let mean_x = ksum(active.iter().map(|p| p.source.x)) / n;
    let mean_y = ksum(active.iter().map(|p| p.source.y)) / n;
    let mean_x_ = ksum(active.iter().map(|p| p.target.x)) / n;
    let mean_y_ = ksum(active.iter().map(|p| p.target.y)) / n;

    let centered = active.iter().map(|p| {
        (
            p.source.x - mean_x,
            p.source.y - mean_y,
            p.target.x - mean_x_,
            p.target.y - mean_y_,
        )
    });

    let sum_sq = ksum(centered.clone().map(|(dx, dy, _, _)| mul_add!(dx, dx, dy * dy)));
    let sum_cross = ksum(centered.clone().map(|(dx, dy, dx_, dy_)| mul_add!(dx, dx_, dy * dy_)));
    let sum_rot = ksum(centered.map(|(dx, dy, dx_, dy_)| mul_add!(dx, dy_, -dy * dx_)));

    if sum_sq.abs() < DEGENERATE {
        tracing::debug!(sum_sq, "control points coincide");
        return None;
    }

    let (a, b) = match mode {
        ScaleMode::Free => (sum_cross / sum_sq, sum_rot / sum_sq),
        ScaleMode::Fixed => {
            let theta = sum_rot.atan2(sum_cross);
            (theta.cos(), theta.sin())
        }
    };

    let c = mean_x_ - a * mean_x + b * mean_y;
    let d = mean_y_ - b * mean_x - a * mean_y;

    Some(HelmertParams::new(a, b, c, d))
}

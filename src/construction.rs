//! Provides the calculations of the construction survey, 丁張り計算,
//! the gradient, the simple circular curve and the trigonometric functions.
//!
//! Angles are in degree.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::internal::mul_add;

/// The known values of a gradient, with the horizontal distance \[m\].
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Gradient {
    /// The height difference \[m\] is known.
    DistanceHeight { distance: f64, height: f64 },
    /// The gradient \[%\] is known.
    DistanceGradient { distance: f64, gradient: f64 },
    /// The vertical angle \[deg\] is known.
    DistanceAngle { distance: f64, angle: f64 },
}

/// The solved gradient.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GradientResult {
    /// The horizontal distance \[m\]
    pub distance: f64,
    /// The height difference \[m\]
    pub height: f64,
    /// The gradient \[%\]
    pub gradient: f64,
    /// The vertical angle \[deg\]
    pub angle: f64,
    /// The slope distance \[m\]
    pub slope_distance: f64,
}

impl Gradient {
    /// Returns the distance \[m\].
    #[inline]
    pub const fn distance(&self) -> f64 {
        match self {
            Self::DistanceHeight { distance, .. }
            | Self::DistanceGradient { distance, .. }
            | Self::DistanceAngle { distance, .. } => *distance,
        }
    }

    /// Solves the gradient.
    ///
    /// # Errors
    ///
    /// Returns [`None`] if the distance is zero or not finite.
    ///
    /// # Example
    ///
    /// ```
    /// # use sokuryo::construction::Gradient;
    /// # fn wrapper() -> Option<()> {
    /// let result = Gradient::DistanceHeight { distance: 20.0, height: 0.4 }.solve()?;
    /// assert!((result.gradient - 2.0).abs() < 1e-12);
    /// assert!((result.angle - 1.1457628381751).abs() < 1e-12);
    ///
    /// let result = Gradient::DistanceGradient { distance: 20.0, gradient: 2.0 }.solve()?;
    /// assert!((result.height - 0.4).abs() < 1e-12);
    ///
    /// assert_eq!(Gradient::DistanceAngle { distance: 0.0, angle: 1.0 }.solve(), None);
    /// # Some(())}
    /// # fn main() {wrapper().unwrap()}
    /// ```
    pub fn solve(&self) -> Option<GradientResult> {
        let distance = self.distance();
        if distance == 0.0 || !distance.is_finite() {
            return None;
        }

        let height = match *self {
            Self::DistanceHeight { height, .. } => height,
            Self::DistanceGradient { gradient, .. } => distance * gradient / 100.0,
            Self::DistanceAngle { angle, .. } => distance * angle.to_radians().tan(),
        };

        Some(GradientResult {
            distance,
            height,
            gradient: height / distance * 100.0,
            angle: height.atan2(distance).to_degrees(),
            slope_distance: distance.hypot(height),
        })
    }
}

/// The known value of a simple circular curve, 単曲線.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Curve {
    /// The intersection angle IA \[deg\]
    IntersectionAngle(f64),
    /// The curve length CL \[m\]
    CurveLength(f64),
    /// The long chord C \[m\]
    Chord(f64),
}

/// The elements of a simple circular curve.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurveElements {
    /// The radius R \[m\]
    pub radius: f64,
    /// The intersection angle IA \[deg\]
    pub ia: f64,
    /// The curve length CL \[m\]
    pub cl: f64,
    /// The tangent length TL \[m\]
    pub tl: f64,
    /// The external secant SL \[m\]
    pub e: f64,
    /// The middle ordinate M \[m\]
    pub m: f64,
    /// The long chord C \[m\]
    pub c: f64,
}

impl Curve {
    /// Returns the elements of the curve of the radius `radius` \[m\].
    ///
    /// # Errors
    ///
    /// Returns [`None`] if the radius or the value is zero or not finite,
    /// or the chord is longer than the diameter.
    ///
    /// # Example
    ///
    /// ```
    /// # use sokuryo::construction::Curve;
    /// # fn wrapper() -> Option<()> {
    /// let result = Curve::IntersectionAngle(90.0).elements(100.0)?;
    /// assert!((result.tl - 100.0).abs() < 1e-9);
    /// assert!((result.cl - 157.07963267949).abs() < 1e-9);
    /// assert!((result.c - 141.42135623731).abs() < 1e-9);
    ///
    /// assert_eq!(Curve::Chord(201.0).elements(100.0), None);
    /// # Some(())}
    /// # fn main() {wrapper().unwrap()}
    /// ```
    pub fn elements(&self, radius: f64) -> Option<CurveElements> {
        let value = match *self {
            Self::IntersectionAngle(v) | Self::CurveLength(v) | Self::Chord(v) => v,
        };

        if radius == 0.0 || value == 0.0 || !radius.is_finite() || !value.is_finite() {
            return None;
        }

        let ia = match *self {
            Self::IntersectionAngle(ia) => ia.to_radians(),
            Self::CurveLength(cl) => cl / radius,
            Self::Chord(c) => {
                let t = c / (2.0 * radius);
                if t.abs() > 1.0 {
                    return None;
                }
                2.0 * t.asin()
            }
        };

        let (sin, cos) = (ia / 2.0).sin_cos();

        Some(CurveElements {
            radius,
            ia: ia.to_degrees(),
            cl: radius * ia,
            tl: radius * (ia / 2.0).tan(),
            e: mul_add!(radius, cos.recip(), -radius),
            m: mul_add!(-radius, cos, radius),
            c: 2.0 * radius * sin,
        })
    }
}

/// The values of the trigonometric functions.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trig {
    pub sin: f64,
    pub cos: f64,
    pub tan: f64,
}

/// Returns sin, cos and tan of the angle `degree` \[deg\].
///
/// # Example
///
/// ```
/// # use sokuryo::construction::trig;
/// let t = trig(30.0);
/// assert!((t.sin - 0.5).abs() < 1e-12);
/// assert!((t.tan - 0.5773502691896258).abs() < 1e-12);
/// ```
#[must_use]
pub fn trig(degree: f64) -> Trig {
    let (sin, cos) = degree.to_radians().sin_cos();
    Trig {
        sin,
        cos,
        tan: degree.to_radians().tan(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn test_gradient() {
        let result = Gradient::DistanceHeight {
            distance: 3.0,
            height: 4.0,
        }
        .solve()
        .unwrap();
        assert_close(result.slope_distance, 5.0);
        assert_close(result.gradient, 400.0 / 3.0);

        // downhill
        let result = Gradient::DistanceAngle {
            distance: 10.0,
            angle: -45.0,
        }
        .solve()
        .unwrap();
        assert_close(result.height, -10.0);
        assert_close(result.gradient, -100.0);
        assert_close(result.angle, -45.0);

        let result = Gradient::DistanceGradient {
            distance: 50.0,
            gradient: -1.5,
        }
        .solve()
        .unwrap();
        assert_close(result.height, -0.75);
        assert_close(result.gradient, -1.5);
    }

    #[test]
    fn test_gradient_zero_distance() {
        for g in [
            Gradient::DistanceHeight {
                distance: 0.0,
                height: 1.0,
            },
            Gradient::DistanceGradient {
                distance: 0.0,
                gradient: 1.0,
            },
            Gradient::DistanceAngle {
                distance: f64::NAN,
                angle: 1.0,
            },
        ] {
            assert_eq!(g.solve(), None);
        }
    }

    #[test]
    fn test_curve_consistent() {
        let by_ia = Curve::IntersectionAngle(35.5).elements(250.0).unwrap();
        let by_cl = Curve::CurveLength(by_ia.cl).elements(250.0).unwrap();
        let by_c = Curve::Chord(by_ia.c).elements(250.0).unwrap();

        for other in [by_cl, by_c] {
            assert_close(other.ia, by_ia.ia);
            assert_close(other.tl, by_ia.tl);
            assert_close(other.e, by_ia.e);
            assert_close(other.m, by_ia.m);
        }
    }

    #[test]
    fn test_curve_semicircle() {
        let result = Curve::Chord(200.0).elements(100.0).unwrap();
        assert_close(result.ia, 180.0);
        assert_close(result.m, 100.0);
        assert_close(result.cl, 100.0 * std::f64::consts::PI);
    }

    #[test]
    fn test_curve_none() {
        assert_eq!(Curve::IntersectionAngle(30.0).elements(0.0), None);
        assert_eq!(Curve::IntersectionAngle(0.0).elements(100.0), None);
        assert_eq!(Curve::CurveLength(0.0).elements(100.0), None);
        assert_eq!(Curve::Chord(200.1).elements(100.0), None);
    }

    #[test]
    fn test_trig() {
        let t = trig(60.0);
        assert_close(t.cos, 0.5);
        assert_close(t.sin, 3_f64.sqrt() / 2.0);
        assert_close(t.tan, 3_f64.sqrt());

        let t = trig(-30.0);
        assert_close(t.sin, -0.5);
    }
}

//! Provides utilities for DMS notation degree.
//!
//! The DMS notation is for presentation and text input only,
//! every other API of this crate takes and returns DD notation (decimal degree).
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::internal::mul_add;

/// The field markers of DMS notation text.
const MARKERS: [char; 5] = ['°', '′', '\'', '″', '"'];

/// Returns a DMS notation [`String`], `[sign]D°MM′SS″`, from a DD notation [`f64`].
///
/// The second is rounded to an integer,
/// a carry propagates into minute and degree.
///
/// # Errors
///
/// Returns [`None`] when `t` is not finite.
///
/// # Example
///
/// ```
/// # use sokuryo::dms::to_dms;
/// #
/// assert_eq!(to_dms(35.5), Some("35°30′00″".to_string()));
/// assert_eq!(to_dms(-12.3456), Some("-12°20′44″".to_string()));
/// // 59.6″ rounds up into the next minute
/// assert_eq!(to_dms(10.0 + 5.0 / 60.0 + 59.6 / 3600.0), Some("10°06′00″".to_string()));
/// assert_eq!(to_dms(f64::NAN), None);
/// ```
#[inline]
#[must_use]
pub fn to_dms(t: f64) -> Option<String> {
    DMS::try_from(t).ok().map(|x| x.to_string())
}

/// Returns a DD notation [`f64`] from a DMS notation [`str`] or a decimal [`str`].
///
/// See [`parse_dms_or_decimal`] for the accepted notation.
///
/// # Errors
///
/// Returns [`None`] when `s` has no numeric field.
///
/// # Example
///
/// ```
/// # use sokuryo::dms::from_dms;
/// #
/// assert_eq!(from_dms("35°30′"), Some(35.5));
/// assert_eq!(from_dms("-35.5"), Some(-35.5));
/// assert_eq!(from_dms("abc"), None);
/// ```
#[inline]
#[must_use]
pub fn from_dms(s: &str) -> Option<f64> {
    parse(s).ok()
}

/// Returns a DD notation [`f64`] from free-form text, `0.0` if `s` has no value.
///
/// Without any of the markers `°`, `′`, `'`, `″` and `"`,
/// `s` is a decimal number, and only its leading numeric part is read.
/// Otherwise, `s` is split into fields at any run of the markers and `-`;
/// the fields are degree, minute and second, and the missing trailing fields are 0.
/// A non-numeric field is dropped.
/// A leading `-` makes the whole angle negative.
///
/// # Example
///
/// ```
/// # use sokuryo::dms::parse_dms_or_decimal;
/// #
/// assert_eq!(parse_dms_or_decimal("35.5"), 35.5);
/// assert_eq!(parse_dms_or_decimal("35°30′00″"), 35.5);
/// assert_eq!(parse_dms_or_decimal("35°30'"), 35.5);
/// assert!((parse_dms_or_decimal("35°30′36″") - 35.51).abs() < 1e-12);
/// // no marker, a decimal
/// assert_eq!(parse_dms_or_decimal("35-30-36"), 35.0);
/// assert_eq!(parse_dms_or_decimal("-35°30′"), -35.5);
/// assert_eq!(parse_dms_or_decimal(""), 0.0);
/// assert_eq!(parse_dms_or_decimal("north"), 0.0);
/// ```
#[inline]
#[must_use]
pub fn parse_dms_or_decimal(s: &str) -> f64 {
    parse(s).unwrap_or(0.0)
}

pub(crate) fn parse(s: &str) -> Result<f64, ParseDMSError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseDMSError::with_empty());
    }

    if !s.contains(MARKERS) {
        return leading_decimal(s).ok_or(ParseDMSError::with_invalid_digit());
    }

    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (Sign::Negative, rest),
        None => (Sign::Positive, s.strip_prefix('+').unwrap_or(s)),
    };

    // consecutive delimiters make empty fields, they collapse
    let mut fields = rest
        .split(|c: char| c == '-' || MARKERS.contains(&c))
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .filter_map(|field| field.parse::<f64>().ok())
        .filter(|v| v.is_finite());

    let degree = fields.next().ok_or(ParseDMSError::with_invalid_digit())?;
    let minute = fields.next().unwrap_or(0.0);
    let second = fields.next().unwrap_or(0.0);

    let temp = mul_add!(minute, 1. / 60., degree.abs());
    let temp = mul_add!(second, 1. / 3600., temp);

    Ok(match sign {
        Sign::Positive => temp,
        Sign::Negative => -temp,
    })
}

/// Returns the longest leading decimal number of `s`, e.g. `35` of `35-30-36`.
fn leading_decimal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integral = digits(end);
    end += integral;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits(end + 1);
        end += 1 + fraction;
    }
    if integral + fraction == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Signature of DMS
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Sign {
    Positive,
    Negative,
}

/// Represents a DMS notation angle rounded to an integer second.
///
/// The degree is not bounded by 180 nor 360,
/// since unnormalized azimuths are displayed as is.
///
/// # Example
///
/// ```
/// # use sokuryo::dms::*;
/// #
/// # fn wrapper() -> Option<()> {
/// let angle = DMS::new(Sign::Positive, 36, 6, 14)?;
/// assert_eq!(angle.to_string(), "36°06′14″");
///
/// // Convert into DD notation (f64)
/// assert!((angle.to_degree() - 36.10388888888889).abs() < 1e-12);
///
/// // Construct from DD notation (f64), the second is rounded
/// let angle = DMS::try_from(36.103774791666666).ok()?;
/// assert_eq!(angle.sign(), &Sign::Positive);
/// assert_eq!(angle.degree(), &36);
/// assert_eq!(angle.minute(), &6);
/// assert_eq!(angle.second(), &14);
/// # Some(())}
/// # fn main() {wrapper();()}
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct DMS {
    sign: Sign,
    degree: u32,
    minute: u8,
    second: u8,
}

impl Display for DMS {
    /// Returns a `D°MM′SS″` notation [`str`] which represents `self`.
    ///
    /// # Example
    ///
    /// ```
    /// # use sokuryo::dms::*;
    /// #
    /// # fn wrapper() -> Option<()> {
    /// assert_eq!(DMS::new(Sign::Positive, 0, 0, 5)?.to_string(), "0°00′05″");
    /// assert_eq!(DMS::new(Sign::Negative, 140, 5, 16)?.to_string(), "-140°05′16″");
    /// # Some(())}
    /// # fn main() {wrapper();()}
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let buf = format!("{}°{:02}′{:02}″", self.degree, self.minute, self.second);
        f.pad_integral(matches!(self.sign, Sign::Positive), "", &buf)
    }
}

impl TryFrom<f64> for DMS {
    type Error = TryFromDMSError;

    /// Makes a [`DMS`] from DD notation [`f64`].
    ///
    /// The second is rounded half away from zero,
    /// and 60″ (and then 60′) carries into the upper field.
    /// The sign is dropped when the rounded angle is zero.
    ///
    /// # Errors
    ///
    /// When `value` is not finite or the degree overflows [`u32`].
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_nan() {
            return Err(TryFromDMSError::new_nan());
        }

        let total = (value.abs() * 3600.0).round();
        if !total.is_finite() || total.ge(&(3600.0 * u32::MAX as f64)) {
            return Err(TryFromDMSError::new_oob());
        }

        // total < 3600 * u32::MAX fits u64
        let total = total as u64;

        let sign = if value.is_sign_negative() && total.ne(&0) {
            Sign::Negative
        } else {
            Sign::Positive
        };

        Ok(Self {
            sign,
            degree: (total / 3600) as u32,
            minute: (total % 3600 / 60) as u8,
            second: (total % 60) as u8,
        })
    }
}

impl From<&DMS> for f64 {
    /// see [`DMS::to_degree()`]
    fn from(value: &DMS) -> Self {
        value.to_degree()
    }
}

impl DMS {
    /// Makes a [`DMS`].
    ///
    /// # Errors
    ///
    /// Returns [`None`] when `minute` or `second` is not less than 60.
    #[inline]
    #[must_use]
    pub fn new(sign: Sign, degree: u32, minute: u8, second: u8) -> Option<Self> {
        if minute >= 60 || second >= 60 {
            return None;
        }

        Some(Self {
            sign,
            degree,
            minute,
            second,
        })
    }

    /// Returns the sign of `self`.
    #[inline]
    #[must_use]
    pub const fn sign(&self) -> &Sign {
        &self.sign
    }

    /// Returns the degree of `self`.
    #[inline]
    #[must_use]
    pub const fn degree(&self) -> &u32 {
        &self.degree
    }

    /// Returns the minute of `self`.
    #[inline]
    #[must_use]
    pub const fn minute(&self) -> &u8 {
        &self.minute
    }

    /// Returns the second of `self`.
    #[inline]
    #[must_use]
    pub const fn second(&self) -> &u8 {
        &self.second
    }

    /// Returns a DD notation [`f64`] that `self` converts into.
    #[inline]
    #[must_use]
    pub fn to_degree(&self) -> f64 {
        let temp = mul_add!(self.minute as f64, 1. / 60., self.degree as f64);
        let temp = mul_add!(self.second as f64, 1. / 3600., temp);

        match self.sign {
            Sign::Positive => temp,
            Sign::Negative => -temp,
        }
    }
}

//
// Error
//

/// An error which can be returned on parsing DMS degree.
#[derive(Debug, PartialEq, Eq)]
pub struct ParseDMSError {
    kind: ParseDMSErrorKind,
}

/// An error kind of [`ParseDMSError`].
#[derive(Debug, PartialEq, Eq)]
pub enum ParseDMSErrorKind {
    InvalidDigit,
    Empty,
}

impl ParseDMSError {
    #[cold]
    const fn with_invalid_digit() -> Self {
        Self {
            kind: ParseDMSErrorKind::InvalidDigit,
        }
    }

    #[cold]
    const fn with_empty() -> Self {
        Self {
            kind: ParseDMSErrorKind::Empty,
        }
    }

    /// Returns the detailed cause.
    pub const fn kind(&self) -> &ParseDMSErrorKind {
        &self.kind
    }
}

impl Error for ParseDMSError {}

impl Display for ParseDMSError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.kind {
            ParseDMSErrorKind::InvalidDigit => f.write_str("no numeric field found in string"),
            ParseDMSErrorKind::Empty => f.write_str("cannot parse DMS from empty string"),
        }
    }
}

/// An error which can be returned on converting DD notation into [`DMS`].
///
/// This error is used as the error type for the [`TryFrom`] for [`DMS`].
#[derive(Debug, PartialEq, Eq)]
pub struct TryFromDMSError {
    kind: TryFromDMSErrorKind,
}

/// An error kind of [`TryFromDMSError`].
#[derive(Debug, PartialEq, Eq)]
pub enum TryFromDMSErrorKind {
    NAN,
    OutOfBounds,
}

impl TryFromDMSError {
    #[cold]
    const fn new_nan() -> Self {
        Self {
            kind: TryFromDMSErrorKind::NAN,
        }
    }

    #[cold]
    const fn new_oob() -> Self {
        Self {
            kind: TryFromDMSErrorKind::OutOfBounds,
        }
    }

    /// Returns the detailed cause.
    pub const fn kind(&self) -> &TryFromDMSErrorKind {
        &self.kind
    }
}

impl Error for TryFromDMSError {}

impl Display for TryFromDMSError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let s = match self.kind {
            TryFromDMSErrorKind::NAN => "number would be NAN",
            TryFromDMSErrorKind::OutOfBounds => "number would be out-of-bounds",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new() {
        assert!(DMS::new(Sign::Positive, 0, 60, 0).is_none());
        assert!(DMS::new(Sign::Positive, 0, 0, 60).is_none());

        assert!(DMS::new(Sign::Positive, 0, 59, 59).is_some());
        assert!(DMS::new(Sign::Negative, 400, 0, 0).is_some());
    }

    #[test]
    fn test_to_dms() {
        let cases = [
            (0.0, "0°00′00″"),
            (-0.0, "0°00′00″"),
            (35.5, "35°30′00″"),
            (-12.3456, "-12°20′44″"),
            (179.999999, "180°00′00″"),
            (45.0, "45°00′00″"),
            (359.5, "359°30′00″"),
            // unnormalized azimuth
            (365.25, "365°15′00″"),
            // 0.4″ rounds down, the sign vanishes
            (-0.4 / 3600.0, "0°00′00″"),
            // 0.6″ rounds up
            (-0.6 / 3600.0, "-0°00′01″"),
        ];

        for (a, e) in cases {
            assert_eq!(to_dms(a).unwrap(), e, "{a}");
        }
    }

    #[test]
    fn test_to_dms_carry() {
        // 59.6″ carries into the minute
        assert_eq!(
            to_dms(10.0 + 20.0 / 60.0 + 59.6 / 3600.0).unwrap(),
            "10°21′00″"
        );
        // and 60′ carries into the degree
        assert_eq!(to_dms(10.0 + 59.0 / 60.0 + 59.6 / 3600.0).unwrap(), "11°00′00″");
        assert_eq!(to_dms(0.99999).unwrap(), "1°00′00″");
        assert_eq!(to_dms(-0.99999).unwrap(), "-1°00′00″");
    }

    #[test]
    fn test_to_dms_err() {
        assert_eq!(to_dms(f64::NAN), None);
        assert_eq!(to_dms(f64::INFINITY), None);
        assert_eq!(to_dms(f64::NEG_INFINITY), None);
        assert_eq!(
            DMS::try_from(f64::NAN).unwrap_err().kind(),
            &TryFromDMSErrorKind::NAN
        );
        assert_eq!(
            DMS::try_from(1e300).unwrap_err().kind(),
            &TryFromDMSErrorKind::OutOfBounds
        );
    }

    #[test]
    fn test_format_sign() {
        let dms = DMS::new(Sign::Negative, 1, 2, 3).unwrap();
        assert_eq!(format!("{dms}"), "-1°02′03″");
        let dms = DMS::new(Sign::Positive, 1, 2, 3).unwrap();
        assert_eq!(format!("{dms:+}"), "+1°02′03″");
    }

    #[test]
    fn test_parse_decimal() {
        let cases = [
            ("0", 0.0),
            ("35.5", 35.5),
            ("-12.3456", -12.3456),
            ("  139.7671 ", 139.7671),
            ("+1.25", 1.25),
            ("1e1", 10.0),
            (".5", 0.5),
            ("5.", 5.0),
            // the leading numeric part only
            ("35-30-36", 35.0),
            ("-35-30-36", -35.0),
            ("35.5abc", 35.5),
            ("1e", 1.0),
            ("1e+", 1.0),
            ("2E-1x", 0.2),
        ];

        for (a, e) in cases {
            assert_eq!(parse_dms_or_decimal(a), e, "{a}");
        }
    }

    #[test]
    fn test_parse_dms() {
        let cases = [
            ("35°", 35.0),
            ("35°30′", 35.5),
            ("35°30′36″", 35.51),
            ("35°30'36\"", 35.51),
            ("-35°30′36″", -35.51),
            ("+35°30′36″", 35.51),
            // runs of delimiters collapse
            ("35°°30′′36″″", 35.51),
            ("35° - 30′ - 36″", 35.51),
            ("35°-30′-36″", 35.51),
            // fractional fields
            ("35°30.5′", 35.0 + 30.5 / 60.0),
            ("35°30′36.9″", 35.0 + 30.0 / 60.0 + 36.9 / 3600.0),
        ];

        for (a, e) in cases {
            assert!((parse_dms_or_decimal(a) - e).abs() < 1e-12, "{a}");
        }
    }

    #[test]
    fn test_parse_invalid() {
        for s in ["", "   ", "-", "°", "°′″", "abc", "NaN", "inf", "--", ".", "-.e1", "1e999"] {
            assert_eq!(parse_dms_or_decimal(s), 0.0, "{s}");
            assert_eq!(from_dms(s), None, "{s}");
        }

        assert_eq!(parse("").unwrap_err().kind(), &ParseDMSErrorKind::Empty);
        assert_eq!(
            parse("abc").unwrap_err().kind(),
            &ParseDMSErrorKind::InvalidDigit
        );
    }

    #[test]
    fn test_parse_drops_non_numeric_field() {
        // the following fields move up
        let cases = [("35°abc′36″", 35.6), ("35°30′abc″", 35.5), ("abc°30′", 30.0)];

        for (a, e) in cases {
            assert!((from_dms(a).unwrap() - e).abs() < 1e-12, "{a}");
        }
    }

    #[test]
    fn test_identity() {
        let cases = [0.0, 35.5, -12.3456, 179.999999, 1.0 / 3.0, -0.5, 359.99];

        for d in cases {
            let s = to_dms(d).unwrap();
            let result = parse_dms_or_decimal(&s);
            assert!((result - d).abs() < 1.0 / 3600.0, "{d} {s} {result}");
        }
    }

    #[test]
    fn test_to_degree() {
        let dms = DMS::new(Sign::Positive, 36, 6, 14).unwrap();
        assert!((36.10388888888889 - dms.to_degree()).abs() < 1e-12);
        let dms = DMS::new(Sign::Negative, 36, 6, 14).unwrap();
        assert!((-36.10388888888889 - f64::from(&dms)).abs() < 1e-12);
    }
}

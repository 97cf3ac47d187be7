//! Provides deserializer of par file, the altitude correction parameter.
//!
//! A data line starts with an 8-digit meshcode followed by
//! the correction \[m\] in the fixed columns of the [`Format`].
//! Any other line (a header or a comment) is skipped,
//! the lines before the first data line make the description.
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{BuildHasher, RandomState};
use std::num::ParseFloatError;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::altitude::AltitudeCorrectionGrid;

/// Deserialize par-formatted [`&str`] into an [`AltitudeCorrectionGrid`].
///
/// Use `format` argument to specify the format of `s`.
/// A data line whose correction is broken or non-finite is skipped with a warning.
///
/// # Errors
///
/// Returns [`Err`] when `s` has no valid data line.
///
/// # Example
///
/// ```
/// # use std::error::Error;
/// # use sokuryo::par::{from_str, Format};
/// #
/// let s = r"JGD2011 標高補正パラメータ
/// MeshCode   dH(m)
/// 54401027   0.01234
/// 54401028  -0.00567";
/// let grid = from_str(s, Format::PatchJGD_H)?;
///
/// assert_eq!(grid.get(&54401027), Some(&0.01234));
/// assert_eq!(grid.get(&54401028), Some(&-0.00567));
/// assert_eq!(
///     grid.description,
///     Some("JGD2011 標高補正パラメータ\nMeshCode   dH(m)".to_string())
/// );
/// # Ok::<(), Box<dyn Error>>(())
/// ```
#[inline]
pub fn from_str(s: &str, format: Format) -> Result<AltitudeCorrectionGrid, ParseParError> {
    Parser::new(format).parse(s)
}

/// Represents format of par-formatted text.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Format {
    /// PatchJGD(H), the correction in the columns 8 to 18.
    #[allow(non_camel_case_types)]
    PatchJGD_H,
    /// The altitude revision parameter, the correction in the columns 12 to 21.
    HyokoRev,
}

impl Format {
    /// Returns the columns of the correction.
    #[inline]
    const fn altitude(&self) -> Range<usize> {
        match self {
            Self::PatchJGD_H => 8..18,
            Self::HyokoRev => 12..21,
        }
    }
}

const MESHCODE: Range<usize> = 0..8;

/// Returns the meshcode and the correction of a line,
/// [`None`] if the line is not a data line.
pub(crate) fn parse_line(
    line: &str,
    lineno: usize,
    format: Format,
) -> Result<Option<(u32, f64)>, ParseParError> {
    let meshcode = match line.get(MESHCODE) {
        Some(s) if s.bytes().all(|b| b.is_ascii_digit()) => s,
        _ => return Ok(None),
    };

    // 8 digits always fit u32
    let meshcode: u32 = match meshcode.parse() {
        Ok(v) => v,
        Err(_) => return Ok(None),
    };

    let range = format.altitude();
    let column = match line.get(range.clone()) {
        Some(s) => s,
        // the last column may be shorter than its width
        None => line
            .get(range.start..)
            .filter(|s| !s.trim().is_empty())
            .ok_or(ParseParError::new(
                lineno,
                range.clone(),
                ParseParErrorKind::MissingColumn,
            ))?,
    };

    let altitude: f64 = column
        .trim()
        .parse()
        .map_err(|e| ParseParError::new(lineno, range.clone(), ParseParErrorKind::ParseFloat(e)))?;

    if !altitude.is_finite() {
        return Err(ParseParError::new(lineno, range, ParseParErrorKind::NonFinite));
    }

    Ok(Some((meshcode, altitude)))
}

/// Parser of par-formatted [`&str`].
///
/// # Example
///
/// ```
/// # use std::error::Error;
/// # use std::hash::RandomState;
/// # use sokuryo::par::{Format, Parser};
/// #
/// let s = "54401027      0.01234";
/// let grid = Parser::with_hasher(Format::HyokoRev, RandomState::new()).parse(s)?;
///
/// assert_eq!(grid.get(&54401027), Some(&0.01234));
/// # Ok::<(), Box<dyn Error>>(())
/// ```
#[derive(Debug)]
pub struct Parser<S = RandomState> {
    format: Format,
    hash_builder: S,
}

impl Parser<RandomState> {
    /// Makes a parser.
    #[inline]
    pub fn new(format: Format) -> Self {
        Self::with_hasher(format, RandomState::new())
    }
}

impl<S> Parser<S> {
    /// Makes a parser resulting [`AltitudeCorrectionGrid`] which uses the given hash builder to hash meshcode.
    ///
    /// See [`HashMap::with_hasher`], for detail.
    #[inline]
    pub const fn with_hasher(format: Format, hash_builder: S) -> Self {
        Self {
            format,
            hash_builder,
        }
    }
}

impl<#[cfg(not(feature = "serde"))] S, #[cfg(feature = "serde")] S: Default> Parser<S>
where
    S: BuildHasher,
{
    /// Deserialize par-formatted [`&str`] into an [`AltitudeCorrectionGrid`].
    pub fn parse(self, s: &str) -> Result<AltitudeCorrectionGrid<S>, ParseParError> {
        let mut parameter = HashMap::with_hasher(self.hash_builder);
        let mut header = Vec::new();

        for (lineno, line) in s.lines().enumerate() {
            let lineno = lineno + 1;
            match parse_line(line, lineno, self.format) {
                Ok(Some((meshcode, altitude))) => {
                    parameter.insert(meshcode, altitude);
                }
                Ok(None) if parameter.is_empty() => {
                    if !line.trim().is_empty() {
                        header.push(line.trim_end());
                    }
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(lineno, "skip a data line, {e}"),
            }
        }

        if parameter.is_empty() {
            return Err(ParseParError::new(
                s.lines().count(),
                MESHCODE,
                ParseParErrorKind::Empty,
            ));
        }

        parameter.shrink_to_fit();
        tracing::debug!(count = parameter.len(), format = ?self.format, "par file parsed");

        let description = if header.is_empty() {
            None
        } else {
            Some(header.join("\n"))
        };

        Ok(AltitudeCorrectionGrid {
            parameter,
            description,
        })
    }
}

impl<S> Clone for Parser<S>
where
    S: Clone,
{
    #[inline]
    fn clone(&self) -> Self {
        Self {
            format: self.format,
            hash_builder: self.hash_builder.clone(),
        }
    }
}

//
// Error
//

/// An error which can be returned on parsing par-formatted text.
///
/// This error is used as the error type for the [`from_str`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ParseParError {
    /// Error kind
    kind: ParseParErrorKind,
    /// Lineno of the data, 1-origin
    pub lineno: usize,
    /// Start column no. of the data
    pub start: usize,
    /// End column no. of the data
    pub end: usize,
}

/// An error kind of [`ParseParError`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ParseParErrorKind {
    /// No data line found
    Empty,
    /// A data line is too short
    MissingColumn,
    ParseFloat(ParseFloatError),
    /// The correction is NaN or infinite
    NonFinite,
}

impl ParseParError {
    #[cold]
    const fn new(lineno: usize, columns: Range<usize>, kind: ParseParErrorKind) -> Self {
        Self {
            kind,
            lineno,
            start: columns.start,
            end: columns.end,
        }
    }

    /// Returns the detailed cause.
    pub const fn kind(&self) -> &ParseParErrorKind {
        &self.kind
    }
}

impl Error for ParseParError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            ParseParErrorKind::ParseFloat(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for ParseParError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.kind {
            ParseParErrorKind::Empty => f.write_str("parse error: no data line found"),
            ParseParErrorKind::MissingColumn => write!(
                f,
                "parse error: correction not found at l{}:{}:{}",
                self.lineno, self.start, self.end
            ),
            ParseParErrorKind::ParseFloat(_) => write!(
                f,
                "parse error: invalid correction at l{}:{}:{}",
                self.lineno, self.start, self.end
            ),
            ParseParErrorKind::NonFinite => write!(
                f,
                "parse error: non-finite correction at l{}:{}:{}",
                self.lineno, self.start, self.end
            ),
        }
    }
}

//! Provides the leveling field book by the height of instrument method, 器高式野帳.
//!
//! # Example
//!
//! ```
//! # use sokuryo::leveling::{LevelingBook, LevelingRow};
//! let rows = vec![
//!     LevelingRow::fixed("BM1", 10.0).backsight(1.5),
//!     LevelingRow::new("No.1").foresight(0.8).backsight(1.2),
//!     LevelingRow::new("No.2").foresight(2.0),
//! ];
//!
//! let book = LevelingBook::compute(rows);
//!
//! assert_eq!(book.rows[0].instrument_height, Some(11.5));
//! assert!((book.rows[1].ground_height.unwrap() - 10.7).abs() < 1e-12);
//! assert!((book.rows[2].ground_height.unwrap() - 9.9).abs() < 1e-12);
//!
//! assert!((book.sum_backsight - 2.7).abs() < 1e-12);
//! assert!((book.sum_foresight - 2.8).abs() < 1e-12);
//! assert!(book.check().unwrap().abs() < 1e-12);
//! ```
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::internal::ksum;

/// A row of the field book, a station and the staff readings on it.
#[derive(Debug, PartialEq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LevelingRow {
    /// The station name
    pub station: String,
    /// The backsight reading BS \[m\]
    pub backsight: Option<f64>,
    /// The foresight reading FS \[m\]
    pub foresight: Option<f64>,
    /// The ground height GH \[m\], the given one if `fixed`
    pub ground_height: Option<f64>,
    /// Whether `ground_height` is given, e.g. a benchmark
    pub fixed: bool,
}

impl LevelingRow {
    /// Makes a [`LevelingRow`] of no reading.
    pub fn new(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            ..Default::default()
        }
    }

    /// Makes a [`LevelingRow`] of the given ground height.
    pub fn fixed(station: impl Into<String>, ground_height: f64) -> Self {
        Self {
            station: station.into(),
            ground_height: Some(ground_height),
            fixed: true,
            ..Default::default()
        }
    }

    /// Updates the backsight reading.
    #[must_use]
    pub fn backsight(mut self, value: f64) -> Self {
        self.backsight = Some(value);
        self
    }

    /// Updates the foresight reading.
    #[must_use]
    pub fn foresight(mut self, value: f64) -> Self {
        self.foresight = Some(value);
        self
    }
}

/// A computed row.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComputedRow {
    pub station: String,
    pub backsight: Option<f64>,
    pub foresight: Option<f64>,
    /// The instrument height IH \[m\], set up on the row of the backsight
    pub instrument_height: Option<f64>,
    /// The ground height GH \[m\]
    pub ground_height: Option<f64>,
    pub fixed: bool,
}

/// The computed field book.
#[derive(Debug, PartialEq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LevelingBook {
    pub rows: Vec<ComputedRow>,
    /// ΣBS \[m\]
    pub sum_backsight: f64,
    /// ΣFS \[m\]
    pub sum_foresight: f64,
}

impl LevelingBook {
    /// Computes the ground heights of `rows` in order.
    ///
    /// A fixed row keeps its ground height,
    /// otherwise the ground height is the current IH − FS,
    /// or unknown if no IH or no FS.
    /// A backsight on a row of the known ground height sets IH to GH + BS.
    pub fn compute(rows: impl IntoIterator<Item = LevelingRow>) -> Self {
        let mut instrument_height: Option<f64> = None;

        let rows: Vec<_> = rows
            .into_iter()
            .map(|row| {
                let ground_height = if row.fixed {
                    row.ground_height
                } else {
                    instrument_height
                        .zip(row.foresight)
                        .map(|(ih, fs)| ih - fs)
                };

                let ih = ground_height.zip(row.backsight).map(|(gh, bs)| gh + bs);
                if ih.is_some() {
                    instrument_height = ih;
                }

                ComputedRow {
                    station: row.station,
                    backsight: row.backsight,
                    foresight: row.foresight,
                    instrument_height: ih,
                    ground_height,
                    fixed: row.fixed,
                }
            })
            .collect();

        Self {
            sum_backsight: ksum(rows.iter().filter_map(|row| row.backsight)),
            sum_foresight: ksum(rows.iter().filter_map(|row| row.foresight)),
            rows,
        }
    }

    /// Returns ΣBS − ΣFS.
    #[inline]
    pub fn difference(&self) -> f64 {
        self.sum_backsight - self.sum_foresight
    }

    /// Returns the misclosure \[m\] of the check calculation,
    /// ΣBS − ΣFS less the last known GH less the first known GH.
    ///
    /// The sums count every reading,
    /// so the book should not contain intermediate sights.
    ///
    /// # Errors
    ///
    /// Returns [`None`] if no ground height is known.
    pub fn check(&self) -> Option<f64> {
        let mut known = self.rows.iter().filter_map(|row| row.ground_height);
        let first = known.next()?;
        let last = known.last().unwrap_or(first);
        Some(self.difference() - (last - first))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_compute() {
        let book = LevelingBook::compute([
            LevelingRow::fixed("BM.1", 25.0).backsight(1.234),
            LevelingRow::new("TP.1").foresight(0.987).backsight(2.345),
            LevelingRow::new("TP.2").foresight(1.111).backsight(0.5),
            LevelingRow::new("BM.2").foresight(1.0),
        ]);

        let ih: Vec<_> = book.rows.iter().map(|r| r.instrument_height).collect();
        assert_eq!(ih[3], None);
        assert!((ih[0].unwrap() - 26.234).abs() < 1e-9);
        assert!((ih[1].unwrap() - 27.592).abs() < 1e-9);
        assert!((ih[2].unwrap() - 26.981).abs() < 1e-9);

        let gh = book.rows[3].ground_height.unwrap();
        assert!((gh - 25.981).abs() < 1e-9);

        assert!((book.difference() - 0.981).abs() < 1e-9);
        assert!(book.check().unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_fixed_overrides() {
        // closing on a second benchmark, the given height stays
        let book = LevelingBook::compute([
            LevelingRow::fixed("BM.1", 10.0).backsight(1.0),
            LevelingRow::fixed("BM.2", 10.5).foresight(0.49),
        ]);

        assert_eq!(book.rows[1].ground_height, Some(10.5));
        assert!((book.check().unwrap() - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_unknown() {
        // no instrument height yet
        let book = LevelingBook::compute([
            LevelingRow::new("A").foresight(1.0),
            LevelingRow::new("B").backsight(1.0),
        ]);

        assert!(book.rows.iter().all(|r| r.ground_height.is_none()));
        assert!(book.rows.iter().all(|r| r.instrument_height.is_none()));
        assert_eq!(book.check(), None);
    }

    #[test]
    fn test_empty() {
        let book = LevelingBook::compute(Vec::new());
        assert!(book.rows.is_empty());
        assert_eq!(book.sum_backsight, 0.0);
        assert_eq!(book.check(), None);
    }
}

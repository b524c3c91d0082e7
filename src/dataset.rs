//! Read-only regional vegetation/temperature index table.
//!
//! The dashboard that cleans and plots these series lives elsewhere; this
//! module only models the query it exposes, plus an in-memory table that
//! answers it.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which index column a query reads.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// Vegetation condition index.
    Vci,
    /// Temperature condition index.
    Tci,
    /// Vegetation health index.
    Vhi,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexKind::Vci => "VCI",
            IndexKind::Tci => "TCI",
            IndexKind::Vhi => "VHI",
        })
    }
}

impl FromStr for IndexKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "VCI" => Ok(IndexKind::Vci),
            "TCI" => Ok(IndexKind::Tci),
            "VHI" => Ok(IndexKind::Vhi),
            _ => Err(format!("unknown index `{s}`")),
        }
    }
}

/// One weekly observation for one region.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexRecord {
    pub region_id: u32,
    pub year: u16,
    pub week: u8,
    pub vci: f64,
    pub tci: f64,
    pub vhi: f64,
}

impl IndexRecord {
    pub fn value(&self, kind: IndexKind) -> f64 {
        match kind {
            IndexKind::Vci => self.vci,
            IndexKind::Tci => self.tci,
            IndexKind::Vhi => self.vhi,
        }
    }
}

/// A query result row.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexRow {
    pub year: u16,
    pub week: u8,
    pub value: f64,
}

/// Read-only source of index series.
pub trait IndexSource {
    /// Rows for `region_id` with `year` in `years` and `week <= week_limit`,
    /// ordered by year then week.
    fn query(
        &self,
        kind: IndexKind,
        region_id: u32,
        week_limit: u8,
        years: RangeInclusive<u16>,
    ) -> Vec<IndexRow>;
}

/// Index table held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIndex {
    records: Vec<IndexRecord>,
}

impl InMemoryIndex {
    pub fn new(records: Vec<IndexRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<IndexRecord> for InMemoryIndex {
    fn from_iter<I: IntoIterator<Item = IndexRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IndexSource for InMemoryIndex {
    fn query(
        &self,
        kind: IndexKind,
        region_id: u32,
        week_limit: u8,
        years: RangeInclusive<u16>,
    ) -> Vec<IndexRow> {
        let mut rows: Vec<IndexRow> = self
            .records
            .iter()
            .filter(|r| r.region_id == region_id && years.contains(&r.year) && r.week <= week_limit)
            .map(|r| IndexRow {
                year: r.year,
                week: r.week,
                value: r.value(kind),
            })
            .collect();
        rows.sort_by_key(|row| (row.year, row.week));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(region_id: u32, year: u16, week: u8) -> IndexRecord {
        IndexRecord {
            region_id,
            year,
            week,
            vci: f64::from(week),
            tci: f64::from(year),
            vhi: f64::from(region_id),
        }
    }

    fn table() -> InMemoryIndex {
        let mut records = Vec::new();
        for region in [1, 2] {
            for year in [2001, 1999, 2000] {
                for week in (1..=52).rev() {
                    records.push(record(region, year, week));
                }
            }
        }
        records.into_iter().collect()
    }

    #[test]
    fn test_query_filters_region_years_and_weeks() {
        let rows = table().query(IndexKind::Vci, 2, 10, 2000..=2001);

        assert_eq!(rows.len(), 20);
        assert!(rows.iter().all(|r| r.week <= 10));
        assert!(rows.iter().all(|r| (2000..=2001).contains(&r.year)));
        assert_eq!(rows[0], IndexRow { year: 2000, week: 1, value: 1.0 });
        assert_eq!(rows[19], IndexRow { year: 2001, week: 10, value: 10.0 });
    }

    #[test]
    fn test_query_reads_selected_column() {
        let table = table();
        let tci = table.query(IndexKind::Tci, 1, 1, 1999..=1999);
        let vhi = table.query(IndexKind::Vhi, 1, 1, 1999..=1999);
        assert_eq!(tci[0].value, 1999.0);
        assert_eq!(vhi[0].value, 1.0);
    }

    #[test]
    fn test_query_with_no_matches_is_empty() {
        assert!(table().query(IndexKind::Vhi, 25, 52, 1980..=2020).is_empty());
        assert!(table().query(IndexKind::Vhi, 1, 0, 1980..=2020).is_empty());
    }

    #[test]
    fn test_index_kind_parsing() {
        assert_eq!("vhi".parse(), Ok(IndexKind::Vhi));
        assert_eq!(IndexKind::Tci.to_string(), "TCI");
        assert!("NDVI".parse::<IndexKind>().is_err());
    }
}

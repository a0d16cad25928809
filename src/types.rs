use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use tabled::Tabled;

use crate::util::format_plain;

/// A single value in an election table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Missing,
    Number(f64),
    Text(String),
}

impl Cell {
    /// The numeric value, or `None` for missing, NaN and text cells.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Missing => true,
            Cell::Number(n) => n.is_nan(),
            Cell::Text(_) => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Number(n) if n.is_nan() => Ok(()),
            Cell::Number(n) => f.write_str(&format_plain(*n)),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<u32> for Cell {
    fn from(n: u32) -> Self {
        Cell::Number(f64::from(n))
    }
}

impl From<u64> for Cell {
    fn from(n: u64) -> Self {
        Cell::Number(n as f64)
    }
}

impl From<Option<f64>> for Cell {
    fn from(n: Option<f64>) -> Self {
        n.map_or(Cell::Missing, Cell::Number)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

/// Rows of districts under a named header. Every row is kept exactly as
/// wide as the header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElectionTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl ElectionTable {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, padding short rows with missing cells and dropping
    /// cells past the header width.
    pub fn push_row(&mut self, mut cells: Vec<Cell>) {
        cells.resize(self.columns.len(), Cell::Missing);
        self.rows.push(cells);
    }

    pub fn with_row(mut self, cells: Vec<Cell>) -> Self {
        self.push_row(cells);
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        &self.rows[row][column]
    }

    /// All cells of a named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }
}

/// Seats won by each eligible party in one district, in party-list order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictAllocation {
    pub district: String,
    pub seats: Vec<(String, u32)>,
    /// True when the district had no usable seat count.
    pub skipped: bool,
}

impl DistrictAllocation {
    pub fn seats_for(&self, party: &str) -> u32 {
        self.seats
            .iter()
            .find(|(p, _)| p == party)
            .map_or(0, |(_, s)| *s)
    }

    pub fn total(&self) -> u32 {
        self.seats.iter().map(|(_, s)| s).sum()
    }
}

/// Seats per party across all districts, in party-list order. Every
/// configured party has an entry. Counts are `u64` so that many large
/// districts cannot overflow the sum.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeatTotals {
    entries: Vec<(String, u64)>,
}

impl SeatTotals {
    pub fn new(entries: Vec<(String, u64)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, party: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(p, _)| p == party)
            .map(|(_, s)| *s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(p, s)| (p.as_str(), *s))
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, s)| s).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SeatTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (party, seats) in &self.entries {
            map.serialize_entry(party, seats)?;
        }
        map.end()
    }
}

/// Nationwide vote standing of one party.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyVotes {
    pub party: String,
    pub votes: f64,
    pub share: f64,
    pub eligible: bool,
}

/// Everything one allocation run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub totals: SeatTotals,
    /// Input columns followed by one `<party>_seats` column per party.
    pub annotated_table: ElectionTable,
    /// Nationwide sums laid out in the annotated table's schema.
    pub totals_row: Vec<Cell>,
    pub eligible_parties: Vec<String>,
    pub party_votes: Vec<PartyVotes>,
    pub districts: Vec<DistrictAllocation>,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct PartyResultRow {
    #[serde(rename = "Party")]
    #[tabled(rename = "Party")]
    pub party: String,
    #[serde(rename = "Votes")]
    #[tabled(rename = "Votes")]
    pub votes: String,
    #[serde(rename = "VoteShare")]
    #[tabled(rename = "VoteShare")]
    pub vote_share: String,
    #[serde(rename = "Eligible")]
    #[tabled(rename = "Eligible")]
    pub eligible: String,
    #[serde(rename = "Seats")]
    #[tabled(rename = "Seats")]
    pub seats: u64,
}

#[derive(Debug, Serialize)]
pub struct PartySummary {
    pub party: String,
    pub votes: f64,
    pub vote_share: f64,
    pub eligible: bool,
    pub seats: u64,
}

#[derive(Debug, Serialize)]
pub struct ElectionSummary {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub threshold: f64,
    pub total_votes: f64,
    pub total_seats: u64,
    pub districts_allocated: usize,
    pub districts_skipped: usize,
    pub eligible_parties: Vec<String>,
    pub totals: SeatTotals,
    pub parties: Vec<PartySummary>,
    pub districts: Vec<DistrictAllocation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_rows_are_padded() {
        let table = ElectionTable::new(["District", "Seats", "A"]).with_row(vec!["X".into()]);
        assert_eq!(table.rows()[0].len(), 3);
        assert!(table.cell(0, 2).is_missing());
    }

    #[test]
    fn nan_counts_as_missing() {
        assert!(Cell::Number(f64::NAN).is_missing());
        assert_eq!(Cell::Number(f64::NAN).as_number(), None);
        assert_eq!(Cell::Number(f64::NAN).to_string(), "");
        assert_eq!(Cell::from(2.0).to_string(), "2");
    }

    #[test]
    fn seat_totals_serialize_in_party_order() {
        let totals = SeatTotals::new(vec![("Zeta".into(), 2), ("Alpha".into(), 1)]);
        let json = serde_json::to_string(&totals).unwrap();
        assert_eq!(json, r#"{"Zeta":2,"Alpha":1}"#);
        assert_eq!(totals.get("Alpha"), Some(1));
        assert_eq!(totals.get("Beta"), None);
        assert_eq!(totals.total(), 3);
    }

    #[test]
    fn seat_totals_do_not_overflow_u32() {
        let big = u64::from(u32::MAX);
        let totals = SeatTotals::new(vec![("A".into(), big), ("B".into(), big)]);
        assert_eq!(totals.total(), 2 * big);
    }
}

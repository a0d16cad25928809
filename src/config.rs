use std::collections::{HashMap, HashSet};

use crate::error::{AllocationError, AllocationResult};

/// Which columns to read and how strict the threshold is.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationConfig {
    pub district_col: String,
    pub seats_col: String,
    /// Party vote columns. Order matters: it breaks ties.
    pub parties: Vec<String>,
    /// Minimum nationwide vote share, as a fraction.
    pub threshold: f64,
}

impl AllocationConfig {
    pub fn new<I, S>(district_col: impl Into<String>, seats_col: impl Into<String>, parties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            district_col: district_col.into(),
            seats_col: seats_col.into(),
            parties: parties.into_iter().map(Into::into).collect(),
            threshold: 0.0,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn validate(&self) -> AllocationResult<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(AllocationError::InvalidThreshold {
                threshold: self.threshold,
            });
        }
        if self.parties.is_empty() {
            return Err(AllocationError::EmptyPartyList);
        }
        let mut seen = HashSet::new();
        for party in &self.parties {
            if !seen.insert(party.as_str()) {
                return Err(AllocationError::DuplicateParty {
                    party: party.clone(),
                });
            }
        }

        // Every input column and every generated `<party>_seats` column must
        // play exactly one role, or the annotated table would overwrite input.
        let mut roles: HashMap<String, String> = HashMap::new();
        let claims = [
            (self.district_col.clone(), "the district column".to_string()),
            (self.seats_col.clone(), "the seat-count column".to_string()),
        ]
        .into_iter()
        .chain(
            self.parties
                .iter()
                .map(|p| (p.clone(), format!("the vote column of {}", p))),
        )
        .chain(
            self.parties
                .iter()
                .map(|p| (Self::seats_column(p), format!("the seats column of {}", p))),
        );
        for (column, role) in claims {
            if let Some(first) = roles.get(&column) {
                return Err(AllocationError::ColumnConflict {
                    column,
                    first: first.clone(),
                    second: role,
                });
            }
            roles.insert(column, role);
        }
        Ok(())
    }

    /// Name of the seats column added for `party` in the annotated table.
    pub fn seats_column(party: &str) -> String {
        format!("{}_seats", party)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AllocationConfig {
        AllocationConfig::new("District", "Seats", ["A", "B"])
    }

    #[test]
    fn accepts_bounds() {
        assert!(config().with_threshold(0.0).validate().is_ok());
        assert!(config().with_threshold(1.0).validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        for t in [-0.01, 1.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                config().with_threshold(t).validate(),
                Err(AllocationError::InvalidThreshold { .. })
            ));
        }
    }

    #[test]
    fn rejects_empty_and_duplicate_parties() {
        let empty = AllocationConfig::new("District", "Seats", Vec::<String>::new());
        assert_eq!(empty.validate(), Err(AllocationError::EmptyPartyList));

        let dup = AllocationConfig::new("District", "Seats", ["A", "B", "A"]);
        assert_eq!(
            dup.validate(),
            Err(AllocationError::DuplicateParty { party: "A".into() })
        );
    }

    #[test]
    fn seats_column_may_not_shadow_a_party() {
        let cfg = AllocationConfig::new("D", "S", ["A", "A_seats"]);
        assert_eq!(
            cfg.validate(),
            Err(AllocationError::ColumnConflict {
                column: "A_seats".into(),
                first: "the vote column of A_seats".into(),
                second: "the seats column of A".into(),
            })
        );
    }

    #[test]
    fn structural_columns_may_not_overlap() {
        let cases = [
            AllocationConfig::new("D", "S", ["D", "B"]),
            AllocationConfig::new("D", "S", ["S"]),
            AllocationConfig::new("A_seats", "S", ["A"]),
            AllocationConfig::new("D", "A_seats", ["A"]),
            AllocationConfig::new("D", "D", ["A"]),
        ];
        for cfg in cases {
            assert!(
                matches!(cfg.validate(), Err(AllocationError::ColumnConflict { .. })),
                "{:?}",
                cfg
            );
        }
    }
}

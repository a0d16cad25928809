//! Nationwide threshold filter.
//!
//! Eligibility is decided once for the whole election from each party's
//! summed votes, never per district.

use tracing::debug;

use crate::error::{AllocationError, AllocationResult};

/// Per-party vote totals and the resulting eligibility decision.
#[derive(Debug, Clone, PartialEq)]
pub struct Eligibility {
    /// Nationwide votes per party, in party-list order.
    pub vote_totals: Vec<f64>,
    pub grand_total: f64,
    /// Indices into the party list of the parties that passed, ascending.
    pub eligible: Vec<usize>,
}

impl Eligibility {
    pub fn share(&self, party: usize) -> f64 {
        self.vote_totals[party] / self.grand_total
    }

    pub fn is_eligible(&self, party: usize) -> bool {
        self.eligible.binary_search(&party).is_ok()
    }
}

/// Sum each party's column of `votes` (one inner slice per district, one
/// entry per party) and keep the parties whose share reaches `threshold`.
pub fn filter_eligible<V: AsRef<[f64]>>(
    votes: &[V],
    party_count: usize,
    threshold: f64,
) -> AllocationResult<Eligibility> {
    let mut vote_totals = vec![0.0; party_count];
    for district in votes {
        for (total, v) in vote_totals.iter_mut().zip(district.as_ref()) {
            *total += v;
        }
    }
    let grand_total: f64 = vote_totals.iter().sum();
    if !grand_total.is_finite() || vote_totals.iter().any(|t| !t.is_finite()) {
        return Err(AllocationError::VoteTotalOverflow);
    }
    if grand_total <= 0.0 {
        return Err(AllocationError::DivisionUndefined);
    }

    let eligible: Vec<usize> = vote_totals
        .iter()
        .enumerate()
        .filter(|(_, total)| *total / grand_total >= threshold)
        .map(|(i, _)| i)
        .collect();
    debug!(
        grand_total,
        eligible = eligible.len(),
        parties = party_count,
        "computed eligibility"
    );
    if eligible.is_empty() {
        return Err(AllocationError::NoEligibleParties { threshold });
    }

    Ok(Eligibility {
        vote_totals,
        grand_total,
        eligible,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_below_threshold_is_excluded() {
        let e = filter_eligible(&[[90.0, 10.0]], 2, 0.15).unwrap();
        assert_eq!(e.eligible, vec![0]);
        assert_eq!(e.vote_totals, vec![90.0, 10.0]);
        assert!((e.share(1) - 0.10).abs() < 1e-12);
        assert!(!e.is_eligible(1));
    }

    #[test]
    fn share_equal_to_threshold_is_included() {
        let e = filter_eligible(&[[75.0, 25.0]], 2, 0.25).unwrap();
        assert_eq!(e.eligible, vec![0, 1]);
    }

    #[test]
    fn sums_across_districts() {
        let e = filter_eligible(&[[100.0, 150.0], [200.0, 50.0]], 2, 0.0).unwrap();
        assert_eq!(e.vote_totals, vec![300.0, 200.0]);
        assert_eq!(e.grand_total, 500.0);
    }

    #[test]
    fn zero_grand_total_is_undefined() {
        assert_eq!(
            filter_eligible(&[[0.0, 0.0]], 2, 0.0),
            Err(AllocationError::DivisionUndefined)
        );
        let none: [[f64; 2]; 0] = [];
        assert_eq!(
            filter_eligible(&none, 2, 0.0),
            Err(AllocationError::DivisionUndefined)
        );
    }

    #[test]
    fn overflowing_totals_are_rejected() {
        // Each cell is finite; the per-party sum is not.
        assert_eq!(
            filter_eligible(&[[1e308, 10.0], [1e308, 10.0]], 2, 0.0),
            Err(AllocationError::VoteTotalOverflow)
        );
        // Per-party sums are finite; the grand total is not.
        assert_eq!(
            filter_eligible(&[[1.5e308, 1.5e308]], 2, 0.0),
            Err(AllocationError::VoteTotalOverflow)
        );
    }

    #[test]
    fn empty_eligible_set_is_an_error() {
        assert_eq!(
            filter_eligible(&[[50.0, 50.0]], 2, 0.6),
            Err(AllocationError::NoEligibleParties { threshold: 0.6 })
        );
    }
}

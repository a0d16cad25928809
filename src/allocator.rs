//! D'Hondt seat allocation over an election table.
//!
//! `simulate_election` validates everything up front (columns, vote cells,
//! threshold, eligibility) and only then allocates, so it either returns a
//! complete `ResultSet` or an error with no partial output.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::aggregate::aggregate;
use crate::config::AllocationConfig;
use crate::eligibility::{filter_eligible, Eligibility};
use crate::error::{AllocationError, AllocationResult};
use crate::types::{Cell, DistrictAllocation, ElectionTable, ResultSet};

/// Column positions resolved against the table header.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedColumns {
    pub district: usize,
    pub seats: usize,
    pub parties: Vec<usize>,
}

pub(crate) fn resolve_columns(
    table: &ElectionTable,
    config: &AllocationConfig,
) -> AllocationResult<ResolvedColumns> {
    let district = table
        .column_index(&config.district_col)
        .ok_or_else(|| AllocationError::MissingColumn {
            role: "district",
            column: config.district_col.clone(),
        })?;
    let seats = table
        .column_index(&config.seats_col)
        .ok_or_else(|| AllocationError::MissingColumn {
            role: "seat count",
            column: config.seats_col.clone(),
        })?;
    let parties = config
        .parties
        .iter()
        .map(|party| {
            table
                .column_index(party)
                .ok_or_else(|| AllocationError::InvalidPartyColumn {
                    party: party.clone(),
                })
        })
        .collect::<AllocationResult<Vec<_>>>()?;
    Ok(ResolvedColumns {
        district,
        seats,
        parties,
    })
}

/// Votes for every configured party in every row. Missing and NaN cells
/// count as zero; infinite, negative or textual votes are rejected.
pub(crate) fn read_votes(
    table: &ElectionTable,
    columns: &ResolvedColumns,
    config: &AllocationConfig,
) -> AllocationResult<Vec<Vec<f64>>> {
    let mut matrix = Vec::with_capacity(table.len());
    for (row_idx, row) in table.rows().iter().enumerate() {
        let mut votes = Vec::with_capacity(columns.parties.len());
        for (party, &col) in config.parties.iter().zip(&columns.parties) {
            let v = match &row[col] {
                Cell::Missing => 0.0,
                Cell::Number(n) if n.is_nan() => 0.0,
                Cell::Number(n) if n.is_infinite() => {
                    return Err(AllocationError::NonFiniteVotes {
                        district: table.cell(row_idx, columns.district).to_string(),
                        party: party.clone(),
                        votes: *n,
                    })
                }
                Cell::Number(n) if *n < 0.0 => {
                    return Err(AllocationError::NegativeVotes {
                        district: table.cell(row_idx, columns.district).to_string(),
                        party: party.clone(),
                        votes: *n,
                    })
                }
                Cell::Number(n) => *n,
                Cell::Text(s) => {
                    return Err(AllocationError::NonNumericVotes {
                        district: table.cell(row_idx, columns.district).to_string(),
                        party: party.clone(),
                        value: s.clone(),
                    })
                }
            };
            votes.push(v);
        }
        matrix.push(votes);
    }
    Ok(matrix)
}

/// Largest seat count a single district may hold. Larger counts are
/// treated like any other unusable seat count and the district is skipped.
pub const MAX_DISTRICT_SEATS: u32 = 100_000;

/// Interpret a seat-count cell. `None` means the district is skipped:
/// missing, non-numeric, zero, negative, fractional or above
/// [`MAX_DISTRICT_SEATS`].
pub fn seat_count(cell: &Cell) -> Option<u32> {
    let n = cell.as_number()?;
    if !n.is_finite() || n <= 0.0 || n.fract() != 0.0 || n > f64::from(MAX_DISTRICT_SEATS) {
        return None;
    }
    Some(n as u32)
}

/// Run `seats` D'Hondt rounds over `votes` and return the seats won by each
/// entry, in the same order.
///
/// Each round awards one seat to the largest `votes / (won + 1)`. An exact
/// tie goes to the earliest entry, which is also how a district where every
/// quotient is zero still hands out all its seats.
pub fn allocate_district(votes: &[f64], seats: u32) -> Vec<u32> {
    let mut won = vec![0u32; votes.len()];
    for _ in 0..seats {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in votes.iter().enumerate() {
            let quotient = v / f64::from(won[i] + 1);
            match best {
                Some((_, top)) if quotient <= top => {}
                _ => best = Some((i, quotient)),
            }
        }
        match best {
            Some((winner, _)) => won[winner] += 1,
            None => break,
        }
    }
    won
}

/// Parties that pass the threshold, in party-list order.
pub fn eligible_parties(
    table: &ElectionTable,
    config: &AllocationConfig,
) -> AllocationResult<Vec<String>> {
    config.validate()?;
    let columns = resolve_columns(table, config)?;
    let votes = read_votes(table, &columns, config)?;
    let eligibility = filter_eligible(&votes, config.parties.len(), config.threshold)?;
    Ok(eligibility
        .eligible
        .iter()
        .map(|&i| config.parties[i].clone())
        .collect())
}

/// Allocate seats in every district of `table` and aggregate the results.
///
/// The table is only read; the annotated copy in the result is a new table.
pub fn simulate_election(
    table: &ElectionTable,
    config: &AllocationConfig,
) -> AllocationResult<ResultSet> {
    config.validate()?;
    let columns = resolve_columns(table, config)?;
    let votes = read_votes(table, &columns, config)?;
    let eligibility = filter_eligible(&votes, config.parties.len(), config.threshold)?;

    let districts = allocate_districts(table, config, &columns, &votes, &eligibility);
    let result = aggregate(table, config, &columns, &eligibility, districts);

    info!(
        districts = result.districts.len(),
        eligible = result.eligible_parties.len(),
        seats = result.totals.total(),
        "allocation complete"
    );
    Ok(result)
}

/// One allocation per distinct district id, in first-appearance order.
///
/// Rows without a district id are skipped entirely: they get no allocation
/// and their seats columns in the annotated table stay zero. A repeated id
/// reuses the allocation of its first row.
fn allocate_districts(
    table: &ElectionTable,
    config: &AllocationConfig,
    columns: &ResolvedColumns,
    votes: &[Vec<f64>],
    eligibility: &Eligibility,
) -> Vec<DistrictAllocation> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut districts = Vec::new();

    for (row_idx, row_votes) in votes.iter().enumerate() {
        let id_cell = table.cell(row_idx, columns.district);
        let district = id_cell.to_string();
        if id_cell.is_missing() || district.trim().is_empty() {
            warn!(row = row_idx, "missing district id; row skipped");
            continue;
        }
        if let Some(first) = seen.get(&district) {
            warn!(
                district = %district,
                row = row_idx,
                first_row = *first,
                "duplicate district id; reusing the first row's allocation"
            );
            continue;
        }
        seen.insert(district.clone(), row_idx);

        let seats_cell = table.cell(row_idx, columns.seats);
        let eligible_votes: Vec<f64> = eligibility
            .eligible
            .iter()
            .map(|&p| row_votes[p])
            .collect();

        let (won, skipped) = match seat_count(seats_cell) {
            Some(seats) => (allocate_district(&eligible_votes, seats), false),
            None => {
                warn!(
                    district = %district,
                    seats = %seats_cell,
                    "no usable seat count; district skipped"
                );
                (vec![0; eligible_votes.len()], true)
            }
        };

        let seats: Vec<(String, u32)> = eligibility
            .eligible
            .iter()
            .zip(won)
            .map(|(&p, s)| (config.parties[p].clone(), s))
            .collect();
        debug!(district = %district, ?seats, "district allocated");
        districts.push(DistrictAllocation {
            district,
            seats,
            skipped,
        });
    }
    districts
}

use std::collections::HashMap;

use crate::allocator::ResolvedColumns;
use crate::config::AllocationConfig;
use crate::eligibility::Eligibility;
use crate::types::{Cell, DistrictAllocation, ElectionTable, PartyVotes, ResultSet, SeatTotals};

/// Label written into the district column of the totals row.
pub const TOTALS_LABEL: &str = "Total";

/// Fold per-district allocations into party totals, an annotated copy of
/// `table` and a totals row.
///
/// Ineligible parties still get a `<party>_seats` column (all zeros) and
/// their votes still count in the totals row.
pub(crate) fn aggregate(
    table: &ElectionTable,
    config: &AllocationConfig,
    columns: &ResolvedColumns,
    eligibility: &Eligibility,
    districts: Vec<DistrictAllocation>,
) -> ResultSet {
    let totals = SeatTotals::new(
        config
            .parties
            .iter()
            .map(|party| {
                let seats: u64 = districts
                    .iter()
                    .map(|d| u64::from(d.seats_for(party)))
                    .sum();
                (party.clone(), seats)
            })
            .collect(),
    );

    // A seats column already present in the input is overwritten rather
    // than duplicated. `AllocationConfig::validate` guarantees it is not
    // also a district, seat-count or party column.
    let mut header: Vec<String> = table.columns().to_vec();
    let seat_cols: Vec<usize> = config
        .parties
        .iter()
        .map(|party| {
            let name = AllocationConfig::seats_column(party);
            match header.iter().position(|c| *c == name) {
                Some(idx) => idx,
                None => {
                    header.push(name);
                    header.len() - 1
                }
            }
        })
        .collect();

    let by_district: HashMap<&str, &DistrictAllocation> =
        districts.iter().map(|d| (d.district.as_str(), d)).collect();

    let mut annotated = ElectionTable::new(header);
    for row in table.rows() {
        let mut cells = row.clone();
        cells.resize(annotated.columns().len(), Cell::Missing);
        let district = row[columns.district].to_string();
        let allocation = by_district.get(district.as_str());
        for (party, &col) in config.parties.iter().zip(&seat_cols) {
            let seats = allocation.map_or(0, |a| a.seats_for(party));
            cells[col] = Cell::from(seats);
        }
        annotated.push_row(cells);
    }

    let mut totals_row = vec![Cell::Missing; annotated.columns().len()];
    totals_row[columns.district] = Cell::from(TOTALS_LABEL);
    let seat_sum: f64 = table
        .rows()
        .iter()
        .filter_map(|r| r[columns.seats].as_number())
        .filter(|n| n.is_finite())
        .sum();
    totals_row[columns.seats] = Cell::Number(seat_sum);
    for (i, (party, &col)) in config.parties.iter().zip(&seat_cols).enumerate() {
        totals_row[columns.parties[i]] = Cell::Number(eligibility.vote_totals[i]);
        totals_row[col] = Cell::from(totals.get(party).unwrap_or(0u64));
    }

    let party_votes = config
        .parties
        .iter()
        .enumerate()
        .map(|(i, party)| PartyVotes {
            party: party.clone(),
            votes: eligibility.vote_totals[i],
            share: eligibility.share(i),
            eligible: eligibility.is_eligible(i),
        })
        .collect();

    ResultSet {
        totals,
        annotated_table: annotated,
        totals_row,
        eligible_parties: eligibility
            .eligible
            .iter()
            .map(|&i| config.parties[i].clone())
            .collect(),
        party_votes,
        districts,
    }
}

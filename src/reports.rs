use crate::config::AllocationConfig;
use crate::types::{ElectionSummary, PartyResultRow, PartySummary, ResultSet};
use crate::util::{format_number, format_share};

/// One display row per configured party, most seats first. Parties with
/// equal seats keep party-list order.
pub fn generate_party_table(result: &ResultSet) -> Vec<PartyResultRow> {
    let mut rows: Vec<(u64, PartyResultRow)> = result
        .party_votes
        .iter()
        .map(|pv| {
            let seats = result.totals.get(&pv.party).unwrap_or(0);
            let row = PartyResultRow {
                party: pv.party.clone(),
                votes: format_number(pv.votes, 0),
                vote_share: format_share(pv.share),
                eligible: if pv.eligible { "Yes" } else { "No" }.to_string(),
                seats,
            };
            (seats, row)
        })
        .collect();
    rows.sort_by(|a, b| b.0.cmp(&a.0));
    rows.into_iter().map(|(_, row)| row).collect()
}

pub fn generate_summary(result: &ResultSet, config: &AllocationConfig) -> ElectionSummary {
    let parties = result
        .party_votes
        .iter()
        .map(|pv| PartySummary {
            party: pv.party.clone(),
            votes: pv.votes,
            vote_share: pv.share,
            eligible: pv.eligible,
            seats: result.totals.get(&pv.party).unwrap_or(0),
        })
        .collect();
    let districts_skipped = result.districts.iter().filter(|d| d.skipped).count();
    ElectionSummary {
        generated_at: chrono::Utc::now(),
        threshold: config.threshold,
        total_votes: result.party_votes.iter().map(|pv| pv.votes).sum(),
        total_seats: result.totals.total(),
        districts_allocated: result.districts.len() - districts_skipped,
        districts_skipped,
        eligible_parties: result.eligible_parties.clone(),
        totals: result.totals.clone(),
        parties,
        districts: result.districts.clone(),
    }
}

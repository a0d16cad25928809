use dhondt::{allocate_district, simulate_election, AllocationConfig, Cell, ElectionTable};
use proptest::prelude::*;

const PARTIES: [&str; 4] = ["A", "B", "C", "D"];

fn build_table(districts: &[(Vec<u32>, u32)]) -> ElectionTable {
    let mut columns = vec!["District".to_string(), "Seats".to_string()];
    columns.extend(PARTIES.iter().map(|p| p.to_string()));
    let mut t = ElectionTable::new(columns);
    for (i, (votes, seats)) in districts.iter().enumerate() {
        let mut row: Vec<Cell> = vec![format!("D{}", i).into(), (*seats).into()];
        row.extend(votes.iter().map(|v| Cell::from(*v)));
        t.push_row(row);
    }
    t
}

fn election() -> impl Strategy<Value = Vec<(Vec<u32>, u32)>> {
    prop::collection::vec(
        (prop::collection::vec(0u32..10_000, PARTIES.len()), 0u32..12),
        1..8,
    )
    .prop_filter("needs at least one vote", |ds| {
        ds.iter().flat_map(|(v, _)| v).any(|v| *v > 0)
    })
}

proptest! {
    #[test]
    fn district_seats_are_conserved(votes in prop::collection::vec(0u32..1_000, 1..6), seats in 0u32..40) {
        let votes: Vec<f64> = votes.into_iter().map(f64::from).collect();
        let won = allocate_district(&votes, seats);
        prop_assert_eq!(won.len(), votes.len());
        prop_assert_eq!(won.iter().sum::<u32>(), seats);
    }

    #[test]
    fn totals_match_district_sums(districts in election()) {
        let t = build_table(&districts);
        let config = AllocationConfig::new("District", "Seats", PARTIES);
        let result = simulate_election(&t, &config).unwrap();

        for (d, (_, seats)) in result.districts.iter().zip(&districts) {
            prop_assert_eq!(d.total(), *seats);
        }
        for party in PARTIES {
            let summed: u64 = result.districts.iter().map(|d| u64::from(d.seats_for(party))).sum();
            prop_assert_eq!(result.totals.get(party), Some(summed));
        }
        let expected: u64 = districts.iter().map(|(_, s)| u64::from(*s)).sum();
        prop_assert_eq!(result.totals.total(), expected);
    }

    #[test]
    fn raising_threshold_never_grows_eligible_set(
        districts in election(),
        low in 0.0f64..0.5,
        step in 0.0f64..0.5,
    ) {
        let t = build_table(&districts);
        let low_cfg = AllocationConfig::new("District", "Seats", PARTIES).with_threshold(low);
        let high_cfg = low_cfg.clone().with_threshold(low + step);

        let low_res = simulate_election(&t, &low_cfg);
        let high_res = simulate_election(&t, &high_cfg);
        if let (Ok(lo), Ok(hi)) = (&low_res, &high_res) {
            for party in &hi.eligible_parties {
                prop_assert!(lo.eligible_parties.contains(party));
            }
            for pv in hi.party_votes.iter().filter(|pv| !pv.eligible) {
                prop_assert_eq!(hi.totals.get(&pv.party), Some(0));
            }
        }
        if low_res.is_err() {
            prop_assert!(high_res.is_err());
        }
    }

    #[test]
    fn allocation_is_deterministic(districts in election(), threshold in 0.0f64..0.3) {
        let t = build_table(&districts);
        let config = AllocationConfig::new("District", "Seats", PARTIES).with_threshold(threshold);
        prop_assert_eq!(simulate_election(&t, &config), simulate_election(&t, &config));
    }
}

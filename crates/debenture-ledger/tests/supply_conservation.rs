//! Property: after any sequence of purchases, sold supply equals the sum
//! of all investor positions.

use std::sync::Arc;

use chrono::Duration;
use debenture_core::{AccountId, SystemClock};
use debenture_ledger::{BondLedger, InMemorySettlement, SettlementBackend};
use proptest::prelude::*;

const FACE_VALUE: u128 = 100;
const TOTAL_SUPPLY: u64 = 100;
const BUYERS: usize = 5;

fn buyer(index: usize) -> AccountId {
    AccountId::new(format!("buyer-{index}"))
}

proptest! {
    /// `total_supply - available_supply` equals the sum of recorded
    /// positions for every prefix of an arbitrary purchase sequence,
    /// whether the individual purchases succeed or fail.
    #[test]
    fn sold_supply_equals_sum_of_positions(
        purchases in prop::collection::vec((0..BUYERS, 1..=30_u64), 0..40)
    ) {
        let settlement = Arc::new(InMemorySettlement::new());
        let ledger = BondLedger::new(
            Arc::new(SystemClock),
            settlement.clone(),
            AccountId::new("treasury"),
        );

        let bond_id = ledger
            .issue_bond(
                AccountId::new("issuer"),
                "Property 5% 1Y",
                FACE_VALUE,
                chrono::Utc::now() + Duration::days(365),
                500,
                TOTAL_SUPPLY,
            )
            .unwrap();

        for index in 0..BUYERS {
            settlement
                .deposit(&buyer(index), u128::from(TOTAL_SUPPLY) * FACE_VALUE)
                .unwrap();
        }

        for (index, amount) in purchases {
            // Over-supply and matured-bond failures are part of the
            // property: they must leave the books untouched.
            let _ = ledger.purchase_bond(
                buyer(index),
                bond_id,
                amount,
                u128::from(amount) * FACE_VALUE,
            );

            let details = ledger.bond_details(bond_id);
            prop_assert!(details.available_supply <= details.total_supply);

            let held: u64 = (0..BUYERS)
                .map(|i| ledger.investment_details(&buyer(i), bond_id).amount)
                .sum();
            prop_assert_eq!(details.total_supply - details.available_supply, held);
        }
    }
}

use crate::model::{Money, PotStanding, PotSummary, Transaction};
use indexmap::IndexMap;

/// Running tally of a buy-in pot.
pub struct PotTally;

impl PotTally {
    /// Every transaction counts as a buy-in by its payer; split data is ignored.
    pub fn tally(&self, buy_ins: &[Transaction]) -> PotSummary {
        let mut totals: IndexMap<_, PotStanding> = IndexMap::new();
        let mut total = Money::ZERO;

        for buy_in in buy_ins {
            let standing = totals
                .entry(buy_in.payer.clone())
                .or_insert_with_key(|participant| PotStanding {
                    participant: participant.clone(),
                    total: Money::ZERO,
                    count: 0,
                });
            standing.total += buy_in.amount;
            standing.count += 1;
            total += buy_in.amount;
        }

        let mut standings: Vec<PotStanding> = totals.into_values().collect();
        standings.sort_by(|lhs, rhs| rhs.total.cmp(&lhs.total));

        tracing::debug!(
            buy_in_count = buy_ins.len(),
            player_count = standings.len(),
            pot = %total,
            "Tallied pot"
        );

        PotSummary { total, standings }
    }
}

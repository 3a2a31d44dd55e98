use crate::model::{LedgerSummary, ShareSummary, Snapshot};
use potshare_domain::{LedgerAggregator, PotTally, SettlementPlanner};

/// A snapshot together with the summary recomputed from it.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessedSnapshot {
    pub snapshot: Snapshot,
    pub summary: ShareSummary,
}

/// Recomputes a share summary from scratch for every snapshot it is given.
///
/// Holds no state between snapshots; the only configuration is the
/// settlement tolerance.
#[derive(Clone, Copy, Debug, Default)]
pub struct SnapshotProcessor {
    planner: SettlementPlanner,
}

impl SnapshotProcessor {
    pub fn new(planner: SettlementPlanner) -> Self {
        Self { planner }
    }

    pub fn planner(&self) -> &SettlementPlanner {
        &self.planner
    }

    pub fn process(&self, snapshot: &Snapshot) -> ShareSummary {
        match snapshot {
            Snapshot::Ledger(ledger) => {
                let participants = snapshot.participant_ids();
                let balances = LedgerAggregator.aggregate(&participants, &ledger.transactions);
                let plan = self.planner.plan(&balances.net_balances());
                tracing::info!(
                    ledger_id = %ledger.ledger_id,
                    participant_count = participants.len(),
                    transaction_count = ledger.transactions.len(),
                    transfer_count = plan.len(),
                    "Recomputed ledger summary"
                );
                ShareSummary::Ledger(LedgerSummary { balances, plan })
            }
            Snapshot::Pot(pot) => {
                let summary = PotTally.tally(&pot.buy_ins);
                tracing::info!(
                    game_id = %pot.game_id,
                    buy_in_count = pot.buy_ins.len(),
                    pot = %summary.total,
                    "Recomputed pot summary"
                );
                ShareSummary::Pot(summary)
            }
        }
    }

    pub fn process_owned(&self, snapshot: Snapshot) -> ProcessedSnapshot {
        let summary = self.process(&snapshot);
        ProcessedSnapshot { snapshot, summary }
    }

    /// Lazily process a push-based feed, one full recomputation per snapshot,
    /// each finished before the next one is pulled.
    pub fn replay<I>(self, feed: I) -> impl Iterator<Item = ProcessedSnapshot>
    where
        I: IntoIterator<Item = Snapshot>,
    {
        feed.into_iter()
            .map(move |snapshot| self.process_owned(snapshot))
    }
}

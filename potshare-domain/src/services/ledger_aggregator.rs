use crate::model::{BalanceSheet, ParticipantId, SplitPolicy, Transaction};
use fxhash::FxHashSet;

/// Reduces a ledger into per-participant paid/owed totals.
pub struct LedgerAggregator;

impl LedgerAggregator {
    /// Aggregate `transactions` against the live participant set.
    ///
    /// Every participant gets an entry even without activity. Payers and
    /// weighted-split entries outside the set are tracked as well, after the
    /// set members.
    ///
    /// Equal splits are always divided across the participant set passed in
    /// here, not the set that existed when the transaction was recorded, so a
    /// roster change re-splits past expenses. With an empty set an equal split
    /// adds nothing to anyone's `owed`.
    pub fn aggregate(
        &self,
        participants: &[ParticipantId],
        transactions: &[Transaction],
    ) -> BalanceSheet {
        let mut sheet = BalanceSheet::new();
        let mut roster: Vec<&ParticipantId> = Vec::with_capacity(participants.len());
        let mut seen: FxHashSet<&ParticipantId> = FxHashSet::default();
        for participant in participants {
            if seen.insert(participant) {
                sheet.entry_mut(participant);
                roster.push(participant);
            }
        }

        for transaction in transactions {
            sheet.entry_mut(&transaction.payer).paid += transaction.amount;

            match &transaction.split {
                Some(SplitPolicy::Equal) => {
                    let share = transaction.amount.split_evenly(roster.len());
                    for participant in &roster {
                        sheet.entry_mut(participant).owed += share;
                    }
                }
                Some(SplitPolicy::Weighted(ratios)) => {
                    for (participant, ratio) in ratios {
                        sheet.entry_mut(participant).owed += transaction.amount * *ratio;
                    }
                }
                None => {}
            }
        }

        tracing::debug!(
            participant_count = roster.len(),
            transaction_count = transactions.len(),
            entry_count = sheet.len(),
            "Aggregated ledger"
        );

        sheet
    }
}

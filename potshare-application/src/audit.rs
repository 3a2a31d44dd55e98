//! Data-quality checks layered over the pure core.
//!
//! The aggregator and planner accept anything; this module is where callers
//! that want strict validation find out what was off about a snapshot.

use crate::model::{ShareSummary, Snapshot};
use fxhash::FxHashSet;
use potshare_domain::{Money, ParticipantId, SettlementPlanner, SplitPolicy};
use rust_decimal::Decimal;
use thiserror::Error;

/// Weighted ratios may drift this far from one before they are reported.
const RATIO_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 4);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataQualityIssue {
    #[error("Transaction {transaction_id} has a negative amount ({amount})")]
    NegativeAmount {
        transaction_id: String,
        amount: Money,
    },
    #[error("Transaction {transaction_id} split ratios sum to {ratio_total}, not 1")]
    UnbalancedSplit {
        transaction_id: String,
        ratio_total: Decimal,
    },
    #[error("Transaction {transaction_id} references unknown participant {participant}")]
    UnknownParticipant {
        transaction_id: String,
        participant: ParticipantId,
    },
    #[error("Transaction {transaction_id} is split equally across an empty participant set")]
    EqualSplitWithoutParticipants { transaction_id: String },
    #[error("Net balances sum to {total} instead of zero")]
    NonConservedTotal { total: Money },
    #[error("Participant {participant} still has {balance} outstanding after settlement")]
    UnsettledBalance {
        participant: ParticipantId,
        balance: Money,
    },
}

/// Reports data-quality conditions of a snapshot and its summary as values.
#[derive(Clone, Copy, Debug, Default)]
pub struct LedgerAudit {
    planner: SettlementPlanner,
}

impl LedgerAudit {
    pub fn new(planner: SettlementPlanner) -> Self {
        Self { planner }
    }

    pub fn inspect(&self, snapshot: &Snapshot, summary: &ShareSummary) -> Vec<DataQualityIssue> {
        let mut issues = Vec::new();
        let known: FxHashSet<&ParticipantId> = snapshot
            .participants()
            .iter()
            .map(|participant| &participant.id)
            .collect();

        for transaction in snapshot.transactions() {
            if transaction.amount.is_negative() {
                issues.push(DataQualityIssue::NegativeAmount {
                    transaction_id: transaction.id.clone(),
                    amount: transaction.amount,
                });
            }
            if !known.contains(&transaction.payer) {
                issues.push(DataQualityIssue::UnknownParticipant {
                    transaction_id: transaction.id.clone(),
                    participant: transaction.payer.clone(),
                });
            }

            match &transaction.split {
                Some(SplitPolicy::Equal) if known.is_empty() => {
                    issues.push(DataQualityIssue::EqualSplitWithoutParticipants {
                        transaction_id: transaction.id.clone(),
                    });
                }
                Some(SplitPolicy::Weighted(ratios)) => {
                    let ratio_total: Decimal = ratios.values().copied().sum();
                    if (ratio_total - Decimal::ONE).abs() > RATIO_TOLERANCE {
                        issues.push(DataQualityIssue::UnbalancedSplit {
                            transaction_id: transaction.id.clone(),
                            ratio_total,
                        });
                    }
                    for participant in ratios.keys() {
                        if !known.contains(participant) && participant != &transaction.payer {
                            issues.push(DataQualityIssue::UnknownParticipant {
                                transaction_id: transaction.id.clone(),
                                participant: participant.clone(),
                            });
                        }
                    }
                }
                Some(SplitPolicy::Equal) | None => {}
            }
        }

        if let ShareSummary::Ledger(ledger) = summary {
            let total = ledger.balances.net_total();
            if !total.is_within(self.planner.epsilon()) {
                issues.push(DataQualityIssue::NonConservedTotal { total });
            }
            issues.extend(ledger.plan.unsettled.iter().map(|(participant, balance)| {
                DataQualityIssue::UnsettledBalance {
                    participant: participant.clone(),
                    balance: *balance,
                }
            }));
        }

        if !issues.is_empty() {
            tracing::warn!(
                snapshot_id = snapshot.id(),
                issue_count = issues.len(),
                "Snapshot has data-quality issues"
            );
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{LedgerSnapshot, PotSnapshot},
        snapshot_processor::SnapshotProcessor,
    };
    use potshare_domain::{Participant, Transaction};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn inspect(snapshot: Snapshot) -> Vec<DataQualityIssue> {
        let summary = SnapshotProcessor::default().process(&snapshot);
        LedgerAudit::default().inspect(&snapshot, &summary)
    }

    fn ledger(participants: &[&str], transactions: Vec<Transaction>) -> Snapshot {
        Snapshot::Ledger(LedgerSnapshot {
            ledger_id: "ledger".to_string(),
            participants: participants
                .iter()
                .map(|&id| Participant::new(id, id))
                .collect(),
            transactions,
        })
    }

    #[test]
    fn clean_ledger_has_no_issues() {
        let issues = inspect(ledger(
            &["A", "B"],
            vec![Transaction::weighted(
                "t1",
                "A",
                Money::from_i64(100),
                [("A", dec!(0.5)), ("B", dec!(0.5))],
            )],
        ));

        assert!(issues.is_empty());
    }

    #[rstest]
    #[case::over(dec!(0.7), dec!(0.6), dec!(1.3))]
    #[case::under(dec!(0.2), dec!(0.3), dec!(0.5))]
    fn unbalanced_split_is_reported_with_residual(
        #[case] a: Decimal,
        #[case] b: Decimal,
        #[case] ratio_total: Decimal,
    ) {
        let issues = inspect(ledger(
            &["A", "B"],
            vec![Transaction::weighted(
                "t1",
                "A",
                Money::from_i64(100),
                [("A", a), ("B", b)],
            )],
        ));

        assert!(issues.contains(&DataQualityIssue::UnbalancedSplit {
            transaction_id: "t1".to_string(),
            ratio_total,
        }));
        assert!(issues.iter().any(|issue| matches!(
            issue,
            DataQualityIssue::NonConservedTotal { .. }
        )));
        assert!(issues.iter().any(|issue| matches!(
            issue,
            DataQualityIssue::UnsettledBalance { .. }
        )));
    }

    #[test]
    fn negative_amount_and_unknown_payer_are_reported() {
        let issues = inspect(ledger(
            &["A"],
            vec![Transaction::equal("t1", "Z", Money::from_i64(-5))],
        ));

        assert_eq!(
            issues[..2],
            [
                DataQualityIssue::NegativeAmount {
                    transaction_id: "t1".to_string(),
                    amount: Money::from_i64(-5),
                },
                DataQualityIssue::UnknownParticipant {
                    transaction_id: "t1".to_string(),
                    participant: ParticipantId::from("Z"),
                },
            ]
        );
    }

    #[test]
    fn equal_split_without_participants_is_reported() {
        let issues = inspect(ledger(
            &[],
            vec![Transaction::equal("t1", "A", Money::from_i64(10))],
        ));

        assert!(
            issues.contains(&DataQualityIssue::EqualSplitWithoutParticipants {
                transaction_id: "t1".to_string(),
            })
        );
    }

    #[test]
    fn pot_only_checks_amounts_and_players() {
        let snapshot = Snapshot::Pot(PotSnapshot {
            game_id: "game".to_string(),
            participants: vec![Participant::new("A", "Alice")],
            buy_ins: vec![Transaction::buy_in("b1", "A", Money::from_i64(100))],
            ..Default::default()
        });

        assert!(inspect(snapshot).is_empty());
    }

    #[test]
    fn issues_render_human_readable() {
        let issue = DataQualityIssue::NonConservedTotal {
            total: Money::from_i64(20),
        };
        assert_eq!(issue.to_string(), "Net balances sum to 20 instead of zero");
    }
}

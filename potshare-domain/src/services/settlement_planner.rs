use crate::model::{Money, NetBalances, ParticipantId, SettlementPlan, Transfer};
use rust_decimal::Decimal;

/// Balances within one cent of zero count as settled.
pub const DEFAULT_SETTLEMENT_EPSILON: Money =
    Money::from_decimal(Decimal::from_parts(1, 0, 0, false, 2));

/// Settlement planning service
///
/// Greedy "largest creditor meets largest debtor" matching.
#[derive(Clone, Copy, Debug)]
pub struct SettlementPlanner {
    epsilon: Money,
}

impl Default for SettlementPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLEMENT_EPSILON)
    }
}

impl SettlementPlanner {
    pub fn new(epsilon: Money) -> Self {
        Self {
            epsilon: epsilon.abs(),
        }
    }

    pub fn epsilon(&self) -> Money {
        self.epsilon
    }

    /// Plan transfers that drive every balance to within epsilon of zero.
    ///
    /// # Arguments
    /// * `balances` - Net balance per participant (positive: is owed money)
    ///
    /// # Returns
    /// Transfers in emission order, plus any balances left out of tolerance
    /// when the input did not sum to zero.
    ///
    /// Equal magnitudes are resolved by the iteration order of `balances`.
    pub fn plan(&self, balances: &NetBalances) -> SettlementPlan {
        let mut working: Vec<(ParticipantId, Money)> = balances
            .iter()
            .map(|(participant, balance)| (participant.clone(), *balance))
            .collect();
        let mut transfers = Vec::new();

        loop {
            let mut creditors: Vec<usize> = (0..working.len())
                .filter(|&idx| working[idx].1 > self.epsilon)
                .collect();
            let mut debtors: Vec<usize> = (0..working.len())
                .filter(|&idx| working[idx].1 < -self.epsilon)
                .collect();
            if creditors.is_empty() || debtors.is_empty() {
                break;
            }

            // Both sorts are stable.
            creditors.sort_by(|&lhs, &rhs| working[rhs].1.cmp(&working[lhs].1));
            debtors.sort_by(|&lhs, &rhs| working[lhs].1.cmp(&working[rhs].1));
            let creditor = creditors[0];
            let debtor = debtors[0];

            let amount = working[creditor].1.min(working[debtor].1.abs());
            working[creditor].1 -= amount;
            working[debtor].1 += amount;
            debug_assert!(working[creditor].1.is_zero() || working[debtor].1.is_zero());

            transfers.push(Transfer {
                from: working[debtor].0.clone(),
                to: working[creditor].0.clone(),
                amount,
            });
        }

        let unsettled: Vec<(ParticipantId, Money)> = working
            .into_iter()
            .filter(|(_, balance)| !balance.is_within(self.epsilon))
            .collect();

        if !unsettled.is_empty() {
            let residual: Money = unsettled.iter().map(|(_, balance)| *balance).sum();
            tracing::warn!(
                unsettled_count = unsettled.len(),
                residual = %residual,
                epsilon = %self.epsilon,
                "Balances do not sum to zero; residual left unsettled"
            );
        }

        tracing::debug!(
            participant_count = balances.len(),
            transfer_count = transfers.len(),
            "Planned settlement"
        );

        SettlementPlan {
            transfers,
            unsettled,
        }
    }
}

use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Currency amount backed by a decimal so long ledgers accumulate without drift.
///
/// Arithmetic saturates at the bounds of [`Decimal`] instead of panicking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// `Money::new(1234, 2)` is `12.34`.
    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub const fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Even share of this amount across `count` parts; zero when there are no parts.
    pub fn split_evenly(self, count: usize) -> Self {
        if count == 0 {
            return Self::ZERO;
        }
        self.0
            .checked_div(Decimal::from(count as u64))
            .map_or(Self::ZERO, Self)
    }

    /// Whether `self` lies within `epsilon` of zero, bounds included.
    pub fn is_within(self, epsilon: Money) -> bool {
        self.abs() <= epsilon.abs()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// How a transaction's amount is apportioned as "owed".
#[derive(Clone, Debug, PartialEq)]
pub enum SplitPolicy {
    /// Divided evenly across the participant set live at aggregation time.
    Equal,
    /// Participant -> fraction of the amount. Ratios are taken as given.
    Weighted(IndexMap<ParticipantId, Decimal>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub payer: ParticipantId,
    pub amount: Money,
    /// Milliseconds since the epoch as stored upstream.
    pub timestamp: Option<i64>,
    /// `None` marks a buy-in: paid only, never owed.
    pub split: Option<SplitPolicy>,
}

impl Transaction {
    pub fn equal(id: impl Into<String>, payer: impl Into<ParticipantId>, amount: Money) -> Self {
        Self::with_split(id, payer, amount, Some(SplitPolicy::Equal))
    }

    pub fn weighted<I, P>(
        id: impl Into<String>,
        payer: impl Into<ParticipantId>,
        amount: Money,
        ratios: I,
    ) -> Self
    where
        I: IntoIterator<Item = (P, Decimal)>,
        P: Into<ParticipantId>,
    {
        let ratios = ratios
            .into_iter()
            .map(|(participant, ratio)| (participant.into(), ratio))
            .collect();
        Self::with_split(id, payer, amount, Some(SplitPolicy::Weighted(ratios)))
    }

    pub fn buy_in(id: impl Into<String>, payer: impl Into<ParticipantId>, amount: Money) -> Self {
        Self::with_split(id, payer, amount, None)
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    fn with_split(
        id: impl Into<String>,
        payer: impl Into<ParticipantId>,
        amount: Money,
        split: Option<SplitPolicy>,
    ) -> Self {
        Self {
            id: id.into(),
            payer: payer.into(),
            amount,
            timestamp: None,
            split,
        }
    }
}

/// Net position per participant, in balance-sheet order.
pub type NetBalances = IndexMap<ParticipantId, Money>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParticipantLedger {
    pub paid: Money,
    pub owed: Money,
}

impl ParticipantLedger {
    pub fn net(&self) -> Money {
        self.paid - self.owed
    }
}

/// Paid/owed totals keyed by participant.
///
/// Iteration follows the participant set first, then ids first seen in
/// transactions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BalanceSheet {
    entries: IndexMap<ParticipantId, ParticipantLedger>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, participant: &ParticipantId) -> Option<&ParticipantLedger> {
        self.entries.get(participant)
    }

    pub fn paid(&self, participant: &ParticipantId) -> Money {
        self.get(participant).map_or(Money::ZERO, |entry| entry.paid)
    }

    pub fn owed(&self, participant: &ParticipantId) -> Money {
        self.get(participant).map_or(Money::ZERO, |entry| entry.owed)
    }

    pub fn net(&self, participant: &ParticipantId) -> Money {
        self.get(participant)
            .map_or(Money::ZERO, ParticipantLedger::net)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &ParticipantLedger)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn net_balances(&self) -> NetBalances {
        self.entries
            .iter()
            .map(|(participant, entry)| (participant.clone(), entry.net()))
            .collect()
    }

    pub fn total_paid(&self) -> Money {
        self.entries.values().map(|entry| entry.paid).sum()
    }

    pub fn total_owed(&self) -> Money {
        self.entries.values().map(|entry| entry.owed).sum()
    }

    /// Zero when money is conserved; anything else is an upstream data-quality signal.
    pub fn net_total(&self) -> Money {
        self.entries.values().map(ParticipantLedger::net).sum()
    }

    pub(crate) fn entry_mut(&mut self, participant: &ParticipantId) -> &mut ParticipantLedger {
        self.entries.entry(participant.clone()).or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettlementPlan {
    pub transfers: Vec<Transfer>,
    /// Balances still outside tolerance when planning stopped, usually
    /// because the input did not sum to zero.
    pub unsettled: Vec<(ParticipantId, Money)>,
}

impl SettlementPlan {
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    pub fn is_fully_settled(&self) -> bool {
        self.unsettled.is_empty()
    }

    /// Balances after every transfer is paid: debtors pay in, creditors are paid out.
    pub fn apply_to(&self, balances: &NetBalances) -> NetBalances {
        let mut after = balances.clone();
        for transfer in &self.transfers {
            *after.entry(transfer.from.clone()).or_insert(Money::ZERO) += transfer.amount;
            *after.entry(transfer.to.clone()).or_insert(Money::ZERO) -= transfer.amount;
        }
        after
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PotStanding {
    pub participant: ParticipantId,
    pub total: Money,
    pub count: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PotSummary {
    pub total: Money,
    /// Sorted by total, largest first.
    pub standings: Vec<PotStanding>,
}

impl PotSummary {
    pub fn standing(&self, participant: &ParticipantId) -> Option<&PotStanding> {
        self.standings
            .iter()
            .find(|standing| &standing.participant == participant)
    }

    /// Percentage of the pot, one decimal place; zero for an empty pot.
    pub fn share_percent(&self, standing: &PotStanding) -> Decimal {
        if self.total.is_zero() {
            return Decimal::ZERO;
        }
        standing
            .total
            .as_decimal()
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.checked_div(self.total.as_decimal()))
            .map_or(Decimal::ZERO, |percent| {
                percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::three_ways(Money::from_i64(90), 3, Money::from_i64(30))]
    #[case::no_parts(Money::from_i64(90), 0, Money::ZERO)]
    #[case::fractional(Money::new(1000, 2), 4, Money::new(250, 2))]
    fn split_evenly_cases(#[case] amount: Money, #[case] count: usize, #[case] expected: Money) {
        assert_eq!(amount.split_evenly(count), expected);
    }

    #[test]
    fn repeating_split_sums_back_within_a_cent() {
        let share = Money::from_i64(100).split_evenly(3);
        let total = share + share + share;
        assert!((total - Money::from_i64(100)).is_within(Money::new(1, 2)));
    }

    #[test]
    fn display_drops_trailing_zeros() {
        assert_eq!(Money::new(3000, 2).to_string(), "30");
        assert_eq!(Money::new(1250, 2).to_string(), "12.5");
    }

    #[test]
    fn apply_to_moves_debtors_and_creditors_toward_zero() {
        let balances = NetBalances::from_iter([
            (ParticipantId::from("a"), Money::from_i64(30)),
            (ParticipantId::from("b"), Money::from_i64(-30)),
        ]);
        let plan = SettlementPlan {
            transfers: vec![Transfer {
                from: ParticipantId::from("b"),
                to: ParticipantId::from("a"),
                amount: Money::from_i64(30),
            }],
            unsettled: Vec::new(),
        };

        let after = plan.apply_to(&balances);
        assert!(after.values().all(|balance| balance.is_zero()));
    }

    #[rstest]
    #[case::majority(125, 175, dec!(71.4))]
    #[case::minority(50, 175, dec!(28.6))]
    #[case::whole_pot(40, 40, dec!(100))]
    fn share_percent_rounds_to_one_place(
        #[case] total: i64,
        #[case] pot: i64,
        #[case] expected: Decimal,
    ) {
        let standing = PotStanding {
            participant: ParticipantId::from("a"),
            total: Money::from_i64(total),
            count: 1,
        };
        let summary = PotSummary {
            total: Money::from_i64(pot),
            standings: vec![standing.clone()],
        };
        assert_eq!(summary.share_percent(&standing), expected);
    }

    #[test]
    fn share_percent_of_empty_pot_is_zero() {
        let standing = PotStanding {
            participant: ParticipantId::from("a"),
            total: Money::ZERO,
            count: 0,
        };
        assert_eq!(PotSummary::default().share_percent(&standing), Decimal::ZERO);
    }
}

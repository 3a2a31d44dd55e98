#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    BalanceSheet, Money, NetBalances, Participant, ParticipantId, ParticipantLedger, PotStanding,
    PotSummary, SettlementPlan, SplitPolicy, Transaction, Transfer,
};
pub use services::{DEFAULT_SETTLEMENT_EPSILON, LedgerAggregator, PotTally, SettlementPlanner};

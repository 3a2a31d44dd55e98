pub mod ledger_aggregator;
pub mod pot_tally;
pub mod settlement_planner;

pub use ledger_aggregator::LedgerAggregator;
pub use pot_tally::PotTally;
pub use settlement_planner::{DEFAULT_SETTLEMENT_EPSILON, SettlementPlanner};

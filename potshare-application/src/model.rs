use potshare_domain::{
    BalanceSheet, Participant, ParticipantId, PotSummary, SettlementPlan, Transaction,
};

/// Expense ledger as delivered by the document store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LedgerSnapshot {
    pub ledger_id: String,
    pub participants: Vec<Participant>,
    pub transactions: Vec<Transaction>,
}

/// Buy-in pot as delivered by the document store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PotSnapshot {
    pub game_id: String,
    pub participants: Vec<Participant>,
    /// Players seated in the game, whether or not they have bought in yet.
    pub player_ids: Vec<ParticipantId>,
    /// Milliseconds since the epoch.
    pub start_time: Option<i64>,
    pub buy_ins: Vec<Transaction>,
}

impl PotSnapshot {
    pub fn game_info(&self) -> GameInfo {
        GameInfo {
            player_count: self.player_ids.len(),
            start_time: self.start_time,
        }
    }
}

/// Header facts of a pot game, independent of its buy-ins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameInfo {
    pub player_count: usize,
    pub start_time: Option<i64>,
}

impl GameInfo {
    /// Whole minutes between the start and `now_ms`, or `None` without a start
    /// time. A start in the future counts as zero.
    pub fn elapsed_minutes(&self, now_ms: i64) -> Option<i64> {
        self.start_time
            .map(|start| now_ms.saturating_sub(start).max(0) / 60_000)
    }
}

/// Immutable point-in-time view of one shared ledger or pot.
#[derive(Clone, Debug, PartialEq)]
pub enum Snapshot {
    Ledger(LedgerSnapshot),
    Pot(PotSnapshot),
}

impl Snapshot {
    pub fn id(&self) -> &str {
        match self {
            Snapshot::Ledger(ledger) => &ledger.ledger_id,
            Snapshot::Pot(pot) => &pot.game_id,
        }
    }

    pub fn participants(&self) -> &[Participant] {
        match self {
            Snapshot::Ledger(ledger) => &ledger.participants,
            Snapshot::Pot(pot) => &pot.participants,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        match self {
            Snapshot::Ledger(ledger) => &ledger.transactions,
            Snapshot::Pot(pot) => &pot.buy_ins,
        }
    }

    pub fn game_info(&self) -> Option<GameInfo> {
        match self {
            Snapshot::Ledger(_) => None,
            Snapshot::Pot(pot) => Some(pot.game_info()),
        }
    }

    pub fn participant_ids(&self) -> Vec<ParticipantId> {
        self.participants()
            .iter()
            .map(|participant| participant.id.clone())
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LedgerSummary {
    pub balances: BalanceSheet,
    pub plan: SettlementPlan,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShareSummary {
    Ledger(LedgerSummary),
    Pot(PotSummary),
}

//! Wire shapes of the document store, as JSON.

use indexmap::IndexMap;
use potshare_domain::{Money, ParticipantId};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SnapshotDocument {
    Ledger(LedgerDocument),
    Pot(PotDocument),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerDocument {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub participants: Vec<ParticipantDocument>,
    #[serde(default)]
    pub transactions: Vec<TransactionDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PotDocument {
    #[serde(default)]
    pub id: String,
    #[serde(default, alias = "players")]
    pub participants: Vec<ParticipantDocument>,
    #[serde(default)]
    pub player_ids: Option<Vec<ParticipantId>>,
    /// Milliseconds since the epoch.
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub buy_ins: Vec<BuyInDocument>,
}

#[derive(Debug, Deserialize)]
pub struct ParticipantDocument {
    pub id: ParticipantId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDocument {
    #[serde(default)]
    pub id: String,
    pub payer_participant_id: ParticipantId,
    pub amount: Money,
    #[serde(default)]
    pub split_policy: Option<String>,
    #[serde(default)]
    pub split_shares: Option<IndexMap<ParticipantId, Decimal>>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyInDocument {
    #[serde(default)]
    pub id: String,
    pub player_id: ParticipantId,
    pub amount: Money,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

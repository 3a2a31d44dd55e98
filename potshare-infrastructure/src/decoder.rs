use crate::document::{
    BuyInDocument, LedgerDocument, ParticipantDocument, PotDocument, SnapshotDocument,
    TransactionDocument,
};
use potshare_application::{
    LedgerSnapshot, PotSnapshot, Snapshot, SnapshotDecodeError, SnapshotDecoder,
};
use potshare_domain::{Participant, SplitPolicy, Transaction};

/// Decodes one JSON snapshot document.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonSnapshotDecoder;

impl SnapshotDecoder for JsonSnapshotDecoder {
    fn decode(&self, source: &str) -> Result<Snapshot, SnapshotDecodeError> {
        let document: SnapshotDocument = serde_json::from_str(source)
            .map_err(|err| SnapshotDecodeError::Malformed(err.to_string()))?;

        match document {
            SnapshotDocument::Ledger(ledger) => convert_ledger(ledger).map(Snapshot::Ledger),
            SnapshotDocument::Pot(pot) => Ok(Snapshot::Pot(convert_pot(pot))),
        }
    }
}

fn convert_ledger(document: LedgerDocument) -> Result<LedgerSnapshot, SnapshotDecodeError> {
    let transactions = document
        .transactions
        .into_iter()
        .map(convert_transaction)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LedgerSnapshot {
        ledger_id: document.id,
        participants: convert_participants(document.participants),
        transactions,
    })
}

fn convert_pot(document: PotDocument) -> PotSnapshot {
    let participants = convert_participants(document.participants);
    // Older games carry no seat list; everyone with a profile counts as seated.
    let player_ids = match document.player_ids {
        Some(ids) => ids,
        None => participants
            .iter()
            .map(|participant| participant.id.clone())
            .collect(),
    };

    PotSnapshot {
        game_id: document.id,
        participants,
        player_ids,
        start_time: document.start_time,
        buy_ins: document.buy_ins.into_iter().map(convert_buy_in).collect(),
    }
}

fn convert_participants(documents: Vec<ParticipantDocument>) -> Vec<Participant> {
    documents
        .into_iter()
        .map(|document| Participant::new(document.id, document.name))
        .collect()
}

fn convert_transaction(document: TransactionDocument) -> Result<Transaction, SnapshotDecodeError> {
    let split = match document.split_policy.as_deref() {
        None => None,
        Some("equal") => Some(SplitPolicy::Equal),
        // The UI names these differently; all of them carry per-participant ratios.
        Some("weighted" | "percentage" | "shares" | "exactAmounts") => {
            Some(SplitPolicy::Weighted(document.split_shares.unwrap_or_default()))
        }
        Some(other) => {
            return Err(SnapshotDecodeError::UnknownSplitPolicy {
                transaction_id: document.id,
                policy: other.to_string(),
            });
        }
    };

    Ok(Transaction {
        id: document.id,
        payer: document.payer_participant_id,
        amount: document.amount,
        timestamp: document.timestamp,
        split,
    })
}

fn convert_buy_in(document: BuyInDocument) -> Transaction {
    let buy_in = Transaction::buy_in(document.id, document.player_id, document.amount);
    match document.timestamp {
        Some(timestamp) => buy_in.with_timestamp(timestamp),
        None => buy_in,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use potshare_domain::{Money, ParticipantId};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn decode(source: &str) -> Result<Snapshot, SnapshotDecodeError> {
        JsonSnapshotDecoder.decode(source)
    }

    #[test]
    fn decodes_ledger_document() {
        let snapshot = decode(
            r#"{
                "kind": "ledger",
                "id": "trip",
                "participants": [{"id": "A", "name": "Alice"}, {"id": "B", "name": "Bob"}],
                "transactions": [
                    {"id": "t1", "payerParticipantId": "A", "amount": 90, "splitPolicy": "equal", "timestamp": 1700000000000},
                    {"id": "t2", "payerParticipantId": "B", "amount": "12.50",
                     "splitPolicy": "percentage", "splitShares": {"A": 0.25, "B": 0.75}}
                ]
            }"#,
        )
        .expect("ledger should decode");

        let Snapshot::Ledger(ledger) = snapshot else {
            panic!("expected ledger snapshot");
        };
        assert_eq!(ledger.ledger_id, "trip");
        assert_eq!(ledger.participants[0], Participant::new("A", "Alice"));
        assert_eq!(
            ledger.transactions[0],
            Transaction::equal("t1", "A", Money::from_i64(90)).with_timestamp(1_700_000_000_000)
        );
        assert_eq!(
            ledger.transactions[1],
            Transaction::weighted(
                "t2",
                "B",
                Money::new(1250, 2),
                [("A", dec!(0.25)), ("B", dec!(0.75))],
            )
        );
    }

    #[test]
    fn decodes_pot_document() {
        let snapshot = decode(
            r#"{
                "kind": "pot",
                "id": "friday",
                "players": [{"id": "A", "name": "Alice"}],
                "buyIns": [{"id": "b1", "playerId": "A", "amount": 100}]
            }"#,
        )
        .expect("pot should decode");

        let Snapshot::Pot(pot) = snapshot else {
            panic!("expected pot snapshot");
        };
        assert_eq!(pot.game_id, "friday");
        assert_eq!(pot.player_ids, vec![ParticipantId::from("A")]);
        assert_eq!(pot.start_time, None);
        assert_eq!(
            pot.buy_ins,
            vec![Transaction::buy_in("b1", "A", Money::from_i64(100))]
        );
    }

    #[test]
    fn decodes_pot_game_header() {
        let Ok(Snapshot::Pot(pot)) = decode(
            r#"{
                "kind": "pot",
                "id": "friday",
                "players": [{"id": "A", "name": "Alice"}],
                "playerIds": ["A", "B", "C"],
                "startTime": 1700000000000
            }"#,
        ) else {
            panic!("expected pot snapshot");
        };

        assert_eq!(pot.player_ids.len(), 3);
        assert_eq!(pot.start_time, Some(1_700_000_000_000));
        assert_eq!(pot.game_info().player_count, 3);
    }

    #[rstest]
    #[case::weighted("weighted")]
    #[case::shares("shares")]
    #[case::exact_amounts("exactAmounts")]
    fn ratio_aliases_decode_as_weighted(#[case] policy: &str) {
        let source = format!(
            r#"{{"kind": "ledger", "transactions": [
                {{"id": "t1", "payerParticipantId": "A", "amount": 10, "splitPolicy": "{policy}"}}
            ]}}"#
        );

        let Ok(Snapshot::Ledger(ledger)) = decode(&source) else {
            panic!("expected ledger snapshot");
        };
        assert!(matches!(
            &ledger.transactions[0].split,
            Some(SplitPolicy::Weighted(ratios)) if ratios.is_empty()
        ));
    }

    #[test]
    fn missing_policy_means_no_split() {
        let Ok(Snapshot::Ledger(ledger)) = decode(
            r#"{"kind": "ledger", "transactions": [{"id": "t1", "payerParticipantId": "A", "amount": 10}]}"#,
        ) else {
            panic!("expected ledger snapshot");
        };

        assert_eq!(ledger.transactions[0].split, None);
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let result = decode(
            r#"{"kind": "ledger", "transactions": [
                {"id": "t9", "payerParticipantId": "A", "amount": 10, "splitPolicy": "random"}
            ]}"#,
        );

        assert_eq!(
            result,
            Err(SnapshotDecodeError::UnknownSplitPolicy {
                transaction_id: "t9".to_string(),
                policy: "random".to_string(),
            })
        );
    }

    #[rstest]
    #[case::not_json("not json")]
    #[case::unknown_kind(r#"{"kind": "poll"}"#)]
    #[case::missing_payer(r#"{"kind": "ledger", "transactions": [{"amount": 1}]}"#)]
    fn malformed_documents_are_rejected(#[case] source: &str) {
        assert!(matches!(
            decode(source),
            Err(SnapshotDecodeError::Malformed(_))
        ));
    }
}

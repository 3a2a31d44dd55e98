use crate::{
    render_context::RenderContext,
    text_table::{Alignment, TextTableBuilder},
};
use chrono::{DateTime, Utc};
use potshare_application::{DataQualityIssue, GameInfo, LedgerSummary, ShareSummary};
use potshare_domain::{PotSummary, Transfer};
use potshare_i18n as i18n;
use std::{borrow::Cow, fmt::Write};

pub struct SummaryPresenter;

pub struct LedgerView {
    pub balance_table: String,
    /// `None` when nobody needs to pay anybody.
    pub transfer_table: Option<String>,
}

pub struct PotView {
    /// Player count, start time and elapsed time; `None` without game data.
    pub game_line: Option<String>,
    pub total_line: String,
    /// `None` before the first buy-in.
    pub standings_table: Option<String>,
}

impl SummaryPresenter {
    pub fn render_text(summary: &ShareSummary, context: &RenderContext) -> String {
        let mut out = String::new();
        match summary {
            ShareSummary::Ledger(ledger) => {
                let view = Self::render_ledger(ledger, context);
                let _ = writeln!(out, "{}", i18n::BALANCES);
                out.push_str(&view.balance_table);
                out.push('\n');
                let _ = writeln!(out, "{}", i18n::SETTLEMENT);
                match view.transfer_table {
                    Some(table) => out.push_str(&table),
                    None => {
                        let _ = writeln!(out, "{}", i18n::ALL_SETTLED);
                    }
                }
            }
            ShareSummary::Pot(pot) => {
                let view = Self::render_pot(pot, context);
                if let Some(game_line) = &view.game_line {
                    let _ = writeln!(out, "{game_line}");
                }
                let _ = writeln!(out, "{}", view.total_line);
                match view.standings_table {
                    Some(table) => out.push_str(&table),
                    None => {
                        let _ = writeln!(out, "{}", i18n::NO_PLAYERS_YET);
                    }
                }
            }
        }
        out
    }

    pub fn render_ledger(summary: &LedgerSummary, context: &RenderContext) -> LedgerView {
        LedgerView {
            balance_table: Self::build_balance_table(summary, context),
            transfer_table: (!summary.plan.is_empty())
                .then(|| Self::build_transfer_table(&summary.plan.transfers, context)),
        }
    }

    pub fn render_pot(summary: &PotSummary, context: &RenderContext) -> PotView {
        let game_line = context
            .game
            .map(|game| Self::build_game_line(&game, context.now_ms));
        let total_line = format!(
            "{}: {}",
            i18n::TOTAL_POT,
            context.pot_currency.format(summary.total)
        );
        if summary.standings.is_empty() {
            return PotView {
                game_line,
                total_line,
                standings_table: None,
            };
        }

        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&[
                Cow::Borrowed(i18n::PLAYER),
                Cow::Borrowed(i18n::TOTAL),
                Cow::Borrowed(i18n::BUY_INS),
                Cow::Borrowed(i18n::SHARE),
            ]);

        for standing in &summary.standings {
            // An empty pot has no shares to speak of, so no decimal place either.
            let percent = if summary.total.is_zero() {
                "0".to_string()
            } else {
                format!("{:.1}", summary.share_percent(standing))
            };
            builder = builder.row([
                Cow::Borrowed(context.display_name_or_unknown(&standing.participant)),
                Cow::Owned(context.pot_currency.format(standing.total)),
                Cow::Owned(i18n::buy_in_count(standing.count)),
                Cow::Owned(i18n::pot_share(percent)),
            ]);
        }

        PotView {
            game_line,
            total_line,
            standings_table: Some(builder.build()),
        }
    }

    /// `3 players | Started 19:30 UTC | 1h 5m`; parts without data are left out.
    pub fn build_game_line(game: &GameInfo, now_ms: Option<i64>) -> String {
        let mut parts = vec![i18n::player_count(game.player_count)];
        if let Some(started) = game
            .start_time
            .and_then(DateTime::<Utc>::from_timestamp_millis)
        {
            parts.push(i18n::started_at(started.format("%H:%M UTC")));
        }
        if let Some(minutes) = now_ms.and_then(|now_ms| game.elapsed_minutes(now_ms)) {
            parts.push(i18n::elapsed(minutes));
        }
        parts.join(" | ")
    }

    pub fn build_balance_table(summary: &LedgerSummary, context: &RenderContext) -> String {
        let currency = context.ledger_currency;
        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&[
                Cow::Borrowed(i18n::MEMBER),
                Cow::Borrowed(i18n::PAID),
                Cow::Borrowed(i18n::OWED),
                Cow::Borrowed(i18n::BALANCE),
            ]);

        for (participant, ledger) in summary.balances.iter() {
            builder = builder.row([
                Cow::Borrowed(context.display_name_or_unknown(participant)),
                Cow::Owned(currency.format(ledger.paid)),
                Cow::Owned(currency.format(ledger.owed)),
                Cow::Owned(currency.format_signed(ledger.net())),
            ]);
        }

        builder.build()
    }

    pub fn build_transfer_table(transfers: &[Transfer], context: &RenderContext) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
            .headers(&[
                Cow::Borrowed(i18n::FROM),
                Cow::Borrowed(i18n::TO),
                Cow::Borrowed(i18n::AMOUNT),
            ]);

        for transfer in transfers {
            builder = builder.row([
                Cow::Borrowed(context.display_name_or_unknown(&transfer.from)),
                Cow::Borrowed(context.display_name_or_unknown(&transfer.to)),
                Cow::Owned(context.ledger_currency.format(transfer.amount)),
            ]);
        }

        builder.build()
    }

    pub fn render_issues(issues: &[DataQualityIssue]) -> Option<String> {
        if issues.is_empty() {
            return None;
        }
        let mut out = format!("{}:\n", i18n::DATA_QUALITY);
        for issue in issues {
            let _ = writeln!(out, "- {issue}");
        }
        Some(out)
    }
}

#[cfg(all(test, not(feature = "ja")))]
mod tests {
    use super::*;
    use potshare_domain::{
        LedgerAggregator, Money, Participant, ParticipantId, PotTally, SettlementPlanner,
        Transaction,
    };
    use potshare_application::{PotSnapshot, Snapshot};
    use rstest::{fixture, rstest};

    #[fixture]
    fn trio() -> Vec<Participant> {
        vec![
            Participant::new("A", "Alice"),
            Participant::new("B", "Bob"),
            Participant::new("C", "Carol"),
        ]
    }

    fn ledger_summary(participants: &[Participant], transactions: &[Transaction]) -> LedgerSummary {
        let ids: Vec<ParticipantId> = participants.iter().map(|p| p.id.clone()).collect();
        let balances = LedgerAggregator.aggregate(&ids, transactions);
        let plan = SettlementPlanner::default().plan(&balances.net_balances());
        LedgerSummary { balances, plan }
    }

    #[rstest]
    fn ledger_renders_balances_and_transfers(trio: Vec<Participant>) {
        let summary = ledger_summary(
            &trio,
            &[Transaction::equal("t1", "A", Money::from_i64(90))],
        );
        let context = RenderContext::from_participants(&trio);

        let view = SummaryPresenter::render_ledger(&summary, &context);

        assert!(view.balance_table.contains("Alice"));
        assert!(view.balance_table.contains("+$60.00"));
        assert!(view.balance_table.contains("-$30.00"));
        let transfers = view.transfer_table.expect("transfer table");
        assert!(transfers.contains("Bob"));
        assert!(transfers.contains("$30.00"));
    }

    #[rstest]
    fn balanced_ledger_has_no_transfer_table(trio: Vec<Participant>) {
        let summary = ledger_summary(&trio, &[]);
        let context = RenderContext::from_participants(&trio);

        let text = SummaryPresenter::render_text(&ShareSummary::Ledger(summary), &context);

        assert!(text.contains(i18n::ALL_SETTLED));
    }

    #[rstest]
    fn unknown_ids_render_as_unknown_player(trio: Vec<Participant>) {
        let summary = ledger_summary(
            &trio,
            &[Transaction::equal("t1", "ghost", Money::from_i64(30))],
        );
        let context = RenderContext::from_participants(&trio);

        let view = SummaryPresenter::render_ledger(&summary, &context);

        assert!(view.balance_table.contains(i18n::UNKNOWN_PLAYER));
    }

    #[test]
    fn pot_renders_standings() {
        let pot = PotTally.tally(&[
            Transaction::buy_in("b1", "A", Money::from_i64(100)),
            Transaction::buy_in("b2", "B", Money::from_i64(50)),
            Transaction::buy_in("b3", "A", Money::from_i64(25)),
        ]);
        let context = RenderContext::from_participants(&[
            Participant::new("A", "Alice"),
            Participant::new("B", "Bob"),
        ]);

        let view = SummaryPresenter::render_pot(&pot, &context);

        assert_eq!(view.total_line, "Total pot: $175");
        let table = view.standings_table.expect("standings");
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[2].starts_with("Alice"));
        assert!(lines[2].contains("$125"));
        assert!(lines[2].contains("2 buy-ins"));
        assert!(lines[2].contains("71.4% of pot"));
        assert!(lines[3].contains("1 buy-in"));
        assert!(lines[3].contains("28.6% of pot"));
    }

    #[test]
    fn empty_pot_shows_placeholder() {
        let text = SummaryPresenter::render_text(
            &ShareSummary::Pot(PotSummary::default()),
            &RenderContext::default(),
        );

        assert_eq!(
            text,
            "Total pot: $0\nNo players yet. Waiting for game to start...\n"
        );
    }

    #[test]
    fn zero_pot_reports_whole_zero_share() {
        let pot = PotTally.tally(&[Transaction::buy_in("b1", "A", Money::ZERO)]);

        let view = SummaryPresenter::render_pot(&pot, &RenderContext::default());

        let table = view.standings_table.expect("standings");
        assert!(table.contains("0% of pot"));
        assert!(!table.contains("0.0% of pot"));
    }

    const START: i64 = 1_700_000_000_000;

    #[rstest]
    #[case::count_only(GameInfo { player_count: 1, start_time: None }, Some(START), "1 player")]
    #[case::no_clock(
        GameInfo { player_count: 3, start_time: Some(START) },
        None,
        "3 players | Started 22:13 UTC"
    )]
    #[case::minutes(
        GameInfo { player_count: 3, start_time: Some(START) },
        Some(START + 42 * 60_000),
        "3 players | Started 22:13 UTC | 42m"
    )]
    #[case::hours(
        GameInfo { player_count: 5, start_time: Some(START) },
        Some(START + 125 * 60_000),
        "5 players | Started 22:13 UTC | 2h 5m"
    )]
    fn game_line_cases(
        #[case] game: GameInfo,
        #[case] now_ms: Option<i64>,
        #[case] expected: &str,
    ) {
        assert_eq!(SummaryPresenter::build_game_line(&game, now_ms), expected);
    }

    #[test]
    fn pot_text_starts_with_game_line() {
        let snapshot = Snapshot::Pot(PotSnapshot {
            player_ids: vec!["A".into(), "B".into()],
            start_time: Some(START),
            ..Default::default()
        });
        let context = RenderContext::default()
            .with_snapshot(&snapshot)
            .with_clock(START + 30 * 60_000);

        let text = SummaryPresenter::render_text(
            &ShareSummary::Pot(PotSummary::default()),
            &context,
        );

        assert_eq!(
            text,
            "2 players | Started 22:13 UTC | 30m\n\
             Total pot: $0\n\
             No players yet. Waiting for game to start...\n"
        );
    }

    #[rstest]
    #[case::none(vec![], None)]
    #[case::one(
        vec![DataQualityIssue::EqualSplitWithoutParticipants { transaction_id: "t1".to_string() }],
        Some("Data quality:\n- Transaction t1 is split equally across an empty participant set\n")
    )]
    fn issues_render_as_bullets(
        #[case] issues: Vec<DataQualityIssue>,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(
            SummaryPresenter::render_issues(&issues).as_deref(),
            expected
        );
    }
}

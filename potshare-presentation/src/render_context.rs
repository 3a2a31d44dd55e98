use crate::currency::CurrencyFormat;
use fxhash::FxHashMap;
use potshare_application::{GameInfo, ParticipantDirectory, Snapshot};
use potshare_domain::{Participant, ParticipantId};
use potshare_i18n as i18n;

/// Read-only lookups a summary needs while rendering.
///
/// Built once per snapshot from that snapshot's participants, so names never
/// leak from one summary to the next.
#[derive(Clone, Debug)]
pub struct RenderContext {
    names: FxHashMap<ParticipantId, String>,
    pub ledger_currency: CurrencyFormat,
    pub pot_currency: CurrencyFormat,
    pub(crate) game: Option<GameInfo>,
    /// Reference time for elapsed durations, milliseconds since the epoch.
    pub(crate) now_ms: Option<i64>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            names: FxHashMap::default(),
            ledger_currency: CurrencyFormat::usd(2),
            pot_currency: CurrencyFormat::usd(0),
            game: None,
            now_ms: None,
        }
    }
}

impl RenderContext {
    pub fn from_participants(participants: &[Participant]) -> Self {
        Self::default().with_participants(participants)
    }

    pub fn with_participants(mut self, participants: &[Participant]) -> Self {
        self.names = participants
            .iter()
            .filter(|participant| !participant.name.is_empty())
            .map(|participant| (participant.id.clone(), participant.name.clone()))
            .collect();
        self
    }

    /// Names and game header of `snapshot`.
    pub fn with_snapshot(self, snapshot: &Snapshot) -> Self {
        let mut context = self.with_participants(snapshot.participants());
        context.game = snapshot.game_info();
        context
    }

    pub fn with_clock(mut self, now_ms: i64) -> Self {
        self.now_ms = Some(now_ms);
        self
    }

    pub fn with_ledger_currency(mut self, currency: CurrencyFormat) -> Self {
        self.ledger_currency = currency;
        self
    }

    pub fn display_name_or_unknown(&self, participant: &ParticipantId) -> &str {
        self.display_name(participant)
            .unwrap_or(i18n::UNKNOWN_PLAYER)
    }
}

impl ParticipantDirectory for RenderContext {
    fn display_name(&self, participant: &ParticipantId) -> Option<&str> {
        self.names.get(participant).map(String::as_str)
    }
}

#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

#[cfg(feature = "ja")]
pub mod strings {
    pub const MEMBER: &str = "メンバー";
    pub const PAID: &str = "支払額";
    pub const OWED: &str = "負担額";
    pub const BALANCE: &str = "収支";
    pub const FROM: &str = "支払人";
    pub const TO: &str = "受取人";
    pub const AMOUNT: &str = "金額";
    pub const PLAYER: &str = "プレイヤー";
    pub const BUY_INS: &str = "バイイン";
    pub const SHARE: &str = "割合";
    pub const TOTAL: &str = "合計";
    pub const TOTAL_POT: &str = "ポット合計";
    pub const BALANCES: &str = "収支";
    pub const SETTLEMENT: &str = "精算";
    pub const ALL_SETTLED: &str = "精算は不要です。";
    pub const UNKNOWN_PLAYER: &str = "不明なプレイヤー";
    pub const NO_PLAYERS_YET: &str = "まだプレイヤーがいません。ゲーム開始を待っています...";
    pub const DATA_QUALITY: &str = "データの問題";
}

#[cfg(not(feature = "ja"))]
pub mod strings {
    pub const MEMBER: &str = "Member";
    pub const PAID: &str = "Paid";
    pub const OWED: &str = "Owed";
    pub const BALANCE: &str = "Balance";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const PLAYER: &str = "Player";
    pub const BUY_INS: &str = "Buy-ins";
    pub const SHARE: &str = "Share";
    pub const TOTAL: &str = "Total";
    pub const TOTAL_POT: &str = "Total pot";
    pub const BALANCES: &str = "Balances";
    pub const SETTLEMENT: &str = "Settlement";
    pub const ALL_SETTLED: &str = "Everyone is settled up.";
    pub const UNKNOWN_PLAYER: &str = "Unknown Player";
    pub const NO_PLAYERS_YET: &str = "No players yet. Waiting for game to start...";
    pub const DATA_QUALITY: &str = "Data quality";
}

pub use strings::*;

#[cfg(feature = "ja")]
pub fn buy_in_count(count: usize) -> String {
    format!("{count} 回")
}

#[cfg(not(feature = "ja"))]
pub fn buy_in_count(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} buy-in{plural}")
}

#[cfg(feature = "ja")]
pub fn pot_share(percent: impl std::fmt::Display) -> String {
    format!("ポットの {percent}%")
}

#[cfg(not(feature = "ja"))]
pub fn pot_share(percent: impl std::fmt::Display) -> String {
    format!("{percent}% of pot")
}

#[cfg(feature = "ja")]
pub fn player_count(count: usize) -> String {
    format!("{count} 人")
}

#[cfg(not(feature = "ja"))]
pub fn player_count(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} player{plural}")
}

#[cfg(feature = "ja")]
pub fn started_at(time: impl std::fmt::Display) -> String {
    format!("{time} 開始")
}

#[cfg(not(feature = "ja"))]
pub fn started_at(time: impl std::fmt::Display) -> String {
    format!("Started {time}")
}

#[cfg(feature = "ja")]
pub fn elapsed(minutes: i64) -> String {
    match (minutes / 60, minutes % 60) {
        (0, minutes) => format!("{minutes}分"),
        (hours, minutes) => format!("{hours}時間{minutes}分"),
    }
}

#[cfg(not(feature = "ja"))]
pub fn elapsed(minutes: i64) -> String {
    match (minutes / 60, minutes % 60) {
        (0, minutes) => format!("{minutes}m"),
        (hours, minutes) => format!("{hours}h {minutes}m"),
    }
}

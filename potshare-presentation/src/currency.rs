use potshare_domain::Money;
use rust_decimal::RoundingStrategy;

/// Formats money as `$1,234.50`, with a leading `-` for negatives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: &'static str,
    pub fraction_digits: u32,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::usd(2)
    }
}

impl CurrencyFormat {
    pub const fn usd(fraction_digits: u32) -> Self {
        Self {
            symbol: "$",
            fraction_digits,
        }
    }

    pub const fn with_fraction_digits(self, fraction_digits: u32) -> Self {
        Self {
            fraction_digits,
            ..self
        }
    }

    pub fn format(&self, amount: Money) -> String {
        let rounded = amount
            .as_decimal()
            .round_dp_with_strategy(self.fraction_digits, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        // Pad to the requested scale so 12.5 prints as 12.50.
        let mut magnitude = rounded.abs();
        magnitude.rescale(self.fraction_digits);
        let digits = magnitude.to_string();
        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (digits.as_str(), None),
        };

        let mut out = String::with_capacity(digits.len() + whole.len() / 3 + 2);
        out.push_str(sign);
        out.push_str(self.symbol);
        out.push_str(&group_thousands(whole));
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }

    /// Like [`format`](Self::format), with an explicit `+` on non-negative amounts.
    pub fn format_signed(&self, amount: Money) -> String {
        let formatted = self.format(amount);
        if formatted.starts_with('-') {
            formatted
        } else {
            format!("+{formatted}")
        }
    }
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

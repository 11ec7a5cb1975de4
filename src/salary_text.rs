//! Best-effort parsing of free-text salaries.
//!
//! Job postings quote pay as prose: `"$100,000 - $120,000"`,
//! `"8 000 zł / month"`, `"55-65k EUR p.a."`. This module extracts the
//! amount (or range), the currency and the pay period from such text so it can
//! feed the equivalence engine. Anything the text does not state is left as
//! `None` for the caller to default.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Currency, PayPeriod, SalaryObservation};

/// A salary extracted from free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSalary {
    /// The amount, or the lower bound of a range.
    pub min: Decimal,
    /// The upper bound, when the text gives a range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
    /// The currency, if one was recognised.
    pub currency: Option<Currency>,
    /// The pay period, if one was recognised.
    pub period: Option<PayPeriod>,
}

impl ParsedSalary {
    /// Returns the single amount, or the middle of the range.
    pub fn midpoint(&self) -> Decimal {
        match self.max {
            // min <= max, so the difference cannot overflow
            Some(max) => self.min + (max - self.min) / Decimal::TWO,
            None => self.min,
        }
    }

    /// Turns the parsed salary into an observation at the range midpoint.
    ///
    /// Missing currency or period fall back to the given defaults; if there is
    /// still nothing to use a [`EngineError::SalaryParseError`] is returned.
    pub fn to_observation(
        &self,
        default_currency: Option<&Currency>,
        default_period: Option<PayPeriod>,
    ) -> EngineResult<SalaryObservation> {
        let currency = self
            .currency
            .as_ref()
            .or(default_currency)
            .cloned()
            .ok_or_else(|| self.unresolved("currency"))?;
        let period = self
            .period
            .or(default_period)
            .ok_or_else(|| self.unresolved("pay period"))?;

        SalaryObservation::new(self.midpoint(), currency, period)
    }

    fn unresolved(&self, what: &str) -> EngineError {
        EngineError::SalaryParseError {
            input: self.midpoint().to_string(),
            message: format!("{} not stated and no default given", what),
        }
    }
}

/// Parses a free-text salary.
///
/// Currency codes are only recognised if they are in `config`'s currency set;
/// the symbols `$`, `€`, `£` and `zł` always map to USD, EUR, GBP and PLN.
///
/// # Errors
///
/// Returns [`EngineError::SalaryParseError`] if the text is empty, contains
/// no amount, mentions two different currencies, or gives a range whose lower
/// bound exceeds the upper bound.
///
/// # Examples
///
/// ```
/// use salary_equivalence::config::EngineConfig;
/// use salary_equivalence::models::PayPeriod;
/// use salary_equivalence::salary_text::parse_salary_text;
/// use rust_decimal::Decimal;
///
/// let parsed = parse_salary_text("$100,000 - $120,000 per year", &EngineConfig::default()).unwrap();
/// assert_eq!(parsed.min, Decimal::new(100000, 0));
/// assert_eq!(parsed.max, Some(Decimal::new(120000, 0)));
/// assert_eq!(parsed.currency.unwrap().code(), "USD");
/// assert_eq!(parsed.period, Some(PayPeriod::Yearly));
/// ```
pub fn parse_salary_text(text: &str, config: &EngineConfig) -> EngineResult<ParsedSalary> {
    let parse_error = |message: &str| EngineError::SalaryParseError {
        input: text.to_string(),
        message: message.to_string(),
    };

    if text.trim().is_empty() {
        return Err(parse_error("salary text is empty"));
    }

    let chars: Vec<char> = text.chars().collect();
    let numbers = scan_numbers(&chars).map_err(|m| parse_error(&m))?;
    let first = numbers.first().ok_or_else(|| parse_error("no amount found"))?;

    let (min, max) = match numbers.get(1) {
        Some(second) if is_range_separator(&chars[first.end..second.start]) => {
            let mut low = first.value;
            // "100-120k" puts the suffix on the upper bound only
            if second.thousands && !first.thousands && low < Decimal::ONE_THOUSAND {
                low = scale_thousands(low, &chars[first.start..first.end])
                    .map_err(|m| parse_error(&m))?;
            }
            if low > second.value {
                return Err(parse_error("range lower bound exceeds upper bound"));
            }
            (low, Some(second.value))
        }
        _ => (first.value, None),
    };

    let currency = detect_currency(text, config).map_err(|m| parse_error(&m))?;
    let period = detect_period(&text.to_lowercase());

    Ok(ParsedSalary {
        min,
        max,
        currency,
        period,
    })
}

#[derive(Debug)]
struct NumberToken {
    value: Decimal,
    start: usize,
    end: usize,
    thousands: bool,
}

fn is_separator(c: char) -> bool {
    matches!(c, ',' | '.' | ' ' | '\u{a0}' | '\'')
}

/// Finds every number in the text, resolving grouping and decimal separators.
fn scan_numbers(chars: &[char]) -> Result<Vec<NumberToken>, String> {
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let start = i;
        let mut raw = String::new();
        while i < chars.len() {
            let c = chars[i];
            if c.is_ascii_digit() {
                raw.push(c);
                i += 1;
            } else if is_separator(c) && continues_number(chars, i) {
                raw.push(c);
                i += 1;
            } else {
                break;
            }
        }
        let end = i;

        let mut value = normalize_number(&raw)?;

        // Optional "k" suffix, possibly after a space: "120k", "120 K"
        let mut j = i;
        while j < chars.len() && chars[j] == ' ' {
            j += 1;
        }
        let thousands = j < chars.len()
            && matches!(chars[j], 'k' | 'K')
            && chars.get(j + 1).is_none_or(|c| !c.is_alphabetic());
        if thousands {
            value = scale_thousands(value, &chars[start..end])?;
            i = j + 1;
        }

        tokens.push(NumberToken {
            value,
            start,
            end,
            thousands,
        });
    }

    Ok(tokens)
}

/// Applies a `k` suffix.
fn scale_thousands(value: Decimal, raw: &[char]) -> Result<Decimal, String> {
    value.checked_mul(Decimal::ONE_THOUSAND).ok_or_else(|| {
        format!("amount '{}' is too large", raw.iter().collect::<String>())
    })
}

/// A separator belongs to a number only if digits follow it. Spaces only
/// count as grouping when exactly three digits follow.
fn continues_number(chars: &[char], at: usize) -> bool {
    let next_is_digit = chars.get(at + 1).is_some_and(|c| c.is_ascii_digit());
    if !next_is_digit {
        return false;
    }
    if matches!(chars[at], ' ' | '\u{a0}' | '\'') {
        let digits = chars[at + 1..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count();
        return digits == 3;
    }
    true
}

/// Turns "100,000", "1.234,56" or "57,5" into a decimal.
///
/// The last `,` or `.` is a decimal point unless exactly three digits follow
/// it; every other separator is grouping.
fn normalize_number(raw: &str) -> Result<Decimal, String> {
    let last_mark = raw.rfind([',', '.']);
    let decimal_at = last_mark.filter(|&pos| {
        raw[pos + 1..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .count()
            != 3
    });

    let mut normalized = String::with_capacity(raw.len());
    for (pos, c) in raw.char_indices() {
        if c.is_ascii_digit() {
            normalized.push(c);
        } else if Some(pos) == decimal_at {
            normalized.push('.');
        }
    }

    Decimal::from_str(&normalized).map_err(|e| format!("invalid amount '{}': {}", raw, e))
}

fn is_range_separator(between: &[char]) -> bool {
    let text: String = between.iter().collect::<String>().to_lowercase();
    text.contains(['-', '–', '—'])
        || text
            .split(|c: char| !c.is_alphabetic())
            .any(|word| word == "to")
}

fn detect_currency(text: &str, config: &EngineConfig) -> Result<Option<Currency>, String> {
    let lower = text.to_lowercase();
    let mut found: Vec<Currency> = Vec::new();
    let mut note = |code: &'static str| {
        let currency = Currency::from_static(code);
        if !found.contains(&currency) {
            found.push(currency);
        }
    };

    if text.contains('$') {
        note("USD");
    }
    if text.contains('€') {
        note("EUR");
    }
    if text.contains('£') {
        note("GBP");
    }
    if lower.contains("zł") {
        note("PLN");
    }

    for (_, word) in words(&lower) {
        if word.chars().count() != 3 {
            continue;
        }
        if let Some(currency) = config
            .currencies()
            .iter()
            .find(|c| c.code().eq_ignore_ascii_case(word))
        {
            if !found.contains(currency) {
                found.push(currency.clone());
            }
        }
    }

    match found.len() {
        0 => Ok(None),
        1 => Ok(found.pop()),
        _ => Err(format!(
            "mentions more than one currency: {}",
            found
                .iter()
                .map(Currency::code)
                .collect::<Vec<_>>()
                .join(", ")
        )),
    }
}

/// Yields each run of letters with its byte offset.
fn words(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.char_indices()
        .filter(|&(i, c)| {
            c.is_alphabetic() && !text[..i].chars().next_back().is_some_and(char::is_alphabetic)
        })
        .map(move |(start, _)| {
            let end = text[start..]
                .find(|c: char| !c.is_alphabetic())
                .map_or(text.len(), |n| start + n);
            (start, &text[start..end])
        })
}

/// Returns the first pay period the text mentions.
fn detect_period(lower: &str) -> Option<PayPeriod> {
    let mut best: Option<(usize, PayPeriod)> = None;
    let mut consider = |at: usize, period: PayPeriod| {
        if best.is_none_or(|(pos, _)| at < pos) {
            best = Some((at, period));
        }
    };

    if let Some(at) = lower.find("p.a") {
        consider(at, PayPeriod::Yearly);
    }

    for (at, word) in words(lower) {
        let after_slash = at > 0 && lower[..at].ends_with('/');
        let period = match word {
            "hour" | "hours" | "hourly" | "hr" | "hrs" => Some(PayPeriod::Hourly),
            "day" | "days" | "daily" => Some(PayPeriod::Daily),
            "month" | "months" | "monthly" | "mo" | "mth" => Some(PayPeriod::Monthly),
            "year" | "years" | "yearly" | "annual" | "annually" | "annum" | "yr" | "pa" => {
                Some(PayPeriod::Yearly)
            }
            "h" if after_slash => Some(PayPeriod::Hourly),
            "d" if after_slash => Some(PayPeriod::Daily),
            "m" if after_slash => Some(PayPeriod::Monthly),
            "y" if after_slash => Some(PayPeriod::Yearly),
            _ => None,
        };
        if let Some(period) = period {
            consider(at, period);
        }
    }

    best.map(|(_, period)| period)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn parse(text: &str) -> ParsedSalary {
        parse_salary_text(text, &EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_dollar_range_from_job_board() {
        let parsed = parse("$100,000 - $120,000");
        assert_eq!(parsed.min, dec("100000"));
        assert_eq!(parsed.max, Some(dec("120000")));
        assert_eq!(parsed.currency, Some(Currency::new("USD").unwrap()));
        assert_eq!(parsed.period, None);
        assert_eq!(parsed.midpoint(), dec("110000"));
    }

    #[test]
    fn test_code_and_period_words() {
        let parsed = parse("8000 PLN / monthly");
        assert_eq!(parsed.min, dec("8000"));
        assert_eq!(parsed.max, None);
        assert_eq!(parsed.currency, Some(Currency::new("PLN").unwrap()));
        assert_eq!(parsed.period, Some(PayPeriod::Monthly));
    }

    #[test]
    fn test_space_grouping_and_zloty_symbol() {
        let parsed = parse("12 000 - 15 000 zł/mies.");
        assert_eq!(parsed.min, dec("12000"));
        assert_eq!(parsed.max, Some(dec("15000")));
        assert_eq!(parsed.currency, Some(Currency::new("PLN").unwrap()));
    }

    #[test]
    fn test_k_suffix_applies_to_both_bounds() {
        let parsed = parse("55-65k EUR p.a.");
        assert_eq!(parsed.min, dec("55000"));
        assert_eq!(parsed.max, Some(dec("65000")));
        assert_eq!(parsed.period, Some(PayPeriod::Yearly));
    }

    #[test]
    fn test_decimal_comma_and_hourly_slash() {
        let parsed = parse("€57,50/h");
        assert_eq!(parsed.min, dec("57.50"));
        assert_eq!(parsed.currency, Some(Currency::new("EUR").unwrap()));
        assert_eq!(parsed.period, Some(PayPeriod::Hourly));
    }

    #[test]
    fn test_european_grouping_with_decimal() {
        let parsed = parse("1.234,56 GBP a day");
        assert_eq!(parsed.min, dec("1234.56"));
        assert_eq!(parsed.period, Some(PayPeriod::Daily));
    }

    #[test]
    fn test_word_to_marks_range() {
        let parsed = parse("£40,000 to £45,000 per annum");
        assert_eq!(parsed.max, Some(dec("45000")));
        assert_eq!(parsed.period, Some(PayPeriod::Yearly));
    }

    #[test]
    fn test_first_period_mentioned_wins() {
        let parsed = parse("30 USD per hour, 40 hours a week, paid monthly");
        assert_eq!(parsed.period, Some(PayPeriod::Hourly));
        assert_eq!(parsed.min, dec("30"));
        assert_eq!(parsed.max, None);
    }

    #[test]
    fn test_unconfigured_code_is_ignored() {
        let parsed = parse("5000 CHF monthly");
        assert_eq!(parsed.currency, None);
    }

    #[test]
    fn test_two_currencies_is_an_error() {
        let result = parse_salary_text("$5000 or 4500 EUR", &EngineConfig::default());
        match result {
            Err(EngineError::SalaryParseError { message, .. }) => {
                assert!(message.contains("USD") && message.contains("EUR"))
            }
            other => panic!("Expected SalaryParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_and_wordy_text_are_errors() {
        let config = EngineConfig::default();
        assert!(matches!(
            parse_salary_text("   ", &config),
            Err(EngineError::SalaryParseError { .. })
        ));
        assert!(matches!(
            parse_salary_text("competitive", &config),
            Err(EngineError::SalaryParseError { .. })
        ));
    }

    #[test]
    fn test_inverted_range_is_an_error() {
        let result = parse_salary_text("120 000 - 100 000 PLN", &EngineConfig::default());
        assert!(matches!(result, Err(EngineError::SalaryParseError { .. })));
    }

    #[test]
    fn test_to_observation_uses_defaults() {
        let parsed = parse("$100,000 - $120,000");
        let observation = parsed.to_observation(None, Some(PayPeriod::Yearly)).unwrap();
        assert_eq!(observation.amount(), dec("110000"));
        assert_eq!(observation.currency().code(), "USD");
        assert_eq!(observation.period(), PayPeriod::Yearly);
    }

    #[test]
    fn test_to_observation_without_period_fails() {
        let parsed = parse("$100,000");
        assert!(matches!(
            parsed.to_observation(None, None),
            Err(EngineError::SalaryParseError { .. })
        ));
    }

    #[test]
    fn test_oversized_k_amount_is_an_error() {
        let result = parse_salary_text("100000000000000000000000000k PLN", &EngineConfig::default());
        match result {
            Err(EngineError::SalaryParseError { message, .. }) => {
                assert!(message.contains("too large"))
            }
            other => panic!("Expected SalaryParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_midpoint_of_largest_range_does_not_overflow() {
        let parsed = parse("$79228162514264337593543950335 - $79228162514264337593543950335");
        assert_eq!(parsed.midpoint(), Decimal::MAX);

        let observation = parsed.to_observation(None, Some(PayPeriod::Yearly)).unwrap();
        assert_eq!(observation.amount(), Decimal::MAX);
        assert!(matches!(
            parsed.to_observation(None, None),
            Err(EngineError::SalaryParseError { .. })
        ));
    }

    #[test]
    fn test_midpoint_of_uneven_range() {
        let parsed = parse("55-65k EUR");
        assert_eq!(parsed.midpoint(), dec("60000"));
    }
}

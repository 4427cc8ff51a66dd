use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_number, r"[\$£€]?\s*(\d+[.,]?\d*)");

// ── Amount ───────────────────────────────────────────────────────────────────

/// Prioritized amount rules, evaluated in order. The first rule producing
/// any match wins; within a rule the *last* match is selected, since totals
/// tend to appear below subtotals and line items on a receipt.
///
/// Keyword rules carry no left word boundary, so `total` also matches inside
/// `SUBTOTAL` and `GRAND TOTAL` lines; the dedicated rules further down stay
/// in the table to keep the priority order auditable.
const AMOUNT_RULES: [(&str, &str); 10] = [
    ("total", r"(?im)TOTAL\s*[\$£€]?\s*(\d+[.,]?\d*)"),
    ("amount", r"(?im)AMOUNT\s*[\$£€]?\s*(\d+[.,]?\d*)"),
    ("balance", r"(?im)BALANCE\s*[\$£€]?\s*(\d+[.,]?\d*)"),
    ("due", r"(?im)DUE\s*[\$£€]?\s*(\d+[.,]?\d*)"),
    ("grand_total", r"(?im)GRAND\s+TOTAL\s*[\$£€]?\s*(\d+[.,]?\d*)"),
    ("subtotal", r"(?im)SUBTOTAL\s*[\$£€]?\s*(\d+[.,]?\d*)"),
    ("currency_prefix", r"(?m)[\$£€]\s*(\d+[.,]?\d*)"),
    ("currency_suffix", r"(?m)(\d+[.,]?\d*)\s*[\$£€]"),
    ("lone_number_line", r"(?m)^\s*[\$£€]?\s*(\d+[.,]?\d*)\s*$"),
    ("trailing_number", r"(?m)[\$£€]?\s*(\d+[.,]?\d*)\s*$"),
];

fn amount_rules() -> &'static Vec<(&'static str, Regex)> {
    static RULES: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    RULES.get_or_init(|| {
        AMOUNT_RULES
            .iter()
            .map(|(name, pat)| (*name, Regex::new(pat).expect("invalid regex")))
            .collect()
    })
}

/// Best-guess monetary total. Absence is an expected outcome given OCR
/// noise, never an error.
pub fn extract_amount(text: &str) -> Option<f64> {
    for (name, re) in amount_rules() {
        if let Some(m) = re.captures_iter(text).filter_map(|c| c.get(1)).last() {
            tracing::debug!(rule = name, raw = m.as_str(), "amount rule matched");
            return parse_amount(m.as_str());
        }
    }

    // No rule matched: scan lines containing a currency symbol and take the
    // last numeric token on the last such line that has one.
    let mut candidate = None;
    for line in text.lines() {
        if line.contains(['$', '£', '€']) {
            if let Some(m) = re_number().captures_iter(line).filter_map(|c| c.get(1)).last() {
                candidate = Some(m.as_str());
            }
        }
    }
    let raw = candidate?;
    tracing::debug!(raw, "amount taken from currency line fallback");
    parse_amount(raw)
}

/// Normalize a captured amount: comma decimal separators become periods,
/// everything but digits and periods is stripped, then parse.
fn parse_amount(raw: &str) -> Option<f64> {
    let clean: String = raw
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    Decimal::from_str(&clean).ok()?.to_f64()
}

// ── Date ─────────────────────────────────────────────────────────────────────

const DATE_PATTERNS: [&str; 4] = [
    r"\d{2}/\d{2}/\d{4}",
    r"\d{2}-\d{2}-\d{4}",
    r"\d{4}/\d{2}/\d{2}",
    r"\d{4}-\d{2}-\d{2}",
];

fn date_patterns() -> &'static Vec<Regex> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        DATE_PATTERNS
            .iter()
            .map(|pat| Regex::new(pat).expect("invalid regex"))
            .collect()
    })
}

/// Best-guess transaction date, normalized to `YYYY-MM-DD`.
///
/// Patterns are tried in fixed order and only the first match of the first
/// matching pattern is considered. The calendar convention is decided by the
/// matched string itself: a leading 4-digit run parses year-first
/// (`%Y-%m-%d`), anything else parses day-first (`%d/%m/%Y`). A consequence
/// is that `DD-MM-YYYY` and `YYYY/MM/DD` shaped matches never parse (wrong
/// separator for the chosen format) and fall through to the next pattern —
/// long-standing behavior, pinned by tests.
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    for re in date_patterns() {
        if let Some(m) = re.find(text) {
            let s = m.as_str();
            let year_first = s.len() >= 4 && s.as_bytes()[..4].iter().all(u8::is_ascii_digit);
            let parsed = if year_first {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
            } else {
                NaiveDate::parse_from_str(s, "%d/%m/%Y")
            };
            match parsed {
                Ok(date) => {
                    tracing::debug!(raw = s, %date, "date matched");
                    return Some(date);
                }
                Err(_) => continue,
            }
        }
    }
    None
}

// ── Merchant ─────────────────────────────────────────────────────────────────

/// First non-blank line among the first three that contains no digits —
/// merchant names tend to precede addresses, phone numbers and prices in
/// receipt headers.
pub fn extract_merchant(text: &str) -> Option<String> {
    text.lines()
        .take(3)
        .find(|line| !line.trim().is_empty() && !line.chars().any(|c| c.is_ascii_digit()))
        .map(|line| line.trim().to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

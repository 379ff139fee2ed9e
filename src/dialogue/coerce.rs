//! Slot value coercion.
//!
//! Number slots accept digits (ASCII, Persian or Arabic-Indic) and spoken
//! English or Persian number words. Word phrases must follow number grammar
//! ("two thousand five hundred", "صد و بیست و پنج"); a run made only of
//! single digit words is read as dictated digits, so "one two three" is 123.
//! A phrase that cannot be read as a number is kept verbatim as text and
//! flagged with a [`CoercionWarning`]; the dialogue never stalls on it.

use serde::Serialize;

use super::session::SlotValue;
use crate::registry::table::fold_persian_letter;
use crate::registry::{SlotSpec, ValueKind};

/// Raised when a number slot received a phrase that is not a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoercionWarning {
    pub slot: SlotSpec,
    pub raw: String,
}

/// Coerce recognized text into the value kind `slot` expects.
pub fn coerce(slot: SlotSpec, raw: &str) -> (SlotValue, Option<CoercionWarning>) {
    let raw = raw.trim();
    match slot.value_kind {
        ValueKind::Text => (SlotValue::Text(raw.to_string()), None),
        ValueKind::Number => match parse_spoken_number(raw) {
            Some(n) => (SlotValue::Number(n), None),
            None => (
                SlotValue::Text(raw.to_string()),
                Some(CoercionWarning { slot, raw: raw.to_string() }),
            ),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberWord {
    /// "a" in "a hundred" or "a thousand".
    Article,
    Zero,
    /// 1 to 9.
    Unit(u64),
    /// 10 to 19.
    Teen(u64),
    /// 20, 30, ... 90.
    Tens(u64),
    /// Fused hundreds ("دویست", "یکصد").
    Hundreds(u64),
    /// Multiplies the current group by 100.
    Hundred,
    /// Closes the current group (thousand, million, billion).
    Scale(u64),
    /// Written digits.
    Literal(u64),
}

// Last word seen in the current group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rank {
    Start,
    Article,
    Zero,
    Unit,
    Teen,
    Tens,
    Hundreds,
    Literal,
}

/// Read a spoken or written number. Returns `None` for anything that is not
/// entirely a well-formed number phrase, or that overflows `u64`.
pub fn parse_spoken_number(text: &str) -> Option<u64> {
    let normalized: String = text
        .chars()
        .filter(|c| !matches!(c, ',' | '٬' | '_' | '\u{200c}'))
        .map(ascii_digit)
        .map(fold_persian_letter)
        .collect();

    let words = tokenize(&normalized)
        .iter()
        .filter(|token| !is_filler(token))
        .map(|token| lookup(token))
        .collect::<Option<Vec<_>>>()?;
    if words.is_empty() {
        return None;
    }

    dictated_digits(&words).or_else(|| compose(&words))
}

fn dictated_digits(words: &[NumberWord]) -> Option<u64> {
    if words.len() < 2 {
        return None;
    }
    words.iter().try_fold(0u64, |acc, word| match *word {
        NumberWord::Zero => acc.checked_mul(10),
        NumberWord::Unit(d) => acc.checked_mul(10)?.checked_add(d),
        _ => None,
    })
}

fn compose(words: &[NumberWord]) -> Option<u64> {
    let mut total: u64 = 0;
    let mut group: u64 = 0;
    let mut rank = Rank::Start;
    let mut last_scale: Option<u64> = None;

    for &word in words {
        rank = match (rank, word) {
            // "zero" stands alone
            (Rank::Zero, _) => return None,
            (Rank::Start, NumberWord::Zero) if last_scale.is_none() => Rank::Zero,
            (Rank::Start, NumberWord::Article) => Rank::Article,
            (Rank::Start | Rank::Hundreds | Rank::Tens, NumberWord::Unit(v)) => {
                group += v;
                Rank::Unit
            }
            (Rank::Start | Rank::Hundreds, NumberWord::Teen(v)) => {
                group += v;
                Rank::Teen
            }
            (Rank::Start | Rank::Hundreds, NumberWord::Tens(v)) => {
                group += v;
                Rank::Tens
            }
            (Rank::Start, NumberWord::Hundreds(v)) => {
                group = v;
                Rank::Hundreds
            }
            (Rank::Start, NumberWord::Literal(v)) => {
                group = v;
                Rank::Literal
            }
            (Rank::Start | Rank::Article | Rank::Unit | Rank::Teen, NumberWord::Hundred) => {
                group = group.max(1) * 100;
                Rank::Hundreds
            }
            (Rank::Literal, NumberWord::Hundred) if group < 100 => {
                group *= 100;
                Rank::Hundreds
            }
            (_, NumberWord::Scale(scale)) => {
                // Scales only shrink: "million ... thousand", never "thousand thousand"
                if let Some(previous) = last_scale {
                    if scale >= previous || rank == Rank::Start {
                        return None;
                    }
                }
                total = total.checked_add(group.max(1).checked_mul(scale)?)?;
                group = 0;
                last_scale = Some(scale);
                Rank::Start
            }
            _ => return None,
        };
    }

    if rank == Rank::Article {
        return None;
    }
    total.checked_add(group)
}

fn ascii_digit(c: char) -> char {
    match c {
        '۰'..='۹' => char::from(b'0' + (c as u32 - '۰' as u32) as u8),
        '٠'..='٩' => char::from(b'0' + (c as u32 - '٠' as u32) as u8),
        _ => c,
    }
}

// Splits on whitespace and hyphens; adjacent digit runs ("1 250") are joined.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for raw in text.split(|c: char| c.is_whitespace() || c == '-') {
        let token = raw
            .trim_matches(|c: char| c.is_ascii_punctuation() || matches!(c, '؟' | '،'))
            .to_lowercase();
        if token.is_empty() {
            continue;
        }
        let is_digits = token.chars().all(|c| c.is_ascii_digit());
        match tokens.last_mut() {
            Some(prev) if is_digits && prev.chars().all(|c| c.is_ascii_digit()) => prev.push_str(&token),
            _ => tokens.push(token),
        }
    }
    tokens
}

fn is_filler(token: &str) -> bool {
    matches!(
        token,
        "and" | "و" | "rial" | "rials" | "toman" | "tomans" | "dollar" | "dollars" | "ریال" | "تومان" | "تومن"
    )
}

fn lookup(token: &str) -> Option<NumberWord> {
    if token.chars().all(|c| c.is_ascii_digit()) {
        return token.parse().ok().map(NumberWord::Literal);
    }

    let word = match token {
        "a" => NumberWord::Article,
        "zero" | "صفر" => NumberWord::Zero,
        "one" | "یک" | "یه" => NumberWord::Unit(1),
        "two" | "دو" => NumberWord::Unit(2),
        "three" | "سه" => NumberWord::Unit(3),
        "four" | "چهار" => NumberWord::Unit(4),
        "five" | "پنج" => NumberWord::Unit(5),
        "six" | "شش" | "شیش" => NumberWord::Unit(6),
        "seven" | "هفت" => NumberWord::Unit(7),
        "eight" | "هشت" => NumberWord::Unit(8),
        "nine" | "نه" => NumberWord::Unit(9),
        "ten" | "ده" => NumberWord::Teen(10),
        "eleven" | "یازده" => NumberWord::Teen(11),
        "twelve" | "دوازده" => NumberWord::Teen(12),
        "thirteen" | "سیزده" => NumberWord::Teen(13),
        "fourteen" | "چهارده" => NumberWord::Teen(14),
        "fifteen" | "پانزده" | "پونزده" => NumberWord::Teen(15),
        "sixteen" | "شانزده" | "شونزده" => NumberWord::Teen(16),
        "seventeen" | "هفده" => NumberWord::Teen(17),
        "eighteen" | "هجده" | "هیجده" => NumberWord::Teen(18),
        "nineteen" | "نوزده" => NumberWord::Teen(19),
        "twenty" | "بیست" => NumberWord::Tens(20),
        "thirty" | "سی" => NumberWord::Tens(30),
        "forty" | "چهل" => NumberWord::Tens(40),
        "fifty" | "پنجاه" => NumberWord::Tens(50),
        "sixty" | "شصت" => NumberWord::Tens(60),
        "seventy" | "هفتاد" => NumberWord::Tens(70),
        "eighty" | "هشتاد" => NumberWord::Tens(80),
        "ninety" | "نود" => NumberWord::Tens(90),
        "hundred" | "صد" => NumberWord::Hundred,
        "یکصد" => NumberWord::Hundreds(100),
        "دویست" => NumberWord::Hundreds(200),
        "سیصد" => NumberWord::Hundreds(300),
        "چهارصد" => NumberWord::Hundreds(400),
        "پانصد" | "پونصد" => NumberWord::Hundreds(500),
        "ششصد" => NumberWord::Hundreds(600),
        "هفتصد" => NumberWord::Hundreds(700),
        "هشتصد" => NumberWord::Hundreds(800),
        "نهصد" => NumberWord::Hundreds(900),
        "thousand" | "هزار" => NumberWord::Scale(1_000),
        "million" | "میلیون" => NumberWord::Scale(1_000_000),
        "billion" | "میلیارد" => NumberWord::Scale(1_000_000_000),
        _ => return None,
    };
    Some(word)
}

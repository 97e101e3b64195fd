use crate::model::ParsedRequest;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Weight assumed when the message does not start with one
pub const DEFAULT_WEIGHT_GRAMS: u32 = 100;

// Longest tokens first so "grams" is not consumed as "g" + "rams"
const UNIT_TOKENS: [&str; 5] = ["grams", "gram", "公克", "克", "g"];

static LEADING_WEIGHT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^([0-9]+)\s*(.*)$").expect("valid regex"));

/// Why a message is not a food lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterpretError {
    /// Nothing is left once the weight is removed
    #[error("no food name in message")]
    MissingFood,
    /// The leading number is zero or too large
    #[error("invalid weight: {0}")]
    InvalidWeight(String),
}

/// Split a message like `150g 雞胸肉` into a food name and a weight.
///
/// Only a leading run of ASCII digits counts as the weight; any later digits
/// are part of the food name. Messages without a leading number are looked up
/// at 100 g.
pub fn interpret(text: &str) -> Result<ParsedRequest, InterpretError> {
    let text = text.trim();

    let (weight_grams, food_name) = match LEADING_WEIGHT_RE.captures(text) {
        Some(caps) => {
            let raw_weight = &caps[1];
            let weight = raw_weight
                .parse::<u32>()
                .ok()
                .filter(|w| *w > 0)
                .ok_or_else(|| InterpretError::InvalidWeight(raw_weight.to_string()))?;
            let rest = caps.get(2).map_or("", |m| m.as_str());
            (weight, strip_unit(rest).trim())
        }
        None => (DEFAULT_WEIGHT_GRAMS, text),
    };

    if food_name.is_empty() {
        return Err(InterpretError::MissingFood);
    }

    Ok(ParsedRequest {
        food_name: food_name.to_string(),
        weight_grams,
    })
}

/// Drop a leading gram unit. ASCII units only count when they are not the
/// start of a longer word, so "150 grapes" keeps "grapes".
fn strip_unit(rest: &str) -> &str {
    for unit in UNIT_TOKENS {
        let Some(after) = strip_prefix_ignore_ascii_case(rest, unit) else {
            continue;
        };
        let glued_to_word = unit.is_ascii()
            && after
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic());
        if !glued_to_word {
            return after;
        }
    }
    rest
}

fn strip_prefix_ignore_ascii_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

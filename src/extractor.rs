use crate::error::NutritionError;
use crate::model::NutritionRecord;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

// Label, then anything on the same line that is not a digit ("：約 ", " about "),
// then the first number. Thousands separators are allowed: "1,200".
const NUMBER: &str = r"[^0-9\n]*?([0-9]+(?:,[0-9]{3})*(?:\.[0-9]+)?)";

fn labelled(labels: &str) -> Regex {
    Regex::new(&format!("(?i)(?:{}){}", labels, NUMBER)).expect("valid regex")
}

static CALORIES_RE: Lazy<Regex> = Lazy::new(|| labelled("熱量|卡路里|calories"));
static PROTEIN_RE: Lazy<Regex> = Lazy::new(|| labelled("蛋白質|protein"));
static FAT_RE: Lazy<Regex> = Lazy::new(|| labelled("脂肪|fat"));
static CARBS_RE: Lazy<Regex> = Lazy::new(|| labelled("碳水化合物|碳水|carbohydrates?|carbs"));

/// Parse the oracle's free-text answer into a per-100g record.
///
/// Each field is searched for independently and a missing field is `0.0`.
/// The answer is rejected only when it is blank or no field at all can be
/// read from it.
pub fn extract(raw_text: &str) -> Result<NutritionRecord, NutritionError> {
    if raw_text.trim().is_empty() {
        return Err(NutritionError::Unparseable("empty answer".to_string()));
    }

    let calories = find_number(&CALORIES_RE, raw_text);
    let protein = find_number(&PROTEIN_RE, raw_text);
    let fat = find_number(&FAT_RE, raw_text);
    let carbs = find_number(&CARBS_RE, raw_text);

    if [calories, protein, fat, carbs].iter().all(Option::is_none) {
        return Err(NutritionError::Unparseable(format!(
            "no nutrition labels found in {:?}",
            raw_text
        )));
    }

    let record = NutritionRecord {
        calories: calories.unwrap_or(0.0),
        protein_grams: protein.unwrap_or(0.0),
        fat_grams: fat.unwrap_or(0.0),
        carbs_grams: carbs.unwrap_or(0.0),
    };
    debug!("Extracted per-100g record: {:?}", record);
    Ok(record)
}

fn find_number(re: &Regex, text: &str) -> Option<f64> {
    let raw = re.captures(text)?.get(1)?.as_str();
    raw.replace(',', "").parse().ok()
}

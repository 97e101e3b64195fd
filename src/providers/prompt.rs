/// The instruction sent ahead of every food name.
///
/// Asks for per-100g calories, protein, fat and carbohydrates in fixed
/// Traditional-Chinese labelled lines with no commentary. Loaded from
/// `prompt.txt` at compile time.
pub const NUTRITION_PROMPT: &str = include_str!("prompt.txt");

/// Build the user message for one lookup
pub fn build_nutrition_prompt(food_name: &str) -> String {
    format!("{}\n食物名稱：「{}」", NUTRITION_PROMPT.trim_end(), food_name.trim())
}

use crate::model::NutritionRecord;

/// Scale a per-100g record to `weight_grams`.
///
/// Calories are rounded to whole units and macronutrients to one decimal.
/// Values are not clamped; whatever magnitude the oracle gave is kept.
pub fn scale(record: &NutritionRecord, weight_grams: u32) -> NutritionRecord {
    let multiplier = f64::from(weight_grams) / 100.0;

    NutritionRecord {
        calories: (record.calories * multiplier).round(),
        protein_grams: round_tenth(record.protein_grams * multiplier),
        fat_grams: round_tenth(record.fat_grams * multiplier),
        carbs_grams: round_tenth(record.carbs_grams * multiplier),
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(calories: f64, protein: f64, fat: f64, carbs: f64) -> NutritionRecord {
        NutritionRecord {
            calories,
            protein_grams: protein,
            fat_grams: fat,
            carbs_grams: carbs,
        }
    }

    #[test]
    fn test_scale_150g() {
        let scaled = scale(&record(250.0, 20.0, 10.0, 5.0), 150);
        assert_eq!(scaled, record(375.0, 30.0, 15.0, 7.5));
    }

    #[test]
    fn test_identity_weight() {
        let per_100g = record(165.0, 31.0, 3.6, 0.0);
        assert_eq!(scale(&per_100g, 100), per_100g);
    }

    #[test]
    fn test_rounding() {
        let scaled = scale(&record(123.0, 4.44, 1.06, 0.33), 50);
        assert_eq!(scaled.calories, 62.0);
        assert_eq!(scaled.protein_grams, 2.2);
        assert_eq!(scaled.fat_grams, 0.5);
        assert_eq!(scaled.carbs_grams, 0.2);
    }

    #[test]
    fn test_no_clamping() {
        let scaled = scale(&record(-10.0, 0.0, 5000.0, 0.0), 200);
        assert_eq!(scaled.calories, -20.0);
        assert_eq!(scaled.fat_grams, 10000.0);
    }
}

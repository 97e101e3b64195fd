use crate::model::{FailureReason, NutritionRecord, ParsedRequest};

const USAGE_HINT_MESSAGE: &str = "請輸入「重量 + 食物名稱」，例如：150g 雞胸肉";
const ORACLE_UNAVAILABLE_MESSAGE: &str = "❌ 抱歉，我暫時無法取得資料，請稍後再試！";
const PARSE_FAILURE_MESSAGE: &str = "⚠️ 無法解讀營養資訊，請換個說法或試試其他食物名稱。";

/// Render the reply for a successful lookup
pub fn format_reply(request: &ParsedRequest, scaled: &NutritionRecord) -> String {
    format!(
        "食物：{}\n重量：{} g\n熱量：約 {:.0} 大卡\n蛋白質：約 {:.1} g\n脂肪：約 {:.1} g\n碳水化合物：約 {:.1} g",
        request.food_name,
        request.weight_grams,
        scaled.calories,
        scaled.protein_grams,
        scaled.fat_grams,
        scaled.carbs_grams,
    )
}

/// User-facing message for a failed lookup
pub fn format_error(reason: FailureReason) -> String {
    match reason {
        FailureReason::UsageHint => USAGE_HINT_MESSAGE,
        FailureReason::OracleUnavailable => ORACLE_UNAVAILABLE_MESSAGE,
        FailureReason::ParseFailure => PARSE_FAILURE_MESSAGE,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_reply() {
        let request = ParsedRequest {
            food_name: "雞胸肉".to_string(),
            weight_grams: 150,
        };
        let scaled = NutritionRecord {
            calories: 375.0,
            protein_grams: 30.0,
            fat_grams: 15.0,
            carbs_grams: 7.5,
        };

        assert_eq!(
            format_reply(&request, &scaled),
            "食物：雞胸肉\n重量：150 g\n熱量：約 375 大卡\n蛋白質：約 30.0 g\n脂肪：約 15.0 g\n碳水化合物：約 7.5 g"
        );
    }

    #[test]
    fn test_error_messages_are_distinct() {
        let reasons = [
            FailureReason::UsageHint,
            FailureReason::OracleUnavailable,
            FailureReason::ParseFailure,
        ];
        let messages: Vec<String> = reasons.iter().map(|r| format_error(*r)).collect();

        assert!(messages[0].contains("重量 + 食物名稱"));
        assert!(messages[1].contains("稍後再試"));
        assert!(messages[2].contains("其他食物名稱"));
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[0], messages[2]);
    }
}

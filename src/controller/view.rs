//! Result panel render model.

use crate::format::format_number;
use crate::model::result::ClassificationResult;

/// Badge emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    /// `PRODUTIVO`
    Emphasis,
    /// Any other label.
    Neutral,
}

/// What the result panel shows, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub badge: String,
    pub badge_style: BadgeStyle,
    pub suggested_response: String,
    pub char_count: String,
    pub word_count: String,
    pub reasoning: Option<String>,
    pub filename: Option<String>,
}

impl ResultView {
    pub fn from_result(result: &ClassificationResult) -> Self {
        let badge_style = if result.category.is_productive() {
            BadgeStyle::Emphasis
        } else {
            BadgeStyle::Neutral
        };
        Self {
            badge: result.category.as_str().to_string(),
            badge_style,
            suggested_response: result.suggested_response.clone(),
            char_count: format_number(result.char_count),
            word_count: format_number(result.word_count),
            reasoning: result
                .reasoning
                .as_ref()
                .filter(|r| !r.trim().is_empty())
                .cloned(),
            filename: result.filename.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::result::Category;

    fn result(category: &str) -> ClassificationResult {
        ClassificationResult {
            category: Category::from(category.to_string()),
            suggested_response: "Obrigado pelo contato.".to_string(),
            char_count: 1234,
            word_count: 56,
            reasoning: Some("  ".to_string()),
            filename: None,
        }
    }

    #[test]
    fn test_productive_badge_is_emphasized() {
        let view = ResultView::from_result(&result("PRODUTIVO"));
        assert_eq!(view.badge, "PRODUTIVO");
        assert_eq!(view.badge_style, BadgeStyle::Emphasis);
        assert_eq!(view.char_count, "1.234");
        assert_eq!(view.word_count, "56");
        // Blank reasoning is not shown
        assert_eq!(view.reasoning, None);
    }

    #[test]
    fn test_other_labels_are_neutral_and_verbatim() {
        let view = ResultView::from_result(&result("SPAM"));
        assert_eq!(view.badge, "SPAM");
        assert_eq!(view.badge_style, BadgeStyle::Neutral);
    }
}

//! Classification results as returned by the service.

use serde::{Deserialize, Deserializer, Serialize};

/// Category assigned by the service.
///
/// The display is binary: `PRODUTIVO` gets the emphasis style, any other
/// label is shown as-is with the neutral style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Productive,
    Other(String),
}

impl Category {
    /// Wire label of the productive category.
    pub const PRODUCTIVE_LABEL: &'static str = "PRODUTIVO";

    /// The label exactly as the service sent it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Productive => Self::PRODUCTIVE_LABEL,
            Self::Other(label) => label,
        }
    }

    pub fn is_productive(&self) -> bool {
        matches!(self, Self::Productive)
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        if label == Self::PRODUCTIVE_LABEL {
            Self::Productive
        } else {
            Self::Other(label)
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The service's verdict plus suggested reply and text statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Some deployments send `classification` instead of `category`.
    #[serde(alias = "classification")]
    pub category: Category,
    pub suggested_response: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub char_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub word_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl ClassificationResult {
    /// Decode a response body, reporting why it does not have the expected shape.
    pub fn from_json(mut body: serde_json::Value) -> Result<Self, String> {
        let Some(object) = body.as_object_mut() else {
            return Err("response body is not a JSON object".to_string());
        };
        // Both names present would be a duplicate field for serde.
        if object.contains_key("category") {
            object.remove("classification");
        }
        serde_json::from_value(body).map_err(|e| e.to_string())
    }
}

/// Accept counts as numbers or numeric strings; anything else counts as 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(serde_json::Value::String(s)) => leading_digits(&s),
        _ => 0,
    })
}

fn leading_digits(s: &str) -> u64 {
    let digits: String = s
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Service health as reported by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}

use serde::{Deserialize, Serialize};

/// ESG reporting standards a disclosure can be aligned with.
/// Mentioned in the prompt only; nothing is enforced structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Framework {
    #[serde(rename = "CSRD")]
    Csrd,
    #[serde(rename = "SASB")]
    Sasb,
    #[serde(rename = "GRI")]
    Gri,
    #[serde(rename = "CDP")]
    Cdp,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Csrd => "CSRD",
            Framework::Sasb => "SASB",
            Framework::Gri => "GRI",
            Framework::Cdp => "CDP",
        }
    }
}

/// Stylistic register of the generated disclosure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Regulatory,
    InvestorFriendly,
}

impl Tone {
    pub fn is_regulatory(&self) -> bool {
        matches!(self, Tone::Regulatory)
    }
}

/// A single reported metric. `value` stays a string so ranges and
/// qualitative values ("~40%", "in progress") pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Request body for POST /api/generate-disclosure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisclosureRequest {
    pub company_name: String,
    pub sector: String,
    pub year: i32,
    /// Order preserved, duplicates allowed.
    pub frameworks: Vec<Framework>,
    pub metrics: Vec<Metric>,
    pub initiatives: String,
    #[serde(default)]
    pub tone: Tone,
}

/// Normalized token accounting. Counters are `None` when the provider
/// did not report them; they are never defaulted to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageRecord {
    pub model_name: String,
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

/// Structured result of interpreting raw model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedDisclosure {
    pub disclosure_text: String,
    pub suggestions: Vec<String>,
    pub usage: UsageRecord,
}

/// Flattened response body for POST /api/generate-disclosure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateDisclosureResponse {
    pub disclosure_text: String,
    pub improvement_suggestions: Vec<String>,
    pub model: String,
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

impl From<GeneratedDisclosure> for GenerateDisclosureResponse {
    fn from(generated: GeneratedDisclosure) -> Self {
        let GeneratedDisclosure {
            disclosure_text,
            suggestions,
            usage,
        } = generated;
        Self {
            disclosure_text,
            improvement_suggestions: suggestions,
            model: usage.model_name,
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

/// One row of the in-memory generation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub company_name: String,
    pub year: i32,
    pub frameworks: Vec<Framework>,
    /// RFC 3339 UTC timestamp ending in `Z`.
    pub created_at: String,
    /// First 200 characters of the disclosure, plus `...` if it was longer.
    pub disclosure_preview: String,
}

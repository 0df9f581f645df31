//! Research answer payloads returned by the backend.
//!
//! The backend asks its model for strict JSON but forwards whatever came
//! back: a parsed object when the text was valid JSON, otherwise the raw
//! string. Transcript entries add a third wrinkle — `answer_json` may be a
//! string that itself contains JSON. Everything here is optional-field and
//! unknown-field tolerant, and rendering does explicit presence checks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An answer as delivered by the backend: structured when the payload was a
/// JSON object, plain text otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerPayload {
    Structured(StructuredAnswer),
    Text(String),
}

impl AnswerPayload {
    /// Interpret a transcript `answer_json` value.
    ///
    /// Objects deserialize directly. Strings are re-parsed: if the string
    /// holds a JSON object it becomes structured, otherwise it stays text.
    /// Anything else falls back to its JSON rendering as text.
    pub fn from_answer_json(value: &Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value::<StructuredAnswer>(value.clone())
                .map(AnswerPayload::Structured)
                .unwrap_or_else(|_| AnswerPayload::Text(value.to_string())),
            Value::String(s) => match serde_json::from_str::<StructuredAnswer>(s) {
                Ok(answer) if s.trim_start().starts_with('{') => {
                    AnswerPayload::Structured(answer)
                }
                _ => AnswerPayload::Text(s.clone()),
            },
            Value::Null => AnswerPayload::Text(String::new()),
            other => AnswerPayload::Text(other.to_string()),
        }
    }

    /// The plain text form, if this payload is unstructured.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerPayload::Text(s) => Some(s),
            AnswerPayload::Structured(_) => None,
        }
    }
}

/// The multi-section research payload returned per question.
///
/// The backend's schema is informal; every field is optional and unknown
/// fields (e.g. the extra fields of company-profile answers) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredAnswer {
    pub summary: Option<String>,
    pub details: Option<String>,
    pub expanded_context: Option<ExpandedContext>,
    #[serde(default)]
    pub next_steps: Vec<String>,
    pub resource_recommendations: Option<ResourceRecommendations>,
    pub confidence_score: Option<String>,
}

impl StructuredAnswer {
    /// True when no renderable section is present.
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.details.is_none()
            && self
                .expanded_context
                .as_ref()
                .is_none_or(|c| c.is_empty())
            && self.next_steps.is_empty()
            && self
                .resource_recommendations
                .as_ref()
                .is_none_or(|r| r.is_empty())
            && self.confidence_score.is_none()
    }
}

/// Deeper per-domain breakdown nested inside a structured answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpandedContext {
    pub domain_specific_analysis: Option<String>,
    #[serde(default)]
    pub relevant_metrics: Vec<String>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    pub timeline_estimation: Option<String>,
}

impl ExpandedContext {
    pub fn is_empty(&self) -> bool {
        self.domain_specific_analysis.is_none()
            && self.relevant_metrics.is_empty()
            && self.risk_factors.is_empty()
            && self.opportunities.is_empty()
            && self.timeline_estimation.is_none()
    }
}

/// Recommended resources grouped by kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceRecommendations {
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub learning_paths: Vec<String>,
    #[serde(default)]
    pub industry_sources: Vec<String>,
    #[serde(default)]
    pub communities: Vec<String>,
    #[serde(default)]
    pub benchmarks: Vec<String>,
}

impl ResourceRecommendations {
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
            && self.learning_paths.is_empty()
            && self.industry_sources.is_empty()
            && self.communities.is_empty()
            && self.benchmarks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structured_answer_full_deserialize() {
        let v = json!({
            "summary": "Tesla builds electric vehicles.",
            "details": "Long analysis here.",
            "expanded_context": {
                "domain_specific_analysis": "EV market dynamics.",
                "relevant_metrics": ["Deliveries", "Margin"],
                "risk_factors": ["Competition"],
                "opportunities": ["Energy storage"],
                "timeline_estimation": "Medium term"
            },
            "next_steps": ["Read the 10-K"],
            "resource_recommendations": {
                "tools": ["Screener"],
                "communities": ["r/teslainvestorsclub"]
            },
            "confidence_score": "85%"
        });
        let answer: StructuredAnswer = serde_json::from_value(v).unwrap();
        assert_eq!(answer.summary.as_deref(), Some("Tesla builds electric vehicles."));
        let ctx = answer.expanded_context.unwrap();
        assert_eq!(ctx.relevant_metrics.len(), 2);
        assert_eq!(answer.next_steps.len(), 1);
        assert_eq!(answer.confidence_score.as_deref(), Some("85%"));
    }

    #[test]
    fn structured_answer_ignores_unknown_fields() {
        // Company-profile answers carry fields the client never renders.
        let v = json!({
            "company_name": "Tesla",
            "summary": "An automaker.",
            "industry": "Automotive",
            "tech_stack": ["Python", "C++"]
        });
        let answer: StructuredAnswer = serde_json::from_value(v).unwrap();
        assert_eq!(answer.summary.as_deref(), Some("An automaker."));
        assert!(answer.details.is_none());
    }

    #[test]
    fn payload_untagged_object_is_structured() {
        let payload: AnswerPayload =
            serde_json::from_value(json!({"summary": "hi"})).unwrap();
        assert!(matches!(
            payload,
            AnswerPayload::Structured(StructuredAnswer { ref summary, .. })
                if summary.as_deref() == Some("hi")
        ));
    }

    #[test]
    fn payload_untagged_string_is_text() {
        let payload: AnswerPayload =
            serde_json::from_value(json!("model refused to emit JSON")).unwrap();
        assert_eq!(payload.as_text(), Some("model refused to emit JSON"));
    }

    #[test]
    fn from_answer_json_object() {
        let payload = AnswerPayload::from_answer_json(&json!({"summary": "s"}));
        assert!(matches!(payload, AnswerPayload::Structured(_)));
    }

    #[test]
    fn from_answer_json_embedded_json_string() {
        let payload =
            AnswerPayload::from_answer_json(&json!("{\"summary\": \"embedded\"}"));
        match payload {
            AnswerPayload::Structured(a) => {
                assert_eq!(a.summary.as_deref(), Some("embedded"));
            }
            other => panic!("expected structured, got {other:?}"),
        }
    }

    #[test]
    fn from_answer_json_plain_string() {
        let payload = AnswerPayload::from_answer_json(&json!("just prose"));
        assert_eq!(payload.as_text(), Some("just prose"));
    }

    #[test]
    fn from_answer_json_null_is_empty_text() {
        let payload = AnswerPayload::from_answer_json(&Value::Null);
        assert_eq!(payload.as_text(), Some(""));
    }

    #[test]
    fn is_empty_checks_every_section() {
        assert!(StructuredAnswer::default().is_empty());
        let answer = StructuredAnswer {
            confidence_score: Some("10%".into()),
            ..Default::default()
        };
        assert!(!answer.is_empty());
        let answer = StructuredAnswer {
            expanded_context: Some(ExpandedContext::default()),
            ..Default::default()
        };
        assert!(answer.is_empty(), "empty nested context counts as absent");
    }
}

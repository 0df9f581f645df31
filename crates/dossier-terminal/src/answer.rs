//! Section-by-section rendering of structured research answers.
//!
//! Sections render in the order the payload defines them and only when
//! present; plain-text answers render verbatim. The confidence score,
//! when parseable as a percentage, gets a small bar.

use crate::style;
use dossier_types::{AnswerPayload, ResourceRecommendations, StructuredAnswer};

/// Width of the confidence bar in cells.
const BAR_WIDTH: usize = 10;

/// Render an answer payload for the terminal.
///
/// `company` is the company named in the same response; initial answers
/// carry one, follow-up answers render under a generic header.
pub fn render_answer(answer: &AnswerPayload, company: Option<&str>) -> String {
    match answer {
        AnswerPayload::Text(text) => {
            if text.trim().is_empty() {
                style::dim("(no answer)")
            } else {
                text.trim().to_string()
            }
        }
        AnswerPayload::Structured(structured) => render_structured(structured, company),
    }
}

fn render_structured(answer: &StructuredAnswer, company: Option<&str>) -> String {
    let mut out = String::new();

    let header = company.filter(|c| !c.is_empty()).unwrap_or("Research Summary");
    out.push_str(&style::company_header(header));
    out.push('\n');

    if answer.is_empty() {
        out.push('\n');
        out.push_str(&style::dim("(no answer)"));
        out.push('\n');
        return out;
    }

    push_text_section(&mut out, "Summary", answer.summary.as_deref());
    push_text_section(&mut out, "Details", answer.details.as_deref());

    if let Some(ctx) = &answer.expanded_context {
        push_text_section(
            &mut out,
            "Domain Analysis",
            ctx.domain_specific_analysis.as_deref(),
        );
        push_list_section(&mut out, "Key Metrics", &ctx.relevant_metrics);
        push_list_section(&mut out, "Risk Factors", &ctx.risk_factors);
        push_list_section(&mut out, "Opportunities", &ctx.opportunities);
        push_text_section(&mut out, "Timeline", ctx.timeline_estimation.as_deref());
    }

    push_list_section(&mut out, "Next Steps", &answer.next_steps);

    if let Some(resources) = &answer.resource_recommendations {
        push_resources(&mut out, resources);
    }

    if let Some(score) = answer.confidence_score.as_deref() {
        push_confidence(&mut out, score);
    }

    out
}

fn push_text_section(out: &mut String, title: &str, body: Option<&str>) {
    let Some(body) = body.filter(|b| !b.trim().is_empty()) else {
        return;
    };
    out.push('\n');
    out.push_str(&style::section_title(title));
    out.push('\n');
    out.push_str(body.trim());
    out.push('\n');
}

fn push_list_section(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push('\n');
    out.push_str(&style::section_title(title));
    out.push('\n');
    for item in items {
        out.push_str("  - ");
        out.push_str(item.trim());
        out.push('\n');
    }
}

fn push_resources(out: &mut String, resources: &ResourceRecommendations) {
    if resources.is_empty() {
        return;
    }
    out.push('\n');
    out.push_str(&style::section_title("Resources"));
    out.push('\n');
    push_resource_group(out, "Tools", &resources.tools);
    push_resource_group(out, "Learning paths", &resources.learning_paths);
    push_resource_group(out, "Industry sources", &resources.industry_sources);
    push_resource_group(out, "Communities", &resources.communities);
    push_resource_group(out, "Benchmarks", &resources.benchmarks);
}

fn push_resource_group(out: &mut String, label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str("  ");
    out.push_str(&style::bold(label));
    out.push('\n');
    for item in items {
        out.push_str("    - ");
        out.push_str(item.trim());
        out.push('\n');
    }
}

fn push_confidence(out: &mut String, score: &str) {
    out.push('\n');
    out.push_str(&style::section_title("Confidence"));
    out.push(' ');
    match parse_percent(score) {
        Some(pct) => {
            out.push_str(&confidence_bar(pct));
            out.push(' ');
            out.push_str(&format!("{pct}%"));
        }
        None => out.push_str(score.trim()),
    }
    out.push('\n');
}

/// Parse a confidence score like `"85%"` or `"85"` into a 0-100 percentage.
fn parse_percent(score: &str) -> Option<u8> {
    let trimmed = score.trim().trim_end_matches('%').trim();
    let value = trimmed.parse::<f64>().ok()?;
    if !(0.0..=100.0).contains(&value) {
        return None;
    }
    Some(value.round() as u8)
}

/// A fixed-width bar of filled/empty cells.
fn confidence_bar(pct: u8) -> String {
    let filled = (pct as usize * BAR_WIDTH).div_ceil(100).min(BAR_WIDTH);
    let mut bar = String::with_capacity(BAR_WIDTH + 2);
    bar.push('[');
    for i in 0..BAR_WIDTH {
        bar.push(if i < filled { '#' } else { '.' });
    }
    bar.push(']');
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_types::ExpandedContext;

    fn structured(answer: StructuredAnswer) -> AnswerPayload {
        AnswerPayload::Structured(answer)
    }

    #[test]
    fn text_answer_renders_verbatim() {
        let out = render_answer(&AnswerPayload::Text("just prose".into()), None);
        assert_eq!(out, "just prose");
    }

    #[test]
    fn empty_text_answer_renders_placeholder() {
        let out = render_answer(&AnswerPayload::Text("  ".into()), None);
        assert!(out.contains("(no answer)"));
    }

    #[test]
    fn empty_structured_answer_renders_placeholder() {
        let out = render_answer(&structured(StructuredAnswer::default()), Some("Tesla"));
        assert!(out.contains("Tesla"));
        assert!(out.contains("(no answer)"));
    }

    #[test]
    fn only_present_sections_render() {
        let out = render_answer(
            &structured(StructuredAnswer {
                summary: Some("short summary".into()),
                ..Default::default()
            }),
            Some("Tesla"),
        );
        assert!(out.contains("Summary"));
        assert!(out.contains("short summary"));
        assert!(!out.contains("Details"));
        assert!(!out.contains("Next Steps"));
        assert!(!out.contains("Confidence"));
    }

    #[test]
    fn missing_company_uses_generic_header() {
        let out = render_answer(
            &structured(StructuredAnswer {
                summary: Some("s".into()),
                ..Default::default()
            }),
            None,
        );
        assert!(out.contains("Research Summary"));
    }

    #[test]
    fn expanded_context_sections_render_in_order() {
        let out = render_answer(
            &structured(StructuredAnswer {
                expanded_context: Some(ExpandedContext {
                    domain_specific_analysis: Some("deep dive".into()),
                    relevant_metrics: vec!["deliveries".into()],
                    risk_factors: vec!["competition".into()],
                    opportunities: vec![],
                    timeline_estimation: Some("medium term".into()),
                }),
                ..Default::default()
            }),
            None,
        );
        assert!(out.contains("Domain Analysis"));
        assert!(out.contains("Key Metrics"));
        assert!(out.contains("  - deliveries"));
        assert!(out.contains("Risk Factors"));
        assert!(!out.contains("Opportunities"), "empty list stays hidden");
        assert!(out.contains("Timeline"));

        let analysis = out.find("Domain Analysis").unwrap();
        let metrics = out.find("Key Metrics").unwrap();
        let timeline = out.find("Timeline").unwrap();
        assert!(analysis < metrics && metrics < timeline);
    }

    #[test]
    fn resources_render_grouped() {
        let out = render_answer(
            &structured(StructuredAnswer {
                resource_recommendations: Some(ResourceRecommendations {
                    tools: vec!["Screener".into()],
                    communities: vec!["EV forum".into()],
                    ..Default::default()
                }),
                ..Default::default()
            }),
            None,
        );
        assert!(out.contains("Resources"));
        assert!(out.contains("Tools"));
        assert!(out.contains("    - Screener"));
        assert!(out.contains("Communities"));
        assert!(!out.contains("Benchmarks"));
    }

    #[test]
    fn confidence_renders_bar_for_percentages() {
        let out = render_answer(
            &structured(StructuredAnswer {
                summary: Some("s".into()),
                confidence_score: Some("85%".into()),
                ..Default::default()
            }),
            None,
        );
        assert!(out.contains("Confidence"));
        assert!(out.contains("85%"));
        assert!(out.contains('['));
    }

    #[test]
    fn confidence_falls_back_to_raw_text() {
        let out = render_answer(
            &structured(StructuredAnswer {
                summary: Some("s".into()),
                confidence_score: Some("high".into()),
                ..Default::default()
            }),
            None,
        );
        assert!(out.contains("high"));
        assert!(!out.contains('['));
    }

    #[test]
    fn parse_percent_forms() {
        assert_eq!(parse_percent("85%"), Some(85));
        assert_eq!(parse_percent("85"), Some(85));
        assert_eq!(parse_percent(" 72.4% "), Some(72));
        assert_eq!(parse_percent("0%"), Some(0));
        assert_eq!(parse_percent("100%"), Some(100));
        assert_eq!(parse_percent("150%"), None);
        assert_eq!(parse_percent("high"), None);
    }

    #[test]
    fn confidence_bar_bounds() {
        assert_eq!(confidence_bar(0), "[..........]");
        assert_eq!(confidence_bar(100), "[##########]");
        assert_eq!(confidence_bar(50), "[#####.....]");
    }
}

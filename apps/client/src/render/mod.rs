// Result Renderer: pure text projections of controller state and evaluations.
// No I/O here; callers decide where the strings go.

pub mod feedback;
pub mod score_card;
pub mod theme;
pub mod upload_panel;

pub use theme::{Theme, ThemeKind};
pub use upload_panel::render_upload_panel;

use crate::evaluation::Evaluation;

/// Score card followed by the feedback list.
pub fn render_report(evaluation: &Evaluation, theme: &Theme) -> String {
    let card = score_card::render_score_card(evaluation.score, theme);
    let feedback = feedback::render_feedback(evaluation, theme);
    if feedback.is_empty() {
        card
    } else {
        format!("{card}\n{feedback}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_for_score_only() {
        let evaluation = Evaluation {
            score: 40,
            ..Default::default()
        };
        let report = render_report(&evaluation, &Theme::standard());
        assert!(report.contains("Priority: low"));
        assert!(!report.contains("What You Did Well"));
    }

    #[test]
    fn test_report_joins_card_and_feedback() {
        let evaluation = Evaluation {
            score: 85,
            positives: vec!["Strong metrics".to_string()],
            ..Default::default()
        };
        let report = render_report(&evaluation, &Theme::standard());
        let card_end = report.find("[Evaluate Another Resume]").unwrap();
        let positives = report.find("• Strong metrics").unwrap();
        assert!(card_end < positives);
        assert!(report.contains("Priority: high"));
    }
}

use std::fmt::Write;

use crate::evaluation::{Evaluation, SuggestedImprovement};
use crate::render::theme::Theme;

/// One visible block of the feedback list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedbackSection<'a> {
    Positives(&'a [String]),
    Tips(&'a [String]),
    Missing(&'a [String]),
    Improvements(&'a [SuggestedImprovement]),
}

/// Sections in display order, skipping any with nothing to show.
pub fn visible_sections(evaluation: &Evaluation) -> Vec<FeedbackSection<'_>> {
    let mut sections = Vec::with_capacity(4);
    if !evaluation.positives.is_empty() {
        sections.push(FeedbackSection::Positives(&evaluation.positives));
    }
    if !evaluation.feedback_tips.is_empty() {
        sections.push(FeedbackSection::Tips(&evaluation.feedback_tips));
    }
    if !evaluation.missing_keywords_or_sections.is_empty() {
        sections.push(FeedbackSection::Missing(
            &evaluation.missing_keywords_or_sections,
        ));
    }
    if !evaluation.suggested_improvements.is_empty() {
        sections.push(FeedbackSection::Improvements(
            &evaluation.suggested_improvements,
        ));
    }
    sections
}

pub fn render_feedback(evaluation: &Evaluation, theme: &Theme) -> String {
    let mut out = String::new();

    if let Some(error) = evaluation.error.as_deref().filter(|e| !e.trim().is_empty()) {
        let _ = writeln!(out, "{} {error}", theme.degraded_prefix);
        out.push('\n');
    }

    for (i, section) in visible_sections(evaluation).into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match section {
            FeedbackSection::Positives(items) => {
                write_heading(&mut out, theme.positives_heading, theme);
                write_bullets(&mut out, items, theme);
            }
            FeedbackSection::Tips(items) => {
                write_heading(&mut out, theme.tips_heading, theme);
                write_bullets(&mut out, items, theme);
            }
            FeedbackSection::Missing(items) => {
                write_heading(&mut out, theme.missing_heading, theme);
                let tags: Vec<String> = items.iter().map(|item| format!("[{item}]")).collect();
                let _ = writeln!(out, "{}", tags.join(" "));
            }
            FeedbackSection::Improvements(items) => {
                write_heading(&mut out, theme.improvements_heading, theme);
                for (j, improvement) in items.iter().enumerate() {
                    if j > 0 {
                        let _ = writeln!(out, "{}", theme.rule_line(8));
                    }
                    write_improvement(&mut out, improvement, theme);
                }
            }
        }
    }

    out
}

fn write_heading(out: &mut String, text: &str, theme: &Theme) {
    let heading = theme.heading(text);
    let _ = writeln!(out, "{heading}");
    let _ = writeln!(out, "{}", theme.rule_line(heading.chars().count()));
}

fn write_bullets(out: &mut String, items: &[String], theme: &Theme) {
    for item in items {
        let _ = writeln!(out, "{} {item}", theme.bullet);
    }
}

fn write_improvement(out: &mut String, improvement: &SuggestedImprovement, theme: &Theme) {
    let _ = writeln!(
        out,
        "{}: \"{}\"",
        theme.original_label, improvement.original_text
    );
    let _ = writeln!(
        out,
        "{}: \"{}\"",
        theme.recommended_label, improvement.rewrite
    );
    let _ = writeln!(out, "{} {}", theme.why_label, improvement.reasoning);
    let _ = writeln!(
        out,
        "+{} {}",
        improvement.potential_score_increase, theme.potential_suffix
    );
}

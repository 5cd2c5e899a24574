use std::fmt::Write;

use crate::render::theme::Theme;

/// Priority band derived from the score. This is the only computed value in
/// the report; thresholds are inclusive at 80 and 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn from_score(score: i64) -> Self {
        if score >= 80 {
            ScoreBand::High
        } else if score >= 60 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::High => "high",
            ScoreBand::Medium => "medium",
            ScoreBand::Low => "low",
        }
    }
}

/// Score shown verbatim, no clamping.
pub fn render_score_card(score: i64, theme: &Theme) -> String {
    let mut out = String::new();
    let heading = theme.heading(theme.score_heading);
    let _ = writeln!(out, "{heading}");
    let _ = writeln!(out, "{}", theme.rule_line(heading.chars().count()));
    let _ = writeln!(out, "{score}");
    let _ = writeln!(
        out,
        "{}: {}",
        theme.band_label,
        ScoreBand::from_score(score).label()
    );
    let _ = writeln!(out, "{}", theme.score_footnote);
    let _ = writeln!(out, "[{}]", theme.analyze_another);
    out
}

use clap::ValueEnum;

/// Visual variants. They differ only in wording and glyphs; every renderer
/// takes a `Theme` and has no per-variant branches of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ThemeKind {
    #[default]
    Standard,
    Editorial,
    Terminal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub bullet: &'static str,
    pub rule: char,
    pub uppercase_headings: bool,

    // Upload panel
    pub drop_prompt: &'static str,
    pub selected_heading: &'static str,
    pub limit_label: &'static str,
    pub submit_label: &'static str,
    pub submitting_label: &'static str,
    pub error_prefix: &'static str,

    // Score card
    pub score_heading: &'static str,
    pub band_label: &'static str,
    pub score_footnote: &'static str,
    pub analyze_another: &'static str,

    // Feedback list
    pub positives_heading: &'static str,
    pub tips_heading: &'static str,
    pub missing_heading: &'static str,
    pub improvements_heading: &'static str,
    pub original_label: &'static str,
    pub recommended_label: &'static str,
    pub why_label: &'static str,
    pub potential_suffix: &'static str,
    pub degraded_prefix: &'static str,
}

impl Theme {
    pub fn for_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Standard => Self::standard(),
            ThemeKind::Editorial => Self::editorial(),
            ThemeKind::Terminal => Self::terminal(),
        }
    }

    pub fn standard() -> Self {
        Self {
            bullet: "•",
            rule: '─',
            uppercase_headings: false,
            drop_prompt: "Drop your resume PDF here or choose a file",
            selected_heading: "Ready to evaluate",
            limit_label: "Max size",
            submit_label: "Evaluate Resume",
            submitting_label: "Analyzing via AI...",
            error_prefix: "!",
            score_heading: "Resume Score",
            band_label: "Priority",
            score_footnote: "Analysis complete.",
            analyze_another: "Evaluate Another Resume",
            positives_heading: "What You Did Well",
            tips_heading: "Primary Tips for Improvement",
            missing_heading: "Missing Structure / Keywords",
            improvements_heading: "Rewrite Recommendations",
            original_label: "Original",
            recommended_label: "Recommended",
            why_label: "Why:",
            potential_suffix: "Pts Potential",
            degraded_prefix: "Note:",
        }
    }

    pub fn editorial() -> Self {
        Self {
            bullet: "—",
            rule: '═',
            score_heading: "ATS Impact Index",
            score_footnote: "Analysis complete. Score is based on semantic parsing and industry-standard heuristic matching.",
            ..Self::standard()
        }
    }

    pub fn terminal() -> Self {
        Self {
            bullet: ">",
            rule: '-',
            uppercase_headings: true,
            drop_prompt: "Drop PDF payload or authorize local access",
            selected_heading: "Payload_Locked",
            limit_label: "Limit",
            submit_label: "Initiate_Scan_Sequence",
            submitting_label: "Scanning...",
            error_prefix: "[ERR]",
            score_heading: "Score_Readout",
            band_label: "Priority",
            positives_heading: "Strengths_Detected",
            tips_heading: "Optimization_Tips",
            missing_heading: "Missing_Signals",
            improvements_heading: "Rewrite_Queue",
            original_label: "Before",
            recommended_label: "After",
            why_label: "Reason:",
            degraded_prefix: "[WARN]",
            ..Self::standard()
        }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.uppercase_headings {
            text.to_uppercase()
        } else {
            text.to_string()
        }
    }

    /// A horizontal rule of `width` theme characters.
    pub fn rule_line(&self, width: usize) -> String {
        std::iter::repeat(self.rule).take(width).collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_maps_to_theme() {
        assert_eq!(Theme::for_kind(ThemeKind::Standard), Theme::standard());
        assert_eq!(Theme::for_kind(ThemeKind::Terminal).bullet, ">");
    }

    #[test]
    fn test_editorial_inherits_standard_section_titles() {
        let editorial = Theme::editorial();
        assert_eq!(editorial.score_heading, "ATS Impact Index");
        assert_eq!(editorial.tips_heading, Theme::standard().tips_heading);
    }

    #[test]
    fn test_terminal_uppercases_headings() {
        assert_eq!(Theme::terminal().heading("Rewrite_Queue"), "REWRITE_QUEUE");
        assert_eq!(Theme::standard().heading("Rewrite"), "Rewrite");
    }

    #[test]
    fn test_rule_line_width() {
        assert_eq!(Theme::terminal().rule_line(4), "----");
        assert_eq!(Theme::standard().rule_line(3).chars().count(), 3);
    }
}

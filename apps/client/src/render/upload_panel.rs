use std::fmt::Write;

use crate::render::theme::Theme;
use crate::upload::controller::UploadState;
use crate::upload::validation::{megabytes_2dp, whole_megabytes, ValidationPolicy};

/// The drop zone: the chosen file, or a prompt naming the size limit,
/// followed by any error and the submit control.
pub fn render_upload_panel(state: &UploadState, policy: &ValidationPolicy, theme: &Theme) -> String {
    let mut out = String::new();

    let file = match state {
        UploadState::FileSelected(file) | UploadState::Submitting(file) => Some(file),
        UploadState::Failed(failure) => failure.retained.as_ref(),
        UploadState::Idle | UploadState::Succeeded(_) => None,
    };

    match file {
        Some(file) => {
            let _ = writeln!(out, "{}", theme.heading(theme.selected_heading));
            let _ = writeln!(
                out,
                "{} ({}MB)",
                file.file_name(),
                megabytes_2dp(file.size_bytes())
            );
        }
        None => {
            let _ = writeln!(out, "{}", theme.drop_prompt);
            let _ = writeln!(
                out,
                "{}: {}MB",
                theme.limit_label,
                whole_megabytes(policy.max_size_bytes)
            );
        }
    }

    if let UploadState::Failed(failure) = state {
        let _ = writeln!(out, "{} {}", theme.error_prefix, failure.message);
    }

    let control = match state {
        UploadState::Submitting(_) => theme.submitting_label,
        _ => theme.submit_label,
    };
    let enabled = matches!(state, UploadState::FileSelected(_))
        || matches!(state, UploadState::Failed(f) if f.retained.is_some());
    if enabled || matches!(state, UploadState::Submitting(_)) {
        let _ = writeln!(out, "[ {control} ]");
    } else {
        let _ = writeln!(out, "( {control} )");
    }

    out
}

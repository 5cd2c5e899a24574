mod config;
mod errors;
mod evaluation;
mod render;
mod upload;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::evaluation::{EvaluationTransport, HttpEvaluationClient};
use crate::render::{render_report, render_upload_panel, Theme, ThemeKind};
use crate::upload::controller::CancelHandle;
use crate::upload::{CandidateFile, UploadController, UploadState, ValidationPolicy};

#[derive(Parser, Debug)]
#[command(version, about = "Upload a resume PDF and show its AI evaluation")]
struct Cli {
    /// Visual variant used for all output
    #[arg(long, value_enum, default_value_t = ThemeKind::Standard, global = true)]
    theme: ThemeKind,

    /// Print evaluations as JSON instead of a formatted report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one or more resumes, one after another
    Evaluate {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Check that the evaluation service is reachable
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Logs go to stderr so stdout stays clean for reports and --json.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting resume evaluation client v{}", env!("CARGO_PKG_VERSION"));

    let client = HttpEvaluationClient::new(&config.api_base_url, config.request_timeout)?;
    info!("Evaluation endpoint: {}", client.endpoint());

    match cli.command {
        Command::Health => {
            let health = client.health().await?;
            println!("{}: {}", health.status, health.message);
            Ok(())
        }
        Command::Evaluate { paths } => {
            let policy = ValidationPolicy::new(config.max_upload_bytes);
            let theme = Theme::for_kind(cli.theme);
            let mut controller = UploadController::new(client, policy);

            let interrupt = Interrupt::new(controller.cancel_handle());
            let on_ctrl_c = interrupt.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupt received, stopping after the current file");
                    on_ctrl_c.trigger();
                }
                if tokio::signal::ctrl_c().await.is_ok() {
                    std::process::exit(130);
                }
            });

            let failed =
                run_evaluations(&mut controller, &paths, &theme, cli.json, &interrupt).await?;
            if failed > 0 {
                bail!("{failed} of {} evaluations failed", paths.len());
            }
            Ok(())
        }
    }
}

/// Sticky Ctrl-C state. Cancels the in-flight request and keeps the file
/// loop from starting anything new, even when nothing was in flight.
#[derive(Clone)]
struct Interrupt {
    triggered: Arc<AtomicBool>,
    cancel: CancelHandle,
}

impl Interrupt {
    fn new(cancel: CancelHandle) -> Self {
        Self {
            triggered: Arc::new(AtomicBool::new(false)),
            cancel,
        }
    }

    fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
        self.cancel.cancel();
    }

    fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}

/// Drives the controller through each file in turn, resetting between them.
/// Returns the number of files that did not produce an evaluation; files
/// skipped after an interrupt count as failed.
async fn run_evaluations<T: EvaluationTransport>(
    controller: &mut UploadController<T>,
    paths: &[PathBuf],
    theme: &Theme,
    json_output: bool,
    interrupt: &Interrupt,
) -> Result<usize> {
    let mut failed = 0;
    for (i, path) in paths.iter().enumerate() {
        if interrupt.is_triggered() {
            warn!("Interrupted; skipping {} remaining file(s)", paths.len() - i);
            failed += paths.len() - i;
            break;
        }

        controller.reset_for_new_analysis();

        let candidate = match CandidateFile::from_path(path).await {
            Ok(candidate) => candidate,
            Err(e) => {
                warn!("Could not open {}: {e}", path.display());
                report_failure(path, &format!("Could not open file: {e}"), json_output)?;
                failed += 1;
                continue;
            }
        };

        controller.select_file(candidate);
        if !json_output {
            println!("{}", render_upload_panel(controller.state(), controller.policy(), theme));
        }
        if let UploadState::Failed(failure) = controller.state() {
            if json_output {
                report_failure(path, &failure.message, true)?;
            }
            failed += 1;
            continue;
        }

        // An interrupt during file loading found nothing in flight to cancel.
        if interrupt.is_triggered() {
            warn!("Interrupted; skipping {} remaining file(s)", paths.len() - i);
            failed += paths.len() - i;
            break;
        }

        controller.submit().await;
        match controller.state() {
            UploadState::Succeeded(evaluation) => {
                if json_output {
                    println!("{}", serde_json::to_string_pretty(evaluation)?);
                } else {
                    println!("{}", render_report(evaluation, theme));
                }
            }
            UploadState::Failed(failure) => {
                if json_output {
                    report_failure(path, &failure.message, true)?;
                } else {
                    println!("{}", render_upload_panel(controller.state(), controller.policy(), theme));
                }
                failed += 1;
            }
            other => warn!("Submission for {} ended in unexpected state {other:?}", path.display()),
        }
    }

    Ok(failed)
}

fn report_failure(path: &std::path::Path, message: &str, json_output: bool) -> Result<()> {
    if json_output {
        let body = json!({ "file": path.display().to_string(), "error": message });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        eprintln!("{}: {message}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::errors::ClientError;
    use crate::evaluation::Evaluation;

    struct CountingTransport {
        calls: Arc<Mutex<usize>>,
    }

    #[async_trait]
    impl EvaluationTransport for CountingTransport {
        async fn evaluate(&self, _file: &CandidateFile) -> Result<Evaluation, ClientError> {
            *self.calls.lock().unwrap() += 1;
            Ok(Evaluation {
                score: 81,
                ..Default::default()
            })
        }
    }

    fn pdf_on_disk() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-1.4 resume").unwrap();
        file
    }

    fn counting_controller() -> (UploadController<CountingTransport>, Arc<Mutex<usize>>) {
        let calls = Arc::new(Mutex::new(0));
        let transport = CountingTransport {
            calls: calls.clone(),
        };
        (
            UploadController::new(transport, ValidationPolicy::default()),
            calls,
        )
    }

    #[tokio::test]
    async fn test_evaluates_every_file_in_order() {
        let (first, second) = (pdf_on_disk(), pdf_on_disk());
        let paths = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        let (mut controller, calls) = counting_controller();
        let interrupt = Interrupt::new(controller.cancel_handle());

        let failed = run_evaluations(&mut controller, &paths, &Theme::standard(), true, &interrupt)
            .await
            .unwrap();

        assert_eq!(failed, 0);
        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_interrupt_with_nothing_in_flight_stops_the_run() {
        let (first, second) = (pdf_on_disk(), pdf_on_disk());
        let paths = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        let (mut controller, calls) = counting_controller();
        let interrupt = Interrupt::new(controller.cancel_handle());

        interrupt.trigger();
        let failed = run_evaluations(&mut controller, &paths, &Theme::standard(), true, &interrupt)
            .await
            .unwrap();

        assert_eq!(failed, 2);
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_and_rejected_files_count_as_failed() {
        let dir = tempfile::tempdir().unwrap();
        let text = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let paths = vec![dir.path().join("missing.pdf"), text.path().to_path_buf()];
        let (mut controller, calls) = counting_controller();
        let interrupt = Interrupt::new(controller.cancel_handle());

        let failed = run_evaluations(&mut controller, &paths, &Theme::standard(), true, &interrupt)
            .await
            .unwrap();

        assert_eq!(failed, 2);
        assert_eq!(*calls.lock().unwrap(), 0);
    }
}

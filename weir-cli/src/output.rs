//! Console rendering
//!
//! Reports go to stdout; logs go to stderr.

use colored::*;
use weir_core::domain::resource::ResourceSummary;
use weir_core::domain::run::{PipelineRun, RunStatus};

use crate::monitor::{ActivityOutcome, RunReport};

/// Block describing one created resource
pub fn render_summary(summary: &ResourceSummary) -> String {
    let tags = summary
        .tags
        .as_ref()
        .map(|tags| serde_json::to_string(tags).unwrap_or_default())
        .unwrap_or_else(|| "-".to_string());

    let mut lines = vec![
        format!("{} {}", "▸".cyan(), summary.kind.bold()),
        format!("  Name:     {}", summary.name),
        format!("  Id:       {}", summary.id.as_deref().unwrap_or("-")),
        format!("  Location: {}", summary.location.as_deref().unwrap_or("-")),
        format!("  Tags:     {}", tags),
    ];

    if let Some(state) = &summary.provisioning_state {
        lines.push(format!("  Provisioning State: {}", state));
    }

    lines.join("\n")
}

/// Final block for a finished run
pub fn render_run_report(report: &RunReport) -> String {
    let mut lines = vec![
        format!("Pipeline run status: {}", colorize_status(&report.status)),
        format!("Run id: {}", report.run_id.to_string().dimmed()),
    ];

    if let Some(message) = &report.message {
        lines.push(format!("Message: {}", message));
    }

    lines.push(format!("Activity: {}", report.activity.name));
    lines.push(format!(
        "Activity run status: {}",
        colorize_status(&report.activity.status)
    ));

    match &report.activity.outcome {
        ActivityOutcome::Succeeded(metrics) => {
            lines.push(format!("Number of bytes read: {}", metrics.data_read));
            lines.push(format!("Number of bytes written: {}", metrics.data_written));
            lines.push(format!("Copy duration: {}", metrics.copy_duration));
        }
        ActivityOutcome::Unsuccessful { message } => {
            lines.push(format!(
                "Errors: {}",
                message.as_deref().unwrap_or("(none reported)").red()
            ));
        }
    }

    lines.join("\n")
}

/// Status line for a run that has not finished
pub fn render_run_status(run: &PipelineRun) -> String {
    let mut lines = vec![
        format!("Pipeline run status: {}", colorize_status(&run.status)),
        format!("Run id: {}", run.run_id.to_string().dimmed()),
    ];

    if let Some(start) = run.run_start {
        lines.push(format!("Started: {}", start.format("%Y-%m-%d %H:%M:%S UTC")));
    }

    lines.join("\n")
}

fn colorize_status(status: &RunStatus) -> ColoredString {
    match status {
        RunStatus::Queued => status.as_str().yellow(),
        RunStatus::InProgress | RunStatus::Canceling => status.as_str().cyan(),
        RunStatus::Succeeded => status.as_str().green(),
        RunStatus::Failed => status.as_str().red(),
        RunStatus::Cancelled => status.as_str().dimmed(),
        RunStatus::Unknown(_) => status.as_str().normal(),
    }
}

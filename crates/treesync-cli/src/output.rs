//! Output formatting utilities for CLI commands.
//!
//! Results go to stdout, errors to stderr, both in the selected format.

use std::io::Write;

use serde::Serialize;
use serde_json::json;
use treesync_tree::{PlanReport, RunSummary};

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

/// Trait for types that can be formatted for output
pub trait FormattedOutput {
    fn format_text(&self) -> String;

    fn format_json(&self) -> Result<String, serde_json::Error>
    where
        Self: Serialize,
    {
        serde_json::to_string_pretty(self)
    }
}

/// Print formatted output to stdout
pub fn print_output<T>(ctx: &CommandContext, value: &T) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
{
    write_output(ctx.format, value, std::io::stdout().lock())
}

/// Print formatted output to a writer
pub fn write_output<T, W>(format: OutputFormat, value: &T, mut writer: W) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
    W: Write,
{
    let output = match format {
        OutputFormat::Text => value.format_text(),
        OutputFormat::Json => value
            .format_json()
            .map_err(|e| CliError::Other(anyhow::anyhow!("JSON serialization failed: {e}")))?,
    };

    writeln!(writer, "{output}")?;
    Ok(())
}

/// Render an error the way [`print_error`] writes it.
pub fn format_error(format: OutputFormat, err: &CliError) -> String {
    match format {
        OutputFormat::Json => {
            let completed: Vec<_> = err
                .completed_moves()
                .iter()
                .map(|(from, to)| json!({ "from": from, "to": to }))
                .collect();
            let value = json!({
                "success": false,
                "error": {
                    "code": err.code(),
                    "message": err.to_string(),
                    "subject": err.subject(),
                    "hint": err.hint(),
                    "completed": completed,
                }
            });
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| err.to_string())
        }
        OutputFormat::Text => {
            let mut out = format!("error: {err}");
            let mut source = std::error::Error::source(err);
            // Tree errors already include their cause in the message.
            if matches!(err, CliError::Config { .. } | CliError::Io { .. }) {
                while let Some(cause) = source {
                    out.push_str(&format!("\n  caused by: {cause}"));
                    source = std::error::Error::source(cause);
                }
            }
            for (from, to) in err.completed_moves() {
                out.push_str(&format!("\n  already renamed: {from} -> {to}"));
            }
            if let Some(hint) = err.hint() {
                out.push_str(&format!("\n  hint: {hint}"));
            }
            out
        }
    }
}

/// Print an error to stderr
pub fn print_error(format: OutputFormat, err: &CliError) {
    eprintln!("{}", format_error(format, err));
}

impl FormattedOutput for RunSummary {
    fn format_text(&self) -> String {
        let mut out = format!("Done for `{}`", self.root.display());

        if self.mode.renames() {
            if self.renamed.is_empty() {
                out.push_str("\n  names already canonical");
            }
            for (from, to) in &self.renamed {
                out.push_str(&format!("\n  renamed {from} -> {to}"));
            }
        }

        if let Some(synthesis) = &self.synthesis {
            out.push_str(&format!(
                "\n  {} descriptors written, {} changed",
                synthesis.leaves.len() + 1,
                synthesis.changed_count()
            ));
        }

        if self.vcs.committed {
            out.push_str("\n  committed");
        }
        if self.vcs.pushed {
            out.push_str("\n  pushed");
        }
        for warning in &self.vcs.warnings {
            out.push_str(&format!("\n  warning: {warning}"));
        }
        out
    }
}

impl FormattedOutput for PlanReport {
    fn format_text(&self) -> String {
        let mut out = if self.canonical {
            format!("`{}` is canonical", self.root.display())
        } else {
            format!("`{}` needs renaming", self.root.display())
        };

        for entry in self.plan.entries() {
            if entry.is_noop() {
                out.push_str(&format!("\n  = {}", entry.old_name));
            } else {
                out.push_str(&format!("\n  {} -> {}", entry.old_name, entry.new_name));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use treesync_common_core::{Error as TreeError, RenameEntry, RenamePlan};

    fn plan_report() -> PlanReport {
        PlanReport {
            root: PathBuf::from("/work/lessons"),
            canonical: false,
            prefix_origin: 1,
            plan: RenamePlan::new(vec![
                RenameEntry::new("01_a_proj", "01_a_proj"),
                RenameEntry::new("b_proj", "02_b_proj"),
            ]),
        }
    }

    #[test]
    fn test_plan_text() {
        let text = plan_report().format_text();
        assert_eq!(
            text,
            "`/work/lessons` needs renaming\n  = 01_a_proj\n  b_proj -> 02_b_proj"
        );
    }

    #[test]
    fn test_plan_json() {
        let mut buf = Vec::new();
        write_output(OutputFormat::Json, &plan_report(), &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["canonical"], false);
        assert_eq!(value["plan"]["entries"][1]["new_name"], "02_b_proj");
    }

    #[test]
    fn test_error_text_names_the_path() {
        let err = CliError::from(TreeError::NotADirectory {
            path: PathBuf::from("/nope"),
        });
        assert_eq!(format_error(OutputFormat::Text, &err), "error: `/nope` is not a directory");
    }

    #[test]
    fn test_error_json_names_the_subject() {
        let err = CliError::from(TreeError::Collision {
            first: "01_foo".into(),
            second: "02_foo".into(),
            suffix: "foo".into(),
        });
        let value: serde_json::Value =
            serde_json::from_str(&format_error(OutputFormat::Json, &err)).unwrap();
        assert_eq!(value["error"]["subject"], "02_foo");

        let config = CliError::config("bad");
        let value: serde_json::Value =
            serde_json::from_str(&format_error(OutputFormat::Json, &config)).unwrap();
        assert!(value["error"]["subject"].is_null());
    }

    #[test]
    fn test_error_json() {
        let err = CliError::from(TreeError::Rename {
            old_name: "third".into(),
            new_name: "03_third".into(),
            completed: vec![("b_proj".into(), "02_b_proj".into())],
            source: "refused".into(),
        });
        let value: serde_json::Value =
            serde_json::from_str(&format_error(OutputFormat::Json, &err)).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "RENAME_FAILED");
        assert_eq!(value["error"]["subject"], "third");
        assert_eq!(value["error"]["completed"][0]["to"], "02_b_proj");
    }
}

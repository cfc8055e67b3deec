//! Logging module for sql-constraint-lint
//!
//! Provides structured logging of lint runs to a file in JSON Lines format
//! for later analysis and statistics. Per-evaluation outcomes stay in the
//! rules' return values; this log records whole runs.

use crate::models::{LintResult, Severity};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// A single log entry representing one lint run
#[derive(Debug, Serialize, Deserialize)]
pub struct LintLogEntry {
    /// Unix timestamp of when the lint was run
    pub timestamp: u64,
    /// ISO 8601 formatted date string
    pub datetime: String,
    /// Total number of trees linted
    pub trees_scanned: usize,
    /// Total number of violations found
    pub total_violations: usize,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
    /// Number of info messages
    pub info_count: usize,
    /// Evaluation failures that were downgraded during the run
    pub evaluation_errors: usize,
    /// Individual violations
    pub violations: Vec<ViolationLogEntry>,
    /// Enabled rules for this run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_rules: Option<Vec<String>>,
}

/// Log entry for a single violation
#[derive(Debug, Serialize, Deserialize)]
pub struct ViolationLogEntry {
    /// Rule ID (e.g., CN01)
    pub rule_id: String,
    /// Byte offset of the anchor node in its source
    pub offset: usize,
    /// Severity level
    pub severity: String,
    /// Violation message
    pub message: String,
}

impl LintLogEntry {
    /// Create a new log entry from lint results
    pub fn from_results(results: &[LintResult], enabled_rules: Option<Vec<String>>) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let timestamp = now.as_secs();
        let datetime = format_datetime(timestamp);

        let mut violations = Vec::new();
        let mut error_count = 0;
        let mut warning_count = 0;
        let mut info_count = 0;
        let mut evaluation_errors = 0;

        for result in results {
            evaluation_errors += result.errors.len();
            for v in &result.violations {
                match v.severity {
                    Severity::Error => error_count += 1,
                    Severity::Warning => warning_count += 1,
                    Severity::Info => info_count += 1,
                }

                violations.push(ViolationLogEntry {
                    rule_id: v.rule_id.clone(),
                    offset: v.offset,
                    severity: format!("{}", v.severity),
                    message: v.message.clone(),
                });
            }
        }

        let trees_scanned = results.len();
        let total_violations = violations.len();

        Self {
            timestamp,
            datetime,
            trees_scanned,
            total_violations,
            error_count,
            warning_count,
            info_count,
            evaluation_errors,
            violations,
            enabled_rules,
        }
    }
}

/// Logger that writes lint results to a file
pub struct LintLogger {
    writer: BufWriter<File>,
    log_path: String,
}

impl LintLogger {
    /// Create a new logger that writes to the specified file.
    /// If the file exists, it will be appended to; otherwise created.
    pub fn new(log_path: &str) -> std::io::Result<Self> {
        let path = Path::new(log_path);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
            log_path: log_path.to_string(),
        })
    }

    /// Log a lint run to the file
    pub fn log(&mut self, entry: &LintLogEntry) -> std::io::Result<()> {
        let json = serde_json::to_string(entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writeln!(self.writer, "{}", json)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Get the path of the log file
    pub fn log_path(&self) -> &str {
        &self.log_path
    }
}

/// Format a unix timestamp as ISO 8601 datetime string
fn format_datetime(timestamp: u64) -> String {
    use std::time::Duration;
    let d = UNIX_EPOCH + Duration::from_secs(timestamp);
    let datetime: chrono::DateTime<chrono::Utc> = chrono::DateTime::from(d);
    datetime.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Finding, LintResult, Severity, Violation};
    use crate::tree::NodeId;
    use tempfile::TempDir;

    fn warning(rule_id: &str, message: &str) -> Violation {
        Violation::new(
            rule_id.to_string(),
            Severity::Warning,
            Finding {
                anchor: NodeId(0),
                offset: 42,
                message: message.to_string(),
            },
        )
    }

    #[test]
    fn test_lint_log_entry_creation() {
        let result = LintResult {
            violations: vec![warning("CN01", "Test message")],
            errors: Vec::new(),
        };

        let entry = LintLogEntry::from_results(&[result], None);

        assert_eq!(entry.trees_scanned, 1);
        assert_eq!(entry.total_violations, 1);
        assert_eq!(entry.warning_count, 1);
        assert_eq!(entry.error_count, 0);
        assert_eq!(entry.evaluation_errors, 0);
        assert_eq!(entry.violations[0].offset, 42);
        assert_eq!(entry.violations[0].severity, "warning");
    }

    #[test]
    fn test_logger_creation_and_write() {
        let dir = TempDir::new().unwrap();
        let log_path = dir.path().join("lint.jsonl");
        let log_path_str = log_path.to_string_lossy().to_string();

        let mut logger = LintLogger::new(&log_path_str).unwrap();

        let entry = LintLogEntry::from_results(&[], Some(vec!["CN01".to_string()]));
        logger.log(&entry).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(!content.is_empty());

        let parsed: LintLogEntry = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(parsed.trees_scanned, 0);
        assert_eq!(parsed.enabled_rules, Some(vec!["CN01".to_string()]));
    }

    #[test]
    fn test_log_appends() {
        let dir = TempDir::new().unwrap();
        let log_path = dir.path().join("lint.jsonl");
        let log_path_str = log_path.to_string_lossy().to_string();

        let entry = LintLogEntry::from_results(&[], None);
        {
            let mut logger = LintLogger::new(&log_path_str).unwrap();
            logger.log(&entry).unwrap();
        }
        {
            let mut logger = LintLogger::new(&log_path_str).unwrap();
            logger.log(&entry).unwrap();
        }

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}

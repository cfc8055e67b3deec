//! Core data models for sql-constraint-lint

use crate::tree::{NodeId, SyntaxTree};
use thiserror::Error;

/// Severity level of a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A finding produced by one rule evaluation, anchored at the node the
/// host should report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub anchor: NodeId,
    pub offset: usize,
    pub message: String,
}

/// A violation detected by a lint rule
#[derive(Debug, Clone)]
pub struct Violation {
    pub rule_id: String,
    pub message: String,
    pub offset: usize,
    pub anchor: NodeId,
    pub severity: Severity,
}

impl Violation {
    pub fn new(rule_id: String, severity: Severity, finding: Finding) -> Self {
        Self {
            rule_id,
            message: finding.message,
            offset: finding.offset,
            anchor: finding.anchor,
            severity,
        }
    }
}

/// Context passed to each rule for one evaluation
pub struct RuleContext<'a> {
    pub node: NodeId,
    pub tree: &'a SyntaxTree,
}

/// Internal evaluation failure, distinguished from the normal
/// "rule does not apply" outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("node {0:?} is not present in the tree")]
    MissingNode(NodeId),
    #[error("node {0:?} is missing from its parent's children")]
    DetachedNode(NodeId),
}

/// An evaluation failure the walker downgraded instead of aborting the pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationError {
    pub rule_id: String,
    pub node: NodeId,
    pub error: RuleError,
}

/// Result of linting a single tree
#[derive(Debug, Default)]
pub struct LintResult {
    pub violations: Vec<Violation>,
    pub errors: Vec<EvaluationError>,
}

impl LintResult {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty() && self.errors.is_empty()
    }
}

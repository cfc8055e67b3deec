//! Base trait for all lint rules

use crate::models::{Finding, RuleContext, RuleError, Severity};
use crate::tree::SyntaxNodeKind;

/// Base trait that all lint rules must implement
pub trait LintRule: Send + Sync {
    /// The unique identifier for this rule (e.g., "CN01")
    fn rule_id(&self) -> &str;

    /// Dotted rule name used in configuration and reports
    /// (e.g., "convention.constraint_naming")
    fn name(&self) -> &str;

    /// Short description of what the rule checks
    fn description(&self) -> &str;

    /// Category tags for selective enable/disable
    fn groups(&self) -> &[&str] {
        &["all"]
    }

    /// Node kinds that should trigger an evaluation call
    fn selector(&self) -> &[SyntaxNodeKind];

    /// Severity assigned to this rule's findings (default: Warning)
    fn severity(&self) -> Severity {
        Severity::Warning
    }

    /// Check if this rule is enabled (default: true)
    fn is_enabled(&self) -> bool {
        true
    }

    /// Evaluate the rule against one node.
    ///
    /// `Ok(Some(_))` is a finding, `Ok(None)` means the rule does not apply
    /// at this node, and `Err(_)` is an internal failure the caller records
    /// without aborting the lint pass.
    fn evaluate(&self, context: &RuleContext) -> Result<Option<Finding>, RuleError>;
}

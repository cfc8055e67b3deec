//! Lint rules for sql-constraint-lint

pub mod base;

// Rule implementations
pub mod cn01_constraint_naming;

use base::LintRule;

/// Get all available rules
pub fn all_rules() -> Vec<Box<dyn LintRule>> {
    vec![Box::new(
        cn01_constraint_naming::ConstraintNamingRule::new(),
    )]
}

/// Get all available rule IDs
pub fn rule_ids() -> Vec<String> {
    all_rules()
        .iter()
        .map(|rule| rule.rule_id().to_string())
        .collect()
}

/// Get rules filtered by enabled IDs. `None` enables every registered rule.
pub fn enabled_rules(enabled_ids: Option<&[String]>) -> Vec<Box<dyn LintRule>> {
    let all = all_rules();

    match enabled_ids {
        Some(ids) => all
            .into_iter()
            .filter(|rule| rule.is_enabled() && ids.contains(&rule.rule_id().to_string()))
            .collect(),
        None => all.into_iter().filter(|rule| rule.is_enabled()).collect(),
    }
}

//! sql-constraint-lint: naming-convention lint rules for SQL syntax trees
//!
//! The host framework owns SQL parsing, file discovery, and report
//! rendering. It hands each parsed tree to [`lint_tree`], which routes every
//! node matching a rule's selector to that rule and collects the resulting
//! violations. Trees are read-only during a pass and rules keep no state
//! between evaluations, so linting many trees in parallel is safe.

pub mod config;
pub mod logging;
pub mod models;
pub mod rules;
pub mod tree;

use models::{EvaluationError, LintResult, RuleContext, Violation};
use rayon::prelude::*;
use rules::base::LintRule;
use tree::SyntaxTree;

/// Lint a single tree and return the results
pub fn lint_tree(tree: &SyntaxTree, rules: &[Box<dyn LintRule>]) -> LintResult {
    let mut result = LintResult::default();

    for node in tree.preorder() {
        for rule in rules {
            if !rule.selector().contains(&node.kind()) {
                continue;
            }
            let context = RuleContext {
                node: node.id(),
                tree,
            };
            match rule.evaluate(&context) {
                Ok(Some(finding)) => result.violations.push(Violation::new(
                    rule.rule_id().to_string(),
                    rule.severity(),
                    finding,
                )),
                Ok(None) => {}
                // One bad node must not abort the rest of the pass.
                Err(error) => result.errors.push(EvaluationError {
                    rule_id: rule.rule_id().to_string(),
                    node: node.id(),
                    error,
                }),
            }
        }
    }

    result
}

/// Lint multiple trees in parallel
pub fn lint_trees_parallel(trees: &[SyntaxTree], rules: &[Box<dyn LintRule>]) -> Vec<LintResult> {
    trees.par_iter().map(|tree| lint_tree(tree, rules)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::Severity;
    use tree::{SyntaxNodeKind, SyntaxTreeBuilder};

    /// Two table constraints, one violating and one conforming
    fn sample_tree() -> SyntaxTree {
        let mut b = SyntaxTreeBuilder::new();
        b.open(SyntaxNodeKind::Statement);
        b.token(SyntaxNodeKind::Keyword, "CREATE");
        b.token(SyntaxNodeKind::Whitespace, " ");
        b.token(SyntaxNodeKind::Keyword, "TABLE");
        b.token(SyntaxNodeKind::Whitespace, " ");
        b.token(SyntaxNodeKind::ObjectReference, "person");
        b.token(SyntaxNodeKind::Whitespace, " ");
        b.token(SyntaxNodeKind::Symbol, "(");
        b.open(SyntaxNodeKind::Clause);
        b.token(SyntaxNodeKind::Keyword, "CONSTRAINT");
        b.token(SyntaxNodeKind::Whitespace, " ");
        b.token(SyntaxNodeKind::Identifier, "person_pk");
        b.token(SyntaxNodeKind::Whitespace, " ");
        b.token(SyntaxNodeKind::Keyword, "PRIMARY");
        b.token(SyntaxNodeKind::Whitespace, " ");
        b.token(SyntaxNodeKind::Keyword, "KEY");
        b.close();
        b.token(SyntaxNodeKind::Symbol, ",");
        b.token(SyntaxNodeKind::Whitespace, " ");
        b.open(SyntaxNodeKind::Clause);
        b.token(SyntaxNodeKind::Keyword, "CONSTRAINT");
        b.token(SyntaxNodeKind::Whitespace, " ");
        b.token(SyntaxNodeKind::Identifier, "uc_email");
        b.token(SyntaxNodeKind::Whitespace, " ");
        b.token(SyntaxNodeKind::Keyword, "UNIQUE");
        b.close();
        b.token(SyntaxNodeKind::Symbol, ")");
        b.close();
        b.finish()
    }

    #[test]
    fn test_lint_tree() {
        let tree = sample_tree();
        let rules = rules::all_rules();
        let result = lint_tree(&tree, &rules);

        assert_eq!(result.violations.len(), 1);
        assert!(result.errors.is_empty());

        let violation = &result.violations[0];
        assert_eq!(violation.rule_id, "CN01");
        assert_eq!(violation.severity, Severity::Warning);
        assert!(violation.message.contains("person_pk"));
        assert!(violation.message.contains("pk_"));
    }

    #[test]
    fn test_lint_tree_no_rules() {
        let tree = sample_tree();
        let result = lint_tree(&tree, &[]);
        assert!(result.is_clean());
    }

    #[test]
    fn test_lint_trees_parallel() {
        let trees = vec![sample_tree(), sample_tree(), sample_tree()];
        let rules = rules::all_rules();
        let results = lint_trees_parallel(&trees, &rules);

        assert_eq!(results.len(), 3);
        for result in &results {
            assert_eq!(result.violations.len(), 1);
        }
    }
}

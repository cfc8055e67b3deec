//! CN01: Constraint Naming
//!
//! Constraint names should use the prefix matching their kind.
//!
//! PRIMARY KEY constraints should use the "pk_" prefix.
//! FOREIGN KEY constraints should use the "fk_" prefix.
//! UNIQUE constraints should use the "uc_" prefix.
//! CHECK constraints should use the "chk_" prefix.
//! DEFAULT constraints should use the "df_" prefix.
//!
//! ```sql
//! -- Anti-pattern
//! CREATE TABLE person (
//!     person_id INT,
//!     email VARCHAR,
//!     CONSTRAINT person_pk PRIMARY KEY (person_id),
//!     CONSTRAINT email_unique UNIQUE (email)
//! );
//!
//! -- Best practice
//! CREATE TABLE person (
//!     person_id INT,
//!     email VARCHAR,
//!     CONSTRAINT pk_person PRIMARY KEY (person_id),
//!     CONSTRAINT uc_email UNIQUE (email)
//! );
//! ```

use crate::models::{Finding, RuleContext, RuleError};
use crate::rules::base::LintRule;
use crate::tree::{SyntaxNode, SyntaxNodeKind};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Maximum number of significant sibling nodes scanned forward when
/// searching for the constraint kind. A kind keyword beyond this window is
/// not found; that is a documented limitation, not an error.
const LOOKAHEAD_LIMIT: usize = 10;

/// The constraint kinds this rule knows how to name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    PrimaryKey,
    ForeignKey,
    Unique,
    Check,
    Default,
}

impl ConstraintKind {
    /// Required lowercase prefix for names of this kind
    pub fn prefix(self) -> &'static str {
        match self {
            ConstraintKind::PrimaryKey => "pk_",
            ConstraintKind::ForeignKey => "fk_",
            ConstraintKind::Unique => "uc_",
            ConstraintKind::Check => "chk_",
            ConstraintKind::Default => "df_",
        }
    }

    /// Uppercase label used in violation messages
    pub fn label(self) -> &'static str {
        match self {
            ConstraintKind::PrimaryKey => "PRIMARY KEY",
            ConstraintKind::ForeignKey => "FOREIGN KEY",
            ConstraintKind::Unique => "UNIQUE",
            ConstraintKind::Check => "CHECK",
            ConstraintKind::Default => "DEFAULT",
        }
    }
}

/// Leading keyword of each recognized constraint kind. Two-word kinds are
/// recognized by their first keyword, so `PRIMARY KEY` and `FOREIGN KEY`
/// match on `PRIMARY` and `FOREIGN`.
static KEYWORD_KINDS: Lazy<HashMap<&'static str, ConstraintKind>> = Lazy::new(|| {
    HashMap::from([
        ("PRIMARY", ConstraintKind::PrimaryKey),
        ("FOREIGN", ConstraintKind::ForeignKey),
        ("UNIQUE", ConstraintKind::Unique),
        ("CHECK", ConstraintKind::Check),
        ("DEFAULT", ConstraintKind::Default),
    ])
});

pub struct ConstraintNamingRule;

impl ConstraintNamingRule {
    pub fn new() -> Self {
        Self
    }

    /// A node names a constraint when its nearest non-whitespace
    /// predecessor among its parent's children is the CONSTRAINT keyword.
    fn preceded_by_constraint_keyword(siblings: &[SyntaxNode<'_>], position: usize) -> bool {
        for prev in siblings[..position].iter().rev() {
            if prev.kind().is_whitespace() {
                continue;
            }
            return prev.kind().is_keyword() && prev.upper_text() == "CONSTRAINT";
        }
        false
    }

    /// Scan forward from `position` for the constraint kind, charging one
    /// step per significant (non-whitespace) sibling, up to
    /// [`LOOKAHEAD_LIMIT`]. A node tagged as a foreign key reference counts
    /// as FOREIGN KEY even when the literal keywords are absent.
    fn find_constraint_kind(siblings: &[SyntaxNode<'_>], position: usize) -> Option<ConstraintKind> {
        let mut steps = 0;
        for next in &siblings[position + 1..] {
            if next.kind().is_whitespace() {
                continue;
            }
            steps += 1;
            if steps > LOOKAHEAD_LIMIT {
                break;
            }
            match next.kind() {
                SyntaxNodeKind::Keyword => {
                    if let Some(kind) = KEYWORD_KINDS.get(next.upper_text().as_str()) {
                        return Some(*kind);
                    }
                }
                SyntaxNodeKind::ForeignKeyReference => return Some(ConstraintKind::ForeignKey),
                _ => {}
            }
        }
        None
    }
}

impl LintRule for ConstraintNamingRule {
    fn rule_id(&self) -> &str {
        "CN01"
    }

    fn name(&self) -> &str {
        "convention.constraint_naming"
    }

    fn description(&self) -> &str {
        "Enforces naming conventions for SQL constraints, ensuring they start \
         with the appropriate prefixes"
    }

    fn groups(&self) -> &[&str] {
        &["all", "custom", "convention"]
    }

    fn selector(&self) -> &[SyntaxNodeKind] {
        &[SyntaxNodeKind::Identifier, SyntaxNodeKind::ObjectReference]
    }

    fn evaluate(&self, context: &RuleContext) -> Result<Option<Finding>, RuleError> {
        let node = context
            .tree
            .get(context.node)
            .ok_or(RuleError::MissingNode(context.node))?;

        let Some(parent) = node.parent() else {
            return Ok(None);
        };
        let siblings: Vec<SyntaxNode<'_>> = parent.children().collect();
        let position = siblings
            .iter()
            .position(|s| s.id() == node.id())
            .ok_or(RuleError::DetachedNode(context.node))?;

        if !Self::preceded_by_constraint_keyword(&siblings, position) {
            return Ok(None);
        }

        let Some(kind) = Self::find_constraint_kind(&siblings, position) else {
            return Ok(None);
        };

        let name = node.text().to_lowercase();
        if name.starts_with(kind.prefix()) {
            return Ok(None);
        }

        Ok(Some(Finding {
            anchor: node.id(),
            offset: node.offset(),
            message: format!(
                "Constraint name '{}' should start with '{}' for {} constraints.",
                name,
                kind.prefix(),
                kind.label()
            ),
        }))
    }
}

//! Ordered literal substitution rules.
//!
//! A plan is an ordered list of `(from, to)` pairs. Order is priority: a
//! rule claims its matches before any later rule sees the text, and text a
//! rule has produced is never rewritten by a later rule. An explicit order in
//! which a shorter rule would shadow a longer rule that contains it is
//! rejected; identity plans are reordered so the longer literal goes first.

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{Identity, RenameSpec},
    error::DomainError,
};

/// One exact, non-overlapping literal replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionRule {
    pub from: String,
    pub to: String,
}

impl SubstitutionRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    fn is_noop(&self) -> bool {
        self.from.is_empty() || self.from == self.to
    }
}

/// Result of applying a plan to a buffer that had at least one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substituted {
    pub text: String,
    pub replacements: usize,
}

#[derive(Debug, Clone, Copy)]
enum Piece<'a> {
    /// Original text no rule has claimed yet.
    Pending(&'a str),
    /// Output of a rule; later rules skip it.
    Claimed(&'a str),
}

impl Piece<'_> {
    fn as_str(&self) -> &str {
        match self {
            Self::Pending(s) | Self::Claimed(s) => s,
        }
    }
}

/// Validated, ordered list of substitution rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubstitutionPlan {
    rules: Vec<SubstitutionRule>,
}

impl SubstitutionPlan {
    /// Build a plan from rules in priority order.
    ///
    /// No-op rules (empty `from`, or `from == to`) and repeated `from` values
    /// are dropped. Fails if an earlier rule's `from` is a strict substring of
    /// a later rule's `from`.
    pub fn new(rules: impl IntoIterator<Item = SubstitutionRule>) -> Result<Self, DomainError> {
        let mut kept: Vec<SubstitutionRule> = Vec::new();

        for rule in rules {
            if rule.is_noop() || kept.iter().any(|k| k.from == rule.from) {
                continue;
            }
            if let Some(shorter) = kept.iter().find(|k| rule.from.contains(k.from.as_str())) {
                return Err(DomainError::RuleOrderViolation {
                    shorter: shorter.from.clone(),
                    longer: rule.from,
                });
            }
            kept.push(rule);
        }

        Ok(Self { rules: kept })
    }

    /// Rules for an identity swap, in the order dotted app id, app id as a
    /// path, display name, snake name, namespace.
    ///
    /// Where one `from` contains another (snake name `acme` inside namespace
    /// `com.acme`), the containing rule is moved ahead of the contained one.
    /// Otherwise the order above is kept.
    pub fn between(old: &Identity, new: &Identity) -> Result<Self, DomainError> {
        Self::new(longest_first(vec![
            SubstitutionRule::new(old.app_id.as_str(), new.app_id.as_str()),
            SubstitutionRule::new(old.app_id.as_path(), new.app_id.as_path()),
            SubstitutionRule::new(old.app_name.as_str(), new.app_name.as_str()),
            SubstitutionRule::new(old.snake_name.as_str(), new.snake_name.as_str()),
            SubstitutionRule::new(old.app_id.namespace(), new.app_id.namespace()),
        ]))
    }

    pub fn for_spec(spec: &RenameSpec) -> Result<Self, DomainError> {
        Self::between(spec.old(), spec.new_identity())
    }

    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order. `None` when nothing matched.
    pub fn apply(&self, text: &str) -> Option<Substituted> {
        let mut pieces = vec![Piece::Pending(text)];
        let mut replacements = 0;

        for rule in &self.rules {
            let from = rule.from.as_str();
            let mut next = Vec::with_capacity(pieces.len());

            for piece in pieces {
                let Piece::Pending(mut rest) = piece else {
                    next.push(piece);
                    continue;
                };
                while let Some(at) = rest.find(from) {
                    if at > 0 {
                        next.push(Piece::Pending(&rest[..at]));
                    }
                    next.push(Piece::Claimed(rule.to.as_str()));
                    replacements += 1;
                    rest = &rest[at + from.len()..];
                }
                if !rest.is_empty() {
                    next.push(Piece::Pending(rest));
                }
            }

            pieces = next;
        }

        if replacements == 0 {
            return None;
        }

        let mut out = String::with_capacity(text.len());
        for piece in &pieces {
            out.push_str(piece.as_str());
        }
        Some(Substituted {
            text: out,
            replacements,
        })
    }
}

/// Stable topological order: each step takes the first remaining rule that
/// no other remaining rule contains.
fn longest_first(mut pending: Vec<SubstitutionRule>) -> Vec<SubstitutionRule> {
    pending.retain(|rule| !rule.is_noop());
    let mut ordered = Vec::with_capacity(pending.len());

    while !pending.is_empty() {
        let next = (0..pending.len())
            .find(|&i| {
                let from = pending[i].from.as_str();
                !pending
                    .iter()
                    .any(|other| other.from != from && other.from.contains(from))
            })
            // strict containment between distinct strings has no cycles
            .unwrap_or(0);
        ordered.push(pending.remove(next));
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{AppId, AppName};

    fn identity(id: &str, name: &str) -> Identity {
        Identity::new(AppId::parse(id).unwrap(), AppName::parse(name).unwrap())
    }

    fn template() -> Identity {
        identity("com.example.purplestack", "Purplestack")
    }

    #[test]
    fn mandated_order_is_preserved() {
        let plan = SubstitutionPlan::between(&template(), &identity("com.acme.taskflow", "Task Flow"))
            .unwrap();
        let froms: Vec<&str> = plan.rules().iter().map(|r| r.from.as_str()).collect();
        assert_eq!(
            froms,
            [
                "com.example.purplestack",
                "com/example/purplestack",
                "Purplestack",
                "purplestack",
                "com.example",
            ]
        );
    }

    #[test]
    fn shorter_rule_before_container_is_rejected() {
        let err = SubstitutionPlan::new([
            SubstitutionRule::new("purplestack", "x"),
            SubstitutionRule::new("com.example.purplestack", "y"),
        ])
        .unwrap_err();
        assert!(matches!(err, DomainError::RuleOrderViolation { .. }));
    }

    #[test]
    fn namespace_containing_snake_name_moves_first() {
        let acme = identity("com.acme.app", "Acme");
        let plan = SubstitutionPlan::between(&acme, &template()).unwrap();
        let froms: Vec<&str> = plan.rules().iter().map(|r| r.from.as_str()).collect();
        assert_eq!(froms, ["com.acme.app", "com/acme/app", "Acme", "com.acme", "acme"]);

        let out = plan.apply("com.acme.app com.acme.shared package:acme/x").unwrap();
        assert_eq!(
            out.text,
            "com.example.purplestack com.example.shared package:purplestack/x"
        );
    }

    #[test]
    fn identity_plans_never_violate_order() {
        let cases = [
            ("com.acme.app", "Acme"),
            ("io.app.app", "App"),
            ("com.example.purplestack", "Com"),
        ];
        for (id, name) in cases {
            let old = identity(id, name);
            assert!(SubstitutionPlan::between(&old, &template()).is_ok(), "{id}");
            assert!(SubstitutionPlan::between(&template(), &old).is_ok(), "{id}");
        }
    }

    #[test]
    fn noop_and_duplicate_rules_are_dropped() {
        let plan = SubstitutionPlan::new([
            SubstitutionRule::new("", "x"),
            SubstitutionRule::new("same", "same"),
            SubstitutionRule::new("a.b", "c.d"),
            SubstitutionRule::new("a.b", "e.f"),
        ])
        .unwrap();
        assert_eq!(plan.rules(), &[SubstitutionRule::new("a.b", "c.d")]);
    }

    #[test]
    fn full_id_wins_over_bare_name() {
        let plan = SubstitutionPlan::between(&template(), &identity("com.acme.taskflow", "Task Flow"))
            .unwrap();
        let out = plan
            .apply("applicationId \"com.example.purplestack\"\nimport 'package:purplestack/main.dart';\n")
            .unwrap();
        assert_eq!(
            out.text,
            "applicationId \"com.acme.taskflow\"\nimport 'package:task_flow/main.dart';\n"
        );
        assert_eq!(out.replacements, 2);
    }

    #[test]
    fn new_id_containing_old_name_is_not_rewritten() {
        // The new id embeds the old snake name; a naive sequential replace
        // would turn it into com.purplestack.pro -> com.pro_max.pro.
        let plan = SubstitutionPlan::between(
            &template(),
            &identity("com.purplestack.pro", "Pro Max"),
        )
        .unwrap();
        let out = plan.apply("id=com.example.purplestack name=purplestack").unwrap();
        assert_eq!(out.text, "id=com.purplestack.pro name=pro_max");
    }

    #[test]
    fn unmatched_text_returns_none() {
        let plan = SubstitutionPlan::between(&template(), &identity("com.acme.taskflow", "Task Flow"))
            .unwrap();
        assert!(plan.apply("nothing to see here").is_none());
    }

    #[test]
    fn namespace_rule_catches_sibling_ids() {
        let plan = SubstitutionPlan::between(&template(), &identity("com.acme.taskflow", "Task Flow"))
            .unwrap();
        let out = plan.apply("com.example.purplestack.widget and com.example.shared").unwrap();
        assert_eq!(out.text, "com.acme.taskflow.widget and com.acme.shared");
    }

    #[test]
    fn path_form_id_is_rewritten() {
        let plan = SubstitutionPlan::between(&template(), &identity("com.acme.taskflow", "Task Flow"))
            .unwrap();
        let out = plan
            .apply("src/main/kotlin/com/example/purplestack/MainActivity.kt")
            .unwrap();
        assert_eq!(out.text, "src/main/kotlin/com/acme/taskflow/MainActivity.kt");
    }
}

//! Relationship rules: ordered `(pattern, label, kind, multiplicity)` table
//! run over the raw requirement text.
//!
//! Pattern shape: `<ClassRun> <verb> [determiner] <ClassRun>`.
//! Class spans are case-sensitive capitalized runs; verbs and determiners
//! are case-insensitive. Both spans go through `clean_class_name` and must
//! resolve (case-insensitively) to two *different* known candidates.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::trace;

use super::nouns::{clean_class_name, CLASS_RUN};
use crate::model::{relationship_id, Multiplicity, Relationship, RelationshipKind};

const DETERMINER: &str = r"(?:(?i:an?|the|multiple|many|several|some|one|each)\s+)?";

#[derive(Debug)]
pub struct RelationRule {
    pub label: &'static str,
    pub kind: RelationshipKind,
    pub multiplicity: Option<(&'static str, &'static str)>,
    /// Drop matches whose right-hand span is all lowercase (attribute mentions).
    pub skip_lowercase_target: bool,
    re: Regex,
}

impl RelationRule {
    fn verb(verb: &str, label: &'static str, kind: RelationshipKind, mult: (&'static str, &'static str)) -> Self {
        let pattern = format!(r"\b({CLASS_RUN})\s+(?i:{verb})\s+{DETERMINER}({CLASS_RUN})\b");
        Self {
            label,
            kind,
            multiplicity: Some(mult),
            skip_lowercase_target: false,
            re: Regex::new(&pattern).expect("relation verb regex"),
        }
    }
}

/// Priority order matters: earlier rules claim a (from, to, label) triple first.
pub static RULES: Lazy<Vec<RelationRule>> = Lazy::new(|| {
    use RelationshipKind::*;
    vec![
        RelationRule::verb("creates?", "creates", Association, ("1", "*")),
        RelationRule::verb("contains?", "contains", Composition, ("1", "*")),
        RelationRule::verb("references?", "references", Association, ("*", "*")),
        RelationRule::verb("aggregates?", "aggregates", Aggregation, ("1", "*")),
        RelationRule::verb("manages?", "manages", Association, ("1", "*")),
        RelationRule {
            label: "has",
            kind: Composition,
            multiplicity: Some(("1", "*")),
            skip_lowercase_target: true,
            re: Regex::new(&format!(
                r"\b({CLASS_RUN})\s+(?i:has|have)\s+{DETERMINER}([A-Za-z][a-z]*(?:\s+[A-Z][a-z]*)*)\b"
            ))
            .expect("relation has regex"),
        },
        RelationRule {
            label: "inherits",
            kind: Inheritance,
            multiplicity: None,
            skip_lowercase_target: false,
            re: Regex::new(&format!(
                r"\b({CLASS_RUN})\s+(?i:is)\s+(?i:an?)\s+({CLASS_RUN})\b"
            ))
            .expect("relation inheritance regex"),
        },
    ]
});

fn resolve<'a>(span: &str, classes: &'a [String]) -> Option<&'a String> {
    let cleaned = clean_class_name(span).to_lowercase();
    if cleaned.is_empty() {
        return None;
    }
    classes.iter().find(|c| c.to_lowercase() == cleaned)
}

/// Run every rule over `text`; emit edges between distinct known classes,
/// at most one per (from, to, label).
pub fn extract_relationships(text: &str, classes: &[String]) -> Vec<Relationship> {
    let mut out: Vec<Relationship> = Vec::new();
    let mut seen: HashSet<(String, String, &'static str)> = HashSet::new();

    for rule in RULES.iter() {
        for caps in rule.re.captures_iter(text) {
            let (Some(lhs), Some(rhs)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let rhs = rhs.as_str();
            if rule.skip_lowercase_target && rhs == rhs.to_lowercase() {
                continue;
            }

            let (Some(from), Some(to)) = (resolve(lhs.as_str(), classes), resolve(rhs, classes))
            else {
                continue;
            };
            if from == to {
                continue;
            }
            if !seen.insert((from.clone(), to.clone(), rule.label)) {
                continue;
            }

            trace!(target: "extract", %from, %to, kind = %rule.kind, label = rule.label, "relationship");
            out.push(Relationship {
                id: relationship_id(out.len()),
                from_class: from.clone(),
                to_class: to.clone(),
                kind: rule.kind,
                label: Some(rule.label.to_string()),
                multiplicity: rule.multiplicity.map(|(f, t)| Multiplicity::new(f, t)),
            });
        }
    }

    out
}

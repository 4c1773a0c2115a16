//! Edit rules, tried in declaration order:
//! 1. add class          — "(add|create) [a] [new] <word> class"
//! 2. add relationship   — two known class names mentioned + "to"
//! 3. change relationship — change/update/modify + two classes + a kind keyword
//!
//! Class mentions are plain substring tests on the lowercased feedback, so
//! "order" also hits inside "orderitem". Ties go to declaration order.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Feedback, Intent, RefineReply};
use crate::model::{Class, Model, Relationship, RelationshipKind};

pub type Rule = fn(&Model, &Feedback) -> Option<RefineReply>;

pub static RULES: &[(Intent, Rule)] = &[
    (Intent::AddClass, add_class as Rule),
    (Intent::AddRelationship, add_relationship as Rule),
    (Intent::ChangeRelationship, change_relationship as Rule),
];

static ADD_CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:add|create)\s+(?:a\s+)?(?:new\s+)?(\w+)\s+class").expect("add class regex")
});

const INHERITANCE_WORDS: &[&str] = &["inherit", "extends", "is a"];
const COMPOSITION_WORDS: &[&str] = &["composition", "owns", "contains"];
const AGGREGATION_WORDS: &[&str] = &["aggregation", "has-a", "part of"];
const DEPENDENCY_WORDS: &[&str] = &["depends", "dependency"];
const CHANGE_WORDS: &[&str] = &["change", "update", "modify"];

/// Kind keyword family present in the feedback, strongest first.
pub fn requested_kind(fb: &Feedback) -> Option<RelationshipKind> {
    if fb.contains_any(INHERITANCE_WORDS) {
        Some(RelationshipKind::Inheritance)
    } else if fb.contains_any(COMPOSITION_WORDS) {
        Some(RelationshipKind::Composition)
    } else if fb.contains_any(AGGREGATION_WORDS) {
        Some(RelationshipKind::Aggregation)
    } else if fb.contains_any(DEPENDENCY_WORDS) {
        Some(RelationshipKind::Dependency)
    } else {
        None
    }
}

pub fn is_change_request(fb: &Feedback) -> bool {
    fb.contains_any(CHANGE_WORDS)
}

/// Class names whose lowercase form occurs in the feedback, in declaration order.
pub fn mentioned_classes<'m>(model: &'m Model, fb: &Feedback) -> Vec<&'m str> {
    model
        .class_names()
        .filter(|name| fb.contains(&name.to_lowercase()))
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn add_class(model: &Model, fb: &Feedback) -> Option<RefineReply> {
    if !(fb.contains_any(&["add", "create"]) && fb.contains("class")) {
        return None;
    }
    let caps = ADD_CLASS_RE.captures(fb.lower())?;
    let name = capitalize(caps.get(1)?.as_str());

    if model.find_class_ci(&name).is_some() {
        return Some(RefineReply::message(format!(
            "The class \"{name}\" already exists in your model."
        )));
    }

    let updated = model.with_class(Class::empty(model.next_class_id(), name.clone()));
    Some(RefineReply::edit(
        format!(
            "Added new class \"{name}\" to your model. You now have {} classes.",
            updated.classes.len()
        ),
        updated,
    ))
}

fn add_relationship(model: &Model, fb: &Feedback) -> Option<RefineReply> {
    if !fb.contains("to") || model.is_empty() {
        return None;
    }
    let mentioned = mentioned_classes(model, fb);
    let (first, second) = match mentioned.as_slice() {
        [a, b, ..] => (*a, *b),
        _ => return None,
    };

    if model.connecting(first, second).is_some() {
        // Let the change rule handle "update the Order/Customer link to ...".
        if is_change_request(fb) {
            return None;
        }
        return Some(RefineReply::message(format!(
            "A relationship between {first} and {second} already exists."
        )));
    }

    let kind = requested_kind(fb).unwrap_or(RelationshipKind::Association);
    let (from, to) = if fb.contains(&format!("to {}", second.to_lowercase())) {
        (first, second)
    } else if fb.contains(&format!("to {}", first.to_lowercase())) {
        (second, first)
    } else {
        (first, second)
    };

    let updated = model.with_relationship(Relationship {
        id: model.next_relationship_id(),
        from_class: from.to_string(),
        to_class: to.to_string(),
        kind,
        label: None,
        multiplicity: None,
    });
    Some(RefineReply::edit(
        format!(
            "Added {kind} relationship: {from} → {to}. Your model now has {} relationships.",
            updated.relationships.len()
        ),
        updated,
    ))
}

fn change_relationship(model: &Model, fb: &Feedback) -> Option<RefineReply> {
    if !is_change_request(fb) {
        return None;
    }
    let mentioned = mentioned_classes(model, fb);
    let (a, b) = match mentioned.as_slice() {
        [a, b, ..] => (*a, *b),
        _ => return None,
    };
    let kind = match requested_kind(fb) {
        Some(k @ (RelationshipKind::Inheritance
        | RelationshipKind::Composition
        | RelationshipKind::Aggregation)) => k,
        _ => return None,
    };
    let index = model.connecting(a, b)?;

    let current = &model.relationships[index];
    let (from_class, to_class) = match kind {
        RelationshipKind::Inheritance => (current.from_class.clone(), current.to_class.clone()),
        _ => (a.to_string(), b.to_string()),
    };
    let rel = Relationship {
        from_class,
        to_class,
        kind,
        ..current.clone()
    };

    let message = match kind {
        RelationshipKind::Inheritance => format!(
            "Updated the relationship between {a} and {b} to inheritance (is-a relationship). {a} now extends {b}."
        ),
        RelationshipKind::Composition => format!(
            "Updated the relationship between {a} and {b} to composition. {a} now owns {b} (strong ownership)."
        ),
        _ => format!(
            "Updated the relationship between {a} and {b} to aggregation. {a} has {b} (weak ownership)."
        ),
    };
    Some(RefineReply::edit(message, model.with_relationship_replaced(index, rel)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::class_id;

    fn model(names: &[&str]) -> Model {
        Model {
            classes: names
                .iter()
                .enumerate()
                .map(|(i, n)| Class::empty(class_id(i), n.to_string()))
                .collect(),
            ..Model::default()
        }
    }

    #[test]
    fn kind_keywords_follow_priority() {
        assert_eq!(
            requested_kind(&Feedback::new("Admin extends User and contains stuff")),
            Some(RelationshipKind::Inheritance)
        );
        assert_eq!(
            requested_kind(&Feedback::new("wheel is part of car")),
            Some(RelationshipKind::Aggregation)
        );
        assert_eq!(requested_kind(&Feedback::new("link them")), None);
    }

    #[test]
    fn add_class_capitalizes_first_letter() {
        let reply = add_class(&model(&[]), &Feedback::new("Please create a new payment class")).unwrap();
        let m = reply.updated_model.unwrap();
        assert_eq!(m.classes[0].name, "Payment");
        assert_eq!(m.classes[0].id, "class-0");
    }

    #[test]
    fn add_class_needs_the_word_class() {
        assert!(add_class(&model(&[]), &Feedback::new("add an invoice")).is_none());
    }

    #[test]
    fn direction_follows_to_phrase() {
        let m = model(&["Order", "Customer"]);
        let reply = add_relationship(&m, &Feedback::new("link customer to order")).unwrap();
        let updated = reply.updated_model.unwrap();
        let rel = &updated.relationships[0];
        assert_eq!((rel.from_class.as_str(), rel.to_class.as_str()), ("Customer", "Order"));
    }

    #[test]
    fn substring_mentions_are_not_word_bounded() {
        let m = model(&["Order", "OrderItem", "Customer"]);
        let found = mentioned_classes(&m, &Feedback::new("orderitem belongs to customer"));
        assert_eq!(found, vec!["Order", "OrderItem", "Customer"]);
    }

    #[test]
    fn change_without_edge_is_a_no_op() {
        let m = model(&["Order", "Customer"]);
        assert!(change_relationship(&m, &Feedback::new("change order and customer to composition")).is_none());
    }
}

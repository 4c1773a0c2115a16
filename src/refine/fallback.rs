//! Conversational replies when no edit rule applied.

use super::{Feedback, RefineReply};
use crate::model::Model;

const CAPABILITIES: &str = "I'm here to help refine your UML model. You can ask me to:
- Change relationship types (inheritance, composition, aggregation, association, dependency)
- Explain the differences between relationship types
- Validate if the current model matches your requirements
- Add or remove classes if needed

What would you like to do?";

pub fn converse(model: &Model, fb: &Feedback) -> RefineReply {
    let classes = model.classes.len();
    let relationships = model.relationships.len();

    if fb.contains_any(&["relationship", "relation"]) {
        return RefineReply::message(format!(
            "I can help you refine the relationships in your UML diagram. Currently, you have {relationships} relationships defined."
        ))
        .with_clarifications(&[
            "Which relationship would you like to change?",
            "Would you like to change it to inheritance, composition, aggregation, or association?",
        ]);
    }

    if fb.contains_any(&["class", "attribute", "method"]) {
        let mut message = format!("You currently have {classes} classes in your model.");
        if !model.is_empty() {
            let names: Vec<&str> = model.class_names().collect();
            message.push_str(&format!(" Here they are: {}.", names.join(", ")));
        }
        return RefineReply::message(message)
            .with_clarifications(&["Would you like to add, remove, or modify any classes?"]);
    }

    if fb.contains_any(&["correct", "looks good", "perfect"]) {
        return RefineReply::message(format!(
            "Great! Your UML diagram looks solid with {classes} classes and {relationships} relationships. Is there anything else you'd like to adjust?"
        ));
    }

    if fb.contains_any(&["what", "explain", "help"]) {
        return RefineReply::message(CAPABILITIES);
    }

    RefineReply::message(format!(
        "I understand you want to work on: \"{}\". Could you be more specific about which classes or relationships you'd like to modify?",
        fb.raw()
    ))
    .with_clarifications(&[
        "Which classes are involved?",
        "What type of change would you like to make?",
    ])
}

// src/extract/mod.rs
//! Requirement text → UML model.
//! Order:
//! 1) Candidate classes from capitalized word runs (nouns.rs)
//! 2) Relationship rules over the raw text (relations.rs)
//! 3) Default members from the catalog (catalog.rs)
//!
//! Deterministic and infallible: text that matches nothing yields an empty model.

pub mod catalog;
pub mod nouns;
pub mod relations;

use tracing::debug;

use crate::devlog::InputId;
use crate::model::{class_id, Class, Model};

pub use catalog::{infer_attribute_type, Catalog};
pub use nouns::{candidate_classes, clean_class_name};
pub use relations::extract_relationships;

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// Extract using the built-in member catalog.
pub fn extract_model(requirement: &str) -> Model {
    extract_with_catalog(requirement, Catalog::builtin())
}

pub fn extract_with_catalog(requirement: &str, catalog: &Catalog) -> Model {
    let names = candidate_classes(requirement);
    let relationships = extract_relationships(requirement, &names);

    let classes: Vec<Class> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let (attributes, methods) = catalog.members_for(i, name);
            Class {
                id: class_id(i),
                name: name.clone(),
                attributes,
                methods,
            }
        })
        .collect();

    debug!(
        target: "extract",
        id = %InputId::of(requirement),
        classes = classes.len(),
        relationships = relationships.len(),
        "extracted"
    );

    Model {
        classes,
        relationships,
        description: describe(requirement),
    }
}

fn describe(requirement: &str) -> String {
    let preview: String = requirement.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    format!("Extracted UML model from requirement: \"{preview}...\"")
}

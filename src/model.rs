//! model.rs — UML class-model types shared by extraction, refinement and the API.
//!
//! Wire shape (JSON) uses camelCase field names (`fromClass`, `returnType`, ...)
//! and carries the relationship kind in a field called `type`.
//! Edits are value-producing: `with_*` helpers return a fresh `Model` and never
//! touch the receiver.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: String,
    pub name: String,
    /// Primitive type name, e.g. "string", "int", "Date".
    #[serde(rename = "type")]
    pub ty: String,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub id: String,
    pub name: String,
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl Class {
    /// A class with no members (what refinement adds).
    pub fn empty(id: String, name: String) -> Self {
        Self {
            id,
            name,
            attributes: Vec::new(),
            methods: Vec::new(),
        }
    }
}

/// Closed set of UML relationship kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    Association,
    Aggregation,
    Composition,
    Inheritance,
    Dependency,
}

impl RelationshipKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Association => "association",
            Self::Aggregation => "aggregation",
            Self::Composition => "composition",
            Self::Inheritance => "inheritance",
            Self::Dependency => "dependency",
        }
    }
}

impl std::fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Multiplicity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl Multiplicity {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: Some(from.to_string()),
            to: Some(to.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    /// Name of the source class (a reference, not ownership).
    pub from_class: String,
    pub to_class: String,
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplicity: Option<Multiplicity>,
}

impl Relationship {
    /// True if this edge joins `a` and `b`, in either direction.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.from_class == a && self.to_class == b) || (self.from_class == b && self.to_class == a)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub classes: Vec<Class>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub description: String,
}

pub fn class_id(index: usize) -> String {
    format!("class-{index}")
}

pub fn attribute_id(class_index: usize, index: usize) -> String {
    format!("attr-{class_index}-{index}")
}

pub fn method_id(class_index: usize, index: usize) -> String {
    format!("method-{class_index}-{index}")
}

pub fn relationship_id(index: usize) -> String {
    format!("rel-{index}")
}

impl Model {
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.name.as_str())
    }

    /// Case-insensitive class lookup.
    pub fn find_class_ci(&self, name: &str) -> Option<&Class> {
        let needle = name.to_lowercase();
        self.classes.iter().find(|c| c.name.to_lowercase() == needle)
    }

    /// Index of the first relationship joining `a` and `b` (either direction).
    pub fn connecting(&self, a: &str, b: &str) -> Option<usize> {
        self.relationships.iter().position(|r| r.connects(a, b))
    }

    /// Next id for an appended class. Ids are never reused since nothing deletes.
    pub fn next_class_id(&self) -> String {
        class_id(self.classes.len())
    }

    pub fn next_relationship_id(&self) -> String {
        relationship_id(self.relationships.len())
    }

    /// New model with `class` appended.
    pub fn with_class(&self, class: Class) -> Model {
        Model {
            classes: self.classes.iter().cloned().chain([class]).collect(),
            relationships: self.relationships.clone(),
            description: self.description.clone(),
        }
    }

    /// New model with `rel` appended.
    pub fn with_relationship(&self, rel: Relationship) -> Model {
        Model {
            classes: self.classes.clone(),
            relationships: self.relationships.iter().cloned().chain([rel]).collect(),
            description: self.description.clone(),
        }
    }

    /// New model where the relationship at `index` is replaced by `rel`.
    pub fn with_relationship_replaced(&self, index: usize, rel: Relationship) -> Model {
        let relationships = self
            .relationships
            .iter()
            .enumerate()
            .map(|(i, r)| if i == index { rel.clone() } else { r.clone() })
            .collect();
        Model {
            classes: self.classes.clone(),
            relationships,
            description: self.description.clone(),
        }
    }

    /// Boundary schema check. Anything returned to a caller must pass this.
    pub fn validate(&self) -> Result<(), SchemaViolation> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.classes.len());
        for class in &self.classes {
            if class.id.is_empty() {
                return Err(SchemaViolation::EmptyId {
                    what: "class",
                    name: class.name.clone(),
                });
            }
            check_identifier("class", &class.name)?;
            if !seen.insert(class.name.as_str()) {
                return Err(SchemaViolation::DuplicateClass(class.name.clone()));
            }
            for attr in &class.attributes {
                if attr.id.is_empty() {
                    return Err(SchemaViolation::EmptyId {
                        what: "attribute",
                        name: attr.name.clone(),
                    });
                }
                check_identifier("attribute", &attr.name)?;
            }
            for method in &class.methods {
                if method.id.is_empty() {
                    return Err(SchemaViolation::EmptyId {
                        what: "method",
                        name: method.name.clone(),
                    });
                }
                check_identifier("method", &method.name)?;
            }
        }

        for rel in &self.relationships {
            if rel.id.is_empty() {
                return Err(SchemaViolation::EmptyId {
                    what: "relationship",
                    name: format!("{} -> {}", rel.from_class, rel.to_class),
                });
            }
            for end in [&rel.from_class, &rel.to_class] {
                if !seen.contains(end.as_str()) {
                    return Err(SchemaViolation::UnknownClass {
                        relationship: rel.id.clone(),
                        class: end.clone(),
                    });
                }
            }
            if rel.from_class == rel.to_class {
                return Err(SchemaViolation::SelfRelationship(rel.id.clone()));
            }
        }
        Ok(())
    }
}

fn check_identifier(what: &'static str, name: &str) -> Result<(), SchemaViolation> {
    if name.is_empty() {
        return Err(SchemaViolation::EmptyName(what));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(SchemaViolation::NotAnIdentifier {
            what,
            name: name.to_string(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("{what} `{name}` has an empty id")]
    EmptyId { what: &'static str, name: String },
    #[error("{0} with an empty name")]
    EmptyName(&'static str),
    #[error("{what} name `{name}` is not an identifier-safe token")]
    NotAnIdentifier { what: &'static str, name: String },
    #[error("duplicate class name `{0}`")]
    DuplicateClass(String),
    #[error("relationship `{relationship}` references unknown class `{class}`")]
    UnknownClass { relationship: String, class: String },
    #[error("relationship `{0}` points a class at itself")]
    SelfRelationship(String),
}

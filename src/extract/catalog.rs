//! # Member catalog
//!
//! Default attributes and methods for well-known class names
//! (e.g. `User` → username/password/email/id + login/logout/updateProfile).
//!
//! - Built-in data is embedded from `config/catalog.json` and parsed once.
//! - An operator may point the service at another JSON file of the same shape;
//!   unreadable or malformed files fall back to the built-in catalog.
//! - Lookups are by exact class name. Unknown classes get no members.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};
use tracing::warn;

use crate::model::{attribute_id, method_id, Attribute, Method, Parameter, Visibility};

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    let raw = include_str!("../../config/catalog.json");
    serde_json::from_str::<Catalog>(raw).expect("valid built-in catalog")
});

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub classes: HashMap<String, ClassTemplate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassTemplate {
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodTemplate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MethodTemplate {
    pub name: String,
    #[serde(rename = "returnType")]
    pub return_type: String,
    #[serde(default)]
    pub params: Vec<Parameter>,
}

impl Catalog {
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Load a catalog from a JSON file.
    /// Falls back to the built-in catalog on error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let parsed = fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|s| serde_json::from_str::<Catalog>(&s).map_err(anyhow::Error::from));
        match parsed {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "catalog unusable, using built-in");
                BUILTIN.clone()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    /// Materialize members for the class at `class_index`.
    /// Attributes are private, methods public.
    pub fn members_for(&self, class_index: usize, class_name: &str) -> (Vec<Attribute>, Vec<Method>) {
        let Some(tpl) = self.classes.get(class_name) else {
            return (Vec::new(), Vec::new());
        };

        let attributes = tpl
            .attributes
            .iter()
            .enumerate()
            .map(|(i, name)| Attribute {
                id: attribute_id(class_index, i),
                name: name.clone(),
                ty: infer_attribute_type(name).to_string(),
                visibility: Visibility::Private,
            })
            .collect();

        let methods = tpl
            .methods
            .iter()
            .enumerate()
            .map(|(i, m)| Method {
                id: method_id(class_index, i),
                name: m.name.clone(),
                return_type: m.return_type.clone(),
                parameters: m.params.clone(),
                visibility: Visibility::Public,
            })
            .collect();

        (attributes, methods)
    }
}

/// Attribute type by naming convention. First match wins.
pub fn infer_attribute_type(name: &str) -> &'static str {
    if name == "id" {
        return "string";
    }
    if name.contains("quantity") {
        return "int";
    }
    if name.contains("date") || name.contains("Date") {
        return "Date";
    }
    if ["price", "salary", "balance"].iter().any(|k| name.contains(k)) {
        return "double";
    }
    "string"
}

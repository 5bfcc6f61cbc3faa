//! Attribute schema of a resource.

use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    /// Unordered set of strings; duplicates collapse.
    StringSet,
}

impl AttributeType {
    pub fn describe(self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::StringSet => "set of string",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub ty: AttributeType,
    pub required: bool,
    /// Changing the value replaces the resource instead of updating it.
    pub force_new: bool,
    pub description: &'static str,
}

impl Attribute {
    pub fn required(ty: AttributeType) -> Self {
        Self {
            ty,
            required: true,
            force_new: false,
            description: "",
        }
    }

    pub fn optional(ty: AttributeType) -> Self {
        Self {
            required: false,
            ..Self::required(ty)
        }
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

/// Ordered attribute definitions, keyed by attribute name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceSchema {
    attributes: IndexMap<&'static str, Attribute>,
}

impl ResourceSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, name: &'static str, attribute: Attribute) -> Self {
        self.attributes.insert(name, attribute);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &Attribute)> {
        self.attributes.iter().map(|(name, attr)| (*name, attr))
    }

    pub fn is_force_new(&self, name: &str) -> bool {
        self.get(name).is_some_and(|attr| attr.force_new)
    }
}

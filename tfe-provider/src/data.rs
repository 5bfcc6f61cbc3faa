//! Typed attribute values of one resource instance.

use crate::schema::{AttributeType, ResourceSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tfe_core::error::{Result, TfeError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    String(String),
    StringSet(BTreeSet<String>),
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Identifier plus attribute values. An empty ID means the resource does not
/// exist (yet, or any more).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default)]
    id: String,
    #[serde(default)]
    attributes: BTreeMap<String, AttributeValue>,
}

impl ResourceData {
    /// Data carrying only an ID, as produced by import.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Parse raw configuration into typed values.
    ///
    /// Fails on the first unknown attribute, missing required attribute or
    /// type mismatch, including non-string elements inside a set.
    pub fn from_config(schema: &ResourceSchema, config: &Value) -> Result<Self> {
        let object = config.as_object().ok_or_else(|| {
            TfeError::invalid_attribute(
                "<config>",
                format!("expected an object, got {}", json_kind(config)),
            )
        })?;

        if let Some(unknown) = object.keys().find(|key| schema.get(key).is_none()) {
            return Err(TfeError::invalid_attribute(
                unknown,
                "an argument with this name is not expected here",
            ));
        }

        let mut attributes = BTreeMap::new();
        for (name, attribute) in schema.attributes() {
            let raw = match object.get(name) {
                Some(Value::Null) | None if attribute.required => {
                    return Err(TfeError::invalid_attribute(
                        name,
                        "the argument is required, but no definition was found",
                    ));
                }
                Some(Value::Null) | None => continue,
                Some(raw) => raw,
            };

            let value = match attribute.ty {
                AttributeType::String => {
                    let s = raw.as_str().ok_or_else(|| {
                        TfeError::invalid_attribute(
                            name,
                            format!("expected {}, got {}", attribute.ty.describe(), json_kind(raw)),
                        )
                    })?;
                    AttributeValue::String(s.to_string())
                }
                AttributeType::StringSet => {
                    let items = raw.as_array().ok_or_else(|| {
                        TfeError::invalid_attribute(
                            name,
                            format!("expected {}, got {}", attribute.ty.describe(), json_kind(raw)),
                        )
                    })?;
                    let set = items
                        .iter()
                        .enumerate()
                        .map(|(index, item)| {
                            item.as_str().map(str::to_string).ok_or_else(|| {
                                TfeError::invalid_attribute(
                                    name,
                                    format!("element {index}: expected string, got {}", json_kind(item)),
                                )
                            })
                        })
                        .collect::<Result<BTreeSet<String>>>()?;
                    AttributeValue::StringSet(set)
                }
            };
            attributes.insert(name.to_string(), value);
        }

        Ok(Self {
            id: String::new(),
            attributes,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Signal that the remote object is gone.
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    /// `Some(self)` while the resource exists, `None` once its ID is cleared.
    pub fn into_state(self) -> Option<Self> {
        self.has_id().then_some(self)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    pub fn get_string(&self, name: &str) -> Result<&str> {
        match self.attribute(name) {
            Some(AttributeValue::String(s)) => Ok(s),
            Some(AttributeValue::StringSet(_)) => {
                Err(TfeError::invalid_attribute(name, "expected string, got set"))
            }
            None => Err(TfeError::invalid_attribute(name, "value is not set")),
        }
    }

    /// The set stored under `name`; an unset attribute reads as empty.
    pub fn get_string_set(&self, name: &str) -> Result<BTreeSet<String>> {
        match self.attribute(name) {
            Some(AttributeValue::StringSet(set)) => Ok(set.clone()),
            Some(AttributeValue::String(_)) => Err(TfeError::invalid_attribute(
                name,
                "expected set of string, got string",
            )),
            None => Ok(BTreeSet::new()),
        }
    }

    pub fn set_string(&mut self, name: &str, value: impl Into<String>) {
        self.attributes
            .insert(name.to_string(), AttributeValue::String(value.into()));
    }

    pub fn set_string_set<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = values.into_iter().map(Into::into).collect();
        self.attributes
            .insert(name.to_string(), AttributeValue::StringSet(set));
    }
}

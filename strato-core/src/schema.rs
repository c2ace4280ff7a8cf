//! Schema - Type schemas for resource attributes
//!
//! Providers define a schema per resource type, enabling attribute
//! validation before any remote call is issued. The schema also records
//! which attributes are computed (remote-assigned, read-only) and which
//! are force-new (any change requires destroy-and-recreate, enforced by
//! the framework rather than the lifecycle handler).

use std::collections::HashMap;
use std::fmt;

use crate::resource::Value;

/// Attribute type
#[derive(Debug, Clone)]
pub enum AttributeType {
    /// String
    String,
    /// Integer
    Int,
    /// Boolean
    Bool,
    /// Enum (list of allowed values)
    Enum(Vec<String>),
    /// Custom type (with validation function)
    Custom {
        name: String,
        base: Box<AttributeType>,
        validate: fn(&Value) -> Result<(), String>,
    },
    /// List
    List(Box<AttributeType>),
    /// Map
    Map(Box<AttributeType>),
}

impl AttributeType {
    /// Check if a value conforms to this type
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            (AttributeType::String, Value::String(_)) => Ok(()),
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),

            (AttributeType::Enum(variants), Value::String(s)) => {
                if variants.iter().any(|v| v == s) {
                    Ok(())
                } else {
                    Err(TypeError::InvalidEnumVariant {
                        value: s.clone(),
                        expected: variants.clone(),
                    })
                }
            }

            (AttributeType::Custom { validate, .. }, v) => {
                validate(v).map_err(|msg| TypeError::ValidationFailed { message: msg })
            }

            (AttributeType::List(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.validate(item).map_err(|e| TypeError::ListItemError {
                        index: i,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Map(inner), Value::Map(map)) => {
                for (k, v) in map {
                    inner.validate(v).map_err(|e| TypeError::MapValueError {
                        key: k.clone(),
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name(),
            }),
        }
    }

    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::Enum(variants) => format!("Enum({})", variants.join(" | ")),
            AttributeType::Custom { name, .. } => name.clone(),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Map(inner) => format!("Map<{}>", inner.type_name()),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Type error
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Invalid enum variant '{value}', expected one of: {}", expected.join(", "))]
    InvalidEnumVariant {
        value: String,
        expected: Vec<String>,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("Attribute '{name}' is computed and cannot be configured")]
    ComputedAttribute { name: String },

    #[error("List item at index {index}: {inner}")]
    ListItemError { index: usize, inner: Box<TypeError> },

    #[error("Map value for key '{key}': {inner}")]
    MapValueError { key: String, inner: Box<TypeError> },
}

impl Value {
    fn type_name(&self) -> String {
        match self {
            Value::String(_) => "String".to_string(),
            Value::Int(_) => "Int".to_string(),
            Value::Bool(_) => "Bool".to_string(),
            Value::List(_) => "List".to_string(),
            Value::Map(_) => "Map".to_string(),
        }
    }
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    /// Remote-assigned, read-only attribute populated by Read
    pub computed: bool,
    /// Changing this attribute requires destroy-and-recreate
    pub force_new: bool,
    pub default: Option<Value>,
    pub description: Option<String>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            computed: false,
            force_new: false,
            default: None,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

/// Resource schema
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub resource_type: String,
    pub attributes: HashMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: HashMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Validate configured resource attributes
    pub fn validate(&self, attributes: &HashMap<String, Value>) -> Result<(), Vec<TypeError>> {
        let mut errors = Vec::new();

        // Check required attributes
        for (name, schema) in &self.attributes {
            if schema.required && !attributes.contains_key(name) && schema.default.is_none() {
                errors.push(TypeError::MissingRequired { name: name.clone() });
            }
        }

        // Type check each attribute; computed attributes are remote-owned
        for (name, value) in attributes {
            if let Some(schema) = self.attributes.get(name) {
                if schema.computed {
                    errors.push(TypeError::ComputedAttribute { name: name.clone() });
                    continue;
                }
                if let Err(e) = schema.attr_type.validate(value) {
                    errors.push(e);
                }
            }
            // Unknown attributes are allowed (for flexibility)
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Names of force-new attributes whose value differs between the two
    /// snapshots. A non-empty answer means the framework must destroy and
    /// recreate instead of updating in place.
    pub fn force_new_changes(
        &self,
        old: &HashMap<String, Value>,
        new: &HashMap<String, Value>,
    ) -> Vec<String> {
        let mut changed: Vec<String> = self
            .attributes
            .values()
            .filter(|schema| schema.force_new)
            .filter(|schema| {
                let before = old.get(&schema.name);
                let after = new.get(&schema.name);
                match (before, after) {
                    (Some(a), Some(b)) => a != b,
                    (None, None) => false,
                    // Only a newly configured value forces recreation;
                    // an attribute the user never set stays remote-owned.
                    (None, Some(_)) => true,
                    (Some(_), None) => false,
                }
            })
            .map(|schema| schema.name.clone())
            .collect();
        changed.sort();
        changed
    }
}

/// Helper functions for common types
pub mod types {
    use super::*;

    /// Non-empty string type
    pub fn non_empty_string() -> AttributeType {
        AttributeType::Custom {
            name: "NonEmptyString".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| {
                if let Value::String(s) = value {
                    if s.is_empty() {
                        Err("Value must not be empty".to_string())
                    } else {
                        Ok(())
                    }
                } else {
                    Err("Expected string".to_string())
                }
            },
        }
    }

    /// Map of string tag keys to string tag values
    pub fn tag_map() -> AttributeType {
        AttributeType::Map(Box::new(AttributeType::String))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_string_type() {
        let t = AttributeType::String;
        assert!(t.validate(&Value::String("hello".to_string())).is_ok());
        assert!(t.validate(&Value::Int(42)).is_err());
    }

    #[test]
    fn validate_non_empty_string() {
        let t = types::non_empty_string();
        assert!(t.validate(&Value::String("tgw-123".to_string())).is_ok());
        assert!(t.validate(&Value::String(String::new())).is_err());
        assert!(t.validate(&Value::Int(1)).is_err());
    }

    #[test]
    fn validate_tag_map() {
        let t = types::tag_map();
        let mut tags = HashMap::new();
        tags.insert("env".to_string(), Value::String("prod".to_string()));
        assert!(t.validate(&Value::Map(tags)).is_ok());

        let mut bad = HashMap::new();
        bad.insert("count".to_string(), Value::Int(3));
        assert!(t.validate(&Value::Map(bad)).is_err());
    }

    #[test]
    fn missing_required_attribute() {
        let schema = ResourceSchema::new("ec2_transit_gateway_route_table").attribute(
            AttributeSchema::new("transit_gateway_id", types::non_empty_string()).required(),
        );

        let attrs = HashMap::new();
        assert!(schema.validate(&attrs).is_err());
    }

    #[test]
    fn computed_attribute_rejected_in_config() {
        let schema = ResourceSchema::new("ec2_transit_gateway_route_table")
            .attribute(AttributeSchema::new("arn", AttributeType::String).computed());

        let mut attrs = HashMap::new();
        attrs.insert("arn".to_string(), Value::String("arn:aws:...".to_string()));
        let errors = schema.validate(&attrs).unwrap_err();
        assert!(matches!(errors[0], TypeError::ComputedAttribute { .. }));
    }

    #[test]
    fn force_new_change_detected() {
        let schema = ResourceSchema::new("ec2_transit_gateway_route_table")
            .attribute(
                AttributeSchema::new("transit_gateway_id", types::non_empty_string())
                    .required()
                    .force_new(),
            )
            .attribute(AttributeSchema::new("tags", types::tag_map()));

        let mut old = HashMap::new();
        old.insert(
            "transit_gateway_id".to_string(),
            Value::String("tgw-123".to_string()),
        );
        let mut new = old.clone();
        assert!(schema.force_new_changes(&old, &new).is_empty());

        new.insert(
            "transit_gateway_id".to_string(),
            Value::String("tgw-456".to_string()),
        );
        assert_eq!(
            schema.force_new_changes(&old, &new),
            vec!["transit_gateway_id".to_string()]
        );
    }
}

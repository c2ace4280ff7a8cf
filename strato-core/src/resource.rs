//! Resource - Representing resources and their state

use std::collections::HashMap;

/// Unique identifier for a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    /// Resource type (e.g., "ec2_transit_gateway_route_table")
    pub resource_type: String,
    /// Logical resource name chosen by the user
    pub name: String,
}

impl ResourceId {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }
}

/// Attribute value of a resource
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
}

impl Value {
    /// Borrow the inner string, if this value is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

/// Desired state of a resource, supplied by the orchestration framework
/// on each call. Handlers hold no state of their own between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: ResourceId,
    pub attributes: HashMap<String, Value>,
}

impl Resource {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ResourceId::new(resource_type, name),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

/// Remote state observed from actual infrastructure.
///
/// Absence is an explicit, successful outcome: `State::not_found` carries
/// `exists == false` and a cleared identifier so the caller drops the
/// resource from its records instead of treating the miss as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub id: ResourceId,
    /// Remote-assigned identifier (e.g., tgw-rtb-xxx). `None` until the
    /// resource has been created; never changes once set.
    pub identifier: Option<String>,
    pub attributes: HashMap<String, Value>,
    /// Whether the remote resource exists
    pub exists: bool,
}

impl State {
    pub fn not_found(id: ResourceId) -> Self {
        Self {
            id,
            identifier: None,
            attributes: HashMap::new(),
            exists: false,
        }
    }

    pub fn existing(id: ResourceId, attributes: HashMap<String, Value>) -> Self {
        Self {
            id,
            identifier: None,
            attributes,
            exists: true,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_state_has_cleared_identifier() {
        let state = State::not_found(ResourceId::new("ec2_transit_gateway_route_table", "main"));
        assert!(!state.exists);
        assert_eq!(state.identifier, None);
        assert!(state.attributes.is_empty());
    }

    #[test]
    fn existing_state_keeps_identifier() {
        let id = ResourceId::new("ec2_transit_gateway_route_table", "main");
        let state = State::existing(id, HashMap::new()).with_identifier("tgw-rtb-abc");
        assert!(state.exists);
        assert_eq!(state.identifier.as_deref(), Some("tgw-rtb-abc"));
    }
}

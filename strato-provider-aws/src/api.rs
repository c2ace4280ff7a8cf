//! Remote API seam for transit gateway route tables
//!
//! The lifecycle handler never talks to the SDK directly; it goes through
//! this trait so the remote side can be swapped for an in-memory fake in
//! tests. The real implementation lives in [`crate::client`].

use async_trait::async_trait;

use crate::tags::TagMap;

/// Remote lifecycle state of a route table, as reported by EC2.
///
/// The handler only observes these transitions; it requests them by
/// issuing create/delete calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTableState {
    Pending,
    Available,
    Deleting,
    Deleted,
    Other(String),
}

impl RouteTableState {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "pending" => Self::Pending,
            "available" => Self::Available,
            "deleting" => Self::Deleting,
            "deleted" => Self::Deleted,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Available => "available",
            Self::Deleting => "deleting",
            Self::Deleted => "deleted",
            Self::Other(s) => s,
        }
    }

    /// Deleting and deleted resources read as absent
    pub fn is_gone(&self) -> bool {
        matches!(self, Self::Deleting | Self::Deleted)
    }
}

/// Remote descriptor of a transit gateway route table
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTableDescription {
    pub route_table_id: String,
    pub transit_gateway_id: String,
    pub state: RouteTableState,
    pub default_association_route_table: bool,
    pub default_propagation_route_table: bool,
    pub tags: TagMap,
}

/// Error from the remote API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("resource {0} not found")]
    NotFound(String),

    #[error("{context}: {message}")]
    Remote { context: String, message: String },
}

impl ApiError {
    pub fn remote(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            context: context.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Remote operations on transit gateway route tables
#[async_trait]
pub trait TransitGatewayApi: Send + Sync {
    /// Create a route table under the given transit gateway, tagged with
    /// the initial tag map. Returns the remote descriptor, including the
    /// remote-assigned identifier.
    async fn create_route_table(
        &self,
        transit_gateway_id: &str,
        tags: &TagMap,
    ) -> ApiResult<RouteTableDescription>;

    /// Fetch the descriptor for a route table. `Ok(None)` means the
    /// remote side reports it as not found.
    async fn describe_route_table(
        &self,
        route_table_id: &str,
    ) -> ApiResult<Option<RouteTableDescription>>;

    /// Request deletion. An already-absent table surfaces as
    /// `ApiError::NotFound`.
    async fn delete_route_table(&self, route_table_id: &str) -> ApiResult<()>;

    /// Create or overwrite tags on a resource
    async fn create_tags(&self, resource_id: &str, tags: &TagMap) -> ApiResult<()>;

    /// Remove tags from a resource by key
    async fn delete_tags(&self, resource_id: &str, keys: &[String]) -> ApiResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_round_trips_wire_values() {
        for wire in ["pending", "available", "deleting", "deleted"] {
            assert_eq!(RouteTableState::from_wire(wire).as_str(), wire);
        }
        let other = RouteTableState::from_wire("failing");
        assert_eq!(other, RouteTableState::Other("failing".to_string()));
    }

    #[test]
    fn gone_states() {
        assert!(RouteTableState::Deleting.is_gone());
        assert!(RouteTableState::Deleted.is_gone());
        assert!(!RouteTableState::Pending.is_gone());
        assert!(!RouteTableState::Available.is_gone());
    }
}

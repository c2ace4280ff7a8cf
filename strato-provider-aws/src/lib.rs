//! Strato AWS Provider
//!
//! AWS EC2 provider implementing the transit gateway route table resource
//! lifecycle.
//!
//! ## Module Structure
//!
//! - `api` - Remote API trait and domain types
//! - `client` - aws-sdk-ec2 backed API implementation
//! - `provider` - AwsProvider and the CRUD lifecycle handlers
//! - `schemas` - Resource schemas
//! - `tags` - Tag map conversion, diffing, and filtering
//! - `arn` - Amazon Resource Name construction

pub mod api;
pub mod arn;
pub mod client;
pub mod provider;
pub mod schemas;
pub mod tags;

// Re-export main types
pub use api::{ApiError, RouteTableDescription, RouteTableState, TransitGatewayApi};
pub use client::Ec2TransitGatewayClient;
pub use provider::{AwsProvider, ProviderConfig};

use strato_core::provider::{
    BoxFuture, Provider, ProviderResult, ResourceType,
};
use strato_core::resource::{Resource, ResourceId, State};
use strato_core::schema::ResourceSchema;

/// Transit Gateway Route Table resource type
pub struct TransitGatewayRouteTableType;

impl ResourceType for TransitGatewayRouteTableType {
    fn name(&self) -> &'static str {
        "ec2_transit_gateway_route_table"
    }

    fn schema(&self) -> ResourceSchema {
        schemas::ec2::transit_gateway_route_table_schema()
    }
}

// =============================================================================
// Provider Trait Implementation
// =============================================================================

impl<A: TransitGatewayApi> Provider for AwsProvider<A> {
    fn name(&self) -> &'static str {
        "aws"
    }

    fn resource_types(&self) -> Vec<Box<dyn ResourceType>> {
        vec![Box::new(TransitGatewayRouteTableType)]
    }

    fn read(
        &self,
        id: &ResourceId,
        identifier: Option<&str>,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.map(|s| s.to_string());
        Box::pin(async move {
            self.read_transit_gateway_route_table(&id, identifier.as_deref())
                .await
        })
    }

    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        Box::pin(async move { self.create_transit_gateway_route_table(&resource).await })
    }

    fn update(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
        to: &Resource,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        let from = from.clone();
        let to = to.clone();
        Box::pin(async move {
            self.update_transit_gateway_route_table(&id, &identifier, &from, &to)
                .await
        })
    }

    fn delete(&self, id: &ResourceId, identifier: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        Box::pin(async move {
            self.delete_transit_gateway_route_table(&id, &identifier)
                .await
        })
    }
}

//! Transit gateway route table lifecycle operations
//!
//! The four CRUD handlers translate between the declarative attribute set
//! and the EC2 API: build a request, issue it, wait for the status
//! transition, reconcile remote state back into attributes. Each call is
//! stateless; the framework supplies the snapshot and persists the result.

use std::collections::HashMap;

use tracing::{debug, warn};

use strato_core::provider::{ProviderError, ProviderResult};
use strato_core::resource::{Resource, ResourceId, State, Value};
use strato_core::wait::{Poll, WaitConfig, WaitError, wait_until};

use crate::api::{RouteTableState, TransitGatewayApi};
use crate::arn::Arn;
use crate::client::Ec2TransitGatewayClient;
use crate::tags;

/// Explicit provider configuration, passed in rather than reached through
/// ambient globals. Partition and account feed the derived ARN; ignored
/// tag keys are dropped during reconciliation.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub region: String,
    pub partition: String,
    pub account_id: String,
    pub ignore_tag_keys: Vec<String>,
    pub wait: WaitConfig,
}

impl ProviderConfig {
    pub fn new(region: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            partition: "aws".to_string(),
            account_id: account_id.into(),
            ignore_tag_keys: Vec::new(),
            wait: WaitConfig::default(),
        }
    }

    pub fn with_partition(mut self, partition: impl Into<String>) -> Self {
        self.partition = partition.into();
        self
    }

    pub fn with_ignore_tag_keys(mut self, keys: Vec<String>) -> Self {
        self.ignore_tag_keys = keys;
        self
    }

    pub fn with_wait(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }
}

/// AWS Provider for transit gateway route tables
///
/// Generic over the remote API so tests can inject an in-memory fake;
/// production code uses the default EC2-backed client.
pub struct AwsProvider<A = Ec2TransitGatewayClient> {
    api: A,
    config: ProviderConfig,
}

impl AwsProvider<Ec2TransitGatewayClient> {
    /// Build a provider backed by the real EC2 client
    pub async fn new(config: ProviderConfig) -> Self {
        let api = Ec2TransitGatewayClient::new(&config.region).await;
        Self { api, config }
    }
}

impl<A: TransitGatewayApi> AwsProvider<A> {
    /// Build a provider with an explicit API handle (for testing)
    pub fn with_api(api: A, config: ProviderConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Create a route table under the configured transit gateway, then
    /// block until EC2 reports it available. A wait failure still carries
    /// the remote-assigned identifier so the next read can reconcile.
    pub async fn create_transit_gateway_route_table(
        &self,
        resource: &Resource,
    ) -> ProviderResult<State> {
        let transit_gateway_id = match resource.attributes.get("transit_gateway_id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => {
                return Err(ProviderError::new("transit_gateway_id is required")
                    .for_resource(resource.id.clone()));
            }
        };

        let initial_tags = tags::from_value(resource.attributes.get("tags"));

        debug!(%transit_gateway_id, "creating transit gateway route table");
        let created = self
            .api
            .create_route_table(&transit_gateway_id, &initial_tags)
            .await
            .map_err(|e| {
                ProviderError::new(format!(
                    "Failed to create transit gateway route table: {}",
                    e
                ))
                .for_resource(resource.id.clone())
            })?;

        let route_table_id = created.route_table_id;

        if let Err(e) = self.wait_for_available(&route_table_id).await {
            return Err(ProviderError::new(format!(
                "Failed waiting for transit gateway route table ({}) availability: {}",
                route_table_id, e
            ))
            .for_resource(resource.id.clone())
            .with_identifier(route_table_id));
        }

        self.read_transit_gateway_route_table(&resource.id, Some(&route_table_id))
            .await
    }

    /// Refresh remote state. Absence (no identifier, not found, or a
    /// deleting/deleted remote state) reads as `State::not_found` with a
    /// cleared identifier, never as an error.
    pub async fn read_transit_gateway_route_table(
        &self,
        id: &ResourceId,
        identifier: Option<&str>,
    ) -> ProviderResult<State> {
        let identifier = match identifier {
            Some(s) if !s.is_empty() => s,
            _ => return Ok(State::not_found(id.clone())),
        };

        let description = match self.api.describe_route_table(identifier).await {
            Ok(d) => d,
            Err(e) if e.is_not_found() => None,
            Err(e) => {
                return Err(ProviderError::new(format!(
                    "Failed to read transit gateway route table: {}",
                    e
                ))
                .for_resource(id.clone()));
            }
        };

        let description = match description {
            Some(d) => d,
            None => {
                warn!(identifier, "transit gateway route table not found, removing from state");
                return Ok(State::not_found(id.clone()));
            }
        };

        if description.state.is_gone() {
            warn!(
                identifier,
                state = description.state.as_str(),
                "transit gateway route table in deleted state, removing from state"
            );
            return Ok(State::not_found(id.clone()));
        }

        let mut attributes = HashMap::new();
        attributes.insert(
            "transit_gateway_id".to_string(),
            Value::String(description.transit_gateway_id.clone()),
        );
        attributes.insert(
            "default_association_route_table".to_string(),
            Value::Bool(description.default_association_route_table),
        );
        attributes.insert(
            "default_propagation_route_table".to_string(),
            Value::Bool(description.default_propagation_route_table),
        );
        attributes.insert(
            "tags".to_string(),
            tags::to_value(&tags::filtered(
                &description.tags,
                &self.config.ignore_tag_keys,
            )),
        );

        let arn = Arn::transit_gateway_route_table(
            &self.config.partition,
            &self.config.region,
            &self.config.account_id,
            identifier,
        );
        attributes.insert("arn".to_string(), Value::String(arn.to_string()));

        Ok(State::existing(id.clone(), attributes).with_identifier(identifier))
    }

    /// Apply the tag diff between the last observed and the desired
    /// snapshots. Tags are the only mutable attribute; an empty diff
    /// issues no remote call at all.
    pub async fn update_transit_gateway_route_table(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
        to: &Resource,
    ) -> ProviderResult<State> {
        let old_tags = tags::from_value(from.attributes.get("tags"));
        let new_tags = tags::from_value(to.attributes.get("tags"));

        let diff = tags::diff(&old_tags, &new_tags);
        if diff.is_empty() {
            return Ok(from.clone());
        }

        if !diff.remove.is_empty() {
            self.api
                .delete_tags(identifier, &diff.remove)
                .await
                .map_err(|e| {
                    ProviderError::new(format!(
                        "Failed to update transit gateway route table ({}) tags: {}",
                        identifier, e
                    ))
                    .for_resource(id.clone())
                })?;
        }

        if !diff.create.is_empty() {
            self.api
                .create_tags(identifier, &diff.create)
                .await
                .map_err(|e| {
                    ProviderError::new(format!(
                        "Failed to update transit gateway route table ({}) tags: {}",
                        identifier, e
                    ))
                    .for_resource(id.clone())
                })?;
        }

        self.read_transit_gateway_route_table(id, Some(identifier))
            .await
    }

    /// Request deletion and block until the remote side confirms absence.
    /// Deleting an already-absent table succeeds.
    pub async fn delete_transit_gateway_route_table(
        &self,
        id: &ResourceId,
        identifier: &str,
    ) -> ProviderResult<()> {
        debug!(identifier, "deleting transit gateway route table");
        match self.api.delete_route_table(identifier).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => return Ok(()),
            Err(e) => {
                return Err(ProviderError::new(format!(
                    "Failed to delete transit gateway route table: {}",
                    e
                ))
                .for_resource(id.clone()));
            }
        }

        self.wait_for_deleted(identifier).await.map_err(|e| {
            ProviderError::new(format!(
                "Failed waiting for transit gateway route table ({}) deletion: {}",
                identifier, e
            ))
            .for_resource(id.clone())
        })?;

        Ok(())
    }

    async fn wait_for_available(&self, route_table_id: &str) -> Result<(), WaitError> {
        let api = &self.api;
        wait_until(&self.config.wait, move || async move {
            let description = api.describe_route_table(route_table_id).await.map_err(|e| {
                ProviderError::new(format!(
                    "Failed to describe transit gateway route table: {}",
                    e
                ))
            })?;

            Ok(match description {
                Some(d) if d.state == RouteTableState::Available => Poll::Ready(()),
                _ => Poll::Pending,
            })
        })
        .await
    }

    async fn wait_for_deleted(&self, route_table_id: &str) -> Result<(), WaitError> {
        let api = &self.api;
        wait_until(&self.config.wait, move || async move {
            let description = api.describe_route_table(route_table_id).await.map_err(|e| {
                ProviderError::new(format!(
                    "Failed to describe transit gateway route table: {}",
                    e
                ))
            })?;

            Ok(match description {
                None => Poll::Ready(()),
                Some(d) if d.state == RouteTableState::Deleted => Poll::Ready(()),
                Some(_) => Poll::Pending,
            })
        })
        .await
    }
}

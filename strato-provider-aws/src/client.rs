//! aws-sdk-ec2 backed implementation of the transit gateway API
//!
//! Translates between the SDK's request/response shapes and the domain
//! types in [`crate::api`], and classifies the EC2 not-found error code
//! so callers can treat absence as a non-error.

use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_ec2::Client as Ec2Client;
use aws_sdk_ec2::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_ec2::types::{
    ResourceType, Tag, TagSpecification, TransitGatewayRouteTable,
};

use crate::api::{ApiError, ApiResult, RouteTableDescription, RouteTableState, TransitGatewayApi};
use crate::tags::TagMap;

/// Error code EC2 returns for lookups of unknown route table ids
const NOT_FOUND_CODE: &str = "InvalidRouteTableID.NotFound";

/// EC2-backed remote API client
pub struct Ec2TransitGatewayClient {
    client: Ec2Client,
}

impl Ec2TransitGatewayClient {
    /// Load shared AWS configuration for the region and build a client
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self {
            client: Ec2Client::new(&config),
        }
    }

    /// Wrap an already-configured SDK client
    pub fn from_client(client: Ec2Client) -> Self {
        Self { client }
    }
}

fn is_not_found<E, R>(err: &SdkError<E, R>) -> bool
where
    E: ProvideErrorMetadata,
{
    err.as_service_error()
        .and_then(|e| e.code())
        .is_some_and(|code| code == NOT_FOUND_CODE)
}

fn to_sdk_tags(tags: &TagMap) -> Vec<Tag> {
    tags.iter()
        .map(|(k, v)| Tag::builder().key(k).value(v).build())
        .collect()
}

fn from_sdk_tags(tags: &[Tag]) -> TagMap {
    tags.iter()
        .filter_map(|t| match (t.key(), t.value()) {
            (Some(k), Some(v)) => Some((k.to_string(), v.to_string())),
            _ => None,
        })
        .collect()
}

fn to_description(rt: &TransitGatewayRouteTable) -> RouteTableDescription {
    RouteTableDescription {
        route_table_id: rt.transit_gateway_route_table_id().unwrap_or_default().to_string(),
        transit_gateway_id: rt.transit_gateway_id().unwrap_or_default().to_string(),
        state: rt
            .state()
            .map(|s| RouteTableState::from_wire(s.as_str()))
            .unwrap_or(RouteTableState::Other(String::new())),
        default_association_route_table: rt.default_association_route_table().unwrap_or(false),
        default_propagation_route_table: rt.default_propagation_route_table().unwrap_or(false),
        tags: from_sdk_tags(rt.tags()),
    }
}

#[async_trait]
impl TransitGatewayApi for Ec2TransitGatewayClient {
    async fn create_route_table(
        &self,
        transit_gateway_id: &str,
        tags: &TagMap,
    ) -> ApiResult<RouteTableDescription> {
        let mut req = self
            .client
            .create_transit_gateway_route_table()
            .transit_gateway_id(transit_gateway_id);

        if !tags.is_empty() {
            req = req.tag_specifications(
                TagSpecification::builder()
                    .resource_type(ResourceType::TransitGatewayRouteTable)
                    .set_tags(Some(to_sdk_tags(tags)))
                    .build(),
            );
        }

        let output = req.send().await.map_err(|e| {
            ApiError::remote("CreateTransitGatewayRouteTable", format!("{:?}", e))
        })?;

        let rt = output.transit_gateway_route_table().ok_or_else(|| {
            ApiError::remote(
                "CreateTransitGatewayRouteTable",
                "no route table in response",
            )
        })?;

        Ok(to_description(rt))
    }

    async fn describe_route_table(
        &self,
        route_table_id: &str,
    ) -> ApiResult<Option<RouteTableDescription>> {
        let result = self
            .client
            .describe_transit_gateway_route_tables()
            .transit_gateway_route_table_ids(route_table_id)
            .send()
            .await;

        match result {
            Ok(output) => Ok(output
                .transit_gateway_route_tables()
                .first()
                .map(to_description)),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(ApiError::remote(
                "DescribeTransitGatewayRouteTables",
                format!("{:?}", e),
            )),
        }
    }

    async fn delete_route_table(&self, route_table_id: &str) -> ApiResult<()> {
        let result = self
            .client
            .delete_transit_gateway_route_table()
            .transit_gateway_route_table_id(route_table_id)
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_not_found(&e) => Err(ApiError::NotFound(route_table_id.to_string())),
            Err(e) => Err(ApiError::remote(
                "DeleteTransitGatewayRouteTable",
                format!("{:?}", e),
            )),
        }
    }

    async fn create_tags(&self, resource_id: &str, tags: &TagMap) -> ApiResult<()> {
        self.client
            .create_tags()
            .resources(resource_id)
            .set_tags(Some(to_sdk_tags(tags)))
            .send()
            .await
            .map_err(|e| ApiError::remote("CreateTags", format!("{:?}", e)))?;

        Ok(())
    }

    async fn delete_tags(&self, resource_id: &str, keys: &[String]) -> ApiResult<()> {
        let mut req = self.client.delete_tags().resources(resource_id);
        for key in keys {
            // Key-only tags delete the key regardless of its value
            req = req.tags(Tag::builder().key(key).build());
        }

        req.send()
            .await
            .map_err(|e| ApiError::remote("DeleteTags", format!("{:?}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ec2::types::TransitGatewayRouteTableState;

    #[test]
    fn converts_sdk_route_table_to_description() {
        let rt = TransitGatewayRouteTable::builder()
            .transit_gateway_route_table_id("tgw-rtb-abc")
            .transit_gateway_id("tgw-123")
            .state(TransitGatewayRouteTableState::Available)
            .default_association_route_table(false)
            .default_propagation_route_table(true)
            .tags(Tag::builder().key("env").value("prod").build())
            .build();

        let desc = to_description(&rt);
        assert_eq!(desc.route_table_id, "tgw-rtb-abc");
        assert_eq!(desc.transit_gateway_id, "tgw-123");
        assert_eq!(desc.state, RouteTableState::Available);
        assert!(!desc.default_association_route_table);
        assert!(desc.default_propagation_route_table);
        assert_eq!(desc.tags.get("env").map(String::as_str), Some("prod"));
    }

    #[test]
    fn sdk_tag_round_trip() {
        let mut tags = TagMap::new();
        tags.insert("env".to_string(), "prod".to_string());
        let sdk = to_sdk_tags(&tags);
        assert_eq!(from_sdk_tags(&sdk), tags);
    }
}

//! EC2 resource schema definitions

use strato_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Returns the schema for Transit Gateway Route Table
///
/// The owning transit gateway is fixed at creation; changing it forces
/// destroy-and-recreate. The ARN and the two default-route-table flags
/// are remote-computed and only populated by Read.
pub fn transit_gateway_route_table_schema() -> ResourceSchema {
    ResourceSchema::new("ec2_transit_gateway_route_table")
        .with_description("An EC2 Transit Gateway Route Table")
        .attribute(
            AttributeSchema::new("transit_gateway_id", types::non_empty_string())
                .required()
                .force_new()
                .with_description("Identifier of the transit gateway this route table belongs to"),
        )
        .attribute(
            AttributeSchema::new("tags", types::tag_map())
                .with_description("Key/value tags attached to the route table"),
        )
        .attribute(
            AttributeSchema::new("arn", AttributeType::String)
                .computed()
                .with_description("Amazon Resource Name of the route table"),
        )
        .attribute(
            AttributeSchema::new("default_association_route_table", AttributeType::Bool)
                .computed()
                .with_description("Whether this is the default association route table"),
        )
        .attribute(
            AttributeSchema::new("default_propagation_route_table", AttributeType::Bool)
                .computed()
                .with_description("Whether this is the default propagation route table"),
        )
}

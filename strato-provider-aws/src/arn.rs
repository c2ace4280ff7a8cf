//! ARN construction
//!
//! Amazon Resource Names encode partition/service/region/account/resource
//! into a globally unique locator string. Route tables never return their
//! ARN from the API, so Read derives it from the provider configuration.

use std::fmt;

/// Components of an Amazon Resource Name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    pub resource: String,
}

impl Arn {
    /// ARN of an EC2 transit gateway route table
    pub fn transit_gateway_route_table(
        partition: &str,
        region: &str,
        account_id: &str,
        route_table_id: &str,
    ) -> Self {
        Self {
            partition: partition.to_string(),
            service: "ec2".to_string(),
            region: region.to_string(),
            account_id: account_id.to_string(),
            resource: format!("transit-gateway-route-table/{}", route_table_id),
        }
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account_id, self.resource
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_route_table_arn() {
        let arn =
            Arn::transit_gateway_route_table("aws", "us-east-1", "123456789012", "tgw-rtb-abc");
        assert_eq!(
            arn.to_string(),
            "arn:aws:ec2:us-east-1:123456789012:transit-gateway-route-table/tgw-rtb-abc"
        );
    }

    #[test]
    fn formats_partitioned_arn() {
        let arn =
            Arn::transit_gateway_route_table("aws-cn", "cn-north-1", "000000000000", "tgw-rtb-1");
        assert!(arn.to_string().starts_with("arn:aws-cn:ec2:cn-north-1:"));
    }
}

//! Resource schemas for the AWS provider

pub mod ec2;

//! Strato Core
//!
//! Provider-agnostic kernel for an infrastructure lifecycle tool: the
//! resource/state model, the `Provider` trait that lifecycle handlers
//! implement, attribute schemas with validation, and a generic
//! poll-until-condition waiter.

pub mod provider;
pub mod resource;
pub mod schema;
pub mod wait;

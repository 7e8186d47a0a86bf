//! Data Transfer Objects for the management API
//!
//! Request bodies and small response envelopes that have no lasting
//! meaning outside a single call.

pub mod pipeline;
pub mod resource;
pub mod run;

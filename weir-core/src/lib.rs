//! Weir Core
//!
//! Core types for the Weir data-factory provisioning tool.
//!
//! This crate contains:
//! - Domain types: remote resources as the management API returns them
//!   (resource groups, factories, linked services, datasets, pipelines, runs)
//! - DTOs: request bodies sent to the management API
//!
//! Nothing in here performs I/O; the client crate owns transport and the CLI owns
//! orchestration.

pub mod domain;
pub mod dto;

//! Core domain types
//!
//! This module contains the resource shapes exchanged with the management API.
//! Tracked resources (resource groups, factories) carry a location and tags;
//! factory sub-resources (linked services, datasets, pipelines) are wrapped in
//! a generic envelope around their typed properties.

pub mod dataset;
pub mod factory;
pub mod linked_service;
pub mod pipeline;
pub mod resource;
pub mod run;
pub mod secret;

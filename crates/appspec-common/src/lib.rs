//! # appspec-common
//!
//! Shared types, error definitions, configuration models, and constants
//! used across the appspec workspace.
//!
//! This crate is the leaf of the dependency graph. It holds both the
//! shorthand application model read from user files and the native
//! Kubernetes-shaped container model produced by population.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

//! vpcflow Cloud Template Synthesis
//!
//! This crate turns a validated [`vpcflow_core::Topology`] into a
//! CloudFormation-shaped template that a provisioning engine can apply.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  vpcflow CLI                     │
//! │              (vpcflow synth / list)              │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                vpcflow-cloud                     │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │   synthesize(&Topology) -> Manifest      │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │ Logical IDs  │  │ JSON / YAML  │            │
//! │  └──────────────┘  └──────────────┘            │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Resource reconciliation against a live account is left to the engine
//! that consumes the template.

pub mod error;
pub mod manifest;
pub mod synth;

// Re-exports
pub use error::{CloudError, Result};
pub use manifest::{
    Manifest, OutputFormat, ResourceConfig, TEMPLATE_FORMAT_VERSION, template_file_name,
};
pub use synth::{ManifestOptions, logical_id, synthesize};

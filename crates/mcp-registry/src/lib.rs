//! The process-wide registry of tools, resources, and prompts (spec.md
//! §4.3): explicit registration, attribute-driven discovery, and
//! insertion-ordered snapshot reads.

#![warn(missing_debug_implementations, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod annotated;
mod discover;
mod error;
mod registry;

pub use annotated::{AnnotatedPrompt, AnnotatedResource, AnnotatedTool};
pub use discover::{discover_components, register_attribute_component, Candidate, DiscoveryReport};
pub use error::RegistryError;
pub use registry::Registry;

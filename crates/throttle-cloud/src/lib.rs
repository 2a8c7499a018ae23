//! Throttle Head cloud declarations
//!
//! This crate models what gets handed to the external provisioning engine:
//! typed AWS resource properties, references between resource outputs,
//! secret values, and the serialized [`Declaration`] itself.
//!
//! Nothing here talks to a cloud API. The engine reads the declaration,
//! resolves every [`OutputRef`] through its own dependency graph and
//! performs the actual create/update/delete calls.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            throttle-core (resolver)           │
//! │     StackConfig ──► ResourceSet (typed)       │
//! └─────────────────────┬────────────────────────┘
//!                       │ Declared<T: Resource>
//! ┌─────────────────────▼────────────────────────┐
//! │               throttle-cloud                  │
//! │  ┌────────────┐ ┌──────────┐ ┌─────────────┐ │
//! │  │ aws types  │ │ OutputRef│ │ Secret<T>   │ │
//! │  └────────────┘ └──────────┘ └─────────────┘ │
//! │         Declaration (JSON / YAML)             │
//! └─────────────────────┬────────────────────────┘
//!                       │
//!             external provisioning engine
//! ```

pub mod aws;
pub mod declaration;
pub mod error;
pub mod output;
pub mod resource;
pub mod secret;

// Re-exports
pub use declaration::{Declaration, DeclarationSummary, OutputFormat};
pub use error::{CloudError, Result};
pub use output::{Input, OutputRef};
pub use resource::{Declared, Resource, ResourceConfig};
pub use secret::Secret;

//! The six namespace tools.

mod create_namespace;
mod list_namespaces;
mod namespace_batch;
mod namespace_details;
mod secret_mapping;
mod validate_namespace;

pub use create_namespace::{Component, CreateNamespace};
pub use list_namespaces::{list, ListNamespaces, NamespaceSummary};
pub use namespace_batch::{CreateNamespaceBatch, PLAN_INSTRUCTIONS};
pub use namespace_details::NamespaceDetails;
pub use secret_mapping::{AddSecretMapping, EXTERNAL_SECRET_FILE};
pub use validate_namespace::{validate, ValidateNamespace, Validation, RESERVED_NAMESPACES};

use crate::tool::Tool;

/// Registration order is the order definitions are reported in.
pub static TOOLS: &[&dyn Tool] = &[
    &CreateNamespace,
    &ListNamespaces,
    &NamespaceDetails,
    &ValidateNamespace,
    &CreateNamespaceBatch,
    &AddSecretMapping,
];

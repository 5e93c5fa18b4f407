//! Namespace tool dispatcher for a GitOps repository.
//!
//! [`Dispatcher::execute`] maps a tool name plus a JSON object of parameters
//! onto one of six operations: running the scaffolding script, scanning
//! `apps/base`, validating a name, or rendering Terraform / ExternalSecret
//! snippets. Results are JSON values; failures are `{"error": …}` objects.

mod dispatch;
mod error;
pub mod layout;
pub mod process;
pub mod tool;
pub mod tools;

pub use dispatch::Dispatcher;
pub use error::AgentError;
pub use layout::RepoLayout;
pub use tool::{Tool, ToolContext, ToolDefinition};

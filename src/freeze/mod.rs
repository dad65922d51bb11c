//! Freezing `docs/<subdir>/next` into a versioned tree
//!
//! - **tree**: Copy the `next` tree and repoint its links
//! - **metadata**: `.version-metadata.json` and the `.version-frozen` marker
//! - **input**: Operator answers from prompts or the environment
//! - **orchestrator**: The end-to-end freeze workflow

pub mod input;
pub mod metadata;
pub mod orchestrator;
pub mod tree;

pub use orchestrator::{FreezeOptions, Orchestrator, resolve_request};

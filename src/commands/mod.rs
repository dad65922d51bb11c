//! CLI commands for docs-versioner
//!
//! - **freeze**: Full freeze workflow (prompts or environment driven)
//! - **release_notes**: Regenerate a product's release notes from its changelog
//! - **navigation**: Add a frozen version to docs.json on its own
//! - **versions**: Inspect or edit versions.json
//! - **snapshot**: Re-run the EIP snapshot for a frozen version
//! - **status**: Products, versions and frozen metadata
//!
//! All commands accept `&SiteContext` so the config is loaded once.

pub mod freeze;
pub mod navigation;
pub mod release_notes;
pub mod snapshot;
pub mod status;
pub mod versions;

pub use freeze::run_freeze;
pub use navigation::run_navigation;
pub use release_notes::run_release_notes;
pub use snapshot::run_snapshot;
pub use status::run_status;
pub use versions::{run_versions_add, run_versions_list, run_versions_remove};

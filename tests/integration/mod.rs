//! Integration tests for docs-versioner
//!
//! Each test builds a throwaway docs site and drives the compiled binary against it.

mod helpers;
mod test_freeze;
mod test_navigation;
mod test_release_notes;
mod test_status;
mod test_versions;

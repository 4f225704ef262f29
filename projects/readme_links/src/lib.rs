//! Repository link extraction service
//! 
//! - REST API endpoints in `endpoints/`
//! - README retrieval behind the `readme::ReadmeSource` trait
//! - Link extraction, filtering and JSON output in `utils/`
//! - Requires `github_access_token` in the JSON config file

pub mod config;
pub mod endpoints;
pub mod readme;
pub mod server;
pub mod utils;

//! Client for the GitHub REST "get a repository README" endpoint.

pub mod index;

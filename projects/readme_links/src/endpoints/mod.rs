pub mod github;
pub mod hello;

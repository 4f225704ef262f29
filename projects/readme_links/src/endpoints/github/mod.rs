pub mod projects;
pub mod readme;

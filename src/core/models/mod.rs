pub mod application;
pub mod program;

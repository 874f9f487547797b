pub mod backend;
pub mod config;
pub mod content;
pub mod session;

pub mod error;

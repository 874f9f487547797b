pub mod clipboard;
pub mod mapper;
pub mod model;
pub mod parser;
pub mod persist;
pub mod render;

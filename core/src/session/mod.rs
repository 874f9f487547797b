pub mod editor;
pub mod lifecycle;

pub mod resume;
pub mod share;
pub mod view;

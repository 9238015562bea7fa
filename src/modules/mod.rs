pub mod auth;
pub mod image;
pub mod settings;
pub mod viewer;

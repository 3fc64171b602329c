pub mod analytics;
pub mod config;
pub mod models;
pub mod parser;
pub mod render;
pub mod source;

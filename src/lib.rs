pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod github;
pub mod models;

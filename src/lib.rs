pub mod api;
pub mod config;
pub mod data_models;
pub mod error;
pub mod parser;
pub mod provider;
pub mod synthesizer;

pub mod api;
pub mod clients;
pub mod config;
pub mod engine;
pub mod errors;
pub mod models;
pub mod repos;
pub mod services;
pub mod utils;

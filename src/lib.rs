pub mod config;
pub mod db;
pub mod error;
pub mod message;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;

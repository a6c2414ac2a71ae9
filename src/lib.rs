pub mod auth;
pub mod config;
pub mod db;
pub mod events;
pub mod handlers;
pub mod models;
pub mod pricing;
pub mod routes;
pub mod state;
pub mod utils;

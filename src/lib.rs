pub mod config;
pub mod error;
pub mod handlers;
pub mod pages;
pub mod password;
pub mod posts;
pub mod quiz;
pub mod reports;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
pub mod types;
pub mod validation;
pub mod votes;

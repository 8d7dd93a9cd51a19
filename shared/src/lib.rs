pub mod adapters;
pub mod clients;
pub mod configuration;
pub mod core;
pub mod request;
pub mod utils;

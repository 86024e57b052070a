pub mod app;
pub mod config;
pub mod errors;
pub mod external;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

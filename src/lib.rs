//! Client for the HRIS API: typed models, one call per endpoint, the
//! client-side form rules and the screen flows built on them.

pub mod api;
pub mod auth;
pub mod capture;
pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod http;
pub mod model;
pub mod models;
pub mod routes;
pub mod screens;
pub mod utils;
pub mod view;

pub use client::ApiClient;
pub use config::Config;
pub use error::{ClientError, ClientResult};

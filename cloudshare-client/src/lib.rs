//! CloudShare client library
//!
//! The dashboard logic lives in [`dashboard`]; it talks to the API only
//! through the [`transport::FileTransport`], [`auth::TokenSource`], and
//! [`credits::CreditsRefresher`] capabilities it is built with.

pub mod auth;
pub mod config;
pub mod constants;
pub mod credits;
pub mod dashboard;
pub mod transport;
pub mod types;
pub mod views;

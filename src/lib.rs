//! Client core for filling PDF forms against a remote document service.
//!
//! A host shell forwards user events as JSON commands to [`FormClient`] and
//! renders the JSON UI tree it returns.

pub mod config;
pub mod error;
pub mod features;
mod router;
pub mod state;
pub mod ui;
mod worker;

#[cfg(test)]
mod ui_tests;

pub use config::Settings;
pub use error::{ClientError, ConfigError};
pub use router::{Command, FormClient};
pub use worker::WorkerMode;

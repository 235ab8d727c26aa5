//! Client-side state and synchronization core for the JobDeck job board.
//!
//! Presentation code holds the store handles returned by
//! [`store::AppStores::start`], reads state snapshots, invokes operations,
//! and listens on the UI event bus for notifications and navigation
//! signals. It never talks to the transport directly.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use jobdeck_client::api::HttpApi;
//! use jobdeck_client::config::ClientConfig;
//! use jobdeck_client::store::AppStores;
//!
//! # async fn run() -> Result<(), jobdeck_client::error::Error> {
//! jobdeck_client::observability::init_tracing();
//! let config = ClientConfig::from_env()?;
//! let api = Arc::new(HttpApi::new(&config.api)?);
//! let stores = AppStores::start(api).await;
//! let jobs = stores.jobs.jobs().await;
//! # let _ = jobs;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod observability;
pub mod store;

pub use error::Error;

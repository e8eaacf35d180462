//! Random user tool service.
//!
//! Exposes a fixed catalog of three tools over HTTP. Each tool fetches
//! synthetic profiles from the public randomuser.me API and returns them as
//! display text.
//!
//! # Example
//!
//! ```no_run
//! use server::{Config, RandomUserApi, ToolService};
//!
//! # async fn example() -> server::Result<()> {
//! let config = Config::default();
//! let service = ToolService::new(RandomUserApi::new(&config.profile_api)?);
//!
//! let listener = tokio::net::TcpListener::bind(("127.0.0.1", 8000)).await?;
//! axum::serve(listener, server::router(service)).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
mod error;
mod profile;
mod routes;
mod tools;

pub use config::{Config, ConfigError};
pub use error::{Error, Result, ToolError};
pub use profile::{ProfileQuery, ProfileSource, RandomUserApi, UserProfile, format_profile};
pub use routes::{PING_INTERVAL, SERVER_NAME, keep_alive, router};
pub use tools::{ToolService, catalog};

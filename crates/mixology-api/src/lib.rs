//! # mixology-api
//!
//! HTTP clients for the services Mixology talks to.
//!
//! ## Features
//!
//! - **Recipe API**: one random cocktail per request from `TheCocktailDB`
//! - **Remote configuration**: a flat JSON object of key/value settings
//! - **Wire types**: serde DTOs matching the upstream JSON field names
//!
//! Neither client retries or caches. Every call is a single round trip and
//! every failure is returned to the caller.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mixology_api::CocktailClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CocktailClient::new(mixology_api::DEFAULT_BASE_URL)?;
//!
//!     match client.random_cocktail().await? {
//!         Some(drink) => println!("{} ({})", drink.name, drink.id),
//!         None => println!("The API returned no drinks"),
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cocktail;
mod config;
mod error;
mod http;

pub use cocktail::{CocktailClient, CocktailDto, CocktailResponse, DEFAULT_BASE_URL, RANDOM_PATH};
pub use config::{ConfigClient, ConfigValues};
pub use error::{Error, Result};
pub use http::HttpOptions;

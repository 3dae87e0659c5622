//! # mixology-core
//!
//! Core logic for the Mixology cocktail client.
//!
//! This crate provides:
//! - **Cocktail cache** - `SQLite` storage with live, recency-ordered listing
//! - **Synchronization** - fetch a random cocktail from the recipe API and cache it
//! - **Display projection** - day-labelled records and grouping by insertion day
//! - **Presentation state** - list and detail state holders for front ends
//! - **Remote configuration** - defaults, throttled fetch-and-activate
//! - **Push messages** - notification payload parsing

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod cocktail;
mod error;
pub mod live;
pub mod messaging;
pub mod presentation;
pub mod remote_config;
#[cfg(test)]
mod testing;

pub use cocktail::{
    CacheSnapshot, CocktailDisplay, CocktailRecord, CocktailRepository, CocktailSource,
    CocktailStore, DayGroup, format_insertion_day, group_by_day,
};
pub use error::{Error, Result};
pub use messaging::{Notification, PushMessage};
pub use presentation::{
    CocktailDetailModel, CocktailDetailState, CocktailListModel, CocktailListState,
};
pub use remote_config::{ConfigSource, RemoteConfig, RemoteConfigData};

//! Where new cocktails come from.

use std::future::Future;

use mixology_api::{CocktailClient, CocktailDto};

use crate::Result;

/// A provider of random cocktails.
///
/// Implemented by the HTTP [`CocktailClient`]; tests substitute their own
/// implementations.
pub trait CocktailSource: Send + Sync {
    /// Fetches one random cocktail, or `None` if the provider has none.
    ///
    /// Makes a single attempt. Transport failures are returned as errors.
    fn fetch_random(&self) -> impl Future<Output = Result<Option<CocktailDto>>> + Send;
}

impl CocktailSource for CocktailClient {
    async fn fetch_random(&self) -> Result<Option<CocktailDto>> {
        Ok(self.random_cocktail().await?)
    }
}

//! `TheCocktailDB` random cocktail endpoint.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::http::HttpOptions;

/// Public base URL of `TheCocktailDB`.
pub const DEFAULT_BASE_URL: &str = "https://www.thecocktaildb.com/";

/// Path of the random cocktail endpoint, relative to the base URL.
pub const RANDOM_PATH: &str = "api/json/v1/1/random.php";

/// Envelope returned by the recipe API.
///
/// `drinks` is `null` (or missing) when the API has nothing to return.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CocktailResponse {
    /// Drinks in the response.
    #[serde(default)]
    pub drinks: Option<Vec<CocktailDto>>,
}

impl CocktailResponse {
    /// Takes the first drink of the envelope, if any.
    #[must_use]
    pub fn into_first(self) -> Option<CocktailDto> {
        self.drinks.and_then(|drinks| drinks.into_iter().next())
    }
}

/// A cocktail as the recipe API describes it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CocktailDto {
    /// Upstream identifier.
    #[serde(rename = "idDrink")]
    pub id: String,
    /// Drink name.
    #[serde(rename = "strDrink")]
    pub name: String,
    /// Category (e.g. "Ordinary Drink").
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    /// "Alcoholic", "Non alcoholic" or "Optional alcohol".
    #[serde(rename = "strAlcoholic", default)]
    pub alcoholic: Option<String>,
    /// Serving glass.
    #[serde(rename = "strGlass", default)]
    pub glass: Option<String>,
    /// Preparation instructions.
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    /// Thumbnail image URL.
    #[serde(rename = "strDrinkThumb", default)]
    pub thumbnail: Option<String>,
}

/// Client for the random cocktail endpoint.
#[derive(Debug, Clone)]
pub struct CocktailClient {
    random_url: Url,
    http_client: Client,
}

impl CocktailClient {
    /// Creates a client for the given base URL with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_options(base_url, HttpOptions::default())
    }

    /// Creates a client with explicit timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn with_options(base_url: impl AsRef<str>, options: HttpOptions) -> Result<Self> {
        let mut base = base_url.as_ref().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let random_url = Url::parse(&base)?.join(RANDOM_PATH)?;

        Ok(Self {
            random_url,
            http_client: options.build()?,
        })
    }

    /// Full URL of the random cocktail endpoint.
    #[must_use]
    pub const fn random_url(&self) -> &Url {
        &self.random_url
    }

    /// Fetches one random cocktail.
    ///
    /// Returns `Ok(None)` when the envelope holds no drinks.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot complete, the status is not a
    /// success, or the body is not a valid envelope.
    pub async fn random_cocktail(&self) -> Result<Option<CocktailDto>> {
        debug!(url = %self.random_url, "Requesting random cocktail");

        let response = self
            .http_client
            .get(self.random_url.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let envelope: CocktailResponse = response.json().await?;
        let drink = envelope.into_first();
        debug!(found = drink.is_some(), "Random cocktail response decoded");
        Ok(drink)
    }
}

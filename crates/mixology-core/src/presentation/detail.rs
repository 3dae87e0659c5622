//! Single cocktail detail state.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use crate::cocktail::{CocktailDisplay, CocktailRepository, CocktailSource};

/// Message shown when the requested cocktail is not cached.
pub const NOT_FOUND_MESSAGE: &str = "Cocktail not found";

/// Everything the detail screen renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CocktailDetailState {
    /// The cocktail, once loaded.
    pub cocktail: Option<CocktailDisplay>,
    /// Whether the lookup is in flight.
    pub is_loading: bool,
    /// Why the cocktail could not be shown.
    pub error: Option<String>,
}

impl Default for CocktailDetailState {
    fn default() -> Self {
        Self {
            cocktail: None,
            is_loading: true,
            error: None,
        }
    }
}

/// State holder for one cached cocktail.
pub struct CocktailDetailModel<S> {
    repository: Arc<CocktailRepository<S>>,
    id: String,
    state: watch::Sender<CocktailDetailState>,
}

impl<S: CocktailSource> CocktailDetailModel<S> {
    /// Creates the model and loads the cocktail.
    pub async fn open(repository: Arc<CocktailRepository<S>>, id: impl Into<String>) -> Self {
        let (state, _) = watch::channel(CocktailDetailState::default());
        let model = Self {
            repository,
            id: id.into(),
            state,
        };
        model.reload().await;
        model
    }

    /// Id of the cocktail shown.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn state(&self) -> watch::Receiver<CocktailDetailState> {
        self.state.subscribe()
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> CocktailDetailState {
        self.state.borrow().clone()
    }

    /// Looks the cocktail up again.
    pub async fn reload(&self) {
        self.state.send_replace(CocktailDetailState::default());

        let next = match self.repository.get_by_id(&self.id).await {
            Ok(Some(cocktail)) => CocktailDetailState {
                cocktail: Some(cocktail),
                is_loading: false,
                error: None,
            },
            Ok(None) => CocktailDetailState {
                cocktail: None,
                is_loading: false,
                error: Some(NOT_FOUND_MESSAGE.to_string()),
            },
            Err(e) => {
                warn!(id = %self.id, "Failed to load cocktail: {e}");
                CocktailDetailState {
                    cocktail: None,
                    is_loading: false,
                    error: Some(e.to_string()),
                }
            }
        };

        self.state.send_replace(next);
    }
}

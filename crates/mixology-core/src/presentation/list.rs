//! Cocktail history list state.

use std::sync::Arc;

use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::Result;
use crate::cocktail::{
    CocktailDisplay, CocktailRepository, CocktailSource, DayGroup, group_by_day,
};

/// Everything the history screen renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CocktailListState {
    /// Cached cocktails, most recently added first.
    pub cocktails: Vec<CocktailDisplay>,
    /// The same cocktails bucketed by insertion day.
    pub groups: Vec<DayGroup>,
    /// Number of cached cocktails.
    pub total_count: u64,
    /// Whether a user action is in flight.
    pub is_loading: bool,
    /// Message of the last failed action.
    pub error: Option<String>,
}

impl CocktailListState {
    /// Returns true if the cache holds no cocktail.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    fn apply_listing(&mut self, cocktails: Vec<CocktailDisplay>, total_count: u64) {
        self.groups = group_by_day(&cocktails);
        self.cocktails = cocktails;
        self.total_count = total_count;
    }
}

/// State holder for the cocktail history list.
///
/// The listing is kept current by a background task for as long as the
/// model lives, including while an action is in flight. Actions are not
/// deduplicated: two overlapping `add_random` calls fetch twice.
pub struct CocktailListModel<S> {
    repository: Arc<CocktailRepository<S>>,
    state: Arc<watch::Sender<CocktailListState>>,
    listener: JoinHandle<()>,
}

impl<S: CocktailSource> CocktailListModel<S> {
    /// Creates the model and subscribes to the repository.
    ///
    /// The current listing is applied before this returns.
    pub async fn new(repository: Arc<CocktailRepository<S>>) -> Self {
        let mut listing = repository.observe_listing();

        let mut initial = CocktailListState::default();
        if let Some((cocktails, count)) = listing.next().await {
            initial.apply_listing(cocktails, count);
        }

        let (state, _) = watch::channel(initial);
        let state = Arc::new(state);
        let listener = tokio::spawn(follow_listing(listing, Arc::clone(&state)));

        Self {
            repository,
            state,
            listener,
        }
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn state(&self) -> watch::Receiver<CocktailListState> {
        self.state.subscribe()
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> CocktailListState {
        self.state.borrow().clone()
    }

    /// Fetches and caches a random cocktail.
    ///
    /// Returns the added cocktail, or `None` if the action failed (see `error`).
    pub async fn add_random(&self) -> Option<CocktailDisplay> {
        self.begin();
        let result = self.repository.add_random().await;
        self.finish(&result);
        result.ok()
    }

    /// Removes one cocktail. Returns false if the action failed.
    pub async fn delete_by_id(&self, id: &str) -> bool {
        self.begin();
        let result = self.repository.delete_by_id(id).await;
        self.finish(&result);
        result.is_ok()
    }

    /// Removes every cocktail. Returns false if the action failed.
    pub async fn delete_all(&self) -> bool {
        self.begin();
        let result = self.repository.delete_all().await;
        self.finish(&result);
        result.is_ok()
    }

    /// Dismisses the current error message.
    pub fn clear_error(&self) {
        self.state.send_modify(|state| state.error = None);
    }

    fn begin(&self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });
    }

    fn finish<T>(&self, result: &Result<T>) {
        let error = result.as_ref().err().map(ToString::to_string);
        if let Some(message) = &error {
            warn!("Cocktail action failed: {message}");
        }
        self.state.send_modify(|state| {
            state.is_loading = false;
            state.error = error;
        });
    }
}

impl<S> Drop for CocktailListModel<S> {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

async fn follow_listing(
    mut listing: BoxStream<'static, (Vec<CocktailDisplay>, u64)>,
    state: Arc<watch::Sender<CocktailListState>>,
) {
    while let Some((cocktails, count)) = listing.next().await {
        state.send_modify(|state| state.apply_listing(cocktails, count));
    }
}

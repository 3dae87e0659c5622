//! Synchronization between the recipe API and the local cache.

use chrono::{SubsecRound, Utc};
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use tracing::{info, warn};

use super::model::{CocktailDisplay, CocktailRecord};
use super::source::CocktailSource;
use super::store::CocktailStore;
use crate::live::watch_stream;
use crate::{Error, Result};

/// Keeps the local cocktail cache in step with the recipe API and exposes it
/// in display-ready form.
///
/// Failures from the source or the store are returned unchanged; nothing is
/// retried.
pub struct CocktailRepository<S> {
    store: CocktailStore,
    source: S,
}

impl<S: CocktailSource> CocktailRepository<S> {
    /// Creates a repository over a store and a cocktail source.
    #[must_use]
    pub const fn new(store: CocktailStore, source: S) -> Self {
        Self { store, source }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &CocktailStore {
        &self.store
    }

    /// The cocktail source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Live display-ready listing, most recently added first.
    ///
    /// Yields the current listing immediately, then again after each change.
    #[must_use]
    pub fn observe_all(&self) -> BoxStream<'static, Vec<CocktailDisplay>> {
        self.store
            .observe_all()
            .map(|records| to_display(&records))
            .boxed()
    }

    /// Live number of cached cocktails.
    #[must_use]
    pub fn observe_count(&self) -> BoxStream<'static, u64> {
        self.store.observe_count()
    }

    /// Live listing together with the count, both taken from the same commit.
    #[must_use]
    pub fn observe_listing(&self) -> BoxStream<'static, (Vec<CocktailDisplay>, u64)> {
        watch_stream(self.store.observe())
            .map(|snapshot| (to_display(&snapshot.cocktails), snapshot.count))
            .boxed()
    }

    /// Looks up a cached cocktail.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<CocktailDisplay>> {
        let record = self.store.get_by_id(id).await?;
        Ok(record.as_ref().map(CocktailRecord::to_display))
    }

    /// Fetches a random cocktail and caches it, stamped with the current time.
    ///
    /// A cocktail already in the cache is replaced, which moves it to the top
    /// of the listing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the source has no cocktail, a network
    /// error if the fetch fails, or a database error if storing fails. The
    /// cache is unchanged in every error case, since the store rolls back a
    /// write whose re-read fails.
    pub async fn add_random(&self) -> Result<CocktailDisplay> {
        let dto = match self.source.fetch_random().await {
            Ok(Some(dto)) => dto,
            Ok(None) => {
                warn!("Cocktail source returned no cocktail");
                return Err(Error::NotFound);
            }
            Err(e) => {
                warn!("Failed to fetch random cocktail: {e}");
                return Err(e);
            }
        };

        // Stored with millisecond precision, so stamp with the same.
        let record = CocktailRecord::from_dto(dto, Utc::now().trunc_subsecs(3));
        self.store.upsert(&record).await?;

        info!(id = %record.id, name = %record.name, "Cocktail added");
        Ok(record.to_display())
    }

    /// Removes one cocktail from the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete_by_id(&self, id: &str) -> Result<()> {
        self.store.delete_by_id(id).await?;
        info!(id, "Cocktail removed");
        Ok(())
    }

    /// Removes every cocktail from the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete_all(&self) -> Result<()> {
        self.store.delete_all().await?;
        info!("All cocktails removed");
        Ok(())
    }

    /// Number of cached cocktails.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64> {
        self.store.count().await
    }
}

fn to_display(records: &[CocktailRecord]) -> Vec<CocktailDisplay> {
    records.iter().map(CocktailRecord::to_display).collect()
}

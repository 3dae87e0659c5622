//! Test doubles shared by the unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use mixology_api::CocktailDto;
use tokio::sync::Notify;

use crate::Result;
use crate::cocktail::CocktailSource;

/// Builds an API cocktail with a category and no other optional fields.
pub fn dto(id: &str, name: &str) -> CocktailDto {
    CocktailDto {
        id: id.to_string(),
        name: name.to_string(),
        category: Some("Cocktail".to_string()),
        alcoholic: None,
        glass: None,
        instructions: None,
        thumbnail: None,
    }
}

/// A source that replays scripted responses, then reports no cocktail.
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Option<CocktailDto>>>>,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(responses: Vec<Result<Option<CocktailDto>>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Like [`new`](Self::new), but every fetch waits for the returned gate.
    pub fn gated(responses: Vec<Result<Option<CocktailDto>>>) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let source = Self {
            gate: Some(Arc::clone(&gate)),
            ..Self::new(responses)
        };
        (source, gate)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CocktailSource for ScriptedSource {
    async fn fetch_random(&self) -> Result<Option<CocktailDto>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or(Ok(None))
    }
}

//! Supersede-safe consumption boundary over one [`SearchEngine`].
//!
//! A session serializes the *outcome* of overlapping searches without
//! serializing the work: starting a new search cancels the previous
//! in-flight one, and a completion that has been overtaken is discarded
//! instead of clobbering newer state. Callers that race keystrokes against
//! network latency get exactly one winner, the newest.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use reel_core::{SearchOptions, SearchPage};

use crate::engine::SearchEngine;
use crate::error::SearchError;
use crate::sequence::RequestSequencer;

pub struct SearchSession {
    engine: Arc<SearchEngine>,
    sequencer: RequestSequencer,
    active: Mutex<Option<CancellationToken>>,
    last_page: Mutex<Option<SearchPage>>,
}

impl SearchSession {
    #[must_use]
    pub fn new(engine: Arc<SearchEngine>) -> Self {
        Self {
            engine,
            sequencer: RequestSequencer::new(),
            active: Mutex::new(None),
            last_page: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Runs a search as the newest request, cancelling any in-flight one.
    ///
    /// # Errors
    ///
    /// [`SearchError::Superseded`] when a later search began before this
    /// one completed (its result is discarded); otherwise whatever
    /// [`SearchEngine::search`] returns.
    pub async fn search(
        &self,
        raw_query: &str,
        options: &SearchOptions,
    ) -> Result<SearchPage, SearchError> {
        let ticket = self.sequencer.begin();
        let token = CancellationToken::new();
        let previous = self.active.lock().await.replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        let outcome = self.engine.search(raw_query, options, &token).await;

        // The staleness check and the store happen under one lock so a
        // stale completion can never overwrite a newer page.
        let mut last = self.last_page.lock().await;
        if !self.sequencer.is_current(ticket) {
            return Err(SearchError::Superseded);
        }
        let page = outcome?;
        *last = Some(page.clone());
        Ok(page)
    }

    /// Cancels the in-flight search, if any.
    pub async fn cancel_active(&self) {
        if let Some(token) = self.active.lock().await.take() {
            token.cancel();
        }
    }

    /// The newest successfully completed page.
    pub async fn last_page(&self) -> Option<SearchPage> {
        self.last_page.lock().await.clone()
    }
}

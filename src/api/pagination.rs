// src/api/pagination.rs
//! Cursor-following pagination over any Notion listing endpoint.
//!
//! A [`Pager`] hands each batch to the caller as soon as it arrives, so a
//! listing that fails halfway keeps everything it already yielded.

use super::types::PaginatedResponse;
use crate::error::FetchError;
use std::future::Future;
use std::marker::PhantomData;

/// Lazily walks a paginated listing one request at a time.
pub struct Pager<T, F> {
    fetch: F,
    cursor: Option<String>,
    exhausted: bool,
    batches_fetched: usize,
    _item: PhantomData<fn() -> T>,
}

impl<T, F, Fut> Pager<T, F>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<PaginatedResponse<T>, FetchError>>,
{
    /// `fetch` receives the cursor to resume from; `None` for the first request.
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            cursor: None,
            exhausted: false,
            batches_fetched: 0,
            _item: PhantomData,
        }
    }

    /// Requests the next batch.
    ///
    /// Returns `None` once the listing is exhausted. A failed request is
    /// returned once and ends the listing; it is never retried.
    pub async fn next_batch(&mut self) -> Option<Result<Vec<T>, FetchError>> {
        if self.exhausted {
            return None;
        }

        let result = (self.fetch)(self.cursor.take()).await;
        self.batches_fetched += 1;

        match result {
            Ok(response) => {
                if response.continues() {
                    self.cursor = response.next_cursor;
                } else {
                    self.exhausted = true;
                }
                Some(Ok(response.results))
            }
            Err(e) => {
                self.exhausted = true;
                Some(Err(e))
            }
        }
    }

    /// Drains the listing into one vector, stopping at the first failure.
    pub async fn collect_all(mut self) -> (Vec<T>, Option<FetchError>) {
        let mut items = Vec::new();
        while let Some(batch) = self.next_batch().await {
            match batch {
                Ok(batch) => items.extend(batch),
                Err(e) => return (items, Some(e)),
            }
        }
        (items, None)
    }

    pub fn batches_fetched(&self) -> usize {
        self.batches_fetched
    }
}

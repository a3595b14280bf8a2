use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use tracing::{debug, warn};

use crate::Result;
use crate::api::PersonApi;
use crate::model::{Cursor, Page};
use crate::query::QueryParams;

/// What to fetch: a fresh first page or a continuation.
///
/// The two forms are exclusive; a cursor already encodes filter and order on
/// the server side.
#[derive(Debug, Clone, PartialEq)]
pub enum PageRequest {
    First(QueryParams),
    Cursor(Cursor),
}

/// Completed fetch, tagged with the generation it was issued under
#[derive(Debug, Clone)]
pub struct FetchMessage {
    pub generation: u64,
    pub result: Result<Page>,
}

/// Runs page fetches on background threads
pub struct PageFetcher {
    api: Arc<dyn PersonApi>,
    tx: Sender<FetchMessage>,
}

impl PageFetcher {
    pub fn new(api: Arc<dyn PersonApi>, tx: Sender<FetchMessage>) -> Self {
        Self { api, tx }
    }

    /// Spawn a fetch; the outcome arrives on the channel
    pub fn fetch(&self, generation: u64, request: PageRequest) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = fetch_page(api.as_ref(), &request);
            // Receiver gone means the controller was dropped
            let _ = tx.send(FetchMessage { generation, result });
        })
    }
}

/// Fetch one page synchronously
pub fn fetch_page(api: &dyn PersonApi, request: &PageRequest) -> Result<Page> {
    match api.fetch_page(request) {
        Ok(page) => {
            debug!(
                rows = page.items.len(),
                total = page.total_count,
                has_next = page.has_next(),
                has_previous = page.has_previous(),
                "page fetched"
            );
            Ok(page)
        }
        Err(e) => {
            warn!(error = %e, "page fetch failed");
            Err(e)
        }
    }
}

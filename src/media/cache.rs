// SPDX-License-Identifier: MPL-2.0
//! Asynchronous, deduplicated image cache feeding the renderer.
//!
//! # Design
//!
//! - **Deduplicated**: one underlying load per source id, no matter how
//!   often it is requested
//! - **Non-blocking**: decoding runs on tokio blocking tasks; results
//!   cross back over a channel and are applied on the caller's thread
//! - **Terminal failures**: a failed load stays failed, avoiding retry
//!   loops on permanently broken sources
//!
//! # Usage
//!
//! ```ignore
//! let mut cache = ImageCache::new(fetcher, runtime);
//!
//! // Kick off (or look up) a load
//! let item = cache.request("images/photo-1.jpg");
//!
//! // Once per frame, apply any finished loads
//! if cache.poll_completions() > 0 {
//!     // repaint
//! }
//! ```

use crate::error::Result;
use crate::media::{ImageData, ImageFetcher, LoadStatus, SliderItem};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

struct Completion {
    source_id: String,
    result: Result<ImageData>,
}

/// Maps source identifiers to their load state and decoded image.
pub struct ImageCache {
    entries: HashMap<String, SliderItem>,
    fetcher: Arc<dyn ImageFetcher>,
    runtime: tokio::runtime::Handle,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
    outstanding: usize,
}

impl ImageCache {
    /// Creates an empty cache decoding through `fetcher` on `runtime`.
    #[must_use]
    pub fn new(fetcher: Arc<dyn ImageFetcher>, runtime: tokio::runtime::Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            entries: HashMap::new(),
            fetcher,
            runtime,
            tx,
            rx,
            outstanding: 0,
        }
    }

    /// Requests `source_id`, returning its entry.
    ///
    /// Idempotent: a second request for the same id returns the existing
    /// entry (whatever its status) without starting another load.
    pub fn request(&mut self, source_id: &str) -> &SliderItem {
        match self.entries.entry(source_id.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!(source_id, "starting image load");
                self.outstanding += 1;

                let fetcher = Arc::clone(&self.fetcher);
                let tx = self.tx.clone();
                let id = source_id.to_string();
                self.runtime.spawn_blocking(move || {
                    let result = fetcher.fetch(&id);
                    // The cache may have been dropped meanwhile.
                    let _ = tx.send(Completion {
                        source_id: id,
                        result,
                    });
                });

                entry.insert(SliderItem::pending(source_id.to_string()))
            }
        }
    }

    /// Looks up an entry without requesting it.
    #[must_use]
    pub fn get(&self, source_id: &str) -> Option<&SliderItem> {
        self.entries.get(source_id)
    }

    /// Applies finished loads delivered since the last call.
    ///
    /// Returns the number of entries whose status changed. Never blocks.
    pub fn poll_completions(&mut self) -> usize {
        let mut changed = 0;
        while let Ok(completion) = self.rx.try_recv() {
            self.outstanding = self.outstanding.saturating_sub(1);
            if self.apply(completion) {
                changed += 1;
            }
        }
        changed
    }

    /// Waits until every in-flight load has been applied.
    ///
    /// Ordering helper for tests and shutdown paths; the render loop
    /// uses [`poll_completions`](Self::poll_completions) instead.
    pub async fn wait_idle(&mut self) {
        while self.outstanding > 0 {
            match self.rx.recv().await {
                Some(completion) => {
                    self.outstanding -= 1;
                    self.apply(completion);
                }
                None => break,
            }
        }
    }

    /// Drops every entry whose id is not in `keep`.
    ///
    /// Item-list replacement semantics: surviving ids keep their status
    /// and decoded image; completions for dropped ids are discarded when
    /// they eventually arrive.
    pub fn retain(&mut self, keep: &[String]) {
        let keep: HashSet<&str> = keep.iter().map(String::as_str).collect();
        self.entries.retain(|id, _| keep.contains(id.as_str()));
    }

    /// Number of known entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of loads still in flight.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    fn apply(&mut self, completion: Completion) -> bool {
        let Some(item) = self.entries.get_mut(&completion.source_id) else {
            debug!(
                source_id = %completion.source_id,
                "dropping completion for replaced item"
            );
            return false;
        };

        // Status only ever leaves Pending once.
        if !item.is_pending() {
            warn!(
                source_id = %completion.source_id,
                "ignoring duplicate completion"
            );
            return false;
        }

        match completion.result {
            Ok(image) => {
                debug!(
                    source_id = %completion.source_id,
                    width = image.width,
                    height = image.height,
                    "image ready"
                );
                item.set_status(LoadStatus::Ready(Arc::new(image)));
            }
            Err(error) => {
                warn!(source_id = %completion.source_id, %error, "image load failed");
                item.set_status(LoadStatus::Failed);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{CountingFetcher, FailingFetcher, FixedSizeFetcher};

    #[tokio::test]
    async fn request_twice_starts_exactly_one_load() {
        let fetcher = Arc::new(CountingFetcher::new(8, 8));
        let mut cache = ImageCache::new(fetcher.clone(), tokio::runtime::Handle::current());

        cache.request("a.png");
        cache.request("a.png");
        cache.wait_idle().await;

        assert_eq!(fetcher.fetch_count(), 1);
        let item = cache.get("a.png").expect("entry");
        assert_eq!(item.natural_size(), Some((8, 8)));
    }

    #[tokio::test]
    async fn distinct_ids_load_independently() {
        let fetcher = Arc::new(FixedSizeFetcher::new(4, 2));
        let mut cache = ImageCache::new(fetcher, tokio::runtime::Handle::current());

        cache.request("a.png");
        cache.request("b.png");
        cache.wait_idle().await;

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("b.png").expect("entry").natural_size(), Some((4, 2)));
    }

    #[tokio::test]
    async fn failed_load_is_terminal() {
        let fetcher = Arc::new(FailingFetcher);
        let mut cache = ImageCache::new(fetcher, tokio::runtime::Handle::current());

        cache.request("broken.png");
        cache.wait_idle().await;
        assert!(cache.get("broken.png").expect("entry").is_failed());

        // Re-requesting the same id must not start a new load.
        cache.request("broken.png");
        assert_eq!(cache.outstanding(), 0);
        assert!(cache.get("broken.png").expect("entry").is_failed());
    }

    #[tokio::test]
    async fn completion_for_replaced_item_is_dropped() {
        let fetcher = Arc::new(FixedSizeFetcher::new(4, 2));
        let mut cache = ImageCache::new(fetcher, tokio::runtime::Handle::current());

        cache.request("a.png");
        cache.retain(&["b.png".to_string()]);
        cache.wait_idle().await;

        assert!(cache.get("a.png").is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn retain_keeps_surviving_entries_ready() {
        let fetcher = Arc::new(CountingFetcher::new(8, 8));
        let mut cache = ImageCache::new(fetcher.clone(), tokio::runtime::Handle::current());

        cache.request("a.png");
        cache.request("b.png");
        cache.wait_idle().await;

        cache.retain(&["a.png".to_string()]);
        cache.request("a.png");
        cache.wait_idle().await;

        // The surviving entry was reused, not reloaded.
        assert_eq!(fetcher.fetch_count(), 2);
        assert_eq!(cache.get("a.png").expect("entry").natural_size(), Some((8, 8)));
    }

    #[tokio::test]
    async fn poll_completions_reports_changed_entries() {
        let fetcher = Arc::new(FixedSizeFetcher::new(4, 2));
        let mut cache = ImageCache::new(fetcher, tokio::runtime::Handle::current());

        assert_eq!(cache.poll_completions(), 0);
        cache.request("a.png");
        cache.wait_idle().await;

        // Already applied by wait_idle; nothing left to poll.
        assert_eq!(cache.poll_completions(), 0);
        assert_eq!(cache.outstanding(), 0);
    }
}

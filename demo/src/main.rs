//! PageView demo
//!
//! A vertical feed that grows while it is being read. Every swipe is fed to
//! the pager as raw drag signals; when the reader gets close to the end a
//! background task "fetches" more cards and the pager reloads without
//! disturbing what is on screen.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use pageview_core::{
    Config, ContentSource, Orientation, PageContent, PageViewController, Point, Rect,
    ReloadMode, Size, TransitionObserver,
};
use tokio::sync::mpsc;

const PAGE_SIZE: Size = Size {
    width: 375.0,
    height: 667.0,
};
const INITIAL_CARDS: usize = 5;
const BATCH: usize = 5;
const MAX_CARDS: usize = 15;
/// Fetch more once fewer than this many cards are left ahead
const PREFETCH_DISTANCE: usize = 3;

struct Card {
    index: usize,
}

impl PageContent for Card {
    fn begin_appearance_transition(&mut self, appearing: bool, animated: bool) {
        tracing::trace!(card = self.index, appearing, animated, "Card appearance begins");
    }

    fn end_appearance_transition(&mut self) {
        tracing::trace!(card = self.index, "Card appearance ends");
    }

    fn did_attach(&mut self, frame: Rect) {
        tracing::debug!(card = self.index, y = frame.origin.y, "Card attached");
    }

    fn will_detach(&mut self) {
        tracing::debug!(card = self.index, "Card detached");
    }
}

/// Card feed whose length grows out of band
struct Feed {
    count: AtomicUsize,
}

impl Feed {
    fn grow(&self, by: usize) -> usize {
        let count = (self.count.load(Ordering::SeqCst) + by).min(MAX_CARDS);
        self.count.store(count, Ordering::SeqCst);
        count
    }
}

impl ContentSource for Feed {
    type Content = Card;

    fn page_count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    fn content_at(&self, index: usize) -> Card {
        Card { index }
    }

    fn default_index(&self) -> Option<usize> {
        Some(1)
    }
}

/// Forwards selections to the main loop
struct SelectionLog {
    selected: mpsc::UnboundedSender<usize>,
}

impl TransitionObserver for SelectionLog {
    fn did_finish_transition(&self, from: usize, to: usize) {
        tracing::info!(from, to, "Finished transition");
    }

    fn did_cancel_transition(&self, from: usize, to: usize) {
        tracing::info!(from, to, "Cancelled transition");
    }

    fn did_select(&self, index: usize) {
        if self.selected.send(index).is_err() {
            tracing::debug!(index, "Selection dropped, main loop has stopped listening");
        }
    }
}

/// One reader swipe toward the next card, released past the midpoint
fn swipe_forward(pager: &mut PageViewController<Card>) {
    let start = pager.content_offset();
    let extent = pager.geometry().page_extent();

    pager.begin_dragging();
    for step in 1..=5 {
        pager.scroll_to(Point::new(start.x, start.y + extent * step as f64 / 8.0));
    }
    pager.end_dragging(true);

    let target = pager.offset_for_index(pager.current_index() + 1);
    pager.scroll_to(target);
    pager.end_decelerating();
}

fn load_config() -> anyhow::Result<Config> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config from {path}"))?;
            Ok(Config::from_json(&json)?)
        }
        None => Ok(Config::new(Orientation::Vertical)),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    pageview_core::init_logging();

    let config = load_config()?;
    let feed = Arc::new(Feed {
        count: AtomicUsize::new(INITIAL_CARDS),
    });
    let (selected_tx, mut selected_rx) = mpsc::unbounded_channel();
    let (grown_tx, mut grown_rx) = mpsc::unbounded_channel::<usize>();

    let mut pager = PageViewController::with_config(config, feed.clone());
    pager.add_observer(Arc::new(SelectionLog {
        selected: selected_tx,
    }));
    pager.view_did_load();
    pager.layout(PAGE_SIZE);
    pager.view_will_appear(false);
    pager.view_did_appear();

    tracing::info!(
        cards = pager.page_count(),
        current = pager.current_index(),
        "Feed on screen"
    );

    let mut fetching = false;
    loop {
        swipe_forward(&mut pager);
        tokio::time::sleep(Duration::from_millis(120)).await;

        while let Ok(index) = selected_rx.try_recv() {
            tracing::info!(index, cached = ?pager.cached_indices(), "Reader moved");
        }

        while let Ok(count) = grown_rx.try_recv() {
            fetching = false;
            pager.reload_data(ReloadMode::NoneIfStillValid);
            tracing::info!(cards = count, current = pager.current_index(), "Feed grew");
        }

        let count = pager.page_count();
        let current = pager.current_index();
        if !fetching && count < MAX_CARDS && count - current < PREFETCH_DISTANCE {
            fetching = true;
            let feed = feed.clone();
            let grown = grown_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(300)).await;
                let count = feed.grow(BATCH);
                if grown.send(count).is_err() {
                    tracing::debug!(cards = count, "Growth dropped, main loop has stopped listening");
                }
            });
            tracing::info!(current, cards = count, "Fetching more cards");
        }

        if !fetching && current + 1 >= count {
            break;
        }
    }

    // Back to the top, one animation frame per tick
    let frame = Duration::from_millis(16);
    let mut ticks = tokio::time::interval(frame);
    pager.set_index(0, true);
    while pager.advance_animation(frame) {
        ticks.tick().await;
    }
    tracing::info!(current = pager.current_index(), "Scrolled back to the top");

    pager.did_receive_memory_warning();
    tracing::info!(
        current = pager.current_index(),
        cached = ?pager.cached_indices(),
        "Reached the end of the feed"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_after_loop_stops_is_dropped() {
        let (selected_tx, mut selected_rx) = mpsc::unbounded_channel();
        let log = SelectionLog {
            selected: selected_tx,
        };

        log.did_select(1);
        assert_eq!(selected_rx.try_recv().ok(), Some(1));

        drop(selected_rx);
        log.did_select(2);
    }

    #[test]
    fn test_feed_growth_is_capped() {
        let feed = Feed {
            count: AtomicUsize::new(12),
        };
        assert_eq!(feed.grow(BATCH), MAX_CARDS);
        assert_eq!(feed.page_count(), MAX_CARDS);
    }
}

//! Virtual-scroll exhaustion.
//!
//! Chat UIs only materialize messages near the viewport. Before reading the
//! DOM we bounce the scroll container between its top and bottom edges until
//! the number of rendered message nodes stops growing, then leave it at the
//! top so the earliest message is rendered.
//!
//! The loop is best-effort: hitting the iteration cap without the count
//! settling is not an error, extraction just reads what is loaded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::page::{Clock, Page, ScrollEdge, ScrollTarget};

/// Order of scroll moves within one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollStrategy {
    /// Top, settle, probe, then bottom and a short bounce delay.
    TopFirst,
    /// One initial top + settle, then per iteration bottom, bounce, probe.
    BottomFirst,
}

/// Tuning for one scroll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollConfig {
    /// Hard cap on iterations.
    pub max_iterations: usize,
    /// Wait after jumping to the top (or once up front for `BottomFirst`).
    pub settle_delay: Duration,
    /// Wait after jumping to the bottom.
    pub bounce_delay: Duration,
    /// The loop stops once the count has been unchanged for more than this
    /// many consecutive probes.
    pub stability_threshold: usize,
    pub strategy: ScrollStrategy,
}

impl ScrollConfig {
    pub const DEFAULT: Self = Self {
        max_iterations: 30,
        settle_delay: Duration::from_millis(500),
        bounce_delay: Duration::from_millis(200),
        stability_threshold: 3,
        strategy: ScrollStrategy::TopFirst,
    };
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Shared flag that stops a running scroll loop at its next iteration.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Summary of a finished scroll loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOutcome {
    /// Probes taken.
    pub iterations: usize,
    /// The count settled before the iteration cap.
    pub converged: bool,
    /// The loop stopped because of a [`CancellationFlag`].
    pub cancelled: bool,
    /// No scroll target was available; nothing was scrolled.
    pub skipped: bool,
    /// Last observed message count.
    pub final_count: usize,
}

/// Where to scroll and what to count for one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPlan {
    /// Selector for the scrollable message region.
    pub container: &'static str,
    /// Selector counted to detect newly rendered messages.
    pub probe: &'static str,
    pub config: ScrollConfig,
    /// What to do when `container` is not in the DOM.
    pub fallback: ScrollFallback,
}

/// Behaviour when the scroll container is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollFallback {
    /// Do nothing and extract what is already rendered.
    Skip,
    /// Scroll the whole window with its own configuration.
    Window(ScrollConfig),
}

#[derive(Debug, Default)]
struct ScrollState {
    previous_count: usize,
    stable_iterations: usize,
}

impl ScrollState {
    /// Records a probe. Returns `true` once the count is considered settled.
    fn observe(&mut self, count: usize, threshold: usize) -> bool {
        if count == self.previous_count {
            self.stable_iterations += 1;
            if self.stable_iterations > threshold {
                return true;
            }
        } else {
            self.stable_iterations = 0;
        }
        self.previous_count = count;
        false
    }
}

/// Bounces `target` until `probe` stops growing or the iteration cap is hit.
///
/// Always finishes with `target` scrolled to the top.
pub async fn exhaust<P, C, F>(
    page: &P,
    clock: &C,
    target: ScrollTarget<'_>,
    mut probe: F,
    config: &ScrollConfig,
    cancel: Option<&CancellationFlag>,
) -> ScrollOutcome
where
    P: Page + ?Sized,
    C: Clock + ?Sized,
    F: FnMut(&P) -> usize + Send,
{
    let mut state = ScrollState::default();
    let mut outcome = ScrollOutcome::default();

    if config.strategy == ScrollStrategy::BottomFirst {
        page.scroll_to(target, ScrollEdge::Top);
        clock.sleep(config.settle_delay).await;
    }

    for _ in 0..config.max_iterations {
        if cancel.is_some_and(CancellationFlag::is_cancelled) {
            outcome.cancelled = true;
            break;
        }

        let count = match config.strategy {
            ScrollStrategy::TopFirst => {
                page.scroll_to(target, ScrollEdge::Top);
                clock.sleep(config.settle_delay).await;
                probe(page)
            }
            ScrollStrategy::BottomFirst => {
                page.scroll_to(target, ScrollEdge::Bottom);
                clock.sleep(config.bounce_delay).await;
                probe(page)
            }
        };
        outcome.iterations += 1;
        outcome.final_count = count;
        debug!(iteration = outcome.iterations, count, "scroll probe");

        if state.observe(count, config.stability_threshold) {
            outcome.converged = true;
            break;
        }

        if config.strategy == ScrollStrategy::TopFirst {
            page.scroll_to(target, ScrollEdge::Bottom);
            clock.sleep(config.bounce_delay).await;
        }
    }

    page.scroll_to(target, ScrollEdge::Top);
    outcome
}

/// Loads every message for a site, falling back per `plan` when the scroll
/// container is absent.
pub async fn load_all_messages<P, C>(
    page: &P,
    clock: &C,
    plan: &ScrollPlan,
    cancel: Option<&CancellationFlag>,
) -> ScrollOutcome
where
    P: Page + ?Sized,
    C: Clock + ?Sized,
{
    let probe = |p: &P| p.count(plan.probe);

    let outcome = if page.exists(plan.container) {
        let target = ScrollTarget::Element(plan.container);
        exhaust(page, clock, target, probe, &plan.config, cancel).await
    } else {
        match plan.fallback {
            ScrollFallback::Window(config) => {
                warn!(
                    container = plan.container,
                    "scroll container not found, falling back to window scroll"
                );
                exhaust(page, clock, ScrollTarget::Window, probe, &config, cancel).await
            }
            ScrollFallback::Skip => {
                warn!(
                    container = plan.container,
                    "scroll container not found, skipping scroll loading"
                );
                ScrollOutcome {
                    skipped: true,
                    final_count: page.count(plan.probe),
                    ..ScrollOutcome::default()
                }
            }
        }
    };

    debug!(
        iterations = outcome.iterations,
        converged = outcome.converged,
        cancelled = outcome.cancelled,
        messages = outcome.final_count,
        "scroll loading finished"
    );
    outcome
}

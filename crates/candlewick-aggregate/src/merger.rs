//! Merging ask and bid tick sources into mid-price ticks.

use candlewick_types::{Result, Side, Tick, TickSource};
use tracing::{debug, trace};

/// Events further apart than this (in ms) do not share a mid-price.
pub const GAP_RESET_MS: i64 = 60_000;

/// Pairing state of the merger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairState {
    /// At least one side has not been observed yet.
    Priming,
    /// Both sides have a valid last observation; every event emits a mid-tick.
    Paired,
    /// A gap cleared both sides; waiting for both to report again.
    ResetPending,
    /// Both sources are drained.
    Exhausted,
}

/// Per-side cursor: the next unconsumed tick and the last consumed one.
#[derive(Debug)]
struct Cursor<S> {
    source: S,
    current: Option<Tick>,
    last: Option<Tick>,
}

impl<S: TickSource> Cursor<S> {
    fn prime(mut source: S) -> Result<Self> {
        let current = source.next_tick()?;
        Ok(Self {
            source,
            current,
            last: None,
        })
    }

    /// Records `tick` (the current one) as last and pulls its successor.
    fn consume(&mut self, tick: Tick) -> Result<()> {
        self.last = Some(tick);
        self.current = self.source.next_tick()?;
        Ok(())
    }
}

/// Merges an ask source and a bid source into synthetic mid-price ticks.
///
/// Events are taken from both sides in epoch order (bid first on ties). Once
/// both sides have been observed, every event emits a tick priced at the mean
/// of the latest ask and bid, with size `1.0`. If an event is more than
/// [`GAP_RESET_MS`] after the later of the two previous observations, both
/// observations are discarded and nothing is emitted until both sides report
/// again.
#[derive(Debug)]
pub struct AskBidMerger<A, B> {
    ask: Cursor<A>,
    bid: Cursor<B>,
    reset_pending: bool,
    events: u64,
    gap_resets: u64,
}

impl<A: TickSource, B: TickSource> AskBidMerger<A, B> {
    /// Creates a merger, pulling the first tick of each side.
    ///
    /// # Errors
    ///
    /// Returns an error if either source fails on its first tick.
    pub fn new(ask: A, bid: B) -> Result<Self> {
        Ok(Self {
            ask: Cursor::prime(ask)?,
            bid: Cursor::prime(bid)?,
            reset_pending: false,
            events: 0,
            gap_resets: 0,
        })
    }

    /// Returns the next mid-tick, or None once both sides are drained.
    ///
    /// # Errors
    ///
    /// Returns the first error of either source. The merger is drained
    /// afterwards and further calls return `Ok(None)`.
    pub fn next_mid_tick(&mut self) -> Result<Option<Tick>> {
        loop {
            let (side, tick) = match (self.ask.current, self.bid.current) {
                (None, None) => return Ok(None),
                (None, Some(bid)) => (Side::Bid, bid),
                (Some(ask), None) => (Side::Ask, ask),
                (Some(ask), Some(bid)) if bid.epoch <= ask.epoch => (Side::Bid, bid),
                (Some(ask), Some(_)) => (Side::Ask, ask),
            };

            let prior_epoch = self.prior_epoch();
            let consumed = match side {
                Side::Ask => self.ask.consume(tick),
                Side::Bid => self.bid.consume(tick),
            };
            if let Err(e) = consumed {
                self.drain();
                return Err(e);
            }
            self.events += 1;
            trace!(%side, epoch = tick.epoch, price = tick.price, "merger event");

            if prior_epoch.is_some_and(|prior| tick.epoch.saturating_sub(prior) > GAP_RESET_MS) {
                debug!(
                    epoch = tick.epoch,
                    prior = prior_epoch,
                    "gap exceeded, resetting ask/bid pairing"
                );
                self.ask.last = None;
                self.bid.last = None;
                self.reset_pending = true;
                self.gap_resets += 1;
            }

            let (Some(ask), Some(bid)) = (self.ask.last, self.bid.last) else {
                continue;
            };
            self.reset_pending = false;

            return Ok(Some(Tick::new(tick.epoch, (ask.price + bid.price) / 2.0, 1.0)));
        }
    }

    /// Returns the current pairing state.
    #[must_use]
    pub const fn state(&self) -> PairState {
        if self.ask.current.is_none() && self.bid.current.is_none() {
            PairState::Exhausted
        } else if self.ask.last.is_some() && self.bid.last.is_some() {
            PairState::Paired
        } else if self.reset_pending {
            PairState::ResetPending
        } else {
            PairState::Priming
        }
    }

    /// Returns the number of side ticks consumed so far.
    #[must_use]
    pub const fn events(&self) -> u64 {
        self.events
    }

    /// Returns how many times a gap reset the pairing.
    #[must_use]
    pub const fn gap_resets(&self) -> u64 {
        self.gap_resets
    }

    /// Later of the two last epochs, known only while both sides are paired.
    fn prior_epoch(&self) -> Option<i64> {
        match (self.ask.last, self.bid.last) {
            (Some(ask), Some(bid)) => Some(ask.epoch.max(bid.epoch)),
            _ => None,
        }
    }

    fn drain(&mut self) {
        self.ask.current = None;
        self.bid.current = None;
    }
}

impl<A: TickSource, B: TickSource> Iterator for AskBidMerger<A, B> {
    type Item = Result<Tick>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_mid_tick().transpose()
    }
}

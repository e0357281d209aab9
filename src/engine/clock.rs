//! Named tickers with a maximum frequency
//!
//! The platform loop calls `poll` every animation frame; a ticker only fires
//! once enough time has passed since its last tick. The `system` ticker drives
//! the simulator and cannot be removed.

use std::collections::BTreeMap;

use crate::consts::TARGET_FPS;

/// Ticker that drives the simulator
pub const SYSTEM_TICKER: &str = "system";

/// Options for a new ticker
#[derive(Debug, Clone, Copy)]
pub struct TickerOptions {
    pub auto_start: bool,
    /// Ticks per second, 0 = every poll
    pub max_frequency: f32,
}

impl Default for TickerOptions {
    fn default() -> Self {
        Self {
            auto_start: true,
            max_frequency: TARGET_FPS,
        }
    }
}

#[derive(Debug, Clone)]
struct Ticker {
    started: bool,
    min_interval: f64,
    last: Option<f64>,
}

/// Collection of tickers keyed by name
#[derive(Debug, Clone)]
pub struct GameClock {
    tickers: BTreeMap<String, Ticker>,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(TARGET_FPS)
    }
}

impl GameClock {
    /// Clock with the system ticker capped at `system_frequency`
    pub fn new(system_frequency: f32) -> Self {
        let mut clock = Self {
            tickers: BTreeMap::new(),
        };
        clock.add_ticker(
            SYSTEM_TICKER,
            TickerOptions {
                auto_start: true,
                max_frequency: system_frequency,
            },
        );
        clock
    }

    /// Register a ticker. Returns false (and keeps the old one) on duplicates.
    pub fn add_ticker(&mut self, id: &str, options: TickerOptions) -> bool {
        if self.tickers.contains_key(id) {
            log::warn!("ticker '{id}' already exists");
            return false;
        }
        let min_interval = if options.max_frequency > 0.0 {
            1.0 / options.max_frequency as f64
        } else {
            0.0
        };
        self.tickers.insert(
            id.to_string(),
            Ticker {
                started: options.auto_start,
                min_interval,
                last: None,
            },
        );
        true
    }

    pub fn has_ticker(&self, id: &str) -> bool {
        self.tickers.contains_key(id)
    }

    /// Remove a ticker. The system ticker is never removed.
    pub fn destroy_ticker(&mut self, id: &str) -> bool {
        if id == SYSTEM_TICKER {
            log::warn!("the system ticker cannot be destroyed");
            return false;
        }
        self.tickers.remove(id).is_some()
    }

    pub fn start(&mut self, id: &str) {
        if let Some(ticker) = self.tickers.get_mut(id) {
            ticker.started = true;
        }
    }

    /// Stop a ticker; the next start begins a fresh interval
    pub fn stop(&mut self, id: &str) {
        if let Some(ticker) = self.tickers.get_mut(id) {
            ticker.started = false;
            ticker.last = None;
        }
    }

    pub fn is_started(&self, id: &str) -> bool {
        self.tickers.get(id).is_some_and(|t| t.started)
    }

    /// Seconds since the ticker last fired, if it fires at `now` (seconds)
    ///
    /// The first poll after a start only records the time.
    pub fn poll(&mut self, id: &str, now: f64) -> Option<f32> {
        let ticker = self.tickers.get_mut(id)?;
        if !ticker.started {
            return None;
        }
        let Some(last) = ticker.last else {
            ticker.last = Some(now);
            return None;
        };
        let elapsed = now - last;
        // Tolerate timestamps landing just short of the interval
        if elapsed < ticker.min_interval * 0.999 {
            return None;
        }
        ticker.last = Some(now);
        Some(elapsed as f32)
    }

    /// Remove every ticker but the system one
    pub fn destroy(&mut self) {
        self.tickers.retain(|id, _| id == SYSTEM_TICKER);
        self.stop(SYSTEM_TICKER);
    }
}

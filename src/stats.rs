// Copyright 2026 The Lapse Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::Deserialize;
use serde::Serialize;

use crate::strategy::STRATEGIES;
use crate::types::date::Date;

/// The horizon of every rolling window, in days. Shared by all windows in
/// a deck's statistics.
pub const MAX_RANGE: usize = 30;

/// A fixed-length window of daily counts. Slot 0 is the alignment date of
/// the statistics that own the window; increasing slots lie further in
/// the past.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct RollingWindow {
    counts: Vec<u32>,
}

impl RollingWindow {
    pub fn new() -> Self {
        Self {
            counts: vec![0; MAX_RANGE],
        }
    }

    #[cfg(test)]
    pub fn from_counts(counts: Vec<u32>) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    fn bump_today(&mut self) {
        self.counts[0] = self.counts[0].saturating_add(1);
    }

    /// Age the window by `delta` days: every entry moves `delta` slots
    /// into the past, entries shifted past the end are dropped, and the
    /// newly uncovered slots are zero.
    fn shift(&mut self, delta: u64) {
        let len = self.counts.len();
        if delta as usize >= len {
            self.counts.fill(0);
            return;
        }
        let delta = delta as usize;
        self.counts.copy_within(0..len - delta, delta);
        self.counts[..delta].fill(0);
    }
}

impl Default for RollingWindow {
    fn default() -> Self {
        Self::new()
    }
}

/// Rolling review statistics for one deck. Created alongside the deck,
/// mutated on every review and on calendar-day rollover, and deleted only
/// when the deck is.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DeckStatistics {
    deck_name: String,
    /// The calendar date slot 0 of every window is aligned to.
    today: Date,
    /// Counts of cards reviewed for the first time ever.
    first_time_reviewed: RollingWindow,
    /// Per-strategy review counts, keyed by strategy index.
    per_strategy: Vec<RollingWindow>,
}

impl DeckStatistics {
    pub fn new(deck_name: String, today: Date) -> Self {
        Self {
            deck_name,
            today,
            first_time_reviewed: RollingWindow::new(),
            per_strategy: vec![RollingWindow::new(); STRATEGIES.len()],
        }
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn first_time_reviewed(&self) -> &RollingWindow {
        &self.first_time_reviewed
    }

    /// The review counts recorded for one strategy. An index that no
    /// strategy owns is a programming error and panics.
    pub fn strategy_counts(&self, index: usize) -> &RollingWindow {
        match self.per_strategy.get(index) {
            Some(window) => window,
            None => panic!("no statistics window for strategy index {index}"),
        }
    }

    /// Realign the windows so that slot 0 means `actual_today`.
    ///
    /// A no-op when already aligned. When the whole horizon has elapsed,
    /// every window is zeroed: the history has fully aged out, which is
    /// not an error. A clock that moved backwards is ignored.
    pub fn roll_to(&mut self, actual_today: Date) {
        let delta = actual_today.days_since(self.today);
        if delta == 0 {
            return;
        }
        if delta < 0 {
            log::warn!(
                "statistics for {} asked to roll back from {} to {}; ignoring",
                self.deck_name,
                self.today,
                actual_today
            );
            return;
        }
        self.first_time_reviewed.shift(delta as u64);
        for window in &mut self.per_strategy {
            window.shift(delta as u64);
        }
        self.today = actual_today;
    }

    /// Count a card's first-ever review. Called exactly once per card, at
    /// the moment it stops being new.
    pub fn record_first_time_review(&mut self, today: Date) {
        self.roll_to(today);
        self.first_time_reviewed.bump_today();
    }

    /// Count a review under the given strategy. An index that no strategy
    /// owns is a programming error and panics.
    pub fn record_strategy_review(&mut self, index: usize, today: Date) {
        self.roll_to(today);
        match self.per_strategy.get_mut(index) {
            Some(window) => window.bump_today(),
            None => panic!("no statistics window for strategy index {index}"),
        }
    }
}

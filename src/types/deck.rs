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

use crate::scheduler::Algorithm;
use crate::stats::DeckStatistics;
use crate::types::card::Card;
use crate::types::date::Date;

/// A deck: a named collection of cards bound to one scheduling algorithm.
///
/// The binding happens when the deck is created and never changes; cards
/// and statistics always go through the deck so they stay consistent with
/// its algorithm.
pub struct Deck {
    name: String,
    algorithm: Algorithm,
}

impl Deck {
    pub fn new(name: String, algorithm: Algorithm) -> Self {
        Self { name, algorithm }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }

    /// Create a card in this deck, due today in both directions.
    pub fn new_card(&self, front: String, back: String, today: Date) -> Card {
        self.algorithm
            .create_card(self.name.clone(), front, back, today)
    }

    /// The empty statistics a freshly created deck starts with.
    pub fn new_statistics(&self, today: Date) -> DeckStatistics {
        DeckStatistics::new(self.name.clone(), today)
    }
}

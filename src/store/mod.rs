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

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::Fallible;
use crate::stats::DeckStatistics;
use crate::types::card::Card;
use crate::types::card_id::CardId;

/// The persistence boundary. Every call is synchronous; callers commit
/// in-memory changes only after the corresponding store call returned
/// `Ok`, so a failed save never leaves memory and storage disagreeing.
pub trait Store {
    /// All cards of one deck. Order is stable across calls.
    fn load_cards(&self, deck_name: &str) -> Fallible<Vec<Card>>;

    /// Insert or overwrite one card.
    fn save_card(&mut self, card: &Card) -> Fallible<()>;

    /// Remove one card. Deleting a card that is not stored is an error.
    fn delete_card(&mut self, id: CardId) -> Fallible<()>;

    /// The statistics of one deck, or `None` when the deck has never
    /// been saved.
    fn load_statistics(&self, deck_name: &str) -> Fallible<Option<DeckStatistics>>;

    /// Insert or overwrite one deck's statistics.
    fn save_statistics(&mut self, stats: &DeckStatistics) -> Fallible<()>;

    /// Remove one deck's statistics, when the deck itself is deleted.
    fn delete_statistics(&mut self, deck_name: &str) -> Fallible<()>;
}

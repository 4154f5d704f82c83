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

use std::collections::HashMap;

use crate::error::Fallible;
use crate::error::fail;
use crate::stats::DeckStatistics;
use crate::store::Store;
use crate::types::card::Card;
use crate::types::card_id::CardId;

/// An in-memory store. Used by tests and by callers that do not want
/// their session persisted.
#[derive(Default)]
pub struct MemoryStore {
    cards: HashMap<CardId, Card>,
    statistics: HashMap<String, DeckStatistics>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load_cards(&self, deck_name: &str) -> Fallible<Vec<Card>> {
        let mut cards: Vec<Card> = self
            .cards
            .values()
            .filter(|card| card.deck_name() == deck_name)
            .cloned()
            .collect();
        cards.sort_by_key(|card| (card.created_at(), card.id()));
        Ok(cards)
    }

    fn save_card(&mut self, card: &Card) -> Fallible<()> {
        self.cards.insert(card.id(), card.clone());
        Ok(())
    }

    fn delete_card(&mut self, id: CardId) -> Fallible<()> {
        match self.cards.remove(&id) {
            Some(_) => Ok(()),
            None => fail(format!("no card with id {id}")),
        }
    }

    fn load_statistics(&self, deck_name: &str) -> Fallible<Option<DeckStatistics>> {
        Ok(self.statistics.get(deck_name).cloned())
    }

    fn save_statistics(&mut self, stats: &DeckStatistics) -> Fallible<()> {
        self.statistics
            .insert(stats.deck_name().to_string(), stats.clone());
        Ok(())
    }

    fn delete_statistics(&mut self, deck_name: &str) -> Fallible<()> {
        match self.statistics.remove(deck_name) {
            Some(_) => Ok(()),
            None => fail(format!("no statistics for deck {deck_name}")),
        }
    }
}

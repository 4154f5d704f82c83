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

use crate::types::card_id::CardId;
use crate::types::date::Date;
use crate::types::direction::Direction;
use crate::types::direction::PerDirection;

/// The floor for a constant-coefficient card's base time.
pub const MIN_BASE_TIME: f64 = 0.01;

/// The floor for an SM-2 card's review interval, in days.
pub const MIN_INTERVAL: u32 = 1;

/// The floor for an SM-2 card's easiness factor.
pub const MIN_EASINESS: f64 = 1.3;

/// A two-sided flashcard together with its scheduling state.
///
/// The card's identity is derived from its deck and text content, so the
/// text fields are immutable. The scheduling state is mutated only by the
/// algorithm variant that created the card.
#[derive(Clone, PartialEq, Debug)]
pub struct Card {
    id: CardId,
    /// The name of the deck this card belongs to. A lookup key; the deck
    /// owns the card, not the other way around.
    deck_name: String,
    front: String,
    back: String,
    created_at: Date,
    /// True until the card has been reviewed for the first time, in
    /// either direction.
    is_new: bool,
    /// The next due date, one per review direction. Defaults to the
    /// creation date.
    due: PerDirection<Date>,
    state: CardState,
}

/// Per-variant scheduling state. A card carries the state of exactly one
/// algorithm, and only that algorithm may grade it.
#[derive(Clone, PartialEq, Debug)]
pub enum CardState {
    ConstantCoefficient(PerDirection<ConstantState>),
    Sm2(PerDirection<Sm2State>),
}

/// Constant-coefficient scheduling state for one direction.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ConstantState {
    base_time: f64,
    incorrect_count: u32,
}

impl ConstantState {
    pub fn new() -> Self {
        Self {
            base_time: 1.0,
            incorrect_count: 0,
        }
    }

    pub fn restore(base_time: f64, incorrect_count: u32) -> Self {
        Self {
            base_time: base_time.max(MIN_BASE_TIME),
            incorrect_count,
        }
    }

    pub fn base_time(&self) -> f64 {
        self.base_time
    }

    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    /// Multiply the base time by a coefficient, clamping at the floor.
    pub fn scale_base_time(&mut self, coefficient: f64) {
        self.base_time = (self.base_time * coefficient).max(MIN_BASE_TIME);
    }

    pub fn bump_incorrect_count(&mut self) {
        self.incorrect_count = self.incorrect_count.saturating_add(1);
    }
}

impl Default for ConstantState {
    fn default() -> Self {
        Self::new()
    }
}

/// SM-2 scheduling state for one direction.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Sm2State {
    repetition: u32,
    interval: u32,
    easiness: f64,
    incorrect_count: u32,
}

impl Sm2State {
    pub fn new(initial_easiness: f64) -> Self {
        Self {
            repetition: 0,
            interval: MIN_INTERVAL,
            easiness: initial_easiness.max(MIN_EASINESS),
            incorrect_count: 0,
        }
    }

    pub fn restore(repetition: u32, interval: u32, easiness: f64, incorrect_count: u32) -> Self {
        Self {
            repetition,
            interval: interval.max(MIN_INTERVAL),
            easiness: easiness.max(MIN_EASINESS),
            incorrect_count,
        }
    }

    pub fn repetition(&self) -> u32 {
        self.repetition
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn easiness(&self) -> f64 {
        self.easiness
    }

    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    pub fn bump_repetition(&mut self) {
        self.repetition = self.repetition.saturating_add(1);
    }

    pub fn reset_repetition(&mut self) {
        self.repetition = 0;
    }

    /// Set the review interval, clamping at the one-day floor.
    pub fn set_interval(&mut self, interval: u32) {
        self.interval = interval.max(MIN_INTERVAL);
    }

    /// Set the easiness factor, clamping at the floor.
    pub fn set_easiness(&mut self, easiness: f64) {
        self.easiness = easiness.max(MIN_EASINESS);
    }

    pub fn bump_incorrect_count(&mut self) {
        self.incorrect_count = self.incorrect_count.saturating_add(1);
    }
}

impl Card {
    /// Create a card due today in both directions. Called through the
    /// algorithm that owns the state variant, never directly.
    pub fn new(
        deck_name: String,
        front: String,
        back: String,
        created_at: Date,
        state: CardState,
    ) -> Self {
        let id = CardId::of(&deck_name, &front, &back);
        Self {
            id,
            deck_name,
            front,
            back,
            created_at,
            is_new: true,
            due: PerDirection::splat(created_at),
            state,
        }
    }

    /// Rebuild a card from stored fields.
    pub fn restore(
        deck_name: String,
        front: String,
        back: String,
        created_at: Date,
        is_new: bool,
        due: PerDirection<Date>,
        state: CardState,
    ) -> Self {
        let id = CardId::of(&deck_name, &front, &back);
        Self {
            id,
            deck_name,
            front,
            back,
            created_at,
            is_new,
            due,
            state,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    pub fn created_at(&self) -> Date {
        self.created_at
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn due(&self, direction: Direction) -> Date {
        *self.due.get(direction)
    }

    pub fn set_due(&mut self, direction: Direction, date: Date) {
        *self.due.get_mut(direction) = date;
    }

    /// Mark the card as having been reviewed at least once.
    pub fn mark_reviewed(&mut self) {
        self.is_new = false;
    }

    pub fn state(&self) -> &CardState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CardState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Card {
        Card::new(
            "languages".to_string(),
            "bonjour".to_string(),
            "hello".to_string(),
            Date::from_ymd(2026, 1, 1),
            CardState::ConstantCoefficient(PerDirection::splat(ConstantState::new())),
        )
    }

    #[test]
    fn test_new_card_defaults() {
        let card = card();
        assert!(card.is_new());
        assert_eq!(card.due(Direction::Regular), card.created_at());
        assert_eq!(card.due(Direction::Reverse), card.created_at());
    }

    #[test]
    fn test_due_dates_are_independent() {
        let mut card = card();
        card.set_due(Direction::Reverse, Date::from_ymd(2026, 1, 5));
        assert_eq!(card.due(Direction::Regular), Date::from_ymd(2026, 1, 1));
        assert_eq!(card.due(Direction::Reverse), Date::from_ymd(2026, 1, 5));
    }

    #[test]
    fn test_base_time_floor() {
        let mut state = ConstantState::new();
        for _ in 0..100 {
            state.scale_base_time(0.1);
        }
        assert_eq!(state.base_time(), MIN_BASE_TIME);
    }

    #[test]
    fn test_interval_floor() {
        let mut state = Sm2State::new(2.5);
        state.set_interval(0);
        assert_eq!(state.interval(), MIN_INTERVAL);
    }

    #[test]
    fn test_easiness_floor() {
        let mut state = Sm2State::new(2.5);
        state.set_easiness(0.4);
        assert_eq!(state.easiness(), MIN_EASINESS);
        let fresh = Sm2State::new(1.0);
        assert_eq!(fresh.easiness(), MIN_EASINESS);
    }

    #[test]
    fn test_mark_reviewed() {
        let mut card = card();
        card.mark_reviewed();
        assert!(!card.is_new());
        card.mark_reviewed();
        assert!(!card.is_new());
    }
}

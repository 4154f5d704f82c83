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
use crate::scheduler::GradeOutcome;
use crate::types::card::Card;
use crate::types::date::Date;
use crate::types::direction::Direction;

/// A revision strategy: one review direction, bound to the card side used
/// as the prompt, the due date consulted for dueness, and the statistics
/// slot it increments.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Strategy {
    direction: Direction,
}

/// The strategies every deck exposes, in order. The position of a
/// strategy in this list is its statistics index; the list must never be
/// reordered, since recorded statistics are keyed on the position.
pub const STRATEGIES: [Strategy; 2] = [
    Strategy {
        direction: Direction::Regular,
    },
    Strategy {
        direction: Direction::Reverse,
    },
];

impl Strategy {
    pub fn for_direction(direction: Direction) -> Self {
        Self { direction }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The strategy's position in [STRATEGIES], used as the statistics
    /// key.
    pub fn index(&self) -> usize {
        match self.direction {
            Direction::Regular => 0,
            Direction::Reverse => 1,
        }
    }

    /// The side of the card shown to the user.
    pub fn prompt<'a>(&self, card: &'a Card) -> &'a str {
        match self.direction {
            Direction::Regular => card.front(),
            Direction::Reverse => card.back(),
        }
    }

    /// The side of the card the user is asked to recall.
    pub fn answer<'a>(&self, card: &'a Card) -> &'a str {
        match self.direction {
            Direction::Regular => card.back(),
            Direction::Reverse => card.front(),
        }
    }

    pub fn next_due(&self, card: &Card) -> Date {
        card.due(self.direction)
    }

    pub fn is_due(&self, card: &Card, today: Date) -> bool {
        self.next_due(card) <= today
    }

    pub fn due_count(&self, cards: &[Card], today: Date) -> usize {
        cards.iter().filter(|card| self.is_due(card, today)).count()
    }

    pub fn actions(&self, algorithm: &Algorithm) -> &'static [&'static str] {
        algorithm.actions(self.direction)
    }

    /// Grade the card under this strategy's direction.
    pub fn apply(
        &self,
        algorithm: &Algorithm,
        card: &mut Card,
        action_index: usize,
        today: Date,
    ) -> GradeOutcome {
        algorithm.grade(card, self.direction, action_index, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ConstantParams;
    use crate::types::direction::PerDirection;

    fn algorithm() -> Algorithm {
        let params = ConstantParams::new(0.5, 2.0, 3).unwrap();
        Algorithm::ConstantCoefficient(PerDirection::splat(params))
    }

    fn today() -> Date {
        Date::from_ymd(2026, 2, 1)
    }

    #[test]
    fn test_strategy_order_is_stable() {
        assert_eq!(STRATEGIES[0].direction(), Direction::Regular);
        assert_eq!(STRATEGIES[1].direction(), Direction::Reverse);
        for (position, strategy) in STRATEGIES.iter().enumerate() {
            assert_eq!(strategy.index(), position);
        }
    }

    #[test]
    fn test_prompt_and_answer_sides() {
        let card = algorithm().create_card("deck".into(), "eau".into(), "water".into(), today());
        let regular = Strategy::for_direction(Direction::Regular);
        let reverse = Strategy::for_direction(Direction::Reverse);
        assert_eq!(regular.prompt(&card), "eau");
        assert_eq!(regular.answer(&card), "water");
        assert_eq!(reverse.prompt(&card), "water");
        assert_eq!(reverse.answer(&card), "eau");
    }

    #[test]
    fn test_due_count_consults_own_direction_only() {
        let algorithm = algorithm();
        let mut first = algorithm.create_card("deck".into(), "a".into(), "b".into(), today());
        let second = algorithm.create_card("deck".into(), "c".into(), "d".into(), today());
        // Push the first card's regular due date into the future.
        algorithm.grade(&mut first, Direction::Regular, 1, today());
        let cards = vec![first, second];
        let regular = Strategy::for_direction(Direction::Regular);
        let reverse = Strategy::for_direction(Direction::Reverse);
        assert_eq!(regular.due_count(&cards, today()), 1);
        assert_eq!(reverse.due_count(&cards, today()), 2);
    }

    #[test]
    fn test_overdue_cards_are_due() {
        let algorithm = algorithm();
        let card = algorithm.create_card("deck".into(), "a".into(), "b".into(), today());
        let strategy = Strategy::for_direction(Direction::Regular);
        assert!(strategy.is_due(&card, today()));
        assert!(strategy.is_due(&card, today().plus_days(10)));
    }

    #[test]
    fn test_apply_delegates_to_the_algorithm() {
        let algorithm = algorithm();
        let mut card = algorithm.create_card("deck".into(), "a".into(), "b".into(), today());
        let strategy = Strategy::for_direction(Direction::Reverse);
        let outcome = strategy.apply(&algorithm, &mut card, 1, today());
        assert_eq!(card.due(Direction::Reverse), outcome.due);
        assert_eq!(card.due(Direction::Regular), today());
    }
}

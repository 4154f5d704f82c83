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

pub mod constant;
pub mod sm2;

use crate::types::card::Card;
use crate::types::card::CardState;
use crate::types::card::ConstantState;
use crate::types::card::Sm2State;
use crate::types::date::Date;
use crate::types::direction::Direction;
use crate::types::direction::PerDirection;

pub use constant::ConstantParams;
pub use sm2::Sm2Params;

/// The result of grading a card in one direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GradeOutcome {
    /// The new due date, already written into the card.
    pub due: Date,
    /// Whether review of this card is finished for the current session.
    /// When false the card reappears in the same session.
    pub session_done: bool,
}

/// A scheduling policy and its hyperparameters.
///
/// An algorithm is bound to a deck when the deck is created and is
/// immutable afterwards. It creates cards of its own state variant and is
/// the only thing that grades them; handing it a card of the other
/// variant is a programming error and panics.
#[derive(Clone, PartialEq, Debug)]
pub enum Algorithm {
    ConstantCoefficient(PerDirection<ConstantParams>),
    Sm2(PerDirection<Sm2Params>),
}

impl Algorithm {
    /// Create a new card of this algorithm's variant, due today in both
    /// directions. Empty strings are allowed; whether they are sensible
    /// is the caller's concern.
    pub fn create_card(&self, deck_name: String, front: String, back: String, today: Date) -> Card {
        let state = match self {
            Algorithm::ConstantCoefficient(_) => {
                CardState::ConstantCoefficient(PerDirection::splat(ConstantState::new()))
            }
            Algorithm::Sm2(params) => CardState::Sm2(PerDirection {
                regular: Sm2State::new(params.regular.initial_easiness()),
                reverse: Sm2State::new(params.reverse.initial_easiness()),
            }),
        };
        Card::new(deck_name, front, back, today, state)
    }

    /// The ordered action labels for one direction. The position of a
    /// label is the action index passed to [Algorithm::grade], and the
    /// order never changes: statistics are keyed on it.
    pub fn actions(&self, _direction: Direction) -> &'static [&'static str] {
        match self {
            Algorithm::ConstantCoefficient(_) => &constant::ACTIONS,
            Algorithm::Sm2(_) => &sm2::ACTIONS,
        }
    }

    /// Apply the chosen action to the card's state for one direction,
    /// writing the new due date into the card.
    ///
    /// Panics when the action index is out of range or the card's state
    /// variant does not match this algorithm.
    pub fn grade(
        &self,
        card: &mut Card,
        direction: Direction,
        action_index: usize,
        today: Date,
    ) -> GradeOutcome {
        let outcome = match (self, card.state_mut()) {
            (Algorithm::ConstantCoefficient(params), CardState::ConstantCoefficient(states)) => {
                constant::grade(
                    params.get(direction),
                    states.get_mut(direction),
                    action_index,
                    today,
                )
            }
            (Algorithm::Sm2(_), CardState::Sm2(states)) => {
                sm2::grade(states.get_mut(direction), action_index, today)
            }
            _ => panic!("card state does not match the deck's algorithm"),
        };
        card.set_due(direction, outcome.due);
        outcome
    }
}

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

use std::collections::VecDeque;

use crate::error::Fallible;
use crate::error::fail;
use crate::scheduler::Algorithm;
use crate::scheduler::GradeOutcome;
use crate::stats::DeckStatistics;
use crate::store::Store;
use crate::strategy::Strategy;
use crate::types::card::Card;
use crate::types::date::Date;
use crate::types::deck::Deck;

/// One sitting of reviews: a queue of due cards for one deck under one
/// strategy.
///
/// The front of the queue is the card being prompted. Grading a card
/// persists it and the updated statistics before anything changes in
/// memory, so a failed save leaves the session exactly where it was. A
/// card whose outcome keeps it in the session goes to the back of the
/// queue.
pub struct ReviewSession {
    algorithm: Algorithm,
    strategy: Strategy,
    stats: DeckStatistics,
    queue: VecDeque<Card>,
}

impl ReviewSession {
    /// Load the deck's due cards and statistics and start a session.
    pub fn start(
        deck: &Deck,
        strategy: Strategy,
        store: &dyn Store,
        today: Date,
    ) -> Fallible<Self> {
        let cards = store.load_cards(deck.name())?;
        let stats = match store.load_statistics(deck.name())? {
            Some(stats) => stats,
            None => deck.new_statistics(today),
        };
        let queue: VecDeque<Card> = cards
            .into_iter()
            .filter(|card| strategy.is_due(card, today))
            .collect();
        log::debug!(
            "Starting {} session for deck {} with {} due cards.",
            strategy.direction(),
            deck.name(),
            queue.len()
        );
        Ok(Self {
            algorithm: deck.algorithm().clone(),
            strategy,
            stats,
            queue,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// The card currently being prompted, if any.
    pub fn current(&self) -> Option<&Card> {
        self.queue.front()
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The ordered action labels to show the user.
    pub fn actions(&self) -> &'static [&'static str] {
        self.algorithm.actions(self.strategy.direction())
    }

    pub fn statistics(&self) -> &DeckStatistics {
        &self.stats
    }

    /// Grade the current card with the chosen action.
    ///
    /// The updated card and statistics are saved through the store first;
    /// only once both saves succeed is the session state committed. The
    /// first-ever review of a card is recorded in the statistics exactly
    /// once, at the moment the card stops being new.
    pub fn answer(
        &mut self,
        action_index: usize,
        store: &mut dyn Store,
        today: Date,
    ) -> Fallible<GradeOutcome> {
        let Some(card) = self.queue.front() else {
            return fail("the session has no card to answer");
        };
        let mut card = card.clone();
        let first_review = card.is_new();
        card.mark_reviewed();
        let outcome = self
            .strategy
            .apply(&self.algorithm, &mut card, action_index, today);

        let mut stats = self.stats.clone();
        if first_review {
            stats.record_first_time_review(today);
        }
        stats.record_strategy_review(self.strategy.index(), today);

        store.save_card(&card)?;
        store.save_statistics(&stats)?;

        self.stats = stats;
        self.queue.pop_front();
        if !outcome.session_done {
            self.queue.push_back(card);
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorReport;
    use crate::scheduler::ConstantParams;
    use crate::scheduler::Sm2Params;
    use crate::store::MemoryStore;
    use crate::types::card_id::CardId;
    use crate::types::direction::Direction;
    use crate::types::direction::PerDirection;

    const INCORRECT: usize = 0;
    const CORRECT: usize = 1;

    fn constant_deck() -> Deck {
        // Threshold 2: the second incorrect answer traps the card in the
        // session.
        let params = ConstantParams::new(0.5, 2.0, 2).unwrap();
        Deck::new(
            "deck".to_string(),
            Algorithm::ConstantCoefficient(PerDirection::splat(params)),
        )
    }

    fn sm2_deck() -> Deck {
        let params = Sm2Params::new(2.5, 2).unwrap();
        Deck::new("deck".to_string(), Algorithm::Sm2(PerDirection::splat(params)))
    }

    fn today() -> Date {
        Date::from_ymd(2026, 5, 1)
    }

    fn seeded_store(deck: &Deck, fronts: &[&str]) -> MemoryStore {
        let mut store = MemoryStore::new();
        for front in fronts {
            let card = deck.new_card(front.to_string(), format!("{front}-back"), today());
            store.save_card(&card).unwrap();
        }
        store
    }

    #[test]
    fn test_only_due_cards_enter_the_session() -> Fallible<()> {
        let deck = constant_deck();
        let mut store = seeded_store(&deck, &["a", "b"]);
        // Schedule one card into the future.
        let mut cards = store.load_cards("deck")?;
        let mut card = cards.remove(0);
        deck.algorithm().grade(&mut card, Direction::Regular, CORRECT, today());
        store.save_card(&card)?;

        let strategy = Strategy::for_direction(Direction::Regular);
        let session = ReviewSession::start(&deck, strategy, &store, today())?;
        assert_eq!(session.remaining(), 1);
        Ok(())
    }

    #[test]
    fn test_correct_answer_retires_the_card() -> Fallible<()> {
        let deck = constant_deck();
        let mut store = seeded_store(&deck, &["a"]);
        let strategy = Strategy::for_direction(Direction::Regular);
        let mut session = ReviewSession::start(&deck, strategy, &store, today())?;
        let outcome = session.answer(CORRECT, &mut store, today())?;
        assert!(outcome.session_done);
        assert!(session.is_finished());
        // The store saw the new due date.
        let cards = store.load_cards("deck")?;
        assert_eq!(cards[0].due(Direction::Regular), today().plus_days(2));
        Ok(())
    }

    #[test]
    fn test_incorrect_below_threshold_leaves_the_session() -> Fallible<()> {
        let deck = constant_deck();
        let mut store = seeded_store(&deck, &["a"]);
        let strategy = Strategy::for_direction(Direction::Regular);
        let mut session = ReviewSession::start(&deck, strategy, &store, today())?;
        // One incorrect answer stays below the threshold of 2: the card
        // is rescheduled for today but the session moves on.
        let outcome = session.answer(INCORRECT, &mut store, today())?;
        assert!(outcome.session_done);
        assert!(session.is_finished());
        let cards = store.load_cards("deck")?;
        assert_eq!(cards[0].due(Direction::Regular), today());
        Ok(())
    }

    #[test]
    fn test_struggling_card_reappears_at_the_back() -> Fallible<()> {
        // Threshold 1: any incorrect answer traps the card in the
        // session until it is answered correctly.
        let params = ConstantParams::new(0.5, 2.0, 1).unwrap();
        let deck = Deck::new(
            "deck".to_string(),
            Algorithm::ConstantCoefficient(PerDirection::splat(params)),
        );
        let mut store = seeded_store(&deck, &["a", "b"]);
        let strategy = Strategy::for_direction(Direction::Regular);
        let mut session = ReviewSession::start(&deck, strategy, &store, today())?;
        let first = session.current().unwrap().front().to_string();

        let outcome = session.answer(INCORRECT, &mut store, today())?;
        assert!(!outcome.session_done);
        // The failed card went to the back; the other card is up next.
        assert_eq!(session.remaining(), 2);
        assert_ne!(session.current().unwrap().front(), first);

        let outcome = session.answer(CORRECT, &mut store, today())?;
        assert!(outcome.session_done);
        assert_eq!(session.remaining(), 1);
        assert_eq!(session.current().unwrap().front(), first);

        // A correct answer finally releases the struggling card.
        let outcome = session.answer(CORRECT, &mut store, today())?;
        assert!(outcome.session_done);
        assert!(session.is_finished());
        Ok(())
    }

    #[test]
    fn test_sm2_failure_ends_the_card_session() -> Fallible<()> {
        // Unlike the constant-coefficient policy, a failed SM-2 review
        // never loops the card back into the queue.
        let deck = sm2_deck();
        let mut store = seeded_store(&deck, &["a"]);
        let strategy = Strategy::for_direction(Direction::Regular);
        let mut session = ReviewSession::start(&deck, strategy, &store, today())?;
        let outcome = session.answer(0, &mut store, today())?;
        assert!(outcome.session_done);
        assert!(session.is_finished());
        assert_eq!(outcome.due, today().plus_days(1));
        Ok(())
    }

    #[test]
    fn test_first_review_is_recorded_once() -> Fallible<()> {
        let deck = constant_deck();
        let mut store = seeded_store(&deck, &["a"]);
        let strategy = Strategy::for_direction(Direction::Regular);
        let mut session = ReviewSession::start(&deck, strategy, &store, today())?;
        // Trap the card in the session, then answer it three more times.
        session.answer(INCORRECT, &mut store, today())?;
        let mut session = ReviewSession::start(&deck, strategy, &store, today())?;
        session.answer(INCORRECT, &mut store, today())?;
        session.answer(INCORRECT, &mut store, today())?;
        session.answer(CORRECT, &mut store, today())?;

        let stats = store.load_statistics("deck")?.unwrap();
        assert_eq!(stats.first_time_reviewed().counts()[0], 1);
        assert_eq!(stats.strategy_counts(strategy.index()).counts()[0], 4);
        assert_eq!(stats.strategy_counts(1).counts()[0], 0);
        Ok(())
    }

    #[test]
    fn test_reverse_reviews_count_toward_their_own_strategy() -> Fallible<()> {
        let deck = constant_deck();
        let mut store = seeded_store(&deck, &["a"]);
        let strategy = Strategy::for_direction(Direction::Reverse);
        let mut session = ReviewSession::start(&deck, strategy, &store, today())?;
        session.answer(CORRECT, &mut store, today())?;
        let stats = store.load_statistics("deck")?.unwrap();
        assert_eq!(stats.strategy_counts(1).counts()[0], 1);
        assert_eq!(stats.strategy_counts(0).counts()[0], 0);
        Ok(())
    }

    #[test]
    fn test_answering_an_empty_session_is_an_error() -> Fallible<()> {
        let deck = constant_deck();
        let mut store = MemoryStore::new();
        let strategy = Strategy::for_direction(Direction::Regular);
        let mut session = ReviewSession::start(&deck, strategy, &store, today())?;
        assert!(session.answer(CORRECT, &mut store, today()).is_err());
        Ok(())
    }

    /// A store whose saves always fail.
    struct BrokenStore;

    impl Store for BrokenStore {
        fn load_cards(&self, _deck_name: &str) -> Fallible<Vec<Card>> {
            Ok(Vec::new())
        }

        fn save_card(&mut self, _card: &Card) -> Fallible<()> {
            fail("disk on fire")
        }

        fn delete_card(&mut self, _id: CardId) -> Fallible<()> {
            fail("disk on fire")
        }

        fn load_statistics(&self, _deck_name: &str) -> Fallible<Option<DeckStatistics>> {
            Ok(None)
        }

        fn save_statistics(&mut self, _stats: &DeckStatistics) -> Fallible<()> {
            fail("disk on fire")
        }

        fn delete_statistics(&mut self, _deck_name: &str) -> Fallible<()> {
            fail("disk on fire")
        }
    }

    #[test]
    fn test_failed_save_leaves_the_session_untouched() -> Fallible<()> {
        let deck = constant_deck();
        let store = seeded_store(&deck, &["a"]);
        let strategy = Strategy::for_direction(Direction::Regular);
        let mut session = ReviewSession::start(&deck, strategy, &store, today())?;

        let mut broken = BrokenStore;
        let result = session.answer(CORRECT, &mut broken, today());
        assert_eq!(result, Err(ErrorReport::new("disk on fire")));
        // Nothing was committed: the card is still queued and new, and
        // no review was counted.
        assert_eq!(session.remaining(), 1);
        assert!(session.current().unwrap().is_new());
        assert_eq!(session.statistics().strategy_counts(0).counts()[0], 0);
        Ok(())
    }
}

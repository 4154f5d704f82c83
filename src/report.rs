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

//! Builders for the dense count series a history chart would plot.
//!
//! Series over past activity are oriented oldest first, so the last
//! element is today. The due-date series looks forward instead: element 0
//! is today and later elements are further in the future.

use crate::stats::DeckStatistics;
use crate::stats::MAX_RANGE;
use crate::stats::RollingWindow;
use crate::types::card::Card;
use crate::types::date::Date;
use crate::types::direction::Direction;

fn check_range(range: usize) {
    assert!(
        range <= MAX_RANGE,
        "series range {range} exceeds the statistics horizon {MAX_RANGE}"
    );
}

fn reversed(window: &RollingWindow, range: usize) -> Vec<u32> {
    window.counts()[..range].iter().rev().copied().collect()
}

/// Daily counts of first-ever card reviews over the last `range` days,
/// oldest first.
pub fn first_time_series(stats: &DeckStatistics, range: usize) -> Vec<u32> {
    check_range(range);
    reversed(stats.first_time_reviewed(), range)
}

/// Daily review counts for one strategy over the last `range` days,
/// oldest first. An index that no strategy owns panics.
pub fn strategy_series(stats: &DeckStatistics, index: usize, range: usize) -> Vec<u32> {
    check_range(range);
    reversed(stats.strategy_counts(index), range)
}

/// Daily counts of card creation over the last `range` days, oldest
/// first. Cards older than the range are silently dropped; creation dates
/// in the future count as today.
pub fn cards_created_series(cards: &[Card], range: usize, today: Date) -> Vec<u32> {
    check_range(range);
    let mut counts = vec![0u32; range];
    for card in cards {
        let days_ago = today.days_since(card.created_at()).max(0) as usize;
        if days_ago < range {
            counts[days_ago] += 1;
        }
    }
    counts.reverse();
    counts
}

/// How many cards come due on each of the next `range` days in the given
/// direction, starting with today. Overdue cards and cards due past the
/// range are silently dropped.
pub fn cards_due_series(cards: &[Card], direction: Direction, range: usize, today: Date) -> Vec<u32> {
    check_range(range);
    let mut counts = vec![0u32; range];
    for card in cards {
        let days_ahead = card.due(direction).days_since(today);
        if days_ahead >= 0 && (days_ahead as usize) < range {
            counts[days_ahead as usize] += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Algorithm;
    use crate::scheduler::ConstantParams;
    use crate::types::direction::PerDirection;

    fn day(n: u64) -> Date {
        Date::from_ymd(2026, 3, 1).plus_days(n)
    }

    fn algorithm() -> Algorithm {
        let params = ConstantParams::new(0.5, 2.0, 3).unwrap();
        Algorithm::ConstantCoefficient(PerDirection::splat(params))
    }

    #[test]
    fn test_first_time_series_is_oldest_first() {
        // Build raw window [1, 0, 2, 0, 0]: two first-time reviews two
        // days ago, one today.
        let mut stats = DeckStatistics::new("deck".into(), day(0));
        stats.record_first_time_review(day(0));
        stats.record_first_time_review(day(0));
        stats.record_first_time_review(day(2));
        assert_eq!(first_time_series(&stats, 5), [0, 0, 2, 0, 1]);
    }

    #[test]
    fn test_strategy_series_is_oldest_first() {
        let mut stats = DeckStatistics::new("deck".into(), day(0));
        stats.record_strategy_review(1, day(0));
        stats.record_strategy_review(1, day(1));
        assert_eq!(strategy_series(&stats, 1, 3), [0, 1, 1]);
        assert_eq!(strategy_series(&stats, 0, 3), [0, 0, 0]);
    }

    #[test]
    fn test_cards_created_series_buckets_by_age() {
        let algorithm = algorithm();
        let cards = vec![
            algorithm.create_card("deck".into(), "a".into(), "b".into(), day(0)),
            algorithm.create_card("deck".into(), "c".into(), "d".into(), day(2)),
            algorithm.create_card("deck".into(), "e".into(), "f".into(), day(2)),
        ];
        // Viewed from day 2 with range 3: two created today, one two days
        // ago.
        assert_eq!(cards_created_series(&cards, 3, day(2)), [1, 0, 2]);
    }

    #[test]
    fn test_cards_created_series_drops_cards_outside_the_range() {
        let algorithm = algorithm();
        let cards = vec![
            algorithm.create_card("deck".into(), "a".into(), "b".into(), day(0)),
            algorithm.create_card("deck".into(), "c".into(), "d".into(), day(9)),
        ];
        // Range 5 viewed from day 9: the day-0 card is out of range.
        assert_eq!(cards_created_series(&cards, 5, day(9)), [0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_cards_created_in_the_future_count_as_today() {
        let algorithm = algorithm();
        let cards = vec![algorithm.create_card("deck".into(), "a".into(), "b".into(), day(5))];
        assert_eq!(cards_created_series(&cards, 3, day(0)), [0, 0, 1]);
    }

    #[test]
    fn test_cards_due_series_looks_forward() {
        let algorithm = algorithm();
        let mut due_in_two = algorithm.create_card("deck".into(), "a".into(), "b".into(), day(0));
        due_in_two.set_due(Direction::Regular, day(2));
        let due_today = algorithm.create_card("deck".into(), "c".into(), "d".into(), day(0));
        let cards = vec![due_in_two, due_today];
        assert_eq!(
            cards_due_series(&cards, Direction::Regular, 4, day(0)),
            [1, 0, 1, 0]
        );
        // In the reverse direction both cards are still due today.
        assert_eq!(
            cards_due_series(&cards, Direction::Reverse, 4, day(0)),
            [2, 0, 0, 0]
        );
    }

    #[test]
    fn test_cards_due_series_drops_overdue_cards() {
        let algorithm = algorithm();
        let cards = vec![algorithm.create_card("deck".into(), "a".into(), "b".into(), day(0))];
        // Due on day 0, viewed from day 3: overdue, not in the forecast.
        assert_eq!(
            cards_due_series(&cards, Direction::Regular, 3, day(3)),
            [0, 0, 0]
        );
    }

    #[test]
    #[should_panic(expected = "exceeds the statistics horizon")]
    fn test_range_beyond_horizon_panics() {
        let stats = DeckStatistics::new("deck".into(), day(0));
        first_time_series(&stats, MAX_RANGE + 1);
    }
}

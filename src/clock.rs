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

use chrono::Local;

use crate::types::date::Date;

/// Source of "today". Scheduling code takes dates from a clock rather
/// than reading the system time, so tests can pin the calendar.
pub trait Clock {
    fn today(&self) -> Date;
}

/// The wall clock, in the local timezone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        Date::new(Local::now().date_naive())
    }
}

/// A clock frozen at a fixed date.
pub struct FixedClock {
    date: Date,
}

impl FixedClock {
    pub fn new(date: Date) -> Self {
        Self { date }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_is_frozen() {
        let clock = FixedClock::new(Date::from_ymd(2026, 4, 1));
        assert_eq!(clock.today(), clock.today());
        assert_eq!(clock.today(), Date::from_ymd(2026, 4, 1));
    }

    #[test]
    fn test_system_clock_is_stable_within_a_test() {
        let clock = SystemClock;
        let a = clock.today();
        let b = clock.today();
        // Either equal or one day apart across a midnight boundary.
        assert!(b.days_since(a) <= 1);
    }
}

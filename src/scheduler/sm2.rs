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

use crate::error::Fallible;
use crate::error::fail;
use crate::scheduler::GradeOutcome;
use crate::types::card::MIN_EASINESS;
use crate::types::card::Sm2State;
use crate::types::date::Date;

/// Action labels for the SM-2 policy, in grading order. The position of a
/// label is its action index; the grade is the index plus one.
pub const ACTIONS: [&str; 5] = ["blackout", "incorrect", "hard", "good", "easy"];

/// Validated hyperparameters of the SM-2 policy for one review direction.
///
/// The incorrect threshold is carried alongside the easiness setting, but
/// a failed SM-2 review always ends the card's session; unlike the
/// constant-coefficient policy, the threshold never holds a card in the
/// current session.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawSm2Params", into = "RawSm2Params")]
pub struct Sm2Params {
    initial_easiness: f64,
    incorrect_threshold: u32,
}

/// The unvalidated mirror of [Sm2Params], used at the serde boundary.
#[derive(Serialize, Deserialize)]
struct RawSm2Params {
    initial_easiness: f64,
    incorrect_threshold: u32,
}

impl Sm2Params {
    pub fn new(initial_easiness: f64, incorrect_threshold: u32) -> Fallible<Self> {
        if initial_easiness < MIN_EASINESS {
            return fail(format!(
                "initial easiness must be at least {MIN_EASINESS}, got {initial_easiness}"
            ));
        }
        if incorrect_threshold < 1 {
            return fail("incorrect threshold must be at least 1");
        }
        Ok(Self {
            initial_easiness,
            incorrect_threshold,
        })
    }

    pub fn initial_easiness(&self) -> f64 {
        self.initial_easiness
    }

    pub fn incorrect_threshold(&self) -> u32 {
        self.incorrect_threshold
    }
}

impl TryFrom<RawSm2Params> for Sm2Params {
    type Error = crate::error::ErrorReport;

    fn try_from(raw: RawSm2Params) -> Fallible<Self> {
        Sm2Params::new(raw.initial_easiness, raw.incorrect_threshold)
    }
}

impl From<Sm2Params> for RawSm2Params {
    fn from(params: Sm2Params) -> Self {
        Self {
            initial_easiness: params.initial_easiness,
            incorrect_threshold: params.incorrect_threshold,
        }
    }
}

/// Grade one direction of an SM-2 card.
///
/// Grades below 3 reset the repetition streak and schedule the card for
/// tomorrow; the easiness factor is untouched on failure. Grades of 3 and
/// above apply the SM-2 easiness recurrence and grow the interval:
/// 1 day, then 6 days, then `round(interval * easiness)`.
pub fn grade(state: &mut Sm2State, action_index: usize, today: Date) -> GradeOutcome {
    let grade = match action_index {
        0..=4 => (action_index + 1) as u32,
        _ => panic!("action index {action_index} is out of range for the SM-2 policy"),
    };
    if grade < 3 {
        state.bump_incorrect_count();
        state.reset_repetition();
        state.set_interval(1);
        GradeOutcome {
            due: today.plus_days(1),
            session_done: true,
        }
    } else {
        state.bump_repetition();
        let q = grade as f64;
        let delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
        state.set_easiness(state.easiness() + delta);
        let interval = match state.repetition() {
            1 => 1,
            2 => 6,
            // f64::round: ties round away from zero.
            _ => (state.interval() as f64 * state.easiness()).round() as u32,
        };
        state.set_interval(interval);
        GradeOutcome {
            due: today.plus_days(interval as u64),
            session_done: true,
        }
    }
}

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
use crate::types::card::ConstantState;
use crate::types::date::Date;

/// Action labels for the constant-coefficient policy, in grading order.
/// The position of a label is its action index.
pub const ACTIONS: [&str; 2] = ["incorrect", "correct"];

/// Validated hyperparameters of the constant-coefficient policy for one
/// review direction.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawConstantParams", into = "RawConstantParams")]
pub struct ConstantParams {
    penalize: f64,
    reward: f64,
    incorrect_threshold: u32,
}

/// The unvalidated mirror of [ConstantParams], used at the serde boundary.
#[derive(Serialize, Deserialize)]
struct RawConstantParams {
    penalize: f64,
    reward: f64,
    incorrect_threshold: u32,
}

impl ConstantParams {
    /// `penalize` must be in (0, 1), `reward` at least 1, and the
    /// incorrect threshold at least 1. Anything else is a configuration
    /// error.
    pub fn new(penalize: f64, reward: f64, incorrect_threshold: u32) -> Fallible<Self> {
        if !(penalize > 0.0 && penalize < 1.0) {
            return fail(format!(
                "penalize factor must be strictly between 0 and 1, got {penalize}"
            ));
        }
        if reward < 1.0 {
            return fail(format!("reward factor must be at least 1, got {reward}"));
        }
        if incorrect_threshold < 1 {
            return fail("incorrect threshold must be at least 1");
        }
        Ok(Self {
            penalize,
            reward,
            incorrect_threshold,
        })
    }

    pub fn penalize(&self) -> f64 {
        self.penalize
    }

    pub fn reward(&self) -> f64 {
        self.reward
    }

    pub fn incorrect_threshold(&self) -> u32 {
        self.incorrect_threshold
    }
}

impl TryFrom<RawConstantParams> for ConstantParams {
    type Error = crate::error::ErrorReport;

    fn try_from(raw: RawConstantParams) -> Fallible<Self> {
        ConstantParams::new(raw.penalize, raw.reward, raw.incorrect_threshold)
    }
}

impl From<ConstantParams> for RawConstantParams {
    fn from(params: ConstantParams) -> Self {
        Self {
            penalize: params.penalize,
            reward: params.reward,
            incorrect_threshold: params.incorrect_threshold,
        }
    }
}

/// Grade one direction of a constant-coefficient card.
///
/// An incorrect answer shrinks the base time and keeps the card due
/// today; once the incorrect count reaches the threshold the card also
/// stays in the current session until answered correctly. A correct
/// answer grows the base time and schedules the card `floor(base_time)`
/// days out. The base time itself is never rounded, only the day offset.
pub fn grade(
    params: &ConstantParams,
    state: &mut ConstantState,
    action_index: usize,
    today: Date,
) -> GradeOutcome {
    match action_index {
        0 => {
            state.bump_incorrect_count();
            state.scale_base_time(params.penalize);
            GradeOutcome {
                due: today,
                session_done: state.incorrect_count() < params.incorrect_threshold,
            }
        }
        1 => {
            state.scale_base_time(params.reward);
            let offset = state.base_time().floor() as u64;
            GradeOutcome {
                due: today.plus_days(offset),
                session_done: true,
            }
        }
        _ => panic!("action index {action_index} is out of range for the constant-coefficient policy"),
    }
}

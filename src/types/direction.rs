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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;

/// The direction a card is reviewed in. Each direction carries fully
/// independent scheduling state.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The front text is the prompt, the back text is the answer.
    Regular,
    /// The back text is the prompt, the front text is the answer.
    Reverse,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Regular => write!(f, "regular"),
            Direction::Reverse => write!(f, "reverse"),
        }
    }
}

/// A pair of values, one per review direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PerDirection<T> {
    pub regular: T,
    pub reverse: T,
}

impl<T: Clone> PerDirection<T> {
    /// Both directions initialized to the same value.
    pub fn splat(value: T) -> Self {
        Self {
            regular: value.clone(),
            reverse: value,
        }
    }
}

impl<T> PerDirection<T> {
    pub fn get(&self, direction: Direction) -> &T {
        match direction {
            Direction::Regular => &self.regular,
            Direction::Reverse => &self.reverse,
        }
    }

    pub fn get_mut(&mut self, direction: Direction) -> &mut T {
        match direction {
            Direction::Regular => &mut self.regular,
            Direction::Reverse => &mut self.reverse,
        }
    }
}

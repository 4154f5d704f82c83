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

//! A spaced-repetition scheduling engine.
//!
//! Cards are reviewed in two directions with independent state, graded
//! by one of two policies (a constant-coefficient multiplier or the SM-2
//! recurrence), and every deck keeps rolling, day-bucketed review
//! statistics that the report module turns into plottable series.

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod report;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod store;
pub mod strategy;
pub mod types;

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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::scheduler::Algorithm;
use crate::scheduler::ConstantParams;
use crate::scheduler::Sm2Params;
use crate::types::deck::Deck;
use crate::types::direction::PerDirection;

/// A deck's configuration file: its name and the algorithm it is bound
/// to. Hyperparameters are validated while parsing, so a loaded config
/// always holds a usable algorithm.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct DeckConfig {
    name: String,
    algorithm: AlgorithmConfig,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
enum AlgorithmConfig {
    ConstantCoefficient {
        regular: ConstantParams,
        /// Defaults to the regular-direction parameters when omitted.
        #[serde(skip_serializing_if = "Option::is_none")]
        reverse: Option<ConstantParams>,
    },
    Sm2 {
        regular: Sm2Params,
        #[serde(skip_serializing_if = "Option::is_none")]
        reverse: Option<Sm2Params>,
    },
}

impl DeckConfig {
    pub fn load(path: &Path) -> Fallible<Self> {
        let content = read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Fallible<Self> {
        let config: DeckConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// A starter configuration with the constant-coefficient policy.
    pub fn constant_default(name: String) -> Self {
        let params = ConstantParams::new(0.5, 2.0, 3).expect("default parameters are valid");
        Self {
            name,
            algorithm: AlgorithmConfig::ConstantCoefficient {
                regular: params,
                reverse: None,
            },
        }
    }

    /// A starter configuration with the SM-2 policy.
    pub fn sm2_default(name: String) -> Self {
        let params = Sm2Params::new(2.5, 3).expect("default parameters are valid");
        Self {
            name,
            algorithm: AlgorithmConfig::Sm2 {
                regular: params,
                reverse: None,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn to_toml(&self) -> Fallible<String> {
        toml::to_string(self).map_err(|e| crate::error::ErrorReport::new(e.to_string()))
    }

    /// Bind the configured algorithm to a deck. The binding is final:
    /// editing the configuration afterwards affects future grading only,
    /// never the counters already accumulated on cards.
    pub fn into_deck(self) -> Deck {
        let algorithm = match self.algorithm {
            AlgorithmConfig::ConstantCoefficient { regular, reverse } => {
                Algorithm::ConstantCoefficient(PerDirection {
                    regular,
                    reverse: reverse.unwrap_or(regular),
                })
            }
            AlgorithmConfig::Sm2 { regular, reverse } => Algorithm::Sm2(PerDirection {
                regular,
                reverse: reverse.unwrap_or(regular),
            }),
        };
        Deck::new(self.name, algorithm)
    }
}

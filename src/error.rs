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

/// The crate-wide error type: an error message to show the user.
///
/// Configuration mistakes and store failures are reported through this
/// type. Programming errors (bad action index, variant mismatch) are
/// panics and never pass through here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    message: String,
}

pub type Fallible<T> = Result<T, ErrorReport>;

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Shorthand to construct an error result.
pub fn fail<T>(message: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport::new(message))
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl std::error::Error for ErrorReport {}

impl From<std::io::Error> for ErrorReport {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<rusqlite::Error> for ErrorReport {
    fn from(e: rusqlite::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<toml::de::Error> for ErrorReport {
    fn from(e: toml::de::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(e: serde_json::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<chrono::ParseError> for ErrorReport {
    fn from(e: chrono::ParseError) -> Self {
        Self::new(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ErrorReport::new("deck does not exist.");
        assert_eq!(err.to_string(), "error: deck does not exist.");
    }

    #[test]
    fn test_fail() {
        let result: Fallible<()> = fail("nope");
        assert!(result.is_err());
    }
}

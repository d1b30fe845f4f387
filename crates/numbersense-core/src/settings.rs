// Copyright 2025 Fernando Borretti
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

//! Practice settings: which mode, which operations, how large the numbers get.

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::types::mode::Mode;
use crate::types::mode::Operation;

/// The smallest allowed range.
pub const MIN_RANGE: u32 = 5;

/// The largest allowed range.
pub const MAX_RANGE: u32 = 100;

/// The range used when nothing else is configured.
pub const DEFAULT_RANGE: u32 = 20;

/// Clamp a requested range into `[MIN_RANGE, MAX_RANGE]`.
pub fn clamp_range(max_range: u32) -> u32 {
    max_range.clamp(MIN_RANGE, MAX_RANGE)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SettingsFile")]
pub struct Settings {
    pub mode: Mode,
    pub operation: Operation,
    pub max_range: u32,
}

impl Settings {
    pub fn new(mode: Mode, operation: Operation, max_range: u32) -> Self {
        Self {
            mode,
            operation,
            max_range: clamp_range(max_range),
        }
    }

    /// Parse a `numbersense.toml` file. Missing keys take their defaults.
    pub fn from_toml(text: &str) -> Fallible<Self> {
        let settings: Settings = toml::from_str(text)?;
        Ok(settings)
    }

    /// Replace whichever fields were given, keeping the rest.
    pub fn with_overrides(
        self,
        mode: Option<Mode>,
        operation: Option<Operation>,
        max_range: Option<u32>,
    ) -> Self {
        Settings::new(
            mode.unwrap_or(self.mode),
            operation.unwrap_or(self.operation),
            max_range.unwrap_or(self.max_range),
        )
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new(Mode::Flash, Operation::Mix, DEFAULT_RANGE)
    }
}

/// The on-disk shape of the settings, before clamping.
#[derive(Deserialize)]
#[serde(default)]
struct SettingsFile {
    mode: Mode,
    operation: Operation,
    #[serde(alias = "max")]
    max_range: u32,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            mode: Mode::Flash,
            operation: Operation::Mix,
            max_range: DEFAULT_RANGE,
        }
    }
}

impl From<SettingsFile> for Settings {
    fn from(file: SettingsFile) -> Self {
        Settings::new(file.mode, file.operation, file.max_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp_range(0), 5);
        assert_eq!(clamp_range(37), 37);
        assert_eq!(clamp_range(500), 100);
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.mode, Mode::Flash);
        assert_eq!(settings.operation, Operation::Mix);
        assert_eq!(settings.max_range, 20);
    }

    #[test]
    fn test_from_toml() -> Fallible<()> {
        let settings = Settings::from_toml("mode = \"word\"\nmax = 3\n")?;
        assert_eq!(settings.mode, Mode::Word);
        assert_eq!(settings.operation, Operation::Mix);
        assert_eq!(settings.max_range, 5);
        Ok(())
    }

    #[test]
    fn test_from_empty_toml() -> Fallible<()> {
        assert_eq!(Settings::from_toml("")?, Settings::default());
        Ok(())
    }

    #[test]
    fn test_bad_toml() {
        let result = Settings::from_toml("mode = \"fast\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_json_deserialize_clamps() {
        let settings: Settings =
            serde_json::from_str(r#"{"mode":"decompose","operation":"add","max_range":1000}"#)
                .unwrap();
        assert_eq!(settings.max_range, 100);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::default().with_overrides(None, Some(Operation::Sub), Some(50));
        assert_eq!(settings.mode, Mode::Flash);
        assert_eq!(settings.operation, Operation::Sub);
        assert_eq!(settings.max_range, 50);
    }
}

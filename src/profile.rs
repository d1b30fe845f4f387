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

use std::env::current_dir;
use std::fs::read_to_string;
use std::path::PathBuf;

use numbersense_core::Session;
use numbersense_core::Settings;
use numbersense_core::Timestamp;

use crate::db::Database;
use crate::db::SessionId;
use crate::error::Fallible;
use crate::error::fail;

/// The session store's file name inside the profile directory.
pub const DB_FILE: &str = "numbersense.db";

/// The optional settings file inside the profile directory.
pub const SETTINGS_FILE: &str = "numbersense.toml";

/// A learner's directory: the session store plus optional settings.
pub struct Profile {
    pub directory: PathBuf,
    pub db: Database,
    pub settings: Settings,
}

impl Profile {
    pub fn open(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        if !directory.exists() {
            return fail("directory does not exist.");
        }
        let directory = directory.canonicalize()?;
        let settings_path = directory.join(SETTINGS_FILE);
        let settings = if settings_path.exists() {
            log::debug!("Loading settings from {}", settings_path.display());
            Settings::from_toml(&read_to_string(&settings_path)?)?
        } else {
            Settings::default()
        };
        let db_path = directory.join(DB_FILE);
        let db = Database::new(&db_path.display().to_string())?;
        Ok(Self {
            directory,
            db,
            settings,
        })
    }

    /// The latest session, or a fresh one when there is none or when
    /// `start_new` is set.
    pub fn current_session(
        &self,
        start_new: bool,
        now: Timestamp,
    ) -> Fallible<(SessionId, Session)> {
        let existing = if start_new {
            None
        } else {
            self.db.latest_session_id()?
        };
        let id = match existing {
            Some(id) => id,
            None => self.db.create_session(now)?,
        };
        Ok((id, self.db.load_session(id)?))
    }

    /// The latest session, if one was ever started.
    pub fn latest_session(&self) -> Fallible<Option<Session>> {
        match self.db.latest_session_id()? {
            Some(id) => Ok(Some(self.db.load_session(id)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use numbersense_core::Mode;
    use tempfile::tempdir;

    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    #[test]
    fn test_non_existent_directory() {
        let result = Profile::open(Some("./derpherp".to_string()));
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
    }

    #[test]
    fn test_default_settings() -> Fallible<()> {
        let dir = tempdir()?;
        let profile = Profile::open(Some(dir.path().display().to_string()))?;
        assert_eq!(profile.settings, Settings::default());
        assert!(dir.path().join(DB_FILE).exists());
        Ok(())
    }

    #[test]
    fn test_settings_file() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join(SETTINGS_FILE), "mode = \"decompose\"\nmax = 12\n")?;
        let profile = Profile::open(Some(dir.path().display().to_string()))?;
        assert_eq!(profile.settings.mode, Mode::Decompose);
        assert_eq!(profile.settings.max_range, 12);
        Ok(())
    }

    #[test]
    fn test_current_session() -> Fallible<()> {
        let dir = tempdir()?;
        let profile = Profile::open(Some(dir.path().display().to_string()))?;
        let now = ts("2024-01-01T12:00:00.000");
        assert!(profile.latest_session()?.is_none());
        let (first, _) = profile.current_session(false, now)?;
        let (again, _) = profile.current_session(false, now)?;
        assert_eq!(first, again);
        let (fresh, session) = profile.current_session(true, now)?;
        assert_ne!(first, fresh);
        assert!(session.history.is_empty());
        Ok(())
    }
}

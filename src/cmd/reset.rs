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

use numbersense_core::Timestamp;

use crate::error::Fallible;
use crate::profile::Profile;

/// Erase every session and start a fresh one.
pub fn reset_sessions(directory: Option<String>) -> Fallible<()> {
    let profile = Profile::open(directory)?;
    profile.db.reset(Timestamp::now())?;
    println!("All sessions erased.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_reset() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = dir.path().display().to_string();
        let profile = Profile::open(Some(directory.clone()))?;
        profile.db.create_session(Timestamp::now())?;
        profile.db.create_session(Timestamp::now())?;
        reset_sessions(Some(directory.clone()))?;
        let profile = Profile::open(Some(directory))?;
        assert_eq!(profile.db.session_ids()?.len(), 1);
        let session = profile.latest_session()?.unwrap();
        assert!(session.history.is_empty());
        Ok(())
    }
}

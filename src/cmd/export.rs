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

use std::fs::write;

use numbersense_core::Session;

use crate::error::Fallible;
use crate::profile::Profile;

/// Every stored session, oldest first, as pretty-printed JSON.
fn sessions_json(profile: &Profile) -> Fallible<String> {
    let sessions: Vec<Session> = profile
        .db
        .session_ids()?
        .into_iter()
        .map(|id| profile.db.load_session(id))
        .collect::<Fallible<Vec<Session>>>()?;
    Ok(serde_json::to_string_pretty(&sessions)?)
}

pub fn export_sessions(directory: Option<String>, output: Option<String>) -> Fallible<()> {
    let profile = Profile::open(directory)?;
    let json = sessions_json(&profile)?;
    match output {
        Some(path) => {
            write(&path, json)?;
            log::info!("Exported sessions to {path}");
        }
        None => println!("{json}"),
    }
    Ok(())
}

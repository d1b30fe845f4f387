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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use numbersense_core::Session;
use serde::Serialize;

use crate::error::Fallible;
use crate::profile::Profile;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum StatsFormat {
    /// Human-readable text.
    Text,
    /// A JSON object.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
struct SessionReport {
    started: String,
    last_used: String,
    attempted: u32,
    correct: u32,
    accuracy_percent: u32,
    average_time: u64,
    current_streak: u32,
}

impl SessionReport {
    fn new(session: &Session) -> Self {
        let stats = session.stats();
        Self {
            started: session.created_at.to_string(),
            last_used: session.last_used_at.to_string(),
            attempted: stats.attempted,
            correct: stats.correct,
            accuracy_percent: stats.accuracy_percent(),
            average_time: stats.average_time(),
            current_streak: stats.current_streak,
        }
    }

    fn to_text(&self) -> String {
        format!(
            "Started:      {}\n\
             Last used:    {}\n\
             Correct:      {} / {} ({}%)\n\
             Average time: {}s\n\
             Streak:       {}",
            self.started,
            self.last_used,
            self.correct,
            self.attempted,
            self.accuracy_percent,
            self.average_time,
            self.current_streak
        )
    }
}

pub fn print_stats(directory: Option<String>, format: StatsFormat) -> Fallible<()> {
    let profile = Profile::open(directory)?;
    let Some(session) = profile.latest_session()? else {
        println!("No sessions yet.");
        return Ok(());
    };
    let report = SessionReport::new(&session);
    match format {
        StatsFormat::Text => println!("{}", report.to_text()),
        StatsFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use numbersense_core::GradeResult;
    use numbersense_core::Timestamp;

    use super::*;

    fn session() -> Session {
        let at = Timestamp::try_from("2024-01-01T12:00:00.000".to_string()).unwrap();
        let mut session = Session::new(at);
        for (correct, secs) in [(true, 4), (true, 5), (false, 9)] {
            let result = GradeResult {
                is_correct: correct,
                canonical_expected_answer: Some(15),
                elapsed_seconds: secs,
                raw_input: "15".to_string(),
            };
            session.record("7 + 8 = ?", &result, false, at);
        }
        session
    }

    #[test]
    fn test_report() {
        let report = SessionReport::new(&session());
        assert_eq!(report.attempted, 3);
        assert_eq!(report.correct, 2);
        assert_eq!(report.accuracy_percent, 67);
        assert_eq!(report.average_time, 6);
        assert_eq!(report.current_streak, 0);
    }

    #[test]
    fn test_text() {
        let text = SessionReport::new(&session()).to_text();
        assert!(text.contains("Correct:      2 / 3 (67%)"));
        assert!(text.contains("Average time: 6s"));
    }
}

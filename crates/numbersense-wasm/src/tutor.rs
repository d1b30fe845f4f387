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

//! Session bookkeeping for the browser tutor, kept free of JS types so it can
//! be tested natively.

use numbersense_core::GradeError;
use numbersense_core::HistoryEntry;
use numbersense_core::Problem;
use numbersense_core::Session;
use numbersense_core::SessionStats;
use numbersense_core::Settings;
use numbersense_core::Timestamp;
use numbersense_core::TinyRng;
use numbersense_core::elapsed_seconds;
use numbersense_core::feedback::feedback;
use numbersense_core::generate_from;
use numbersense_core::grade;
use numbersense_core::story::presented_text;
use numbersense_core::tenframe::TenFrames;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Graded,
    Retry,
    Ignored,
}

/// What happened to a submitted answer.
#[derive(Serialize, Debug, PartialEq)]
pub struct Outcome {
    pub status: Status,
    pub message: String,
    pub correct: Option<bool>,
}

impl Outcome {
    fn ignored(message: &str) -> Self {
        Self {
            status: Status::Ignored,
            message: message.to_string(),
            correct: None,
        }
    }
}

#[derive(Serialize)]
pub struct RoundView<'a> {
    pub problem: &'a Problem,
    pub text: &'a str,
    pub hint_shown: bool,
}

struct Round {
    problem: Problem,
    text: String,
    shown_at: Timestamp,
    hint_shown: bool,
}

pub struct Tutor {
    /// Oldest first; the last element is the current session.
    sessions: Vec<Session>,
    settings: Settings,
    rng: TinyRng,
    round: Option<Round>,
}

impl Tutor {
    pub fn new(sessions: Vec<Session>, seed: u64) -> Self {
        Self {
            sessions,
            settings: Settings::default(),
            rng: TinyRng::from_seed(seed),
            round: None,
        }
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Resume the latest stored session, starting one if there is none.
    pub fn continue_session(&mut self, now: Timestamp) {
        if self.sessions.is_empty() {
            self.sessions.push(Session::new(now));
        }
        self.round = None;
    }

    pub fn new_session(&mut self, now: Timestamp) {
        self.sessions.push(Session::new(now));
        self.round = None;
    }

    /// Takes effect from the next problem.
    pub fn configure(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Draw a problem and return the text to show.
    pub fn next_problem(&mut self, now: Timestamp) -> &str {
        let problem = generate_from(&mut self.rng, &self.settings);
        let text = presented_text(&mut self.rng, self.settings.mode, &problem);
        let round = self.round.insert(Round {
            problem,
            text,
            shown_at: now,
            hint_shown: false,
        });
        &round.text
    }

    pub fn round_view(&self) -> Option<RoundView<'_>> {
        self.round.as_ref().map(|round| RoundView {
            problem: &round.problem,
            text: &round.text,
            hint_shown: round.hint_shown,
        })
    }

    pub fn ten_frames(&self) -> Option<TenFrames> {
        self.round
            .as_ref()
            .map(|round| TenFrames::for_problem(&round.problem))
    }

    /// Reveal the hint. The attempt is recorded as hinted.
    pub fn hint(&mut self) -> Option<&str> {
        let round = self.round.as_mut()?;
        round.hint_shown = true;
        Some(round.problem.hint_text())
    }

    pub fn submit(&mut self, raw_input: &str, now: Timestamp) -> Outcome {
        let Some(round) = self.round.as_mut() else {
            return Outcome::ignored("There is no problem to answer.");
        };
        let elapsed = elapsed_seconds(round.shown_at, now);
        match grade(&mut round.problem, raw_input, elapsed) {
            Ok(result) => {
                if self.sessions.is_empty() {
                    self.sessions.push(Session::new(now));
                }
                let text = round.text.clone();
                let hint_used = round.hint_shown;
                let message = feedback(&round.problem, &result);
                if let Some(session) = self.sessions.last_mut() {
                    session.record(text, &result, hint_used, now);
                }
                Outcome {
                    status: Status::Graded,
                    message,
                    correct: Some(result.is_correct),
                }
            }
            Err(GradeError::AlreadyGraded) => {
                Outcome::ignored(GradeError::AlreadyGraded.prompt())
            }
            Err(e) => Outcome {
                status: Status::Retry,
                message: e.prompt().to_string(),
                correct: None,
            },
        }
    }

    /// Grade an answer, then persist the sessions. The outcome survives a
    /// failed write; the storage error is handed back alongside it.
    pub fn submit_and_persist<E>(
        &mut self,
        raw_input: &str,
        now: Timestamp,
        persist: impl FnOnce(&[Session]) -> Result<(), E>,
    ) -> (Outcome, Option<E>) {
        let outcome = self.submit(raw_input, now);
        let error = persist(&self.sessions).err();
        (outcome, error)
    }

    pub fn stats(&self) -> SessionStats {
        self.sessions
            .last()
            .map(|session| session.stats().clone())
            .unwrap_or_default()
    }

    /// The current session's attempts, newest first.
    pub fn history(&self) -> Vec<&HistoryEntry> {
        self.sessions
            .last()
            .map(|session| session.recent().collect())
            .unwrap_or_default()
    }

    /// Erase every session and start over.
    pub fn reset_all(&mut self, now: Timestamp) {
        self.sessions = vec![Session::new(now)];
        self.round = None;
    }
}

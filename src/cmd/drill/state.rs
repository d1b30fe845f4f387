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

use std::sync::Arc;
use std::sync::Mutex;

use numbersense_core::Mode;
use numbersense_core::Problem;
use numbersense_core::Session;
use numbersense_core::Settings;
use numbersense_core::Timestamp;
use numbersense_core::TinyRng;
use numbersense_core::generate_from;
use numbersense_core::story::presented_text;
use tokio::sync::oneshot::Sender;

use crate::db::Database;
use crate::db::SessionId;

#[derive(Clone)]
pub struct ServerState {
    pub port: u16,
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<Mutex<Option<Sender<()>>>>,
}

pub struct MutableState {
    pub db: Database,
    pub session_id: SessionId,
    pub session: Session,
    pub settings: Settings,
    pub rng: TinyRng,
    pub round: Round,
    /// The response to the last submission, shown once.
    pub feedback: Option<Feedback>,
}

/// The problem currently on screen.
pub struct Round {
    /// Increases with every round. Echoed by the answer form so that a
    /// resubmitted form cannot be graded against a later problem.
    pub number: u64,
    pub problem: Problem,
    /// The text the learner sees; a story in Word mode, drawn once.
    pub text: String,
    pub shown_at: Timestamp,
    pub hint_shown: bool,
}

pub enum Feedback {
    Graded { text: String, correct: bool },
    Retry(&'static str),
}

impl Round {
    pub fn draw(rng: &mut TinyRng, settings: &Settings, number: u64, now: Timestamp) -> Self {
        let problem = generate_from(rng, settings);
        let text = presented_text(rng, settings.mode, &problem);
        Self {
            number,
            problem,
            text,
            shown_at: now,
            hint_shown: false,
        }
    }
}

impl MutableState {
    /// Discard the current problem, graded or not, and draw the next one.
    pub fn next_round(&mut self, now: Timestamp) {
        let number = self.round.number + 1;
        self.round = Round::draw(&mut self.rng, &self.settings, number, now);
    }

    pub fn shows_ten_frames(&self) -> bool {
        self.settings.mode == Mode::Visual
    }
}

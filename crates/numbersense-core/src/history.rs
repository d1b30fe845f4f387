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

//! A practice session: its attempts, newest last, and the statistics
//! derived from them.

use serde::Deserialize;
use serde::Serialize;

use crate::grader::GradeResult;
use crate::session::SessionStats;
use crate::session::SessionTracker;
use crate::types::timestamp::Timestamp;

/// One graded attempt as shown in the history table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The text the learner saw, which is the story in Word mode.
    pub problem_text: String,
    pub student_answer: String,
    pub correct: bool,
    pub time_taken: u64,
    pub hint_used: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub created_at: Timestamp,
    pub last_used_at: Timestamp,
    pub history: Vec<HistoryEntry>,
    stats: SessionTracker,
}

impl Session {
    pub fn new(created_at: Timestamp) -> Self {
        Self {
            created_at,
            last_used_at: created_at,
            history: Vec::new(),
            stats: SessionTracker::new(),
        }
    }

    pub fn stats(&self) -> &SessionStats {
        self.stats.stats()
    }

    /// Record a graded attempt. This is the only path that feeds the
    /// tracker, so each grading decision is counted once.
    pub fn record(
        &mut self,
        problem_text: impl Into<String>,
        result: &GradeResult,
        hint_used: bool,
        at: Timestamp,
    ) -> HistoryEntry {
        self.stats.record(result);
        let entry = HistoryEntry {
            problem_text: problem_text.into(),
            student_answer: result.raw_input.clone(),
            correct: result.is_correct,
            time_taken: result.elapsed_seconds,
            hint_used,
        };
        self.history.push(entry.clone());
        self.last_used_at = at;
        entry
    }

    /// Rebuild a session from stored attempts, oldest first.
    pub fn replay(
        created_at: Timestamp,
        last_used_at: Timestamp,
        history: Vec<HistoryEntry>,
    ) -> Self {
        let mut stats = SessionTracker::new();
        for entry in history.iter() {
            stats.record(&GradeResult {
                is_correct: entry.correct,
                canonical_expected_answer: None,
                elapsed_seconds: entry.time_taken,
                raw_input: entry.student_answer.clone(),
            });
        }
        Self {
            created_at,
            last_used_at,
            history,
            stats,
        }
    }

    /// History for display, newest first.
    pub fn recent(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter().rev()
    }

    /// Forget every attempt.
    pub fn clear(&mut self) {
        self.history.clear();
        self.stats.reset();
    }
}

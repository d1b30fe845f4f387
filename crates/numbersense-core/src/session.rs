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

use serde::Deserialize;
use serde::Serialize;

use crate::grader::GradeResult;

/// Running statistics for one practice session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub attempted: u32,
    pub correct: u32,
    pub current_streak: u32,
    /// Seconds spent on each graded attempt, oldest first.
    pub elapsed_times: Vec<u64>,
}

impl SessionStats {
    /// Mean time per attempt in whole seconds, rounding halves up. Zero when
    /// nothing has been attempted.
    pub fn average_time(&self) -> u64 {
        let count = self.elapsed_times.len() as u64;
        if count == 0 {
            return 0;
        }
        let sum: u64 = self.elapsed_times.iter().sum();
        (2 * sum + count) / (2 * count)
    }

    /// Share of correct attempts as a whole percentage.
    pub fn accuracy_percent(&self) -> u32 {
        if self.attempted == 0 {
            0
        } else {
            (self.correct * 100 + self.attempted / 2) / self.attempted
        }
    }
}

/// The only writer of [`SessionStats`]. Each grading decision must be
/// recorded exactly once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionTracker {
    stats: SessionStats,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn record(&mut self, result: &GradeResult) -> &SessionStats {
        let stats = &mut self.stats;
        stats.attempted += 1;
        stats.elapsed_times.push(result.elapsed_seconds);
        if result.is_correct {
            stats.correct += 1;
            stats.current_streak += 1;
        } else {
            stats.current_streak = 0;
        }
        &self.stats
    }

    pub fn reset(&mut self) {
        self.stats = SessionStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(is_correct: bool, elapsed_seconds: u64) -> GradeResult {
        GradeResult {
            is_correct,
            canonical_expected_answer: None,
            elapsed_seconds,
            raw_input: String::from("1"),
        }
    }

    #[test]
    fn test_streak_sequence() {
        let mut tracker = SessionTracker::new();
        let streaks: Vec<u32> = [true, true, false, true]
            .into_iter()
            .map(|ok| tracker.record(&result(ok, 1)).current_streak)
            .collect();
        assert_eq!(streaks, vec![1, 2, 0, 1]);
        assert_eq!(tracker.stats().attempted, 4);
        assert_eq!(tracker.stats().correct, 3);
    }

    #[test]
    fn test_elapsed_times_in_order() {
        let mut tracker = SessionTracker::new();
        tracker.record(&result(true, 4));
        tracker.record(&result(false, 9));
        assert_eq!(tracker.stats().elapsed_times, vec![4, 9]);
    }

    #[test]
    fn test_average_time() {
        let mut stats = SessionStats::default();
        assert_eq!(stats.average_time(), 0);
        stats.elapsed_times = vec![4, 5];
        assert_eq!(stats.average_time(), 5);
        stats.elapsed_times = vec![1, 2, 2];
        assert_eq!(stats.average_time(), 2);
        stats.elapsed_times = vec![3, 4, 4, 4];
        assert_eq!(stats.average_time(), 4);
        stats.elapsed_times = vec![10];
        assert_eq!(stats.average_time(), 10);
    }

    #[test]
    fn test_accuracy() {
        let mut tracker = SessionTracker::new();
        assert_eq!(tracker.stats().accuracy_percent(), 0);
        tracker.record(&result(true, 1));
        tracker.record(&result(true, 1));
        tracker.record(&result(false, 1));
        assert_eq!(tracker.stats().accuracy_percent(), 67);
    }

    #[test]
    fn test_reset() {
        let mut tracker = SessionTracker::new();
        tracker.record(&result(true, 3));
        tracker.reset();
        assert_eq!(tracker.stats(), &SessionStats::default());
    }

    #[test]
    fn test_serializes_as_stats() {
        let mut tracker = SessionTracker::new();
        tracker.record(&result(true, 3));
        let json = serde_json::to_string(&tracker).unwrap();
        assert_eq!(
            json,
            r#"{"attempted":1,"correct":1,"current_streak":1,"elapsed_times":[3]}"#
        );
    }
}

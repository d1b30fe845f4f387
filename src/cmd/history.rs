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

use numbersense_core::HistoryEntry;

use crate::error::Fallible;
use crate::profile::Profile;

fn format_entry(entry: &HistoryEntry) -> String {
    let mark = if entry.correct { "✓" } else { "✗" };
    let hint = if entry.hint_used { " (hint)" } else { "" };
    format!(
        "{mark} {} → {} [{}s]{hint}",
        entry.problem_text, entry.student_answer, entry.time_taken
    )
}

/// Print the latest session's attempts, newest first.
pub fn print_history(directory: Option<String>, limit: Option<usize>) -> Fallible<()> {
    let profile = Profile::open(directory)?;
    let Some(session) = profile.latest_session()? else {
        println!("No sessions yet.");
        return Ok(());
    };
    let limit = limit.unwrap_or(usize::MAX);
    for entry in session.recent().take(limit) {
        println!("{}", format_entry(entry));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_entry() {
        let entry = HistoryEntry {
            problem_text: "12 - 5 = ?".to_string(),
            student_answer: "6".to_string(),
            correct: false,
            time_taken: 3,
            hint_used: true,
        };
        assert_eq!(format_entry(&entry), "✗ 12 - 5 = ? → 6 [3s] (hint)");
    }
}

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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use numbersense_core::GradeError;
use numbersense_core::Mode;
use numbersense_core::Operation;
use numbersense_core::Session;
use numbersense_core::Timestamp;
use numbersense_core::elapsed_seconds;
use numbersense_core::feedback::feedback;
use numbersense_core::grade;
use serde::Deserialize;

use crate::cmd::drill::state::Feedback;
use crate::cmd::drill::state::MutableState;
use crate::cmd::drill::state::ServerState;
use crate::error::Fallible;

#[derive(Deserialize)]
pub struct ActionForm {
    action: String,
    answer: Option<String>,
    round: Option<String>,
    mode: Option<String>,
    operation: Option<String>,
    max: Option<String>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<ActionForm>,
) -> Redirect {
    if form.action == "Shutdown" {
        shutdown(&state);
        return Redirect::to("/");
    }
    match state.mutable.lock() {
        Ok(mut mutable) => {
            if let Err(e) = handle_action(&mut mutable, &form, Timestamp::now()) {
                log::error!("Failed to handle {}: {e}", form.action);
            }
        }
        Err(_) => log::error!("Drill state lock poisoned"),
    }
    Redirect::to("/")
}

fn handle_action(m: &mut MutableState, form: &ActionForm, now: Timestamp) -> Fallible<()> {
    match form.action.as_str() {
        "Check" => check(m, form, now)?,
        "Hint" => {
            m.round.hint_shown = true;
        }
        "Next" => {
            m.feedback = None;
            m.next_round(now);
        }
        "Apply" => {
            let mode = form.mode.as_deref().and_then(|s| s.parse::<Mode>().ok());
            let operation = form
                .operation
                .as_deref()
                .and_then(|s| s.parse::<Operation>().ok());
            let max = form.max.as_deref().and_then(|s| s.trim().parse::<u32>().ok());
            m.settings = m.settings.with_overrides(mode, operation, max);
            log::debug!(
                "Settings changed: mode={} operation={} max={}",
                m.settings.mode,
                m.settings.operation,
                m.settings.max_range
            );
            m.feedback = None;
            m.next_round(now);
        }
        "Reset" => {
            m.session_id = m.db.reset(now)?;
            m.session = Session::new(now);
            m.feedback = None;
            m.next_round(now);
        }
        other => log::warn!("Unknown action: {other}"),
    }
    Ok(())
}

fn check(m: &mut MutableState, form: &ActionForm, now: Timestamp) -> Fallible<()> {
    let round_number = form.round.as_deref().and_then(|s| s.parse::<u64>().ok());
    if round_number != Some(m.round.number) {
        log::debug!(
            "Ignoring answer for round {round_number:?}, current round is {}",
            m.round.number
        );
        return Ok(());
    }
    let answer = form.answer.as_deref().unwrap_or("");
    let elapsed = elapsed_seconds(m.round.shown_at, now);
    // Grade and record on copies; nothing changes unless the attempt is stored.
    let mut problem = m.round.problem.clone();
    match grade(&mut problem, answer, elapsed) {
        Ok(result) => {
            let mut session = m.session.clone();
            let entry = session.record(m.round.text.clone(), &result, m.round.hint_shown, now);
            m.db.insert_attempt(m.session_id, &entry, now)?;
            m.session = session;
            m.feedback = Some(Feedback::Graded {
                text: feedback(&problem, &result),
                correct: result.is_correct,
            });
            m.next_round(now);
        }
        Err(GradeError::AlreadyGraded) => {
            log::debug!("Round {} was already graded", m.round.number);
        }
        Err(e) => {
            m.feedback = Some(Feedback::Retry(e.prompt()));
        }
    }
    Ok(())
}

fn shutdown(state: &ServerState) {
    let sender = match state.shutdown_tx.lock() {
        Ok(mut tx) => tx.take(),
        Err(_) => None,
    };
    if let Some(tx) = sender {
        let _ = tx.send(());
    }
}

#[cfg(test)]
mod tests {
    use numbersense_core::Operation;
    use numbersense_core::ProblemKind;
    use numbersense_core::Settings;
    use numbersense_core::TinyRng;
    use rusqlite::Connection;
    use tempfile::TempDir;
    use tempfile::tempdir;

    use super::*;
    use crate::cmd::drill::state::Round;
    use crate::db::Database;

    fn ts(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    fn state() -> Fallible<(TempDir, MutableState)> {
        let dir = tempdir()?;
        let path = dir.path().join("numbersense.db");
        let db = Database::new(&path.display().to_string())?;
        let now = ts("2024-01-01T12:00:00.000");
        let session_id = db.create_session(now)?;
        let settings = Settings::new(Mode::Flash, Operation::Add, 20);
        let mut rng = TinyRng::from_seed(7);
        let round = Round::draw(&mut rng, &settings, 1, now);
        let state = MutableState {
            db,
            session_id,
            session: Session::new(now),
            settings,
            rng,
            round,
            feedback: None,
        };
        Ok((dir, state))
    }

    fn answer_form(m: &MutableState) -> ActionForm {
        let answer = match m.round.problem.kind() {
            ProblemKind::Arithmetic {
                expected_answer, ..
            } => expected_answer,
            ProblemKind::Decomposition { .. } => panic!("expected an arithmetic problem"),
        };
        ActionForm {
            action: "Check".to_string(),
            answer: Some(answer.to_string()),
            round: Some(m.round.number.to_string()),
            mode: None,
            operation: None,
            max: None,
        }
    }

    fn drop_attempts(dir: &TempDir) -> Fallible<()> {
        let other = Connection::open(dir.path().join("numbersense.db"))?;
        other.execute_batch("drop table attempts;")?;
        Ok(())
    }

    #[test]
    fn test_check_records_attempt() -> Fallible<()> {
        let (_dir, mut m) = state()?;
        let form = answer_form(&m);
        check(&mut m, &form, ts("2024-01-01T12:00:04.000"))?;
        assert_eq!(m.session.stats().attempted, 1);
        assert_eq!(m.round.number, 2);
        assert_eq!(m.db.load_session(m.session_id)?.stats().attempted, 1);
        Ok(())
    }

    #[test]
    fn test_failed_store_keeps_round() -> Fallible<()> {
        let (dir, mut m) = state()?;
        drop_attempts(&dir)?;
        let form = answer_form(&m);
        let result = check(&mut m, &form, ts("2024-01-01T12:00:04.000"));
        assert!(result.is_err());
        assert_eq!(m.session.stats().attempted, 0);
        assert!(m.session.history.is_empty());
        assert_eq!(m.round.number, 1);
        assert!(!m.round.problem.is_consumed());
        assert!(m.feedback.is_none());
        Ok(())
    }

    #[test]
    fn test_failed_reset_keeps_session() -> Fallible<()> {
        let (dir, mut m) = state()?;
        let session_id = m.session_id;
        drop_attempts(&dir)?;
        let form = ActionForm {
            action: "Reset".to_string(),
            answer: None,
            round: None,
            mode: None,
            operation: None,
            max: None,
        };
        let result = handle_action(&mut m, &form, ts("2024-01-01T12:00:04.000"));
        assert!(result.is_err());
        assert_eq!(m.session_id, session_id);
        assert_eq!(m.db.session_ids()?, vec![session_id]);
        assert_eq!(m.round.number, 1);
        Ok(())
    }
}

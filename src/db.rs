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

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;

use numbersense_core::HistoryEntry;
use numbersense_core::Session;
use numbersense_core::Timestamp;

use crate::error::Fallible;
use crate::error::fail;

pub type SessionId = i64;

const SCHEMA: &str = "
create table if not exists sessions (
    session_id integer primary key,
    created_at text not null,
    last_used_at text not null
);

create table if not exists attempts (
    attempt_id integer primary key,
    session_id integer not null references sessions (session_id) on delete cascade,
    problem_text text not null,
    student_answer text not null,
    correct integer not null,
    time_taken integer not null,
    hint_used integer not null,
    answered_at text not null
);

create index if not exists attempts_by_session on attempts (session_id, attempt_id);
";

/// The session store. Statistics are never stored: a session's stats are
/// rebuilt from its attempts on load.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(path: &str) -> Fallible<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("pragma foreign_keys = on;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn create_session(&self, at: Timestamp) -> Fallible<SessionId> {
        self.conn.execute(
            "insert into sessions (created_at, last_used_at) values (?1, ?1)",
            params![at.to_string()],
        )?;
        let id = self.conn.last_insert_rowid();
        log::debug!("Created session {id}");
        Ok(id)
    }

    /// The most recently created session, if any.
    pub fn latest_session_id(&self) -> Fallible<Option<SessionId>> {
        let id = self
            .conn
            .query_row(
                "select session_id from sessions order by session_id desc limit 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// All session IDs, oldest first.
    pub fn session_ids(&self) -> Fallible<Vec<SessionId>> {
        let mut stmt = self
            .conn
            .prepare("select session_id from sessions order by session_id")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<SessionId>, _>>()?;
        Ok(ids)
    }

    pub fn load_session(&self, id: SessionId) -> Fallible<Session> {
        let times: Option<(String, String)> = self
            .conn
            .query_row(
                "select created_at, last_used_at from sessions where session_id = ?1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let Some((created_at, last_used_at)) = times else {
            return fail(format!("no session with ID {id}."));
        };
        let mut stmt = self.conn.prepare(
            "select problem_text, student_answer, correct, time_taken, hint_used
             from attempts where session_id = ?1 order by attempt_id",
        )?;
        let history = stmt
            .query_map(params![id], |row| {
                let time_taken: i64 = row.get(3)?;
                Ok(HistoryEntry {
                    problem_text: row.get(0)?,
                    student_answer: row.get(1)?,
                    correct: row.get(2)?,
                    time_taken: time_taken.max(0) as u64,
                    hint_used: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<HistoryEntry>, _>>()?;
        Ok(Session::replay(
            Timestamp::try_from(created_at)?,
            Timestamp::try_from(last_used_at)?,
            history,
        ))
    }

    pub fn insert_attempt(
        &self,
        id: SessionId,
        entry: &HistoryEntry,
        answered_at: Timestamp,
    ) -> Fallible<()> {
        let answered_at = answered_at.to_string();
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "insert into attempts
             (session_id, problem_text, student_answer, correct, time_taken, hint_used, answered_at)
             values (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                id,
                entry.problem_text,
                entry.student_answer,
                entry.correct,
                entry.time_taken as i64,
                entry.hint_used,
                answered_at,
            ],
        )?;
        tx.execute(
            "update sessions set last_used_at = ?1 where session_id = ?2",
            params![answered_at, id],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Remove every session and attempt, then start a fresh session. Either
    /// all of it happens or none of it does.
    pub fn reset(&self, at: Timestamp) -> Fallible<SessionId> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute_batch("delete from attempts; delete from sessions;")?;
        tx.execute(
            "insert into sessions (created_at, last_used_at) values (?1, ?1)",
            params![at.to_string()],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        log::info!("Deleted all sessions, started session {id}");
        Ok(id)
    }
}

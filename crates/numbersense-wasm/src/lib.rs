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

//! WASM bindings for numbersense - runs the arithmetic tutor in the browser.

use wasm_bindgen::prelude::*;
use web_sys::console;

use numbersense_core::Mode;
use numbersense_core::Operation;
use numbersense_core::Session;
use numbersense_core::Settings;
use numbersense_core::Timestamp;

mod storage;
mod tutor;

use storage::Storage;
use tutor::Tutor;

const SESSIONS_KEY: &str = "ns_sessions_v1";

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console::log_1(&"numbersense WASM initialized".into());
}

/// The tutor state managed from JavaScript.
#[wasm_bindgen]
pub struct TutorApp {
    tutor: Tutor,
    storage: Storage,
}

#[wasm_bindgen]
impl TutorApp {
    /// Load stored sessions. Unreadable data is logged and discarded.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let storage = Storage::new();
        let sessions = match load_sessions(&storage) {
            Ok(sessions) => sessions,
            Err(e) => {
                console::warn_1(&e);
                Vec::new()
            }
        };
        Self {
            tutor: Tutor::new(sessions, seed()),
            storage,
        }
    }

    #[wasm_bindgen]
    pub fn continue_session(&mut self) -> Result<(), JsValue> {
        self.tutor.continue_session(now()?);
        self.save()
    }

    #[wasm_bindgen]
    pub fn new_session(&mut self) -> Result<(), JsValue> {
        self.tutor.new_session(now()?);
        self.save()
    }

    /// Change the practice settings. `max` is clamped to the allowed range.
    #[wasm_bindgen]
    pub fn configure(&mut self, mode: &str, operation: &str, max: u32) -> Result<(), JsValue> {
        let mode: Mode = mode.parse().map_err(to_js)?;
        let operation: Operation = operation.parse().map_err(to_js)?;
        self.tutor.configure(Settings::new(mode, operation, max));
        Ok(())
    }

    /// Draw a new problem and return the text to show.
    #[wasm_bindgen]
    pub fn next_problem(&mut self) -> Result<String, JsValue> {
        let now = now()?;
        Ok(self.tutor.next_problem(now).to_string())
    }

    #[wasm_bindgen]
    pub fn problem_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.tutor.round_view()).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn ten_frames_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.tutor.ten_frames()).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn hint(&mut self) -> Option<String> {
        self.tutor.hint().map(str::to_string)
    }

    /// Grade an answer. Returns `{status, message, correct}` as JSON.
    #[wasm_bindgen]
    pub fn submit(&mut self, raw_input: &str) -> Result<String, JsValue> {
        let storage = &self.storage;
        let (outcome, error) = self
            .tutor
            .submit_and_persist(raw_input, now()?, |sessions| save_sessions(storage, sessions));
        if let Some(e) = error {
            console::warn_1(&e);
        }
        serde_json::to_string(&outcome).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn stats_json(&self) -> Result<String, JsValue> {
        let stats = self.tutor.stats();
        let json = serde_json::json!({
            "attempted": stats.attempted,
            "correct": stats.correct,
            "current_streak": stats.current_streak,
            "average_time": stats.average_time(),
            "accuracy_percent": stats.accuracy_percent(),
        });
        serde_json::to_string(&json).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn history_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.tutor.history()).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn settings_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.tutor.settings()).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn reset_all(&mut self) -> Result<(), JsValue> {
        self.tutor.reset_all(now()?);
        self.save()
    }

    fn save(&self) -> Result<(), JsValue> {
        save_sessions(&self.storage, self.tutor.sessions())
    }
}

impl Default for TutorApp {
    fn default() -> Self {
        Self::new()
    }
}

fn load_sessions(storage: &Storage) -> Result<Vec<Session>, JsValue> {
    match storage.get(SESSIONS_KEY)? {
        Some(data) => serde_json::from_str(&data)
            .map_err(|e| JsValue::from_str(&format!("Failed to load sessions: {e}"))),
        None => Ok(Vec::new()),
    }
}

fn save_sessions(storage: &Storage, sessions: &[Session]) -> Result<(), JsValue> {
    let data = serde_json::to_string(sessions).map_err(to_js)?;
    storage.set(SESSIONS_KEY, &data)
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn now() -> Result<Timestamp, JsValue> {
    Timestamp::from_unix_millis(js_sys::Date::now() as i64)
        .ok_or_else(|| JsValue::from_str("Clock out of range."))
}

/// Seed from the platform RNG, falling back to the clock.
fn seed() -> u64 {
    let mut bytes = [0u8; 8];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(_) => js_sys::Date::now() as u64,
    }
}

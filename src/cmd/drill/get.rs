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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;
use numbersense_core::Mode;
use numbersense_core::Operation;
use numbersense_core::SessionStats;
use numbersense_core::settings::MAX_RANGE;
use numbersense_core::settings::MIN_RANGE;
use numbersense_core::tenframe::Cell;
use numbersense_core::tenframe::TenFrames;

use crate::cmd::drill::state::Feedback;
use crate::cmd::drill::state::MutableState;
use crate::cmd::drill::state::ServerState;
use crate::cmd::drill::template::page_template;

const MODES: [(Mode, &str); 4] = [
    (Mode::Flash, "Flash"),
    (Mode::Visual, "Ten-frames"),
    (Mode::Word, "Word problems"),
    (Mode::Decompose, "Split the number"),
];

const OPERATIONS: [(Operation, &str); 3] = [
    (Operation::Add, "Addition"),
    (Operation::Sub, "Subtraction"),
    (Operation::Mix, "Mixed"),
];

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let body = match state.mutable.lock() {
        Ok(mutable) => render_page(&mutable),
        Err(_) => {
            log::error!("Drill state lock poisoned");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("Internal Server Error".to_string()),
            );
        }
    };
    (StatusCode::OK, Html(page_template(body).into_string()))
}

fn render_page(m: &MutableState) -> Markup {
    let round = &m.round;
    let frames = if m.shows_ten_frames() {
        Some(render_ten_frames(&TenFrames::for_problem(&round.problem)))
    } else {
        None
    };
    let placeholder = if round.problem.is_decomposition() {
        "e.g., 3+7 or 3,7"
    } else {
        "Type answer"
    };
    html! {
        div.root {
            div.header {
                (render_settings(m))
                (render_stats(m.session.stats()))
            }
            div.card-container {
                div.card {
                    div.problem #problem { (round.text) }
                    @if let Some(frames) = frames {
                        (frames)
                    }
                    @if round.hint_shown {
                        div.hint #hint { (round.problem.hint_text()) }
                    }
                }
            }
            div.controls {
                form #answer-form action="/" method="post" autocomplete="off" {
                    input type="hidden" name="round" value=(round.number);
                    input #answer type="text" name="answer" inputmode="numeric" placeholder=(placeholder) autofocus;
                    input #check type="submit" name="action" value="Check" title="Check the answer. Shortcut: enter.";
                }
                form action="/" method="post" {
                    input #hint-button type="submit" name="action" value="Hint" title="Show a hint. Shortcut: h.";
                    input #next type="submit" name="action" value="Next" title="Skip to a new problem. Shortcut: n.";
                }
            }
            @if let Some(feedback) = &m.feedback {
                (render_feedback(feedback))
            }
            (render_history(m))
            div.footer {
                form action="/" method="post" {
                    input #reset .danger type="submit" name="action" value="Reset" title="Erase all saved sessions and progress";
                    input #shutdown type="submit" name="action" value="Shutdown" title="Shut down the server";
                }
            }
        }
    }
}

fn render_settings(m: &MutableState) -> Markup {
    let settings = &m.settings;
    html! {
        form.settings action="/" method="post" {
            select name="mode" {
                @for (mode, label) in MODES {
                    option value=(mode.to_string()) selected[mode == settings.mode] { (label) }
                }
            }
            select name="operation" {
                @for (operation, label) in OPERATIONS {
                    option value=(operation.to_string()) selected[operation == settings.operation] { (label) }
                }
            }
            input type="number" name="max" min=(MIN_RANGE) max=(MAX_RANGE) value=(settings.max_range);
            input #apply type="submit" name="action" value="Apply";
        }
    }
}

fn render_stats(stats: &SessionStats) -> Markup {
    html! {
        div.stats {
            div { "Correct " span #stat-correct { (stats.correct) } }
            div { "Attempted " span #stat-attempted { (stats.attempted) } }
            div { "Avg time " span #stat-avg-time { (stats.average_time()) } "s" }
            div { "Streak " span #stat-streak { (stats.current_streak) } }
        }
    }
}

fn render_ten_frames(frames: &TenFrames) -> Markup {
    html! {
        div.tenframes aria-label="ten-frames" {
            @for frame in &frames.frames {
                div.tenframe {
                    @for cell in frame {
                        @match cell {
                            Cell::Filled => div.cell.filled {},
                            Cell::Crossed => div.cell.crossed {},
                            Cell::Empty => div.cell {},
                        }
                    }
                }
            }
        }
    }
}

fn render_feedback(feedback: &Feedback) -> Markup {
    match feedback {
        Feedback::Graded { text, correct } => {
            let class = if *correct { "correct" } else { "wrong" };
            html! {
                div #feedback class=(format!("feedback {class}")) { (text) }
            }
        }
        Feedback::Retry(prompt) => html! {
            div #feedback .feedback.retry { (prompt) }
        },
    }
}

fn render_history(m: &MutableState) -> Markup {
    html! {
        div.history {
            h2 { "History" }
            table {
                thead {
                    tr {
                        th { "Problem" }
                        th { "Answer" }
                        th { "Correct" }
                        th { "Time (s)" }
                        th { "Hint" }
                    }
                }
                tbody {
                    @for entry in m.session.recent() {
                        tr class=(if entry.correct { "correct" } else { "wrong" }) {
                            td { (entry.problem_text) }
                            td { (entry.student_answer) }
                            td { (if entry.correct { "Yes" } else { "No" }) }
                            td { (entry.time_taken) }
                            td { (if entry.hint_used { "Yes" } else { "No" }) }
                        }
                    }
                }
            }
        }
    }
}

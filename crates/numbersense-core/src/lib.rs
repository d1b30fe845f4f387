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

//! numbersense-core: the engine behind the numbersense arithmetic tutor.
//!
//! This library provides WASM-compatible types and algorithms for:
//! - Generating addition, subtraction and decomposition problems with
//!   strategy hints
//! - Grading a learner's typed answer, at most once per problem
//! - Tracking session statistics and history
//! - Word stories and ten-frame layouts for presentation

pub mod error;
pub mod feedback;
pub mod generator;
pub mod grader;
pub mod hint;
pub mod history;
pub mod rng;
pub mod session;
pub mod settings;
pub mod story;
pub mod tenframe;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use generator::{generate, generate_from};
pub use grader::{GradeError, GradeResult, decomposition_pairs, grade};
pub use history::{HistoryEntry, Session};
pub use rng::{RandomSource, TinyRng};
pub use session::{SessionStats, SessionTracker};
pub use settings::Settings;
pub use types::mode::{Mode, Operation, Operator};
pub use types::problem::{Problem, ProblemKind};
pub use types::timestamp::{Timestamp, elapsed_seconds};

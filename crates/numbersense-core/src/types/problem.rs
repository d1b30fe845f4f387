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

use crate::types::mode::Operator;

/// What is being asked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProblemKind {
    /// A single addition or subtraction with one unknown, the result.
    Arithmetic {
        operand_a: u32,
        operand_b: u32,
        operator: Operator,
        expected_answer: u32,
    },
    /// Split `total` into two positive parts. Any valid split is accepted, so
    /// no canonical answer is stored.
    Decomposition { total: u32 },
}

/// A single round's problem. The fields are fixed once generated; the only
/// state that ever changes is whether the problem has been graded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Problem {
    kind: ProblemKind,
    display_text: String,
    hint_text: String,
    #[serde(skip)]
    consumed: bool,
}

impl Problem {
    pub(crate) fn new(kind: ProblemKind, hint_text: String) -> Self {
        let display_text = match kind {
            ProblemKind::Arithmetic {
                operand_a,
                operand_b,
                operator,
                ..
            } => format!("{operand_a} {operator} {operand_b} = ?"),
            ProblemKind::Decomposition { total } => format!("Split {total} into two parts"),
        };
        Self {
            kind,
            display_text,
            hint_text,
            consumed: false,
        }
    }

    pub fn kind(&self) -> ProblemKind {
        self.kind
    }

    /// The canonical prompt, e.g. `7 + 8 = ?`.
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    pub fn hint_text(&self) -> &str {
        &self.hint_text
    }

    /// The expression without the unknown, e.g. `7 + 8`. Decomposition
    /// problems use their prompt.
    pub fn expression(&self) -> String {
        match self.kind {
            ProblemKind::Arithmetic {
                operand_a,
                operand_b,
                operator,
                ..
            } => format!("{operand_a} {operator} {operand_b}"),
            ProblemKind::Decomposition { .. } => self.display_text.clone(),
        }
    }

    pub fn is_decomposition(&self) -> bool {
        matches!(self.kind, ProblemKind::Decomposition { .. })
    }

    /// Whether a grading decision has already been made for this problem.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Marks the problem as graded. Returns false if it already was.
    pub(crate) fn consume(&mut self) -> bool {
        if self.consumed {
            false
        } else {
            self.consumed = true;
            true
        }
    }
}

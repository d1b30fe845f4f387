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

//! Word-problem phrasing of arithmetic problems.

use crate::rng::RandomSource;
use crate::types::mode::Mode;
use crate::types::mode::Operator;
use crate::types::problem::Problem;
use crate::types::problem::ProblemKind;

type Story = fn(u32, u32) -> String;

const ADDITION_STORIES: [Story; 3] = [
    |a, b| format!("You have {a} toy cars and your friend gives you {b} more. How many now?"),
    |a, b| {
        format!(
            "There are {a} apples on a tree and {b} fall down. How many apples total on the ground?"
        )
    },
    |a, b| {
        format!("A class reads {a} pages on Monday and {b} pages on Tuesday. How many pages total?")
    },
];

const SUBTRACTION_STORIES: [Story; 3] = [
    |a, b| format!("You had {a} stickers and gave away {b}. How many left?"),
    |a, b| format!("You collected {a} shells and lost {b}. How many remain?"),
    |a, b| format!("A baker made {a} cupcakes and sold {b}. How many are left?"),
];

/// A story for an arithmetic problem, or `None` for a decomposition.
pub fn make_story(rng: &mut impl RandomSource, problem: &Problem) -> Option<String> {
    match problem.kind() {
        ProblemKind::Arithmetic {
            operand_a,
            operand_b,
            operator,
            ..
        } => {
            let stories = match operator {
                Operator::Plus => &ADDITION_STORIES,
                Operator::Minus => &SUBTRACTION_STORIES,
            };
            let story = rng.choose(stories);
            Some(story(operand_a, operand_b))
        }
        ProblemKind::Decomposition { .. } => None,
    }
}

/// The text shown to the learner: a story in Word mode, the canonical
/// prompt otherwise.
pub fn presented_text(rng: &mut impl RandomSource, mode: Mode, problem: &Problem) -> String {
    if mode == Mode::Word {
        if let Some(story) = make_story(rng, problem) {
            return story;
        }
    }
    problem.display_text().to_string()
}

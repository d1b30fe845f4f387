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

use crate::hint::addition_hint;
use crate::hint::decomposition_hint;
use crate::hint::subtraction_hint;
use crate::rng::RandomSource;
use crate::settings::Settings;
use crate::settings::clamp_range;
use crate::types::mode::Mode;
use crate::types::mode::Operation;
use crate::types::mode::Operator;
use crate::types::problem::Problem;
use crate::types::problem::ProblemKind;

/// The smallest total of a decomposition problem.
const MIN_TOTAL: u32 = 5;

/// Draw a new problem. `max_range` is clamped into the allowed range before
/// use. Word and Visual modes draw the same problems as Flash; only their
/// presentation differs.
pub fn generate(
    rng: &mut impl RandomSource,
    mode: Mode,
    operation: Operation,
    max_range: u32,
) -> Problem {
    let max_range = clamp_range(max_range);
    if mode == Mode::Decompose {
        let (total, _, _) = draw_split(rng, max_range);
        return Problem::new(
            ProblemKind::Decomposition { total },
            decomposition_hint(total),
        );
    }
    let operator = resolve_operator(rng, operation);
    let (a, b) = match operator {
        Operator::Plus => draw_addends(rng, max_range),
        Operator::Minus => draw_subtraction(rng, max_range),
    };
    let hint = match operator {
        Operator::Plus => addition_hint(a, b),
        Operator::Minus => subtraction_hint(a, b),
    };
    Problem::new(
        ProblemKind::Arithmetic {
            operand_a: a,
            operand_b: b,
            operator,
            expected_answer: operator.apply(a, b),
        },
        hint,
    )
}

/// Draw a new problem from a settings value.
pub fn generate_from(rng: &mut impl RandomSource, settings: &Settings) -> Problem {
    generate(rng, settings.mode, settings.operation, settings.max_range)
}

fn resolve_operator(rng: &mut impl RandomSource, operation: Operation) -> Operator {
    match operation {
        Operation::Add => Operator::Plus,
        Operation::Sub => Operator::Minus,
        Operation::Mix => {
            if rng.coin() {
                Operator::Plus
            } else {
                Operator::Minus
            }
        }
    }
}

/// The second addend is bounded by what is left of the range, never below one.
fn draw_addends(rng: &mut impl RandomSource, max_range: u32) -> (u32, u32) {
    let a = rng.int_in(1, max_range - 1);
    let b = rng.int_in(1, max_range.saturating_sub(a).max(1));
    (a, b)
}

/// `b < a` always holds, so the difference is never negative.
fn draw_subtraction(rng: &mut impl RandomSource, max_range: u32) -> (u32, u32) {
    let a = rng.int_in(2, max_range);
    let b = rng.int_in(1, a - 1);
    (a, b)
}

/// A total and one way of splitting it.
pub(crate) fn draw_split(rng: &mut impl RandomSource, max_range: u32) -> (u32, u32, u32) {
    let total = rng.int_in(MIN_TOTAL, max_range.max(MIN_TOTAL + 1));
    let a = rng.int_in(1, total - 1);
    (total, a, total - a)
}

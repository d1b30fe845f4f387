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

use crate::grader::GradeResult;
use crate::grader::decomposition_pairs;
use crate::types::problem::Problem;
use crate::types::problem::ProblemKind;

/// What to tell the learner after a grading decision. A failed split never
/// lists the valid pairs.
pub fn feedback(problem: &Problem, result: &GradeResult) -> String {
    let took = result.elapsed_seconds;
    match (problem.kind(), result.is_correct) {
        (ProblemKind::Decomposition { total }, true) => {
            let pairs = decomposition_pairs(total).join(" • ");
            format!("Correct! All ways to make {total}: {pairs} (took {took}s)")
        }
        (ProblemKind::Decomposition { total }, false) => {
            format!("Not quite. Try another way to split {total}. (took {took}s)")
        }
        (
            ProblemKind::Arithmetic {
                expected_answer, ..
            },
            true,
        ) => format!(
            "Correct! {} = {expected_answer} (took {took}s)",
            problem.expression()
        ),
        (
            ProblemKind::Arithmetic {
                expected_answer, ..
            },
            false,
        ) => format!("Not quite. The answer is {expected_answer}. (took {took}s)"),
    }
}

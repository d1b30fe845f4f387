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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::types::problem::Problem;
use crate::types::problem::ProblemKind;

/// Two runs of digits around one comma, plus sign, or whitespace. Only the
/// first such pair in the input counts.
static PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+)\s*[,+\s]\s*([0-9]+)").expect("decomposition pattern is valid")
});

/// The outcome of a grading decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeResult {
    pub is_correct: bool,
    /// The expected result of an arithmetic problem, whether or not the
    /// learner got it. Always `None` for decomposition problems.
    pub canonical_expected_answer: Option<u32>,
    pub elapsed_seconds: u64,
    /// The trimmed input, echoed back for the history.
    pub raw_input: String,
}

/// Why an answer was not graded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradeError {
    /// Nothing was typed.
    EmptyInput,
    /// A decomposition answer that is not two numbers.
    MalformedFormat,
    /// An arithmetic answer that is not a finite number.
    NotANumber,
    /// The problem was already graded.
    AlreadyGraded,
}

impl GradeError {
    /// Recoverable errors leave the problem open for another try.
    pub fn is_recoverable(self) -> bool {
        !matches!(self, GradeError::AlreadyGraded)
    }

    /// What to tell the learner.
    pub fn prompt(self) -> &'static str {
        match self {
            GradeError::EmptyInput => "Please type an answer first.",
            GradeError::MalformedFormat => "Format example: 3+7 or 3,7",
            GradeError::NotANumber => "Please enter a number.",
            GradeError::AlreadyGraded => "This problem has already been graded.",
        }
    }
}

impl Display for GradeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prompt())
    }
}

impl Error for GradeError {}

/// Grade the learner's answer. A problem is graded at most once: after the
/// first grading decision every further call fails with
/// [`GradeError::AlreadyGraded`]. Recoverable errors do not consume the
/// problem.
pub fn grade(
    problem: &mut Problem,
    raw_input: &str,
    elapsed_seconds: u64,
) -> Result<GradeResult, GradeError> {
    if problem.is_consumed() {
        return Err(GradeError::AlreadyGraded);
    }
    let input = raw_input.trim();
    if input.is_empty() {
        return Err(GradeError::EmptyInput);
    }
    let (is_correct, canonical_expected_answer) = match problem.kind() {
        ProblemKind::Decomposition { total } => {
            let (first, second) = parse_pair(input).ok_or(GradeError::MalformedFormat)?;
            let sum = first.zip(second).and_then(|(a, b)| a.checked_add(b));
            (sum == Some(u64::from(total)), None)
        }
        ProblemKind::Arithmetic {
            expected_answer, ..
        } => {
            let parsed = parse_number(input).ok_or(GradeError::NotANumber)?;
            (parsed == f64::from(expected_answer), Some(expected_answer))
        }
    };
    if !problem.consume() {
        return Err(GradeError::AlreadyGraded);
    }
    Ok(GradeResult {
        is_correct,
        canonical_expected_answer,
        elapsed_seconds,
        raw_input: input.to_string(),
    })
}

/// The two parts of a decomposition answer. A part too large to represent is
/// `None`, which can never match a total.
fn parse_pair(input: &str) -> Option<(Option<u64>, Option<u64>)> {
    let captures = PAIR.captures(input)?;
    let first = captures.get(1)?.as_str().parse::<u64>().ok();
    let second = captures.get(2)?.as_str().parse::<u64>().ok();
    Some((first, second))
}

/// Decimal or float notation, or an unsigned `0x`, `0o` or `0b` integer.
fn parse_number(input: &str) -> Option<f64> {
    let radix = match input.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return input.parse::<f64>().ok().filter(|n| n.is_finite()),
    };
    let digits = &input[2..];
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// Every way to split `total` into two positive parts, smaller part first,
/// without reversed duplicates: `1+8`, `2+7`, `3+6`, `4+5` for nine.
pub fn decomposition_pairs(total: u32) -> Vec<String> {
    (1..=total / 2).map(|k| format!("{k}+{}", total - k)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::rng::ScriptedRng;
    use crate::types::mode::Mode;
    use crate::types::mode::Operation;

    fn addition_7_8() -> Problem {
        generate(&mut ScriptedRng::new(&[7, 8]), Mode::Flash, Operation::Add, 20)
    }

    fn subtraction_12_5() -> Problem {
        generate(&mut ScriptedRng::new(&[12, 5]), Mode::Flash, Operation::Sub, 20)
    }

    fn split_9() -> Problem {
        generate(&mut ScriptedRng::new(&[9, 4]), Mode::Decompose, Operation::Mix, 10)
    }

    #[test]
    fn test_correct_addition() {
        let mut problem = addition_7_8();
        let result = grade(&mut problem, "15", 4).unwrap();
        assert!(result.is_correct);
        assert_eq!(result.canonical_expected_answer, Some(15));
        assert_eq!(result.elapsed_seconds, 4);
        assert_eq!(result.raw_input, "15");
        assert!(problem.is_consumed());
    }

    #[test]
    fn test_wrong_subtraction_reveals_answer() {
        let mut problem = subtraction_12_5();
        let result = grade(&mut problem, "6", 3).unwrap();
        assert!(!result.is_correct);
        assert_eq!(result.canonical_expected_answer, Some(7));
    }

    #[test]
    fn test_numeric_forms() {
        for input in [" 15 ", "15.0", "+15", "1.5e1"] {
            let mut problem = addition_7_8();
            assert!(grade(&mut problem, input, 1).unwrap().is_correct, "{input}");
        }
        let mut problem = addition_7_8();
        assert!(!grade(&mut problem, "15.5", 1).unwrap().is_correct);
    }

    #[test]
    fn test_prefixed_integers() {
        for input in ["0x0F", "0XF", "0o17", "0b1111"] {
            let mut problem = addition_7_8();
            assert!(grade(&mut problem, input, 1).unwrap().is_correct, "{input}");
        }
        let mut problem = addition_7_8();
        assert!(!grade(&mut problem, "0x10", 1).unwrap().is_correct);
        for input in ["0x", "0b102", "0o8", "-0x0F", "0x+F", "0x1.8"] {
            let mut problem = addition_7_8();
            assert_eq!(grade(&mut problem, input, 1), Err(GradeError::NotANumber), "{input}");
            assert!(!problem.is_consumed());
        }
    }

    #[test]
    fn test_not_a_number() {
        for input in ["fifteen", "1 5", "inf", "NaN", "15,"] {
            let mut problem = addition_7_8();
            assert_eq!(grade(&mut problem, input, 1), Err(GradeError::NotANumber));
            assert!(!problem.is_consumed());
        }
    }

    #[test]
    fn test_decomposition_separators() {
        for input in ["4,5", "4 5", "4+5", "4 + 5", "5,4", "  4 ,5  "] {
            let mut problem = split_9();
            let result = grade(&mut problem, input, 2).unwrap();
            assert!(result.is_correct, "{input}");
            assert_eq!(result.canonical_expected_answer, None);
        }
    }

    #[test]
    fn test_decomposition_wrong_sum_reveals_nothing() {
        let mut problem = split_9();
        let result = grade(&mut problem, "4,4", 2).unwrap();
        assert!(!result.is_correct);
        assert_eq!(result.canonical_expected_answer, None);
    }

    #[test]
    fn test_decomposition_uses_first_pair_only() {
        let mut problem = split_9();
        assert!(grade(&mut problem, "3,6 and 1,1", 2).unwrap().is_correct);
        let mut problem = split_9();
        assert!(!grade(&mut problem, "1,1 then 3,6", 2).unwrap().is_correct);
    }

    #[test]
    fn test_decomposition_malformed() {
        for input in ["9", "four,five", "4-5", "4;5"] {
            let mut problem = split_9();
            assert_eq!(grade(&mut problem, input, 2), Err(GradeError::MalformedFormat));
            assert!(!problem.is_consumed());
        }
    }

    #[test]
    fn test_decomposition_huge_parts_are_wrong() {
        let mut problem = split_9();
        let result = grade(&mut problem, "99999999999999999999999,1", 2).unwrap();
        assert!(!result.is_correct);
    }

    #[test]
    fn test_empty_input_leaves_problem_open() {
        let mut problem = addition_7_8();
        assert_eq!(grade(&mut problem, "", 5), Err(GradeError::EmptyInput));
        assert_eq!(grade(&mut problem, "   ", 5), Err(GradeError::EmptyInput));
        assert!(!problem.is_consumed());
        let result = grade(&mut problem, "10", 5).unwrap();
        assert!(!result.is_correct);
        assert_eq!(result.canonical_expected_answer, Some(15));
    }

    #[test]
    fn test_graded_at_most_once() {
        let mut problem = addition_7_8();
        assert!(grade(&mut problem, "15", 1).is_ok());
        assert_eq!(grade(&mut problem, "15", 1), Err(GradeError::AlreadyGraded));
        assert_eq!(grade(&mut problem, "", 1), Err(GradeError::AlreadyGraded));
        assert_eq!(grade(&mut problem, "nope", 1), Err(GradeError::AlreadyGraded));
    }

    #[test]
    fn test_recoverable() {
        assert!(GradeError::EmptyInput.is_recoverable());
        assert!(GradeError::MalformedFormat.is_recoverable());
        assert!(GradeError::NotANumber.is_recoverable());
        assert!(!GradeError::AlreadyGraded.is_recoverable());
        assert_eq!(GradeError::EmptyInput.to_string(), "Please type an answer first.");
    }

    #[test]
    fn test_decomposition_pairs() {
        assert_eq!(decomposition_pairs(9), vec!["1+8", "2+7", "3+6", "4+5"]);
        assert_eq!(decomposition_pairs(6), vec!["1+5", "2+4", "3+3"]);
        assert!(decomposition_pairs(1).is_empty());
    }
}

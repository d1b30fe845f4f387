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

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

/// How problems are presented to the learner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Plain symbolic problems.
    Flash,
    /// Symbolic problems with ten-frames.
    Visual,
    /// Arithmetic phrased as a short story.
    Word,
    /// Split a total into two parts.
    Decompose,
}

/// Which operations to draw from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Sub,
    /// Addition or subtraction with equal probability.
    Mix,
}

/// The operator of a single arithmetic problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Plus,
    Minus,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Plus => '+',
            Operator::Minus => '-',
        }
    }

    pub fn apply(self, a: u32, b: u32) -> u32 {
        match self {
            Operator::Plus => a + b,
            Operator::Minus => a - b,
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Flash => write!(f, "flash"),
            Mode::Visual => write!(f, "visual"),
            Mode::Word => write!(f, "word"),
            Mode::Decompose => write!(f, "decompose"),
        }
    }
}

impl FromStr for Mode {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flash" => Ok(Mode::Flash),
            "visual" => Ok(Mode::Visual),
            "word" => Ok(Mode::Word),
            "decompose" => Ok(Mode::Decompose),
            _ => Err(ErrorReport::new(format!("unknown mode '{s}'."))),
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Add => write!(f, "add"),
            Operation::Sub => write!(f, "sub"),
            Operation::Mix => write!(f, "mix"),
        }
    }
}

impl FromStr for Operation {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" => Ok(Operation::Add),
            "sub" => Ok(Operation::Sub),
            "mix" => Ok(Operation::Mix),
            _ => Err(ErrorReport::new(format!("unknown operation '{s}'."))),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!("flash".parse::<Mode>(), Ok(Mode::Flash));
        assert_eq!("Decompose".parse::<Mode>(), Ok(Mode::Decompose));
        assert!("fast".parse::<Mode>().is_err());
    }

    #[test]
    fn test_parse_operation() {
        assert_eq!(" MIX ".parse::<Operation>(), Ok(Operation::Mix));
        assert_eq!("sub".parse::<Operation>(), Ok(Operation::Sub));
        assert!("times".parse::<Operation>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for mode in [Mode::Flash, Mode::Visual, Mode::Word, Mode::Decompose] {
            assert_eq!(mode.to_string().parse::<Mode>(), Ok(mode));
        }
    }

    #[test]
    fn test_operator() {
        assert_eq!(Operator::Plus.apply(7, 8), 15);
        assert_eq!(Operator::Minus.apply(12, 5), 7);
        assert_eq!(Operator::Minus.to_string(), "-");
    }
}

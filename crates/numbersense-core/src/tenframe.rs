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

//! Ten-frame layout: a quantity drawn as rows of ten cells.

use serde::Deserialize;
use serde::Serialize;

use crate::types::mode::Operator;
use crate::types::problem::Problem;
use crate::types::problem::ProblemKind;

pub const FRAME_SIZE: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    Empty,
    Filled,
    /// Counted, then taken away.
    Crossed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenFrames {
    /// How many cells are counted.
    pub quantity: u32,
    /// How many of the counted cells are taken away.
    pub removed: u32,
    pub frames: Vec<Vec<Cell>>,
}

impl TenFrames {
    /// `quantity` cells, the last `removed` of them crossed out.
    pub fn new(quantity: u32, removed: u32) -> Self {
        let removed = removed.min(quantity);
        let kept = quantity - removed;
        let frame_count = quantity.div_ceil(FRAME_SIZE);
        let frames = (0..frame_count)
            .map(|frame| {
                (1..=FRAME_SIZE)
                    .map(|i| {
                        let index = frame * FRAME_SIZE + i;
                        if index <= kept {
                            Cell::Filled
                        } else if index <= quantity {
                            Cell::Crossed
                        } else {
                            Cell::Empty
                        }
                    })
                    .collect()
            })
            .collect();
        Self {
            quantity,
            removed,
            frames,
        }
    }

    /// The frames for a problem: the sum for addition, the minuend with the
    /// subtrahend crossed out for subtraction, the total for a split.
    pub fn for_problem(problem: &Problem) -> Self {
        match problem.kind() {
            ProblemKind::Arithmetic {
                operand_a,
                operand_b,
                operator: Operator::Plus,
                ..
            } => TenFrames::new(operand_a + operand_b, 0),
            ProblemKind::Arithmetic {
                operand_a,
                operand_b,
                operator: Operator::Minus,
                ..
            } => TenFrames::new(operand_a, operand_b),
            ProblemKind::Decomposition { total } => TenFrames::new(total, 0),
        }
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.frames
            .iter()
            .flat_map(|frame| frame.iter())
            .filter(|c| **c == cell)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::rng::ScriptedRng;
    use crate::types::mode::Mode;
    use crate::types::mode::Operation;

    #[test]
    fn test_addition_frames() {
        let problem = generate(&mut ScriptedRng::new(&[7, 8]), Mode::Visual, Operation::Add, 20);
        let frames = TenFrames::for_problem(&problem);
        assert_eq!(frames.quantity, 15);
        assert_eq!(frames.frames.len(), 2);
        assert_eq!(frames.count(Cell::Filled), 15);
        assert_eq!(frames.count(Cell::Empty), 5);
        assert_eq!(frames.count(Cell::Crossed), 0);
    }

    #[test]
    fn test_subtraction_crosses_the_last_cells() {
        let problem = generate(&mut ScriptedRng::new(&[12, 5]), Mode::Visual, Operation::Sub, 20);
        let frames = TenFrames::for_problem(&problem);
        assert_eq!(frames.removed, 5);
        assert_eq!(frames.count(Cell::Filled), 7);
        assert_eq!(frames.count(Cell::Crossed), 5);
        assert_eq!(frames.frames[0][6], Cell::Filled);
        assert_eq!(frames.frames[0][7], Cell::Crossed);
        assert_eq!(frames.frames[1][1], Cell::Crossed);
        assert_eq!(frames.frames[1][2], Cell::Empty);
    }

    #[test]
    fn test_decomposition_frames() {
        let problem = generate(&mut ScriptedRng::new(&[9, 4]), Mode::Decompose, Operation::Add, 10);
        let frames = TenFrames::for_problem(&problem);
        assert_eq!(frames.frames.len(), 1);
        assert_eq!(frames.count(Cell::Filled), 9);
    }

    #[test]
    fn test_exact_multiple_of_ten() {
        let frames = TenFrames::new(20, 0);
        assert_eq!(frames.frames.len(), 2);
        assert_eq!(frames.count(Cell::Empty), 0);
    }
}

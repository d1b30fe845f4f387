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

/// A source of uniformly distributed integers. Problem generation only ever
/// talks to this trait, so tests can replay fixed values.
pub trait RandomSource {
    /// Uniform integer in the inclusive range `[min, max]`.
    fn int_in(&mut self, min: u32, max: u32) -> u32;

    /// A fair coin flip.
    fn coin(&mut self) -> bool {
        self.int_in(0, 1) == 0
    }

    /// Pick one element of a non-empty slice.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let last = items.len().saturating_sub(1) as u32;
        &items[self.int_in(0, last) as usize]
    }
}

/// A minimal, zero-dependency, completely insecure PRNG for drawing problems.
#[derive(Clone, Debug)]
pub struct TinyRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl TinyRng {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }

    // Generate random number in range [0, max).
    pub fn generate(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

impl RandomSource for TinyRng {
    fn int_in(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        min + self.generate(max - min + 1)
    }
}

/// Replays a fixed list of values, for tests that need exact problem shapes.
/// Each value is clamped into the requested range.
#[cfg(test)]
pub(crate) struct ScriptedRng {
    values: std::collections::VecDeque<u32>,
}

#[cfg(test)]
impl ScriptedRng {
    pub(crate) fn new(values: &[u32]) -> Self {
        Self {
            values: values.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn int_in(&mut self, min: u32, max: u32) -> u32 {
        let value = self.values.pop_front().expect("scripted values exhausted");
        value.clamp(min, max)
    }
}

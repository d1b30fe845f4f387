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

//! Strategy hints. A hint coaches a way of thinking about the problem and
//! never states the result.

/// Hint for `a - b`.
pub fn subtraction_hint(a: u32, b: u32) -> String {
    if b < a {
        if a <= 10 {
            return format!("Start at {a} and count back {b}.");
        }
        if b >= 10 {
            let rest = b - 10;
            return if rest == 0 {
                format!("Take away 10 from {a}.")
            } else {
                format!("Take away 10 from {a} first, then take away {rest} more.")
            };
        }
        let tens = (a / 10) * 10;
        let ones = a - tens;
        if ones >= b {
            return format!(
                "{a} is {tens} and {ones}. Take {b} from the {ones}, then put the {tens} back."
            );
        }
        // A multiple of ten has nothing to walk down through.
        if ones > 0 {
            let remainder = b - ones;
            return format!("Count back {ones} to reach {tens}, then take away {remainder} more.");
        }
    }
    format!("What is left when you take {b} away from {a}?")
}

/// Hint for `a + b`.
pub fn addition_hint(a: u32, b: u32) -> String {
    if a == b {
        return format!("Double {a}: think of {a} and {a} again.");
    }
    let larger = a.max(b);
    let smaller = a.min(b);
    if larger <= 10 {
        return if larger == 10 {
            format!("Make 10: {larger} is already a full ten, so put the {smaller} on top of it.")
        } else if larger + smaller > 10 {
            let needed = 10 - larger;
            format!(
                "Make 10: take {needed} from the {smaller} and give it to the {larger}, \
                 then add what is left."
            )
        } else {
            format!("Start at {larger} and count up {smaller}.")
        };
    }
    let gap = (10 - larger % 10) % 10;
    if gap > 0 && gap < smaller {
        let next_ten = larger + gap;
        let rest = smaller - gap;
        return format!("Add {gap} to {larger} to reach {next_ten}, then add the other {rest}.");
    }
    format!("Put {a} and {b} together.")
}

/// Hint for splitting `total` into two parts.
pub fn decomposition_hint(total: u32) -> String {
    format!("Think of two numbers that add to {total}. Start small and work up.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_back() {
        assert_eq!(subtraction_hint(9, 4), "Start at 9 and count back 4.");
    }

    #[test]
    fn test_remove_ten_first() {
        assert_eq!(
            subtraction_hint(25, 13),
            "Take away 10 from 25 first, then take away 3 more."
        );
        assert_eq!(subtraction_hint(25, 10), "Take away 10 from 25.");
    }

    #[test]
    fn test_subtract_from_ones() {
        let hint = subtraction_hint(17, 5);
        assert_eq!(
            hint,
            "17 is 10 and 7. Take 5 from the 7, then put the 10 back."
        );
        assert!(!hint.contains("12"));
    }

    #[test]
    fn test_walk_down_to_ten() {
        let hint = subtraction_hint(12, 5);
        assert_eq!(hint, "Count back 2 to reach 10, then take away 3 more.");
        assert!(!hint.contains('7'));
    }

    #[test]
    fn test_multiple_of_ten_falls_back() {
        assert_eq!(
            subtraction_hint(20, 3),
            "What is left when you take 3 away from 20?"
        );
    }

    #[test]
    fn test_subtraction_fallback_when_not_smaller() {
        assert_eq!(
            subtraction_hint(4, 4),
            "What is left when you take 4 away from 4?"
        );
    }

    #[test]
    fn test_doubles() {
        let hint = addition_hint(6, 6);
        assert_eq!(hint, "Double 6: think of 6 and 6 again.");
        assert!(!hint.contains("12"));
    }

    #[test]
    fn test_make_ten() {
        let hint = addition_hint(7, 8);
        assert_eq!(
            hint,
            "Make 10: take 2 from the 7 and give it to the 8, then add what is left."
        );
        assert!(!hint.contains("15"));
    }

    #[test]
    fn test_count_up() {
        assert_eq!(addition_hint(3, 5), "Start at 5 and count up 3.");
        assert_eq!(addition_hint(4, 6), "Start at 6 and count up 4.");
    }

    #[test]
    fn test_make_ten_from_a_full_ten() {
        let hint = addition_hint(10, 3);
        assert_eq!(
            hint,
            "Make 10: 10 is already a full ten, so put the 3 on top of it."
        );
        assert!(!hint.contains("13"));
        for smaller in 1..10 {
            assert!(addition_hint(smaller, 10).starts_with("Make 10"));
        }
    }

    #[test]
    fn test_bridge_to_ten() {
        let hint = addition_hint(18, 5);
        assert_eq!(hint, "Add 2 to 18 to reach 20, then add the other 3.");
        assert!(!hint.contains("23"));
    }

    #[test]
    fn test_addition_fallback() {
        // 20 is already a multiple of ten.
        assert_eq!(addition_hint(20, 7), "Put 20 and 7 together.");
        // The gap to 20 is not smaller than 2.
        assert_eq!(addition_hint(17, 2), "Put 17 and 2 together.");
    }

    #[test]
    fn test_decomposition() {
        assert_eq!(
            decomposition_hint(9),
            "Think of two numbers that add to 9. Start small and work up."
        );
    }

    #[test]
    fn test_hints_never_state_an_equation() {
        for a in 1..=100 {
            for b in 1..=100 {
                assert!(!addition_hint(a, b).contains('='));
                assert!(!subtraction_hint(a, b).contains('='));
            }
        }
    }
}

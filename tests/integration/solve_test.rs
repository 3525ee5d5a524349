use crate::solutions;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

/// Evaluate one RPN solution line, rejecting zero, negative and fractional
/// intermediates
fn eval_rpn(line: &str) -> Result<u64, String> {
    let mut stack: Vec<u64> = Vec::new();
    for token in line.split_whitespace() {
        let value = match token {
            "+" | "-" | "*" | "/" => {
                let rhs = stack.pop().ok_or("stack underflow")?;
                let lhs = stack.pop().ok_or("stack underflow")?;
                let value = match token {
                    "+" => lhs.checked_add(rhs),
                    "-" => lhs.checked_sub(rhs),
                    "*" => lhs.checked_mul(rhs),
                    _ if lhs % rhs == 0 => Some(lhs / rhs),
                    _ => None,
                };
                match value {
                    Some(value) if value > 0 => value,
                    _ => return Err(format!("illegal step {} {} {}", lhs, token, rhs)),
                }
            }
            number => number
                .parse::<u64>()
                .map_err(|_| format!("bad token {}", number))?,
        };
        stack.push(value);
    }
    match stack.as_slice() {
        [value] => Ok(*value),
        _ => Err("too many values left on stack".to_string()),
    }
}

#[test]
fn test_scenario_product() {
    for threads in ["1", "4"] {
        assert_eq!(solutions(&["-t", threads, "--rpn", "6", "2", "3"]), vec!["3 2 *"]);
        assert_eq!(solutions(&["-t", threads, "6", "2", "3"]), vec!["3 * 2"]);
    }
}

#[test]
fn test_scenario_roundabout_difference() {
    assert_eq!(solutions(&["--style", "rpn", "2", "4", "2"]), vec!["2"]);
}

#[test]
fn test_scenario_duplicate_numbers() {
    assert_eq!(solutions(&["-r", "10", "5", "5"]), vec!["5 5 +"]);
    assert_eq!(solutions(&["-e", "10", "5", "5"]), vec!["5 + 5"]);
}

#[test]
fn test_scenario_range() {
    for threads in ["1", "4"] {
        assert_eq!(
            solutions(&["-t", threads, "1..10", "3", "4"]),
            vec!["1 = 4 - 3", "3 = 3", "4 = 4", "7 = 4 + 3"]
        );
    }
}

#[test]
fn test_no_solution_prints_nothing() {
    assert!(solutions(&["1000", "1", "2"]).is_empty());
}

#[test]
fn test_paren_style() {
    let lines = solutions(&["-s", "paren", "952", "25", "50", "75", "100", "3", "6"]);
    assert!(!lines.is_empty());
    let expr = solutions(&["-s", "expr", "952", "25", "50", "75", "100", "3", "6"]);
    assert_eq!(lines.len(), expr.len());
    assert!(lines.iter().any(|line| line.starts_with('(')));
}

#[test]
fn test_thread_count_invariance() {
    let args = ["--rpn", "1..250", "2", "3", "5", "7", "11"];
    let sequential = solutions(&[&["-t", "1"][..], &args[..]].concat());

    for threads in ["2", "4", "numbers", "cpus"] {
        let parallel = solutions(&[&["-t", threads, "--fork-margin", "0"][..], &args[..]].concat());
        assert_eq!(parallel, sequential, "threads = {}", threads);
    }
}

#[test]
fn test_random_puzzles_are_sound() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

    for _ in 0..16 {
        let target: u64 = rng.random_range(1..=999);
        let numbers: Vec<String> = (0..5)
            .map(|_| rng.random_range(1..=200u64).to_string())
            .collect();

        let target_arg = target.to_string();
        let mut args = vec!["--rpn", "-t", "4", target_arg.as_str()];
        args.extend(numbers.iter().map(String::as_str));

        let lines = solutions(&args);
        let unique: HashSet<&String> = lines.iter().collect();
        assert_eq!(unique.len(), lines.len(), "duplicate solutions for {:?}", args);

        for line in &lines {
            assert_eq!(eval_rpn(line), Ok(target), "{} for {:?}", line, args);
        }
    }
}

use crate::run_numbers;

fn stderr_of(args: &[&str]) -> (Option<i32>, String) {
    let output = run_numbers(args);
    (
        output.status.code(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[test]
fn test_help_exits_zero() {
    let output = run_numbers(&["--help"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("TARGET"), "Should describe TARGET");
    assert!(stdout.contains("--generate"), "Should describe --generate");
    assert!(stdout.contains("--threads"), "Should describe --threads");
}

#[test]
fn test_version_exits_zero() {
    let output = run_numbers(&["--version"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("numbers"));
}

#[test]
fn test_no_arguments_is_usage_error() {
    let output = run_numbers(&[]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_numbers() {
    let (code, stderr) = stderr_of(&["100"]);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("need at least one number"), "{}", stderr);
}

#[test]
fn test_invalid_target() {
    for target in ["0", "abc", "10..5", "-3"] {
        let (code, _) = stderr_of(&[target, "1", "2"]);
        assert_eq!(code, Some(1), "target {}", target);
    }
    let (_, stderr) = stderr_of(&["abc", "1", "2"]);
    assert!(stderr.contains("not a valid numbers game target"), "{}", stderr);
}

#[test]
fn test_invalid_number() {
    let (code, stderr) = stderr_of(&["100", "25", "0"]);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("not a valid numbers game number: 0"), "{}", stderr);

    let (code, _) = stderr_of(&["100", "25", "x"]);
    assert_eq!(code, Some(1));
}

#[test]
fn test_too_many_numbers() {
    let numbers: Vec<String> = (1..=65).map(|n| n.to_string()).collect();
    let mut args = vec!["100"];
    args.extend(numbers.iter().map(String::as_str));

    let (code, stderr) = stderr_of(&args);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("too many numbers"), "{}", stderr);
}

#[test]
fn test_zero_threads() {
    let (code, stderr) = stderr_of(&["-t", "0", "6", "2", "3"]);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("thread count"), "{}", stderr);

    let (code, _) = stderr_of(&["-t", "lots", "6", "2", "3"]);
    assert_eq!(code, Some(1));
}

#[test]
fn test_unknown_style() {
    let (code, _) = stderr_of(&["--style", "lisp", "6", "2", "3"]);
    assert_eq!(code, Some(1));
}

#[test]
fn test_conflicting_style_flags() {
    let (code, _) = stderr_of(&["--rpn", "--style", "paren", "6", "2", "3"]);
    assert_eq!(code, Some(1));
}

#[test]
fn test_generate_rejects_positional_arguments() {
    let (code, stderr) = stderr_of(&["--generate", "100..200", "952", "1", "2"]);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("--generate"), "{}", stderr);
}

#[test]
fn test_generate_rejects_bad_range() {
    let (code, _) = stderr_of(&["--generate", "500..100"]);
    assert_eq!(code, Some(1));
}

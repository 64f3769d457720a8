use std::process::Command;

fn wordcount(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_wordcount"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute wordcount");

    assert!(output.status.success(), "wordcount should always exit successfully");
    assert!(output.stderr.is_empty(), "nothing should be logged by default");

    String::from_utf8(output.stdout).expect("Invalid UTF-8 output")
}

#[test]
fn test_frequency_report() {
    let expected = "Ordered by Frequency:\n3 a\n2 b\n1 c\n\n\
                    Ordered Lexicographically:\n3 a\n2 b\n1 c\n";

    for backend in ["-b", "-a", "-h"] {
        let stdout = wordcount(&[backend, "-frequency", "tests/data/abacba.txt"]);
        assert_eq!(stdout, expected, "backend {}", backend);
    }
}

#[test]
fn test_frequency_ties_are_lexicographic() {
    let expected = "Ordered by Frequency:\n4 zebra\n2 a\n2 the\n1 cat\n1 dog\n\n\
                    Ordered Lexicographically:\n2 a\n1 cat\n1 dog\n2 the\n4 zebra\n";

    for backend in ["-b", "-a", "-h"] {
        let stdout = wordcount(&[backend, "-frequency", "tests/data/ties.txt"]);
        assert_eq!(stdout, expected, "backend {}", backend);
    }
}

#[test]
fn test_num_unique() {
    for backend in ["-b", "-a", "-h"] {
        let stdout = wordcount(&[backend, "-num_unique", "tests/data/abacba.txt"]);
        assert_eq!(stdout, "Unique words: 3\n", "backend {}", backend);
    }
}

#[test]
fn test_missing_file() {
    let stdout = wordcount(&["-a", "-frequency", "tests/data/nope.txt"]);
    assert_eq!(stdout, "The file \"tests/data/nope.txt\" does not exist\n");
}

#[test]
fn test_wrong_argument_count_prints_usage() {
    let stdout = wordcount(&["-a", "-frequency"]);
    assert!(stdout.starts_with("Usage: [-b | -a | -h] [-frequency | -num_unique] <filename>"));
    assert!(!stdout.contains("Ordered by Frequency:"));

    let stdout = wordcount(&[]);
    assert!(stdout.starts_with("Usage:"));
}

#[test]
fn test_double_dash_counts_as_an_argument() {
    let stdout = wordcount(&["--", "-b", "-num_unique", "tests/data/abacba.txt"]);
    assert!(stdout.starts_with("Usage:"));
    assert!(!stdout.contains("Unique words"));

    let stdout = wordcount(&["-b", "-num_unique", "--"]);
    assert_eq!(stdout, "The file \"--\" does not exist\n");
}

#[test]
fn test_invalid_tokens_print_usage() {
    let stdout = wordcount(&["-x", "-frequency", "tests/data/abacba.txt"]);
    assert!(stdout.starts_with("Invalid choice for first argument"));
    assert!(stdout.contains("Usage:"));

    let stdout = wordcount(&["-h", "-top", "tests/data/abacba.txt"]);
    assert!(stdout.starts_with("Invalid choice for second argument"));
    assert!(stdout.contains("Usage:"));
}

#[test]
fn test_missing_file_wins_over_bad_mode() {
    let stdout = wordcount(&["-a", "-bogus", "nope.txt"]);
    assert_eq!(stdout, "The file \"nope.txt\" does not exist\n");
}

#[test]
fn test_latin1_file_is_counted() {
    let stdout = wordcount(&["-b", "-frequency", "tests/data/latin1.txt"]);
    assert_eq!(
        stdout,
        "Ordered by Frequency:\n2 caf\u{FFFD}\n1 ol\u{FFFD}\n\n\
         Ordered Lexicographically:\n2 caf\u{FFFD}\n1 ol\u{FFFD}\n"
    );
}

// A directory opens fine on Linux but every read fails with EISDIR.
#[cfg(target_os = "linux")]
#[test]
fn test_read_failure_reports_parse_error() {
    let stdout = wordcount(&["-h", "-frequency", "tests/data"]);
    assert!(stdout.starts_with("An error occurred when parsing the file!:\n"));
    assert!(!stdout.contains("Ordered by Frequency:"));
}

#[test]
fn test_stats_are_logged_to_stderr() {
    let output = Command::new(env!("CARGO_BIN_EXE_wordcount"))
        .args(["-a", "-num_unique", "tests/data/ties.txt"])
        .env("RUST_LOG", "info")
        .output()
        .expect("Failed to execute wordcount");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Unique words: 5\n");

    let stderr = String::from_utf8(output.stderr).expect("Invalid UTF-8 output");
    let json_start = stderr.find('{').expect("stats should be logged as JSON");
    let json: serde_json::Value = serde_json::from_str(stderr[json_start..].trim())
        .expect("Failed to parse JSON stats");

    assert_eq!(json["config"]["counter"], "avl");
    assert_eq!(json["config"]["mode"], "num_unique");
    assert_eq!(json["results"]["unique_words"].as_u64(), Some(5));
    assert_eq!(json["results"]["total_words"].as_u64(), Some(10));
    assert_eq!(json["results"]["vocabulary_ratio"].as_f64(), Some(0.5));
    assert_eq!(json["results"]["shape"]["kind"], "tree");
}

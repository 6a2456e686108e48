use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn sahw_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("sahw");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    setup_test_env_with("")
}

fn setup_test_env_with(extra: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[server]
bind = "127.0.0.1:0"

[logging]
dir = "{}/logs"
level = "info"
{}"#,
        root.display(),
        extra
    );

    let config_path = config_dir.join("sahw.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_sahw(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = sahw_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run sahw binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_search_sujud_keyword() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_sahw(&config_path, &["search", "I forgot my sujud"]);
    assert!(success, "search failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.starts_with("Mistake: missed sujud\nCorrection: Sit, perform the missed sujud"));
}

#[test]
fn test_search_joins_words() {
    let (_tmp, config_path) = setup_test_env();

    let (quoted, _, _) = run_sahw(&config_path, &["search", "I forgot my sujud"]);
    let (split, _, _) = run_sahw(&config_path, &["search", "I", "forgot", "my", "sujud"]);
    assert_eq!(quoted, split);
}

#[test]
fn test_search_empty_input() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_sahw(&config_path, &["search", ""]);
    assert!(success, "Empty input should not fail the command");
    assert_eq!(stdout.trim(), "Invalid input. Please enter a prayer mistake.");
}

#[test]
fn test_search_whitespace_input() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_sahw(&config_path, &["search", "   "]);
    assert!(success);
    assert_eq!(stdout.trim(), "Invalid input. Please enter a prayer mistake.");
}

#[test]
fn test_search_no_keywords() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_sahw(&config_path, &["search", "purple elephant"]);
    assert!(success);
    assert_eq!(stdout.trim(), "No relevant keywords found in your input.");
}

#[test]
fn test_search_no_match() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_sahw(&config_path, &["search", "qabliyya"]);
    assert!(success);
    assert_eq!(
        stdout.trim(),
        "No specific correction found for this mistake type."
    );
}

#[test]
fn test_search_similarity_fallback() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) =
        run_sahw(&config_path, &["search", "owing both qabliyya", "--explain"]);
    assert!(success);
    assert!(
        stdout.starts_with("Mistake: owing both sujuds\n"),
        "got: {}",
        stdout
    );
    assert!(stdout.contains("categories: qabliyya"));
    assert!(stdout.contains("path: similarity"));
}

#[test]
fn test_search_explain_keyword_path() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) =
        run_sahw(&config_path, &["search", "Missed RUKŪ‘!", "--explain"]);
    assert!(success);
    assert!(stdout.starts_with("Mistake: missed ruku\n"));
    assert!(stdout.contains("normalized: missed ruku"));
    assert!(stdout.contains("path: keyword (ruku)"));
}

#[test]
fn test_search_normalization_invariance() {
    let (_tmp, config_path) = setup_test_env();

    let (plain, _, _) = run_sahw(&config_path, &["search", "missed ruku"]);
    let (accented, _, _) = run_sahw(&config_path, &["search", "MISSED rukū‘?"]);
    assert_eq!(plain, accented);
}

#[test]
fn test_search_deterministic() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout1, _, _) = run_sahw(&config_path, &["search", "owing both qabliyya"]);
    let (stdout2, _, _) = run_sahw(&config_path, &["search", "owing both qabliyya"]);
    assert_eq!(stdout1, stdout2, "Search results should be deterministic across runs");
}

#[test]
fn test_search_requires_text() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_sahw(&config_path, &["search"]);
    assert!(!success, "search without text should be a usage error");
    assert!(stderr.contains("Usage") || stderr.contains("required"));
}

#[test]
fn test_threshold_from_config() {
    // With threshold 1.0 nothing can pass the strict similarity check.
    let (_tmp, config_path) = setup_test_env_with("\n[matcher]\nthreshold = 1.0\n");

    let (stdout, _, success) = run_sahw(&config_path, &["search", "owing both qabliyya"]);
    assert!(success);
    assert_eq!(
        stdout.trim(),
        "No specific correction found for this mistake type."
    );

    // The keyword path ignores the threshold.
    let (stdout, _, _) = run_sahw(&config_path, &["search", "missed sujud"]);
    assert!(stdout.starts_with("Mistake: missed sujud"));
}

#[test]
fn test_invalid_config_fails() {
    let (_tmp, config_path) = setup_test_env_with("\n[matcher]\nthreshold = 7.0\n");

    let (_, stderr, success) = run_sahw(&config_path, &["search", "sujud"]);
    assert!(!success);
    assert!(stderr.contains("threshold"), "got: {}", stderr);
}

#[test]
fn test_custom_corpus() {
    let tmp_corpus = TempDir::new().unwrap();
    let corpus_path = tmp_corpus.path().join("corpus.toml");
    fs::write(
        &corpus_path,
        r#"
[[categories]]
label = "witr"
synonyms = ["witr"]

[[entries]]
description = "forgot witr"
correction = "Pray it before fajr."

[[entries]]
description = "forgot witr"
correction = "Pray it before fajr, then continue."
"#,
    )
    .unwrap();

    let (_tmp, config_path) = setup_test_env_with(&format!(
        "\n[corpus]\npath = \"{}\"\n",
        corpus_path.display()
    ));

    let (stdout, stderr, success) = run_sahw(&config_path, &["search", "I skipped witr"]);
    assert!(success, "stderr={}", stderr);
    assert_eq!(
        stdout.trim(),
        "Mistake: forgot witr\nCorrection: Pray it before fajr, then continue."
    );
    assert!(
        stderr.contains("duplicate corpus description"),
        "override should be reported, got: {}",
        stderr
    );
}

#[test]
fn test_malformed_corpus_fails() {
    let tmp_corpus = TempDir::new().unwrap();
    let corpus_path = tmp_corpus.path().join("corpus.toml");
    fs::write(&corpus_path, "[[entries]]\ndescription = \"x\"\n").unwrap();

    let (_tmp, config_path) = setup_test_env_with(&format!(
        "\n[corpus]\npath = \"{}\"\n",
        corpus_path.display()
    ));

    let (_, stderr, success) = run_sahw(&config_path, &["search", "sujud"]);
    assert!(!success, "malformed corpus must abort");
    assert!(stderr.contains("corpus"), "got: {}", stderr);
}

#[test]
fn test_rules() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_sahw(&config_path, &["rules"]);
    assert!(success);
    assert!(stdout.starts_with("Rules of Sujood As-Sahw"));
    assert!(stdout.contains("When to Perform Sujood As-Sahw:"));
    assert!(stdout.contains("Conclusion:"));
}

#[test]
fn test_entries_in_corpus_order() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_sahw(&config_path, &["entries"]);
    assert!(success);
    let first = stdout.find("Mistake: missed sujud\n").unwrap();
    let second = stdout.find("Mistake: missed ruku\n").unwrap();
    assert!(first < second);
}

#[test]
fn test_search_is_logged() {
    let (tmp, config_path) = setup_test_env();

    run_sahw(&config_path, &["search", "I forgot my sujud"]);

    let log = fs::read_to_string(tmp.path().join("logs").join("success.log")).unwrap();
    assert!(log.contains("program started"));
    assert!(log.contains("search resolved"));
    assert!(log.contains("outcome=\"matched\"") || log.contains("outcome=matched"));
    assert!(log.contains("elapsed_us="), "timing should be logged, got: {}", log);
    assert!(log.contains("program ended"));
}

#[test]
fn test_failure_is_logged_to_error_log() {
    let tmp_rules = TempDir::new().unwrap();
    let rules_path = tmp_rules.path().join("rules.toml");
    fs::write(&rules_path, "sections = []\n").unwrap();

    let (tmp, config_path) = setup_test_env_with(&format!(
        "\n[corpus]\nrules_path = \"{}\"\n",
        rules_path.display()
    ));

    let (_, _, success) = run_sahw(&config_path, &["rules"]);
    assert!(!success);

    let log = fs::read_to_string(tmp.path().join("logs").join("error.log")).unwrap();
    assert!(log.contains("command failed"));
    assert!(log.contains("no sections"));
}

#[test]
fn test_unwritable_log_file_does_not_block_search() {
    let (tmp, config_path) = setup_test_env();
    fs::create_dir_all(tmp.path().join("logs").join("success.log")).unwrap();

    let (stdout, stderr, success) = run_sahw(&config_path, &["search", "I forgot my sujud"]);
    assert!(success, "search failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.starts_with("Mistake: missed sujud\nCorrection: Sit, perform the missed sujud"));
    assert!(
        stderr.contains("file logging disabled"),
        "failure should be reported, got: {}",
        stderr
    );
    assert!(tmp.path().join("logs").join("error.log").is_file());
}

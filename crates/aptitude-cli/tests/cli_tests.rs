//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn aptitude() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("aptitude").unwrap()
}

/// Registration followed by the top answer for every built-in question.
fn full_marks_script() -> String {
    format!(
        "Ada Lovelace\n36\n2\nada@example.com\n1\n5\n3\n1\n{}",
        "5\n".repeat(12)
    )
}

#[test]
fn help_output() {
    aptitude()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Self-assessment questionnaire with scored certificates",
        ));
}

#[test]
fn version_output() {
    aptitude()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("aptitude"));
}

#[test]
fn validate_default_bank() {
    aptitude()
        .arg("validate")
        .arg("--bank")
        .arg("../../question-banks/default.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("15 questions"))
        .stdout(predicate::str::contains("All question banks valid"));
}

#[test]
fn validate_directory() {
    aptitude()
        .arg("validate")
        .arg("--bank")
        .arg("../../question-banks")
        .assert()
        .success()
        .stdout(predicate::str::contains("Five Aspects of Intelligence"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(
        &path,
        r#"
[bank]
id = "broken"
name = "Broken"

[[questions]]
id = "q"
text = "Pick one"
category = "Analytical"
type = "numeric_choice"
options = [1, 2]
correct = 3

[[questions]]
id = "q"
text = "Again"
category = "Social"
type = "likert"
"#,
    )
    .unwrap();

    aptitude()
        .arg("validate")
        .arg("--bank")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING"))
        .stdout(predicate::str::contains("duplicate question ID"))
        .stdout(predicate::str::contains("2 warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    aptitude()
        .arg("validate")
        .arg("--bank")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    aptitude()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created aptitude.toml"))
        .stdout(predicate::str::contains(
            "Created question-banks/example.toml",
        ));

    assert!(dir.path().join("aptitude.toml").exists());
    assert!(dir.path().join("question-banks/example.toml").exists());

    // the generated bank is itself valid
    aptitude()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg("question-banks/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All question banks valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    aptitude()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    aptitude()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn score_answer_sheet_as_json() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("answers.json");
    std::fs::write(&answers, r#"{"0": "32", "1": 4, "2": ["98", "161"], "3": 5}"#).unwrap();

    let output = aptitude()
        .current_dir(dir.path())
        .arg("score")
        .arg("--answers")
        .arg(&answers)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let scores: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(scores["Analytical"], 6.0);
    assert_eq!(scores["Social"], 5.0);
    assert_eq!(scores["Moral"], 0.0);
    assert_eq!(scores["Creative-Technical"], 0.0);
}

#[test]
fn score_scaled_text_table() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("answers.json");
    std::fs::write(&answers, r#"{"3": 5, "4": 5, "5": 5}"#).unwrap();

    aptitude()
        .current_dir(dir.path())
        .arg("score")
        .arg("--answers")
        .arg(&answers)
        .arg("--scaled")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score (/ 5)"))
        .stdout(predicate::str::contains("Social"))
        .stdout(predicate::str::contains("5.00"));
}

#[test]
fn score_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("answers.json");
    std::fs::write(&answers, "{}").unwrap();

    aptitude()
        .current_dir(dir.path())
        .arg("score")
        .arg("--answers")
        .arg(&answers)
        .arg("--format")
        .arg("xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn certificate_from_scores() {
    let dir = TempDir::new().unwrap();
    let scores = dir.path().join("scores.json");
    std::fs::write(
        &scores,
        r#"{"Analytical": 4.0, "Social": 3.5, "Creative-Technical": 2.25}"#,
    )
    .unwrap();

    aptitude()
        .current_dir(dir.path())
        .arg("certificate")
        .arg("--name")
        .arg("Grace Hopper")
        .arg("--scores")
        .arg(&scores)
        .arg("--output")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("IQ_Certificate_Grace_Hopper.pdf"));

    let pdf = std::fs::read(dir.path().join("IQ_Certificate_Grace_Hopper.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("(Analytical: 4.00 / 5)"));
    assert!(text.contains("(Creative-Technical: 2.25 / 5)"));
}

#[test]
fn certificate_requires_scores_or_report() {
    aptitude()
        .arg("certificate")
        .arg("--name")
        .arg("Ada")
        .assert()
        .failure();
}

#[test]
fn take_full_session() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out");

    aptitude()
        .current_dir(dir.path())
        .arg("take")
        .arg("--output")
        .arg(&output)
        .arg("--html")
        .write_stdin(full_marks_script())
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 15 of 15"))
        .stdout(predicate::str::contains("Hi Ada Lovelace"))
        .stdout(predicate::str::contains("Results saved to"));

    assert!(output.join("IQ_Certificate_Ada_Lovelace.pdf").exists());

    let entries: Vec<String> = std::fs::read_dir(&output)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(entries
        .iter()
        .any(|n| n.starts_with("result-") && n.ends_with(".json")));
    assert!(entries.iter().any(|n| n.ends_with(".html")));

    // the saved report feeds the certificate command
    let report = entries
        .iter()
        .find(|n| n.ends_with(".json"))
        .map(|n| output.join(n))
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["scores"]["Analytical"], 8.0);
    assert_eq!(json["display_scores"]["Analytical"], 5.0);

    let reissued = dir.path().join("reissued");
    aptitude()
        .current_dir(dir.path())
        .arg("certificate")
        .arg("--report")
        .arg(&report)
        .arg("--output")
        .arg(&reissued)
        .assert()
        .success();
    assert!(reissued.join("IQ_Certificate_Ada_Lovelace.pdf").exists());
}

#[test]
fn take_without_certificate() {
    let dir = TempDir::new().unwrap();

    aptitude()
        .current_dir(dir.path())
        .arg("take")
        .arg("--output")
        .arg(dir.path())
        .arg("--no-certificate")
        .write_stdin(full_marks_script())
        .assert()
        .success();

    assert!(!dir.path().join("IQ_Certificate_Ada_Lovelace.pdf").exists());
}

#[test]
fn take_with_truncated_input_fails() {
    let dir = TempDir::new().unwrap();

    aptitude()
        .current_dir(dir.path())
        .arg("take")
        .arg("--output")
        .arg(dir.path())
        .write_stdin("Ada\n36\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input ended"));
}

use std::{fs, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const GLASSDOOR: &str = "\
4.0 Current Employee, more than 3 years
Great place to grow
Jan 5, 2019 - Software Engineer in Boston, MA
Pros - Good pay
Cons - Long hours
Advice to Management - Hire more people

3 Former Employee
It was fine
January 5, 2019
";

const INDEED: &str = "\
1 Star - Terrible place
Analyst - Boston, MA - March 3, 2020
Would not recommend

the managers never listened

5 Stars - Loved it
Cashier - Lowell, MA - Apr 2, 2021
Great team.
Pros - Discounts

9 Stars - Impossible
Cashier - Lowell, MA - Apr 2, 2021
Too good to be true
";

fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).expect("write fixture");
    path
}

fn revparse() -> Command {
    let mut cmd = Command::cargo_bin("revparse").expect("binary built");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn parse_prints_reviews_as_json() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let glassdoor = write(&dir, "Glassdoor.txt", GLASSDOOR);
    let indeed = write(&dir, "indeed.txt", INDEED);

    let output = revparse().arg("parse").arg(&glassdoor).arg(&indeed).output()?;
    assert!(output.status.success());

    let reviews: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let reviews = reviews.as_array().expect("array of reviews");
    assert_eq!(reviews.len(), 4);

    assert_eq!(reviews[0]["origin"], "glassdoor");
    assert_eq!(reviews[0]["advice_to_mgmt"], "Hire more people");
    assert_eq!(reviews[0]["location"], serde_json::Value::Null);
    assert_eq!(reviews[1]["pros"], serde_json::Value::Null);

    assert_eq!(reviews[2]["origin"], "indeed");
    assert_eq!(reviews[2]["score"], 1.0);
    assert_eq!(reviews[2]["date"], 1_583_193_600);
    assert_eq!(
        reviews[2]["content"],
        "Would not recommend. The managers never listened"
    );
    assert_eq!(reviews[3]["location"], "Lowell, MA");

    let stderr = String::from_utf8(strip_ansi_escapes::strip(output.stderr))?;
    assert!(stderr.contains("glassdoor: ✓ 2 ✗ 0"), "stderr=\n{stderr}");
    assert!(stderr.contains("indeed: ✓ 2 ✗ 1"), "stderr=\n{stderr}");
    assert!(stderr.contains("dropping review block"), "stderr=\n{stderr}");
    Ok(())
}

#[test]
fn unknown_source_is_skipped_not_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let indeed = write(&dir, "indeed.txt", INDEED);
    let monster = write(&dir, "monster.txt", INDEED);

    revparse()
        .arg("parse")
        .arg(&monster)
        .arg(&indeed)
        .assert()
        .success()
        .stdout(predicate::str::contains("Terrible place"))
        .stderr(predicate::str::contains("monster: skipped"))
        .stderr(predicate::str::contains("indeed: ✓ 2"));
    Ok(())
}

#[test]
fn crlf_exports_parse_like_lf() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let indeed = write(&dir, "indeed.txt", &INDEED.replace('\n', "\r\n"));

    let output = revparse().arg("parse").arg(&indeed).output()?;
    assert!(output.status.success());

    let reviews: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let reviews = reviews.as_array().expect("array of reviews");
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0]["cons"], serde_json::Value::Null);
    assert_eq!(
        reviews[0]["content"],
        "Would not recommend. The managers never listened"
    );
    assert_eq!(reviews[1]["header"], "Loved it");

    let stderr = String::from_utf8(strip_ansi_escapes::strip(output.stderr))?;
    assert!(stderr.contains("indeed: ✓ 2 ✗ 1"), "stderr=\n{stderr}");
    Ok(())
}

#[test]
fn custom_separator_flag() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let glassdoor = write(&dir, "glassdoor.txt", &GLASSDOOR.replace("\n\n", "\n%%\n"));

    revparse()
        .args(["--separator", r"\n%%\n", "parse"])
        .arg(&glassdoor)
        .assert()
        .success()
        .stderr(predicate::str::contains("glassdoor: ✓ 2 ✗ 0"));
    Ok(())
}

#[test]
fn missing_file_fails() {
    revparse()
        .args(["parse", "/definitely/not/here/indeed.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const INDEED: &str = "\
1 Star - Terrible place
Analyst - Boston, MA - March 3, 2020
Would not recommend

5 Stars - Loved it
Cashier - boston ma - Apr 2, 2021
Great team.

4 Stars - Good
Cook - New Bedford - Apr 3, 2021
Busy kitchen
";

const GLASSDOOR: &str = "\
2 Former Employee
Meh
Jan 5, 2019
";

#[test]
fn buckets_by_city() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let indeed = dir.path().join("indeed.txt");
    let glassdoor = dir.path().join("glassdoor.txt");
    fs::write(&indeed, INDEED)?;
    fs::write(&glassdoor, GLASSDOOR)?;

    let output = Command::cargo_bin("revparse")?
        .env("NO_COLOR", "1")
        .args(["locations", "--origin", "indeed"])
        .arg(&indeed)
        .arg(&glassdoor)
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["Boston\t2\t3.00\tboston, ma", "New Bedford\t1\t4.00\tnew bedford, ma"]
    );
    Ok(())
}

#[test]
fn state_flag_changes_default_suffix() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let indeed = dir.path().join("indeed.txt");
    fs::write(&indeed, INDEED)?;

    Command::cargo_bin("revparse")?
        .env("NO_COLOR", "1")
        .args(["locations", "--state", "RI"])
        .arg(&indeed)
        .assert()
        .success()
        .stdout(predicate::str::contains("New Bedford\t1\t4.00\tnew bedford, ri"));
    Ok(())
}

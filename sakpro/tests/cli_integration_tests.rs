// sakpro/tests/cli_integration_tests.rs
//! Command-line integration tests for the `sakpro` binary.
//!
//! These run the compiled executable against temporary files and stdin and
//! check the written documents, stdout, stderr and exit status.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;
use test_log::test;

const ARTICLE: &str = r#"<html>
<head><title>Issue 2</title><style>p { color: red }</style></head>
<body>
<h2 class="heading">Introduction</h2>
<p class="abstract">Short&nbsp;summary.</p>
<p><br><br>Body text <a name="fn1">here</a>.<br></p>
<p></p>
<script>track();</script>
</body>
</html>"#;

const ARTICLE_CLEAN: &str = r#"<html> <body> <h3>Introduction</h3> <p class="abstract">Short summary.</p> <p>Body text here.</p> </body> </html>"#;

fn sakpro() -> Command {
    Command::new(assert_cmd::cargo_bin!("sakpro"))
}

#[test]
fn test_clean_writes_derived_file() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("article.htm");
    fs::write(&input, ARTICLE)?;

    sakpro()
        .arg("clean")
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Clean Summary:"));

    let written = fs::read_to_string(dir.path().join("article_clean.htm"))?;
    assert_eq!(written, ARTICLE_CLEAN);
    Ok(())
}

#[test]
fn test_clean_to_stdout() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("article.html");
    fs::write(&input, ARTICLE)?;

    sakpro()
        .args(["clean", "--stdout", "--no-summary"])
        .arg(&input)
        .assert()
        .success()
        .stdout(ARTICLE_CLEAN)
        .stderr(predicate::str::contains("Clean Summary:").not());

    assert!(!dir.path().join("article_clean.html").exists());
    Ok(())
}

#[test]
fn test_clean_from_stdin() {
    sakpro()
        .args(["clean", "-", "--quiet"])
        .write_stdin("<h2>Title</h2>")
        .assert()
        .success()
        .stdout("<h3>Title</h3>")
        .stderr("");
}

#[test]
fn test_clean_explicit_output_and_suffix_env() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("a.htm");
    fs::write(&input, r#"<a name="x">Label</a>"#)?;

    let explicit = dir.path().join("out.htm");
    sakpro()
        .args(["clean", "-q", "-o"])
        .arg(&explicit)
        .arg(&input)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&explicit)?, "Label");

    sakpro()
        .env("SAKPRO_SUFFIX", "_stripped")
        .args(["clean", "-q"])
        .arg(&input)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(dir.path().join("a_stripped.htm"))?, "Label");
    Ok(())
}

#[test]
fn test_missing_input_fails_without_output() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("missing.htm");

    sakpro()
        .arg("clean")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input file"));

    assert!(!dir.path().join("missing_clean.htm").exists());
    Ok(())
}

#[test]
fn test_undecodable_input_fails_without_output() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("latin1.htm");
    fs::write(&input, b"<p>caf\xe9</p>")?;

    sakpro()
        .arg("clean")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("undecodable"));

    assert!(!dir.path().join("latin1_clean.htm").exists());
    Ok(())
}

#[test]
fn test_stdout_conflicts_with_output() {
    sakpro()
        .args(["clean", "--stdout", "-o", "x.htm", "in.htm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_policy_prints_yaml() {
    sakpro()
        .arg("policy")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ignore_tags:")
                .and(predicate::str::contains("- script"))
                .and(predicate::str::contains("- blockquote"))
                .and(predicate::str::contains("- href")),
        );
}

#[test]
fn test_no_arguments_prints_help() {
    sakpro()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

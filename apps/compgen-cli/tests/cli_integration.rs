//! Integration tests for the compgen CLI.
//!
//! Runs the binary in a temporary working directory. The API key variable is
//! removed from the environment so nothing reaches a real service.

use anyhow::Result;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const FOO_REQUEST: &str = r#"
[[inputs]]
name = "foo"
display_name = "Foo"
description = "d1"
"#;

fn compgen(dir: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_compgen"))
        .args(args)
        .current_dir(dir)
        .env_remove("OPENAI_API_KEY")
        .env_remove("RUST_LOG")
        .output()?;
    Ok(output)
}

#[test]
fn test_cli_version() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output = compgen(temp_dir.path(), &["--version"])?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("compgen"));

    Ok(())
}

#[test]
fn test_cli_help() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output = compgen(temp_dir.path(), &["--help"])?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("form"));
    assert!(stdout.contains("generate"));
    assert!(stdout.contains("templates"));
    assert!(stdout.contains("--no-refine"));

    Ok(())
}

#[test]
fn test_generate_without_refinement() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("request.toml"), FOO_REQUEST)?;

    let output = compgen(temp_dir.path(), &["generate", "request.toml", "--no-refine"])?;

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("class CustomComponent(Component):"));
    assert!(stdout.contains("name=\"foo\""));
    assert!(stdout.contains("display_name=\"Foo\""));
    assert!(stdout.contains("info=\"d1\""));
    assert!(stdout.contains("tool_mode=True"));

    Ok(())
}

#[test]
fn test_generate_writes_output_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("request.toml"), FOO_REQUEST)?;

    let output = compgen(
        temp_dir.path(),
        &["generate", "request.toml", "--no-refine", "--output", "component.py"],
    )?;

    assert!(output.status.success());
    let code = std::fs::read_to_string(temp_dir.path().join("component.py"))?;
    assert!(code.contains("name=\"foo\""));
    assert!(code.ends_with("return data\n"));

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("1 input(s)"));

    Ok(())
}

#[test]
fn test_generate_reports_validation_errors() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let request = r#"
[[inputs]]
name = ""

[[inputs]]
name = "has space"

[[inputs]]
name = "dup"

[[inputs]]
name = "dup"
"#;
    std::fs::write(temp_dir.path().join("request.toml"), request)?;

    let output = compgen(temp_dir.path(), &["generate", "request.toml", "--no-refine"])?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Name of Input 1 cannot be empty."));
    assert!(stderr.contains("Name of Input 2 ('has space') contains spaces."));
    assert!(stderr.contains("Name of Input 4 ('dup') is a duplicate."));
    assert!(stderr.contains("Please fix the errors above and resubmit."));

    Ok(())
}

#[test]
fn test_generate_empty_request_yields_skeleton() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("request.toml"), "")?;

    let output = compgen(temp_dir.path(), &["generate", "request.toml", "--no-refine"])?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("inputs = ["));
    assert!(!stdout.contains("MessageTextInput(\n"));

    Ok(())
}

#[test]
fn test_generate_requires_api_key_when_refining() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("request.toml"), FOO_REQUEST)?;

    let output = compgen(temp_dir.path(), &["generate", "request.toml"])?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("OPENAI_API_KEY"));

    Ok(())
}

#[test]
fn test_config_disables_refinement() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("request.toml"), FOO_REQUEST)?;
    std::fs::write(
        temp_dir.path().join("compgen.toml"),
        "[refine]\nenabled = false\n",
    )?;

    let output = compgen(temp_dir.path(), &["generate", "request.toml"])?;

    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)?.contains("name=\"foo\""));

    Ok(())
}

#[test]
fn test_missing_config_file_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let output = compgen(temp_dir.path(), &["--config", "nope.toml", "templates"])?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Config file not found"));

    Ok(())
}

#[test]
fn test_templates_lists_bundled_and_overrides() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let output = compgen(temp_dir.path(), &["templates"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let names: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        names,
        vec!["component", "input_block", "refine_system", "refine_user"]
    );

    std::fs::create_dir(temp_dir.path().join("templates"))?;
    std::fs::write(temp_dir.path().join("templates/extra.j2"), "x")?;
    std::fs::write(
        temp_dir.path().join("compgen.toml"),
        "templates_dir = \"templates\"\n",
    )?;

    let output = compgen(temp_dir.path(), &["templates"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.lines().any(|line| line == "extra"));
    assert_eq!(stdout.lines().count(), 5);

    Ok(())
}

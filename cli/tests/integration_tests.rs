#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Mutex;

use tempfile::TempDir;

// Scripts are written and executed by the same process; running the tests one
// at a time keeps a forked child from holding a script open for writing.
static SERIAL: Mutex<()> = Mutex::new(());

const FAKE_TOOL: &str = r#"#!/bin/sh
case "$*" in
  "--help")
    cat <<'HELP'
A fake tool.

Usage: fake-tool [OPTIONS] <COMMAND>

Commands:
  build  Build the thing
  help   Print this message or the help of the given subcommand(s)

Options:
  -v, --verbose
          Increase verbosity

  -h, --help
          Print help
HELP
    ;;
  "build --help")
    cat <<'HELP'
Usage: fake-tool build [OPTIONS] [TARGET]

Arguments:
  [TARGET]
          What to build

Options:
      --out <WIDGET>
          Where to put it
HELP
    ;;
  *)
    echo "unexpected arguments: $*" >&2
    exit 2
    ;;
esac
"#;

const BROKEN_TOOL: &str = "#!/bin/sh\necho 'no help here' >&2\nexit 3\n";

/// Writes `body` as an executable named `name` into `dir`.
fn write_executable(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    fs::write(&path, body).expect("failed to write script");
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
}

fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("profile.yml");
    fs::write(&path, yaml).expect("failed to write config");
    path
}

fn run_cli(bin_dir: &Path, args: &[&str]) -> Output {
    let path = std::env::var("PATH").unwrap_or_default();
    Command::new(env!("CARGO_BIN_EXE_gen-fish-completions"))
        .args(args)
        .env("PATH", format!("{}:{path}", bin_dir.display()))
        .output()
        .expect("failed to run gen-fish-completions")
}

fn fake_tool_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_executable(dir.path(), "fake-tool", FAKE_TOOL);
    write_executable(dir.path(), "broken-tool", BROKEN_TOOL);
    dir
}

#[test]
fn test_generates_script_for_configured_root() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = fake_tool_dir();
    let config = write_config(
        dir.path(),
        "root: fake-tool\naliases: []\nhosts: []\nsuggestions:\n  \"[TARGET]\": \"-r\"\n",
    );

    let output = run_cli(dir.path(), &["--config", config.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("complete -c fake-tool -f -s v -l verbose -d 'Increase verbosity'\n"));
    assert!(stdout.contains("--condition \"__fish_seen_subcommand_from build\""));
    assert!(stdout.contains("--fcs-set-argv0=\"fake-tool__help\""));
    assert!(stdout.contains("complete -c fake-tool__build -f -r\n"));

    // `<WIDGET>` is unknown: one warning on stderr, fallback in the script.
    assert!(stdout.contains("complete -c fake-tool__build -f -l out -d 'Where to put it' -a "));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.matches("unknown arg string placeholder").count(), 1);
}

#[test]
fn test_quiet_suppresses_warnings() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = fake_tool_dir();
    let config = write_config(dir.path(), "aliases: []\nhosts: []\n");

    let output = run_cli(
        dir.path(),
        &["--quiet", "--root", "fake-tool", "--config", config.to_str().unwrap()],
    );
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}

#[test]
fn test_dump_tree() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = fake_tool_dir();

    let output = run_cli(dir.path(), &["--root", "fake-tool", "--dump-tree"]);
    assert!(output.status.success());

    let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tree["name"], "fake-tool");
    assert_eq!(tree["subcommands"][0]["name"], "build");
    assert_eq!(tree["subcommands"][0]["description"], "Build the thing");
    assert_eq!(tree["subcommands"][0]["positional"][0]["name"], "[TARGET]");
    assert_eq!(tree["subcommands"][1]["name"], "help");
}

#[test]
fn test_builtin_alias_needs_target() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = fake_tool_dir();

    // The built-in profile aliases `smartlog`, which fake-tool lacks.
    let output = run_cli(dir.path(), &["--root", "fake-tool"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error: cannot alias `sl`"));
}

#[test]
fn test_failing_command_exits_with_error() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = fake_tool_dir();

    let output = run_cli(dir.path(), &["--root", "broken-tool"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error: `broken-tool --help` failed"));
    assert!(stderr.contains("no help here"));
}

#[test]
fn test_missing_command_exits_with_error() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = fake_tool_dir();

    let output = run_cli(dir.path(), &["--root", "helptree-no-such-tool"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("command not found: helptree-no-such-tool"));
}

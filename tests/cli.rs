use std::io::Write;
use std::process::{Command, Output};

use tempfile::{NamedTempFile, TempDir};

const LOG: &str = "\
[10-Nov-2024 14:23:01 Asia/Jakarta] PHP Warning:  Undefined variable $x in /var/www/app/index.php on line 42
PHP Stack trace:
[11-Nov-2024 02:00:00 Asia/Jakarta] PHP Notice:  Undefined index: id in /var/www/app/user.php on line 88
[12-Nov-2024 09:15:00 UTC] PHP Warning:  foreach() argument must be of type array in /var/www/app/list.php on line 19
";

struct Fixture {
    log: NamedTempFile,
    config: NamedTempFile,
}

fn fixture() -> Fixture {
    let mut log = NamedTempFile::new().unwrap();
    log.write_all(LOG.as_bytes()).unwrap();
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "per_page = 2\ntimezone = \"Asia/Jakarta\"").unwrap();
    Fixture { log, config }
}

fn errscope(fx: &Fixture, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_errscope"))
        .arg(fx.log.path())
        .arg("--config")
        .arg(fx.config.path())
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn prints_blocks_using_config_page_size() {
    let fx = fixture();
    let output = errscope(&fx, &["--print"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.starts_with("Total matched: 3 | Page 1/2\n"));
    assert!(text.contains("Type: Notice\n"));
    assert_eq!(text.matches("Date: ").count(), 2);
}

#[test]
fn json_output_respects_filters() {
    let fx = fixture();
    let output = errscope(&fx, &["--json", "--error-type", "warning", "--start-date", "2024-11-12"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["total_matched"], 1);
    assert_eq!(value["items"][0]["file"], "/var/www/app/list.php");
}

#[test]
fn raw_mode_keeps_unparsed_lines() {
    let fx = fixture();
    let output = errscope(&fx, &["--raw", "--search", "stack trace"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Total matched: 1 | Page 1/1\n     2: PHP Stack trace:\n");
}

#[test]
fn stats_count_all_matches() {
    let fx = fixture();
    let output = errscope(&fx, &["--stats"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Warning  2\nNotice   1\nTotal    3\n");
}

#[test]
fn missing_log_fails() {
    let fx = fixture();
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_errscope"))
        .arg(dir.path().join("error_log"))
        .arg("--config")
        .arg(fx.config.path())
        .arg("--print")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error: Log file not found"));
}

#[test]
fn invalid_inputs_fail() {
    let fx = fixture();
    assert!(!errscope(&fx, &["--print", "--per-page", "0"]).status.success());
    assert!(!errscope(&fx, &["--print", "--end-date", "yesterday"]).status.success());
    assert!(!errscope(&fx, &["--print", "--timezone", "Nowhere/Special"]).status.success());
}

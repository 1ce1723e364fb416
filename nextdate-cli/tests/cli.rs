use assert_cmd::Command;
use predicates::prelude::*;

fn nextdate() -> Command {
    let mut cmd = Command::cargo_bin("nextdate").unwrap();
    cmd.env_remove("NEXTDATE_NOW").env_remove("RUST_LOG");
    cmd
}

// ============================================================
// Rules
// ============================================================

#[test]
fn test_daily_rule() {
    nextdate()
        .args(["--now", "20240103", "--date", "20240101", "d 5"])
        .assert()
        .success()
        .stdout("20240106\n");
}

#[test]
fn test_yearly_leap_day() {
    nextdate()
        .args(["--now", "20250101", "--date", "20240229", "y"])
        .assert()
        .success()
        .stdout("20280229\n");
}

#[test]
fn test_weekly_rule() {
    // 2024-01-03 is a Wednesday
    nextdate()
        .args(["--now", "20240103", "w 1,3"])
        .assert()
        .success()
        .stdout("20240108\n");
}

#[test]
fn test_monthly_last_day() {
    nextdate()
        .args(["--now", "20240430", "m -1"])
        .assert()
        .success()
        .stdout("20240531\n");
}

#[test]
fn test_monthly_anchored_sentinels() {
    nextdate()
        .args(["--now", "20240430", "--anchored-sentinels", "m -1"])
        .assert()
        .success()
        .stdout("20240530\n");
}

#[test]
fn test_monthly_with_months() {
    nextdate()
        .args(["--now", "20240301", "m 15 1,6"])
        .assert()
        .success()
        .stdout("20240615\n");
}

#[test]
fn test_iso_dates_accepted() {
    nextdate()
        .args(["--now", "2024-01-03", "--date", "2024-01-01", "d 5"])
        .assert()
        .success()
        .stdout("20240106\n");
}

#[test]
fn test_now_from_env() {
    nextdate()
        .env("NEXTDATE_NOW", "20240103")
        .args(["--date", "20240101", "d 5"])
        .assert()
        .success()
        .stdout("20240106\n");
}

#[test]
fn test_default_now_is_today() {
    nextdate()
        .arg("d 1")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d{8}\n$").unwrap());
}

// ============================================================
// Flags
// ============================================================

#[test]
fn test_n_flag() {
    nextdate()
        .args(["-n", "3", "--now", "20240101", "d 2"])
        .assert()
        .success()
        .stdout("20240103\n20240105\n20240107\n");
}

#[test]
fn test_n_flag_capped() {
    nextdate()
        .args(["-n", "5000", "--now", "20240101", "d 1"])
        .assert()
        .success()
        .stderr(predicate::function(|err: &str| {
            err.matches("capped at 1000").count() == 1
        }))
        .stdout(predicate::function(|out: &str| out.lines().count() == 1000));
}

#[test]
fn test_json_output() {
    nextdate()
        .args(["--json", "-n", "2", "--now", "20240101", "m 1,15"])
        .assert()
        .success()
        .stdout("[\"20240115\",\"20240201\"]\n");
}

#[test]
fn test_check_valid() {
    nextdate()
        .args(["--check", "m 1,-1 1,6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn test_check_invalid() {
    nextdate()
        .args(["--check", "w 1,8"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("out of range"))
        .stderr(predicate::str::contains("^"));
}

#[test]
fn test_parse_json() {
    nextdate()
        .args(["--parse", "m 15,-1 1,6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"monthly\""))
        .stdout(predicate::str::contains("\"january\""))
        .stdout(predicate::str::contains("\"rule\": \"m 15,-1 1,6\""));
}

#[test]
fn test_parse_json_weekly() {
    nextdate()
        .args(["--parse", "w 1,7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"monday\""))
        .stdout(predicate::str::contains("\"sunday\""));
}

#[test]
fn test_verbose_logs_to_stderr() {
    nextdate()
        .args(["-v", "--now", "20240101", "d 1"])
        .assert()
        .success()
        .stdout("20240102\n")
        .stderr(predicate::str::contains("parsed rule"));
}

// ============================================================
// Error cases
// ============================================================

#[test]
fn test_no_rule() {
    nextdate().assert().code(2);
}

#[test]
fn test_unknown_rule() {
    nextdate()
        .args(["--now", "20240101", "x 1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown repeat rule"));
}

#[test]
fn test_interval_out_of_range() {
    nextdate()
        .args(["--now", "20240101", "d 401"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected 1..=400"));
}

#[test]
fn test_unsatisfiable_rule() {
    nextdate()
        .args(["--now", "20240101", "m 30 2"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no date satisfies"));
}

#[test]
fn test_invalid_date() {
    nextdate()
        .args(["--now", "20240230", "d 1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid --now date"));
}

#[test]
fn test_unknown_flag() {
    nextdate().args(["--bogus", "d 1"]).assert().code(2);
}

use std::fs;

use crate::common::{make_temp_dir, normalized_lines, read_log_contents, run_with_args, run_with_input};

#[test]
fn first_run_creates_config_and_shows_the_week() {
    let dir = make_temp_dir("binary");
    let output = run_with_input(&dir, "exit\n");

    assert!(output.status.success());
    assert!(dir.join("config.json").exists());
    let lines = normalized_lines(&output.stdout);
    assert!(lines.iter().any(|l| l == "WEEK OF OCT 18 - OCT 24, 2026"));
    assert!(lines.iter().any(|l| l == "WED OCT 21 (TODAY)"));
    assert_eq!(lines.iter().filter(|l| *l == "No classes.").count(), 7);
}

#[test]
fn piped_output_has_no_escape_codes() {
    let dir = make_temp_dir("binary");
    let output = run_with_input(&dir, "course add Art #ff0000\nsched 1 mon 09:00-10:00\nshow\n");
    assert!(output.status.success());
    assert!(!output.stdout.contains(&0x1B));
}

#[test]
fn unknown_command_reports_error_and_continues() {
    let dir = make_temp_dir("binary");
    let output = run_with_input(&dir, "frobnicate\nhelp\nexit\n");

    assert!(output.status.success());
    let stderr_lines = normalized_lines(&output.stderr);
    assert!(
        stderr_lines
            .iter()
            .any(|l| l == "error: Unknown command: frobnicate"),
        "stderr was: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout_lines = normalized_lines(&output.stdout);
    assert!(stdout_lines.iter().any(|l| l == "weekgrid - Weekly course calendar."));
}

#[test]
fn overlapping_classes_are_split_into_columns() {
    let dir = make_temp_dir("binary");
    let input = "\
course add Algebra
course add Biology
course add Chemistry
sched 1 mon 09:00-10:00
sched 2 mon 09:30-10:30
sched 3 mon 11:00-12:00
show
exit
";
    let output = run_with_input(&dir, input);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let lines = normalized_lines(&output.stdout);
    let row = |id: &str| {
        lines
            .iter()
            .rev()
            .find(|l| l.starts_with(&format!("{id}  │")))
            .cloned()
            .unwrap_or_default()
    };
    assert!(row("1").ends_with("540px/60px │ 0.00%/49.75%  │ 1"), "{}", row("1"));
    assert!(row("2").ends_with("570px/60px │ 50.00%/49.75% │ 1"), "{}", row("2"));
    assert!(row("3").ends_with("660px/60px │ 0.00%/100.00% │ 1"), "{}", row("3"));
}

#[test]
fn schedules_survive_a_restart() {
    let dir = make_temp_dir("binary");
    let first = run_with_input(&dir, "course add \"Data Structures\"\nsched 1 thu 13:00-14:15\nexit\n");
    assert!(first.status.success());
    assert!(dir.join("weekgrid.json").exists());

    let second = run_with_input(&dir, "course show 1\nexit\n");
    let lines = normalized_lines(&second.stdout);
    assert!(lines.iter().any(|l| l == "DATA STRUCTURES SCHEDULE"));
    assert!(lines.iter().any(|l| l == "1  │ THU │ 1:00 PM - 2:15 PM"));
}

#[test]
fn custom_paths_and_log_file_are_used() {
    let dir = make_temp_dir("binary");
    let output = run_with_args(
        &dir,
        &[
            "--config",
            "settings.json",
            "--store",
            "data.json",
            "--logs",
            "session-logs",
            "--today",
            "2026-10-21",
        ],
        "course add Art\nexit\n",
    );
    assert!(output.status.success());
    assert!(dir.join("settings.json").exists());
    assert!(dir.join("data.json").exists());
    let log_file = fs::read_dir(dir.join("session-logs"))
        .unwrap()
        .find_map(|e| e.ok())
        .unwrap();
    let log = fs::read_to_string(log_file.path()).unwrap();
    assert!(log.contains("Command run: course add Art"));
    assert!(read_log_contents(&dir).is_none());
}

#[test]
fn bad_arguments_fail_fast() {
    let dir = make_temp_dir("binary");
    let output = run_with_args(&dir, &["--today", "tomorrow"], "");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid date for --today"), "{stderr}");

    let output = run_with_args(&dir, &["--verbose"], "");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown argument: --verbose"));
}

#[test]
fn end_of_input_exits_cleanly() {
    let dir = make_temp_dir("binary");
    let output = run_with_input(&dir, "next\n");
    assert!(output.status.success());
    let lines = normalized_lines(&output.stdout);
    assert!(lines.iter().any(|l| l == "WEEK OF OCT 25 - OCT 31, 2026"));
}

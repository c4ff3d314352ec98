use weekgrid::config::Config;

use crate::common::{make_temp_dir, normalized_lines, run_with_input, write_config};

#[test]
fn config_command_shows_table_and_exits_on_n() {
    let dir = make_temp_dir("config");
    let output = run_with_input(&dir, "config\nn\nexit\n");
    assert!(output.status.success());
    let lines = normalized_lines(&output.stdout);
    assert!(lines.iter().any(|l| l == "CONFIG"));
    assert!(lines.iter().any(|l| l.starts_with("0  │ HOUR_HEIGHT_PX")));
}

#[test]
fn config_edit_persists_to_disk() {
    let dir = make_temp_dir("config");
    let output = run_with_input(&dir, "config\ny\n0\n30\nn\nexit\n");
    assert!(output.status.success());

    let cfg = Config::load_from(dir.join("config.json")).expect("config should reload");
    assert_eq!(cfg.hour_height_px(), 30.0);
}

#[test]
fn set_changes_geometry_in_the_same_session() {
    let dir = make_temp_dir("config");
    let input = "course add Art\nsched 1 tue 02:00-03:00\nset HOUR_HEIGHT_PX 30\nshow\nexit\n";
    let output = run_with_input(&dir, input);
    assert!(output.status.success());
    let lines = normalized_lines(&output.stdout);
    assert!(lines.iter().any(|l| l.contains("60px/30px")), "{lines:?}");
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let dir = make_temp_dir("config");
    write_config(
        &dir,
        r#"{ "max_columns": { "value": 2, "description": "Columns" } }"#,
    );
    let cfg = Config::load_from(dir.join("config.json")).unwrap();
    assert_eq!(cfg.max_columns(), 2);
    assert_eq!(cfg.hour_height_px(), 60.0);
}

#[test]
fn malformed_config_stops_startup() {
    let dir = make_temp_dir("config");
    write_config(&dir, "{ not json");
    let output = run_with_input(&dir, "exit\n");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid JSON"), "{stderr}");
}

#[test]
fn out_of_range_config_stops_startup() {
    let dir = make_temp_dir("config");
    write_config(
        &dir,
        r#"{ "hour_height_px": { "value": -5, "description": "Hour height" } }"#,
    );
    let output = run_with_input(&dir, "exit\n");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("HOUR_HEIGHT_PX"));
}

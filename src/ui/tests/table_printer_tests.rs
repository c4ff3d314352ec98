use crate::ui::table_printer::{TablePrinter, TableSpec};

fn render(printer: &TablePrinter, spec: &TableSpec<'_, String>) -> String {
    let mut buf = Vec::new();
    printer.render(spec, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn renders_banner_header_and_rows() {
    let rows = vec![
        vec!["1".to_string(), "Alpha".to_string()],
        vec!["22".to_string(), "Beta".to_string()],
    ];
    let headers = ["ID", "NAME"];
    let output = render(&TablePrinter::new(), &TableSpec::new("Blah", &headers, &rows));
    let expected = "\
──────────
BLAH
──────────
ID │ NAME
──────────
1  │ Alpha
22 │ Beta
──────────
";
    assert_eq!(output, expected);
}

#[test]
fn empty_table_prints_message() {
    let rows: Vec<Vec<String>> = Vec::new();
    let headers = ["ID", "NAME"];
    let spec = TableSpec::new("Things", &headers, &rows).empty_message("Nothing here.");
    let output = render(&TablePrinter::new(), &spec);
    assert_eq!(
        output,
        "─────────────\nTHINGS\n─────────────\nNothing here.\n─────────────\n"
    );
}

#[test]
fn min_width_and_left_pad_apply() {
    let rows = vec![vec!["1".to_string(), "A".to_string()]];
    let headers = ["ID", "N"];
    let printer = TablePrinter::new().with_left_pad(2);
    let output = render(&printer, &TableSpec::new("T", &headers, &rows).min_width(8));
    let first = output.lines().next().unwrap();
    assert_eq!(first, format!("  {}", "─".repeat(8)));
    assert!(output.lines().all(|l| l.starts_with("  ")));
}

#[test]
fn table_width_counts_separators() {
    let printer = TablePrinter::new();
    let rows = vec![vec!["1", "Bob"], vec!["10", "Alice"]];
    // 2 + 5 + one " │ " separator.
    assert_eq!(printer.table_width(&["ID", "NAME"], &rows), 10);
}

#[test]
fn banner_is_uppercase_between_rules() {
    let mut buf = Vec::new();
    TablePrinter::new().render_banner("abc", 5, &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "─────\nABC\n─────\n");
}

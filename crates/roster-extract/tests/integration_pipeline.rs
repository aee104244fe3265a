mod common;

use std::process::Command;

use chrono::NaiveDate;
use roster_extract::{
    ExtractError, ExtractOptions, Period, ShiftType, TrainCode, extract_roster,
    extract_roster_from_bytes,
};
use tempfile::tempdir;

fn options() -> ExtractOptions {
    ExtractOptions {
        agent_id: "AG-7".to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 9, 1),
        ..ExtractOptions::default()
    }
}

#[test]
fn extracts_shifts_across_pages() {
    let pdf = common::build_test_pdf(&common::sample_roster()).expect("PDF fixture should be created");

    let result = extract_roster_from_bytes(&pdf, &options()).expect("extraction should succeed");

    assert_eq!(result.logs.total_cells_detected, 21, "logs: {:?}", result.logs);
    assert_eq!(result.logs.shifts_converted, 20, "logs: {:?}", result.logs);
    assert_eq!(result.logs.errors.len(), 1, "logs: {:?}", result.logs);
    assert!(result.logs.errors[0].contains("XYZ!!"));
    assert!(result.logs.errors[0].contains("2025-09-10"));

    assert!(result.shifts.iter().all(|shift| shift.series == "FL-A"));
    assert!(result.shifts.iter().all(|shift| shift.period == Period::Day));
    assert!(result.shifts.iter().all(|shift| shift.agent_id == "AG-7"));

    let driving = result
        .shifts
        .iter()
        .find(|shift| shift.train_code == TrainCode::Code("FL123".to_string()))
        .expect("FL123 duty should be extracted");
    assert_eq!(driving.shift_type, ShiftType::Driving);
    assert_eq!(driving.start_time.to_string(), "06:30");
    assert_eq!(driving.end_time.to_string(), "14:05");
    assert_eq!(driving.date, NaiveDate::from_ymd_opt(2025, 9, 2).expect("valid date"));
    assert_eq!(driving.weekday_name, "Tuesday");

    let night = result
        .shifts
        .iter()
        .find(|shift| shift.train_code == TrainCode::Code("FL789".to_string()))
        .expect("FL789 duty should be extracted");
    assert_eq!(night.week_number, 3);
    assert_eq!(night.start_time.to_string(), "22:15");
    assert_eq!(night.end_time.to_string(), "06:05");
    assert_eq!(night.date, NaiveDate::from_ymd_opt(2025, 9, 16).expect("valid date"));
    assert_eq!(night.metadata.source, "Roster FL-A, Week 3, R2");
}

#[test]
fn blank_day_cell_keeps_column_dates() {
    let pdf = common::build_test_pdf(&[vec![
        "[FL-B]: SNCB Liege serie - B (journees) PERIODE Z SUP 0".to_string(),
        "Week  R1  R2  R3  R4  R5  R6  R7".to_string(),
        "1     CW      RW  RES F   CV  RT".to_string(),
        "Continued".to_string(),
        common::roster_row(&["Week", "R1", "R2", "R3", "R4", "R5", "R6", "R7"]),
        common::roster_row(&["2", "", "06:30 14:05 FL123", "", "", "", "", "CV"]),
    ]])
    .expect("PDF fixture should be created");

    let result = extract_roster_from_bytes(&pdf, &options()).expect("extraction should succeed");
    assert!(result.logs.errors.is_empty(), "logs: {:?}", result.logs);
    assert_eq!(result.logs.total_cells_detected, 8);

    let placed: Vec<(String, NaiveDate)> = result
        .shifts
        .iter()
        .map(|shift| (shift.metadata.source.clone(), shift.date))
        .collect();
    let date = |day| NaiveDate::from_ymd_opt(2025, 9, day).expect("valid date");
    assert_eq!(
        placed,
        vec![
            ("Roster FL-B, Week 1, R1".to_string(), date(1)),
            ("Roster FL-B, Week 1, R3".to_string(), date(3)),
            ("Roster FL-B, Week 1, R4".to_string(), date(4)),
            ("Roster FL-B, Week 1, R5".to_string(), date(5)),
            ("Roster FL-B, Week 1, R6".to_string(), date(6)),
            ("Roster FL-B, Week 1, R7".to_string(), date(7)),
            ("Roster FL-B, Week 2, R2".to_string(), date(9)),
            ("Roster FL-B, Week 2, R7".to_string(), date(14)),
        ]
    );
    assert_eq!(result.shifts[1].metadata.original_content, "RW");
    assert_eq!(result.shifts[6].train_code, TrainCode::Code("FL123".to_string()));
}

#[test]
fn legend_tables_are_ignored() {
    let pdf = common::build_test_pdf(&[vec![
        "Code  Meaning",
        "CW  Compensatory rest",
        "RW  Weekly rest",
    ]])
    .expect("PDF fixture should be created");

    let result = extract_roster_from_bytes(&pdf, &options()).expect("extraction should succeed");
    assert!(result.shifts.is_empty());
    assert_eq!(result.logs.total_cells_detected, 0);
    assert!(result.logs.errors.is_empty());
}

#[test]
fn page_selection_limits_scanned_pages() {
    let pdf = common::build_test_pdf(&common::sample_roster()).expect("PDF fixture should be created");
    let options = ExtractOptions {
        pages: Some("2".parse().expect("selection should parse")),
        ..options()
    };

    let result = extract_roster_from_bytes(&pdf, &options).expect("extraction should succeed");
    assert_eq!(result.shifts.len(), 7);
    assert!(result.shifts.iter().all(|shift| shift.series == "UNKNOWN"));
}

#[test]
fn empty_agent_id_falls_back_to_default() {
    let pdf = common::build_test_pdf(&common::sample_roster()).expect("PDF fixture should be created");
    let options = ExtractOptions {
        agent_id: String::new(),
        ..options()
    };

    let result = extract_roster_from_bytes(&pdf, &options).expect("blank agent id should not abort");
    assert_eq!(result.logs.shifts_converted, 20);
    assert!(result.shifts.iter().all(|shift| shift.agent_id == "AGENT_ID_DEFAULT"));
}

#[test]
fn unreadable_document_is_fatal() {
    let error = extract_roster_from_bytes(b"definitely not a pdf", &options())
        .expect_err("garbage should not open");
    assert!(matches!(error, ExtractError::DocumentUnreadable(_)), "error: {error:?}");
}

#[test]
fn extracts_from_file_path() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("roster.pdf");
    common::create_test_pdf(&input, &common::sample_roster()).expect("PDF fixture should be created");

    let result = extract_roster(&input, &options()).expect("extraction should succeed");
    assert_eq!(result.shifts.len(), 20);

    let missing = extract_roster(&dir.path().join("missing.pdf"), &options())
        .expect_err("missing file should fail");
    assert!(matches!(missing, ExtractError::Io(_)));
}

#[test]
fn cli_writes_json_envelope() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("roster.pdf");
    let output = dir.path().join("roster.json");
    common::create_test_pdf(&input, &common::sample_roster()).expect("PDF fixture should be created");

    let status = Command::new(env!("CARGO_BIN_EXE_roster2json"))
        .args([
            "extract",
            "-i",
            &input.to_string_lossy(),
            "-o",
            &output.to_string_lossy(),
            "--agent-id",
            "AG-9",
            "--start-date",
            "2025-09-01",
        ])
        .status()
        .expect("CLI should run");
    assert_eq!(status.code(), Some(0));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).expect("output should exist"))
            .expect("output should be JSON");
    assert_eq!(json["shifts"][0]["agent_id"], "AG-9");
    assert_eq!(json["shifts"][0]["date"], "2025-09-01");
    assert_eq!(json["logs"]["shifts_converted"], 20);
}

#[test]
fn cli_exits_with_code_2_when_no_shifts() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("empty.pdf");
    let output = dir.path().join("empty.csv");
    common::create_test_pdf(&input, &[vec!["No roster here"]]).expect("PDF fixture should be created");

    let status = Command::new(env!("CARGO_BIN_EXE_roster2json"))
        .args([
            "extract",
            "-i",
            &input.to_string_lossy(),
            "-o",
            &output.to_string_lossy(),
            "--format",
            "csv",
        ])
        .status()
        .expect("CLI should run");

    assert_eq!(status.code(), Some(2));
    let csv = std::fs::read_to_string(&output).expect("output should exist");
    assert!(csv.starts_with("shift_id,agent_id,series"));
}

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use calamine::{Reader, Xlsx, open_workbook};
use feederbook_core::tables::METER_ADVANCES;
use feederbook_core::{COLUMNS, CellValue, Flag, HierarchyLayout, MeterReadingRecord};
use feederbook_generate::{
    GenerateOptions, GenerationEngine, GenerationError, generate_records, read_workbook,
};

fn standard_records() -> Vec<MeterReadingRecord> {
    generate_records(&HierarchyLayout::STANDARD).expect("generate standard dataset")
}

/// Meter position is the trailing two digits of the meter number.
fn meter_position(record: &MeterReadingRecord) -> i64 {
    record
        .meter_no
        .rsplit('-')
        .next()
        .and_then(|suffix| suffix.parse().ok())
        .expect("meter number ends with a position")
}

#[test]
fn first_row_matches_reference() {
    let records = standard_records();
    let first = &records[0];

    assert_eq!(first.region_name, "Region 1");
    assert_eq!(first.feeder_name, "Feeder F001");
    assert_eq!(first.feeder_code, "F001");
    assert_eq!(first.feeder_day2_reading, 5320);
    assert_eq!(first.feeder_day1_reading, 5100);
    assert_eq!(first.feeder_mf, 1);
    assert_eq!(first.dt_name, "DT F001DT001");
    assert_eq!(first.dt_code, "F001DT001");
    assert_eq!(first.dt_day2_reading, 1050);
    assert_eq!(first.dt_day1_reading, 1000);
    assert_eq!(first.dt_mf, 1);
    assert_eq!(first.meter_no, "MTR-F001DT001-01");
    assert_eq!(first.meter_day1_reading, 100);
    assert_eq!(first.meter_day2_reading, 105);
    assert_eq!(first.daily_energy, Flag::Yes);
    assert_eq!(first.load_data, Flag::No);
}

#[test]
fn last_row_closes_the_hierarchy() {
    let records = standard_records();
    let last = records.last().expect("non-empty dataset");

    assert_eq!(last.region_name, "Region 3");
    assert_eq!(last.feeder_code, "F006");
    assert_eq!((last.feeder_day1_reading, last.feeder_day2_reading), (10600, 10830));
    assert_eq!(last.dt_code, "F006DT004");
    assert_eq!((last.dt_day1_reading, last.dt_day2_reading), (4000, 4050));
    assert_eq!(last.meter_no, "MTR-F006DT004-10");
    assert_eq!(last.meter_day1_reading, 1000);
    assert_eq!(last.meter_day2_reading, 1004);
    assert_eq!(last.daily_energy, Flag::No);
    assert_eq!(last.load_data, Flag::Yes);
}

#[test]
fn identifiers_are_unique() {
    let records = standard_records();
    assert_eq!(records.len(), 240);

    let meters: BTreeSet<_> = records.iter().map(|r| r.meter_no.as_str()).collect();
    let dts: BTreeSet<_> = records.iter().map(|r| r.dt_code.as_str()).collect();
    let feeders: BTreeSet<_> = records.iter().map(|r| r.feeder_code.as_str()).collect();

    assert_eq!(meters.len(), 240);
    assert_eq!(dts.len(), 24);
    assert_eq!(feeders.len(), 6);
}

#[test]
fn feeder_codes_continue_across_regions() {
    let records = standard_records();
    let first_of_region_2 = records
        .iter()
        .find(|r| r.region_name == "Region 2")
        .expect("region 2 present");
    assert_eq!(first_of_region_2.feeder_code, "F003");

    let region_3: BTreeSet<_> = records
        .iter()
        .filter(|r| r.region_name == "Region 3")
        .map(|r| r.feeder_code.as_str())
        .collect();
    assert_eq!(region_3, BTreeSet::from(["F005", "F006"]));
}

#[test]
fn flags_alternate_by_meter_parity() {
    for record in standard_records() {
        let position = meter_position(&record);
        assert_ne!(record.daily_energy, record.load_data, "{}", record.meter_no);
        assert_eq!(record.daily_energy.is_yes(), position % 2 == 1, "{}", record.meter_no);
    }
}

#[test]
fn meter_readings_follow_position_and_advance() {
    for record in standard_records() {
        let position = meter_position(&record);
        let advance = METER_ADVANCES[(position - 1) as usize];
        assert_eq!(record.meter_day1_reading, 100 * position);
        assert_eq!(
            record.meter_day2_reading - record.meter_day1_reading,
            advance,
            "{}",
            record.meter_no
        );
    }
}

#[test]
fn workbook_round_trips_records() {
    let out_dir = temp_out_dir("round_trip");
    let mut options = GenerateOptions::default();
    options.output_path = out_dir.join("sample_feeder_dt_meter_data.xlsx");

    let engine = GenerationEngine::new(options);
    let result = engine.run().expect("run generation");
    assert_eq!(result.report.rows_written, 240);
    assert_eq!(result.report.feeders, 6);
    assert_eq!(result.report.dts, 24);

    let workbook: Xlsx<_> = open_workbook(&result.report.output_path).expect("open workbook");
    assert_eq!(workbook.sheet_names(), ["Sheet1"]);

    let read_back = read_workbook(&result.report.output_path).expect("read workbook");
    assert_eq!(read_back, result.records);

    fs::remove_dir_all(&out_dir).ok();
}

#[test]
fn custom_layout_limits_the_workbook() {
    let out_dir = temp_out_dir("custom_layout");
    let mut options = GenerateOptions::default();
    options.output_path = out_dir.join("small.xlsx");

    let layout = HierarchyLayout {
        regions: &["North"],
        feeders_per_region: 2,
        dts_per_feeder: 1,
        meters_per_dt: 3,
    };
    let result = GenerationEngine::new(options)
        .with_layout(layout)
        .run()
        .expect("run generation");
    assert_eq!(result.report.rows_written, 6);
    assert_eq!(result.report.regions, 1);
    assert_eq!(result.report.feeders, 2);
    assert_eq!(result.report.dts, 2);

    let read_back = read_workbook(&result.report.output_path).expect("read workbook");
    assert_eq!(read_back, result.records);
    assert_eq!(read_back[5].meter_no, "MTR-F002DT001-03");

    fs::remove_dir_all(&out_dir).ok();
}

#[test]
fn oversized_layout_writes_nothing() {
    let out_dir = temp_out_dir("oversized_layout");
    let path = out_dir.join("never.xlsx");
    let mut options = GenerateOptions::default();
    options.output_path = path.clone();

    let layout = HierarchyLayout {
        meters_per_dt: 11,
        ..HierarchyLayout::STANDARD
    };
    let err = GenerationEngine::new(options)
        .with_layout(layout)
        .run()
        .expect_err("eleven meters exceed the advance table");

    assert!(matches!(
        err,
        GenerationError::Core(feederbook_core::Error::InvalidLayout(_))
    ));
    assert!(!path.exists());

    fs::remove_dir_all(&out_dir).ok();
}

#[test]
fn export_overwrites_existing_file() {
    let out_dir = temp_out_dir("overwrite");
    let path = out_dir.join("sample_feeder_dt_meter_data.xlsx");
    fs::write(&path, b"stale contents").expect("seed stale file");

    let mut options = GenerateOptions::default();
    options.output_path = path.clone();
    GenerationEngine::new(options).run().expect("run generation");

    let records = read_workbook(&path).expect("read workbook");
    assert_eq!(records.len(), 240);

    fs::remove_dir_all(&out_dir).ok();
}

#[test]
fn export_fails_when_directory_is_missing() {
    let out_dir = temp_out_dir("missing_dir");
    let path = out_dir.join("does_not_exist").join("data.xlsx");

    let mut options = GenerateOptions::default();
    options.output_path = path.clone();
    let err = GenerationEngine::new(options)
        .run()
        .expect_err("missing directory should fail");

    assert!(matches!(err, GenerationError::Xlsx(_)));
    assert!(!path.exists());

    fs::remove_dir_all(&out_dir).ok();
}

#[test]
fn reader_rejects_unexpected_header() {
    let out_dir = temp_out_dir("bad_header");
    let path = out_dir.join("other.xlsx");

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Region").expect("write header");
    workbook.save(&path).expect("save workbook");

    let err = read_workbook(&path).expect_err("header mismatch");
    assert!(matches!(err, GenerationError::InvalidWorkbook(_)));

    fs::remove_dir_all(&out_dir).ok();
}

#[test]
fn reader_rejects_numbers_outside_i64() {
    let out_dir = temp_out_dir("huge_number");
    let path = out_dir.join("huge.xlsx");

    let record = standard_records().remove(0);
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *name).expect("write header");
    }
    for (col, cell) in record.cells().iter().enumerate() {
        let written = match cell {
            CellValue::Int(value) => sheet.write_number(1, col as u16, *value as f64),
            CellValue::Text(value) => sheet.write_string(1, col as u16, value),
        };
        written.expect("write cell");
    }
    sheet.write_number(1, 3, 1e19).expect("write huge reading");
    workbook.save(&path).expect("save workbook");

    let err = read_workbook(&path).expect_err("1e19 does not fit in i64");
    match err {
        GenerationError::InvalidWorkbook(message) => {
            assert!(message.contains("Feeder Day2 reading"), "{message}")
        }
        other => panic!("unexpected error: {other}"),
    }

    fs::remove_dir_all(&out_dir).ok();
}

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "feederbook_generate_{label}_{}",
        uuid::Uuid::new_v4()
    ));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}

// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use anyhow::Result;
use polars::df;
use std::io::Write;
use tempfile::NamedTempFile;
use tourism::{
    aggregate_totals, ExplorerConfig, ExplorerError, FacilityCounts, FacilityRecord,
    FacilityTable, FacilityType, Level, LevelFilter, LoadError, Loader, TourismExplorer,
};

const SAMPLE_CSV: &str = "\
refArea ,Total number of hotels , Total number of cafes,Total number of guest houses,Total number of restaurants \n\
http://dbpedia.org/resource/Beirut_Governorate,10,5,0,3\n\
http://dbpedia.org/resource/Matn_District,4,n/a,1,6\n\
http://dbpedia.org/resource/Akkar_Governorate,2,1,,0\n\
http://dbpedia.org/resource/Zahle,1,1,1,1\n";

fn write_csv(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{content}")?;
    file.flush()?;
    Ok(file)
}

#[test]
fn test_load_trims_headers_and_normalizes_rows() -> Result<()> {
    let file = write_csv(SAMPLE_CSV)?;
    let table = Loader::new().load_csv(file.path())?;

    assert_eq!(table.len(), 4);
    assert_eq!(table.metadata().row_count, 4);
    assert_eq!(table.metadata().column_count, 5);

    let beirut = &table.records()[0];
    assert_eq!(beirut.area(), "Beirut Governorate");
    assert_eq!(beirut.level(), Level::Governorate);
    assert_eq!(beirut.total(), 18);

    let matn = &table.records()[1];
    assert_eq!(matn.area(), "Matn District");
    assert_eq!(matn.level(), Level::District);
    assert_eq!(matn.count(FacilityType::Cafes), 0);
    assert_eq!(matn.total(), 11);

    let akkar = &table.records()[2];
    assert_eq!(akkar.count(FacilityType::GuestHouses), 0);
    assert_eq!(akkar.total(), 3);

    // No keyword and no district marker still lands in District.
    let zahle = &table.records()[3];
    assert_eq!(zahle.area(), "Zahle");
    assert_eq!(zahle.level(), Level::District);
    Ok(())
}

#[test]
fn test_total_always_matches_counts() -> Result<()> {
    let table = Loader::new().load_csv_str(SAMPLE_CSV)?;
    for record in table.records() {
        let expected: u64 = FacilityType::ALL.iter().map(|f| record.count(*f)).sum();
        assert_eq!(record.total(), expected, "total mismatch for {}", record.area());
    }
    Ok(())
}

#[test]
fn test_missing_file_is_fatal() {
    let err = Loader::new()
        .load_csv("/definitely/not/here/lebanon_tourism.csv")
        .unwrap_err();
    assert!(matches!(err, LoadError::SourceFile { .. }));
}

#[test]
fn test_missing_count_column_is_fatal() {
    let csv = "refArea,Total number of hotels,Total number of cafes,Total number of restaurants\n\
               x/Beirut_Governorate,1,2,3\n";
    let err = Loader::new().load_csv_str(csv).unwrap_err();
    assert!(
        matches!(&err, LoadError::ColumnNotFound { column } if column == "Total number of guest houses"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_missing_location_is_fatal() -> Result<()> {
    let df = df!(
        "refArea" => [Some("x/Beirut_Governorate"), None],
        "Total number of hotels" => [1i64, 2],
        "Total number of cafes" => [1i64, 2],
        "Total number of guest houses" => [1i64, 2],
        "Total number of restaurants" => [1i64, 2]
    )?;
    let err = Loader::new().normalize_dataframe(&df, None).unwrap_err();
    assert!(matches!(err, LoadError::MissingLocation { row: 2, .. }));
    Ok(())
}

#[test]
fn test_custom_columns_from_config() -> Result<()> {
    let yaml = "\
columns:
  location: path
  hotels: h
  cafes: c
  guest_houses: g
  restaurants: r
";
    let config = ExplorerConfig::from_yaml_str(yaml)?;
    let csv = "path,h,c,g,r\nroot/South_Governorate,3,3,3,3\nroot/Tyre_District,1,0,0,0\n";
    let table = Loader::with_config(config).load_csv_str(csv)?;
    assert_eq!(table.total_facilities(), 13);
    assert_eq!(table.records()[0].area(), "South Governorate");
    Ok(())
}

#[test]
fn test_explorer_open_reports_unreadable_source() {
    let config = ExplorerConfig::default().with_data_path("/nope/missing.csv");
    let err = match TourismExplorer::open(config) {
        Ok(_) => panic!("expected a load failure"),
        Err(err) => err,
    };
    assert!(matches!(err, ExplorerError::Load(LoadError::SourceFile { .. })));
    assert!(!err.is_recoverable());
    assert!(err.user_message().contains("/nope/missing.csv"));
}

#[test]
fn test_bundled_config_matches_defaults() -> Result<()> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/explorer.yml");
    let config = ExplorerConfig::from_yaml_file(path)?;
    assert_eq!(config, ExplorerConfig::default());
    Ok(())
}

#[test]
fn test_oversized_counts_are_coerced_to_zero() -> Result<()> {
    let csv = "\
refArea,Total number of hotels,Total number of cafes,Total number of guest houses,Total number of restaurants
x/Beirut_Governorate,1e20,1,0,0
x/Beirut_Governorate,18446744073709551615,2,0,0
x/Tyre_District,4294967295,0,0,1
";
    let table = Loader::new().load_csv_str(csv)?;
    let beirut = &table.records()[0];
    assert_eq!(beirut.count(FacilityType::Hotels), 0);
    assert_eq!(beirut.total(), 1);
    assert_eq!(table.records()[1].total(), 2);
    assert_eq!(table.records()[2].total(), 4_294_967_296);

    let view = aggregate_totals(&table, LevelFilter::All);
    assert_eq!(view.rows[0].area, "Tyre District");
    assert_eq!(view.rows[1].value, 3);
    assert_eq!(view.total(), table.total_facilities());
    Ok(())
}

#[test]
fn test_counts_saturate_instead_of_overflowing() {
    let huge = FacilityCounts::new(u64::MAX, 1, 0, 0);
    assert_eq!(huge.total(), u64::MAX);

    let table = FacilityTable::from_records(vec![
        FacilityRecord::new("Beirut", Level::Governorate, FacilityCounts::new(u64::MAX, 0, 0, 0)),
        FacilityRecord::new("Beirut", Level::Governorate, FacilityCounts::new(1, 0, 0, 0)),
    ]);
    let view = aggregate_totals(&table, LevelFilter::Governorate);
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.total(), u64::MAX);
    assert_eq!(table.total_facilities(), u64::MAX);
}

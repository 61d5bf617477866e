use std::collections::HashSet;

use wa_parser::export::{self, OutputFormat};
use wa_parser::parser::fee::service_fee;
use wa_parser::{parse, run_parser, Dialect, Engine, Error};

const BUDI: &str = "1234567890123456
Budi Santoso
skip-line
01-02-1990
budi@mail.com
JAN 2024
1.000.000
LOKASI
Jakarta
Tebet
Menteng";

#[test]
fn positional_reference_block() {
    let table = parse(BUDI, Dialect::Format1);
    assert_eq!(table.len(), 1);
    let r = &table.records()[0];
    assert_eq!(r.nik, "1234567890123456");
    assert_eq!(r.nama, "Budi Santoso");
    assert_eq!(r.tanggal_lahir, "01-02-1990");
    assert_eq!(r.periode, "JAN 2024");
    assert_eq!(r.saldo, "1000000");
    assert_eq!(r.total_saldo, 1_000_000);
    assert_eq!(r.fee, 45_000);
    assert_eq!(r.sensor, "Tunggal");
    assert_eq!(r.kota, "Jakarta");
    assert_eq!(r.kecamatan, "Tebet");
    assert_eq!(r.kelurahan, "Menteng");
}

#[test]
fn fee_tier_scenario() {
    for (total, fee) in [
        (0, 32_000),
        (999_999, 32_000),
        (1_000_000, 45_000),
        (1_600_000, 64_000),
        (2_100_000, 74_000),
        (3_000_000, 90_000),
    ] {
        assert_eq!(service_fee(total), fee, "total {total}");
    }
}

#[test]
fn positional_duplicates_keep_first_block() {
    let second = BUDI.replace("Budi Santoso", "Budi Kedua");
    let text = format!(
        "[9.41, 3/7/2024] Agen: {BUDI}\n[9.42, 3/7/2024] Agen: {second}\n[9.43, 3/7/2024] Agen: halo\nok"
    );
    let (table, report) = Engine::default().parse_with_report(&text, Dialect::Format1);
    assert_eq!(report.blocks, 3);
    assert_eq!(report.too_short, 1);
    assert_eq!(report.duplicates, 1);
    assert_eq!(table.len(), 1);
    assert_eq!(table.records()[0].nama, "Budi Santoso");
}

#[test]
fn labeled_blocks_without_nik_are_dropped() {
    let text = "\
NAMA: SITI AMINAH
NIK: 3201 0000 0000 0009
TTL: BOGOR 01-01-1980
siti@mail.com
900.000

NAMA: SITI LAIN
NIK: 3201000000000009
900.000

NAMA: TANPA IDENTITAS
100.000
";
    let (table, report) = Engine::default().parse_with_report(text, Dialect::Format2);
    assert_eq!(report.blocks, 3);
    assert_eq!(report.no_identity, 1);
    assert_eq!(report.duplicates, 1);
    assert_eq!(table.len(), 1);

    let siti = table.find("3201000000000009").unwrap();
    assert_eq!(siti.nama, "SITI AMINAH");
    assert_eq!(siti.tanggal_lahir, "01-01-1980");
    assert_eq!(siti.akun, "siti@mail.com");
    assert_eq!(siti.total_saldo, 900_000);
    assert_eq!(siti.fee, 32_000);
}

#[test]
fn no_two_rows_share_a_nik() {
    for (name, dialect) in [("format_1", Dialect::Format1), ("format_2", Dialect::Format2)] {
        let text = std::fs::read_to_string(format!("tests/fixtures/{name}.txt")).unwrap();
        let table = parse(&text, dialect);
        let niks: HashSet<_> = table.iter().map(|r| r.nik.as_str()).collect();
        assert_eq!(niks.len(), table.len());
        assert_eq!(table, parse(&text, dialect));
        assert!(table.iter().all(|r| r.fee % 1000 == 0));
    }
}

#[test]
fn selector_strings() {
    assert_eq!(run_parser(BUDI, "format_1").unwrap().len(), 1);
    assert!(matches!(run_parser(BUDI, "pdf"), Err(Error::UnknownDialect(s)) if s == "pdf"));
}

#[test]
fn export_round_trip_through_files() {
    let tmp = tempfile::tempdir().unwrap();
    let table = parse(BUDI, Dialect::Format1);

    let csv_path = export::export_to_dir(&table, tmp.path(), OutputFormat::Csv).unwrap();
    let csv_text = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv_text.lines().count(), 2);
    assert!(csv_text.lines().nth(1).unwrap().starts_with("1234567890123456,Budi Santoso,"));

    let json_path = export::export_to_dir(&table, tmp.path(), OutputFormat::Json).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value[0]["NIK"], "1234567890123456");
    assert_eq!(value[0]["Total Saldo"], 1_000_000);
}

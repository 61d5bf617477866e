use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::parser::fee::service_fee;
use crate::parser::gender::guess_gender;
use crate::parser::scan::Draft;

/// Sensor value for records without a masked account line.
pub const UNMASKED_SENSOR: &str = "Tunggal";

/// Output column names, in export order.
pub const COLUMNS: [&str; 15] = [
    "NIK",
    "Nama",
    "Tanggal Lahir",
    "Jenis Kelamin",
    "Kelurahan",
    "Kecamatan",
    "Kota/Kabupaten",
    "Perusahaan",
    "Periode",
    "Sensor",
    "Saldo",
    "Total Saldo",
    "Fee",
    "Details",
    "Akun",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "NIK")]
    pub nik: String,
    #[serde(rename = "Nama")]
    pub nama: String,
    #[serde(rename = "Tanggal Lahir")]
    pub tanggal_lahir: String,
    #[serde(rename = "Jenis Kelamin")]
    pub jenis_kelamin: String,
    #[serde(rename = "Kelurahan")]
    pub kelurahan: String,
    #[serde(rename = "Kecamatan")]
    pub kecamatan: String,
    #[serde(rename = "Kota/Kabupaten")]
    pub kota: String,
    #[serde(rename = "Perusahaan")]
    pub perusahaan: String,
    #[serde(rename = "Periode")]
    pub periode: String,
    #[serde(rename = "Sensor")]
    pub sensor: String,
    /// Balance digit strings joined with ",".
    #[serde(rename = "Saldo")]
    pub saldo: String,
    #[serde(rename = "Total Saldo")]
    pub total_saldo: u64,
    #[serde(rename = "Fee")]
    pub fee: u64,
    /// Left empty for downstream annotation.
    #[serde(rename = "Details")]
    pub details: String,
    #[serde(rename = "Akun")]
    pub akun: String,
}

impl Record {
    /// Derive gender, total and fee from an extracted draft.
    ///
    /// A balance too long for `u64` saturates the total instead of failing.
    pub fn assemble(draft: Draft, female_fragments: &[String]) -> Record {
        let total_saldo = draft
            .saldo
            .iter()
            .map(|s| s.parse::<u64>().unwrap_or(u64::MAX))
            .fold(0u64, u64::saturating_add);
        let sensor = if draft.sensor.is_empty() {
            UNMASKED_SENSOR.to_string()
        } else {
            draft.sensor
        };

        Record {
            jenis_kelamin: guess_gender(&draft.nama, female_fragments).to_string(),
            nik: draft.nik,
            nama: draft.nama,
            tanggal_lahir: draft.tanggal_lahir,
            kelurahan: draft.kelurahan,
            kecamatan: draft.kecamatan,
            kota: draft.kota,
            perusahaan: draft.perusahaan,
            periode: draft.periode,
            sensor,
            saldo: draft.saldo.join(","),
            total_saldo,
            fee: service_fee(total_saldo),
            details: String::new(),
            akun: draft.akun,
        }
    }
}

/// Records unique by NIK, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordTable {
    records: Vec<Record>,
}

impl RecordTable {
    /// Build a table, keeping the first record for each NIK.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        RecordTable {
            records: records
                .into_iter()
                .unique_by(|r| r.nik.clone())
                .collect(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, nik: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.nik == nik)
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl<'a> IntoIterator for &'a RecordTable {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

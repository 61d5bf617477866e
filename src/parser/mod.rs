pub mod blocks;
pub mod clean;
pub mod extract;
pub mod fee;
pub mod gender;
pub mod lexicon;
pub mod scan;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::record::{Record, RecordTable};
use blocks::SplitStrategy;
use extract::{LabeledExtractor, LocationStrategy, PositionalExtractor};
use lexicon::Lexicon;
use scan::{Draft, Rejection};

/// Transcript convention a text follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// One chat message per person, fields by position.
    Format1,
    /// Label-keyed identity lines, unlabeled balance/company/period runs.
    Format2,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::Format1, Dialect::Format2];

    pub fn selector(self) -> &'static str {
        match self {
            Dialect::Format1 => "format_1",
            Dialect::Format2 => "format_2",
        }
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "format_1" | "dialect_1" => Ok(Dialect::Format1),
            "format_2" | "dialect_2" => Ok(Dialect::Format2),
            _ => Err(Error::UnknownDialect(s.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// Block counts from one parse call. The engine never logs; callers decide
/// what to do with rejections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub blocks: usize,
    pub too_short: usize,
    pub no_identity: usize,
    pub duplicates: usize,
    pub records: usize,
}

impl ParseReport {
    pub fn rejected(&self) -> usize {
        self.too_short + self.no_identity
    }

    fn reject(&mut self, reason: Rejection) {
        match reason {
            Rejection::TooShort => self.too_short += 1,
            Rejection::NoIdentity => self.no_identity += 1,
        }
    }
}

/// Extraction settings for both dialects.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub positional_lexicon: Lexicon,
    pub labeled_lexicon: Lexicon,
    pub split: SplitStrategy,
    pub location: LocationStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            positional_lexicon: Lexicon::positional(),
            labeled_lexicon: Lexicon::labeled(),
            split: SplitStrategy::default(),
            location: LocationStrategy::default(),
        }
    }
}

/// Text in, record table out: clean → split → extract → assemble.
#[derive(Debug, Clone)]
pub struct Engine {
    positional: PositionalExtractor,
    labeled: LabeledExtractor,
    split: SplitStrategy,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Engine {
            positional: PositionalExtractor::new(config.positional_lexicon),
            labeled: LabeledExtractor::new(config.labeled_lexicon, config.location),
            split: config.split,
        }
    }

    pub fn parse(&self, text: &str, dialect: Dialect) -> RecordTable {
        self.parse_with_report(text, dialect).0
    }

    pub fn parse_with_report(&self, text: &str, dialect: Dialect) -> (RecordTable, ParseReport) {
        let mut report = ParseReport::default();
        let mut records = Vec::new();

        let cleaned = match dialect {
            Dialect::Format1 => clean::strip_directional(text),
            Dialect::Format2 => clean::strip_directional_and_symbols(text),
        };
        let pieces: Vec<Cow<'_, str>> = match dialect {
            Dialect::Format1 => blocks::split_chat_messages(&cleaned)
                .into_iter()
                .map(Cow::Borrowed)
                .collect(),
            Dialect::Format2 => blocks::split_labeled(&cleaned, self.split),
        };

        for piece in &pieces {
            report.blocks += 1;
            let lines = match dialect {
                Dialect::Format1 => blocks::chat_lines(piece),
                Dialect::Format2 => blocks::block_lines(piece),
            };
            match self.extract(dialect, &lines) {
                Ok(draft) => records.push(Record::assemble(draft, self.female_fragments(dialect))),
                Err(reason) => report.reject(reason),
            }
        }

        let extracted = records.len();
        let table = RecordTable::from_records(records);
        report.duplicates = extracted - table.len();
        report.records = table.len();
        (table, report)
    }

    fn extract(&self, dialect: Dialect, lines: &[String]) -> std::result::Result<Draft, Rejection> {
        match dialect {
            Dialect::Format1 => self.positional.extract(lines),
            Dialect::Format2 => self.labeled.extract(lines),
        }
    }

    fn female_fragments(&self, dialect: Dialect) -> &[String] {
        match dialect {
            Dialect::Format1 => &self.positional.lexicon().female_fragments,
            Dialect::Format2 => &self.labeled.lexicon().female_fragments,
        }
    }
}

/// Parse with the default lexicons and strategies.
pub fn parse(text: &str, dialect: Dialect) -> RecordTable {
    Engine::default().parse(text, dialect)
}

/// Parse with a dialect named by its selector string (`format_1`, `format_2`).
pub fn run_parser(text: &str, selector: &str) -> Result<RecordTable> {
    let dialect: Dialect = selector.parse()?;
    Ok(parse(text, dialect))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.txt", name)).unwrap()
    }

    #[test]
    fn dialect_selectors() {
        assert_eq!("format_1".parse::<Dialect>().unwrap(), Dialect::Format1);
        assert_eq!(" Dialect_2 ".parse::<Dialect>().unwrap(), Dialect::Format2);
        assert!(matches!(
            "format_3".parse::<Dialect>(),
            Err(Error::UnknownDialect(s)) if s == "format_3"
        ));
        for d in Dialect::ALL {
            assert_eq!(d.to_string().parse::<Dialect>().unwrap(), d);
        }
    }

    #[test]
    fn run_parser_unknown_dialect() {
        assert!(matches!(
            run_parser("anything", "xlsx"),
            Err(Error::UnknownDialect(_))
        ));
    }

    #[test]
    fn empty_text_is_empty_table() {
        for d in Dialect::ALL {
            let (table, report) = Engine::default().parse_with_report("", d);
            assert!(table.is_empty());
            assert_eq!(report, ParseReport::default());
        }
    }

    #[test]
    fn format_1_fixture() {
        let (table, report) = Engine::default().parse_with_report(&fixture("format_1"), Dialect::Format1);
        assert_eq!(table.len(), 3);
        assert_eq!(report.blocks, 6);
        assert_eq!(report.too_short, 1);
        assert_eq!(report.no_identity, 1);
        assert_eq!(report.duplicates, 1);

        let budi = table.find("1234567890123456").unwrap();
        assert_eq!(budi.nama, "Budi Santoso");
        assert_eq!(budi.tanggal_lahir, "01-02-1990");
        assert_eq!(budi.periode, "JAN 2024");
        assert_eq!(budi.saldo, "1000000");
        assert_eq!(budi.total_saldo, 1_000_000);
        assert_eq!(budi.fee, 45_000);
        assert_eq!(budi.sensor, "Tunggal");
        assert_eq!(budi.kota, "Jakarta");
        assert_eq!(budi.kecamatan, "Tebet");
        assert_eq!(budi.kelurahan, "Menteng");
        assert_eq!(budi.akun, "budi@mail.com");
        assert_eq!(budi.jenis_kelamin, "Laki-laki");

        let rina = table.find("3201020304050607").unwrap();
        assert_eq!(rina.jenis_kelamin, "Perempuan");
        assert_eq!(rina.sensor, "1234******");
        assert_eq!(rina.perusahaan, "PT SUMBER MAKMUR");
        assert_eq!(rina.saldo, "2500000,650000");
        assert_eq!(rina.total_saldo, 3_150_000);
        assert_eq!(rina.fee, 94_000);
        assert_eq!(rina.akun, "");

        // Header direction marks are gone from the names.
        assert!(table.iter().all(|r| !r.nama.contains('\u{200e}')));
    }

    #[test]
    fn format_2_fixture() {
        let (table, report) = Engine::default().parse_with_report(&fixture("format_2"), Dialect::Format2);
        assert_eq!(table.len(), 2);
        assert_eq!(report.no_identity, 2);

        let sri = table.find("3174000000000001").unwrap();
        assert_eq!(sri.nama, "SRI WAHYUNI");
        assert_eq!(sri.jenis_kelamin, "Perempuan");
        assert_eq!(sri.saldo, "1250000,750000");
        assert_eq!(sri.fee, 80_000);
        assert_eq!(sri.sensor, "1234****");
        assert_eq!(sri.perusahaan, "PT ANGIN RIBUT");
        assert_eq!(sri.periode, "OKT 2023");
        assert_eq!(sri.kelurahan, "MENTENG ATAS");
        assert_eq!(sri.kecamatan, "SETIABUDI");
        assert_eq!(sri.kota, "JAKARTA SELATAN");

        let agus = table.find("3275000000000002").unwrap();
        assert_eq!(agus.kota, "BEKASI");
        assert_eq!(agus.kelurahan, "JATIMULYA");
        assert_eq!(agus.kecamatan, "TAMBUN SELATAN");
        assert_eq!(agus.sensor, "Tunggal");
        assert_eq!(agus.fee, 32_000);
    }

    #[test]
    fn format_2_coded_fixture() {
        let engine = Engine::new(EngineConfig {
            split: SplitStrategy::PhoneHeader,
            location: LocationStrategy::Coded,
            ..Default::default()
        });
        let table = engine.parse(&fixture("format_2_coded"), Dialect::Format2);
        assert_eq!(table.len(), 2);
        let first = &table.records()[0];
        assert_eq!(first.nik, "3174000000000003");
        assert_eq!(first.kota, "3174");
        assert_eq!(first.kelurahan, "31741");
        assert_eq!(first.kecamatan, "317404");
        let second = &table.records()[1];
        assert_eq!(second.kota, "KARAWANG");
        assert_eq!(second.kelurahan, "Telukjambe");
        assert_eq!(second.kecamatan, "3215011");
    }

    #[test]
    fn format_2_headers_stay_out_of_fields() {
        let (table, report) =
            Engine::default().parse_with_report(&fixture("format_2_headers"), Dialect::Format2);
        assert_eq!(report.blocks, 4);
        assert_eq!(report.no_identity, 2);
        assert_eq!(table.len(), 2);

        let sri = table.find("3174000000000001").unwrap();
        assert_eq!(sri.nama, "SRI WAHYUNI");
        assert_eq!(sri.kelurahan, "MENTENG ATAS");
        assert_eq!(sri.kecamatan, "SETIABUDI");
        assert_eq!(sri.kota, "BEKASI");
        assert_eq!(sri.fee, 56_000);

        let agus = table.find("3275000000000002").unwrap();
        assert_eq!(agus.nama, "AGUS SETIAWAN");
        assert_eq!(agus.kota, "BEKASI");
        assert_eq!(agus.kelurahan, "JATIMULYA");
        assert_eq!(agus.kecamatan, "");
        assert_eq!(agus.periode, "DES 2023");
        assert!(table.iter().all(|r| !r.kota.contains("+62") && !r.kecamatan.contains("+62")));
    }

    #[test]
    fn format_1_bare_carriage_returns() {
        let text = "1234567890123456\rBudi Santoso\rx\r01-02-1990\rJAN 2024\r1.000.000";
        let table = parse(text, Dialect::Format1);
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].nama, "Budi Santoso");
        assert_eq!(table.records()[0].total_saldo, 1_000_000);
    }

    #[test]
    fn idempotent() {
        for (name, dialect) in [("format_1", Dialect::Format1), ("format_2", Dialect::Format2)] {
            let text = fixture(name);
            assert_eq!(parse(&text, dialect), parse(&text, dialect));
        }
    }
}

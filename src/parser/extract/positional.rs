//! Format 1: one chat message per person, fields in fixed positions.
//!
//! ```text
//! 1234567890123456      NIK (exactly 16 digits)
//! Budi Santoso          name
//! 3456                  repeated id fragment, ignored
//! 01-02-1990            birth date
//! budi@mail.com         account (optional)
//! ...body...            company / period / sensor / balances in any order
//! LOKASI
//! Jakarta               city
//! Tebet                 sub-district
//! Menteng               settlement
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::digits_only;
use super::location;
use crate::parser::lexicon::Lexicon;
use crate::parser::scan::{Draft, FieldPolicies, LineCursor, Phase, Policy, Rejection};

static NIK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{16}$").unwrap());
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").unwrap());
static FIGURE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9.,* ]+$").unwrap());
static SENSOR_KEEP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9*]").unwrap());

pub const MIN_LINES: usize = 5;

const PHASES: &[Phase] = &[Phase::Identity, Phase::Body, Phase::Lokasi];

const POLICIES: FieldPolicies = FieldPolicies {
    periode: Policy::LastWins,
    perusahaan: Policy::FirstWins,
    sensor: Policy::LastWins,
};

/// What a body line means, first matching rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRule {
    Stop,
    Noise,
    Periode,
    Sensor,
    Saldo,
    Perusahaan,
    Ignore,
}

#[derive(Debug, Clone)]
pub struct PositionalExtractor {
    lexicon: Lexicon,
}

impl Default for PositionalExtractor {
    fn default() -> Self {
        PositionalExtractor::new(Lexicon::positional())
    }
}

impl PositionalExtractor {
    pub fn new(lexicon: Lexicon) -> Self {
        PositionalExtractor { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn extract(&self, lines: &[String]) -> Result<Draft, Rejection> {
        if lines.len() < MIN_LINES {
            return Err(Rejection::TooShort);
        }
        let mut draft = Draft::default();
        let mut cursor = LineCursor::new(lines);
        for phase in PHASES {
            match phase {
                Phase::Identity => self.identity(&mut cursor, &mut draft)?,
                Phase::Body => self.body(&mut cursor, &mut draft),
                Phase::Lokasi => location::after_marker(lines, &mut draft),
                _ => {}
            }
        }
        Ok(draft)
    }

    fn identity(&self, cursor: &mut LineCursor<'_>, draft: &mut Draft) -> Result<(), Rejection> {
        let nik = cursor
            .bump()
            .filter(|l| NIK_RE.is_match(l))
            .ok_or(Rejection::NoIdentity)?;
        draft.nik = nik.to_string();
        draft.nama = cursor.bump().unwrap_or_default().to_string();
        cursor.advance();
        if let Some(line) = cursor.bump() {
            if DATE_RE.is_match(line) {
                draft.tanggal_lahir = line.to_string();
            }
        }
        if let Some(line) = cursor.bump_if(|l| l.contains('@')) {
            draft.akun = line.to_string();
        }
        Ok(())
    }

    fn body(&self, cursor: &mut LineCursor<'_>, draft: &mut Draft) {
        while let Some(line) = cursor.bump() {
            match self.classify(line) {
                BodyRule::Stop => break,
                BodyRule::Noise | BodyRule::Ignore => {}
                BodyRule::Periode => POLICIES.periode.assign(&mut draft.periode, line),
                BodyRule::Sensor => POLICIES
                    .sensor
                    .assign(&mut draft.sensor, SENSOR_KEEP_RE.replace_all(line, "")),
                BodyRule::Saldo => {
                    let figure = digits_only(line);
                    if !figure.is_empty() {
                        draft.saldo.push(figure);
                    }
                }
                BodyRule::Perusahaan => POLICIES.perusahaan.assign(&mut draft.perusahaan, line),
            }
        }
    }

    pub fn classify(&self, line: &str) -> BodyRule {
        let upper = line.to_uppercase();
        if upper.contains(location::MARKER) {
            BodyRule::Stop
        } else if self.lexicon.is_noise(line) {
            BodyRule::Noise
        } else if self.lexicon.mentions_month(line) || self.lexicon.is_month_year(line) {
            BodyRule::Periode
        } else if line.contains('*') {
            BodyRule::Sensor
        } else if FIGURE_RE.is_match(line) {
            BodyRule::Saldo
        } else if line.chars().any(|c| c.is_ascii_alphabetic()) {
            BodyRule::Perusahaan
        } else {
            BodyRule::Ignore
        }
    }
}

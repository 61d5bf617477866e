//! Format 2: label-keyed identity lines followed by unlabeled runs.
//!
//! ```text
//! NAMA: SRI WAHYUNI
//! NIK: 3174 0000 0000 0001
//! TTL: JAKARTA, 05-06-1988
//! sri@mail.com          account, ends the identity phase
//! 2 SALDO               optional balance-count label
//! 1.250.000             balances
//! 750.000
//! 1234****              masked account number(s)
//! PT ANGIN RIBUT        company
//! IURAN TERAKHIR        noise
//! OKT 2023              period
//! KELURAHAN: ...        location (labels, or unlabeled lines / region codes)
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::digits_only;
use super::location::{self, LocationStrategy};
use crate::parser::lexicon::Lexicon;
use crate::parser::scan::{Draft, LineCursor, Phase, Policy, Rejection};

static NIK_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^NIK\s*:").unwrap());
static DATE_IN_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}-\d{2}-\d{4}").unwrap());
static SALDO_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\d+\s*SALDO$").unwrap());
static FIGURE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9.,]+$").unwrap());
static MASKED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+\*+\s*)+$").unwrap());

const PHASES: &[Phase] = &[
    Phase::Identity,
    Phase::SaldoLabelSkip,
    Phase::Saldo,
    Phase::Sensor,
    Phase::Perusahaan,
    Phase::Periode,
    Phase::Lokasi,
];

const SENSOR_POLICY: Policy = Policy::LastWins;

/// Labeled identity fields, matched as case-insensitive line prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityLabel {
    Nama,
    Nik,
    /// Social-security membership number, only present in coded transcripts.
    Kpj,
    Ttl,
}

const LABELED_IDENTITY: &[IdentityLabel] =
    &[IdentityLabel::Nama, IdentityLabel::Nik, IdentityLabel::Ttl];
const CODED_IDENTITY: &[IdentityLabel] = &[
    IdentityLabel::Nama,
    IdentityLabel::Nik,
    IdentityLabel::Kpj,
    IdentityLabel::Ttl,
];

impl IdentityLabel {
    fn matches(self, line: &str) -> bool {
        let upper = line.to_uppercase();
        match self {
            IdentityLabel::Nama => upper.starts_with("NAMA"),
            IdentityLabel::Nik => NIK_LABEL_RE.is_match(line),
            IdentityLabel::Kpj => upper.starts_with("KPJ"),
            IdentityLabel::Ttl => upper.starts_with("TTL"),
        }
    }

    fn store(self, line: &str, draft: &mut Draft) {
        match self {
            IdentityLabel::Nama => draft.nama = value_after_colon(line).to_string(),
            IdentityLabel::Nik => draft.nik = digits_only(value_after_colon(line)),
            IdentityLabel::Kpj => draft.kpj = digits_only(value_after_colon(line)),
            IdentityLabel::Ttl => {
                draft.tanggal_lahir = DATE_IN_LINE_RE
                    .find(line)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default()
            }
        }
    }
}

/// Text after the first colon, trimmed. A label without a colon has no value.
fn value_after_colon(line: &str) -> &str {
    line.split_once(':').map(|(_, v)| v.trim()).unwrap_or("")
}

#[derive(Debug, Clone)]
pub struct LabeledExtractor {
    lexicon: Lexicon,
    location: LocationStrategy,
}

impl Default for LabeledExtractor {
    fn default() -> Self {
        LabeledExtractor::new(Lexicon::labeled(), LocationStrategy::default())
    }
}

impl LabeledExtractor {
    pub fn new(lexicon: Lexicon, location: LocationStrategy) -> Self {
        LabeledExtractor { lexicon, location }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn identity_labels(&self) -> &'static [IdentityLabel] {
        match self.location {
            LocationStrategy::Labeled => LABELED_IDENTITY,
            LocationStrategy::Coded => CODED_IDENTITY,
        }
    }

    pub fn extract(&self, lines: &[String]) -> Result<Draft, Rejection> {
        if !lines.iter().any(|l| l.to_uppercase().contains("NIK")) {
            return Err(Rejection::NoIdentity);
        }
        let block_text = lines.join(" ");
        let mut draft = Draft::default();
        let mut cursor = LineCursor::new(lines);
        for phase in PHASES {
            self.run_phase(*phase, &mut cursor, &block_text, &mut draft);
        }
        if draft.nik.is_empty() {
            return Err(Rejection::NoIdentity);
        }
        Ok(draft)
    }

    /// Advance `cursor` through one phase, recording what it finds.
    pub fn run_phase(
        &self,
        phase: Phase,
        cursor: &mut LineCursor<'_>,
        block_text: &str,
        draft: &mut Draft,
    ) {
        match phase {
            // The first "@" line ends identity scanning even if labels follow it.
            Phase::Identity => {
                let labels = self.identity_labels();
                while let Some(line) = cursor.bump() {
                    if let Some(label) = labels.iter().find(|l| l.matches(line)) {
                        label.store(line, draft);
                    } else if line.contains('@') {
                        draft.akun = line.to_string();
                        break;
                    }
                }
            }
            Phase::SaldoLabelSkip => {
                cursor.skip_while(|l| SALDO_LABEL_RE.is_match(l));
            }
            Phase::Saldo => {
                for line in cursor.take_while(|l| FIGURE_RE.is_match(l)) {
                    let figure = line.replace(['.', ','], "");
                    if !figure.is_empty() {
                        draft.saldo.push(figure);
                    }
                }
            }
            Phase::Sensor => {
                while let Some(line) = cursor.bump_if(|l| {
                    MASKED_RE.is_match(l) || l.to_uppercase().contains("SENSOR")
                }) {
                    if MASKED_RE.is_match(line) {
                        SENSOR_POLICY.assign(&mut draft.sensor, line);
                    }
                }
            }
            Phase::Perusahaan => {
                if let Some(line) = cursor.bump_if(|l| !self.lexicon.is_noise(l)) {
                    draft.perusahaan = line.to_string();
                }
                cursor.skip_while(|l| self.lexicon.is_noise(l));
            }
            Phase::Periode => {
                if let Some(line) = cursor.bump() {
                    draft.periode = line.to_string();
                }
            }
            Phase::Lokasi => {
                let rest = cursor.drain();
                match self.location {
                    LocationStrategy::Labeled => location::from_labels(block_text, rest, draft),
                    LocationStrategy::Coded => location::from_codes(rest, draft),
                }
            }
            Phase::Body => {}
        }
    }
}

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;
use crate::parser::scan::Draft;

/// Line that introduces the three location lines in the positional format.
pub const MARKER: &str = "LOKASI";

static KELURAHAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)KELURAHAN\s*:\s*(.*?)(?:\s+KECAMATAN|\s+KOTA|\s+KABUPATEN|$)").unwrap()
});
static KECAMATAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)KECAMATAN\s*:\s*(.*?)(?:\s+KOTA|\s+KABUPATEN|$)").unwrap()
});
static KOTA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:KOTA|KABUPATEN)\s*:\s*(.*?)(?:\s+[A-Z]+\s*:|$)").unwrap()
});

// Applied in order, each at most once. The long form goes first so "ADM"
// does not eat the head of "ADMINISTRASI".
static CITY_PREFIXES: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"^KOTA\s+ADMINISTRASI\s*").unwrap(),
        Regex::new(r"^KOTA\s+ADM\b\.?\s*").unwrap(),
        Regex::new(r"^KOTA\s*").unwrap(),
        Regex::new(r"^KABUPATEN\s*").unwrap(),
    ]
});

/// How the label-keyed format reports where a person lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationStrategy {
    /// `KELURAHAN:` / `KECAMATAN:` / `KOTA:` labels, positional fallback.
    #[default]
    Labeled,
    /// Bare region codes (4/5/6 digits) or unlabeled names.
    Coded,
}

impl FromStr for LocationStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "label" | "labeled" => Ok(LocationStrategy::Labeled),
            "coded" | "code" => Ok(LocationStrategy::Coded),
            other => Err(Error::UnknownStrategy {
                kind: "location",
                value: other.to_string(),
            }),
        }
    }
}

/// City, sub-district and settlement from the three lines after the first
/// `LOKASI` marker that has room for them.
pub fn after_marker(lines: &[String], draft: &mut Draft) {
    let found = lines
        .iter()
        .enumerate()
        .find(|(i, l)| l.to_uppercase().contains(MARKER) && i + 3 < lines.len());
    if let Some((i, _)) = found {
        draft.kota = lines[i + 1].replace('*', "");
        draft.kecamatan = lines[i + 2].replace('*', "");
        draft.kelurahan = lines[i + 3].replace('*', "");
    }
}

/// Labeled lookup over the whole block, falling back to `rest` positionally.
pub fn from_labels(block_text: &str, rest: &[String], draft: &mut Draft) {
    let mut found = false;
    if let Some(caps) = KELURAHAN_RE.captures(block_text) {
        draft.kelurahan = caps[1].trim().to_string();
        found = true;
    }
    if let Some(caps) = KECAMATAN_RE.captures(block_text) {
        draft.kecamatan = caps[1].trim().to_string();
        found = true;
    }
    if let Some(caps) = KOTA_RE.captures(block_text) {
        draft.kota = caps[1].trim().to_string();
        found = true;
    }
    if !found {
        fill_positionally(rest, draft);
    }
    draft.kota = normalize_city(&draft.kota);
}

/// Region codes by length; anything else fills the next empty slot.
///
/// Numeric codes of other lengths are treated like names. Values are kept
/// as written, with no city prefix stripping.
pub fn from_codes(rest: &[String], draft: &mut Draft) {
    for line in rest {
        let is_code = line.chars().all(|c| c.is_ascii_digit());
        let slot = match (is_code, line.len()) {
            (true, 4) => Some(&mut draft.kota),
            (true, 5) => Some(&mut draft.kelurahan),
            (true, 6) => Some(&mut draft.kecamatan),
            _ => None,
        };
        match slot {
            Some(slot) => *slot = line.clone(),
            None => fill_positionally(std::slice::from_ref(line), draft),
        }
    }
}

/// City, then settlement, then sub-district: each line fills the first
/// slot still empty. Lines beyond that are ignored.
fn fill_positionally(lines: &[String], draft: &mut Draft) {
    for line in lines {
        let slot = [
            &mut draft.kota,
            &mut draft.kelurahan,
            &mut draft.kecamatan,
        ]
        .into_iter()
        .find(|s| s.is_empty());
        match slot {
            Some(slot) => *slot = line.trim().to_string(),
            None => break,
        }
    }
}

/// Upper-case and drop administrative prefixes: "Kota Adm. Jakarta Selatan"
/// becomes "JAKARTA SELATAN".
pub fn normalize_city(value: &str) -> String {
    let mut city = value.trim().to_uppercase();
    for prefix in CITY_PREFIXES.iter() {
        city = prefix.replace(&city, "").into_owned();
    }
    city.trim().to_string()
}

/// Fixed word lists the extractors consult.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    /// Structural phrases that carry no field value. Compared upper-cased.
    pub noise_words: Vec<String>,
    /// Name fragments that map a name to `Perempuan`. Compared lower-cased.
    pub female_fragments: Vec<String>,
    /// Month abbreviations recognized as a period token anywhere in a line.
    pub months: Vec<String>,
    /// Extra month spellings accepted only in a bare `<MONTH> <YEAR>` line.
    pub month_aliases: Vec<String>,
}

const NOISE_WORDS: &[&str] = &["LANJUT_JMO", "NO_MODAL", "TUNGGAL", "IURAN TERAKHIR"];

const MONTHS: &[&str] = &[
    "JAN", "FEB", "MAR", "APR", "MEI", "JUN", "JUL", "AUG", "SEP", "OKT", "NOV", "DES",
];

const MONTH_ALIASES: &[&str] = &["AGU", "AGUS", "AGUST"];

const FEMALE_FRAGMENTS: &[&str] = &[
    "sri", "wati", "ani", "eni", "wulandari", "sari", "asri", "junitasari",
];

// Positional transcripts also carry a few surnames seen only there.
const FEMALE_FRAGMENTS_POSITIONAL_EXTRA: &[&str] = &["sinaga", "demmanaba"];

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Lexicon {
    /// Lexicon used by the positional (format 1) extractor.
    pub fn positional() -> Self {
        let mut female_fragments = owned(FEMALE_FRAGMENTS);
        female_fragments.extend(owned(FEMALE_FRAGMENTS_POSITIONAL_EXTRA));
        Lexicon {
            noise_words: owned(NOISE_WORDS),
            female_fragments,
            months: owned(MONTHS),
            month_aliases: owned(MONTH_ALIASES),
        }
    }

    /// Lexicon used by the label-keyed (format 2) extractor.
    pub fn labeled() -> Self {
        Lexicon {
            noise_words: owned(NOISE_WORDS),
            female_fragments: owned(FEMALE_FRAGMENTS),
            months: owned(MONTHS),
            month_aliases: owned(MONTH_ALIASES),
        }
    }

    pub fn is_noise(&self, line: &str) -> bool {
        let upper = line.to_uppercase();
        self.noise_words.iter().any(|w| w.to_uppercase() == upper)
    }

    pub fn mentions_month(&self, line: &str) -> bool {
        let upper = line.to_uppercase();
        self.months.iter().any(|m| upper.contains(&m.to_uppercase()))
    }

    /// A line that is exactly a month (or alias) and a four-digit year.
    pub fn is_month_year(&self, line: &str) -> bool {
        let mut parts = line.split_whitespace();
        let (Some(month), Some(year), None) = (parts.next(), parts.next(), parts.next()) else {
            return false;
        };
        let month = month.to_uppercase();
        year.len() == 4
            && year.chars().all(|c| c.is_ascii_digit())
            && self
                .months
                .iter()
                .chain(&self.month_aliases)
                .any(|m| m.to_uppercase() == month)
    }

    /// Replace any list that `overrides` provides, keep the rest.
    pub fn with_overrides(mut self, overrides: &LexiconOverrides) -> Self {
        if let Some(words) = &overrides.noise_words {
            self.noise_words = words.clone();
        }
        if let Some(words) = &overrides.female_fragments {
            self.female_fragments = words.clone();
        }
        if let Some(words) = &overrides.months {
            self.months = words.clone();
        }
        if let Some(words) = &overrides.month_aliases {
            self.month_aliases = words.clone();
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct LexiconOverrides {
    pub noise_words: Option<Vec<String>>,
    pub female_fragments: Option<Vec<String>>,
    pub months: Option<Vec<String>>,
    pub month_aliases: Option<Vec<String>>,
}

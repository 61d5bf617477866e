//! Single-cursor scanning machinery shared by both dialect extractors.
//!
//! An extractor declares an ordered table of [`Phase`]s. Each phase owns the
//! cursor until its rule stops matching, then hands over to the next one.

/// Scanning phases in the order they can appear inside one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Identity,
    /// Mixed-rule scan of the positional format, where balances, period,
    /// sensor and company may come in any order.
    Body,
    SaldoLabelSkip,
    Saldo,
    Sensor,
    Perusahaan,
    Periode,
    Lokasi,
}

/// Which value a field keeps when a block offers several candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    FirstWins,
    LastWins,
}

impl Policy {
    pub fn assign(self, slot: &mut String, value: impl Into<String>) {
        match self {
            Policy::FirstWins if !slot.is_empty() => {}
            _ => *slot = value.into(),
        }
    }
}

/// Per-field conflict policy for one dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPolicies {
    pub periode: Policy,
    pub perusahaan: Policy,
    pub sensor: Policy,
}

/// Forward-only cursor over the trimmed lines of a block.
#[derive(Debug)]
pub struct LineCursor<'a> {
    lines: &'a [String],
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        LineCursor { lines, pos: 0 }
    }

    pub fn at(lines: &'a [String], pos: usize) -> Self {
        LineCursor {
            lines,
            pos: pos.min(lines.len()),
        }
    }

    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).map(String::as_str)
    }

    pub fn advance(&mut self) {
        if self.pos < self.lines.len() {
            self.pos += 1;
        }
    }

    /// Return the current line and move past it.
    pub fn bump(&mut self) -> Option<&'a str> {
        let line = self.peek()?;
        self.pos += 1;
        Some(line)
    }

    /// Consume the current line only if `f` accepts it.
    pub fn bump_if<F>(&mut self, f: F) -> Option<&'a str>
    where
        F: Fn(&str) -> bool,
    {
        match self.peek() {
            Some(line) if f(line) => self.bump(),
            _ => None,
        }
    }

    pub fn skip_while<F>(&mut self, f: F) -> usize
    where
        F: Fn(&str) -> bool,
    {
        let start = self.pos;
        while self.bump_if(&f).is_some() {}
        self.pos - start
    }

    pub fn take_while<F>(&mut self, f: F) -> Vec<&'a str>
    where
        F: Fn(&str) -> bool,
    {
        let mut taken = Vec::new();
        while let Some(line) = self.bump_if(&f) {
            taken.push(line);
        }
        taken
    }

    /// Consume everything left.
    pub fn drain(&mut self) -> &'a [String] {
        let rest = &self.lines[self.pos..];
        self.pos = self.lines.len();
        rest
    }

    pub fn is_done(&self) -> bool {
        self.pos >= self.lines.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

/// Field values collected from one block before they become a `Record`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub nik: String,
    pub nama: String,
    pub tanggal_lahir: String,
    pub akun: String,
    pub perusahaan: String,
    pub periode: String,
    pub sensor: String,
    pub saldo: Vec<String>,
    pub kelurahan: String,
    pub kecamatan: String,
    pub kota: String,
    /// Membership number from coded transcripts. Not part of the exported
    /// columns.
    pub kpj: String,
}

/// Why a block produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Fewer lines than the dialect's minimum block shape.
    TooShort,
    /// No identity marker, or an identity number that came out empty.
    NoIdentity,
}

use std::sync::LazyLock;

use regex::Regex;

static DIRECTIONAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{200E}\x{200F}\x{202A}-\x{202E}]").unwrap());
static SYMBOL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\x{2600}-\x{27BF}]").unwrap());

/// Drop left-to-right / right-to-left marks and embedding controls that chat
/// clients insert around names and numbers.
pub fn strip_directional(text: &str) -> String {
    DIRECTIONAL_RE.replace_all(text, "").into_owned()
}

/// `strip_directional` plus the misc-symbol and dingbat range (☎, ✅, ...).
pub fn strip_directional_and_symbols(text: &str) -> String {
    let text = strip_directional(text);
    SYMBOL_RE.replace_all(&text, "").into_owned()
}

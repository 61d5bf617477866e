pub mod labeled;
pub mod location;
pub mod positional;

pub use labeled::LabeledExtractor;
pub use location::LocationStrategy;
pub use positional::PositionalExtractor;

/// Keep only ASCII digits.
pub(crate) fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub const FEMALE: &str = "Perempuan";
pub const MALE: &str = "Laki-laki";

/// Guess a gender label from a name by fragment lookup. A heuristic only:
/// "Daniel" contains "ani" and lands in the female bucket.
pub fn guess_gender(name: &str, female_fragments: &[String]) -> &'static str {
    let name = name.to_lowercase();
    if female_fragments
        .iter()
        .any(|f| name.contains(f.to_lowercase().as_str()))
    {
        FEMALE
    } else {
        MALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexicon::Lexicon;

    #[test]
    fn fragment_match() {
        let lex = Lexicon::labeled();
        assert_eq!(guess_gender("SRI MULYANI", &lex.female_fragments), FEMALE);
        assert_eq!(guess_gender("Budi Santoso", &lex.female_fragments), MALE);
        assert_eq!(guess_gender("", &lex.female_fragments), MALE);
    }

    #[test]
    fn dialect_lexicons_differ() {
        let name = "Rosa Sinaga";
        assert_eq!(guess_gender(name, &Lexicon::positional().female_fragments), FEMALE);
        assert_eq!(guess_gender(name, &Lexicon::labeled().female_fragments), MALE);
    }
}

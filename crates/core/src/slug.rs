//! URL slug generation for producer and beat pages.

/// Turn a free-text title into a lowercase hyphenated slug.
///
/// Alphanumeric runs are kept, everything else collapses into single
/// hyphens, and leading/trailing hyphens are stripped. Accented Latin
/// vowels common in Spanish titles are transliterated.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for c in input.chars() {
        let mapped = match c {
            'á' | 'à' | 'ä' | 'â' | 'Á' | 'À' | 'Ä' | 'Â' => Some('a'),
            'é' | 'è' | 'ë' | 'ê' | 'É' | 'È' | 'Ë' | 'Ê' => Some('e'),
            'í' | 'ì' | 'ï' | 'î' | 'Í' | 'Ì' | 'Ï' | 'Î' => Some('i'),
            'ó' | 'ò' | 'ö' | 'ô' | 'Ó' | 'Ò' | 'Ö' | 'Ô' => Some('o'),
            'ú' | 'ù' | 'ü' | 'û' | 'Ú' | 'Ù' | 'Ü' | 'Û' => Some('u'),
            'ñ' | 'Ñ' => Some('n'),
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            _ => None,
        };

        match mapped {
            Some(c) => {
                slug.push(c);
                last_was_hyphen = false;
            }
            None if !last_was_hyphen => {
                slug.push('-');
                last_was_hyphen = true;
            }
            None => {}
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Append a numeric suffix for slug collisions: `trap-oscuro` -> `trap-oscuro-2`.
pub fn with_suffix(base: &str, counter: u32) -> String {
    format!("{base}-{counter}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_titles() {
        assert_eq!(slugify("Trap Oscuro"), "trap-oscuro");
        assert_eq!(slugify("  Lo-Fi  Chill  "), "lo-fi-chill");
    }

    #[test]
    fn spanish_accents_transliterate() {
        assert_eq!(slugify("Canción de Otoño"), "cancion-de-otono");
        assert_eq!(slugify("Ritmo Caótico"), "ritmo-caotico");
    }

    #[test]
    fn punctuation_collapses() {
        assert_eq!(slugify("beat!!!#1 (remix)"), "beat-1-remix");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn suffix_appends_counter() {
        assert_eq!(with_suffix("trap-oscuro", 2), "trap-oscuro-2");
    }
}

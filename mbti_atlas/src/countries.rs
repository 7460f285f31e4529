// Resolution of free-form country names to ISO 3166-1 alpha-3 codes.

use log::debug;

/// Names whose ISO short name differs enough from common usage that the
/// registry lookups below would miss or misresolve them.
const OVERRIDES: [(&str, &str); 5] = [
    ("United States", "USA"),
    ("Russia", "RUS"),
    ("South Korea", "KOR"),
    ("United Kingdom", "GBR"),
    ("Czech Republic", "CZE"),
];

/// Minimum Jaro-Winkler score for the fuzzy fallback. High enough that
/// unrelated names ("Nowhereland" vs "Netherlands") stay below it.
const FUZZY_MIN_SCORE: f64 = 0.86;

/// Resolves a country name to its alpha-3 code, trying in order: the
/// override table, an exact case-insensitive registry match, a prefix match
/// against registry names with a qualifier ("Bolivia (Plurinational State
/// of)"), and finally a fuzzy match.
///
/// Total over arbitrary input: unknown names yield `None`, never an error.
pub fn resolve_code(country_name: &str) -> Option<&'static str> {
    if let Some((_, code)) = OVERRIDES.iter().find(|(name, _)| *name == country_name) {
        return Some(code);
    }

    let query = country_name.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    for c in rust_iso3166::ALL.iter() {
        if c.name.to_lowercase() == query {
            return Some(c.alpha3);
        }
    }

    if let Some(code) = prefix_match(&query) {
        return Some(code);
    }

    fuzzy_match(&query)
}

// Matches "bolivia" against "Bolivia (Plurinational State of)" and the
// like. The prefix must end at a word boundary to keep "niger" from
// claiming "Nigeria".
fn prefix_match(query: &str) -> Option<&'static str> {
    rust_iso3166::ALL
        .iter()
        .find(|c| {
            c.name
                .to_lowercase()
                .strip_prefix(query)
                .map_or(false, |rest| rest.starts_with(' ') || rest.starts_with(','))
        })
        .map(|c| c.alpha3)
}

fn fuzzy_match(query: &str) -> Option<&'static str> {
    let mut best: Option<(f64, &'static str)> = None;
    for c in rust_iso3166::ALL.iter() {
        let score = strsim::jaro_winkler(query, &c.name.to_lowercase());
        if score >= FUZZY_MIN_SCORE && best.map_or(true, |(b, _)| score > b) {
            best = Some((score, c.alpha3));
        }
    }
    if let Some((score, code)) = best {
        debug!("fuzzy country match: {:?} -> {} (score {:.3})", query, code, score);
    }
    best.map(|(_, code)| code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_take_precedence() {
        assert_eq!(resolve_code("South Korea"), Some("KOR"));
        assert_eq!(resolve_code("United States"), Some("USA"));
        assert_eq!(resolve_code("United Kingdom"), Some("GBR"));
        assert_eq!(resolve_code("Russia"), Some("RUS"));
        assert_eq!(resolve_code("Czech Republic"), Some("CZE"));
    }

    #[test]
    fn exact_registry_names() {
        assert_eq!(resolve_code("Japan"), Some("JPN"));
        assert_eq!(resolve_code("France"), Some("FRA"));
        assert_eq!(resolve_code("japan"), Some("JPN"));
    }

    #[test]
    fn qualified_registry_names() {
        assert_eq!(resolve_code("Bolivia"), Some("BOL"));
    }

    #[test]
    fn unknown_names_are_none() {
        assert_eq!(resolve_code("Nowhereland"), None);
        assert_eq!(resolve_code(""), None);
        assert_eq!(resolve_code("   "), None);
        assert_eq!(resolve_code("12345"), None);
        assert_eq!(resolve_code("Atlantis Federation of Realms"), None);
    }
}

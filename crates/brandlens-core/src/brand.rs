use std::path::Path;

use serde::{Deserialize, Serialize};

/// A brand as derived from an uploaded filename: display name plus slug id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandIdentity {
    pub id: String,
    pub name: String,
}

/// Convert a human brand name into a safe id for filenames and URLs.
///
/// Lower-cases, collapses runs of whitespace and hyphens to a single
/// underscore, and strips everything outside `[a-z0-9_]`.
#[must_use]
pub fn slugify_brand(brand_name: &str) -> String {
    let mut out = String::with_capacity(brand_name.len());
    let mut pending_separator = false;

    for c in brand_name.trim().to_lowercase().chars() {
        if c.is_whitespace() || c == '-' {
            pending_separator = !out.is_empty();
        } else if c.is_ascii_alphanumeric() || c == '_' {
            if pending_separator {
                out.push('_');
                pending_separator = false;
            }
            out.push(c);
        }
    }

    out
}

/// Title-case a string word by word, splitting on whitespace.
#[must_use]
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Derive a brand identity from an uploaded filename.
///
/// `disney.csv` becomes name "Disney" / id "disney";
/// `netflix_tweets.csv` becomes name "Netflix Tweets" / id "netflix_tweets".
#[must_use]
pub fn brand_from_filename(filename: &str) -> BrandIdentity {
    let stem = Path::new(filename)
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned());

    let spaced: String = stem
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect();
    let name = title_case(&spaced);
    let id = slugify_brand(&name);

    BrandIdentity { id, name }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_replaces_spaces() {
        assert_eq!(slugify_brand("Coca Cola"), "coca_cola");
    }

    #[test]
    fn slugify_collapses_hyphen_runs() {
        assert_eq!(slugify_brand("Ben -- Jerry"), "ben_jerry");
    }

    #[test]
    fn slugify_strips_punctuation() {
        assert_eq!(slugify_brand("McDonald's!"), "mcdonalds");
    }

    #[test]
    fn slugify_strips_non_ascii() {
        assert_eq!(slugify_brand("Nestlé"), "nestl");
    }

    #[test]
    fn title_case_handles_mixed_input() {
        assert_eq!(title_case("netflix tweets"), "Netflix Tweets");
        assert_eq!(title_case("COCA COLA"), "Coca Cola");
    }

    #[test]
    fn brand_from_simple_filename() {
        let brand = brand_from_filename("disney.csv");
        assert_eq!(brand.name, "Disney");
        assert_eq!(brand.id, "disney");
    }

    #[test]
    fn brand_from_filename_with_underscores() {
        let brand = brand_from_filename("netflix_tweets.csv");
        assert_eq!(brand.name, "Netflix Tweets");
        assert_eq!(brand.id, "netflix_tweets");
    }

    #[test]
    fn brand_from_filename_with_spaces() {
        let brand = brand_from_filename("Coca Cola.csv");
        assert_eq!(brand.name, "Coca Cola");
        assert_eq!(brand.id, "coca_cola");
    }
}

/// Extract the country from a free-text "City, Country" location
///
/// The country is the trimmed segment after the first comma, up to the next
/// comma if any. Locations without a comma, or with an empty segment there,
/// have no country.
///
/// # Examples
/// `"Paris, France"` -> `Some("France")`
/// `"Paris"` -> `None`
#[inline]
pub fn country_of(location: &str) -> Option<&str> {
    location
        .split(',')
        .nth(1)
        .map(str::trim)
        .filter(|country| !country.is_empty())
}

/// True when both locations name the same country
#[inline]
pub fn same_country(a: Option<&str>, b: Option<&str>) -> bool {
    match (a.and_then(country_of), b.and_then(country_of)) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_of() {
        assert_eq!(country_of("Paris, France"), Some("France"));
        assert_eq!(country_of("Lyon,France  "), Some("France"));
        assert_eq!(country_of("Springfield, Illinois, USA"), Some("Illinois"));
        assert_eq!(country_of("Paris"), None);
        assert_eq!(country_of("Paris,  "), None);
        assert_eq!(country_of(""), None);
    }

    #[test]
    fn test_same_country() {
        assert!(same_country(Some("Paris, France"), Some("Lyon, France")));
        assert!(!same_country(Some("Paris, France"), Some("Madrid, Espagne")));
    }

    #[test]
    fn test_missing_country_never_matches() {
        assert!(!same_country(None, None));
        assert!(!same_country(Some("Paris"), Some("Lyon")));
        assert!(!same_country(Some("Paris, France"), None));
    }
}

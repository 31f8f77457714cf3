//! Shared CLI utilities.

/// Split a comma-separated `--exclude-glob` value into trimmed, non-empty globs.
pub fn parse_csv(value: &Option<String>) -> Option<Vec<String>> {
    value.as_ref().map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.to_string())
            .collect::<Vec<_>>()
    })
}

#[cfg(test)]
mod tests {
    use super::parse_csv;

    #[test]
    fn parse_csv_trims_and_drops_empty() {
        assert_eq!(
            parse_csv(&Some(" **/dist, ,build ".to_string())),
            Some(vec!["**/dist".to_string(), "build".to_string()])
        );
        assert_eq!(parse_csv(&None), None);
    }
}

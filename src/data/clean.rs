use super::model::Rating;

/// Parse a currency-formatted salary such as `"$52,000"`.
///
/// Every `$` and `,` is removed before parsing. Anything that still fails to
/// parse (or parses to NaN) is treated as missing rather than an error.
pub fn parse_salary(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != '$' && *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Map a rating label to its numeric score, `None` for unknown labels.
pub fn rating_score(label: &str) -> Option<u8> {
    Rating::from_label(label).map(Rating::score)
}

/// Strip surrounding whitespace from a header name.
pub fn normalize_header(name: &str) -> String {
    name.trim().to_string()
}

/// Cell spellings that mean "no value", matched exactly.  Same set pandas
/// treats as NaN when reading CSV.
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_na(cell: &str) -> bool {
    NA_TOKENS.contains(&cell)
}

/// Empty and NA cells become `None`; everything else is kept verbatim.
pub fn non_empty(cell: &str) -> Option<String> {
    if is_na(cell) {
        None
    } else {
        Some(cell.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_currency_formatted_salaries() {
        assert_eq!(parse_salary("$52,000"), Some(52000.0));
        assert_eq!(parse_salary("$1,234,567.89"), Some(1234567.89));
        assert_eq!(parse_salary("48000"), Some(48000.0));
        assert_eq!(parse_salary(" $61,500 "), Some(61500.0));
    }

    #[test]
    fn malformed_salaries_are_missing() {
        assert_eq!(parse_salary(""), None);
        assert_eq!(parse_salary("$"), None);
        assert_eq!(parse_salary("n/a"), None);
        assert_eq!(parse_salary("$52k"), None);
        assert_eq!(parse_salary("NaN"), None);
    }

    #[test]
    fn rating_map_covers_the_six_labels() {
        assert_eq!(rating_score("Very Good"), Some(5));
        assert_eq!(rating_score("Good"), Some(4));
        assert_eq!(rating_score("Average"), Some(3));
        assert_eq!(rating_score("Fair"), Some(2));
        assert_eq!(rating_score("Poor"), Some(1));
        assert_eq!(rating_score("Not Rated"), Some(0));
        assert_eq!(rating_score("Outstanding"), None);
        assert_eq!(rating_score(""), None);
    }

    #[test]
    fn na_tokens_are_missing() {
        for token in ["", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "<NA>", "#N/A"] {
            assert_eq!(non_empty(token), None, "{token:?}");
        }
        assert_eq!(non_empty("Male"), Some("Male".to_string()));
        // Matching is exact, like the CSV reader it mirrors.
        assert_eq!(non_empty(" NA"), Some(" NA".to_string()));
        assert_eq!(non_empty("Not Rated"), Some("Not Rated".to_string()));
    }

    #[test]
    fn headers_are_trimmed() {
        assert_eq!(normalize_header("  Salary "), "Salary");
        assert_eq!(normalize_header("Name"), "Name");
    }
}

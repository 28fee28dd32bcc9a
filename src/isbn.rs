// BookVault - Personal Book Catalog
// Copyright (C) 2025 BookVault contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! ISBN shape validation and extraction for scanned barcode text
//!
//! The scanner collaborator hands over whatever string it decoded; these
//! helpers decide whether it is usable as an ISBN and dig one out of
//! surrounding text when it is embedded. Both are pure, single-pass text
//! functions.
//!
//! This is a format-shape check only — no checksum digit validation.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Optional "ISBN-13"-style prefix followed by the ISBN itself. The
    /// 13-digit alternative is tried first so an EAN-13 payload is captured
    /// whole rather than truncated to its first ten characters.
    static ref ISBN_PATTERN: Regex =
        Regex::new(r"(?:ISBN[-\s]*(?:10|13)?[-\s]*)?([0-9]{13}|[0-9X]{10})")
            .expect("ISBN pattern is valid");
}

/// Decide whether scanned text is usable as an ISBN
///
/// Hyphens and spaces are stripped first. Accepts exactly 13 digits, or
/// exactly 10 characters where the first 9 are digits and the last is a
/// digit or `X` (either case — barcode scanners emit uppercase, keyboards
/// do not always).
pub fn is_valid_isbn(text: &str) -> bool {
    let clean: String = text.chars().filter(|c| *c != '-' && *c != ' ').collect();

    if clean.len() == 13 {
        return clean.chars().all(|c| c.is_ascii_digit());
    }

    if clean.len() == 10 {
        let mut chars = clean.chars();
        let first_nine_digits = chars.by_ref().take(9).all(|c| c.is_ascii_digit());
        let last = clean.chars().last();
        return first_nine_digits
            && matches!(last, Some(c) if c.is_ascii_digit() || c.eq_ignore_ascii_case(&'X'));
    }

    false
}

/// Extract the first ISBN embedded in scanned text
///
/// Tolerates an optional `ISBN`, `ISBN-10`, or `ISBN-13` prefix. Returns
/// the captured ISBN portion, or the empty string when nothing matches.
pub fn extract_isbn(text: &str) -> String {
    ISBN_PATTERN
        .captures(text.trim())
        .and_then(|captures| captures.get(1))
        .map(|isbn| isbn.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirteen_digit_isbn_is_valid() {
        assert!(is_valid_isbn("9780439708180"));
        assert!(is_valid_isbn("978-0-439-70818-0"));
        assert!(is_valid_isbn("978 0 439 70818 0"));
    }

    #[test]
    fn ten_character_isbn_is_valid_with_trailing_digit_or_x() {
        assert!(is_valid_isbn("0804429570"));
        assert!(is_valid_isbn("080442957X"));
        assert!(is_valid_isbn("080442957x"));
        assert!(is_valid_isbn("0-8044-2957-X"));
    }

    #[test]
    fn wrong_shapes_are_invalid() {
        assert!(!is_valid_isbn("12345"));
        assert!(!is_valid_isbn(""));
        assert!(!is_valid_isbn("97804397081801")); // 14 digits
        assert!(!is_valid_isbn("978043970818a")); // letter in a 13-digit code
        assert!(!is_valid_isbn("X804429570")); // X only allowed last
        assert!(!is_valid_isbn("hello world"));
    }

    #[test]
    fn extraction_finds_bare_and_prefixed_isbns() {
        assert_eq!(extract_isbn("9780439708180"), "9780439708180");
        assert_eq!(extract_isbn("ISBN 9780439708180"), "9780439708180");
        assert_eq!(extract_isbn("ISBN-13 9780439708180"), "9780439708180");
        assert_eq!(extract_isbn("ISBN-10 080442957X"), "080442957X");
        assert_eq!(
            extract_isbn("see 9780439708180 for details"),
            "9780439708180"
        );
    }

    #[test]
    fn extraction_prefers_the_full_thirteen_digits() {
        // Must not truncate an EAN-13 payload to its first ten digits
        assert_eq!(extract_isbn("code:9780439708180;end"), "9780439708180");
    }

    #[test]
    fn extraction_returns_empty_when_nothing_matches() {
        assert_eq!(extract_isbn("no isbn here"), "");
        assert_eq!(extract_isbn(""), "");
        assert_eq!(extract_isbn("123-456"), "");
    }
}

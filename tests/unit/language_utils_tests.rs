/*!
 * Tests for language code utilities
 */

use vocasub::language_utils::{get_language_name, language_codes_match, normalize_to_part1};

#[test]
fn test_normalize_to_part1_withTwoLetterCode_shouldPassThrough() {
    assert_eq!(normalize_to_part1("en").unwrap(), "en");
    assert_eq!(normalize_to_part1("FR").unwrap(), "fr");
}

#[test]
fn test_normalize_to_part1_withThreeLetterCode_shouldConvert() {
    assert_eq!(normalize_to_part1("eng").unwrap(), "en");
    assert_eq!(normalize_to_part1("deu").unwrap(), "de");
}

#[test]
fn test_normalize_to_part1_withInvalidCode_shouldFail() {
    assert!(normalize_to_part1("xx").is_err());
    assert!(normalize_to_part1("english").is_err());
    assert!(normalize_to_part1("").is_err());
}

#[test]
fn test_language_codes_match_withEquivalentCodes_shouldMatch() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("de", "deu"));
    assert!(language_codes_match("es", "es"));
}

#[test]
fn test_language_codes_match_withDifferentLanguages_shouldNotMatch() {
    assert!(!language_codes_match("en", "fr"));
    assert!(!language_codes_match("en", "bogus"));
}

#[test]
fn test_get_language_name_withValidCode_shouldReturnEnglishName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("fra").unwrap(), "French");
}

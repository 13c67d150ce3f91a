/*!
 * Tests for language display names
 */

use translate_all::language_utils::{get_language_name, primary_subtag, resolve_display_name};

#[test]
fn test_primary_subtag_should_strip_region_and_script() {
    assert_eq!(primary_subtag("zh-CN"), "zh");
    assert_eq!(primary_subtag("mni-Mtei"), "mni");
    assert_eq!(primary_subtag("pt_BR"), "pt");
    assert_eq!(primary_subtag("fr"), "fr");
}

#[test]
fn test_get_language_name_with_known_codes_should_return_english_names() {
    assert_eq!(get_language_name("fr").unwrap(), "French");
    assert_eq!(get_language_name("de").unwrap(), "German");
    assert_eq!(get_language_name("deu").unwrap(), "German");
}

#[test]
fn test_get_language_name_with_unknown_code_should_fail() {
    assert!(get_language_name("xx").is_err());
    assert!(get_language_name("").is_err());
}

#[test]
fn test_resolve_display_name_should_prefer_service_name() {
    assert_eq!(resolve_display_name("fr", Some("Français")).as_deref(), Some("Français"));
    assert_eq!(resolve_display_name("fr", None).as_deref(), Some("French"));
    assert_eq!(resolve_display_name("fr", Some("  ")).as_deref(), Some("French"));
    assert_eq!(resolve_display_name("xx", None), None);
}

/*!
 * Tests for error types and conversions
 */

use translate_all::errors::{AppError, ProviderError, TranslationError};

#[test]
fn test_provider_error_api_error_should_display_status_and_message() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = error.to_string();
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_translation_error_from_provider_should_keep_message_verbatim() {
    let provider = ProviderError::ConnectionError("Host unreachable".to_string());
    let expected = provider.to_string();
    let error: TranslationError = provider.into();
    assert_eq!(error.to_string(), expected);
}

#[test]
fn test_app_error_fatal_variants_should_name_the_failed_step() {
    let listing = AppError::LanguageListing(ProviderError::RequestFailed("boom".to_string()));
    assert!(listing.to_string().contains("list supported languages"));
    assert!(listing.to_string().contains("boom"));

    let detection = AppError::SourceDetection(ProviderError::ParseError("empty".to_string()));
    assert!(detection.to_string().contains("detect source language"));

    let input = AppError::InputLoad("missing.txt".to_string());
    assert!(input.to_string().contains("missing.txt"));
}

#[test]
fn test_app_error_config_should_prefix_message() {
    let error = AppError::Config("MIME type must not be empty".to_string());
    assert_eq!(error.to_string(), "Configuration error: MIME type must not be empty");
}

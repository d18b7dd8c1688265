/*!
 * Tests for application configuration
 */

use vaani::app_config::{Config, LogLevel};

/// Helper to build a config with usable credentials
fn config_with_credentials() -> Config {
    let mut config = Config::default();
    config.credentials.user_id = "user-1".to_string();
    config.credentials.api_key = "key-1".to_string();
    config.credentials.auth_token = "token-1".to_string();
    config
}

#[test]
fn test_default_config_withNoOverrides_shouldCarryProtocolConstants() {
    let config = Config::default();
    assert_eq!(
        config.bhashini.translate_endpoint,
        "https://bhashini.gov.in/ulca/apis/v1/translate"
    );
    assert_eq!(
        config.bhashini.tts_endpoint,
        "https://bhashini.gov.in/ulca/apis/v1/synthesize"
    );
    assert_eq!(
        config.bhashini.discovery_endpoint,
        "https://meity-auth.ulcacontrib.org/ulca/apis/v0/model/getModelsPipeline"
    );
    assert_eq!(config.bhashini.asr_pipeline_id, "64392f96daac500b55c543cd");
    assert_eq!(config.bhashini.pivot_language, "English");
    assert_eq!(config.bhashini.voice_name, "Female1");
}

#[test]
fn test_default_config_withNoOverrides_shouldUsePerStageTimeoutBudgets() {
    let config = Config::default();
    assert_eq!(config.bhashini.discovery_timeout_secs, 20);
    assert_eq!(config.bhashini.translate_timeout_secs, 30);
    assert_eq!(config.bhashini.tts_timeout_secs, 60);
    assert_eq!(config.bhashini.asr_timeout_secs, 120);
}

#[test]
fn test_default_config_withNoOverrides_shouldBindAllInterfaces() {
    let config = Config::default();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_config_withEmptyJson_shouldUseDefaults() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.bhashini.pivot_language, "English");
    assert_eq!(config.server.port, 8000);
    assert!(config.credentials.user_id.is_empty());
}

#[test]
fn test_config_withPartialJson_shouldKeepOtherDefaults() {
    let config: Config =
        serde_json::from_str(r#"{"server": {"port": 9000}, "bhashini": {"voice_name": "Male1"}}"#)
            .unwrap();
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.bhashini.voice_name, "Male1");
    assert_eq!(config.bhashini.pivot_language, "English");
}

#[test]
fn test_validate_withMissingCredentials_shouldFail() {
    let config = Config::default();
    let result = config.validate();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("ULCA_USER_ID"));
}

#[test]
fn test_validate_withCompleteCredentials_shouldPass() {
    let config = config_with_credentials();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withOneEmptyCredential_shouldFail() {
    let mut config = config_with_credentials();
    config.credentials.auth_token = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withInvalidEndpoint_shouldFail() {
    let mut config = config_with_credentials();
    config.bhashini.translate_endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withEmptyPipelineId_shouldFail() {
    let mut config = config_with_credentials();
    config.bhashini.asr_pipeline_id = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_credentials_overlay_withEnvironment_shouldFillOnlyEmptyFields() {
    // SAFETY: no other test in this binary reads these variables
    unsafe {
        std::env::set_var("ULCA_USER_ID", "env-user");
        std::env::set_var("ULCA_API_KEY", "env-key");
        std::env::set_var("BHASHINI_AUTH", "env-token");
    }

    let mut config = Config::default();
    config.credentials.user_id = "file-user".to_string();
    config.credentials.overlay_env();

    // Value from the config file wins; empty fields come from the environment
    assert_eq!(config.credentials.user_id, "file-user");
    assert_eq!(config.credentials.api_key, "env-key");
    assert_eq!(config.credentials.auth_token, "env-token");
}

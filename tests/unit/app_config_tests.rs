/*!
 * Tests for application configuration functionality
 */

use panel_translate::app_config::{Backend, Config, LogLevel, ProviderConfig, ProviderType};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "Japanese");
    assert_eq!(config.target_language, "English");
    assert_eq!(config.translation.backend, Backend::GoogleTranslate);
    assert!(!config.translation.img_as_llm_input);
    assert!(config.translation.extra_context.is_empty());
    assert_eq!(config.log_level, LogLevel::Info);

    let google = config.translation.get_provider_config(ProviderType::Google)
        .expect("Google provider config should exist");
    assert_eq!(google.timeout_secs(), 30);
    assert_eq!(google.endpoint, "https://translate.googleapis.com");
}

#[test]
fn test_config_validation_withDefaults_shouldPass() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_config_validation_withUnknownLanguage_shouldFail() {
    let mut config = Config::default();
    config.source_language = "Not a language".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_withLlmBackendWithoutKey_shouldFail() {
    let mut config = Config::default();
    config.translation.backend = Backend::Gpt4o;
    assert!(config.validate().is_err());

    config.translation.available_providers.push(
        ProviderConfig::new(ProviderType::OpenAI).with_api_key("sk-test"),
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation_withAzureWithoutRegion_shouldFail() {
    let mut config = Config::default();
    config.translation.backend = Backend::AzureTranslator;
    config.translation.available_providers.push(
        ProviderConfig::new(ProviderType::Azure).with_api_key("key"),
    );
    assert!(config.validate().is_err());

    config.translation.available_providers.pop();
    config.translation.available_providers.push(
        ProviderConfig::new(ProviderType::Azure).with_api_key("key").with_region("westeurope"),
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_file_withDocumentedExample_shouldLoadEveryField() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "conf.json", r#"{
        "source_language": "Korean",
        "target_language": "English",
        "translation": {
            "backend": "GPT-4o",
            "img_as_llm_input": true,
            "extra_context": "A slice of life comic.",
            "available_providers": [
                { "type": "openai", "api_key": "sk-test", "endpoint": "https://api.openai.com/v1", "timeout_secs": 60 },
                { "type": "azure", "api_key": "az", "region": "westeurope" }
            ]
        },
        "log_level": "debug"
    }"#).unwrap();

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.source_language, "Korean");
    assert_eq!(config.translation.backend, Backend::Gpt4o);
    assert!(config.translation.img_as_llm_input);
    assert_eq!(config.translation.extra_context, "A slice of life comic.");
    assert_eq!(config.translation.get_api_key(ProviderType::OpenAI), "sk-test");
    assert_eq!(config.translation.get_timeout_secs(ProviderType::OpenAI), 60);
    assert_eq!(config.translation.get_region(ProviderType::Azure).as_deref(), Some("westeurope"));
    // Missing fields fall back to defaults
    assert_eq!(config.translation.get_timeout_secs(ProviderType::Azure), 30);
    assert_eq!(
        config.translation.get_endpoint(ProviderType::Azure),
        "https://api.cognitive.microsofttranslator.com/"
    );
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.validate().is_ok());
}

#[test]
fn test_save_thenLoad_shouldPreserveBackendAndProviders() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.translation.backend = Backend::Claude35Sonnet;
    config.translation.available_providers.push(
        ProviderConfig::new(ProviderType::Anthropic).with_api_key("ak"),
    );
    config.save(&path).unwrap();

    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.contains("\"Claude-3.5-Sonnet\""));
    assert!(saved.contains("\"anthropic\""));

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.translation.backend, Backend::Claude35Sonnet);
    assert_eq!(loaded.translation.get_api_key(ProviderType::Anthropic), "ak");
    assert_eq!(loaded.translation.get_timeout_secs(ProviderType::Anthropic), 120);
}

#[test]
fn test_from_file_withUnknownBackend_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "conf.json", r#"{
        "source_language": "Japanese",
        "target_language": "English",
        "translation": { "backend": "Babelfish" }
    }"#).unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_from_file_withMissingFile_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    assert!(Config::from_file(dir.path().join("absent.json")).is_err());
}

#[test]
fn test_provider_type_parsing_shouldBeCaseInsensitive() {
    assert_eq!("DeepL".parse::<ProviderType>().unwrap(), ProviderType::DeepL);
    assert_eq!("GEMINI".parse::<ProviderType>().unwrap(), ProviderType::Gemini);
    assert!("ollama".parse::<ProviderType>().is_err());
    assert_eq!(ProviderType::OpenAI.to_string(), "openai");
}

#[test]
fn test_from_file_withLlmProviderWithoutTimeout_shouldUseLlmDefault() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "conf.json", r#"{
        "source_language": "Korean",
        "target_language": "English",
        "translation": {
            "backend": "GPT-4o",
            "available_providers": [
                { "type": "openai", "api_key": "k" },
                { "type": "gemini", "api_key": "g", "timeout_secs": 45 },
                { "type": "yandex", "api_key": "y" }
            ]
        }
    }"#).unwrap();

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.translation.get_timeout_secs(ProviderType::OpenAI), 120);
    assert_eq!(
        config.translation.get_timeout_secs(ProviderType::OpenAI),
        ProviderConfig::new(ProviderType::OpenAI).timeout_secs()
    );
    assert_eq!(config.translation.get_timeout_secs(ProviderType::Gemini), 45);
    assert_eq!(config.translation.get_timeout_secs(ProviderType::Yandex), 30);
    // Providers absent from the file fall back the same way
    assert_eq!(config.translation.get_timeout_secs(ProviderType::Anthropic), 120);
}

#[test]
fn test_save_withDefaultTimeout_shouldOmitField() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.translation.available_providers.push(
        ProviderConfig::new(ProviderType::DeepL).with_api_key("d").with_timeout_secs(10),
    );
    config.save(&path).unwrap();

    let saved = std::fs::read_to_string(&path).unwrap();
    assert_eq!(saved.matches("timeout_secs").count(), 1);

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.translation.get_timeout_secs(ProviderType::Google), 30);
    assert_eq!(loaded.translation.get_timeout_secs(ProviderType::DeepL), 10);
    let google = loaded.translation.get_provider_config(ProviderType::Google).unwrap();
    assert_eq!(google.timeout_secs, None);
}

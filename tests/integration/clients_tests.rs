/*!
 * Client wiring from configuration and backend wire shapes
 */

use panel_translate::app_config::{Backend, ProviderConfig, ProviderType, TranslationConfig};
use panel_translate::providers::deepl::{deepl_source_code, deepl_target_code, DeepL, DeepLRequest};
use panel_translate::providers::google::{GoogleRequest, GoogleTranslate};
use panel_translate::providers::TranslatorClients;

#[test]
fn test_from_config_withDefaults_shouldOnlyProvideGoogle() {
    let clients = TranslatorClients::from_config(&TranslationConfig::default());

    assert!(clients.machine_translator(Backend::GoogleTranslate).is_some());
    assert!(clients.machine_translator(Backend::DeepL).is_none());
    assert!(clients.chat_translator(Backend::Gpt4o).is_none());
}

#[test]
fn test_from_config_withProviders_shouldFillMatchingSlots() {
    let mut config = TranslationConfig::default();
    config.available_providers.extend([
        ProviderConfig::new(ProviderType::DeepL).with_api_key("abc:fx"),
        ProviderConfig::new(ProviderType::Azure).with_api_key("az").with_region("eastus"),
        ProviderConfig::new(ProviderType::Anthropic).with_api_key("ak"),
        ProviderConfig::new(ProviderType::Gemini).with_api_key("gk"),
    ]);

    let clients = TranslatorClients::from_config(&config);

    assert!(clients.machine_translator(Backend::DeepL).is_some());
    assert!(clients.machine_translator(Backend::AzureTranslator).is_some());
    assert!(clients.machine_translator(Backend::Yandex).is_none());
    assert!(clients.chat_translator(Backend::Claude3Opus).is_some());
    assert!(clients.chat_translator(Backend::Gemini15Flash).is_some());
    assert!(clients.chat_translator(Backend::Gpt35).is_none());
}

#[test]
fn test_slots_shouldNotCrossCapabilities() {
    let clients = TranslatorClients::from_config(&TranslationConfig::default());
    assert!(clients.chat_translator(Backend::GoogleTranslate).is_none());
    assert!(clients.machine_translator(Backend::Gemini15Pro).is_none());
}

#[test]
fn test_deepl_languageMapping_shouldMatchServiceCodes() {
    assert_eq!(deepl_target_code("Chinese (Simplified)", "zh-CN"), "zh");
    assert_eq!(deepl_target_code("English", "en"), "EN-US");
    assert_eq!(deepl_target_code("German", "de"), "de");
    assert_eq!(deepl_source_code("ko"), "KO");
    assert_eq!(deepl_source_code("zh-TW"), "ZH");
}

#[test]
fn test_deepl_targetCode_withLowercaseLabel_shouldMatchResolvedLanguage() {
    use panel_translate::get_language_code;

    for label in ["english", " English", "chinese (simplified)"] {
        let code = get_language_code(label).unwrap();
        let expected = if label.contains("chinese") { "zh" } else { "EN-US" };
        assert_eq!(deepl_target_code(label, &code), expected, "label {:?}", label);
    }
}

#[test]
fn test_deepl_withProKey_shouldTargetProApi() {
    let client = DeepL::new("pro-key", "");
    let request = client.build_request(&DeepLRequest {
        text: "Guten Tag".to_string(),
        source_lang: "DE".to_string(),
        target_lang: "EN-US".to_string(),
    }).unwrap();

    assert_eq!(request.url().as_str(), "https://api.deepl.com/v2/translate");
}

#[test]
fn test_google_request_shouldUseKeylessEndpointWithAutoSource() {
    let client = GoogleTranslate::new("https://translate.googleapis.com");
    let request = client.build_request(&GoogleRequest::new("こんにちは世界", "en")).unwrap();
    let url = request.url();

    assert_eq!(url.path(), "/translate_a/single");
    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(query.contains(&("client".to_string(), "gtx".to_string())));
    assert!(query.contains(&("sl".to_string(), "auto".to_string())));
    assert!(query.contains(&("tl".to_string(), "en".to_string())));
    assert!(query.contains(&("q".to_string(), "こんにちは世界".to_string())));
}

#[test]
fn test_google_withBlankText_shouldReturnNoneWithoutRequest() {
    use panel_translate::providers::{MachineTranslator, TextRequest};

    let client = GoogleTranslate::new("http://127.0.0.1:9");
    let result = tokio_test::block_on(async {
        client.translate(TextRequest {
            text: " \u{3000} ",
            source_code: "ja",
            target_code: "en",
            target_language: "English",
        }).await
    });

    assert!(matches!(result, Ok(None)));
}

//! Backend assembly from configuration

use super::{anthropic::AnthropicBackend, gemini::GeminiBackend, openai::OpenAiCompatibleBackend};
use crate::config::FileProvidersConfig;
use boardroom_application::{BackendDispatcher, GatewayError, LlmBackend};
use boardroom_domain::ProviderKind;
use std::sync::Arc;
use tracing::{info, warn};

/// Builds one backend per provider that has an API key
pub struct BackendFactory;

impl BackendFactory {
    /// Register every configured backend on a fresh dispatcher.
    ///
    /// Providers without a key (or whose client fails to build) are left
    /// out; personas bound to them answer with a "not configured" notice.
    pub fn build_dispatcher(config: &FileProvidersConfig) -> BackendDispatcher {
        Self::build_backends(config)
            .into_iter()
            .fold(BackendDispatcher::new(), |dispatcher, backend| {
                dispatcher.with_backend(backend)
            })
    }

    pub fn build_backends(config: &FileProvidersConfig) -> Vec<Arc<dyn LlmBackend>> {
        ProviderKind::ALL
            .iter()
            .filter_map(|&kind| match Self::build(kind, config) {
                Ok(Some(backend)) => {
                    info!(provider = %kind, "Backend initialized");
                    Some(backend)
                }
                Ok(None) => {
                    warn!(provider = %kind, "No API key configured, backend disabled");
                    None
                }
                Err(e) => {
                    warn!(provider = %kind, error = %e, "Backend not available");
                    None
                }
            })
            .collect()
    }

    fn build(
        kind: ProviderKind,
        config: &FileProvidersConfig,
    ) -> Result<Option<Arc<dyn LlmBackend>>, GatewayError> {
        let backend: Arc<dyn LlmBackend> = match kind {
            ProviderKind::OpenAi => {
                let Some(key) = config.openai.resolve_api_key() else {
                    return Ok(None);
                };
                Arc::new(OpenAiCompatibleBackend::openai(&config.openai, key)?)
            }
            ProviderKind::Xai => {
                let Some(key) = config.xai.resolve_api_key() else {
                    return Ok(None);
                };
                Arc::new(OpenAiCompatibleBackend::xai(&config.xai, key)?)
            }
            ProviderKind::Anthropic => {
                let Some(key) = config.anthropic.resolve_api_key() else {
                    return Ok(None);
                };
                Arc::new(AnthropicBackend::new(&config.anthropic, key)?)
            }
            ProviderKind::Gemini => {
                let Some(key) = config.gemini.resolve_api_key() else {
                    return Ok(None);
                };
                Arc::new(GeminiBackend::new(&config.gemini, key)?)
            }
        };
        Ok(Some(backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unset_env(config: &mut FileProvidersConfig) {
        config.openai.api_key_env = "BOARDROOM_TEST_UNSET_OPENAI".to_string();
        config.anthropic.api_key_env = "BOARDROOM_TEST_UNSET_ANTHROPIC".to_string();
        config.xai.api_key_env = "BOARDROOM_TEST_UNSET_XAI".to_string();
        config.gemini.api_key_env = "BOARDROOM_TEST_UNSET_GEMINI".to_string();
    }

    #[test]
    fn test_only_keyed_providers_are_registered() {
        let mut config = FileProvidersConfig::default();
        unset_env(&mut config);
        config.anthropic.api_key = Some("sk-ant".to_string());
        config.gemini.api_key = Some("g-key".to_string());

        let kinds: Vec<_> = BackendFactory::build_backends(&config)
            .iter()
            .map(|b| b.kind())
            .collect();
        assert_eq!(kinds, vec![ProviderKind::Anthropic, ProviderKind::Gemini]);

        let dispatcher = BackendFactory::build_dispatcher(&config);
        assert!(dispatcher.has_backend(ProviderKind::Anthropic));
        assert!(!dispatcher.has_backend(ProviderKind::OpenAi));
    }

    #[test]
    fn test_no_keys_yields_empty_dispatcher() {
        let mut config = FileProvidersConfig::default();
        unset_env(&mut config);

        let dispatcher = BackendFactory::build_dispatcher(&config);
        for kind in ProviderKind::ALL {
            assert!(!dispatcher.has_backend(kind));
        }
    }
}

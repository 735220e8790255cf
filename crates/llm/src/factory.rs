//! Completion provider factory.
//!
//! This module creates chat clients from application configuration. It
//! handles provider resolution and secret injection.

use crate::client::ChatClient;
use crate::providers::OpenAiCompatClient;
use std::sync::Arc;

/// Create a chat client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("openai")
/// * `model` - Model identifier sent with every request
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - API key (for providers that require it)
///
/// # Errors
/// Returns error if the provider is unknown or a required secret is
/// missing.
pub fn create_client(
    provider: &str,
    model: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> Result<Arc<dyn ChatClient>, String> {
    match provider.to_lowercase().as_str() {
        "openai" => {
            let api_key = api_key.ok_or_else(|| {
                "OpenAI provider requires an API key".to_string()
            })?;

            let client = match endpoint {
                Some(base_url) => OpenAiCompatClient::with_base_url(base_url, model, api_key),
                None => OpenAiCompatClient::new(model, api_key),
            };

            Ok(Arc::new(client))
        }
        _ => Err(format!("Unknown provider: {}", provider)),
    }
}

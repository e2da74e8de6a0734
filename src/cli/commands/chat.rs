use anyhow::Result;

use crate::chat::{ChatSession, SessionConfig};
use crate::config::{ConfigManager, Purpose, ResolveOptions, resolve_config};
use crate::keystore::KeyStore;

pub struct ChatOptions {
    pub provider: Option<String>,
    pub model: Option<String>,
}

pub async fn run_chat(options: ChatOptions) -> Result<()> {
    let config = load_session_config(options)?;
    let mut session = ChatSession::new(config);
    session.run().await
}

fn load_session_config(options: ChatOptions) -> Result<SessionConfig> {
    let manager = ConfigManager::new()?;
    let config_file = manager.load_or_default()?;
    let key_store = KeyStore::open_default()?;

    let resolve_options = ResolveOptions {
        purpose: Purpose::Chat,
        provider: options.provider,
        model: options.model,
        ..ResolveOptions::default()
    };
    let resolved = resolve_config(&resolve_options, &config_file, key_store.first())?;

    Ok(SessionConfig {
        provider_name: resolved.provider_name,
        endpoint: resolved.endpoint,
        model: resolved.model,
        api_key: resolved.api_key,
    })
}

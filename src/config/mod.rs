//! Configuration file management and provider settings.

mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_CHAT_MODEL, DEFAULT_OPENAI_ENDPOINT, DEFAULT_PROVIDER,
    DEFAULT_TRANSLATION_MODEL, ProviderConfig, Purpose, ResolveOptions, ResolvedConfig,
    SlidetlConfig, resolve_config,
};

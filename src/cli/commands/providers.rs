//! Provider listing command handler.

use anyhow::Result;

use crate::config::{ConfigManager, DEFAULT_PROVIDER, ProviderConfig};
use crate::ui::Style;

/// Prints providers to stdout.
///
/// If `specific_provider` is provided, shows detailed information for that provider.
/// Otherwise, lists every configured provider plus the built-in `openai` entry.
pub fn print_providers(specific_provider: Option<&str>) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default()?;

    let default_provider = config
        .slidetl
        .provider
        .as_deref()
        .unwrap_or(DEFAULT_PROVIDER);

    if let Some(provider_name) = specific_provider {
        let Some(provider) = config.provider(provider_name) else {
            anyhow::bail!("Provider '{provider_name}' not found");
        };
        print_provider_details(provider_name, &provider, default_provider == provider_name);
        return Ok(());
    }

    let mut providers: Vec<(String, ProviderConfig)> = config
        .providers
        .iter()
        .map(|(name, provider)| (name.clone(), provider.clone()))
        .collect();
    if !config.providers.contains_key(DEFAULT_PROVIDER) {
        providers.push((DEFAULT_PROVIDER.to_string(), ProviderConfig::openai()));
    }
    providers.sort_by(|a, b| a.0.cmp(&b.0));

    println!("{}\n", Style::header("Providers"));
    for (name, provider) in &providers {
        let is_default = default_provider == name;
        println!(
            "  {}{}",
            Style::value(name),
            Style::secondary(if is_default { " (default)" } else { "" })
        );
        println!("    endpoint: {}", Style::secondary(&provider.endpoint));
        if !provider.models.is_empty() {
            println!("    models: {}", provider.models.join(", "));
        }
    }

    Ok(())
}

fn print_provider_details(name: &str, provider: &ProviderConfig, is_default: bool) {
    println!(
        "{} {}{}",
        Style::label("Provider:"),
        Style::value(name),
        if is_default { " (default)" } else { "" }
    );
    println!("  endpoint = {}", provider.endpoint);
    if provider.requires_api_key() {
        let has_key = provider.get_api_key().is_some();
        println!(
            "  api_key  = {}",
            if has_key { "(set)" } else { "(not set)" }
        );
    }
    if provider.models.is_empty() {
        println!("  models   = (none configured)");
    } else {
        println!("  models:");
        for model in &provider.models {
            println!("    - {model}");
        }
    }
}

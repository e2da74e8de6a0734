use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

use crate::api::CompletionClient;
use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::deck::PPTX_EXTENSION;
use crate::fs::atomic_write;
use crate::input::InputReader;
use crate::keystore::KeyStore;
use crate::pipeline::{DeckTranslation, RunSummary};
use crate::translation::LlmTranslator;
use crate::ui::{RunProgress, Style};

pub struct TranslateOptions {
    pub file: PathBuf,
    pub to: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub output: Option<PathBuf>,
    pub font_size: Option<u32>,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let original = InputReader::read_presentation(&options.file)?;

    let manager = ConfigManager::new()?;
    let config_file = manager.load_or_default()?;
    let key_store = KeyStore::open_default()?;

    let resolve_options = ResolveOptions {
        to: options.to,
        provider: options.provider,
        model: options.model,
        font_size: options.font_size,
        ..ResolveOptions::default()
    };
    let config = resolve_config(&resolve_options, &config_file, key_store.first())?;

    let output_path = options
        .output
        .unwrap_or_else(|| translated_file_name(&options.file, &config.target_code));
    if output_path == options.file {
        bail!(
            "Output path is the same as the input file: {}",
            output_path.display()
        );
    }

    crate::status!(
        "{} {} → {} ({}/{})",
        Style::header("Translating"),
        options.file.display(),
        Style::value(&config.target_language),
        config.provider_name,
        config.model
    );

    let client = CompletionClient::new(config.endpoint.clone(), config.api_key.clone());
    let translator = LlmTranslator::new(client, config.model.clone());
    let mut run = DeckTranslation::new(&translator, config.target_language.clone())
        .with_font_size(config.font_size);

    let mut progress = RunProgress::new();
    let output = run
        .run(&original, &mut progress)
        .await
        .with_context(|| format!("Failed to translate {}", options.file.display()))?;
    drop(progress);

    atomic_write(&output_path, &output.bytes)?;

    print_summary(&output.summary, &output_path);
    Ok(())
}

/// `<stem>_<code>.pptx` next to the input file.
pub fn translated_file_name(input: &Path, target_code: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "presentation".into(), |s| s.to_string_lossy());
    input.with_file_name(format!("{stem}_{target_code}.{PPTX_EXTENSION}"))
}

fn print_summary(summary: &RunSummary, output_path: &Path) {
    crate::status!(
        "{} Wrote {}",
        Style::success("✓"),
        Style::value(output_path.display())
    );
    crate::status!(
        "  {} slides, {} text shapes: {} translated, {} empty, {} kept original",
        summary.slides,
        summary.fragments,
        summary.translated,
        summary.skipped,
        summary.passed_through
    );
    if summary.passed_through > 0 {
        crate::warn!(
            "{} {} text shape(s) could not be translated and keep their original text",
            Style::warning("Warning:"),
            summary.passed_through
        );
    }
}

mod language;
mod prompt;
mod translator;

pub use language::{
    DEFAULT_LANGUAGE_CODE, SUPPORTED_LANGUAGES, language_name, print_languages, validate_language,
};
pub use translator::{FragmentOutcome, LlmTranslator, Translator, translate_fragment};

pub const SYSTEM_PROMPT_TEMPLATE: &str = "You are a helpful assistant that translates presentation slide text to {target_language}. \
     Output only the translated text without any explanations. \
     Keep line breaks where they are.";

pub const USER_PROMPT_TEMPLATE: &str = "Translate the following text to {target_language}:\n\n{text}";

/// Sampling temperature for translation requests.
pub const TRANSLATION_TEMPERATURE: f32 = 0.3;

/// Upper bound on the length of one translated fragment.
pub const TRANSLATION_MAX_TOKENS: u32 = 2000;

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_system_prompt(target_language: &str) -> String {
    // {target_language} is a placeholder for string replacement, not a format argument
    SYSTEM_PROMPT_TEMPLATE.replace("{target_language}", target_language)
}

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_user_prompt(text: &str, target_language: &str) -> String {
    USER_PROMPT_TEMPLATE
        .replace("{target_language}", target_language)
        .replacen("{text}", text, 1)
}

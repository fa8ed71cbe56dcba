//! Prompt text and model constants for the CONVERT request.
//!
//! The prompt is the contract between the converter and the model: the
//! model must answer with bare source code so the output pane can show it
//! verbatim.

use crate::convert::SupportedLanguage;

pub const ANTHROPIC_MODEL: &str = "claude-haiku-4-5-20251001";
pub const GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const OLLAMA_MODEL: &str = "llama3.2:latest";

/// Upper bound on generated tokens. Converted files can be long.
pub const MAX_TOKENS: u32 = 4096;

/// Build the CONVERT prompt: instructions first, then the input verbatim.
pub fn build_convert_prompt(target: SupportedLanguage, code: &str) -> String {
    format!(
        "Return ONLY raw {target} source code.\n\
         - No backticks\n\
         - No markdown\n\
         - No surrounding commentary\n\
         Code to convert:\n\
         {code}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_target_and_ends_with_input() {
        let prompt = build_convert_prompt(SupportedLanguage::Go, "print('hi')");
        assert!(prompt.starts_with("Return ONLY raw Go source code."));
        assert!(prompt.contains("- No backticks"));
        assert!(prompt.contains("- No markdown"));
        assert!(prompt.contains("- No surrounding commentary"));
        assert!(prompt.ends_with("Code to convert:\nprint('hi')"));
    }

    #[test]
    fn input_is_not_trimmed_or_escaped() {
        let code = "  int main() {\n    return 0;\n}\n";
        let prompt = build_convert_prompt(SupportedLanguage::Cpp, code);
        assert!(prompt.starts_with("Return ONLY raw C++ source code."));
        assert!(prompt.ends_with(code));
    }
}

//! Prompt templates, loaded by symbolic ID from the prompts directory.

use std::path::PathBuf;

use crate::error::{AppError, Result};

/// Primary summarization prompt.
pub const SUMMARY_PROMPT: &str = "summary.v0.1";

/// One-shot repair prompt for invalid summary JSON.
pub const FIX_JSON_PROMPT: &str = "fix_json.v0.1";

/// Fixed registry of known prompt IDs and their backing template files.
const REGISTRY: &[(&str, &str)] = &[
    (SUMMARY_PROMPT, "summary_v01.md"),
    (FIX_JSON_PROMPT, "fix_json_v01.md"),
];

/// Resolves prompt IDs to template text and substitutes placeholders.
#[derive(Debug, Clone)]
pub struct PromptStore {
    root: PathBuf,
}

impl PromptStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Render a prompt template. Substitution is literal `{name}`
    /// find-and-replace; unknown tokens in the template are left untouched.
    pub fn render(&self, prompt_id: &str, substitutions: &[(&str, &str)]) -> Result<String> {
        let filename = REGISTRY
            .iter()
            .find(|(id, _)| *id == prompt_id)
            .map(|(_, file)| *file)
            .ok_or_else(|| AppError::UnknownPrompt(prompt_id.to_string()))?;

        let path = self.root.join(filename);
        if !path.exists() {
            return Err(AppError::TemplateNotFound(path));
        }
        let mut text = std::fs::read_to_string(&path)?;

        for (name, value) in substitutions {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(template: &str) -> (tempfile::TempDir, PromptStore) {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("summary_v01.md"), template).unwrap();
        let store = PromptStore::new(tmp.path());
        (tmp, store)
    }

    #[test]
    fn substitutes_known_tokens() {
        let (_tmp, store) = store_with("Summarize this:\n{transcript}\n");
        let text = store
            .render(SUMMARY_PROMPT, &[("transcript", "Hello world")])
            .unwrap();
        assert_eq!(text, "Summarize this:\nHello world\n");
    }

    #[test]
    fn leaves_unknown_tokens_untouched() {
        let (_tmp, store) = store_with("{transcript} and {other}");
        let text = store
            .render(SUMMARY_PROMPT, &[("transcript", "x")])
            .unwrap();
        assert_eq!(text, "x and {other}");
    }

    #[test]
    fn unknown_prompt_id_fails() {
        let (_tmp, store) = store_with("irrelevant");
        let err = store.render("nonexistent.v9", &[]).unwrap_err();
        assert!(matches!(err, AppError::UnknownPrompt(_)));
    }

    #[test]
    fn missing_template_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PromptStore::new(tmp.path());
        let err = store.render(SUMMARY_PROMPT, &[]).unwrap_err();
        assert!(matches!(err, AppError::TemplateNotFound(_)));
    }
}

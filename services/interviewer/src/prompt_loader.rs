use anyhow::{Context, Result};
use interview_core::prompts::PromptSet;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Reads every `*.md` file in `dir_path` into a map keyed by file stem, so
/// `question.md` overrides the `question` template.
pub fn load_prompts(dir_path: &Path) -> Result<HashMap<String, String>> {
    let mut prompts = HashMap::new();

    for entry in fs::read_dir(dir_path)
        .with_context(|| format!("Failed to read prompts directory: {}", dir_path.display()))?
    {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("md") {
            continue;
        }

        let prompt_key = path
            .file_stem()
            .and_then(|s| s.to_str())
            .context("Could not get file stem for prompt file")?
            .to_string();
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read prompt file: {}", path.display()))?;

        tracing::debug!("Loaded prompt override '{}' from {}", prompt_key, path.display());
        prompts.insert(prompt_key, content.trim_end().to_string());
    }

    Ok(prompts)
}

/// Built-in prompts, with overrides from `dir_path` applied when given.
pub fn prompt_set(dir_path: Option<&Path>) -> Result<PromptSet> {
    let prompts = PromptSet::default();
    match dir_path {
        Some(dir) => {
            let overrides = load_prompts(dir)?;
            tracing::info!("Loaded {} prompt overrides from {}.", overrides.len(), dir.display());
            Ok(prompts.with_overrides(&overrides))
        }
        None => Ok(prompts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_core::question::QuestionHistory;
    use interview_core::session_config::SessionConfig;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_prompts_reads_only_markdown_files() -> Result<()> {
        let dir = tempdir()?;
        let dir_path = dir.path();

        let mut question = File::create(dir_path.join("question.md"))?;
        writeln!(question, "Ask one {{difficulty}} question for a {{role}}.")?;
        let mut ignored = File::create(dir_path.join("notes.txt"))?;
        writeln!(ignored, "not a prompt")?;
        std::fs::create_dir(dir_path.join("subdir"))?;

        let prompts = load_prompts(dir_path)?;

        assert_eq!(prompts.len(), 1, "Should only load .md files");
        assert_eq!(
            prompts.get("question").unwrap(),
            "Ask one {difficulty} question for a {role}."
        );
        assert!(prompts.get("notes").is_none());
        Ok(())
    }

    #[test]
    fn test_load_prompts_from_nonexistent_dir() {
        let result = load_prompts(Path::new("nonexistent_dir_for_testing_prompts"));
        assert!(result.is_err());
    }

    #[test]
    fn test_prompt_set_applies_overrides() -> Result<()> {
        let dir = tempdir()?;
        let mut question = File::create(dir.path().join("question.md"))?;
        writeln!(question, "Ask a {{role}} anything.")?;

        let prompts = prompt_set(Some(dir.path()))?;

        assert_eq!(
            prompts.render_question(&SessionConfig::default(), &QuestionHistory::new()),
            "Ask a Software Engineer anything."
        );
        Ok(())
    }

    #[test]
    fn test_prompt_set_without_dir_uses_builtins() -> Result<()> {
        let prompts = prompt_set(None)?;
        let text = prompts.render_question(&SessionConfig::default(), &QuestionHistory::new());
        assert!(text.starts_with("Generate a single, concise Technical interview question"));
        Ok(())
    }
}

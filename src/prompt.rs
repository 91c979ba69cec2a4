//! Instruction templates sent to the model.
//!
//! Both templates pin the exact JSON keys the answer must contain and forbid
//! prose or code fences around the object, so the normalizer has a fighting
//! chance of extracting something parseable.

/// Sentinel used when a repository carries no README
pub const NO_README: &str = "No README provided.";

/// Sentinel used when no prior project summary exists
pub const NO_PREVIOUS_SUMMARY: &str = "No previous project summary available.";

/// Builds the repository-summary instruction
///
/// Embeds the README text (or the sentinel) and the aggregated source slice.
pub fn repository_summary(readme: &str, source_code: &str) -> String {
    let readme = if readme.is_empty() { NO_README } else { readme };
    format!(
        r#"You are an expert developer and project manager, tasked with analyzing an unfinished project to attract new contributors.
Your goal is to generate a structured JSON object that provides a comprehensive overview.

<CONTEXT>
<README>
{readme}
</README>
<SOURCE_CODE>
{source_code}
</SOURCE_CODE>
</CONTEXT>

<INSTRUCTIONS>
Based on the provided context, generate a JSON object with the following keys:
- "pitch": A compelling one-sentence elevator pitch for the project.
- "problem_solved": A brief paragraph explaining the problem this project aims to solve.
- "tech_stack": An array of strings listing the key technologies, languages, and frameworks used.
- "current_status": A short description of the project's current state (e.g., "Early prototype with basic UI", "Functional backend with API endpoints", etc.).
- "contribution_friendliness": A score from 1 (very difficult) to 10 (very easy) indicating how easy it would be for a new developer to start contributing, along with a brief justification for the score.
- "suggested_roadmap": An array of 3-5 strings, each being a specific, actionable next step or feature that a new contributor could build.

Do not include any text, markdown formatting like ```json, or explanations outside of the main JSON object.
</INSTRUCTIONS>
"#
    )
}

/// Builds the diff-analysis instruction
pub fn diff_analysis(diff: &str, previous_summary: &str, project_title: &str) -> String {
    let previous_summary = if previous_summary.is_empty() {
        NO_PREVIOUS_SUMMARY
    } else {
        previous_summary
    };
    format!(
        r#"You are an expert developer analyzing a code contribution (git diff) for a project called "{project_title}".

<CONTEXT>
<PREVIOUS_PROJECT_SUMMARY>
{previous_summary}
</PREVIOUS_PROJECT_SUMMARY>

<GIT_DIFF>
{diff}
</GIT_DIFF>
</CONTEXT>

<INSTRUCTIONS>
Analyze this contribution and generate a JSON object with exactly these keys:
- "contribution_summary": A concise 1-2 sentence summary of what this contribution does (e.g., "Added user authentication system with login/logout functionality").
- "updated_project_summary": An updated version of the project summary that incorporates this contribution. If no previous summary exists, create a new one based on the diff.
- "next_steps": An array of 2-3 specific, actionable next steps that would logically follow this contribution.

Focus on:
- What functionality was added/modified/removed
- Technical significance of the changes
- How this moves the project forward
- Ignore trivial changes like formatting, comments, or config files unless they're substantial

Return only the JSON object, no other text or markdown formatting.
</INSTRUCTIONS>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_prompt_embeds_context() {
        let prompt = repository_summary("# My Project", "--- File: main.py ---\nprint(1)\n\n");
        assert!(prompt.contains("# My Project"));
        assert!(prompt.contains("--- File: main.py ---"));
        assert!(prompt.contains("\"suggested_roadmap\""));
    }

    #[test]
    fn test_repository_prompt_uses_sentinel_for_missing_readme() {
        let prompt = repository_summary("", "code");
        assert!(prompt.contains(NO_README));
    }

    #[test]
    fn test_repository_prompt_requests_all_six_keys() {
        let prompt = repository_summary("readme", "code");
        for key in [
            "pitch",
            "problem_solved",
            "tech_stack",
            "current_status",
            "contribution_friendliness",
            "suggested_roadmap",
        ] {
            assert!(prompt.contains(&format!("\"{}\"", key)), "missing {}", key);
        }
    }

    #[test]
    fn test_diff_prompt_embeds_title_and_diff() {
        let prompt = diff_analysis("+ added line", "Old summary", "Widget Factory");
        assert!(prompt.contains("\"Widget Factory\""));
        assert!(prompt.contains("+ added line"));
        assert!(prompt.contains("Old summary"));
    }

    #[test]
    fn test_diff_prompt_uses_sentinel_for_missing_summary() {
        let prompt = diff_analysis("+ x", "", "Project");
        assert!(prompt.contains(NO_PREVIOUS_SUMMARY));
    }
}

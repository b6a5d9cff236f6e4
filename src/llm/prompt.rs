//! Prompt construction for AI-generated commit messages.

use super::types::{ChatMessage, Role};

/// Fixed system instruction describing the commit message convention.
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant that generates concise, standardized Git commit messages. Follow these rules:
- Use the Conventional Commits format: <type>(<scope>): <description>
- Types: feat (✨), fix (🐛), docs (📚), style (🎨), refactor (🛠️), test (✅), chore (🔧)
- Scope is optional but should describe the affected part of the codebase.
- Description should be concise and written in the imperative mood.
- Consider adding emojis for better readability.
- Example: ✨ feat(auth): Add login functionality
Keep it brief!";

const USER_PREAMBLE: &str = "Generate a Git commit message for the following changes:\n\n";

/// Build the user instruction. The diff is embedded verbatim.
pub fn build_user_prompt(diff: &str) -> String {
    let mut prompt = String::with_capacity(USER_PREAMBLE.len() + diff.len());
    prompt.push_str(USER_PREAMBLE);
    prompt.push_str(diff);
    prompt
}

/// System + user messages for one generation request.
pub fn build_messages(diff: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::new(Role::System, SYSTEM_INSTRUCTION),
        ChatMessage::new(Role::User, build_user_prompt(diff)),
    ]
}

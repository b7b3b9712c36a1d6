//! Prompt builder: short system message + compact context block.

/// Default system instructions for roster-grounded answers.
///
/// Keep this short: it consistently improves steering without wasting tokens.
pub const DEFAULT_SYSTEM: &str = "\
You are SpiritxBot, a friendly cricket assistant. Answer using only the player data provided.
- Format the response in a friendly, readable way and highlight key statistics naturally.
- DO NOT return JSON or technical formats; use conversational language.
- DO NOT mention player points or any point calculations.
- When referring to pricing, use the term \"base price\" or \"value\".
- If the data is insufficient, say you don't know.";

/// Build the final user prompt with a labeled context section and char budget.
///
/// The context is compacted to at most `max_chars`, preserving order.
pub fn build_user_prompt(question: &str, context: &str, max_chars: usize) -> String {
    let mut out = String::new();
    out.push_str("Question:\n");
    out.push_str(question.trim());
    out.push_str("\n\n");

    let context = context.trim();
    if !context.is_empty() {
        out.push_str("Player data:\n");
        if context.len() > max_chars {
            out.push_str(safe_truncate(context, max_chars));
            out.push_str("\n[truncated]\n");
        } else {
            out.push_str(context);
            out.push('\n');
        }
        out.push('\n');
        out.push_str("Answer using only the player data above.\n");
    }

    out
}

/// Prompt asking the fast model to pull a player name out of a search query.
pub fn name_extraction_prompt(query: &str) -> String {
    format!(
        "Analyze this cricket player search query: \"{query}\"\n\
         Extract the player name the user is looking for.\n\
         Return ONLY the player name, nothing else."
    )
}

/// Prompt asking the fast model which role groups a "players" query wants.
pub fn role_extraction_prompt(query: &str) -> String {
    format!(
        "Analyze this cricket query: \"{query}\"\n\
         What types of players is the user asking for? Choose from: batsmen, bowlers, all-rounders.\n\
         If multiple types are mentioned, list them all separated by commas.\n\
         Return ONLY the player types, nothing else."
    )
}

fn safe_truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        s
    } else {
        let mut end = max;
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        &s[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_question_and_context() {
        let p = build_user_prompt("Who is the best batsman?", "Player: X", 1000);
        assert!(p.contains("Question:"));
        assert!(p.contains("Player data:"));
        assert!(p.contains("Player: X"));
    }

    #[test]
    fn empty_context_omits_data_block() {
        let p = build_user_prompt("hello", "  ", 1000);
        assert!(!p.contains("Player data:"));
    }

    #[test]
    fn context_is_truncated_to_budget() {
        let ctx = "x".repeat(500);
        let p = build_user_prompt("q", &ctx, 100);
        assert!(p.contains("[truncated]"));
        assert!(p.len() < 300);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let ctx = "₹".repeat(100); // multi-byte
        let p = build_user_prompt("q", &ctx, 10);
        assert!(p.contains("[truncated]"));
    }
}

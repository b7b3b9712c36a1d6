//! Best-effort LLM calls: extraction and answer rewriting.
//!
//! Every function here returns `Option` — a missing LLM service, a failed
//! call, or an empty completion all degrade to `None`, and the caller uses
//! its deterministic fallback. The chatbot never depends on the model being
//! reachable.

use std::sync::Arc;

use ai_llm_service::service_profiles::LlmServiceProfiles;
use player_store::PlayerRole;
use tracing::warn;

use crate::prompt;

/// Rewrites an answer conversationally with the slow profile.
///
/// `context` is the serialized player data grounding the answer.
pub async fn enhance_answer(
    llm: Option<&Arc<LlmServiceProfiles>>,
    question: &str,
    context: &str,
    max_ctx_chars: usize,
) -> Option<String> {
    let svc = llm?;
    let user = prompt::build_user_prompt(question, context, max_ctx_chars);
    match svc.generate_slow(&user, Some(prompt::DEFAULT_SYSTEM)).await {
        Ok(text) => non_empty(text),
        Err(e) => {
            warn!("answer enhancement failed: {e}");
            None
        }
    }
}

/// Extracts the player name a search query refers to, via the fast profile.
pub async fn extract_player_name(
    llm: Option<&Arc<LlmServiceProfiles>>,
    query: &str,
) -> Option<String> {
    let svc = llm?;
    match svc
        .generate_fast(&prompt::name_extraction_prompt(query), None)
        .await
    {
        Ok(text) => non_empty(text),
        Err(e) => {
            warn!("player name extraction failed: {e}");
            None
        }
    }
}

/// Extracts the role groups a "players" query asks about, via the fast profile.
///
/// Returns `None` when the call failed or produced no recognizable role, so
/// the caller can fall back to keyword scanning.
pub async fn extract_roles(
    llm: Option<&Arc<LlmServiceProfiles>>,
    query: &str,
) -> Option<Vec<PlayerRole>> {
    let svc = llm?;
    let text = match svc
        .generate_fast(&prompt::role_extraction_prompt(query), None)
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!("role extraction failed: {e}");
            return None;
        }
    };

    let roles = parse_roles(&text);
    if roles.is_empty() { None } else { Some(roles) }
}

/// Parses a comma-separated role listing from a model completion.
pub(crate) fn parse_roles(text: &str) -> Vec<PlayerRole> {
    let mut out = Vec::new();
    for part in text.split(',') {
        let part = part.trim().trim_end_matches('.').to_ascii_lowercase();
        let role = match part.as_str() {
            "batsman" | "batsmen" => Some(PlayerRole::Batsman),
            "bowler" | "bowlers" => Some(PlayerRole::Bowler),
            "all-rounder" | "all-rounders" | "all rounder" | "all rounders" | "allrounder"
            | "allrounders" => Some(PlayerRole::AllRounder),
            _ => None,
        };
        if let Some(r) = role {
            if !out.contains(&r) {
                out.push(r);
            }
        }
    }
    out
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn without_llm_everything_degrades_to_none() {
        assert!(enhance_answer(None, "q", "ctx", 100).await.is_none());
        assert!(extract_player_name(None, "q").await.is_none());
        assert!(extract_roles(None, "q").await.is_none());
    }

    #[test]
    fn parses_comma_separated_roles() {
        assert_eq!(
            parse_roles("batsmen, bowlers"),
            vec![PlayerRole::Batsman, PlayerRole::Bowler]
        );
        assert_eq!(parse_roles("All-Rounders."), vec![PlayerRole::AllRounder]);
        assert!(parse_roles("wicketkeepers").is_empty());
    }

    #[test]
    fn duplicate_roles_collapse() {
        assert_eq!(parse_roles("bowlers, bowler"), vec![PlayerRole::Bowler]);
    }
}

//! Chatbot answer engine with a single public entry point.
//!
//! Public API: [`answer`] / [`answer_with_opts`]. The engine classifies the
//! query (greeting, domain check, keyword intents), runs the matching
//! roster operation, asks the LLM to rewrite the answer conversationally,
//! and falls back to deterministic formatting whenever the model or the
//! vector store is unavailable. Unrecognized queries go through semantic
//! retrieval over the player collection.
//!
//! The returned value is always a user-facing string: failures inside the
//! pipeline are logged and surface as friendly messages, never as errors.

pub mod api_types;
pub mod cfg;
pub mod error;
pub mod format;
pub mod intent;
pub mod prompt;
pub mod ranking;
pub mod team;

mod enhance;

pub use api_types::{EngineContext, QueryOptions};
pub use cfg::EngineConfig;
pub use error::EngineError;

use player_store::embed::profile::{ProfileEmbedder, ProfileEmbedderConfig};
use player_store::{Player, PlayerQuery, PlayerRole, Roster};
use tracing::{debug, error};

use crate::format::{
    MSG_EMPTY_ROSTER, MSG_INTERNAL_ERROR, MSG_NO_ALL_ROUNDERS, MSG_NO_BATSMEN, MSG_NO_BOWLERS,
    MSG_NOT_FOUND, MSG_OFF_TOPIC, MSG_PROVIDE_QUERY, MSG_WELCOME,
};
use crate::intent::Intent;

/// Answer a query with defaults from environment configuration.
///
/// # Example
/// ```no_run
/// # use chat_engine::{answer, EngineContext};
/// # use player_store::Roster;
/// # #[tokio::main] async fn main() {
/// let roster = Roster::default();
/// let reply = answer("who is the best batsman?", &roster, &EngineContext::offline()).await;
/// println!("{reply}");
/// # }
/// ```
pub async fn answer(question: &str, roster: &Roster, ctx: &EngineContext) -> String {
    answer_with_opts(question, roster, ctx, QueryOptions::default()).await
}

/// Answer a query with explicit options.
///
/// Any [`QueryOptions`] field set to `0` is replaced by the corresponding
/// value from environment-driven config ([`EngineConfig`]).
pub async fn answer_with_opts(
    question: &str,
    roster: &Roster,
    ctx: &EngineContext,
    opts: QueryOptions,
) -> String {
    let gcfg = EngineConfig::from_env();
    let top_k = if opts.top_k == 0 { gcfg.top_k } else { opts.top_k };

    let question = question.trim();
    if question.is_empty() {
        return MSG_PROVIDE_QUERY.to_string();
    }
    let q_lower = question.to_lowercase();

    if intent::is_greeting(&q_lower) {
        return MSG_WELCOME.to_string();
    }
    if !intent::is_cricket_related(&q_lower) {
        return MSG_OFF_TOPIC.to_string();
    }

    let players = roster.players();
    if players.is_empty() {
        return MSG_EMPTY_ROSTER.to_string();
    }

    let names_lower: Vec<String> = players.iter().map(|p| p.name.to_lowercase()).collect();
    let mut intent = intent::classify(&q_lower, &names_lower);
    debug!(?intent, "query classified");

    if intent == Intent::PlayerSearch {
        match player_search(question, &q_lower, roster, ctx, &gcfg).await {
            Ok(Some(reply)) => return reply,
            // No usable match: fall through the keyword chain, as if the
            // player-search branch had never fired.
            Ok(None) => intent = intent::listing_intent(&q_lower),
            Err(e) => {
                error!("player search failed: {e}");
                return MSG_INTERNAL_ERROR.to_string();
            }
        }
    }

    match run_intent(intent, question, &q_lower, players, ctx, &gcfg, top_k).await {
        Ok(reply) => reply,
        Err(e) => {
            error!("query processing failed: {e}");
            MSG_INTERNAL_ERROR.to_string()
        }
    }
}

/// Executes one keyword intent (everything below the player search).
async fn run_intent(
    intent: Intent,
    question: &str,
    q_lower: &str,
    players: &[Player],
    ctx: &EngineContext,
    gcfg: &EngineConfig,
    top_k: u64,
) -> Result<String, EngineError> {
    let llm = ctx.llm.as_ref();

    match intent {
        Intent::BestBatsman => {
            let sorted = ranking::top_batsmen(players);
            let Some(best) = sorted.first() else {
                return Ok(MSG_NO_BATSMEN.to_string());
            };
            let context = serde_json::to_string_pretty(best)?;
            if let Some(reply) =
                enhance::enhance_answer(llm, "Who is the best batsman?", &context, gcfg.max_ctx_chars)
                    .await
            {
                return Ok(reply);
            }
            Ok(format::best_batsman_fallback(best))
        }

        Intent::BestBowler => {
            let sorted = ranking::top_bowlers(players);
            let Some(best) = sorted.first() else {
                return Ok(MSG_NO_BOWLERS.to_string());
            };
            let context = serde_json::to_string_pretty(best)?;
            if let Some(reply) =
                enhance::enhance_answer(llm, "Who is the best bowler?", &context, gcfg.max_ctx_chars)
                    .await
            {
                return Ok(reply);
            }
            Ok(format::best_bowler_fallback(best))
        }

        Intent::BestAllRounder => {
            let sorted = ranking::top_all_rounders(players);
            let Some(best) = sorted.first() else {
                return Ok(MSG_NO_ALL_ROUNDERS.to_string());
            };
            let context = serde_json::to_string_pretty(best)?;
            if let Some(reply) = enhance::enhance_answer(
                llm,
                "Who is the best all-rounder?",
                &context,
                gcfg.max_ctx_chars,
            )
            .await
            {
                return Ok(reply);
            }
            Ok(format::best_all_rounder_fallback(best))
        }

        Intent::BestPlayers => {
            let sorted = ranking::by_value(players);
            let top5: Vec<&Player> = sorted.iter().copied().take(5).collect();
            let context = serde_json::to_string_pretty(&top5)?;
            if let Some(reply) = enhance::enhance_answer(
                llm,
                "Who are the best cricket players?",
                &context,
                gcfg.max_ctx_chars,
            )
            .await
            {
                return Ok(reply);
            }
            let top10: Vec<&Player> = sorted.into_iter().take(10).collect();
            Ok(format::top_players_fallback(&top10))
        }

        Intent::BestTeam => {
            let team = team::pick_best_team(players);
            let context = serde_json::to_string_pretty(&team)?;
            if let Some(reply) = enhance::enhance_answer(
                llm,
                "Create the best cricket team with these players",
                &context,
                gcfg.max_ctx_chars,
            )
            .await
            {
                return Ok(reply);
            }
            Ok(format::best_team_fallback(&team))
        }

        Intent::RoleList(role) => {
            let sorted = ranking::role_by_value(players, role);
            let top10: Vec<&Player> = sorted.into_iter().take(10).collect();
            let context = serde_json::to_string_pretty(&top10)?;
            let question = format!("List the top {} in cricket", role_phrase(role));
            if let Some(reply) =
                enhance::enhance_answer(llm, &question, &context, gcfg.max_ctx_chars).await
            {
                return Ok(reply);
            }
            Ok(format::role_list_fallback(role, &top10))
        }

        Intent::PlayersOverview => {
            let requested = match enhance::extract_roles(llm, question).await {
                Some(roles) => roles,
                None => intent::roles_from_keywords(q_lower),
            };

            let (header, question_text, roles) = if requested.is_empty() {
                (
                    "Here are the top cricket players across all categories by value",
                    "Show information about top cricket players of all types".to_string(),
                    vec![PlayerRole::Batsman, PlayerRole::Bowler, PlayerRole::AllRounder],
                )
            } else {
                let phrases: Vec<&str> = requested.iter().map(|r| role_phrase(*r)).collect();
                (
                    "Here are the players you asked about",
                    format!("Show information about cricket {}", phrases.join(", ")),
                    requested,
                )
            };

            let groups: Vec<(PlayerRole, Vec<&Player>)> = roles
                .into_iter()
                .map(|role| {
                    let top5: Vec<&Player> = ranking::role_by_value(players, role)
                        .into_iter()
                        .take(5)
                        .collect();
                    (role, top5)
                })
                .collect();

            let context = overview_context(&groups)?;
            if let Some(reply) =
                enhance::enhance_answer(llm, &question_text, &context, gcfg.max_ctx_chars).await
            {
                return Ok(reply);
            }
            Ok(format::players_overview_fallback(header, &groups))
        }

        Intent::Unknown => semantic_fallback(question, ctx, gcfg, top_k).await,

        // Handled before classification; kept for exhaustiveness.
        Intent::Greeting => Ok(MSG_WELCOME.to_string()),
        Intent::OffTopic => Ok(MSG_OFF_TOPIC.to_string()),
        Intent::PlayerSearch => Ok(MSG_NOT_FOUND.to_string()),
    }
}

/// The player-search branch: extract a name, match the roster, answer.
///
/// Returns `Ok(None)` when nothing usable matched, so the caller can fall
/// through to the keyword chain.
async fn player_search(
    question: &str,
    q_lower: &str,
    roster: &Roster,
    ctx: &EngineContext,
    gcfg: &EngineConfig,
) -> Result<Option<String>, EngineError> {
    let llm = ctx.llm.as_ref();

    // Ask the fast model which player the query means; fall back to the
    // first roster name that occurs verbatim in the query.
    let extracted = match enhance::extract_player_name(llm, question).await {
        Some(name) => Some(name),
        None => roster
            .players()
            .iter()
            .find(|p| q_lower.contains(&p.name.to_lowercase()))
            .map(|p| p.name.clone()),
    };
    let Some(name) = extracted else {
        return Ok(None);
    };

    let matched = roster.find_by_name(&name);
    match matched.len() {
        0 => Ok(None),
        1 => {
            let player = matched[0];
            let context = serde_json::to_string_pretty(player)?;
            let question = format!("Tell me about {}", player.name);
            if let Some(reply) =
                enhance::enhance_answer(llm, &question, &context, gcfg.max_ctx_chars).await
            {
                return Ok(Some(reply));
            }
            Ok(Some(format::format_player_info(player)))
        }
        _ => {
            let names: Vec<&str> = matched.iter().map(|p| p.name.as_str()).collect();
            Ok(Some(format::multiple_matches(&names)))
        }
    }
}

/// Semantic retrieval over the vector collection for unrecognized queries.
async fn semantic_fallback(
    question: &str,
    ctx: &EngineContext,
    gcfg: &EngineConfig,
    top_k: u64,
) -> Result<String, EngineError> {
    // Both the store and an embedding backend are needed here; without them
    // the deterministic intents above are all the bot can do.
    let (Some(store), Some(llm)) = (ctx.store.as_ref(), ctx.llm.as_ref()) else {
        debug!("semantic fallback skipped: store or llm not configured");
        return Ok(MSG_NOT_FOUND.to_string());
    };

    let embedder = ProfileEmbedder::new(ProfileEmbedderConfig {
        svc: llm.clone(),
        dim: None,
    });

    let hits = store
        .player_context(
            PlayerQuery {
                text: question,
                top_k,
                filter: None,
            },
            &embedder,
        )
        .await?;

    if hits.is_empty() {
        return Ok(MSG_NOT_FOUND.to_string());
    }

    let context = hits
        .iter()
        .map(|h| h.document.as_str())
        .filter(|d| !d.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    if let Some(reply) =
        enhance::enhance_answer(Some(llm), question, &context, gcfg.max_ctx_chars).await
    {
        return Ok(reply);
    }

    // No model available for rewriting: show the closest profile as-is.
    let best = &hits[0];
    if let Some(player) = &best.player {
        return Ok(format::format_player_info(player));
    }
    if !best.document.is_empty() {
        return Ok(best.document.clone());
    }
    Ok(MSG_NOT_FOUND.to_string())
}

/// Serializes overview groups as `{"batsmen": […], …}` for the LLM context.
fn overview_context(groups: &[(PlayerRole, Vec<&Player>)]) -> Result<String, EngineError> {
    let mut map = serde_json::Map::new();
    for (role, players) in groups {
        map.insert(
            role_phrase(*role).to_string(),
            serde_json::to_value(players)?,
        );
    }
    Ok(serde_json::to_string_pretty(&serde_json::Value::Object(map))?)
}

fn role_phrase(role: PlayerRole) -> &'static str {
    match role {
        PlayerRole::Batsman => "batsmen",
        PlayerRole::Bowler => "bowlers",
        PlayerRole::AllRounder => "all-rounders",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str, runs: i64, wickets: i64, price: i64) -> Player {
        Player {
            name: name.into(),
            university: "Colombo".into(),
            category: "Premium".into(),
            total_runs: runs,
            balls_faced: 0,
            innings_played: 5,
            wickets,
            overs_bowled: 0.0,
            runs_conceded: 0,
            base_price: price,
        }
    }

    fn roster() -> Roster {
        Roster::from_players(vec![
            p("Nuwan Perera", 1200, 1, 900_000),
            p("Kusal Silva", 20, 30, 700_000),
            p("Asela Fernando", 400, 15, 800_000),
        ])
    }

    #[tokio::test]
    async fn empty_query_asks_for_input() {
        let reply = answer("   ", &roster(), &EngineContext::offline()).await;
        assert_eq!(reply, MSG_PROVIDE_QUERY);
    }

    #[tokio::test]
    async fn greeting_gets_welcome() {
        let reply = answer("Hello", &roster(), &EngineContext::offline()).await;
        assert_eq!(reply, MSG_WELCOME);
    }

    #[tokio::test]
    async fn off_topic_is_redirected() {
        let reply = answer("how do I bake bread", &roster(), &EngineContext::offline()).await;
        assert_eq!(reply, MSG_OFF_TOPIC);
    }

    #[tokio::test]
    async fn empty_roster_is_reported() {
        let reply = answer("best batsman", &Roster::default(), &EngineContext::offline()).await;
        assert_eq!(reply, MSG_EMPTY_ROSTER);
    }

    #[tokio::test]
    async fn best_batsman_falls_back_to_formatted_answer() {
        let reply = answer("who is the best batsman?", &roster(), &EngineContext::offline()).await;
        assert!(reply.contains("The best batsman is Nuwan Perera"));
        assert!(reply.contains("₹900,000"));
    }

    #[tokio::test]
    async fn best_bowler_picks_by_wickets() {
        let reply = answer("best bowler?", &roster(), &EngineContext::offline()).await;
        assert!(reply.contains("The best bowler is Kusal Silva with 30 wickets"));
    }

    #[tokio::test]
    async fn best_all_rounder_uses_combined_score() {
        let reply = answer("who is the best all rounder", &roster(), &EngineContext::offline()).await;
        assert!(reply.contains("The best all-rounder is Asela Fernando"));
    }

    #[tokio::test]
    async fn player_search_formats_profile_offline() {
        let reply = answer(
            "show me player Nuwan Perera stats",
            &roster(),
            &EngineContext::offline(),
        )
        .await;
        assert!(reply.contains("Player: Nuwan Perera"));
        assert!(reply.contains("is a Batsman"));
    }

    #[tokio::test]
    async fn best_team_lists_roles() {
        let reply = answer("pick the best team", &roster(), &EngineContext::offline()).await;
        assert!(reply.contains("BATSMEN:"));
        assert!(reply.contains("BOWLERS:"));
        assert!(reply.contains("- Nuwan Perera"));
    }

    #[tokio::test]
    async fn players_overview_lists_every_role_offline() {
        let reply = answer("show me your players", &roster(), &EngineContext::offline()).await;
        assert!(reply.contains("across all categories by value"));
        assert!(reply.contains("Top Batsmen by Value:"));
        assert!(reply.contains("Top Bowlers by Value:"));
        assert!(reply.contains("Top All-Rounders by Value:"));
    }

    #[tokio::test]
    async fn unknown_query_without_backends_is_not_found() {
        let reply = answer(
            "highest strike rate this tournament",
            &roster(),
            &EngineContext::offline(),
        )
        .await;
        assert_eq!(reply, MSG_NOT_FOUND);
    }
}

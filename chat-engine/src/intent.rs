//! Intent detection over the lowercased query text.
//!
//! The chatbot is keyword-routed: greetings and off-topic queries are
//! answered immediately, everything else maps onto a roster operation or
//! falls through to the semantic search.

use player_store::PlayerRole;

/// Greeting words answered with the fixed welcome message.
/// Matched as the whole query, not as a substring.
const GREETING_WORDS: [&str; 5] = ["hi", "hello", "hey", "greetings", "hola"];

/// A query must mention at least one of these to be treated as on-topic.
const CRICKET_KEYWORDS: [&str; 19] = [
    "cricket",
    "player",
    "batsman",
    "bowler",
    "all-rounder",
    "allrounder",
    "team",
    "runs",
    "wickets",
    "innings",
    "stats",
    "statistics",
    "batting",
    "bowling",
    "score",
    "match",
    "tournament",
    "performance",
    "best",
];

/// What the query is asking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// A bare greeting.
    Greeting,
    /// No cricket keyword present.
    OffTopic,
    /// Mentions `player` together with a known roster name.
    PlayerSearch,
    /// "best batsman"
    BestBatsman,
    /// "best bowler"
    BestBowler,
    /// "best all-rounder" (and spelling variants)
    BestAllRounder,
    /// "best players"
    BestPlayers,
    /// "best team"
    BestTeam,
    /// A list of one role ("batsmen", "bowler list", …)
    RoleList(PlayerRole),
    /// Generic "players" query, role groups resolved separately.
    PlayersOverview,
    /// Nothing matched; semantic fallback.
    Unknown,
}

/// Whether the whole (trimmed, lowercased) query is a greeting word.
pub fn is_greeting(query_lower: &str) -> bool {
    GREETING_WORDS.iter().any(|w| *w == query_lower)
}

/// Whether the query mentions any cricket-domain keyword.
pub fn is_cricket_related(query_lower: &str) -> bool {
    CRICKET_KEYWORDS.iter().any(|kw| query_lower.contains(kw))
}

/// Full classification, including the roster-dependent player search.
///
/// `names_lower` are the lowercased roster names; the player-search intent
/// only fires when one of them literally occurs in the query.
pub fn classify(query_lower: &str, names_lower: &[String]) -> Intent {
    if is_greeting(query_lower) {
        return Intent::Greeting;
    }
    if !is_cricket_related(query_lower) {
        return Intent::OffTopic;
    }
    if query_lower.contains("player")
        && names_lower
            .iter()
            .any(|n| !n.is_empty() && query_lower.contains(n.as_str()))
    {
        return Intent::PlayerSearch;
    }
    listing_intent(query_lower)
}

/// The keyword chain below the player search.
///
/// Also used directly when a player search matched nothing and the query
/// should fall through to the list-style intents.
pub fn listing_intent(query_lower: &str) -> Intent {
    if query_lower.contains("best batsman") {
        Intent::BestBatsman
    } else if query_lower.contains("best bowler") {
        Intent::BestBowler
    } else if query_lower.contains("best all-rounder")
        || query_lower.contains("best all rounder")
        || query_lower.contains("best allrounder")
    {
        Intent::BestAllRounder
    } else if query_lower.contains("best players") {
        Intent::BestPlayers
    } else if query_lower.contains("best team") {
        Intent::BestTeam
    } else if query_lower.contains("batsmen") || query_lower.contains("batsman list") {
        Intent::RoleList(PlayerRole::Batsman)
    } else if query_lower.contains("bowlers") || query_lower.contains("bowler list") {
        Intent::RoleList(PlayerRole::Bowler)
    } else if query_lower.contains("all-rounders")
        || query_lower.contains("all rounders")
        || query_lower.contains("allrounders")
    {
        Intent::RoleList(PlayerRole::AllRounder)
    } else if query_lower.contains("players") {
        Intent::PlayersOverview
    } else {
        Intent::Unknown
    }
}

/// Role groups mentioned in a "players" query, by keyword scan.
///
/// Used as the fallback when the LLM is unavailable for role extraction.
pub fn roles_from_keywords(query_lower: &str) -> Vec<PlayerRole> {
    let mut out = Vec::new();
    if query_lower.contains("batsman") || query_lower.contains("batsmen") {
        out.push(PlayerRole::Batsman);
    }
    if query_lower.contains("bowler") || query_lower.contains("bowlers") {
        out.push(PlayerRole::Bowler);
    }
    if query_lower.contains("all-rounder")
        || query_lower.contains("all rounder")
        || query_lower.contains("allrounder")
    {
        out.push(PlayerRole::AllRounder);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["nuwan perera".into(), "kusal silva".into()]
    }

    #[test]
    fn greetings_match_whole_query_only() {
        assert!(is_greeting("hello"));
        assert!(!is_greeting("hello there"));
        assert_eq!(classify("hola", &names()), Intent::Greeting);
    }

    #[test]
    fn off_topic_is_rejected() {
        assert_eq!(classify("what's the weather", &names()), Intent::OffTopic);
    }

    #[test]
    fn player_search_needs_keyword_and_name() {
        assert_eq!(
            classify("who is player nuwan perera?", &names()),
            Intent::PlayerSearch
        );
        // Known name but no "player" keyword → falls into the listing chain.
        assert_ne!(
            classify("tell me about nuwan perera stats", &names()),
            Intent::PlayerSearch
        );
        // "player" keyword but unknown name.
        assert_ne!(
            classify("who is player john doe", &names()),
            Intent::PlayerSearch
        );
    }

    #[test]
    fn best_intents() {
        let n = names();
        assert_eq!(classify("who is the best batsman?", &n), Intent::BestBatsman);
        assert_eq!(classify("best bowler in the league", &n), Intent::BestBowler);
        assert_eq!(classify("best all rounder", &n), Intent::BestAllRounder);
        assert_eq!(classify("show the best players", &n), Intent::BestPlayers);
        assert_eq!(classify("pick the best team", &n), Intent::BestTeam);
    }

    #[test]
    fn role_lists() {
        let n = names();
        assert_eq!(
            classify("list the best batsmen", &n),
            Intent::RoleList(PlayerRole::Batsman)
        );
        assert_eq!(
            classify("show bowlers", &n),
            Intent::RoleList(PlayerRole::Bowler)
        );
        assert_eq!(
            classify("list the all-rounders", &n),
            Intent::RoleList(PlayerRole::AllRounder)
        );
    }

    #[test]
    fn best_players_wins_over_overview() {
        // "best players" contains "players" too; the more specific intent
        // must be checked first.
        assert_eq!(listing_intent("best players"), Intent::BestPlayers);
        assert_eq!(listing_intent("show me some players"), Intent::PlayersOverview);
    }

    #[test]
    fn unknown_falls_through() {
        assert_eq!(
            classify("highest strike rate this tournament", &names()),
            Intent::Unknown
        );
    }

    #[test]
    fn keyword_role_extraction() {
        assert_eq!(
            roles_from_keywords("show batsmen and bowlers"),
            vec![PlayerRole::Batsman, PlayerRole::Bowler]
        );
        assert_eq!(roles_from_keywords("show everyone"), vec![]);
    }
}

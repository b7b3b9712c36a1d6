//! Deterministic text rendering for players and lists.
//!
//! These renderers produce the fallback answers used whenever the LLM is
//! unavailable or fails, so their output must stand on its own.

use player_store::{Player, PlayerRole};

use crate::ranking::all_rounder_score;

/// Canned replies used across the query route.
pub const MSG_PROVIDE_QUERY: &str = "Please provide a query.";

pub const MSG_WELCOME: &str = "Hello! Welcome to SpiritxBot. I can help you with cricket player \
     information. Ask me about players, batsmen, bowlers, all-rounders, or the best cricket team!";

pub const MSG_OFF_TOPIC: &str = "I only provide information about cricket players and teams. \
     Please ask me about cricket players, statistics, or teams.";

pub const MSG_EMPTY_ROSTER: &str = "No players found in the database.";

pub const MSG_NOT_FOUND: &str = "I couldn't find the information you're looking for. Please try \
     asking about specific cricket players, teams, or statistics.";

pub const MSG_INTERNAL_ERROR: &str = "An error occurred while processing your request.";

pub const MSG_NO_BATSMEN: &str = "No specialized batsmen found in the database.";

pub const MSG_NO_BOWLERS: &str = "No specialized bowlers found in the database.";

pub const MSG_NO_ALL_ROUNDERS: &str = "No all-rounders found in the database.";

/// Renders a price with thousands separators, e.g. `₹1,250,000`.
pub fn format_price(price: i64) -> String {
    let negative = price < 0;
    let digits = price.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if negative {
        format!("₹-{out}")
    } else {
        format!("₹{out}")
    }
}

/// Full readable profile of one player.
pub fn format_player_info(p: &Player) -> String {
    format!(
        "Player: {name}\n\
         University: {university}\n\
         Category: {category}\n\
         Role: {role}\n\
         Base Price: {price}\n\
         Stats:\n\
         \x20 - Total Runs: {runs}\n\
         \x20 - Wickets: {wickets}\n\
         \x20 - Innings Played: {innings}\n\
         \x20 - Overs Bowled: {overs}\n\
         \x20 - Runs Conceded: {conceded}\n\
         \n\
         {name} is a {role} who has scored {runs} runs and taken {wickets} wickets.",
        name = p.name,
        university = p.university,
        category = p.category,
        role = p.role().label(),
        price = format_price(p.base_price),
        runs = p.total_runs,
        wickets = p.wickets,
        innings = p.innings_played,
        overs = p.overs_bowled,
        conceded = p.runs_conceded,
    )
}

/// One-line-per-player list with value and headline stats.
pub fn format_player_list(players: &[&Player], description: &str) -> String {
    let mut out = format!("{description}:\n\n");
    for (i, p) in players.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} - {} - Base Price: {} - Runs: {}, Wickets: {}\n",
            i + 1,
            p.name,
            p.role().label(),
            format_price(p.base_price),
            p.total_runs,
            p.wickets,
        ));
    }
    out
}

/// Fallback answer for the best-batsman question.
pub fn best_batsman_fallback(p: &Player) -> String {
    format!(
        "The best batsman is {} with {} runs.\nBase Price: {}\n\n{}",
        p.name,
        p.total_runs,
        format_price(p.base_price),
        format_player_info(p)
    )
}

/// Fallback answer for the best-bowler question.
pub fn best_bowler_fallback(p: &Player) -> String {
    format!(
        "The best bowler is {} with {} wickets.\nBase Price: {}\n\n{}",
        p.name,
        p.wickets,
        format_price(p.base_price),
        format_player_info(p)
    )
}

/// Fallback answer for the best-all-rounder question.
pub fn best_all_rounder_fallback(p: &Player) -> String {
    format!(
        "The best all-rounder is {} with {} runs and {} wickets.\nBase Price: {}\n\n{}",
        p.name,
        p.total_runs,
        p.wickets,
        format_price(p.base_price),
        format_player_info(p)
    )
}

/// Fallback answer listing the most valuable players overall.
pub fn top_players_fallback(players: &[&Player]) -> String {
    format_player_list(players, "Here are the top cricket players based on their value")
}

/// Fallback answer for one role list.
pub fn role_list_fallback(role: PlayerRole, players: &[&Player]) -> String {
    let mut out = format!("Top {} by Value:\n\n", role_plural(role));
    for (i, p) in players.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} - Base Price: {} - {}\n",
            i + 1,
            p.name,
            format_price(p.base_price),
            role_stat(role, p),
        ));
    }
    out
}

/// Fallback answer for a combined "players" query over several role groups.
pub fn players_overview_fallback(header: &str, groups: &[(PlayerRole, Vec<&Player>)]) -> String {
    let mut out = format!("{header}:\n\n");
    for (role, players) in groups {
        out.push_str(&format!("Top {} by Value:\n", role_plural(*role)));
        for (i, p) in players.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} - Base Price: {} - {}\n",
                i + 1,
                p.name,
                format_price(p.base_price),
                role_stat(*role, p),
            ));
        }
        out.push('\n');
    }
    out
}

/// Fallback answer for the best-team question, grouped by role.
pub fn best_team_fallback(team: &[&Player]) -> String {
    let mut out = String::from("Here's the best cricket team based on player value and role:\n\n");

    out.push_str("BATSMEN:\n");
    for p in team.iter().filter(|p| p.role() == PlayerRole::Batsman) {
        out.push_str(&format!(
            "- {} (Base Price: {}, Runs: {})\n",
            p.name,
            format_price(p.base_price),
            p.total_runs
        ));
    }

    out.push_str("\nBOWLERS:\n");
    for p in team.iter().filter(|p| p.role() == PlayerRole::Bowler) {
        out.push_str(&format!(
            "- {} (Base Price: {}, Wickets: {})\n",
            p.name,
            format_price(p.base_price),
            p.wickets
        ));
    }

    out.push_str("\nALL-ROUNDERS:\n");
    for p in team.iter().filter(|p| p.role() == PlayerRole::AllRounder) {
        out.push_str(&format!(
            "- {} (Base Price: {}, Runs: {}, Wickets: {})\n",
            p.name,
            format_price(p.base_price),
            p.total_runs,
            p.wickets
        ));
    }

    out
}

/// Disambiguation reply when several roster names match.
pub fn multiple_matches(names: &[&str]) -> String {
    format!(
        "I found multiple players matching that name: {}. Could you please specify which one \
         you're interested in?",
        names.join(", ")
    )
}

fn role_plural(role: PlayerRole) -> &'static str {
    match role {
        PlayerRole::Batsman => "Batsmen",
        PlayerRole::Bowler => "Bowlers",
        PlayerRole::AllRounder => "All-Rounders",
    }
}

/// The headline stat shown for a role in list renderings.
fn role_stat(role: PlayerRole, p: &Player) -> String {
    match role {
        PlayerRole::Batsman => format!("Runs: {}", p.total_runs),
        PlayerRole::Bowler => format!("Wickets: {}", p.wickets),
        PlayerRole::AllRounder => format!(
            "Runs: {}, Wickets: {} (score {})",
            p.total_runs,
            p.wickets,
            all_rounder_score(p)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player {
            name: "Nuwan Perera".into(),
            university: "Colombo".into(),
            category: "Premium".into(),
            total_runs: 1200,
            balls_faced: 900,
            innings_played: 30,
            wickets: 2,
            overs_bowled: 12.5,
            runs_conceded: 80,
            base_price: 1_250_000,
        }
    }

    #[test]
    fn price_formatting() {
        assert_eq!(format_price(0), "₹0");
        assert_eq!(format_price(950), "₹950");
        assert_eq!(format_price(1_250_000), "₹1,250,000");
        assert_eq!(format_price(-42_000), "₹-42,000");
    }

    #[test]
    fn player_info_mentions_all_headline_fields() {
        let text = format_player_info(&player());
        assert!(text.contains("Player: Nuwan Perera"));
        assert!(text.contains("Role: Batsman"));
        assert!(text.contains("₹1,250,000"));
        assert!(text.contains("scored 1200 runs and taken 2 wickets"));
    }

    #[test]
    fn list_is_numbered() {
        let p = player();
        let list = format_player_list(&[&p], "Top players");
        assert!(list.starts_with("Top players:\n\n1. Nuwan Perera"));
    }

    #[test]
    fn team_fallback_groups_by_role() {
        let bat = player();
        let mut bowl = player();
        bowl.name = "Kusal Silva".into();
        bowl.total_runs = 10;
        bowl.wickets = 22;
        let team = vec![&bat, &bowl];
        let text = best_team_fallback(&team);
        let bat_pos = text.find("BATSMEN").unwrap();
        let bowl_pos = text.find("BOWLERS").unwrap();
        assert!(bat_pos < bowl_pos);
        assert!(text.contains("- Nuwan Perera"));
        assert!(text.contains("- Kusal Silva"));
    }

    #[test]
    fn disambiguation_lists_names() {
        let text = multiple_matches(&["A", "B"]);
        assert!(text.contains("A, B"));
    }
}

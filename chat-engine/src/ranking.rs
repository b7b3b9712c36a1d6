//! Player ranking: role sorts with the tiebreakers used in answers.

use player_store::{Player, PlayerRole};

/// Players of one role, in roster order.
pub fn by_role(players: &[Player], role: PlayerRole) -> Vec<&Player> {
    players.iter().filter(|p| p.role() == role).collect()
}

/// Batsmen by `(total_runs, base_price)` descending.
pub fn top_batsmen(players: &[Player]) -> Vec<&Player> {
    let mut out = by_role(players, PlayerRole::Batsman);
    out.sort_by(|a, b| (b.total_runs, b.base_price).cmp(&(a.total_runs, a.base_price)));
    out
}

/// Bowlers by `(wickets, base_price)` descending.
pub fn top_bowlers(players: &[Player]) -> Vec<&Player> {
    let mut out = by_role(players, PlayerRole::Bowler);
    out.sort_by(|a, b| (b.wickets, b.base_price).cmp(&(a.wickets, a.base_price)));
    out
}

/// Combined batting/bowling metric: runs plus ten per wicket.
pub fn all_rounder_score(p: &Player) -> i64 {
    p.total_runs + p.wickets * 10
}

/// All-rounders by `(all_rounder_score, base_price)` descending.
pub fn top_all_rounders(players: &[Player]) -> Vec<&Player> {
    let mut out = by_role(players, PlayerRole::AllRounder);
    out.sort_by(|a, b| {
        (all_rounder_score(b), b.base_price).cmp(&(all_rounder_score(a), a.base_price))
    });
    out
}

/// All players by `base_price` descending.
pub fn by_value(players: &[Player]) -> Vec<&Player> {
    let mut out: Vec<&Player> = players.iter().collect();
    out.sort_by(|a, b| b.base_price.cmp(&a.base_price));
    out
}

/// Players of one role by `base_price` descending (used for role lists).
pub fn role_by_value(players: &[Player], role: PlayerRole) -> Vec<&Player> {
    let mut out = by_role(players, role);
    out.sort_by(|a, b| b.base_price.cmp(&a.base_price));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str, runs: i64, wickets: i64, price: i64) -> Player {
        Player {
            name: name.into(),
            university: String::new(),
            category: String::new(),
            total_runs: runs,
            balls_faced: 0,
            innings_played: 0,
            wickets,
            overs_bowled: 0.0,
            runs_conceded: 0,
            base_price: price,
        }
    }

    fn roster() -> Vec<Player> {
        vec![
            p("Bat A", 800, 0, 100),  // batsman
            p("Bat B", 800, 1, 500),  // batsman, pricier
            p("Bat C", 400, 2, 900),  // batsman, fewer runs
            p("Bowl A", 10, 30, 300), // bowler
            p("Bowl B", 10, 30, 700), // bowler, pricier
            p("AR A", 200, 20, 200),  // all-rounder, score 400
            p("AR B", 300, 5, 100),   // all-rounder, score 350
        ]
    }

    #[test]
    fn batsmen_sorted_by_runs_then_price() {
        let r = roster();
        let names: Vec<&str> = top_batsmen(&r).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bat B", "Bat A", "Bat C"]);
    }

    #[test]
    fn bowlers_tiebreak_on_price() {
        let r = roster();
        let names: Vec<&str> = top_bowlers(&r).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bowl B", "Bowl A"]);
    }

    #[test]
    fn all_rounder_score_weights_wickets() {
        assert_eq!(all_rounder_score(&p("x", 200, 20, 0)), 400);
    }

    #[test]
    fn all_rounders_sorted_by_score() {
        let r = roster();
        let names: Vec<&str> = top_all_rounders(&r).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["AR A", "AR B"]);
    }

    #[test]
    fn value_ranking_ignores_roles() {
        let r = roster();
        let names: Vec<&str> = by_value(&r).iter().take(3).map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bat C", "Bowl B", "Bat B"]);
    }
}

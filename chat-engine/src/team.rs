//! Best-XI selection: greedy by player value with role balance.

use player_store::{Player, PlayerRole};

use crate::ranking::by_value;

/// Size of a cricket side.
const TEAM_SIZE: usize = 11;

/// Picks a balanced team of up to eleven players by descending value.
///
/// Fill order: up to 5 batsmen, all-rounders to 7 total, bowlers to 11,
/// then remaining all-rounders, then anyone left. No duplicates; fewer
/// than eleven players simply yields a shorter team.
pub fn pick_best_team(players: &[Player]) -> Vec<&Player> {
    let sorted = by_value(players);

    let batsmen: Vec<&Player> = sorted
        .iter()
        .copied()
        .filter(|p| p.role() == PlayerRole::Batsman)
        .collect();
    let bowlers: Vec<&Player> = sorted
        .iter()
        .copied()
        .filter(|p| p.role() == PlayerRole::Bowler)
        .collect();
    let all_rounders: Vec<&Player> = sorted
        .iter()
        .copied()
        .filter(|p| p.role() == PlayerRole::AllRounder)
        .collect();

    fn take<'a>(
        pool: &[&'a Player],
        team: &mut Vec<&'a Player>,
        picked: &mut std::collections::HashSet<&'a str>,
        cap: usize,
    ) {
        for p in pool {
            if team.len() >= cap {
                break;
            }
            if picked.insert(p.name.as_str()) {
                team.push(*p);
            }
        }
    }

    let mut team: Vec<&Player> = Vec::with_capacity(TEAM_SIZE);
    let mut picked: std::collections::HashSet<&str> = std::collections::HashSet::new();

    // Top batsmen first, prioritizing value.
    take(&batsmen, &mut team, &mut picked, 5);
    // All-rounders for balance.
    take(&all_rounders, &mut team, &mut picked, 7);
    // Then the bowling attack.
    take(&bowlers, &mut team, &mut picked, TEAM_SIZE);
    // Still short: more all-rounders, then anyone by value.
    take(&all_rounders, &mut team, &mut picked, TEAM_SIZE);
    take(&sorted, &mut team, &mut picked, TEAM_SIZE);

    team
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

    #[test]
    fn team_is_capped_at_eleven_without_duplicates() {
        let mut players = Vec::new();
        for i in 0..8i64 {
            players.push(p(&format!("Bat {i}"), 500, 0, 1000 - i));
        }
        for i in 0..8i64 {
            players.push(p(&format!("Bowl {i}"), 10, 20, 800 - i));
        }
        for i in 0..4i64 {
            players.push(p(&format!("AR {i}"), 200, 10, 900 - i));
        }

        let team = pick_best_team(&players);
        assert_eq!(team.len(), 11);

        let mut names: Vec<&str> = team.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 11);

        // 5 batsmen, 2 all-rounders, 4 bowlers.
        let count = |prefix: &str| team.iter().filter(|p| p.name.starts_with(prefix)).count();
        assert_eq!(count("Bat"), 5);
        assert_eq!(count("AR"), 2);
        assert_eq!(count("Bowl"), 4);
    }

    #[test]
    fn short_roster_yields_short_team() {
        let players = vec![p("A", 500, 0, 10), p("B", 10, 20, 20)];
        let team = pick_best_team(&players);
        assert_eq!(team.len(), 2);
    }

    #[test]
    fn shortfall_is_filled_with_remaining_players() {
        // Only 2 batsmen and 1 bowler; the rest must come from all-rounders.
        let mut players = vec![
            p("Bat 0", 500, 0, 100),
            p("Bat 1", 400, 0, 90),
            p("Bowl 0", 10, 20, 80),
        ];
        for i in 0..12i64 {
            players.push(p(&format!("AR {i}"), 200, 10, 70 - i));
        }
        let team = pick_best_team(&players);
        assert_eq!(team.len(), 11);
        let ar = team.iter().filter(|p| p.name.starts_with("AR")).count();
        assert_eq!(ar, 8);
    }
}

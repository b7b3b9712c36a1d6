//! Core data models used by the library.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Playing role derived from a player's statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerRole {
    Batsman,
    Bowler,
    AllRounder,
}

impl PlayerRole {
    /// Human-readable label, matching the wording used in answers.
    pub fn label(&self) -> &'static str {
        match self {
            PlayerRole::Batsman => "Batsman",
            PlayerRole::Bowler => "Bowler",
            PlayerRole::AllRounder => "All-Rounder",
        }
    }

    /// Parses a stored label back into a role (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "batsman" => Some(PlayerRole::Batsman),
            "bowler" => Some(PlayerRole::Bowler),
            "all-rounder" | "all rounder" | "allrounder" => Some(PlayerRole::AllRounder),
            _ => None,
        }
    }
}

/// Canonical roster entry: one cricket player with tournament statistics.
///
/// This is both the JSONL row shape of the roster file and the payload
/// stored with every vector point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub total_runs: i64,
    #[serde(default)]
    pub balls_faced: i64,
    #[serde(default)]
    pub innings_played: i64,
    #[serde(default)]
    pub wickets: i64,
    #[serde(default)]
    pub overs_bowled: f64,
    #[serde(default)]
    pub runs_conceded: i64,
    #[serde(default)]
    pub base_price: i64,
}

impl Player {
    /// Classifies the player's role from raw stats.
    ///
    /// Heavy wicket-takers with little batting are bowlers, heavy scorers
    /// with little bowling are batsmen, everyone else is an all-rounder.
    pub fn role(&self) -> PlayerRole {
        if self.wickets > 5 && self.total_runs < 50 {
            PlayerRole::Bowler
        } else if self.total_runs > 100 && self.wickets < 3 {
            PlayerRole::Batsman
        } else {
            PlayerRole::AllRounder
        }
    }

    /// Compact plain-text profile used as the embedding document.
    pub fn profile_document(&self) -> String {
        format!(
            "Player: {}\nUniversity: {}\nCategory: {}\nRole: {}\nTotal Runs: {}\nBalls Faced: {}\nInnings Played: {}\nWickets: {}\nOvers Bowled: {}\nRuns Conceded: {}\nBase Price: {}",
            self.name,
            self.university,
            self.category,
            self.role().label(),
            self.total_runs,
            self.balls_faced,
            self.innings_played,
            self.wickets,
            self.overs_bowled,
            self.runs_conceded,
            self.base_price,
        )
    }

    /// Rebuilds a player from a vector point payload.
    ///
    /// Lenient: missing fields default, numbers stored as strings are
    /// re-parsed. Returns `None` when no name is present.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let obj = payload.as_object()?;
        let name = obj.get("name")?.as_str()?.trim();
        if name.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            university: str_field(obj, "university"),
            category: str_field(obj, "category"),
            total_runs: int_field(obj, "total_runs"),
            balls_faced: int_field(obj, "balls_faced"),
            innings_played: int_field(obj, "innings_played"),
            wickets: int_field(obj, "wickets"),
            overs_bowled: float_field(obj, "overs_bowled"),
            runs_conceded: int_field(obj, "runs_conceded"),
            base_price: int_field(obj, "base_price"),
        })
    }
}

/// Query parameters for semantic retrieval.
pub struct PlayerQuery<'a> {
    pub text: &'a str,
    pub top_k: u64,
    pub filter: Option<PlayerFilter>,
}

/// A single retrieval hit with score, reconstructed player and raw payload.
#[derive(Clone, Debug)]
pub struct PlayerHit {
    pub score: f32,
    /// Parsed player, when the payload carried a usable `name`.
    pub player: Option<Player>,
    /// Profile text the vector was computed from.
    pub document: String,
    pub raw_payload: Value,
}

/// Simple equality filter over payload fields (e.g. `role = "Bowler"`).
#[derive(Clone, Debug)]
pub struct PlayerFilter {
    pub equals: Vec<(String, Value)>,
}

/// Lenient integer conversion: numbers, floats and numeric strings all
/// resolve; anything else is zero.
pub fn lenient_i64(v: &Value) -> i64 {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or_else(|_| {
            s.trim().parse::<f64>().map(|f| f as i64).unwrap_or(0)
        }),
        _ => 0,
    }
}

/// Lenient float conversion, mirroring [`lenient_i64`].
pub fn lenient_f64(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn str_field(obj: &serde_json::Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

fn int_field(obj: &serde_json::Map<String, Value>, key: &str) -> i64 {
    obj.get(key).map(lenient_i64).unwrap_or(0)
}

fn float_field(obj: &serde_json::Map<String, Value>, key: &str) -> f64 {
    obj.get(key).map(lenient_f64).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn player(runs: i64, wickets: i64) -> Player {
        Player {
            name: "Test".into(),
            university: String::new(),
            category: String::new(),
            total_runs: runs,
            balls_faced: 0,
            innings_played: 0,
            wickets,
            overs_bowled: 0.0,
            runs_conceded: 0,
            base_price: 0,
        }
    }

    #[test]
    fn classifies_bowler() {
        assert_eq!(player(10, 20).role(), PlayerRole::Bowler);
    }

    #[test]
    fn classifies_batsman() {
        assert_eq!(player(500, 0).role(), PlayerRole::Batsman);
    }

    #[test]
    fn classifies_all_rounder() {
        // Heavy in both departments.
        assert_eq!(player(300, 25).role(), PlayerRole::AllRounder);
        // Too light for either specialist bucket.
        assert_eq!(player(60, 2).role(), PlayerRole::AllRounder);
    }

    #[test]
    fn role_labels_round_trip() {
        for role in [PlayerRole::Batsman, PlayerRole::Bowler, PlayerRole::AllRounder] {
            assert_eq!(PlayerRole::parse(role.label()), Some(role));
        }
        assert_eq!(PlayerRole::parse("all rounder"), Some(PlayerRole::AllRounder));
        assert_eq!(PlayerRole::parse("wicketkeeper"), None);
    }

    #[test]
    fn payload_round_trip() {
        let p = Player {
            name: "Nuwan Perera".into(),
            university: "Colombo".into(),
            category: "Premium".into(),
            total_runs: 1200,
            balls_faced: 900,
            innings_played: 30,
            wickets: 2,
            overs_bowled: 12.5,
            runs_conceded: 80,
            base_price: 900_000,
        };
        let payload = serde_json::to_value(&p).unwrap();
        assert_eq!(Player::from_payload(&payload), Some(p));
    }

    #[test]
    fn payload_tolerates_string_numbers() {
        let payload = json!({
            "name": "Kusal Silva",
            "total_runs": "321",
            "overs_bowled": "10.5",
        });
        let p = Player::from_payload(&payload).unwrap();
        assert_eq!(p.total_runs, 321);
        assert_eq!(p.overs_bowled, 10.5);
        assert_eq!(p.wickets, 0);
    }

    #[test]
    fn payload_without_name_is_rejected() {
        assert_eq!(Player::from_payload(&json!({"total_runs": 10})), None);
    }
}

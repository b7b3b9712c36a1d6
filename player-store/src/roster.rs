//! Roster dataset: JSONL read/write and update-payload application.
//!
//! The roster file is the source of truth for the chatbot; the vector
//! collection is rebuilt from it after every change. One JSON object per
//! line, shaped like [`Player`]. Reading is tolerant: empty lines are
//! skipped and malformed lines are logged but not fatal.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::StoreError;
use crate::record::{Player, lenient_f64, lenient_i64};

/// In-memory roster with file persistence.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    players: Vec<Player>,
}

/// What a roster update actually did, for logging and API responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// `n` players inserted or updated.
    Upserted(usize),
    /// One player removed by name.
    Deleted,
}

impl Roster {
    /// Builds a roster from an explicit player list.
    pub fn from_players(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// Loads the roster from a JSONL file.
    ///
    /// Tolerant reader: empty lines skipped, malformed lines logged and
    /// skipped (a single bad row must not take the chatbot down).
    ///
    /// # Errors
    /// [`StoreError::Io`] if the file cannot be opened or read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        info!("Reading roster JSONL: {:?}", path.as_ref());

        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);

        let mut players = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<Player>(&line) {
                Ok(p) => players.push(p),
                Err(e) => {
                    warn!("Skipping malformed roster row on line {}: {}", i + 1, e);
                }
            }
        }

        debug!("Loaded {} players", players.len());
        Ok(Self { players })
    }

    /// Parses a roster from in-memory JSONL text (same tolerance as [`Roster::load`]).
    pub fn from_jsonl_str(text: &str) -> Self {
        let mut players = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Player>(line) {
                Ok(p) => players.push(p),
                Err(e) => warn!("Skipping malformed roster row on line {}: {}", i + 1, e),
            }
        }
        Self { players }
    }

    /// Writes the roster back as JSONL, one player per line.
    ///
    /// # Errors
    /// [`StoreError::Io`] on filesystem failures, [`StoreError::Parse`] on
    /// serialization failures.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = File::create(path.as_ref())?;
        for p in &self.players {
            let line = serde_json::to_string(p)?;
            file.write_all(line.as_bytes())?;
            file.write_all(b"\n")?;
        }

        info!(
            "Wrote {} players to {:?}",
            self.players.len(),
            path.as_ref()
        );
        Ok(())
    }

    /// All players, in file order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Case-insensitive substring search over player names.
    pub fn find_by_name(&self, name_query: &str) -> Vec<&Player> {
        let q = name_query.trim().to_lowercase();
        if q.is_empty() {
            return Vec::new();
        }
        self.players
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&q))
            .collect()
    }

    /// Inserts a player, or replaces the stats of an existing player with
    /// the same name (exact match, as delivered by the upstream service).
    pub fn upsert(&mut self, player: Player) {
        match self.players.iter_mut().find(|p| p.name == player.name) {
            Some(existing) => {
                debug!("Updating player {} in roster", player.name);
                // University is roster-local; updates from upstream never carry it.
                let university = std::mem::take(&mut existing.university);
                *existing = player;
                if existing.university.is_empty() {
                    existing.university = university;
                }
            }
            None => {
                debug!("Adding new player {} to roster", player.name);
                self.players.push(player);
            }
        }
    }

    /// Removes a player by exact name. Returns whether anything was removed.
    pub fn delete(&mut self, name: &str) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.name != name);
        before != self.players.len()
    }

    /// Applies an update payload from the upstream roster service.
    ///
    /// Three shapes are accepted:
    /// - `{"deletePlayer": true, "name": "<player>"}`
    /// - `{"players": [ <entry>, … ]}`
    /// - a single `<entry>` object
    ///
    /// # Errors
    /// [`StoreError::InvalidUpdate`] when the payload cannot be interpreted
    /// (not an object, missing `name`, empty batch).
    pub fn apply_update(&mut self, payload: &Value) -> Result<UpdateOutcome, StoreError> {
        let obj = payload
            .as_object()
            .ok_or_else(|| StoreError::InvalidUpdate("payload must be a JSON object".into()))?;

        if obj
            .get("deletePlayer")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            let name = obj
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| {
                    StoreError::InvalidUpdate("deletion requested but no name provided".into())
                })?;

            if self.delete(name) {
                info!("Deleted player {} from roster", name);
            } else {
                warn!("Deletion requested for unknown player {}", name);
            }
            return Ok(UpdateOutcome::Deleted);
        }

        if let Some(batch) = obj.get("players") {
            let entries = batch
                .as_array()
                .ok_or_else(|| StoreError::InvalidUpdate("`players` must be an array".into()))?;
            if entries.is_empty() {
                return Err(StoreError::InvalidUpdate("`players` is empty".into()));
            }
            let mut n = 0usize;
            for entry in entries {
                self.upsert(player_from_update(entry)?);
                n += 1;
            }
            return Ok(UpdateOutcome::Upserted(n));
        }

        self.upsert(player_from_update(payload)?);
        Ok(UpdateOutcome::Upserted(1))
    }
}

/// Builds a [`Player`] from one upstream update entry.
///
/// Entry shape: `name`, `category`, `basePrice` at the top level, stats
/// nested under `tournamentData`. Missing numbers default to zero.
fn player_from_update(entry: &Value) -> Result<Player, StoreError> {
    let obj = entry
        .as_object()
        .ok_or_else(|| StoreError::InvalidUpdate("player entry must be a JSON object".into()))?;

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| StoreError::InvalidUpdate("player entry has no name".into()))?;

    let stats = obj.get("tournamentData").and_then(Value::as_object);
    let stat = |key: &str| -> i64 {
        stats
            .and_then(|m| m.get(key))
            .map(lenient_i64)
            .unwrap_or(0)
    };

    Ok(Player {
        name: name.to_string(),
        university: String::new(),
        category: obj
            .get("category")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        total_runs: stat("runs"),
        balls_faced: stat("ballsFaced"),
        innings_played: stat("inningsPlayed"),
        wickets: stat("wickets"),
        overs_bowled: stats
            .and_then(|m| m.get("oversBowled"))
            .map(lenient_f64)
            .unwrap_or(0.0),
        runs_conceded: stat("runsConceded"),
        base_price: obj.get("basePrice").map(lenient_i64).unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Roster {
        Roster::from_players(vec![
            Player {
                name: "Nuwan Perera".into(),
                university: "Colombo".into(),
                category: "Premium".into(),
                total_runs: 1200,
                balls_faced: 900,
                innings_played: 30,
                wickets: 2,
                overs_bowled: 10.0,
                runs_conceded: 70,
                base_price: 900_000,
            },
            Player {
                name: "Kusal Silva".into(),
                university: "Kandy".into(),
                category: "Standard".into(),
                total_runs: 30,
                balls_faced: 60,
                innings_played: 12,
                wickets: 24,
                overs_bowled: 88.0,
                runs_conceded: 410,
                base_price: 600_000,
            },
        ])
    }

    #[test]
    fn jsonl_round_trip_via_temp_file() {
        let path = std::env::temp_dir().join(format!("roster_rt_{}.jsonl", std::process::id()));
        let roster = sample();
        roster.save(&path).unwrap();
        let loaded = Roster::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.players(), roster.players());
    }

    #[test]
    fn tolerant_parsing_skips_bad_rows() {
        let text = "\n{\"name\":\"Nuwan Perera\",\"total_runs\":10}\nnot json\n";
        let roster = Roster::from_jsonl_str(text);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.players()[0].name, "Nuwan Perera");
    }

    #[test]
    fn find_by_name_is_case_insensitive_substring() {
        let roster = sample();
        assert_eq!(roster.find_by_name("nuwan").len(), 1);
        assert_eq!(roster.find_by_name("SILVA").len(), 1);
        assert!(roster.find_by_name("unknown").is_empty());
        assert!(roster.find_by_name("  ").is_empty());
    }

    #[test]
    fn single_upsert_from_payload() {
        let mut roster = sample();
        let outcome = roster
            .apply_update(&json!({
                "name": "Asela Fernando",
                "category": "Standard",
                "basePrice": 450000,
                "tournamentData": {"runs": 210, "wickets": 8, "inningsPlayed": 9}
            }))
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Upserted(1));
        assert_eq!(roster.len(), 3);
        let p = &roster.players()[2];
        assert_eq!(p.total_runs, 210);
        assert_eq!(p.wickets, 8);
        assert_eq!(p.base_price, 450_000);
    }

    #[test]
    fn upsert_updates_existing_and_keeps_university() {
        let mut roster = sample();
        roster
            .apply_update(&json!({
                "name": "Nuwan Perera",
                "category": "Premium",
                "basePrice": 1000000,
                "tournamentData": {"runs": 1400}
            }))
            .unwrap();
        assert_eq!(roster.len(), 2);
        let p = &roster.players()[0];
        assert_eq!(p.total_runs, 1400);
        assert_eq!(p.base_price, 1_000_000);
        assert_eq!(p.university, "Colombo");
    }

    #[test]
    fn batch_upsert() {
        let mut roster = Roster::default();
        let outcome = roster
            .apply_update(&json!({"players": [
                {"name": "A", "tournamentData": {"runs": 1}},
                {"name": "B", "tournamentData": {"wickets": 9}},
            ]}))
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Upserted(2));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn delete_player() {
        let mut roster = sample();
        let outcome = roster
            .apply_update(&json!({"deletePlayer": true, "name": "Kusal Silva"}))
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Deleted);
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn delete_without_name_is_rejected() {
        let mut roster = sample();
        assert!(roster.apply_update(&json!({"deletePlayer": true})).is_err());
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn nameless_entry_is_rejected() {
        let mut roster = Roster::default();
        assert!(roster.apply_update(&json!({"basePrice": 100})).is_err());
    }

    #[test]
    fn lenient_numbers_in_updates() {
        let mut roster = Roster::default();
        roster
            .apply_update(&json!({
                "name": "C",
                "basePrice": "750000",
                "tournamentData": {"runs": "42", "oversBowled": "12.5"}
            }))
            .unwrap();
        let p = &roster.players()[0];
        assert_eq!(p.base_price, 750_000);
        assert_eq!(p.total_runs, 42);
        assert_eq!(p.overs_bowled, 12.5);
    }
}

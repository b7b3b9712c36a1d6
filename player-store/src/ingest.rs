//! Ingestion pipeline: roster players → profile documents → embeddings →
//! upsert into Qdrant.
//!
//! Every player becomes one point: deterministic UUIDv5 id from the name,
//! vector from the embedded profile document, payload carrying all player
//! fields (including the derived role) plus the profile text itself.

use crate::config::{StoreConfig, VectorSpace};
use crate::embed::EmbeddingsProvider;
use crate::embed_pool::embed_texts;
use crate::errors::StoreError;
use crate::qdrant_facade::QdrantFacade;
use crate::record::Player;

use indicatif::{ProgressBar, ProgressStyle};
use qdrant_client::qdrant::{PointId, PointStruct, Value as QValue, Vector, Vectors, value, vectors};
use services::uuid::stable_uuid;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Embeds and upserts the given players into the collection.
///
/// Duplicate names are collapsed (last write wins) so the deterministic
/// point ids stay unique within one batch.
///
/// # Errors
/// Returns embedding failures, vector size mismatches, or Qdrant errors.
pub async fn ingest_players(
    cfg: &StoreConfig,
    players: &[Player],
    provider: &(dyn EmbeddingsProvider + Send + Sync),
    client: &QdrantFacade,
) -> Result<u64, StoreError> {
    info!("Ingesting {} players", players.len());

    let players = dedup_by_name(players);
    if players.is_empty() {
        warn!("No players to ingest");
        return Ok(0);
    }

    let docs: Vec<String> = players.iter().map(|p| p.profile_document()).collect();
    let conc = cfg.embedding_concurrency.unwrap_or(4);
    let vectors = embed_texts(&docs, provider, cfg.embedding_dim, conc).await?;

    let vector_size = cfg
        .embedding_dim
        .or_else(|| vectors.first().map(Vec::len))
        .ok_or_else(|| StoreError::Config("cannot determine vector size".into()))?;
    debug!("Vector size determined: {}", vector_size);

    client
        .ensure_collection(&VectorSpace {
            size: vector_size,
            distance: cfg.distance,
        })
        .await?;

    // Progress bar for batch uploads
    let batch_size = cfg.upsert_batch.max(1);
    let total_chunks = players.len().div_ceil(batch_size);
    let pb = ProgressBar::new(total_chunks as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-"),
    );

    let mut total: u64 = 0;
    for (chunk, vecs) in players.chunks(batch_size).zip(vectors.chunks(batch_size)) {
        let points = build_points(chunk, vecs, vector_size)?;
        total += client.upsert_points(points).await?;
        pb.inc(1);
    }

    pb.finish_with_message("Ingestion complete");
    info!("Ingested {} players total", total);

    Ok(total)
}

/// Builds Qdrant points for a batch of players with matching vectors.
fn build_points(
    chunk: &[Player],
    vectors_chunk: &[Vec<f32>],
    vector_size: usize,
) -> Result<Vec<PointStruct>, StoreError> {
    let mut pts = Vec::with_capacity(chunk.len());

    for (player, vector) in chunk.iter().zip(vectors_chunk.iter()) {
        if vector.len() != vector_size {
            return Err(StoreError::VectorSizeMismatch {
                got: vector.len(),
                want: vector_size,
            });
        }

        let mut payload: HashMap<String, QValue> = HashMap::new();
        payload.insert("name".into(), qstring(&player.name));
        payload.insert("university".into(), qstring(&player.university));
        payload.insert("category".into(), qstring(&player.category));
        payload.insert("role".into(), qstring(player.role().label()));
        payload.insert("total_runs".into(), qint(player.total_runs));
        payload.insert("balls_faced".into(), qint(player.balls_faced));
        payload.insert("innings_played".into(), qint(player.innings_played));
        payload.insert("wickets".into(), qint(player.wickets));
        payload.insert("overs_bowled".into(), qdouble(player.overs_bowled));
        payload.insert("runs_conceded".into(), qint(player.runs_conceded));
        payload.insert("base_price".into(), qint(player.base_price));
        payload.insert("text".into(), qstring(&player.profile_document()));

        // Stable point id: re-ingesting a player overwrites its point.
        let pid: PointId = stable_uuid(&player.name).to_string().into();

        let vectors = Vectors {
            vectors_options: Some(vectors::VectorsOptions::Vector(Vector {
                data: vector.clone(),
                indices: None,
                vectors_count: None,
                vector: None,
            })),
        };

        pts.push(PointStruct {
            id: Some(pid),
            payload,
            vectors: Some(vectors),
            ..Default::default()
        });
    }

    Ok(pts)
}

/// Collapses duplicate player names, keeping the last occurrence.
fn dedup_by_name(players: &[Player]) -> Vec<Player> {
    let mut seen = std::collections::HashSet::new();
    let mut out: Vec<Player> = Vec::with_capacity(players.len());
    for p in players.iter().rev() {
        if seen.insert(p.name.clone()) {
            out.push(p.clone());
        }
    }
    out.reverse();
    out
}

/// Wraps a string into Qdrant `Value`.
fn qstring(s: &str) -> QValue {
    QValue {
        kind: Some(value::Kind::StringValue(s.to_string())),
    }
}

/// Wraps an integer into Qdrant `Value`.
fn qint(i: i64) -> QValue {
    QValue {
        kind: Some(value::Kind::IntegerValue(i)),
    }
}

/// Wraps a float into Qdrant `Value`.
fn qdouble(f: f64) -> QValue {
    QValue {
        kind: Some(value::Kind::DoubleValue(f)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdrant_client::qdrant::point_id::PointIdOptions;

    fn player(name: &str) -> Player {
        Player {
            name: name.into(),
            university: "Colombo".into(),
            category: "Premium".into(),
            total_runs: 200,
            balls_faced: 150,
            innings_played: 10,
            wickets: 1,
            overs_bowled: 4.0,
            runs_conceded: 30,
            base_price: 500_000,
        }
    }

    #[test]
    fn builds_one_point_per_player() {
        let players = vec![player("A"), player("B")];
        let vectors = vec![vec![0.1, 0.2], vec![0.3, 0.4]];
        let pts = build_points(&players, &vectors, 2).unwrap();
        assert_eq!(pts.len(), 2);
        let payload = &pts[0].payload;
        assert!(payload.contains_key("role"));
        assert!(payload.contains_key("text"));
    }

    #[test]
    fn vector_size_is_enforced() {
        let players = vec![player("A")];
        let vectors = vec![vec![0.1, 0.2, 0.3]];
        assert!(build_points(&players, &vectors, 2).is_err());
    }

    #[test]
    fn point_ids_are_stable_across_ingests() {
        let players = vec![player("A")];
        let vectors = vec![vec![0.0, 0.0]];
        let first = build_points(&players, &vectors, 2).unwrap();
        let second = build_points(&players, &vectors, 2).unwrap();
        let id_of = |p: &PointStruct| match p.id.clone().and_then(|i| i.point_id_options) {
            Some(PointIdOptions::Uuid(u)) => u,
            _ => panic!("expected uuid point id"),
        };
        assert_eq!(id_of(&first[0]), id_of(&second[0]));
    }

    #[test]
    fn dedup_keeps_last_occurrence() {
        let mut a = player("A");
        a.total_runs = 1;
        let mut a2 = player("A");
        a2.total_runs = 2;
        let out = dedup_by_name(&[a, a2, player("B")]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].total_runs, 2);
    }
}

#![allow(dead_code)]

//! Ranking cache: single-key get/set-with-TTL/invalidate.
//!
//! The cache is an explicit dependency injected into `MatchRanker` at
//! construction. Cache errors are never surfaced to callers — a broken cache
//! degrades to recomputing the ranking, with a `warn` for observability.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::warn;
use uuid::Uuid;

use crate::matching::ranker::MatchResult;

fn cache_key(job_id: Uuid) -> String {
    format!("job_matches:{job_id}")
}

/// Storage contract for cached rankings. Entries move through
/// {absent, fresh, expired}; expiry is checked on read, invalidation is
/// explicit (job/profile mutation events) or by TTL.
#[async_trait]
pub trait RankingCache: Send + Sync {
    async fn get(&self, job_id: Uuid) -> Option<Vec<MatchResult>>;
    async fn set(&self, job_id: Uuid, results: &[MatchResult], ttl: Duration);
    async fn invalidate(&self, job_id: Uuid);
}

/// Redis-backed cache. Values are JSON-serialized ranked result sequences
/// stored with `SET ... EX`.
pub struct RedisRankingCache {
    client: redis::Client,
}

impl RedisRankingCache {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    async fn connection(&self) -> Option<redis::aio::MultiplexedConnection> {
        match self.client.get_multiplexed_async_connection().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                warn!("Ranking cache unavailable: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl RankingCache for RedisRankingCache {
    async fn get(&self, job_id: Uuid) -> Option<Vec<MatchResult>> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = match conn.get(cache_key(job_id)).await {
            Ok(v) => v,
            Err(e) => {
                warn!("Ranking cache read failed for job {job_id}: {e}");
                return None;
            }
        };
        // A corrupt entry is treated as a miss and will be overwritten.
        raw.and_then(|s| serde_json::from_str(&s).ok())
    }

    async fn set(&self, job_id: Uuid, results: &[MatchResult], ttl: Duration) {
        let Some(mut conn) = self.connection().await else {
            return;
        };
        let payload = match serde_json::to_string(results) {
            Ok(p) => p,
            Err(e) => {
                warn!("Failed to serialize ranking for job {job_id}: {e}");
                return;
            }
        };
        if let Err(e) = conn
            .set_ex::<_, _, ()>(cache_key(job_id), payload, ttl.as_secs())
            .await
        {
            warn!("Ranking cache write failed for job {job_id}: {e}");
        }
    }

    async fn invalidate(&self, job_id: Uuid) {
        let Some(mut conn) = self.connection().await else {
            return;
        };
        if let Err(e) = conn.del::<_, ()>(cache_key(job_id)).await {
            warn!("Ranking cache invalidation failed for job {job_id}: {e}");
        }
    }
}

/// In-process cache with the same semantics. Used in tests; also a valid
/// single-instance deployment fallback.
#[derive(Default)]
pub struct MemoryRankingCache {
    entries: Mutex<HashMap<Uuid, (Instant, Vec<MatchResult>)>>,
}

impl MemoryRankingCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RankingCache for MemoryRankingCache {
    async fn get(&self, job_id: Uuid) -> Option<Vec<MatchResult>> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        match entries.get(&job_id) {
            Some((expires_at, results)) if *expires_at > Instant::now() => Some(results.clone()),
            Some(_) => {
                entries.remove(&job_id);
                None
            }
            None => None,
        }
    }

    async fn set(&self, job_id: Uuid, results: &[MatchResult], ttl: Duration) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(job_id, (Instant::now() + ttl, results.to_vec()));
    }

    async fn invalidate(&self, job_id: Uuid) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.remove(&job_id);
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pollpulse_application::ports::MetricStore;
use pollpulse_domain::{
    ActivityItem, DomainError, PollStats, PopularPoll, RawAggregate, TrendScope,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{error, instrument};

type PollRow = (i64, String, i64, String);
type StatsRow = (i64, String, i64, String, i64);
type PopularRow = (i64, String, i64, String, i64, i64);

pub struct SqliteMetricStore {
    pool: SqlitePool,
}

/// Timestamps are stored as RFC 3339 UTC text, which also compares
/// correctly as strings in SQL.
fn fmt_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

fn parse_ts(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DomainError::DatabaseError(format!("bad timestamp '{raw}': {e}")))
}

impl SqliteMetricStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn poll_exists(&self, poll_id: i64) -> Result<bool, DomainError> {
        let row = sqlx::query_as::<_, (i64,)>("SELECT id FROM polls WHERE id = ?")
            .bind(poll_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, poll_id, "Failed to check poll existence");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(row.is_some())
    }
}

#[async_trait]
impl MetricStore for SqliteMetricStore {
    #[instrument(skip(self))]
    async fn fetch_aggregate(&self, poll_id: i64) -> Result<RawAggregate, DomainError> {
        let poll = sqlx::query_as::<_, PollRow>(
            "SELECT id, question, view_count, created_at FROM polls WHERE id = ?",
        )
        .bind(poll_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, poll_id, "Failed to query poll");
            DomainError::DatabaseError(e.to_string())
        })?
        .ok_or(DomainError::PollNotFound(poll_id))?;

        // Zero-vote options must appear in the distribution, hence the
        // LEFT JOIN.
        let option_rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT o.label, COUNT(v.id) as vote_count
             FROM options o
             LEFT JOIN votes v ON v.option_id = o.id
             WHERE o.poll_id = ?
             GROUP BY o.id, o.label
             ORDER BY o.position ASC, o.id ASC",
        )
        .bind(poll_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, poll_id, "Failed to query vote counts");
            DomainError::DatabaseError(e.to_string())
        })?;

        let ts_rows = sqlx::query_as::<_, (String,)>(
            "SELECT v.created_at
             FROM votes v
             JOIN options o ON v.option_id = o.id
             WHERE o.poll_id = ?
             ORDER BY v.created_at ASC",
        )
        .bind(poll_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, poll_id, "Failed to query vote timestamps");
            DomainError::DatabaseError(e.to_string())
        })?;

        let (_, question, view_count, created_at) = poll;

        let vote_counts_by_option: Vec<(Arc<str>, u64)> = option_rows
            .into_iter()
            .map(|(label, count)| (Arc::from(label.as_str()), count.max(0) as u64))
            .collect();

        let total_votes = vote_counts_by_option.iter().map(|(_, c)| c).sum();

        let vote_timestamps = ts_rows
            .iter()
            .map(|(raw,)| parse_ts(raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RawAggregate {
            poll_id,
            question: Arc::from(question.as_str()),
            total_votes,
            view_count: view_count.max(0) as u64,
            vote_counts_by_option,
            created_at: parse_ts(&created_at)?,
            vote_timestamps,
        })
    }

    #[instrument(skip(self))]
    async fn fetch_poll_stats(&self, user_id: i64) -> Result<Vec<PollStats>, DomainError> {
        let rows = sqlx::query_as::<_, StatsRow>(
            "SELECT p.id, p.question, p.view_count, p.created_at, COUNT(v.id) as vote_count
             FROM polls p
             LEFT JOIN options o ON o.poll_id = p.id
             LEFT JOIN votes v ON v.option_id = o.id
             WHERE p.owner_id = ?
             GROUP BY p.id
             ORDER BY p.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, user_id, "Failed to query poll stats");
            DomainError::DatabaseError(e.to_string())
        })?;

        rows.into_iter()
            .map(|(poll_id, question, view_count, created_at, votes)| {
                Ok(PollStats {
                    poll_id,
                    question: Arc::from(question.as_str()),
                    total_votes: votes.max(0) as u64,
                    view_count: view_count.max(0) as u64,
                    created_at: parse_ts(&created_at)?,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn count_polls_created_since(
        &self,
        user_id: i64,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let (count,) = sqlx::query_as::<_, (i64,)>(
            "SELECT COUNT(*) FROM polls WHERE owner_id = ? AND created_at >= ?",
        )
        .bind(user_id)
        .bind(fmt_ts(cutoff))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, user_id, "Failed to count recent polls");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(count.max(0) as u64)
    }

    #[instrument(skip(self))]
    async fn fetch_recent_activity(
        &self,
        user_id: i64,
        limit: u32,
    ) -> Result<Vec<ActivityItem>, DomainError> {
        let rows = sqlx::query_as::<_, (i64, String, String)>(
            "SELECT p.id, p.question, v.created_at
             FROM votes v
             JOIN options o ON v.option_id = o.id
             JOIN polls p ON o.poll_id = p.id
             WHERE p.owner_id = ?
             ORDER BY v.created_at DESC, v.id DESC
             LIMIT ?",
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, user_id, "Failed to query recent activity");
            DomainError::DatabaseError(e.to_string())
        })?;

        rows.into_iter()
            .map(|(poll_id, question, created_at)| {
                Ok(ActivityItem {
                    poll_id,
                    poll_question: Arc::from(question.as_str()),
                    timestamp: parse_ts(&created_at)?,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn fetch_vote_timestamps(
        &self,
        scope: TrendScope,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, DomainError> {
        let rows = match scope {
            TrendScope::Poll(poll_id) => {
                if !self.poll_exists(poll_id).await? {
                    return Err(DomainError::PollNotFound(poll_id));
                }

                sqlx::query_as::<_, (String,)>(
                    "SELECT v.created_at
                     FROM votes v
                     JOIN options o ON v.option_id = o.id
                     WHERE o.poll_id = ? AND v.created_at >= ?
                     ORDER BY v.created_at ASC",
                )
                .bind(poll_id)
                .bind(fmt_ts(since))
                .fetch_all(&self.pool)
                .await
            }
            TrendScope::Global => {
                sqlx::query_as::<_, (String,)>(
                    "SELECT created_at FROM votes WHERE created_at >= ? ORDER BY created_at ASC",
                )
                .bind(fmt_ts(since))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| {
            error!(error = %e, scope = %scope, "Failed to query vote timestamps");
            DomainError::DatabaseError(e.to_string())
        })?;

        rows.iter().map(|(raw,)| parse_ts(raw)).collect()
    }

    #[instrument(skip(self))]
    async fn fetch_popular(
        &self,
        limit: u32,
        cutoff: Option<DateTime<Utc>>,
    ) -> Result<Vec<PopularPoll>, DomainError> {
        let query = match cutoff {
            Some(cutoff) => sqlx::query_as::<_, PopularRow>(
                "SELECT p.id, p.question, p.view_count, p.created_at,
                        COUNT(v.id) as vote_count,
                        (SELECT COUNT(*) FROM options oo WHERE oo.poll_id = p.id) as option_count
                 FROM polls p
                 JOIN options o ON o.poll_id = p.id
                 JOIN votes v ON v.option_id = o.id
                 WHERE v.created_at >= ?
                 GROUP BY p.id
                 ORDER BY vote_count DESC, p.id ASC
                 LIMIT ?",
            )
            .bind(fmt_ts(cutoff))
            .bind(limit as i64),
            None => sqlx::query_as::<_, PopularRow>(
                "SELECT p.id, p.question, p.view_count, p.created_at,
                        COUNT(v.id) as vote_count,
                        (SELECT COUNT(*) FROM options oo WHERE oo.poll_id = p.id) as option_count
                 FROM polls p
                 JOIN options o ON o.poll_id = p.id
                 JOIN votes v ON v.option_id = o.id
                 GROUP BY p.id
                 ORDER BY vote_count DESC, p.id ASC
                 LIMIT ?",
            )
            .bind(limit as i64),
        };

        let rows = query.fetch_all(&self.pool).await.map_err(|e| {
            error!(error = %e, "Failed to query popular polls");
            DomainError::DatabaseError(e.to_string())
        })?;

        rows.into_iter()
            .map(
                |(poll_id, question, view_count, created_at, votes, options)| {
                    let vote_count = votes.max(0) as u64;
                    let view_count = view_count.max(0) as u64;
                    let engagement_rate = if view_count > 0 {
                        (vote_count as f64 / view_count as f64 * 100.0).min(100.0)
                    } else {
                        0.0
                    };

                    Ok(PopularPoll {
                        poll_id,
                        question: Arc::from(question.as_str()),
                        vote_count,
                        engagement_rate,
                        created_at: parse_ts(&created_at)?,
                        option_count: options.max(0) as u64,
                    })
                },
            )
            .collect()
    }
}

use chrono::Utc;

use sqlx::{Executor, SqliteExecutor};

use uuid::Uuid;

use crate::domain::SubmissionStatus;
use crate::model::{NewSubmission, RequestMetadata, Submission, SubmissionFilter, SubmissionStats};

/// Submission repository trait, must be implemented for each database used.
/// NOTE: Intended to facilitate easier testing/mocking
/// TODO: Swap async-trait for std async traits when those become stable
/// https://github.com/orgs/rust-lang/projects/28/views/2?pane=issue&itemId=21990165
#[async_trait::async_trait]
pub trait SubmissionRepo {
    type DB: sqlx::Database;

    /// Store an accepted submission and return its generated id
    async fn insert<'con>(
        executor: impl Executor<'con, Database = Self::DB>,
        new_submission: &NewSubmission,
        metadata: &RequestMetadata,
    ) -> sqlx::Result<String>;

    /// Fetch a single submission by id
    async fn fetch_by_id<'con>(
        executor: impl Executor<'con, Database = Self::DB>,
        id: &str,
    ) -> sqlx::Result<Option<Submission>>;

    /// Fetch all submissions matching the filter, newest first
    async fn fetch_all<'con>(
        executor: impl Executor<'con, Database = Self::DB>,
        filter: &SubmissionFilter,
    ) -> sqlx::Result<Vec<Submission>>;

    /// Transition the status of a submission.
    /// Returns false when no record exists for the id.
    async fn update_status<'con>(
        executor: impl Executor<'con, Database = Self::DB>,
        id: &str,
        status: SubmissionStatus,
    ) -> sqlx::Result<bool>;

    /// Remove a submission. Immediate and irreversible.
    /// Returns false when no record exists for the id.
    async fn delete_by_id<'con>(
        executor: impl Executor<'con, Database = Self::DB>,
        id: &str,
    ) -> sqlx::Result<bool>;

    /// Count stored submissions grouped by status
    async fn count_by_status<'con>(
        executor: impl Executor<'con, Database = Self::DB>,
    ) -> sqlx::Result<SubmissionStats>;
}

/// Sqlite Submission Repository
#[derive(Debug)]
pub struct SqliteSubmissionRepo;

#[async_trait::async_trait]
impl SubmissionRepo for SqliteSubmissionRepo {
    type DB = sqlx::Sqlite;

    #[tracing::instrument(name = "Insert submission", skip(executor))]
    async fn insert<'con>(
        executor: impl SqliteExecutor<'con>,
        new_submission: &NewSubmission,
        metadata: &RequestMetadata,
    ) -> sqlx::Result<String> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();

        sqlx::query(
            "insert into submissions(id, first_name, last_name, email, subject, message, status, requester_ip, user_agent, created_at)
             values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(&id)
        .bind(new_submission.first_name.as_ref())
        .bind(new_submission.last_name.as_ref())
        .bind(new_submission.email.as_ref())
        .bind(new_submission.subject.as_ref())
        .bind(new_submission.message.as_ref())
        .bind(SubmissionStatus::default())
        .bind(metadata.requester_ip.as_deref())
        .bind(metadata.user_agent.as_deref())
        .bind(created_at)
        .execute(executor)
        .await?;

        Ok(id)
    }

    #[tracing::instrument(name = "Fetch submission by id", skip(executor))]
    async fn fetch_by_id<'con>(
        executor: impl SqliteExecutor<'con>,
        id: &str,
    ) -> sqlx::Result<Option<Submission>> {
        sqlx::query_as::<_, Submission>("select * from submissions where id=?1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    #[tracing::instrument(name = "Fetch submissions", skip(executor))]
    async fn fetch_all<'con>(
        executor: impl SqliteExecutor<'con>,
        filter: &SubmissionFilter,
    ) -> sqlx::Result<Vec<Submission>> {
        let pattern = filter.search.as_ref().map(|term| format!("%{}%", term));

        sqlx::query_as::<_, Submission>(
            "select * from submissions
             where (?1 is null or status=?1)
               and (?2 is null
                 or first_name like ?2 or last_name like ?2
                 or email like ?2 or subject like ?2 or message like ?2)
             order by created_at desc",
        )
        .bind(filter.status)
        .bind(pattern)
        .fetch_all(executor)
        .await
    }

    #[tracing::instrument(name = "Update submission status", skip(executor))]
    async fn update_status<'con>(
        executor: impl SqliteExecutor<'con>,
        id: &str,
        status: SubmissionStatus,
    ) -> sqlx::Result<bool> {
        let result = sqlx::query("update submissions set status=?2 where id=?1")
            .bind(id)
            .bind(status)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(name = "Delete submission", skip(executor))]
    async fn delete_by_id<'con>(
        executor: impl SqliteExecutor<'con>,
        id: &str,
    ) -> sqlx::Result<bool> {
        let result = sqlx::query("delete from submissions where id=?1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(name = "Count submissions by status", skip(executor))]
    async fn count_by_status<'con>(
        executor: impl SqliteExecutor<'con>,
    ) -> sqlx::Result<SubmissionStats> {
        #[derive(sqlx::FromRow)]
        struct StatusCount {
            status: SubmissionStatus,
            count: i64,
        }

        let counts = sqlx::query_as::<_, StatusCount>(
            "select status, count(*) as count from submissions group by status",
        )
        .fetch_all(executor)
        .await?;

        let mut stats = SubmissionStats::default();
        for row in counts {
            match row.status {
                SubmissionStatus::New => stats.new = row.count,
                SubmissionStatus::Read => stats.read = row.count,
                SubmissionStatus::Replied => stats.replied = row.count,
            }
            stats.total += row.count;
        }

        Ok(stats)
    }
}

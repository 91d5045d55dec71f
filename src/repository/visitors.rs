//! Visitors repository for database operations

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Pool, Postgres, Row};
use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        custom_field::VisitorCustomFieldValue,
        visitor::{CreateVisitor, Visitor, VisitorDetails, VisitorStats, VisitorStatus},
    },
};

/// Filters applied to visitor list and stats queries. The location filter
/// here is the *effective* one, i.e. after scope resolution.
#[derive(Debug, Default)]
pub struct VisitorFilter {
    pub location_id: Option<i32>,
    pub date: Option<NaiveDate>,
    pub status: Option<VisitorStatus>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct VisitorsRepository {
    pool: Pool<Postgres>,
}

impl VisitorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get visitor by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Visitor> {
        sqlx::query_as::<_, Visitor>("SELECT * FROM visitors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Visitor with id {} not found", id)))
    }

    /// Get visitor with its custom field value map
    pub async fn get_details(&self, id: i32) -> AppResult<VisitorDetails> {
        let visitor = self.get_by_id(id).await?;
        let custom_fields = self.get_custom_values(id).await?;
        Ok(VisitorDetails { visitor, custom_fields })
    }

    async fn get_custom_values(&self, visitor_id: i32) -> AppResult<HashMap<String, String>> {
        let values = sqlx::query_as::<_, VisitorCustomFieldValue>(
            "SELECT * FROM visitor_custom_field_values WHERE visitor_id = $1",
        )
        .bind(visitor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(values
            .into_iter()
            .map(|value| (value.field_name, value.value))
            .collect())
    }

    /// Create a visitor from a public registration. New visitors always
    /// start in awaiting_approval with created_at == updated_at.
    pub async fn create(&self, request: &CreateVisitor) -> AppResult<Visitor> {
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let visitor = sqlx::query_as::<_, Visitor>(
            r#"
            INSERT INTO visitors (
                location_id, full_name, phone_number, email, company_name,
                purpose_of_visit, whom_to_meet, scheduled_time,
                id_proof_type, id_proof_number, photo_url,
                status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            RETURNING *
            "#,
        )
        .bind(request.location_id)
        .bind(&request.full_name)
        .bind(&request.phone_number)
        .bind(&request.email)
        .bind(&request.company_name)
        .bind(&request.purpose_of_visit)
        .bind(&request.whom_to_meet)
        .bind(request.scheduled_time)
        .bind(&request.id_proof_type)
        .bind(&request.id_proof_number)
        .bind(&request.photo_url)
        .bind(VisitorStatus::AwaitingApproval)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for (field_name, value) in &request.custom_fields {
            sqlx::query(
                "INSERT INTO visitor_custom_field_values (visitor_id, field_name, value) VALUES ($1, $2, $3)",
            )
            .bind(visitor.id)
            .bind(field_name)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(visitor)
    }

    /// List visitors with optional filters, most recent schedule first
    pub async fn list(&self, filter: &VisitorFilter, page: i64, per_page: i64) -> AppResult<Vec<Visitor>> {
        let (where_clause, _) = Self::build_where(filter);
        let query = format!(
            "SELECT * FROM visitors WHERE {} ORDER BY scheduled_time DESC LIMIT ${} OFFSET ${}",
            where_clause,
            Self::bind_count(filter) + 1,
            Self::bind_count(filter) + 2,
        );

        let mut q = sqlx::query_as::<_, Visitor>(&query);
        q = Self::bind_filter(q, filter);
        let visitors = q
            .bind(per_page)
            .bind((page - 1).max(0) * per_page)
            .fetch_all(&self.pool)
            .await?;

        Ok(visitors)
    }

    /// Apply a generic status update. Deliberately unguarded: any target
    /// status is written (only check-in/check-out enforce the transition
    /// graph). Single UPDATE, so the field changes land atomically.
    pub async fn update_status(
        &self,
        id: i32,
        status: VisitorStatus,
        approved_by: Option<&str>,
        approved_at: Option<DateTime<Utc>>,
        notes: Option<&str>,
    ) -> AppResult<Visitor> {
        sqlx::query_as::<_, Visitor>(
            r#"
            UPDATE visitors
            SET status = $2,
                approved_by = COALESCE($3, approved_by),
                approved_at = COALESCE($4, approved_at),
                notes = COALESCE($5, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(approved_by)
        .bind(approved_at)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Visitor with id {} not found", id)))
    }

    /// Guarded check-in. The status predicate lives in the UPDATE itself so
    /// two concurrent check-ins cannot both pass the guard; the loser sees
    /// no row and the caller reports an invalid transition.
    pub async fn check_in(&self, id: i32) -> AppResult<Option<Visitor>> {
        let visitor = sqlx::query_as::<_, Visitor>(
            r#"
            UPDATE visitors
            SET status = $2, check_in_time = NOW(), updated_at = NOW()
            WHERE id = $1 AND status = $3
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(VisitorStatus::CheckedIn)
        .bind(VisitorStatus::Approved)
        .fetch_optional(&self.pool)
        .await?;

        Ok(visitor)
    }

    /// Guarded check-out, legal only from checked_in
    pub async fn check_out(&self, id: i32) -> AppResult<Option<Visitor>> {
        let visitor = sqlx::query_as::<_, Visitor>(
            r#"
            UPDATE visitors
            SET status = $2, check_out_time = NOW(), updated_at = NOW()
            WHERE id = $1 AND status = $3
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(VisitorStatus::CheckedOut)
        .bind(VisitorStatus::CheckedIn)
        .fetch_optional(&self.pool)
        .await?;

        Ok(visitor)
    }

    /// Delete a visitor (custom field values cascade)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM visitors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Visitor with id {} not found", id)));
        }
        Ok(())
    }

    /// Summary counts over the filtered visitor set
    pub async fn stats(&self, filter: &VisitorFilter) -> AppResult<VisitorStats> {
        let (where_clause, _) = Self::build_where(filter);
        let query = format!(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'awaiting_approval') AS awaiting_approval,
                   COUNT(*) FILTER (WHERE status IN ('approved', 'checked_in', 'checked_out')) AS approved,
                   COUNT(*) FILTER (WHERE status = 'checked_in') AS checked_in,
                   COUNT(*) FILTER (WHERE status = 'checked_out') AS checked_out,
                   COUNT(*) FILTER (WHERE status = 'rejected') AS rejected
            FROM visitors
            WHERE {}
            "#,
            where_clause
        );

        let mut q = sqlx::query(&query);
        q = Self::bind_filter_plain(q, filter);
        let row = q.fetch_one(&self.pool).await?;

        let total: i64 = row.get("total");
        let approved: i64 = row.get("approved");

        Ok(VisitorStats {
            total,
            awaiting_approval: row.get("awaiting_approval"),
            approved,
            checked_in: row.get("checked_in"),
            checked_out: row.get("checked_out"),
            rejected: row.get("rejected"),
            approval_rate: VisitorStats::approval_rate(approved, total),
        })
    }

    fn bind_count(filter: &VisitorFilter) -> usize {
        [
            filter.location_id.is_some(),
            filter.date.is_some(),
            filter.status.is_some(),
            filter.from_date.is_some(),
            filter.to_date.is_some(),
        ]
        .iter()
        .filter(|p| **p)
        .count()
    }

    /// Build a WHERE clause with positional placeholders matching the bind
    /// order of `bind_filter`
    fn build_where(filter: &VisitorFilter) -> (String, usize) {
        let mut conditions: Vec<String> = Vec::new();
        let mut n = 0;

        if filter.location_id.is_some() {
            n += 1;
            conditions.push(format!("location_id = ${}", n));
        }
        if filter.date.is_some() {
            n += 1;
            conditions.push(format!("scheduled_time::date = ${}", n));
        }
        if filter.status.is_some() {
            n += 1;
            conditions.push(format!("status = ${}", n));
        }
        if filter.from_date.is_some() {
            n += 1;
            conditions.push(format!("scheduled_time::date >= ${}", n));
        }
        if filter.to_date.is_some() {
            n += 1;
            conditions.push(format!("scheduled_time::date <= ${}", n));
        }

        if conditions.is_empty() {
            ("TRUE".to_string(), 0)
        } else {
            (conditions.join(" AND "), n)
        }
    }

    fn bind_filter<'q>(
        mut q: sqlx::query::QueryAs<'q, Postgres, Visitor, sqlx::postgres::PgArguments>,
        filter: &'q VisitorFilter,
    ) -> sqlx::query::QueryAs<'q, Postgres, Visitor, sqlx::postgres::PgArguments> {
        if let Some(location_id) = filter.location_id {
            q = q.bind(location_id);
        }
        if let Some(date) = filter.date {
            q = q.bind(date);
        }
        if let Some(status) = filter.status {
            q = q.bind(status);
        }
        if let Some(from_date) = filter.from_date {
            q = q.bind(from_date);
        }
        if let Some(to_date) = filter.to_date {
            q = q.bind(to_date);
        }
        q
    }

    fn bind_filter_plain<'q>(
        mut q: sqlx::query::Query<'q, Postgres, sqlx::postgres::PgArguments>,
        filter: &'q VisitorFilter,
    ) -> sqlx::query::Query<'q, Postgres, sqlx::postgres::PgArguments> {
        if let Some(location_id) = filter.location_id {
            q = q.bind(location_id);
        }
        if let Some(date) = filter.date {
            q = q.bind(date);
        }
        if let Some(status) = filter.status {
            q = q.bind(status);
        }
        if let Some(from_date) = filter.from_date {
            q = q.bind(from_date);
        }
        if let Some(to_date) = filter.to_date {
            q = q.bind(to_date);
        }
        q
    }
}

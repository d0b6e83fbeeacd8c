//! Generic filtered CRUD over any [`Entity`].
//!
//! Every operation runs on the caller's [`UnitOfWork`], so a service can
//! compose several repository calls into one atomic write. Reads apply an
//! implicit `is_active = TRUE` predicate in addition to the caller's filters,
//! which makes soft-deleted rows invisible everywhere.
//!
//! Deletion is soft: rows are marked `is_active = FALSE` and stamped with
//! `deleted_at`.

use std::marker::PhantomData;

use anyhow::anyhow;
use rolodex_core::{AppError, PageParams, Paginated};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Postgres, QueryBuilder};
use tracing::instrument;

use crate::error::{capitalize, map_db_error};
use crate::filter::{Changes, Filter, SqlValue, push_filters, push_value};
use crate::unit_of_work::UnitOfWork;

/// A table-backed row type the repository can load and store.
///
/// Every table is expected to carry `is_active`, `created_at`, `updated_at`
/// and `deleted_at` columns.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    type Id: Into<SqlValue> + Copy + Send + Sync + std::fmt::Display;

    const TABLE: &'static str;
    /// Select list used for every read and `RETURNING` clause.
    const COLUMNS: &'static str;
    /// Human-readable name used in error messages and contexts.
    const NAME: &'static str;
    const ID_COLUMN: &'static str = "id";

    fn id(&self) -> Self::Id;

    /// The mutable columns written by [`Repository::update`].
    fn changes(&self) -> Changes;
}

pub struct Repository<E>(PhantomData<E>);

impl<E: Entity> Repository<E> {
    fn select(filters: &[Filter]) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {} FROM {} WHERE is_active = TRUE",
            E::COLUMNS,
            E::TABLE
        ));
        push_filters(&mut qb, filters);
        qb
    }

    /// The 404 reported when no active row matches.
    pub fn not_found() -> AppError {
        AppError::not_found(anyhow!("{} not found", capitalize(E::NAME))).with_context(E::NAME)
    }

    /// Active rows matching every filter, oldest first, optionally paged.
    #[instrument(skip_all, fields(table = E::TABLE, filters = filters.len()))]
    pub async fn get_all(
        uow: &mut UnitOfWork,
        filters: &[Filter],
        page: Option<&PageParams>,
    ) -> Result<Vec<E>, AppError> {
        let mut qb = Self::select(filters);
        qb.push(" ORDER BY created_at, ").push(E::ID_COLUMN);
        if let Some(page) = page {
            qb.push(" LIMIT ")
                .push_bind(page.limit())
                .push(" OFFSET ")
                .push_bind(page.offset());
        }

        qb.build_query_as::<E>()
            .fetch_all(uow.conn()?)
            .await
            .map_err(|e| map_db_error(e, E::NAME))
    }

    /// Number of active rows matching every filter.
    #[instrument(skip_all, fields(table = E::TABLE, filters = filters.len()))]
    pub async fn count(uow: &mut UnitOfWork, filters: &[Filter]) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT COUNT(*) FROM {} WHERE is_active = TRUE",
            E::TABLE
        ));
        push_filters(&mut qb, filters);

        qb.build_query_scalar::<i64>()
            .fetch_one(uow.conn()?)
            .await
            .map_err(|e| map_db_error(e, E::NAME))
    }

    /// Counts, then fetches one page. `total` reflects every matching row.
    pub async fn paginate(
        uow: &mut UnitOfWork,
        filters: &[Filter],
        page: &PageParams,
    ) -> Result<Paginated<E>, AppError> {
        let total = Self::count(uow, filters).await?;
        let rows = Self::get_all(uow, filters, Some(page)).await?;
        Ok(Paginated::new(rows, total, page))
    }

    /// The active row with this ID that also matches `filters`, or not-found.
    #[instrument(skip_all, fields(table = E::TABLE, id = %id))]
    pub async fn get_by_id(
        uow: &mut UnitOfWork,
        id: E::Id,
        filters: &[Filter],
    ) -> Result<E, AppError> {
        let mut qb = Self::select(filters);
        qb.push(" AND ").push(E::ID_COLUMN).push(" = ");
        push_value(&mut qb, &id.into());

        qb.build_query_as::<E>()
            .fetch_optional(uow.conn()?)
            .await
            .map_err(|e| map_db_error(e, E::NAME))?
            .ok_or_else(Self::not_found)
    }

    /// The first active row matching `filters`, if any.
    #[instrument(skip_all, fields(table = E::TABLE))]
    pub async fn find_first(
        uow: &mut UnitOfWork,
        filters: &[Filter],
    ) -> Result<Option<E>, AppError> {
        let mut qb = Self::select(filters);
        qb.push(" ORDER BY created_at LIMIT 1");

        qb.build_query_as::<E>()
            .fetch_optional(uow.conn()?)
            .await
            .map_err(|e| map_db_error(e, E::NAME))
    }

    /// Inserts a row built from `values` and returns it.
    #[instrument(skip_all, fields(table = E::TABLE))]
    pub async fn add(uow: &mut UnitOfWork, values: &Changes) -> Result<E, AppError> {
        if values.is_empty() {
            return Err(AppError::internal_error(format!(
                "Refusing to insert an empty {} row",
                E::NAME
            )));
        }

        let mut qb = QueryBuilder::new(format!("INSERT INTO {} ", E::TABLE));
        values.push_insert(&mut qb);
        qb.push(" RETURNING ").push(E::COLUMNS);

        qb.build_query_as::<E>()
            .fetch_one(uow.writer()?)
            .await
            .map_err(|e| map_db_error(e, E::NAME))
    }

    /// Writes every mutable column of `entity` back to its row.
    #[instrument(skip_all, fields(table = E::TABLE, id = %entity.id()))]
    pub async fn update(uow: &mut UnitOfWork, entity: &E) -> Result<E, AppError> {
        let changes = entity.changes();

        let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", E::TABLE));
        changes.push_assignments(&mut qb);
        if !changes.is_empty() {
            qb.push(", ");
        }
        qb.push("updated_at = NOW() WHERE is_active = TRUE AND ")
            .push(E::ID_COLUMN)
            .push(" = ");
        push_value(&mut qb, &entity.id().into());
        qb.push(" RETURNING ").push(E::COLUMNS);

        qb.build_query_as::<E>()
            .fetch_optional(uow.writer()?)
            .await
            .map_err(|e| map_db_error(e, E::NAME))?
            .ok_or_else(Self::not_found)
    }

    /// Applies `changes` to every active row matching `filters` and returns
    /// the updated rows.
    #[instrument(skip_all, fields(table = E::TABLE, columns = changes.len()))]
    pub async fn update_with_map(
        uow: &mut UnitOfWork,
        changes: &Changes,
        filters: &[Filter],
    ) -> Result<Vec<E>, AppError> {
        if changes.is_empty() {
            return Err(AppError::validation("body", "No fields to update"));
        }
        if filters.is_empty() {
            return Err(AppError::internal_error(format!(
                "Refusing an unscoped update of {}",
                E::TABLE
            )));
        }

        let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", E::TABLE));
        changes.push_assignments(&mut qb);
        qb.push(", updated_at = NOW() WHERE is_active = TRUE");
        push_filters(&mut qb, filters);
        qb.push(" RETURNING ").push(E::COLUMNS);

        qb.build_query_as::<E>()
            .fetch_all(uow.writer()?)
            .await
            .map_err(|e| map_db_error(e, E::NAME))
    }

    /// Soft-deletes every active row matching `filters`; returns the count.
    #[instrument(skip_all, fields(table = E::TABLE, filters = filters.len()))]
    pub async fn delete(uow: &mut UnitOfWork, filters: &[Filter]) -> Result<u64, AppError> {
        if filters.is_empty() {
            return Err(AppError::internal_error(format!(
                "Refusing an unscoped delete of {}",
                E::TABLE
            )));
        }

        let mut qb = QueryBuilder::new(format!(
            "UPDATE {} SET is_active = FALSE, deleted_at = NOW(), updated_at = NOW() \
             WHERE is_active = TRUE",
            E::TABLE
        ));
        push_filters(&mut qb, filters);

        let result = qb
            .build()
            .execute(uow.writer()?)
            .await
            .map_err(|e| map_db_error(e, E::NAME))?;

        Ok(result.rows_affected())
    }
}

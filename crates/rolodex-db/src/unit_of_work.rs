//! Unit-of-work: the transactional scope of one request.
//!
//! A mutating request opens a read-write unit with [`UnitOfWork::begin`],
//! performs all of its repository calls against it, and calls
//! [`UnitOfWork::commit`] on success. There is no other recovery path: a unit
//! that is dropped without `commit` (an early `?` return, a panic, a cancelled
//! request future) rolls its transaction back, so a failed request never
//! leaves partial writes behind.
//!
//! Read-only requests use [`UnitOfWork::read_only`], which holds a plain pooled
//! connection instead of a transaction. Writes through a read-only unit are
//! rejected.

use rolodex_core::AppError;
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

enum Session {
    ReadWrite(Transaction<'static, Postgres>),
    ReadOnly(PoolConnection<Postgres>),
}

pub struct UnitOfWork {
    session: Option<Session>,
}

impl UnitOfWork {
    /// Opens a read-write unit backed by a new transaction.
    pub async fn begin(pool: &PgPool) -> Result<Self, AppError> {
        let tx = pool.begin().await?;
        Ok(Self {
            session: Some(Session::ReadWrite(tx)),
        })
    }

    /// Opens a read-only unit backed by a pooled connection.
    pub async fn read_only(pool: &PgPool) -> Result<Self, AppError> {
        let conn = pool.acquire().await?;
        Ok(Self {
            session: Some(Session::ReadOnly(conn)),
        })
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.session, Some(Session::ReadOnly(_)))
    }

    /// The connection to run reads on.
    pub fn conn(&mut self) -> Result<&mut PgConnection, AppError> {
        match self.session.as_mut() {
            Some(Session::ReadWrite(tx)) => Ok(&mut **tx),
            Some(Session::ReadOnly(conn)) => Ok(&mut **conn),
            None => Err(AppError::internal_error("Unit of work already finished")),
        }
    }

    /// The connection to run writes on; fails for read-only units.
    pub fn writer(&mut self) -> Result<&mut PgConnection, AppError> {
        match self.session.as_mut() {
            Some(Session::ReadWrite(tx)) => Ok(&mut **tx),
            Some(Session::ReadOnly(_)) => Err(AppError::internal_error(
                "Attempted to write through a read-only unit of work",
            )),
            None => Err(AppError::internal_error("Unit of work already finished")),
        }
    }

    /// Persists every write made through this unit. A no-op for read-only units.
    pub async fn commit(mut self) -> Result<(), AppError> {
        if let Some(Session::ReadWrite(tx)) = self.session.take() {
            tx.commit().await?;
        }
        Ok(())
    }

    /// Discards every write made through this unit.
    pub async fn rollback(mut self) -> Result<(), AppError> {
        if let Some(Session::ReadWrite(tx)) = self.session.take() {
            tx.rollback().await?;
        }
        Ok(())
    }
}

impl Drop for UnitOfWork {
    fn drop(&mut self) {
        // Dropping the transaction queues its rollback on the connection.
        if let Some(Session::ReadWrite(_)) = self.session {
            tracing::debug!("unit of work dropped without commit; rolling back");
        }
    }
}

impl std::fmt::Debug for UnitOfWork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.session {
            Some(Session::ReadWrite(_)) => "read-write",
            Some(Session::ReadOnly(_)) => "read-only",
            None => "finished",
        };
        f.debug_struct("UnitOfWork").field("session", &state).finish()
    }
}

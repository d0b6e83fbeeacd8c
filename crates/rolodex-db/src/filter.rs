//! Filter predicates and change sets for the generic repository.
//!
//! Column names are `&'static str` chosen by the calling code, never by the
//! client; every value travels as a bound parameter. Filters combine with
//! `AND`.

use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

/// A bindable column value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Uuid(Uuid),
    Text(String),
    Bool(bool),
    Int(i64),
    Timestamp(DateTime<Utc>),
}

impl From<Uuid> for SqlValue {
    fn from(v: Uuid) -> Self {
        SqlValue::Uuid(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(v)
    }
}

pub(crate) fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: &SqlValue) {
    match value {
        SqlValue::Uuid(v) => qb.push_bind(*v),
        SqlValue::Text(v) => qb.push_bind(v.clone()),
        SqlValue::Bool(v) => qb.push_bind(*v),
        SqlValue::Int(v) => qb.push_bind(*v),
        SqlValue::Timestamp(v) => qb.push_bind(*v),
    };
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `column = value`
    Eq(&'static str, SqlValue),
    /// `column ILIKE '%value%'`
    Contains(&'static str, String),
    /// `(a ILIKE '%value%' OR b ILIKE '%value%' ...)`
    AnyContains(&'static [&'static str], String),
    /// `column IN (v1, v2, ...)`; an empty list matches nothing.
    In(&'static str, Vec<SqlValue>),
}

impl Filter {
    pub fn eq(column: &'static str, value: impl Into<SqlValue>) -> Self {
        Filter::Eq(column, value.into())
    }

    pub fn contains(column: &'static str, needle: impl Into<String>) -> Self {
        Filter::Contains(column, needle.into())
    }

    pub fn any_contains(columns: &'static [&'static str], needle: impl Into<String>) -> Self {
        Filter::AnyContains(columns, needle.into())
    }

    pub fn one_of<V: Into<SqlValue>>(column: &'static str, values: impl IntoIterator<Item = V>) -> Self {
        Filter::In(column, values.into_iter().map(Into::into).collect())
    }

    fn push(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Filter::Eq(column, value) => {
                qb.push(*column).push(" = ");
                push_value(qb, value);
            }
            Filter::Contains(column, needle) => {
                qb.push(*column).push(" ILIKE ");
                qb.push_bind(like_pattern(needle));
            }
            Filter::AnyContains(columns, needle) => {
                let pattern = like_pattern(needle);
                qb.push("(");
                for (i, column) in columns.iter().enumerate() {
                    if i > 0 {
                        qb.push(" OR ");
                    }
                    qb.push(*column).push(" ILIKE ");
                    qb.push_bind(pattern.clone());
                }
                qb.push(")");
            }
            Filter::In(_, values) if values.is_empty() => {
                qb.push("FALSE");
            }
            Filter::In(column, values) => {
                qb.push(*column).push(" IN (");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        qb.push(", ");
                    }
                    push_value(qb, value);
                }
                qb.push(")");
            }
        }
    }
}

/// Appends ` AND <filter>` for every filter.
pub(crate) fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &[Filter]) {
    for filter in filters {
        qb.push(" AND ");
        filter.push(qb);
    }
}

/// Wraps a needle in `%...%`, escaping LIKE metacharacters so user input
/// matches literally.
pub fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// An ordered set of column assignments for inserts and partial updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Changes(Vec<(&'static str, SqlValue)>);

impl Changes {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.push(column, value);
        self
    }

    /// Sets the column only when a value is present.
    #[must_use]
    pub fn set_opt<V: Into<SqlValue>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    pub fn push(&mut self, column: &'static str, value: impl Into<SqlValue>) {
        match self.0.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value.into(),
            None => self.0.push((column, value.into())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.0.iter().find(|(c, _)| *c == column).map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(c, _)| *c)
    }

    /// Appends `a = $1, b = $2`.
    pub(crate) fn push_assignments(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        for (i, (column, value)) in self.0.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(*column).push(" = ");
            push_value(qb, value);
        }
    }

    /// Appends `(a, b) VALUES ($1, $2)`.
    pub(crate) fn push_insert(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push("(");
        qb.push(self.columns().collect::<Vec<_>>().join(", "));
        qb.push(") VALUES (");
        for (i, (_, value)) in self.0.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            push_value(qb, value);
        }
        qb.push(")");
    }
}

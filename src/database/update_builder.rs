use serde_json::Value;
use sqlx::{postgres::PgArguments, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;

/// A bound parameter of an assembled `UPDATE`.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Text(String),
    Uuid(Uuid),
    Bool(bool),
    Json(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub query: String,
    pub params: Vec<Param>,
}

/// Assembles `UPDATE <table> SET ... WHERE ...` from the fields a caller
/// actually supplied. Column names are compile-time constants; values are
/// always bound as `$n` parameters.
pub struct UpdateBuilder {
    table: &'static str,
    assignments: Vec<String>,
    params: Vec<Param>,
    touched: Vec<&'static str>,
}

impl UpdateBuilder {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            assignments: Vec::new(),
            params: Vec::new(),
            touched: Vec::new(),
        }
    }

    fn push(mut self, column: &'static str, param: Param) -> Self {
        self.params.push(param);
        self.assignments.push(format!("{} = ${}", column, self.params.len()));
        self
    }

    /// Skips `None` and the empty string.
    pub fn set_text(self, column: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.push(column, Param::Text(v.to_string())),
            _ => self,
        }
    }

    /// Skips `None` and the nil UUID.
    pub fn set_uuid(self, column: &'static str, value: Option<Uuid>) -> Self {
        match value {
            Some(id) if !id.is_nil() => self.push(column, Param::Uuid(id)),
            _ => self,
        }
    }

    pub fn set_bool(self, column: &'static str, value: Option<bool>) -> Self {
        match value {
            Some(b) => self.push(column, Param::Bool(b)),
            None => self,
        }
    }

    pub fn set_json(self, column: &'static str, value: Option<Value>) -> Self {
        match value {
            Some(v) => self.push(column, Param::Json(v)),
            None => self,
        }
    }

    /// `column = NOW()` on every write. Does not count as a supplied field.
    pub fn touch(mut self, column: &'static str) -> Self {
        self.touched.push(column);
        self
    }

    /// Finish the statement. `keys` become `AND`-ed equality conditions.
    pub fn build(self, keys: &[(&'static str, Uuid)]) -> Result<UpdateStatement, DatabaseError> {
        if self.assignments.is_empty() {
            return Err(DatabaseError::NoFieldsToUpdate);
        }

        let mut params = self.params;
        let mut sets = self.assignments;
        sets.extend(self.touched.iter().map(|c| format!("{} = NOW()", c)));

        let conditions: Vec<String> = keys
            .iter()
            .map(|(column, id)| {
                params.push(Param::Uuid(*id));
                format!("{} = ${}", column, params.len())
            })
            .collect();

        let mut query = format!("UPDATE {} SET {}", self.table, sets.join(", "));
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        Ok(UpdateStatement { query, params })
    }
}

impl UpdateStatement {
    /// Run the statement, returning the number of affected rows.
    pub async fn execute(&self, pool: &PgPool) -> Result<u64, DatabaseError> {
        let mut q = sqlx::query(&self.query);
        for p in self.params.iter() {
            q = bind_param(q, p);
        }
        let result = q.execute(pool).await?;
        Ok(result.rows_affected())
    }
}

fn bind_param<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    p: &'q Param,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match p {
        Param::Text(s) => q.bind(s.as_str()),
        Param::Uuid(id) => q.bind(*id),
        Param::Bool(b) => q.bind(*b),
        Param::Json(v) => q.bind(v.clone()), // JSONB
    }
}

use std::path::Path;

use async_trait::async_trait;
use grades::{Assignment, Field, FieldValue, GradeRecord, SanitizedFields, StudentId};
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::QueryBuilder;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Missing field for insert: {0}")]
    MissingField(&'static str),
    #[error("Update has no assignments")]
    EmptyUpdate,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// The row operations the handlers need.
#[async_trait]
pub trait GradeStore: Send + Sync {
    /// Inserts a full record and returns the assigned id.
    async fn insert(&self, fields: &SanitizedFields) -> Result<StudentId>;
    /// Rows affected.
    async fn update(&self, id: StudentId, assignments: &[Assignment]) -> Result<u64>;
    /// Rows affected.
    async fn delete(&self, id: StudentId) -> Result<u64>;
    async fn list_all(&self) -> Result<Vec<GradeRecord>>;
}

const INSERT_FIELDS: [Field; 4] = [Field::Name, Field::EnglishGrade, Field::MathGrade, Field::PeGrade];

#[derive(sqlx::FromRow)]
#[sqlx(rename_all = "camelCase")]
struct GradeRow {
    student_id: i64,
    name: String,
    english_grade: f64,
    math_grade: f64,
    pe_grade: f64,
}

impl From<GradeRow> for GradeRecord {
    fn from(r: GradeRow) -> Self {
        GradeRecord {
            student_id: r.student_id,
            name: r.name,
            english_grade: r.english_grade,
            math_grade: r.math_grade,
            pe_grade: r.pe_grade,
        }
    }
}

#[derive(Clone)]
pub struct SqliteGradeStore {
    pool: SqlitePool,
}

impl SqliteGradeStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database file and ensures the table exists.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;

        let store = Self::new(pool);
        store.init().await?;
        Ok(store)
    }

    pub async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS grade(
                studentId INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                englishGrade REAL NOT NULL CHECK (englishGrade BETWEEN 0 AND 100),
                mathGrade REAL NOT NULL CHECK (mathGrade BETWEEN 0 AND 100),
                peGrade REAL NOT NULL CHECK (peGrade BETWEEN 0 AND 100)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn push_value(qb: &mut QueryBuilder<'_, Sqlite>, value: &FieldValue) {
    match value.clone() {
        FieldValue::Integer(v) => qb.push_bind(v),
        FieldValue::Text(v) => qb.push_bind(v),
        FieldValue::Number(v) => qb.push_bind(v),
    };
}

#[async_trait]
impl GradeStore for SqliteGradeStore {
    async fn insert(&self, fields: &SanitizedFields) -> Result<StudentId> {
        let mut values = Vec::with_capacity(INSERT_FIELDS.len());
        for field in INSERT_FIELDS {
            let v = fields.get(field).ok_or(StoreError::MissingField(field.name()))?;
            values.push((field, v));
        }

        let mut qb = QueryBuilder::<Sqlite>::new("INSERT INTO grade (");
        for (i, (field, _)) in values.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(field.column());
        }
        qb.push(") VALUES (");
        for (i, (_, v)) in values.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            push_value(&mut qb, v);
        }
        qb.push(")");

        let res = qb.build().execute(&self.pool).await?;
        Ok(res.last_insert_rowid())
    }

    async fn update(&self, id: StudentId, assignments: &[Assignment]) -> Result<u64> {
        if assignments.is_empty() {
            return Err(StoreError::EmptyUpdate);
        }

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE grade SET ");
        for (i, a) in assignments.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(a.column());
            qb.push(" = ");
            push_value(&mut qb, &a.value);
        }
        qb.push(" WHERE studentId = ");
        qb.push_bind(id);

        let res = qb.build().execute(&self.pool).await?;
        Ok(res.rows_affected())
    }

    async fn delete(&self, id: StudentId) -> Result<u64> {
        let res = sqlx::query("DELETE FROM grade WHERE studentId = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn list_all(&self) -> Result<Vec<GradeRecord>> {
        let rows: Vec<GradeRow> = sqlx::query_as(
            r#"
            SELECT studentId, name, englishGrade, mathGrade, peGrade
            FROM grade
            ORDER BY studentId
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GradeRecord::from).collect())
    }
}

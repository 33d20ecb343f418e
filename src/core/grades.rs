// grade lookup - one row from the grades table, rendered as text for the prompt
// supports postgres, sqlite, and mysql

use crate::Error;
use crate::core::Prompt;
use sqlx::{AnyConnection, Connection};
use tracing::{debug, error};

/// One row of the grades table.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeRecord {
    pub module_name: String,
    /// out of 20, `None` until the module is graded
    pub grade: Option<f64>,
    pub coefficient: Option<f64>,
}

// (module_name, grade, coefficient)
type Row = (String, Option<f64>, Option<f64>);

/// Read-only access to the grades table.
///
/// Every lookup opens its own connection and closes it before returning;
/// nothing is pooled or shared between requests.
pub struct Grades {
    url: String,
    table: String,
    dialect: Dialect,
    prompt: Prompt,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Dialect {
    Postgres,
    Sqlite,
    Mysql,
}

impl Grades {
    pub fn new(url: &str, table: &str, prompt: Prompt) -> Self {
        sqlx::any::install_default_drivers();

        Self {
            url: url.to_string(),
            table: table.to_string(),
            dialect: detect_dialect(url),
            prompt,
        }
    }

    /// Text describing the grade for `module`, ready to drop into the prompt.
    ///
    /// Never fails: with no module there is no database access at all, and
    /// database errors are logged and replaced by a generic message.
    pub async fn summary(&self, module: Option<&str>) -> String {
        let Some(module) = module else {
            return self.prompt.module_not_specified();
        };

        match self.fetch(module).await {
            Ok(Some(record)) => self.prompt.grade_found(&record),
            Ok(None) => self.prompt.no_grade(module),
            Err(e) => {
                error!(module, error = %e, "grade lookup failed");
                self.prompt.lookup_failed()
            }
        }
    }

    /// Case-insensitive exact match on the module name, first row only.
    pub async fn fetch(&self, module: &str) -> Result<Option<GradeRecord>, Error> {
        let sql = self.select_sql();
        debug!(%sql, module, "looking up grade");

        let mut conn = AnyConnection::connect(&self.url).await?;

        let rows: Result<Vec<Row>, sqlx::Error> = match self.dialect {
            // sqlite's lower() only folds ascii, so the comparison happens here
            Dialect::Sqlite => {
                let wanted = module.to_lowercase();
                sqlx::query_as::<_, Row>(&sql)
                    .fetch_all(&mut conn)
                    .await
                    .map(|rows| {
                        rows.into_iter()
                            .filter(|row| row.0.to_lowercase() == wanted)
                            .take(1)
                            .collect()
                    })
            }
            Dialect::Postgres | Dialect::Mysql => sqlx::query_as::<_, Row>(&sql)
                .bind(module)
                .fetch_optional(&mut conn)
                .await
                .map(|row| row.into_iter().collect()),
        };

        // close before surfacing a query error so the connection never outlives the call
        if let Err(e) = conn.close().await {
            debug!(error = %e, "closing grade connection failed");
        }

        Ok(rows?
            .into_iter()
            .next()
            .map(|(module_name, grade, coefficient)| GradeRecord {
                module_name,
                grade,
                coefficient,
            }))
    }

    // numeric columns are cast to double so the any driver can decode them
    // (postgres NUMERIC has no any-driver mapping)
    fn select_sql(&self) -> String {
        let table = &self.table;

        match self.dialect {
            Dialect::Postgres => format!(
                "SELECT module_name::text, grade::float8, coefficient::float8 \
                 FROM {table} WHERE lower(module_name) = lower($1) LIMIT 1"
            ),
            Dialect::Sqlite => format!(
                "SELECT module_name, CAST(grade AS REAL), CAST(coefficient AS REAL) \
                 FROM {table}"
            ),
            Dialect::Mysql => format!(
                "SELECT module_name, CAST(grade AS DOUBLE), CAST(coefficient AS DOUBLE) \
                 FROM {table} WHERE lower(module_name) = lower(?) LIMIT 1"
            ),
        }
    }
}

// figure out dialect from connection string
fn detect_dialect(url: &str) -> Dialect {
    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Dialect::Postgres
    } else if url.starts_with("mysql://") || url.starts_with("mariadb://") {
        Dialect::Mysql
    } else {
        Dialect::Sqlite
    }
}

// tests for grade lookup against a throwaway sqlite file

use ifaghelper::{GradeRecord, Grades, Lang, ModuleMatcher, Prompt};
use sqlx::{AnyConnection, Connection};
use tempfile::TempDir;

// creates grades.db with a notes table and returns (dir guard, url)
async fn seed(rows: &[(&str, f64, i64)]) -> (TempDir, String) {
    sqlx::any::install_default_drivers();

    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("grades.db").display());

    let mut conn = AnyConnection::connect(&format!("{url}?mode=rwc"))
        .await
        .unwrap();

    sqlx::query("CREATE TABLE notes (module_name TEXT NOT NULL, grade REAL, coefficient INTEGER)")
        .execute(&mut conn)
        .await
        .unwrap();

    for (module, grade, coefficient) in rows {
        sqlx::query("INSERT INTO notes (module_name, grade, coefficient) VALUES ($1, $2, $3)")
            .bind(*module)
            .bind(*grade)
            .bind(*coefficient)
            .execute(&mut conn)
            .await
            .unwrap();
    }

    conn.close().await.unwrap();
    (dir, url)
}

fn grades(url: &str) -> Grades {
    Grades::new(url, "notes", Prompt::new(Lang::En))
}

#[tokio::test]
async fn test_no_module_skips_database() {
    // this url can't be opened, so any db access would show up as an error
    let grades = grades("sqlite:///nonexistent/dir/grades.db");
    assert_eq!(grades.summary(None).await, "The module is not specified.");
}

#[tokio::test]
async fn test_grade_found() {
    let (_dir, url) = seed(&[("Cloud Computing", 14.0, 2)]).await;
    let matcher = ModuleMatcher::new(["cloud computing"]);

    let module = matcher.find("What's my grade in cloud computing?");
    let summary = grades(&url).summary(module).await;

    assert!(summary.contains("Cloud Computing"));
    assert!(summary.contains("14/20"));
    assert!(summary.contains("Coefficient: 2"));
}

#[tokio::test]
async fn test_fetch_record() {
    let (_dir, url) = seed(&[("Compilation", 12.5, 3)]).await;

    let record = grades(&url).fetch("compilation").await.unwrap();
    assert_eq!(
        record,
        Some(GradeRecord {
            module_name: "Compilation".to_string(),
            grade: Some(12.5),
            coefficient: Some(3.0),
        })
    );
}

#[tokio::test]
async fn test_exact_match_only() {
    let (_dir, url) = seed(&[("Cloud Computing Advanced", 18.0, 1)]).await;

    let record = grades(&url).fetch("cloud computing").await.unwrap();
    assert!(record.is_none());
}

#[tokio::test]
async fn test_no_grade_found() {
    let (_dir, url) = seed(&[("Cloud Computing", 14.0, 2)]).await;

    let summary = grades(&url).summary(Some("compilation")).await;
    assert_eq!(summary, "No grade found for compilation.");
}

#[tokio::test]
async fn test_first_row_only() {
    let (_dir, url) = seed(&[("Compilation", 10.0, 2), ("compilation", 16.0, 2)]).await;

    let summary = grades(&url).summary(Some("compilation")).await;
    assert_eq!(summary.matches("/20").count(), 1);
}

#[tokio::test]
async fn test_connection_error_is_absorbed() {
    let grades = grades("sqlite:///nonexistent/dir/grades.db");

    assert!(grades.fetch("compilation").await.is_err());
    assert_eq!(
        grades.summary(Some("compilation")).await,
        "Error retrieving the grade."
    );
}

#[tokio::test]
async fn test_missing_table_is_absorbed() {
    let (_dir, url) = seed(&[]).await;
    let grades = Grades::new(&url, "grades", Prompt::new(Lang::En));

    assert_eq!(
        grades.summary(Some("compilation")).await,
        "Error retrieving the grade."
    );
}

#[tokio::test]
async fn test_french_summary() {
    let (_dir, url) = seed(&[("Cloud Computing", 14.0, 2)]).await;
    let grades = Grades::new(&url, "notes", Prompt::new(Lang::Fr));

    let summary = grades.summary(Some("cloud computing")).await;
    assert!(summary.starts_with("Note trouvée :"));
    assert!(summary.contains("14/20"));

    assert_eq!(
        grades.summary(Some("compilation")).await,
        "Aucune note trouvée pour compilation."
    );
}

#[tokio::test]
async fn test_ungraded_module_still_summarised() {
    let (_dir, url) = seed(&[]).await;

    let mut conn = AnyConnection::connect(&url).await.unwrap();
    sqlx::query("INSERT INTO notes VALUES ('Compilation', NULL, 2)")
        .execute(&mut conn)
        .await
        .unwrap();
    conn.close().await.unwrap();

    let summary = grades(&url).summary(Some("compilation")).await;
    assert!(summary.starts_with("Grade found:"));
    assert!(summary.contains("- Grade: not graded yet"));
    assert!(summary.contains("- Coefficient: 2"));
}

#[tokio::test]
async fn test_accented_uppercase_stored_name() {
    let (_dir, url) = seed(&[("SÉCURITÉ INFORMATIQUE", 15.0, 3)]).await;

    let summary = grades(&url).summary(Some("sécurité informatique")).await;
    assert!(summary.contains("- Module: SÉCURITÉ INFORMATIQUE"));
    assert!(summary.contains("15/20"));
    assert!(summary.contains("Coefficient: 3"));
}

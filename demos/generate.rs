use formgen::markup::{render_form, render_table};
use formgen::{Bindings, ConfigOverlay, FormRenderer, PriorValues, SqliteSource, TableRenderer};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let source = SqliteSource::connect("sqlite::memory:", 1).await?;
    for sql in [
        "CREATE TABLE roles (id INTEGER PRIMARY KEY, title TEXT)",
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            name VARCHAR(100),
            email VARCHAR(255),
            age INTEGER,
            bio TEXT,
            joined DATE,
            role_id INTEGER,
            is_verified INTEGER DEFAULT 0
        )",
        "INSERT INTO roles (id, title) VALUES (1, 'editor'), (2, 'admin'), (3, 'viewer')",
        "INSERT INTO users (name, email, age, bio, joined, role_id)
         VALUES ('Ada', 'ada@mail.com', 36, 'Analyst', '2024-01-01', 2)",
    ] {
        sqlx::query(sql).execute(source.pool()).await?;
    }

    let overlay = Arc::new(ConfigOverlay::from_json_str(
        r#"{
            "disabled_fields": ["id"],
            "readonly_fields": ["is_verified"],
            "form_labels": {"name": "Full Name", "role_id": "Role"},
            "table_header_names": {"role_id": "Role"},
            "field_placeholders": {"email": "Enter your email..."}
        }"#,
    )?);
    let source = Arc::new(source);

    let form = FormRenderer::new(source.clone(), overlay.clone())
        .with_bindings(Bindings::new().single("role_id", "roles", "id", "title"))
        .render("users", 2, &PriorValues::new().with("role_id", "2"))
        .await?;
    println!("{}", render_form(&form, "save.php")?);

    let table = TableRenderer::new(source, overlay).render("users").await?;
    println!("{}", render_table(&table)?);

    Ok(())
}

use std::{path::Path, str::FromStr, sync::Arc};

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};

use crate::domain::{
    repository::TodoRepository,
    todo::{DueDate, Todo, TodoId, TodoPayload},
};

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("parsing database url {database_url}"))?
            .create_if_missing(true);
        let pool_options = if is_in_memory(database_url) {
            // Every connection to `:memory:` opens its own database, so pin the
            // pool to a single connection that is never recycled.
            SqlitePoolOptions::new().max_connections(1).idle_timeout(None).max_lifetime(None)
        } else {
            create_parent_dir(&options.clone().get_filename())?;
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("connecting to {database_url}"))?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id TEXT PRIMARY KEY,
                description TEXT NOT NULL,
                completed BOOLEAN NOT NULL,
                due_date TEXT NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn create(&self, input: TodoPayload) -> Result<Todo> {
        let todo = input.into_todo(TodoId::generate());
        sqlx::query(
            "INSERT INTO todos (id, description, completed, due_date) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(todo.id.as_str())
        .bind(&todo.description)
        .bind(todo.completed)
        .bind(todo.due_date.as_str())
        .execute(&*self.pool)
        .await?;
        Ok(todo)
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>> {
        let row = sqlx::query("SELECT id, description, completed, due_date FROM todos WHERE id = ?1")
            .bind(id.as_str())
            .fetch_optional(&*self.pool)
            .await?;
        row.map(row_to_todo).transpose()
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        let rows = sqlx::query("SELECT id, description, completed, due_date FROM todos ORDER BY rowid ASC")
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter().map(row_to_todo).collect()
    }

    async fn update(&self, id: TodoId, input: TodoPayload) -> Result<Option<Todo>> {
        let todo = input.into_todo(id);
        let result = sqlx::query("UPDATE todos SET description = ?2, completed = ?3, due_date = ?4 WHERE id = ?1")
            .bind(todo.id.as_str())
            .bind(&todo.description)
            .bind(todo.completed)
            .bind(todo.due_date.as_str())
            .execute(&*self.pool)
            .await?;
        Ok((result.rows_affected() > 0).then_some(todo))
    }

    async fn delete(&self, id: TodoId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id.as_str())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_todo(row: SqliteRow) -> Result<Todo> {
    let id: String = row.try_get("id")?;
    let due_date: String = row.try_get("due_date")?;
    let due_date: DueDate = due_date
        .parse()
        .with_context(|| format!("stored due date of todo {id}"))?;
    Ok(Todo {
        description: row.try_get("description")?,
        completed: row.try_get("completed")?,
        due_date,
        id: TodoId(id),
    })
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn create_parent_dir(db_file: &Path) -> Result<()> {
    match db_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)
            .with_context(|| format!("creating database directory {}", dir.display())),
        _ => Ok(()),
    }
}

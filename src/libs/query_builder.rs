use serde::Serialize;

/// SQL flavour used to quote identifiers and cast values to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Dialect {
    MySql,
    Postgres,
    Sqlite,
}

impl Dialect {
    /// Quote an identifier, doubling any embedded quote character.
    pub fn quote_ident(&self, ident: &str) -> String {
        match self {
            Dialect::MySql => format!("`{}`", ident.replace('`', "``")),
            Dialect::Postgres | Dialect::Sqlite => format!("\"{}\"", ident.replace('"', "\"\"")),
        }
    }

    /// Expression casting a column to its textual form.
    pub fn text_cast(&self, column: &str) -> String {
        let quoted = self.quote_ident(column);
        match self {
            Dialect::MySql => format!("CAST({} AS CHAR)", quoted),
            Dialect::Postgres | Dialect::Sqlite => format!("CAST({} AS TEXT)", quoted),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::MySql => "MySQL",
            Dialect::Postgres => "PostgreSQL",
            Dialect::Sqlite => "SQLite",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Read-only SELECT builder; every identifier goes through the dialect's quoting.
pub struct QueryBuilder {
    dialect: Dialect,
    table: String,
    selects: Vec<String>,
    order_clause: Option<String>,
}

impl QueryBuilder {
    pub fn new(dialect: Dialect, table: &str) -> Self {
        Self {
            dialect,
            table: table.to_string(),
            selects: vec![],
            order_clause: None,
        }
    }

    /// Select `column` cast to text, aliased as `alias`.
    pub fn select_text(mut self, column: &str, alias: &str) -> Self {
        let expr = format!(
            "{} AS {}",
            self.dialect.text_cast(column),
            self.dialect.quote_ident(alias)
        );
        self.selects.push(expr);
        self
    }

    pub fn order_by(mut self, column: &str, direction: Direction) -> Self {
        let dir = match direction {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        };
        self.order_clause = Some(format!(
            "ORDER BY {} {}",
            self.dialect.quote_ident(column),
            dir
        ));
        self
    }

    pub fn build_sql(&self) -> String {
        let selects = if self.selects.is_empty() {
            "*".to_string()
        } else {
            self.selects.join(", ")
        };
        let mut sql = format!(
            "SELECT {} FROM {}",
            selects,
            self.dialect.quote_ident(&self.table)
        );
        if let Some(order) = &self.order_clause {
            sql += &format!(" {}", order);
        }
        sql
    }
}

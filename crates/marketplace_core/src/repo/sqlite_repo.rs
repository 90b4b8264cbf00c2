//! SQLite-backed item store.
//!
//! # Responsibility
//! - Persist items in the relational `items` table.
//! - Resolve category names to `categories` rows on write.
//!
//! # Invariants
//! - Write paths validate the item before any SQL mutation.
//! - An item whose category does not exist is never inserted.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::DbError;
use crate::model::item::{Item, ItemId};
use crate::repo::{check_insertable, check_keyword, ItemRepository, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Mutex, MutexGuard};

const ITEM_SELECT_SQL: &str = "SELECT
    i.id AS id,
    i.name AS name,
    c.name AS category,
    i.image_name AS image_name
FROM items i
JOIN categories c ON c.id = i.category_id";

/// SQLite-backed item repository.
///
/// Owns one connection; concurrent callers are serialized on it.
pub struct SqliteItemRepository {
    conn: Mutex<Connection>,
}

impl SqliteItemRepository {
    /// Wraps a connection returned by `db::open_db` or `db::open_db_in_memory`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Creates `name` as a category if absent and returns its id.
    pub fn add_category(&self, name: &str) -> RepoResult<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepoError::InvalidInput(
                "category name is required".to_string(),
            ));
        }

        let conn = self.lock()?;
        conn.execute(
            "INSERT OR IGNORE INTO categories (name) VALUES (?1);",
            [name],
        )?;
        lookup_category_id(&conn, name)
    }

    /// Returns the id of the category called `name`.
    pub fn category_id(&self, name: &str) -> RepoResult<i64> {
        let conn = self.lock()?;
        lookup_category_id(&conn, name)
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| RepoError::Db(DbError::ConnectionPoisoned))
    }
}

impl ItemRepository for SqliteItemRepository {
    fn insert_item(&self, item: &mut Item) -> RepoResult<()> {
        check_insertable(item)?;

        let conn = self.lock()?;
        let category_id = lookup_category_id(&conn, &item.category)?;
        conn.execute(
            "INSERT INTO items (name, category_id, image_name) VALUES (?1, ?2, ?3);",
            params![item.name.as_str(), category_id, item.image_name.as_str()],
        )?;

        item.id = ItemId::new(conn.last_insert_rowid());
        debug!(
            "event=item_insert module=repo status=ok backend=sqlite id={} category_id={}",
            item.id, category_id
        );
        Ok(())
    }

    fn list_items(&self) -> RepoResult<Vec<Item>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{ITEM_SELECT_SQL} ORDER BY i.id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Item> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{ITEM_SELECT_SQL} WHERE i.id = ?1;"))?;
        let mut rows = stmt.query([id.get()])?;
        if let Some(row) = rows.next()? {
            return parse_item_row(row);
        }

        Err(RepoError::ItemNotFound(id))
    }

    fn search_items(&self, keyword: &str) -> RepoResult<Vec<Item>> {
        check_keyword(keyword)?;

        let conn = self.lock()?;
        // instr() is case-sensitive, unlike LIKE.
        let mut stmt = conn.prepare(&format!(
            "{ITEM_SELECT_SQL} WHERE instr(i.name, ?1) > 0 ORDER BY i.id ASC;"
        ))?;
        let mut rows = stmt.query([keyword])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }
}

/// Category names are matched trimmed, the same way `add_category` stores them.
fn lookup_category_id(conn: &Connection, name: &str) -> RepoResult<i64> {
    let name = name.trim();
    conn.query_row(
        "SELECT id FROM categories WHERE name = ?1;",
        [name],
        |row| row.get::<_, i64>(0),
    )
    .optional()?
    .ok_or_else(|| RepoError::CategoryNotFound(name.to_string()))
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let id: i64 = row.get("id")?;
    let item = Item {
        id: ItemId::new(id),
        name: row.get("name")?,
        category: row.get("category")?,
        image_name: row.get("image_name")?,
    };
    item.validate()
        .map_err(|err| RepoError::InvalidData(format!("items row {id}: {err}")))?;
    Ok(item)
}

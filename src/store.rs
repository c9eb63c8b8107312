// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Durable record store for transactions and categories.
//!
//! Every successful write publishes exactly one new [`Snapshot`] on the store's
//! `watch` channels. The snapshot is read inside the same SQLite transaction
//! as the write, so observers never see a mix of two store states.

use crate::db;
use crate::error::{StoreError, StoreResult};
use crate::filter::Filter;
use crate::models::{
    Category, Kind, NewCategory, NewTransaction, Transaction, normalize_description,
    truncate_millis,
};
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{debug, info};

/// Point-in-time contents of the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Bumped once per published write.
    pub revision: u64,
    /// Most recent first, ties by id descending.
    pub transactions: Vec<Transaction>,
    /// Ordered by name.
    pub categories: Vec<Category>,
}

pub trait RecordStore {
    fn insert_transaction(&self, new: &NewTransaction) -> StoreResult<i64>;
    /// Replaces the whole record with the same id.
    fn update_transaction(&self, transaction: &Transaction) -> StoreResult<()>;
    fn delete_transaction(&self, id: i64) -> StoreResult<()>;
    fn transaction(&self, id: i64) -> StoreResult<Option<Transaction>>;
    fn find_transactions(
        &self,
        predicate: &dyn Fn(&Transaction) -> bool,
    ) -> StoreResult<Vec<Transaction>>;

    fn insert_category(&self, new: &NewCategory) -> StoreResult<i64>;
    fn update_category(&self, category: &Category) -> StoreResult<()>;
    /// Referencing transactions keep existing with their category cleared.
    fn delete_category(&self, id: i64) -> StoreResult<()>;
    fn category(&self, id: i64) -> StoreResult<Option<Category>>;
    fn find_categories(&self, predicate: &dyn Fn(&Category) -> bool)
    -> StoreResult<Vec<Category>>;

    fn observe(&self) -> watch::Receiver<Arc<Snapshot>>;
    fn observe_all(&self) -> watch::Receiver<Arc<Vec<Transaction>>>;
    fn observe_categories(&self) -> watch::Receiver<Arc<Vec<Category>>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Touched {
    Transactions,
    Categories,
    Both,
}

pub struct SqliteStore {
    conn: Mutex<Connection>,
    snapshot: watch::Sender<Arc<Snapshot>>,
    transactions: watch::Sender<Arc<Vec<Transaction>>>,
    categories: watch::Sender<Arc<Vec<Category>>>,
}

const TX_COLUMNS: &str = "id, kind, amount, description, category_id, occurred_at";
const TX_ORDER: &str = "ORDER BY occurred_at DESC, id DESC";

struct RawTransaction {
    id: i64,
    kind: Kind,
    amount: String,
    description: String,
    category_id: Option<i64>,
    occurred_at: i64,
}

impl RawTransaction {
    fn from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: r.get(0)?,
            kind: r.get(1)?,
            amount: r.get(2)?,
            description: r.get(3)?,
            category_id: r.get(4)?,
            occurred_at: r.get(5)?,
        })
    }

    fn into_transaction(self) -> StoreResult<Transaction> {
        let amount = self.amount.parse::<Decimal>().map_err(|_| {
            StoreError::Corrupt(format!(
                "Invalid amount '{}' on transaction {}",
                self.amount, self.id
            ))
        })?;
        let timestamp = DateTime::<Utc>::from_timestamp_millis(self.occurred_at).ok_or_else(|| {
            StoreError::Corrupt(format!(
                "Invalid timestamp {} on transaction {}",
                self.occurred_at, self.id
            ))
        })?;
        Ok(Transaction {
            id: self.id,
            kind: self.kind,
            amount,
            description: self.description,
            category_id: self.category_id,
            timestamp,
        })
    }
}

fn category_from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: r.get(0)?,
        name: r.get(1)?,
        icon: r.get(2)?,
        color: r.get(3)?,
    })
}

fn collect_transactions(
    stmt: &mut rusqlite::Statement<'_>,
    params: impl rusqlite::Params,
) -> StoreResult<Vec<Transaction>> {
    let rows = stmt.query_map(params, RawTransaction::from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?.into_transaction()?);
    }
    Ok(out)
}

fn load_transactions(conn: &Connection) -> StoreResult<Vec<Transaction>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {} FROM transactions {}",
        TX_COLUMNS, TX_ORDER
    ))?;
    collect_transactions(&mut stmt, [])
}

fn load_categories(conn: &Connection) -> StoreResult<Vec<Category>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, name, icon, color FROM categories ORDER BY name, id")?;
    let rows = stmt.query_map([], category_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

impl SqliteStore {
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Bootstraps the schema and publishes the initial snapshot.
    pub fn from_connection(conn: Connection) -> StoreResult<Self> {
        db::init_schema(&conn)?;
        let initial = Snapshot {
            revision: 0,
            transactions: load_transactions(&conn)?,
            categories: load_categories(&conn)?,
        };
        let (transactions, _) = watch::channel(Arc::new(initial.transactions.clone()));
        let (categories, _) = watch::channel(Arc::new(initial.categories.clone()));
        let (snapshot, _) = watch::channel(Arc::new(initial));
        Ok(Self {
            conn: Mutex::new(conn),
            snapshot,
            transactions,
            categories,
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Runs `op` and reloads the snapshot inside one SQLite transaction, then
    /// publishes it. Nothing is published when `op` fails.
    fn write<T>(
        &self,
        touched: Touched,
        op: impl FnOnce(&Connection) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let conn = self.lock()?;
        let tx = conn.unchecked_transaction()?;
        let out = op(&tx)?;
        let transactions = load_transactions(&tx)?;
        let categories = load_categories(&tx)?;
        tx.commit()?;

        let revision = self.snapshot.borrow().revision + 1;
        let snapshot = Snapshot {
            revision,
            transactions,
            categories,
        };
        if matches!(touched, Touched::Transactions | Touched::Both) {
            self.transactions
                .send_replace(Arc::new(snapshot.transactions.clone()));
        }
        if matches!(touched, Touched::Categories | Touched::Both) {
            self.categories
                .send_replace(Arc::new(snapshot.categories.clone()));
        }
        self.snapshot.send_replace(Arc::new(snapshot));
        debug!(revision, ?touched, "store snapshot published");
        Ok(out)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.borrow().clone()
    }

    /// Same conjunctive filter as [`crate::query::resolve`], evaluated by SQLite.
    pub fn query(&self, filter: &Filter, limit: Option<usize>) -> StoreResult<Vec<Transaction>> {
        let mut sql = format!("SELECT {} FROM transactions WHERE 1=1", TX_COLUMNS);
        let mut params_vec: Vec<Value> = Vec::new();

        if let Some(kind) = filter.kind {
            sql.push_str(" AND kind=?");
            params_vec.push(Value::Text(kind.as_str().to_string()));
        }
        if let Some(cat) = filter.category_id {
            sql.push_str(" AND category_id=?");
            params_vec.push(Value::Integer(cat));
        }
        if let Some(from) = filter.date_from {
            sql.push_str(" AND occurred_at>=?");
            params_vec.push(Value::Integer(from.timestamp_millis()));
        }
        if let Some(to) = filter.date_to {
            sql.push_str(" AND occurred_at<=?");
            params_vec.push(Value::Integer(to.timestamp_millis()));
        }
        sql.push(' ');
        sql.push_str(TX_ORDER);
        if let Some(limit) = limit {
            sql.push_str(" LIMIT ?");
            params_vec.push(Value::Integer(limit as i64));
        }

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        collect_transactions(&mut stmt, rusqlite::params_from_iter(params_vec))
    }

    pub fn category_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        let name = name.trim();
        let mut found = self.find_categories(&|c| c.name.eq_ignore_ascii_case(name))?;
        Ok(if found.is_empty() {
            None
        } else {
            Some(found.remove(0))
        })
    }

    pub fn setting(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = self.lock()?;
        let v = conn
            .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

impl RecordStore for SqliteStore {
    fn insert_transaction(&self, new: &NewTransaction) -> StoreResult<i64> {
        let timestamp = truncate_millis(new.timestamp.unwrap_or_else(Utc::now));
        let description = normalize_description(&new.description);
        let id = self.write(Touched::Transactions, |conn| {
            conn.execute(
                "INSERT INTO transactions(kind, amount, description, category_id, occurred_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    new.kind,
                    new.amount.to_string(),
                    description,
                    new.category_id,
                    timestamp.timestamp_millis()
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        info!(id, kind = %new.kind, amount = %new.amount, "transaction recorded");
        Ok(id)
    }

    fn update_transaction(&self, t: &Transaction) -> StoreResult<()> {
        self.write(Touched::Transactions, |conn| {
            let changed = conn.execute(
                "UPDATE transactions SET kind=?2, amount=?3, description=?4, category_id=?5, occurred_at=?6
                 WHERE id=?1",
                params![
                    t.id,
                    t.kind,
                    t.amount.to_string(),
                    normalize_description(&t.description),
                    t.category_id,
                    t.timestamp.timestamp_millis()
                ],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound {
                    entity: "Transaction",
                    id: t.id,
                });
            }
            Ok(())
        })?;
        info!(id = t.id, "transaction updated");
        Ok(())
    }

    fn delete_transaction(&self, id: i64) -> StoreResult<()> {
        self.write(Touched::Transactions, |conn| {
            let changed = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
            if changed == 0 {
                return Err(StoreError::NotFound {
                    entity: "Transaction",
                    id,
                });
            }
            Ok(())
        })?;
        info!(id, "transaction deleted");
        Ok(())
    }

    fn transaction(&self, id: i64) -> StoreResult<Option<Transaction>> {
        let conn = self.lock()?;
        let raw = conn
            .query_row(
                &format!("SELECT {} FROM transactions WHERE id=?1", TX_COLUMNS),
                params![id],
                RawTransaction::from_row,
            )
            .optional()?;
        raw.map(RawTransaction::into_transaction).transpose()
    }

    fn find_transactions(
        &self,
        predicate: &dyn Fn(&Transaction) -> bool,
    ) -> StoreResult<Vec<Transaction>> {
        let conn = self.lock()?;
        let mut all = load_transactions(&conn)?;
        all.retain(|t| predicate(t));
        Ok(all)
    }

    fn insert_category(&self, new: &NewCategory) -> StoreResult<i64> {
        let id = self.write(Touched::Categories, |conn| {
            conn.execute(
                "INSERT INTO categories(name, icon, color) VALUES (?1, ?2, ?3)",
                params![new.name.trim(), new.icon, new.color],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        info!(id, name = %new.name, "category added");
        Ok(id)
    }

    fn update_category(&self, c: &Category) -> StoreResult<()> {
        self.write(Touched::Categories, |conn| {
            let changed = conn.execute(
                "UPDATE categories SET name=?2, icon=?3, color=?4 WHERE id=?1",
                params![c.id, c.name.trim(), c.icon, c.color],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound {
                    entity: "Category",
                    id: c.id,
                });
            }
            Ok(())
        })?;
        info!(id = c.id, "category updated");
        Ok(())
    }

    fn delete_category(&self, id: i64) -> StoreResult<()> {
        let detached = self.write(Touched::Both, |conn| {
            // Explicit so the null-out holds even with foreign keys disabled.
            let detached = conn.execute(
                "UPDATE transactions SET category_id=NULL WHERE category_id=?1",
                params![id],
            )?;
            let changed = conn.execute("DELETE FROM categories WHERE id=?1", params![id])?;
            if changed == 0 {
                return Err(StoreError::NotFound {
                    entity: "Category",
                    id,
                });
            }
            Ok(detached)
        })?;
        info!(id, detached, "category deleted");
        Ok(())
    }

    fn category(&self, id: i64) -> StoreResult<Option<Category>> {
        let conn = self.lock()?;
        let c = conn
            .query_row(
                "SELECT id, name, icon, color FROM categories WHERE id=?1",
                params![id],
                category_from_row,
            )
            .optional()?;
        Ok(c)
    }

    fn find_categories(
        &self,
        predicate: &dyn Fn(&Category) -> bool,
    ) -> StoreResult<Vec<Category>> {
        let conn = self.lock()?;
        let mut all = load_categories(&conn)?;
        all.retain(|c| predicate(c));
        Ok(all)
    }

    fn observe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.snapshot.subscribe()
    }

    fn observe_all(&self) -> watch::Receiver<Arc<Vec<Transaction>>> {
        self.transactions.subscribe()
    }

    fn observe_categories(&self) -> watch::Receiver<Arc<Vec<Category>>> {
        self.categories.subscribe()
    }
}

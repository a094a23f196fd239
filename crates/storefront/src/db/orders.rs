//! Order repository backed by SQLite, with a session-only fallback.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tokio::sync::Mutex;

use food_express_core::{Email, OrderId};

use super::OrderStoreError;
use crate::models::order::{NewOrder, Order, OrderItem};

/// Schema applied on open. `IF NOT EXISTS` keeps reopening idempotent; the
/// only migration policy is a full schema version bump.
const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS orders (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_name TEXT NOT NULL,
    email         TEXT NOT NULL,
    address       TEXT NOT NULL,
    items         TEXT NOT NULL,
    subtotal      TEXT NOT NULL,
    tax           TEXT NOT NULL,
    total         TEXT NOT NULL,
    date          TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_orders_customer_name ON orders (customer_name);
CREATE INDEX IF NOT EXISTS idx_orders_email ON orders (email);
CREATE INDEX IF NOT EXISTS idx_orders_date ON orders (date);
";

/// Durable order store over an embedded SQLite database.
#[derive(Debug, Clone)]
pub struct OrderStore {
    pool: SqlitePool,
}

impl OrderStore {
    /// Open (creating and migrating if necessary) the order store.
    ///
    /// # Errors
    ///
    /// Returns `OrderStoreError::Unavailable` if the database cannot be
    /// opened or the schema cannot be applied.
    pub async fn open(path: &Path) -> Result<Self, OrderStoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .map_err(OrderStoreError::Unavailable)?;

        sqlx::raw_sql(SCHEMA)
            .execute(&pool)
            .await
            .map_err(OrderStoreError::Unavailable)?;

        Ok(Self { pool })
    }

    /// Shut the store down. Subsequent operations fail with `NotInitialized`.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Insert a new order and return the store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `OrderStoreError::Write` if the engine rejects the insert, or
    /// `NotInitialized` if the store has been shut down.
    pub async fn add(&self, order: &NewOrder) -> Result<OrderId, OrderStoreError> {
        if self.pool.is_closed() {
            return Err(OrderStoreError::NotInitialized);
        }

        let items = serde_json::to_string(&order.items)
            .map_err(|e| OrderStoreError::Corrupt(e.to_string()))?;

        let result = sqlx::query(
            r"
            INSERT INTO orders (customer_name, email, address, items, subtotal, tax, total, date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
        )
        .bind(&order.customer_name)
        .bind(order.email.as_str())
        .bind(&order.address)
        .bind(items)
        .bind(&order.subtotal)
        .bind(&order.tax)
        .bind(&order.total)
        .bind(order.date)
        .execute(&self.pool)
        .await
        .map_err(OrderStoreError::Write)?;

        Ok(OrderId::new(result.last_insert_rowid()))
    }

    /// Fetch all stored orders, in storage order.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` if the store has been shut down, `Query` if
    /// the select fails, or `Corrupt` if a row cannot be decoded.
    pub async fn get_all(&self) -> Result<Vec<Order>, OrderStoreError> {
        if self.pool.is_closed() {
            return Err(OrderStoreError::NotInitialized);
        }

        let rows = sqlx::query(
            r"
            SELECT id, customer_name, email, address, items, subtotal, tax, total, date
            FROM orders
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(OrderStoreError::Query)?;

        rows.iter().map(decode_row).collect()
    }

    /// Case-insensitive substring search against customer name or email.
    ///
    /// Implemented as a filter over `get_all`; the three indexes exist for
    /// direct lookups, not for this scan.
    ///
    /// # Errors
    ///
    /// Propagates the same errors as [`OrderStore::get_all`].
    pub async fn search(&self, query: &str) -> Result<Vec<Order>, OrderStoreError> {
        let orders = self.get_all().await?;
        Ok(filter_orders(orders, query))
    }
}

/// Decode one SQLite row into an [`Order`].
fn decode_row(row: &sqlx::sqlite::SqliteRow) -> Result<Order, OrderStoreError> {
    let id: i64 = row.try_get("id").map_err(OrderStoreError::Query)?;
    let customer_name: String = row
        .try_get("customer_name")
        .map_err(OrderStoreError::Query)?;
    let email: String = row.try_get("email").map_err(OrderStoreError::Query)?;
    let address: String = row.try_get("address").map_err(OrderStoreError::Query)?;
    let items: String = row.try_get("items").map_err(OrderStoreError::Query)?;
    let subtotal: String = row.try_get("subtotal").map_err(OrderStoreError::Query)?;
    let tax: String = row.try_get("tax").map_err(OrderStoreError::Query)?;
    let total: String = row.try_get("total").map_err(OrderStoreError::Query)?;
    let date: DateTime<Utc> = row.try_get("date").map_err(OrderStoreError::Query)?;

    let email = Email::parse(&email)
        .map_err(|e| OrderStoreError::Corrupt(format!("invalid email in database: {e}")))?;
    let items: Vec<OrderItem> = serde_json::from_str(&items)
        .map_err(|e| OrderStoreError::Corrupt(format!("invalid items in database: {e}")))?;

    Ok(Order {
        id: OrderId::new(id),
        customer_name,
        email,
        address,
        items,
        subtotal,
        tax,
        total,
        date,
    })
}

/// Shared search predicate: case-insensitive substring match on customer
/// name OR email.
fn filter_orders(orders: Vec<Order>, query: &str) -> Vec<Order> {
    let query = query.to_lowercase();
    orders
        .into_iter()
        .filter(|order| {
            order.customer_name.to_lowercase().contains(&query)
                || order.email.as_str().to_lowercase().contains(&query)
        })
        .collect()
}

/// Ephemeral, session-only order list used when the durable store is
/// unavailable. Same contract as [`OrderStore`], ids assigned sequentially
/// from 1, everything lost on process exit.
#[derive(Debug, Default)]
pub struct SessionOrders {
    inner: Mutex<SessionOrdersInner>,
}

#[derive(Debug, Default)]
struct SessionOrdersInner {
    next_id: i64,
    orders: Vec<Order>,
}

impl SessionOrders {
    /// Create an empty session-only order list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an order, assigning the next sequential id.
    pub async fn add(&self, order: &NewOrder) -> OrderId {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let id = OrderId::new(inner.next_id);
        inner.orders.push(order.clone().into_order(id));
        id
    }

    /// All orders accepted this session.
    pub async fn get_all(&self) -> Vec<Order> {
        self.inner.lock().await.orders.clone()
    }
}

/// The order repository handed to handlers: either the durable SQLite store
/// or, when opening it failed, the degraded session-only list.
#[derive(Debug)]
pub enum OrdersRepo {
    /// Durable SQLite-backed store.
    Store(OrderStore),
    /// Degraded mode: orders survive only until the process exits.
    Session(SessionOrders),
}

impl OrdersRepo {
    /// Open the durable store, degrading to the session-only list if the
    /// engine rejects the open. The degradation is warned exactly once here.
    pub async fn open(path: &Path) -> Self {
        match OrderStore::open(path).await {
            Ok(store) => Self::Store(store),
            Err(e) => {
                tracing::warn!(
                    "order store unavailable, orders will not persist across restarts: {e}"
                );
                Self::Session(SessionOrders::new())
            }
        }
    }

    /// Whether the repository is running in degraded, session-only mode.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Session(_))
    }

    /// Insert a new order and return the store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `OrderStoreError::Write` (or `NotInitialized`) from the
    /// durable store; the session-only list cannot fail.
    pub async fn add(&self, order: &NewOrder) -> Result<OrderId, OrderStoreError> {
        match self {
            Self::Store(store) => store.add(order).await,
            Self::Session(session) => Ok(session.add(order).await),
        }
    }

    /// Fetch all orders.
    ///
    /// # Errors
    ///
    /// Propagates durable-store read errors; the session-only list cannot
    /// fail.
    pub async fn get_all(&self) -> Result<Vec<Order>, OrderStoreError> {
        match self {
            Self::Store(store) => store.get_all().await,
            Self::Session(session) => Ok(session.get_all().await),
        }
    }

    /// Case-insensitive substring search on customer name or email.
    ///
    /// # Errors
    ///
    /// Propagates durable-store read errors.
    pub async fn search(&self, query: &str) -> Result<Vec<Order>, OrderStoreError> {
        match self {
            Self::Store(store) => store.search(query).await,
            Self::Session(session) => Ok(filter_orders(session.get_all().await, query)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::cart::Totals;
    use food_express_core::{MenuItemId, Money};

    fn temp_db_path() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("foodexpress-test-{}.db", uuid::Uuid::new_v4()))
    }

    fn sample_order(name: &str, email: &str) -> NewOrder {
        NewOrder::from_cart(
            &[crate::models::cart::CartLine {
                id: MenuItemId::new(1),
                name: "Cake Pop".to_owned(),
                price: Money::from_units(20),
                image: String::new(),
                quantity: 2,
            }],
            Totals {
                subtotal: Money::from_units(40),
                tax: Money::new(rust_decimal::Decimal::new(320, 2)),
                total: Money::new(rust_decimal::Decimal::new(4320, 2)),
            },
            name.to_owned(),
            Email::parse(email).unwrap(),
            "1 Analytical Way".to_owned(),
        )
    }

    #[tokio::test]
    async fn test_open_add_get_all_roundtrip() {
        let path = temp_db_path();
        let store = OrderStore::open(&path).await.unwrap();

        let id = store.add(&sample_order("Ada", "ada@example.com")).await.unwrap();
        assert_eq!(id, OrderId::new(1));

        let orders = store.get_all().await.unwrap();
        assert_eq!(orders.len(), 1);
        let order = orders.first().unwrap();
        assert_eq!(order.id, id);
        assert_eq!(order.customer_name, "Ada");
        assert_eq!(order.subtotal, "40.00");
        assert_eq!(order.items.first().unwrap().quantity, 2);

        store.close().await;
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_ids_are_assigned_sequentially() {
        let path = temp_db_path();
        let store = OrderStore::open(&path).await.unwrap();

        let first = store.add(&sample_order("Ada", "ada@example.com")).await.unwrap();
        let second = store.add(&sample_order("Grace", "grace@example.com")).await.unwrap();
        assert!(second > first);

        store.close().await;
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_orders_survive_reopen() {
        let path = temp_db_path();

        let store = OrderStore::open(&path).await.unwrap();
        store.add(&sample_order("Ada", "ada@example.com")).await.unwrap();
        store.close().await;

        let reopened = OrderStore::open(&path).await.unwrap();
        let orders = reopened.get_all().await.unwrap();
        assert_eq!(orders.len(), 1);

        reopened.close().await;
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_on_name_and_email() {
        let path = temp_db_path();
        let store = OrderStore::open(&path).await.unwrap();

        store.add(&sample_order("Ada Lovelace", "ada@example.com")).await.unwrap();
        store.add(&sample_order("Grace Hopper", "grace@navy.example")).await.unwrap();

        let by_name = store.search("LOVELACE").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name.first().unwrap().customer_name, "Ada Lovelace");

        let by_email = store.search("navy").await.unwrap();
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email.first().unwrap().customer_name, "Grace Hopper");

        let none = store.search("nobody").await.unwrap();
        assert!(none.is_empty());

        store.close().await;
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_closed_store_reports_not_initialized() {
        let path = temp_db_path();
        let store = OrderStore::open(&path).await.unwrap();
        store.close().await;

        assert!(matches!(
            store.get_all().await,
            Err(OrderStoreError::NotInitialized)
        ));
        assert!(matches!(
            store.add(&sample_order("Ada", "ada@example.com")).await,
            Err(OrderStoreError::NotInitialized)
        ));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_session_orders_assign_sequential_ids() {
        let repo = OrdersRepo::Session(SessionOrders::new());
        assert!(repo.is_degraded());

        let first = repo.add(&sample_order("Ada", "ada@example.com")).await.unwrap();
        let second = repo.add(&sample_order("Grace", "grace@example.com")).await.unwrap();
        assert_eq!(first, OrderId::new(1));
        assert_eq!(second, OrderId::new(2));

        let orders = repo.get_all().await.unwrap();
        assert_eq!(orders.len(), 2);

        let found = repo.search("ada").await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_open_degrades_to_session_on_bad_path() {
        // A directory path cannot be opened as a database file.
        let repo = OrdersRepo::open(&std::env::temp_dir()).await;
        assert!(repo.is_degraded());

        let id = repo.add(&sample_order("Ada", "ada@example.com")).await.unwrap();
        assert_eq!(id, OrderId::new(1));
    }
}

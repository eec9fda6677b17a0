//! # Order Repository
//!
//! Stores placed orders.
//!
//! ## Row Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  orders                                                                 │
//! │                                                                         │
//! │  id, user_id, status, payment_method    scalar columns (filterable)    │
//! │  total_items, subtotal, tax, total      denormalized totals            │
//! │  items, shipping_address                JSON snapshots                 │
//! │  created_at                             RFC 3339 UTC                   │
//! │                                                                         │
//! │  Money columns hold the exact decimal as TEXT ("119.8000"), so no      │
//! │  precision is lost through SQLite's REAL type.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use storefront_core::{CartLine, Money, Order, OrderStatus, PaymentMethod, ShippingAddress};

/// Repository for order database operations.
///
/// ## Usage
/// ```rust,ignore
/// let order = Order::place(&cart, address, PaymentMethod::Paypal, user_id)?;
/// db.orders().insert(&order).await?;
///
/// let mine = db.orders().list_for_user("user-1", 20).await?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    user_id: Option<String>,
    status: String,
    payment_method: String,
    total_items: i64,
    subtotal: String,
    tax: String,
    total: String,
    items: String,
    shipping_address: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DbError;

    fn try_from(row: OrderRow) -> DbResult<Order> {
        let money = |column: &str, value: &str| {
            value
                .parse::<Money>()
                .map_err(|e| DbError::corrupt(column, e))
        };

        Ok(Order {
            id: Uuid::parse_str(&row.id).map_err(|e| DbError::corrupt("id", e))?,
            user_id: row.user_id,
            items: serde_json::from_str::<Vec<CartLine>>(&row.items)?,
            total_items: u64::try_from(row.total_items)
                .map_err(|e| DbError::corrupt("total_items", e))?,
            subtotal: money("subtotal", &row.subtotal)?,
            tax: money("tax", &row.tax)?,
            total: money("total", &row.total)?,
            shipping_address: serde_json::from_str::<ShippingAddress>(&row.shipping_address)?,
            payment_method: row
                .payment_method
                .parse::<PaymentMethod>()
                .map_err(|e| DbError::corrupt("payment_method", e))?,
            status: row
                .status
                .parse::<OrderStatus>()
                .map_err(|e| DbError::corrupt("status", e))?,
            created_at: row.created_at,
        })
    }
}

const SELECT_ORDER: &str = r#"
    SELECT id, user_id, status, payment_method, total_items,
           subtotal, tax, total, items, shipping_address, created_at
    FROM orders
"#;

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts a placed order.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` if an order with the same id exists.
    pub async fn insert(&self, order: &Order) -> DbResult<()> {
        let items = serde_json::to_string(&order.items)?;
        let address = serde_json::to_string(&order.shipping_address)?;
        let total_items =
            i64::try_from(order.total_items).map_err(|e| DbError::corrupt("total_items", e))?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, user_id, status, payment_method, total_items,
                subtotal, tax, total, items, shipping_address, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(order.id.to_string())
        .bind(order.user_id.as_deref())
        .bind(order.status.as_str())
        .bind(order.payment_method.as_str())
        .bind(total_items)
        .bind(order.subtotal.amount().to_string())
        .bind(order.tax.amount().to_string())
        .bind(order.total.amount().to_string())
        .bind(items)
        .bind(address)
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;

        info!(order_id = %order.id, total = %order.total, "Order stored");
        Ok(())
    }

    /// Gets an order by id.
    pub async fn get(&self, id: Uuid) -> DbResult<Option<Order>> {
        let sql = format!("{} WHERE id = ?1", SELECT_ORDER);
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Order::try_from).transpose()
    }

    /// Orders placed by `user_id`, newest first.
    pub async fn list_for_user(&self, user_id: &str, limit: u32) -> DbResult<Vec<Order>> {
        debug!(user_id = %user_id, limit = limit, "Listing orders for user");

        let sql = format!(
            "{} WHERE user_id = ?1 ORDER BY created_at DESC LIMIT ?2",
            SELECT_ORDER
        );
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(user_id)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// All orders, newest first.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<Order>> {
        let sql = format!("{} ORDER BY created_at DESC LIMIT ?1", SELECT_ORDER);
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Order::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use storefront_core::{CartLedger, Product, Rating, TaxRate};

    fn address() -> ShippingAddress {
        ShippingAddress {
            first_name: "Alan".to_string(),
            last_name: "Turing".to_string(),
            street_address: "Bletchley Park".to_string(),
            apartment: None,
            city: "Milton Keynes".to_string(),
            state: "BK".to_string(),
            zip_code: "90210".to_string(),
            country: "UK".to_string(),
            phone: "0123456789".to_string(),
        }
    }

    fn order(user: Option<&str>) -> Order {
        let product = Product {
            id: 2,
            title: "Mens Casual Premium Slim Fit T-Shirts".to_string(),
            price: "22.3".parse().unwrap(),
            description: String::new(),
            category: "men's clothing".to_string(),
            image: String::new(),
            rating: Rating::default(),
        };
        let mut ledger = CartLedger::new(TaxRate::from_bps(825));
        let cart = ledger.add_item(&product, 3).unwrap();
        Order::place(
            &cart,
            address(),
            PaymentMethod::CreditCard,
            user.map(str::to_string),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_then_get_preserves_exact_totals() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let placed = order(Some("user-1"));

        db.orders().insert(&placed).await.unwrap();
        let loaded = db.orders().get(placed.id).await.unwrap().unwrap();

        assert_eq!(loaded.tax, placed.tax);
        assert_eq!(loaded.total, placed.total);
        assert_eq!(loaded.items, placed.items);
        assert_eq!(loaded.shipping_address, placed.shipping_address);
        assert_eq!(loaded.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.orders().get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let placed = order(None);
        db.orders().insert(&placed).await.unwrap();

        let result = db.orders().insert(&placed).await;

        assert!(matches!(result, Err(DbError::UniqueViolation { .. })));
    }

    #[tokio::test]
    async fn test_list_for_user() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.orders().insert(&order(Some("a"))).await.unwrap();
        db.orders().insert(&order(Some("a"))).await.unwrap();
        db.orders().insert(&order(Some("b"))).await.unwrap();
        db.orders().insert(&order(None)).await.unwrap();

        assert_eq!(db.orders().list_for_user("a", 10).await.unwrap().len(), 2);
        assert_eq!(db.orders().list_for_user("a", 1).await.unwrap().len(), 1);
        assert_eq!(db.orders().list_recent(10).await.unwrap().len(), 4);
    }
}

//! PostgreSQL implementation of the persistence layer.

use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{
    PRODUCT_COLUMNS, ProductRow, WishlistRow, stored_product_from_row, wishlist_entry_from_row,
};
use super::{ProductStore, WishlistStore};
use crate::domain::{Product, ProductId, StoredProduct, WishlistEntry};
use crate::error::ServiceError;

/// PostgreSQL-backed persistence layer using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    /// Creates a new persistence layer with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded migrations in `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::PersistenceError`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), ServiceError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ServiceError::PersistenceError(e.to_string()))
    }
}

#[async_trait]
impl ProductStore for PostgresPersistence {
    async fn find(&self, id: ProductId) -> Result<Option<StoredProduct>, ServiceError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(stored_product_from_row))
    }

    async fn save(&self, product: &Product) -> Result<StoredProduct, ServiceError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products (id, title, price, image, brand, review_score) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (id) DO UPDATE SET \
                 title = EXCLUDED.title, \
                 price = EXCLUDED.price, \
                 image = EXCLUDED.image, \
                 brand = EXCLUDED.brand, \
                 review_score = EXCLUDED.review_score \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(product.id.get())
        .bind(&product.title)
        .bind(product.price)
        .bind(&product.image)
        .bind(product.brand.as_deref())
        .bind(product.review_score)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(product_id = %product.id, "product saved to database");
        Ok(stored_product_from_row(row))
    }
}

#[async_trait]
impl WishlistStore for PostgresPersistence {
    async fn add(
        &self,
        user_id: i64,
        product_id: ProductId,
    ) -> Result<WishlistEntry, ServiceError> {
        let result = sqlx::query_as::<_, WishlistRow>(
            "INSERT INTO wishlists (user_id, product_id) VALUES ($1, $2) \
             RETURNING id, user_id, product_id, created_at",
        )
        .bind(user_id)
        .bind(product_id.get())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(wishlist_entry_from_row(row)),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(ServiceError::AlreadyInWishlist {
                    user_id,
                    product_id,
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

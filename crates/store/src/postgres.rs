//! Relational gateway: base table plus one subtype table per category.
//!
//! Schema: `producto(codigo PK, nombre, marca, precio, cantidad)`,
//! `"ProductoAlimento"(codigo PK/FK, vencimiento)` and
//! `"ProductoElectronico"(codigo PK/FK, garantia)`. A product occupies the
//! base table and exactly one subtype table; inserts and deletes span both
//! inside a single transaction.

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::debug;

use almacen_core::{InventoryError, InventoryResult, ProductCode};
use almacen_products::{Category, Product, ProductRecord, validate_quantity};

use crate::{DatabaseConfig, ProductStore, storage_error};

const SELECT_PRODUCT: &str = r#"
    SELECT p.codigo, p.nombre, p.marca, p.precio, p.cantidad,
           a.vencimiento, e.garantia
    FROM producto p
    LEFT JOIN "ProductoAlimento" a ON a.codigo = p.codigo
    LEFT JOIN "ProductoElectronico" e ON e.codigo = p.codigo
"#;

/// Postgres-backed product store.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wrap an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using an explicit configuration. The gateway never reads the
    /// environment; credentials arrive through [`DatabaseConfig`].
    pub async fn connect(config: &DatabaseConfig) -> InventoryResult<Self> {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password);
        let pool = PgPool::connect_with(options)
            .await
            .map_err(|e| storage_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the three tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> InventoryResult<()> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS producto (
                codigo   TEXT PRIMARY KEY,
                nombre   TEXT NOT NULL,
                marca    TEXT NOT NULL,
                precio   DOUBLE PRECISION NOT NULL,
                cantidad INTEGER NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS "ProductoAlimento" (
                codigo      TEXT PRIMARY KEY REFERENCES producto(codigo),
                vencimiento INTEGER NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS "ProductoElectronico" (
                codigo   TEXT PRIMARY KEY REFERENCES producto(codigo),
                garantia INTEGER NOT NULL
            )
            "#,
        ];
        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| storage_error("ensure_schema", e))?;
        }
        Ok(())
    }
}

fn record_from_row(row: &PgRow) -> InventoryResult<ProductRecord> {
    let decode = |e| storage_error("decode row", e);
    Ok(ProductRecord {
        codigo: row.try_get("codigo").map_err(decode)?,
        nombre: row.try_get("nombre").map_err(decode)?,
        marca: row.try_get("marca").map_err(decode)?,
        precio: row.try_get("precio").map_err(decode)?,
        cantidad: row.try_get::<i32, _>("cantidad").map_err(decode)? as u32,
        vencimiento: row
            .try_get::<Option<i32>, _>("vencimiento")
            .map_err(decode)?
            .map(|v| v as u32),
        garantia: row
            .try_get::<Option<i32>, _>("garantia")
            .map_err(decode)?
            .map(|v| v as u32),
    })
}

#[async_trait]
impl ProductStore for PostgresStore {
    async fn create(&self, product: &Product) -> InventoryResult<()> {
        let code = product.code();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("create", e))?;

        let exists = sqlx::query("SELECT 1 FROM producto WHERE codigo = $1")
            .bind(code.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| storage_error("create", e))?;
        if exists.is_some() {
            return Err(InventoryError::conflict(code.clone()));
        }

        sqlx::query(
            "INSERT INTO producto (codigo, nombre, marca, precio, cantidad) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(code.as_str())
        .bind(product.name())
        .bind(product.brand())
        .bind(product.price())
        .bind(product.quantity() as i32)
        .execute(&mut *tx)
        .await
        .map_err(|e| storage_error("create", e))?;

        match product.category() {
            Category::Perishable { expiration_months } => {
                sqlx::query(r#"INSERT INTO "ProductoAlimento" (codigo, vencimiento) VALUES ($1, $2)"#)
                    .bind(code.as_str())
                    .bind(expiration_months as i32)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| storage_error("create", e))?;
            }
            Category::Electronic { warranty_months } => {
                sqlx::query(r#"INSERT INTO "ProductoElectronico" (codigo, garantia) VALUES ($1, $2)"#)
                    .bind(code.as_str())
                    .bind(warranty_months as i32)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| storage_error("create", e))?;
            }
        }

        tx.commit().await.map_err(|e| storage_error("create", e))?;
        debug!(code = %code, "product created");
        Ok(())
    }

    async fn get(&self, code: &ProductCode) -> InventoryResult<Product> {
        let row = sqlx::query(&format!("{SELECT_PRODUCT} WHERE p.codigo = $1"))
            .bind(code.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("get", e))?;
        match row {
            Some(row) => Product::try_from(record_from_row(&row)?),
            None => Err(InventoryError::not_found(code.clone())),
        }
    }

    async fn update_quantity(&self, code: &ProductCode, quantity: u32) -> InventoryResult<()> {
        let quantity = validate_quantity(quantity)?;
        let result = sqlx::query("UPDATE producto SET cantidad = $2 WHERE codigo = $1")
            .bind(code.as_str())
            .bind(quantity as i32)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("update_quantity", e))?;
        if result.rows_affected() == 0 {
            return Err(InventoryError::not_found(code.clone()));
        }
        debug!(code = %code, quantity, "quantity updated");
        Ok(())
    }

    async fn delete(&self, code: &ProductCode) -> InventoryResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("delete", e))?;

        // Only one subtype table ever matches; deleting from both is harmless.
        for statement in [
            r#"DELETE FROM "ProductoAlimento" WHERE codigo = $1"#,
            r#"DELETE FROM "ProductoElectronico" WHERE codigo = $1"#,
        ] {
            sqlx::query(statement)
                .bind(code.as_str())
                .execute(&mut *tx)
                .await
                .map_err(|e| storage_error("delete", e))?;
        }

        let result = sqlx::query("DELETE FROM producto WHERE codigo = $1")
            .bind(code.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("delete", e))?;
        if result.rows_affected() == 0 {
            return Err(InventoryError::not_found(code.clone()));
        }

        tx.commit().await.map_err(|e| storage_error("delete", e))?;
        debug!(code = %code, "product deleted");
        Ok(())
    }

    async fn list(&self) -> InventoryResult<Vec<Product>> {
        let rows = sqlx::query(&format!("{SELECT_PRODUCT} ORDER BY p.codigo"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("list", e))?;
        rows.iter()
            .map(|row| Product::try_from(record_from_row(row)?))
            .collect()
    }
}

//! Console menu over the product inventory stores.
//!
//! Backend selection from argv:
//!   almacen [json [PATH]]   — JSON document store (default, `almacen.json`)
//!   almacen postgres        — relational store, configured from
//!                             ALMACEN_DB_{HOST,PORT,NAME,USER,PASSWORD}
//!
//! Environment access lives here only; the gateways take explicit config.

mod telemetry;

use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use tracing::warn;

use almacen_core::{InventoryError, ProductCode};
use almacen_products::{Category, Product, parse_price, parse_quantity};
use almacen_store::{DatabaseConfig, JsonStore, PostgresStore, ProductStore};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    telemetry::init();
    let store = build_store().await?;
    run_menu(store.as_ref()).await
}

async fn build_store() -> Result<Box<dyn ProductStore>> {
    let mut args = std::env::args().skip(1);
    let backend = args.next();
    match backend.as_deref() {
        None | Some("json") => {
            let path = args.next().unwrap_or_else(|| "almacen.json".to_owned());
            Ok(Box::new(JsonStore::new(path)))
        }
        Some("postgres") => {
            let config = database_config_from_env()?;
            let store = PostgresStore::connect(&config)
                .await
                .context("connecting to postgres")?;
            store.ensure_schema().await.context("preparing schema")?;
            Ok(Box::new(store))
        }
        Some(other) => bail!("unknown backend {other:?}; expected \"json\" or \"postgres\""),
    }
}

fn database_config_from_env() -> Result<DatabaseConfig> {
    let defaults = DatabaseConfig::default();
    let var = |name: &str, fallback: String| std::env::var(name).unwrap_or(fallback);
    let port = var("ALMACEN_DB_PORT", defaults.port.to_string())
        .parse()
        .context("ALMACEN_DB_PORT must be a port number")?;
    Ok(DatabaseConfig {
        host: var("ALMACEN_DB_HOST", defaults.host),
        port,
        database: var("ALMACEN_DB_NAME", defaults.database),
        user: var("ALMACEN_DB_USER", defaults.user),
        password: var("ALMACEN_DB_PASSWORD", defaults.password),
    })
}

async fn run_menu(store: &dyn ProductStore) -> Result<()> {
    loop {
        println!();
        println!("====== Product inventory ======");
        println!("1. Add perishable product");
        println!("2. Add electronic product");
        println!("3. Find product by code");
        println!("4. Update quantity");
        println!("5. Delete product by code");
        println!("6. List all products");
        println!("7. Quit");
        println!("===============================");

        let choice = prompt("Select an option: ")?;
        let outcome = match choice.as_str() {
            "1" => add_product(store, Subtype::Perishable).await,
            "2" => add_product(store, Subtype::Electronic).await,
            "3" => find_product(store).await,
            "4" => update_quantity(store).await,
            "5" => delete_product(store).await,
            "6" => list_products(store).await,
            "7" => return Ok(()),
            other => {
                println!("invalid option {other:?}; pick 1-7");
                continue;
            }
        };
        if let Err(err) = outcome {
            report(&err);
        }
    }
}

enum Subtype {
    Perishable,
    Electronic,
}

async fn add_product(store: &dyn ProductStore, subtype: Subtype) -> Result<(), InventoryError> {
    let code = prompt_code()?;
    let name = prompt_io("Name: ")?;
    let brand = prompt_io("Brand: ")?;
    let price = parse_price(&prompt_io("Price: ")?)?;
    let quantity = parse_quantity(&prompt_io("Quantity: ")?)?;
    let category = match subtype {
        Subtype::Perishable => Category::Perishable {
            expiration_months: prompt_months("Expiration (months): ")?,
        },
        Subtype::Electronic => Category::Electronic {
            warranty_months: prompt_months("Warranty (months): ")?,
        },
    };

    let product = Product::new(code, name, brand, price, quantity, category)?;
    store.create(&product).await?;
    println!("saved: {product}");
    Ok(())
}

async fn find_product(store: &dyn ProductStore) -> Result<(), InventoryError> {
    let code = prompt_code()?;
    let product = store.get(&code).await?;
    println!(
        "{} | {} | price {} | quantity {}",
        product.code(),
        product,
        product.price(),
        product.quantity()
    );
    Ok(())
}

async fn update_quantity(store: &dyn ProductStore) -> Result<(), InventoryError> {
    let code = prompt_code()?;
    let quantity = parse_quantity(&prompt_io("New quantity: ")?)?;
    store.update_quantity(&code, quantity).await?;
    println!("quantity for {code} is now {quantity}");
    Ok(())
}

async fn delete_product(store: &dyn ProductStore) -> Result<(), InventoryError> {
    let code = prompt_code()?;
    store.delete(&code).await?;
    println!("deleted product {code}");
    Ok(())
}

async fn list_products(store: &dyn ProductStore) -> Result<(), InventoryError> {
    let products = store.list().await?;
    if products.is_empty() {
        println!("inventory is empty");
        return Ok(());
    }
    println!("========= All products =========");
    for product in products {
        println!("{} | {} | quantity {}", product.code(), product, product.quantity());
    }
    println!("================================");
    Ok(())
}

fn report(err: &InventoryError) {
    match err {
        InventoryError::NotFound(_) | InventoryError::Conflict(_) | InventoryError::Validation(_) => {
            println!("{err}");
        }
        InventoryError::Storage(_) => {
            warn!(%err, "store operation failed");
            println!("{err}");
        }
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush().context("flushing prompt")?;
    let mut line = String::new();
    io::stdin().read_line(&mut line).context("reading input")?;
    Ok(line.trim().to_owned())
}

// Prompt helpers used inside store flows fold I/O failures into the typed
// error so the menu loop has one error channel to report on.
fn prompt_io(label: &str) -> Result<String, InventoryError> {
    prompt(label).map_err(|e| InventoryError::storage(format!("console input: {e}")))
}

fn prompt_code() -> Result<ProductCode, InventoryError> {
    let code = prompt_io("Code: ")?;
    if code.is_empty() {
        return Err(InventoryError::validation("code cannot be empty"));
    }
    Ok(ProductCode::new(code))
}

fn prompt_months(label: &str) -> Result<u32, InventoryError> {
    prompt_io(label)?
        .parse()
        .map_err(|_| InventoryError::validation("months must be a whole number"))
}

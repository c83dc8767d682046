//! # Catalog Operations
//!
//! Category and product management: the operations behind the categories
//! page, the inventory page, and the add/edit product forms.
//!
//! ## Category Name Snapshot
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Every product write recomputes the denormalised category_name:     │
//! │                                                                     │
//! │  form.category_id ──► resolve against categories table             │
//! │        │                                                            │
//! │        ├── found ────► category_id = Some(id), name snapshotted     │
//! │        │                                                            │
//! │        └── missing / ► category_id = None, name = "Other"           │
//! │            empty                                                    │
//! │                                                                     │
//! │  The fallback is deliberate leniency: a stale category selection    │
//! │  never fails the product write, it files the product under          │
//! │  "Other". The snapshot is never trusted from the caller.            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{OpError, OpResult};
use boutique_core::validation::{parse_money_field, parse_non_negative_int, validate_name};
use boutique_core::{Category, CoreError, Product, ValidationError, FALLBACK_CATEGORY_NAME};
use boutique_db::Database;

// =============================================================================
// Input / Response Types
// =============================================================================

/// Raw product form input, every field as the string the form submitted.
///
/// Field names match the web form: `cost` and `price` are money amounts
/// in major units ("2500" = 2,500.00), `stock` and `min_level` are integer
/// counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub category_id: Option<String>,
    pub cost: String,
    pub price: String,
    pub stock: String,
    pub min_level: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub category: Category,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub product: Product,
    pub message: String,
}

// =============================================================================
// Category Operations
// =============================================================================

/// Lists all categories ordered by name (the categories page).
pub async fn list_categories(db: &Database) -> OpResult<Vec<Category>> {
    Ok(db.categories().list().await?)
}

/// Creates a new category.
///
/// ## Errors
/// - `ValidationError` - empty name, or the name already exists
pub async fn create_category(db: &Database, name: &str) -> OpResult<CategoryResponse> {
    debug!(name = %name, "create_category");

    let name = validate_name("name", name)?;

    if db.categories().get_by_name(&name).await?.is_some() {
        return Err(ValidationError::Duplicate {
            field: "Category".to_string(),
            value: name,
        }
        .into());
    }

    let category = Category {
        id: Uuid::new_v4().to_string(),
        name: name.clone(),
        created_at: Utc::now(),
    };
    db.categories().insert(&category).await?;

    info!(category_id = %category.id, name = %name, "Category created");

    Ok(CategoryResponse {
        category,
        message: format!("Category \"{}\" added!", name),
    })
}

/// Renames a category.
///
/// No uniqueness pre-check on this path; the UNIQUE index rejects a
/// collision.
///
/// ## Errors
/// - `NotFound` - no category with that id
/// - `ValidationError` - empty name, or the UNIQUE index rejected it
pub async fn rename_category(db: &Database, id: &str, new_name: &str) -> OpResult<CategoryResponse> {
    debug!(id = %id, new_name = %new_name, "rename_category");

    let new_name = validate_name("name", new_name)?;
    db.categories().rename(id, &new_name).await?;

    let category = db
        .categories()
        .get_by_id(id)
        .await?
        .ok_or_else(|| OpError::not_found("Category", id))?;

    info!(category_id = %id, "Category renamed");

    Ok(CategoryResponse {
        category,
        message: "Category updated!".to_string(),
    })
}

/// Deletes a category.
///
/// ## Errors
/// - `NotFound` - no category with that id
/// - `Conflict` - the category still has products
pub async fn delete_category(db: &Database, id: &str) -> OpResult<String> {
    debug!(id = %id, "delete_category");

    let category = db
        .categories()
        .get_by_id(id)
        .await?
        .ok_or_else(|| OpError::not_found("Category", id))?;

    let product_count = db.categories().product_count(id).await?;
    if product_count > 0 {
        return Err(CoreError::CategoryHasProducts {
            name: category.name,
            product_count,
        }
        .into());
    }

    db.categories().delete(id).await?;

    info!(category_id = %id, "Category deleted");
    Ok("Category removed.".to_string())
}

// =============================================================================
// Product Operations
// =============================================================================

/// Lists all products ordered by name (the inventory page).
pub async fn list_products(db: &Database) -> OpResult<Vec<Product>> {
    Ok(db.products().list().await?)
}

/// Fetches a single product (the edit form read).
pub async fn get_product(db: &Database, id: &str) -> OpResult<Product> {
    db.products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| OpError::not_found("Product", id))
}

/// Creates a new product from raw form input.
///
/// ## Errors
/// - `ValidationError` - name empty, cost/price not positive money,
///   stock/min_level not non-negative integers
pub async fn create_product(db: &Database, form: &ProductForm) -> OpResult<ProductResponse> {
    debug!(name = %form.name, "create_product");

    let fields = parse_form(db, form).await?;
    let now = Utc::now();

    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: fields.name,
        category_id: fields.category_id,
        category_name: fields.category_name,
        cost_cents: fields.cost,
        price_cents: fields.price,
        stock_quantity: fields.stock,
        min_stock_level: fields.min_level,
        created_at: now,
        updated_at: now,
    };
    db.products().insert(&product).await?;

    info!(product_id = %product.id, name = %product.name, "Product created");

    Ok(ProductResponse {
        product,
        message: "New item added to stock!".to_string(),
    })
}

/// Updates an existing product from raw form input.
///
/// All mutable columns are overwritten, including `stock_quantity` (the edit
/// form is also how manual stock corrections outside an audit happen).
///
/// ## Errors
/// - `NotFound` - no product with that id
/// - `ValidationError` - any field fails to parse
pub async fn update_product(db: &Database, id: &str, form: &ProductForm) -> OpResult<ProductResponse> {
    debug!(id = %id, "update_product");

    let existing = db
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| OpError::not_found("Product", id))?;

    let fields = parse_form(db, form).await?;

    let product = Product {
        id: existing.id,
        name: fields.name,
        category_id: fields.category_id,
        category_name: fields.category_name,
        cost_cents: fields.cost,
        price_cents: fields.price,
        stock_quantity: fields.stock,
        min_stock_level: fields.min_level,
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };
    db.products().update(&product).await?;

    info!(product_id = %id, "Product updated");

    let message = format!("Changes saved for {}", product.name);
    Ok(ProductResponse { product, message })
}

/// Deletes a product.
///
/// The sale and audit ledgers keep their rows for this product; history
/// outlives the catalog entry.
///
/// ## Errors
/// - `NotFound` - no product with that id
pub async fn delete_product(db: &Database, id: &str) -> OpResult<String> {
    debug!(id = %id, "delete_product");

    let product = db
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| OpError::not_found("Product", id))?;

    db.products().delete(id).await?;

    info!(product_id = %id, name = %product.name, "Product deleted");
    Ok(format!("{} deleted from the list.", product.name))
}

// =============================================================================
// Form Parsing
// =============================================================================

/// Parsed and validated product form fields.
struct ParsedForm {
    name: String,
    category_id: Option<String>,
    category_name: String,
    cost: boutique_core::Money,
    price: boutique_core::Money,
    stock: i64,
    min_level: i64,
}

/// Parses the raw form and resolves the category snapshot.
async fn parse_form(db: &Database, form: &ProductForm) -> OpResult<ParsedForm> {
    let name = validate_name("name", &form.name)?;
    let cost = parse_money_field("cost price", &form.cost)?;
    let price = parse_money_field("selling price", &form.price)?;
    let stock = parse_non_negative_int("stock", &form.stock)?;
    let min_level = parse_non_negative_int("minimum stock level", &form.min_level)?;

    let (category_id, category_name) = resolve_category(db, form.category_id.as_deref()).await?;

    Ok(ParsedForm {
        name,
        category_id,
        category_name,
        cost,
        price,
        stock,
        min_level,
    })
}

/// Resolves a submitted category id to `(category_id, category_name)`.
///
/// A missing, empty, or unresolvable selection falls back to
/// `(None, "Other")` rather than failing the write.
async fn resolve_category(
    db: &Database,
    category_id: Option<&str>,
) -> OpResult<(Option<String>, String)> {
    let Some(id) = category_id.map(str::trim).filter(|id| !id.is_empty()) else {
        return Ok((None, FALLBACK_CATEGORY_NAME.to_string()));
    };

    match db.categories().get_by_id(id).await? {
        Some(category) => Ok((Some(category.id), category.name)),
        None => Ok((None, FALLBACK_CATEGORY_NAME.to_string())),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use boutique_core::Money;
    use boutique_db::DbConfig;

    fn form(name: &str, category_id: Option<&str>) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            category_id: category_id.map(String::from),
            cost: "2500".to_string(),
            price: "4500".to_string(),
            stock: "3".to_string(),
            min_level: "5".to_string(),
        }
    }

    #[tokio::test]
    async fn test_category_lifecycle() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let created = create_category(&db, " Fragrance ").await.unwrap();
        assert_eq!(created.category.name, "Fragrance");
        assert_eq!(created.message, "Category \"Fragrance\" added!");

        // Duplicate rejected
        let err = create_category(&db, "Fragrance").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        // Empty rejected
        let err = create_category(&db, "  ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let renamed = rename_category(&db, &created.category.id, "Perfume")
            .await
            .unwrap();
        assert_eq!(renamed.category.name, "Perfume");
        assert_eq!(renamed.message, "Category updated!");

        let message = delete_category(&db, &created.category.id).await.unwrap();
        assert_eq!(message, "Category removed.");
        assert!(list_categories(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_category_with_products_conflicts() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let cat = create_category(&db, "Fragrance").await.unwrap().category;
        create_product(&db, &form("Rose Perfume", Some(&cat.id)))
            .await
            .unwrap();

        let err = delete_category(&db, &cat.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "Cannot delete category with items. Move items first.");

        // Category survives the refused delete
        assert_eq!(list_categories(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_product_snapshots_category_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let cat = create_category(&db, "Fragrance").await.unwrap().category;

        let created = create_product(&db, &form("Rose Perfume", Some(&cat.id)))
            .await
            .unwrap();
        assert_eq!(created.message, "New item added to stock!");
        assert_eq!(created.product.category_name, "Fragrance");
        assert_eq!(created.product.category_id.as_deref(), Some(cat.id.as_str()));
        assert_eq!(created.product.cost_cents, Money::from_cents(250_000));
        assert_eq!(created.product.price_cents, Money::from_cents(450_000));

        // Unresolvable category falls back to "Other" instead of failing
        let other = create_product(&db, &form("Mystery Item", Some("stale-id")))
            .await
            .unwrap();
        assert_eq!(other.product.category_name, "Other");
        assert!(other.product.category_id.is_none());

        let none = create_product(&db, &form("Loose Item", None)).await.unwrap();
        assert_eq!(none.product.category_name, "Other");
    }

    #[tokio::test]
    async fn test_update_recomputes_snapshot_and_rejects_bad_fields() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let fragrance = create_category(&db, "Fragrance").await.unwrap().category;
        let skincare = create_category(&db, "Skincare").await.unwrap().category;

        let product = create_product(&db, &form("Rose Perfume", Some(&fragrance.id)))
            .await
            .unwrap()
            .product;

        // Move to another category: snapshot follows
        let updated = update_product(&db, &product.id, &form("Rose Perfume", Some(&skincare.id)))
            .await
            .unwrap();
        assert_eq!(updated.product.category_name, "Skincare");
        assert_eq!(updated.message, "Changes saved for Rose Perfume");

        // Non-positive price rejected
        let mut bad = form("Rose Perfume", None);
        bad.price = "0".to_string();
        let err = update_product(&db, &product.id, &bad).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        // Negative stock rejected
        let mut bad = form("Rose Perfume", None);
        bad.stock = "-1".to_string();
        let err = update_product(&db, &product.id, &bad).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        // Unknown id is NotFound
        let err = update_product(&db, "missing", &form("X", None)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_delete_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = create_product(&db, &form("Rose Perfume", None))
            .await
            .unwrap()
            .product;

        let message = delete_product(&db, &product.id).await.unwrap();
        assert_eq!(message, "Rose Perfume deleted from the list.");

        let err = get_product(&db, &product.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}

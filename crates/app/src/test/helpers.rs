//! Test Helpers

use rust_decimal::Decimal;
use sqlx::query_scalar;
use uuid::Uuid;

use crate::{
    auth::{AuthServiceError, NewUser, Role, UserUuid},
    domain::products::records::ProductUuid,
    test::TestContext,
};

pub(crate) async fn create_user(
    ctx: &TestContext,
    email: &str,
    role: Role,
) -> Result<UserUuid, AuthServiceError> {
    ctx.auth
        .create_user(NewUser {
            uuid: UserUuid::new(),
            email: email.to_string(),
            name: email.split('@').next().unwrap_or(email).to_string(),
            role,
        })
        .await
}

/// A product to insert, with the catalog rows it hangs off.
///
/// Designers, collections, verticals, categories and colors are shared by name between seeds.
#[derive(Debug, Clone)]
pub(crate) struct ProductSeed {
    pub designer: String,
    pub name: String,
    pub wholesale_price: Decimal,
    pub retail_price: Option<Decimal>,
    pub collection: String,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub order_type: Option<String>,
    pub vertical: Option<String>,
    pub category: Option<String>,
    pub subcategories: Vec<String>,
    pub colors: Vec<String>,
    pub available: bool,
    pub curated: bool,
}

impl ProductSeed {
    pub fn new(designer: &str, name: &str, wholesale_price: &str) -> Self {
        Self {
            designer: designer.to_string(),
            name: name.to_string(),
            wholesale_price: wholesale_price
                .parse()
                .expect("seed price should be a decimal"),
            retail_price: None,
            collection: "Main".to_string(),
            season: None,
            year: None,
            order_type: None,
            vertical: None,
            category: None,
            subcategories: Vec::new(),
            colors: Vec::new(),
            available: true,
            curated: false,
        }
    }

    pub fn colors(mut self, colors: &[&str]) -> Self {
        self.colors = colors.iter().map(|color| (*color).to_string()).collect();
        self
    }

    /// Place the product in a collection named after the season.
    pub fn season(mut self, season: &str, year: i32) -> Self {
        self.collection = format!("{season} {year}");
        self.season = Some(season.to_string());
        self.year = Some(year);
        self
    }

    pub fn order_type(mut self, order_type: &str) -> Self {
        self.order_type = Some(order_type.to_string());
        self
    }

    pub fn retail_price(mut self, retail_price: &str) -> Self {
        self.retail_price = Some(retail_price.parse().expect("seed price should be a decimal"));
        self
    }

    pub fn category(mut self, vertical: &str, category: &str) -> Self {
        self.vertical = Some(vertical.to_string());
        self.category = Some(category.to_string());
        self
    }

    /// Subcategories under the seed's category. Ignored without one.
    pub fn subcategories(mut self, subcategories: &[&str]) -> Self {
        self.subcategories = subcategories.iter().map(|name| (*name).to_string()).collect();
        self
    }
}

fn slugify(value: &str) -> String {
    value
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// Insert a product and any catalog rows it needs.
pub(crate) async fn seed_product(
    ctx: &TestContext,
    seed: &ProductSeed,
) -> Result<ProductUuid, sqlx::Error> {
    let pool = ctx.db.pool();

    let designer: Uuid = query_scalar(
        "INSERT INTO designers (uuid, name, slug) VALUES ($1, $2, $3) \
         ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name RETURNING uuid",
    )
    .bind(Uuid::now_v7())
    .bind(&seed.designer)
    .bind(slugify(&seed.designer))
    .fetch_one(pool)
    .await?;

    let existing: Option<Uuid> =
        query_scalar("SELECT uuid FROM collections WHERE designer_uuid = $1 AND name = $2")
            .bind(designer)
            .bind(&seed.collection)
            .fetch_optional(pool)
            .await?;

    let collection = match existing {
        Some(uuid) => uuid,
        None => {
            query_scalar(
                "INSERT INTO collections (uuid, designer_uuid, name, season, year, order_type) \
                 VALUES ($1, $2, $3, $4, $5, $6) RETURNING uuid",
            )
            .bind(Uuid::now_v7())
            .bind(designer)
            .bind(&seed.collection)
            .bind(&seed.season)
            .bind(seed.year)
            .bind(&seed.order_type)
            .fetch_one(pool)
            .await?
        }
    };

    let vertical: Option<Uuid> = match &seed.vertical {
        Some(name) => Some(
            query_scalar(
                "INSERT INTO verticals (uuid, name) VALUES ($1, $2) \
                 ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name RETURNING uuid",
            )
            .bind(Uuid::now_v7())
            .bind(name)
            .fetch_one(pool)
            .await?,
        ),
        None => None,
    };

    let category: Option<Uuid> = match (vertical, &seed.category) {
        (Some(vertical), Some(name)) => Some(
            query_scalar(
                "INSERT INTO categories (uuid, vertical_uuid, name) VALUES ($1, $2, $3) \
                 ON CONFLICT (vertical_uuid, name) DO UPDATE SET name = EXCLUDED.name \
                 RETURNING uuid",
            )
            .bind(Uuid::now_v7())
            .bind(vertical)
            .bind(name)
            .fetch_one(pool)
            .await?,
        ),
        _ => None,
    };

    let product: Uuid = query_scalar(
        "INSERT INTO products (uuid, designer_uuid, collection_uuid, vertical_uuid, \
         category_uuid, name, slug, wholesale_price, retail_price, available, curated) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING uuid",
    )
    .bind(Uuid::now_v7())
    .bind(designer)
    .bind(collection)
    .bind(vertical)
    .bind(category)
    .bind(&seed.name)
    .bind(format!("{}-{}", slugify(&seed.designer), slugify(&seed.name)))
    .bind(seed.wholesale_price)
    .bind(seed.retail_price)
    .bind(seed.available)
    .bind(seed.curated)
    .fetch_one(pool)
    .await?;

    if let Some(category) = category {
        for name in &seed.subcategories {
            let subcategory: Uuid = query_scalar(
                "INSERT INTO subcategories (uuid, category_uuid, name) VALUES ($1, $2, $3) \
                 ON CONFLICT (category_uuid, name) DO UPDATE SET name = EXCLUDED.name \
                 RETURNING uuid",
            )
            .bind(Uuid::now_v7())
            .bind(category)
            .bind(name)
            .fetch_one(pool)
            .await?;

            sqlx::query(
                "INSERT INTO product_subcategories (product_uuid, subcategory_uuid) VALUES ($1, $2)",
            )
            .bind(product)
            .bind(subcategory)
            .execute(pool)
            .await?;
        }
    }

    for color in &seed.colors {
        let color_uuid: Uuid = query_scalar(
            "INSERT INTO colors (uuid, name) VALUES ($1, $2) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name RETURNING uuid",
        )
        .bind(Uuid::now_v7())
        .bind(color)
        .fetch_one(pool)
        .await?;

        sqlx::query(
            "INSERT INTO variants (uuid, product_uuid, color_uuid, sizes, stock) \
             VALUES ($1, $2, $3, ARRAY['S', 'M', 'L'], 10)",
        )
        .bind(Uuid::now_v7())
        .bind(product)
        .bind(color_uuid)
        .execute(pool)
        .await?;
    }

    Ok(product.into())
}

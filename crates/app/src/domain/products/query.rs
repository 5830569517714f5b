//! Listing query construction.
//!
//! Every filter value is bound as a parameter. Only fixed fragments and the sort direction
//! keyword are pushed as SQL text.

use showroom::{
    filters::{ColorPredicate, CompiledFilter, PriceBound, SortDirective},
    pagination::Page,
};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

const SELECT_PRODUCTS: &str = "SELECT \
    products.uuid, products.name, products.slug, products.style, \
    products.wholesale_price, products.retail_price, products.available, products.curated, \
    products.created_at, \
    designers.name AS designer_name, designers.slug AS designer_slug, \
    collections.name AS collection_name, collections.season, collections.year, \
    collections.order_type, \
    categories.name AS category_name, verticals.name AS vertical_name, \
    ARRAY(\
        SELECT DISTINCT colors.name FROM variants \
        JOIN colors ON colors.uuid = variants.color_uuid \
        WHERE variants.product_uuid = products.uuid \
        ORDER BY colors.name\
    ) AS color_names";

const FROM_PRODUCTS: &str = " FROM products \
    JOIN designers ON designers.uuid = products.designer_uuid \
    JOIN collections ON collections.uuid = products.collection_uuid \
    LEFT JOIN categories ON categories.uuid = products.category_uuid \
    LEFT JOIN verticals ON verticals.uuid = products.vertical_uuid";

pub(super) const PRODUCT_SUBCATEGORIES: &str = "SELECT subcategories.name \
    FROM product_subcategories \
    JOIN subcategories ON subcategories.uuid = product_subcategories.subcategory_uuid \
    WHERE product_subcategories.product_uuid = $1 \
    ORDER BY subcategories.name";

pub(super) const PRODUCT_VARIANTS: &str = "SELECT colors.name AS color_name, \
    colors.hex AS color_hex, variants.sizes, variants.stock \
    FROM variants \
    JOIN colors ON colors.uuid = variants.color_uuid \
    WHERE variants.product_uuid = $1 \
    ORDER BY colors.name, variants.uuid";

/// One page of matching products in the requested order.
pub(super) fn products(filter: &CompiledFilter, page: Page) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_PRODUCTS);

    builder.push(FROM_PRODUCTS);
    push_conditions(&mut builder, filter);
    push_order(&mut builder, filter.sort);

    builder
        .push(" LIMIT ")
        .push_bind(i64::from(page.limit()))
        .push(" OFFSET ")
        .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

    builder
}

/// Number of matching products.
pub(super) fn count(filter: &CompiledFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*)");

    builder.push(FROM_PRODUCTS);
    push_conditions(&mut builder, filter);

    builder
}

/// Collections holding matching products, newest first.
pub(super) fn collection_facets(filter: &CompiledFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "SELECT DISTINCT collections.uuid, collections.name, collections.season, \
         collections.year, collections.order_type, collections.created_at",
    );

    builder.push(FROM_PRODUCTS);
    push_conditions(&mut builder, filter);
    builder.push(" ORDER BY collections.created_at DESC, collections.uuid DESC");

    builder
}

/// Variant colors of matching products.
///
/// The color facet ignores the color filter itself, so choosing one color still offers the
/// others.
pub(super) fn color_facets(filter: &CompiledFilter) -> QueryBuilder<'static, Postgres> {
    let scope = CompiledFilter {
        colors: ColorPredicate::default(),
        ..filter.clone()
    };

    let mut builder = QueryBuilder::new(
        "SELECT DISTINCT colors.name FROM variants \
         JOIN colors ON colors.uuid = variants.color_uuid \
         WHERE variants.product_uuid IN (SELECT products.uuid",
    );

    builder.push(FROM_PRODUCTS);
    push_conditions(&mut builder, &scope);
    builder.push(") ORDER BY colors.name");

    builder
}

/// Designers with matching products, narrowed by style.
///
/// The designer facet ignores the designer filter itself.
pub(super) fn designer_facets(filter: &CompiledFilter) -> QueryBuilder<'static, Postgres> {
    let mut scope = filter.clone();
    scope.catalog.designers.clear();

    let mut builder = QueryBuilder::new("SELECT DISTINCT designers.name, designers.slug");

    builder.push(FROM_PRODUCTS);
    push_conditions(&mut builder, &scope);

    if !filter.styles.is_empty() {
        builder
            .push(
                " AND EXISTS (SELECT 1 FROM designer_styles \
                 JOIN styles ON styles.uuid = designer_styles.style_uuid \
                 WHERE designer_styles.designer_uuid = designers.uuid \
                 AND styles.name = ANY(",
            )
            .push_bind(filter.styles.clone())
            .push("))");
    }

    builder.push(" ORDER BY designers.name, designers.slug");

    builder
}

/// (vertical, category) pairs of matching products, for the navigation tree.
///
/// The tree ignores the vertical, category and subcategory filters. Categories are placed under
/// their own vertical.
pub(super) fn category_facets(filter: &CompiledFilter) -> QueryBuilder<'static, Postgres> {
    let mut scope = filter.clone();
    scope.catalog.vertical = None;
    scope.catalog.category = None;
    scope.catalog.subcategories.clear();

    let mut builder = QueryBuilder::new(
        "SELECT DISTINCT category_verticals.name AS vertical_name, categories.name AS category_name",
    );

    builder.push(FROM_PRODUCTS);
    builder.push(
        " JOIN verticals AS category_verticals \
         ON category_verticals.uuid = categories.vertical_uuid",
    );
    push_conditions(&mut builder, &scope);
    builder.push(" ORDER BY category_verticals.name, categories.name");

    builder
}

/// A user's favorite products, most recently added first.
pub(crate) fn favorite_products(user: Uuid) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_PRODUCTS);

    builder
        .push(FROM_PRODUCTS)
        .push(" JOIN favorites ON favorites.product_uuid = products.uuid")
        .push(" WHERE favorites.user_uuid = ")
        .push_bind(user)
        .push(" ORDER BY favorites.created_at DESC, products.uuid ASC");

    builder
}

/// The listing columns of one product, looked up by slug.
pub(super) fn product_by_slug(slug: &str) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_PRODUCTS);

    builder
        .push(FROM_PRODUCTS)
        .push(" WHERE products.slug = ")
        .push_bind(slug.to_string());

    builder
}

fn push_conditions(builder: &mut QueryBuilder<'static, Postgres>, filter: &CompiledFilter) {
    let catalog = &filter.catalog;

    builder.push(" WHERE TRUE");

    if !catalog.designers.is_empty() {
        builder
            .push(" AND designers.slug = ANY(")
            .push_bind(catalog.designers.clone())
            .push(")");
    }

    if !catalog.collections.is_empty() {
        builder
            .push(" AND collections.name = ANY(")
            .push_bind(catalog.collections.clone())
            .push(")");
    }

    if !catalog.seasons.is_empty() {
        builder
            .push(" AND collections.season = ANY(")
            .push_bind(catalog.seasons.clone())
            .push(")");
    }

    if !catalog.years.is_empty() {
        builder
            .push(" AND collections.year = ANY(")
            .push_bind(catalog.years.clone())
            .push(")");
    }

    if let Some(order_type) = &catalog.order_type {
        builder
            .push(" AND collections.order_type = ")
            .push_bind(order_type.clone());
    }

    if let Some(category) = &catalog.category {
        builder
            .push(" AND categories.name = ")
            .push_bind(category.clone());
    }

    if let Some(vertical) = &catalog.vertical {
        builder
            .push(" AND verticals.name = ")
            .push_bind(vertical.clone());
    }

    if !catalog.subcategories.is_empty() {
        builder
            .push(
                " AND EXISTS (SELECT 1 FROM product_subcategories \
                 JOIN subcategories ON subcategories.uuid = product_subcategories.subcategory_uuid \
                 WHERE product_subcategories.product_uuid = products.uuid \
                 AND subcategories.name = ANY(",
            )
            .push_bind(catalog.subcategories.clone())
            .push("))");
    }

    if let Some(available) = catalog.available {
        builder.push(" AND products.available = ").push_bind(available);
    }

    if let Some(curated) = catalog.curated {
        builder.push(" AND products.curated = ").push_bind(curated);
    }

    if !filter.colors.is_empty() {
        builder
            .push(
                " AND EXISTS (SELECT 1 FROM variants \
                 JOIN colors ON colors.uuid = variants.color_uuid \
                 WHERE variants.product_uuid = products.uuid \
                 AND colors.name = ANY(",
            )
            .push_bind(filter.colors.colors.clone())
            .push("))");
    }

    if let Some(bound) = filter.price.wholesale {
        push_price_bound(builder, "products.wholesale_price", bound);
    }

    if let Some(bound) = filter.price.retail {
        push_price_bound(builder, "products.retail_price", bound);
    }
}

fn push_price_bound(
    builder: &mut QueryBuilder<'static, Postgres>,
    column: &'static str,
    bound: PriceBound,
) {
    builder.push(" AND ").push(column);

    match bound {
        PriceBound::Below(threshold) => {
            builder.push(" < ").push_bind(threshold);
        }
        PriceBound::Between(low, high) => {
            builder
                .push(" BETWEEN ")
                .push_bind(low)
                .push(" AND ")
                .push_bind(high);
        }
        PriceBound::Above(threshold) => {
            builder.push(" > ").push_bind(threshold);
        }
    }
}

fn push_order(builder: &mut QueryBuilder<'static, Postgres>, sort: SortDirective) {
    match sort {
        SortDirective::Default => {
            builder.push(" ORDER BY products.created_at ASC, products.uuid ASC");
        }
        SortDirective::WholesalePrice(direction) => {
            builder
                .push(" ORDER BY products.wholesale_price ")
                .push(direction.as_sql())
                .push(", products.uuid ASC");
        }
    }
}

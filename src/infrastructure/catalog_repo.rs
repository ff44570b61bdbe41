use std::collections::HashMap;

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::{
    Category, ProductFilter, ProductInput, ProductView, SizeStock, SortKey,
};
use crate::domain::errors::DomainError;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::ports::ProductRepository;
use crate::schema::{categories, product_sizes, products};

use super::models::{
    CategoryRow, NewCategoryRow, NewProductRow, NewProductSizeRow, ProductFieldsRow, ProductRow,
    ProductSizeRow,
};

// ── Query building ───────────────────────────────────────────────────────────

/// Applies every predicate in `filter`. Category and size are `IN (subselect)`
/// checks, so a product never appears twice however many sizes match.
fn filtered(filter: &ProductFilter) -> products::BoxedQuery<'static, Pg> {
    let mut query = products::table.into_boxed();

    if let Some(category) = &filter.category {
        query = query.filter(
            products::category_id.eq_any(
                categories::table
                    .filter(categories::name.eq(category.clone()))
                    .select(categories::id.nullable()),
            ),
        );
    }
    if let Some(size) = &filter.size {
        query = query.filter(
            products::id.eq_any(
                product_sizes::table
                    .filter(product_sizes::size.eq(size.clone()))
                    .select(product_sizes::product_id),
            ),
        );
    }
    if let Some(min) = &filter.min_price {
        query = query.filter(products::price.ge(min.clone()));
    }
    if let Some(max) = &filter.max_price {
        query = query.filter(products::price.le(max.clone()));
    }
    if let Some(featured) = filter.featured {
        query = query.filter(products::featured.eq(featured));
    }

    query
}

/// The id tie-breaker keeps page boundaries stable between requests.
fn sorted(query: products::BoxedQuery<'static, Pg>, sort: SortKey) -> products::BoxedQuery<'static, Pg> {
    match sort {
        SortKey::Newest => query.order((products::created_at.desc(), products::id.asc())),
        SortKey::Oldest => query.order((products::created_at.asc(), products::id.asc())),
        SortKey::PriceAsc => query.order((products::price.asc(), products::id.asc())),
        SortKey::PriceDesc => query.order((products::price.desc(), products::id.asc())),
    }
}

fn category_view(row: CategoryRow) -> Category {
    Category {
        id: row.id,
        name: row.name,
        image: row.image,
    }
}

fn split_input(input: ProductInput) -> (ProductFieldsRow, Vec<SizeStock>) {
    (
        ProductFieldsRow {
            name: input.name.trim().to_string(),
            description: input.description,
            price: input.price,
            stock: input.stock,
            category_id: input.category_id,
            images: input.images,
            featured: input.featured,
            customizable: input.customizable,
        },
        input.sizes,
    )
}

fn insert_sizes(conn: &mut PgConnection, product_id: Uuid, sizes: Vec<SizeStock>) -> QueryResult<()> {
    if sizes.is_empty() {
        return Ok(());
    }
    let rows: Vec<NewProductSizeRow> = sizes
        .into_iter()
        .map(|s| NewProductSizeRow {
            id: Uuid::new_v4(),
            product_id,
            size: s.size.trim().to_string(),
            stock: s.stock,
        })
        .collect();
    diesel::insert_into(product_sizes::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

/// Attaches category names and size variants to a batch of product rows.
fn hydrate(conn: &mut PgConnection, rows: Vec<ProductRow>) -> Result<Vec<ProductView>, DomainError> {
    let sizes = ProductSizeRow::belonging_to(&rows)
        .select(ProductSizeRow::as_select())
        .order(product_sizes::size.asc())
        .load(conn)?
        .grouped_by(&rows);

    let category_ids: Vec<Uuid> = rows.iter().filter_map(|r| r.category_id).collect();
    let names: HashMap<Uuid, String> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        categories::table
            .filter(categories::id.eq_any(&category_ids))
            .select((categories::id, categories::name))
            .load::<(Uuid, String)>(conn)?
            .into_iter()
            .collect()
    };

    Ok(rows
        .into_iter()
        .zip(sizes)
        .map(|(row, sizes)| ProductView {
            id: row.id,
            category: row.category_id.and_then(|id| names.get(&id).cloned()),
            name: row.name,
            description: row.description,
            price: row.price,
            stock: row.stock,
            images: row.images,
            sizes: sizes
                .into_iter()
                .map(|s| SizeStock {
                    size: s.size,
                    stock: s.stock,
                })
                .collect(),
            featured: row.featured,
            customizable: row.customizable,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
        .collect())
}

fn hydrate_one(conn: &mut PgConnection, row: ProductRow) -> Result<ProductView, DomainError> {
    hydrate(conn, vec![row])?
        .pop()
        .ok_or_else(|| DomainError::Internal("product vanished while loading".to_string()))
}

// ── Repository ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for DieselProductRepository {
    fn list(&self, filter: &ProductFilter, page: PageRequest) -> Result<Page<ProductView>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = filtered(filter).count().get_result(conn)?;

            let rows = sorted(filtered(filter), filter.sort)
                .select(ProductRow::as_select())
                .limit(page.take())
                .offset(page.skip())
                .load(conn)?;

            Ok(Page::new(hydrate(conn, rows)?, total, page))
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<ProductView>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .find(id)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(Some(hydrate_one(&mut conn, row)?)),
            None => Ok(None),
        }
    }

    fn existing_ids(&self, ids: &[Uuid]) -> Result<Vec<Uuid>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(products::table
            .filter(products::id.eq_any(ids))
            .select(products::id)
            .load(&mut conn)?)
    }

    fn create(&self, input: ProductInput) -> Result<ProductView, DomainError> {
        let mut conn = self.pool.get()?;
        let (fields, sizes) = split_input(input);

        conn.transaction::<_, DomainError, _>(|conn| {
            let row = diesel::insert_into(products::table)
                .values(&NewProductRow {
                    id: Uuid::new_v4(),
                    fields,
                })
                .returning(ProductRow::as_returning())
                .get_result(conn)?;

            insert_sizes(conn, row.id, sizes)?;
            hydrate_one(conn, row)
        })
    }

    fn update(&self, id: Uuid, input: ProductInput) -> Result<Option<ProductView>, DomainError> {
        let mut conn = self.pool.get()?;
        let (fields, sizes) = split_input(input);

        conn.transaction::<_, DomainError, _>(|conn| {
            let row = diesel::update(products::table.find(id))
                .set((&fields, products::updated_at.eq(diesel::dsl::now)))
                .returning(ProductRow::as_returning())
                .get_result(conn)
                .optional()?;

            let Some(row) = row else {
                return Ok(None);
            };

            diesel::delete(product_sizes::table.filter(product_sizes::product_id.eq(id)))
                .execute(conn)?;
            insert_sizes(conn, id, sizes)?;
            Ok(Some(hydrate_one(conn, row)?))
        })
    }

    fn find_category(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(categories::table
            .find(id)
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(category_view))
    }

    fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(categories::table
            .select(CategoryRow::as_select())
            .order(categories::name.asc())
            .load(&mut conn)?
            .into_iter()
            .map(category_view)
            .collect())
    }

    fn create_category(&self, name: &str, image: Option<String>) -> Result<Category, DomainError> {
        let mut conn = self.pool.get()?;

        diesel::insert_into(categories::table)
            .values(&NewCategoryRow {
                id: Uuid::new_v4(),
                name,
                image,
            })
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .map(category_view)
            .map_err(|e| match e {
                diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    DomainError::InvalidInput("CategoryExists")
                }
                other => other.into(),
            })
    }
}

use diesel::pg::Pg;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{CustomerDetails, NewOrder, OrderItemView, OrderStatus, OrderView};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::ports::OrderRepository;
use crate::schema::{order_items, orders};

use super::models::{NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow};

fn order_view(row: OrderRow, items: Vec<OrderItemRow>) -> Result<OrderView, DomainError> {
    let status = row.status.parse::<OrderStatus>().map_err(|_| {
        DomainError::Internal(format!("order {} has unknown status '{}'", row.id, row.status))
    })?;
    Ok(OrderView {
        id: row.id,
        user_id: row.user_id,
        customer: CustomerDetails {
            name: row.customer_name,
            phone: row.customer_phone,
            address: row.customer_address,
        },
        subtotal: row.subtotal,
        total: row.total,
        payment_method: row.payment_method,
        status,
        created_at: row.created_at,
        items: items
            .into_iter()
            .map(|i| OrderItemView {
                id: i.id,
                product_id: i.product_id,
                quantity: i.quantity,
                unit_price: i.unit_price,
                size: i.size,
                custom_name: i.custom_name,
                custom_number: i.custom_number,
            })
            .collect(),
    })
}

/// Loads a page of orders with their items, newest first.
fn load_page(
    conn: &mut PgConnection,
    filtered: impl Fn() -> orders::BoxedQuery<'static, Pg>,
    page: PageRequest,
) -> Result<Page<OrderView>, DomainError> {
    let total: i64 = filtered().count().get_result(conn)?;

    let rows = filtered()
        .select(OrderRow::as_select())
        .order((orders::created_at.desc(), orders::id.asc()))
        .limit(page.take())
        .offset(page.skip())
        .load(conn)?;

    let items = OrderItemRow::belonging_to(&rows)
        .select(OrderItemRow::as_select())
        .order(order_items::position.asc())
        .load(conn)?
        .grouped_by(&rows);

    let views = rows
        .into_iter()
        .zip(items)
        .map(|(row, items)| order_view(row, items))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Page::new(views, total, page))
}

// ── Repository ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, order: NewOrder) -> Result<OrderView, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Insert the order
            let order_id = Uuid::new_v4();
            let row = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: order_id,
                    user_id: order.user_id,
                    customer_name: order.customer.name,
                    customer_phone: order.customer.phone,
                    customer_address: order.customer.address,
                    subtotal: order.subtotal,
                    total: order.total,
                    payment_method: order.payment_method,
                    status: OrderStatus::Pending.as_str().to_string(),
                })
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            // 2. Insert order items, keeping the cart order and submitted prices
            let new_items: Vec<NewOrderItemRow> = order
                .items
                .into_iter()
                .enumerate()
                .map(|(position, l)| NewOrderItemRow {
                    id: Uuid::new_v4(),
                    order_id,
                    product_id: l.product_id,
                    position: position as i32,
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                    size: l.size,
                    custom_name: l.custom_name,
                    custom_number: l.custom_number,
                })
                .collect();
            let items = diesel::insert_into(order_items::table)
                .values(&new_items)
                .returning(OrderItemRow::as_returning())
                .get_results(conn)?;

            order_view(row, items)
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = order_items::table
            .filter(order_items::order_id.eq(order.id))
            .select(OrderItemRow::as_select())
            .order(order_items::position.asc())
            .load(&mut conn)?;

        order_view(order, items).map(Some)
    }

    fn list(&self, status: Option<OrderStatus>, page: PageRequest) -> Result<Page<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            load_page(
                conn,
                || {
                    let mut query = orders::table.into_boxed();
                    if let Some(status) = status {
                        query = query.filter(orders::status.eq(status.as_str()));
                    }
                    query
                },
                page,
            )
        })
    }

    fn list_for_user(&self, user_id: Uuid, page: PageRequest) -> Result<Page<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            load_page(
                conn,
                || orders::table.filter(orders::user_id.eq(user_id)).into_boxed(),
                page,
            )
        })
    }

    fn update_status(&self, id: Uuid, from: OrderStatus, to: OrderStatus) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let updated = diesel::update(
            orders::table
                .filter(orders::id.eq(id))
                .filter(orders::status.eq(from.as_str())),
        )
        .set((
            orders::status.eq(to.as_str()),
            orders::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)?;

        Ok(updated == 1)
    }
}

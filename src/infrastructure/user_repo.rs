use std::collections::HashMap;

use bigdecimal::BigDecimal;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::PgTextExpressionMethods;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::customer::{CustomerRecord, Role, UserView};
use crate::domain::errors::DomainError;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::ports::UserRepository;
use crate::schema::{orders, users};

use super::like_pattern;
use super::models::UserRow;

fn user_view(row: UserRow) -> UserView {
    UserView {
        id: row.id,
        role: Role::from_db(&row.role),
        name: row.name,
        email: row.email,
        phone: row.phone,
        created_at: row.created_at,
    }
}

fn matching_customers(pattern: &str) -> users::BoxedQuery<'static, Pg> {
    users::table
        .filter(users::role.eq(Role::User.as_str()))
        .filter(
            users::name
                .ilike(pattern.to_string())
                .or(users::email.ilike(pattern.to_string())),
        )
        .into_boxed()
}

#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for DieselUserRepository {
    fn find_by_email(&self, email: &str) -> Result<Option<UserView>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(users::table
            .filter(users::email.eq(email.trim()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(user_view))
    }

    fn search_customers(
        &self,
        query: &str,
        page: PageRequest,
    ) -> Result<Page<CustomerRecord>, DomainError> {
        let mut conn = self.pool.get()?;
        let pattern = like_pattern(query);

        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = matching_customers(&pattern).count().get_result(conn)?;

            let rows = matching_customers(&pattern)
                .select(UserRow::as_select())
                .order((users::created_at.desc(), users::id.asc()))
                .limit(page.take())
                .offset(page.skip())
                .load(conn)?;

            let ids: Vec<Uuid> = rows.iter().map(|u| u.id).collect();
            let mut totals: HashMap<Uuid, Vec<BigDecimal>> = HashMap::new();
            if !ids.is_empty() {
                let placed: Vec<(Option<Uuid>, BigDecimal)> = orders::table
                    .filter(orders::user_id.eq_any(&ids))
                    .select((orders::user_id, orders::total))
                    .load(conn)?;
                for (user_id, total) in placed {
                    if let Some(user_id) = user_id {
                        totals.entry(user_id).or_default().push(total);
                    }
                }
            }

            let items = rows
                .into_iter()
                .map(|row| CustomerRecord {
                    order_totals: totals.remove(&row.id).unwrap_or_default(),
                    user: user_view(row),
                })
                .collect();
            Ok(Page::new(items, total, page))
        })
    }
}

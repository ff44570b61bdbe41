//! In-memory repositories for service tests.

use std::sync::{Arc, Mutex};

use bigdecimal::BigDecimal;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::catalog::{Category, ProductFilter, ProductInput, ProductView, SortKey};
use crate::domain::customer::{CustomerRecord, Role, UserView};
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, OrderItemView, OrderStatus, OrderView};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::ports::{OrderRepository, ProductRepository, UserRepository};

fn paginate<T: Clone>(rows: &[T], page: PageRequest) -> Page<T> {
    let items = rows
        .iter()
        .skip(page.skip() as usize)
        .take(page.take() as usize)
        .cloned()
        .collect();
    Page::new(items, rows.len() as i64, page)
}

#[derive(Clone, Default)]
pub struct InMemoryUsers {
    customers: Arc<Mutex<Vec<CustomerRecord>>>,
}

impl InMemoryUsers {
    pub fn add(&self, email: &str, name: &str, role: Role) -> UserView {
        self.add_with_orders(email, name, role, vec![])
    }

    pub fn add_with_orders(
        &self,
        email: &str,
        name: &str,
        role: Role,
        order_totals: Vec<BigDecimal>,
    ) -> UserView {
        let user = UserView {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            phone: None,
            created_at: Utc::now(),
        };
        self.customers.lock().unwrap().push(CustomerRecord {
            user: user.clone(),
            order_totals,
        });
        user
    }
}

impl UserRepository for InMemoryUsers {
    fn find_by_email(&self, email: &str) -> Result<Option<UserView>, DomainError> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.user.email == email)
            .map(|c| c.user.clone()))
    }

    fn search_customers(
        &self,
        query: &str,
        page: PageRequest,
    ) -> Result<Page<CustomerRecord>, DomainError> {
        let needle = query.to_lowercase();
        let matching: Vec<CustomerRecord> = self
            .customers
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user.role == Role::User)
            .filter(|c| {
                c.user.name.to_lowercase().contains(&needle)
                    || c.user.email.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        Ok(paginate(&matching, page))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryProducts {
    products: Arc<Mutex<Vec<(ProductView, Option<Uuid>)>>>,
    categories: Arc<Mutex<Vec<Category>>>,
}

impl InMemoryProducts {
    pub fn add_category(&self, name: &str) -> Category {
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            image: None,
        };
        self.categories.lock().unwrap().push(category.clone());
        category
    }

    /// Each call is stamped one minute after the previous product.
    pub fn add(&self, name: &str, category: Option<&Category>, price: i64) -> ProductView {
        let mut products = self.products.lock().unwrap();
        let created_at = Utc::now() + Duration::minutes(products.len() as i64);
        let product = ProductView {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            price: BigDecimal::from(price),
            stock: 10,
            category: category.map(|c| c.name.clone()),
            images: vec![],
            sizes: vec![],
            featured: false,
            customizable: false,
            created_at,
            updated_at: created_at,
        };
        products.push((product.clone(), category.map(|c| c.id)));
        product
    }

    fn view(&self, input: ProductInput, id: Uuid, created_at: chrono::DateTime<Utc>) -> ProductView {
        let category = input.category_id.and_then(|cid| {
            self.categories
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == cid)
                .map(|c| c.name.clone())
        });
        ProductView {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock,
            category,
            images: input.images,
            sizes: input.sizes,
            featured: input.featured,
            customizable: input.customizable,
            created_at,
            updated_at: Utc::now(),
        }
    }
}

impl ProductRepository for InMemoryProducts {
    fn list(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<Page<ProductView>, DomainError> {
        let mut rows: Vec<ProductView> = self
            .products
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.clone())
            .filter(|p| filter.matches(p))
            .collect();
        match filter.sort {
            SortKey::Newest => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id))),
            SortKey::Oldest => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id))),
            SortKey::PriceAsc => rows.sort_by(|a, b| a.price.cmp(&b.price).then(a.id.cmp(&b.id))),
            SortKey::PriceDesc => rows.sort_by(|a, b| b.price.cmp(&a.price).then(a.id.cmp(&b.id))),
        }
        Ok(paginate(&rows, page))
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<ProductView>, DomainError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p.id == id)
            .map(|(p, _)| p.clone()))
    }

    fn existing_ids(&self, ids: &[Uuid]) -> Result<Vec<Uuid>, DomainError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.id)
            .filter(|id| ids.contains(id))
            .collect())
    }

    fn create(&self, input: ProductInput) -> Result<ProductView, DomainError> {
        let category_id = input.category_id;
        let product = self.view(input, Uuid::new_v4(), Utc::now());
        self.products
            .lock()
            .unwrap()
            .push((product.clone(), category_id));
        Ok(product)
    }

    fn update(&self, id: Uuid, input: ProductInput) -> Result<Option<ProductView>, DomainError> {
        let Some(created_at) = self.find_by_id(id)?.map(|p| p.created_at) else {
            return Ok(None);
        };
        let category_id = input.category_id;
        let product = self.view(input, id, created_at);
        let mut products = self.products.lock().unwrap();
        if let Some(slot) = products.iter_mut().find(|(p, _)| p.id == id) {
            *slot = (product.clone(), category_id);
        }
        Ok(Some(product))
    }

    fn find_category(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let mut categories = self.categories.lock().unwrap().clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    fn create_category(&self, name: &str, image: Option<String>) -> Result<Category, DomainError> {
        if self.categories.lock().unwrap().iter().any(|c| c.name == name) {
            return Err(DomainError::InvalidInput("CategoryExists"));
        }
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            image,
        };
        self.categories.lock().unwrap().push(category.clone());
        Ok(category)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryOrders {
    orders: Arc<Mutex<Vec<OrderView>>>,
}

impl InMemoryOrders {
    pub fn all(&self) -> Vec<OrderView> {
        self.orders.lock().unwrap().clone()
    }
}

impl OrderRepository for InMemoryOrders {
    fn create(&self, order: NewOrder) -> Result<OrderView, DomainError> {
        let view = OrderView {
            id: Uuid::new_v4(),
            user_id: order.user_id,
            customer: order.customer,
            subtotal: order.subtotal,
            total: order.total,
            payment_method: order.payment_method,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            items: order
                .items
                .into_iter()
                .map(|l| OrderItemView {
                    id: Uuid::new_v4(),
                    product_id: l.product_id,
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                    size: l.size,
                    custom_name: l.custom_name,
                    custom_number: l.custom_number,
                })
                .collect(),
        };
        self.orders.lock().unwrap().push(view.clone());
        Ok(view)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    fn list(
        &self,
        status: Option<OrderStatus>,
        page: PageRequest,
    ) -> Result<Page<OrderView>, DomainError> {
        let rows: Vec<OrderView> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|o| status.map_or(true, |s| o.status == s))
            .cloned()
            .collect();
        Ok(paginate(&rows, page))
    }

    fn list_for_user(&self, user_id: Uuid, page: PageRequest) -> Result<Page<OrderView>, DomainError> {
        let rows: Vec<OrderView> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|o| o.user_id == Some(user_id))
            .cloned()
            .collect();
        Ok(paginate(&rows, page))
    }

    fn update_status(&self, id: Uuid, from: OrderStatus, to: OrderStatus) -> Result<bool, DomainError> {
        let mut orders = self.orders.lock().unwrap();
        match orders.iter_mut().find(|o| o.id == id && o.status == from) {
            Some(order) => {
                order.status = to;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod presenter;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::catalog_service::CatalogService;
use application::customer_service::CustomerService;
use application::order_service::OrderService;
use infrastructure::catalog_repo::DieselProductRepository;
use infrastructure::order_repo::DieselOrderRepository;
use infrastructure::user_repo::DieselUserRepository;

pub use config::Config;
pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type Catalog = CatalogService<DieselProductRepository, DieselUserRepository>;
pub type Orders =
    OrderService<DieselOrderRepository, DieselProductRepository, DieselUserRepository>;
pub type Customers = CustomerService<DieselUserRepository>;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let products = DieselProductRepository::new(pool.clone());
    let users = DieselUserRepository::new(pool.clone());
    let orders = DieselOrderRepository::new(pool);

    let catalog = web::Data::new(Catalog::new(products.clone(), users.clone()));
    let order_service = web::Data::new(Orders::new(orders, products, users.clone()));
    let customers = web::Data::new(Customers::new(users));
    let api_doc = openapi::ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(catalog.clone())
            .app_data(order_service.clone())
            .app_data(customers.clone())
            .wrap(Logger::default())
            .service(
                web::scope("/products")
                    .route("", web::get().to(handlers::products::list_products))
                    .route("", web::post().to(handlers::products::create_product))
                    .route("/{id}", web::get().to(handlers::products::get_product))
                    .route("/{id}", web::put().to(handlers::products::update_product)),
            )
            .service(
                web::scope("/categories")
                    .route("", web::get().to(handlers::products::list_categories))
                    .route("", web::post().to(handlers::products::create_category)),
            )
            .service(
                web::scope("/orders")
                    .route("", web::post().to(handlers::orders::create_order))
                    .route("", web::get().to(handlers::orders::list_orders))
                    .route("/{id}", web::get().to(handlers::orders::get_order))
                    .route("/{id}/status", web::patch().to(handlers::orders::update_status)),
            )
            .service(
                web::scope("/account")
                    .route("/orders", web::get().to(handlers::account::my_orders))
                    .route("/orders/{id}", web::get().to(handlers::account::my_order)),
            )
            .route(
                "/customers",
                web::get().to(handlers::customers::search_customers),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api_doc.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}

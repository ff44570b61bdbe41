use utoipa::OpenApi;

use crate::handlers::{account, customers, orders, products};
use crate::presenter::{
    CategoryResponse, CustomerListing, OrderItemResponse, OrderResponse, ProductDetail,
    ProductListing, SizeResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mbor Business Store API",
        description = "Catalog browsing, checkout and back-office order listing."
    ),
    paths(
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::list_categories,
        products::create_category,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        orders::update_status,
        account::my_orders,
        account::my_order,
        customers::search_customers,
    ),
    components(schemas(
        products::ProductRequest,
        products::SizeRequest,
        products::CategoryRequest,
        orders::CreateOrderRequest,
        orders::CreateOrderLineRequest,
        orders::ShippingRequest,
        orders::UpdateStatusRequest,
        ProductListing,
        ProductDetail,
        SizeResponse,
        CategoryResponse,
        OrderResponse,
        OrderItemResponse,
        CustomerListing,
    )),
    tags(
        (name = "catalog", description = "Products and categories"),
        (name = "orders", description = "Checkout and back-office orders"),
        (name = "account", description = "The signed-in customer's orders"),
        (name = "customers", description = "Customer directory"),
    )
)]
pub struct ApiDoc;

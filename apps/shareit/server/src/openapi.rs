use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(axum_helpers::ErrorResponse)),
    info(
        title = "ShareIt API",
        version = "0.1.0",
        description = "Peer-to-peer item sharing: users, items, item requests, bookings and comments"
    ),
    nest(
        (path = "/users", api = domain_users::ApiDoc),
        (path = "/items", api = domain_items::ApiDoc),
        (path = "/requests", api = domain_requests::ApiDoc),
        (path = "/bookings", api = domain_bookings::ApiDoc)
    )
)]
pub struct ApiDoc;

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

/// Registers the `bearer_auth` scheme referenced by protected operations.
struct SecurityAddon;

/// Account routes live at the API root, so their documents are merged
/// rather than nested.
struct AccountsAddon;

impl Modify for AccountsAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.merge(domain_accounts::auth_handlers::ApiDoc::openapi());
        openapi.merge(domain_accounts::handlers::ApiDoc::openapi());
    }
}

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Stroycity API",
        version = "0.1.0",
        description = "Building materials marketplace: catalog, seller and buyer accounts, carts, orders and reviews"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    modifiers(&AccountsAddon, &SecurityAddon),
    nest(
        (path = "/catalog", api = domain_catalog::handlers::references::ApiDoc),
        (path = "/items", api = domain_catalog::handlers::items::ApiDoc),
        (path = "/cart", api = domain_orders::handlers::cart::ApiDoc),
        (path = "/orders", api = domain_orders::handlers::orders::ApiDoc),
        (path = "/reviews", api = domain_reviews::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;

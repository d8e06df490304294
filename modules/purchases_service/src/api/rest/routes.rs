//! Route registration

use super::handlers::{self, ApiState, RestResource};
use crate::config::Config;
use crate::contract::{CustomerBought, ProductType};
use crate::domain::Service;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

/// Register all REST routes
pub fn register_routes(
    router: Router,
    service: Arc<Service>,
    config: Config,
) -> anyhow::Result<Router> {
    let state = Arc::new(ApiState { service, config });

    let router = router
        .merge(resource_routes::<ProductType>())
        .merge(resource_routes::<CustomerBought>())
        .layer(Extension(state));

    Ok(router)
}

fn resource_routes<E: RestResource>() -> Router {
    let collection = format!("/api/{}", E::PATH);
    let item = format!("{collection}/{{id}}");

    Router::new()
        .route(
            &collection,
            post(handlers::create::<E>).get(handlers::get_all::<E>),
        )
        .route(
            &item,
            get(handlers::get_one::<E>)
                .put(handlers::update::<E>)
                .patch(handlers::partial_update::<E>)
                .delete(handlers::delete::<E>),
        )
}

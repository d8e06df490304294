//! HTTP request handlers - thin layer that delegates to domain service
//!
//! One generic handler per operation; [`RestResource`] binds each entity
//! to its DTOs and URL segment.

use super::dto::*;
use super::error::{map_domain_error, map_json_rejection, Problem};
use super::headers::{
    entity_creation_alert, entity_deletion_alert, entity_update_alert, pagination_headers,
};
use super::paging::parse_page_request;
use crate::config::Config;
use crate::contract::{
    CustomerBought, CustomerBoughtData, CustomerBoughtPatch, EntityId, ProductType,
    ProductTypeData, ProductTypePatch, PurchasesError,
};
use crate::domain::{Resource, Service};
use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, RawQuery},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

pub const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// Shared state handed to every handler
pub struct ApiState {
    pub service: Arc<Service>,
    pub config: Config,
}

impl ApiState {
    fn problem(&self, error: PurchasesError) -> Problem {
        map_domain_error(error, &self.config.application_name)
    }
}

/// REST binding of a [`Resource`]
pub trait RestResource: Resource {
    type Request: DeserializeOwned + Send + 'static;
    type Response: Serialize + From<Self> + Send + 'static;

    /// Collection segment under `/api`
    const PATH: &'static str;

    fn request_id(request: &Self::Request) -> Option<EntityId>;

    /// Full representation for create and replace; all required fields present
    fn into_data(request: Self::Request) -> Result<Self::Data, PurchasesError>;

    fn into_patch(request: Self::Request) -> Self::Patch;
}

impl RestResource for ProductType {
    type Request = ProductTypeRequest;
    type Response = ProductTypeDto;

    const PATH: &'static str = "product-types";

    fn request_id(request: &ProductTypeRequest) -> Option<EntityId> {
        request.id
    }

    fn into_data(request: ProductTypeRequest) -> Result<ProductTypeData, PurchasesError> {
        request.try_into()
    }

    fn into_patch(request: ProductTypeRequest) -> ProductTypePatch {
        request.into()
    }
}

impl RestResource for CustomerBought {
    type Request = CustomerBoughtRequest;
    type Response = CustomerBoughtDto;

    const PATH: &'static str = "customer-boughts";

    fn request_id(request: &CustomerBoughtRequest) -> Option<EntityId> {
        request.id
    }

    fn into_data(request: CustomerBoughtRequest) -> Result<CustomerBoughtData, PurchasesError> {
        request.try_into()
    }

    fn into_patch(request: CustomerBoughtRequest) -> CustomerBoughtPatch {
        request.into()
    }
}

/// `POST /api/{path}`
pub async fn create<E: RestResource>(
    Extension(state): Extension<Arc<ApiState>>,
    body: Result<Json<E::Request>, JsonRejection>,
) -> Result<Response, Problem> {
    let Json(request) = body.map_err(map_json_rejection)?;
    let id = E::request_id(&request);
    let data = E::into_data(request).map_err(|e| state.problem(e))?;

    let created: E = state
        .service
        .create(id, data)
        .await
        .map_err(|e| state.problem(e))?;

    let id = created.id().to_string();
    let mut headers = entity_creation_alert(&state.config.application_name, E::ENTITY_NAME, &id);
    if let Ok(location) = HeaderValue::try_from(format!("/api/{}/{}", E::PATH, id)) {
        headers.insert(header::LOCATION, location);
    }

    Ok((StatusCode::CREATED, headers, Json(E::Response::from(created))).into_response())
}

/// `PUT /api/{path}/{id}`
pub async fn update<E: RestResource>(
    Extension(state): Extension<Arc<ApiState>>,
    Path(id): Path<EntityId>,
    body: Result<Json<E::Request>, JsonRejection>,
) -> Result<Response, Problem> {
    let Json(request) = body.map_err(map_json_rejection)?;
    let body_id = E::request_id(&request);
    let data = E::into_data(request).map_err(|e| state.problem(e))?;

    let saved: E = state
        .service
        .update(id, body_id, data)
        .await
        .map_err(|e| state.problem(e))?;

    let headers = entity_update_alert(
        &state.config.application_name,
        E::ENTITY_NAME,
        &saved.id().to_string(),
    );
    Ok((headers, Json(E::Response::from(saved))).into_response())
}

/// `PATCH /api/{path}/{id}` with a JSON merge-patch body
pub async fn partial_update<E: RestResource>(
    Extension(state): Extension<Arc<ApiState>>,
    Path(id): Path<EntityId>,
    request_headers: HeaderMap,
    body: Result<Json<E::Request>, JsonRejection>,
) -> Result<Response, Problem> {
    if !is_merge_patch(&request_headers) {
        return Err(
            Problem::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported Media Type")
                .with_detail(format!("Expected request with `Content-Type: {MERGE_PATCH_JSON}`")),
        );
    }
    let Json(request) = body.map_err(map_json_rejection)?;
    let body_id = E::request_id(&request);

    let saved: E = state
        .service
        .partial_update(id, body_id, E::into_patch(request))
        .await
        .map_err(|e| state.problem(e))?;

    let headers = entity_update_alert(
        &state.config.application_name,
        E::ENTITY_NAME,
        &saved.id().to_string(),
    );
    Ok((headers, Json(E::Response::from(saved))).into_response())
}

/// `GET /api/{path}` - one page as a JSON array, paging in headers
pub async fn get_all<E: RestResource>(
    Extension(state): Extension<Arc<ApiState>>,
    OriginalUri(uri): OriginalUri,
    RawQuery(query): RawQuery,
) -> Result<Response, Problem> {
    let request = parse_page_request(query.as_deref(), &state.config);
    let page = state
        .service
        .find_all::<E>(&request)
        .await
        .map_err(|e| state.problem(e))?;

    let headers = pagination_headers(&uri, &page);
    let items: Vec<E::Response> = page.items.into_iter().map(E::Response::from).collect();
    Ok((headers, Json(items)).into_response())
}

/// `GET /api/{path}/{id}`
pub async fn get_one<E: RestResource>(
    Extension(state): Extension<Arc<ApiState>>,
    Path(id): Path<EntityId>,
) -> Result<Json<E::Response>, Problem> {
    let found: E = state
        .service
        .find_one(id)
        .await
        .map_err(|e| state.problem(e))?;
    Ok(Json(found.into()))
}

/// `DELETE /api/{path}/{id}`
pub async fn delete<E: RestResource>(
    Extension(state): Extension<Arc<ApiState>>,
    Path(id): Path<EntityId>,
) -> Result<Response, Problem> {
    state
        .service
        .delete::<E>(id)
        .await
        .map_err(|e| state.problem(e))?;

    let headers = entity_deletion_alert(
        &state.config.application_name,
        E::ENTITY_NAME,
        &id.to_string(),
    );
    Ok((StatusCode::NO_CONTENT, headers).into_response())
}

fn is_merge_patch(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(MERGE_PATCH_JSON))
}

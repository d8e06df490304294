//! Alert and pagination response headers
//!
//! Alert headers follow the `X-{app}-alert` / `X-{app}-error` /
//! `X-{app}-params` convention the web client reads after each call.

use crate::contract::Page;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Uri};
use url::form_urlencoded;

pub const TOTAL_COUNT: &str = "x-total-count";

pub fn entity_creation_alert(application_name: &str, entity_name: &str, id: &str) -> HeaderMap {
    alert(
        application_name,
        &format!("A new {entity_name} is created with identifier {id}"),
        id,
    )
}

pub fn entity_update_alert(application_name: &str, entity_name: &str, id: &str) -> HeaderMap {
    alert(
        application_name,
        &format!("A {entity_name} is updated with identifier {id}"),
        id,
    )
}

pub fn entity_deletion_alert(application_name: &str, entity_name: &str, id: &str) -> HeaderMap {
    alert(
        application_name,
        &format!("A {entity_name} is deleted with identifier {id}"),
        id,
    )
}

pub fn failure_alert(application_name: &str, entity_name: &str, error_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(
        &mut headers,
        &format!("x-{application_name}-error"),
        &format!("error.{error_key}"),
    );
    insert(
        &mut headers,
        &format!("x-{application_name}-params"),
        &encode(entity_name),
    );
    headers
}

fn alert(application_name: &str, message: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, &format!("x-{application_name}-alert"), message);
    insert(
        &mut headers,
        &format!("x-{application_name}-params"),
        &encode(param),
    );
    headers
}

/// `X-Total-Count` and RFC 8288 `Link` headers for a page.
///
/// Links reuse the request path and query with `page` and `size`
/// replaced; `next` and `prev` only appear when such a page exists.
pub fn pagination_headers<T>(uri: &Uri, page: &Page<T>) -> HeaderMap {
    let mut links = Vec::with_capacity(4);
    if page.has_next() {
        links.push(link(uri, page.page.saturating_add(1), page.size, "next"));
    }
    if page.has_previous() {
        links.push(link(uri, page.page - 1, page.size, "prev"));
    }
    let last_page = page.total_pages().saturating_sub(1);
    links.push(link(uri, last_page, page.size, "last"));
    links.push(link(uri, 0, page.size, "first"));

    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(TOTAL_COUNT),
        HeaderValue::from(page.total),
    );
    insert(&mut headers, "link", &links.join(","));
    headers
}

fn link(uri: &Uri, page: u64, size: u64, rel: &str) -> String {
    let mut pairs: Vec<(String, String)> = uri
        .query()
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    set_param(&mut pairs, "page", page.to_string());
    set_param(&mut pairs, "size", size.to_string());

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(&pairs)
        .finish();
    format!("<{}?{}>; rel=\"{}\"", uri.path(), query, rel)
}

/// Replace the first occurrence of `key` (dropping duplicates) or append it
fn set_param(pairs: &mut Vec<(String, String)>, key: &str, value: String) {
    let mut value = Some(value);
    pairs.retain_mut(|(k, v)| {
        if k != key {
            return true;
        }
        match value.take() {
            Some(new) => {
                *v = new;
                true
            }
            None => false,
        }
    });
    if let Some(value) = value {
        pairs.push((key.to_string(), value));
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn insert(headers: &mut HeaderMap, name: &str, value: &str) {
    match (
        HeaderName::try_from(name),
        HeaderValue::try_from(value),
    ) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => tracing::warn!(header = name, "Skipping header with invalid name or value"),
    }
}

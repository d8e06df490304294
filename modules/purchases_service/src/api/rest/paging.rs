//! `page` / `size` / `sort` query parameter parsing

use crate::config::Config;
use crate::contract::{Direction, PageRequest, SortOrder};
use url::form_urlencoded;

/// Highest accepted page number, the 32-bit bound Spring pageables use
pub const MAX_PAGE: u64 = i32::MAX as u64;

/// Build a page request from the raw query string.
///
/// Lenient like the usual pageable resolvers: an unparsable or negative
/// `page` means 0, a missing or non-positive `size` means the configured
/// default, and sizes above the maximum are clamped. Pages above
/// [`MAX_PAGE`] are clamped too, keeping `page * size` in range. `sort`
/// may repeat; each value is `prop[,prop...][,asc|desc]`.
pub fn parse_page_request(query: Option<&str>, config: &Config) -> PageRequest {
    let mut page = 0;
    let mut size = config.default_page_size;
    let mut sort = Vec::new();

    let pairs = query
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect::<Vec<_>>())
        .unwrap_or_default();

    for (key, value) in pairs {
        match key.as_str() {
            "page" => page = parse_page(&value),
            "size" => {
                size = match value.trim().parse::<i64>() {
                    Ok(n) if n >= 1 => (n as u64).min(config.max_page_size),
                    _ => config.default_page_size,
                }
            }
            "sort" => sort.extend(parse_sort(&value)),
            _ => {}
        }
    }

    let page = page.min(u64::MAX / size.max(1));
    PageRequest { page, size, sort }
}

fn parse_page(value: &str) -> u64 {
    let value = value.trim();
    match value.parse::<u64>() {
        Ok(n) => n.min(MAX_PAGE),
        // all digits but wider than u64
        Err(_) if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) => MAX_PAGE,
        Err(_) => 0,
    }
}

fn parse_sort(value: &str) -> Vec<SortOrder> {
    let mut parts: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let direction = match parts.last().map(|p| p.to_ascii_lowercase()) {
        Some(last) if last == "asc" => {
            parts.pop();
            Direction::Asc
        }
        Some(last) if last == "desc" => {
            parts.pop();
            Direction::Desc
        }
        _ => Direction::Asc,
    };

    parts
        .into_iter()
        .map(|property| SortOrder {
            property: property.to_string(),
            direction,
        })
        .collect()
}

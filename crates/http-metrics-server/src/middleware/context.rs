//! Per-request data the metrics middleware needs.

use axum::{
    extract::{MatchedPath, Query},
    http::{HeaderMap, HeaderName, Request, Version, header},
};
use http_metrics_core::{AttributeSet, keys};
use indexmap::IndexMap;
use tracing::debug;

/// Header name for the tenant id.
pub static TENANT_ID_HEADER: HeaderName = HeaderName::from_static("x-tenantid");

/// Header name for the site id.
pub static SITE_ID_HEADER: HeaderName = HeaderName::from_static("x-siteid");

/// Scheme as seen by the client when running behind a proxy.
pub static FORWARDED_PROTO_HEADER: HeaderName = HeaderName::from_static("x-forwarded-proto");

/// Snapshot of an inbound request, taken after routing.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub scheme: String,
    pub method: String,
    pub protocol: &'static str,
    pub host: Option<String>,
    pub user_agent: Option<String>,
    /// Matched route template, e.g. `/greeting/{name}`.
    pub route: Option<String>,
    pub tenant_id: Option<i64>,
    pub site_id: Option<i64>,
    /// Query parameters grouped by key, in first-seen order.
    pub query: IndexMap<String, Vec<String>>,
}

impl RequestContext {
    pub fn from_request<B>(request: &Request<B>) -> Self {
        let headers = request.headers();
        let uri = request.uri();

        let scheme = header_str(headers, &FORWARDED_PROTO_HEADER)
            .or_else(|| uri.scheme_str())
            .unwrap_or("http")
            .to_ascii_lowercase();

        let host = header_str(headers, &header::HOST)
            .or_else(|| uri.authority().map(|a| a.as_str()))
            .map(String::from);

        let route = request
            .extensions()
            .get::<MatchedPath>()
            .map(|p| p.as_str().to_string());

        Self {
            scheme,
            method: request.method().as_str().to_string(),
            protocol: protocol_version(request.version()),
            host,
            user_agent: header_str(headers, &header::USER_AGENT).map(String::from),
            route,
            tenant_id: header_i64(headers, &TENANT_ID_HEADER),
            site_id: header_i64(headers, &SITE_ID_HEADER),
            query: query_params(request),
        }
    }

    /// Attributes supplied to both recorder hooks.
    pub fn custom_attributes(&self) -> AttributeSet {
        let mut attrs = AttributeSet::new();
        attrs
            .put_opt(keys::TENANT_ID, self.tenant_id)
            .put_opt(keys::SITE_ID, self.site_id)
            .put_opt(keys::HTTP_HOST, self.host.as_deref());

        for (key, values) in &self.query {
            match values.as_slice() {
                [single] => attrs.put(key.as_str(), single.as_str()),
                _ => attrs.put(key.as_str(), values.clone()),
            };
        }
        attrs
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Missing or non-numeric ids are treated as absent.
fn header_i64(headers: &HeaderMap, name: &HeaderName) -> Option<i64> {
    let raw = header_str(headers, name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(header = %name, value = raw, error = %e, "Ignoring non-numeric header");
            None
        }
    }
}

fn protocol_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_11 => "1.1",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "unknown",
    }
}

fn query_params<B>(request: &Request<B>) -> IndexMap<String, Vec<String>> {
    let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
    if request.uri().query().is_none() {
        return grouped;
    }

    match Query::<Vec<(String, String)>>::try_from_uri(request.uri()) {
        Ok(Query(pairs)) => {
            for (key, value) in pairs {
                grouped.entry(key).or_default().push(value);
            }
        }
        Err(e) => debug!(error = %e, "Ignoring unparsable query string"),
    }
    grouped
}

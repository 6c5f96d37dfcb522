use std::str::FromStr;

use axum::{
    extract::{FromRequestParts, Query},
    http::{request::Parts, Method, Uri},
};

use crate::error::{Error, Result};

/// Decoded query string parameters, in request order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value given for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value of `filter[name]`, empty values count as absent
    pub fn filter(&self, name: &str) -> Option<&str> {
        self.get(&format!("filter[{name}]"))
            .filter(|value| !value.is_empty())
    }

    /// Parsed value of `filter[name]`
    pub fn parse_filter<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.filter(name)
            .map(|raw| {
                raw.parse()
                    .map_err(|e| Error::invalid_parameter(&format!("filter[{name}]"), e))
            })
            .transpose()
    }

    /// Relationships requested through the comma separated `include` parameter
    pub fn include(&self) -> Vec<String> {
        self.get("include")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// What the resource engine needs to know about an incoming request
#[derive(Debug, Clone)]
pub struct ResourceRequest {
    pub method: Method,
    /// Path and raw query string, as received
    pub url: String,
    pub params: QueryParams,
}

impl ResourceRequest {
    pub fn from_uri(method: Method, uri: &Uri) -> Result<Self> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map_err(|e| Error::invalid_parameter("query", e.body_text()))?;

        let url = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string());

        Ok(Self {
            method,
            url,
            params: QueryParams::new(pairs),
        })
    }

    /// Key the response to this request is cached under
    ///
    /// Parameters are kept in the order they were sent, so reordering them
    /// yields a different key.
    pub fn cache_key(&self) -> String {
        format!("{}-{}", self.method, self.url)
    }
}

impl<S> FromRequestParts<S> for ResourceRequest
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Self::from_uri(parts.method.clone(), &parts.uri)
    }
}

#[cfg(test)]
pub(crate) fn get(path_and_query: &str) -> ResourceRequest {
    let uri: Uri = path_and_query.parse().unwrap();
    ResourceRequest::from_uri(Method::GET, &uri).unwrap()
}

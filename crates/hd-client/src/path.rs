//! Endpoint URL assembly.
//!
//! Every assembled endpoint carries the `.json` suffix; side-load names are
//! sent as a comma-joined `include` query parameter.

use crate::error::{Error, ErrorKind, Result};

/// Trailing query data of a segmented path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Key/value pairs, serialized in order.
    Params(Vec<(String, String)>),
    /// A pre-built query string such as `?page=2&per_page=50`, used as-is.
    Raw(String),
}

/// Where a request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSpec {
    /// Path segments joined under the remote URI, plus optional query data.
    Segments {
        segments: Vec<String>,
        query: Option<Query>,
    },
    /// A caller-supplied URL or path string, e.g. a `next_page` cursor.
    Url(String),
}

impl PathSpec {
    /// Build a segmented path.
    ///
    /// If the last element contains a literal `?` it is taken as the query
    /// string rather than as a segment.
    pub fn segments<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut segments: Vec<String> = parts.into_iter().map(Into::into).collect();
        let query = match segments.last() {
            Some(last) if last.contains('?') => segments.pop().map(Query::Raw),
            _ => None,
        };
        PathSpec::Segments { segments, query }
    }

    /// Use a caller-built URL or path verbatim.
    pub fn url(url: impl Into<String>) -> Self {
        PathSpec::Url(url.into())
    }

    /// Attach key/value query data.
    pub fn with_query<I, K, V>(self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let params = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.replace_query(Query::Params(params))
    }

    /// Attach a pre-built query string. A missing leading `?` is added.
    pub fn with_query_string(self, query: impl Into<String>) -> Self {
        let mut query = query.into();
        if !query.is_empty() && !query.starts_with('?') {
            query.insert(0, '?');
        }
        self.replace_query(Query::Raw(query))
    }

    fn replace_query(self, query: Query) -> Self {
        match self {
            PathSpec::Segments { segments, .. } => PathSpec::Segments {
                segments,
                query: Some(query),
            },
            url @ PathSpec::Url(_) => url,
        }
    }

    /// Produce the final request URL.
    ///
    /// `include` is the side-load list for this call only; the path itself is
    /// never modified.
    pub fn assemble(&self, base: &str, include: &[String]) -> Result<String> {
        let base = base.trim_end_matches('/');

        match self {
            PathSpec::Segments { segments, query } => {
                if segments.is_empty() {
                    return Err(Error::new(ErrorKind::InvalidUrl(
                        "path has no segments".to_string(),
                    )));
                }
                let query = build_query(query.as_ref(), include)?;
                Ok(format!("{}/{}.json{}", base, segments.join("/"), query))
            }
            PathSpec::Url(url) => Ok(resolve_url(base, url)),
        }
    }
}

impl From<&str> for PathSpec {
    fn from(url: &str) -> Self {
        PathSpec::Url(url.to_string())
    }
}

impl From<String> for PathSpec {
    fn from(url: String) -> Self {
        PathSpec::Url(url)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for PathSpec {
    fn from(parts: [S; N]) -> Self {
        PathSpec::segments(parts)
    }
}

impl<S: Into<String>> From<Vec<S>> for PathSpec {
    fn from(parts: Vec<S>) -> Self {
        PathSpec::segments(parts)
    }
}

fn resolve_url(base: &str, url: &str) -> String {
    if url.contains(base) || url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    if url.starts_with('/') {
        format!("{}{}", base, url)
    } else {
        format!("{}/{}", base, url)
    }
}

fn include_param(include: &[String]) -> String {
    let names: Vec<String> = include
        .iter()
        .map(|name| urlencoding::encode(name).into_owned())
        .collect();
    format!("include={}", names.join(","))
}

fn build_query(query: Option<&Query>, include: &[String]) -> Result<String> {
    match query {
        Some(Query::Params(params)) => {
            let kept: Vec<&(String, String)> = if include.is_empty() {
                params.iter().collect()
            } else {
                params.iter().filter(|(k, _)| k != "include").collect()
            };
            let mut encoded = serde_urlencoded::to_string(&kept)
                .map_err(|e| Error::with_source(ErrorKind::InvalidUrl(e.to_string()), e))?;
            if !include.is_empty() {
                if !encoded.is_empty() {
                    encoded.push('&');
                }
                encoded.push_str(&include_param(include));
            }
            if encoded.is_empty() {
                Ok(String::new())
            } else {
                Ok(format!("?{}", encoded))
            }
        }
        Some(Query::Raw(raw)) if !raw.is_empty() => {
            let mut query = raw.clone();
            if !include.is_empty() {
                if !query.ends_with('?') && !query.ends_with('&') {
                    query.push('&');
                }
                query.push_str(&include_param(include));
            }
            Ok(query)
        }
        _ if include.is_empty() => Ok(String::new()),
        _ => Ok(format!("?{}", include_param(include))),
    }
}

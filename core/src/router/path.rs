//! Path patterns and navigation targets
//!
//! A pattern is a `/`-separated list of segments. Segments are either
//! static text, a `:name` param capturing one segment, or a trailing
//! `*name` catch-all capturing whatever is left of the path.

use crate::error::{RouterError, RouterResult};
use std::collections::BTreeMap;
use std::fmt;
use url::{form_urlencoded, Url};

/// Params extracted from a matched path, keyed by param name
pub type Params = BTreeMap<String, String>;

/// Origin used to resolve navigation targets as URL references
const RESOLVE_ORIGIN: &str = "http://viewroute.local/";

/// Name given to an anonymous catch-all segment (`/*`)
const DEFAULT_CATCH_ALL: &str = "pathMatch";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    CatchAll(String),
}

/// A parsed route path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern such as `/`, `/tutorial`, `/users/:id` or `/*path`
    pub fn parse(source: &str) -> RouterResult<Self> {
        let invalid = |reason: &str| RouterError::InvalidPath {
            path: source.to_string(),
            reason: reason.to_string(),
        };

        if !source.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }

        let body = source[1..].strip_suffix('/').unwrap_or(&source[1..]);
        let mut segments = Vec::new();

        if !body.is_empty() {
            let raw_segments: Vec<&str> = body.split('/').collect();
            let last = raw_segments.len() - 1;

            for (idx, raw) in raw_segments.into_iter().enumerate() {
                if raw.is_empty() {
                    return Err(invalid("empty segment"));
                }

                let segment = if let Some(name) = raw.strip_prefix(':') {
                    if !is_param_name(name) {
                        return Err(invalid("param names must be non-empty identifiers"));
                    }
                    Segment::Param(name.to_string())
                } else if let Some(name) = raw.strip_prefix('*') {
                    if idx != last {
                        return Err(invalid("catch-all segment must be last"));
                    }
                    if name.is_empty() {
                        Segment::CatchAll(DEFAULT_CATCH_ALL.to_string())
                    } else if is_param_name(name) {
                        Segment::CatchAll(name.to_string())
                    } else {
                        return Err(invalid("param names must be non-empty identifiers"));
                    }
                } else if raw.contains(['?', '#', ':', '*']) {
                    return Err(invalid("static segments cannot contain '?', '#', ':' or '*'"));
                } else {
                    Segment::Static(raw.to_string())
                };

                segments.push(segment);
            }
        }

        let mut seen = Vec::new();
        for name in segments.iter().filter_map(Segment::param_name) {
            if seen.contains(&name) {
                return Err(invalid("param names must be unique"));
            }
            seen.push(name);
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern has no dynamic segments
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, Segment::Static(_)))
    }

    /// Whether the pattern ends in a catch-all segment
    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::CatchAll(_)))
    }

    /// Names of the params this pattern captures, in order
    pub fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(Segment::param_name)
            .collect()
    }

    /// Shape of the pattern used to detect two patterns matching the same paths
    pub(crate) fn signature(&self, sensitive: bool) -> String {
        let mut signature = String::new();
        for segment in &self.segments {
            signature.push('/');
            match segment {
                Segment::Static(text) if sensitive => signature.push_str(text),
                Segment::Static(text) => signature.push_str(&text.to_lowercase()),
                Segment::Param(_) => signature.push(':'),
                Segment::CatchAll(_) => signature.push('*'),
            }
        }
        if signature.is_empty() {
            signature.push('/');
        }
        signature
    }

    /// Match a normalized location path, returning the captured params
    pub fn matches(&self, path: &str, sensitive: bool, strict: bool) -> Option<Params> {
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => {
                if strict {
                    return None;
                }
                trimmed
            }
            _ => path,
        };

        let input: Vec<&str> = match path {
            "" | "/" => Vec::new(),
            _ => path.strip_prefix('/')?.split('/').collect(),
        };

        let mut params = Params::new();
        for (idx, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Static(text) => {
                    let part = input.get(idx)?;
                    let equal = if sensitive {
                        part == text
                    } else {
                        part.eq_ignore_ascii_case(text)
                    };
                    if !equal {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let part = input.get(idx).filter(|part| !part.is_empty())?;
                    params.insert(name.clone(), decode(part));
                }
                Segment::CatchAll(name) => {
                    let rest = input.get(idx..).unwrap_or_default().join("/");
                    params.insert(name.clone(), decode(&rest));
                    return Some(params);
                }
            }
        }

        if input.len() == self.segments.len() {
            Some(params)
        } else {
            None
        }
    }

    /// Render a concrete path from params, failing with the first missing param name
    pub fn build(&self, params: &Params) -> Result<String, String> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Static(text) => {
                    path.push('/');
                    path.push_str(text);
                }
                Segment::Param(name) => match params.get(name).filter(|v| !v.is_empty()) {
                    Some(value) => {
                        path.push('/');
                        path.push_str(&urlencoding::encode(value));
                    }
                    None => return Err(name.clone()),
                },
                Segment::CatchAll(name) => {
                    let rest = params.get(name).map(String::as_str).unwrap_or_default();
                    let encoded: Vec<_> = rest
                        .trim_start_matches('/')
                        .split('/')
                        .map(urlencoding::encode)
                        .collect();
                    path.push('/');
                    path.push_str(&encoded.join("/"));
                }
            }
        }
        Ok(path)
    }
}

impl Segment {
    fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Static(_) => None,
            Segment::Param(name) | Segment::CatchAll(name) => Some(name),
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Percent-decode a captured path segment. Invalid UTF-8 is replaced.
fn decode(raw: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

fn is_param_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A navigation target split into path, query and hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Absolute path with dot segments resolved
    pub path: String,
    /// Decoded query pairs, in order
    pub query: Vec<(String, String)>,
    /// Fragment without the leading `#`
    pub hash: Option<String>,
}

impl Location {
    /// Parse a target such as `/tutorial?step=2#intro` relative to the application root
    pub fn parse(target: &str) -> RouterResult<Self> {
        let target = target.trim();

        if Url::parse(target).is_ok() {
            return Err(RouterError::InvalidPath {
                path: target.to_string(),
                reason: "absolute URLs are not application paths".to_string(),
            });
        }

        // A leading `//` would otherwise be read as a host
        let target = if target.starts_with("//") {
            format!("/{}", target.trim_start_matches('/'))
        } else {
            target.to_string()
        };

        let url = Url::parse(RESOLVE_ORIGIN)
            .and_then(|origin| origin.join(&target))
            .map_err(|e| RouterError::InvalidPath {
                path: target.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            path: url.path().to_string(),
            query: url.query_pairs().into_owned().collect(),
            hash: url.fragment().filter(|f| !f.is_empty()).map(str::to_string),
        })
    }

    /// Drop the scheme and host from an absolute browser URL, keeping path, query and hash
    pub(crate) fn without_origin(target: &str) -> String {
        match Url::parse(target.trim()) {
            Ok(url) if url.has_host() => {
                let mut rest = url.path().to_string();
                if let Some(query) = url.query() {
                    rest.push('?');
                    rest.push_str(query);
                }
                if let Some(fragment) = url.fragment() {
                    rest.push('#');
                    rest.push_str(fragment);
                }
                rest
            }
            _ => target.to_string(),
        }
    }

    /// Path, query and hash joined back into a single string
    pub fn full_path(&self) -> String {
        let mut full = self.path.clone();
        if !self.query.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter())
                .finish();
            full.push('?');
            full.push_str(&query);
        }
        if let Some(hash) = &self.hash {
            full.push('#');
            full.push_str(hash);
        }
        full
    }
}

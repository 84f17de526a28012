//! URL splitting — thin wrapper over the `url` crate.
//!
//! [`split_url`] breaks an input string into its components when it is a
//! fully qualified `http`/`https` URL, and treats anything else as a bare
//! path. [`process_path`] applies the path post-processing every resolver
//! entry point shares: strip one trailing extension, then percent-decode.

use url::Url;

/// Components of a split URL.
///
/// For a bare-path input only [`path`](Self::path) is populated; the other
/// fields are `None`. A malformed URL degrades to a path-only value holding
/// the original input — splitting never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UrlParts {
    /// URL scheme (`http` or `https`), when the input was a full URL.
    pub scheme: Option<String>,
    /// Hostname, when the input was a full URL.
    pub host: Option<String>,
    /// Explicit port, when one was given.
    pub port: Option<u16>,
    /// The path component. For bare-path input this is the whole input.
    pub path: String,
    /// Query string without the leading `?`.
    pub query: Option<String>,
    /// Fragment without the leading `#`.
    pub fragment: Option<String>,
}

/// Split an input string into URL components.
///
/// Inputs starting with `http://` or `https://` (case-insensitive) are
/// parsed as full URLs; everything else is taken verbatim as a path.
///
/// # Example
///
/// ```
/// use ruta::split_url;
///
/// let parts = split_url("http://example.com/admin/user/view?page=2");
/// assert_eq!(parts.host.as_deref(), Some("example.com"));
/// assert_eq!(parts.path, "/admin/user/view");
/// assert_eq!(parts.query.as_deref(), Some("page=2"));
///
/// let parts = split_url("admin/user/view");
/// assert_eq!(parts.host, None);
/// assert_eq!(parts.path, "admin/user/view");
/// ```
#[must_use]
pub fn split_url(input: &str) -> UrlParts {
    if !has_http_scheme(input) {
        return path_only(input);
    }

    match Url::parse(input) {
        Ok(parsed) => UrlParts {
            scheme: Some(parsed.scheme().to_string()),
            host: parsed.host_str().map(str::to_string),
            port: parsed.port(),
            path: parsed.path().to_string(),
            query: parsed.query().map(str::to_string),
            fragment: parsed.fragment().map(str::to_string),
        },
        Err(_) => path_only(input),
    }
}

/// Post-process a raw URL path: strip one trailing extension suffix, then
/// percent-decode.
///
/// The extension is a final `.` followed by one or more characters that are
/// neither `/` nor `.`. Percent sequences that do not decode to valid UTF-8
/// leave the input unchanged rather than failing.
#[must_use]
pub fn process_path(path: &str) -> String {
    let stripped = strip_extension(path);
    match urlencoding::decode(stripped) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => stripped.to_string(),
    }
}

/// Returns `true` when the input carries an `http://` or `https://` prefix,
/// compared case-insensitively.
pub(crate) fn has_http_scheme(input: &str) -> bool {
    input
        .get(..7)
        .is_some_and(|p| p.eq_ignore_ascii_case("http://"))
        || input
            .get(..8)
            .is_some_and(|p| p.eq_ignore_ascii_case("https://"))
}

fn path_only(input: &str) -> UrlParts {
    UrlParts {
        path: input.to_string(),
        ..UrlParts::default()
    }
}

fn strip_extension(path: &str) -> &str {
    match path.rfind('.') {
        Some(dot) => {
            let ext = &path[dot + 1..];
            if !ext.is_empty() && !ext.contains('/') {
                &path[..dot]
            } else {
                path
            }
        }
        None => path,
    }
}

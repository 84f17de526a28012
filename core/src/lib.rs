//! ruta — URL to routing-coordinate resolution
//!
//! Resolves an incoming URL or raw path string into three routing
//! coordinates — **module**, **controller**, **action** — under a defined
//! precedence of binding rules, with a domain-matching sub-engine that maps
//! hostnames to module names through exact, sub-domain, and
//! specificity-ranked wildcard rules.
//!
//! # Architecture
//!
//! - [`split_url`] / [`UrlParts`] — URL component splitting (thin wrapper
//!   over the `url` crate; bare paths pass through untouched)
//! - [`convert_names`] / [`NameForms`] — the three casing forms of a
//!   coordinate (snake identifier, PascalCase class, camelCase method)
//! - [`resolve_controller`] — directory chain / leaf controller / action
//!   from a path, with dot-separated nested controllers
//! - [`match_domain`] / [`DomainRules`] — hostname to module resolution
//!   over an insertion-ordered rule table
//! - [`resolve_route`] — the orchestrator: module precedence chain plus
//!   controller resolution, producing a [`RouteResolution`]
//!
//! # Total functions
//!
//! No operation here fails for any string input. Malformed URLs, empty
//! strings, separator-only paths, and undecodable percent sequences all
//! degrade to documented defaults; every call returns a fully populated
//! value. Everything is a pure function over immutable arguments — no
//! shared state, no I/O — so concurrent use needs no coordination.
//!
//! Dispatching to an actual controller is the caller's business: this crate
//! only computes where a URL points, never executes what lives there.
//!
//! # Example
//!
//! ```
//! use ruta::{match_domain, resolve_route, DomainRules, ResolveOptions};
//!
//! let res = resolve_route("index/blog/read", &ResolveOptions::default());
//! assert_eq!(res.module, "index");
//! assert_eq!(res.ctrl, "blog");
//! assert_eq!(res.action, "read");
//! assert_eq!(res.fullpath, "index/blog/read");
//!
//! let res = resolve_route("admin/user.profile/edit", &ResolveOptions::default());
//! assert_eq!(res.module, "admin");
//! assert_eq!(res.path, "user/profile");
//! assert_eq!(res.url, "admin/user.profile/edit");
//!
//! let rules = DomainRules::from_iter([
//!     ("admin.example.com", "admin"),
//!     ("api.*", "apihub"),
//!     ("*", "www"),
//! ]);
//! assert_eq!(match_domain("api.v2.example.com", &rules, None).module, "apihub");
//! assert_eq!(match_domain("other.example.com", &rules, None).module, "www");
//! ```

mod controller;
mod domain;
mod name_convert;
mod route;
mod url_split;

pub use controller::{resolve_controller, ControllerOptions, ControllerResolution};
pub use domain::{
    match_domain, DomainMatch, DomainRules, MatchedRule, Pattern, COMPOUND_SECOND_LEVEL,
    COMPOUND_TOP_LEVEL,
};
pub use name_convert::{convert_names, NameForms};
pub use route::{resolve_route, ResolveOptions, RouteResolution};
pub use url_split::{process_path, split_url, UrlParts};

/// Prelude module for convenient imports.
///
/// ```
/// use ruta::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        convert_names, match_domain, process_path, resolve_controller, resolve_route, split_url,
        ControllerOptions, ControllerResolution, DomainMatch, DomainRules, MatchedRule, NameForms,
        Pattern, ResolveOptions, RouteResolution, UrlParts,
    };
}

//! Route resolution — the orchestrator combining URL splitting, domain
//! matching, and controller path resolution under the module-precedence
//! chain.
//!
//! Module resolution order, first applicable wins:
//!
//! 1. `bind_module` — forced module, nothing consumed from the path.
//! 2. `bind_domains` — domain match on the URL's host.
//! 3. `bind_files` — first path segment as a literal table key.
//! 4. First path segment itself (a `name.php` segment binds as `name`).
//! 5. `default_module`.
//!
//! A module found through the domain table or the path (cases 2–4) consumes
//! the first path segment before the remainder goes to controller
//! resolution; when nothing remains, the default controller/action stand in.

use crate::controller::{resolve_path, ControllerOptions, ControllerResolution};
use crate::domain::{match_domain, DomainRules};
use crate::url_split::{process_path, split_url};
use indexmap::IndexMap;

/// Options for [`resolve_route`]. Immutable per call; every field has a
/// default, so `ResolveOptions::default()` is a complete configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResolveOptions {
    /// Force this module and skip all other module resolution.
    /// `None` or an empty string means unset.
    pub bind_module: Option<String>,
    /// Literal first-path-segment to module bindings. Lowest-precedence
    /// table; consulted before segment inference.
    pub bind_files: IndexMap<String, String>,
    /// Domain-pattern to module bindings; higher precedence than
    /// [`bind_files`](Self::bind_files).
    pub bind_domains: DomainRules,
    /// Module used when nothing else resolves one.
    pub default_module: String,
    /// Controller substituted when the path names none.
    pub default_controller: String,
    /// Action substituted when the path names none.
    pub default_action: String,
    /// Explicit root domain for the domain matcher.
    pub domain_root: Option<String>,
    /// Apply name-case conversion to the controller and action.
    pub convert: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            bind_module: None,
            bind_files: IndexMap::new(),
            bind_domains: DomainRules::new(),
            default_module: "index".to_string(),
            default_controller: "index".to_string(),
            default_action: "index".to_string(),
            domain_root: None,
            convert: true,
        }
    }
}

impl ResolveOptions {
    /// Create options with the standard defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a module, skipping domain, file, and segment resolution.
    #[must_use]
    pub fn bind_module(mut self, module: impl Into<String>) -> Self {
        self.bind_module = Some(module.into());
        self
    }

    /// Set the file-binding table.
    #[must_use]
    pub fn bind_files(mut self, files: IndexMap<String, String>) -> Self {
        self.bind_files = files;
        self
    }

    /// Add one file binding.
    #[must_use]
    pub fn bind_file(mut self, name: impl Into<String>, module: impl Into<String>) -> Self {
        self.bind_files.insert(name.into(), module.into());
        self
    }

    /// Set the domain-binding rule table.
    #[must_use]
    pub fn bind_domains(mut self, rules: DomainRules) -> Self {
        self.bind_domains = rules;
        self
    }

    /// Add one domain binding.
    #[must_use]
    pub fn bind_domain(mut self, pattern: impl Into<String>, module: impl Into<String>) -> Self {
        self.bind_domains.insert(pattern, module);
        self
    }

    /// Set the default module name.
    #[must_use]
    pub fn default_module(mut self, name: impl Into<String>) -> Self {
        self.default_module = name.into();
        self
    }

    /// Set the default controller name.
    #[must_use]
    pub fn default_controller(mut self, name: impl Into<String>) -> Self {
        self.default_controller = name.into();
        self
    }

    /// Set the default action name.
    #[must_use]
    pub fn default_action(mut self, name: impl Into<String>) -> Self {
        self.default_action = name.into();
        self
    }

    /// Set the explicit root domain.
    #[must_use]
    pub fn domain_root(mut self, root: impl Into<String>) -> Self {
        self.domain_root = Some(root.into());
        self
    }

    /// Set the name-conversion flag.
    #[must_use]
    pub fn convert(mut self, convert: bool) -> Self {
        self.convert = convert;
        self
    }

    fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            convert: self.convert,
            default_controller: self.default_controller.clone(),
            default_action: self.default_action.clone(),
        }
    }
}

/// The three routing coordinates plus every derived form.
///
/// Carries the module alongside the merged controller-resolution fields,
/// the fully qualified `fullpath`, and the display `url` form that writes
/// nested controllers with the dot separator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResolution {
    /// The resolved module.
    pub module: String,
    /// The decoded remainder path the controller was resolved from.
    pub raw: String,
    /// Directory chain of a nested controller, slash-joined, lowercase.
    pub dir: String,
    /// Controller path without the module: directory chain plus controller.
    pub path: String,
    /// Action identifier.
    pub action: String,
    /// Controller identifier.
    pub ctrl: String,
    /// Action method name, lower-camel under conversion.
    pub method: String,
    /// Controller class name, upper-camel under conversion.
    pub class: String,
    /// Whether the controller is nested.
    pub nested: bool,
    /// Number of controller levels; 1 when not nested.
    pub depth: usize,
    /// `module/dir…/controller/action`.
    pub fullpath: String,
    /// `module/controller/action`, nested controllers dot-joined
    /// (`module/dir.controller/action`).
    pub url: String,
}

impl RouteResolution {
    /// Controller identifier under its legacy name.
    #[must_use]
    pub fn controller(&self) -> &str {
        &self.ctrl
    }
}

/// Resolve a URL or raw path into routing coordinates.
///
/// Never fails: every input, including the empty string, resolves to a
/// fully populated result built from the options' defaults.
///
/// # Example
///
/// ```
/// use ruta::{resolve_route, ResolveOptions};
///
/// let res = resolve_route("index/blog/read", &ResolveOptions::default());
/// assert_eq!(res.module, "index");
/// assert_eq!(res.ctrl, "blog");
/// assert_eq!(res.action, "read");
/// assert_eq!(res.class, "Blog");
/// assert_eq!(res.fullpath, "index/blog/read");
/// ```
#[must_use]
pub fn resolve_route(input: &str, opts: &ResolveOptions) -> RouteResolution {
    let parts = split_url(input);
    let decoded = process_path(&parts.path);
    let trimmed = decoded.trim_matches('/');
    let segments: Vec<&str> = if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    };
    let domain = parts.host.as_deref().unwrap_or("");

    let mut module: Option<String> = None;
    // whether the module occupied position zero of the URL (path segment or
    // domain binding) and the first segment must be consumed
    let mut from_position_zero = false;

    // 1. forced module
    if let Some(bound) = opts.bind_module.as_deref().filter(|m| !m.is_empty()) {
        module = Some(bound.to_string());
    }

    // 2. domain binding
    if module.is_none() && !domain.is_empty() && !opts.bind_domains.is_empty() {
        let dm = match_domain(domain, &opts.bind_domains, opts.domain_root.as_deref());
        if !dm.module.is_empty() {
            module = Some(dm.module);
            from_position_zero = true;
        }
    }

    // 3. file binding on the first segment
    if module.is_none() && !segments.is_empty() && !opts.bind_files.is_empty() {
        if let Some(bound) = opts.bind_files.get(segments[0]) {
            module = Some(bound.clone());
            from_position_zero = true;
        }
    }

    // 4. the first segment itself, with the `name.php` special case
    if module.is_none() {
        if let Some(first) = segments.first() {
            if let Some(stem) = php_stem(first) {
                module = Some(stem.to_string());
                from_position_zero = true;
            } else if !first.is_empty() {
                module = Some((*first).to_string());
                from_position_zero = true;
            }
        }
    }

    // 5. fallback
    let module = module.unwrap_or_else(|| opts.default_module.clone());

    let ctrl_opts = opts.controller_options();
    let controller = if from_position_zero && !segments.is_empty() {
        let remainder = segments[1..].join("/");
        if remainder.is_empty() {
            let fallback = format!("{}/{}", opts.default_controller, opts.default_action);
            resolve_path(&fallback, &ctrl_opts)
        } else {
            resolve_path(&remainder, &ctrl_opts)
        }
    } else {
        resolve_path(trimmed, &ctrl_opts)
    };

    compose(module, controller)
}

fn compose(module: String, controller: ControllerResolution) -> RouteResolution {
    let fullpath = format!("{module}/{}/{}", controller.path, controller.action);

    let url = if controller.nested {
        let dotted = if controller.dir.is_empty() {
            controller.ctrl.clone()
        } else {
            format!("{}.{}", controller.dir.replace('/', "."), controller.ctrl)
        };
        format!("{module}/{dotted}/{}", controller.action)
    } else {
        format!("{module}/{}/{}", controller.ctrl, controller.action)
    };

    RouteResolution {
        module,
        raw: controller.raw,
        dir: controller.dir,
        path: controller.path,
        action: controller.action,
        ctrl: controller.ctrl,
        method: controller.method,
        class: controller.class,
        nested: controller.nested,
        depth: controller.depth,
        fullpath,
        url,
    }
}

/// `name.php` (case-insensitive) → `name`; anything else, including a bare
/// `.php`, is not a stem.
fn php_stem(segment: &str) -> Option<&str> {
    let cut = segment.len().checked_sub(4)?;
    let tail = segment.get(cut..)?;
    if cut > 0 && tail.eq_ignore_ascii_case(".php") {
        segment.get(..cut)
    } else {
        None
    }
}

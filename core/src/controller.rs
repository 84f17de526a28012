//! Controller path resolution — directory chain, leaf controller, action.
//!
//! The last two path segments name the controller and the action. A
//! controller token may carry multiple dot-separated levels ("nested"
//! controllers): the final level is the leaf controller, everything before
//! it becomes a directory chain. Directory segments are forced lowercase
//! unconditionally; only the leaf controller and the action respect the
//! conversion flag.

use crate::name_convert::convert_names;
use crate::url_split::{process_path, split_url};

/// Options for [`resolve_controller`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerOptions {
    /// Apply name-case conversion to the leaf controller and action.
    pub convert: bool,
    /// Controller substituted when the path names none.
    pub default_controller: String,
    /// Action substituted when the path names none.
    pub default_action: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            convert: true,
            default_controller: "index".to_string(),
            default_action: "index".to_string(),
        }
    }
}

impl ControllerOptions {
    /// Create options with the standard defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the conversion flag.
    #[must_use]
    pub fn convert(mut self, convert: bool) -> Self {
        self.convert = convert;
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
}

/// The result of resolving a path into controller coordinates.
///
/// Invariant: `depth == 1` exactly when `nested == false`; `depth` equals
/// the number of dot-separated levels in the controller token.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerResolution {
    /// The decoded path with surrounding slashes trimmed.
    pub raw: String,
    /// Directory chain of a nested controller, slash-joined, always
    /// lowercase. Empty when not nested.
    pub dir: String,
    /// Full controller path: directory chain plus leaf controller.
    pub path: String,
    /// Action identifier (lowercased under conversion, verbatim otherwise).
    pub action: String,
    /// Leaf controller identifier.
    pub ctrl: String,
    /// Action method name, lower-camel under conversion.
    pub method: String,
    /// Controller class name, upper-camel under conversion.
    pub class: String,
    /// Whether the controller token carried multiple levels.
    pub nested: bool,
    /// Number of controller levels; 1 when not nested.
    pub depth: usize,
}

/// Resolve a path (or full URL) into controller coordinates.
///
/// Never fails: empty input resolves to the default controller and action.
///
/// # Example
///
/// ```
/// use ruta::{resolve_controller, ControllerOptions};
///
/// let res = resolve_controller("admin.user.profile/edit", &ControllerOptions::default());
/// assert_eq!(res.dir, "admin/user");
/// assert_eq!(res.ctrl, "profile");
/// assert_eq!(res.class, "Profile");
/// assert_eq!(res.action, "edit");
/// assert!(res.nested);
/// assert_eq!(res.depth, 3);
/// ```
#[must_use]
pub fn resolve_controller(input: &str, opts: &ControllerOptions) -> ControllerResolution {
    let parts = split_url(input);
    let decoded = process_path(&parts.path);
    resolve_path(&decoded, opts)
}

/// Resolve an already-decoded path. Used by the route orchestrator, which
/// decodes and extension-strips the path exactly once.
pub(crate) fn resolve_path(decoded: &str, opts: &ControllerOptions) -> ControllerResolution {
    let raw = decoded.trim_matches('/').to_string();
    let segments: Vec<&str> = raw.split('/').collect();

    let (controller_token, action_token) = match segments.as_slice() {
        [] => ("", ""),
        [only] => (*only, ""),
        [.., controller, action] => (*controller, *action),
    };

    let action_token = if action_token.is_empty() {
        opts.default_action.as_str()
    } else {
        action_token
    };
    let controller_token = if controller_token.is_empty() {
        opts.default_controller.as_str()
    } else {
        controller_token
    };

    let levels: Vec<&str> = controller_token.split('.').collect();
    let depth = levels.len();
    let nested = depth > 1;
    let leaf = levels.last().copied().unwrap_or_default();
    let dir = levels[..depth - 1]
        .iter()
        .map(|level| level.to_lowercase())
        .collect::<Vec<_>>()
        .join("/");

    let forms = convert_names(leaf, action_token, opts.convert);
    let action = if opts.convert {
        action_token.to_lowercase()
    } else {
        action_token.to_string()
    };
    let path = if dir.is_empty() {
        forms.ctrl.clone()
    } else {
        format!("{dir}/{}", forms.ctrl)
    };

    ControllerResolution {
        raw,
        dir,
        path,
        action,
        ctrl: forms.ctrl,
        method: forms.method,
        class: forms.class,
        nested,
        depth,
    }
}

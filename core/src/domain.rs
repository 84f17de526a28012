//! Domain matching — hostname to module resolution.
//!
//! A [`DomainRules`] table maps domain patterns to module names. Each key is
//! classified once, at insertion, into a [`Pattern`] tag; match time never
//! re-derives pattern shapes from the key string.
//!
//! Resolution precedence, first match wins:
//!
//! 1. Exact match — the rule key equals the full domain (hostnames and IP
//!    literals alike).
//! 2. Sub-domain suffix match — every suffix of the sub-domain's label
//!    sequence, longest first, looked up verbatim.
//! 3. Wildcard match — `*.suffix`, `prefix.*`, and `*` rules scored by
//!    specificity; the highest score wins, earlier table entries win ties.
//!
//! Longer, more specific bindings always beat shorter or wildcard ones: an
//! operator can bind `admin.example.com` precisely while `*` stays the
//! catch-all, or bind `api.*` without enumerating every sub-domain of `api`.

use crate::url_split::{has_http_scheme, split_url};
use indexmap::IndexMap;

/// Second-level labels that pair with [`COMPOUND_TOP_LEVEL`] to form a
/// compound registrable suffix (`com.cn`, `org.uk`, ...). Configuration
/// data: extend the set without touching the matching algorithm.
pub const COMPOUND_SECOND_LEVEL: &[&str] = &["com", "net", "org", "gov", "edu"];

/// Top-level labels that pair with [`COMPOUND_SECOND_LEVEL`].
pub const COMPOUND_TOP_LEVEL: &[&str] = &["cn", "uk"];

/// The shape of a domain-binding rule key, classified once at insertion.
///
/// # Example
///
/// ```
/// use ruta::Pattern;
///
/// assert_eq!(Pattern::classify("admin.example.com"), Pattern::Literal);
/// assert_eq!(Pattern::classify("*.user"), Pattern::SuffixWildcard("user".into()));
/// assert_eq!(Pattern::classify("api.*"), Pattern::PrefixWildcard("api".into()));
/// assert_eq!(Pattern::classify("*"), Pattern::CatchAll);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Exact domain, IP literal, or bare sub-domain label sequence.
    /// Serves both the exact-match and sub-domain-suffix phases.
    Literal,
    /// `*.label` — matches a sub-domain equal to or ending with the label.
    SuffixWildcard(String),
    /// `label.*` — matches a sub-domain equal to or starting with the label.
    PrefixWildcard(String),
    /// `*` — matches any non-empty sub-domain.
    CatchAll,
}

impl Pattern {
    /// Classify a rule key by its shape.
    #[must_use]
    pub fn classify(key: &str) -> Self {
        if key == "*" {
            Self::CatchAll
        } else if let Some(suffix) = key.strip_prefix("*.") {
            Self::SuffixWildcard(suffix.to_string())
        } else if let Some(prefix) = key.strip_suffix(".*") {
            Self::PrefixWildcard(prefix.to_string())
        } else {
            Self::Literal
        }
    }

    /// Specificity score for ranking competing wildcard matches: length of
    /// the fixed part plus one, except the catch-all which scores zero.
    /// Literals never enter the wildcard scan.
    #[must_use]
    pub fn specificity(&self) -> usize {
        match self {
            Self::SuffixWildcard(fixed) | Self::PrefixWildcard(fixed) => fixed.len() + 1,
            Self::Literal | Self::CatchAll => 0,
        }
    }

    /// Whether this pattern participates in the wildcard phase.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        !matches!(self, Self::Literal)
    }

    /// Whether this wildcard pattern matches the given sub-domain.
    /// Literals always return `false` here; they match by table lookup.
    #[must_use]
    pub fn matches_sub(&self, sub: &str) -> bool {
        match self {
            Self::Literal => false,
            Self::CatchAll => true,
            Self::SuffixWildcard(suffix) => sub
                .strip_suffix(suffix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.ends_with('.')),
            Self::PrefixWildcard(prefix) => sub
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('.')),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RuleEntry {
    module: String,
    pattern: Pattern,
}

/// An ordered table of domain-binding rules.
///
/// Insertion order is significant: wildcard specificity ties are broken by
/// whichever rule was inserted first, so the table is backed by an
/// insertion-ordered map rather than a hash map.
///
/// # Example
///
/// ```
/// use ruta::{match_domain, DomainRules};
///
/// let rules = DomainRules::from_iter([("*.user", "user"), ("*", "www")]);
/// let m = match_domain("profile.user.example.com", &rules, None);
/// assert_eq!(m.module, "user");
/// assert_eq!(m.sub, "profile.user");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "IndexMap<String, String>", into = "IndexMap<String, String>")
)]
pub struct DomainRules {
    entries: IndexMap<String, RuleEntry>,
}

impl DomainRules {
    /// Create an empty rule table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a domain pattern to a module name. Re-binding an existing
    /// pattern replaces its module but keeps its original position.
    pub fn insert(&mut self, pattern: impl Into<String>, module: impl Into<String>) {
        let key = pattern.into();
        let entry = RuleEntry {
            module: module.into(),
            pattern: Pattern::classify(&key),
        };
        self.entries.insert(key, entry);
    }

    /// Look up the module bound to a literal key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.module.as_str())
    }

    /// Iterate over `(pattern, module)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, e)| (k.as_str(), e.module.as_str()))
    }

    /// Number of rules in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<IndexMap<String, String>> for DomainRules {
    fn from(map: IndexMap<String, String>) -> Self {
        let mut rules = Self::new();
        for (pattern, module) in map {
            rules.insert(pattern, module);
        }
        rules
    }
}

impl From<DomainRules> for IndexMap<String, String> {
    fn from(rules: DomainRules) -> Self {
        rules
            .entries
            .into_iter()
            .map(|(k, e)| (k, e.module))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DomainRules {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut rules = Self::new();
        for (pattern, module) in iter {
            rules.insert(pattern, module);
        }
        rules
    }
}

/// The single rule a domain resolved through.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchedRule {
    /// The rule key as it appears in the table (or the matched sub-domain
    /// suffix for the suffix phase).
    pub pattern: String,
    /// The module the rule binds.
    pub module: String,
}

/// The result of matching a domain against a rule table.
///
/// Invariant: `module` is non-empty exactly when `rule` is `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DomainMatch {
    /// The resolved module; empty when no rule matched.
    pub module: String,
    /// The input domain.
    pub domain: String,
    /// The computed root domain.
    pub root: String,
    /// The sub-domain remainder; empty when the domain equals its root.
    pub sub: String,
    /// The rule that produced the match, when one did.
    pub rule: Option<MatchedRule>,
}

/// Match a hostname (or full URL) against a domain-binding rule table.
///
/// `domain_root` overrides root-domain extraction; otherwise the root is
/// computed from the hostname, treating dotted-quad IP literals as their own
/// root and recognizing the compound suffixes in [`COMPOUND_SECOND_LEVEL`] ×
/// [`COMPOUND_TOP_LEVEL`].
///
/// Never fails: an empty domain yields the all-empty result.
///
/// # Example
///
/// ```
/// use ruta::{match_domain, DomainRules};
///
/// let rules = DomainRules::from_iter([
///     ("admin.example.com", "admin"),
///     ("api.*", "apihub"),
///     ("*", "www"),
/// ]);
///
/// assert_eq!(match_domain("admin.example.com", &rules, None).module, "admin");
/// assert_eq!(match_domain("api.v2.example.com", &rules, None).module, "apihub");
/// assert_eq!(match_domain("other.example.com", &rules, None).module, "www");
/// ```
#[must_use]
pub fn match_domain(input: &str, rules: &DomainRules, domain_root: Option<&str>) -> DomainMatch {
    let domain = extract_domain(input);
    if domain.is_empty() {
        return DomainMatch::default();
    }

    let root = root_domain(&domain, domain_root);
    let sub = sub_domain(&domain, &root);

    // exact full-domain match (hostnames and IP literals alike)
    if let Some(module) = rules.get(&domain) {
        let pattern = domain.clone();
        return matched(module, &pattern, domain, root, sub);
    }

    if !sub.is_empty() {
        // every suffix of the sub-domain label sequence, longest first
        let labels: Vec<&str> = sub.split('.').collect();
        for start in 0..labels.len() {
            let candidate = labels[start..].join(".");
            if let Some(module) = rules.get(&candidate) {
                return matched(module, &candidate, domain, root, sub);
            }
        }

        // wildcard phase: highest specificity wins, earlier entry wins ties
        let mut best: Option<(usize, &str, &str)> = None;
        for (key, entry) in &rules.entries {
            if !entry.pattern.is_wildcard() || !entry.pattern.matches_sub(&sub) {
                continue;
            }
            let score = entry.pattern.specificity();
            if best.map_or(true, |(top, _, _)| score > top) {
                best = Some((score, key.as_str(), entry.module.as_str()));
            }
        }
        if let Some((_, key, module)) = best {
            return matched(module, key, domain, root, sub);
        }
    }

    DomainMatch {
        module: String::new(),
        domain,
        root,
        sub,
        rule: None,
    }
}

fn matched(module: &str, pattern: &str, domain: String, root: String, sub: String) -> DomainMatch {
    DomainMatch {
        module: module.to_string(),
        domain,
        root,
        sub,
        rule: Some(MatchedRule {
            pattern: pattern.to_string(),
            module: module.to_string(),
        }),
    }
}

/// Pull the hostname out of a URL, or treat the input as a bare hostname
/// with an optional `:port` suffix.
fn extract_domain(input: &str) -> String {
    if has_http_scheme(input) {
        split_url(input).host.unwrap_or_default()
    } else {
        strip_port(input).to_string()
    }
}

fn strip_port(host: &str) -> &str {
    match host.rfind(':') {
        Some(colon)
            if colon + 1 < host.len()
                && host[colon + 1..].bytes().all(|b| b.is_ascii_digit()) =>
        {
            &host[..colon]
        }
        _ => host,
    }
}

/// Compute the registrable root domain.
fn root_domain(domain: &str, explicit: Option<&str>) -> String {
    if let Some(root) = explicit.filter(|r| !r.is_empty()) {
        return root.to_string();
    }
    if is_ipv4_literal(domain) {
        return domain.to_string();
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let count = labels.len();
    if count <= 2 {
        return domain.to_string();
    }

    let top = labels[count - 1];
    let second = labels[count - 2];
    if COMPOUND_TOP_LEVEL.contains(&top) && COMPOUND_SECOND_LEVEL.contains(&second) {
        if count > 3 {
            format!("{}.{second}.{top}", labels[count - 3])
        } else {
            domain.to_string()
        }
    } else {
        format!("{second}.{top}")
    }
}

/// The domain with its root suffix and the separating dot stripped.
fn sub_domain(domain: &str, root: &str) -> String {
    if root.is_empty() || root == domain {
        return String::new();
    }
    match domain.strip_suffix(root) {
        Some(rest) => rest.trim_end_matches('.').to_string(),
        // explicit root that is not a suffix of the domain: byte-truncate
        // like the length-based stripping this mirrors
        None => {
            let keep = domain.len().saturating_sub(root.len() + 1);
            domain
                .get(..keep)
                .unwrap_or("")
                .trim_end_matches('.')
                .to_string()
        }
    }
}

fn is_ipv4_literal(s: &str) -> bool {
    let mut count = 0;
    for part in s.split('.') {
        count += 1;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }
    count == 4
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DomainRules {
        DomainRules::from_iter([
            ("admin.example.com", "admin"),
            ("api.*", "api"),
            ("*.user", "user"),
            ("*", "www"),
        ])
    }

    #[test]
    fn classify_shapes() {
        assert_eq!(Pattern::classify("blog"), Pattern::Literal);
        assert_eq!(Pattern::classify("admin.example.com"), Pattern::Literal);
        assert_eq!(Pattern::classify("114.23.4.5"), Pattern::Literal);
        assert_eq!(
            Pattern::classify("*.user"),
            Pattern::SuffixWildcard("user".into())
        );
        assert_eq!(
            Pattern::classify("api.*"),
            Pattern::PrefixWildcard("api".into())
        );
        assert_eq!(Pattern::classify("*"), Pattern::CatchAll);
    }

    #[test]
    fn specificity_ranks_fixed_length() {
        assert_eq!(Pattern::classify("*").specificity(), 0);
        assert_eq!(Pattern::classify("*.user").specificity(), 5);
        assert_eq!(Pattern::classify("api.*").specificity(), 4);
        assert_eq!(Pattern::classify("api.v2.*").specificity(), 7);
    }

    #[test]
    fn exact_match_beats_everything() {
        let rules = DomainRules::from_iter([("a.b.com", "X"), ("*", "Y")]);
        let m = match_domain("a.b.com", &rules, None);
        assert_eq!(m.module, "X");
        assert_eq!(m.rule.unwrap().pattern, "a.b.com");
    }

    #[test]
    fn ip_literal_matches_exactly() {
        let rules = DomainRules::from_iter([("114.23.4.5", "admin")]);
        let m = match_domain("114.23.4.5", &rules, None);
        assert_eq!(m.module, "admin");
        assert_eq!(m.root, "114.23.4.5");
        assert_eq!(m.sub, "");
    }

    #[test]
    fn subdomain_label_binding() {
        let rules = DomainRules::from_iter([("blog", "blog")]);
        let m = match_domain("blog.example.com", &rules, None);
        assert_eq!(m.module, "blog");
        assert_eq!(m.sub, "blog");
    }

    #[test]
    fn longest_subdomain_suffix_wins() {
        let rules = DomainRules::from_iter([("admin", "P"), ("admin.user", "Q")]);
        // sub-domain is "admin.user"; its longest suffix present in the
        // table is "admin.user" itself
        let m = match_domain("admin.user.example.com", &rules, None);
        assert_eq!(m.module, "Q");
        assert_eq!(m.rule.unwrap().pattern, "admin.user");
    }

    #[test]
    fn suffix_generation_drops_leading_labels() {
        let rules = DomainRules::from_iter([("user", "U")]);
        let m = match_domain("a.b.user.example.com", &rules, None);
        assert_eq!(m.module, "U");
        assert_eq!(m.sub, "a.b.user");
    }

    #[test]
    fn wildcard_prefix_matches_nested_subs() {
        let m = match_domain("api.v2.example.com", &table(), None);
        assert_eq!(m.module, "api");
        assert_eq!(m.rule.unwrap().pattern, "api.*");
    }

    #[test]
    fn wildcard_prefix_matches_bare_prefix() {
        let m = match_domain("api.example.com", &table(), None);
        assert_eq!(m.module, "api");
    }

    #[test]
    fn wildcard_suffix_matches() {
        let m = match_domain("profile.user.example.com", &table(), None);
        assert_eq!(m.module, "user");
        assert_eq!(m.sub, "profile.user");
    }

    #[test]
    fn catch_all_is_last_resort() {
        let m = match_domain("other.example.com", &table(), None);
        assert_eq!(m.module, "www");
        assert_eq!(m.rule.unwrap().pattern, "*");
    }

    #[test]
    fn specificity_beats_catch_all() {
        let rules = DomainRules::from_iter([("api.*", "A"), ("*", "B")]);
        assert_eq!(match_domain("api.v2.x.com", &rules, None).module, "A");
        assert_eq!(match_domain("other.x.com", &rules, None).module, "B");
    }

    #[test]
    fn wildcard_tie_breaks_by_insertion_order() {
        // both have specificity 2; "a.*" was inserted first
        let rules = DomainRules::from_iter([("a.*", "first"), ("*.a", "second")]);
        let m = match_domain("a.example.com", &rules, None);
        assert_eq!(m.module, "first");

        let reversed = DomainRules::from_iter([("*.a", "second"), ("a.*", "first")]);
        let m = match_domain("a.example.com", &reversed, None);
        assert_eq!(m.module, "second");
    }

    #[test]
    fn no_wildcard_match_on_root_only_domain() {
        // sub-domain is empty, so even the catch-all does not fire
        let rules = DomainRules::from_iter([("*", "www")]);
        let m = match_domain("example.com", &rules, None);
        assert_eq!(m.module, "");
        assert!(m.rule.is_none());
    }

    #[test]
    fn empty_domain_gives_empty_result() {
        let m = match_domain("", &table(), None);
        assert_eq!(m, DomainMatch::default());
    }

    #[test]
    fn url_input_extracts_host() {
        let m = match_domain("http://api.example.com/path?query=value", &table(), None);
        assert_eq!(m.module, "api");
        assert_eq!(m.domain, "api.example.com");
    }

    #[test]
    fn bare_host_port_is_stripped() {
        let m = match_domain("admin.example.com:8080", &table(), None);
        assert_eq!(m.domain, "admin.example.com");
        assert_eq!(m.module, "admin");
    }

    #[test]
    fn non_numeric_port_suffix_is_kept() {
        assert_eq!(strip_port("host:abc"), "host:abc");
        assert_eq!(strip_port("host:"), "host:");
        assert_eq!(strip_port("host:80"), "host");
    }

    #[test]
    fn root_extraction_simple_tld() {
        assert_eq!(root_domain("a.b.example.com", None), "example.com");
        assert_eq!(root_domain("example.com", None), "example.com");
        assert_eq!(root_domain("localhost", None), "localhost");
    }

    #[test]
    fn root_extraction_compound_tld() {
        assert_eq!(root_domain("www.example.com.cn", None), "example.com.cn");
        assert_eq!(root_domain("a.b.example.org.uk", None), "example.org.uk");
        // three labels that themselves form the compound root
        assert_eq!(root_domain("example.com.cn", None), "example.com.cn");
    }

    #[test]
    fn explicit_root_overrides_extraction() {
        let m = match_domain(
            "api.myshop.com.cn",
            &DomainRules::from_iter([("api", "api")]),
            Some("myshop.com.cn"),
        );
        assert_eq!(m.root, "myshop.com.cn");
        assert_eq!(m.sub, "api");
        assert_eq!(m.module, "api");
    }

    #[test]
    fn empty_explicit_root_is_ignored() {
        assert_eq!(root_domain("a.example.com", Some("")), "example.com");
    }

    #[test]
    fn sub_is_empty_iff_domain_equals_root() {
        for domain in ["example.com", "a.example.com", "x.y.example.com.cn", "10.0.0.1"] {
            let m = match_domain(domain, &DomainRules::new(), None);
            assert_eq!(m.sub.is_empty(), m.domain == m.root, "domain {domain}");
        }
    }

    #[test]
    fn ipv4_literal_detection() {
        assert!(is_ipv4_literal("1.2.3.4"));
        assert!(is_ipv4_literal("255.255.255.255"));
        assert!(!is_ipv4_literal("1.2.3"));
        assert!(!is_ipv4_literal("1.2.3.4.5"));
        assert!(!is_ipv4_literal("a.b.c.d"));
        assert!(!is_ipv4_literal("1.2.3."));
    }

    #[test]
    fn rebinding_keeps_position() {
        let mut rules = DomainRules::new();
        rules.insert("*", "first");
        rules.insert("api.*", "api");
        rules.insert("*", "replaced");
        let pairs: Vec<_> = rules.iter().collect();
        assert_eq!(pairs, vec![("*", "replaced"), ("api.*", "api")]);
    }

    #[test]
    fn module_nonempty_iff_rule_present() {
        for host in ["admin.example.com", "api.v9.example.com", "example.com", ""] {
            let m = match_domain(host, &table(), None);
            assert_eq!(!m.module.is_empty(), m.rule.is_some(), "host {host}");
        }
    }
}

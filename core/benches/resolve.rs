//! Resolution benchmarks — the hot paths.
//!
//! Measures: full route resolution for plain and nested paths, domain
//! matching across the three rule phases, and rule-count scaling of the
//! wildcard scan.

use ruta::prelude::*;

fn main() {
    divan::main();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════════════════

fn domain_table() -> DomainRules {
    DomainRules::from_iter([
        ("admin.example.com", "admin"),
        ("api.*", "api"),
        ("*.user", "user"),
        ("*", "www"),
    ])
}

// ═══════════════════════════════════════════════════════════════════════════════
// Route resolution
// ═══════════════════════════════════════════════════════════════════════════════

#[divan::bench]
fn route_plain_path(bencher: divan::Bencher) {
    let opts = ResolveOptions::default();
    bencher.bench_local(|| resolve_route("index/blog/read", &opts));
}

#[divan::bench]
fn route_nested_controller(bencher: divan::Bencher) {
    let opts = ResolveOptions::default();
    bencher.bench_local(|| resolve_route("admin/one.two.three.controller/action", &opts));
}

#[divan::bench]
fn route_full_url_with_domain_rules(bencher: divan::Bencher) {
    let opts = ResolveOptions::new().bind_domains(domain_table());
    bencher.bench_local(|| resolve_route("http://api.v2.example.com/index/user/list", &opts));
}

#[divan::bench]
fn route_empty_input(bencher: divan::Bencher) {
    let opts = ResolveOptions::default();
    bencher.bench_local(|| resolve_route("", &opts));
}

// ═══════════════════════════════════════════════════════════════════════════════
// Domain matching phases
// ═══════════════════════════════════════════════════════════════════════════════

#[divan::bench]
fn domain_exact_hit(bencher: divan::Bencher) {
    let rules = domain_table();
    bencher.bench_local(|| match_domain("admin.example.com", &rules, None));
}

#[divan::bench]
fn domain_wildcard_hit(bencher: divan::Bencher) {
    let rules = domain_table();
    bencher.bench_local(|| match_domain("api.v2.example.com", &rules, None));
}

#[divan::bench]
fn domain_catch_all(bencher: divan::Bencher) {
    let rules = domain_table();
    bencher.bench_local(|| match_domain("other.example.com", &rules, None));
}

#[divan::bench]
fn domain_miss(bencher: divan::Bencher) {
    let rules = DomainRules::from_iter([("admin.example.com", "admin")]);
    bencher.bench_local(|| match_domain("other.example.com", &rules, None));
}

// ═══════════════════════════════════════════════════════════════════════════════
// Scaling: wildcard rule count (full-scan cost)
// ═══════════════════════════════════════════════════════════════════════════════

#[divan::bench(args = [1, 10, 50, 200])]
fn wildcard_rule_count(bencher: divan::Bencher, n: usize) {
    let mut rules = DomainRules::new();
    for i in 0..n {
        rules.insert(format!("prefix{i}.*"), format!("module{i}"));
    }
    rules.insert("*", "fallback");

    // nothing matches a prefix rule, so every entry is scanned
    bencher.bench_local(|| match_domain("unmatched.example.com", &rules, None));
}

#[divan::bench(args = [1, 4, 8])]
fn subdomain_suffix_depth(bencher: divan::Bencher, labels: usize) {
    let rules = DomainRules::from_iter([("leaf", "leaf")]);
    let host = format!(
        "{}leaf.example.com",
        "a.".repeat(labels.saturating_sub(1))
    );

    bencher.bench_local(|| match_domain(&host, &rules, None));
}

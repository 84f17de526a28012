//! ruta CLI — driving adapter for the route resolver.
//!
//! Subcommands:
//! - `route <url>` — resolve a URL or path into module/controller/action
//! - `domain <host>` — match a hostname against domain bindings
//! - `controller <path>` — resolve controller coordinates only

use std::process;

use ruta::{
    match_domain, resolve_controller, resolve_route, ControllerOptions, DomainRules,
    ResolveOptions,
};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "route" => cmd_route(&args[2..]),
        "domain" => cmd_domain(&args[2..]),
        "controller" => cmd_controller(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_route(args: &[String]) -> Result<(), String> {
    let (input, flags) = split_input(args, "route requires a URL or path")?;
    let (opts, json) = parse_route_flags(flags)?;

    let res = resolve_route(input, &opts);
    if json {
        println!("{}", to_json(&res)?);
    } else {
        println!("module      {}", res.module);
        println!("controller  {}", res.ctrl);
        println!("action      {}", res.action);
        println!("class       {}", res.class);
        println!("method      {}", res.method);
        if !res.dir.is_empty() {
            println!("dir         {}", res.dir);
        }
        println!("path        {}", res.path);
        println!("fullpath    {}", res.fullpath);
        println!("url         {}", res.url);
        println!("nested      {} (depth {})", res.nested, res.depth);
    }
    Ok(())
}

fn cmd_domain(args: &[String]) -> Result<(), String> {
    let (host, flags) = split_input(args, "domain requires a hostname or URL")?;
    let (rules, root, json) = parse_domain_flags(flags)?;

    let m = match_domain(host, &rules, root.as_deref());
    if json {
        println!("{}", to_json(&m)?);
    } else {
        println!("domain  {}", m.domain);
        println!("root    {}", m.root);
        println!("sub     {}", m.sub);
        match &m.rule {
            Some(rule) => {
                println!("module  {}", m.module);
                println!("rule    {} -> {}", rule.pattern, rule.module);
            }
            None => println!("module  (no match)"),
        }
    }
    Ok(())
}

fn cmd_controller(args: &[String]) -> Result<(), String> {
    let (path, flags) = split_input(args, "controller requires a path")?;
    let (opts, json) = parse_controller_flags(flags)?;

    let res = resolve_controller(path, &opts);
    if json {
        println!("{}", to_json(&res)?);
    } else {
        println!("controller  {}", res.ctrl);
        println!("action      {}", res.action);
        println!("class       {}", res.class);
        println!("method      {}", res.method);
        if !res.dir.is_empty() {
            println!("dir         {}", res.dir);
        }
        println!("path        {}", res.path);
        println!("nested      {} (depth {})", res.nested, res.depth);
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Flag parsing
// ═══════════════════════════════════════════════════════════════════════════════

fn split_input<'a>(args: &'a [String], missing: &str) -> Result<(&'a str, &'a [String]), String> {
    match args.split_first() {
        Some((input, rest)) => Ok((input.as_str(), rest)),
        None => Err(missing.to_string()),
    }
}

fn parse_route_flags(args: &[String]) -> Result<(ResolveOptions, bool), String> {
    let mut opts = ResolveOptions::default();
    let mut json = false;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => opts = load_options(&flag_value(args, &mut i, "--config")?)?,
            "--module" => opts.bind_module = Some(flag_value(args, &mut i, "--module")?),
            "--bind-domain" => {
                let (pattern, module) = binding(&flag_value(args, &mut i, "--bind-domain")?)?;
                opts.bind_domains.insert(pattern, module);
            }
            "--bind-file" => {
                let (name, module) = binding(&flag_value(args, &mut i, "--bind-file")?)?;
                opts.bind_files.insert(name, module);
            }
            "--domain-root" => opts.domain_root = Some(flag_value(args, &mut i, "--domain-root")?),
            "--default-module" => {
                opts.default_module = flag_value(args, &mut i, "--default-module")?;
            }
            "--default-controller" => {
                opts.default_controller = flag_value(args, &mut i, "--default-controller")?;
            }
            "--default-action" => {
                opts.default_action = flag_value(args, &mut i, "--default-action")?;
            }
            "--no-convert" => opts.convert = false,
            "--json" => json = true,
            other => return Err(format!("unknown flag \"{other}\"")),
        }
        i += 1;
    }

    Ok((opts, json))
}

fn parse_domain_flags(
    args: &[String],
) -> Result<(DomainRules, Option<String>, bool), String> {
    let mut rules = DomainRules::new();
    let mut root = None;
    let mut json = false;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                let opts = load_options(&flag_value(args, &mut i, "--config")?)?;
                rules = opts.bind_domains;
                root = opts.domain_root;
            }
            "--bind-domain" => {
                let (pattern, module) = binding(&flag_value(args, &mut i, "--bind-domain")?)?;
                rules.insert(pattern, module);
            }
            "--domain-root" => root = Some(flag_value(args, &mut i, "--domain-root")?),
            "--json" => json = true,
            other => return Err(format!("unknown flag \"{other}\"")),
        }
        i += 1;
    }

    Ok((rules, root, json))
}

fn parse_controller_flags(args: &[String]) -> Result<(ControllerOptions, bool), String> {
    let mut opts = ControllerOptions::default();
    let mut json = false;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--default-controller" => {
                opts.default_controller = flag_value(args, &mut i, "--default-controller")?;
            }
            "--default-action" => {
                opts.default_action = flag_value(args, &mut i, "--default-action")?;
            }
            "--no-convert" => opts.convert = false,
            "--json" => json = true,
            other => return Err(format!("unknown flag \"{other}\"")),
        }
        i += 1;
    }

    Ok((opts, json))
}

fn flag_value(args: &[String], i: &mut usize, flag: &str) -> Result<String, String> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn binding(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((pattern, module)) if !pattern.is_empty() && !module.is_empty() => {
            Ok((pattern.to_string(), module.to_string()))
        }
        _ => Err(format!("expected pattern=module, got \"{raw}\"")),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Options loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_options(path: &str) -> Result<ResolveOptions, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;

    let is_json = std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).map_err(|e| format!("JSON parse error: {e}"))
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(&content).map_err(|e| format!("YAML parse error: {e}"))
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| e.to_string())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Usage
// ═══════════════════════════════════════════════════════════════════════════════

fn print_usage() {
    eprintln!(
        "ruta — URL to module/controller/action resolver

USAGE:
    ruta route <url> [flags]          resolve routing coordinates
    ruta domain <host> [flags]        match a hostname against bindings
    ruta controller <path> [flags]    resolve controller coordinates only

FLAGS (route):
    --config <file>             load options from a YAML or JSON file
    --module <name>             force the module (skips other resolution)
    --bind-domain <pat>=<mod>   add a domain binding (repeatable)
    --bind-file <name>=<mod>    add a file binding (repeatable)
    --domain-root <root>        explicit root domain
    --default-module <name>     fallback module (default: index)
    --default-controller <name> fallback controller (default: index)
    --default-action <name>     fallback action (default: index)
    --no-convert                disable name-case conversion
    --json                      print the result as JSON

FLAGS (domain):
    --config, --bind-domain, --domain-root, --json as above

FLAGS (controller):
    --default-controller, --default-action, --no-convert, --json as above"
    );
}

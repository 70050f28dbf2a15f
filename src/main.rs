//! glyphmap - build a substitution table from a private-use font
//!
//! Compares unhinted glyph outlines of a special font against a standard
//! CJK font and prints `special => standard` codepoint pairs.

use anyhow::{anyhow, bail, Context, Result};
use glyphmap::config::{expand_path, Config};
use glyphmap::{Codepoint, GlyphOutlineMapper, MappingTable};
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Output format for the mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// `U+E000<TAB>U+4E2D<TAB>中` per line
    Lines,
    /// `[mapping]` table with hex string keys and values
    Toml,
}

impl OutputFormat {
    fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "lines" | "text" => Ok(Self::Lines),
            "toml" => Ok(Self::Toml),
            other => bail!("Unknown output format: {}", other),
        }
    }
}

#[derive(Serialize)]
struct TomlMapping {
    mapping: BTreeMap<String, String>,
}

fn print_help() {
    println!("glyphmap {}", env!("CARGO_PKG_VERSION"));
    println!("Map private-use font glyphs to standard CJK codepoints by outline");
    println!();
    println!("USAGE:");
    println!("  glyphmap --special FONT --standard FONT [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  --special PATH        Font with nonstandard glyphs");
    println!("  --standard PATH       Font with standard CJK glyphs");
    println!("  --start CP            First codepoint (default E000)");
    println!("  --end CP              Last codepoint (default F8FF)");
    println!("  --rune CP             Resolve a single codepoint");
    println!("  --compare CP          With --rune, compare against this codepoint only");
    println!("  -j, --jobs N          Simultaneous resolutions (default 10)");
    println!("  --format lines|toml   Output format (default lines)");
    println!("  -o, --output PATH     Write to file instead of stdout");
    println!("  --config PATH         Use this config file");
    println!("  --init-config[=force] Write ~/.config/glyphmap/config.toml");
    println!("  -h, --help            Show this help");
    println!("  -V, --version         Show version");
    println!();
    println!("Codepoints accept E000, 0xE000 or U+E000.");
    println!("Set RUST_LOG=info (or debug) for progress output.");
}

/// Value of `--name VALUE` or `--name=VALUE`
fn arg_value(args: &[String], names: &[&str]) -> Option<String> {
    for (i, arg) in args.iter().enumerate() {
        for name in names {
            if arg == name {
                return args.get(i + 1).cloned();
            }
            if let Some(value) = arg.strip_prefix(name).and_then(|v| v.strip_prefix('=')) {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Parse `E000`, `0xE000` or `U+E000`
fn parse_codepoint(s: &str) -> Result<Codepoint> {
    let s = s.trim();
    let hex = s
        .strip_prefix("U+")
        .or_else(|| s.strip_prefix("u+"))
        .or_else(|| s.strip_prefix("0x"))
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u32::from_str_radix(hex, 16).map_err(|e| anyhow!("Invalid codepoint {:?}: {}", s, e))
}

/// Printable form of a codepoint, empty for controls and non-scalars
fn display_char(cp: Codepoint) -> String {
    char::from_u32(cp)
        .filter(|c| !c.is_control())
        .map(String::from)
        .unwrap_or_default()
}

fn format_lines(table: &MappingTable) -> String {
    let sorted: BTreeMap<_, _> = table.iter().collect();
    let mut out = String::new();
    for (special, standard) in sorted {
        out.push_str(&format!(
            "U+{:04X}\tU+{:04X}\t{}\n",
            special,
            standard,
            display_char(*standard)
        ));
    }
    out
}

fn format_toml(table: &MappingTable) -> Result<String> {
    let doc = TomlMapping {
        mapping: table
            .iter()
            .map(|(special, standard)| (format!("{:04X}", special), format!("{:04X}", standard)))
            .collect(),
    };
    toml::to_string(&doc).context("Failed to serialize mapping")
}

fn read_font(path: &str, role: &str) -> Result<Vec<u8>> {
    if path.is_empty() {
        bail!("No {} font given (use --{} or [fonts] {} in config)", role, role, role);
    }
    let path = expand_path(path);
    std::fs::read(&path).with_context(|| format!("Failed to read {} font: {}", role, path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    // --help
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    // --version
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("glyphmap {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // --init-config or --init-config=force
    if let Some(arg) = args.iter().find(|a| a.starts_with("--init-config")) {
        let force = arg.ends_with("=force");
        let path = Config::write_default_config(force)?;
        println!("Config file generated: {}", path.display());
        return Ok(());
    }

    let mut cfg = match arg_value(&args, &["--config"]) {
        Some(path) => Config::load_from_file(&expand_path(&path))?,
        None => Config::load(),
    };

    // Command line overrides config
    if let Some(path) = arg_value(&args, &["--special"]) {
        cfg.fonts.special = path;
    }
    if let Some(path) = arg_value(&args, &["--standard"]) {
        cfg.fonts.standard = path;
    }
    if let Some(cp) = arg_value(&args, &["--start"]) {
        cfg.batch.start = parse_codepoint(&cp)?;
    }
    if let Some(cp) = arg_value(&args, &["--end"]) {
        cfg.batch.end = parse_codepoint(&cp)?;
    }
    if let Some(jobs) = arg_value(&args, &["--jobs", "-j"]) {
        cfg.batch.concurrency = jobs
            .parse()
            .with_context(|| format!("Invalid job count: {}", jobs))?;
    }
    let format = match arg_value(&args, &["--format"]) {
        Some(f) => OutputFormat::parse(&f)?,
        None => OutputFormat::Lines,
    };

    let special = read_font(&cfg.fonts.special, "special")?;
    let standard = read_font(&cfg.fonts.standard, "standard")?;

    let mut mapper = GlyphOutlineMapper::new(&special, &standard)?
        .with_settings(cfg.matching.to_settings());
    mapper.set_concurrency(cfg.batch.concurrency);

    let settings = mapper.settings();
    info!(
        "Matching at {}px, tolerance {}, probe {}px",
        settings.render_size, settings.tolerance, settings.probe_size
    );

    // Single codepoint mode
    if let Some(cp) = arg_value(&args, &["--rune"]) {
        let cp = parse_codepoint(&cp)?;

        if let Some(other) = arg_value(&args, &["--compare"]) {
            let other = parse_codepoint(&other)?;
            let equal = mapper
                .outlines_match(cp, other)
                .with_context(|| format!("Failed to compare U+{:04X} with U+{:04X}", cp, other))?;
            println!(
                "U+{:04X}\tU+{:04X}\t{}",
                cp,
                other,
                if equal { "match" } else { "differ" }
            );
            return Ok(());
        }

        match mapper.resolve_rune(cp) {
            Some(hit) => println!(
                "U+{:04X}\tU+{:04X}\t{}",
                hit.special,
                hit.standard,
                display_char(hit.standard)
            ),
            None => eprintln!("U+{:04X}: no matching outline", cp),
        }
        return Ok(());
    }

    let table = mapper.map_range(cfg.batch.start, cfg.batch.end);
    info!("{} mappings found", table.len());

    let rendered = match format {
        OutputFormat::Lines => format_lines(&table),
        OutputFormat::Toml => format_toml(&table)?,
    };

    match arg_value(&args, &["--output", "-o"]) {
        Some(path) => {
            let path = expand_path(&path);
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Mapping written: {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

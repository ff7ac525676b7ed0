use anyhow::{Context, bail};
use clap::ArgMatches;
use colored::Colorize;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Value, json};
use skimmer_core::{Browser, BrowserConfig, BrowserError, ContentKind, Extraction, classify};
use skimmer_fetch::{format_links_markdown, parse_links, screenshot_dir};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};
use tracing_subscriber::filter::LevelFilter;
use url::Url;

/// How an extraction report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_arg(value: Option<&String>) -> Self {
        match value.map(String::as_str) {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

/// Install the stderr log subscriber. Warnings are always shown; each `-v`
/// raises the level by one step.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn expand_data_dir(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Layer command line flags over a base configuration (usually the
/// environment). Flags that were not given leave the base untouched.
pub fn apply_overrides(mut config: BrowserConfig, args: &ArgMatches) -> BrowserConfig {
    if let Some(private) = args.get_one::<String>("private-url") {
        config.scraper_private_url = private.clone();
    }
    if let Some(public) = args.get_one::<String>("public-url") {
        config.scraper_public_url = public.clone();
    }
    if let Some(data_dir) = args.get_one::<String>("data-dir") {
        config.data_dir = expand_data_dir(data_dir);
    }
    if let Some(flow_id) = args.get_one::<i64>("flow-id") {
        config.flow_id = *flow_id;
    }
    if let Some(proxy) = args.get_one::<String>("proxy") {
        config.proxy_url = Some(proxy.clone()).filter(|p| !p.trim().is_empty());
    }
    if let Some(timeout) = args.get_one::<u64>("timeout") {
        config.timeout_secs = *timeout;
    }
    config
}

/// Environment configuration with the flags of `args` on top, validated.
pub fn load_config(args: &ArgMatches) -> anyhow::Result<BrowserConfig> {
    let config = apply_overrides(BrowserConfig::from_env(), args);
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Collect targets from positional arguments and an optional URL file.
/// Positional targets are passed through untouched so malformed ones are
/// reported per target instead of silently dropped.
pub fn load_urls_from_source(
    urls: &[String],
    urls_file: Option<&PathBuf>,
) -> Result<Vec<String>, String> {
    let mut targets: Vec<String> = urls.to_vec();
    if let Some(path) = urls_file {
        targets.extend(load_urls_from_file(path)?);
    }
    if targets.is_empty() {
        return Err("Either a URL or --urls-file must be provided".to_string());
    }
    Ok(targets)
}

/// Load and parse URLs from a file. Blank lines and `#` comments are skipped.
pub fn load_urls_from_file(path: &Path) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read URL file {}: {}", path.display(), e))?;

    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(parse_url_line)
        .collect();

    if urls.is_empty() {
        return Err(format!("No valid URLs found in {}", path.display()));
    }

    Ok(urls)
}

/// Parse a single line as a URL, trying to add http:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    if Url::parse(line).is_ok_and(|u| u.has_host()) {
        return Some(line.to_string());
    }

    let with_scheme = format!("http://{}", line);
    if Url::parse(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    warn!("Skipping invalid URL '{}'", line);
    None
}

fn targets(args: &ArgMatches) -> anyhow::Result<Vec<String>> {
    let urls: Vec<String> = args
        .get_many::<String>("URL")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    load_urls_from_source(&urls, args.get_one::<PathBuf>("urls-file")).map_err(anyhow::Error::msg)
}

/// Markdown list for a links body; the body itself when it is not a JSON
/// link list.
pub fn render_links(content: &str) -> String {
    match parse_links(content) {
        Ok(links) => format_links_markdown(&links),
        Err(e) => {
            debug!("Links body is not a link list ({}), printing as-is", e);
            content.to_string()
        }
    }
}

/// One target's outcome as a JSON object
pub fn extraction_json(
    browser: &Browser,
    target: &str,
    kind: ContentKind,
    outcome: &Result<Extraction, BrowserError>,
) -> Value {
    match outcome {
        Ok(extraction) => json!({
            "url": target,
            "kind": kind,
            "content": extraction.content,
            "screenshot": extraction.screenshot,
            "screenshot_path": extraction
                .screenshot
                .as_deref()
                .map(|name| browser.screenshot_path(name).display().to_string()),
        }),
        Err(e) => json!({
            "url": target,
            "kind": kind,
            "error": e.to_string(),
        }),
    }
}

/// Human-readable report for one target
pub fn extraction_text(
    browser: &Browser,
    target: &str,
    kind: ContentKind,
    outcome: &Result<Extraction, BrowserError>,
    raw_links: bool,
) -> String {
    let mut report = String::new();
    match outcome {
        Ok(extraction) => {
            report.push_str(&format!(
                "{} {} {}\n",
                "✓".green().bold(),
                kind.as_str().bright_blue().bold(),
                target.bright_white()
            ));
            report.push_str(&format!("{}\n", "─".repeat(60).bright_blue()));
            let body = if kind == ContentKind::Links && !raw_links {
                render_links(&extraction.content)
            } else {
                extraction.content.clone()
            };
            report.push_str(body.trim_end());
            report.push('\n');
            report.push_str(&format!("{}\n", "─".repeat(60).bright_blue()));
            match extraction.screenshot.as_deref() {
                Some(name) => report.push_str(&format!(
                    "{} Screenshot: {}\n",
                    "→".blue(),
                    browser.screenshot_path(name).display().to_string().bright_white()
                )),
                None => report.push_str(&format!("{} No screenshot\n", "ℹ".yellow())),
            }
        }
        Err(e) => {
            report.push_str(&format!(
                "{} {} {}: {}\n",
                "✗".red().bold(),
                kind.as_str().bright_blue().bold(),
                target.bright_white(),
                e.to_string().red()
            ));
        }
    }
    report
}

fn spinner(quiet: bool, message: String) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(message);
    spinner
}

/// Extract every target concurrently through one browser. Returns whether
/// all targets succeeded.
pub async fn handle_extract(
    kind: ContentKind,
    args: &ArgMatches,
    quiet: bool,
) -> anyhow::Result<bool> {
    let config = load_config(args)?;
    let browser = Browser::from_config(&config);
    if !browser.is_available() {
        bail!(BrowserError::NotConfigured);
    }

    let targets = targets(args)?;
    let format = OutputFormat::from_arg(args.get_one::<String>("format"));
    let raw_links = args.try_get_one::<bool>("raw").ok().flatten().copied().unwrap_or(false);

    let progress = spinner(
        quiet,
        format!("Extracting {} from {} page(s)...", kind, targets.len()),
    );
    let outcomes = join_all(targets.iter().map(|target| browser.extract(target, kind))).await;
    progress.finish_and_clear();

    let mut all_ok = true;
    let mut json_reports = Vec::with_capacity(targets.len());
    for (target, outcome) in targets.iter().zip(outcomes.iter()) {
        all_ok &= outcome.is_ok();
        match format {
            OutputFormat::Json => {
                json_reports.push(extraction_json(&browser, target, kind, outcome))
            }
            OutputFormat::Text => {
                let report = extraction_text(&browser, target, kind, outcome, raw_links);
                if outcome.is_ok() {
                    print!("{}", report);
                } else {
                    eprint!("{}", report);
                }
            }
        }
    }

    if format == OutputFormat::Json {
        let document = if json_reports.len() == 1 {
            json_reports.remove(0)
        } else {
            Value::Array(json_reports)
        };
        println!("{}", serde_json::to_string_pretty(&document)?);
    }

    Ok(all_ok)
}

/// Print the host class of each target and the backend that would serve it.
pub fn handle_classify(args: &ArgMatches) -> anyhow::Result<bool> {
    let config = apply_overrides(BrowserConfig::from_env(), args);
    let browser = Browser::from_config(&config);
    let mut all_ok = true;

    for target in targets(args)? {
        let Some(class) = classify(&target) else {
            all_ok = false;
            eprintln!("{} {}: not a URL with a host", "✗".red().bold(), target.bright_white());
            continue;
        };

        let route = if browser.is_available() {
            match browser.resolve(&target) {
                Ok(base) => base.to_string(),
                Err(e) => format!("{}", e.to_string().red()),
            }
        } else {
            "no backend configured".dimmed().to_string()
        };
        println!(
            "{} {:<8} {} {}",
            "→".blue(),
            class.as_str().bright_cyan().bold(),
            target.bright_white(),
            route
        );
    }

    Ok(all_ok)
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn setting(name: &str, value: &str) {
    println!("  {:<18} {}", format!("{}:", name).blue(), value.bright_white());
}

/// Validate the effective configuration and print it
pub fn handle_check(args: &ArgMatches) -> anyhow::Result<bool> {
    let config = apply_overrides(BrowserConfig::from_env(), args);

    print_divider();
    println!("{}", "  SKIMMER CONFIGURATION".bright_white().bold());
    print_divider();
    let unset = "(unset)".to_string();
    let or_unset = |value: &str| {
        if value.trim().is_empty() {
            unset.clone()
        } else {
            value.to_string()
        }
    };
    setting("Private scraper", &or_unset(&config.scraper_private_url));
    setting("Public scraper", &or_unset(&config.scraper_public_url));
    setting("Data directory", &config.data_dir.display().to_string());
    setting(
        "Screenshots",
        &screenshot_dir(&config.data_dir, config.flow_id).display().to_string(),
    );
    setting("Proxy", config.proxy_url.as_deref().unwrap_or("(none)"));
    setting("Timeout", &format!("{}s", config.timeout_secs));
    setting(
        "Min sizes",
        &format!(
            "markdown {} / html {} / links {} / image {} bytes",
            config.thresholds.markdown,
            config.thresholds.html,
            config.thresholds.links,
            config.thresholds.image
        ),
    );
    println!();

    if let Err(e) = config.validate() {
        println!("{} {}", "✗".red().bold(), e.to_string().red());
        return Ok(false);
    }
    if !config.endpoints().is_configured() {
        println!(
            "{} {}",
            "⚠".yellow().bold(),
            "No scraper endpoint configured; the browser is unavailable".yellow()
        );
        return Ok(false);
    }
    println!("{} Configuration is valid", "✓".green().bold());
    Ok(true)
}

use clap::{Arg, ArgAction, arg, command};
use std::path::PathBuf;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("skimmer")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("skimmer")
        .about("Extract markdown, HTML or links from web pages through a scraper backend")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress progress and non-essential output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" ... "Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .required(false)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            extraction_command("markdown")
                .about("Extract a page as markdown, capturing a screenshot alongside it"),
        )
        .subcommand(
            extraction_command("html")
                .about("Extract the rendered HTML of a page, capturing a screenshot alongside it"),
        )
        .subcommand(
            extraction_command("links")
                .about("List the links on a page, capturing a screenshot alongside it")
                .arg(
                    arg!(--"raw")
                        .required(false)
                        .help("Print the backend's JSON link list instead of a markdown list")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("classify")
                .about("Show whether each target is private or public and which backend serves it")
                .arg(target_arg())
                .arg(urls_file_arg())
                .args(config_args()),
        )
        .subcommand(
            command!("check")
                .about("Validate the scraper configuration and print the effective settings")
                .args(config_args()),
        )
}

fn extraction_command(name: &'static str) -> clap::Command {
    clap::Command::new(name)
        .arg(target_arg())
        .arg(urls_file_arg())
        .args(config_args())
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Output format")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
}

fn target_arg() -> Arg {
    Arg::new("URL")
        .value_name("URL")
        .help("Target page URLs")
        .num_args(1..)
        .required_unless_present("urls-file")
}

fn urls_file_arg() -> Arg {
    arg!(-U --"urls-file" <PATH>)
        .required(false)
        .help("Path to a newline-delimited file of target URLs")
        .value_parser(clap::value_parser!(PathBuf))
}

// Every subcommand carries the same overrides so handlers can layer them
// onto the environment configuration uniformly.
fn config_args() -> Vec<Arg> {
    vec![
        arg!(--"private-url" <URL>)
            .required(false)
            .help("Scraper base URL for private hosts (overrides SCRAPER_PRIVATE_URL)"),
        arg!(--"public-url" <URL>)
            .required(false)
            .help("Scraper base URL for public hosts (overrides SCRAPER_PUBLIC_URL)"),
        arg!(-d --"data-dir" <PATH>)
            .required(false)
            .help("Root directory for screenshots (overrides SKIMMER_DATA_DIR)"),
        arg!(--"flow-id" <ID>)
            .required(false)
            .help("Flow identifier used to group screenshots (overrides SKIMMER_FLOW_ID)")
            .value_parser(clap::value_parser!(i64)),
        arg!(--"proxy" <URL>)
            .required(false)
            .help("Outbound proxy for scraper requests (overrides PROXY_URL)"),
        arg!(-t --"timeout" <SECONDS>)
            .required(false)
            .help("Request timeout in seconds (overrides SKIMMER_TIMEOUT_SECS)")
            .value_parser(clap::value_parser!(u64)),
    ]
}

use colored::Colorize;
use skimmer::command_argument_builder;
use skimmer::handlers::{handle_check, handle_classify, handle_extract, init_tracing};
use skimmer_core::ContentKind;

#[tokio::main]
async fn main() {
    let chosen_command = command_argument_builder().get_matches();
    let quiet = chosen_command.get_flag("quiet");
    init_tracing(chosen_command.get_count("verbose"));

    let outcome = match chosen_command.subcommand() {
        Some(("markdown", sub_matches)) => {
            handle_extract(ContentKind::Markdown, sub_matches, quiet).await
        }
        Some(("html", sub_matches)) => handle_extract(ContentKind::Html, sub_matches, quiet).await,
        Some(("links", sub_matches)) => {
            handle_extract(ContentKind::Links, sub_matches, quiet).await
        }
        Some(("classify", sub_matches)) => handle_classify(sub_matches),
        Some(("check", sub_matches)) => handle_check(sub_matches),
        _ => unreachable!("clap should ensure we don't get here"),
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}

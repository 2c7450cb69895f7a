//! Command-line interface for critic
//! This binary renders CriticMarkup annotated files into the markup, original or edited view.
//!
//! Usage:
//!   critic [INPUT] [-o OUTPUT] [--before | --after] [--raw]   - Render a view (stdin/stdout by default)
//!   critic [INPUT] --md [--template]                          - Also convert markdown and wrap in a page
//!   critic [INPUT] --segments                                 - Dump the scanned segments as JSON
//!
//! Settings come from the built-in defaults, then `--config <file>`, then `CRITIC_<TABLE>__<KEY>`
//! environment variables, then the flags above.

mod segments;

use clap::{Arg, ArgAction, ArgMatches, Command};
use critic_babel::{publish, HtmlSyntax, PageTemplate, PublishOptions};
use critic_config::{CriticConfig, Loader, MarkerStyle, ValueKind};
use critic_parser::{process_with, BracketSyntax, MarkerSyntax, View};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("critic")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render CriticMarkup annotated documents")
        .arg(
            Arg::new("input")
                .help("Input file ('-' for stdin)")
                .default_value("-")
                .index(1),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output file ('-' for stdout)")
                .default_value("-"),
        )
        .arg(
            Arg::new("before")
                .long("before")
                .help("Render the document as it was before the edits")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("after")
                .long("after")
                .help("Render the document as it is after the edits")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("raw")
                .long("raw")
                .help("Emit plain text without markers")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("markers")
                .long("markers")
                .help("Marker syntax for tagged output")
                .value_parser(["html", "brackets"]),
        )
        .arg(
            Arg::new("md")
                .long("md")
                .help("Convert the rendered markdown to HTML")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("template")
                .long("template")
                .help("Wrap the output in a standalone HTML page with a view switcher")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("template-file")
                .long("template-file")
                .help("Custom page template with {{title}} and {{body}} placeholders"),
        )
        .arg(
            Arg::new("title")
                .long("title")
                .help("Page title used by --template"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("segments")
                .long("segments")
                .help("Dump the scanned segments as JSON instead of rendering")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug information to stderr")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    if let Err(message) = run(&matches) {
        eprintln!("critic: {}", message);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(matches: &ArgMatches) -> Result<(), String> {
    let config = load_config(matches)?;
    let input_path = matches.get_one::<String>("input").map(String::as_str).unwrap_or("-");
    let output_path = matches.get_one::<String>("output").map(String::as_str).unwrap_or("-");

    let input = open_input(input_path)?;
    let mut output = open_output(output_path)?;

    if matches.get_flag("segments") {
        let count = segments::write_segments(input, &mut output)?;
        tracing::debug!(count, "dumped segments");
    } else {
        handle_render_command(&config, input, &mut output)?;
    }

    output
        .flush()
        .map_err(|e| format!("failed to write output: {}", e))
}

/// Layer the config file, the environment and the command-line flags over the defaults.
fn load_config(matches: &ArgMatches) -> Result<CriticConfig, String> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader = loader.with_env();

    let before = matches.get_flag("before");
    let after = matches.get_flag("after");
    if before || after {
        // Asking for both readings is the same as asking for neither.
        let view = match (before, after) {
            (true, false) => "original",
            (false, true) => "edited",
            _ => "all",
        };
        loader = set(loader, "render.view", view)?;
    }
    if matches.get_flag("raw") {
        loader = set(loader, "render.mode", "raw")?;
    }
    if let Some(markers) = matches.get_one::<String>("markers") {
        loader = set(loader, "render.markers", markers.as_str())?;
    }
    if matches.get_flag("md") {
        loader = set(loader, "convert.markdown", true)?;
    }
    if matches.get_flag("template") {
        loader = set(loader, "convert.template", true)?;
    }
    if let Some(path) = matches.get_one::<String>("template-file") {
        loader = set(loader, "template.path", path.as_str())?;
    }
    if let Some(title) = matches.get_one::<String>("title") {
        loader = set(loader, "template.title", title.as_str())?;
    }

    loader
        .build()
        .map_err(|e| format!("invalid configuration: {}", e))
}

fn set<V>(loader: Loader, key: &str, value: V) -> Result<Loader, String>
where
    V: Into<ValueKind>,
{
    loader
        .set_override(key, value)
        .map_err(|e| format!("invalid setting {}: {}", key, e))
}

/// Render the input, streaming unless a post-processing pass needs the whole document.
fn handle_render_command(
    config: &CriticConfig,
    input: Box<dyn BufRead>,
    output: &mut dyn Write,
) -> Result<(), String> {
    let policy = config.render.policy();
    let syntax: &dyn MarkerSyntax = match config.render.markers {
        MarkerStyle::Html => &HtmlSyntax,
        MarkerStyle::Brackets => &BracketSyntax,
    };
    let options = publish_options(config)?;

    if options.is_passthrough() {
        process_with(output, input, &policy, syntax).map_err(|e| e.to_string())?;
        return Ok(());
    }

    if options.template.is_some() && policy.view != View::ShowAll {
        tracing::warn!("the page view switcher only has an effect on the show-all view");
    }

    let mut rendered = Vec::new();
    process_with(&mut rendered, input, &policy, syntax).map_err(|e| e.to_string())?;
    let rendered = match String::from_utf8(rendered) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("input is not UTF-8, invalid bytes are replaced before publishing");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    output
        .write_all(publish(&rendered, &options).as_bytes())
        .map_err(|e| format!("failed to write output: {}", e))
}

fn publish_options(config: &CriticConfig) -> Result<PublishOptions, String> {
    let mut options = PublishOptions::default();
    if config.convert.markdown {
        options = options.with_markdown(config.markdown.into());
    }
    if config.convert.template {
        let title = config.template.title.clone();
        let template = match &config.template.path {
            Some(path) => PageTemplate::from_file(path, title).map_err(|e| e.to_string())?,
            None => PageTemplate::new(title),
        };
        options = options.with_template(template);
    }
    Ok(options)
}

fn is_stdio(path: &str) -> bool {
    path.is_empty() || path == "-"
}

fn open_input(path: &str) -> Result<Box<dyn BufRead>, String> {
    if is_stdio(path) {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).map_err(|e| format!("cannot open {}: {}", path, e))?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_output(path: &str) -> Result<Box<dyn Write>, String> {
    if is_stdio(path) {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    }
    let file = File::create(path).map_err(|e| format!("cannot create {}: {}", path, e))?;
    Ok(Box::new(BufWriter::new(file)))
}

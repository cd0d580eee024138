use clap::Parser;
use colored::Colorize;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use transfind::{
    ExtractConfig, ExtractionReport, ExtractionSession, FormatKind, Result, TagPattern,
};

const LONG_HELP: &str = r#"
Tags:
  {% trans %}Hello{% endtrans %}            - msgid "Hello"
  {% trans %}Hi {{ name }}{% endtrans %}    - msgid "Hi %name%"
  {% trans %}One{% plural n %}Many{% endtrans %}
                                            - msgid "One" (plural forms are ignored)

Examples:
  # Append new tags to a catalog (created if missing)
  transfind templates/ locale/es/LC_MESSAGES/messages.po Po
  # Show what would be appended without touching the catalog
  transfind templates/ messages.po --dry-run
  # Append and also print the new entries
  transfind templates/ messages.po -o
  # Look for {% blocktrans %}...{% endblocktrans %} instead
  transfind templates/ messages.po --tag blocktrans
  # Use your own pattern (group 1 is the tag)
  transfind templates/ messages.po -t '\{\{ _\("(.*)"\) \}\}'
  # Skip vendored templates and backups
  transfind templates/ messages.po -x 'vendor/**' -x '*.bak'
  # Machine-readable report
  transfind templates/ messages.po --dry-run --json

Patterns are matched multi-line with '.' matching newlines, and ungreedy:
'.*' is lazy, '.*?' is greedy.
"#;

/// Find translatable template tags and append them to a message catalog.
#[derive(Parser, Debug)]
#[command(
    name = "transfind",
    version,
    about = "Find {% trans %} tags in a directory and append them to a message catalog.",
    after_long_help = LONG_HELP
)]
struct Cli {
    /// Template file or directory to search for tags
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Catalog file to check for existing keys and write to (created if missing)
    #[arg(value_name = "CATALOG")]
    catalog: PathBuf,

    /// Catalog format, for instance "Po"
    #[arg(value_name = "FORMAT", default_value = "po", env = "TRANSFIND_FORMAT")]
    format: String,

    /// Custom regex for finding tags; group 1 is the tag text
    #[arg(short = 't', long, value_name = "REGEX", conflicts_with = "tag")]
    tag_regex: Option<String>,

    /// Tag name for the default pattern; the closing tag is "end" + NAME
    #[arg(long, value_name = "NAME")]
    tag: Option<String>,

    /// Do not write the new tags in the catalog file
    #[arg(short, long)]
    dry_run: bool,

    /// Print the new entries as they will appear in the catalog
    #[arg(short, long)]
    output_tags: bool,

    /// Exclude glob patterns (repeatable). Patterns are relative to PATH
    #[arg(short = 'x', long = "exclude", value_name = "GLOB", action = clap::ArgAction::Append)]
    exclude: Vec<String>,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Report counts after the run; repeat for more log output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(&cli) {
        let label = if e.is_configuration() {
            "Configuration error:"
        } else {
            "Error:"
        };
        eprintln!("{} {e}", label.red().bold());
        std::process::exit(1);
    }
}

fn init_logging(quiet: bool, verbose: u8) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0 | 1) => "warn",
        (false, 2) => "info",
        (false, 3) => "debug",
        (false, _) => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("transfind={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;

    if cli.verbose > 0 {
        eprintln!(
            "Searching for tags in {} recursively",
            config.root.display().to_string().green()
        );
    }

    let report = ExtractionSession::new(config).run()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if cli.verbose > 0 && !cli.quiet {
        print_summary(&report);
    }

    if let Some(output) = &report.output
        && (cli.output_tags || cli.dry_run)
    {
        let mut stdout = io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        stdout.flush()?;
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<ExtractConfig> {
    let mut config = ExtractConfig::new(&cli.path, &cli.catalog);
    config.format = FormatKind::from_name(&cli.format)?;
    config.pattern = match (&cli.tag_regex, &cli.tag) {
        (Some(regex), _) => TagPattern::custom(regex)?,
        (None, Some(name)) => TagPattern::for_tag(name)?,
        (None, None) => TagPattern::default_pattern()?,
    };
    config.dry_run = cli.dry_run;
    config.exclude = build_exclude(&cli.exclude)?;
    Ok(config)
}

fn build_exclude(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(Some(builder.build()?))
}

fn print_summary(report: &ExtractionReport) {
    let stats = &report.stats;

    eprintln!(
        "Found {} existing keys in {}",
        report.existing_keys,
        report.catalog.display().to_string().green()
    );
    eprintln!(
        "Found {} new tags in {} files under {}",
        stats.new_tags,
        stats.files_read,
        report.root.display().to_string().green()
    );
    if stats.matched_existing > 0 {
        eprintln!(
            "{}",
            format!(
                "{} tags were already in the catalog (can be repeated)",
                stats.matched_existing
            )
            .magenta()
        );
    }
    for skipped in &report.skipped {
        eprintln!(
            "{} {}: {}",
            "Skipped".yellow(),
            skipped.path.display(),
            skipped.reason
        );
    }
    eprintln!(
        "Prepared to include {}",
        format!("{} tags", report.tags.len()).green()
    );

    if report.output.is_some() {
        if report.dry_run {
            eprintln!("{}", "Dry-run: catalog file will not be touched".yellow());
        } else if report.written {
            eprintln!("{}", "Catalog file updated!".magenta());
        }
    }
}

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use folio_sitemap::{
    SitemapOptions, errors::SitemapError, generate_sitemap, init_logging,
    routes::{RouteEntry, default_routes, load_routes},
};
use log::debug;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory the route sources are relative to
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Where to write the sitemap, relative to the root unless absolute [default: public/sitemap.xml]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML file declaring the routes, instead of the built-in route table
    #[arg(long)]
    routes: Option<PathBuf>,

    /// Base URL of the site, overrides SITE_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    /// XSL stylesheet to reference from the sitemap
    #[arg(long)]
    stylesheet: Option<String>,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.quiet);

    report(run(cli), &mut io::stdout(), &mut io::stderr())
}

/// Prints the outcome of a run and picks the exit code. Failures are written to `err_out` whatever the log filter is.
fn report(
    result: Result<PathBuf, SitemapError>,
    out: &mut impl Write,
    err_out: &mut impl Write,
) -> ExitCode {
    match result {
        Ok(output_path) => {
            let _ = writeln!(out, "Sitemap generated at {}", output_path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!(target: "sitemap", "{:?}", err);
            let _ = writeln!(err_out, "Failed to generate sitemap: {}", error_chain(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<PathBuf, SitemapError> {
    let routes: Vec<RouteEntry> = match &cli.routes {
        Some(path) => load_routes(path)?,
        None => default_routes(),
    };

    let mut options = SitemapOptions {
        project_root: cli.root,
        stylesheet: cli.stylesheet,
        ..Default::default()
    };
    if let Some(base_url) = cli.base_url {
        options.base_url = base_url;
    }
    if let Some(output) = cli.output {
        options.output_path = output;
    }

    generate_sitemap(&routes, &options).map(|output| output.output_path)
}

/// Joins an error with all of its sources, e.g. `Failed to read ...: No such file or directory`.
fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        message.push_str(&format!(": {}", cause));
        source = cause.source();
    }

    message
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strata::{config, diagnostics::Diagnostics, engines::Engines, output, pipeline};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Static site generator with nested layouts and a paginated blog")]
#[command(long_about = "\
Static site generator with nested layouts and a paginated blog

Three directories are read, transformed and merged into one output tree:

  project/
  ├── config.toml                  # Optional, see 'strata gen-config'
  ├── layout/                      # Templates (mustache), looked up by path
  │   ├── base.hbs                 # {{{content}}} is the wrapped page
  │   └── post.hbs                 # front matter `layout: base.hbs` nests it
  ├── site/                        # Pages, mirrored into the output
  │   ├── index.md                 # → index.html
  │   └── style.css                # Copied verbatim
  └── blog/                        # Posts, rendered with blog.hbs
      ├── first-post.md            # date: 2024-01-05 in front matter
      └── second-post.md           # Index pages: index.html, page/2/index.html, ...

Each text file may start with a YAML front matter block. The `layout` key picks
a template; directories pass it down to everything below them, and a layout can
name its own layout to wrap the result again.

Run 'strata gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Project directory holding layout/, site/, blog/ and config.toml
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory (overrides paths.output from config.toml)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Log every pass at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every pass and write the output tree
    Build,
    /// Run every pass without writing, and show the resulting tree
    Check {
        /// Print the tree with all metadata as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let json = match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            return Ok(());
        }
        Command::Build => false,
        Command::Check { json } => json,
    };

    init_logging(cli.verbose);
    let site_config = config::load_config(&cli.source)?;
    let engines = Engines::default();
    let mut diag = Diagnostics::new();

    if let Command::Build = cli.command {
        let output_dir = cli
            .output
            .clone()
            .unwrap_or_else(|| site_config.paths.output_dir(&cli.source));
        let site = pipeline::build(
            &site_config,
            &cli.source,
            Some(output_dir.as_path()),
            &engines,
            &mut diag,
        )?;
        output::print_build_report(&site.report);
    } else {
        let site = pipeline::build(&site_config, &cli.source, None, &engines, &mut diag)?;
        if json {
            let dump = output::tree_json(&site.tree, site.root);
            println!("{}", serde_json::to_string_pretty(&dump)?);
        } else {
            output::print_tree(&site.tree, site.root);
            println!();
            output::print_build_report(&site.report);
        }
    }

    if !diag.is_empty() {
        println!();
        output::print_diagnostics(&diag);
    }
    Ok(())
}

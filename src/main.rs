use clap::{Parser, Subcommand};
use docsite::{config, output, process};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "Static documentation site generator")]
#[command(long_about = "\
Static documentation site generator

The input directory is the navigation. Folders become sidebar sections and
markdown files become pages. Every page embeds the whole tree.

Input structure:

  docs/
  ├── docsite.toml                   # Site config (optional)
  ├── index.md                       # Top-level page
  ├── introduction/                  # Pinned first in the sidebar
  ├── guides/
  │   ├── img/diagram.png            # Asset, copied as-is
  │   └── aws/setup.md
  └── packages/
      └── module-vpc/                # Package folder
          ├── overview.md            # \"Overview\" pages are listed first
          └── modules/
              └── vpc-app/           # Module folder, name kept verbatim
                  └── core-concepts.md

Run 'docsite gen-config' to generate a documented docsite.toml.")]
#[command(version)]
struct Cli {
    /// Input directory of markdown pages and assets
    #[arg(long, default_value = "docs", global = true)]
    input: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Theme directory with css/, img/ and favicons/ sub-directories
    #[arg(long, global = true)]
    html: Option<PathBuf>,

    /// JSON manifest describing packages
    #[arg(long, global = true)]
    packages: Option<PathBuf>,

    /// Glob of input paths to skip (repeatable)
    #[arg(long, global = true)]
    exclude: Vec<String>,

    /// Log progress at info level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site: scan, render every page, copy assets
    Build,
    /// Scan the input directory and print the nav tree without writing
    Check,
    /// Print a stock docsite.toml with all options documented
    GenConfig,
}

impl Cli {
    fn opts(&self) -> process::Opts {
        process::Opts {
            input: self.input.clone(),
            output: self.output.clone(),
            html_dir: self.html.clone(),
            packages_path: self.packages.clone(),
            excludes: self.exclude.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Build => {
            let opts = cli.opts();
            println!("==> Building {} → {}", opts.input.display(), opts.output.display());
            let result = process::process(&opts)?;
            output::print_build_output(&result, &opts.output);
        }
        Command::Check => {
            let opts = cli.opts();
            println!("==> Checking {}", opts.input.display());
            let config = process::load_config(&opts)?;
            let scan = process::scan(&opts, &config)?;
            output::print_scan_output(&scan, &config.nav.top_level_order);
            println!("==> Input is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

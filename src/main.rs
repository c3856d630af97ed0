//! DSP Production Calculator
//!
//! A production chain calculator for Dyson Sphere Program.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dsp_calculator::{closure_diff, loader, Catalog, Factories};

#[derive(Parser)]
#[command(name = "dsp-calculator")]
#[command(about = "Production chain calculator for Dyson Sphere Program")]
struct Cli {
    /// Path to a data file or a directory of data files (defaults to built-in data)
    #[arg(long, global = true, env = "DSP_DATA")]
    data: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate that the data file is correct
    Validate,

    /// Calculate production chain for a given list of items. Give item:rate to specify a target rate.
    Chain {
        /// Target items, optionally as item:rate
        items: Vec<String>,

        /// Items you already have (excludes them from the chain)
        #[arg(long)]
        have: Vec<String>,

        /// Interpret rates as number of factories instead of items per second
        #[arg(long)]
        factories: bool,
    },

    /// Calculate what can be produced from a given list of items
    Makes {
        /// Items available to start with
        items: Vec<String>,
    },

    /// Calculate what additional items can be produced when adding a new resource
    Diff {
        /// Items available before
        #[arg(long)]
        old: Vec<String>,

        /// Items added on top of the old ones
        #[arg(long)]
        new: Vec<String>,

        /// Items banned from the old closure
        #[arg(long)]
        exclude_old: Vec<String>,

        /// Items banned from the new closure
        #[arg(long)]
        exclude_new: Vec<String>,
    },

    /// List items that can be directly mined, pumped, etc.
    Resources,

    /// Show the version and git commit this was built from
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    match cli.command {
        Commands::Validate => {
            let catalog = load_catalog(cli.data.as_deref())?;
            catalog.validate().context("error validating data")?;
            println!("Validation successful!");
        }

        Commands::Chain {
            items,
            have,
            factories,
        } => {
            let catalog = load_catalog(cli.data.as_deref())?;

            let mut targets = Vec::new();
            let mut rates = Vec::new();
            for arg in &items {
                let (item, rate) = parse_target(arg)?;
                if let Some(mut rate) = rate {
                    if factories {
                        rate = catalog
                            .factories_to_items_per_second(item, rate)
                            .context("error calculating rate")?;
                    }
                    rates.push((item, rate));
                }
                targets.push(item);
            }

            let mut chain = catalog.new_chain(targets.iter().copied());
            for (item, rate) in rates {
                chain.set_rate(item, rate).context("error setting rate")?;
            }
            chain
                .fill_excluding(&have)
                .context("error filling chain")?;

            if factories {
                print!("{}", chain.render_with(&Factories::new(&catalog)));
            } else {
                print!("{chain}");
            }
        }

        Commands::Makes { items } => {
            let catalog = load_catalog(cli.data.as_deref())?;
            let mut chain = catalog.new_chain(items);
            chain.expand();
            print!("{chain}");
        }

        Commands::Diff {
            old,
            new,
            exclude_old,
            exclude_new,
        } => {
            let catalog = load_catalog(cli.data.as_deref())?;
            for step in closure_diff(&catalog, &old, &new, &exclude_old, &exclude_new) {
                println!("{step}");
            }
        }

        Commands::Resources => {
            let catalog = load_catalog(cli.data.as_deref())?;
            for resource in catalog.resources() {
                println!("{resource}");
            }
        }

        Commands::Version => {
            println!("dsp-calculator {}", env!("CARGO_PKG_VERSION"));
            match option_env!("DSP_GIT_COMMIT") {
                Some(commit) => println!("Built from commit {commit}"),
                None => println!("This is a development build with no commit information."),
            }
        }
    }

    Ok(())
}

fn setup_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("dsp_calculator=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => loader::load_path(path)
            .with_context(|| format!("error loading data from {}", path.display())),
        None => Catalog::sample().context("error loading built-in data"),
    }
}

/// Split `item[:rate]`.
fn parse_target(arg: &str) -> Result<(&str, Option<f64>)> {
    let Some((item, rate)) = arg.split_once(':') else {
        return Ok((arg, None));
    };
    if rate.contains(':') {
        bail!("invalid argument: {arg}");
    }

    let rate: f64 = rate
        .trim()
        .parse()
        .with_context(|| format!("invalid rate: {rate}"))?;
    if !rate.is_finite() || rate < 0.0 {
        bail!("invalid rate: {rate}");
    }
    Ok((item, Some(rate)))
}

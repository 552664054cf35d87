//! confsplice: splice a guest-auth payload into a configuration document.
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use confsplice::directory::{Directory, JsonDirectory};
use confsplice::flow::{FormStep, SelectionForm};
use confsplice::formats::yaml::YamlFormat;
use confsplice::registry::EntryRegistry;
use confsplice::{apply, config, rewrite};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "confsplice")]
#[command(about = "Rewrite one section of a config file, keeping the rest intact", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct Target {
    /// Document to rewrite (defaults to `config_path` from confsplice.toml)
    #[arg(long, short = 'f', value_name = "PATH")]
    file: Option<PathBuf>,

    /// Top-level key whose section receives the payload
    #[arg(long)]
    anchor: Option<String>,

    /// Token written into the payload
    #[arg(long)]
    token: Option<String>,

    /// Leave any earlier payload behind as comments instead of replacing it
    #[arg(long)]
    stack: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite the document on disk, backing it up first
    Apply {
        #[command(flatten)]
        target: Target,

        /// Identifier written into the payload
        #[arg(long, short = 'u')]
        user: String,
    },
    /// Print the rewritten document without touching disk
    Preview {
        #[command(flatten)]
        target: Target,

        /// Identifier written into the payload
        #[arg(long, short = 'u')]
        user: String,
    },
    /// List users eligible for selection as JSON
    Candidates {
        /// JSON array of users exported from the host
        #[arg(long, value_name = "PATH")]
        users: PathBuf,
    },
    /// Run the selection form: validate, rewrite, then record the entry
    Select {
        #[command(flatten)]
        target: Target,

        /// JSON array of users exported from the host
        #[arg(long, value_name = "PATH")]
        users: PathBuf,

        /// Chosen user; omit to show the form
        #[arg(long, short = 'u')]
        user: Option<String>,

        /// Entry registry file
        #[arg(long, value_name = "PATH")]
        registry: Option<PathBuf>,
    },
    /// Remove a recorded entry
    Remove {
        /// Entry id to remove
        entry_id: String,

        /// Entry registry file
        #[arg(long, value_name = "PATH")]
        registry: Option<PathBuf>,
    },
}

impl Target {
    /// Override config values with command line args
    fn apply_to(self, cfg: &mut config::Config) {
        if let Some(file) = self.file {
            cfg.config_path = file.to_string_lossy().into_owned();
        }
        if let Some(anchor) = self.anchor {
            cfg.anchor = anchor;
        }
        if let Some(token) = self.token {
            cfg.target_token = token;
        }
        if self.stack {
            cfg.replace_prior_payload = false;
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> io::Result<()> {
    init_tracing();
    let args = Args::parse();
    let mut cfg = config::Config::load();

    match args.command {
        Command::Apply { target, user } => {
            target.apply_to(&mut cfg);
            run_apply(&cfg, &user)
        }
        Command::Preview { target, user } => {
            target.apply_to(&mut cfg);
            run_preview(&cfg, &user)
        }
        Command::Candidates { users } => {
            let directory = JsonDirectory::load(&users)?;
            print_json(&directory.list_candidates())
        }
        Command::Select {
            target,
            users,
            user,
            registry,
        } => {
            target.apply_to(&mut cfg);
            let registry_path = registry.unwrap_or_else(|| PathBuf::from(&cfg.registry_path));
            run_select(&cfg, &users, user.as_deref(), &registry_path).await
        }
        Command::Remove { entry_id, registry } => {
            let registry_path = registry.unwrap_or_else(|| PathBuf::from(&cfg.registry_path));
            let mut entries = EntryRegistry::load(&registry_path).map_err(io::Error::other)?;
            if entries.remove(&entry_id).is_none() {
                eprintln!("No entry {entry_id}");
            }
            entries.save(&registry_path).map_err(io::Error::other)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}

fn run_apply(cfg: &config::Config, user: &str) -> io::Result<()> {
    let outcome = apply::apply_to_file(
        &cfg.document(),
        &YamlFormat,
        &cfg.payload(),
        user,
        cfg.rewrite_options(),
    )
    .map_err(io::Error::other)?;
    match outcome {
        apply::Applied::Unchanged => {
            println!("No `{}` section found, nothing written", cfg.anchor);
        }
        apply::Applied::Rewritten { backup, sections } => {
            println!(
                "Rewrote {} section(s); backup at {}",
                sections.len(),
                backup.display()
            );
        }
    }
    Ok(())
}

fn run_preview(cfg: &config::Config, user: &str) -> io::Result<()> {
    let original = std::fs::read_to_string(cfg.document())?;
    let result = rewrite::rewrite(
        &original,
        &YamlFormat,
        &cfg.payload(),
        user,
        cfg.rewrite_options(),
    );
    if !result.changed {
        eprintln!("No `{}` section found", cfg.anchor);
    }
    print!("{}", result.text());
    Ok(())
}

async fn run_select(
    cfg: &config::Config,
    users: &Path,
    user: Option<&str>,
    registry_path: &Path,
) -> io::Result<()> {
    let form = SelectionForm::new(JsonDirectory::load(users)?, cfg);
    match form.step(user).await.map_err(io::Error::other)? {
        FormStep::Form { choices, errors } => {
            let rejected = !errors.is_empty();
            print_json(&serde_json::json!({
                "choices": choices,
                "errors": errors,
            }))?;
            if rejected {
                Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "selection rejected",
                ))
            } else {
                Ok(())
            }
        }
        FormStep::CreateEntry(entry) => {
            let mut entries = EntryRegistry::load(registry_path).map_err(io::Error::other)?;
            println!("{}", entry.entry_id);
            entries.setup(entry);
            entries.save(registry_path).map_err(io::Error::other)
        }
    }
}

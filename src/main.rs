use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};

use mgasite::config::SiteConfig;
use mgasite::content::{Catalog, Content, Partner, Post};
use mgasite::site::Site;
use mgasite::{render, schema, serve};

#[derive(Parser)]
#[command(version, long_version = env!("LONG_VERSION"), about, long_about = None)]
struct Cli {
    /// Site configuration; the built-in one is used when omitted.
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding `partner/` and `post/` records.
    #[arg(long, global = true, default_value = "content")]
    content: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the JSON-LD document for a page.
    Schema {
        path: String,

        #[arg(short = 'p', long)]
        pretty: bool,
    },

    /// Validate configuration and content and look for dangling `@id` references.
    Check,

    /// Write every page with its structured data to a directory.
    Render {
        output: PathBuf,
    },

    /// Serve the pages and their JSON-LD over HTTP.
    Serve {
        #[arg(short = 'p', long)]
        port: Option<String>,
    },

    /// Print the JSON Schema of content records.
    ContentSchema,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    match args.command {
        Commands::Schema { path, pretty } => {
            let config = load_config(args.config.as_deref())?;
            let catalog = load_catalog(&args.content)?;
            let site = Site::new(&config, &catalog);
            let page = site
                .page(&path)
                .with_context(|| format!("no page at `{}`", path))?;

            let json = page.json_ld().context("could not serialize structured data")?;
            if pretty {
                let value: serde_json::Value = serde_json::from_str(&json)?;
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", json);
            }

            Ok(())
        }

        Commands::Check => check(args.config.as_deref(), &args.content),

        Commands::Render { output } => {
            let config = load_config(args.config.as_deref())?;
            let catalog = load_catalog(&args.content)?;
            let count = render::run(&Site::new(&config, &catalog), &output)
                .with_context(|| "could not run `render`")?;

            log::info!("Rendered {} pages to `{}`", count, output.to_string_lossy());

            Ok(())
        }

        Commands::Serve { port } => {
            let config = load_config(args.config.as_deref())?;
            let catalog = load_catalog(&args.content)?;

            serve::run(serve::AppState::new(config, catalog), port.as_deref())
                .await
                .with_context(|| "failed to run `serve`")
        }

        Commands::ContentSchema => {
            let schemas = serde_json::json!({
                "partner": schemars::schema_for!(Partner),
                "post": schemars::schema_for!(Post),
            });
            println!("{}", serde_json::to_string_pretty(&schemas)?);

            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    SiteConfig::load(path).map_err(|e| {
        eprintln!("{:?}", miette::Report::new(e));
        anyhow!("could not load site configuration")
    })
}

fn load_catalog(dir: &Path) -> Result<Catalog> {
    Catalog::load(dir).map_err(|e| {
        eprintln!("{:?}", miette::Report::new(e));
        anyhow!("could not load content from {:?}", dir)
    })
}

/// Reports every problem instead of stopping at the first one.
fn check(config_path: Option<&Path>, content_dir: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let mut problems = 0;

    let content = Content::open(content_dir);
    let mut partners = Vec::new();
    for result in content.partners() {
        match result {
            Ok(partner) => partners.push(partner),
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                problems += 1;
            }
        }
    }
    let mut posts = Vec::new();
    for result in content.posts() {
        match result {
            Ok(post) => posts.push(post),
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                problems += 1;
            }
        }
    }
    log::info!("{} partners, {} posts", partners.len(), posts.len());

    let catalog = Catalog::from_parts(partners, posts);
    let pages = Site::new(&config, &catalog).pages();
    for page in &pages {
        for dangling in schema::dangling_references(&page.schemas) {
            // Unchecked references are valid JSON-LD, so these only warn.
            log::warn!(
                "{}: {:?}.{} refers to `{}`, which is not in the page graph",
                page.path,
                dangling.from,
                dangling.property,
                dangling.id
            );
        }
    }

    if problems > 0 {
        bail!("found {} invalid content records", problems);
    }

    log::info!("{} pages OK", pages.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_every_command_has_help() {
        for command in Cli::command().get_subcommands() {
            assert!(command.get_about().is_some(), "{}", command.get_name());
        }
    }
}

use clap::{Parser, Subcommand};
use og_bake::{config, output, pipeline};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "og-bake")]
#[command(about = "Inject SEO and Open Graph tags into per-page copies of a built site shell")]
#[command(long_about = "\
Inject SEO and Open Graph tags into per-page copies of a built site shell

Reads <project>/wwwroot/index.html, strips its title, description, canonical
and og:* tags, and writes <project>/wwwroot/<slug>/index.html for every page
in the page manifest with that page's tags injected.

Build arguments after `--` are read the way the host build passes them:

  --social:baseurl=<url>        Base URL for canonical/og:url (required for release)
  -c, --configuration <name>    Build configuration (default: debug)

Page manifest (JSON):

  { \"pages\": [ { \"slug\": \"about\", \"title\": \"About\",
                 \"description\": \"Who we are\", \"image\": \"img/about.png\" } ] }

Run 'og-bake gen-config' to generate a documented social.toml.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write one enriched copy of the shell per page
    Bake {
        /// Project output root containing wwwroot/
        #[arg(long, default_value = ".")]
        project: PathBuf,

        /// Page manifest written by the host build
        #[arg(long)]
        pages: PathBuf,

        /// Config file (default: <project>/social.toml, optional)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host build arguments (--social:baseurl=<url>, -c <configuration>)
        #[arg(last = true, allow_hyphen_values = true)]
        build_args: Vec<String>,
    },
    /// Print a stock social.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Bake {
            project,
            pages,
            config: config_path,
            build_args,
        } => {
            let config_path =
                config_path.unwrap_or_else(|| project.join(config::CONFIG_FILE_NAME));
            let file_config = config::load_config(&config_path)?;
            let pages = pipeline::load_pages(&pages)?;

            let ctx = pipeline::BakeContext {
                project_root: project,
                arguments: build_args,
                pages,
            };
            let outcome = pipeline::bake(&ctx, &file_config)?;
            output::print_bake_output(&outcome);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

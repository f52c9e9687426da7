use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playlist_converter::{
    cli,
    config::{self, Settings},
    error, logging,
    types::Destination,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Log every API request and response to stderr
    #[clap(long, short, global = true)]
    verbose: bool,

    /// Load configuration from this file instead of the default .env
    #[clap(long, global = true)]
    env_file: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build a playlist (or fill Liked Songs) from a track list file
    Build(BuildOptions),

    /// Remove every track from Liked Songs
    ClearLiked(ConfirmOptions),

    /// Show which track a title and artist resolve to
    Resolve(ResolveOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct BuildOptions {
    /// Track list: one `title - artist` per line
    file: PathBuf,

    /// Name of the playlist to create
    #[clap(long, required_unless_present = "liked", conflicts_with = "liked")]
    name: Option<String>,

    /// Add the tracks to Liked Songs instead of a playlist
    #[clap(long)]
    liked: bool,

    /// Do not ask for confirmation
    #[clap(long, short)]
    yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfirmOptions {
    /// Do not ask for confirmation
    #[clap(long, short)]
    yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ResolveOptions {
    title: String,
    artist: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

async fn load_settings(env_file: Option<PathBuf>) -> Settings {
    if let Err(e) = config::load_env(env_file).await {
        error!("Cannot load environment. Err: {}", e);
    }

    match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("{}", e),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Command::Build(opt) => {
            let destination = match opt.name {
                Some(name) => Destination::Playlist(name),
                None => Destination::LikedSongs,
            };
            let settings = load_settings(cli.env_file).await;
            cli::build(settings, &opt.file, destination, opt.yes, cli.verbose).await
        }
        Command::ClearLiked(opt) => {
            let settings = load_settings(cli.env_file).await;
            cli::clear_liked(settings, opt.yes, cli.verbose).await
        }
        Command::Resolve(opt) => {
            let settings = load_settings(cli.env_file).await;
            cli::resolve(settings, &opt.title, &opt.artist).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{}", e);
    }
}

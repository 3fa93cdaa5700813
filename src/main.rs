//! GitHub repository browser - Entry Point

use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

/// Browse GitHub repository search results and copy a repository URL
#[derive(Parser, Debug)]
#[command(name = "ghscout")]
#[command(version)]
#[command(about = "TUI for paging through GitHub repository search results")]
pub struct Args {
    /// Submit this query at startup
    #[arg(short, long)]
    pub query: Option<String>,

    /// Browse your own repositories instead of searching
    #[arg(long)]
    pub owned: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Serve stdin on the clipboard until replaced (internal helper mode)
    #[arg(long, hide = true)]
    pub serve_clipboard: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.serve_clipboard {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        ghscout::clipboard::serve_until_replaced(&text)?;
        return Ok(());
    }

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = ghscout::config::load_config_with_precedence(args.config.clone())?;
        let merged = ghscout::config::merge_config(config_file);
        let with_env = ghscout::config::apply_env_overrides(merged);
        ghscout::config::apply_cli_overrides(with_env, args.owned)
    };

    ghscout::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let token = ghscout::config::resolve_token(&config)?;

    // The terminal is restored by now, so the URL lands on the real stdout.
    if let Some(url) = ghscout::view::run(&config, token, args.query.as_deref())? {
        println!("{url}");
    }

    Ok(())
}

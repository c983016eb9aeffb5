/// Vinyl Vault Server - record catalog with recognition and price lookup
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vinyl_server::{build_state, create_router, ServerConfig};
use vinyl_storage::Database;

#[derive(Parser)]
#[command(name = "vinyl-server")]
#[command(about = "Vinyl record catalog server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "VINYL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// List all stored albums
    ListAlbums,
    /// Show a single stored album
    ShowAlbum {
        /// Album id
        id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "vinyl_server=info,vinyl_lookup=info,vinyl_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::ListAlbums => {
            list_albums(&config).await?;
        }
        Commands::ShowAlbum { id } => {
            show_album(&config, id).await?;
        }
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Vinyl Vault server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    if config.recognition.api_key.is_none() {
        tracing::warn!("Recognition API key not configured, /recognize will fail");
    }
    if config.discogs.personal_token.is_none() {
        tracing::warn!("Discogs credentials not configured, /search-enrich will fail");
    }

    let app_state = build_state(&config).await?;
    let app = create_router(app_state, config.server.max_body_bytes);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn list_albums(config: &ServerConfig) -> anyhow::Result<()> {
    let db = Database::connect(&config.storage.database_url).await?;
    let albums = db.list_albums().await?;

    println!("Albums ({}):", albums.len());
    for album in albums {
        println!(
            "  {:>4}  {} - {} ({}) [{}]",
            album.id, album.artist, album.name, album.year, album.condition
        );
    }

    Ok(())
}

async fn show_album(config: &ServerConfig, id: i64) -> anyhow::Result<()> {
    let db = Database::connect(&config.storage.database_url).await?;
    let album = db.get_album(id).await?;

    println!("{}", serde_json::to_string_pretty(&album)?);
    Ok(())
}

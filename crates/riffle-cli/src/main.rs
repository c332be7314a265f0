//! Riffle CLI - In-place Spotify playlist shuffler
//!
//! One-shot flow: read config, prompt for the playlist and an optional
//! seed, authenticate, fetch the current order, plan (or drive) the
//! shuffle, and report how many moves landed.

mod cli;
mod config;
mod input;
mod spotify;

use anyhow::{ bail, Context, Result };
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use cli::{ Args, Strategy };
use config::Config;
use spotify::SpotifyService;

use riffle_core::{
    execute_moves, fetch_track_uris, multipass, plan_moves, shuffled_order,
    MultipassOptions, PlaylistService, MOVE_DELAY,
};


#[tokio::main]
async fn main() -> Result<()> {
    // A .env file is optional; real env vars win either way.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else( |_| EnvFilter::new( "riffle_cli=info,riffle_core=info" ) ),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env().context( "configuration error" )?;

    let raw_playlist = match &args.playlist {
        Some( p ) => p.clone(),
        None => input::prompt_playlist()?,
    };
    let Some( playlist_id ) = input::extract_playlist_id( &raw_playlist ) else {
        bail!( "'{}' is not a playlist URL or ID", raw_playlist.trim() );
    };

    let raw_seed = match &args.seed {
        Some( s ) => s.clone(),
        None => input::prompt_seed()?,
    };
    let mut rng = match input::parse_seed( &raw_seed ) {
        Some( seed ) => {
            println!( "Seeded shuffle ({})", seed );
            StdRng::seed_from_u64( seed )
        }
        None => StdRng::from_entropy(),
    };

    println!( "Authenticating..." );
    let service = SpotifyService::connect( &config ).await?;

    let metadata = service.playlist_metadata( &playlist_id ).await?;
    println!( "Target: {} (owner: {})", metadata.name, metadata.owner );

    println!( "Fetching playlist..." );
    let tracks = fetch_track_uris( &service, &playlist_id ).await?;
    if tracks.is_empty() {
        bail!( "playlist has no reorderable tracks" );
    }
    println!( "{} tracks ready", tracks.len() );

    let report = match args.strategy {
        Strategy::Exact => {
            let order = shuffled_order( &mut rng, tracks.len() );
            let moves = plan_moves( &order );
            println!( "{} moves required", moves.len() );

            if !proceed( &args, &format!( "Apply {} moves?", moves.len() ) )? {
                println!( "Aborted, playlist untouched" );
                return Ok(());
            }
            execute_moves( &service, &playlist_id, &moves, MOVE_DELAY ).await
        }
        Strategy::Multipass => {
            let options = MultipassOptions {
                passes: multipass::pass_count( tracks.len() ),
                ..Default::default()
            };

            if !proceed( &args, &format!( "Shuffle with {} passes?", options.passes ) )? {
                println!( "Aborted, playlist untouched" );
                return Ok(());
            }
            multipass::run( &service, &playlist_id, tracks.len(), options, &mut rng ).await
        }
    };

    println!(
        "Shuffle complete: {}/{} moves succeeded",
        report.succeeded, report.attempted,
    );
    if let Some( url ) = metadata.external_url {
        println!( "{}", url );
    }

    Ok(())
}


/// Confirmation gate before any mutation; `--yes` skips the prompt.
fn proceed( args: &Args, prompt: &str ) -> Result<bool> {
    if args.yes {
        return Ok( true );
    }
    input::confirm( prompt )
}

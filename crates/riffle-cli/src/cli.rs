//! Command-line argument parsing for Riffle.

use clap::{ Parser, ValueEnum };


/// Riffle - Shuffle a Spotify playlist in place.
#[derive( Parser, Debug )]
#[command( name = "riffle" )]
#[command( version, about, long_about = None )]
pub struct Args {
    /// Playlist URL or ID. Prompted for when omitted.
    pub playlist: Option<String>,

    /// Seed for a reproducible shuffle (an integer, or any string).
    #[arg( short, long )]
    pub seed: Option<String>,

    /// Shuffle strategy.
    #[arg( long, value_enum, default_value_t = Strategy::Exact )]
    pub strategy: Strategy,

    /// Skip the confirmation prompt.
    #[arg( short = 'y', long )]
    pub yes: bool,
}


/// Which shuffle strategy to run.
#[derive( Debug, Clone, Copy, PartialEq, Eq, ValueEnum )]
pub enum Strategy {
    /// One uniform random permutation, realized with the minimal move list.
    Exact,

    /// Repeated move-random-track-to-front passes. Front-biased, but cheap
    /// to reason about for very large playlists.
    Multipass,
}

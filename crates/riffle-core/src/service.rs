//! Remote playlist service abstraction
//!
//! The shuffle engine never talks HTTP itself; it drives a small trait
//! modeled on the Spotify Web API surface it needs: playlist metadata,
//! paged item listing, and the single-item reorder operation.

use async_trait::async_trait;
use thiserror::Error;


/// Errors surfaced by a playlist service.
#[derive( Debug, Error )]
pub enum ServiceError {
    #[error( "authentication failed: {0}" )]
    Auth( String ),

    #[error( "fetch failed: {0}" )]
    Fetch( String ),

    #[error( "playlist not found: {0}" )]
    NotFound( String ),

    #[error( "reorder failed: {0}" )]
    Reorder( String ),
}


/// Insertion anchor for a reorder call.
///
/// The remote API distinguishes between inserting before and after a
/// reference index; which one is correct depends on whether the destination
/// lies before or after the source in the *current* order.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub enum Anchor {
    /// Insert immediately before the element currently at this index.
    Before( usize ),

    /// Insert immediately after the element currently at this index.
    After( usize ),
}


/// A single entry of a playlist page, reduced to what the filter needs.
#[derive( Debug, Clone )]
pub struct PlaylistItem {
    /// Track URI, or None for entries with no underlying track.
    pub track_uri: Option<String>,

    /// True for local files, which the reorder API cannot address reliably.
    pub is_local: bool,
}


/// One page of playlist items.
#[derive( Debug, Clone )]
pub struct PlaylistPage {
    pub items: Vec<PlaylistItem>,

    /// True if further pages exist after this one.
    pub has_next: bool,
}


/// Playlist metadata for the pre-run banner.
#[derive( Debug, Clone )]
pub struct PlaylistMetadata {
    pub name: String,
    pub owner: String,
    pub public: Option<bool>,
    pub external_url: Option<String>,
}


/// The remote playlist service as seen by the shuffle engine.
///
/// All operations act on the service's authoritative track order. A
/// successful `reorder` mutates that order; no operation here reads it back
/// mid-run, so callers must account for the shift themselves.
#[async_trait]
pub trait PlaylistService: Send + Sync {
    /// Fetches playlist metadata.
    async fn playlist_metadata( &self, playlist_id: &str ) -> Result<PlaylistMetadata, ServiceError>;

    /// Fetches one page of playlist items starting at `offset`.
    async fn playlist_page( &self, playlist_id: &str, offset: usize ) -> Result<PlaylistPage, ServiceError>;

    /// Moves the single element at `range_start` (in current order) to the
    /// given anchor. Returns the new snapshot id.
    async fn reorder(
        &self,
        playlist_id: &str,
        range_start: usize,
        anchor: Anchor,
    ) -> Result<String, ServiceError>;
}

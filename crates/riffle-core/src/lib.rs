//! Riffle Core - Playlist shuffle engine
//!
//! This crate provides the logic for shuffling a remote playlist in place:
//! fetching and filtering the current track order, planning reorder moves,
//! and executing them against a position-based reorder API.

pub mod exec;
pub mod fetch;
pub mod multipass;
pub mod plan;
pub mod service;

pub use exec::{ execute_moves, MoveReport, MOVE_DELAY };
pub use fetch::fetch_track_uris;
pub use multipass::{ pass_count, MultipassOptions };
pub use plan::{ apply_move, plan_moves, shuffled_order, Move };
pub use service::{ Anchor, PlaylistItem, PlaylistMetadata, PlaylistPage, PlaylistService, ServiceError };

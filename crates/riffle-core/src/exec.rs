//! Move execution against the remote service
//!
//! Issues planned moves one at a time, strictly sequentially: every index in
//! a plan assumes all earlier moves have already taken effect remotely, so
//! nothing here may ever run concurrently. Failures are counted and
//! skipped, never retried: a retry against an unknown remote state would
//! compound the index drift it is trying to fix.

use std::time::Duration;

use crate::plan::Move;
use crate::service::{ PlaylistService, ServiceError };


/// Courtesy delay between reorder calls, for the API rate limit.
pub const MOVE_DELAY: Duration = Duration::from_millis( 100 );

/// Report progress every this many moves.
const PROGRESS_EVERY: usize = 10;

/// Maximum length of a logged per-move error message.
const ERROR_PREVIEW: usize = 40;


/// Outcome of an execution run.
#[derive( Debug, Clone, Copy, Default, PartialEq, Eq )]
pub struct MoveReport {
    pub attempted: usize,
    pub succeeded: usize,
}


impl MoveReport {
    /// Records one move result.
    pub fn record( &mut self, result: &Result<String, ServiceError> ) {
        self.attempted += 1;
        if result.is_ok() {
            self.succeeded += 1;
        }
    }
}


/// Executes a planned move list sequentially.
///
/// @param delay - Fixed pause after each call; pass `MOVE_DELAY` outside of
///                tests
///
/// @returns Counts of attempted and succeeded moves
pub async fn execute_moves<S>(
    service: &S,
    playlist_id: &str,
    moves: &[Move],
    delay: Duration,
) -> MoveReport
where
    S: PlaylistService + ?Sized,
{
    let mut report = MoveReport::default();

    for ( i, m ) in moves.iter().enumerate() {
        let result = service.reorder( playlist_id, m.from, m.anchor ).await;

        if let Err( e ) = &result {
            tracing::warn!(
                "Move {}/{} ({} -> {}) failed: {}",
                i + 1,
                moves.len(),
                m.from,
                m.to,
                truncate_message( &e.to_string(), ERROR_PREVIEW ),
            );
        }
        report.record( &result );

        if ( i + 1 ) % PROGRESS_EVERY == 0 {
            tracing::info!( "{}/{} moves complete", i + 1, moves.len() );
        }

        if !delay.is_zero() {
            tokio::time::sleep( delay ).await;
        }
    }

    report
}


/// Truncates a message to at most `max` characters, on a char boundary.
pub( crate ) fn truncate_message( message: &str, max: usize ) -> &str {
    match message.char_indices().nth( max ) {
        Some( ( i, _ ) ) => &message[ ..i ],
        None => message,
    }
}


#[cfg( test )]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::plan::{ apply_move, plan_moves };
    use crate::service::{ Anchor, PlaylistMetadata, PlaylistPage };


    /// In-memory mirror of the remote playlist, applying the same splice
    /// rule as the real service. Fails any reorder whose (1-based) call
    /// number is listed in `fail_on`.
    struct SpliceService {
        tracks: Mutex<Vec<&'static str>>,
        calls: Mutex<usize>,
        fail_on: Vec<usize>,
    }


    impl SpliceService {
        fn new( tracks: Vec<&'static str> ) -> Self {
            Self {
                tracks: Mutex::new( tracks ),
                calls: Mutex::new( 0 ),
                fail_on: Vec::new(),
            }
        }
    }


    #[async_trait]
    impl PlaylistService for SpliceService {
        async fn playlist_metadata( &self, _id: &str ) -> Result<PlaylistMetadata, ServiceError> {
            unimplemented!()
        }


        async fn playlist_page( &self, _id: &str, _offset: usize ) -> Result<PlaylistPage, ServiceError> {
            unimplemented!()
        }


        async fn reorder( &self, _id: &str, range_start: usize, anchor: Anchor ) -> Result<String, ServiceError> {
            let call = {
                let mut calls = self.calls.lock().unwrap();
                *calls += 1;
                *calls
            };
            if self.fail_on.contains( &call ) {
                return Err( ServiceError::Reorder( "injected failure".into() ) );
            }

            let to = match anchor {
                Anchor::Before( i ) => i,
                Anchor::After( i ) => i,
            };
            let mut tracks = self.tracks.lock().unwrap();
            apply_move( &mut *tracks, range_start, to );
            Ok( format!( "snapshot-{}", call ) )
        }
    }


    #[tokio::test]
    async fn test_executed_plan_matches_target() {
        let service = SpliceService::new( vec![ "A", "B", "C", "D", "E" ] );
        let order = vec![ 2, 0, 3, 1, 4 ];
        let moves = plan_moves( &order );

        let report = execute_moves( &service, "p", &moves, Duration::ZERO ).await;
        assert_eq!( report, MoveReport { attempted: 2, succeeded: 2 } );
        assert_eq!( *service.tracks.lock().unwrap(), vec![ "C", "A", "D", "B", "E" ] );
    }


    #[tokio::test]
    async fn test_failure_is_skipped_not_fatal() {
        // Ten backward moves; every move lands at the front so each is
        // independent of the failed one for counting purposes.
        let mut service = SpliceService::new( ( 0..11 ).map( |_| "t" ).collect() );
        service.fail_on = vec![ 3 ];

        let moves: Vec<Move> = ( 1..=10 ).map( |i| Move::new( i, 0 ) ).collect();
        let report = execute_moves( &service, "p", &moves, Duration::ZERO ).await;

        assert_eq!( report.attempted, 10 );
        assert_eq!( report.succeeded, 9 );
        assert_eq!( *service.calls.lock().unwrap(), 10 );
    }


    #[tokio::test]
    async fn test_empty_plan() {
        let service = SpliceService::new( vec![ "A" ] );
        let report = execute_moves( &service, "p", &[], Duration::ZERO ).await;
        assert_eq!( report, MoveReport::default() );
    }


    #[test]
    fn test_truncate_message() {
        assert_eq!( truncate_message( "short", 40 ), "short" );
        let long = "x".repeat( 80 );
        assert_eq!( truncate_message( &long, 40 ).len(), 40 );
        // Multibyte input must still cut on a boundary.
        assert_eq!( truncate_message( "ééééé", 3 ), "ééé" );
    }
}

//! Playlist snapshot fetching and filtering
//!
//! Reads the full current track order through repeated paged requests and
//! keeps only entries the reorder API can address: items with a real,
//! non-local track behind them.

use crate::service::{ PlaylistItem, PlaylistService, ServiceError };


/// Fetches the ordered list of track URIs currently in the playlist.
///
/// Pages until the service reports no further pages. Read-only; errors from
/// the service are surfaced as-is, with no retry.
pub async fn fetch_track_uris<S>(
    service: &S,
    playlist_id: &str,
) -> Result<Vec<String>, ServiceError>
where
    S: PlaylistService + ?Sized,
{
    let mut uris = Vec::new();
    let mut offset = 0;
    let mut total_items = 0;

    loop {
        let page = service.playlist_page( playlist_id, offset ).await?;
        let fetched = page.items.len();
        total_items += fetched;

        uris.extend( page.items.into_iter().filter_map( valid_uri ) );

        if !page.has_next || fetched == 0 {
            break;
        }
        offset += fetched;
    }

    tracing::info!( "Fetched {} items, {} reorderable tracks", total_items, uris.len() );
    Ok( uris )
}


/// Extracts the URI of an item if it can be reordered.
///
/// Entries with no underlying track, local files, and empty URIs are all
/// dropped.
fn valid_uri( item: PlaylistItem ) -> Option<String> {
    if item.is_local {
        return None;
    }
    item.track_uri.filter( |uri| !uri.is_empty() )
}


#[cfg( test )]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::service::{ Anchor, PlaylistMetadata, PlaylistPage };


    /// Serves a fixed item list in pages of the given size.
    struct PagedService {
        items: Vec<PlaylistItem>,
        page_size: usize,
        requests: Mutex<Vec<usize>>,
    }


    #[async_trait]
    impl PlaylistService for PagedService {
        async fn playlist_metadata( &self, _id: &str ) -> Result<PlaylistMetadata, ServiceError> {
            unimplemented!()
        }


        async fn playlist_page( &self, _id: &str, offset: usize ) -> Result<PlaylistPage, ServiceError> {
            self.requests.lock().unwrap().push( offset );
            let end = ( offset + self.page_size ).min( self.items.len() );
            Ok( PlaylistPage {
                items: self.items[ offset..end ].to_vec(),
                has_next: end < self.items.len(),
            } )
        }


        async fn reorder( &self, _id: &str, _start: usize, _anchor: Anchor ) -> Result<String, ServiceError> {
            unimplemented!()
        }
    }


    fn item( uri: Option<&str>, is_local: bool ) -> PlaylistItem {
        PlaylistItem { track_uri: uri.map( String::from ), is_local }
    }


    #[tokio::test]
    async fn test_filters_missing_local_and_empty() {
        let service = PagedService {
            items: vec![
                item( None, false ),
                item( Some( "x" ), false ),
                item( Some( "" ), false ),
                item( Some( "y" ), true ),
            ],
            page_size: 10,
            requests: Mutex::new( Vec::new() ),
        };

        let uris = fetch_track_uris( &service, "p" ).await.unwrap();
        assert_eq!( uris, vec![ "x".to_string() ] );
    }


    #[tokio::test]
    async fn test_pages_until_exhausted() {
        let items: Vec<PlaylistItem> = ( 0..7 )
            .map( |i| PlaylistItem { track_uri: Some( format!( "uri:{}", i ) ), is_local: false } )
            .collect();
        let service = PagedService {
            items,
            page_size: 3,
            requests: Mutex::new( Vec::new() ),
        };

        let uris = fetch_track_uris( &service, "p" ).await.unwrap();
        assert_eq!( uris.len(), 7 );
        assert_eq!( uris[0], "uri:0" );
        assert_eq!( uris[6], "uri:6" );
        assert_eq!( *service.requests.lock().unwrap(), vec![ 0, 3, 6 ] );
    }


    #[tokio::test]
    async fn test_empty_playlist() {
        let service = PagedService {
            items: Vec::new(),
            page_size: 3,
            requests: Mutex::new( Vec::new() ),
        };

        let uris = fetch_track_uris( &service, "p" ).await.unwrap();
        assert!( uris.is_empty() );
    }


    /// Always fails; fetch must surface the error untouched.
    struct FailingService;


    #[async_trait]
    impl PlaylistService for FailingService {
        async fn playlist_metadata( &self, _id: &str ) -> Result<PlaylistMetadata, ServiceError> {
            unimplemented!()
        }


        async fn playlist_page( &self, _id: &str, _offset: usize ) -> Result<PlaylistPage, ServiceError> {
            Err( ServiceError::Fetch( "boom".into() ) )
        }


        async fn reorder( &self, _id: &str, _start: usize, _anchor: Anchor ) -> Result<String, ServiceError> {
            unimplemented!()
        }
    }


    #[tokio::test]
    async fn test_fetch_error_propagates() {
        let result = fetch_track_uris( &FailingService, "p" ).await;
        assert!( matches!( result, Err( ServiceError::Fetch( _ ) ) ) );
    }
}

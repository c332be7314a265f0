//! Spotify Web API client
//!
//! Implements the core `PlaylistService` trait on top of rspotify's
//! authorization-code client, with a cached token so repeat runs skip the
//! browser round trip.

use async_trait::async_trait;
use rspotify::model::{ PlayableItem, PlaylistId };
use rspotify::prelude::*;
use rspotify::{ scopes, AuthCodeSpotify, ClientError, Credentials, OAuth };

use riffle_core::service::{
    Anchor, PlaylistItem, PlaylistMetadata, PlaylistPage, PlaylistService, ServiceError,
};

use crate::config::Config;


/// rspotify-backed playlist service.
pub struct SpotifyService {
    client: AuthCodeSpotify,
    page_size: u32,
}


impl SpotifyService {
    /// Authenticates and returns a ready client.
    ///
    /// Runs the authorization-code flow: opens the authorize URL, waits for
    /// the pasted redirect, caches the token at the configured path, then
    /// verifies the session with a current-user call.
    pub async fn connect( config: &Config ) -> Result<Self, ServiceError> {
        let creds = Credentials::new( &config.client_id, &config.client_secret );
        let oauth = OAuth {
            redirect_uri: config.redirect_uri.clone(),
            scopes: scopes!(
                "playlist-read-private",
                "playlist-read-collaborative",
                "playlist-modify-private",
                "playlist-modify-public"
            ),
            ..Default::default()
        };
        let rspotify_config = rspotify::Config {
            token_cached: true,
            cache_path: config.cache_path.clone(),
            ..Default::default()
        };

        let client = AuthCodeSpotify::with_config( creds, oauth, rspotify_config );

        let url = client.get_authorize_url( false ).map_err( auth_error )?;
        client.prompt_for_token( &url ).await.map_err( auth_error )?;

        // Smoke-test the session before touching any playlist.
        client.current_user().await.map_err( auth_error )?;

        tracing::info!( "Spotify session established" );
        Ok( Self { client, page_size: config.batch_size } )
    }


    fn playlist_id<'a>( &self, playlist_id: &'a str ) -> Result<PlaylistId<'a>, ServiceError> {
        PlaylistId::from_id( playlist_id )
            .map_err( |e| ServiceError::NotFound( format!( "{}: {}", playlist_id, e ) ) )
    }
}


#[async_trait]
impl PlaylistService for SpotifyService {
    async fn playlist_metadata( &self, playlist_id: &str ) -> Result<PlaylistMetadata, ServiceError> {
        let id = self.playlist_id( playlist_id )?;
        let playlist = self.client
            .playlist( id, None, None )
            .await
            .map_err( fetch_error )?;

        Ok( PlaylistMetadata {
            name: playlist.name,
            owner: playlist.owner.display_name
                .unwrap_or_else( || playlist.owner.id.to_string() ),
            public: playlist.public,
            external_url: playlist.external_urls.get( "spotify" ).cloned(),
        } )
    }


    async fn playlist_page( &self, playlist_id: &str, offset: usize ) -> Result<PlaylistPage, ServiceError> {
        let id = self.playlist_id( playlist_id )?;
        let page = self.client
            .playlist_items_manual(
                id,
                None,
                None,
                Some( self.page_size ),
                Some( offset as u32 ),
            )
            .await
            .map_err( fetch_error )?;

        let has_next = page.next.is_some();
        let items = page.items
            .into_iter()
            .map( |item| PlaylistItem {
                track_uri: item.track.as_ref().and_then( playable_uri ),
                is_local: item.is_local,
            } )
            .collect();

        Ok( PlaylistPage { items, has_next } )
    }


    async fn reorder(
        &self,
        playlist_id: &str,
        range_start: usize,
        anchor: Anchor,
    ) -> Result<String, ServiceError> {
        let id = self.playlist_id( playlist_id )?;

        // The endpoint only knows insert_before; "after i" is "before i + 1".
        let insert_before = match anchor {
            Anchor::Before( i ) => i,
            Anchor::After( i ) => i + 1,
        };

        let result = self.client
            .playlist_reorder_items(
                id,
                Some( range_start as i32 ),
                Some( insert_before as i32 ),
                Some( 1 ),
                None,
            )
            .await
            .map_err( |e| ServiceError::Reorder( e.to_string() ) )?;

        Ok( result.snapshot_id )
    }
}


/// URI of a playable item, if it has one. Local files report no id.
fn playable_uri( item: &PlayableItem ) -> Option<String> {
    match item {
        PlayableItem::Track( track ) => track.id.as_ref().map( |id| id.uri() ),
        PlayableItem::Episode( episode ) => Some( episode.id.uri() ),
    }
}


fn auth_error( e: ClientError ) -> ServiceError {
    ServiceError::Auth( e.to_string() )
}


fn fetch_error( e: ClientError ) -> ServiceError {
    ServiceError::Fetch( e.to_string() )
}

//! Interactive prompts and user input parsing.

use std::collections::hash_map::DefaultHasher;
use std::hash::{ Hash, Hasher };

use anyhow::Result;
use dialoguer::{ Confirm, Input };


/// Extracts a playlist ID from a share URL or a bare ID.
///
/// Accepts `https://open.spotify.com/playlist/<id>?si=...` style URLs as
/// well as the raw ID. Returns None for anything that does not reduce to a
/// plain alphanumeric ID.
pub fn extract_playlist_id( input: &str ) -> Option<String> {
    let s = input.trim();

    let id = match s.find( "playlist/" ) {
        Some( pos ) => {
            let rest = &s[ pos + "playlist/".len().. ];
            rest.split( [ '?', '/' ] ).next().unwrap_or( "" )
        }
        None => s,
    };

    if !id.is_empty() && id.chars().all( |c| c.is_ascii_alphanumeric() ) {
        Some( id.to_string() )
    } else {
        None
    }
}


/// Parses a seed string: integers are used as-is, anything else non-empty
/// is hashed to a stable u64. Empty input means no seed.
pub fn parse_seed( input: &str ) -> Option<u64> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok( n ) = s.parse::<u64>() {
        return Some( n );
    }

    // DefaultHasher with default keys is stable across runs.
    let mut hasher = DefaultHasher::new();
    s.hash( &mut hasher );
    Some( hasher.finish() )
}


/// Prompts for a playlist URL or ID.
pub fn prompt_playlist() -> Result<String> {
    let value = Input::<String>::new()
        .with_prompt( "Playlist URL or ID" )
        .interact_text()?;
    Ok( value )
}


/// Prompts for an optional seed; Enter leaves the shuffle unseeded.
pub fn prompt_seed() -> Result<String> {
    let value = Input::<String>::new()
        .with_prompt( "Seed (Enter for random)" )
        .allow_empty( true )
        .interact_text()?;
    Ok( value )
}


/// Asks a yes/no question, defaulting to no.
pub fn confirm( prompt: &str ) -> Result<bool> {
    let answer = Confirm::new()
        .with_prompt( prompt )
        .default( false )
        .interact()?;
    Ok( answer )
}


#[cfg( test )]
mod tests {
    use super::*;


    #[test]
    fn test_extract_from_url() {
        let id = extract_playlist_id( "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc123" );
        assert_eq!( id.as_deref(), Some( "37i9dQZF1DXcBWIGoYBM5M" ) );
    }


    #[test]
    fn test_extract_from_url_with_trailing_slash() {
        let id = extract_playlist_id( "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M/" );
        assert_eq!( id.as_deref(), Some( "37i9dQZF1DXcBWIGoYBM5M" ) );
    }


    #[test]
    fn test_extract_bare_id() {
        let id = extract_playlist_id( "  37i9dQZF1DXcBWIGoYBM5M  " );
        assert_eq!( id.as_deref(), Some( "37i9dQZF1DXcBWIGoYBM5M" ) );
    }


    #[test]
    fn test_extract_rejects_junk() {
        assert_eq!( extract_playlist_id( "" ), None );
        assert_eq!( extract_playlist_id( "https://open.spotify.com/playlist/" ), None );
        assert_eq!( extract_playlist_id( "not a playlist!" ), None );
    }


    #[test]
    fn test_seed_integer() {
        assert_eq!( parse_seed( "12345" ), Some( 12345 ) );
    }


    #[test]
    fn test_seed_empty_is_none() {
        assert_eq!( parse_seed( "" ), None );
        assert_eq!( parse_seed( "   " ), None );
    }


    #[test]
    fn test_seed_string_is_stable() {
        let a = parse_seed( "my lucky seed" );
        let b = parse_seed( "my lucky seed" );
        assert!( a.is_some() );
        assert_eq!( a, b );
        assert_ne!( a, parse_seed( "another seed" ) );
    }
}

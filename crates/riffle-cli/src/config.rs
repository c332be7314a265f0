//! Environment configuration
//!
//! Credentials and tuning come from the environment (or a `.env` file
//! loaded in main). Only the client id and secret are required; everything
//! else has a documented default.

use std::env;
use std::path::PathBuf;

use thiserror::Error;


/// Default OAuth redirect URI.
const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";

/// Default token cache file, relative to the working directory.
const DEFAULT_CACHE_PATH: &str = ".spotify_token_cache";

/// Default page size for playlist item fetches. The API caps pages at 100.
const DEFAULT_BATCH_SIZE: u32 = 100;


/// Errors raised while reading configuration.
#[derive( Debug, Error )]
pub enum ConfigError {
    #[error( "missing required environment variable {0}" )]
    Missing( &'static str ),

    #[error( "invalid value for {0}: {1}" )]
    Invalid( &'static str, String ),
}


/// Runtime configuration.
#[derive( Debug, Clone )]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub cache_path: PathBuf,
    pub batch_size: u32,
}


impl Config {
    /// Builds configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok( Self {
            client_id: required( "RSPOTIFY_CLIENT_ID" )?,
            client_secret: required( "RSPOTIFY_CLIENT_SECRET" )?,
            redirect_uri: env::var( "RSPOTIFY_REDIRECT_URI" )
                .unwrap_or_else( |_| DEFAULT_REDIRECT_URI.to_string() ),
            cache_path: env::var( "RIFFLE_CACHE_PATH" )
                .map( PathBuf::from )
                .unwrap_or_else( |_| PathBuf::from( DEFAULT_CACHE_PATH ) ),
            batch_size: parse_batch_size( env::var( "RIFFLE_BATCH_SIZE" ).ok() )?,
        } )
    }
}


fn required( name: &'static str ) -> Result<String, ConfigError> {
    match env::var( name ) {
        Ok( value ) if !value.trim().is_empty() => Ok( value ),
        _ => Err( ConfigError::Missing( name ) ),
    }
}


/// Parses the batch size, enforcing the API's 1..=100 page limit.
fn parse_batch_size( raw: Option<String> ) -> Result<u32, ConfigError> {
    let Some( raw ) = raw else {
        return Ok( DEFAULT_BATCH_SIZE );
    };

    match raw.trim().parse::<u32>() {
        Ok( n ) if ( 1..=100 ).contains( &n ) => Ok( n ),
        _ => Err( ConfigError::Invalid( "RIFFLE_BATCH_SIZE", raw ) ),
    }
}


#[cfg( test )]
mod tests {
    use super::*;


    #[test]
    fn test_batch_size_default() {
        assert_eq!( parse_batch_size( None ).unwrap(), 100 );
    }


    #[test]
    fn test_batch_size_valid() {
        assert_eq!( parse_batch_size( Some( "50".into() ) ).unwrap(), 50 );
        assert_eq!( parse_batch_size( Some( " 1 ".into() ) ).unwrap(), 1 );
    }


    #[test]
    fn test_batch_size_rejects_out_of_range() {
        assert!( parse_batch_size( Some( "0".into() ) ).is_err() );
        assert!( parse_batch_size( Some( "101".into() ) ).is_err() );
        assert!( parse_batch_size( Some( "lots".into() ) ).is_err() );
    }
}

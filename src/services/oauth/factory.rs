/// Factory: build `Authenticator` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::oauth::{Authenticator, HttpAccessTokenClient, LookupError};

pub fn build_authenticator(config: &Config) -> Result<Arc<Authenticator>, LookupError> {
    let client = HttpAccessTokenClient::new(&config.oauth())?;

    Ok(Arc::new(Authenticator::new(Arc::new(client))))
}

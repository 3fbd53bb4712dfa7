pub mod build;
pub mod project;

use crate::error::Result;
use crate::settings::Settings;

pub struct Client<'a> {
    pub http_client: crate::core::client::Client<'a>,
    settings: &'a Settings,
}

impl<'a> Client<'a> {
    pub fn new(settings: &'a Settings) -> Result<Self> {
        Ok(Self {
            http_client: crate::core::client::Client::new(settings)?,
            settings,
        })
    }
}

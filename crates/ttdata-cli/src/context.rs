use ttdata_client::Client;

use crate::config::Config;

/// The configuration and API session shared by every scenario of one run.
pub struct CliContext {
    config: Config,
    client: Client,
}

impl CliContext {
    pub fn new(config: Config) -> Self {
        let client = Client::new(config.api_endpoint.clone());
        Self { config, client }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn device_id(&self) -> &str {
        &self.config.device_id
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut Client {
        &mut self.client
    }

    /// Split borrow for scenarios that register and need the device id.
    pub fn session(&mut self) -> (&mut Client, &str) {
        (&mut self.client, &self.config.device_id)
    }
}

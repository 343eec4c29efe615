pub mod business;
pub mod geocode;
pub mod history;
pub mod listings;

mod error;

pub use error::{Error, Result};

use std::time::Duration;

use reqwest::Client;

pub(crate) fn client(timeout_ms: u64) -> Result<Client> {
	Ok(Client::builder().timeout(Duration::from_millis(timeout_ms)).build()?)
}

use std::sync::Arc;

use souq_engine::{Engine, Providers};

#[derive(Clone)]
pub struct AppState {
	pub engine: Arc<Engine>,
}
impl AppState {
	pub fn new(config: souq_config::Config) -> Self {
		Self { engine: Arc::new(Engine::new(config)) }
	}

	pub fn with_providers(config: souq_config::Config, providers: Providers) -> Self {
		Self { engine: Arc::new(Engine::with_providers(config, providers)) }
	}
}

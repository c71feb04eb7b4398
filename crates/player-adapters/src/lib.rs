//! Errant Dreams player infrastructure adapters.

pub mod infrastructure;

pub use infrastructure::config::ClientConfig;
pub use infrastructure::console::{ConsoleNotifier, ShellNavigator};
pub use infrastructure::http_client::HttpCharacterApi;
pub use infrastructure::storage::FileStorageProvider;

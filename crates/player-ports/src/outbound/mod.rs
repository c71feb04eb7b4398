//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to talk to the creation API, local storage and
//! the presentation shell without depending on concrete implementations.

pub mod character_api_port;
pub mod platform;
pub mod presentation_port;

pub use character_api_port::{ApiError, CharacterApiPort, Credential};
pub use platform::{storage_keys, StorageProvider};
pub use presentation_port::{Destination, NavigationPort, Notice, NoticeLevel, NotificationPort};

#[cfg(any(test, feature = "testing"))]
pub use character_api_port::MockCharacterApiPort;
#[cfg(any(test, feature = "testing"))]
pub use platform::MockStorageProvider;
#[cfg(any(test, feature = "testing"))]
pub use presentation_port::{MockNavigationPort, MockNotificationPort};

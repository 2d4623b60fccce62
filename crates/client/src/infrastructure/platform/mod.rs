//! Platform adapters - storage and connectivity implementations.

mod connectivity;
mod desktop;
mod memory;

pub use connectivity::{AlwaysOnline, SharedConnectivity};
pub use desktop::DesktopStorageProvider;
pub use memory::MemoryStorageProvider;

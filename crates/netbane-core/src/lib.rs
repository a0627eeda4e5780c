// netbane-core: The fact pipeline between the CLI transport and consumers.
//
// Raw per-vendor command output is staged, parsed into vendor-shaped
// records, normalized onto a canonical fact schema by a pluggable vendor
// driver, collated across sources, and cached per fact class.

pub mod config;
pub mod device;
pub mod driver;
pub mod error;
pub mod model;
pub mod platform;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::DeviceConfig;
pub use device::{DeviceSession, Parsers};
pub use driver::VendorDriver;
pub use error::CoreError;
pub use platform::Platform;
pub use store::FactClass;

// Re-export model types at the crate root for ergonomics.
pub use model::{InterfaceFacts, SystemFacts, VlanFacts};

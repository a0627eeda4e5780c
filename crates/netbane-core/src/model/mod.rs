// ── Canonical fact schema ──
//
// Every type here is the vendor-neutral representation of one fact class.
// The struct itself is the canonical template: all fields are `Option` and
// serialize as explicit nulls, so a returned mapping always carries the
// full canonical key set even when the vendor data lacked a field. Vendor
// keys cannot leak past normalization -- there is nowhere to put them.
//
// Collation is deep-copy-and-overlay: start from `Default` (the empty
// template) and `overlay` each source in a fixed order; a later source
// wins wherever it supplied a value.

pub mod interface;
pub mod system;
pub mod vlan;

pub use interface::InterfaceFacts;
pub use system::SystemFacts;
pub use vlan::VlanFacts;

//! File format handlers for the client data tables and server datapack

pub mod block;
pub mod icon;
pub mod xml;

pub use block::{BlockKind, BlockRecord, RecordKey};
pub use icon::{IconContext, icon_asset_url, resolve_icon, resolve_icon_token};

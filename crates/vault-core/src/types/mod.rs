//! Shared value types.

pub mod asset;
pub mod session;

pub use asset::{AssetContent, is_valid_asset_name};
pub use session::SessionRecord;

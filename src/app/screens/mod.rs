//! TUI screen components
//!
//! One module per application state plus the shared widgets they draw with.

pub mod board;
pub mod categories;
pub mod common;
pub mod entry;
pub mod landing;
pub mod teams;
pub mod upload;

pub use board::{BoardAction, BoardScreen};
pub use categories::{CategoryAction, CategorySetupScreen};
pub use entry::{EntryAction, ManualEntryScreen};
pub use landing::{LandingItem, LandingScreen};
pub use teams::{TeamAction, TeamSetupScreen};
pub use upload::{UploadAction, UploadScreen};

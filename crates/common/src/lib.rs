//! Cross-cutting helpers shared by every crate in the workspace.

pub mod pagination;
pub mod utils;

//! HTTP request handlers.

pub mod content;
pub mod metadata;
pub mod publish;

pub use content::*;
pub use metadata::*;
pub use publish::*;

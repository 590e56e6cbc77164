pub mod import;

pub use import::{GlobalArgs, ImportCommand};

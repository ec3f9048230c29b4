pub mod flatten_folders;

pub use flatten_folders::{flatten_folders, FlattenOptions, FlattenOutcome};

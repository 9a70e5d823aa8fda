/// Folder batch command.
pub mod batch;
/// Directory entry listing command.
pub mod entries;
/// Single-file extraction command.
pub mod extract;
/// File-level information command.
pub mod info;
mod util;

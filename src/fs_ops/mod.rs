//! Filesystem operations: modularized.

mod atomic;
mod copy;
mod file_move;
mod helpers;
mod io_copy;
mod metadata;
mod naming;
mod resolve;
mod util;
mod walk;

pub use copy::safe_copy_and_rename;
pub use file_move::{check_move, move_file, MoveMethod, MoveOptions};
pub use helpers::io_error_with_help;
pub use metadata::preserve_metadata;
pub use naming::{counter_name, split_name, timestamp_counter_name, timestamp_name, timestamp_now, TIMESTAMP_FORMAT};
pub use resolve::{Resolution, Resolver, SkipReason};
pub use walk::{WalkEvent, Walker};

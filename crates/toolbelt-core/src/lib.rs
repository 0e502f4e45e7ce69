#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::return_self_not_must_use)]

pub mod bytes;
pub mod config;
pub mod email;
pub mod error;
pub mod file;
pub mod ip;
pub mod paths;
pub mod range;
pub mod text;
pub mod unix_time;
pub mod validation;
pub mod version;

pub use config::Config;
pub use email::Email;
pub use error::{Error, Result};
pub use file::{
    append_file, read_all_lines, read_file, read_file_with_chunk_size, write_bytes,
    write_seekable_stream, write_stream, write_text, AppendToFileProcessor, CancellationToken,
    ChunkProcessor, CollectProcessor, HashProcessor, TextEncoding, DEFAULT_CHUNK_SIZE,
};
pub use range::DateTimeRange;
pub use validation::ValidationError;
pub use version::VERSION;

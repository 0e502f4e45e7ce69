#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)]

mod commands;
mod logging;

use clap::Parser;
use miette::Result;
use std::path::PathBuf;
use toolbelt_core::{Config, TextEncoding, DEFAULT_CHUNK_SIZE};

#[derive(Parser, Debug)]
#[command(name = "toolbelt")]
#[command(author, version, about = "Small byte, text, date, email, IP and file helpers", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (one object per command on stdout)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory used to resolve relative paths
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    /// Chunk size in bytes for streaming reads
    #[arg(long, global = true, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Text encoding for reading and writing files (utf-8, utf-16le, utf-16be, latin1)
    #[arg(long, global = true, default_value = "utf-8", env = "TOOLBELT_ENCODING")]
    encoding: TextEncoding,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Decode a hex string into bytes
    Hex {
        /// Hex digits, two per byte (case-insensitive)
        hex: String,
    },

    /// Validate an email address
    Email {
        /// Address to validate
        address: String,
    },

    /// Convert between dotted IPv4 addresses and integers
    Ip {
        #[command(subcommand)]
        ip_cmd: IpCommands,
    },

    /// Validate a date/time range
    Range {
        /// Start of the range
        start: String,

        /// End of the range
        end: String,

        /// Accepted chrono format patterns, tried in order
        #[arg(short, long = "format", value_name = "PATTERN", required = true)]
        formats: Vec<String>,

        /// Also print the duration in whole minutes
        #[arg(long)]
        minutes: bool,
    },

    /// Convert between Unix milliseconds and dates
    Time {
        #[command(subcommand)]
        time_cmd: TimeCommands,
    },

    /// String normalization helpers
    Text {
        #[command(subcommand)]
        text_cmd: TextCommands,
    },

    /// File name and size helpers
    File {
        #[command(subcommand)]
        file_cmd: FileCommands,
    },

    /// Stream a file in chunks, reporting progress on stderr
    Read {
        /// File to read
        path: PathBuf,

        /// Print the BLAKE3 digest of the content
        #[arg(long, conflicts_with = "out")]
        hash: bool,

        /// Append the decoded content to this file instead of printing it
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Append text or another file's content to a file
    Append {
        /// File to append to (created if missing)
        path: PathBuf,

        /// Text to append
        #[arg(long, conflicts_with = "from", required_unless_present = "from")]
        text: Option<String>,

        /// Copy the raw bytes of this file
        #[arg(long, value_name = "PATH")]
        from: Option<PathBuf>,
    },
}

#[derive(clap::Subcommand, Debug)]
enum IpCommands {
    /// Dotted-quad address to integer (network byte order)
    ToInt {
        /// IPv4 address, e.g. 192.168.1.1
        address: String,
    },

    /// Integer to dotted-quad address
    FromInt {
        /// Unsigned 32-bit value
        value: u32,
    },
}

#[derive(clap::Subcommand, Debug)]
enum TimeCommands {
    /// Unix milliseconds to an RFC 3339 UTC date
    ToDate {
        /// Milliseconds since the Unix epoch (fractions allowed)
        #[arg(allow_negative_numbers = true)]
        millis: f64,
    },

    /// RFC 3339 date to Unix milliseconds
    FromDate {
        /// Date such as 2024-01-01T00:00:00Z
        date: String,
    },
}

#[derive(clap::Subcommand, Debug)]
enum TextCommands {
    /// Remove accents and other combining marks
    StripDiacritics {
        /// Input text
        input: String,
    },

    /// Upper-case the first character
    Capitalize {
        /// Input text
        input: String,
    },
}

#[derive(clap::Subcommand, Debug)]
enum FileCommands {
    /// Remove characters that are not allowed in file names
    Sanitize {
        /// Candidate file name
        name: String,
    },

    /// Print a file's size with a unit suffix
    Size {
        /// File to measure
        path: PathBuf,
    },

    /// Print (and create) a folder inside the toolbelt data directory
    AppDir {
        /// Folder name; omit for the data directory itself
        folder: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    // Build config
    let config = Config::new(cwd.clone())
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json)
        .with_chunk_size(cli.chunk_size)
        .with_encoding(cli.encoding);

    // Logs go to stderr, so JSON output on stdout stays clean
    logging::init(config.verbosity, config.json_logs);

    match cli.command {
        Some(Commands::Version) | None => commands::version::run(cli.json),
        Some(Commands::Hex { hex }) => commands::convert::hex(&hex, cli.json),
        Some(Commands::Email { address }) => commands::email::run(&address, cli.json),
        Some(Commands::Ip { ip_cmd }) => match ip_cmd {
            IpCommands::ToInt { address } => commands::convert::ip_to_int(&address, cli.json),
            IpCommands::FromInt { value } => commands::convert::ip_from_int(value, cli.json),
        },
        Some(Commands::Range {
            start,
            end,
            formats,
            minutes,
        }) => commands::range::run(&start, &end, &formats, minutes, cli.json),
        Some(Commands::Time { time_cmd }) => match time_cmd {
            TimeCommands::ToDate { millis } => commands::convert::time_to_date(millis, cli.json),
            TimeCommands::FromDate { date } => commands::convert::time_from_date(&date, cli.json),
        },
        Some(Commands::Text { text_cmd }) => match text_cmd {
            TextCommands::StripDiacritics { input } => {
                commands::text::strip_diacritics(&input, cli.json)
            }
            TextCommands::Capitalize { input } => commands::text::capitalize(&input, cli.json),
        },
        Some(Commands::File { file_cmd }) => match file_cmd {
            FileCommands::Sanitize { name } => commands::file::sanitize(&name, cli.json),
            FileCommands::Size { path } => commands::file::size(&config.resolve(&path), cli.json),
            FileCommands::AppDir { folder } => {
                commands::file::app_dir(folder.as_deref().unwrap_or_default(), cli.json)
            }
        },
        Some(Commands::Read { path, hash, out }) => {
            let span = tracing::info_span!("read", cmd = "read", cwd = %cwd.display());
            let _guard = span.enter();
            let mode = match (hash, out) {
                (true, _) => commands::read::Mode::Hash,
                (false, Some(out)) => commands::read::Mode::AppendTo(config.resolve(&out)),
                (false, None) => commands::read::Mode::Print,
            };
            commands::read::run(&config, &config.resolve(&path), mode, cli.json)
        }
        Some(Commands::Append { path, text, from }) => {
            let span = tracing::info_span!("append", cmd = "append", cwd = %cwd.display());
            let _guard = span.enter();
            let source = match (text, from) {
                (Some(text), _) => commands::append::Source::Text(text),
                (None, Some(from)) => commands::append::Source::File(config.resolve(&from)),
                (None, None) => return Err(miette::miette!("either --text or --from is required")),
            };
            commands::append::run(&config, &config.resolve(&path), source, cli.json)
        }
    }
}

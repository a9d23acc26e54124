use clap::{ArgAction, Parser};

use log::{error, LevelFilter};
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::fs;
use std::io::{Read, Write};
use std::{path::Path, sync::mpsc::channel, time::Duration};
use tempfile::NamedTempFile;

use crate::errors::{Error, Result};
use crate::{split_str, SplitConfig, SplitReport};

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about=None)] // Read from Cargo.toml
struct Arguments {
    /// File to process ('-' for stdin)
    #[arg(default_value = "-")]
    file: String,

    /// Target output file ('-' for stdout)
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Watch file for changes; update output on change. (FILE must be given)
    #[arg(short, long, requires = "file")]
    watch: bool,

    /// Attribute holding path data; may be repeated
    ///
    /// Defaults to 'android:pathData' and 'd'. Where an element has several,
    /// the first in the element is used.
    #[arg(short, long = "attribute", value_name = "NAME")]
    attributes: Vec<String>,

    /// Element name to split; may be repeated (default 'path')
    #[arg(short, long = "element", value_name = "NAME")]
    elements: Vec<String>,

    /// Fail without writing output if any path data is invalid
    #[arg(long)]
    strict: bool,

    /// Increase logging verbosity; may be repeated
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Top-level configuration used by the `pathsplit` command-line process.
///
/// This is typically derived from command line arguments and passed to `run()`.
///
/// 'front-end' program settings (e.g. input/output filenames, whether to continually
/// process input on change, etc) are stored directly in this struct. Per-document
/// settings are stored in the embedded `SplitConfig` struct.
#[derive(Clone, Debug)]
pub struct Config {
    /// Path to input file, or '-' for stdin
    pub input_path: String,
    /// Path to output file, or '-' for stdout
    pub output_path: String,
    /// Stay monitoring `input_path` for changes (Requires input_path is not stdin)
    pub watch: bool,
    /// Treat invalid path data as an error rather than leaving the element unchanged
    pub strict: bool,
    /// Number of `-v` flags given
    pub verbose: u8,
    /// split config options
    pub split: SplitConfig,
}

impl Config {
    fn from_args(args: Arguments) -> Result<Self> {
        if args.watch && args.file == "-" {
            // Should already be enforced by clap validation
            return Err(Error::Cli(
                "A non-stdin file must be provided with -w/--watch argument".into(),
            ));
        }
        if args.file != "-" && args.output != "-" {
            let in_path = Path::new(&args.file);
            let out_path = Path::new(&args.output);
            if out_path.exists()
                && out_path.canonicalize().map_err(Error::from_err)?
                    == in_path.canonicalize().map_err(Error::from_err)?
            {
                return Err(Error::Cli(
                    "Output path must not refer to the same file as the input file.".into(),
                ));
            }
        }

        let mut split = SplitConfig::default();
        if !args.elements.is_empty() {
            split.elements = args.elements;
        }
        if !args.attributes.is_empty() {
            split.attributes = args.attributes;
        }
        Ok(Self {
            input_path: args.file,
            output_path: args.output,
            watch: args.watch,
            strict: args.strict,
            verbose: args.verbose,
            split,
        })
    }

    /// Create a `Config` object set up given a command line string.
    ///
    /// The string is parsed using `shlex::split()`, so values containing
    /// spaces or quotes should be quoted or escaped appropriately.
    pub fn from_cmdline(args: &str) -> Result<Self> {
        let args = shlex::split(args).unwrap_or_default();
        let args = Arguments::try_parse_from(args.iter()).map_err(Error::from_err)?;
        Self::from_args(args)
    }
}

/// Create a `Config` object from process arguments.
pub fn get_config() -> Result<Config> {
    let args = Arguments::parse();
    Config::from_args(args)
}

/// Set up logging to stderr; `RUST_LOG` takes precedence over `verbose`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // May already be initialised, e.g. when run() is called repeatedly
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

/// Split the document at `input`, writing the result to `output`.
///
/// Either may be '-' for stdin / stdout respectively. If nothing is split
/// the input is copied to the output unchanged. With `strict`, invalid path
/// data in any element is an error and no output is written.
pub fn split_file(
    input: &str,
    output: &str,
    cfg: &SplitConfig,
    strict: bool,
) -> Result<SplitReport> {
    let text = if input == "-" {
        let mut text = String::new();
        std::io::stdin().lock().read_to_string(&mut text)?;
        text
    } else {
        fs::read_to_string(input)?
    };

    let report = split_str(&text, cfg)?;
    if strict {
        if let Some(failure) = report.failures().next() {
            return Err(failure.into());
        }
    }

    let result = report.output.as_deref().unwrap_or(&text);
    if output == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(result.as_bytes())?;
        stdout.flush()?;
    } else {
        let mut out_temp = NamedTempFile::new()?;
        out_temp.write_all(result.as_bytes())?;
        out_temp.flush()?;
        // Copy content rather than rename (by .persist()) since this
        // could cross filesystems; some apps (e.g. eog) also fail to
        // react to 'moved-over' files.
        fs::copy(out_temp.path(), output)?;
    }

    Ok(report)
}

/// Run the `pathsplit` program with a given `Config`.
pub fn run(config: Config) -> Result<()> {
    init_logging(config.verbose);

    if !config.watch {
        split_file(
            &config.input_path,
            &config.output_path,
            &config.split,
            config.strict,
        )?;
    } else if config.input_path != "-" {
        let watch = config.input_path;
        let (tx, rx) = channel();
        let mut watcher = new_debouncer(Duration::from_millis(250), tx).map_err(Error::from_err)?;
        let watch_path = Path::new(&watch);
        watcher
            .watcher()
            .watch(watch_path, RecursiveMode::NonRecursive)
            .map_err(Error::from_err)?;
        split_file(&watch, &config.output_path, &config.split, config.strict)
            .unwrap_or_else(|e| {
                error!("split failed: {e}");
                Default::default()
            });
        eprintln!("Watching {watch} for changes");
        loop {
            match rx.recv() {
                Ok(Ok(events)) => {
                    for event in events {
                        if event.path.canonicalize().map_err(Error::Io)?
                            == watch_path.canonicalize().map_err(Error::Io)?
                        {
                            eprintln!("{} changed", event.path.to_string_lossy());
                            split_file(&watch, &config.output_path, &config.split, config.strict)
                                .unwrap_or_else(|e| {
                                    error!("split failed: {e}");
                                    Default::default()
                                });
                        }
                    }
                }
                Ok(Err(e)) => error!("Watch error {e:?}"),
                Err(e) => error!("Channel error: {e:?}"),
            }
        }
    }

    Ok(())
}

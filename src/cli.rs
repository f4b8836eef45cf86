// Command-line front end for the polyline codec.
//
// Subcommands:
//   encode — coordinate text (lat,lng per line) -> one encoded polyline
//   decode — one polyline per line -> coordinate text or JSON
//   config — build/configuration details

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::batch;
use crate::coordinate::{Coordinate, PRECISION};
use crate::io as text_io;
use crate::polyline::decoder::DecodeMode;
use crate::polyline::encoder::Encoder;
use crate::polyline::varint::{CHAR_MAX, CHAR_OFFSET, MAX_VARINT_LEN};

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Encoded polyline encoder/decoder.
#[derive(Parser, Debug)]
#[command(
    name = "polyline",
    version,
    about = "Encoded polyline encoder/decoder",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats (or the `config` report) as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Encode `latitude,longitude` lines into one polyline.
    Encode(IoArgs),
    /// Decode polylines (one per line) into coordinates.
    Decode(DecodeArgs),
    /// Print build/configuration details.
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    /// `latitude,longitude` lines, polylines separated by a blank line.
    #[default]
    Text,
    /// JSON array of polylines, each an array of `[latitude, longitude]`.
    Json,
}

#[derive(Args, Debug)]
struct IoArgs {
    /// Input file (default: stdin).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "input_pos")]
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "output_pos")]
    output: Option<PathBuf>,

    /// Write output to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Check/compute only (do not write output).
    #[arg(long = "check-only")]
    no_output: bool,

    /// Input file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    input_pos: Option<PathBuf>,

    /// Output file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    output_pos: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Fail on truncated or malformed polylines instead of dropping the
    /// incomplete trailing point.
    #[arg(long)]
    strict: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(flatten)]
    io: IoArgs,
}

// ---------------------------------------------------------------------------
// Resolved options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Encode,
    Decode,
    Config,
}

#[derive(Debug)]
struct Options {
    command: Command,
    use_stdout: bool,
    force: bool,
    quiet: bool,
    verbose: u8,
    no_output: bool,
    mode: DecodeMode,
    format: OutputFormat,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    json_output: bool,
}

fn resolve_options(cli: Cli) -> Options {
    let base = Options {
        command: Command::Config,
        use_stdout: false,
        force: cli.force,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        no_output: false,
        mode: DecodeMode::Lenient,
        format: OutputFormat::Text,
        input_file: None,
        output_file: None,
        json_output: cli.json_output,
    };

    match cli.command {
        Cmd::Encode(args) => Options {
            command: Command::Encode,
            use_stdout: args.stdout,
            no_output: args.no_output,
            input_file: args.input.or(args.input_pos),
            output_file: args.output.or(args.output_pos),
            ..base
        },
        Cmd::Decode(args) => Options {
            command: Command::Decode,
            use_stdout: args.io.stdout,
            no_output: args.io.no_output,
            mode: if args.strict {
                DecodeMode::Strict
            } else {
                DecodeMode::Lenient
            },
            format: args.format,
            input_file: args.io.input.or(args.io.input_pos),
            output_file: args.io.output.or(args.io.output_pos),
            ..base
        },
        Cmd::Config => base,
    }
}

fn log_filter(opts: &Options) -> &'static str {
    match (opts.quiet, opts.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        _ => "debug",
    }
}

// ---------------------------------------------------------------------------
// Input/output helpers
// ---------------------------------------------------------------------------

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>, String> {
    match path {
        Some(p) => File::open(p)
            .map(|f| Box::new(BufReader::new(f)) as Box<dyn BufRead>)
            .map_err(|e| format!("input file: {}: {e}", p.display())),
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn open_output(opts: &Options) -> Result<Box<dyn Write>, String> {
    match &opts.output_file {
        Some(p) => {
            if p.exists() && !opts.force {
                return Err(format!(
                    "output file exists, use -f to overwrite: {}",
                    p.display()
                ));
            }
            File::create(p)
                .map(|f| Box::new(BufWriter::new(f)) as Box<dyn Write>)
                .map_err(|e| format!("output file: {}: {e}", p.display()))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

fn print_json_stats(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => eprintln!("{s}"),
        Err(e) => eprintln!("polyline: json stats: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Encode command
// ---------------------------------------------------------------------------

fn cmd_encode(opts: &Options) -> i32 {
    match try_encode(opts) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("polyline: encode: {e}");
            1
        }
    }
}

fn try_encode(opts: &Options) -> Result<(), String> {
    let reader = open_input(opts.input_file.as_deref())?;
    let points = text_io::read_coordinates(reader).map_err(|e| e.to_string())?;

    let mut encoder = Encoder::with_capacity(points.len());
    encoder.extend(&points);
    let point_count = encoder.points();
    let encoded = encoder.finish();

    if !opts.no_output {
        let mut writer = open_output(opts)?;
        writeln!(writer, "{encoded}")
            .and_then(|()| writer.flush())
            .map_err(|e| format!("write: {e}"))?;
    }

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "polyline: encoder: points: {point_count}, encoded size: {}",
            encoded.len()
        );
    }

    if opts.json_output {
        print_json_stats(&serde_json::json!({
            "command": "encode",
            "points": point_count,
            "encoded_size": encoded.len(),
        }));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Decode command
// ---------------------------------------------------------------------------

fn cmd_decode(opts: &Options) -> i32 {
    match try_decode(opts) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("polyline: decode: {e}");
            1
        }
    }
}

fn points_to_json(points: &[Coordinate]) -> serde_json::Value {
    points
        .iter()
        .map(|p| serde_json::json!([p.latitude, p.longitude]))
        .collect()
}

fn try_decode(opts: &Options) -> Result<(), String> {
    let reader = open_input(opts.input_file.as_deref())?;
    let polylines = text_io::read_polylines(reader).map_err(|e| e.to_string())?;
    if polylines.is_empty() {
        return Err("no polylines in input".to_string());
    }

    let texts: Vec<&str> = polylines.iter().map(|(_, text)| text.as_str()).collect();
    let mut tracks = Vec::with_capacity(polylines.len());
    for ((line, _), result) in polylines
        .iter()
        .zip(batch::decode_batch(&texts, opts.mode))
    {
        tracks.push(result.map_err(|e| format!("line {line}: {e}"))?);
    }
    let point_count: usize = tracks.iter().map(Vec::len).sum();

    if !opts.no_output {
        let mut writer = open_output(opts)?;
        let written = match opts.format {
            OutputFormat::Text => tracks.iter().enumerate().try_for_each(|(i, t)| {
                if i > 0 {
                    writeln!(writer)?;
                }
                text_io::write_coordinates(&mut writer, t)
            }),
            OutputFormat::Json => {
                let value: serde_json::Value = tracks.iter().map(|t| points_to_json(t)).collect();
                serde_json::to_writer(&mut writer, &value)
                    .map_err(io::Error::from)
                    .and_then(|()| writeln!(writer))
            }
        };
        written
            .and_then(|()| writer.flush())
            .map_err(|e| format!("write: {e}"))?;
    }

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "polyline: decoder: polylines: {}, points: {point_count}, mode: {:?}",
            tracks.len(),
            opts.mode
        );
    }

    if opts.json_output {
        print_json_stats(&serde_json::json!({
            "command": "decode",
            "polylines": tracks.len(),
            "points": point_count,
            "strict": opts.mode == DecodeMode::Strict,
        }));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Config command
// ---------------------------------------------------------------------------

fn config_json() -> serde_json::Value {
    serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "parallel": cfg!(feature = "parallel"),
        "precision": PRECISION,
        "char_min": CHAR_OFFSET,
        "char_max": CHAR_MAX,
        "max_varint_len": MAX_VARINT_LEN,
    })
}

fn cmd_config(opts: &Options) -> i32 {
    if opts.json_output {
        print_json_stats(&config_json());
        return 0;
    }

    let version = env!("CARGO_PKG_VERSION");
    eprintln!("polyline version {version} (Rust)");

    let parallel = cfg!(feature = "parallel") as u8;
    eprintln!("PARALLEL={parallel}");
    eprintln!("PRECISION={PRECISION}");
    eprintln!("CHAR_RANGE={CHAR_OFFSET}..={CHAR_MAX}");
    eprintln!("MAX_VARINT_LEN={MAX_VARINT_LEN}");

    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let mut opts = resolve_options(cli);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter(&opts)))
        .format_timestamp(None)
        .format_target(false)
        .init();

    // -c overrides an output filename.
    if opts.use_stdout {
        if let Some(path) = opts.output_file.take() {
            if !opts.quiet {
                eprintln!(
                    "polyline: warning: -c option overrides output filename: {}",
                    path.display()
                );
            }
        }
    }

    let exit_code = match opts.command {
        Command::Encode => cmd_encode(&opts),
        Command::Decode => cmd_decode(&opts),
        Command::Config => cmd_config(&opts),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_opts(args: &[&str]) -> Options {
        let argv: Vec<String> = std::iter::once("polyline".to_string())
            .chain(args.iter().map(|s| s.to_string()))
            .collect();
        let cli = Cli::try_parse_from(argv).expect("cli parse failed");
        resolve_options(cli)
    }

    #[test]
    fn encode_subcommand_maps_correctly() {
        let opts = parse_opts(&["encode", "in.txt", "out.polyline"]);
        assert_eq!(opts.command, Command::Encode);
        assert_eq!(opts.input_file, Some(PathBuf::from("in.txt")));
        assert_eq!(opts.output_file, Some(PathBuf::from("out.polyline")));
        assert!(!opts.no_output);
    }

    #[test]
    fn decode_subcommand_maps_correctly() {
        let opts = parse_opts(&[
            "--quiet",
            "decode",
            "--strict",
            "--format",
            "json",
            "--input",
            "in.polyline",
            "--output",
            "out.json",
        ]);
        assert_eq!(opts.command, Command::Decode);
        assert_eq!(opts.mode, DecodeMode::Strict);
        assert_eq!(opts.format, OutputFormat::Json);
        assert!(opts.quiet);
        assert_eq!(opts.input_file, Some(PathBuf::from("in.polyline")));
        assert_eq!(opts.output_file, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn decode_defaults_to_lenient_text() {
        let opts = parse_opts(&["decode"]);
        assert_eq!(opts.mode, DecodeMode::Lenient);
        assert_eq!(opts.format, OutputFormat::Text);
        assert!(opts.input_file.is_none());
        assert!(opts.output_file.is_none());
    }

    #[test]
    fn input_flag_conflicts_with_positional() {
        let argv = ["polyline", "encode", "--input", "a", "b"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn global_stdio_and_force_flags() {
        let opts = parse_opts(&["--force", "encode", "--stdout", "in", "out"]);
        assert!(opts.use_stdout);
        assert!(opts.force);
    }

    #[test]
    fn verbose_is_capped() {
        let opts = parse_opts(&["-v", "-v", "-v", "decode"]);
        assert_eq!(opts.verbose, 2);
        assert_eq!(log_filter(&opts), "debug");
    }

    #[test]
    fn log_filter_follows_verbosity() {
        assert_eq!(log_filter(&parse_opts(&["config"])), "warn");
        assert_eq!(log_filter(&parse_opts(&["-v", "config"])), "info");
        assert_eq!(log_filter(&parse_opts(&["-q", "config"])), "error");
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let argv = ["polyline", "-q", "-v", "config"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn config_command_maps() {
        assert_eq!(parse_opts(&["config"]).command, Command::Config);
    }

    #[test]
    fn config_json_lists_alphabet() {
        let v = config_json();
        assert_eq!(v["char_min"], 63);
        assert_eq!(v["char_max"], 126);
        assert_eq!(v["precision"], 1e5);
        assert_eq!(v["parallel"], cfg!(feature = "parallel"));
    }

    #[test]
    fn json_points_are_pairs() {
        let v = points_to_json(&[Coordinate::new(38.5, -120.2)]);
        assert_eq!(v, serde_json::json!([[38.5, -120.2]]));
    }
}

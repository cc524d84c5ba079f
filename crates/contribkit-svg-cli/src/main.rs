use contribkit_svg::{
    ContribkitConfig, Dimensions, Placement, Sponsor, extract_svg_dimensions, wrap_sponsor_svg,
};
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Config(contribkit_svg::Error),
    Json(serde_json::Error),
    NonFinite(f64),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Config(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::NonFinite(v) => write!(f, "cannot print non-finite dimension {v} as JSON"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<contribkit_svg::Error> for CliError {
    fn from(value: contribkit_svg::Error) -> Self {
        Self::Config(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Command {
    #[default]
    Dimensions,
    Wrap,
    Config,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    preset: bool,
    name: Option<String>,
    url: Option<String>,
    height: f64,
    x: f64,
    y: f64,
    out: Option<String>,
}

fn usage() -> &'static str {
    "contribkit-svg\n\
\n\
USAGE:\n\
  contribkit-svg [dimensions] [--pretty] [<path>|-]\n\
  contribkit-svg wrap --name <sponsor> --url <url> [--height <h>] [--x <x>] [--y <y>] [--out <path>] [<path>|-]\n\
  contribkit-svg config [--pretty] [--preset] [<path>]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - dimensions prints the natural {width, height} of an SVG as JSON.\n\
  - wrap prints a positioned sponsor fragment; without --height the logo keeps its natural size.\n\
  - config reads .json or YAML (or the built-in GitHub contributions preset with --preset),\n\
    fills credentials from CONTRIBKIT_GITHUB_CONTRIBUTIONS_LOGIN/_TOKEN, validates, and prints\n\
    the effective config with the token masked.\n\
  - Set RUST_LOG (e.g. RUST_LOG=debug) to see fallback decisions on stderr.\n\
"
}

fn next_f64<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<f64, CliError> {
    let Some(raw) = it.next() else {
        return Err(CliError::Usage(usage()));
    };
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !v.is_finite() {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "dimensions" => args.command = Command::Dimensions,
            "wrap" => args.command = Command::Wrap,
            "config" => args.command = Command::Config,
            "--pretty" => args.pretty = true,
            "--preset" => args.preset = true,
            "--name" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.name = Some(name.clone());
            }
            "--url" => {
                let Some(url) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.url = Some(url.clone());
            }
            "--height" => args.height = next_f64(&mut it)?,
            "--x" => args.x = next_f64(&mut it)?,
            "--y" => args.y = next_f64(&mut it)?,
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            println!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

/// `serde_json` prints `180.0`; downstream tooling expects JavaScript-style `180`.
#[derive(Serialize)]
struct DimensionsOut {
    width: serde_json::Number,
    height: serde_json::Number,
}

impl DimensionsOut {
    fn from_dimensions(d: Dimensions) -> Result<Self, CliError> {
        Ok(Self {
            width: js_json_number(d.width)?,
            height: js_json_number(d.height)?,
        })
    }
}

fn js_json_number(v: f64) -> Result<serde_json::Number, CliError> {
    if v.fract() == 0.0 && v.abs() < 9_007_199_254_740_992.0 {
        return Ok(serde_json::Number::from(v as i64));
    }
    serde_json::Number::from_f64(v).ok_or(CliError::NonFinite(v))
}

fn run_dimensions(args: &Args) -> Result<(), CliError> {
    let svg = read_input(args.input.as_deref())?;
    let dims = extract_svg_dimensions(&svg);
    write_json(&DimensionsOut::from_dimensions(dims)?, args.pretty)
}

fn run_wrap(args: &Args) -> Result<(), CliError> {
    let (Some(name), Some(url)) = (args.name.as_deref(), args.url.as_deref()) else {
        return Err(CliError::Usage(usage()));
    };
    let svg = read_input(args.input.as_deref())?;
    let natural = extract_svg_dimensions(&svg);
    tracing::debug!(
        sponsor = name,
        width = natural.width,
        height = natural.height,
        "wrapping sponsor logo"
    );
    let fragment = wrap_sponsor_svg(
        &Sponsor::new(name, url),
        &svg,
        natural,
        Placement::new(args.height, args.x, args.y),
    );
    write_text(&fragment, args.out.as_deref())
}

fn run_config(args: &Args) -> Result<(), CliError> {
    let mut cfg = match (args.preset, args.input.as_deref()) {
        (true, None) => ContribkitConfig::github_contributions_preset(),
        (false, Some(path)) if path != "-" => ContribkitConfig::load(path)?,
        (false, _) => ContribkitConfig::from_yaml_str(&read_input(None)?)?,
        (true, Some(_)) => return Err(CliError::Usage(usage())),
    };
    cfg.resolve_credentials(|key| std::env::var(key).ok());
    cfg.validate()?;
    write_json(&cfg.redacted(), args.pretty)
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (e.g. from an embedding test harness) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(argv: Vec<String>) -> Result<(), CliError> {
    let args = parse_args(&argv)?;
    match args.command {
        Command::Dimensions => run_dimensions(&args),
        Command::Wrap => run_wrap(&args),
        Command::Config => run_config(&args),
    }
}

fn main() {
    init_logging();
    let argv = std::env::args().collect::<Vec<_>>();
    match run(argv) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

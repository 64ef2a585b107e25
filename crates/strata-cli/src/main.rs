use serde_json::Value;
use std::io::Read;
use std::str::FromStr;
use strata::{DirectedGraph, PositionedGraph};
use tracing_subscriber::{EnvFilter, prelude::*};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Strata(strata::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Strata(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<strata::Error> for CliError {
    fn from(value: strata::Error) -> Self {
        Self::Strata(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Render,
    Diff,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Svg,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    inputs: Vec<String>,
    format: OutputFormat,
    pretty: bool,
    sized: bool,
    config: Option<String>,
    out: Option<String>,
    out_a: Option<String>,
    out_b: Option<String>,
}

fn usage() -> &'static str {
    "strata\n\
\n\
USAGE:\n\
  strata [render] [--format svg|json] [--pretty] [--size] [--config <file.json>] [--out <path>] [<path>|-]\n\
  strata diff [--format svg|json] [--pretty] [--size] [--config <file.json>] --out-a <path> --out-b <path> <old.dot> <new.dot>\n\
\n\
NOTES:\n\
  - Input is DOT; if <path> is omitted or '-', it is read from stdin.\n\
  - --config takes a partial graph attribute object, e.g. {\"layout\": {\"rank_dir\": \"LR\"}}.\n\
  - --size adds width/height attributes to SVG output.\n\
  - render prints to stdout unless --out is given.\n\
  - diff colors removed elements in the old drawing and added ones in the new drawing.\n\
  - Set STRATA_LOG (e.g. STRATA_LOG=debug) to control diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" if args.inputs.is_empty() => args.command = Command::Render,
            "diff" if args.inputs.is_empty() => args.command = Command::Diff,
            "--pretty" => args.pretty = true,
            "--size" => args.sized = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<OutputFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--out-a" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out_a = Some(out.clone());
            }
            "--out-b" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out_b = Some(out.clone());
            }
            "--" => {
                args.inputs.extend(it.by_ref().cloned());
            }
            "-" => args.inputs.push("-".to_string()),
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => args.inputs.push(path.to_string()),
        }
    }

    let inputs_ok = match args.command {
        Command::Render => args.inputs.len() <= 1,
        Command::Diff => {
            args.inputs.len() == 2 && args.out_a.is_some() && args.out_b.is_some()
        }
    };
    if !inputs_ok {
        return Err(CliError::Usage(usage()));
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

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn load_graph(input: Option<&str>, config: Option<&Value>) -> Result<DirectedGraph, CliError> {
    let text = read_input(input)?;
    let mut g = DirectedGraph::from_dot(&text)?;
    if let Some(config) = config {
        let attrs = g.attrs().merged_with(config)?;
        g.set_attrs(attrs);
    }
    tracing::debug!(
        input = input.unwrap_or("-"),
        vertices = g.vertex_count(),
        edges = g.edge_count(),
        "graph loaded"
    );
    Ok(g)
}

fn serialize(positioned: &PositionedGraph, args: &Args) -> String {
    match args.format {
        OutputFormat::Svg => {
            let svg = positioned.to_svg();
            let svg = if args.sized {
                svg.with_width_and_height()
            } else {
                svg
            };
            format!("{svg}\n")
        }
        OutputFormat::Json => {
            let json = positioned.to_json();
            if args.pretty {
                format!("{}\n", json.to_string_pretty())
            } else {
                format!("{json}\n")
            }
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = match args.config.as_deref() {
        Some(path) => Some(serde_json::from_str::<Value>(&std::fs::read_to_string(path)?)?),
        None => None,
    };

    match args.command {
        Command::Render => {
            let g = load_graph(args.inputs.first().map(String::as_str), config.as_ref())?;
            let positioned = g.try_layout()?;
            write_text(&serialize(&positioned, &args), args.out.as_deref())
        }
        Command::Diff => {
            let mut old = load_graph(Some(&args.inputs[0]), config.as_ref())?;
            let mut new = load_graph(Some(&args.inputs[1]), config.as_ref())?;
            strata::diff(&mut old, &mut new);
            let old_out = serialize(&old.try_layout()?, &args);
            let new_out = serialize(&new.try_layout()?, &args);
            write_text(&old_out, args.out_a.as_deref())?;
            write_text(&new_out, args.out_b.as_deref())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("STRATA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing();

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

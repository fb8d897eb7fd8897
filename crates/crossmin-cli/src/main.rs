use crossmin::{
    CrossMinimizer, EdgelessPolicy, Incidence, SolveOptions, Strategy, TracingReporter,
    WriteReporter,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Document(String),
    Options(serde_json::Error),
    Crossmin(crossmin::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Document(msg) => write!(f, "invalid input document: {msg}"),
            CliError::Options(err) => write!(f, "invalid options: {err}"),
            CliError::Crossmin(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<crossmin::Error> for CliError {
    fn from(value: crossmin::Error) -> Self {
        Self::Crossmin(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Solve,
    Costs,
    Count,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    version: bool,
    input: Option<String>,
    pretty: bool,
    verbose: bool,
    strategy: Option<Strategy>,
    seed: Option<u64>,
    edgeless: Option<EdgelessPolicy>,
    order: Option<Vec<usize>>,
}

/// A matrix cell as it appears in JSON: `true`/`false` or any number.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum Cell {
    Bool(bool),
    Number(f64),
}

impl Incidence for Cell {
    fn is_edge(&self) -> bool {
        match self {
            Cell::Bool(b) => *b,
            Cell::Number(n) => n.is_edge(),
        }
    }
}

#[derive(Serialize)]
struct CostsOut {
    lower: usize,
    upper: usize,
    costs: Vec<Vec<f64>>,
}

#[derive(Serialize)]
struct CountOut<'a> {
    order: &'a [usize],
    crossings: f64,
}

fn usage() -> &'static str {
    "crossmin-cli\n\
\n\
USAGE:\n\
  crossmin-cli [solve] [--strategy <name>] [--seed <n>] [--edgeless last|first|reject] [--pretty] [--verbose] [<path>|-]\n\
  crossmin-cli costs [--pretty] [<path>|-]\n\
  crossmin-cli count --order <i,j,...> [<path>|-]\n\
  crossmin-cli --version\n\
\n\
STRATEGIES:\n\
  barycenter, median, split, split-best-10, binary-lp, try-all (default)\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON matrix (rows are the nodes to order) or {\"matrix\": [...], \"options\": {...}}.\n\
  - Flags override options given in the input document.\n\
  - --verbose prints one line per strategy to stderr; CROSSMIN_LOG sets the log filter.\n\
"
}

fn parse_edgeless(s: &str) -> Option<EdgelessPolicy> {
    match s.trim().to_ascii_lowercase().as_str() {
        "last" => Some(EdgelessPolicy::Last),
        "first" => Some(EdgelessPolicy::First),
        "reject" => Some(EdgelessPolicy::Reject),
        _ => None,
    }
}

fn parse_order(s: &str) -> Option<Vec<usize>> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.trim().parse::<usize>().ok())
        .collect()
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--version" | "-V" => args.version = true,
            "solve" => args.command = Command::Solve,
            "costs" => args.command = Command::Costs,
            "count" => args.command = Command::Count,
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--strategy" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.strategy = Some(name.parse::<Strategy>()?);
            }
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--edgeless" => {
                let Some(policy) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.edgeless = Some(parse_edgeless(policy).ok_or(CliError::Usage(usage()))?);
            }
            "--order" => {
                let Some(order) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.order = Some(parse_order(order).ok_or(CliError::Usage(usage()))?);
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
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
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

/// Splits a bare matrix or a `{"matrix": ..., "options": ...}` document.
fn parse_document(text: &str) -> Result<(Vec<Vec<Cell>>, SolveOptions), CliError> {
    match serde_json::from_str::<Value>(text)? {
        matrix @ Value::Array(_) => Ok((serde_json::from_value(matrix)?, SolveOptions::default())),
        Value::Object(mut doc) => {
            let matrix = doc
                .remove("matrix")
                .ok_or_else(|| CliError::Document("missing \"matrix\"".to_string()))?;
            let options = match doc.remove("options") {
                Some(options) => serde_json::from_value(options).map_err(CliError::Options)?,
                None => SolveOptions::default(),
            };
            if let Some(key) = doc.keys().next() {
                return Err(CliError::Document(format!("unknown field `{key}`")));
            }
            Ok((serde_json::from_value(matrix)?, options))
        }
        _ => Err(CliError::Document(
            "expected a matrix or an object with \"matrix\"".to_string(),
        )),
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

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("CROSSMIN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(args: Args) -> Result<(), CliError> {
    if args.version {
        println!("crossmin-cli {}", crossmin::VERSION);
        return Ok(());
    }

    let text = read_input(args.input.as_deref())?;
    let (matrix, mut options) = parse_document(&text)?;
    if let Some(strategy) = args.strategy {
        options.strategy = strategy;
    }
    if let Some(seed) = args.seed {
        options.seed = Some(seed);
    }
    if let Some(edgeless) = args.edgeless {
        options.edgeless = edgeless;
    }

    let cm = CrossMinimizer::new(&matrix)?;
    tracing::debug!(
        lower = cm.lower_count(),
        upper = cm.upper_count(),
        strategy = %options.strategy,
        "instance loaded"
    );

    match args.command {
        Command::Solve => {
            let solution = if args.verbose {
                let mut reporter = WriteReporter::new(std::io::stderr());
                cm.solve_with_options(&options, &mut reporter)?
            } else {
                cm.solve_with_options(&options, &mut TracingReporter)?
            };
            write_json(&solution, args.pretty)
        }
        Command::Costs => write_json(
            &CostsOut {
                lower: cm.lower_count(),
                upper: cm.upper_count(),
                costs: cm.cost_matrix().to_rows(),
            },
            args.pretty,
        ),
        Command::Count => {
            let Some(order) = args.order.as_deref() else {
                return Err(CliError::Usage(usage()));
            };
            let crossings = cm.cross_count(order)?;
            write_json(&CountOut { order, crossings }, args.pretty)
        }
    }
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(args) {
        match err {
            CliError::Usage(msg) => {
                eprintln!("{msg}");
                std::process::exit(2);
            }
            err @ (CliError::Document(_) | CliError::Options(_)) => {
                eprintln!("{err}");
                std::process::exit(2);
            }
            err => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        }
    }
}

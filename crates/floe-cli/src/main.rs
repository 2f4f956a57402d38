use floe::editor::EditorSession;
use floe::render::SvgRenderOptions;
use floe::{FILE_EXTENSION, FlowsheetDescription};
use futures::executor::block_on;
use serde::Serialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Editor(floe::editor::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Editor(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<floe::editor::Error> for CliError {
    fn from(value: floe::editor::Error) -> Self {
        Self::Editor(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Bootstrap,
    #[default]
    Render,
    Info,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    out: Option<String>,
    icons: Option<String>,
    title: Option<String>,
    padding: f64,
    no_labels: bool,
    edge_ids: bool,
    pretty: bool,
}

#[derive(Serialize)]
struct InfoOut<'a> {
    title: &'a str,
    nodes: usize,
    edges: usize,
    /// Unit ids rendering as placeholders because their type has no icon.
    unresolved: Vec<&'a str>,
}

fn usage() -> &'static str {
    "floe-cli\n\
\n\
USAGE:\n\
  floe-cli bootstrap [--icons <root>] [--title <name>] [--out <path>|-] [<description.json>|-]\n\
  floe-cli [render] [--padding <n>] [--no-labels] [--edge-ids] [--icons <root>] [--out <path>|-] [<file>|-]\n\
  floe-cli info [--pretty] [--icons <root>] [<file>|-]\n\
\n\
NOTES:\n\
  - If <file> is omitted or '-', input is read from stdin.\n\
  - Inputs ending in `.vis` are loaded as saved flowsheet documents; anything\n\
    else is treated as a producer description and bootstrapped.\n\
  - bootstrap writes a saved flowsheet document (default name derives from\n\
    the title); render prints SVG to stdout unless --out is given.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        padding: 8.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "bootstrap" => args.command = Command::Bootstrap,
            "render" => args.command = Command::Render,
            "info" => args.command = Command::Info,
            "--pretty" => args.pretty = true,
            "--no-labels" => args.no_labels = true,
            "--edge-ids" => args.edge_ids = true,
            "--icons" => {
                let Some(root) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.icons = Some(root.clone());
            }
            "--title" => {
                let Some(title) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.title = Some(title.clone());
            }
            "--padding" => {
                let Some(pad) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.padding = pad.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.padding.is_finite() && args.padding >= 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
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

fn read_input(input: Option<&str>) -> Result<Vec<u8>, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read(path)?),
    }
}

/// Derives a session title: --title wins, then the input file stem, then a
/// generic fallback for stdin.
fn session_title(args: &Args) -> String {
    if let Some(title) = &args.title {
        return title.clone();
    }
    let Some(input) = args.input.as_deref().filter(|p| *p != "-") else {
        return "flowsheet".to_string();
    };
    let stem = std::path::Path::new(input)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "flowsheet".to_string());
    stem.trim_end_matches(&format!(".{FILE_EXTENSION}"))
        .trim_end_matches(".json")
        .to_string()
}

/// Saved documents carry the `.vis` marker extension; everything else is a
/// producer description.
fn is_saved_document(args: &Args) -> bool {
    args.input
        .as_deref()
        .is_some_and(|p| p != "-" && p.ends_with(".vis"))
}

fn open_session(args: &Args, bytes: &[u8]) -> Result<EditorSession, CliError> {
    let mut session = EditorSession::new(session_title(args));
    if let Some(root) = &args.icons {
        session = session.with_icon_registry(floe::IconRegistry::new(root.clone()));
    }
    if is_saved_document(args) {
        let owned = bytes.to_vec();
        block_on(session.load_from(async { Ok(owned) }))?;
    } else {
        let description: FlowsheetDescription = serde_json::from_slice(bytes)?;
        session.bootstrap(&description)?;
    }
    Ok(session)
}

fn write_bytes(bytes: &[u8], out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            use std::io::Write;
            std::io::stdout().lock().write_all(bytes)?;
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, bytes)?;
            Ok(())
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let bytes = read_input(args.input.as_deref())?;
    let session = open_session(&args, &bytes)?;

    match args.command {
        Command::Bootstrap => {
            let saved = session.save()?;
            match args.out.as_deref() {
                None => write_bytes(&saved.bytes, Some(&saved.file_name)),
                out => write_bytes(&saved.bytes, out),
            }
        }
        Command::Render => {
            let options = SvgRenderOptions {
                viewbox_padding: args.padding,
                include_labels: !args.no_labels,
                include_edge_ids: args.edge_ids,
                ..SvgRenderOptions::default()
            };
            let svg = session.render_svg(&options)?;
            write_bytes(svg.as_bytes(), args.out.as_deref())
        }
        Command::Info => {
            let graph = session.graph();
            let info = InfoOut {
                title: session.title(),
                nodes: graph.node_count(),
                edges: graph.edge_count(),
                unresolved: graph
                    .nodes()
                    .filter(|n| n.icon.is_none())
                    .map(|n| n.id.as_str())
                    .collect(),
            };
            let mut json = if args.pretty {
                serde_json::to_vec_pretty(&info)?
            } else {
                serde_json::to_vec(&info)?
            };
            json.push(b'\n');
            write_bytes(&json, args.out.as_deref())
        }
    }
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

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

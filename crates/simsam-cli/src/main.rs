use simsam_core::{Converter, ForwardPaths, ReversePaths};
use std::path::PathBuf;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Convert(simsam_core::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Convert(err) => write!(f, "{err}"),
        }
    }
}

impl From<simsam_core::Error> for CliError {
    fn from(value: simsam_core::Error) -> Self {
        Self::Convert(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    reverse: bool,
    verbose: bool,
    forward: ForwardPaths,
    backward: ReversePaths,
}

fn usage() -> &'static str {
    "simsam-cli\n\
\n\
USAGE:\n\
  simsam-cli [--elements <path>] [--connections <path>] [--variables <path>] [--layout <path>] [--out-bpmn <path>] [--verbose]\n\
  simsam-cli --reverse [--bpmn <path>] [--out-elements <path>] [--out-connections <path>] [--out-variables <path>] [--out-layout <path>] [--verbose]\n\
\n\
DEFAULTS:\n\
  --elements         fromZ1M/elements.json\n\
  --connections      fromZ1M/connections.json\n\
  --variables        fromZ1M/variables.json   (optional input)\n\
  --layout           fromZ1M/default.json     (optional input)\n\
  --out-bpmn         toBPMN/simsam_fixed.bpmn\n\
  --bpmn             fromBPMN/simsam_fixed.bpmn\n\
  --out-elements     toZ1M/elements.json\n\
  --out-connections  toZ1M/connections.json\n\
  --out-variables    toZ1M/variables.json\n\
  --out-layout       toZ1M/layout.json\n\
\n\
NOTES:\n\
  - Without --reverse, Simsam JSON is converted to BPMN XML; with it, BPMN XML to Simsam JSON.\n\
  - Warnings about skipped records go to stderr; --verbose adds debug output.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        let slot: &mut PathBuf = match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--reverse" => {
                args.reverse = true;
                continue;
            }
            "--verbose" | "-v" => {
                args.verbose = true;
                continue;
            }
            "--elements" => &mut args.forward.elements,
            "--connections" => &mut args.forward.connections,
            "--variables" => &mut args.forward.variables,
            "--layout" => &mut args.forward.layout,
            "--out-bpmn" => &mut args.forward.out_bpmn,
            "--bpmn" => &mut args.backward.bpmn,
            "--out-elements" => &mut args.backward.out_elements,
            "--out-connections" => &mut args.backward.out_connections,
            "--out-variables" => &mut args.backward.out_variables,
            "--out-layout" => &mut args.backward.out_layout,
            _ => return Err(CliError::Usage(usage())),
        };
        let Some(path) = it.next() else {
            return Err(CliError::Usage(usage()));
        };
        *slot = PathBuf::from(path);
    }

    Ok(args)
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let converter = Converter::new();

    if args.reverse {
        let p = &args.backward;
        println!(
            "Converting {} -> {}, {}, {}",
            p.bpmn.display(),
            p.out_elements.display(),
            p.out_connections.display(),
            p.out_layout.display()
        );
        let summary = converter.convert_bpmn_to_json(p)?;
        let [elements, connections, variables, layout] = &summary.outputs;
        println!(
            "Wrote: {}, {}, {}, {}",
            elements.display(),
            connections.display(),
            variables.display(),
            layout.display()
        );
        println!(
            "   Elements: {} | Connections: {} | Layout nodes: {}",
            summary.elements, summary.connections, summary.layout_nodes
        );
        if !summary.diagnostics.is_empty() {
            println!("   Skipped records: {}", summary.diagnostics.len());
        }
    } else {
        let p = &args.forward;
        println!(
            "Converting {} + {} -> {}",
            p.elements.display(),
            p.connections.display(),
            p.out_bpmn.display()
        );
        let summary = converter.convert(p)?;
        println!("Successfully created {}", summary.output.display());
        println!("   Elements: {}", summary.elements);
        println!("   Connections: {}", summary.connections);
        if !summary.diagnostics.is_empty() {
            println!("   Warnings: {}", summary.diagnostics.len());
        }
        println!("\nReady for bpmn.io: https://demo.bpmn.io/");
    }
    Ok(())
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

    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        std::iter::once("simsam-cli")
            .chain(items.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn defaults_select_forward_with_conventional_paths() {
        let args = parse_args(&argv(&[])).unwrap();
        assert!(!args.reverse);
        assert_eq!(args.forward, ForwardPaths::default());
        assert_eq!(args.backward, ReversePaths::default());
    }

    #[test]
    fn path_flags_override_their_slot() {
        let args = parse_args(&argv(&[
            "--reverse",
            "--bpmn",
            "in.bpmn",
            "--out-layout",
            "l.json",
            "--layout",
            "pos.json",
        ]))
        .unwrap();
        assert!(args.reverse);
        assert_eq!(args.backward.bpmn, PathBuf::from("in.bpmn"));
        assert_eq!(args.backward.out_layout, PathBuf::from("l.json"));
        assert_eq!(args.forward.layout, PathBuf::from("pos.json"));
        assert_eq!(args.forward.elements, ForwardPaths::default().elements);
    }

    #[test]
    fn unknown_flags_and_missing_values_are_usage_errors() {
        assert!(matches!(
            parse_args(&argv(&["--bogus"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&argv(&["--elements"])),
            Err(CliError::Usage(_))
        ));
    }
}

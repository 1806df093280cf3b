//! chainwalk CLI
//!
//! # Commands
//!
//! - `lineage`: print the identifiers along a record's chain and why the walk stopped
//! - `merge`: print the merge property folded along the chain, nearer keys winning

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use chainwalk::chain::{Lineage, Termination};
use chainwalk::config::{self, ChainConfig};
use chainwalk::error::{ChainWalkError, Result};
use chainwalk::observability;
use chainwalk::record::{self, matching, JsonChain};

/// Walk parent chains in JSON records.
#[derive(Parser)]
#[command(name = "chainwalk")]
#[command(version)]
#[command(about = "Cycle-safe traversal and property merging over linked JSON records")]
#[command(propagate_version = true)]
struct Cli {
    /// YAML config naming the link, id and merge fields
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the chain of identifiers starting at a record
    Lineage(WalkArgs),
    /// Print the merged property of a record's chain
    ///
    /// Object values are merged shallowly with nearer keys winning; any
    /// other nearer value replaces the farther one outright.
    Merge(WalkArgs),
}

#[derive(Args)]
struct WalkArgs {
    /// JSON file holding the records
    #[arg(long, value_name = "FILE")]
    nodes: PathBuf,

    /// Identifier of the starting record
    ///
    /// Required for identifier links. With --direct it picks a top-level
    /// entry of an array file; an object file is itself the start.
    #[arg(long, value_name = "ID")]
    start: Option<String>,

    /// Records hold their parent inline instead of by identifier
    #[arg(long)]
    direct: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    observability::init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref())?;
    tracing::debug!(
        link = %config.link,
        id = %config.id,
        id_match = %config.id_match,
        "config loaded"
    );

    match cli.command {
        Commands::Lineage(args) => {
            let document = record::read_json(&args.nodes)?;
            let (chain, start) = open(&config, &document, &args)?;
            print_lineage(&chain, &chain.lineage(start));
        }
        Commands::Merge(args) => {
            let document = record::read_json(&args.nodes)?;
            let (chain, start) = open(&config, &document, &args)?;
            let merged = chain
                .merge(start, |farther, nearer| shallow_override(farther.into_owned(), nearer))
                .map(|value| value.into_owned())
                .unwrap_or(Value::Null);
            println!("{}", serde_json::to_string_pretty(&merged)?);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the chain for the requested mode and locate the start record.
fn open<'a>(
    config: &'a ChainConfig,
    document: &'a Value,
    args: &WalkArgs,
) -> Result<(JsonChain<'a>, &'a Value)> {
    if args.direct {
        let chain = JsonChain::direct(config);
        let start = match (document, args.start.as_deref()) {
            (Value::Array(entries), Some(label)) => find_by_label(&chain, entries, label)?,
            (Value::Array(_), None) => return Err(missing_start(&args.nodes)),
            (Value::Object(_), _) => document,
            (other, _) => {
                return Err(ChainWalkError::InvalidNodes {
                    message: format!("expected an object or array, found {other}"),
                })
            }
        };
        return Ok((chain, start));
    }

    let nodes = record::as_collection(document)?;
    let chain = JsonChain::by_id(config, nodes);
    let label = args.start.as_deref().ok_or_else(|| missing_start(&args.nodes))?;
    let start = find_by_label(&chain, nodes, label)?;
    Ok((chain, start))
}

fn find_by_label<'a>(chain: &JsonChain<'a>, nodes: &'a [Value], label: &str) -> Result<&'a Value> {
    nodes
        .iter()
        .find(|node| {
            chain
                .id_of(*node)
                .is_some_and(|id| matching::matches_label(id, label))
        })
        .ok_or_else(|| ChainWalkError::NodeNotFound {
            id: format!("{label:?}"),
        })
}

fn missing_start(nodes: &Path) -> ChainWalkError {
    ChainWalkError::InvalidNodes {
        message: format!("{} holds several records; pass --start", nodes.display()),
    }
}

fn label_of(chain: &JsonChain<'_>, node: &Value) -> String {
    match record::field(node, &chain.config().id) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "<no id>".to_string(),
    }
}

fn print_lineage(chain: &JsonChain<'_>, lineage: &Lineage<'_, Value>) {
    for (depth, node) in lineage.nodes.iter().enumerate() {
        println!("{depth:>3}  {}", label_of(chain, node));
    }
    match lineage.termination {
        Termination::EndOfChain => println!("end of chain"),
        Termination::Cycle { revisited } => {
            println!("cycle: links back to {}", label_of(chain, revisited))
        }
    }
}

/// Shallow object merge, nearer keys winning. A non-object on either side
/// leaves the nearer value.
fn shallow_override(mut farther: Value, nearer: &Value) -> Value {
    match (farther.as_object_mut(), nearer.as_object()) {
        (Some(base), Some(over)) => {
            for (key, value) in over {
                base.insert(key.clone(), value.clone());
            }
        }
        _ => return nearer.clone(),
    }
    farther
}

#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

use cmd::coerce::Target;
use cmd::convert::Format;

#[derive(Parser)]
#[command(name = "shapecast", about = "Dynamic value coercion and mapping tools")]
struct Cli {
	/// Log every fill decision to stderr.
	#[arg(long, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Coerce a JSON document into one canonical form.
	Coerce {
		/// JSON text, or `-` for stdin.
		input: String,
		#[arg(long, value_enum)]
		to: Target,
	},
	/// Look up a dotted path inside a JSON document.
	Get {
		/// JSON text, or `-` for stdin.
		input: String,
		path: String,
		#[arg(long, value_enum)]
		to: Option<Target>,
	},
	/// Merge JSON objects left to right.
	Merge {
		#[arg(required = true)]
		inputs: Vec<String>,
	},
	/// Print identifiers in snake_case.
	Case {
		#[arg(required = true)]
		idents: Vec<String>,
	},
	/// Convert between JSON and hex-encoded MessagePack.
	Convert {
		/// Document text, or `-` for stdin.
		input: String,
		#[arg(long, value_enum, default_value = "json")]
		from: Format,
		#[arg(long, value_enum, default_value = "json")]
		to: Format,
	},
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing(verbose: bool) {
	let fallback = if verbose { "trace" } else { "warn" };
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
		.with_writer(std::io::stderr)
		.init();
}

fn run(command: Commands) -> shapecast::cast::Result<()> {
	match command {
		Commands::Coerce { input, to } => cmd::coerce::run(&input, to),
		Commands::Get { input, path, to } => cmd::get::run(&input, &path, to),
		Commands::Merge { inputs } => cmd::merge::run(&inputs),
		Commands::Case { idents } => cmd::case::run(&idents),
		Commands::Convert { input, from, to } => cmd::convert::run(&input, from, to),
	}
}

use anyhow::{anyhow, bail, Result};
use grush_kernel::{MemoryStore, Shell};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
grush: a graph-backed social shell

Usage: grush [OPTIONS]

Options:
  -c <line>     Run one line and exit
  --seed        Start with a small demo graph
  -h, --help    Show this help
  -V, --version Show the version
";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut seed = false;
    let mut command: Option<String> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print!("{USAGE}");
                return Ok(());
            }
            "-V" | "--version" => {
                println!("grush {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "-c" => {
                command = Some(args.next().ok_or_else(|| anyhow!("-c needs a line"))?);
            }
            "--seed" => seed = true,
            other => bail!("unknown option '{other}' (try --help)"),
        }
    }

    let store = if seed {
        MemoryStore::seeded()
    } else {
        MemoryStore::new()
    };
    let mut shell = Shell::new(store);

    match command {
        Some(line) => {
            if grush_repl::run_line(&mut shell, &line) {
                Ok(())
            } else {
                std::process::exit(1);
            }
        }
        None => grush_repl::run_interactive(&mut shell),
    }
}

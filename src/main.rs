use anyhow::Context;
use clap::{Parser, Subcommand};
use git_simulator::commands::execute_command;
use git_simulator::core::{
    format_prompt, print_command_output, print_error, print_info, print_section_header,
    print_success, storage::is_valid_key, FileBackend, Repository, ScenarioPatch,
    SimulatorConfig, SnapshotStore,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "git-sim")]
#[command(about = "An in-memory git simulator for practising version control")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Directory holding saved scenarios (defaults to the platform data directory)
    #[arg(long, global = true, value_name = "DIR")]
    store_dir: Option<PathBuf>,

    /// Scenario key the repository is loaded from and saved to
    #[arg(long, global = true, value_name = "ID", default_value = "sandbox")]
    scenario: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read git commands from stdin until `exit`
    Repl,
    /// Run a single git command, e.g. `git-sim exec git commit -m "message"`
    Exec {
        /// The command line, starting with `git`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },
    /// Print the saved snapshot as JSON
    Show,
    /// Delete the saved snapshot
    Clear,
}

/// A repository bound to the scenario it was loaded from
struct Session {
    repo: Repository,
    store: SnapshotStore<FileBackend>,
    scenario: String,
}

impl Session {
    fn open(store_dir: Option<PathBuf>, scenario: String) -> anyhow::Result<Self> {
        let config = SimulatorConfig::load_or_default().context("Failed to load configuration")?;
        let backend = match store_dir {
            Some(dir) => FileBackend::new(dir),
            None => FileBackend::in_data_dir().context("Failed to locate the data directory")?,
        };
        log::debug!("Using snapshot directory {}", backend.root().display());

        let store = SnapshotStore::with_config(backend, config.storage.clone());
        let mut repo = Repository::with_config(config);
        if let Some(state) = store.load(&scenario) {
            if !repo.load_scenario(ScenarioPatch::from(state)) {
                anyhow::bail!(
                    "Saved scenario '{scenario}' is inconsistent: {}",
                    repo.last_output()
                );
            }
        }

        Ok(Self {
            repo,
            store,
            scenario,
        })
    }

    fn run(&mut self, line: &str) -> anyhow::Result<String> {
        let output = execute_command(&mut self.repo, line);
        if !self.store.save(&self.scenario, self.repo.state()) {
            anyhow::bail!("Could not save scenario '{}'", self.scenario);
        }
        Ok(output)
    }
}

fn run_repl(session: &mut Session) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print_section_header(&format!("git-sim ({})", session.scenario));
    print_info("Type `exit` or `quit` to leave.");
    loop {
        print!("{}", format_prompt(session.repo.state().head.reference()));
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        match line {
            "" => continue,
            "exit" | "quit" => break,
            _ => print_command_output(&session.run(line)?),
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if !is_valid_key(&cli.scenario) {
        print_error(&format!(
            "Invalid scenario id '{}': use letters, digits, '-' and '_' (at most 99)",
            cli.scenario
        ));
        std::process::exit(1);
    }

    let mut session = match Session::open(cli.store_dir, cli.scenario) {
        Ok(session) => session,
        Err(e) => {
            print_error(&format!("{e:#}"));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Repl => run_repl(&mut session),
        Commands::Exec { line } => session
            .run(&line.join(" "))
            .map(|output| print_command_output(&output)),
        Commands::Show => serde_json::to_string_pretty(session.repo.state())
            .map(|json| println!("{json}"))
            .map_err(anyhow::Error::from),
        Commands::Clear => {
            session.store.clear(&session.scenario);
            print_success(&format!("Cleared scenario '{}'", session.scenario));
            Ok(())
        }
    };

    if let Err(e) = result {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }

    Ok(())
}

use anyhow::{Context, Result};
use bitsim::areas::config::RepositoryConfig;
use bitsim::artifacts::branch::branch_name::BranchName;
use bitsim::artifacts::core::OutputSink;
use bitsim::commands::interpreter::Interpreter;
use bitsim::commands::interpreter::output::OutputLine;
use clap::Parser;
use colored::Colorize;
use is_terminal::IsTerminal;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "bitsim",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "An in-memory simulator of a git-like commit graph",
    long_about = "Type version-control commands (init, commit, branch, checkout, merge, \
    rebase, cherry-pick, reset, stash, tag, log, status, push, pull) and watch an \
    in-memory commit graph change. Nothing is written to disk.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(short, long, help = "Replay the commands in a scenario file")]
    script: Option<PathBuf>,
    #[arg(
        short = 'c',
        long = "command",
        help = "Run a command line (may be repeated)"
    )]
    commands: Vec<String>,
    #[arg(long, help = "Show the output through a pager")]
    pager: bool,
    #[arg(long, help = "Disable colored output")]
    no_color: bool,
    #[arg(long, help = "Print the final repository state as JSON")]
    dump_snapshot: bool,
    #[arg(long, help = "Name of the branch created by init")]
    default_branch: Option<String>,
    #[arg(long, help = "Number of commits shown by log without -n")]
    log_limit: Option<usize>,
}

impl Cli {
    fn config(&self) -> Result<RepositoryConfig> {
        let mut config = RepositoryConfig::load_from_env()?;

        if let Some(branch) = &self.default_branch {
            let branch = BranchName::try_parse(branch.clone())
                .with_context(|| format!("invalid --default-branch: {branch}"))?;
            config = config.with_default_branch(branch);
        }
        if let Some(limit) = self.log_limit {
            config = config.with_log_limit(limit);
        }

        Ok(config)
    }
}

fn write_lines(sink: &mut impl Write, lines: &[OutputLine]) -> Result<bool> {
    let mut failed = false;
    for line in lines {
        failed |= line.is_error();
        match line {
            OutputLine::Clear => write!(sink, "{}", line)?,
            _ => writeln!(sink, "{}", line)?,
        }
    }

    Ok(failed)
}

fn prompt(interpreter: &Interpreter) -> String {
    let location = match interpreter.repository().head() {
        Ok(head) => format!(" ({})", head).cyan().to_string(),
        Err(_) => String::new(),
    };
    format!("{}{}> ", "bitsim".bold(), location)
}

/// Interactive prompt; returns when stdin closes or on `exit`/`quit`
fn repl(interpreter: &mut Interpreter) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "Type 'help' for the list of commands, 'exit' to leave.")?;
    loop {
        write!(stdout, "{}", prompt(interpreter))?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            return Ok(());
        }

        let line = line.trim();
        if matches!(line, "exit" | "quit") {
            return Ok(());
        }

        write_lines(&mut stdout, &interpreter.execute(line))?;
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut interpreter = Interpreter::new(cli.config()?);

    let interactive = cli.script.is_none() && cli.commands.is_empty() && io::stdin().is_terminal();
    if interactive {
        repl(&mut interpreter)?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut lines = Vec::new();
    if let Some(script) = &cli.script {
        let contents = std::fs::read_to_string(script)
            .with_context(|| format!("failed to read script {}", script.display()))?;
        lines.extend(interpreter.run_script(&contents));
    }
    for command in &cli.commands {
        lines.extend(interpreter.execute(command));
    }
    if cli.script.is_none() && cli.commands.is_empty() {
        let mut contents = String::new();
        io::stdin()
            .read_to_string(&mut contents)
            .context("failed to read commands from stdin")?;
        lines.extend(interpreter.run_script(&contents));
    }

    let mut sink = if cli.pager {
        OutputSink::pager()
    } else {
        OutputSink::stdout()
    };
    let failed = write_lines(&mut sink, &lines)?;
    if cli.dump_snapshot {
        writeln!(sink, "{}", interpreter.repository().snapshot().to_json()?)?;
    }
    sink.finish()?;

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

use colored::Colorize;
use std::fmt;

/// Escape sequence that clears the terminal and homes the cursor
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// One line of interpreter output, tagged with how it should be shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    /// The command line itself, echoed during scenario replay
    Echo(String),
    Info(String),
    Success(String),
    Warning(String),
    /// A precondition failure; the repository was not changed
    Error(String),
    /// A broken repository invariant, which is a defect in the model
    Internal(String),
    /// Ask the terminal to clear its screen
    Clear,
}

impl OutputLine {
    pub fn info(line: impl Into<String>) -> Self {
        OutputLine::Info(line.into())
    }

    pub fn success(line: impl Into<String>) -> Self {
        OutputLine::Success(line.into())
    }

    pub fn warning(line: impl Into<String>) -> Self {
        OutputLine::Warning(line.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, OutputLine::Error(_) | OutputLine::Internal(_))
    }

    /// The text without any styling
    pub fn text(&self) -> &str {
        match self {
            OutputLine::Echo(line)
            | OutputLine::Info(line)
            | OutputLine::Success(line)
            | OutputLine::Warning(line)
            | OutputLine::Error(line)
            | OutputLine::Internal(line) => line,
            OutputLine::Clear => "",
        }
    }
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputLine::Echo(line) => write!(f, "{} {}", "$".bold(), line.bold()),
            OutputLine::Info(line) => write!(f, "{}", line),
            OutputLine::Success(line) => write!(f, "{}", line.green()),
            OutputLine::Warning(line) => write!(f, "{} {}", "warning:".yellow().bold(), line),
            OutputLine::Error(line) => write!(f, "{} {}", "error:".red().bold(), line),
            OutputLine::Internal(line) => {
                write!(f, "{} {}", "fatal: internal error:".on_red().bold(), line)
            }
            OutputLine::Clear => write!(f, "{}", CLEAR_SCREEN),
        }
    }
}

use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::{ArgAction, Parser};

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
🧬 genomepack version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   2-bit compression for A/C/T/G genomic sequences";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    styles = STYLES
)]
pub struct Cli {
    /// `-` to compress a sequence, `+` to expand a compressed stream
    #[arg(value_parser = |x: &str| Mode::try_from(x))]
    pub mode: Mode,

    /// read from this file instead of standard input
    #[arg(short, long)]
    pub input: Option<String>,

    /// write to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<String>,

    /// when compressing, drop a single trailing newline (`\n` or `\r\n`) from the input.
    /// without this flag a trailing newline is rejected like any other invalid symbol.
    #[arg(long, action, verbatim_doc_comment)]
    pub trim_newline: bool,

    /// increase logging verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The default log filter for the requested verbosity. `RUST_LOG` takes precedence.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Expand,
}

/// Error type for parsing the mode argument.
#[derive(Debug)]
pub struct ParseModeErr(String);

impl std::fmt::Display for ParseModeErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseModeErr {}

impl<'a> TryFrom<&'a str> for Mode {
    type Error = ParseModeErr;

    fn try_from(arg: &'a str) -> Result<Mode, Self::Error> {
        match arg {
            "-" => Ok(Mode::Compress),
            "+" => Ok(Mode::Expand),
            _ => Err(ParseModeErr(indoc::formatdoc! {"
            expected `-` or `+`, got '{arg}'. For example:
              genomepack - < genome.txt > genome.bin
              genomepack + < genome.bin > genome.txt"})),
        }
    }
}

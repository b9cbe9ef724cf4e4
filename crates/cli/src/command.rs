//! Debugger command parsing.
//!
//! Each input line is split on whitespace; the first word selects the command
//! (long or single-letter form) and the rest are its arguments. Arguments that
//! name values stay as raw tokens; they are resolved against the CPU only when
//! the command runs.

/// Usage of the `memory` command, printed when its arguments are malformed.
pub const MEMORY_USAGE: &str =
    "Invalid arguments: m/memory $from $count; use hex (0x10), decimal (10), or register name (rsp)";

/// Help text listing every command.
pub const HELP: &str = "commands:
  s/step                   execute the next instruction
  r/registers [$reg]       print all register values or just $reg
  d/decimal                toggle hex/decimal printing
  m/memory $from $count    print $count bytes of memory starting at $from
  h/help                   print this";

/// A parsed debugger command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command<'a> {
    /// Execute one instruction.
    Step,
    /// Print every register, or only the named one.
    Registers(Option<&'a str>),
    /// Print `count` bytes from `from`; both are unresolved tokens.
    Memory {
        /// Start address token.
        from: &'a str,
        /// Byte count token.
        count: &'a str,
    },
    /// Toggle the display radix.
    ToggleRadix,
    /// Print the help text.
    Help,
    /// Blank line.
    Empty,
}

/// Why a line could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError<'a> {
    /// The first word is not a known command.
    Unknown(&'a str),
    /// A known command received the wrong number of arguments.
    Usage(&'static str),
}

/// Parses one input line.
pub fn parse(line: &str) -> Result<Command<'_>, ParseError<'_>> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(Command::Empty);
    };
    let args: Vec<&str> = words.collect();

    match name {
        "s" | "step" => Ok(Command::Step),
        "r" | "registers" => Ok(Command::Registers(args.first().copied())),
        "m" | "memory" => match args.as_slice() {
            &[from, count] => Ok(Command::Memory { from, count }),
            _ => Err(ParseError::Usage(MEMORY_USAGE)),
        },
        "d" | "decimal" => Ok(Command::ToggleRadix),
        "h" | "help" => Ok(Command::Help),
        other => Err(ParseError::Unknown(other)),
    }
}

//! Request encoding for the Foxtrot text protocol
//!
//! Every directive is a verb, a colon, optional arguments and a CR LF
//! terminator. Several `GET` directives may be concatenated into one send.

use std::fmt;

/// Line terminator used by requests and replies
pub const LINE_TERMINATOR: &str = "\r\n";

/// Protocol command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `LIST:` - enumerate the variable namespace
    List,
    /// One `GET:<name>` directive per name, sent as a single request
    Get(Vec<String>),
    /// `SET:<name>:<value>`
    Set { name: String, value: String },
}

impl Command {
    /// Create a `GET` command for a single variable
    pub fn get(name: impl Into<String>) -> Self {
        Command::Get(vec![name.into()])
    }

    /// Create a `GET` command for a batch of variables
    pub fn get_batch<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Command::Get(names.into_iter().map(Into::into).collect())
    }

    /// Create a `SET` command
    pub fn set(name: impl Into<String>, value: impl Into<String>) -> Self {
        Command::Set {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Number of directives carried by this command
    pub fn directive_count(&self) -> usize {
        match self {
            Command::Get(names) => names.len(),
            _ => 1,
        }
    }

    /// Encode the command to its wire text, terminators included
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::List => write!(f, "LIST:{}", LINE_TERMINATOR),
            Command::Get(names) => {
                for name in names {
                    write!(f, "GET:{}{}", name, LINE_TERMINATOR)?;
                }
                Ok(())
            }
            Command::Set { name, value } => write!(f, "SET:{}:{}{}", name, value, LINE_TERMINATOR),
        }
    }
}

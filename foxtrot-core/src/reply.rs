//! Reply line parsing
//!
//! Reply lines look like `<prefix>:<dotted.name>,<field>[,...]`. Only the
//! first two comma-separated fields after the first `:` are consumed.

use crate::command::LINE_TERMINATOR;
use crate::error::{FoxtrotError, FoxtrotResult};
use crate::name::VariableName;
use crate::wire::WireType;

/// Split a raw reply into its non-empty lines
pub fn lines(reply: &str) -> impl Iterator<Item = &str> {
    reply.split(LINE_TERMINATOR).filter(|line| !line.is_empty())
}

/// Strip the `<prefix>:` part and return the first two comma fields
fn payload_fields(line: &str) -> FoxtrotResult<(&str, &str)> {
    let (_, payload) = line
        .split_once(':')
        .ok_or_else(|| FoxtrotError::MalformedReply(format!("missing ':' in {:?}", line)))?;

    let mut fields = payload.split(',');
    match (fields.next(), fields.next()) {
        (Some(first), Some(second)) => Ok((first, second)),
        _ => Err(FoxtrotError::MalformedReply(format!(
            "expected at least 2 fields in {:?}",
            line
        ))),
    }
}

/// One variable announced by a `LIST` reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub wire_type: WireType,
}

impl ListEntry {
    pub fn variable(&self) -> Option<VariableName> {
        VariableName::parse(&self.name)
    }
}

/// Parse a `LIST` reply line, e.g. `LIST:ROOM.PIR.GTSAP1_PIR_VALUE,BOOL`
pub fn parse_list_line(line: &str) -> FoxtrotResult<ListEntry> {
    let (name, tag) = payload_fields(line)?;
    Ok(ListEntry {
        name: name.to_string(),
        wire_type: WireType::new(tag),
    })
}

/// One value returned by a `GET` reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetEntry {
    pub name: String,
    pub raw: String,
}

impl GetEntry {
    pub fn variable(&self) -> Option<VariableName> {
        VariableName::parse(&self.name)
    }
}

/// Parse a `GET` reply line, e.g. `GET:ROOM.PIR.GTSAP1_PIR_VALUE,1`
pub fn parse_get_line(line: &str) -> FoxtrotResult<GetEntry> {
    let (name, raw) = payload_fields(line)?;
    Ok(GetEntry {
        name: name.to_string(),
        raw: raw.to_string(),
    })
}

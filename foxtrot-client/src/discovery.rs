//! Namespace discovery
//!
//! Sends `LIST:` and turns the flat `name,type` reply into a [`Namespace`].

use foxtrot_core::reply::{lines, parse_list_line};
use foxtrot_core::{Command, FoxtrotResult, Namespace};
use foxtrot_session::{FrameMode, Session};
use foxtrot_transport::TransportLayer;

/// Build a namespace from a raw `LIST` reply
///
/// Malformed lines and names without a group are skipped.
pub fn parse_namespace(reply: &str) -> Namespace {
    let mut namespace = Namespace::new();
    let mut skipped = 0usize;

    for line in lines(reply) {
        let entry = match parse_list_line(line) {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("Skipping LIST line: {}", e);
                skipped += 1;
                continue;
            }
        };
        let Some(variable) = entry.variable() else {
            log::debug!("Skipping ungrouped variable {}", entry.name);
            skipped += 1;
            continue;
        };
        namespace.record(&variable, entry.wire_type);
    }

    log::debug!("Skipped {} LIST lines", skipped);
    namespace
}

/// Run a discovery pass over `session`
pub async fn discover<T: TransportLayer>(session: &mut Session<T>) -> FoxtrotResult<Namespace> {
    let reply = session.send_command(&Command::List, FrameMode::Multiline).await?;
    let namespace = parse_namespace(&reply);
    log::info!(
        "Discovered {} variables in {} groups ({} quick)",
        namespace.catalog.all.len(),
        namespace.groups.len(),
        namespace.catalog.quick.len()
    );
    Ok(namespace)
}

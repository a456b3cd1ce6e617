//! Batched value reads
//!
//! Variables are fetched with concatenated `GET:` directives, at most
//! `batch_size` per request, and folded into an [`EntityMap`].

use foxtrot_core::reply::{lines, parse_get_line};
use foxtrot_core::{Command, Entity, EntityMap, FoxtrotError, FoxtrotResult, Namespace};
use foxtrot_session::{FrameMode, Session};
use foxtrot_transport::TransportLayer;

/// Default number of `GET` directives per request
pub const DEFAULT_BATCH_SIZE: usize = 150;

/// What to do with a reply line naming a variable discovery never saw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownVariablePolicy {
    /// Drop the field and log a warning
    #[default]
    Skip,
    /// Fail the whole batch with [`FoxtrotError::UnknownVariable`]
    Fail,
}

/// Outcome of a batched read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadSummary {
    /// Requests sent
    pub batches: usize,
    /// Fields decoded and merged
    pub merged: usize,
    /// Reply lines dropped (malformed, ungrouped or unknown)
    pub skipped: usize,
}

/// Reads variables in bounded batches
#[derive(Debug, Clone)]
pub struct BatchReader {
    batch_size: usize,
    policy: UnknownVariablePolicy,
}

impl Default for BatchReader {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, UnknownVariablePolicy::default())
    }
}

impl BatchReader {
    pub fn new(batch_size: usize, policy: UnknownVariablePolicy) -> Self {
        Self {
            batch_size: batch_size.max(1),
            policy,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn policy(&self) -> UnknownVariablePolicy {
        self.policy
    }

    /// Decode a `GET` reply and merge it into `entities`
    pub fn merge_reply(
        &self,
        reply: &str,
        namespace: &Namespace,
        entities: &mut EntityMap,
    ) -> FoxtrotResult<ReadSummary> {
        let mut summary = ReadSummary::default();

        for line in lines(reply) {
            let entry = match parse_get_line(line) {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("Skipping GET line: {}", e);
                    summary.skipped += 1;
                    continue;
                }
            };
            let Some(variable) = entry.variable() else {
                log::debug!("Skipping ungrouped variable {}", entry.name);
                summary.skipped += 1;
                continue;
            };
            let Some(wire_type) = namespace.wire_type(&variable) else {
                match self.policy {
                    UnknownVariablePolicy::Skip => {
                        log::warn!("Variable {} is not in the discovered namespace", entry.name);
                        summary.skipped += 1;
                        continue;
                    }
                    UnknownVariablePolicy::Fail => {
                        return Err(FoxtrotError::UnknownVariable(entry.name));
                    }
                }
            };

            let value = wire_type.decode(&entry.raw);
            entities
                .entry(variable.group().to_string())
                .or_insert_with(|| {
                    Entity::new(namespace.entities.get(variable.group()).and_then(|e| e.kind))
                })
                .apply(variable.field(), value);
            summary.merged += 1;
        }

        Ok(summary)
    }

    /// Read one batch with a single request
    ///
    /// An empty batch sends nothing.
    pub async fn read_batch<T: TransportLayer>(
        &self,
        session: &mut Session<T>,
        namespace: &Namespace,
        names: &[String],
        entities: &mut EntityMap,
    ) -> FoxtrotResult<ReadSummary> {
        if names.is_empty() {
            return Ok(ReadSummary::default());
        }

        let command = Command::get_batch(names.iter().cloned());
        let reply = session.send_command(&command, FrameMode::SingleShot).await?;
        let mut summary = self.merge_reply(&reply, namespace, entities)?;
        summary.batches = 1;
        Ok(summary)
    }

    /// Read `names` in contiguous batches of at most `batch_size`
    pub async fn read_into<T: TransportLayer>(
        &self,
        session: &mut Session<T>,
        namespace: &Namespace,
        names: &[String],
        entities: &mut EntityMap,
    ) -> FoxtrotResult<ReadSummary> {
        let mut total = ReadSummary::default();
        for batch in names.chunks(self.batch_size) {
            let summary = self.read_batch(session, namespace, batch, entities).await?;
            total.batches += summary.batches;
            total.merged += summary.merged;
            total.skipped += summary.skipped;
        }

        log::debug!(
            "Read {} variables in {} batches ({} merged, {} skipped)",
            names.len(),
            total.batches,
            total.merged,
            total.skipped
        );
        Ok(total)
    }

    /// Read `names` into a fresh entity map seeded from discovery
    pub async fn read_all<T: TransportLayer>(
        &self,
        session: &mut Session<T>,
        namespace: &Namespace,
        names: &[String],
    ) -> FoxtrotResult<EntityMap> {
        let mut entities = namespace.entity_skeleton();
        self.read_into(session, namespace, names, &mut entities).await?;
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::parse_namespace;
    use foxtrot_core::{EntityKind, Value};
    use foxtrot_transport::ScriptedTransport;

    fn namespace() -> Namespace {
        parse_namespace(
            "LIST:B.R1.K1.GTSAP1_RELAY_NAME,STRING\r\n\
             LIST:B.R1.K1.GTSAP1_RELAY_VALUE,BOOL\r\n\
             LIST:B.R1.T.GTSAP1_TEMP_VALUE,REAL\r\n\
             LIST:B.R1.T.GTSAP1_TEMP_UNIT,STRING\r\n\
             LIST:B.R1.T.GTSAP1_TEMP_MODE,INT\r\n\
             LIST:\r\n",
        )
    }

    fn get_reply(entries: &[(&str, &str)]) -> String {
        entries
            .iter()
            .map(|(name, value)| format!("GET:{},{}\r\n", name, value))
            .collect()
    }

    #[test]
    fn test_merge_assigns_semantic_attributes() {
        let ns = namespace();
        let mut entities = ns.entity_skeleton();
        let reply = get_reply(&[
            ("B.R1.K1.GTSAP1_RELAY_NAME", "\"Pump\""),
            ("B.R1.K1.GTSAP1_RELAY_VALUE", "1"),
            ("B.R1.T.GTSAP1_TEMP_VALUE", "21.5"),
            ("B.R1.T.GTSAP1_TEMP_UNIT", "\"°C\""),
            ("B.R1.T.GTSAP1_TEMP_MODE", "2"),
        ]);

        let summary = BatchReader::default().merge_reply(&reply, &ns, &mut entities).unwrap();
        assert_eq!(summary.merged, 5);

        let relay = &entities["B.R1.K1"];
        assert_eq!(relay.kind, Some(EntityKind::Relay));
        assert_eq!(relay.name, Some(Value::Text("Pump".into())));
        assert_eq!(relay.value, Some(Value::Bool(true)));

        let temp = &entities["B.R1.T"];
        assert_eq!(temp.value, Some(Value::Raw("21.5".into())));
        assert_eq!(temp.unit, Some(Value::Text("°C".into())));
        assert_eq!(temp.fields["GTSAP1_TEMP_MODE"], Value::Raw("2".into()));
    }

    #[test]
    fn test_malformed_line_does_not_abort_batch() {
        let ns = namespace();
        let mut entities = EntityMap::new();
        let reply = "GET:B.R1.K1.GTSAP1_RELAY_VALUE,1\r\nGET:B.R1.K1.GTSAP1_RELAY_NAME\r\n";

        let summary = BatchReader::default().merge_reply(reply, &ns, &mut entities).unwrap();
        assert_eq!(summary.merged, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(entities["B.R1.K1"].value, Some(Value::Bool(true)));
        assert_eq!(entities["B.R1.K1"].kind, Some(EntityKind::Relay));
    }

    #[test]
    fn test_unknown_variable_is_skipped_by_default() {
        let ns = namespace();
        let mut entities = EntityMap::new();
        let reply = concat!(
            "GET:B.R9.NEW.GTSAP1_X_VALUE,1\r\n",
            "GET:UPTIME,5\r\n",
            "GET:B.R1.K1.GTSAP1_RELAY_VALUE,0\r\n",
        );

        let summary = BatchReader::default().merge_reply(reply, &ns, &mut entities).unwrap();
        assert_eq!(summary.merged, 1);
        assert_eq!(summary.skipped, 2);
        assert!(!entities.contains_key("B.R9.NEW"));
    }

    #[test]
    fn test_unknown_variable_can_fail_closed() {
        let ns = namespace();
        let mut entities = EntityMap::new();
        let reader = BatchReader::new(10, UnknownVariablePolicy::Fail);
        let err = reader
            .merge_reply("GET:B.R9.NEW.GTSAP1_X_VALUE,1\r\n", &ns, &mut entities)
            .unwrap_err();
        assert!(matches!(
            err,
            FoxtrotError::UnknownVariable(name) if name == "B.R9.NEW.GTSAP1_X_VALUE"
        ));
    }

    #[tokio::test]
    async fn test_batches_are_size_faithful() {
        let ns = namespace();
        let names = ns.catalog.all.clone();
        assert_eq!(names.len(), 5);

        let replies: Vec<String> = names
            .chunks(2)
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|n| format!("GET:{},1\r\n", n))
                    .collect::<String>()
            })
            .collect();
        let mut transport = ScriptedTransport::new();
        for reply in &replies {
            transport.push_reply([reply.as_str()]);
        }
        let mut session = Session::new(transport);

        let mut batched = ns.entity_skeleton();
        let summary = BatchReader::new(2, UnknownVariablePolicy::Skip)
            .read_into(&mut session, &ns, &names, &mut batched)
            .await
            .unwrap();

        assert_eq!(summary.batches, 3);
        assert_eq!(summary.merged, 5);
        let writes = session.transport().written_text();
        assert_eq!(writes.len(), 3);
        assert_eq!(writes[0].matches("GET:").count(), 2);
        assert_eq!(writes[2].matches("GET:").count(), 1);
        assert_eq!(writes[2], format!("GET:{}\r\n", names[4]));

        let mut unbounded = ns.entity_skeleton();
        BatchReader::default()
            .merge_reply(&replies.concat(), &ns, &mut unbounded)
            .unwrap();
        assert_eq!(batched, unbounded);
    }

    #[tokio::test]
    async fn test_empty_name_list_sends_nothing() {
        let ns = namespace();
        let mut session = Session::new(ScriptedTransport::new());
        let entities = BatchReader::default().read_all(&mut session, &ns, &[]).await.unwrap();
        assert_eq!(entities, ns.entity_skeleton());
        assert_eq!(session.exchange_count(), 0);
        assert_eq!(session.transport().opens(), 0);
    }
}

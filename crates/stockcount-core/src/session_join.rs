use std::collections::HashMap;

use tracing::warn;

use crate::types::{CountSession, RowIssue, StockCountRecord};

/// A record paired with the session that owns it.
#[derive(Debug, Clone, Copy)]
pub struct JoinedRecord<'a> {
    pub record: &'a StockCountRecord,
    pub session: &'a CountSession,
}

#[derive(Debug, Default)]
pub struct JoinOutcome<'a> {
    pub joined: Vec<JoinedRecord<'a>>,
    pub excluded: Vec<RowIssue>,
}

/// Inner join of records onto sessions by `session_id`, newest record id first.
///
/// Records whose session is missing are left out and reported as
/// [`RowIssue::MissingSessionJoin`]; they never fail the join as a whole.
pub fn join_sessions<'a>(
    records: &'a [StockCountRecord],
    sessions: &'a [CountSession],
) -> JoinOutcome<'a> {
    let session_map: HashMap<i64, &CountSession> = sessions.iter().map(|s| (s.id, s)).collect();

    let mut outcome = JoinOutcome::default();
    for record in records {
        match session_map.get(&record.session_id) {
            Some(session) => outcome.joined.push(JoinedRecord { record, session }),
            None => {
                warn!(
                    record_id = record.id,
                    session_id = record.session_id,
                    "stock count references a missing session; excluding row"
                );
                outcome.excluded.push(RowIssue::MissingSessionJoin {
                    record_id: record.id,
                    session_id: record.session_id,
                });
            }
        }
    }

    outcome
        .joined
        .sort_by(|a, b| b.record.id.cmp(&a.record.id));
    outcome
}

//! Domain Events
//!
//! Events raised by a registration session to describe its transitions.

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{EventId, FieldId};

#[derive(Clone, Debug, PartialEq)]
pub enum DomainEvent {
    Session(SessionEvent),
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    AnswerRecorded {
        field_id: FieldId,
        recorded_at: DateTime<Utc>,
    },

    /// A parent answer moved away from some children's condition and their
    /// answers were discarded.
    BranchCleared {
        parent_id: FieldId,
        cleared: Vec<FieldId>,
    },

    SubmissionBlocked {
        event_id: EventId,
        missing: Vec<FieldId>,
    },

    PayloadAssembled {
        event_id: EventId,
        answer_count: usize,
    },
}

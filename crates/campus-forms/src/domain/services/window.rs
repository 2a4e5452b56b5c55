//! Registration window

use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FormsError, Result};

/// Registration stays open through the whole calendar day of the deadline,
/// counted in the deadline's own offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationWindow {
    pub deadline: Option<DateTime<FixedOffset>>,
}

impl RegistrationWindow {
    pub fn open() -> Self {
        Self { deadline: None }
    }

    pub fn until(deadline: DateTime<FixedOffset>) -> Self {
        Self { deadline: Some(deadline) }
    }

    /// Last instant registration is accepted: 23:59:59.999 on the deadline date
    pub fn closes_at(&self) -> Option<DateTime<FixedOffset>> {
        let deadline = self.deadline?;
        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?;
        deadline
            .offset()
            .from_local_datetime(&deadline.date_naive().and_time(end_of_day))
            .single()
    }

    pub fn is_open_at<Tz: TimeZone>(&self, now: DateTime<Tz>) -> bool {
        match self.closes_at() {
            Some(closes_at) => now <= closes_at,
            None => true,
        }
    }

    pub fn ensure_open_at<Tz: TimeZone>(&self, now: DateTime<Tz>) -> Result<()> {
        if self.is_open_at(now) {
            Ok(())
        } else {
            Err(FormsError::RegistrationClosed)
        }
    }

    pub fn ensure_open(&self) -> Result<()> {
        self.ensure_open_at(Utc::now())
    }
}

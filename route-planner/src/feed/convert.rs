//! Conversion from feed records to schedule legs.
//!
//! Conversion never fails. Text the domain can't interpret is carried
//! through or ignored, matching how the index treats malformed legs.

use chrono::Weekday;
use tracing::trace;

use crate::domain::{ScheduleLeg, TransportType, parse_duration_label, parse_weekday};

use super::types::ScheduleRecord;

impl From<ScheduleRecord> for ScheduleLeg {
    fn from(record: ScheduleRecord) -> Self {
        let off_days = off_days(&record);
        let label_minutes = record.duration.as_deref().and_then(parse_duration_label);

        let leg = ScheduleLeg::new(
            record.name,
            record.start,
            record.destination,
            record.start_time,
            record.arrival_time,
            record.fare,
        )
        .with_transport(TransportType::parse(&record.kind))
        .with_unavailable_days(off_days);

        match label_minutes {
            Some(minutes) => leg.with_duration_minutes(minutes),
            None => leg,
        }
    }
}

/// Collect the weekdays named by `offDay` and `offDays`.
fn off_days(record: &ScheduleRecord) -> Vec<Weekday> {
    record
        .off_day
        .iter()
        .chain(record.off_days.iter())
        .filter_map(|name| {
            let day = parse_weekday(name);
            if day.is_none() && !name.trim().eq_ignore_ascii_case("none") {
                trace!(service = %record.name, off_day = %name, "Ignoring unrecognised off day");
            }
            day
        })
        .collect()
}

use crate::store::Slot;
use crate::types::{Report, ValidationError};
use crate::validation::validate_report;
use chrono::{DateTime, Duration, Utc};

pub const ACK_SECONDS: i64 = 3;
pub const RECENT_LIMIT: usize = 5;

pub const REPORT_ACK: &str = "✅ Reporte enviado. Gracias por contribuir.";

/// A confirmation message that stops being shown once `expires_at` passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgment {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl Acknowledgment {
    pub fn new(message: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            expires_at: now + Duration::seconds(ACK_SECONDS),
        }
    }

    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Returns the message of an acknowledgment that is still visible at `now`.
pub fn visible(ack: &Option<Acknowledgment>, now: DateTime<Utc>) -> Option<&str> {
    ack.as_ref()
        .filter(|a| a.is_visible(now))
        .map(|a| a.message.as_str())
}

pub fn submit(
    reports: &mut Slot<Vec<Report>>,
    title: &str,
    description: &str,
    now: DateTime<Utc>,
) -> Result<(Report, Acknowledgment), ValidationError> {
    validate_report(title, description)?;

    let report = Report {
        id: now.timestamp_millis(),
        title: title.to_string(),
        description: description.to_string(),
        date: now,
    };
    reports.update(|list| list.push(report.clone()));
    tracing::info!(id = report.id, "community report received");
    Ok((report, Acknowledgment::new(REPORT_ACK, now)))
}

/// The most recent reports, newest first.
pub fn recent(reports: &[Report]) -> impl Iterator<Item = &Report> {
    let skip = reports.len().saturating_sub(RECENT_LIMIT);
    reports[skip..].iter().rev()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::REPORTS_KEY;
    use chrono::TimeZone;

    fn slot(db: &sled::Db) -> Slot<Vec<Report>> {
        Slot::load(db, REPORTS_KEY, Vec::new())
    }

    #[test]
    fn submit_appends_and_acknowledges() {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let mut reports = slot(&db);
        let now = Utc.timestamp_millis_opt(1_000).unwrap();

        let (report, ack) = submit(&mut reports, "Perfil falso", "Me escribió", now).unwrap();
        assert_eq!(report.id, 1_000);
        assert_eq!(reports.get().len(), 1);
        assert!(ack.is_visible(now));
        assert!(ack.is_visible(now + Duration::milliseconds(2_999)));
        assert!(!ack.is_visible(now + Duration::seconds(3)));
    }

    #[test]
    fn empty_fields_are_rejected() {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let mut reports = slot(&db);
        assert!(submit(&mut reports, " ", "algo", Utc::now()).is_err());
        assert!(submit(&mut reports, "algo", "", Utc::now()).is_err());
        assert!(reports.get().is_empty());
    }

    #[test]
    fn recent_is_last_five_newest_first() {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let mut reports = slot(&db);
        for i in 0..7 {
            let now = Utc.timestamp_millis_opt(i).unwrap();
            submit(&mut reports, &format!("r{i}"), "d", now).unwrap();
        }
        let ids: Vec<i64> = recent(reports.get()).map(|r| r.id).collect();
        assert_eq!(ids, vec![6, 5, 4, 3, 2]);
        assert_eq!(recent(&[]).count(), 0);
    }

    #[test]
    fn expired_ack_is_hidden() {
        let now = Utc::now();
        let ack = Some(Acknowledgment::new("ok", now));
        assert_eq!(visible(&ack, now), Some("ok"));
        assert_eq!(visible(&ack, now + Duration::seconds(10)), None);
        assert_eq!(visible(&None, now), None);
    }
}

use crate::reminder::{EventType, Reminder};
use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use uuid::Uuid;

/// Record shape written by the browser version of the app. Every field is
/// optional here so a single bad record cannot sink the whole blob.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyReminder {
    #[serde(default)]
    pub id: Option<Value>,
    pub name: Option<String>,
    #[serde(default)]
    pub relationship: Option<String>,
    pub event_type: Option<String>,
    pub date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Accepts `YYYY-MM-DD` with or without a trailing time component.
fn parse_legacy_date(raw: &str) -> Option<NaiveDate> {
    let day_part = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d").ok()
}

fn legacy_id(raw: Option<Value>) -> Option<String> {
    match raw? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Migrate a legacy record, or `None` when name, date or event type cannot be recovered
pub fn migrate_legacy_reminder(legacy: LegacyReminder) -> Option<Reminder> {
    let name = legacy.name.filter(|n| !n.trim().is_empty())?;
    let event_type = legacy.event_type?.parse::<EventType>().ok()?;
    let date = parse_legacy_date(&legacy.date?)?;

    let created_at = legacy
        .created_at
        .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default();

    Some(Reminder {
        id: legacy_id(legacy.id).unwrap_or_default(),
        name,
        relationship: legacy.relationship.unwrap_or_default(),
        event_type,
        date,
        // Old forms always submitted notes, empty or not
        notes: legacy.notes.filter(|n| !n.trim().is_empty()),
        created_at,
    })
}

/// Id for a record that arrived without a usable one. Derived from the
/// record's position and content so decoding the same blob again yields the
/// same id.
fn replacement_id(seed: &str, taken: &HashSet<String>) -> String {
    let mut attempt = 0u32;
    loop {
        let name = format!("{}#{}", seed, attempt);
        let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string();
        if !taken.contains(&id) {
            return id;
        }
        attempt += 1;
    }
}

/// Try to parse content as legacy format and migrate if needed.
///
/// Returns `None` when the content already decodes as the current format or
/// is not a JSON array at all.
pub fn try_migrate_legacy_data(content: &str) -> Option<Vec<Reminder>> {
    if serde_json::from_str::<Vec<Reminder>>(content).is_ok() {
        return None;
    }

    let records = serde_json::from_str::<Vec<Value>>(content).ok()?;
    let total = records.len();

    info!("event=legacy_migrate module=storage status=start records={}", total);

    let mut seen_ids = HashSet::new();
    let mut migrated = Vec::with_capacity(total);

    for (index, record) in records.into_iter().enumerate() {
        let seed = format!("{}:{}", index, record);
        let reminder = serde_json::from_value::<LegacyReminder>(record)
            .ok()
            .and_then(migrate_legacy_reminder);

        let Some(mut reminder) = reminder else {
            warn!(
                "event=legacy_migrate module=storage status=skip index={} reason=unrecoverable_record",
                index
            );
            continue;
        };

        if reminder.id.is_empty() || seen_ids.contains(&reminder.id) {
            reminder.id = replacement_id(&seed, &seen_ids);
        }
        seen_ids.insert(reminder.id.clone());
        migrated.push(reminder);
    }

    info!(
        "event=legacy_migrate module=storage status=ok migrated={} dropped={}",
        migrated.len(),
        total - migrated.len()
    );

    Some(migrated)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BROWSER_BLOB: &str = r#"[
        {"id":"1718000000000","name":"Mom","relationship":"mother","eventType":"birthday",
         "date":"1960-03-14","notes":"","createdAt":"2024-06-10T08:00:00.000Z"},
        {"id":"1718000000001","name":"Wedding","relationship":"","eventType":"anniversary",
         "date":"2015-09-20T00:00:00.000Z","notes":"book dinner","createdAt":"2024-06-10T08:01:00.000Z"}
    ]"#;

    #[test]
    fn test_current_format_is_not_migrated() {
        assert!(try_migrate_legacy_data("[]").is_none());
    }

    #[test]
    fn test_non_array_content_is_not_migrated() {
        assert!(try_migrate_legacy_data("{not json").is_none());
        assert!(try_migrate_legacy_data(r#"{"pending":[]}"#).is_none());
    }

    #[test]
    fn test_browser_blob_is_migrated() {
        let migrated = try_migrate_legacy_data(BROWSER_BLOB).unwrap();

        assert_eq!(migrated.len(), 2);
        assert_eq!(migrated[0].id, "1718000000000");
        assert_eq!(migrated[0].notes, None);
        assert_eq!(migrated[1].date, NaiveDate::from_ymd_opt(2015, 9, 20).unwrap());
        assert_eq!(migrated[1].notes.as_deref(), Some("book dinner"));
        assert_eq!(migrated[1].created_at.to_rfc3339(), "2024-06-10T08:01:00+00:00");
    }

    #[test]
    fn test_unrecoverable_records_are_dropped() {
        let blob = r#"[
            {"id":"1","name":"","eventType":"birthday","date":"2000-01-01"},
            {"id":"2","name":"Kim","eventType":"graduation","date":"2000-01-01"},
            {"id":"3","name":"Lee","eventType":"other","date":"someday"},
            {"id":"4","name":"Ana","eventType":"holiday","date":"2000-12-25"},
            42
        ]"#;

        let migrated = try_migrate_legacy_data(blob).unwrap();

        assert_eq!(migrated.len(), 1);
        assert_eq!(migrated[0].name, "Ana");
        assert_eq!(migrated[0].relationship, "");
        assert_eq!(migrated[0].created_at, DateTime::<Utc>::default());
    }

    #[test]
    fn test_duplicate_or_missing_ids_are_replaced() {
        let blob = r#"[
            {"id":7,"name":"A","eventType":"other","date":"2000-01-01"},
            {"id":"7","name":"B","eventType":"other","date":"2000-01-02"},
            {"name":"C","eventType":"other","date":"2000-01-03"}
        ]"#;

        let migrated = try_migrate_legacy_data(blob).unwrap();
        let ids: HashSet<&str> = migrated.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(migrated.len(), 3);
        assert_eq!(ids.len(), 3);
        assert_eq!(migrated[0].id, "7");
    }

    #[test]
    fn test_replacement_ids_are_stable_across_decodes() {
        let blob = r#"[
            {"name":"Mom","eventType":"birthday","date":"1960-03-14"},
            {"id":"x","name":"A","eventType":"other","date":"2000-01-01"},
            {"id":"x","name":"B","eventType":"other","date":"2000-01-02"}
        ]"#;

        let first = try_migrate_legacy_data(blob).unwrap();
        let second = try_migrate_legacy_data(blob).unwrap();

        let first_ids: Vec<&str> = first.iter().map(|r| r.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
        assert_ne!(first[1].id, first[2].id);
    }
}

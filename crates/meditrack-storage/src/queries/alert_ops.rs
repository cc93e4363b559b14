//! Alert persistence: lookups, filtered listings, batch insert and replace.

use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use meditrack_core::errors::MediTrackResult;
use meditrack_core::models::{Alert, AlertDraft, AlertFilter, AlertStatus, AlertType, Severity};

use super::{fmt_ts, parse_ts};
use crate::to_storage_err;

const COLUMNS: &str = "id, medicine_id, alert_type, message, severity, status,
                       resolved_by, resolved_at, created_at, updated_at";

/// Builds a `WHERE` clause from optional predicates. Every bound value is text.
#[derive(Default)]
struct Predicates {
    clauses: Vec<String>,
    args: Vec<String>,
}

impl Predicates {
    fn status_in(&mut self, statuses: &[AlertStatus]) {
        if statuses.is_empty() {
            return;
        }
        let start = self.args.len();
        let marks: Vec<String> = (1..=statuses.len())
            .map(|i| format!("?{}", start + i))
            .collect();
        self.clauses.push(format!("status IN ({})", marks.join(", ")));
        self.args
            .extend(statuses.iter().map(|s| s.as_str().to_string()));
    }

    fn eq(&mut self, column: &str, value: &str) {
        self.args.push(value.to_string());
        self.clauses.push(format!("{column} = ?{}", self.args.len()));
    }

    fn sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }
}

/// Oldest alert for `(medicine_id, alert_type)` whose status is in `statuses`.
pub fn find_alert(
    conn: &Connection,
    medicine_id: &str,
    alert_type: AlertType,
    statuses: &[AlertStatus],
) -> MediTrackResult<Option<Alert>> {
    let mut preds = Predicates::default();
    preds.eq("medicine_id", medicine_id);
    preds.eq("alert_type", alert_type.as_str());
    preds.status_in(statuses);
    let sql = format!(
        "SELECT {COLUMNS} FROM alerts{} ORDER BY created_at, rowid LIMIT 1",
        preds.sql()
    );
    let mut found = query(conn, &sql, &preds.args)?;
    Ok(found.pop())
}

pub fn get_alert(conn: &Connection, id: &str) -> MediTrackResult<Option<Alert>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {COLUMNS} FROM alerts WHERE id = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let row = stmt
        .query_row(params![id], |row| Ok(row_to_alert(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.transpose()
}

/// Delete every alert whose status is in `statuses`. An empty slice deletes nothing.
pub fn delete_by_status(conn: &Connection, statuses: &[AlertStatus]) -> MediTrackResult<usize> {
    if statuses.is_empty() {
        return Ok(0);
    }
    let mut preds = Predicates::default();
    preds.status_in(statuses);
    conn.execute(
        &format!("DELETE FROM alerts{}", preds.sql()),
        params_from_iter(preds.args.iter()),
    )
    .map_err(|e| to_storage_err(format!("delete alerts: {e}")))
}

/// Insert drafts as `new` alerts inside the caller's transaction scope.
fn insert_rows(
    conn: &Connection,
    drafts: &[AlertDraft],
    now: DateTime<Utc>,
) -> MediTrackResult<Vec<Alert>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "INSERT INTO alerts ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut inserted = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let alert = draft.clone().into_alert(now);
        stmt.execute(params![
            alert.id,
            alert.medicine_id,
            alert.alert_type.as_str(),
            alert.message,
            alert.severity.as_str(),
            alert.status.as_str(),
            alert.resolved_by,
            alert.resolved_at.map(fmt_ts),
            fmt_ts(alert.created_at),
            fmt_ts(alert.updated_at),
        ])
        .map_err(|e| {
            to_storage_err(format!("insert alert for {}: {e}", alert.medicine_id))
        })?;
        inserted.push(alert);
    }
    Ok(inserted)
}

/// Insert a batch atomically. A failing row rolls back the whole batch.
pub fn insert_alerts(
    conn: &Connection,
    drafts: &[AlertDraft],
    now: DateTime<Utc>,
) -> MediTrackResult<Vec<Alert>> {
    if drafts.is_empty() {
        return Ok(Vec::new());
    }
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("insert_alerts begin: {e}")))?;
    let inserted = match insert_rows(&tx, drafts, now) {
        Ok(rows) => rows,
        Err(e) => {
            let _ = tx.rollback();
            return Err(e);
        }
    };
    tx.commit()
        .map_err(|e| to_storage_err(format!("insert_alerts commit: {e}")))?;
    Ok(inserted)
}

/// Clear unresolved alerts and insert `drafts` in one transaction.
/// Returns `(deleted, inserted)`. On failure nothing changes.
pub fn replace_unresolved(
    conn: &Connection,
    drafts: &[AlertDraft],
    now: DateTime<Utc>,
) -> MediTrackResult<(usize, Vec<Alert>)> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("replace_unresolved begin: {e}")))?;
    let result = delete_by_status(&tx, &AlertStatus::UNRESOLVED)
        .and_then(|deleted| Ok((deleted, insert_rows(&tx, drafts, now)?)));
    match result {
        Ok(out) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("replace_unresolved commit: {e}")))?;
            Ok(out)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

/// Overwrite the mutable fields of a stored alert.
pub fn save_alert(conn: &Connection, alert: &Alert) -> MediTrackResult<Option<Alert>> {
    let changed = conn
        .execute(
            "UPDATE alerts
             SET message = ?2, severity = ?3, status = ?4,
                 resolved_by = ?5, resolved_at = ?6, updated_at = ?7
             WHERE id = ?1",
            params![
                alert.id,
                alert.message,
                alert.severity.as_str(),
                alert.status.as_str(),
                alert.resolved_by,
                alert.resolved_at.map(fmt_ts),
                fmt_ts(alert.updated_at),
            ],
        )
        .map_err(|e| to_storage_err(format!("save alert {}: {e}", alert.id)))?;
    if changed == 0 {
        return Ok(None);
    }
    get_alert(conn, &alert.id)
}

/// Alerts matching `filter`, newest first. Ties keep reverse insertion order.
pub fn list_alerts(conn: &Connection, filter: &AlertFilter) -> MediTrackResult<Vec<Alert>> {
    let mut preds = Predicates::default();
    preds.status_in(&filter.statuses);
    if let Some(t) = filter.alert_type {
        preds.eq("alert_type", t.as_str());
    }
    if let Some(s) = filter.severity {
        preds.eq("severity", s.as_str());
    }
    let mut sql = format!(
        "SELECT {COLUMNS} FROM alerts{} ORDER BY created_at DESC, rowid DESC",
        preds.sql()
    );
    if let Some(limit) = filter.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }
    query(conn, &sql, &preds.args)
}

pub fn count_alerts(
    conn: &Connection,
    statuses: &[AlertStatus],
    severity: Option<Severity>,
    alert_type: Option<AlertType>,
) -> MediTrackResult<usize> {
    let mut preds = Predicates::default();
    preds.status_in(statuses);
    if let Some(s) = severity {
        preds.eq("severity", s.as_str());
    }
    if let Some(t) = alert_type {
        preds.eq("alert_type", t.as_str());
    }
    let n: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) FROM alerts{}", preds.sql()),
            params_from_iter(preds.args.iter()),
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n as usize)
}

fn query(conn: &Connection, sql: &str, args: &[String]) -> MediTrackResult<Vec<Alert>> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(args.iter()), |row| Ok(row_to_alert(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(out)
}

fn row_to_alert(row: &Row<'_>) -> MediTrackResult<Alert> {
    let get_err = |e: rusqlite::Error| to_storage_err(e.to_string());

    let alert_type: String = row.get(2).map_err(get_err)?;
    let severity: String = row.get(4).map_err(get_err)?;
    let status: String = row.get(5).map_err(get_err)?;
    let resolved_at: Option<String> = row.get(7).map_err(get_err)?;
    let created_at: String = row.get(8).map_err(get_err)?;
    let updated_at: String = row.get(9).map_err(get_err)?;

    Ok(Alert {
        id: row.get(0).map_err(get_err)?,
        medicine_id: row.get(1).map_err(get_err)?,
        alert_type: alert_type.parse()?,
        message: row.get(3).map_err(get_err)?,
        severity: severity.parse()?,
        status: status.parse()?,
        resolved_by: row.get(6).map_err(get_err)?,
        resolved_at: resolved_at
            .map(|raw| parse_ts("alerts", "resolved_at", &raw))
            .transpose()?,
        created_at: parse_ts("alerts", "created_at", &created_at)?,
        updated_at: parse_ts("alerts", "updated_at", &updated_at)?,
    })
}

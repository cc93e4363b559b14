//! Upsert, get, list, expiry range, and stock updates for medicines.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use meditrack_core::errors::{MediTrackError, MediTrackResult};
use meditrack_core::models::{DemandFactors, Medicine};

use super::{decode_err, fmt_ts, parse_ts};
use crate::to_storage_err;

const COLUMNS: &str = "id, name, category, current_stock, min_stock_level, unit_price,
                       expiry_date, manufacturer, demand_factors";

/// Insert a medicine, or overwrite every field of the row with the same id.
/// The row keeps its position in insertion order.
pub fn upsert_medicine(conn: &Connection, medicine: &Medicine) -> MediTrackResult<()> {
    let factors = serde_json::to_string(&medicine.demand_factors)?;
    conn.execute(
        "INSERT INTO medicines (
            id, name, category, current_stock, min_stock_level, unit_price,
            expiry_date, manufacturer, demand_factors
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            category = excluded.category,
            current_stock = excluded.current_stock,
            min_stock_level = excluded.min_stock_level,
            unit_price = excluded.unit_price,
            expiry_date = excluded.expiry_date,
            manufacturer = excluded.manufacturer,
            demand_factors = excluded.demand_factors,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        params![
            medicine.id,
            medicine.name,
            medicine.category,
            medicine.current_stock,
            medicine.min_stock_level,
            medicine.unit_price,
            medicine.expiry_date.map(fmt_ts),
            medicine.manufacturer,
            factors,
        ],
    )
    .map_err(|e| to_storage_err(format!("upsert medicine {}: {e}", medicine.id)))?;
    Ok(())
}

/// Upsert a batch in one transaction. Returns the number written.
pub fn bulk_upsert(conn: &Connection, medicines: &[Medicine]) -> MediTrackResult<usize> {
    if medicines.is_empty() {
        return Ok(0);
    }
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("bulk_upsert begin: {e}")))?;
    for medicine in medicines {
        if let Err(e) = upsert_medicine(&tx, medicine) {
            let _ = tx.rollback();
            return Err(e);
        }
    }
    tx.commit()
        .map_err(|e| to_storage_err(format!("bulk_upsert commit: {e}")))?;
    Ok(medicines.len())
}

pub fn get_medicine(conn: &Connection, id: &str) -> MediTrackResult<Option<Medicine>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {COLUMNS} FROM medicines WHERE id = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let row = stmt
        .query_row(params![id], |row| Ok(row_to_medicine(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.transpose()
}

/// Every medicine, in insertion order.
pub fn all_medicines(conn: &Connection) -> MediTrackResult<Vec<Medicine>> {
    query(conn, &format!("SELECT {COLUMNS} FROM medicines ORDER BY rowid"), &[])
}

/// Medicines with an expiry date inside `[from, to]`, in insertion order.
pub fn expiring_between(
    conn: &Connection,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> MediTrackResult<Vec<Medicine>> {
    query(
        conn,
        &format!(
            "SELECT {COLUMNS} FROM medicines
             WHERE expiry_date IS NOT NULL AND expiry_date >= ?1 AND expiry_date <= ?2
             ORDER BY rowid"
        ),
        &[fmt_ts(from), fmt_ts(to)],
    )
}

pub fn update_stock(conn: &Connection, id: &str, current_stock: u32) -> MediTrackResult<Medicine> {
    let changed = conn
        .execute(
            "UPDATE medicines
             SET current_stock = ?2, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE id = ?1",
            params![id, current_stock],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(MediTrackError::MedicineNotFound { id: id.to_string() });
    }
    get_medicine(conn, id)?.ok_or_else(|| MediTrackError::MedicineNotFound { id: id.to_string() })
}

pub fn count_medicines(conn: &Connection) -> MediTrackResult<usize> {
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM medicines", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n as usize)
}

fn query(conn: &Connection, sql: &str, args: &[String]) -> MediTrackResult<Vec<Medicine>> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(args.iter()), |row| {
            Ok(row_to_medicine(row))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(out)
}

fn row_to_medicine(row: &Row<'_>) -> MediTrackResult<Medicine> {
    let get_err = |e: rusqlite::Error| to_storage_err(e.to_string());

    let expiry: Option<String> = row.get(6).map_err(get_err)?;
    let factors_json: String = row.get(8).map_err(get_err)?;
    let demand_factors: DemandFactors = serde_json::from_str(&factors_json)
        .map_err(|e| decode_err("medicines", "demand_factors", e.to_string()))?;

    Ok(Medicine {
        id: row.get(0).map_err(get_err)?,
        name: row.get(1).map_err(get_err)?,
        category: row.get(2).map_err(get_err)?,
        current_stock: row.get(3).map_err(get_err)?,
        min_stock_level: row.get(4).map_err(get_err)?,
        unit_price: row.get(5).map_err(get_err)?,
        expiry_date: expiry
            .map(|raw| parse_ts("medicines", "expiry_date", &raw))
            .transpose()?,
        manufacturer: row.get(7).map_err(get_err)?,
        demand_factors,
    })
}

use actix_web::{web, Responder};
use common::wire::RepairRequestRecord;
use rusqlite::{params, Connection};

use crate::db;

pub async fn process(payload: web::Json<RepairRequestRecord>) -> impl Responder {
    match create_request(&payload).await {
        Ok(_) => actix_web::HttpResponse::Ok().body("Solicitação registrada"),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Erro ao registrar solicitação: {}", e)),
    }
}

pub async fn create_request(record: &RepairRequestRecord) -> Result<(), String> {
    if record.id.trim().is_empty() {
        return Err("O identificador da solicitação não pode estar vazio".to_string());
    }
    let conn = db::open().map_err(|e| e.to_string())?;
    insert(&conn, record)
}

pub(crate) fn insert(conn: &Connection, record: &RepairRequestRecord) -> Result<(), String> {
    conn.execute(
        "INSERT INTO repair_requests (
            id, protocol, sei_number, contract, description, latitude, longitude,
            address, visit_date, status, technician_id, zonal, photo_before,
            photo_after, created_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            &record.id,
            &record.protocol,
            &record.sei_number,
            &record.contract,
            &record.description,
            record.latitude,
            record.longitude,
            &record.address,
            &record.visit_date,
            record.status.label(),
            &record.technician_id,
            record.zonal.id(),
            &record.photo_before,
            &record.photo_after,
            &record.created_at,
        ],
    )
    .map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::requests::{list, sample_record};

    #[test]
    fn inserting_a_reused_id_is_a_constraint_error() {
        let conn = crate::db::open_in_memory();
        insert(&conn, &sample_record("req_001", "2024-05-08")).unwrap();

        let err = insert(&conn, &sample_record("req_001", "2024-05-09")).unwrap_err();
        assert!(err.contains("UNIQUE"));
        assert_eq!(list::fetch_all(&conn).unwrap().len(), 1);
    }

    #[test]
    fn optional_photos_round_trip_as_null() {
        let conn = crate::db::open_in_memory();
        let mut record = sample_record("req_001", "2024-05-08");
        record.photo_before = Some("data:image/png;base64,AAAA".to_string());
        insert(&conn, &record).unwrap();

        let stored = &list::fetch_all(&conn).unwrap()[0];
        assert_eq!(stored.photo_before.as_deref(), Some("data:image/png;base64,AAAA"));
        assert_eq!(stored.photo_after, None);
    }
}

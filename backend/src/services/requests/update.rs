use actix_web::{web, Responder};
use common::wire::RepairRequestRecord;
use rusqlite::{params, Connection};

use crate::db;

pub async fn process(
    request_id: web::Path<String>,
    payload: web::Json<RepairRequestRecord>,
) -> impl Responder {
    match update_request(&request_id, &payload).await {
        Ok(_) => actix_web::HttpResponse::Ok().body("Solicitação atualizada"),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Erro ao atualizar solicitação: {}", e)),
    }
}

pub async fn update_request(id: &str, record: &RepairRequestRecord) -> Result<(), String> {
    let conn = db::open().map_err(|e| e.to_string())?;
    replace(&conn, id, record)
}

/// Whole-row replacement keyed by the path id; the record's own id field is
/// not trusted for addressing.
pub(crate) fn replace(
    conn: &Connection,
    id: &str,
    record: &RepairRequestRecord,
) -> Result<(), String> {
    let changed = conn
        .execute(
            "UPDATE repair_requests SET
                protocol = ?1, sei_number = ?2, contract = ?3, description = ?4,
                latitude = ?5, longitude = ?6, address = ?7, visit_date = ?8,
                status = ?9, technician_id = ?10, zonal = ?11, photo_before = ?12,
                photo_after = ?13
             WHERE id = ?14",
            params![
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
                id,
            ],
        )
        .map_err(|e| e.to_string())?;

    if changed == 0 {
        return Err(format!("Solicitação {} não encontrada", id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::requests::{create, list, sample_record};
    use common::model::request::RequestStatus;

    #[test]
    fn replaces_every_mutable_column() {
        let conn = crate::db::open_in_memory();
        create::insert(&conn, &sample_record("req_001", "2024-05-08")).unwrap();

        let mut edited = sample_record("req_001", "2024-05-08");
        edited.status = RequestStatus::Completed;
        edited.photo_after = Some("data:image/png;base64,BBBB".to_string());
        edited.address = "Rua Augusta, 1500".to_string();
        replace(&conn, "req_001", &edited).unwrap();

        let stored = &list::fetch_all(&conn).unwrap()[0];
        assert_eq!(stored.status, RequestStatus::Completed);
        assert_eq!(stored.photo_after.as_deref(), Some("data:image/png;base64,BBBB"));
        assert_eq!(stored.address, "Rua Augusta, 1500");
    }

    #[test]
    fn updating_an_unknown_id_reports_not_found() {
        let conn = crate::db::open_in_memory();
        let err = replace(&conn, "req_404", &sample_record("req_404", "2024-05-08")).unwrap_err();
        assert!(err.contains("não encontrada"));
    }
}

use actix_web::Responder;
use common::wire::RepairRequestRecord;
use rusqlite::Connection;

use crate::db;

pub async fn process() -> impl Responder {
    match list_requests().await {
        Ok(records) => actix_web::HttpResponse::Ok().json(records),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Erro ao listar solicitações: {}", e)),
    }
}

pub async fn list_requests() -> Result<Vec<RepairRequestRecord>, String> {
    let conn = db::open().map_err(|e| e.to_string())?;
    fetch_all(&conn)
}

pub(crate) fn fetch_all(conn: &Connection) -> Result<Vec<RepairRequestRecord>, String> {
    let mut stmt = conn
        .prepare(
            "SELECT id, protocol, sei_number, contract, description, latitude, longitude,
                    address, visit_date, status, technician_id, zonal, photo_before,
                    photo_after, created_at
             FROM repair_requests
             ORDER BY created_at DESC",
        )
        .map_err(|e| e.to_string())?;

    let rows = stmt
        .query_map([], |row| {
            Ok(RepairRequestRecord {
                id: row.get(0)?,
                protocol: row.get(1)?,
                sei_number: row.get(2)?,
                contract: row.get(3)?,
                description: row.get(4)?,
                latitude: row.get(5)?,
                longitude: row.get(6)?,
                address: row.get(7)?,
                visit_date: row.get(8)?,
                status: db::parse_status(9, row.get(9)?)?,
                technician_id: row.get(10)?,
                zonal: db::parse_zonal(11, row.get(11)?)?,
                photo_before: row.get(12)?,
                photo_after: row.get(13)?,
                created_at: row.get(14)?,
            })
        })
        .map_err(|e| e.to_string())?;

    rows.collect::<Result<Vec<_>, _>>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::requests::{create, sample_record};
    use common::model::request::RequestStatus;
    use common::model::zonal::Zonal;

    #[test]
    fn listing_orders_newest_first() {
        let conn = crate::db::open_in_memory();
        create::insert(&conn, &sample_record("req_001", "2024-05-08")).unwrap();
        create::insert(&conn, &sample_record("req_002", "2024-05-10")).unwrap();

        let records = fetch_all(&conn).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "req_002");
        assert_eq!(records[1].id, "req_001");
        assert_eq!(records[0].status, RequestStatus::Open);
        assert_eq!(records[0].zonal, Zonal::North);
    }
}

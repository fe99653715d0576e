use actix_web::Responder;
use common::wire::ZonalRecord;
use rusqlite::Connection;

use crate::db;

pub async fn process() -> impl Responder {
    match list_zonals().await {
        Ok(records) => actix_web::HttpResponse::Ok().json(records),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Erro ao listar zonais: {}", e)),
    }
}

pub async fn list_zonals() -> Result<Vec<ZonalRecord>, String> {
    let conn = db::open().map_err(|e| e.to_string())?;
    fetch_all(&conn)
}

pub(crate) fn fetch_all(conn: &Connection) -> Result<Vec<ZonalRecord>, String> {
    let mut stmt = conn
        .prepare("SELECT id, name, manager_id, assistant_id, description FROM zonals")
        .map_err(|e| e.to_string())?;

    let rows = stmt
        .query_map([], |row| {
            Ok(ZonalRecord {
                id: db::parse_zonal(0, row.get(0)?)?,
                name: row.get(1)?,
                manager_id: row.get(2)?,
                assistant_id: row.get(3)?,
                description: row.get(4)?,
            })
        })
        .map_err(|e| e.to_string())?;

    rows.collect::<Result<Vec<_>, _>>().map_err(|e| e.to_string())
}

use actix_web::Responder;
use common::wire::UserRecord;
use rusqlite::Connection;

use crate::db;

pub async fn process() -> impl Responder {
    match list_users().await {
        Ok(records) => actix_web::HttpResponse::Ok().json(records),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Erro ao listar colaboradores: {}", e)),
    }
}

pub async fn list_users() -> Result<Vec<UserRecord>, String> {
    let conn = db::open().map_err(|e| e.to_string())?;
    fetch_all(&conn)
}

pub(crate) fn fetch_all(conn: &Connection) -> Result<Vec<UserRecord>, String> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, role, zonal, registration_number, email
             FROM users
             ORDER BY name",
        )
        .map_err(|e| e.to_string())?;

    let rows = stmt
        .query_map([], |row| {
            Ok(UserRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                role: row.get(2)?,
                zonal: db::parse_zonal(3, row.get(3)?)?,
                registration_number: row.get(4)?,
                email: row.get(5)?,
            })
        })
        .map_err(|e| e.to_string())?;

    rows.collect::<Result<Vec<_>, _>>().map_err(|e| e.to_string())
}

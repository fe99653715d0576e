use actix_web::{web, Responder};
use common::wire::ZonalRecord;
use rusqlite::{params, Connection};

use crate::db;

pub async fn process(payload: web::Json<ZonalRecord>) -> impl Responder {
    match save_zonal(&payload).await {
        Ok(_) => actix_web::HttpResponse::Ok().body("Zonal atualizada"),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Erro ao salvar zonal: {}", e)),
    }
}

pub async fn save_zonal(record: &ZonalRecord) -> Result<(), String> {
    let conn = db::open().map_err(|e| e.to_string())?;
    upsert(&conn, record)
}

pub(crate) fn upsert(conn: &Connection, record: &ZonalRecord) -> Result<(), String> {
    conn.execute(
        "INSERT INTO zonals (id, name, manager_id, assistant_id, description)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            manager_id = excluded.manager_id,
            assistant_id = excluded.assistant_id,
            description = excluded.description",
        params![
            record.id.id(),
            &record.name,
            &record.manager_id,
            &record.assistant_id,
            &record.description,
        ],
    )
    .map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::zonals::list;
    use common::model::zonal::Zonal;

    #[test]
    fn upsert_overrides_the_seeded_row() {
        let conn = crate::db::open_in_memory();
        let record = ZonalRecord {
            id: Zonal::North,
            name: "Regional Norte".to_string(),
            manager_id: Some("u1".to_string()),
            assistant_id: None,
            description: Some("Cobertura dos bairros ao norte".to_string()),
        };
        upsert(&conn, &record).unwrap();

        let zonals = list::fetch_all(&conn).unwrap();
        assert_eq!(zonals.len(), 4);
        let north = zonals.iter().find(|z| z.id == Zonal::North).unwrap();
        assert_eq!(north.name, "Regional Norte");
        assert_eq!(north.manager_id.as_deref(), Some("u1"));
        assert_eq!(north.assistant_id, None);
    }
}

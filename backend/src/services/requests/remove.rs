use actix_web::{web, Responder};
use rusqlite::{params, Connection};

use crate::db;

pub async fn process(request_id: web::Path<String>) -> impl Responder {
    match delete_request(&request_id).await {
        Ok(_) => actix_web::HttpResponse::Ok().body("Solicitação removida"),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Erro ao remover solicitação: {}", e)),
    }
}

pub async fn delete_request(id: &str) -> Result<(), String> {
    let conn = db::open().map_err(|e| e.to_string())?;
    delete(&conn, id)
}

/// Removing an absent id is a no-op, not an error.
pub(crate) fn delete(conn: &Connection, id: &str) -> Result<(), String> {
    conn.execute("DELETE FROM repair_requests WHERE id = ?1", params![id])
        .map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::requests::{create, list, sample_record};

    #[test]
    fn removes_only_the_target_row() {
        let conn = crate::db::open_in_memory();
        create::insert(&conn, &sample_record("req_001", "2024-05-08")).unwrap();
        create::insert(&conn, &sample_record("req_002", "2024-05-10")).unwrap();

        delete(&conn, "req_001").unwrap();
        let remaining = list::fetch_all(&conn).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "req_002");

        // Deleting again is a silent no-op.
        delete(&conn, "req_001").unwrap();
        assert_eq!(list::fetch_all(&conn).unwrap().len(), 1);
    }
}

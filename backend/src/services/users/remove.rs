use actix_web::{web, Responder};
use rusqlite::{params, Connection};

use crate::db;

pub async fn process(user_id: web::Path<String>) -> impl Responder {
    match delete_user(&user_id).await {
        Ok(_) => actix_web::HttpResponse::Ok().body("Colaborador removido"),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Erro ao remover colaborador: {}", e)),
    }
}

pub async fn delete_user(id: &str) -> Result<(), String> {
    let conn = db::open().map_err(|e| e.to_string())?;
    delete(&conn, id)
}

/// No cascade: requests and zonal rows that reference the user keep their
/// ids and resolve to placeholders on the client.
pub(crate) fn delete(conn: &Connection, id: &str) -> Result<(), String> {
    conn.execute("DELETE FROM users WHERE id = ?1", params![id])
        .map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::users::{list, sample_user, save};

    #[test]
    fn deleting_a_referenced_manager_leaves_the_zonal_row_untouched() {
        let conn = crate::db::open_in_memory();
        save::upsert(&conn, &sample_user("u4", "Juliana Lima", "Manager", "Zonal Sul")).unwrap();
        conn.execute(
            "UPDATE zonals SET manager_id = 'u4' WHERE id = 'Zonal Sul'",
            [],
        )
        .unwrap();

        delete(&conn, "u4").unwrap();
        assert!(list::fetch_all(&conn).unwrap().is_empty());

        let dangling: Option<String> = conn
            .query_row(
                "SELECT manager_id FROM zonals WHERE id = 'Zonal Sul'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(dangling.as_deref(), Some("u4"));
    }
}

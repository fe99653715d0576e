use actix_web::{web, Responder};
use common::wire::UserRecord;
use rusqlite::{params, Connection};

use crate::db;

pub async fn process(payload: web::Json<UserRecord>) -> impl Responder {
    match save_user(&payload).await {
        Ok(_) => actix_web::HttpResponse::Ok().body("Colaborador salvo"),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Erro ao salvar colaborador: {}", e)),
    }
}

pub async fn save_user(record: &UserRecord) -> Result<(), String> {
    if record.id.trim().is_empty() {
        return Err("O identificador do colaborador não pode estar vazio".to_string());
    }
    let conn = db::open().map_err(|e| e.to_string())?;
    upsert(&conn, record)
}

pub(crate) fn upsert(conn: &Connection, record: &UserRecord) -> Result<(), String> {
    conn.execute(
        "INSERT INTO users (id, name, role, zonal, registration_number, email)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            role = excluded.role,
            zonal = excluded.zonal,
            registration_number = excluded.registration_number,
            email = excluded.email",
        params![
            &record.id,
            &record.name,
            &record.role,
            record.zonal.id(),
            &record.registration_number,
            &record.email,
        ],
    )
    .map_err(|e| {
        let message = e.to_string();
        if message.contains("users.zonal") {
            "Já existe um gerente cadastrado para esta zonal".to_string()
        } else {
            message
        }
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::users::{list, sample_user};

    #[test]
    fn upsert_replaces_the_existing_row() {
        let conn = crate::db::open_in_memory();
        upsert(&conn, &sample_user("u2", "Ana Oliveira", "Collaborator", "Zonal Norte")).unwrap();

        let mut edited = sample_user("u2", "Ana Oliveira", "Collaborator", "Zonal Norte");
        edited.email = Some("ana@prefeitura.gov.br".to_string());
        upsert(&conn, &edited).unwrap();

        let users = list::fetch_all(&conn).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email.as_deref(), Some("ana@prefeitura.gov.br"));
    }

    #[test]
    fn a_second_manager_for_the_same_zone_is_rejected() {
        let conn = crate::db::open_in_memory();
        upsert(&conn, &sample_user("u4", "Juliana Lima", "Manager", "Zonal Sul")).unwrap();

        let err =
            upsert(&conn, &sample_user("u9", "Marcos Dias", "Manager", "Zonal Sul")).unwrap_err();
        assert!(err.contains("gerente"));

        // Re-saving the incumbent manager is fine.
        upsert(&conn, &sample_user("u4", "Juliana Lima", "Manager", "Zonal Sul")).unwrap();
        // And a manager for another zone is fine.
        upsert(&conn, &sample_user("u1", "Ricardo Souza", "Manager", "Zonal Norte")).unwrap();
    }
}

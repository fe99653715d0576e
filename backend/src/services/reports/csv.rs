use ::csv::Writer;
use actix_web::{web, Responder};
use common::wire::ReportPayload;

pub async fn process(payload: web::Json<ReportPayload>) -> impl Responder {
    match render_csv(&payload) {
        Ok(bytes) => actix_web::HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"relatorio_reparos.csv\"",
            ))
            .body(bytes),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Erro ao gerar o relatório CSV: {}", e)),
    }
}

pub(crate) fn render_csv(payload: &ReportPayload) -> Result<Vec<u8>, String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer
        .write_record([
            "Protocolo",
            "SEI",
            "Contrato",
            "Status",
            "Zonal",
            "Data_Visita",
            "Endereco",
            "Latitude",
            "Longitude",
            "Descricao",
            "Responsavel",
        ])
        .map_err(|e| e.to_string())?;

    for request in &payload.requests {
        let technician = payload
            .users
            .iter()
            .find(|u| u.id == request.technician_id)
            .map_or("N/A", |u| u.name.as_str());
        let latitude = request.latitude.to_string();
        let longitude = request.longitude.to_string();
        writer
            .write_record([
                request.protocol.as_str(),
                request.sei_number.as_str(),
                request.contract.as_str(),
                request.status.label(),
                request.zonal.id(),
                request.visit_date.as_str(),
                request.address.as_str(),
                latitude.as_str(),
                longitude.as_str(),
                request.description.as_str(),
                technician,
            ])
            .map_err(|e| e.to_string())?;
    }

    writer
        .into_inner()
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::requests::sample_record;
    use crate::services::users::sample_user;

    #[test]
    fn rows_are_flattened_with_resolved_technician() {
        let payload = ReportPayload {
            requests: vec![sample_record("req_001", "2024-05-08")],
            users: vec![sample_user("u2", "Ana Oliveira", "Collaborator", "Zonal Norte")],
        };

        let bytes = render_csv(&payload).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("Protocolo,SEI,Contrato"));
        let row = lines.next().unwrap();
        assert!(row.contains("2024.req_001"));
        assert!(row.contains("Aberta"));
        assert!(row.contains("Zonal Norte"));
        assert!(row.contains("Ana Oliveira"));
    }

    #[test]
    fn unresolved_technician_falls_back_to_na() {
        let payload = ReportPayload {
            requests: vec![sample_record("req_001", "2024-05-08")],
            users: vec![],
        };

        let text = String::from_utf8(render_csv(&payload).unwrap()).unwrap();
        assert!(text.lines().nth(1).unwrap().ends_with("N/A"));
    }
}

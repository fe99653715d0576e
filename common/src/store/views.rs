//! Read-only projections over the store collections.
//!
//! Everything here is a pure function of its inputs: no side effects, no
//! caching, no partial state. Two calls over the same collections yield
//! identical results. Dangling references degrade to [`UNRESOLVED`] instead
//! of failing.

use crate::model::request::{RepairRequest, RequestStatus};
use crate::model::user::User;
use crate::model::zonal::{Zonal, ZonalMetadata};

/// Placeholder shown wherever a reference does not resolve.
pub const UNRESOLVED: &str = "Não definido";

/// Display name of a zone: the metadata override when present, the raw id
/// otherwise. The fallback is an "unresolved" signal, not a canonical name.
pub fn resolve_zonal_name(zonals: &[ZonalMetadata], id: Zonal) -> String {
    zonals
        .iter()
        .find(|z| z.id == id)
        .map_or_else(|| id.to_string(), |z| z.name.clone())
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub canceled: usize,
}

pub fn status_counts(requests: &[RepairRequest]) -> StatusCounts {
    let mut counts = StatusCounts {
        total: requests.len(),
        ..StatusCounts::default()
    };
    for request in requests {
        match request.status {
            RequestStatus::Open => counts.open += 1,
            RequestStatus::InProgress => counts.in_progress += 1,
            RequestStatus::Completed => counts.completed += 1,
            RequestStatus::Canceled => counts.canceled += 1,
        }
    }
    counts
}

/// Request count per zone, in `Zonal::ALL` order, keyed by the resolved
/// display name.
pub fn zonal_request_counts(
    requests: &[RepairRequest],
    zonals: &[ZonalMetadata],
) -> Vec<(String, usize)> {
    Zonal::ALL
        .into_iter()
        .map(|zonal| {
            let count = requests.iter().filter(|r| r.zonal == zonal).count();
            (resolve_zonal_name(zonals, zonal), count)
        })
        .collect()
}

pub fn zonal_roster<'a>(users: &'a [User], zonal: Zonal) -> Vec<&'a User> {
    users.iter().filter(|u| u.zonal == zonal).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonalStats {
    pub manager_name: String,
    pub assistant_name: String,
    pub team_size: usize,
    pub open_requests: usize,
}

fn resolve_user_name(users: &[User], id: Option<&String>) -> String {
    id.and_then(|id| users.iter().find(|u| &u.id == id))
        .map_or_else(|| UNRESOLVED.to_string(), |u| u.name.clone())
}

/// Composite card for the organisation page: resolved manager/assistant,
/// team size and the number of requests still awaiting field work.
pub fn zonal_stats(
    zonal: Zonal,
    users: &[User],
    requests: &[RepairRequest],
    zonals: &[ZonalMetadata],
) -> ZonalStats {
    let meta = zonals.iter().find(|z| z.id == zonal);
    ZonalStats {
        manager_name: resolve_user_name(users, meta.and_then(|m| m.manager_id.as_ref())),
        assistant_name: resolve_user_name(users, meta.and_then(|m| m.assistant_id.as_ref())),
        team_size: users.iter().filter(|u| u.zonal == zonal).count(),
        open_requests: requests
            .iter()
            .filter(|r| r.zonal == zonal && r.status.is_active())
            .count(),
    }
}

/// Filter applied by the request list: free text matched case-insensitively
/// against protocol, address and description, plus optional status and zone
/// restrictions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestFilter {
    pub search: String,
    pub status: Option<RequestStatus>,
    pub zonal: Option<Zonal>,
}

pub fn filter_requests<'a>(
    requests: &'a [RepairRequest],
    filter: &RequestFilter,
) -> Vec<&'a RepairRequest> {
    let needle = filter.search.trim().to_lowercase();
    requests
        .iter()
        .filter(|r| {
            let matches_search = needle.is_empty()
                || r.protocol.to_lowercase().contains(&needle)
                || r.location.address.to_lowercase().contains(&needle)
                || r.description.to_lowercase().contains(&needle);
            let matches_status = filter.status.is_none_or(|s| r.status == s);
            let matches_zonal = filter.zonal.is_none_or(|z| r.zonal == z);
            matches_search && matches_status && matches_zonal
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::request::LocationData;

    fn request(id: &str, zonal: Zonal, status: RequestStatus) -> RepairRequest {
        RepairRequest {
            id: id.to_string(),
            protocol: format!("2024.{id}"),
            sei_number: String::new(),
            contract: String::new(),
            description: format!("reparo {id}"),
            location: LocationData {
                latitude: 0.0,
                longitude: 0.0,
                address: format!("Rua {id}"),
            },
            visit_date: "2024-05-15".to_string(),
            status,
            technician_id: "u2".to_string(),
            zonal,
            photo_before: None,
            photo_after: None,
            created_at: "2024-05-10".to_string(),
        }
    }

    fn user(id: &str, name: &str, role: &str, zonal: Zonal) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            zonal,
            registration_number: None,
            email: None,
        }
    }

    #[test]
    fn status_counts_cover_every_status() {
        let requests = vec![
            request("a", Zonal::North, RequestStatus::Open),
            request("b", Zonal::North, RequestStatus::Open),
            request("c", Zonal::South, RequestStatus::InProgress),
            request("d", Zonal::East, RequestStatus::Completed),
            request("e", Zonal::West, RequestStatus::Canceled),
        ];
        let counts = status_counts(&requests);
        assert_eq!(counts.total, 5);
        assert_eq!(counts.open, 2);
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.canceled, 1);
    }

    #[test]
    fn status_counts_is_referentially_transparent() {
        let requests = vec![
            request("a", Zonal::North, RequestStatus::Open),
            request("b", Zonal::South, RequestStatus::Completed),
        ];
        assert_eq!(status_counts(&requests), status_counts(&requests));
    }

    #[test]
    fn zonal_name_falls_back_to_raw_id() {
        assert_eq!(resolve_zonal_name(&[], Zonal::North), "Zonal Norte");

        let mut zonals = ZonalMetadata::defaults();
        zonals[0].name = "Regional Norte".to_string();
        assert_eq!(resolve_zonal_name(&zonals, Zonal::North), "Regional Norte");
        assert_eq!(resolve_zonal_name(&zonals, Zonal::South), "Zonal Sul");
    }

    #[test]
    fn zonal_stats_resolve_dangling_manager_to_placeholder() {
        let mut zonals = ZonalMetadata::defaults();
        zonals[1].manager_id = Some("u_removed".to_string());

        let users = vec![user("u5", "Ana Oliveira", "Collaborator", Zonal::South)];
        let stats = zonal_stats(Zonal::South, &users, &[], &zonals);
        assert_eq!(stats.manager_name, UNRESOLVED);
        assert_eq!(stats.assistant_name, UNRESOLVED);
        assert_eq!(stats.team_size, 1);
    }

    #[test]
    fn zonal_stats_count_only_active_requests() {
        let mut zonals = ZonalMetadata::defaults();
        zonals[0].manager_id = Some("u1".to_string());

        let users = vec![
            user("u1", "Eng. Ricardo Souza", "Manager", Zonal::North),
            user("u2", "Ana Oliveira", "Collaborator", Zonal::North),
        ];
        let requests = vec![
            request("a", Zonal::North, RequestStatus::Open),
            request("b", Zonal::North, RequestStatus::InProgress),
            request("c", Zonal::North, RequestStatus::Completed),
            request("d", Zonal::South, RequestStatus::Open),
        ];
        let stats = zonal_stats(Zonal::North, &users, &requests, &zonals);
        assert_eq!(stats.manager_name, "Eng. Ricardo Souza");
        assert_eq!(stats.team_size, 2);
        assert_eq!(stats.open_requests, 2);
    }

    #[test]
    fn filter_matches_text_status_and_zone() {
        let requests = vec![
            request("a", Zonal::North, RequestStatus::Open),
            request("b", Zonal::South, RequestStatus::Open),
            request("c", Zonal::South, RequestStatus::Completed),
        ];

        let by_text = filter_requests(
            &requests,
            &RequestFilter {
                search: "RUA B".to_string(),
                ..RequestFilter::default()
            },
        );
        assert_eq!(by_text.len(), 1);
        assert_eq!(by_text[0].id, "b");

        let by_zone_and_status = filter_requests(
            &requests,
            &RequestFilter {
                search: String::new(),
                status: Some(RequestStatus::Open),
                zonal: Some(Zonal::South),
            },
        );
        assert_eq!(by_zone_and_status.len(), 1);
        assert_eq!(by_zone_and_status[0].id, "b");
    }
}

//! Response and request types for the Bitly v4 endpoints this crate covers.
//!
//! Only the fields callers routinely need are modelled. Everything else the
//! API sends lands in each type's `extra` map, so new upstream fields are
//! never dropped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unmodelled fields, preserved verbatim.
pub type Extra = Map<String, Value>;

// ── Organizations ────────────────────────────────────────────────────

/// An organization — from `GET /v4/organizations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub guid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationsResponse {
    pub organizations: Vec<Organization>,
    #[serde(flatten)]
    pub extra: Extra,
}

// ── Groups ───────────────────────────────────────────────────────────

/// A group within an organization — from `GET /v4/groups`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub guid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub organization_guid: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupsResponse {
    pub groups: Vec<Group>,
    #[serde(flatten)]
    pub extra: Extra,
}

// ── Bitlinks ─────────────────────────────────────────────────────────

/// Body of `POST /v4/shorten`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortenRequest<'a> {
    pub long_url: &'a str,
    pub group_guid: &'a str,
}

/// A shortened link — from `POST /v4/shorten`.
///
/// `id` is the `domain/hash` form accepted by
/// [`LinkReference::parse`](crate::LinkReference::parse).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bitlink {
    pub id: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub long_url: Option<String>,
    /// ISO 8601 date-time.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One entry of a delete response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedLink {
    pub id: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Result of `DELETE /v4/bitlinks/{domain}/{hash}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub links_deleted: Vec<DeletedLink>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unknown_fields_land_in_extra() {
        let org: Organization = serde_json::from_value(json!({
            "guid": "Oa1b2c3",
            "name": "Acme",
            "tier": "free",
            "role": "org-admin"
        }))
        .unwrap();

        assert_eq!(org.guid, "Oa1b2c3");
        assert_eq!(org.name.as_deref(), Some("Acme"));
        assert_eq!(org.is_active, None);
        assert_eq!(org.extra.get("tier"), Some(&json!("free")));
        assert_eq!(org.extra.len(), 2);
    }

    #[test]
    fn shorten_request_serializes_snake_case() {
        let body = serde_json::to_value(ShortenRequest {
            long_url: "https://example.com",
            group_guid: "Bg1",
        })
        .unwrap();
        assert_eq!(
            body,
            json!({ "long_url": "https://example.com", "group_guid": "Bg1" })
        );
    }

    #[test]
    fn delete_response_requires_links_deleted() {
        let result = serde_json::from_value::<DeleteResponse>(json!({ "status": "ok" }));
        assert!(result.is_err());
    }
}

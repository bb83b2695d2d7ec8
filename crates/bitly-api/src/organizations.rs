// Organization and group endpoints
//
// Both are plain authenticated GETs; the group listing is scoped to one
// organization via the `organization_guid` query parameter.

use tracing::debug;

use crate::client::BitlyClient;
use crate::error::Error;
use crate::models::{GroupsResponse, OrganizationsResponse};

impl BitlyClient {
    /// List organizations visible to the token's user.
    ///
    /// `GET /v4/organizations`
    pub async fn list_organizations(&self) -> Result<OrganizationsResponse, Error> {
        let url = self.url(&["v4", "organizations"])?;
        debug!("listing organizations");
        self.get(url, &[]).await
    }

    /// List groups belonging to an organization.
    ///
    /// `GET /v4/groups?organization_guid={organization_guid}`
    pub async fn list_groups(&self, organization_guid: &str) -> Result<GroupsResponse, Error> {
        let url = self.url(&["v4", "groups"])?;
        debug!(organization_guid, "listing groups");
        self.get(url, &[("organization_guid", organization_guid.to_owned())])
            .await
    }
}

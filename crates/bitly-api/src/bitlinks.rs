// Bitlink endpoints: shorten, delete, and click analytics.

use futures_util::future::join_all;
use serde_json::Value;
use tracing::{debug, warn};

use crate::clicks::{ClicksQuery, ClicksResult};
use crate::client::BitlyClient;
use crate::error::Error;
use crate::link::LinkReference;
use crate::models::{Bitlink, DeleteResponse, ShortenRequest};

impl BitlyClient {
    /// Shorten `long_url` inside the given group.
    ///
    /// `POST /v4/shorten`
    pub async fn shorten_link(&self, long_url: &str, group_guid: &str) -> Result<Bitlink, Error> {
        let url = self.url(&["v4", "shorten"])?;
        debug!(long_url, group_guid, "shortening link");
        self.post(
            url,
            &ShortenRequest {
                long_url,
                group_guid,
            },
        )
        .await
    }

    /// Delete a bitlink. `link` may be a full short URL, `domain/hash`, or a
    /// bare hash on `bit.ly`.
    ///
    /// `DELETE /v4/bitlinks/{domain}/{hash}`
    pub async fn delete_link(&self, link: &str) -> Result<DeleteResponse, Error> {
        let link = LinkReference::parse(link);
        let url = self.url(&["v4", "bitlinks", link.domain.as_str(), link.hash.as_str()])?;
        debug!(%link, "deleting bitlink");
        self.delete(url, &[]).await
    }

    /// Fetch per-period click counts for a bitlink and sum them.
    ///
    /// `GET /v4/bitlinks/{domain}/{hash}/clicks?unit=..&units=..[&unit_reference=..]`
    ///
    /// The query is validated first; an invalid one never reaches the
    /// network.
    pub async fn get_clicks(&self, query: &ClicksQuery) -> Result<ClicksResult, Error> {
        query.validate()?;
        let link = &query.link;
        let url = self.url(&[
            "v4",
            "bitlinks",
            link.domain.as_str(),
            link.hash.as_str(),
            "clicks",
        ])?;
        debug!(%link, unit = %query.unit, units = query.unit_count, "fetching clicks");

        let raw: Value = self.get(url, &query.params()).await?;
        let result = ClicksResult::from_response(raw)?;
        debug!(
            %link,
            total = %result.total_clicks(),
            periods = result.periods().len(),
            "clicks aggregated"
        );
        Ok(result)
    }

    /// Fetch clicks for several links at once over this session.
    ///
    /// Results come back in input order, one per query. A failure for one
    /// link is reported in its slot and does not affect the others.
    pub async fn get_clicks_many(
        &self,
        queries: &[ClicksQuery],
    ) -> Vec<Result<ClicksResult, Error>> {
        let results = join_all(queries.iter().map(|query| self.get_clicks(query))).await;
        for (query, result) in queries.iter().zip(&results) {
            if let Err(err) = result {
                warn!(link = %query.link, error = %err, "clicks lookup failed");
            }
        }
        results
    }
}

//! Limit/offset pagination.
//!
//! `limit` falls back to the configured page size when absent, zero or not a number and is
//! capped by the configured maximum. `offset` falls back to zero. Neither is ever an error.

use url::Url;

use crate::{model::api::PaginatedDto, server::util::query::QueryParams};

const LIMIT_PARAM: &str = "limit";
const OFFSET_PARAM: &str = "offset";

/// Window of a list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub offset: u64,
}

impl PageRequest {
    /// Reads `limit` and `offset` from the query string.
    ///
    /// # Arguments
    /// - `params` - Decoded query string
    /// - `page_size` - Default limit
    /// - `max_page_size` - Upper bound applied to a client-supplied limit
    pub fn from_params(params: &QueryParams, page_size: u64, max_page_size: u64) -> Self {
        let limit = params
            .get(LIMIT_PARAM)
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|limit| *limit > 0)
            .map(|limit| limit.min(max_page_size))
            .unwrap_or(page_size);

        let offset = params
            .get(OFFSET_PARAM)
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(0);

        Self { limit, offset }
    }

    /// Wraps one page of results in the list envelope.
    ///
    /// # Arguments
    /// - `collection_url` - Absolute URL of the collection, without query string
    /// - `params` - Query string of the current request, carried into the links
    /// - `count` - Total number of matching rows
    /// - `results` - Rows of the current page
    pub fn envelope<T>(
        &self,
        collection_url: &str,
        params: &QueryParams,
        count: u64,
        results: Vec<T>,
    ) -> PaginatedDto<T> {
        PaginatedDto {
            count,
            next: self.next_link(collection_url, params, count),
            previous: self.previous_link(collection_url, params),
            results,
        }
    }

    fn next_link(&self, collection_url: &str, params: &QueryParams, count: u64) -> Option<String> {
        if self.offset.saturating_add(self.limit) >= count {
            return None;
        }

        let params = params
            .with(LIMIT_PARAM, Some(self.limit.to_string()))
            .with(OFFSET_PARAM, Some((self.offset + self.limit).to_string()));

        build_url(collection_url, &params)
    }

    fn previous_link(&self, collection_url: &str, params: &QueryParams) -> Option<String> {
        if self.offset == 0 {
            return None;
        }

        let params = params.with(LIMIT_PARAM, Some(self.limit.to_string()));

        // The first page is addressed without an offset.
        let params = if self.offset <= self.limit {
            params.with(OFFSET_PARAM, None)
        } else {
            params.with(OFFSET_PARAM, Some((self.offset - self.limit).to_string()))
        };

        build_url(collection_url, &params)
    }
}

fn build_url(collection_url: &str, params: &QueryParams) -> Option<String> {
    let mut url = match Url::parse(collection_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("Invalid collection URL {}: {}", collection_url, e);
            return None;
        }
    };

    if params.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(params.iter());
    }

    Some(url.into())
}

use crate::domain::OfferKind;
use crate::scraper::ScraperError;
use url::Url;

/// Feed location plus the credential that is part of its path.
#[derive(Debug, Clone)]
pub struct Endpoint {
    base: Url,
    api_key: String,
}

impl Endpoint {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, ScraperError> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(ScraperError::InvalidArgument(format!(
                "base url '{base_url}' cannot carry a path"
            )));
        }
        Ok(Self {
            base,
            api_key: api_key.into(),
        })
    }
}

/// Search parameters of one fetch session; the page index is supplied per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub offer_kind: OfferKind,
    pub locality: String,
    pub category: Option<String>,
    pub page_size: u32,
}

impl ListingQuery {
    pub fn new(offer_kind: OfferKind, locality: impl Into<String>, page_size: u32) -> Self {
        Self {
            offer_kind,
            locality: locality.into(),
            category: None,
            page_size,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Search path for the `zo` parameter, e.g. `/amsterdam/tuin/`.
    pub fn search_path(&self) -> String {
        let locality = self.locality.trim_matches('/');
        match self.category.as_deref().map(|c| c.trim_matches('/')) {
            Some(category) if !category.is_empty() => format!("/{locality}/{category}/"),
            _ => format!("/{locality}/"),
        }
    }

    /// `{base}/{api_key}/?type=..&zo=..&page=..&pagesize=..`
    pub fn page_url(&self, endpoint: &Endpoint, page: u32) -> Result<Url, ScraperError> {
        let mut url = endpoint.base.clone();

        url.path_segments_mut()
            .map_err(|_| ScraperError::InvalidArgument("base url cannot carry a path".into()))?
            .pop_if_empty()
            .push(&endpoint.api_key)
            .push("");

        url.query_pairs_mut()
            .append_pair("type", self.offer_kind.api_type())
            .append_pair("zo", &self.search_path())
            .append_pair("page", &page.to_string())
            .append_pair("pagesize", &self.page_size.to_string());

        Ok(url)
    }
}

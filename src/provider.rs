//! Icon data providers and the cached [`IconSource`] in front of them.
//!
//! A provider answers two questions: which icons a collection contains, and
//! what one icon's SVG markup is. [`IconSource`] consults the
//! [`ResourceCache`] first and only falls through to the provider on a miss.
//! Failed fetches are never retried.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use crate::cache::{CacheKey, ResourceCache};
use crate::error::FetchError;

/// Remote source of icon names and markup.
pub trait IconProvider {
    /// Lists the icon names of the collection identified by `prefix`.
    fn list_icon_names(&self, prefix: &str) -> Result<Vec<String>, FetchError>;

    /// Fetches the SVG markup of one icon.
    fn fetch_icon_markup(&self, prefix: &str, name: &str) -> Result<String, FetchError>;
}

// ============================================================================
// IconSource
// ============================================================================

/// Cache-fronted access to an [`IconProvider`].
pub struct IconSource {
    provider: Box<dyn IconProvider>,
    cache: ResourceCache,
}

impl IconSource {
    pub fn new(provider: impl IconProvider + 'static, cache: ResourceCache) -> Self {
        Self {
            provider: Box::new(provider),
            cache,
        }
    }

    /// Icon names of a collection. Empty listings are not cached.
    pub fn icon_names(&mut self, prefix: &str) -> Result<Vec<String>, FetchError> {
        let key = CacheKey::icon_list(prefix);
        if let Some(names) = self.cache.get::<Vec<String>>(&key) {
            return Ok(names);
        }

        let names = self.provider.list_icon_names(prefix)?;
        if !names.is_empty() {
            self.cache.put(&key, &names);
        }
        Ok(names)
    }

    /// SVG markup of one icon.
    pub fn icon_markup(&mut self, prefix: &str, name: &str) -> Result<String, FetchError> {
        let key = CacheKey::icon_markup(prefix, name);
        if let Some(svg) = self.cache.get::<String>(&key).filter(|svg| !svg.is_empty()) {
            return Ok(svg);
        }

        let svg = self.provider.fetch_icon_markup(prefix, name)?;
        self.cache.put(&key, &svg);
        Ok(svg)
    }

    pub fn cache_mut(&mut self) -> &mut ResourceCache {
        &mut self.cache
    }
}

// ============================================================================
// StaticProvider
// ============================================================================

/// Provider serving icons from memory. Useful offline and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    icons: Vec<(String, String, String)>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) an icon.
    pub fn with_icon(
        mut self,
        prefix: impl Into<String>,
        name: impl Into<String>,
        svg: impl Into<String>,
    ) -> Self {
        let (prefix, name, svg) = (prefix.into(), name.into(), svg.into());
        match self
            .icons
            .iter_mut()
            .find(|(p, n, _)| *p == prefix && *n == name)
        {
            Some(existing) => existing.2 = svg,
            None => self.icons.push((prefix, name, svg)),
        }
        self
    }
}

impl IconProvider for StaticProvider {
    fn list_icon_names(&self, prefix: &str) -> Result<Vec<String>, FetchError> {
        Ok(self
            .icons
            .iter()
            .filter(|(p, _, _)| p == prefix)
            .map(|(_, name, _)| name.clone())
            .collect())
    }

    fn fetch_icon_markup(&self, prefix: &str, name: &str) -> Result<String, FetchError> {
        self.icons
            .iter()
            .find(|(p, n, _)| p == prefix && n == name)
            .map(|(_, _, svg)| svg.clone())
            .ok_or_else(|| FetchError::NotFound {
                prefix: prefix.to_string(),
                name: name.to_string(),
            })
    }
}

// ============================================================================
// Iconify
// ============================================================================

/// Shape of the Iconify `/collection` response we care about.
#[derive(Debug, Default, Deserialize)]
struct CollectionListing {
    #[serde(default)]
    uncategorized: Vec<String>,
    #[serde(default)]
    categories: BTreeMap<String, Vec<String>>,
}

/// Extracts icon names from an Iconify collection listing: uncategorized
/// names first, then categorized ones, without duplicates.
fn parse_collection_listing(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let listing: CollectionListing = serde_json::from_str(body)?;
    let mut seen = HashSet::new();
    Ok(listing
        .uncategorized
        .into_iter()
        .chain(listing.categories.into_values().flatten())
        .filter(|name| seen.insert(name.clone()))
        .collect())
}

#[cfg(feature = "http")]
pub use iconify::IconifyProvider;

#[cfg(feature = "http")]
mod iconify {
    use std::time::Duration;

    use super::{parse_collection_listing, IconProvider};
    use crate::error::FetchError;
    use crate::icon::normalize_icon_name;

    /// Provider backed by the public Iconify HTTP API.
    pub struct IconifyProvider {
        agent: ureq::Agent,
        base_url: String,
    }

    impl IconifyProvider {
        pub const DEFAULT_BASE_URL: &'static str = "https://api.iconify.design";

        pub fn new() -> Self {
            Self::with_base_url(Self::DEFAULT_BASE_URL)
        }

        /// Targets a self-hosted Iconify API.
        pub fn with_base_url(base_url: impl Into<String>) -> Self {
            let agent = ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(30))
                .build();
            Self {
                agent,
                base_url: base_url.into().trim_end_matches('/').to_string(),
            }
        }

        pub fn collection_url(&self, prefix: &str) -> String {
            format!("{}/collection?prefix={prefix}", self.base_url)
        }

        pub fn icon_url(&self, prefix: &str, name: &str) -> String {
            format!("{}/{prefix}/{}.svg", self.base_url, normalize_icon_name(name))
        }

        fn get_text(&self, url: &str) -> Result<String, FetchError> {
            log::debug!("GET {url}");
            let response = self.agent.get(url).call().map_err(|err| match err {
                ureq::Error::Status(status, _) => FetchError::Status {
                    url: url.to_string(),
                    status,
                },
                other => FetchError::Transport {
                    url: url.to_string(),
                    message: other.to_string(),
                },
            })?;
            response.into_string().map_err(|err| FetchError::Body {
                url: url.to_string(),
                message: err.to_string(),
            })
        }
    }

    impl Default for IconifyProvider {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IconProvider for IconifyProvider {
        fn list_icon_names(&self, prefix: &str) -> Result<Vec<String>, FetchError> {
            let url = self.collection_url(prefix);
            let body = self.get_text(&url)?;
            parse_collection_listing(&body).map_err(|err| FetchError::Body {
                url,
                message: err.to_string(),
            })
        }

        fn fetch_icon_markup(&self, prefix: &str, name: &str) -> Result<String, FetchError> {
            self.get_text(&self.icon_url(prefix, name))
        }
    }

}

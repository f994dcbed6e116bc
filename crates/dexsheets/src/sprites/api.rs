//! Species API client

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::data::Catalog;

/// Page size that returns the whole catalog in one request
const CATALOG_LIMIT: u32 = 100_000;

/// A failed API request
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the body not read
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Non-success HTTP status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body was not the expected JSON
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Species detail record, reduced to the fields in use
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpeciesDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprites: SpriteUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SpriteUrls {
    #[serde(default)]
    pub front_default: Option<String>,
}

impl SpeciesDetail {
    /// Default front sprite URL, if the species has one
    pub fn front_sprite(&self) -> Option<&str> {
        self.sprites.front_default.as_deref()
    }
}

/// The requests the sprite fetcher makes
pub trait SpeciesApi {
    /// Fetch the full species catalog
    fn catalog(&self) -> Result<Catalog, ApiError>;

    /// Fetch a species detail record from its catalog URL
    fn detail(&self, url: &str) -> Result<SpeciesDetail, ApiError>;

    /// Download raw image bytes
    fn image(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

impl<T: SpeciesApi + ?Sized> SpeciesApi for &T {
    fn catalog(&self) -> Result<Catalog, ApiError> {
        (**self).catalog()
    }

    fn detail(&self, url: &str) -> Result<SpeciesDetail, ApiError> {
        (**self).detail(url)
    }

    fn image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        (**self).image(url)
    }
}

/// Blocking HTTP client for PokeAPI v2
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::blocking::Client,
    base: String,
}

impl HttpApi {
    /// Create a client rooted at `base` (e.g. `https://pokeapi.co/api/v2`)
    pub fn new(base: impl Into<String>) -> Result<Self, ApiError> {
        let base = base.into().trim_end_matches('/').to_string();
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("dexsheets/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport {
                url: base.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { client, base })
    }

    /// URL of the single-page catalog listing
    pub fn catalog_url(&self) -> String {
        format!("{}/pokemon?limit={}&offset=0", self.base, CATALOG_LIMIT)
    }

    fn get(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let transport = |e: reqwest::Error| ApiError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().map_err(transport)?;
        Ok(body.to_vec())
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let body = self.get(url)?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

impl SpeciesApi for HttpApi {
    fn catalog(&self) -> Result<Catalog, ApiError> {
        self.get_json(&self.catalog_url())
    }

    fn detail(&self, url: &str) -> Result<SpeciesDetail, ApiError> {
        self.get_json(url)
    }

    fn image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        self.get(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_url() {
        let api = HttpApi::new("https://pokeapi.co/api/v2/").unwrap();
        assert_eq!(
            api.catalog_url(),
            "https://pokeapi.co/api/v2/pokemon?limit=100000&offset=0"
        );
    }

    #[test]
    fn test_detail_without_sprite() {
        let detail: SpeciesDetail = serde_json::from_str(
            r#"{"id": 10001, "name": "deoxys-attack", "sprites": {"front_default": null, "back_default": null}, "height": 17}"#,
        )
        .unwrap();
        assert_eq!(detail.front_sprite(), None);

        let detail: SpeciesDetail = serde_json::from_str(r#"{"id": 1, "name": "bulbasaur"}"#).unwrap();
        assert_eq!(detail.front_sprite(), None);
    }

    #[test]
    fn test_detail_with_sprite() {
        let detail: SpeciesDetail = serde_json::from_str(
            r#"{"id": 25, "name": "pikachu", "sprites": {"front_default": "https://img/25.png"}}"#,
        )
        .unwrap();
        assert_eq!(detail.id, 25);
        assert_eq!(detail.front_sprite(), Some("https://img/25.png"));
    }

    #[test]
    fn test_error_messages() {
        let err = ApiError::Status {
            url: "https://pokeapi.co/api/v2/pokemon/0/".into(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "https://pokeapi.co/api/v2/pokemon/0/ returned HTTP 404"
        );
    }
}

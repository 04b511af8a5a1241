//! IBGE "localidades" API client.
//!
//! Source of federative units and municipalities when the local tables
//! cannot answer. One request per call, bounded by the configured timeout.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;

use crate::config::{Config, IBGE_USER_AGENT};
use crate::domain::{GeoState, Municipality};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Remote directory of Brazilian states and municipalities.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeoDirectory: Send + Sync {
    /// All states, ordered by name
    async fn fetch_states(&self) -> AppResult<Vec<GeoState>>;

    /// Municipalities of a state, ordered by name
    async fn fetch_municipalities(&self, state_id: &str) -> AppResult<Vec<Municipality>>;
}

#[derive(Debug, Deserialize)]
struct IbgeState {
    sigla: String,
    nome: String,
}

#[derive(Debug, Deserialize)]
struct IbgeMunicipality {
    id: u64,
    nome: String,
}

/// HTTP client for the IBGE API.
#[derive(Clone)]
pub struct IbgeClient {
    client: reqwest::Client,
    base_url: String,
}

impl IbgeClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(IBGE_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build IBGE client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.ibge_api_url.clone(),
            Duration::from_secs(config.ibge_timeout_seconds),
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "Requesting IBGE");

        let response = self
            .client
            .get(&url)
            .query(&[("orderBy", "nome")])
            .send()
            .await
            .map_err(|e| AppError::external(format!("IBGE request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external(format!("IBGE API error: {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::external(format!("IBGE body unreadable: {}", e)))?;

        parse_body(&body)
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> AppResult<T> {
    if body.trim().is_empty() {
        return Err(AppError::external("Empty response from IBGE API"));
    }

    serde_json::from_str(body)
        .map_err(|e| AppError::external(format!("Malformed IBGE response: {}", e)))
}

fn map_states(raw: Vec<IbgeState>) -> Vec<GeoState> {
    raw.into_iter()
        .map(|s| GeoState {
            id: s.sigla,
            name: s.nome,
        })
        .collect()
}

fn map_municipalities(raw: Vec<IbgeMunicipality>, state_id: &str) -> Vec<Municipality> {
    raw.into_iter()
        .map(|m| Municipality {
            id: m.id.to_string(),
            name: m.nome,
            state_id: state_id.to_string(),
        })
        .collect()
}

#[async_trait]
impl GeoDirectory for IbgeClient {
    async fn fetch_states(&self) -> AppResult<Vec<GeoState>> {
        let raw: Vec<IbgeState> = self.get_json("/estados").await?;
        Ok(map_states(raw))
    }

    async fn fetch_municipalities(&self, state_id: &str) -> AppResult<Vec<Municipality>> {
        let raw: Vec<IbgeMunicipality> = self
            .get_json(&format!("/estados/{}/municipios", state_id))
            .await?;
        Ok(map_municipalities(raw, state_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_mapping() {
        let raw: Vec<IbgeState> = parse_body(
            r#"[{"id":35,"sigla":"SP","nome":"São Paulo","regiao":{"id":3}},
                {"id":33,"sigla":"RJ","nome":"Rio de Janeiro"}]"#,
        )
        .unwrap();

        let states = map_states(raw);
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].id, "SP");
        assert_eq!(states[1].name, "Rio de Janeiro");
    }

    #[test]
    fn test_municipality_ids_become_strings() {
        let raw: Vec<IbgeMunicipality> =
            parse_body(r#"[{"id":3509502,"nome":"Campinas","microrregiao":{}}]"#).unwrap();

        let municipalities = map_municipalities(raw, "SP");
        assert_eq!(municipalities[0].id, "3509502");
        assert_eq!(municipalities[0].state_id, "SP");
    }

    #[test]
    fn test_empty_and_malformed_bodies_fail() {
        assert!(matches!(
            parse_body::<Vec<IbgeState>>("  \n"),
            Err(AppError::ExternalService(_))
        ));
        assert!(matches!(
            parse_body::<Vec<IbgeState>>("<html>busy</html>"),
            Err(AppError::ExternalService(_))
        ));
        assert!(parse_body::<Vec<IbgeState>>("[]").unwrap().is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = IbgeClient::new("http://localhost:9/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url, "http://localhost:9/api");
    }
}

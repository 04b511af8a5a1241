//! Citizen request routed to regional politicians.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Subject area of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RequestType {
    #[serde(rename = "infraestrutura")]
    Infrastructure,
    #[serde(rename = "saude")]
    Health,
    #[serde(rename = "educacao")]
    Education,
    #[serde(rename = "seguranca")]
    Security,
    #[serde(rename = "meio-ambiente")]
    Environment,
    #[serde(rename = "outro")]
    Other,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Infrastructure => "infraestrutura",
            RequestType::Health => "saude",
            RequestType::Education => "educacao",
            RequestType::Security => "seguranca",
            RequestType::Environment => "meio-ambiente",
            RequestType::Other => "outro",
        }
    }
}

impl FromStr for RequestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "infraestrutura" => Ok(RequestType::Infrastructure),
            "saude" => Ok(RequestType::Health),
            "educacao" => Ok(RequestType::Education),
            "seguranca" => Ok(RequestType::Security),
            "meio-ambiente" => Ok(RequestType::Environment),
            "outro" => Ok(RequestType::Other),
            other => Err(format!("unknown request type '{}'", other)),
        }
    }
}

/// Processing status of a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Resolved => "resolved",
            RequestStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "in_progress" => Ok(RequestStatus::InProgress),
            "resolved" => Ok(RequestStatus::Resolved),
            "rejected" => Ok(RequestStatus::Rejected),
            other => Err(format!("unknown request status '{}'", other)),
        }
    }
}

/// Request submitted by a citizen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CitizenRequest {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[schema(example = "SP")]
    pub state: String,
    #[schema(example = "Campinas")]
    pub municipality: String,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub message: String,
    pub status: RequestStatus,
    pub politician_id: Option<Uuid>,
    pub response: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Citizen-supplied fields. Status, politician and response are not part of
/// the input and always start out empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCitizenRequest {
    pub name: String,
    pub email: String,
    pub state: String,
    pub municipality: String,
    pub request_type: RequestType,
    pub message: String,
}

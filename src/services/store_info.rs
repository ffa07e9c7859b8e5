use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::validation::not_blank;
use crate::config::StoreDefaults;
use crate::entities::store_info;
use crate::errors::ServiceError;
use crate::repositories::StoreInfoRepository;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpsertStoreInfoRequest {
    #[validate(
        custom = "not_blank",
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub store_name: String,
    #[serde(default)]
    #[validate(length(max = 300, message = "must be at most 300 characters"))]
    pub address: Option<String>,
    #[serde(default)]
    #[validate(custom = "phone_length")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Blank is allowed (falls back to the default); otherwise 5 to 20 characters.
fn phone_length(phone: &str) -> Result<(), ValidationError> {
    let len = phone.trim().chars().count();
    if len == 0 || (5..=20).contains(&len) {
        return Ok(());
    }
    let mut err = ValidationError::new("phone_length");
    err.message = Some("must be between 5 and 20 characters".into());
    Err(err)
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoreInfoResponse {
    pub id: Uuid,
    pub store_name: String,
    pub address: String,
    pub phone_number: String,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<store_info::Model> for StoreInfoResponse {
    fn from(model: store_info::Model) -> Self {
        Self {
            id: model.id,
            store_name: model.store_name,
            address: model.address,
            phone_number: model.phone_number,
            logo_url: model.logo_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

fn or_default(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

#[derive(Clone)]
pub struct StoreInfoService {
    repo: StoreInfoRepository,
    defaults: StoreDefaults,
}

impl StoreInfoService {
    pub fn new(db: Arc<DatabaseConnection>, defaults: StoreDefaults) -> Self {
        Self {
            repo: StoreInfoRepository::new(db),
            defaults,
        }
    }

    #[instrument(skip(self))]
    pub async fn get_store_info(&self) -> Result<StoreInfoResponse, ServiceError> {
        self.repo
            .find_first()
            .await?
            .map(Into::into)
            .ok_or_else(|| ServiceError::NotFound("Store information not set".to_string()))
    }

    /// Updates the single row, creating it on first use
    #[instrument(skip(self))]
    pub async fn upsert_store_info(
        &self,
        request: UpsertStoreInfoRequest,
    ) -> Result<StoreInfoResponse, ServiceError> {
        request.validate()?;

        let store_name = request.store_name.trim().to_string();
        let address = or_default(request.address, &self.defaults.address);
        let phone_number = or_default(request.phone_number, &self.defaults.phone);
        let logo_url = Some(or_default(request.logo_url, &self.defaults.logo));

        let saved = match self.repo.find_first().await? {
            Some(existing) => {
                let mut active: store_info::ActiveModel = existing.into();
                active.store_name = Set(store_name);
                active.address = Set(address);
                active.phone_number = Set(phone_number);
                active.logo_url = Set(logo_url);
                active.updated_at = Set(Some(Utc::now()));
                self.repo.update(active).await?
            }
            None => {
                self.repo
                    .create(store_info::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        store_name: Set(store_name),
                        address: Set(address),
                        phone_number: Set(phone_number),
                        logo_url: Set(logo_url),
                        created_at: Set(Utc::now()),
                        updated_at: Set(None),
                    })
                    .await?
            }
        };

        info!(store_info_id = %saved.id, "store info saved");
        Ok(saved.into())
    }
}

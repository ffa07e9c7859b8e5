use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::validation::not_blank;
use crate::entities::customer::{self, CustomerType};
use crate::errors::{FieldErrors, ServiceError};
use crate::models::{EmailAddress, PhoneNumber};
use crate::repositories::CustomerRepository;

/// Body for both create and full update
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CustomerRequest {
    #[validate(
        custom = "not_blank",
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub full_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    #[serde(default)]
    pub customer_type: Option<CustomerType>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub full_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub customer_type: CustomerType,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<customer::Model> for CustomerResponse {
    fn from(model: customer::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            phone_number: model.phone_number,
            email: model.email,
            customer_type: model.customer_type,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Validated customer fields ready to persist
struct CustomerFields {
    full_name: String,
    phone: PhoneNumber,
    email: Option<EmailAddress>,
    customer_type: CustomerType,
}

impl CustomerRequest {
    /// Runs derive rules and value objects, merging every failure into one map.
    fn into_fields(self) -> Result<CustomerFields, ServiceError> {
        let mut errors = FieldErrors::new();
        if let Err(e) = self.validate() {
            merge(&mut errors, e.into());
        }

        let phone = PhoneNumber::new(&self.phone_number)
            .map_err(|e| merge(&mut errors, e))
            .ok();
        let email = EmailAddress::parse_optional(self.email.as_deref())
            .map_err(|e| merge(&mut errors, e))
            .ok()
            .flatten();

        match phone {
            Some(phone) if errors.is_empty() => Ok(CustomerFields {
                full_name: self.full_name.trim().to_string(),
                phone,
                email,
                customer_type: self.customer_type.unwrap_or_default(),
            }),
            _ => Err(ServiceError::ValidationError(errors)),
        }
    }
}

fn merge(into: &mut FieldErrors, err: ServiceError) {
    if let ServiceError::ValidationError(fields) = err {
        for (field, messages) in fields {
            into.entry(field).or_default().extend(messages);
        }
    }
}

#[derive(Clone)]
pub struct CustomerService {
    repo: CustomerRepository,
}

impl CustomerService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            repo: CustomerRepository::new(db),
        }
    }

    async fn require_customer(&self, id: Uuid) -> Result<customer::Model, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<CustomerResponse>, ServiceError> {
        let customers = self.repo.find_all().await?;
        if customers.is_empty() {
            return Err(ServiceError::NotFound("No customers found".to_string()));
        }
        Ok(customers.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_customer(&self, id: Uuid) -> Result<CustomerResponse, ServiceError> {
        Ok(self.require_customer(id).await?.into())
    }

    #[instrument(skip(self))]
    pub async fn create_customer(
        &self,
        request: CustomerRequest,
    ) -> Result<CustomerResponse, ServiceError> {
        let fields = request.into_fields()?;

        let created = self
            .repo
            .create(customer::ActiveModel {
                id: Set(Uuid::new_v4()),
                full_name: Set(fields.full_name),
                phone_number: Set(fields.phone.into_inner()),
                email: Set(fields.email.map(EmailAddress::into_inner)),
                customer_type: Set(fields.customer_type),
                created_at: Set(Utc::now()),
                updated_at: Set(None),
            })
            .await?;

        info!(customer_id = %created.id, "customer created");
        Ok(created.into())
    }

    #[instrument(skip(self))]
    pub async fn update_customer(
        &self,
        id: Uuid,
        request: CustomerRequest,
    ) -> Result<CustomerResponse, ServiceError> {
        let existing = self.require_customer(id).await?;
        let fields = request.into_fields()?;

        let mut active: customer::ActiveModel = existing.into();
        active.full_name = Set(fields.full_name);
        active.phone_number = Set(fields.phone.into_inner());
        active.email = Set(fields.email.map(EmailAddress::into_inner));
        active.customer_type = Set(fields.customer_type);
        active.updated_at = Set(Some(Utc::now()));

        let updated = self.repo.update(active).await?;
        info!(customer_id = %id, "customer updated");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_customer(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.require_customer(id).await?;
        self.repo.delete(existing).await?;
        info!(customer_id = %id, "customer deleted");
        Ok(())
    }
}

fn not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("Customer {} not found", id))
}

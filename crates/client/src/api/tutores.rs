// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `/v1/tutores` resource, including photo management and pet links.

use serde::{Deserialize, Serialize};

use crate::api::pets::Pet;
use crate::api::{Anexo, Page, PageQuery, Photo};
use crate::error::ApiError;
use crate::gateway::{ApiRequest, Gateway};

const TUTORES_PATH: &str = "/v1/tutores";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutor {
    pub id: u64,
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endereco: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto: Option<Anexo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pets: Vec<Pet>,
}

/// Create/update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorRequest {
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endereco: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<u64>,
}

pub struct Tutores<'a> {
    gateway: &'a Gateway,
}

impl<'a> Tutores<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, query: &PageQuery) -> Result<Page<Tutor>, ApiError> {
        self.gateway.send_json(query.apply(ApiRequest::get(TUTORES_PATH))).await
    }

    pub async fn get(&self, id: u64) -> Result<Tutor, ApiError> {
        self.gateway.send_json(ApiRequest::get(format!("{TUTORES_PATH}/{id}"))).await
    }

    pub async fn create(&self, tutor: &TutorRequest) -> Result<Tutor, ApiError> {
        let body = serde_json::to_value(tutor)?;
        self.gateway.send_json(ApiRequest::post(TUTORES_PATH).json(body)).await
    }

    pub async fn update(&self, id: u64, tutor: &TutorRequest) -> Result<Tutor, ApiError> {
        let body = serde_json::to_value(tutor)?;
        self.gateway.send_json(ApiRequest::put(format!("{TUTORES_PATH}/{id}")).json(body)).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.gateway.send(ApiRequest::delete(format!("{TUTORES_PATH}/{id}"))).await?;
        Ok(())
    }

    pub async fn upload_photo(&self, id: u64, photo: Photo) -> Result<Anexo, ApiError> {
        let request =
            ApiRequest::post(format!("{TUTORES_PATH}/{id}/fotos")).file(photo.into_part());
        self.gateway.send_json(request).await
    }

    pub async fn delete_photo(&self, id: u64, foto_id: u64) -> Result<(), ApiError> {
        self.gateway.send(ApiRequest::delete(format!("{TUTORES_PATH}/{id}/fotos/{foto_id}"))).await?;
        Ok(())
    }

    /// Link a pet to this tutor.
    pub async fn link_pet(&self, tutor_id: u64, pet_id: u64) -> Result<(), ApiError> {
        self.gateway.send(ApiRequest::post(format!("{TUTORES_PATH}/{tutor_id}/pets/{pet_id}"))).await?;
        Ok(())
    }

    pub async fn unlink_pet(&self, tutor_id: u64, pet_id: u64) -> Result<(), ApiError> {
        self.gateway
            .send(ApiRequest::delete(format!("{TUTORES_PATH}/{tutor_id}/pets/{pet_id}")))
            .await?;
        Ok(())
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `/v1/pets` resource.

use serde::{Deserialize, Serialize};

use crate::api::tutores::Tutor;
use crate::api::{Anexo, Page, PageQuery, Photo};
use crate::error::ApiError;
use crate::gateway::{ApiRequest, Gateway};

const PETS_PATH: &str = "/v1/pets";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: u64,
    pub nome: String,
    pub raca: String,
    pub idade: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto: Option<Anexo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tutores: Vec<Tutor>,
}

/// Create/update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetRequest {
    pub nome: String,
    pub raca: String,
    pub idade: i32,
}

pub struct Pets<'a> {
    gateway: &'a Gateway,
}

impl<'a> Pets<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, query: &PageQuery) -> Result<Page<Pet>, ApiError> {
        self.gateway.send_json(query.apply(ApiRequest::get(PETS_PATH))).await
    }

    pub async fn get(&self, id: u64) -> Result<Pet, ApiError> {
        self.gateway.send_json(ApiRequest::get(format!("{PETS_PATH}/{id}"))).await
    }

    pub async fn create(&self, pet: &PetRequest) -> Result<Pet, ApiError> {
        let body = serde_json::to_value(pet)?;
        self.gateway.send_json(ApiRequest::post(PETS_PATH).json(body)).await
    }

    pub async fn update(&self, id: u64, pet: &PetRequest) -> Result<Pet, ApiError> {
        let body = serde_json::to_value(pet)?;
        self.gateway.send_json(ApiRequest::put(format!("{PETS_PATH}/{id}")).json(body)).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.gateway.send(ApiRequest::delete(format!("{PETS_PATH}/{id}"))).await?;
        Ok(())
    }

    pub async fn upload_photo(&self, id: u64, photo: Photo) -> Result<Anexo, ApiError> {
        let request = ApiRequest::post(format!("{PETS_PATH}/{id}/fotos")).file(photo.into_part());
        self.gateway.send_json(request).await
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed resource calls on top of [`Gateway::send`]. Every endpoint here is
//! protected, so all of them benefit from the transparent refresh.

pub mod pets;
pub mod tutores;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::gateway::{ApiRequest, FilePart, Gateway};

pub use self::pets::{Pet, PetRequest, Pets};
pub use self::tutores::{Tutor, TutorRequest, Tutores};

/// Multipart field name the backend expects for photo uploads.
pub const PHOTO_FIELD: &str = "foto";

/// One page of a paged listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub page_count: u32,
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
}

/// Stored attachment (photo) metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anexo {
    pub id: u64,
    pub nome: String,
    pub content_type: String,
    pub url: String,
}

/// Paging and name filter for list calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
    pub nome: Option<String>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 0, size: 10, nome: None }
    }
}

impl PageQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn nome(mut self, nome: impl Into<String>) -> Self {
        self.nome = Some(nome.into());
        self
    }

    /// Attach as query parameters. A blank name filter is omitted.
    pub(crate) fn apply(&self, request: ApiRequest) -> ApiRequest {
        let request = request.query("page", self.page).query("size", self.size);
        match self.nome.as_deref().map(str::trim) {
            Some(nome) if !nome.is_empty() => request.query("nome", nome),
            _ => request,
        }
    }
}

/// A photo to upload.
#[derive(Debug, Clone)]
pub struct Photo {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl Photo {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self { file_name: file_name.into(), content_type: None, bytes: bytes.into() }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub(crate) fn into_part(self) -> FilePart {
        FilePart {
            field: PHOTO_FIELD.to_owned(),
            file_name: self.file_name,
            content_type: self.content_type,
            bytes: self.bytes,
        }
    }
}

impl Gateway {
    pub fn pets(&self) -> Pets<'_> {
        Pets::new(self)
    }

    pub fn tutores(&self) -> Tutores<'_> {
        Tutores::new(self)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

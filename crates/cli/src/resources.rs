// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pets`, `tutores`, `link` and `unlink` commands.

use std::path::Path;

use anyhow::Context;
use petman_client::api::Photo;
use petman_client::Gateway;

use crate::config::{PetsCommand, TutoresCommand};
use crate::output;

pub async fn pets(gateway: &Gateway, command: PetsCommand) -> anyhow::Result<()> {
    let pets = gateway.pets();
    match command {
        PetsCommand::List(args) => {
            let page = pets.list(&args.query()).await?;
            print!("{}", output::pets_table(&page.content));
            println!("{}", output::page_footer(&page));
        }
        PetsCommand::Get { id } => print!("{}", output::pet_detail(&pets.get(id).await?)),
        PetsCommand::Create(args) => {
            let pet = pets.create(&args.into()).await?;
            println!("created pet #{}", pet.id);
        }
        PetsCommand::Update { id, pet } => {
            let pet = pets.update(id, &pet.into()).await?;
            print!("{}", output::pet_detail(&pet));
        }
        PetsCommand::Delete { id } => {
            pets.delete(id).await?;
            println!("deleted pet #{id}");
        }
        PetsCommand::Photo { id, file } => {
            let anexo = pets.upload_photo(id, read_photo(&file).await?).await?;
            println!("uploaded {} -> {}", anexo.nome, anexo.url);
        }
    }
    Ok(())
}

pub async fn tutores(gateway: &Gateway, command: TutoresCommand) -> anyhow::Result<()> {
    let tutores = gateway.tutores();
    match command {
        TutoresCommand::List(args) => {
            let page = tutores.list(&args.query()).await?;
            print!("{}", output::tutores_table(&page.content));
            println!("{}", output::page_footer(&page));
        }
        TutoresCommand::Get { id } => print!("{}", output::tutor_detail(&tutores.get(id).await?)),
        TutoresCommand::Create(args) => {
            let tutor = tutores.create(&args.into()).await?;
            println!("created tutor #{}", tutor.id);
        }
        TutoresCommand::Update { id, tutor } => {
            let tutor = tutores.update(id, &tutor.into()).await?;
            print!("{}", output::tutor_detail(&tutor));
        }
        TutoresCommand::Delete { id } => {
            tutores.delete(id).await?;
            println!("deleted tutor #{id}");
        }
        TutoresCommand::Photo { id, file } => {
            let anexo = tutores.upload_photo(id, read_photo(&file).await?).await?;
            println!("uploaded {} -> {} (foto #{})", anexo.nome, anexo.url, anexo.id);
        }
        TutoresCommand::DeletePhoto { id, foto_id } => {
            tutores.delete_photo(id, foto_id).await?;
            println!("deleted foto #{foto_id} of tutor #{id}");
        }
    }
    Ok(())
}

pub async fn link(gateway: &Gateway, tutor: u64, pet: u64) -> anyhow::Result<()> {
    gateway.tutores().link_pet(tutor, pet).await?;
    println!("linked pet #{pet} to tutor #{tutor}");
    Ok(())
}

pub async fn unlink(gateway: &Gateway, tutor: u64, pet: u64) -> anyhow::Result<()> {
    gateway.tutores().unlink_pet(tutor, pet).await?;
    println!("unlinked pet #{pet} from tutor #{tutor}");
    Ok(())
}

async fn read_photo(path: &Path) -> anyhow::Result<Photo> {
    let bytes =
        tokio::fs::read(path).await.with_context(|| format!("reading {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "foto".to_owned());
    let photo = Photo::new(file_name, bytes);
    Ok(match guess_content_type(path) {
        Some(content_type) => photo.content_type(content_type),
        None => photo,
    })
}

/// Image MIME type from the file extension.
pub fn guess_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
#[path = "resources_tests.rs"]
mod tests;

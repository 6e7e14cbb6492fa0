// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plain-text rendering for command output.

use std::fmt::Write;

use petman_client::api::{Anexo, Page, Pet, Tutor};

const NONE: &str = "\u{2014}";

fn or_none(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NONE)
}

/// "page 1/3 (25 total)"; pages are shown one-based.
pub fn page_footer<T>(page: &Page<T>) -> String {
    format!("page {}/{} ({} total)", page.page + 1, page.page_count.max(1), page.total)
}

pub fn pets_table(pets: &[Pet]) -> String {
    let nome_w = pets.iter().map(|p| p.nome.chars().count()).max().unwrap_or(0).max(4);
    let raca_w = pets.iter().map(|p| p.raca.chars().count()).max().unwrap_or(0).max(4);

    let mut out = String::new();
    let _ = writeln!(out, "{:>6}  {:<nome_w$}  {:<raca_w$}  {:>5}", "ID", "NOME", "RACA", "IDADE");
    for p in pets {
        let _ = writeln!(out, "{:>6}  {:<nome_w$}  {:<raca_w$}  {:>5}", p.id, p.nome, p.raca, p.idade);
    }
    out
}

pub fn tutores_table(tutores: &[Tutor]) -> String {
    let nome_w = tutores.iter().map(|t| t.nome.chars().count()).max().unwrap_or(0).max(4);
    let email_w = tutores
        .iter()
        .map(|t| or_none(t.email.as_deref()).chars().count())
        .max()
        .unwrap_or(0)
        .max(5);

    let mut out = String::new();
    let _ =
        writeln!(out, "{:>6}  {:<nome_w$}  {:<email_w$}  {}", "ID", "NOME", "EMAIL", "TELEFONE");
    for t in tutores {
        let _ = writeln!(
            out,
            "{:>6}  {:<nome_w$}  {:<email_w$}  {}",
            t.id,
            t.nome,
            or_none(t.email.as_deref()),
            or_none(t.telefone.as_deref()),
        );
    }
    out
}

fn photo_line(foto: Option<&Anexo>) -> String {
    match foto {
        Some(f) => format!("{} ({})", f.url, f.content_type),
        None => NONE.to_owned(),
    }
}

pub fn pet_detail(pet: &Pet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "id:      {}", pet.id);
    let _ = writeln!(out, "nome:    {}", pet.nome);
    let _ = writeln!(out, "raca:    {}", pet.raca);
    let _ = writeln!(out, "idade:   {}", pet.idade);
    let _ = writeln!(out, "foto:    {}", photo_line(pet.foto.as_ref()));
    if !pet.tutores.is_empty() {
        let names: Vec<String> =
            pet.tutores.iter().map(|t| format!("{} (#{})", t.nome, t.id)).collect();
        let _ = writeln!(out, "tutores: {}", names.join(", "));
    }
    out
}

pub fn tutor_detail(tutor: &Tutor) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "id:       {}", tutor.id);
    let _ = writeln!(out, "nome:     {}", tutor.nome);
    let _ = writeln!(out, "email:    {}", or_none(tutor.email.as_deref()));
    let _ = writeln!(out, "telefone: {}", or_none(tutor.telefone.as_deref()));
    let _ = writeln!(out, "endereco: {}", or_none(tutor.endereco.as_deref()));
    let cpf = tutor.cpf.map(|c| c.to_string());
    let _ = writeln!(out, "cpf:      {}", or_none(cpf.as_deref()));
    let _ = writeln!(out, "foto:     {}", photo_line(tutor.foto.as_ref()));
    if tutor.pets.is_empty() {
        let _ = writeln!(out, "pets:     {NONE}");
    } else {
        let _ = writeln!(out, "pets:");
        out.push_str(&pets_table(&tutor.pets));
    }
    out
}

/// Time left until `exp_ms`, relative to `now_ms`.
pub fn format_expiry(now_ms: u64, exp_ms: u64) -> String {
    if exp_ms <= now_ms {
        return "expired".to_owned();
    }
    let secs = (exp_ms - now_ms) / 1000;
    format!("expires in {}m {:02}s", secs / 60, secs % 60)
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

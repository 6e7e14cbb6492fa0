// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use yare::parameterized;

use super::*;

fn pet(id: u64, nome: &str, raca: &str, idade: i32) -> Pet {
    Pet { id, nome: nome.into(), raca: raca.into(), idade, foto: None, tutores: Vec::new() }
}

fn tutor(id: u64, nome: &str, email: Option<&str>) -> Tutor {
    Tutor {
        id,
        nome: nome.into(),
        email: email.map(str::to_owned),
        telefone: None,
        endereco: None,
        cpf: None,
        foto: None,
        pets: Vec::new(),
    }
}

#[test]
fn pets_table_aligns_columns() {
    let table = pets_table(&[pet(1, "Rex", "Vira-lata", 3), pet(12, "Bartolomeu", "SRD", 11)]);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "    ID  NOME        RACA       IDADE");
    assert_eq!(lines[1], "     1  Rex         Vira-lata      3");
    assert_eq!(lines[2], "    12  Bartolomeu  SRD           11");
}

#[test]
fn empty_tables_still_have_headers() {
    assert_eq!(pets_table(&[]).lines().count(), 1);
    assert_eq!(tutores_table(&[]).lines().count(), 1);
}

#[test]
fn tutores_table_marks_missing_fields() {
    let table = tutores_table(&[tutor(3, "Ana", Some("ana@x.io")), tutor(4, "Bia", None)]);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[1], "     3  Ana   ana@x.io  \u{2014}");
    assert_eq!(lines[2], "     4  Bia   \u{2014}         \u{2014}");
}

#[test]
fn tutor_detail_lists_pets() {
    let mut t = tutor(3, "Ana", None);
    t.cpf = Some(12345678901);
    t.pets.push(pet(1, "Rex", "SRD", 3));
    let detail = tutor_detail(&t);
    assert!(detail.contains("cpf:      12345678901"));
    assert!(detail.contains("pets:\n"));
    assert!(detail.contains("Rex"));
}

#[test]
fn pet_detail_shows_photo_and_tutores() {
    let mut p = pet(1, "Rex", "SRD", 3);
    p.foto = Some(Anexo {
        id: 9,
        nome: "rex.png".into(),
        content_type: "image/png".into(),
        url: "http://files/rex.png".into(),
    });
    p.tutores.push(tutor(3, "Ana", None));
    let detail = pet_detail(&p);
    assert!(detail.contains("foto:    http://files/rex.png (image/png)"));
    assert!(detail.contains("tutores: Ana (#3)"));
}

#[test]
fn page_footer_is_one_based() {
    let page = Page::<Pet> { page: 0, size: 10, total: 0, page_count: 0, content: Vec::new() };
    assert_eq!(page_footer(&page), "page 1/1 (0 total)");
    let page = Page::<Pet> { page: 2, size: 10, total: 25, page_count: 3, content: Vec::new() };
    assert_eq!(page_footer(&page), "page 3/3 (25 total)");
}

#[parameterized(
    minutes = { 0, 125_000, "expires in 2m 05s" },
    under_a_second = { 1_000, 1_500, "expires in 0m 00s" },
    exact = { 5_000, 5_000, "expired" },
    past = { 9_000, 1_000, "expired" },
)]
fn expiry_formatting(now_ms: u64, exp_ms: u64, expected: &str) {
    assert_eq!(format_expiry(now_ms, exp_ms), expected);
}

// src/view/page.rs
//! Full HTML documents around the rendered regions

use crate::controller::BoardPage;
use crate::view::escape::{escape_attr, escape_html};

const STYLESHEET: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const ICONS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.3/font/bootstrap-icons.min.css";

fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title}</title><link rel="stylesheet" href="{STYLESHEET}"><link rel="stylesheet" href="{ICONS}"></head><body><div class="container py-4">{body}</div></body></html>"#,
        title = escape_html(title),
    )
}

pub fn board_document(page: &BoardPage) -> String {
    let body = format!(
        r#"<nav class="d-flex justify-content-between mb-3"><h1 class="h4">Job search</h1><a href="/profile">Profile</a></nav><form id="skillForm" method="post" action="/search" class="d-flex gap-2 mb-3"><input class="form-control" id="skills" name="skills" placeholder="rust, sql, docker" value="{query}"><button type="submit" class="btn btn-primary">Search</button></form>{toolbar}<div id="alert">{alert}</div><div class="row g-3 mt-1" id="results">{results}</div><h2 class="h5 mt-4">Saved jobs</h2><div id="savedList" class="d-flex flex-column gap-2">{saved}</div>"#,
        query = escape_attr(&page.query),
        toolbar = page.toolbar,
        alert = page.alert,
        results = page.results,
        saved = page.saved,
    );
    document("Job search", &body)
}

pub fn profile_document(alert: &str, form: &str) -> String {
    let body = format!(
        r#"<nav class="d-flex justify-content-between mb-3"><h1 class="h4">Profile</h1><a href="/">Jobs</a></nav><div id="profile-alert">{alert}</div>{form}"#
    );
    document("Profile", &body)
}

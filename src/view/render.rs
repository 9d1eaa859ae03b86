// src/view/render.rs
//! Pure markup rendering for the job board and the profile form.
//!
//! Nothing here touches storage or the network: callers pass in the jobs
//! and the current saved/hidden state and get markup back.

use std::collections::HashSet;

use crate::config::path_segment;
use crate::core::identity::IdentityResolver;
use crate::core::store::HiddenSet;
use crate::types::{Action, Alert, Job, JobId, Profile};
use crate::view::escape::{escape_attr, escape_html};

pub const NO_JOBS_MESSAGE: &str = "No jobs to display.";
pub const NO_SAVED_MESSAGE: &str = "No saved jobs yet.";
pub const NO_PHOTO_MESSAGE: &str = "No photo uploaded.";

const ACTIONS_PATH: &str = "/actions";

#[derive(Debug, Clone)]
pub struct Renderer {
    resolver: IdentityResolver,
    max_skills: usize,
    photo_prefix: String,
}

impl Renderer {
    pub fn new(resolver: IdentityResolver, max_skills: usize, photo_prefix: &str) -> Self {
        Self {
            resolver,
            max_skills,
            photo_prefix: photo_prefix.to_string(),
        }
    }

    pub fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }

    // ===== Results =====

    /// Cards for every job not hidden (all of them when `show_hidden`), or a
    /// single placeholder when none remain.
    pub fn render_results(
        &self,
        jobs: &[Job],
        hidden: &HiddenSet,
        saved: &[Job],
        show_hidden: bool,
    ) -> String {
        let saved_ids: HashSet<JobId> = saved.iter().map(|j| self.resolver.resolve(j)).collect();

        let cards: Vec<String> = jobs
            .iter()
            .map(|job| (self.resolver.resolve(job), job))
            .filter(|(id, _)| show_hidden || !hidden.contains(id))
            .map(|(id, job)| self.render_card(&id, job, saved_ids.contains(&id)))
            .collect();

        if cards.is_empty() {
            return format!(
                r#"<div class="text-muted text-center py-5 empty-results">{}</div>"#,
                NO_JOBS_MESSAGE
            );
        }

        cards.concat()
    }

    fn render_card(&self, id: &JobId, job: &Job, saved: bool) -> String {
        let title = self.resolver.title(job);
        let company = job.company().unwrap_or_else(|| "Unknown Company".to_string());
        let location = job
            .location()
            .unwrap_or_else(|| "Remote/Unspecified".to_string());

        let skills = job.skills();
        let badges = if skills.is_empty() {
            String::new()
        } else {
            let items: String = skills
                .iter()
                .take(self.max_skills)
                .map(|s| {
                    format!(
                        r#"<span class="badge text-bg-light me-1 mb-1 skill">{}</span>"#,
                        escape_html(s)
                    )
                })
                .collect();
            format!(r#"<div class="mb-3 skills">{}</div>"#, items)
        };

        let matches = render_matches(&job.hard_matches(), &job.soft_matches());

        let view_link = job
            .url()
            .filter(|url| is_web_link(url))
            .map(|url| {
                format!(
                    r#"<a class="btn btn-primary btn-sm flex-grow-1 btn-view" href="{}" target="_blank" rel="noopener">View</a>"#,
                    escape_attr(&url)
                )
            })
            .unwrap_or_default();

        let footer = job
            .posted_at()
            .map(|posted| {
                format!(
                    r#"<div class="card-footer small text-muted posted">Posted: {}</div>"#,
                    escape_html(&posted)
                )
            })
            .unwrap_or_default();

        let (save_class, save_icon) = if saved {
            ("btn btn-sm btn-success btn-save saved", "bi-bookmark-check")
        } else {
            ("btn btn-sm btn-outline-success btn-save", "bi-bookmark")
        };
        let save_button = action_control(
            &Action::Save(id.clone()),
            save_class,
            &format!(r#"<i class="bi {}"></i>"#, save_icon),
        );
        let hide_button = action_control(
            &Action::Hide(id.clone()),
            "btn btn-outline-secondary btn-sm flex-grow-1 btn-hide",
            r#"<i class="bi bi-eye-slash"></i> Hide"#,
        );

        let apply_controls = apply_controls(id);

        format!(
            r#"<div class="col-12 col-md-6 col-xl-4 job-card" data-job-id="{id}"><div class="card h-100 shadow-sm"><div class="card-body d-flex flex-column"><div class="d-flex justify-content-between align-items-start mb-2"><h5 class="card-title me-2">{title}</h5>{save_button}</div><h6 class="card-subtitle mb-2 text-muted company">{company}</h6><div class="small mb-2 location"><i class="bi bi-geo-alt"></i> {location}</div>{badges}{matches}<div class="mt-auto d-flex gap-2">{view_link}{hide_button}</div>{apply_controls}</div>{footer}</div></div>"#,
            id = escape_attr(id.as_str()),
            title = escape_html(&title),
            company = escape_html(&company),
            location = escape_html(&location),
        )
    }

    // ===== Saved Drawer =====

    pub fn render_saved(&self, saved: &[Job]) -> String {
        if saved.is_empty() {
            return format!(r#"<div class="text-muted saved-empty">{}</div>"#, NO_SAVED_MESSAGE);
        }

        saved
            .iter()
            .map(|job| {
                let id = self.resolver.resolve(job);
                let location = job
                    .location()
                    .map(|l| format!("· {}", escape_html(&l)))
                    .unwrap_or_default();
                let open_link = job
                    .url()
                    .filter(|url| is_web_link(url))
                    .map(|url| {
                        format!(
                            r#"<a class="btn btn-sm btn-primary" href="{}" target="_blank" rel="noopener"><i class="bi bi-box-arrow-up-right"></i></a>"#,
                            escape_attr(&url)
                        )
                    })
                    .unwrap_or_default();
                let unsave = action_control(
                    &Action::Unsave(id.clone()),
                    "btn btn-sm btn-outline-danger btn-unsave",
                    r#"<i class="bi bi-x-lg"></i>"#,
                );

                format!(
                    r#"<div class="card shadow-sm saved-job" data-job-id="{id}"><div class="card-body"><div class="d-flex justify-content-between align-items-start"><div><h6 class="mb-1">{title}</h6><div class="small text-muted">{company} {location}</div></div><div class="d-flex gap-2">{open_link}{unsave}</div></div></div></div>"#,
                    id = escape_attr(id.as_str()),
                    title = escape_html(&self.resolver.title(job)),
                    company = escape_html(&job.company().unwrap_or_default()),
                )
            })
            .collect()
    }

    // ===== Toolbar & Alerts =====

    pub fn render_toolbar(&self, saved_count: usize, show_hidden: bool) -> String {
        let toggle_label = if show_hidden {
            "Hide hidden jobs"
        } else {
            "Show hidden jobs"
        };
        format!(
            r#"<div class="d-flex gap-2 align-items-center toolbar"><span class="badge text-bg-success saved-count">{count}</span>{toggle}{unhide}{clear}</div>"#,
            count = saved_count,
            toggle = action_control(
                &Action::ToggleShowHidden,
                if show_hidden {
                    "btn btn-sm btn-secondary btn-toggle-hidden active"
                } else {
                    "btn btn-sm btn-outline-secondary btn-toggle-hidden"
                },
                toggle_label,
            ),
            unhide = action_control(
                &Action::UnhideAll,
                "btn btn-sm btn-outline-secondary btn-clear-hidden",
                "Unhide all",
            ),
            clear = action_control(
                &Action::ClearSaved,
                "btn btn-sm btn-outline-danger btn-clear-saved",
                "Clear saved",
            ),
        )
    }

    pub fn render_alert(&self, alert: Option<&Alert>) -> String {
        match alert {
            Some(alert) => format!(
                r#"<div class="alert alert-{}" role="alert">{}</div>"#,
                alert.kind.css(),
                escape_html(&alert.message)
            ),
            None => String::new(),
        }
    }

    // ===== Profile =====

    pub fn render_profile(&self, profile: &Profile) -> String {
        let photo = match profile.photo_path.as_deref().filter(|p| !p.is_empty()) {
            Some(path) => format!(
                r#"<img id="profile-photo" class="img-thumbnail" src="{}" alt="Profile photo">"#,
                escape_attr(&format!("{}{}", self.photo_prefix, path))
            ),
            None => format!(r#"<div id="no-photo" class="text-muted">{}</div>"#, NO_PHOTO_MESSAGE),
        };

        format!(
            r#"<div class="profile">{photo}<form id="profile-form" method="post" action="/profile"><input class="form-control" id="name" name="name" value="{name}"><textarea class="form-control" id="info" name="info">{info}</textarea><input class="form-control" id="soft_skills" name="soft_skills" value="{soft}"><button type="submit" class="btn btn-primary" data-action="save-profile">Save</button></form><form method="post" action="/profile/photo" enctype="multipart/form-data"><input type="file" id="photo-input" name="photo" accept="image/png,image/jpeg"><button type="submit" id="btn-upload-photo" class="btn btn-outline-primary" data-action="upload-photo">Upload photo</button></form></div>"#,
            name = escape_attr(profile.name.as_deref().unwrap_or_default()),
            info = escape_html(profile.info.as_deref().unwrap_or_default()),
            soft = escape_attr(profile.soft_skills.as_deref().unwrap_or_default()),
        )
    }
}

/// A control posting `action` (and the job id, when there is one) back to
/// the host. `label` is trusted markup.
fn action_control(action: &Action, class: &str, label: &str) -> String {
    let (id_input, data_id) = match action.target() {
        Some(id) => {
            let id = escape_attr(id.as_str());
            (
                format!(r#"<input type="hidden" name="id" value="{}">"#, id),
                format!(r#" data-id="{}""#, id),
            )
        }
        None => (String::new(), String::new()),
    };

    format!(
        r#"<form method="post" action="{path}" class="d-inline"><input type="hidden" name="action" value="{name}">{id_input}<button type="submit" class="{class}" data-action="{name}"{data_id}>{label}</button></form>"#,
        path = ACTIONS_PATH,
        name = action.name(),
    )
}

/// Applied / undo controls posting straight to the job's apply routes.
fn apply_controls(id: &JobId) -> String {
    let path = escape_attr(&path_segment(id.as_str()));
    let id = escape_attr(id.as_str());
    format!(
        r#"<div class="d-flex gap-2 mt-2 apply"><form method="post" action="/jobs/{path}/apply" class="d-flex gap-2 flex-grow-1"><input class="form-control form-control-sm" name="notes" placeholder="Notes"><button type="submit" class="btn btn-sm btn-outline-primary btn-apply" data-action="apply" data-id="{id}">Applied</button></form><form method="post" action="/jobs/{path}/unapply" class="d-inline"><button type="submit" class="btn btn-sm btn-outline-secondary btn-unapply" data-action="unapply" data-id="{id}">Undo</button></form></div>"#
    )
}

/// Only http(s) urls become links.
fn is_web_link(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn render_matches(hard: &[String], soft: &[String]) -> String {
    if hard.is_empty() && soft.is_empty() {
        return String::new();
    }

    let mut out = String::from(r#"<div class="small mb-2 matches">"#);
    if !hard.is_empty() {
        let list: Vec<String> = hard.iter().map(|s| escape_html(s)).collect();
        out.push_str(&format!(
            r#"<div class="hard-matches">Hard matches: {}</div>"#,
            list.join(", ")
        ));
    }
    if !soft.is_empty() {
        let list: Vec<String> = soft.iter().map(|s| escape_html(s)).collect();
        out.push_str(&format!(
            r#"<div class="soft-matches">Soft matches: {}</div>"#,
            list.join(", ")
        ));
    }
    out.push_str("</div>");
    out
}

// src/controller/board.rs
//! The job board controller: owns the session state, applies user actions
//! to the local store and re-renders from scratch after each one.

use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::core::identity::IdentityResolver;
use crate::core::service_client::JobBackend;
use crate::core::store::{HiddenSet, LocalStore};
use crate::error::ClientError;
use crate::types::response::ApplyStatus;
use crate::types::{Action, Alert, Job, JobId, SearchCriteria};
use crate::view::Renderer;

pub const EMPTY_SEARCH_MESSAGE: &str = "Please enter at least one skill.";
pub const NO_JOB_LIST_MESSAGE: &str = "No job list returned.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network/server error.";
pub const STORAGE_ERROR_MESSAGE: &str = "Could not update local storage.";

// ===== State =====

#[derive(Debug, Default)]
pub struct BoardState {
    /// Last search results; the authority every render starts from.
    pub jobs: Vec<Job>,
    pub show_hidden: bool,
    pub alert: Option<Alert>,
    pub query: String,
    pub loading: bool,
    search_seq: u64,
}

/// Handed out when a search starts; only the newest ticket may complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    pub criteria: SearchCriteria,
}

/// Regions re-rendered by one action. `None` means the region was left as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub results: Option<String>,
    pub saved: Option<String>,
    pub saved_count: usize,
    pub alert: Option<Alert>,
}

/// Every region of the board, rendered from the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardPage {
    pub toolbar: String,
    pub alert: String,
    pub results: String,
    pub saved: String,
    pub saved_count: usize,
    pub query: String,
}

impl BoardPage {
    /// All interactive markup, for the binding pass.
    pub fn controls_markup(&self) -> String {
        format!("{}{}{}", self.toolbar, self.results, self.saved)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Results,
    Both,
}

// ===== Controller =====

pub struct JobBoard {
    state: BoardState,
    store: LocalStore,
    renderer: Renderer,
}

impl JobBoard {
    pub fn new(store: LocalStore, renderer: Renderer) -> Self {
        Self {
            state: BoardState::default(),
            store,
            renderer,
        }
    }

    pub fn from_config(config: &AppConfig, store: LocalStore) -> Self {
        let resolver = IdentityResolver::new(config.title_aliases.clone());
        let renderer = Renderer::new(resolver, config.max_skill_badges, &config.photo_url_prefix);
        Self::new(store, renderer)
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn current_jobs(&self) -> &[Job] {
        &self.state.jobs
    }

    pub fn saved_jobs(&self) -> Vec<Job> {
        self.store.saved_jobs()
    }

    pub fn hidden_ids(&self) -> HiddenSet {
        self.store.hidden_ids()
    }

    pub fn resolve(&self, job: &Job) -> JobId {
        self.renderer.resolver().resolve(job)
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    // ===== Actions =====

    pub fn dispatch(&mut self, action: Action) -> Frame {
        debug!("Dispatching {:?}", action);
        match action {
            Action::Save(id) => self.toggle_save(&id),
            Action::Unsave(id) => self.unsave(&id),
            Action::Hide(id) => self.hide(&id),
            Action::UnhideAll => self.unhide_all(),
            Action::ClearSaved => self.clear_saved(),
            Action::ToggleShowHidden => self.toggle_show_hidden(),
        }
    }

    /// Removes the job from the saved list if present, otherwise puts the
    /// matching current job at the front.
    pub fn toggle_save(&mut self, id: &JobId) -> Frame {
        let mut saved = self.store.saved_jobs();
        let before = saved.len();
        saved.retain(|job| self.resolve(job) != *id);

        if saved.len() == before {
            match self.state.jobs.iter().find(|job| self.resolve(job) == *id) {
                Some(job) => saved.insert(0, job.clone()),
                None => debug!("Save ignored, job {} is not in the current results", id),
            }
        }

        self.persist_saved(&saved);
        self.frame(Region::Both)
    }

    pub fn unsave(&mut self, id: &JobId) -> Frame {
        let mut saved = self.store.saved_jobs();
        saved.retain(|job| self.resolve(job) != *id);
        self.persist_saved(&saved);
        self.frame(Region::Both)
    }

    pub fn hide(&mut self, id: &JobId) -> Frame {
        let mut hidden = self.store.hidden_ids();
        if hidden.insert(id.clone()) {
            self.persist_hidden(&hidden);
        }
        self.frame(Region::Results)
    }

    pub fn unhide_all(&mut self) -> Frame {
        self.persist_hidden(&HiddenSet::new());
        self.frame(Region::Results)
    }

    pub fn clear_saved(&mut self) -> Frame {
        self.persist_saved(&[]);
        self.frame(Region::Both)
    }

    pub fn toggle_show_hidden(&mut self) -> Frame {
        let show = !self.state.show_hidden;
        self.set_show_hidden(show)
    }

    pub fn set_show_hidden(&mut self, show: bool) -> Frame {
        self.state.show_hidden = show;
        self.frame(Region::Results)
    }

    // ===== Search =====

    /// Rejects empty input with a warning; otherwise clears the banner and
    /// issues a ticket that supersedes any search still in flight.
    pub fn begin_search(&mut self, criteria: SearchCriteria) -> Option<SearchTicket> {
        if let SearchCriteria::Skills(text) = &criteria {
            self.state.query = text.clone();
        }

        if criteria.is_empty() {
            self.state.alert = Some(Alert::warning(EMPTY_SEARCH_MESSAGE));
            return None;
        }

        self.state.alert = None;
        self.state.loading = true;
        self.state.search_seq += 1;
        Some(SearchTicket {
            seq: self.state.search_seq,
            criteria,
        })
    }

    /// Applies a search outcome. Stale tickets are dropped and return `None`.
    /// Failures clear the results rather than leaving old cards on screen.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<Job>, ClientError>,
    ) -> Option<Frame> {
        if ticket.seq != self.state.search_seq {
            debug!(
                "Dropping stale search response {} (current {})",
                ticket.seq, self.state.search_seq
            );
            return None;
        }

        self.state.loading = false;
        match outcome {
            Ok(jobs) => {
                info!("Showing {} jobs", jobs.len());
                self.state.jobs = jobs;
            }
            Err(err) => {
                error!("Search failed: {}", err);
                self.state.jobs.clear();
                self.state.alert = Some(search_alert(&err));
            }
        }

        Some(self.frame(Region::Results))
    }

    pub async fn search(&mut self, backend: &dyn JobBackend, criteria: SearchCriteria) -> Frame {
        let Some(ticket) = self.begin_search(criteria) else {
            return self.frame_with_alert();
        };
        let outcome = backend.search(&ticket.criteria).await;
        self.complete_search(ticket, outcome)
            .unwrap_or_else(|| self.frame_with_alert())
    }

    // ===== Apply =====

    pub fn record_apply(
        &mut self,
        applied: bool,
        outcome: Result<ApplyStatus, ClientError>,
    ) -> Frame {
        let (verb, done) = if applied {
            ("marking job as applied", "Marked as applied.")
        } else {
            ("removing applied mark", "Applied mark removed.")
        };

        self.state.alert = Some(match outcome {
            Ok(_) => Alert::success(done),
            Err(ClientError::Status { status, message }) => Alert::danger(format!(
                "Error {}: {}",
                verb,
                message.unwrap_or_else(|| format!("HTTP {}", status))
            )),
            Err(ClientError::Malformed(_)) => {
                Alert::danger(format!("Unexpected response while {}.", verb))
            }
            Err(ClientError::Network(_)) => Alert::danger(format!("Network error while {}.", verb)),
        });
        self.frame_with_alert()
    }

    pub async fn apply(
        &mut self,
        backend: &dyn JobBackend,
        id: &JobId,
        notes: Option<&str>,
    ) -> Frame {
        let outcome = backend.mark_applied(id.as_str(), notes).await;
        self.record_apply(true, outcome)
    }

    pub async fn unapply(&mut self, backend: &dyn JobBackend, id: &JobId) -> Frame {
        let outcome = backend.unmark_applied(id.as_str()).await;
        self.record_apply(false, outcome)
    }

    // ===== Rendering =====

    pub fn render_results(&self) -> String {
        self.renderer.render_results(
            &self.state.jobs,
            &self.store.hidden_ids(),
            &self.store.saved_jobs(),
            self.state.show_hidden,
        )
    }

    pub fn render_saved(&self) -> String {
        self.renderer.render_saved(&self.store.saved_jobs())
    }

    pub fn page(&self) -> BoardPage {
        let saved = self.store.saved_jobs();
        BoardPage {
            toolbar: self
                .renderer
                .render_toolbar(saved.len(), self.state.show_hidden),
            alert: self.renderer.render_alert(self.state.alert.as_ref()),
            results: self.render_results(),
            saved: self.renderer.render_saved(&saved),
            saved_count: saved.len(),
            query: self.state.query.clone(),
        }
    }

    fn frame(&self, region: Region) -> Frame {
        Frame {
            results: Some(self.render_results()),
            saved: (region == Region::Both).then(|| self.render_saved()),
            saved_count: self.store.saved_jobs().len(),
            alert: self.state.alert.clone(),
        }
    }

    fn frame_with_alert(&self) -> Frame {
        Frame {
            results: None,
            saved: None,
            saved_count: self.store.saved_jobs().len(),
            alert: self.state.alert.clone(),
        }
    }

    fn persist_saved(&mut self, saved: &[Job]) {
        if let Err(e) = self.store.set_saved_jobs(saved) {
            error!("Failed to persist saved jobs: {:#}", e);
            self.state.alert = Some(Alert::danger(STORAGE_ERROR_MESSAGE));
        }
    }

    fn persist_hidden(&mut self, hidden: &HiddenSet) {
        if let Err(e) = self.store.set_hidden_ids(hidden) {
            error!("Failed to persist hidden jobs: {:#}", e);
            self.state.alert = Some(Alert::danger(STORAGE_ERROR_MESSAGE));
        }
    }
}

fn search_alert(err: &ClientError) -> Alert {
    match err {
        ClientError::Network(_) => Alert::danger(NETWORK_ERROR_MESSAGE),
        ClientError::Status { status, message } => Alert::danger(format!(
            "{} ({})",
            message.as_deref().unwrap_or("Search failed"),
            status
        )),
        ClientError::Malformed(_) => Alert::warning(NO_JOB_LIST_MESSAGE),
    }
}

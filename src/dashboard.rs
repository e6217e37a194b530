//! Page layer
//!
//! Resolves a path to a page, loads the user's data once and hands each model
//! to its chart. Charts never fetch on their own.

use crate::charts::{ActivityChart, PerformanceChart, ScoreChart, SessionChart};
use crate::models::KeyDataTile;
use crate::service::{UserData, UserService};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// ---------------------------------------------------------------------------
/// Routing
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Route {
  Home,
  User(u64),
  NotFound,
}

impl Route {
  /// `/` is the profile picker, `/user/:id` a dashboard, anything else is
  /// not found. Query strings, fragments and a trailing slash are ignored.
  pub fn parse(path: &str) -> Self {
    let path = path
      .split(['?', '#'])
      .next()
      .unwrap_or_default()
      .trim();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
      [] => Route::Home,
      ["user", id] => id.parse().map(Route::User).unwrap_or(Route::NotFound),
      _ => Route::NotFound,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Dashboard
/// ---------------------------------------------------------------------------

/// Everything one user's page shows. A section whose data is missing stays
/// `None` and the rest of the page still renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
  pub first_name: Option<String>,
  pub key_data: Vec<KeyDataTile>,
  pub activity: Option<ActivityChart>,
  pub sessions: Option<SessionChart>,
  pub performance: Option<PerformanceChart>,
  pub score: Option<ScoreChart>,
}

impl Dashboard {
  pub fn from_user_data(data: &UserData) -> Self {
    let profile = data.profile.as_ref();

    Self {
      first_name: profile.and_then(|p| p.first_name()).map(str::to_string),
      key_data: profile
        .map(|p| p.key_data_tiles().to_vec())
        .unwrap_or_default(),
      activity: data.activity.as_ref().and_then(ActivityChart::build),
      sessions: data.sessions.as_ref().and_then(SessionChart::build),
      performance: data.performance.as_ref().and_then(PerformanceChart::build),
      score: ScoreChart::build(profile.and_then(|p| p.today_score)),
    }
  }

  pub fn greeting(&self) -> Option<String> {
    self.first_name.as_ref().map(|name| format!("Bonjour {}", name))
  }

  /// SVG markup of every chart present, in page order
  pub fn svgs(&self) -> Vec<String> {
    let mut svgs = Vec::new();
    if let Some(chart) = &self.activity {
      svgs.push(chart.to_svg());
    }
    if let Some(chart) = &self.sessions {
      svgs.push(chart.to_svg());
    }
    if let Some(chart) = &self.performance {
      svgs.push(chart.to_svg());
    }
    if let Some(chart) = &self.score {
      svgs.push(chart.to_svg());
    }
    svgs
  }
}

/// ---------------------------------------------------------------------------
/// View Lifecycle
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "dashboard", rename_all = "snake_case")]
pub enum ViewState {
  Loading,
  NotFound,
  Ready(Box<Dashboard>),
}

impl ViewState {
  fn from_fetch(data: Option<UserData>) -> Self {
    match data {
      Some(data) if !data.is_empty() => ViewState::Ready(Box::new(Dashboard::from_user_data(&data))),
      _ => ViewState::NotFound,
    }
  }
}

/// A mounted dashboard. The aggregate fetch runs in the background; dropping
/// the view aborts it so a late result never lands on a disposed page.
pub struct DashboardView {
  user_id: u64,
  state: watch::Receiver<ViewState>,
  task: JoinHandle<()>,
}

impl DashboardView {
  pub fn mount(service: Arc<UserService>, user_id: u64) -> Self {
    let (tx, rx) = watch::channel(ViewState::Loading);
    debug!(user_id, "mounting dashboard");

    let task = tokio::spawn(async move {
      let state = ViewState::from_fetch(service.fetch_user_data(user_id).await);
      // No receivers left means the view is gone
      let _ = tx.send(state);
    });

    Self {
      user_id,
      state: rx,
      task,
    }
  }

  pub fn user_id(&self) -> u64 {
    self.user_id
  }

  pub fn state(&self) -> ViewState {
    self.state.borrow().clone()
  }

  /// Wait until the view leaves `Loading`. Stays `Loading` if the fetch task
  /// ended without reporting.
  pub async fn loaded(&mut self) -> ViewState {
    let _ = self
      .state
      .wait_for(|state| !matches!(state, ViewState::Loading))
      .await;
    self.state()
  }

  pub fn unmount(self) {}
}

impl Drop for DashboardView {
  fn drop(&mut self) {
    if !self.task.is_finished() {
      debug!(user_id = self.user_id, "unmounted while loading, aborting fetch");
    }
    self.task.abort();
  }
}

/// ---------------------------------------------------------------------------
/// Pages
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page {
  Home { user_ids: Vec<u64> },
  Dashboard { user_id: u64, view: ViewState },
  NotFound,
}

/// Resolve `path` and load whatever the page needs
pub async fn open(service: Arc<UserService>, user_ids: &[u64], path: &str) -> Page {
  let route = Route::parse(path);
  info!(path, ?route, "opening page");

  match route {
    Route::Home => Page::Home {
      user_ids: user_ids.to_vec(),
    },
    Route::User(user_id) => {
      let mut view = DashboardView::mount(service, user_id);
      let state = view.loaded().await;
      Page::Dashboard {
        user_id: view.user_id(),
        view: state,
      }
    }
    Route::NotFound => Page::NotFound,
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

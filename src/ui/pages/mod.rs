use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

pub mod class_detail;
pub mod dashboard;
pub mod enroll_class;
pub mod enroll_future;
pub mod enroll_team;
pub mod home;
pub mod not_found;
pub mod team_detail;

pub use class_detail::ClassDetailPage;

/// Numeric `:id` route param; `None` while absent or malformed.
fn parse_id_param() -> Memo<Option<i64>> {
    let params = use_params_map();
    Memo::new(move |_| params.with(|p| p.get("id").and_then(|v| v.parse().ok())))
}

pub use dashboard::DashboardPage;
pub use enroll_class::EnrollClassPage;
pub use enroll_future::EnrollFuturePage;
pub use enroll_team::EnrollTeamPage;
pub use home::HomePage;
pub use not_found::NotFoundPage;
pub use team_detail::TeamDetailPage;

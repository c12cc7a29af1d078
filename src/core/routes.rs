//! Static per-route metadata.
//!
//! The route table itself lives in `app.rs`; this module carries the
//! protection level and title key the guard and the pages read.

/// Immutable descriptor attached to every route at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMeta {
    /// Protected routes require an authenticated session with the coach role.
    pub requires_auth: bool,
    /// Locale key for the page title.
    pub title_key: &'static str,
}

pub const HOME: RouteMeta = RouteMeta {
    requires_auth: false,
    title_key: "nav.home",
};

pub const DASHBOARD: RouteMeta = RouteMeta {
    requires_auth: true,
    title_key: "nav.dashboard",
};

pub const ENROLL_TEAM: RouteMeta = RouteMeta {
    requires_auth: true,
    title_key: "nav.enrollTeam",
};

pub const ENROLL_CLASS: RouteMeta = RouteMeta {
    requires_auth: true,
    title_key: "nav.enrollClass",
};

pub const ENROLL_FUTURE: RouteMeta = RouteMeta {
    requires_auth: true,
    title_key: "nav.enrollFuture",
};

pub const TEAM_DETAIL: RouteMeta = RouteMeta {
    requires_auth: true,
    title_key: "nav.teamDetail",
};

pub const CLASS_DETAIL: RouteMeta = RouteMeta {
    requires_auth: true,
    title_key: "nav.classDetail",
};

/// Resolve the metadata for a path. Unknown paths fall back to public
/// not-found handling.
pub fn meta_for(path: &str) -> RouteMeta {
    let path = path.trim_end_matches('/');
    match path {
        "" => HOME,
        "/dashboard" => DASHBOARD,
        "/dashboard/enroll-team" => ENROLL_TEAM,
        "/dashboard/enroll-class" => ENROLL_CLASS,
        "/dashboard/enroll-future" => ENROLL_FUTURE,
        p if p.starts_with("/dashboard/team/") => TEAM_DETAIL,
        p if p.starts_with("/dashboard/class/") => CLASS_DETAIL,
        p if p.starts_with("/dashboard") => DASHBOARD,
        _ => RouteMeta {
            requires_auth: false,
            title_key: "nav.notFound",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_is_public() {
        assert!(!meta_for("/").requires_auth);
        assert!(!meta_for("").requires_auth);
    }

    #[test]
    fn every_dashboard_route_is_protected() {
        for path in [
            "/dashboard",
            "/dashboard/",
            "/dashboard/enroll-team",
            "/dashboard/enroll-class",
            "/dashboard/enroll-future",
            "/dashboard/team/42",
            "/dashboard/class/7",
        ] {
            assert!(meta_for(path).requires_auth, "{path} should be protected");
        }
    }

    #[test]
    fn unknown_paths_are_public_not_found() {
        let meta = meta_for("/no/such/page");
        assert!(!meta.requires_auth);
        assert_eq!(meta.title_key, "nav.notFound");
    }

    #[test]
    fn detail_routes_get_their_own_title() {
        assert_eq!(meta_for("/dashboard/team/1").title_key, "nav.teamDetail");
        assert_eq!(meta_for("/dashboard/class/1").title_key, "nav.classDetail");
    }
}

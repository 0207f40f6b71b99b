//! Access decisions for the portal's views.

use std::fmt;

use crate::model::Session;

/// Views of the portal, keyed by their URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    FacialRecognition,
    Dashboard,
    ScheduleSimulator,
    TheoreticalLessons,
    LastLesson,
    Admin,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Login,
        Route::FacialRecognition,
        Route::Dashboard,
        Route::ScheduleSimulator,
        Route::TheoreticalLessons,
        Route::LastLesson,
        Route::Admin,
    ];

    /// The unauthenticated entry point.
    pub const ENTRY: Route = Route::Login;

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::FacialRecognition => "/facial-recognition",
            Route::Dashboard => "/dashboard",
            Route::ScheduleSimulator => "/schedule-simulator",
            Route::TheoreticalLessons => "/theoretical-lessons",
            Route::LastLesson => "/last-lesson",
            Route::Admin => "/admin",
        }
    }

    /// Resolve a URL path; a trailing slash is ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        Self::ALL.into_iter().find(|r| r.path() == normalized)
    }

    /// Login and the facial-verification step render without a session.
    #[must_use]
    pub fn is_protected(self) -> bool {
        !matches!(self, Route::Login | Route::FacialRecognition)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny { redirect: Route },
}

impl Decision {
    #[must_use]
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Allow when the session carries a non-empty token, otherwise redirect to
/// the entry point.
#[must_use]
pub fn authorize(session: &Session) -> Decision {
    match session.token() {
        Some(token) if !token.as_str().is_empty() => Decision::Allow,
        _ => Decision::Deny {
            redirect: Route::ENTRY,
        },
    }
}

/// Public routes always render; protected routes go through [`authorize`].
#[must_use]
pub fn guard_route(route: Route, session: &Session) -> Decision {
    if route.is_protected() {
        authorize(session)
    } else {
        Decision::Allow
    }
}

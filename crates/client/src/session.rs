use models::roles::Role;

/// A login accepted by the server
///
/// The role is what the server put in the token; the client never decides
/// it on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub role: Role,
    pub token: String,
}

/// Holds at most one session
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    current: Option<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previous session
    pub fn begin(&mut self, session: Session) {
        log::info!("Session started for {} as {}", session.username, session.role);
        self.current = Some(session);
    }

    pub fn end(&mut self) -> Option<Session> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|session| session.token.as_str())
    }

    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(|session| session.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}

use std::fmt;

/// In-memory half of the session. The refresh token is persisted separately.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    access_token: Option<String>,
}

impl Session {
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn set_access_token(&mut self, token: String) {
        self.access_token = Some(token);
    }

    pub fn clear(&mut self) {
        self.access_token = None;
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let s = Session::default();
        assert!(!s.has_access_token());
        assert_eq!(s.access_token(), None);
    }

    #[test]
    fn set_then_clear() {
        let mut s = Session::default();
        s.set_access_token("abc".into());
        assert_eq!(s.access_token(), Some("abc"));

        s.clear();
        assert!(!s.has_access_token());
    }

    #[test]
    fn debug_hides_token() {
        let mut s = Session::default();
        s.set_access_token("secret.jwt".into());

        let out = format!("{:?}", s);
        assert!(!out.contains("secret.jwt"));
        assert!(out.contains("redacted"));
    }
}

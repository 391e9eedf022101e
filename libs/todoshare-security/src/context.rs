use crate::uid::Uid;

/// `SecurityContext` carries the identity of the caller of one operation.
///
/// Built from whatever the identity provider asserted for the request and
/// passed explicitly to every service call. The policy treats the subject as
/// ground truth and performs no verification of its own.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SecurityContext {
    /// Authenticated subject. `None` for anonymous callers.
    subject_id: Option<Uid>,
    /// Email asserted by the identity provider, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

impl SecurityContext {
    /// Create a new `SecurityContext` builder
    #[must_use]
    pub fn builder() -> SecurityContextBuilder {
        SecurityContextBuilder::default()
    }

    /// Create an anonymous `SecurityContext` with no subject
    #[must_use]
    pub fn anonymous() -> Self {
        SecurityContextBuilder::default().build()
    }

    /// Shorthand for an authenticated caller without an email claim.
    #[must_use]
    pub fn for_subject(subject_id: Uid) -> Self {
        Self::builder().subject_id(subject_id).build()
    }

    /// The authenticated subject, if any.
    #[must_use]
    pub fn subject_id(&self) -> Option<&Uid> {
        self.subject_id.as_ref()
    }

    /// Email claim of the subject.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.subject_id.is_some()
    }
}

#[derive(Default)]
pub struct SecurityContextBuilder {
    subject_id: Option<Uid>,
    email: Option<String>,
}

impl SecurityContextBuilder {
    #[must_use]
    pub fn subject_id(mut self, subject_id: Uid) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    #[must_use]
    pub fn email(mut self, email: &str) -> Self {
        self.email = Some(email.to_owned());
        self
    }

    #[must_use]
    pub fn build(self) -> SecurityContext {
        SecurityContext {
            subject_id: self.subject_id,
            email: self.email,
        }
    }
}

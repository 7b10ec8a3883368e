use uuid::Uuid;

/// Identity attributed to mutating requests.
///
/// There is no real authentication yet. Every write is attributed to the
/// fixed system user seeded by the migrations; once an authentication layer
/// exists it will construct the principal from request credentials instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal(Uuid);

impl Principal {
    /// The seeded system user (see the `seed_system_user` migration).
    pub fn placeholder() -> Self {
        Self(Uuid::from_u128(1))
    }

    pub fn user_id(&self) -> Uuid {
        self.0
    }
}

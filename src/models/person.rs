use serde::{Deserialize, Serialize};

/// A traveler on the company roster. People are never hard-deleted;
/// leavers are deactivated so historical bookings keep their names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub active: bool,
}

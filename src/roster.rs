use crate::models::User;

pub const FAMILY_ID: &str = "family1";
pub const UNKNOWN_OWNER: &str = "Unknown";

/// The fixed set of family members known to the application.
///
/// Built once at startup and shared read-only with the session store and
/// the views; nothing adds or removes members at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    members: Vec<User>,
}

impl Roster {
    pub fn new(members: Vec<User>) -> Self {
        Self { members }
    }

    /// The demo family every session logs in against.
    pub fn seeded() -> Self {
        Self::new(vec![
            User::new("1", "parent@example.com", "Parent", FAMILY_ID, "password"),
            User::new("2", "child@example.com", "Child", FAMILY_ID, "password"),
            User::new("3", "spouse@example.com", "Spouse", FAMILY_ID, "password"),
        ])
    }

    pub fn members(&self) -> &[User] {
        &self.members
    }

    pub fn find_by_id(&self, id: &str) -> Option<&User> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.members.iter().find(|m| m.email == email)
    }

    pub fn display_name(&self, id: &str) -> &str {
        self.find_by_id(id)
            .map(|m| m.name.as_str())
            .unwrap_or(UNKNOWN_OWNER)
    }

    /// Everyone in the family except `user_id`.
    pub fn others(&self, user_id: &str) -> impl Iterator<Item = &User> {
        self.members.iter().filter(move |m| m.id != user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_roster_shares_one_family() {
        let roster = Roster::seeded();
        assert_eq!(roster.members().len(), 3);
        assert!(roster.members().iter().all(|m| m.family_id == FAMILY_ID));
    }

    #[test]
    fn display_name_falls_back_to_unknown() {
        let roster = Roster::seeded();
        assert_eq!(roster.display_name("2"), "Child");
        assert_eq!(roster.display_name("42"), "Unknown");
    }

    #[test]
    fn others_excludes_the_viewer() {
        let roster = Roster::seeded();
        let names: Vec<&str> = roster.others("1").map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Child", "Spouse"]);
    }
}

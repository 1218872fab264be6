use serde::{Deserialize, Serialize};

/// A person referenced by a movie record (cast, crew).
///
/// `name` holds the canonical "Surname, Name" form; `current_role` and
/// `notes` are meaningful in the context of the movie the person is
/// attached to (e.g. the character played, "(voice)").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub person_id: Option<String>,
    pub access_system: String,
    pub current_role: String,
    pub notes: String,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Person {
        Person {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Person {
        self.current_role = role.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>, access_system: impl Into<String>) -> Person {
        self.person_id = Some(id.into());
        self.access_system = access_system.into();
        self
    }

    /// "Surname, Name" -> "Name Surname"; names without the canonical
    /// comma pass through unchanged.
    pub fn display_name(&self) -> String {
        match self.name.rsplit_once(", ") {
            Some((surname, name)) => format!("{} {}", name, surname),
            None => self.name.clone(),
        }
    }

    /// Person equality: same canonical name, or same identifier within
    /// the same access system. Either criterion suffices.
    pub fn is_same(&self, other: &Person) -> bool {
        if !self.name.is_empty() && self.name == other.name {
            return true;
        }
        match (&self.person_id, &other.person_id) {
            (Some(a), Some(b)) => self.access_system == other.access_system && a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_name())
    }
}

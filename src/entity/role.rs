use crate::error::StudioError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Company,
    Designer,
    Hr,
    Employee,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Company, Role::Designer, Role::Hr, Role::Employee];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Company => write!(f, "company"),
            Role::Designer => write!(f, "designer"),
            Role::Hr => write!(f, "hr"),
            Role::Employee => write!(f, "employee"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Role::ALL
            .into_iter()
            .find(|role| role.to_string() == name)
            .ok_or_else(|| StudioError::InvalidRole(s.to_string()))
    }
}

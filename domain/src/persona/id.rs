//! Persona identity and provider binding

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A board member that can take part in a discussion (Value Object)
///
/// Declaration order is the turn order of a full-board discussion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PersonaId {
    Ceo,
    Cmo,
    Cto,
    Cfo,
    Ciso,
    Cdo,
    Clo,
    Cro,
}

impl PersonaId {
    pub const ALL: [PersonaId; 8] = [
        PersonaId::Ceo,
        PersonaId::Cmo,
        PersonaId::Cto,
        PersonaId::Cfo,
        PersonaId::Ciso,
        PersonaId::Cdo,
        PersonaId::Clo,
        PersonaId::Cro,
    ];

    /// The persona that answers plain messages until the user picks another one
    pub const PRIMARY: PersonaId = PersonaId::Ceo;

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaId::Ceo => "CEO",
            PersonaId::Cmo => "CMO",
            PersonaId::Cto => "CTO",
            PersonaId::Cfo => "CFO",
            PersonaId::Ciso => "CISO",
            PersonaId::Cdo => "CDO",
            PersonaId::Clo => "CLO",
            PersonaId::Cro => "CRO",
        }
    }

    /// Comma separated list of every persona, as shown in "unknown role" replies
    pub fn roster_list() -> String {
        Self::ALL
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parse a comma separated team spec such as `"ceo, CTO,cfo"`.
    ///
    /// Order is preserved; repeated names are kept once at their first position.
    pub fn parse_team(spec: &str) -> Result<Vec<PersonaId>, DomainError> {
        let mut team = Vec::new();
        for token in spec.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let id: PersonaId = token.parse()?;
            if !team.contains(&id) {
                team.push(id);
            }
        }
        if team.is_empty() {
            return Err(DomainError::EmptyRoster);
        }
        Ok(team)
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PersonaId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        PersonaId::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == upper)
            .ok_or_else(|| DomainError::UnknownPersona(s.trim().to_string()))
    }
}

/// Text-generation backend a persona is statically bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Xai,
    Gemini,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::OpenAi,
        ProviderKind::Anthropic,
        ProviderKind::Xai,
        ProviderKind::Gemini,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Xai => "xai",
            ProviderKind::Gemini => "gemini",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

use std::fmt;
use std::str::FromStr;

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Application {
    Jira,
    Confluence,
}

impl Application {
    /// Lower-case name used for archive file names.
    pub fn slug(self) -> &'static str {
        match self {
            Application::Jira => "jira",
            Application::Confluence => "confluence",
        }
    }

    /// Path prefix the application is mounted under on the instance.
    pub(crate) fn context_path(self) -> &'static str {
        match self {
            Application::Jira => "",
            Application::Confluence => "/wiki",
        }
    }
}

impl FromStr for Application {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "JIRA" => Ok(Application::Jira),
            "CONFLUENCE" => Ok(Application::Confluence),
            _ => Err(ConfigError::UnknownApplication(s.to_string())),
        }
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Application::Jira => write!(f, "Jira"),
            Application::Confluence => write!(f, "Confluence"),
        }
    }
}

// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use thiserror::Error;
pub type Result<T> = std::result::Result<T, SimError>;

/// Every failure a simulated command can report.
///
/// The `Display` text is exactly what the user sees, so each message mirrors
/// the wording of the tool being imitated.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Error from server (NotFound): {resource} \"{name}\" not found")]
    NotFound { resource: String, name: String },

    #[error("Error from server (NotFound): namespaces \"{0}\" not found")]
    NamespaceNotFound(String),

    #[error("Error from server (AlreadyExists): {resource} \"{name}\" already exists")]
    AlreadyExists { resource: String, name: String },

    #[error("Error from server (Forbidden): {resource} \"{name}\" is forbidden: {reason}")]
    Forbidden {
        resource: String,
        name: String,
        reason: String,
    },

    #[error("error: the server doesn't have a resource type \"{0}\"")]
    UnknownResourceType(String),

    #[error("error: unknown command \"{command}\" for \"{tool}\"")]
    UnknownCommand { command: String, tool: String },

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Unsupported(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML encode error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub fn not_found(resource: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            name: name.into(),
        }
    }

    pub fn already_exists(resource: impl Into<String>, name: impl Into<String>) -> Self {
        Self::AlreadyExists {
            resource: resource.into(),
            name: name.into(),
        }
    }

    pub fn forbidden(
        resource: impl Into<String>,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Forbidden {
            resource: resource.into(),
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    pub fn unknown_command(command: impl Into<String>, tool: impl Into<String>) -> Self {
        Self::UnknownCommand {
            command: command.into(),
            tool: tool.into(),
        }
    }

    pub fn config_error(context: impl Into<String>) -> Self {
        Self::Config(context.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = SimError::not_found("pods", "ghost");
        assert_eq!(
            err.to_string(),
            "Error from server (NotFound): pods \"ghost\" not found"
        );
    }

    #[test]
    fn test_forbidden_message() {
        let err = SimError::forbidden(
            "namespaces",
            "kube-system",
            "this namespace may not be deleted",
        );
        assert_eq!(
            err.to_string(),
            "Error from server (Forbidden): namespaces \"kube-system\" is forbidden: this namespace may not be deleted"
        );
    }

    #[test]
    fn test_unknown_command_message() {
        let err = SimError::unknown_command("frobnicate", "kubectl");
        assert_eq!(
            err.to_string(),
            "error: unknown command \"frobnicate\" for \"kubectl\""
        );
    }
}

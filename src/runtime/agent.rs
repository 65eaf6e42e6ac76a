//! Agent definition

use super::model::GeminiModel;

/// Declarative description of a conversational agent
///
/// An agent is pure configuration; a [`Runner`](super::runner::Runner) binds
/// it to a provider and a session store to actually run turns.
#[derive(Debug, Clone)]
pub struct Agent {
    /// Agent name, used as the author of its events
    name: String,
    /// Model the agent speaks through
    model: GeminiModel,
    /// Short human-readable description
    description: String,
    /// System instruction sent with every request
    instruction: String,
}

impl Agent {
    /// Create a new agent
    pub fn new(
        name: impl Into<String>,
        model: GeminiModel,
        description: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            model,
            description: description.into(),
            instruction: instruction.into(),
        }
    }

    /// Agent name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Model the agent speaks through
    pub fn model(&self) -> GeminiModel {
        self.model
    }

    /// Short human-readable description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// System instruction sent with every request
    pub fn instruction(&self) -> &str {
        &self.instruction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_accessors() {
        let agent = Agent::new(
            "host_agent",
            GeminiModel::Gemini25Flash,
            "A friendly chatbot host.",
            "Keep it short.",
        );
        assert_eq!(agent.name(), "host_agent");
        assert_eq!(agent.model(), GeminiModel::Gemini25Flash);
        assert_eq!(agent.description(), "A friendly chatbot host.");
        assert_eq!(agent.instruction(), "Keep it short.");
    }
}

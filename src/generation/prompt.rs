//! Prompt construction for playbook generation
//!
//! The prompt pins the reply to a `STEPS:` / `CODE:` template so the response
//! parser has something to latch onto, and injects two directives derived from
//! the request options: how elaborate the playbook should be and whether the
//! model should split it across files.

use crate::generation::types::{CodeLevel, GenerationOptions};

const BASIC_DIRECTIVE: &str = "Focus on basic functionality and essential features";
const ADVANCED_DIRECTIVE: &str =
    "Include advanced features, best practices, and comprehensive error handling";

const SINGLE_FILE_DIRECTIVE: &str = "Create a single comprehensive playbook file";
const MULTI_FILE_DIRECTIVE: &str =
    "Split the implementation into multiple files (main playbook, roles, variables, etc.)";

/// Builds generation prompts from requirement text and options.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Renders the full prompt for one generation call.
    pub fn build(requirements: &str, options: &GenerationOptions) -> String {
        let complexity = match options.code_level {
            CodeLevel::Basic => BASIC_DIRECTIVE,
            CodeLevel::Advanced => ADVANCED_DIRECTIVE,
        };

        let file_structure = if options.multi_file {
            MULTI_FILE_DIRECTIVE
        } else {
            SINGLE_FILE_DIRECTIVE
        };

        let code_example = if options.multi_file {
            "filename: site.yml\n\
             ```yaml\n\
             # Ansible playbook code here\n\
             ```\n\
             \n\
             filename: vars/main.yml\n\
             ```yaml\n\
             # Variables file\n\
             ```"
        } else {
            "filename: playbook.yml\n\
             ```yaml\n\
             # Ansible playbook code here\n\
             ```"
        };

        format!(
            "Given these requirements: \"{requirements}\"\n\
             \n\
             Create an Ansible playbook with the following specifications:\n\
             - {complexity}\n\
             - {file_structure}\n\
             \n\
             1. First, provide a numbered list of implementation steps (maximum 5 steps).\n\
             2. Then, provide the complete Ansible playbook implementation.\n\
             \n\
             Format your response exactly like this example:\n\
             STEPS:\n\
             1. Set up playbook structure\n\
             2. Define variables and handlers\n\
             3. Implement tasks\n\
             \n\
             CODE:\n\
             {code_example}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(code_level: CodeLevel, multi_file: bool) -> GenerationOptions {
        GenerationOptions {
            code_level,
            multi_file,
        }
    }

    #[test]
    fn test_prompt_embeds_requirements() {
        let prompt = PromptBuilder::build("install nginx", &GenerationOptions::default());
        assert!(prompt.contains("\"install nginx\""));
    }

    #[test]
    fn test_basic_level_uses_basic_directive() {
        let prompt = PromptBuilder::build("install nginx", &options(CodeLevel::Basic, false));
        assert!(prompt.contains(BASIC_DIRECTIVE));
        assert!(!prompt.contains(ADVANCED_DIRECTIVE));
    }

    #[test]
    fn test_advanced_level_uses_advanced_directive() {
        let prompt = PromptBuilder::build("install nginx", &options(CodeLevel::Advanced, false));
        assert!(prompt.contains(ADVANCED_DIRECTIVE));
    }

    #[test]
    fn test_single_file_example_names_playbook_yml() {
        let prompt = PromptBuilder::build("install nginx", &options(CodeLevel::Basic, false));
        assert!(prompt.contains(SINGLE_FILE_DIRECTIVE));
        assert!(prompt.contains("filename: playbook.yml"));
        assert!(!prompt.contains("vars/main.yml"));
    }

    #[test]
    fn test_multi_file_example_adds_vars_skeleton() {
        let prompt = PromptBuilder::build("install nginx", &options(CodeLevel::Basic, true));
        assert!(prompt.contains(MULTI_FILE_DIRECTIVE));
        assert!(prompt.contains("filename: site.yml"));
        assert!(prompt.contains("filename: vars/main.yml"));
    }

    #[test]
    fn test_prompt_pins_the_response_template() {
        let prompt = PromptBuilder::build("install nginx", &GenerationOptions::default());
        assert!(prompt.contains("STEPS:"));
        assert!(prompt.contains("CODE:"));
        assert!(prompt.contains("maximum 5 steps"));
    }
}

//! Prompt templates for the generative analysis steps

/// Prompt templates with `{placeholder}` substitution
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub skill_extraction: String,
    pub experience_level: String,
    pub explanation: String,
    pub suggestions: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            skill_extraction: SKILL_EXTRACTION_TEMPLATE.to_string(),
            experience_level: EXPERIENCE_LEVEL_TEMPLATE.to_string(),
            explanation: EXPLANATION_TEMPLATE.to_string(),
            suggestions: SUGGESTIONS_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn render_skill_extraction(&self, text: &str) -> String {
        self.skill_extraction.replace("{text}", text)
    }

    pub fn render_experience_level(&self, text: &str) -> String {
        self.experience_level.replace("{text}", text)
    }

    /// `analysis_json` is the serialized capability analysis
    pub fn render_explanation(&self, analysis_json: &str) -> String {
        self.explanation.replace("{analysis}", analysis_json)
    }

    pub fn render_suggestions(&self, analysis_json: &str, max: usize) -> String {
        self.suggestions
            .replace("{analysis}", analysis_json)
            .replace("{max}", &max.to_string())
    }
}

const SKILL_EXTRACTION_TEMPLATE: &str = r#"Extract the professional skills mentioned in the text below and group them into these categories:

- core_technical: programming languages and core technologies
- frameworks: libraries and application frameworks
- cloud_devops: cloud platforms, containers, CI/CD, infrastructure
- databases: database engines and data stores
- tools_methodologies: development tools and working methods
- soft_skills: interpersonal and organisational skills

Respond with a single JSON object only. Use exactly the category names above as keys
and arrays of short lowercase skill names as values. Omit categories with no skills.
Example: {"core_technical": ["python", "sql"], "databases": ["postgresql"]}

<TEXT>
{text}
</TEXT>"#;

const EXPERIENCE_LEVEL_TEMPLATE: &str = r#"Classify the seniority of the candidate described in the resume below.

Answer with exactly one word: junior, mid, or senior.

<RESUME>
{text}
</RESUME>"#;

const EXPLANATION_TEMPLATE: &str = r#"You are reviewing how well a candidate's capabilities fit a job. The structured analysis is:

{analysis}

Write one short paragraph (3-4 sentences) for the candidate explaining the overall capability score.
Mention the skill match and the experience compatibility. Be encouraging but honest.
Plain text only, no headings or lists."#;

const SUGGESTIONS_TEMPLATE: &str = r#"You are a career coach. Based on this capability analysis of a candidate against a job:

{analysis}

Give at most {max} concrete, actionable suggestions to improve the candidate's fit, most important first.
Refer to specific missing skills where relevant.
Format each suggestion on its own line as a numbered item, e.g. "1. Build a small project using docker"."#;

/*!
 * Prompt templates for page translation.
 *
 * The system prompt tells the model how to treat OCR'd comic text and that
 * the reply must be the same keyed JSON object with translated values.
 */

/// System prompt template with language placeholders.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// The default system prompt for comic page translation.
    pub const COMIC_TRANSLATOR: &'static str = r#"You are an expert translator who translates {source_language} to {target_language}. You pay attention to style, formality, idioms, slang etc and try to convey it in the way a {target_language} speaker would understand.
BE MORE NATURAL. NEVER USE 당신, 그녀, 그 or its Japanese equivalents.
Specifically, you will be translating text OCR'd from a comic. The OCR is not perfect and as such you may receive text with typos or other mistakes.
To aid you and provide context, You may be given the image of the page and/or extra context about the comic. You will be given a json string of the detected text blocks and the text to translate. Return the json string with the texts translated. DO NOT translate the keys of the json. For each block:
- If it's already in {target_language} or looks like gibberish, OUTPUT IT AS IT IS instead
- DO NOT give explanations
Do Your Best! I'm really counting on you."#;

    /// Instruction placed between the extra context and the blocks.
    pub const NATURAL_INSTRUCTION: &'static str = "Make the translation sound as natural as possible.";

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Create the default comic translator template.
    pub fn comic_translator() -> Self {
        Self::new(Self::COMIC_TRANSLATOR)
    }

    /// Render the template with the given variables.
    pub fn render(&self, source_language: &str, target_language: &str) -> String {
        self.template
            .replace("{source_language}", source_language)
            .replace("{target_language}", target_language)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::comic_translator()
    }
}

/// System prompt for translating from one language label to another
pub fn build_system_prompt(source_language: &str, target_language: &str) -> String {
    PromptTemplate::comic_translator().render(source_language, target_language)
}

/// User prompt carrying the extra context and the keyed block texts
pub fn build_user_prompt(extra_context: &str, raw_text: &str) -> String {
    format!(
        "{}\n{}\nTranslate this:\n{}",
        extra_context,
        PromptTemplate::NATURAL_INSTRUCTION,
        raw_text
    )
}

//! Prompt construction for the three model-backed operations, plus the
//! markdown cleanup applied to translated code.

/// System instruction attached to every chat request.
pub const SYSTEM_INSTRUCTION: &str = "\
You are Friction AI, an advanced enterprise AI assistant.

CORE IDENTITY:
- Name: Friction AI
- Persona: Professional, precise, and educational.
- Tone: Structured, clear, and easy to understand.

RESPONSE FORMATTING GUIDELINES (STRICT):
1. **Structure**:
   - Use clearly defined sections with **Bold Headers**.
   - Use **Numbered Lists** (1. 2. 3.) for main steps or points.
   - Use **Bullet Points** (* or -) for details under main points.

2. **Explanation Style**:
   - Start with a direct definition or answer.
   - Break down long explanations into points.

3. **CODING TASKS**:
   - Provide code in markdown blocks with language tags.
   - Briefly explain the code after the block.

4. **LANGUAGE ADAPTATION (CRITICAL)**:
   - Always detect and match the user's language automatically.
   - Keep technical terms in English (e.g., CPU, RAM, function, variable).
   - If the user switches language mid-conversation, switch with them.
";

/// Build the prompt-engineering meta-prompt for image prompt enhancement.
pub fn image_prompt(prompt: &str, style: &str) -> String {
    format!(
        "You are an expert AI image generation prompt engineer.\n\
         \n\
         User's request: \"{prompt}\"\n\
         Style preference: {style}\n\
         \n\
         Create a professional, detailed image generation prompt with these sections:\n\
         \n\
         **1. Enhanced Description** (2-3 sentences)\n\
         Expand the user's idea with rich visual details, specific elements, and atmospheric qualities.\n\
         \n\
         **2. Technical Specifications**\n\
         - Lighting: (e.g., golden hour, studio lighting, dramatic shadows)\n\
         - Camera: (e.g., wide angle, macro, aerial view)\n\
         - Composition: (e.g., rule of thirds, centered, dynamic)\n\
         - Quality: (e.g., 8k resolution, highly detailed, photorealistic)\n\
         \n\
         **3. Style & Aesthetic**\n\
         - Art style: (e.g., photorealistic, digital art, 3D render)\n\
         - Color palette: (specific colors and tones)\n\
         - Mood: (e.g., professional, dramatic, serene)\n\
         \n\
         **4. Negative Prompt**\n\
         List 5-7 things to avoid for better results (e.g., blurry, distorted, low quality)\n\
         \n\
         **5. Platform Recommendations**\n\
         - Best suited for: DALL-E 3 / Midjourney / Stable Diffusion\n\
         - Suggested aspect ratio\n\
         - Additional tips\n\
         \n\
         Format clearly with markdown headers. Make it copy-paste ready for immediate use."
    )
}

/// Build the code translation prompt.
pub fn translation_prompt(code: &str, target_language: &str) -> String {
    format!(
        "You are an expert code translator.\n\
         Translate the following code to {target_language}.\n\
         Return ONLY the translated code without any markdown formatting, backticks, or explanations.\n\
         Maintain the original logic and structure.\n\
         \n\
         Code to translate:\n\
         {code}"
    )
}

/// Strip markdown code fences a model may wrap translated code in, despite
/// being told not to.
pub fn strip_code_fences(text: &str) -> String {
    let mut out = text.trim().to_string();

    if out.starts_with("```") {
        let lines: Vec<&str> = out.split('\n').collect();
        if lines.len() > 2 && lines.last().map(|l| l.trim()) == Some("```") {
            out = lines[1..lines.len() - 1].join("\n");
        } else if lines.len() > 1 {
            out = lines[1..].join("\n");
        }
    }

    out.trim_matches('`').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fences_with_language_tag() {
        let raw = "```rust\nfn main() {}\n```";
        assert_eq!(strip_code_fences(raw), "fn main() {}");
    }

    #[test]
    fn strips_opening_fence_without_closing() {
        let raw = "```python\nprint('hi')";
        assert_eq!(strip_code_fences(raw), "print('hi')");
    }

    #[test]
    fn leaves_plain_code_untouched() {
        assert_eq!(strip_code_fences("  fn main() {}  "), "fn main() {}");
    }

    #[test]
    fn strips_stray_backticks() {
        assert_eq!(strip_code_fences("`let x = 1;`"), "let x = 1;");
    }

    #[test]
    fn translation_prompt_names_target_language() {
        let prompt = translation_prompt("print('hi')", "Rust");
        assert!(prompt.contains("Translate the following code to Rust"));
        assert!(prompt.contains("print('hi')"));
    }

    #[test]
    fn image_prompt_carries_style() {
        let prompt = image_prompt("a red fox", "cinematic");
        assert!(prompt.contains("\"a red fox\""));
        assert!(prompt.contains("Style preference: cinematic"));
    }
}

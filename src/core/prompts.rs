// src/core/prompts.rs — Fixed prompt text and the three user-message builders

/// System prompt for generation and improvement requests.
pub const SYSTEM_PROMPT: &str = r#"You are an expert Python programmer specializing in creating visually stunning and well-structured applications. Generate clean, efficient, and well-documented Python code based on the user's request.

Follow these EXACT rules for code generation:
1. ALWAYS wrap your code response in <code></code> tags
2. Include ALL necessary imports at the top
3. Add descriptive comments and docstrings
4. Return ONLY the code within the tags, no explanations outside the tags
5. Make sure the code is complete and can run immediately
6. Use proper Python formatting and PEP 8 guidelines
7. NEVER use or reference external files (no loading images, sounds, or data files)
8. ALL assets (graphics, sounds, data) must be generated programmatically within the code

For visual applications (GUI, games, graphics):
- Create beautiful, polished visuals using ONLY programmatic generation
- All graphics must be drawn using the framework's primitives (shapes, lines, etc.)
- Implement smooth animations and transitions
- Use appealing color schemes and visual effects
- Design intuitive and responsive UI/UX
- Add visual feedback for user interactions
- Include particle effects and visual polish where appropriate
- ALL visual assets must be created within the code itself

return the full code in <code></code> tags"#;

/// System prompt for the single fix attempt.
pub const ERROR_CORRECTION_PROMPT: &str = r#"You are an expert Python debugging agent. Your task is to fix code that has runtime errors.
Focus ONLY on fixing the specific error provided. Do not make unnecessary improvements or changes.

Follow these rules EXACTLY:
1. Analyze the error message carefully
2. Make minimal changes needed to fix the error
3. Preserve the original functionality
4. Return the COMPLETE fixed code in <code></code> tags
5. Do not add features or make improvements beyond error fixing
6. Keep all assets programmatically generated
7. NEVER return partial code or just the fixed section
8. Include ALL imports and ALL functions from the original code
9. Make sure to wrap the ENTIRE program in <code></code> tags
10. The code between the tags must be immediately runnable

Example format:
<code>
import something

# All original imports and code here
# With minimal fixes applied
# COMPLETE program, not just the fixed parts

def main():
    # Complete main function
    pass

if __name__ == "__main__":
    main()
</code>"#;

pub const IMPROVEMENT_PROMPT: &str = r#"Improve this working Python code with the following priorities:

1. Visual Enhancement (for GUI/games):
   - Enhance visual aesthetics (colors, shapes, animations)
   - Add visual polish (particles, effects, transitions)
   - Improve UI/UX elements
   - Make the visuals more professional and engaging
   - ALL graphics must be generated programmatically
   - Use framework primitives for all visual assets

2. Feature Enhancement:
   - Expand core functionality
   - Add quality-of-life improvements
   - Implement additional user interactions
   - Include more game mechanics/options if it's a game
   - ALL assets must be created within the code

3. Technical Optimization:
   - Optimize performance
   - Improve code organization
   - Add helpful comments
   - NO external file operations

Keep the code complete and runnable. Return the full improved code in its entirety in <code></code> tags."#;

pub fn generate_message(prompt: &str) -> String {
    format!("Create a new Python program for: {prompt}")
}

pub fn improve_message(code: &str) -> String {
    format!("{IMPROVEMENT_PROMPT}\n\nHere's the code to improve:\n{code}")
}

/// `error` is expected to be truncated already.
pub fn fix_message(code: &str, error: &str) -> String {
    format!("Fix this Python code that has the following error:\n{error}\n\nHere's the code:\n{code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_demand_code_tags() {
        for p in [SYSTEM_PROMPT, ERROR_CORRECTION_PROMPT, IMPROVEMENT_PROMPT] {
            assert!(p.contains("<code></code>"));
        }
    }

    #[test]
    fn test_generate_message() {
        assert_eq!(
            generate_message("print hello"),
            "Create a new Python program for: print hello"
        );
    }

    #[test]
    fn test_improve_message_appends_code() {
        let m = improve_message("print(1)");
        assert!(m.starts_with("Improve this working Python code"));
        assert!(m.ends_with("Here's the code to improve:\nprint(1)"));
    }

    #[test]
    fn test_fix_message_layout() {
        let m = fix_message("x = 1/0", "ZeroDivisionError: division by zero");
        assert_eq!(
            m,
            "Fix this Python code that has the following error:\nZeroDivisionError: division by zero\n\nHere's the code:\nx = 1/0"
        );
    }
}

//! Prompts sent to the text-generation backend.

use crate::parse::ParsedUnit;

/// Section headings of generated documentation, in order.
pub const DOCUMENTATION_SECTIONS: [&str; 8] = [
    "Purpose",
    "Algorithm",
    "Functions",
    "Parameters",
    "Return Values",
    "Complexity",
    "Usage",
    "Improvements",
];

fn code_block(unit: &ParsedUnit) -> String {
    format!("```{}\n{}\n```", unit.language.name(), unit.original)
}

pub fn documentation(unit: &ParsedUnit) -> String {
    let sections: String = DOCUMENTATION_SECTIONS
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. ## {}\n", i + 1, s))
        .collect();

    format!(
        "Generate comprehensive markdown documentation for this {lang} code:\n\n\
         {code}\n\n\
         Use exactly these second-level sections, in this order:\n\
         {sections}\n\
         Explain the algorithm step by step, describe every function with its \
         parameters and return values, give a brief time/space complexity \
         analysis, show example usage and list potential improvements.\n\
         Use proper markdown formatting with headers, code blocks and bullet points.",
        lang = unit.language.display_name(),
        code = code_block(unit),
        sections = sections,
    )
}

pub fn refactoring(unit: &ParsedUnit) -> String {
    format!(
        "Analyze the following {lang} code and provide specific refactoring suggestions:\n\n\
         {code}\n\n\
         Please provide:\n\
         1. Code structure improvements\n\
         2. Variable naming suggestions\n\
         3. Logic optimization opportunities\n\
         4. Modern {lang} best practices\n\
         5. Specific code examples where applicable\n\n\
         Format as clear, actionable bullet points.",
        lang = unit.language.display_name(),
        code = code_block(unit),
    )
}

pub fn improvements(unit: &ParsedUnit) -> String {
    format!(
        "Analyze this {lang} code and provide specific, actionable improvement suggestions:\n\n\
         {code}\n\n\
         Focus on:\n\
         1. **Performance Optimizations**: Specific ways to make it faster\n\
         2. **Memory Efficiency**: How to reduce memory usage\n\
         3. **Code Quality**: Better naming, structure, readability\n\
         4. **Language Features**: Modern {lang} features that could help\n\
         5. **Security Considerations**: Potential security issues\n\
         6. **Error Handling**: How to make it more robust\n\
         7. **Best Practices**: Industry standard practices\n\n\
         Provide specific code examples where possible.",
        lang = unit.language.display_name(),
        code = code_block(unit),
    )
}

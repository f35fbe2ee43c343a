pub const TEMPLATE_SYSTEM: &str = include_str!("../data/prompts/template_system.txt");
pub const TEMPLATE_USER: &str = include_str!("../data/prompts/template_user.txt");
pub const COMIC_SYSTEM: &str = include_str!("../data/prompts/comic_system.txt");
pub const COMIC_USER: &str = include_str!("../data/prompts/comic_user.txt");
pub const IMAGE_STYLE: &str = include_str!("../data/prompts/image_style.txt");
pub const IMAGE_USER: &str = include_str!("../data/prompts/image_user.txt");
pub const IMAGE_TECHNICAL: &str = include_str!("../data/prompts/image_technical.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Full image prompt: fixed style preamble, the story, fixed technical suffix.
pub fn image_prompt(prompt: &str) -> String {
    format!(
        "{}\n{}\n{}",
        IMAGE_STYLE.trim_end(),
        render(IMAGE_USER, &[("prompt", prompt)]).trim_end(),
        IMAGE_TECHNICAL.trim_end()
    )
}

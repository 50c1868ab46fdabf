pub const BLOG_IMAGE: &str = include_str!("../data/prompts/blog_image.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Build the illustration prompt for a blog post title.
pub fn blog_image_prompt(title: &str) -> String {
    render(BLOG_IMAGE, &[("title", title)])
}

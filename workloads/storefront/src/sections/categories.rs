//! Category selector.

use herbal_sdk::herbal_commerce::prelude::Category;

/// Render the category row, highlighting the active one.
///
/// Each entry carries `data-category` for the in-page switch script, which
/// swaps only the product grid. The `?category=<name>` link is the
/// fallback when scripts are off.
pub fn render_categories(active: Category) -> String {
    let items: String = Category::ALL
        .iter()
        .map(|c| {
            let class = if *c == active {
                "category-pill category-pill--active"
            } else {
                "category-pill"
            };
            format!(
                r#"<a class="{class}" href="?category={name}" data-category="{name}"{current}>{name}</a>"#,
                class = class,
                name = c.name(),
                current = if *c == active { r#" aria-current="page""# } else { "" }
            )
        })
        .collect();

    format!(
        r#"<nav class="container categories" aria-label="Categories">{}</nav>"#,
        items
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_categories_in_order() {
        let html = render_categories(Category::Chicken);
        let positions: Vec<usize> = ["Chicken", "Mutton", "Fish", "Eggs"]
            .iter()
            .map(|name| html.find(&format!("?category={}", name)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_only_active_is_highlighted() {
        let html = render_categories(Category::Fish);
        assert_eq!(html.matches("category-pill--active").count(), 1);
        assert_eq!(html.matches("data-category=").count(), 4);
        assert!(html.contains(
            r#"<a class="category-pill category-pill--active" href="?category=Fish" data-category="Fish" aria-current="page">Fish</a>"#
        ));
    }
}

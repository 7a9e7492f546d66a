//! Site footer.

use chrono::Datelike;

/// Current calendar year (UTC).
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Render the footer for a given copyright year.
pub fn render_footer(year: i32) -> String {
    format!(
        r##"<footer class="site-footer">
    <div class="container footer-row">
        <div>&copy; {year} The Herbal Chicken</div>
        <nav class="footer-links">
            <a href="#">Privacy</a>
            <a href="#">Terms</a>
            <a href="#">Support</a>
        </nav>
    </div>
</footer>"##,
        year = year
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer() {
        let html = render_footer(2026);
        assert!(html.contains("&copy; 2026 The Herbal Chicken"));
        for link in ["Privacy", "Terms", "Support"] {
            assert!(html.contains(&format!(">{}</a>", link)));
        }
    }

    #[test]
    fn test_current_year_is_plausible() {
        assert!(current_year() >= 2024);
    }
}

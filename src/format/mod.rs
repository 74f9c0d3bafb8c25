//! Output formatting for product views (table, JSON, markdown).

use crate::config::OutputFormat;
use crate::view::{AvailabilityView, Badge, PlatformOption, ProductView, RatingView};

/// Formats product views for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single product.
    pub fn format_product(&self, product: &ProductView) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(product),
            OutputFormat::Table => self.table_single(product),
            OutputFormat::Markdown => self.markdown_single(product),
        }
    }

    /// Formats multiple products.
    pub fn format_products(&self, products: &[ProductView]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_products(products),
            OutputFormat::Table => self.table_products(products),
            OutputFormat::Markdown => self.markdown_products(products),
        }
    }

    /// Formats the platform list.
    pub fn format_platforms(&self, platforms: &[PlatformOption]) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(platforms).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Table => {
                let mut lines = vec![format!("{:<12} {:<24} {}", "Name", "Label", "Enabled")];
                lines.push(format!("{:-<12} {:-<24} {:-<7}", "", "", ""));
                for p in platforms {
                    lines.push(format!(
                        "{:<12} {:<24} {}",
                        p.name,
                        p.label,
                        if p.enabled { "yes" } else { "no" }
                    ));
                }
                lines.join("\n")
            }
            OutputFormat::Markdown => platforms
                .iter()
                .map(|p| {
                    if p.enabled {
                        format!("- **{}** (`{}`)", p.label, p.name)
                    } else {
                        format!("- ~~{}~~ (`{}`)", p.label, p.name)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    // JSON formatting

    fn json_single(&self, product: &ProductView) -> String {
        serde_json::to_string_pretty(product).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_products(&self, products: &[ProductView]) -> String {
        serde_json::to_string_pretty(products).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn rating_str(rating: &RatingView) -> String {
        match &rating.stars {
            Some(stars) => format!("{}/5 {}", rating.text, stars.glyphs()),
            None => rating.text.clone(),
        }
    }

    fn availability_str(availability: &AvailabilityView) -> String {
        match availability.badge {
            Badge::Positive => format!("✓ {}", availability.text),
            Badge::Negative => format!("✗ {}", availability.text),
            Badge::Neutral => availability.text.clone(),
        }
    }

    fn table_single(&self, product: &ProductView) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Title:        {}", product.title));
        lines.push(format!("Price:        {}", product.price));
        lines.push(format!("Rating:       {}", Self::rating_str(&product.rating)));
        lines.push(format!("Availability: {}", Self::availability_str(&product.availability)));
        if let Some(url) = &product.url {
            lines.push(format!("URL:          {}", url));
        }
        lines.push(format!("Image:        {}", product.image.src));
        lines.push(format!("Description:  {}", product.description));

        let details = &product.details;
        lines.push(String::new());
        lines.push("Product Details:".to_string());
        if let Some(placeholder) = &details.placeholder {
            lines.push(format!("  {}", placeholder));
        }
        for row in &details.rows {
            lines.push(format!("  {}", row));
        }

        if !details.features.is_empty() {
            lines.push(String::new());
            lines.push("Key Features:".to_string());
            for feature in &details.features {
                lines.push(format!("  - {}", feature));
            }
        }

        lines.join("\n")
    }

    fn table_products(&self, products: &[ProductView]) -> String {
        let price_width = 16;
        let rating_width = 6;
        let stock_width = 16;
        let title_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<price_width$}  {:<rating_width$}  {:<stock_width$}  {}",
            "Price", "Rating", "Availability", "Title"
        ));
        lines.push(format!(
            "{:-<price_width$}  {:-<rating_width$}  {:-<stock_width$}  {:-<title_width$}",
            "", "", "", ""
        ));

        for product in products {
            lines.push(format!(
                "{:>price_width$}  {:>rating_width$}  {:<stock_width$}  {}",
                product.price,
                product.rating.text,
                truncate(&product.availability.text, stock_width),
                truncate(&product.title, title_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", products.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, product: &ProductView) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", product.title));
        lines.push(String::new());

        lines.push(format!("![{}]({})", product.image.alt, product.image.src));
        lines.push(String::new());

        lines.push(format!("- **Price:** {}", product.price));
        lines.push(format!("- **Rating:** {}", Self::rating_str(&product.rating)));
        lines.push(format!(
            "- **Availability:** {}",
            Self::availability_str(&product.availability)
        ));
        if let Some(url) = &product.url {
            lines.push(format!("- **URL:** [View product]({})", url));
        }

        lines.push(String::new());
        lines.push(product.description.clone());

        let details = &product.details;
        lines.push(String::new());
        lines.push("### Product Details".to_string());
        lines.push(String::new());
        if let Some(placeholder) = &details.placeholder {
            lines.push(placeholder.clone());
        }
        for row in &details.rows {
            if row.value.is_empty() {
                lines.push(format!("- **{}:**", row.key));
            } else {
                lines.push(format!("- **{}:** {}", row.key, row.value));
            }
        }

        if !details.features.is_empty() {
            lines.push(String::new());
            lines.push("### Key Features".to_string());
            lines.push(String::new());
            for feature in &details.features {
                lines.push(format!("- {}", feature));
            }
        }

        lines.join("\n")
    }

    fn markdown_products(&self, products: &[ProductView]) -> String {
        let mut lines = Vec::new();

        lines.push("| Price | Rating | Availability | Title |".to_string());
        lines.push("|-------|--------|--------------|-------|".to_string());

        for product in products {
            let title = truncate(&product.title, 40);
            let title = match &product.url {
                Some(url) => format!("[{}]({})", title, url),
                None => title,
            };

            lines.push(format!(
                "| {} | {} | {} | {} |",
                product.price, product.rating.text, product.availability.text, title
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products found*", products.len()));

        lines.join("\n")
    }
}

/// Truncates on a char boundary, marking the cut with `...`.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ProductResult;
    use crate::view::PriceStyle;
    use serde_json::json;

    fn make_view() -> ProductView {
        let product: ProductResult = serde_json::from_value(json!({
            "title": "Test Product Title",
            "price": 1299.0,
            "rating": 4.5,
            "availability": "In Stock",
            "description": "A fine product",
            "image": "https://img.example.com/p.jpg",
            "url": "https://shop.example.com/p",
            "details": {
                "Brand: Acme": "",
                "Batteries": "Batteries :",
                "Key Features": ["Durable", "Light"]
            }
        }))
        .unwrap();
        ProductView::build(&product, &PriceStyle::default())
    }

    fn make_minimal_view() -> ProductView {
        ProductView::build(&ProductResult::default(), &PriceStyle::default())
    }

    fn make_long_title_view() -> ProductView {
        let product = ProductResult {
            title: Some("This is a very long product title that exceeds fifty characters and should be truncated in table output".to_string()),
            availability: Some("Currently out of stock".to_string()),
            ..ProductResult::default()
        };
        ProductView::build(&product, &PriceStyle::default())
    }

    // JSON format tests

    #[test]
    fn test_json_single_product() {
        let output = Formatter::new(OutputFormat::Json).format_product(&make_view());

        assert!(output.starts_with('{'));
        assert!(output.contains("\"title\": \"Test Product Title\""));
        assert!(output.contains("₹1,299.00"));
        assert!(output.contains("\"badge\": \"positive\""));
        assert!(output.contains("\"key\": \"Brand\""));
        assert!(output.contains("\"value\": \"Acme\""));
    }

    #[test]
    fn test_json_multiple_and_empty() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_products(&[make_view(), make_minimal_view()]);
        assert!(output.starts_with('['));
        assert!(output.ends_with(']'));

        assert_eq!(formatter.format_products(&[]), "[]");
    }

    // Table format tests

    #[test]
    fn test_table_single_product() {
        let output = Formatter::new(OutputFormat::Table).format_product(&make_view());

        assert!(output.contains("Title:        Test Product Title"));
        assert!(output.contains("Price:        ₹1,299.00"));
        assert!(output.contains("Rating:       4.5/5 ★★★★½"));
        assert!(output.contains("Availability: ✓ In Stock"));
        assert!(output.contains("URL:          https://shop.example.com/p"));
        assert!(output.contains("  Brand: Acme"));
        assert!(output.contains("  Batteries:"));
        assert!(output.contains("  - Durable"));
    }

    #[test]
    fn test_table_single_minimal_product() {
        let output = Formatter::new(OutputFormat::Table).format_product(&make_minimal_view());

        assert!(output.contains("Title:        N/A"));
        assert!(output.contains("Price:        N/A"));
        assert!(output.contains("Rating:       N/A"));
        assert!(output.contains("Availability: N/A"));
        assert!(!output.contains("URL:"));
        assert!(output.contains("No product details available."));
        assert!(!output.contains("Key Features:"));
    }

    #[test]
    fn test_table_negative_badge() {
        let output = Formatter::new(OutputFormat::Table).format_product(&make_long_title_view());
        assert!(output.contains("Availability: ✗ Currently out of stock"));
    }

    #[test]
    fn test_table_multiple_products() {
        let output = Formatter::new(OutputFormat::Table)
            .format_products(&[make_view(), make_minimal_view(), make_long_title_view()]);

        assert!(output.contains("Price"));
        assert!(output.contains("Rating"));
        assert!(output.contains("----------"));
        assert!(output.contains("₹1,299.00"));
        assert!(output.contains("N/A"));
        assert!(output.contains("This is a very long product title that exceeds"));
        assert!(output.contains("..."));
        assert!(output.contains("Total: 3 products"));
    }

    #[test]
    fn test_table_empty() {
        let output = Formatter::new(OutputFormat::Table).format_products(&[]);
        assert_eq!(output, "No products found.");
    }

    // Markdown format tests

    #[test]
    fn test_markdown_single_product() {
        let output = Formatter::new(OutputFormat::Markdown).format_product(&make_view());

        assert!(output.contains("## Test Product Title"));
        assert!(output.contains("![Test Product Title](https://img.example.com/p.jpg)"));
        assert!(output.contains("- **Price:** ₹1,299.00"));
        assert!(output.contains("- **URL:** [View product](https://shop.example.com/p)"));
        assert!(output.contains("### Product Details"));
        assert!(output.contains("- **Brand:** Acme"));
        assert!(output.contains("- **Batteries:**"));
        assert!(output.contains("### Key Features"));
    }

    #[test]
    fn test_markdown_multiple_products() {
        let output = Formatter::new(OutputFormat::Markdown)
            .format_products(&[make_view(), make_minimal_view()]);

        assert!(output.contains("| Price | Rating | Availability | Title |"));
        assert!(output.contains("[Test Product Title](https://shop.example.com/p)"));
        assert!(output.contains("*2 products found*"));
    }

    // Platform list

    #[test]
    fn test_format_platforms() {
        let platforms = vec![
            PlatformOption { name: "amazon".into(), label: "Amazon".into(), enabled: true },
            PlatformOption {
                name: "ajio".into(),
                label: "Ajio (Coming Soon)".into(),
                enabled: false,
            },
        ];

        let table = Formatter::new(OutputFormat::Table).format_platforms(&platforms);
        assert!(table.contains("Ajio (Coming Soon)"));
        assert!(table.contains("yes"));
        assert!(table.contains("no"));

        let md = Formatter::new(OutputFormat::Markdown).format_platforms(&platforms);
        assert!(md.contains("- **Amazon** (`amazon`)"));
        assert!(md.contains("- ~~Ajio (Coming Soon)~~ (`ajio`)"));

        let json = Formatter::new(OutputFormat::Json).format_platforms(&platforms);
        assert!(json.contains("\"enabled\": false"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("₹₹₹₹₹₹", 5), "₹₹...");
    }
}

use super::{escape, format_timestamp, layout};
use crate::service::catalog::Catalog;

pub fn render(catalog: &Catalog) -> String {
    let mut body = String::from("<h1>Products</h1>\n");

    let mut options = String::new();
    for supplier in &catalog.suppliers {
        options.push_str(&format!(
            "<option value=\"{}\">{}</option>",
            supplier.id,
            escape(&supplier.name)
        ));
    }
    body.push_str(&format!(
        r#"<form method="post" action="/products" class="create">
  <input name="title" placeholder="Title" required>
  <input name="source_url" type="url" placeholder="Source URL" required>
  <select name="supplier_id" required>
    <option value="">Select supplier</option>{options}
  </select>
  <button type="submit">Add product</button>
</form>
"#
    ));

    body.push_str("<div class=\"list\">\n");
    if catalog.products.is_empty() {
        body.push_str("<p class=\"empty\">No products yet.</p>\n");
    }
    for product in &catalog.products {
        body.push_str(&format!(
            r#"<div class="row">
  <a href="/products/{id}"><strong>{title}</strong></a>
  <span>{supplier}</span>
  <span>{created}</span>
</div>
"#,
            id = product.id,
            title = escape(&product.title),
            supplier = escape(product.supplier_name.as_deref().unwrap_or("Unknown supplier")),
            created = format_timestamp(&product.created_at),
        ));
    }
    body.push_str("</div>");

    layout("Products", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ProductListing, Supplier};
    use chrono::{TimeZone, Utc};

    #[test]
    fn lists_products_and_supplier_options() {
        let catalog = Catalog {
            suppliers: vec![Supplier {
                id: 3,
                name: "Acme".into(),
                website: None,
            }],
            products: vec![ProductListing {
                id: 11,
                title: "<Kettle>".into(),
                source_url: "https://shop.example/kettle".into(),
                supplier_id: 3,
                supplier_name: Some("Acme".into()),
                created_at: Utc.with_ymd_and_hms(2024, 3, 4, 5, 6, 7).unwrap(),
            }],
        };
        let html = render(&catalog);

        assert!(html.contains(r#"<option value="3">Acme</option>"#));
        assert!(html.contains(r#"<a href="/products/11"><strong>&lt;Kettle&gt;</strong></a>"#));
        assert!(html.contains("2024-03-04 05:06:07 UTC"));
        assert!(!html.contains("No products yet."));
    }

    #[test]
    fn empty_catalog_shows_placeholder() {
        let html = render(&Catalog {
            suppliers: Vec::new(),
            products: Vec::new(),
        });
        assert!(html.contains("No products yet."));
    }
}

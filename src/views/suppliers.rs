use super::{escape, is_linkable, layout};
use crate::service::suppliers::SupplierDirectory;

pub fn render(directory: &SupplierDirectory) -> String {
    let mut body = String::from("<h1>Suppliers</h1>\n<div class=\"list\">\n");

    if directory.suppliers.is_empty() {
        body.push_str("<p class=\"empty\">No suppliers yet.</p>\n");
    }

    for supplier in &directory.suppliers {
        let is_enabled = directory.enabled.contains(&supplier.id);
        let website = match supplier.website.as_deref() {
            Some(url) if is_linkable(url) => format!(
                "<a href=\"{url}\" target=\"_blank\" rel=\"noreferrer\">{url}</a>",
                url = escape(url)
            ),
            Some(url) if !url.trim().is_empty() => format!("<span>{}</span>", escape(url)),
            _ => String::new(),
        };
        let (class, label) = if is_enabled {
            ("enabled", "Enabled")
        } else {
            ("disabled", "Enable")
        };

        body.push_str(&format!(
            r#"<div class="row">
  <div><strong>{name}</strong> {website}</div>
  <form method="post" action="/suppliers/toggle">
    <input type="hidden" name="supplier_id" value="{id}">
    <input type="hidden" name="next_enabled" value="{next}">
    <button type="submit" class="{class}">{label}</button>
  </form>
</div>
"#,
            name = escape(&supplier.name),
            id = supplier.id,
            next = !is_enabled,
        ));
    }

    body.push_str("</div>");
    layout("Suppliers", &body)
}

use super::{escape, format_price, format_timestamp, is_linkable, layout};
use crate::service::offers::ProductDetail;

pub fn render(detail: &ProductDetail) -> String {
    let product = &detail.product;

    let mut byline = escape(product.supplier_name.as_deref().unwrap_or(""));
    if is_linkable(&product.source_url) {
        if !byline.is_empty() {
            byline.push_str(" • ");
        }
        byline.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noreferrer\">Source</a>",
            escape(&product.source_url)
        ));
    }

    let mut body = format!(
        r#"<header>
  <h1>{title}</h1>
  <div class="byline">{byline}</div>
  <form method="post" action="/products/{id}/seed-offers">
    <button type="submit">Seed dummy offers</button>
  </form>
</header>
<div class="list">
"#,
        title = escape(&product.title),
        id = product.id,
    );

    if detail.offers.is_empty() {
        body.push_str("<p class=\"empty\">No offers yet.</p>\n");
    }
    for offer in &detail.offers {
        let stock = if offer.in_stock {
            "<span class=\"in-stock\">In stock</span>"
        } else {
            "<span class=\"out-of-stock\">Out of stock</span>"
        };
        body.push_str(&format!(
            r#"<div class="row">
  <div><strong>{title}</strong> <small>{created}</small></div>
  <div>{stock} <strong>{currency} {price}</strong></div>
</div>
"#,
            title = escape(offer.title.as_deref().unwrap_or("Untitled offer")),
            created = format_timestamp(&offer.created_at),
            currency = escape(&offer.currency),
            price = format_price(offer.price),
        ));
    }
    body.push_str("</div>");

    layout(&product.title, &body)
}

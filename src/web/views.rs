//! HTML rendering for the storefront and admin pages.
//!
//! Pages are small enough that plain `format!` templates are used. Every piece of
//! user-controlled text goes through [`escape`].

use crate::{
    core::cart::{CartLine, cart_total},
    entities::product,
};

/// Escapes text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<nav><a href="/">Shop</a> | <a href="/cart">Cart</a> | <a href="/admin/inventory">Admin</a></nav>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape(title),
    )
}

fn image_tag(product: &product::Model) -> String {
    if product.image_url.is_empty() {
        String::new()
    } else {
        format!(
            r#"<img src="/{}" alt="{}" width="120">"#,
            escape(&product.image_url),
            escape(&product.name)
        )
    }
}

/// Storefront: every listed product with an add-to-cart form.
#[must_use]
pub fn browse_page(products: &[product::Model]) -> String {
    if products.is_empty() {
        return layout("Products", "<p>No products yet.</p>");
    }

    let cards: String = products
        .iter()
        .map(|p| {
            let status = if p.is_available {
                "In stock"
            } else {
                "Unavailable"
            };
            format!(
                r#"<div class="product">
{image}
<h2>{name}</h2>
<p>{description}</p>
<p>${price:.2} &middot; {status}</p>
<form method="post" action="/cart">
<input type="hidden" name="product_id" value="{id}">
<input type="number" name="quantity" value="1" min="1">
<button type="submit">Add to cart</button>
</form>
</div>
"#,
                image = image_tag(p),
                name = escape(&p.name),
                description = escape(&p.description),
                price = p.price,
                id = p.id,
            )
        })
        .collect();

    layout("Products", &cards)
}

/// Cart page with per-line quantity and remove forms.
#[must_use]
pub fn cart_page(lines: &[CartLine]) -> String {
    if lines.is_empty() {
        return layout("Your cart", "<p>Your cart is empty.</p>");
    }

    let rows: String = lines
        .iter()
        .map(|line| {
            format!(
                r#"<tr>
<td>{name}</td>
<td>${price:.2}</td>
<td><form method="post" action="/update_cart/{id}"><input type="number" name="quantity" value="{quantity}"><button type="submit">Update</button></form></td>
<td>${subtotal:.2}</td>
<td><form method="post" action="/remove_from_cart/{id}"><button type="submit">Remove</button></form></td>
</tr>
"#,
                name = escape(&line.product.name),
                price = line.product.price,
                id = line.id,
                quantity = line.quantity,
                subtotal = line.subtotal(),
            )
        })
        .collect();

    let body = format!(
        "<table>\n<tr><th>Product</th><th>Price</th><th>Quantity</th><th>Subtotal</th><th></th></tr>\n{rows}</table>\n<p>Total: ${:.2}</p>",
        cart_total(lines)
    );
    layout("Your cart", &body)
}

/// Admin inventory table with edit and delete links.
#[must_use]
pub fn inventory_page(products: &[product::Model], notice: Option<&str>) -> String {
    let notice = notice
        .map(|n| format!(r#"<p class="notice">{}</p>"#, escape(n)))
        .unwrap_or_default();

    let rows: String = products
        .iter()
        .map(|p| {
            format!(
                r#"<tr><td>{id}</td><td>{image}</td><td>{name}</td><td>${price:.2}</td><td>{available}</td><td><a href="/admin/edit/{id}">Edit</a> <a href="/admin/delete/{id}">Delete</a></td></tr>
"#,
                id = p.id,
                image = image_tag(p),
                name = escape(&p.name),
                price = p.price,
                available = if p.is_available { "yes" } else { "no" },
            )
        })
        .collect();

    let body = format!(
        "{notice}<p><a href=\"/admin/add\">Add product</a></p>\n<table>\n<tr><th>ID</th><th>Image</th><th>Name</th><th>Price</th><th>Available</th><th></th></tr>\n{rows}</table>"
    );
    layout("Inventory", &body)
}

/// Add form when `product` is `None`, edit form pre-filled from it otherwise.
#[must_use]
pub fn product_form_page(product: Option<&product::Model>) -> String {
    let (title, action) = match product {
        Some(p) => ("Edit product".to_string(), format!("/admin/edit/{}", p.id)),
        None => ("Add product".to_string(), "/admin/add".to_string()),
    };
    let name = product.map(|p| escape(&p.name)).unwrap_or_default();
    let description = product.map(|p| escape(&p.description)).unwrap_or_default();
    let price = product.map(|p| format!("{:.2}", p.price)).unwrap_or_default();
    let checked = if product.is_some_and(|p| p.is_available) {
        " checked"
    } else {
        ""
    };
    let current_image = product.map(image_tag).unwrap_or_default();

    let body = format!(
        r#"<form method="post" action="{action}" enctype="multipart/form-data">
<label>Name <input type="text" name="name" value="{name}" required></label>
<label>Description <textarea name="description">{description}</textarea></label>
<label>Price <input type="number" step="0.01" min="0" name="price" value="{price}" required></label>
<label>Available <input type="checkbox" name="is_available"{checked}></label>
{current_image}
<label>Image <input type="file" name="image" accept="image/*"></label>
<button type="submit">Save</button>
</form>"#
    );
    layout(&title, &body)
}

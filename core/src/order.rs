use crate::models::Product;

pub const DEFAULT_WHATSAPP_NUMBER: &str = "923310076524";
pub const DEFAULT_PHONE: &str = "03310076524";

const MESSAGING_HOST: &str = "https://wa.me";

/// Prefilled order text: name, price, then image URL when present,
/// each on its own line.
pub fn build_order_message(product: &Product) -> String {
    let mut message = format!(
        "Hi! I want to order:\n\n*{}*\nPrice: Rs. {}",
        product.name, product.price
    );
    if let Some(url) = product.image_url.as_deref().filter(|u| !u.is_empty()) {
        message.push_str("\n\nImage: ");
        message.push_str(url);
    }
    message
}

/// Keeps only ASCII digits. Falls back to [`DEFAULT_WHATSAPP_NUMBER`] when
/// nothing usable is left.
pub fn sanitize_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        DEFAULT_WHATSAPP_NUMBER.to_string()
    } else {
        digits
    }
}

/// Deep link into the messaging app. `encoded_text` must already be
/// URL-component encoded.
pub fn whatsapp_link(number: &str, encoded_text: &str) -> String {
    format!("{MESSAGING_HOST}/{number}?text={encoded_text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panadol(image_url: Option<&str>) -> Product {
        Product {
            id: "p1".into(),
            name: "Panadol".into(),
            price: 50.0,
            description: None,
            image_url: image_url.map(str::to_string),
        }
    }

    #[test]
    fn order_message_lists_name_price_and_image_in_order() {
        let message = build_order_message(&panadol(Some("http://x/y.png")));
        let lines: Vec<&str> = message.lines().collect();

        let name = lines.iter().position(|l| l.contains("Panadol")).unwrap();
        let price = lines.iter().position(|l| l.contains("50")).unwrap();
        let image = lines.iter().position(|l| l.contains("http://x/y.png")).unwrap();
        assert!(name < price && price < image);
        assert_eq!(lines[price], "Price: Rs. 50");
    }

    #[test]
    fn order_message_omits_image_line_without_url() {
        let message = build_order_message(&panadol(None));
        assert!(!message.contains("Image"));
        assert!(message.ends_with("Price: Rs. 50"));
    }

    #[test]
    fn fractional_prices_keep_their_decimals() {
        let mut product = panadol(None);
        product.price = 12.5;
        assert!(build_order_message(&product).contains("Rs. 12.5"));
    }

    #[test]
    fn sanitize_strips_symbols_and_spaces() {
        assert_eq!(sanitize_number("+92 331-0076524"), "923310076524");
    }

    #[test]
    fn sanitize_falls_back_when_nothing_numeric() {
        assert_eq!(sanitize_number(" + "), DEFAULT_WHATSAPP_NUMBER);
    }

    #[test]
    fn link_targets_number_with_text_query() {
        assert_eq!(
            whatsapp_link("923310076524", "Hi%21"),
            "https://wa.me/923310076524?text=Hi%21"
        );
    }
}

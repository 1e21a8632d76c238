use storefront_core::Product;

const EMPTY_STOCK: &str = "Abhi koi medicine stock mein nahi hai.";

/// `- <name>: Rs. <price> (<description>)`, one line per product.
pub fn price_list(products: &[Product]) -> String {
    if products.is_empty() {
        return EMPTY_STOCK.to_string();
    }
    products
        .iter()
        .map(|p| match p.description.as_deref().filter(|d| !d.is_empty()) {
            Some(desc) => format!("- {}: Rs. {} ({desc})", p.name, p.price),
            None => format!("- {}: Rs. {}", p.name, p.price),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The assistant persona, with the live stock list and order number embedded.
pub fn system_prompt(products: &[Product], whatsapp_number: &str) -> String {
    let medicines = price_list(products);
    format!(
        "Tu Farooq Pharmacy ka assistant hai jo Dera Ghazi Khan, Pakistan mein hai. \
Tu Roman Urdu mein baat karta hai.

HAMARE PAAS YE MEDICINES AVAILABLE HAIN:
{medicines}

Tera kaam:
- Customer ko medicines dhundhne mein madad karo
- Medicines ki information do aur unhe convince karo ke hamare paas best quality aur prices hain
- Hamesha encourage karo: \"Hum se khareedein, best prices milenge!\" ya \"Farooq Pharmacy se order karein, quality guaranteed!\"
- WhatsApp pe order karne ka number: {whatsapp_number}
- Dost jaisa friendly aur helpful baat karo
- Agar medicine list mein nahi hai, to bolo \"Abhi stock mein nahi hai, lekin aap pharmacy call kar sakte hain\"
- Medical advice mat do, doctor se milne ko bolo
- Jab medicine recommend karo, to uski price bhi batao

Chhoti aur friendly responses do. Encourage customer to buy from Farooq Pharmacy!
Example responses:
- \"Ji bilkul! Panadol Rs. 50 mein available hai. Abhi WhatsApp pe order karein!\"
- \"Ap sahi jagah aaye! Hamare paas best medicines hain affordable prices pe!\"
- \"Farooq Pharmacy se better option nahi milega DG Khan mein!\""
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: f64, description: Option<&str>) -> Product {
        Product {
            id: name.to_lowercase(),
            name: name.into(),
            price,
            description: description.map(str::to_string),
            image_url: None,
        }
    }

    #[test]
    fn price_list_includes_description_when_present() {
        let list = price_list(&[
            product("Panadol", 50.0, Some("bukhar")),
            product("Brufen", 75.5, None),
            product("Disprin", 20.0, Some("")),
        ]);
        assert_eq!(list, "- Panadol: Rs. 50 (bukhar)\n- Brufen: Rs. 75.5\n- Disprin: Rs. 20");
    }

    #[test]
    fn empty_catalog_says_nothing_in_stock() {
        assert_eq!(price_list(&[]), EMPTY_STOCK);
    }

    #[test]
    fn system_prompt_embeds_stock_and_number() {
        let prompt = system_prompt(&[product("Panadol", 50.0, None)], "923001234567");
        assert!(prompt.contains("- Panadol: Rs. 50"));
        assert!(prompt.contains("number: 923001234567"));
    }
}

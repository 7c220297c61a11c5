//! Telegram message layout for new shipping requests.

use shipdesk_common::types::{DeliveryType, RequestRecord};

/// Shown for any missing or blank field.
pub const NOT_SPECIFIED: &str = "not specified";

/// Shown when there are no special instructions.
pub const NO_INSTRUCTIONS: &str = "None";

/// Shown for an unrecognized delivery-type tag.
pub const UNKNOWN_DELIVERY_TYPE: &str = "Unknown";

/// Shown when the record carries no submission timestamp.
pub const JUST_NOW: &str = "just now";

const DELIVERY_LABELS: &[(DeliveryType, &str)] = &[
    (DeliveryType::Astana, "🏢 Astana shipment"),
    (DeliveryType::Regions, "🌍 Regional shipment"),
];

/// Label for a delivery-type tag, `Unknown` if the tag is not recognized.
pub fn delivery_label(tag: &str) -> &'static str {
    DeliveryType::parse(tag)
        .and_then(|t| {
            DELIVERY_LABELS
                .iter()
                .find(|(known, _)| *known == t)
                .map(|(_, label)| *label)
        })
        .unwrap_or(UNKNOWN_DELIVERY_TYPE)
}

/// Render a request as an HTML-mode Telegram message.
///
/// Pure and deterministic. Never fails on missing data: absent fields render
/// as [`NOT_SPECIFIED`]. User-supplied text is HTML-escaped.
pub fn format_request_message(record: &RequestRecord, delivery_type: &str) -> String {
    let request_id = record.request_id.to_string();

    let message = format!(
        "\n🚚 <b>New shipping request!</b>\n\
         \n\
         📋 <b>Type:</b> {label}\n\
         🔖 <b>Request:</b> #{id}\n\
         \n\
         👤 <b>Customer:</b> {name}\n\
         📞 <b>Phone:</b> {phone}\n\
         🏠 <b>Address:</b> {address}\n\
         \n\
         📦 <b>Cargo details:</b>\n\
         {description}\n\
         \n\
         ⚖️ <b>Weight:</b> {weight}\n\
         📏 <b>Volume:</b> {volume}\n\
         \n\
         📅 <b>Preferred delivery date:</b> {date}\n\
         \n\
         💬 <b>Special instructions:</b> {instructions}\n\
         \n\
         ⏰ <b>Submitted at:</b> {created}\n",
        label = delivery_label(delivery_type),
        id = text_or(Some(&request_id), NOT_SPECIFIED),
        name = text_or(record.customer_name.as_deref(), NOT_SPECIFIED),
        phone = text_or(record.customer_phone.as_deref(), NOT_SPECIFIED),
        address = text_or(record.customer_address.as_deref(), NOT_SPECIFIED),
        description = text_or(record.cargo_description.as_deref(), NOT_SPECIFIED),
        weight = quantity(record.cargo_weight, "kg"),
        volume = quantity(record.cargo_volume, "m³"),
        date = text_or(record.preferred_delivery_date.as_deref(), NOT_SPECIFIED),
        instructions = text_or(record.special_instructions.as_deref(), NO_INSTRUCTIONS),
        created = text_or(record.created_at.as_deref(), JUST_NOW),
    );

    message.trim().to_string()
}

fn text_or(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => escape_html(v),
        _ => fallback.to_string(),
    }
}

fn quantity(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{} {}", v, unit),
        _ => NOT_SPECIFIED.to_string(),
    }
}

/// Escape the characters Telegram's HTML parse mode treats as markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

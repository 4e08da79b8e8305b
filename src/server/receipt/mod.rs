//! Receipt formatting.
//!
//! `layout` is a pure transform from a stored bill to typed text blocks; the
//! PDF backend in `pdf` turns blocks into printable bytes. Splitting the two
//! keeps every formatting rule testable without a document library.

pub(crate) mod pdf;

use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;

use crate::server::model::bill::Bill;

/// IST is UTC+05:30 year-round; receipts always show Indian wall time no
/// matter where the server runs.
const IST_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

const DIVIDER: &str = "-----------------------------------";

const NAME_SIZE: f32 = 14.0;
const SMALL_SIZE: f32 = 8.0;
const DIVIDER_SIZE: f32 = 10.0;
const BODY_SIZE: f32 = 9.0;
const TOTAL_SIZE: f32 = 11.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Center,
    Right,
}

/// One line of receipt text with its display attributes.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Block {
    pub text: String,
    pub size: f32,
    pub bold: bool,
    pub align: Align,
}

impl Block {
    fn new(text: impl Into<String>, size: f32, bold: bool, align: Align) -> Self {
        Self {
            text: text.into(),
            size,
            bold,
            align,
        }
    }
}

/// Fixed header and footer text printed on every receipt.
#[derive(Debug, Clone)]
pub(crate) struct Branding {
    pub name: String,
    pub tagline: String,
    pub address: String,
    pub footer: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            name: "OM SAI FAMILY RESTAURANT".to_string(),
            tagline: "Veg & Non-Veg | Free Wi-Fi".to_string(),
            address: "Bypass Road, Samudrapur".to_string(),
            footer: "Thank you, visit again!".to_string(),
        }
    }
}

/// Lay a bill out as receipt blocks, top to bottom.
///
/// The stored total is printed as-is, never recomputed from the items, and
/// an empty item list still produces a valid receipt; invariants on bill
/// contents are the service's concern at creation time.
pub(crate) fn layout(bill: &Bill, branding: &Branding) -> Vec<Block> {
    let mut blocks = vec![
        Block::new(&branding.name, NAME_SIZE, true, Align::Center),
        Block::new(&branding.tagline, SMALL_SIZE, false, Align::Center),
        Block::new(&branding.address, SMALL_SIZE, false, Align::Center),
        Block::new(DIVIDER, DIVIDER_SIZE, false, Align::Center),
        Block::new(
            format!("Bill No: {}", bill.bill_number),
            BODY_SIZE,
            false,
            Align::Left,
        ),
        Block::new(
            format!("Phone: {}", bill.customer_phone.as_deref().unwrap_or("")),
            BODY_SIZE,
            false,
            Align::Left,
        ),
        Block::new(
            format!("Date: {}", format_ist(bill.created_at)),
            BODY_SIZE,
            false,
            Align::Left,
        ),
        Block::new(DIVIDER, BODY_SIZE, false, Align::Left),
    ];
    for item in &bill.items {
        let line_total = item.price * Decimal::from(item.quantity);
        blocks.push(Block::new(
            format!("{} x{}  Rs. {:.2}", item.name, item.quantity, line_total),
            BODY_SIZE,
            false,
            Align::Left,
        ));
    }
    blocks.push(Block::new(DIVIDER, BODY_SIZE, false, Align::Left));
    blocks.push(Block::new(
        format!("TOTAL: Rs. {:.2}", bill.total),
        TOTAL_SIZE,
        true,
        Align::Right,
    ));
    blocks.push(Block::new(&branding.footer, SMALL_SIZE, false, Align::Center));
    blocks
}

/// Render a bill straight to receipt PDF bytes.
pub(crate) fn render(bill: &Bill, branding: &Branding) -> Vec<u8> {
    pdf::render(&layout(bill, branding))
}

/// Indian wall time, `dd/mm/yyyy, hh:mm AM/PM`.
fn format_ist(ts: DateTime<Utc>) -> String {
    let ist = FixedOffset::east_opt(IST_OFFSET_SECONDS).expect("IST offset is in range");
    ts.with_timezone(&ist).format("%d/%m/%Y, %I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use super::*;
    use crate::server::model::bill::LineItem;

    fn sample_bill() -> Bill {
        Bill {
            id: Uuid::nil(),
            bill_number: 7,
            customer_phone: Some("9876543210".to_string()),
            items: vec![
                LineItem {
                    name: "Paneer Tikka".to_string(),
                    quantity: 2,
                    price: dec!(150.00),
                },
                LineItem {
                    name: "Naan".to_string(),
                    quantity: 3,
                    price: dec!(20.00),
                },
            ],
            total: dec!(360.00),
            created_at: Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn item_block_matches_wire_format() {
        let blocks = layout(&sample_bill(), &Branding::default());
        let texts: Vec<&str> = blocks.iter().map(|b| b.text.as_str()).collect();
        let first_item = texts.iter().position(|t| t.starts_with("Paneer")).unwrap();
        assert_eq!(texts[first_item], "Paneer Tikka x2  Rs. 300.00");
        assert_eq!(texts[first_item + 1], "Naan x3  Rs. 60.00");
        assert_eq!(texts[first_item + 2], DIVIDER);
        assert_eq!(texts[first_item + 3], "TOTAL: Rs. 360.00");
    }

    #[test]
    fn header_and_footer_emphasis() {
        let branding = Branding::default();
        let blocks = layout(&sample_bill(), &branding);
        assert_eq!(blocks[0].text, branding.name);
        assert!(blocks[0].bold);
        assert_eq!(blocks[0].align, Align::Center);
        let total = blocks.iter().find(|b| b.text.starts_with("TOTAL")).unwrap();
        assert!(total.bold);
        assert_eq!(total.align, Align::Right);
        let footer = blocks.last().unwrap();
        assert_eq!(footer.text, branding.footer);
        assert_eq!(footer.align, Align::Center);
    }

    #[test]
    fn date_renders_in_indian_time() {
        // 10:00 UTC is 15:30 in IST
        let blocks = layout(&sample_bill(), &Branding::default());
        let date = blocks.iter().find(|b| b.text.starts_with("Date:")).unwrap();
        assert_eq!(date.text, "Date: 05/01/2024, 03:30 PM");
    }

    #[test]
    fn morning_times_use_am_marker() {
        let mut bill = sample_bill();
        // 02:30 UTC is 08:00 in IST
        bill.created_at = Utc.with_ymd_and_hms(2024, 6, 30, 2, 30, 0).unwrap();
        let blocks = layout(&bill, &Branding::default());
        let date = blocks.iter().find(|b| b.text.starts_with("Date:")).unwrap();
        assert_eq!(date.text, "Date: 30/06/2024, 08:00 AM");
    }

    #[test]
    fn absent_phone_keeps_the_line() {
        let mut bill = sample_bill();
        bill.customer_phone = None;
        let blocks = layout(&bill, &Branding::default());
        assert!(blocks.iter().any(|b| b.text == "Phone: "));
    }

    #[test]
    fn total_is_printed_from_the_stored_value() {
        let mut bill = sample_bill();
        // stored total disagrees with the item sum; the renderer must not fix it
        bill.total = dec!(999.99);
        let blocks = layout(&bill, &Branding::default());
        assert!(blocks.iter().any(|b| b.text == "TOTAL: Rs. 999.99"));
    }

    #[test]
    fn empty_bill_still_lays_out() {
        let mut bill = sample_bill();
        bill.items.clear();
        let blocks = layout(&bill, &Branding::default());
        assert!(!blocks.is_empty());
        assert!(blocks.iter().all(|b| !b.text.contains(" x")));
        assert!(blocks.iter().any(|b| b.text.starts_with("TOTAL")));
    }

    #[test]
    fn rendering_is_deterministic() {
        let bill = sample_bill();
        let branding = Branding::default();
        assert_eq!(render(&bill, &branding), render(&bill, &branding));
    }
}

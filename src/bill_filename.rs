use regex::Regex;
use std::sync::OnceLock;

fn bill_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9]{6})([0-9]{2})\.xlsx$").expect("invalid bill name regex")
    })
}

/// Decodes a bill export filename into `(bill_id, box_count)`.
///
/// The name must be exactly six alphanumeric characters followed by a
/// two-digit box count and the `.xlsx` extension. A box count of zero is
/// invalid (there are no empty bills) and a leading `'0'` on the id is
/// dropped. Anything else returns `None`, meaning "not a bill file".
pub fn parse_bill_filename(filename: &str) -> Option<(String, u32)> {
    let caps = bill_name_re().captures(filename)?;
    let box_count: u32 = caps[2].parse().ok()?;
    if box_count == 0 {
        return None;
    }
    let mut bill_id = caps[1].to_string();
    if bill_id.starts_with('0') {
        bill_id.remove(0);
    }
    Some((bill_id, box_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_id_and_box_count() {
        assert_eq!(
            parse_bill_filename("ABC12305.xlsx"),
            Some(("ABC123".to_string(), 5))
        );
    }

    #[test]
    fn leading_zero_is_stripped_from_id() {
        assert_eq!(
            parse_bill_filename("0AB12304.xlsx"),
            Some(("AB123".to_string(), 4))
        );
    }

    #[test]
    fn zero_box_count_is_rejected() {
        assert_eq!(parse_bill_filename("ABC12300.xlsx"), None);
    }

    #[test]
    fn wrong_shapes_are_rejected() {
        // seven characters before the extension
        assert_eq!(parse_bill_filename("0ABC120.xlsx"), None);
        // nine characters before the extension
        assert_eq!(parse_bill_filename("ABC123456.xlsx"), None);
        // wrong extension
        assert_eq!(parse_bill_filename("ABC12305.xls"), None);
        assert_eq!(parse_bill_filename("ABC12305.xlsx.bak"), None);
        // non-alphanumeric id
        assert_eq!(parse_bill_filename("AB-12305.xlsx"), None);
        assert_eq!(parse_bill_filename("summary.xlsx"), None);
    }
}

use regex::Regex;
use std::sync::OnceLock;

pub const NOT_AVAILABLE: &str = "N/A";

/// Ordered sub-district markers: Latin abbreviation, Thai abbreviation,
/// Thai full word. First marker with a following token wins.
const ZONE_MARKERS: &[&str] = &["T.", "ต.", "ตำบล"];
const PROVINCE_MARKERS: &[&str] = &["จ.", "จังหวัด"];

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(Tel\.|โทร\.)?\s*(\d{3}-?\d{3}-?\d{4})").expect("invalid phone regex")
    })
}

/// First whitespace-delimited token after the first occurrence of `marker`.
///
/// Markers are matched by substring containment, not word boundaries, so a
/// marker inside an unrelated word will misfire. That is the accepted
/// behavior for these addresses.
fn token_after_marker(text: &str, marker: &str) -> Option<String> {
    let (_, rest) = text.split_once(marker)?;
    rest.split_whitespace().next().map(str::to_string)
}

/// Extracts `"{zone} / {province}"` and a phone number from a free-text
/// address. Either part falls back to "N/A" when nothing matches.
pub fn parse_zone_province_and_phone(address: &str) -> (String, String) {
    let phone = match phone_re().captures(address) {
        Some(caps) => {
            let digits = caps[2].replace('-', "");
            if digits.len() == 10 {
                format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..])
            } else {
                digits
            }
        }
        None => NOT_AVAILABLE.to_string(),
    };

    // Strip the phone before location parsing so its digits cannot be read
    // as a zone or province token.
    let stripped = phone_re().replace_all(address, "").trim().to_string();

    let mut zone = NOT_AVAILABLE.to_string();
    for marker in ZONE_MARKERS {
        if let Some(token) = token_after_marker(&stripped, marker) {
            zone = token;
            break;
        }
    }

    let mut province = NOT_AVAILABLE.to_string();
    for marker in PROVINCE_MARKERS {
        if let Some(token) = token_after_marker(&stripped, marker) {
            province = token;
            break;
        }
    }
    if province == NOT_AVAILABLE {
        // Last word that carries no abbreviation dot is usually the province.
        if let Some(word) = stripped.split_whitespace().rev().find(|w| !w.contains('.')) {
            province = word.to_string();
        }
    }

    (format!("{zone} / {province}"), phone)
}

/// Transport text is carried through as-is, trimmed; empty means "N/A".
pub fn extract_transport_service(transport_info: Option<&str>) -> String {
    match transport_info {
        Some(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_zone_province_and_formats_phone() {
        let (zone_province, phone) = parse_zone_province_and_phone(
            "55/1 หมู่ 2 T. Bangna จ. สมุทรปราการ Tel. 086-123-4567",
        );
        assert_eq!(zone_province, "Bangna / สมุทรปราการ");
        assert_eq!(phone, "086-123-4567");
    }

    #[test]
    fn regroups_phone_regardless_of_input_hyphens() {
        let (_, phone) = parse_zone_province_and_phone("บ้านเลขที่ 9 โทร.0861234567");
        assert_eq!(phone, "086-123-4567");

        let (_, phone) = parse_zone_province_and_phone("Tel. 086123-4567");
        assert_eq!(phone, "086-123-4567");
    }

    #[test]
    fn bangkok_two_digit_grouping_is_not_a_phone() {
        // 02-123-4567 groups 2-3-4 and does not fit the 3-3-4 pattern.
        let (_, phone) = parse_zone_province_and_phone("T. Bangna Tel. 02-123-4567");
        assert_eq!(phone, NOT_AVAILABLE);
    }

    #[test]
    fn thai_full_word_markers_win_when_abbreviations_absent() {
        let (zone_province, _) =
            parse_zone_province_and_phone("99 หมู่ 4 ตำบล ท่าทราย จังหวัด นนทบุรี");
        assert_eq!(zone_province, "ท่าทราย / นนทบุรี");
    }

    #[test]
    fn province_falls_back_to_last_dotless_word() {
        let (zone_province, _) = parse_zone_province_and_phone("12 ถ.สุขุมวิท ต. บางนา กรุงเทพ");
        assert_eq!(zone_province, "บางนา / กรุงเทพ");
    }

    #[test]
    fn everything_missing_yields_not_available() {
        let (zone_province, phone) = parse_zone_province_and_phone("T.");
        assert_eq!(zone_province, "N/A / N/A");
        assert_eq!(phone, NOT_AVAILABLE);
    }

    #[test]
    fn transport_text_is_trimmed_or_not_available() {
        assert_eq!(
            extract_transport_service(Some(" Kerry / Shopee ")),
            "Kerry / Shopee"
        );
        assert_eq!(extract_transport_service(Some("   ")), NOT_AVAILABLE);
        assert_eq!(extract_transport_service(None), NOT_AVAILABLE);
    }
}

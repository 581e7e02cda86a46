/// Country calling code prepended to bare local mobile numbers
const COUNTRY_CALLING_CODE: &str = "57";
/// Colombian mobile numbers are ten digits and start with a 3
const LOCAL_MOBILE_PREFIX: char = '3';

/// Normalizes a stored phone number into the bare digit form the WhatsApp
/// provider expects. Formatting characters are stripped and a ten digit
/// local mobile number gets the country calling code prepended. Anything
/// else is passed through as digits, the provider rejects what it cannot
/// route.
pub fn normalize_phone(raw: &str) -> String {
    let digits = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '+'))
        .collect::<String>();

    if digits.len() == 10 && digits.starts_with(LOCAL_MOBILE_PREFIX) {
        format!("{}{}", COUNTRY_CALLING_CODE, digits)
    } else {
        digits
    }
}

use encoding_rs::WINDOWS_1252;

/// Fix region names that were UTF-8 on disk but read as Windows-1252
/// somewhere upstream ("CafÃ©" -> "Café"). Pure function; text that needs no
/// repair, or that cannot be repaired safely, comes back unchanged.
pub fn repair(text: &str) -> String {
    let mut current = text.to_string();
    // doubly mangled text needs more than one pass
    for _ in 0..4 {
        match undo_windows_1252(&current) {
            Some(fixed) => current = fixed,
            None => break,
        }
    }
    current
}

/// One round of un-mangling: re-encode as Windows-1252 and accept the result
/// only if those bytes are themselves valid UTF-8. Correctly decoded text
/// fails that check and is left alone.
fn undo_windows_1252(text: &str) -> Option<String> {
    if text.is_ascii() {
        return None;
    }
    let (bytes, _, unmappable) = WINDOWS_1252.encode(text);
    if unmappable {
        return None;
    }
    let fixed = std::str::from_utf8(&bytes).ok()?;
    if fixed == text {
        return None;
    }
    Some(fixed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_untouched() {
        assert_eq!(repair("Texas"), "Texas");
    }

    #[test]
    fn correctly_decoded_accents_are_untouched() {
        assert_eq!(repair("São Paulo"), "São Paulo");
        assert_eq!(repair("Baden-Württemberg"), "Baden-Württemberg");
    }

    #[test]
    fn single_mangle_is_fixed() {
        assert_eq!(repair("CafÃ©"), "Café");
        assert_eq!(repair("SÃ£o Paulo"), "São Paulo");
    }

    #[test]
    fn double_mangle_is_fixed() {
        // "é" mangled twice: é -> Ã© -> ÃƒÂ©
        assert_eq!(repair("CafÃƒÂ©"), "Café");
    }

    #[test]
    fn never_fails_on_odd_input() {
        // lone mangled-looking char with no valid repair
        assert_eq!(repair("Ω"), "Ω");
        assert_eq!(repair(""), "");
    }
}

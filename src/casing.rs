/// Convert a field name to the member name used by projection targets:
/// `user_name` → `UserName`, `age` → `Age`. Names already in that form are
/// returned unchanged, so both spellings resolve to the same member.
pub fn title_cased_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for part in name.split('_').filter(|p| !p.is_empty()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

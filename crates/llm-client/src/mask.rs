/// Masks an API key/token for safe logging: first 7 chars + "***" + last 4 chars.
/// Keys of 11 bytes or fewer (or containing non-ASCII) come back as "***".
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        return "***".to_string();
    }
    format!("{}***{}", &token[..7], &token[len - 4..])
}

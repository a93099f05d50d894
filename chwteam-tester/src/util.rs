pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Expand a comma list where `all` stands for every known key.
///
/// Explicit keys keep their order; `all` appends any known key not yet listed.
pub fn expand_keys(list: &str, known: &[&str]) -> Vec<String> {
    let mut keys = split_csv(list);
    if keys.iter().any(|k| k.eq_ignore_ascii_case("all")) {
        keys.retain(|k| !k.eq_ignore_ascii_case("all"));
        for key in known {
            if !keys.iter().any(|k| k == key) {
                keys.push((*key).to_string());
            }
        }
    }
    keys
}

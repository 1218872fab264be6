use super::parser::ARTICLES;

/// Turn a canonical title back into its display form:
/// "Matrix, The" -> "The Matrix", "Avventura, L'" -> "L'Avventura".
///
/// Only a trailing comma-article produced by canonicalization is
/// reordered; any other comma is left alone ("New York, New York"
/// stays as is).
pub fn normalize_title(title: &str) -> String {
    if let Some((base, article)) = title.rsplit_once(", ") {
        let lower = article.to_lowercase();
        if ARTICLES.contains(&lower.as_str()) {
            if article.ends_with('\'') {
                return format!("{}{}", article, base);
            }
            return format!("{} {}", article, base);
        }
    }
    title.to_string()
}

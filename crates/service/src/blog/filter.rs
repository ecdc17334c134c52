use models::{post, PostStatus};

/// Keyword/status combination for post search, one variant per case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    All,
    Keyword(String),
    Status(PostStatus),
    KeywordAndStatus(String, PostStatus),
}

impl PostFilter {
    /// Blank keywords count as absent. The keyword is stored with ASCII
    /// letters lower-cased, the same folding SQLite's `LOWER` applies.
    pub fn new(keyword: Option<&str>, status: Option<PostStatus>) -> Self {
        let keyword = keyword
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_ascii_lowercase);
        match (keyword, status) {
            (None, None) => PostFilter::All,
            (Some(k), None) => PostFilter::Keyword(k),
            (None, Some(s)) => PostFilter::Status(s),
            (Some(k), Some(s)) => PostFilter::KeywordAndStatus(k, s),
        }
    }

    /// In-process evaluation; mirrors the SQL built by the SeaORM repository.
    pub fn matches(&self, p: &post::Model) -> bool {
        let keyword_ok = |k: &str| {
            p.title.to_ascii_lowercase().contains(k) || p.content.to_ascii_lowercase().contains(k)
        };
        match self {
            PostFilter::All => true,
            PostFilter::Keyword(k) => keyword_ok(k),
            PostFilter::Status(s) => p.status == *s,
            PostFilter::KeywordAndStatus(k, s) => p.status == *s && keyword_ok(k),
        }
    }
}

/// `%kw%` LIKE pattern with `\` escaping the wildcard characters.
pub fn like_pattern(keyword: &str) -> String {
    let mut out = String::with_capacity(keyword.len() + 2);
    out.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post(title: &str, content: &str, status: PostStatus) -> post::Model {
        let now = Utc::now().into();
        post::Model { id: 1, title: title.into(), content: content.into(), status, created_at: now, updated_at: now }
    }

    #[test]
    fn four_cases() {
        assert_eq!(PostFilter::new(None, None), PostFilter::All);
        assert_eq!(PostFilter::new(Some("  "), None), PostFilter::All);
        assert_eq!(PostFilter::new(Some(" First "), None), PostFilter::Keyword("first".into()));
        assert_eq!(PostFilter::new(None, Some(PostStatus::Draft)), PostFilter::Status(PostStatus::Draft));
        assert_eq!(
            PostFilter::new(Some("x"), Some(PostStatus::Published)),
            PostFilter::KeywordAndStatus("x".into(), PostStatus::Published)
        );
    }

    #[test]
    fn keyword_matches_title_or_content_case_insensitively() {
        let p = post("My First post", "hello world", PostStatus::Draft);
        assert!(PostFilter::new(Some("first"), None).matches(&p));
        assert!(PostFilter::new(Some("WORLD"), None).matches(&p));
        assert!(!PostFilter::new(Some("absent"), None).matches(&p));
        assert!(!PostFilter::new(Some("first"), Some(PostStatus::Published)).matches(&p));
        assert!(PostFilter::new(Some("first"), Some(PostStatus::Draft)).matches(&p));
    }

    #[test]
    fn folding_is_ascii_only() {
        assert_eq!(PostFilter::new(Some("ÉTÉ Paris"), None), PostFilter::Keyword("ÉTÉ paris".into()));
        let p = post("Été à Paris", "x", PostStatus::Draft);
        assert!(PostFilter::new(Some("Été à PARIS"), None).matches(&p));
        assert!(!PostFilter::new(Some("été"), None).matches(&p));
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("abc"), "%abc%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}

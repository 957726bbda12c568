//! Shared page data and Markdown rendering for templates.

use pulldown_cmark::{html, Options, Parser};

use crate::server::{middleware::auth::CurrentUser, model::user::AuthUser};

/// Data every page template receives.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContext {
    /// Request path, used to highlight the active navigation entry.
    pub path: String,
    pub user: Option<AuthUser>,
    pub avatar: Option<String>,
    pub is_admin: bool,
}

impl PageContext {
    pub fn new(path: &str, current: Option<&CurrentUser>) -> Self {
        Self {
            path: path.to_string(),
            user: current.map(|current| current.user.clone()),
            avatar: current.map(|current| current.user.avatar_url()),
            is_admin: current.is_some_and(|current| current.is_admin),
        }
    }

    pub fn is_active(&self, prefix: &str) -> bool {
        if prefix == "/" {
            self.path == "/"
        } else {
            self.path.starts_with(prefix)
        }
    }
}

/// Renders CommonMark with tables and strikethrough to HTML.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(source, options);
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_markdown_to_html() {
        assert_eq!(
            render_markdown("Replies with **Pong!**"),
            "<p>Replies with <strong>Pong!</strong></p>\n"
        );
        assert!(render_markdown("| a |\n|---|\n| b |").contains("<table>"));
    }

    #[test]
    fn guest_context_has_no_user() {
        let page = PageContext::new("/stats", None);
        assert!(page.user.is_none());
        assert!(!page.is_admin);
        assert!(page.is_active("/stats"));
        assert!(!page.is_active("/"));
    }
}

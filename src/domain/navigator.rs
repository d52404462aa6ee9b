//! Navigation capability used by the redirect resolver.

use url::Url;

/// Hands the user off to another location.
///
/// In a browser this is a page navigation; the terminal client prints the
/// target. The resolver never fetches the target itself.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &Url);
}

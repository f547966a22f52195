mod rewriter;


pub use rewriter::{RedirectRewriter, RewriteOutcome, is_redirect_status};

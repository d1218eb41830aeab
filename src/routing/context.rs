//! Scope contexts accumulated while a route tree is declared.
//!
//! # Responsibilities
//! - Track the active path prefix as an ordered list of segments
//! - Track the active default method as a LIFO stack
//! - Compose full paths without disturbing the context
//!
//! # Design Decisions
//! - Segments are opaque: parameter and catch-all tokens are never parsed here
//! - `join` only reads; sibling declarations always see an intact context
//! - Pushes made through `Entered` are undone when the guard drops

use std::cell::RefCell;

use crate::routing::types::Method;

/// Ordered path segments from the root scope to the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathContext {
    segments: Vec<String>,
}

impl PathContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.segments.pop()
    }

    /// Joins every non-empty segment with a single `/`.
    ///
    /// Slashes at segment edges are trimmed, so `["/a/", "b"]` joins to
    /// `a/b` and `["a", "/"]` joins to `a`, never `a//`. This is the one
    /// place a segment's text is looked at; captures inside it stay opaque.
    /// A context holding only empty segments joins to `""` (root).
    pub fn join(&self) -> String {
        let mut joined = String::new();
        for segment in self.segments.iter().map(|s| s.trim_matches('/')) {
            if segment.is_empty() {
                continue;
            }
            if !joined.is_empty() {
                joined.push('/');
            }
            joined.push_str(segment);
        }
        joined
    }

    /// The joined path in the absolute form the engine expects.
    pub fn full_path(&self) -> String {
        format!("/{}", self.join())
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Stack of default methods; the top applies to leaves without explicit methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodContext {
    methods: Vec<Method>,
}

impl MethodContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, method: Method) {
        self.methods.push(method);
    }

    pub fn pop(&mut self) -> Option<Method> {
        self.methods.pop()
    }

    /// The implicit method for a leaf declared at this point, if any.
    pub fn current(&self) -> Option<Method> {
        self.methods.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.methods.len()
    }
}

/// A context that can be entered and left one item at a time.
pub(crate) trait Scoped {
    type Item;

    fn enter(&mut self, item: Self::Item);
    fn leave(&mut self);
}

impl Scoped for PathContext {
    type Item = String;

    fn enter(&mut self, item: String) {
        self.push(item);
    }

    fn leave(&mut self) {
        self.pop();
    }
}

impl Scoped for MethodContext {
    type Item = Method;

    fn enter(&mut self, item: Method) {
        self.push(item);
    }

    fn leave(&mut self) {
        self.pop();
    }
}

/// Guard for one pushed item. Pops it when dropped, including during unwinding.
#[must_use = "the scope is left as soon as the guard is dropped"]
pub(crate) struct Entered<'a, C: Scoped> {
    context: &'a RefCell<C>,
}

impl<'a, C: Scoped> Entered<'a, C> {
    pub(crate) fn new(context: &'a RefCell<C>, item: C::Item) -> Self {
        context.borrow_mut().enter(item);
        Self { context }
    }
}

impl<C: Scoped> Drop for Entered<'_, C> {
    fn drop(&mut self) {
        self.context.borrow_mut().leave();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(segments: &[&str]) -> PathContext {
        let mut ctx = PathContext::new();
        for segment in segments {
            ctx.push(*segment);
        }
        ctx
    }

    #[test]
    fn join_examples() {
        assert_eq!(context(&["a", "b"]).join(), "a/b");
        assert_eq!(context(&[""]).join(), "");
        assert_eq!(context(&["a", ""]).join(), "a");
        assert_eq!(context(&[]).join(), "");
    }

    #[test]
    fn join_skips_empty_segments_in_the_middle() {
        assert_eq!(context(&["a", "", "b"]).join(), "a/b");
    }

    #[test]
    fn join_does_not_double_slashes() {
        assert_eq!(context(&["/api/", "/v1", "users/"]).join(), "api/v1/users");
        assert_eq!(context(&["/"]).join(), "");
        assert_eq!(context(&["a", "/"]).join(), "a");
    }

    #[test]
    fn join_keeps_tokens_verbatim() {
        let ctx = context(&["repos", "{owner}/{repo}", "{*rest}"]);
        assert_eq!(ctx.join(), "repos/{owner}/{repo}/{*rest}");
        assert_eq!(ctx.full_path(), "/repos/{owner}/{repo}/{*rest}");
    }

    #[test]
    fn join_is_repeatable_and_leaves_context_intact() {
        let ctx = context(&["a", "b", "c"]);
        let before = ctx.clone();
        assert_eq!(ctx.join(), ctx.join());
        assert_eq!(ctx, before);
        assert_eq!(ctx.segments(), ["a", "b", "c"]);
    }

    #[test]
    fn full_path_of_root_is_slash() {
        assert_eq!(context(&[""]).full_path(), "/");
        assert_eq!(PathContext::new().full_path(), "/");
    }

    #[test]
    fn push_and_pop_are_lifo() {
        let mut ctx = context(&["a", "b"]);
        assert_eq!(ctx.pop().as_deref(), Some("b"));
        ctx.push("c");
        assert_eq!(ctx.join(), "a/c");
        assert_eq!(ctx.depth(), 2);
    }

    #[test]
    fn method_context_tracks_innermost_scope() {
        let mut methods = MethodContext::new();
        assert_eq!(methods.current(), None);
        methods.push(Method::Get);
        methods.push(Method::Post);
        assert_eq!(methods.current(), Some(Method::Post));
        assert_eq!(methods.pop(), Some(Method::Post));
        assert_eq!(methods.current(), Some(Method::Get));
        methods.pop();
        assert_eq!(methods.current(), None);
        assert_eq!(methods.pop(), None);
    }

    #[test]
    fn entered_guard_pops_on_drop() {
        let ctx = RefCell::new(context(&["a"]));
        {
            let _outer = Entered::new(&ctx, "b".to_string());
            let _inner = Entered::new(&ctx, "c".to_string());
            assert_eq!(ctx.borrow().join(), "a/b/c");
        }
        assert_eq!(ctx.borrow().segments(), ["a"]);
    }

    #[test]
    fn entered_guard_pops_during_unwind() {
        let methods = RefCell::new(MethodContext::new());
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _get = Entered::new(&methods, Method::Get);
            panic!("declaration failed");
        }));
        assert!(result.is_err());
        assert_eq!(methods.borrow().depth(), 0);
    }
}

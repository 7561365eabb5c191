//! Dialect segmenters: they narrow a document down to the blocks worth
//! linting and mark the spans inside those blocks the rules must not touch.

pub mod hexo;
pub mod ignore;
pub mod markdown;
pub mod vuepress;

use std::fmt;
use std::sync::Arc;

use crate::document::DocumentState;

/// A built-in segmenter.
pub type ParseFn = fn(DocumentState) -> DocumentState;

/// A caller-supplied segmenter.
pub type CustomParseFn = Arc<dyn Fn(DocumentState) -> DocumentState + Send + Sync>;

#[derive(Clone)]
enum ParserImpl {
    Builtin(ParseFn),
    Custom(CustomParseFn),
}

#[derive(Clone)]
pub struct Segmenter {
    name: String,
    apply: ParserImpl,
}

impl Segmenter {
    pub fn builtin(name: &str, apply: ParseFn) -> Self {
        Segmenter {
            name: name.to_string(),
            apply: ParserImpl::Builtin(apply),
        }
    }

    pub fn custom<F>(name: impl Into<String>, apply: F) -> Self
    where
        F: Fn(DocumentState) -> DocumentState + Send + Sync + 'static,
    {
        Segmenter {
            name: name.into(),
            apply: ParserImpl::Custom(Arc::new(apply)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, state: DocumentState) -> DocumentState {
        let before = state.blocks.len();
        let state = match &self.apply {
            ParserImpl::Builtin(f) => f(state),
            ParserImpl::Custom(f) => f(state),
        };
        tracing::debug!(parser = %self.name, before, after = state.blocks.len(), "segmented document");
        state
    }
}

impl fmt::Debug for Segmenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segmenter").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Named segmenters available for lookup, in their default order.
#[derive(Debug, Clone)]
pub struct ParserCatalog {
    parsers: Vec<Segmenter>,
}

impl ParserCatalog {
    pub fn new(parsers: Vec<Segmenter>) -> Self {
        ParserCatalog { parsers }
    }

    pub fn builtin() -> Self {
        ParserCatalog::new(vec![
            Segmenter::builtin(ignore::NAME, ignore::parse),
            Segmenter::builtin(hexo::NAME, hexo::parse),
            Segmenter::builtin(vuepress::NAME, vuepress::parse),
            Segmenter::builtin(markdown::NAME, markdown::parse),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&Segmenter> {
        self.parsers.iter().find(|p| p.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parsers.iter().map(|p| p.name())
    }

    pub fn parsers(&self) -> &[Segmenter] {
        &self.parsers
    }
}

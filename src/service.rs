//! Cached read path for published posts.

use std::time::Duration;

use crate::blog::Blog;
use crate::cache::{
    BLOG_DETAIL, BLOG_LIST, BLOG_RELATED, CATEGORIES, Cache, NoopCache, TAGS, cache_key,
    get_json, set_json,
};
use crate::page::{PageOptions, RenderedPage, compose};

/// How long a rendered article stays cached.
pub const DETAIL_TTL: Duration = Duration::from_secs(600);

/// Renders posts for readers, memoizing pages in a [`Cache`].
#[derive(Debug)]
pub struct BlogReader<C = NoopCache> {
    cache: C,
    options: PageOptions,
}

impl BlogReader<NoopCache> {
    pub fn new(options: PageOptions) -> Self {
        Self::with_cache(NoopCache, options)
    }
}

impl Default for BlogReader<NoopCache> {
    fn default() -> Self {
        Self::new(PageOptions::default())
    }
}

impl<C: Cache> BlogReader<C> {
    pub fn with_cache(cache: C, options: PageOptions) -> Self {
        Self { cache, options }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn options(&self) -> &PageOptions {
        &self.options
    }

    /// Rendered page for `blog`, served from cache when present.
    pub fn page(&self, blog: &Blog) -> RenderedPage {
        let key = cache_key(BLOG_DETAIL, &blog.slug);
        if let Some(page) = get_json::<RenderedPage>(&self.cache, &key) {
            tracing::debug!(%key, "cache hit");
            return page;
        }

        tracing::debug!(%key, "cache miss");
        let page = compose(&blog.content, &self.options);
        set_json(&self.cache, &key, &page, DETAIL_TTL);
        page
    }

    /// Rendered page for `blog` if readers may see it. Drafts yield `None`.
    pub fn published_page(&self, blog: &Blog) -> Option<RenderedPage> {
        blog.is_published().then(|| self.page(blog))
    }

    /// Drop every entry a change to the post at `slug` could make stale.
    pub fn invalidate(&self, slug: &str) {
        self.cache.delete(&cache_key(BLOG_DETAIL, slug));
        self.invalidate_listings();
    }

    /// Drop listing entries only, e.g. after a new post is created.
    pub fn invalidate_listings(&self) {
        let removed = self.cache.delete_prefix(&format!("{}:", BLOG_LIST))
            + self.cache.delete_prefix(&format!("{}:", BLOG_RELATED));
        self.cache.delete(CATEGORIES);
        self.cache.delete(TAGS);
        tracing::debug!(removed, "invalidated listing caches");
    }
}

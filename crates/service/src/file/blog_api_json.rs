use std::sync::Arc;

use async_trait::async_trait;
use configs::BlogApiJsonSettings;
use models::{BlogPost, Category, Tag};
use tokio::fs;
use tracing::{info, instrument};

use crate::blog_api::BlogApi;
use crate::errors::ServiceError;
use crate::storage::JsonDirStore;

/// Blog storage as plain folders of JSON files under `data_path`.
///
/// Every read goes back to disk; the in-memory lists only save work between
/// a write and the next read.
pub struct BlogApiJsonDirectAccess {
    settings: BlogApiJsonSettings,
    blog_posts: JsonDirStore<BlogPost>,
    categories: JsonDirStore<Category>,
    tags: JsonDirStore<Tag>,
}

impl BlogApiJsonDirectAccess {
    /// Create the data root and the three kind folders if they are missing.
    #[instrument(skip(settings), fields(data_path = %settings.data_path.display()))]
    pub async fn new(settings: BlogApiJsonSettings) -> Result<Arc<Self>, ServiceError> {
        fs::create_dir_all(&settings.data_path)
            .await
            .map_err(|e| ServiceError::io(&settings.data_path, e))?;
        let blog_posts = JsonDirStore::new(settings.blog_posts_dir()).await?;
        let categories = JsonDirStore::new(settings.categories_dir()).await?;
        let tags = JsonDirStore::new(settings.tags_dir()).await?;
        info!("blog json store ready");
        Ok(Arc::new(Self { settings, blog_posts, categories, tags }))
    }

    pub fn settings(&self) -> &BlogApiJsonSettings {
        &self.settings
    }

    pub fn blog_posts(&self) -> &JsonDirStore<BlogPost> { &self.blog_posts }
    pub fn categories(&self) -> &JsonDirStore<Category> { &self.categories }
    pub fn tags(&self) -> &JsonDirStore<Tag> { &self.tags }
}

#[async_trait]
impl BlogApi for BlogApiJsonDirectAccess {
    async fn load_blog_posts(&self) -> Result<(), ServiceError> { self.blog_posts.load().await }
    async fn load_categories(&self) -> Result<(), ServiceError> { self.categories.load().await }
    async fn load_tags(&self) -> Result<(), ServiceError> { self.tags.load().await }

    async fn save_blog_post(&self, item: BlogPost) -> Result<BlogPost, ServiceError> { self.blog_posts.save(item).await }
    async fn save_category(&self, item: Category) -> Result<Category, ServiceError> { self.categories.save(item).await }
    async fn save_tag(&self, item: Tag) -> Result<Tag, ServiceError> { self.tags.save(item).await }

    async fn delete_blog_post(&self, id: &str) { self.blog_posts.delete(id).await }
    async fn delete_category(&self, id: &str) { self.categories.delete(id).await }
    async fn delete_tag(&self, id: &str) { self.tags.delete(id).await }

    async fn get_blog_post(&self, id: &str) -> Result<Option<BlogPost>, ServiceError> { self.blog_posts.get(id).await }
    async fn get_category(&self, id: &str) -> Result<Option<Category>, ServiceError> { self.categories.get(id).await }
    async fn get_tag(&self, id: &str) -> Result<Option<Tag>, ServiceError> { self.tags.get(id).await }

    // TODO: apply number_of_posts/start_index once the front page pages through posts
    async fn get_blog_posts(&self, _number_of_posts: usize, _start_index: usize) -> Result<Vec<BlogPost>, ServiceError> {
        self.blog_posts.all().await
    }

    async fn get_blog_post_count(&self) -> Result<usize, ServiceError> { self.blog_posts.count().await }
    async fn get_categories(&self) -> Result<Vec<Category>, ServiceError> { self.categories.all().await }
    async fn get_tags(&self) -> Result<Vec<Tag>, ServiceError> { self.tags.all().await }

    async fn invalidate_cache(&self) {
        self.blog_posts.invalidate().await;
        self.categories.invalidate().await;
        self.tags.invalidate().await;
        info!("blog caches invalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    async fn setup_store() -> Result<(Arc<BlogApiJsonDirectAccess>, std::path::PathBuf), ServiceError> {
        let root = std::env::temp_dir().join(format!("blog_api_json_{}", Uuid::new_v4()));
        let store = BlogApiJsonDirectAccess::new(BlogApiJsonSettings::with_data_path(&root)).await?;
        Ok((store, root))
    }

    #[tokio::test]
    async fn new_creates_all_folders() -> Result<(), anyhow::Error> {
        let (store, root) = setup_store().await?;
        let s = store.settings();
        assert!(s.blog_posts_dir().is_dir());
        assert!(s.categories_dir().is_dir());
        assert!(s.tags_dir().is_dir());
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn kinds_are_independent() -> Result<(), anyhow::Error> {
        let (store, root) = setup_store().await?;
        let cat = store.save_category(Category::new("news")).await?;
        store.save_tag(Tag::new("rust")).await?;

        assert_eq!(store.get_categories().await?.len(), 1);
        assert_eq!(store.get_tags().await?.len(), 1);
        assert_eq!(store.get_blog_post_count().await?, 0);
        assert!(store.get_tag(cat.id.as_deref().unwrap()).await?.is_none());

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn invalidate_cache_drops_every_list() -> Result<(), anyhow::Error> {
        let (store, root) = setup_store().await?;
        store.load_blog_posts().await?;
        store.load_categories().await?;
        store.load_tags().await?;
        assert!(store.tags().is_loaded().await);

        store.invalidate_cache().await;
        assert!(!store.blog_posts().is_loaded().await);
        assert!(!store.categories().is_loaded().await);
        assert!(!store.tags().is_loaded().await);

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}

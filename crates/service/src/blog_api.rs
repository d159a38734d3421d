use async_trait::async_trait;
use models::{BlogPost, Category, Tag};

use crate::errors::ServiceError;

/// Storage surface used by the blog UI and HTTP handlers.
/// Implementations can be file-backed, database-backed, or remote.
#[async_trait]
pub trait BlogApi: Send + Sync {
    async fn load_blog_posts(&self) -> Result<(), ServiceError>;
    async fn load_categories(&self) -> Result<(), ServiceError>;
    async fn load_tags(&self) -> Result<(), ServiceError>;

    async fn save_blog_post(&self, item: BlogPost) -> Result<BlogPost, ServiceError>;
    async fn save_category(&self, item: Category) -> Result<Category, ServiceError>;
    async fn save_tag(&self, item: Tag) -> Result<Tag, ServiceError>;

    /// Deleting an unknown id is a no-op.
    async fn delete_blog_post(&self, id: &str);
    async fn delete_category(&self, id: &str);
    async fn delete_tag(&self, id: &str);

    async fn get_blog_post(&self, id: &str) -> Result<Option<BlogPost>, ServiceError>;
    async fn get_category(&self, id: &str) -> Result<Option<Category>, ServiceError>;
    async fn get_tag(&self, id: &str) -> Result<Option<Tag>, ServiceError>;

    /// Returns every post; `number_of_posts` and `start_index` are accepted
    /// but not applied yet.
    async fn get_blog_posts(&self, number_of_posts: usize, start_index: usize) -> Result<Vec<BlogPost>, ServiceError>;
    async fn get_blog_post_count(&self) -> Result<usize, ServiceError>;
    async fn get_categories(&self) -> Result<Vec<Category>, ServiceError>;
    async fn get_tags(&self) -> Result<Vec<Tag>, ServiceError>;

    /// Drop every cached list so the next read goes back to storage.
    async fn invalidate_cache(&self);
}

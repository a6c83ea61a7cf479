use crate::{models::SqlPost, new_id, Db};
use chrono::Utc;
use domain::{Post, PostId};

pub struct NewPost {
    /// Explicit id for seeded content; a random one is generated otherwise.
    pub id: Option<PostId>,
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
}

impl Db {
    pub async fn insert_post(&self, p: NewPost) -> anyhow::Result<Post> {
        let post = Post {
            id: p.id.unwrap_or_else(|| PostId::new_unchecked(new_id())),
            title: p.title,
            body: p.body,
            image_url: p.image_url,
            created_at: Utc::now().naive_utc(),
        };

        sqlx::query(
            r#"
            INSERT INTO posts (id, title, body, image_url, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(post.id.as_str())
        .bind(&post.title)
        .bind(&post.body)
        .bind(&post.image_url)
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;

        Ok(post)
    }

    pub async fn get_post(&self, id: &PostId) -> anyhow::Result<Option<Post>> {
        let row = sqlx::query_as::<_, SqlPost>(
            r#"
            SELECT id, title, body, image_url, created_at
            FROM posts
            WHERE id = ?
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    // newest first
    pub async fn list_posts(&self) -> anyhow::Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, SqlPost>(
            r#"
            SELECT id, title, body, image_url, created_at
            FROM posts
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn post_exists(&self, id: &PostId) -> anyhow::Result<bool> {
        let found: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM posts WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(id: &str, title: &str) -> NewPost {
        NewPost {
            id: Some(PostId::new_unchecked(id.into())),
            title: title.into(),
            body: "body".into(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn empty_listing() {
        let db = Db::new("sqlite::memory:").await.unwrap();
        assert!(db.list_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_then_get_and_list_newest_first() {
        let db = Db::new("sqlite::memory:").await.unwrap();
        db.insert_post(new_post("p1", "first")).await.unwrap();
        db.insert_post(new_post("p2", "second")).await.unwrap();

        let p1 = PostId::new_unchecked("p1".into());
        let got = db.get_post(&p1).await.unwrap().unwrap();
        assert_eq!(got.title, "first");
        assert!(db.post_exists(&p1).await.unwrap());

        let ids: Vec<_> = db
            .list_posts()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id.to_string())
            .collect();
        assert_eq!(ids, vec!["p2", "p1"]);
    }

    #[tokio::test]
    async fn missing_post_is_none() {
        let db = Db::new("sqlite::memory:").await.unwrap();
        let id = PostId::new_unchecked("nope".into());
        assert!(db.get_post(&id).await.unwrap().is_none());
        assert!(!db.post_exists(&id).await.unwrap());
    }

    #[tokio::test]
    async fn generated_ids_are_valid_post_ids() {
        let db = Db::new("sqlite::memory:").await.unwrap();
        let post = db
            .insert_post(NewPost {
                id: None,
                title: "t".into(),
                body: "b".into(),
                image_url: Some("https://images.unsplash.com/x".into()),
            })
            .await
            .unwrap();
        assert!(PostId::new(post.id.to_string()).is_ok());
    }
}

use chrono::NaiveDateTime;
use domain::{Comment, Post, PostId, UserId};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct SqlPost {
    pub id: String,
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<SqlPost> for Post {
    fn from(sql: SqlPost) -> Self {
        Post {
            id: PostId::new_unchecked(sql.id),
            title: sql.title,
            body: sql.body,
            image_url: sql.image_url,
            created_at: sql.created_at,
        }
    }
}

#[derive(FromRow)]
pub struct SqlComment {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub author_name: String,
    pub body: String,
    pub created_at: NaiveDateTime,
}

impl From<SqlComment> for Comment {
    fn from(sql: SqlComment) -> Self {
        Comment {
            id: sql.id,
            post_id: PostId::new_unchecked(sql.post_id),
            author_id: UserId::new(sql.author_id),
            author_name: sql.author_name,
            body: sql.body,
            created_at: sql.created_at,
        }
    }
}

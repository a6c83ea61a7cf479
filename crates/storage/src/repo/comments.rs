use crate::{models::SqlComment, new_id, Db};
use chrono::Utc;
use domain::{Comment, PostId, Viewer};

impl Db {
    pub async fn insert_comment(
        &self,
        post_id: &PostId,
        author: &Viewer,
        body: &str,
    ) -> anyhow::Result<Comment> {
        let comment = Comment {
            id: new_id(),
            post_id: post_id.clone(),
            author_id: author.user_id.clone(),
            author_name: author.name.clone(),
            body: body.to_string(),
            created_at: Utc::now().naive_utc(),
        };

        sqlx::query(
            r#"
            INSERT INTO comments (id, post_id, author_id, author_name, body, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&comment.id)
        .bind(comment.post_id.as_str())
        .bind(comment.author_id.as_str())
        .bind(&comment.author_name)
        .bind(&comment.body)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(comment)
    }

    pub async fn list_comments(&self, post_id: &PostId) -> anyhow::Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, SqlComment>(
            r#"
            SELECT id, post_id, author_id, author_name, body, created_at
            FROM comments
            WHERE post_id = ?
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(post_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NewPost;
    use domain::UserId;

    async fn db_with_post(id: &str) -> (Db, PostId) {
        let db = Db::new("sqlite::memory:").await.unwrap();
        let post_id = PostId::new_unchecked(id.into());
        db.insert_post(NewPost {
            id: Some(post_id.clone()),
            title: "t".into(),
            body: "b".into(),
            image_url: None,
        })
        .await
        .unwrap();
        (db, post_id)
    }

    fn ferris() -> Viewer {
        Viewer {
            user_id: UserId::new("u1"),
            name: "Ferris".into(),
            email: "ferris@example.com".into(),
        }
    }

    #[tokio::test]
    async fn comments_scoped_to_post_in_creation_order() {
        let (db, p1) = db_with_post("p1").await;
        let p2 = PostId::new_unchecked("p2".into());
        db.insert_post(NewPost {
            id: Some(p2.clone()),
            title: "t".into(),
            body: "b".into(),
            image_url: None,
        })
        .await
        .unwrap();

        db.insert_comment(&p1, &ferris(), "one").await.unwrap();
        db.insert_comment(&p2, &ferris(), "elsewhere").await.unwrap();
        db.insert_comment(&p1, &ferris(), "two").await.unwrap();

        let bodies: Vec<_> = db
            .list_comments(&p1)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.body)
            .collect();
        assert_eq!(bodies, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn inserted_comment_carries_author() {
        let (db, p1) = db_with_post("p1").await;
        let c = db.insert_comment(&p1, &ferris(), "Great post!").await.unwrap();
        assert_eq!(c.author_name, "Ferris");
        assert_eq!(c.author_id.as_str(), "u1");

        let listed = db.list_comments(&p1).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, c.id);
        assert_eq!(listed[0].body, "Great post!");
    }

    #[tokio::test]
    async fn comment_on_unknown_post_is_rejected() {
        let db = Db::new("sqlite::memory:").await.unwrap();
        let ghost = PostId::new_unchecked("ghost".into());
        assert!(db.insert_comment(&ghost, &ferris(), "hi").await.is_err());
    }
}

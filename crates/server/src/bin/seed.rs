//! Inserts a handful of demo posts into the configured database.

// only the database section is read here
#[allow(dead_code)]
#[path = "../config.rs"]
mod config;

use anyhow::Context;
use domain::PostId;
use storage::{Db, NewPost};
use tracing::info;

use config::Settings;

const POSTS: &[(&str, &str, &str, Option<&str>)] = &[
    (
        "welcome",
        "welcome to bloggy",
        "Bloggy renders every page on the server and keeps comments live while you read.",
        Some("https://images.unsplash.com/photo-1499750310107-5fef28a66643"),
    ),
    (
        "live-comments",
        "how live comments work",
        "Open this post in two windows, leave a comment in one and watch it appear in the other.",
        None,
    ),
    (
        "presence",
        "who else is here?",
        "Signed-in readers show up next to the post date while they have the page open.",
        None,
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let settings = Settings::new().context("Failed to load configuration")?;
    let db = Db::new(&settings.database.url)
        .await
        .context("Failed to open database")?;

    for (id, title, body, image_url) in POSTS {
        let post_id = PostId::new(*id).map_err(anyhow::Error::msg)?;
        if db.post_exists(&post_id).await? {
            info!("post {} already present, skipping", id);
            continue;
        }
        db.insert_post(NewPost {
            id: Some(post_id),
            title: title.to_string(),
            body: body.to_string(),
            image_url: image_url.map(str::to_string),
        })
        .await?;
        info!("seeded post {}", id);
    }

    Ok(())
}

use domain::{initials, Comment, CommentComposer, Post, UserId};

use super::layout::{render, Chrome, Page};
use super::{date, escape, field_error, invalid_attr, DEFAULT_POST_IMAGE};

pub fn home_page(chrome: &Chrome<'_>) -> String {
    let body = format!(
        r#"<section class="hero">
  <h1>{title}</h1>
  <p class="muted">Real-time reactivity with server rendering.</p>
  <a class="btn" href="/blog">Read the blog</a>
</section>"#,
        title = escape(chrome.site_title)
    );
    render(
        chrome,
        Page {
            title: chrome.site_title.to_string(),
            description: Some("Bloggy offers real-time reactivity with server rendering"),
            body,
        },
    )
}

fn post_card(post: &Post) -> String {
    let href = format!("/blog/{}", escape(post.id.as_str()));
    format!(
        r#"<article class="card post-card">
  <div class="card-image"><img src="{img}" alt="wallpaper" loading="lazy"></div>
  <div class="card-content">
    <a href="{href}"><h1 class="card-title">{title}</h1></a>
    <p class="muted clamp-3">{body}</p>
  </div>
  <div class="card-footer"><a class="btn btn-block" href="{href}">Read more</a></div>
</article>"#,
        img = escape(post.image_url.as_deref().unwrap_or(DEFAULT_POST_IMAGE)),
        href = href,
        title = escape(&post.display_title()),
        body = escape(&post.body),
    )
}

pub fn list_page(chrome: &Chrome<'_>, posts: &[Post]) -> String {
    let cards: String = posts.iter().map(post_card).collect();
    let body = format!(
        r#"<div class="page">
  <div class="page-header">
    <h1>Our Blog</h1>
    <p class="muted">Insights, thoughts and trends from our team.</p>
  </div>
  <div class="post-grid">{cards}</div>
</div>"#,
        cards = cards
    );
    render(
        chrome,
        Page {
            title: format!("Blog | {}", chrome.site_title),
            description: Some("Insights, thoughts and trends on bloggy"),
            body,
        },
    )
}

pub fn not_found_page(chrome: &Chrome<'_>) -> String {
    render(
        chrome,
        Page {
            title: "Post not found".to_string(),
            description: None,
            body: r#"<h1 class="not-found">No Post Found</h1>"#.to_string(),
        },
    )
}

fn comment_item(c: &Comment) -> String {
    format!(
        r#"<div class="comment" data-comment-id="{id}">
  <span class="avatar"><img src="https://avatar.vercel.sh/{name_url}" alt="{name}" onerror="this.remove()"><span class="avatar-fallback">{initials}</span></span>
  <div class="comment-main">
    <div class="comment-meta"><p class="comment-author">{name}</p><p class="muted small">{date}</p></div>
    <p class="comment-body">{body}</p>
  </div>
</div>"#,
        id = escape(&c.id),
        name_url = escape(&urlencoding::encode(&c.author_name)),
        name = escape(&c.author_name),
        initials = escape(&initials(&c.author_name)),
        date = date(&c.created_at),
        body = escape(&c.body),
    )
}

fn comment_section(post: &Post, comments: &[Comment], composer: &CommentComposer) -> String {
    let error = composer.errors().get("body");
    let items: String = comments.iter().map(comment_item).collect();
    let separator = if comments.is_empty() {
        ""
    } else {
        r#"<hr class="separator">"#
    };
    format!(
        r#"<section class="card comments" data-comments data-post-id="{post_id}">
  <header class="card-header"><h2 id="comment-count">{count} Comments</h2></header>
  <div class="card-content">
    <form class="comment-form" method="post" action="/blog/{post_id}/comments" data-comment-form>
      <input type="hidden" name="postId" value="{post_id}">
      <label for="comment-body">Comment</label>
      <textarea id="comment-body" name="body" placeholder="Share Your Thoughts"{invalid}>{body}</textarea>
      {error}
      <button class="btn" type="submit">Comment</button>
    </form>
    {separator}
    <section id="comment-list">{items}</section>
  </div>
</section>"#,
        post_id = escape(post.id.as_str()),
        count = comments.len(),
        invalid = invalid_attr(error),
        body = escape(composer.body()),
        error = field_error(error),
        separator = separator,
        items = items,
    )
}

pub struct PostView<'a> {
    pub post: &'a Post,
    pub comments: &'a [Comment],
    pub viewer_id: Option<&'a UserId>,
    pub composer: &'a CommentComposer,
    pub heartbeat_secs: u64,
}

pub fn post_page(chrome: &Chrome<'_>, view: PostView<'_>) -> String {
    let post = view.post;
    let presence = match view.viewer_id {
        Some(user_id) => format!(
            r#"<div class="presence" data-presence data-room="{room}" data-user="{user}" data-heartbeat="{secs}"><span class="presence-label muted small">Viewing now</span><span class="presence-list"></span></div>"#,
            room = escape(post.id.as_str()),
            user = escape(user_id.as_str()),
            secs = view.heartbeat_secs,
        ),
        None => String::new(),
    };

    let body = format!(
        r#"<div class="post-detail">
  <a class="btn btn-outline back" href="/blog">&larr; Back to blog</a>
  <div class="hero-image"><img src="{img}" alt="{title}"></div>
  <div class="post-head">
    <h1>{title}</h1>
    <div class="post-meta">
      <p class="muted small">Posted on: {date}</p>
      {presence}
    </div>
  </div>
  <hr class="separator">
  <p class="post-body">{body}</p>
  <hr class="separator">
  {comments}
</div>"#,
        img = escape(post.image_url.as_deref().unwrap_or(DEFAULT_POST_IMAGE)),
        title = escape(&post.title),
        date = date(&post.created_at),
        presence = presence,
        body = escape(&post.body),
        comments = comment_section(post, view.comments, view.composer),
    );

    render(
        chrome,
        Page {
            title: format!("{} | {}", post.title, chrome.site_title),
            description: Some(post.body.as_str()),
            body,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::PostId;

    fn chrome() -> Chrome<'static> {
        Chrome {
            site_title: "Bloggy",
            signed_in: false,
            toast: None,
        }
    }

    fn ts() -> chrono::NaiveDateTime {
        chrono::DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .naive_utc()
    }

    fn post(id: &str, title: &str) -> Post {
        Post {
            id: PostId::new_unchecked(id.into()),
            title: title.into(),
            body: "Body <i>text</i>".into(),
            image_url: None,
            created_at: ts(),
        }
    }

    #[test]
    fn empty_listing_renders_empty_grid() {
        let html = list_page(&chrome(), &[]);
        assert!(html.contains(r#"<div class="post-grid"></div>"#));
        assert!(!html.contains("post-card"));
        assert!(html.contains("<title>Blog | Bloggy</title>"));
    }

    #[test]
    fn listing_renders_one_card_per_post() {
        let posts = vec![post("p1", "first"), post("p2", "second"), post("p3", "third")];
        let html = list_page(&chrome(), &posts);
        assert_eq!(html.matches(r#"class="card post-card""#).count(), 3);
        for p in &posts {
            assert!(html.contains(&format!(r#"href="/blog/{}""#, p.id)));
        }
        assert!(html.contains("First"));
        assert!(html.contains(DEFAULT_POST_IMAGE));
        assert!(html.contains("Body &lt;i&gt;text&lt;/i&gt;"));
    }

    fn comment(id: &str, body: &str) -> Comment {
        Comment {
            id: id.into(),
            post_id: PostId::new_unchecked("p1".into()),
            author_id: UserId::new("u1"),
            author_name: "ferris crab".into(),
            body: body.into(),
            created_at: ts(),
        }
    }

    #[test]
    fn post_page_seeds_comments_in_given_order() {
        let p = post("p1", "hello");
        let comments = vec![comment("c2", "second"), comment("c1", "first")];
        let composer = CommentComposer::new(p.id.clone());
        let html = post_page(
            &chrome(),
            PostView {
                post: &p,
                comments: &comments,
                viewer_id: None,
                composer: &composer,
                heartbeat_secs: 10,
            },
        );
        assert!(html.contains("2 Comments"));
        let second = html.find(r#"data-comment-id="c2""#).unwrap();
        let first = html.find(r#"data-comment-id="c1""#).unwrap();
        assert!(second < first);
        assert!(html.contains("FE"));
        assert!(html.contains("14/11/2023"));
        assert!(!html.contains("data-presence"));
        assert!(html.contains("<title>hello | Bloggy</title>"));
    }

    #[test]
    fn avatar_url_encodes_author_name() {
        let mut c = comment("c1", "hi");
        c.author_name = "a b#c?d/e".into();
        let html = comment_item(&c);
        assert!(html.contains("https://avatar.vercel.sh/a%20b%23c%3Fd%2Fe\""));
    }

    #[test]
    fn presence_only_with_viewer() {
        let p = post("p1", "hello");
        let composer = CommentComposer::new(p.id.clone());
        let viewer = UserId::new("u1");
        let html = post_page(
            &chrome(),
            PostView {
                post: &p,
                comments: &[],
                viewer_id: Some(&viewer),
                composer: &composer,
                heartbeat_secs: 10,
            },
        );
        assert!(html.contains(r#"data-room="p1""#));
        assert!(html.contains(r#"data-user="u1""#));
        assert!(html.contains("0 Comments"));
    }

    #[test]
    fn preserved_draft_and_error_are_rendered() {
        let p = post("p1", "hello");
        let mut composer = CommentComposer::with_body(p.id.clone(), "keep <me>");
        composer.settle(domain::SubmitOutcome::Failed);
        let html = post_page(
            &chrome(),
            PostView {
                post: &p,
                comments: &[],
                viewer_id: None,
                composer: &composer,
                heartbeat_secs: 10,
            },
        );
        assert!(html.contains("keep &lt;me&gt;</textarea>"));
    }

    #[test]
    fn not_found_has_no_comment_section() {
        let html = not_found_page(&chrome());
        assert!(html.contains("No Post Found"));
        assert!(!html.contains("data-comments"));
        assert!(html.contains("<title>Post not found</title>"));
    }
}

//! Post command handlers.

use tabled::Tabled;

use inkwell_core::{NewPost, Post, PostPatch, PostQuery, Store};

use crate::cli::{GlobalOpts, PostsArgs, PostsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(super) struct PostRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Published")]
    published: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl PostRow {
    pub(super) fn new(p: &Post, color: bool) -> Self {
        Self {
            id: p.id,
            title: util::excerpt(&p.title, 48),
            category: p.category.name.clone(),
            author: p
                .author
                .as_ref()
                .map(|a| a.username.clone())
                .unwrap_or_default(),
            published: output::flag(p.published, color),
            created: util::format_time(&p.created_at),
        }
    }
}

fn detail(p: &Post) -> String {
    let mut out = output::detail_lines(&[
        ("ID", p.id.to_string()),
        ("Title", p.title.clone()),
        ("Category", format!("{} ({})", p.category.name, p.category.id)),
        (
            "Author",
            p.author.as_ref().map(|a| a.display_name()).unwrap_or_default(),
        ),
        ("Published", output::flag(p.published, false)),
        ("Created", util::format_time(&p.created_at)),
        ("Updated", util::format_opt_time(p.updated_at.as_ref())),
    ]);
    if !p.content.is_empty() {
        out.push_str("\n\n");
        out.push_str(&p.content);
    }
    out
}

pub(super) fn render_posts(posts: &[Post], global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        posts,
        |p| PostRow::new(p, color),
        |p| p.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn render_post(post: &Post, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, post, detail, |p| p.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(store: &Store, args: PostsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        PostsCommand::List {
            category,
            published,
            drafts,
            page,
        } => {
            let mut query = PostQuery::default();
            if let Some(category) = category {
                query = query.in_category(category);
            }
            if published || drafts {
                query = query.published(published);
            }
            if let Some(page) = page {
                query = query.page(page);
            }

            store.fetch_posts(&query).await;
            let state = store.posts();
            util::ensure_loaded(&state, "posts")?;
            render_posts(&state.items, global)
        }

        PostsCommand::Get { id } => {
            let post = store
                .fetch_post(id)
                .await
                .map_err(|e| CliError::from(e).for_resource("posts", id))?;
            render_post(&post, global)
        }

        PostsCommand::Create {
            title,
            content,
            category,
            publish,
        } => {
            let body = NewPost {
                title,
                content: util::read_content(&content)?.unwrap_or_default(),
                category_id: category,
                published: publish,
            };
            let post = store.create_post(&body).await?;
            output::notice(&format!("Post {} created", post.id), global.quiet);
            render_post(&post, global)
        }

        PostsCommand::Update {
            id,
            title,
            content,
            category,
        } => {
            let patch = PostPatch {
                title,
                content: util::read_content(&content)?,
                category_id: category,
                published: None,
            };
            if patch == PostPatch::default() {
                return Err(CliError::EmptyUpdate);
            }
            let post = store
                .patch_post(id, &patch)
                .await
                .map_err(|e| CliError::from(e).for_resource("posts", id))?;
            render_post(&post, global)
        }

        PostsCommand::Publish { id } => set_published(store, id, true, global).await,
        PostsCommand::Unpublish { id } => set_published(store, id, false, global).await,

        PostsCommand::Delete { id } => {
            if !util::confirm("posts delete", &format!("Delete post {id}?"), global.yes)? {
                return Ok(());
            }
            store
                .delete_post(id)
                .await
                .map_err(|e| CliError::from(e).for_resource("posts", id))?;
            output::notice(&format!("Post {id} deleted"), global.quiet);
            Ok(())
        }

        PostsCommand::Mine => {
            let posts = store.fetch_my_posts().await?;
            render_posts(&posts, global)
        }
    }
}

async fn set_published(
    store: &Store,
    id: i64,
    published: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let patch = PostPatch {
        published: Some(published),
        ..PostPatch::default()
    };
    let post = store
        .patch_post(id, &patch)
        .await
        .map_err(|e| CliError::from(e).for_resource("posts", id))?;
    let verb = if post.published { "published" } else { "unpublished" };
    output::notice(&format!("Post {id} {verb}"), global.quiet);
    Ok(())
}
